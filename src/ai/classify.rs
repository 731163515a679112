//! Company classification into a vertical and a region bucket.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use super::{LlmClient, Prompt};
use crate::models::CompanyRecord;
use crate::outreach::{RegionBucket, Vertical};

/// First flat JSON object in a reply, with or without a code fence.
static JSON_OBJECT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{[^{}]*\}").expect("valid JSON object pattern"));

const CLASSIFY_SYSTEM: &str = "You classify startups for a venture capital fund. \
Answer with a single JSON object and nothing else.";

const CLASSIFY_TEMPERATURE: f32 = 0.1;
const CLASSIFY_MAX_TOKENS: u32 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub vertical: Vertical,
    pub region: RegionBucket,
}

impl Default for Classification {
    fn default() -> Self {
        Self {
            vertical: Vertical::Unknown,
            region: RegionBucket::Other,
        }
    }
}

#[derive(Deserialize)]
struct RawClassification {
    #[serde(default)]
    vertical: Option<String>,
    #[serde(default)]
    region: Option<String>,
}

fn build_prompt(company: &CompanyRecord) -> String {
    let verticals = Vertical::KNOWN
        .iter()
        .map(|v| format!("- {}", v.label()))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Company Name: {name}\n\
         Domain: {domain}\n\
         Description: {description}\n\
         Current Industry: {industry}\n\
         Location: {location}\n\n\
         Choose the company's primary vertical from:\n{verticals}\n- Other\n\n\
         Choose its region from: New York, Southern California, Other.\n\n\
         Respond as {{\"vertical\": \"<vertical>\", \"region\": \"<region>\"}}.",
        name = company.name,
        domain = company.domain,
        description = company.description.as_deref().unwrap_or("unknown"),
        industry = company.industry.as_deref().unwrap_or("unknown"),
        location = company.location.as_deref().unwrap_or("unknown"),
    )
}

/// Parse a model reply. Accepts a JSON object anywhere in the text, or a
/// bare vertical label (region then defaults to `Other`).
pub fn parse_classification(reply: &str) -> Classification {
    if let Some(found) = JSON_OBJECT.find(reply) {
        if let Ok(raw) = serde_json::from_str::<RawClassification>(found.as_str()) {
            return Classification {
                vertical: raw
                    .vertical
                    .as_deref()
                    .map(Vertical::from_label)
                    .unwrap_or(Vertical::Unknown),
                region: raw
                    .region
                    .as_deref()
                    .map(RegionBucket::from_label)
                    .unwrap_or(RegionBucket::Other),
            };
        }
    }

    let label = reply.trim().trim_matches(|c: char| c == '"' || c == '.' || c == '`');
    Classification {
        vertical: Vertical::from_label(label),
        region: RegionBucket::Other,
    }
}

/// Classify a company. Model failures fall back to `Unknown` / `Other`.
pub fn classify_company(llm: &dyn LlmClient, company: &CompanyRecord) -> Classification {
    let user = build_prompt(company);
    let prompt = Prompt {
        system: CLASSIFY_SYSTEM,
        user: &user,
        temperature: CLASSIFY_TEMPERATURE,
        max_tokens: CLASSIFY_MAX_TOKENS,
    };

    match llm.complete(&prompt) {
        Ok(reply) => {
            let classification = parse_classification(&reply);
            tracing::info!(
                company = %company.name,
                vertical = classification.vertical.label(),
                region = classification.region.label(),
                "Company classified"
            );
            classification
        }
        Err(e) => {
            tracing::warn!(company = %company.name, error = %e, "Classification failed, using defaults");
            Classification::default()
        }
    }
}

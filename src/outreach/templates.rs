//! Template store for outreach emails.
//!
//! Holds the base email, the per-vertical portfolio paragraph and the
//! per-region paragraph. Pure lookup and placeholder substitution; the
//! AI writer decides which fragments apply.

use serde::{Deserialize, Serialize};

use super::owners::Owner;

// ═══════════════════════════════════════════════════════════
// Classification buckets
// ═══════════════════════════════════════════════════════════

/// Industry bucket used to pick a portfolio-reference paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Vertical {
    FinancialServices,
    Construction,
    Proptech,
    AiInfrastructure,
    HealthTech,
    VerticalSaas,
    Unknown,
}

impl Vertical {
    /// Every vertical with a paragraph, in prompt order.
    pub const KNOWN: [Vertical; 6] = [
        Vertical::FinancialServices,
        Vertical::Construction,
        Vertical::Proptech,
        Vertical::AiInfrastructure,
        Vertical::HealthTech,
        Vertical::VerticalSaas,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Vertical::FinancialServices => "Financial Services",
            Vertical::Construction => "Construction",
            Vertical::Proptech => "Proptech",
            Vertical::AiInfrastructure => "AI Infrastructure",
            Vertical::HealthTech => "HealthTech",
            Vertical::VerticalSaas => "Vertical SaaS",
            Vertical::Unknown => "Other",
        }
    }

    /// Parse a model-produced label. Unrecognized labels map to `Unknown`.
    pub fn from_label(label: &str) -> Self {
        let normalized = normalize(label);
        Self::KNOWN
            .into_iter()
            .find(|v| normalize(v.label()) == normalized)
            .unwrap_or(Vertical::Unknown)
    }
}

/// Coarse geography used to pick a location paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionBucket {
    NewYork,
    SouthernCalifornia,
    Other,
}

impl RegionBucket {
    pub fn label(&self) -> &'static str {
        match self {
            RegionBucket::NewYork => "New York",
            RegionBucket::SouthernCalifornia => "Southern California",
            RegionBucket::Other => "Other",
        }
    }

    pub fn from_label(label: &str) -> Self {
        match normalize(label).as_str() {
            "newyork" | "nyc" | "ny" => RegionBucket::NewYork,
            "southerncalifornia" | "socal" => RegionBucket::SouthernCalifornia,
            _ => RegionBucket::Other,
        }
    }
}

/// Lowercase and keep only ASCII alphanumerics, so "Vertical-SaaS" == "vertical saas".
fn normalize(label: &str) -> String {
    label
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

// ═══════════════════════════════════════════════════════════
// Text
// ═══════════════════════════════════════════════════════════

const BASE_TEMPLATE: &str = "Hi [FirstName],\n\n\
I just came across you guys and wanted to introduce our fund, ScOp Venture Capital - our team all comes from operating backgrounds in software, and we lead pre-seed through Series A rounds in vertical software and AI.\n\n\
[Company Name] looks really interesting, I would love to learn more about the business and what you've built.\n\n\
Any times work to chat in the next few weeks? [Calendly Link]\n\n\
All the best!\n\n\
[Sender Name]";

/// Fragments are inserted after the greeting and the fund introduction.
const FRAGMENT_INSERT_INDEX: usize = 2;

const PARAGRAPH_SEPARATOR: &str = "\n\n";

fn vertical_paragraph(vertical: Vertical) -> Option<&'static str> {
    match vertical {
        Vertical::FinancialServices => Some(
            "We have experience with companies in financial services - our portfolio company Rogo raised a $50m Series B from Thrive building a full AI suite for banks and large financial institutions.",
        ),
        Vertical::Construction => Some(
            "We have deep experience and network in construction - our partner Kevin wrote the first check to Procore, and we have the CEO and lots of early Procore employees as LPs.",
        ),
        Vertical::Proptech => Some(
            "We have strong experience in proptech, and have the founders of Appfolio and Procore as LPs.",
        ),
        Vertical::AiInfrastructure => Some(
            "Our partners Kevin and Ivan built and sold the knowledge graph software that powered Amazon Alexa, and we have founders of MongoDB, Twilio, DoubleClick, and more as LPs.",
        ),
        Vertical::HealthTech => Some(
            "We have some experience in healthcare - our portfolio includes a patient communications company, an RCM platform, and a consumer health tracking app.",
        ),
        Vertical::VerticalSaas => Some(
            "Our partner Kevin founded DoubleClick (sold to Google), and Graphiq (sold to Amazon) - we have the founders of Procore, Appfolio, MongoDB, Twilio, and more as LPs.",
        ),
        Vertical::Unknown => None,
    }
}

fn region_paragraph(region: RegionBucket) -> Option<&'static str> {
    match region {
        RegionBucket::NewYork => Some(
            "We have several portcos in New York as well (Rogo, Promptlayer, Pangram Labs, SuiteOp).",
        ),
        RegionBucket::SouthernCalifornia => Some(
            "We're based in Santa Barbara and have pretty good local coverage and network throughout SoCal.",
        ),
        RegionBucket::Other => None,
    }
}

/// Values substituted into the base template.
#[derive(Debug, Clone, Copy)]
pub struct EmailFields<'a> {
    pub first_name: &'a str,
    pub company_name: &'a str,
    pub owner: &'a Owner,
}

/// Read-only store of outreach copy.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateStore;

impl TemplateStore {
    pub fn vertical_paragraph(&self, vertical: Vertical) -> Option<&'static str> {
        vertical_paragraph(vertical)
    }

    pub fn region_paragraph(&self, region: RegionBucket) -> Option<&'static str> {
        region_paragraph(region)
    }

    /// Base template with placeholders filled and the matching fragments inserted.
    pub fn render(&self, fields: &EmailFields<'_>, vertical: Vertical, region: RegionBucket) -> String {
        let mut paragraphs: Vec<&str> = BASE_TEMPLATE.split(PARAGRAPH_SEPARATOR).collect();
        let fragments = [vertical_paragraph(vertical), region_paragraph(region)]
            .into_iter()
            .flatten();

        let at = FRAGMENT_INSERT_INDEX.min(paragraphs.len());
        for (offset, fragment) in fragments.enumerate() {
            paragraphs.insert(at + offset, fragment);
        }

        substitute(&paragraphs.join(PARAGRAPH_SEPARATOR), fields)
    }

    /// Base template with placeholders filled and no fragments.
    pub fn render_plain(&self, fields: &EmailFields<'_>) -> String {
        substitute(BASE_TEMPLATE, fields)
    }
}

fn substitute(template: &str, fields: &EmailFields<'_>) -> String {
    let first_name = if fields.first_name.trim().is_empty() {
        "there"
    } else {
        fields.first_name.trim()
    };
    template
        .replace("[FirstName]", first_name)
        .replace("[Company Name]", fields.company_name)
        .replace("[Calendly Link]", fields.owner.scheduling_link)
        .replace("[Sender Name]", fields.owner.sender_name)
}

use serde::{Deserialize, Serialize};

use super::company::CompanyRecord;
use super::founder::FounderRecord;

/// Inbound request body. Fields default to empty so the HTTP layer can
/// report which one is missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichmentRequest {
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub list_source: String,
}

impl EnrichmentRequest {
    pub fn new(domain: impl Into<String>, list_source: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            list_source: list_source.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnrichmentStatus {
    Enriched,
    Partial,
    Failed,
    Invalid,
}

/// Terminal artifact of one enrichment run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichmentResult {
    pub status: EnrichmentStatus,
    /// Owner email, set whenever the list source was attributed.
    pub owner: Option<String>,
    pub company: Option<CompanyRecord>,
    pub founders: Vec<FounderRecord>,
}

impl EnrichmentResult {
    /// Unattributed list source: nothing was looked up.
    pub fn invalid() -> Self {
        Self {
            status: EnrichmentStatus::Invalid,
            owner: None,
            company: None,
            founders: Vec::new(),
        }
    }

    /// Neither provider matched the domain.
    pub fn failed(owner: Option<String>) -> Self {
        Self {
            status: EnrichmentStatus::Failed,
            owner,
            company: None,
            founders: Vec::new(),
        }
    }
}

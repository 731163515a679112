use serde::{Deserialize, Serialize};

/// Company data from whichever provider matched the domain.
///
/// Built once per request from a single provider; never merged across providers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyRecord {
    pub name: String,
    pub domain: String,
    pub industry: Option<String>,
    pub location: Option<String>,
    pub employee_count: Option<u64>,
    #[serde(rename = "linkedin")]
    pub linkedin_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CompanyRecord {
    /// Record with every optional field unknown, named after the domain.
    pub fn from_domain(domain: &str) -> Self {
        Self {
            name: domain.to_string(),
            domain: domain.to_string(),
            industry: None,
            location: None,
            employee_count: None,
            linkedin_url: None,
            description: None,
        }
    }
}

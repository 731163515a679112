//! Upstream enrichment providers.
//!
//! Two provider roles, each behind a trait so the orchestrator can be driven
//! by stubs in tests:
//! - `PrimaryProvider`: company + founder lookup (Specter)
//! - `FallbackProvider`: founder search and person match (Apollo)
//!
//! Every call returns `Result<Lookup<T>, ProviderError>`. `Lookup::Pending`
//! (upstream is still computing) and `Err` (transport/status/parse failure)
//! stay distinct so callers can tell "try later" from "broken".

pub mod apollo;
pub mod http;
pub mod specter;
pub mod types;

#[cfg(test)]
pub mod stub;

pub use apollo::ApolloClient;
pub use specter::SpecterClient;
pub use types::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("{provider} is unreachable at {base_url}")]
    Connection {
        provider: &'static str,
        base_url: String,
    },

    #[error("{provider} request timed out after {timeout_secs}s")]
    Timeout {
        provider: &'static str,
        timeout_secs: u64,
    },

    #[error("{provider} returned error (status {status}): {body}")]
    Status {
        provider: &'static str,
        status: u16,
        body: String,
    },

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Response parsing error: {0}")]
    ResponseParsing(String),
}

/// Company + founder lookup by domain, person detail and email by id.
pub trait PrimaryProvider: Send + Sync {
    /// Company record plus the founder references embedded in it.
    fn lookup_company(&self, domain: &str) -> Result<Lookup<CompanyMatch>, ProviderError>;

    /// Full person profile. `Pending` while the provider is still enriching.
    fn lookup_person(&self, person_id: &str) -> Result<Lookup<PersonProfile>, ProviderError>;

    fn lookup_person_email(
        &self,
        person_id: &str,
        email_type: EmailType,
    ) -> Result<Lookup<String>, ProviderError>;

    /// Resolve a person by LinkedIn URL (used for the cross-provider email hop).
    fn lookup_person_by_linkedin(
        &self,
        linkedin_url: &str,
    ) -> Result<Lookup<PersonProfile>, ProviderError>;
}

/// Person search by company domain and title, person match by id.
pub trait FallbackProvider: Send + Sync {
    /// People at `domain` holding one of `titles`, in provider order.
    fn search_founders(&self, domain: &str, titles: &[&str]) -> Result<FounderSearch, ProviderError>;

    fn match_person(&self, person_id: &str) -> Result<Lookup<PersonProfile>, ProviderError>;

    /// Match by LinkedIn URL (used for the cross-provider email hop).
    fn match_by_linkedin(&self, linkedin_url: &str) -> Result<Lookup<PersonProfile>, ProviderError>;
}

use crate::models::{CompanyRecord, EnrichmentStatus, FounderRecord};

/// Derive the response status once every founder has been processed.
///
/// `Invalid` is never produced here; it is decided before any lookup.
pub fn derive_status(company: Option<&CompanyRecord>, founders: &[FounderRecord]) -> EnrichmentStatus {
    if company.is_none() {
        return EnrichmentStatus::Failed;
    }
    if !founders.is_empty() && founders.iter().all(FounderRecord::has_email) {
        EnrichmentStatus::Enriched
    } else {
        EnrichmentStatus::Partial
    }
}

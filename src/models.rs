pub mod company;
pub mod enrichment;
pub mod founder;

pub use company::CompanyRecord;
pub use enrichment::{EnrichmentRequest, EnrichmentResult, EnrichmentStatus};
pub use founder::{split_full_name, FounderRecord};

//! Enrichment pipeline: list-source check, provider chain, founder
//! resolution, email generation and status derivation.

pub mod deadline;
pub mod founders;
pub mod orchestrator;
pub mod status;

pub use deadline::Deadline;
pub use orchestrator::{EnrichmentPipeline, FOUNDER_TITLES};
pub use status::derive_status;

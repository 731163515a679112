use std::sync::Arc;
use std::time::Duration;

use crate::pipeline::EnrichmentPipeline;

/// Shared state for all routes.
#[derive(Clone)]
pub struct ApiContext {
    pub pipeline: Arc<EnrichmentPipeline>,
    /// Budget for one whole enrichment run.
    pub request_timeout: Duration,
}

impl ApiContext {
    pub fn new(pipeline: Arc<EnrichmentPipeline>, request_timeout: Duration) -> Self {
        Self {
            pipeline,
            request_timeout,
        }
    }
}

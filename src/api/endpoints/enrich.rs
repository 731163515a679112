//! Enrichment endpoint, mounted at both `/enrich` and `/webhook`.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::models::{EnrichmentRequest, EnrichmentResult};
use crate::pipeline::Deadline;

/// `POST /enrich`: run one enrichment request.
///
/// The pipeline makes blocking HTTP calls, so it runs on the blocking pool
/// under the configured request deadline. The same deadline is handed to
/// the pipeline so it stops issuing upstream calls once the caller has
/// been answered with a 504.
pub async fn enrich(
    State(ctx): State<ApiContext>,
    body: Result<Json<EnrichmentRequest>, JsonRejection>,
) -> Result<Json<EnrichmentResult>, ApiError> {
    let Json(request) = body.map_err(|e| {
        tracing::debug!(error = %e, "Rejected enrichment body");
        ApiError::BadRequest(format!("No valid JSON data provided: {}", e.body_text()))
    })?;

    let request = validate(request)?;
    tracing::info!(domain = %request.domain, list_source = %request.list_source, "Enrichment requested");

    let pipeline = ctx.pipeline.clone();
    let deadline = Deadline::after(ctx.request_timeout);
    let task = tokio::task::spawn_blocking(move || pipeline.run_until(&request, deadline));

    match tokio::time::timeout(ctx.request_timeout, task).await {
        Ok(Ok(result)) => Ok(Json(result)),
        Ok(Err(e)) => Err(ApiError::Internal(format!("enrichment task failed: {e}"))),
        Err(_) => Err(ApiError::Timeout(ctx.request_timeout.as_secs())),
    }
}

fn validate(request: EnrichmentRequest) -> Result<EnrichmentRequest, ApiError> {
    let domain = request.domain.trim();
    if domain.is_empty() {
        return Err(ApiError::BadRequest("Domain is required".into()));
    }
    let list_source = request.list_source.trim();
    if list_source.is_empty() {
        return Err(ApiError::BadRequest("List source is required".into()));
    }
    Ok(EnrichmentRequest::new(domain, list_source))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_trims_fields() {
        let request = validate(EnrichmentRequest::new(" acme.com ", " james-list")).unwrap();
        assert_eq!(request, EnrichmentRequest::new("acme.com", "james-list"));
    }

    #[test]
    fn validate_requires_domain_first() {
        let err = validate(EnrichmentRequest::new("", "")).unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(m) if m == "Domain is required"));
    }

    #[test]
    fn validate_requires_list_source() {
        let err = validate(EnrichmentRequest::new("acme.com", "  ")).unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(m) if m == "List source is required"));
    }
}

//! Router for the enrichment API.
//!
//! Layers (outermost first): CORS, then request tracing.

use std::sync::Arc;
use std::time::Duration;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api::endpoints;
use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::pipeline::EnrichmentPipeline;

/// Build the API router around a shared pipeline.
pub fn api_router(pipeline: Arc<EnrichmentPipeline>, request_timeout: Duration) -> Router {
    build_router(ApiContext::new(pipeline, request_timeout))
}

fn build_router(ctx: ApiContext) -> Router {
    Router::new()
        .route("/health", get(endpoints::health::check))
        .route("/enrich", post(endpoints::enrich::enrich))
        .route("/webhook", post(endpoints::enrich::enrich))
        .fallback(not_found)
        .with_state(ctx)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

async fn not_found() -> ApiError {
    ApiError::NotFound
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tower::ServiceExt;

    use crate::ai::{MockLlmClient, OutreachWriter};
    use crate::outreach::ListSourcePolicy;
    use crate::providers::stub::{StubFallback, StubPrimary};
    use crate::providers::{
        CompanyMatch, EmailType, FounderRef, Lookup, PersonProfile, PrimaryProvider, ProviderError,
    };
    use crate::models::CompanyRecord;

    fn stub_primary() -> StubPrimary {
        let mut primary = StubPrimary::default();
        primary.companies.insert(
            "openai.com".into(),
            Lookup::Found(CompanyMatch {
                company: CompanyRecord {
                    name: "OpenAI".into(),
                    ..CompanyRecord::from_domain("openai.com")
                },
                founders: vec![FounderRef {
                    person_id: Some("p1".into()),
                    full_name: "Ada Lovelace".into(),
                    title: Some("CEO".into()),
                    linkedin_url: None,
                }],
            }),
        );
        primary.people.insert(
            "p1".into(),
            Lookup::Found(PersonProfile {
                person_id: Some("p1".into()),
                first_name: "Ada".into(),
                last_name: "Lovelace".into(),
                full_name: "Ada Lovelace".into(),
                title: Some("CEO".into()),
                linkedin_url: Some("https://linkedin.com/in/ada".into()),
                email: Some("ada@openai.com".into()),
            }),
        );
        primary
    }

    fn pipeline_with(primary: Arc<dyn PrimaryProvider>) -> Arc<EnrichmentPipeline> {
        Arc::new(EnrichmentPipeline::new(
            primary,
            Arc::new(StubFallback::default()),
            OutreachWriter::new(Arc::new(MockLlmClient::failing()), true),
            ListSourcePolicy::default(),
        ))
    }

    fn test_app() -> Router {
        api_router(pipeline_with(Arc::new(stub_primary())), Duration::from_secs(10))
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_of(response: axum::response::Response) -> serde_json::Value {
        let body = to_bytes(response.into_body(), 64 * 1024).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn health_reports_healthy() {
        let response = test_app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = json_of(response).await;
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["version"], crate::config::APP_VERSION);
    }

    #[tokio::test]
    async fn enrich_returns_enriched_result() {
        let response = test_app()
            .oneshot(post_json("/enrich", r#"{"domain":"openai.com","list_source":"james-list"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = json_of(response).await;
        assert_eq!(json["status"], "enriched");
        assert_eq!(json["owner"], "james@scopvc.com");
        assert_eq!(json["company"]["name"], "OpenAI");
        let founder = &json["founders"][0];
        assert_eq!(founder["email"], "ada@openai.com");
        assert_eq!(founder["linkedin"], "https://linkedin.com/in/ada");
        assert!(founder["generated_email"]
            .as_str()
            .unwrap()
            .contains("https://calendly.com/james-scopvc/30min"));
    }

    #[tokio::test]
    async fn webhook_has_identical_semantics() {
        let body = r#"{"domain":"acme.com","list_source":"random-other"}"#;
        let enrich = json_of(test_app().oneshot(post_json("/enrich", body)).await.unwrap()).await;
        let webhook = json_of(test_app().oneshot(post_json("/webhook", body)).await.unwrap()).await;
        assert_eq!(enrich, webhook);
        assert_eq!(webhook["status"], "invalid");
        assert!(webhook["owner"].is_null());
        assert!(webhook["company"].is_null());
        assert_eq!(webhook["founders"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn unknown_domain_is_failed_with_owner() {
        let response = test_app()
            .oneshot(post_json(
                "/enrich",
                r#"{"domain":"unknown-domain.xyz","list_source":"zi-campaign"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = json_of(response).await;
        assert_eq!(json["status"], "failed");
        assert_eq!(json["owner"], "zi@scopvc.com");
        assert!(json["company"].is_null());
    }

    #[tokio::test]
    async fn missing_fields_are_bad_requests() {
        let response = test_app()
            .oneshot(post_json("/enrich", r#"{"list_source":"james-list"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_of(response).await["message"], "Domain is required");

        let response = test_app()
            .oneshot(post_json("/webhook", r#"{"domain":"acme.com"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_of(response).await["message"], "List source is required");
    }

    #[tokio::test]
    async fn malformed_json_is_bad_request() {
        let response = test_app()
            .oneshot(post_json("/enrich", "{not json"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_of(response).await["status"], "error");
    }

    #[tokio::test]
    async fn unknown_route_is_json_404() {
        let response = test_app()
            .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(json_of(response).await["message"], "Endpoint not found");
    }

    struct SlowPrimary;

    impl PrimaryProvider for SlowPrimary {
        fn lookup_company(&self, _domain: &str) -> Result<Lookup<CompanyMatch>, ProviderError> {
            std::thread::sleep(Duration::from_millis(500));
            Ok(Lookup::NotFound)
        }
        fn lookup_person(&self, _id: &str) -> Result<Lookup<PersonProfile>, ProviderError> {
            Ok(Lookup::NotFound)
        }
        fn lookup_person_email(
            &self,
            _id: &str,
            _email_type: EmailType,
        ) -> Result<Lookup<String>, ProviderError> {
            Ok(Lookup::NotFound)
        }
        fn lookup_person_by_linkedin(
            &self,
            _url: &str,
        ) -> Result<Lookup<PersonProfile>, ProviderError> {
            Ok(Lookup::NotFound)
        }
    }

    #[tokio::test]
    async fn slow_pipeline_hits_request_deadline() {
        let app = api_router(pipeline_with(Arc::new(SlowPrimary)), Duration::from_millis(50));
        let response = app
            .oneshot(post_json("/enrich", r#"{"domain":"acme.com","list_source":"james-list"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(json_of(response).await["status"], "error");
    }

    /// Company lookup that outlasts the request deadline, then reports one
    /// founder whose profile lookups are counted.
    #[derive(Default)]
    struct LateCompanyPrimary {
        person_lookups: AtomicUsize,
    }

    impl PrimaryProvider for LateCompanyPrimary {
        fn lookup_company(&self, domain: &str) -> Result<Lookup<CompanyMatch>, ProviderError> {
            std::thread::sleep(Duration::from_millis(300));
            Ok(Lookup::Found(CompanyMatch {
                company: CompanyRecord::from_domain(domain),
                founders: vec![FounderRef {
                    person_id: Some("p1".into()),
                    full_name: "Ada Lovelace".into(),
                    title: None,
                    linkedin_url: None,
                }],
            }))
        }
        fn lookup_person(&self, _id: &str) -> Result<Lookup<PersonProfile>, ProviderError> {
            self.person_lookups.fetch_add(1, Ordering::SeqCst);
            Ok(Lookup::NotFound)
        }
        fn lookup_person_email(
            &self,
            _id: &str,
            _email_type: EmailType,
        ) -> Result<Lookup<String>, ProviderError> {
            Ok(Lookup::NotFound)
        }
        fn lookup_person_by_linkedin(
            &self,
            _url: &str,
        ) -> Result<Lookup<PersonProfile>, ProviderError> {
            Ok(Lookup::NotFound)
        }
    }

    #[tokio::test]
    async fn timed_out_request_stops_upstream_calls() {
        let primary = Arc::new(LateCompanyPrimary::default());
        let app = api_router(pipeline_with(primary.clone()), Duration::from_millis(50));

        let response = app
            .oneshot(post_json("/enrich", r#"{"domain":"acme.com","list_source":"james-list"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);

        // Let the blocking task finish its company lookup and wind down.
        tokio::time::sleep(Duration::from_millis(700)).await;
        assert_eq!(primary.person_lookups.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn cors_headers_present() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .header("origin", "https://example.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert!(response
            .headers()
            .contains_key("access-control-allow-origin"));
    }
}

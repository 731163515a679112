//! HTTP surface for the enrichment service.
//!
//! `POST /enrich` and `POST /webhook` run one enrichment request,
//! `GET /health` reports liveness. Everything else is a JSON 404.

pub mod endpoints;
pub mod error;
pub mod router;
pub mod server;
pub mod types;

pub use router::api_router;
pub use server::{start_api_server, ApiServer};
pub use types::ApiContext;

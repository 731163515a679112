//! Language-model classification and outreach email writing.
//!
//! The model is optional decoration: every call site has a deterministic
//! fallback, so an `AiError` never reaches the enrichment result.

pub mod classify;
pub mod openai;
pub mod writer;

pub use classify::{classify_company, Classification};
pub use openai::OpenAiClient;
pub use writer::OutreachWriter;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AiError {
    #[error("Language model is unreachable at {0}")]
    Connection(String),

    #[error("Language model request timed out after {0}s")]
    Timeout(u64),

    #[error("Language model returned error (status {status}): {body}")]
    Status { status: u16, body: String },

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Response parsing error: {0}")]
    ResponseParsing(String),

    #[error("Language model returned an empty completion")]
    EmptyCompletion,
}

/// One chat-style completion request.
#[derive(Debug, Clone, Copy)]
pub struct Prompt<'a> {
    pub system: &'a str,
    pub user: &'a str,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Abstraction over the completion backend (allows mocking in tests).
pub trait LlmClient: Send + Sync {
    fn complete(&self, prompt: &Prompt<'_>) -> Result<String, AiError>;
}

/// Scripted client for tests. Each call runs `respond` and is counted.
#[cfg(test)]
pub struct MockLlmClient {
    respond: Box<dyn Fn(&Prompt<'_>) -> Result<String, AiError> + Send + Sync>,
    calls: std::sync::atomic::AtomicUsize,
}

#[cfg(test)]
impl MockLlmClient {
    pub fn new(response: &str) -> Self {
        let response = response.to_string();
        Self::with_responder(move |_| Ok(response.clone()))
    }

    pub fn failing() -> Self {
        Self::with_responder(|_| Err(AiError::Connection("http://mock".into())))
    }

    pub fn with_responder<F>(respond: F) -> Self
    where
        F: Fn(&Prompt<'_>) -> Result<String, AiError> + Send + Sync + 'static,
    {
        Self {
            respond: Box::new(respond),
            calls: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(std::sync::atomic::Ordering::SeqCst)
    }
}

#[cfg(test)]
impl LlmClient for MockLlmClient {
    fn complete(&self, prompt: &Prompt<'_>) -> Result<String, AiError> {
        self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        (self.respond)(prompt)
    }
}

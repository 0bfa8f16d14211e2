//! HTTP reasoner adapter.
//!
//! Posts the composed instruction to a generic completion endpoint as
//! `{"instruction": "..."}` and expects `{"content": "..."}` back (a plain
//! text body is accepted as a fallback). The adapter enforces its own
//! timeout and reports failures upward; it never retries.

use async_trait::async_trait;
use colloquy_application::ports::reasoner::{Reasoner, ReasonerError, ReasonerReply};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

#[derive(Serialize)]
struct CompletionRequest<'a> {
    instruction: &'a str,
}

#[derive(Deserialize)]
struct CompletionResponse {
    content: String,
}

/// Reasoner backed by a remote completion endpoint
pub struct HttpReasoner {
    client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl HttpReasoner {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            timeout: Duration::from_secs(60),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl Reasoner for HttpReasoner {
    async fn execute(&self, instruction: &str) -> Result<ReasonerReply, ReasonerError> {
        let started = Instant::now();

        let response = self
            .client
            .post(&self.endpoint)
            .timeout(self.timeout)
            .json(&CompletionRequest { instruction })
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ReasonerError::Timeout
                } else if e.is_connect() {
                    ReasonerError::Unavailable(e.to_string())
                } else {
                    ReasonerError::RequestFailed(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            return Err(ReasonerError::RequestFailed(format!(
                "endpoint returned {}",
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ReasonerError::RequestFailed(e.to_string()))?;

        let content = match serde_json::from_str::<CompletionResponse>(&body) {
            Ok(parsed) => parsed.content,
            // Plain-text endpoints are accepted as-is.
            Err(_) => body,
        };

        if content.trim().is_empty() {
            return Err(ReasonerError::EmptyCompletion);
        }

        Ok(ReasonerReply::new(content, started.elapsed()))
    }
}

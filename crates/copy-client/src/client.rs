//! HTTP copy service and the fallback wrapper around it.

use std::future::Future;
use std::time::Duration;

use design_block::CopyBlock;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::parse::{ChatResponse, parse_copy};
use crate::prompt::build_prompt;
use crate::{CopyError, CopyRequest};

pub const DEFAULT_ENDPOINT: &str = "https://openrouter.ai/api/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "openrouter/free";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Produces copy for a request. Implementations never fail; they return the
/// static fallback instead.
pub trait CopyService: Send + Sync {
    fn generate(&self, request: &CopyRequest) -> impl Future<Output = CopyBlock> + Send;
}

/// Connection settings for [`CopyClient`].
#[derive(Debug, Clone)]
pub struct CopyServiceConfig {
    /// Bearer credential. Empty disables the network call.
    pub api_key: String,
    pub endpoint: String,
    pub model: String,
    pub timeout: Duration,
}

impl Default for CopyServiceConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Chat completion client. One request per call, never retried.
#[derive(Debug, Clone)]
pub struct CopyClient {
    http: reqwest::Client,
    config: CopyServiceConfig,
}

impl CopyClient {
    pub fn new(config: CopyServiceConfig) -> Result<Self, CopyError> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &CopyServiceConfig {
        &self.config
    }

    /// Ask the model for copy. Errors are returned, not replaced by fallback.
    pub async fn request_copy(&self, request: &CopyRequest) -> Result<CopyBlock, CopyError> {
        if self.config.api_key.trim().is_empty() {
            return Err(CopyError::MissingApiKey);
        }

        let prompt = build_prompt(request);
        let body = ChatRequest {
            model: &self.config.model,
            messages: [ChatMessage {
                role: "user",
                content: &prompt,
            }],
        };

        debug!(endpoint = %self.config.endpoint, model = %self.config.model, "Requesting copy");
        let resp = self
            .http
            .post(&self.config.endpoint)
            .bearer_auth(self.config.api_key.trim())
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        let resp_body = resp.text().await?;

        if !status.is_success() {
            return Err(CopyError::Api {
                status: status.as_u16(),
                message: resp_body,
            });
        }

        let parsed: ChatResponse = serde_json::from_str(&resp_body)?;
        parse_copy(parsed.first_content())
    }
}

impl CopyService for CopyClient {
    async fn generate(&self, request: &CopyRequest) -> CopyBlock {
        match self.request_copy(request).await {
            Ok(copy) => {
                info!(title = %copy.title, bullets = copy.bullets.len(), "Received copy");
                copy
            }
            Err(CopyError::MissingApiKey) => {
                debug!("No copy API key configured, using fallback copy");
                request.fallback()
            }
            Err(e) => {
                warn!(error = %e, purpose = ?request.purpose, "Copy service failed, using fallback copy");
                request.fallback()
            }
        }
    }
}

/// Offline service that always answers with the fallback table.
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackCopy;

impl CopyService for FallbackCopy {
    async fn generate(&self, request: &CopyRequest) -> CopyBlock {
        request.fallback()
    }
}

//! Marketing copy from an OpenAI-compatible chat completion endpoint.
//!
//! Builds the fixed copywriting prompt, sends it, and cleans the model's
//! JSON answer into a [`CopyBlock`]. Any failure degrades to the static
//! fallback copy for the chosen purpose.

pub mod client;
pub mod parse;
pub mod prompt;

use design_block::Purpose;

// Re-exports for convenience
pub use client::{CopyClient, CopyService, CopyServiceConfig, FallbackCopy};
pub use design_block::CopyBlock;
pub use parse::{parse_copy, strip_code_fences};
pub use prompt::build_prompt;

/// What the copy is written for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyRequest {
    pub purpose: Option<Purpose>,
    /// Normalized destination URL encoded in the QR code.
    pub destination: String,
    /// Free-form instruction from the user, e.g. a phone number to mention.
    pub instruction: Option<String>,
}

impl CopyRequest {
    pub fn new(purpose: Option<Purpose>, destination: impl Into<String>) -> Self {
        Self {
            purpose,
            destination: destination.into(),
            instruction: None,
        }
    }

    pub fn with_instruction(mut self, instruction: impl Into<String>) -> Self {
        let instruction = instruction.into();
        self.instruction = (!instruction.trim().is_empty()).then_some(instruction);
        self
    }

    /// Static copy for this request's purpose.
    pub fn fallback(&self) -> CopyBlock {
        CopyBlock::fallback(self.purpose)
    }
}

/// Unified error type for the copy-client crate.
#[derive(Debug, thiserror::Error)]
pub enum CopyError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Copy response is missing a title or bullets")]
    Incomplete,

    #[error("No API key configured for the copy service")]
    MissingApiKey,

    #[error("Copy API error (status {status}): {message}")]
    Api { status: u16, message: String },
}

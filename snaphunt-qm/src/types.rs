//! Core types and trait definitions for the quest matcher
//!
//! Defines the boundary between the Matcher and the hosted inference
//! provider. The provider is a constructed dependency injected as a trait
//! object, so tests can substitute a fake without any network access.

use serde::{Deserialize, Serialize};
use snaphunt_common::api::Confidence;
use thiserror::Error;

/// One classification request to the inference provider
///
/// Carries everything the provider needs for the single round-trip: the
/// system instruction (catalogue enumeration + matching policy) and the
/// submitted image as a base64 data URL.
#[derive(Debug, Clone)]
pub struct ClassifyRequest {
    /// System-level instruction block
    pub system_instruction: String,
    /// Submitted image as a data URL (`data:image/jpeg;base64,...`)
    pub image_data_url: String,
}

/// Structured decision decoded from the provider's constrained output
///
/// `location_index` is exactly what the model emitted; range validation
/// against the catalogue happens in the Matcher, which knows the catalogue
/// size. The confidence enum is validated during decoding - an unknown level
/// is a contract violation, not a default.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawMatchDecision {
    pub location_index: i64,
    pub confidence: Confidence,
}

/// Inference provider errors
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Network or provider-side failure before a usable response
    #[error("Provider unavailable: {0}")]
    Unavailable(String),

    /// Provider did not respond within the request deadline
    #[error("Provider did not respond within the deadline")]
    Timeout,

    /// Provider rejected the configured credential
    #[error("Provider rejected the API key")]
    InvalidApiKey,

    /// Provider responded, but the payload does not honor the requested
    /// output schema (malformed envelope, refusal, non-schema text)
    #[error("Provider response violates the output contract: {0}")]
    ContractViolation(String),
}

/// Vision-capable inference provider
///
/// Exactly one outbound call per classification; implementations hold no
/// per-request state and are safely shared across concurrent requests.
#[async_trait::async_trait]
pub trait VisionProvider: Send + Sync {
    /// Classify one submitted image against the instruction block
    async fn classify(&self, request: ClassifyRequest) -> Result<RawMatchDecision, ProviderError>;
}

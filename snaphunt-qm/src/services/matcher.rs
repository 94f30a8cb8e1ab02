//! Location matcher service
//!
//! Given one submitted image, decide which (if any) catalogue location it
//! depicts, with a confidence estimate, using exactly one round-trip to the
//! inference provider. The matcher is a pure request -> response function:
//! no session, no memory of prior submissions, no retries.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use std::sync::Arc;
use thiserror::Error;

use snaphunt_common::api::{MatchResponse, NO_MATCH_INDEX};
use snaphunt_common::Catalogue;

use crate::services::prompt_builder::build_system_instruction;
use crate::types::{ClassifyRequest, ProviderError, RawMatchDecision, VisionProvider};

/// Payload size ceiling (10 MiB)
pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

/// Raster formats accepted for submitted photos
const ALLOWED_MIME_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/webp"];

/// Matcher errors
#[derive(Debug, Error)]
pub enum MatchError {
    /// Missing/empty file, disallowed type, oversize; rejected before any
    /// outbound call is made
    #[error("Invalid payload: {0}")]
    PayloadInvalid(String),

    /// Network/provider-side failure calling the inference service; safe to
    /// retry at the caller's discretion (no side effects occurred)
    #[error("Inference provider unavailable: {0}")]
    UpstreamUnavailable(String),

    /// Provider responded but the payload fails schema or index-range
    /// validation; never coerced to "no match"
    #[error("Inference provider violated the output contract: {0}")]
    UpstreamContractViolation(String),

    /// Provider did not respond within the deadline
    #[error("Inference provider timed out")]
    Timeout,
}

impl From<ProviderError> for MatchError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::Unavailable(detail) => MatchError::UpstreamUnavailable(detail),
            ProviderError::Timeout => MatchError::Timeout,
            ProviderError::InvalidApiKey => {
                MatchError::UpstreamUnavailable("provider rejected the API key".to_string())
            }
            ProviderError::ContractViolation(detail) => {
                MatchError::UpstreamContractViolation(detail)
            }
        }
    }
}

/// Validate a submitted payload and return its sniffed MIME type
///
/// Content is sniffed from magic bytes rather than trusting a client-supplied
/// content type. Runs before the inference call so invalid uploads never
/// spend provider quota.
pub fn validate_payload(image: &[u8]) -> Result<&'static str, MatchError> {
    if image.is_empty() {
        return Err(MatchError::PayloadInvalid("empty image payload".to_string()));
    }

    if image.len() > MAX_IMAGE_BYTES {
        return Err(MatchError::PayloadInvalid(format!(
            "image is {} bytes; maximum is {} (10 MiB)",
            image.len(),
            MAX_IMAGE_BYTES
        )));
    }

    let kind = infer::get(image).ok_or_else(|| {
        MatchError::PayloadInvalid("payload is not a recognized image format".to_string())
    })?;

    let mime = kind.mime_type();
    if !ALLOWED_MIME_TYPES.contains(&mime) {
        return Err(MatchError::PayloadInvalid(format!(
            "unsupported file type {}; allowed: JPEG, PNG, WebP",
            mime
        )));
    }

    Ok(mime)
}

/// Location matcher
///
/// Stateless across calls: holds only the immutable catalogue and the shared
/// provider client, so concurrent invocations need no coordination.
pub struct Matcher {
    catalogue: Arc<Catalogue>,
    provider: Arc<dyn VisionProvider>,
}

impl Matcher {
    pub fn new(catalogue: Arc<Catalogue>, provider: Arc<dyn VisionProvider>) -> Self {
        Self {
            catalogue,
            provider,
        }
    }

    pub fn catalogue(&self) -> &Catalogue {
        &self.catalogue
    }

    /// Match one submitted image against the catalogue
    ///
    /// # Errors
    /// - `PayloadInvalid` before any outbound call for empty/non-image/
    ///   oversize payloads
    /// - `UpstreamUnavailable` / `Timeout` for provider transport failures
    /// - `UpstreamContractViolation` when the provider's answer fails schema
    ///   or index-range validation
    pub async fn match_image(&self, image: &[u8]) -> Result<MatchResponse, MatchError> {
        let mime = validate_payload(image)?;

        let data_url = format!("data:{};base64,{}", mime, BASE64.encode(image));
        let request = ClassifyRequest {
            system_instruction: build_system_instruction(&self.catalogue),
            image_data_url: data_url,
        };

        tracing::debug!(
            bytes = image.len(),
            mime = mime,
            catalogue_size = self.catalogue.len(),
            "submitting image for classification"
        );

        let decision = self.provider.classify(request).await?;
        self.validate_decision(decision)
    }

    /// Range-validate the provider's decision against the loaded catalogue
    fn validate_decision(&self, decision: RawMatchDecision) -> Result<MatchResponse, MatchError> {
        let catalogue_size = self.catalogue.len() as i64;

        if decision.location_index != NO_MATCH_INDEX
            && !(0..catalogue_size).contains(&decision.location_index)
        {
            // Out-of-range is treated as a hard failure: silently coercing to
            // "no match" could mask a catalogue/provider version mismatch.
            tracing::error!(
                location_index = decision.location_index,
                catalogue_size = catalogue_size,
                "provider returned out-of-range location index"
            );
            return Err(MatchError::UpstreamContractViolation(format!(
                "location_index {} out of range for catalogue of {} locations",
                decision.location_index, catalogue_size
            )));
        }

        tracing::info!(
            location_index = decision.location_index,
            confidence = decision.confidence.as_str(),
            "match complete"
        );

        Ok(MatchResponse {
            location_index: decision.location_index,
            confidence: decision.confidence,
        })
    }
}

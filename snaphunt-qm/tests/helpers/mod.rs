//! Shared test helpers: fake providers and image fixtures
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use snaphunt_common::api::Confidence;
use snaphunt_qm::types::{ClassifyRequest, ProviderError, RawMatchDecision, VisionProvider};

/// Fake provider returning a fixed decision, counting calls
///
/// The call counter backs the "payload rejection happens before any outbound
/// call" assertions.
pub struct ScriptedProvider {
    decision: RawMatchDecision,
    calls: AtomicUsize,
}

impl ScriptedProvider {
    pub fn new(location_index: i64, confidence: Confidence) -> Self {
        Self {
            decision: RawMatchDecision {
                location_index,
                confidence,
            },
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl VisionProvider for ScriptedProvider {
    async fn classify(&self, _request: ClassifyRequest) -> Result<RawMatchDecision, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.decision.clone())
    }
}

/// Which failure a [`FailingProvider`] produces
#[derive(Debug, Clone, Copy)]
pub enum Failure {
    Unavailable,
    Timeout,
    ContractViolation,
}

/// Fake provider that always fails
pub struct FailingProvider {
    failure: Failure,
}

impl FailingProvider {
    pub fn new(failure: Failure) -> Self {
        Self { failure }
    }
}

#[async_trait::async_trait]
impl VisionProvider for FailingProvider {
    async fn classify(&self, _request: ClassifyRequest) -> Result<RawMatchDecision, ProviderError> {
        Err(match self.failure {
            Failure::Unavailable => {
                ProviderError::Unavailable("connection refused (test)".to_string())
            }
            Failure::Timeout => ProviderError::Timeout,
            Failure::ContractViolation => {
                ProviderError::ContractViolation("non-schema text (test)".to_string())
            }
        })
    }
}

/// Fake provider that records the last classify request for inspection
pub struct RecordingProvider {
    decision: RawMatchDecision,
    pub seen: std::sync::Mutex<Vec<ClassifyRequest>>,
}

impl RecordingProvider {
    pub fn new(location_index: i64, confidence: Confidence) -> Self {
        Self {
            decision: RawMatchDecision {
                location_index,
                confidence,
            },
            seen: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl VisionProvider for RecordingProvider {
    async fn classify(&self, request: ClassifyRequest) -> Result<RawMatchDecision, ProviderError> {
        self.seen.lock().unwrap().push(request);
        Ok(self.decision.clone())
    }
}

// ---------------------------------------------------------------------------
// Image fixtures (magic bytes are all the content sniffer needs)
// ---------------------------------------------------------------------------

pub fn jpeg_bytes() -> Vec<u8> {
    vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46, 0x49, 0x46]
}

pub fn png_bytes() -> Vec<u8> {
    vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00]
}

pub fn webp_bytes() -> Vec<u8> {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(b"RIFF");
    bytes.extend_from_slice(&[0x24, 0x00, 0x00, 0x00]);
    bytes.extend_from_slice(b"WEBPVP8 ");
    bytes
}

/// A JPEG one mebibyte over the 10 MiB ceiling
pub fn oversize_jpeg() -> Vec<u8> {
    let mut bytes = vec![0u8; 11 * 1024 * 1024];
    bytes[..4].copy_from_slice(&[0xFF, 0xD8, 0xFF, 0xE0]);
    bytes
}

// ---------------------------------------------------------------------------
// Multipart request building
// ---------------------------------------------------------------------------

pub const TEST_BOUNDARY: &str = "snaphunt-test-boundary";

/// Content-Type header value for bodies built by [`multipart_body`]
pub fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={}", TEST_BOUNDARY)
}

/// Build a multipart/form-data body with a single file field
pub fn multipart_body(field_name: &str, filename: &str, mime: &str, data: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", TEST_BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
            field_name, filename
        )
        .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", mime).as_bytes());
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{}--\r\n", TEST_BOUNDARY).as_bytes());
    body
}

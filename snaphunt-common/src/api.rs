//! API request/response types shared between services and clients
//!
//! Callers persist `location_index` and `confidence` verbatim, so these
//! shapes are part of the external contract.

use serde::{Deserialize, Serialize};

/// Sentinel `location_index` value meaning "no confident match"
///
/// This is the only valid no-match encoding; any other out-of-range index is
/// a protocol violation.
pub const NO_MATCH_INDEX: i64 = -1;

/// Coarse three-level match certainty, opaque beyond ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::High => "high",
            Confidence::Medium => "medium",
            Confidence::Low => "low",
        }
    }
}

/// Result of matching one submitted image against the catalogue
///
/// `location_index` is a valid catalogue index or [`NO_MATCH_INDEX`].
/// `confidence` is meaningful only when a location matched; on no-match the
/// field is still present (the response schema requires it) and callers
/// ignore it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResponse {
    pub location_index: i64,
    pub confidence: Confidence,
}

impl MatchResponse {
    /// True when a catalogue location was matched
    pub fn is_match(&self) -> bool {
        self.location_index != NO_MATCH_INDEX
    }
}

/// Record callers persist when a catalogue location has been found
///
/// Stored client-side; included here because the service's output must stay
/// shape-compatible with what clients write.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoundLocation {
    /// Catalogue index of the found location
    pub index: i64,
    /// ISO-8601 timestamp of when the location was found
    pub date: String,
    /// Identifier of the captured photo in the client's object store
    pub image_id: String,
}

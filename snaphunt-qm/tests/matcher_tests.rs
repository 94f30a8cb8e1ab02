//! Matcher component tests
//!
//! Exercises the matching pipeline against fake providers: payload
//! rejection before any outbound call, index-range validation of provider
//! answers, and statelessness across repeated calls.

mod helpers;

use std::sync::Arc;

use helpers::{
    jpeg_bytes, oversize_jpeg, png_bytes, webp_bytes, Failure, FailingProvider, RecordingProvider,
    ScriptedProvider,
};
use snaphunt_common::api::{Confidence, NO_MATCH_INDEX};
use snaphunt_common::Catalogue;
use snaphunt_qm::services::matcher::{MatchError, Matcher};

fn matcher_with(provider: Arc<dyn snaphunt_qm::types::VisionProvider>) -> Matcher {
    Matcher::new(Arc::new(Catalogue::builtin()), provider)
}

#[tokio::test]
async fn empty_payload_rejected_before_provider_call() {
    let provider = Arc::new(ScriptedProvider::new(0, Confidence::High));
    let matcher = matcher_with(provider.clone());

    let result = matcher.match_image(&[]).await;

    assert!(matches!(result, Err(MatchError::PayloadInvalid(_))));
    assert_eq!(provider.call_count(), 0, "no inference call may be spent");
}

#[tokio::test]
async fn non_image_payload_rejected_before_provider_call() {
    let provider = Arc::new(ScriptedProvider::new(0, Confidence::High));
    let matcher = matcher_with(provider.clone());

    let result = matcher.match_image(b"definitely not an image").await;

    assert!(matches!(result, Err(MatchError::PayloadInvalid(_))));
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn oversize_jpeg_rejected_before_provider_call() {
    let provider = Arc::new(ScriptedProvider::new(0, Confidence::High));
    let matcher = matcher_with(provider.clone());

    let result = matcher.match_image(&oversize_jpeg()).await;

    assert!(matches!(result, Err(MatchError::PayloadInvalid(_))));
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn valid_match_returns_index_and_confidence() {
    // Deer Statue is index 3 in the built-in catalogue
    let provider = Arc::new(ScriptedProvider::new(3, Confidence::High));
    let matcher = matcher_with(provider.clone());

    let result = matcher.match_image(&jpeg_bytes()).await.unwrap();

    assert_eq!(result.location_index, 3);
    assert_eq!(result.confidence, Confidence::High);
    assert!(result.is_match());
    assert_eq!(provider.call_count(), 1);
}

#[tokio::test]
async fn all_allowed_formats_reach_the_provider() {
    let provider = Arc::new(ScriptedProvider::new(0, Confidence::Medium));
    let matcher = matcher_with(provider.clone());

    matcher.match_image(&jpeg_bytes()).await.unwrap();
    matcher.match_image(&png_bytes()).await.unwrap();
    matcher.match_image(&webp_bytes()).await.unwrap();

    assert_eq!(provider.call_count(), 3);
}

#[tokio::test]
async fn no_match_sentinel_passes_through() {
    let provider = Arc::new(ScriptedProvider::new(NO_MATCH_INDEX, Confidence::Low));
    let matcher = matcher_with(provider);

    let result = matcher.match_image(&jpeg_bytes()).await.unwrap();

    assert_eq!(result.location_index, NO_MATCH_INDEX);
    assert!(!result.is_match());
}

#[tokio::test]
async fn out_of_range_index_is_contract_violation_not_no_match() {
    // 99 against a 7-entry catalogue must never be coerced to -1
    let provider = Arc::new(ScriptedProvider::new(99, Confidence::High));
    let matcher = matcher_with(provider);

    let result = matcher.match_image(&jpeg_bytes()).await;

    assert!(matches!(
        result,
        Err(MatchError::UpstreamContractViolation(_))
    ));
}

#[tokio::test]
async fn index_equal_to_catalogue_size_is_out_of_range() {
    // Valid indices are 0..=6 for the 7-entry builtin catalogue
    let provider = Arc::new(ScriptedProvider::new(7, Confidence::Medium));
    let matcher = matcher_with(provider);

    let result = matcher.match_image(&jpeg_bytes()).await;
    assert!(matches!(
        result,
        Err(MatchError::UpstreamContractViolation(_))
    ));
}

#[tokio::test]
async fn last_valid_index_is_accepted() {
    let provider = Arc::new(ScriptedProvider::new(6, Confidence::Low));
    let matcher = matcher_with(provider);

    let result = matcher.match_image(&jpeg_bytes()).await.unwrap();
    assert_eq!(result.location_index, 6);
}

#[tokio::test]
async fn negative_index_other_than_sentinel_is_contract_violation() {
    let provider = Arc::new(ScriptedProvider::new(-2, Confidence::Low));
    let matcher = matcher_with(provider);

    let result = matcher.match_image(&jpeg_bytes()).await;
    assert!(matches!(
        result,
        Err(MatchError::UpstreamContractViolation(_))
    ));
}

#[tokio::test]
async fn provider_failures_map_to_matcher_errors() {
    let unavailable = matcher_with(Arc::new(FailingProvider::new(Failure::Unavailable)));
    assert!(matches!(
        unavailable.match_image(&jpeg_bytes()).await,
        Err(MatchError::UpstreamUnavailable(_))
    ));

    let timeout = matcher_with(Arc::new(FailingProvider::new(Failure::Timeout)));
    assert!(matches!(
        timeout.match_image(&jpeg_bytes()).await,
        Err(MatchError::Timeout)
    ));

    let contract = matcher_with(Arc::new(FailingProvider::new(Failure::ContractViolation)));
    assert!(matches!(
        contract.match_image(&jpeg_bytes()).await,
        Err(MatchError::UpstreamContractViolation(_))
    ));
}

#[tokio::test]
async fn repeated_calls_are_stateless_and_consistent() {
    let provider = Arc::new(ScriptedProvider::new(2, Confidence::Medium));
    let matcher = matcher_with(provider.clone());

    for _ in 0..3 {
        let result = matcher.match_image(&jpeg_bytes()).await.unwrap();
        assert_eq!(result.location_index, 2);
        assert_eq!(result.confidence, Confidence::Medium);
    }

    // One outbound call per invocation, nothing cached or batched
    assert_eq!(provider.call_count(), 3);
}

#[tokio::test]
async fn classify_request_carries_catalogue_and_image() {
    let provider = Arc::new(RecordingProvider::new(0, Confidence::High));
    let matcher = Matcher::new(Arc::new(Catalogue::builtin()), provider.clone());

    matcher.match_image(&png_bytes()).await.unwrap();

    let seen = provider.seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    let request = &seen[0];

    // Every catalogue entry is enumerated in the instruction block
    for location in Catalogue::builtin().locations() {
        assert!(request.system_instruction.contains(&location.name));
    }
    // The image travels as a data URL with the sniffed MIME type
    assert!(request.image_data_url.starts_with("data:image/png;base64,"));
}

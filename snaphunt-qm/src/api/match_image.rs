//! Image match API handler
//!
//! POST /api/match - multipart form upload, single `image` file field.

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    routing::post,
    Json, Router,
};

use snaphunt_common::api::MatchResponse;

use crate::error::{ApiError, ApiResult};
use crate::services::matcher::MAX_IMAGE_BYTES;
use crate::AppState;

/// Multipart field carrying the submitted photo
const IMAGE_FIELD: &str = "image";

// The transport limit sits above the 10 MiB policy ceiling so oversize
// uploads reach the matcher and get the policy's 400 answer instead of an
// opaque transport rejection.
const BODY_LIMIT_BYTES: usize = 2 * MAX_IMAGE_BYTES;

/// POST /api/match
///
/// Accepts one image file and returns the structured match result. The
/// matcher validates the payload before spending an inference call; when the
/// client disconnects, axum drops this future and the in-flight provider
/// call is cancelled with it.
pub async fn match_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<Json<MatchResponse>> {
    let mut image: Option<axum::body::Bytes> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("malformed multipart body: {}", e)))?
    {
        if field.name() == Some(IMAGE_FIELD) {
            let data = field
                .bytes()
                .await
                .map_err(|e| ApiError::BadRequest(format!("failed to read image field: {}", e)))?;
            image = Some(data);
            break;
        }
    }

    let image =
        image.ok_or_else(|| ApiError::BadRequest("no image file found in request".to_string()))?;

    let result = state.matcher.match_image(&image).await?;
    Ok(Json(result))
}

/// Build match routes
pub fn match_routes() -> Router<AppState> {
    Router::new()
        .route("/api/match", post(match_image))
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
}

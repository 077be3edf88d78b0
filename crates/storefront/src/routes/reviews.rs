//! Review route handlers.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use tracing::instrument;

use crate::db::ReviewRepository;
use crate::error::{AppError, Result};
use crate::models::{ApiMessage, NewReview, Review};
use crate::state::AppState;

/// Save a review.
///
/// POST /reviews
///
/// A rating outside 1..=5 or a missing field is a `400` with the parse error
/// as the message.
#[instrument(skip(state, body))]
pub async fn create(
    State(state): State<AppState>,
    body: std::result::Result<Json<NewReview>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiMessage>)> {
    let Json(review) = body.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    if review.review.trim().is_empty() {
        return Err(AppError::BadRequest("Review text is required".to_string()));
    }

    let saved = ReviewRepository::new(state.pool()).create(&review).await?;
    tracing::info!(review_id = %saved.id, rating = %saved.rating.get(), "Review saved");

    Ok((
        StatusCode::CREATED,
        Json(ApiMessage::new("Review saved successfully")),
    ))
}

/// All reviews.
///
/// GET /reviews
#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Review>>> {
    Ok(Json(ReviewRepository::new(state.pool()).list().await?))
}

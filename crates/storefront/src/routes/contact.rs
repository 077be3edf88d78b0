//! Contact form route handlers.

use axum::{Json, extract::State};
use tracing::instrument;

use threadline_core::Email;

use crate::db::MessageRepository;
use crate::error::{AppError, Result};
use crate::models::{ApiMessage, ContactMessage};
use crate::state::AppState;

/// Store a contact message.
///
/// POST /api/messages
#[instrument(skip(state, form), fields(email = %form.email))]
pub async fn submit_message(
    State(state): State<AppState>,
    Json(form): Json<ContactMessage>,
) -> Result<Json<ApiMessage>> {
    validate(&form)?;

    let id = MessageRepository::new(state.pool()).create(&form).await?;
    tracing::info!(message_id = %id, "Contact message stored");

    Ok(Json(ApiMessage::new("Message sent successfully!")))
}

fn validate(form: &ContactMessage) -> Result<()> {
    if Email::parse(form.email.trim()).is_err() {
        return Err(AppError::BadRequest(
            "Please enter a valid email address.".to_string(),
        ));
    }
    if form.name.trim().is_empty() || form.message.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Name and message are required.".to_string(),
        ));
    }
    Ok(())
}

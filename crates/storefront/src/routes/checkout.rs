//! Checkout route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use tracing::instrument;

use threadline_cart::DEFAULT_CONFIRMATION_PATH;

use crate::db::CheckoutRepository;
use crate::error::{AppError, Result};
use crate::models::CheckoutDetails;
use crate::state::AppState;

/// Purchase confirmation page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/complete.html")]
pub struct CheckoutCompleteTemplate;

/// Store shipping and payment details, then show the confirmation page.
///
/// POST /submit-checkout
#[instrument(skip(state, details))]
pub async fn submit(
    State(state): State<AppState>,
    Form(details): Form<CheckoutDetails>,
) -> Result<Response> {
    if details.is_empty() {
        return Err(AppError::BadRequest("No data received".to_string()));
    }

    let id = CheckoutRepository::new(state.pool())
        .create(&details)
        .await?;
    tracing::info!(checkout_id = %id, "Checkout details stored");

    Ok(Redirect::to(DEFAULT_CONFIRMATION_PATH).into_response())
}

/// Purchase confirmation page.
///
/// GET /checkout/complete
pub async fn complete() -> CheckoutCompleteTemplate {
    CheckoutCompleteTemplate
}

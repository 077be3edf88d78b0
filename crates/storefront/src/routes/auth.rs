//! Account route handlers.
//!
//! JSON in, JSON out: every response body is `{"message", "redirectUrl"?}`,
//! except `/profile`, which returns the user.

use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result, clear_sentry_user, set_sentry_user};
use crate::middleware::{RequireAuth, clear_current_user, set_current_user};
use crate::models::{ApiMessage, CurrentUser, User};
use crate::services::{AuthError, AuthService, Registration};
use crate::state::AppState;

/// Where the page goes after a successful account action.
const AFTER_AUTH_REDIRECT: &str = "/";

/// Login request body.
#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Register a new account.
///
/// POST /register
#[instrument(skip(state, registration), fields(email = %registration.email))]
pub async fn register(
    State(state): State<AppState>,
    Json(registration): Json<Registration>,
) -> Result<(StatusCode, Json<ApiMessage>)> {
    let user = AuthService::new(state.pool())
        .register_with_password(registration)
        .await?;

    tracing::info!(user_id = %user.id, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(ApiMessage::redirect(
            "Registration successful!",
            AFTER_AUTH_REDIRECT,
        )),
    ))
}

/// Log in and start an authenticated session.
///
/// POST /login
#[instrument(skip(state, session, request), fields(email = %request.email))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<LoginRequest>,
) -> Result<Json<ApiMessage>> {
    let user = AuthService::new(state.pool())
        .login_with_password(&request.email, &request.password)
        .await?;

    let current = CurrentUser {
        id: user.id,
        name: user.name,
        email: user.email,
        user_type: user.user_type,
    };
    set_current_user(&session, &current).await?;
    set_sentry_user(&current.id, Some(current.email.as_str()));

    tracing::info!(user_id = %current.id, "User logged in");

    Ok(Json(ApiMessage::redirect(
        "Login successful!",
        AFTER_AUTH_REDIRECT,
    )))
}

/// End the session.
///
/// POST /logout
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<Json<ApiMessage>> {
    clear_current_user(&session).await?;
    clear_sentry_user();

    Ok(Json(ApiMessage::redirect(
        "Logged out successfully!",
        AFTER_AUTH_REDIRECT,
    )))
}

/// The logged-in user's profile, without password material.
///
/// GET /profile
#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn profile(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<User>> {
    let profile = AuthService::new(state.pool())
        .profile(user.id)
        .await
        .map_err(|e| match e {
            AuthError::UserNotFound => AppError::NotFound("User not found".to_string()),
            other => AppError::Auth(other),
        })?;

    Ok(Json(profile))
}

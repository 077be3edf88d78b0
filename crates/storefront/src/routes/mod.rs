//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page (catalog)
//!
//! # Cart (HTMX fragments)
//! GET  /cart                   - Cart page (empty cart redirects home)
//! POST /cart/add               - Add to cart (returns count badge, triggers cart-updated)
//! POST /cart/quantity          - Step quantity (returns cart rows fragment)
//! POST /cart/size              - Change size (returns cart rows fragment)
//! POST /cart/remove            - Remove item (returns cart rows fragment)
//! GET  /cart/count             - Cart count badge (fragment)
//! POST /cart/purchase          - Clear cart, redirect to confirmation
//!
//! # Checkout
//! POST /submit-checkout        - Store checkout details
//! GET  /checkout/complete      - Confirmation page
//!
//! # Account (JSON, rate limited)
//! POST /register               - Create account
//! POST /login                  - Start session
//! POST /logout                 - End session
//! GET  /profile                - Current user (requires auth)
//!
//! # Feedback (JSON)
//! POST /api/messages           - Contact form
//! GET  /reviews                - All reviews
//! POST /reviews                - Add review
//! ```

pub mod auth;
pub mod cart;
pub mod checkout;
pub mod contact;
pub mod home;
pub mod reviews;

use axum::{
    Router,
    routing::{get, post},
};
use tower_sessions::{SessionManagerLayer, SessionStore};

use crate::middleware::auth_rate_limiter;
use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/quantity", post(cart::update_quantity))
        .route("/size", post(cart::update_size))
        .route("/remove", post(cart::remove))
        .route("/count", get(cart::count))
        .route("/purchase", post(cart::purchase))
}

/// Create the account routes router.
///
/// Register and login are rate limited per client IP.
pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route_layer(auth_rate_limiter())
        .route("/logout", post(auth::logout))
        .route("/profile", get(auth::profile))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page
        .route("/", get(home::home))
        // Cart routes
        .nest("/cart", cart_routes())
        // Checkout
        .route("/submit-checkout", post(checkout::submit))
        .route("/checkout/complete", get(checkout::complete))
        // Account routes
        .merge(account_routes())
        // Feedback
        .route("/api/messages", post(contact::submit_message))
        .route("/reviews", get(reviews::list).post(reviews::create))
}

/// The storefront application: all routes behind the given session layer.
///
/// `main` wraps this with tracing, Sentry, health checks and static files.
pub fn app<S>(state: AppState, session_layer: SessionManagerLayer<S>) -> Router
where
    S: SessionStore + Clone,
{
    routes().layer(session_layer).with_state(state)
}

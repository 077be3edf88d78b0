//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! The cart itself lives in the visitor's session under the `"cart"` key, in
//! the same JSON layout every cart back-end uses. Each request loads it into a
//! [`MemoryStorage`], runs one [`CartCommand`] through a [`Dispatcher`] and
//! writes the result back only when the command changed something.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    http::{HeaderMap, StatusCode},
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use threadline_cart::{
    CART_KEY, CartCommand, CartStore, CartView, DispatchOutcome, Dispatcher, MemoryStorage,
    Navigation,
};
use threadline_core::{LineRef, ProductRef, Size};

use crate::error::{AppError, Result, add_breadcrumb};
use crate::models::session_keys;

/// Query value the home page turns into the empty-cart notice.
pub const CART_EMPTY_NOTICE: &str = "cart_empty";

/// HTMX event fired whenever the cart changes.
const CART_UPDATED_EVENT: &str = "cart-updated";

// =============================================================================
// Session Helpers
// =============================================================================

/// Load the session cart into a dispatcher.
async fn load_dispatcher(session: &Session) -> Result<Dispatcher<MemoryStorage>> {
    let storage = match session
        .get::<serde_json::Value>(session_keys::CART)
        .await?
    {
        Some(value) => MemoryStorage::with_value(CART_KEY, value.to_string()),
        None => MemoryStorage::new(),
    };
    Ok(Dispatcher::new(CartStore::new(storage)))
}

/// Write the dispatcher's cart back to the session.
async fn save_dispatcher(session: &Session, dispatcher: Dispatcher<MemoryStorage>) -> Result<()> {
    match dispatcher.into_store().into_storage().take(CART_KEY) {
        Some(json) => {
            let value: serde_json::Value = serde_json::from_str(&json)
                .map_err(|e| AppError::Internal(format!("cart state is not JSON: {e}")))?;
            session.insert(session_keys::CART, value).await?;
        }
        None => {
            session
                .remove_value(session_keys::CART)
                .await?;
        }
    }
    Ok(())
}

/// Run one command against the session cart.
async fn run(session: &Session, command: CartCommand) -> Result<DispatchOutcome> {
    let mut dispatcher = load_dispatcher(session).await?;
    let outcome = dispatcher.dispatch(command);
    if outcome.changed {
        save_dispatcher(session, dispatcher).await?;
    }
    Ok(outcome)
}

// =============================================================================
// Forms
// =============================================================================

/// Add to cart form data, posted by a product card.
///
/// All fields are optional so a stray click yields a no-op rather than a 422.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub title: Option<String>,
    pub price: Option<String>,
    pub image_src: Option<String>,
}

impl AddToCartForm {
    /// The product being added, if the form carried one.
    fn product(&self) -> Option<ProductRef> {
        let (Some(title), Some(price), Some(image_src)) =
            (&self.title, &self.price, &self.image_src)
        else {
            return None;
        };
        match ProductRef::from_display(title, price, image_src) {
            Ok(product) => Some(product),
            Err(e) => {
                tracing::warn!(title = %title, price = %price, error = %e, "Ignoring add with bad price");
                None
            }
        }
    }
}

/// Row address posted by a cart row's controls.
#[derive(Debug, Deserialize)]
pub struct RowForm {
    pub index: usize,
    pub title: String,
}

impl RowForm {
    fn line_ref(&self) -> LineRef {
        LineRef::at(self.index).expecting(self.title.clone())
    }
}

/// Quantity "+" / "-" form data. Only the sign of `delta` matters.
#[derive(Debug, Deserialize)]
pub struct QuantityForm {
    pub index: usize,
    pub title: String,
    pub delta: i64,
}

/// Size selector form data.
#[derive(Debug, Deserialize)]
pub struct SizeForm {
    pub index: usize,
    pub title: String,
    pub size: String,
}

// =============================================================================
// Templates
// =============================================================================

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub view: CartView,
    pub notice: Option<&'static str>,
}

/// Cart rows fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_rows.html")]
pub struct CartRowsTemplate {
    pub view: CartView,
    pub notice: Option<&'static str>,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u64,
}

/// `HX-Trigger` value announcing a cart change, with the notice if any.
fn cart_updated_trigger(notice: Option<&'static str>) -> String {
    let Some(message) = notice else {
        return CART_UPDATED_EVENT.to_string();
    };
    let mut events = serde_json::Map::new();
    events.insert(
        CART_UPDATED_EVENT.to_string(),
        serde_json::json!({ "notice": message }),
    );
    serde_json::Value::Object(events).to_string()
}

/// Rows fragment, announcing the change when there was one.
fn rows_response(outcome: DispatchOutcome) -> Response {
    let notice = outcome.notice.map(|n| n.message());
    let fragment = CartRowsTemplate {
        view: outcome.view,
        notice,
    };
    if outcome.changed {
        (
            AppendHeaders([("HX-Trigger", cart_updated_trigger(notice))]),
            fragment,
        )
            .into_response()
    } else {
        fragment.into_response()
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Display cart page.
///
/// An empty cart is not shown; the visitor goes back home with a notice.
#[instrument(skip(session))]
pub async fn show(session: Session) -> Result<Response> {
    let outcome = run(&session, CartCommand::OpenCart).await?;

    if outcome.navigation == Navigation::Blocked {
        return Ok(Redirect::to(&format!("/?notice={CART_EMPTY_NOTICE}")).into_response());
    }

    Ok(CartShowTemplate {
        view: outcome.view,
        notice: None,
    }
    .into_response())
}

/// Add item to cart (HTMX).
///
/// Returns the cart count badge with an HTMX trigger so other elements refresh.
#[instrument(skip(session))]
pub async fn add(session: Session, Form(form): Form<AddToCartForm>) -> Result<Response> {
    let product = form.product();
    if let Some(product) = &product {
        add_breadcrumb("cart", "Added item", Some(&[("title", product.title.as_str())]));
    }

    let outcome = run(&session, CartCommand::Add(product)).await?;
    let count = CartCountTemplate {
        count: outcome.view.item_count,
    };

    if outcome.changed {
        let notice = outcome.notice.map(|n| n.message());
        return Ok((
            AppendHeaders([("HX-Trigger", cart_updated_trigger(notice))]),
            count,
        )
            .into_response());
    }
    Ok(count.into_response())
}

/// Step a row's quantity up or down (HTMX). Never drops below one.
#[instrument(skip(session))]
pub async fn update_quantity(
    session: Session,
    Form(form): Form<QuantityForm>,
) -> Result<Response> {
    let line = LineRef::at(form.index).expecting(form.title);
    let command = match form.delta.signum() {
        1 => CartCommand::Increment(line),
        -1 => CartCommand::Decrement(line),
        _ => CartCommand::Refresh,
    };
    Ok(rows_response(run(&session, command).await?))
}

/// Change a row's size (HTMX).
#[instrument(skip(session))]
pub async fn update_size(session: Session, Form(form): Form<SizeForm>) -> Result<Response> {
    let size: Size = form
        .size
        .parse()
        .map_err(|e: threadline_core::SizeError| AppError::BadRequest(e.to_string()))?;
    let line = LineRef::at(form.index).expecting(form.title);
    Ok(rows_response(
        run(&session, CartCommand::ChangeSize(line, size)).await?,
    ))
}

/// Remove a row (HTMX).
#[instrument(skip(session))]
pub async fn remove(session: Session, Form(form): Form<RowForm>) -> Result<Response> {
    Ok(rows_response(
        run(&session, CartCommand::Remove(form.line_ref())).await?,
    ))
}

/// Cart count badge (HTMX).
#[instrument(skip(session))]
pub async fn count(session: Session) -> Result<CartCountTemplate> {
    let outcome = run(&session, CartCommand::Refresh).await?;
    Ok(CartCountTemplate {
        count: outcome.view.item_count,
    })
}

/// Complete the purchase: empty the cart and go to the confirmation page.
///
/// HTMX requests get an `HX-Redirect`; plain form posts get a `303`.
#[instrument(skip(session, headers))]
pub async fn purchase(session: Session, headers: HeaderMap) -> Result<Response> {
    let outcome = run(&session, CartCommand::Purchase).await?;

    let Navigation::Redirect(target) = outcome.navigation else {
        return Ok(rows_response(outcome));
    };

    add_breadcrumb("cart", "Purchase completed", None);

    if headers.contains_key("hx-request") {
        return Ok((
            StatusCode::OK,
            AppendHeaders([("HX-Redirect", target)]),
        )
            .into_response());
    }
    Ok(Redirect::to(&target).into_response())
}

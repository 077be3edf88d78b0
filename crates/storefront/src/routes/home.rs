//! Home page: the product catalog.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use serde::Deserialize;
use tracing::instrument;

use threadline_cart::Notice;

use crate::catalog::CatalogProduct;
use crate::middleware::OptionalAuth;
use crate::models::CurrentUser;
use crate::routes::cart::CART_EMPTY_NOTICE;
use crate::state::AppState;

/// Home page query string.
#[derive(Debug, Default, Deserialize)]
pub struct HomeQuery {
    pub notice: Option<String>,
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub products: Vec<CatalogProduct>,
    pub notice: Option<&'static str>,
    pub user: Option<CurrentUser>,
}

/// Map a `?notice=` code to its message. Unknown codes show nothing.
fn notice_for(code: &str) -> Option<&'static str> {
    (code == CART_EMPTY_NOTICE).then(|| Notice::CartEmpty.message())
}

/// Display the home page.
#[instrument(skip(state, user))]
pub async fn home(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    Query(query): Query<HomeQuery>,
) -> HomeTemplate {
    HomeTemplate {
        products: state.catalog().products().to_vec(),
        notice: query.notice.as_deref().and_then(notice_for),
        user,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_empty_notice() {
        assert_eq!(notice_for("cart_empty"), Some("Your cart is empty!"));
    }

    #[test]
    fn test_unknown_notice_is_ignored() {
        assert_eq!(notice_for("<script>"), None);
    }
}

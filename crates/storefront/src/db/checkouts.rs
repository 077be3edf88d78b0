//! Checkout details repository.

use sqlx::PgPool;

use threadline_core::CheckoutId;

use super::RepositoryError;
use crate::models::CheckoutDetails;

/// Repository for submitted checkout details.
pub struct CheckoutRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CheckoutRepository<'a> {
    /// Create a new checkout repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Store checkout details.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, details: &CheckoutDetails) -> Result<CheckoutId, RepositoryError> {
        let id: CheckoutId = sqlx::query_scalar(
            r"
            INSERT INTO storefront.checkout (name, address, city, state, pincode, phone, payment)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            ",
        )
        .bind(details.name.trim())
        .bind(details.address.trim())
        .bind(details.city.trim())
        .bind(details.state.trim())
        .bind(details.pincode.trim())
        .bind(details.phone.trim())
        .bind(details.payment.trim())
        .fetch_one(self.pool)
        .await?;

        Ok(id)
    }
}

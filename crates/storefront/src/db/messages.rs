//! Contact message repository.

use sqlx::PgPool;

use threadline_core::MessageId;

use super::RepositoryError;
use crate::models::ContactMessage;

/// Repository for contact form submissions.
pub struct MessageRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> MessageRepository<'a> {
    /// Create a new message repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Store a contact message.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, message: &ContactMessage) -> Result<MessageId, RepositoryError> {
        let id: MessageId = sqlx::query_scalar(
            r"
            INSERT INTO storefront.message (name, email, subject, message)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            ",
        )
        .bind(message.name.trim())
        .bind(message.email.trim())
        .bind(message.subject.trim())
        .bind(message.message.trim())
        .fetch_one(self.pool)
        .await?;

        Ok(id)
    }
}

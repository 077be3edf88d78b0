//! Review repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use threadline_core::{Rating, ReviewId};

use super::RepositoryError;
use crate::models::{NewReview, Review};

#[derive(sqlx::FromRow)]
struct ReviewRow {
    id: ReviewId,
    rating: i16,
    review: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<ReviewRow> for Review {
    type Error = RepositoryError;

    fn try_from(row: ReviewRow) -> Result<Self, Self::Error> {
        let rating = Rating::new(i64::from(row.rating)).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid rating in database: {e}"))
        })?;

        Ok(Self {
            id: row.id,
            rating,
            review: row.review,
            created_at: row.created_at,
        })
    }
}

/// Repository for product reviews.
pub struct ReviewRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ReviewRepository<'a> {
    /// Create a new review repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Store a review.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, review: &NewReview) -> Result<Review, RepositoryError> {
        let row = sqlx::query_as::<_, ReviewRow>(
            r"
            INSERT INTO storefront.review (rating, review)
            VALUES ($1, $2)
            RETURNING id, rating, review, created_at
            ",
        )
        .bind(review.rating.get())
        .bind(review.review.trim())
        .fetch_one(self.pool)
        .await?;

        Review::try_from(row)
    }

    /// All reviews, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored rating is out of range.
    pub async fn list(&self) -> Result<Vec<Review>, RepositoryError> {
        let rows = sqlx::query_as::<_, ReviewRow>(
            r"
            SELECT id, rating, review, created_at
            FROM storefront.review
            ORDER BY created_at, id
            ",
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(Review::try_from).collect()
    }
}

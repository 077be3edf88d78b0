//! Product reviews.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use threadline_core::{Rating, ReviewId};

/// A stored review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Review {
    pub id: ReviewId,
    pub rating: Rating,
    pub review: String,
    pub created_at: DateTime<Utc>,
}

/// A review as submitted. The rating is range-checked while deserializing.
#[derive(Debug, Clone, Deserialize)]
pub struct NewReview {
    pub rating: Rating,
    pub review: String,
}

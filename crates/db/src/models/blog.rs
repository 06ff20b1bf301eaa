//! Blog entity model and DTOs.

use aidex_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Full blog row from the `blogs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Blog {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    pub cover_image: String,
    pub category: String,
    pub tags: Vec<String>,
    pub status: String,
    pub featured: bool,
    pub views: i32,
    pub author: String,
    pub author_id: String,
    pub read_time: i32,
    pub published_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Option<Timestamp>,
}

/// List-view projection for blog listings (no full content).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BlogSummary {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub cover_image: String,
    pub category: String,
    pub tags: Vec<String>,
    pub status: String,
    pub featured: bool,
    pub views: i32,
    pub author: String,
    pub read_time: i32,
    pub published_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// Incoming blog submission body.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateBlogSubmission {
    #[validate(length(min = 1, max = 300))]
    pub title: String,
    #[serde(default)]
    #[validate(length(max = 500))]
    pub excerpt: String,
    #[validate(length(min = 1))]
    pub content: String,
    #[serde(default)]
    pub cover_image: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub author: Option<String>,
}

/// Filter conjunction for blog listings.
#[derive(Debug, Default, Clone)]
pub struct BlogFilter {
    pub status: Option<String>,
    pub category: Option<String>,
    pub search: Option<String>,
}

/// Estimated read time in minutes: one minute per 1000 characters,
/// rounded up.
pub fn read_time_minutes(content: &str) -> i32 {
    (content.len() as i32 + 999) / 1000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_time_rounds_up() {
        assert_eq!(read_time_minutes(""), 0);
        assert_eq!(read_time_minutes(&"x".repeat(1)), 1);
        assert_eq!(read_time_minutes(&"x".repeat(1000)), 1);
        assert_eq!(read_time_minutes(&"x".repeat(1001)), 2);
        assert_eq!(read_time_minutes(&"x".repeat(4500)), 5);
    }
}

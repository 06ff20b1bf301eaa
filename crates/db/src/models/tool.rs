//! Tool entity model and DTOs.

use aidex_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Full tool row from the `tools` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Tool {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub short_description: String,
    pub description: String,
    pub logo: String,
    pub website: String,
    pub website_domain: Option<String>,
    pub categories: Vec<String>,
    pub tags: Vec<String>,
    pub pricing: String,
    pub status: String,
    pub featured: bool,
    pub trending: bool,
    pub sponsored: bool,
    pub rating: f64,
    pub votes: i32,
    pub submitted_by: String,
    pub rejection_comment: Option<String>,
    pub rejected_at: Option<Timestamp>,
    pub rejected_by: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Option<Timestamp>,
    pub updated_by: Option<String>,
}

/// List-view projection. Server-side field projection keeps directory
/// listings bounded; the long-form description never ships in lists.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ToolSummary {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub short_description: String,
    pub logo: String,
    pub website: String,
    pub categories: Vec<String>,
    pub tags: Vec<String>,
    pub pricing: String,
    pub status: String,
    pub featured: bool,
    pub trending: bool,
    pub rating: f64,
    pub votes: i32,
    pub created_at: Timestamp,
}

/// Insert-ready tool record. Built from a validated submission or from a
/// bulk-import draft; all derivation (slug, domain, logo) has already
/// happened by the time this exists.
#[derive(Debug, Clone)]
pub struct NewTool {
    pub name: String,
    pub slug: String,
    pub short_description: String,
    pub description: String,
    pub logo: String,
    pub website: String,
    pub website_domain: Option<String>,
    pub categories: Vec<String>,
    pub tags: Vec<String>,
    pub pricing: String,
    pub status: String,
    pub featured: bool,
    pub trending: bool,
    pub sponsored: bool,
    pub rating: f64,
    pub votes: i32,
    pub submitted_by: String,
}

/// Incoming single-tool submission body.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateToolSubmission {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(url)]
    pub website: String,
    #[serde(default)]
    #[validate(length(max = 300))]
    pub short_description: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub logo: String,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub pricing: Option<String>,
}

/// Admin edit body. Only provided fields are applied.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTool {
    pub name: Option<String>,
    pub short_description: Option<String>,
    pub description: Option<String>,
    pub logo: Option<String>,
    pub website: Option<String>,
    pub categories: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    pub pricing: Option<String>,
    pub status: Option<String>,
    pub featured: Option<bool>,
    pub trending: Option<bool>,
    pub sponsored: Option<bool>,
}

/// Filter conjunction for tool listings.
#[derive(Debug, Default, Clone)]
pub struct ToolFilter {
    pub status: Option<String>,
    pub category: Option<String>,
    pub search: Option<String>,
}

/// Fixed sort orders for the public directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolSort {
    Trending,
    Newest,
    Rating,
    Popular,
}

impl ToolSort {
    /// Parse the `sort` query value; unknown values fall back to trending,
    /// matching the directory's historical default.
    pub fn from_query(value: Option<&str>) -> Self {
        match value {
            Some("newest") => Self::Newest,
            Some("rating") => Self::Rating,
            Some("popular") => Self::Popular,
            _ => Self::Trending,
        }
    }

    /// The ORDER BY clause for this sort.
    pub fn order_by(self) -> &'static str {
        match self {
            Self::Trending => "trending DESC, votes DESC",
            Self::Newest => "created_at DESC",
            Self::Rating => "rating DESC",
            Self::Popular => "votes DESC",
        }
    }
}

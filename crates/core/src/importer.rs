//! Bulk tool import planning: field resolution, validation, dedup, and
//! derivation of missing fields.
//!
//! This module is pure: it turns raw key/value rows (from CSV parsing or a
//! JSON payload) into insert-ready [`ToolDraft`]s plus a [`BatchSummary`],
//! without touching the database. The caller seeds the domain set from the
//! store, persists the drafts, and writes the audit log.
//!
//! Every row is classified exactly once: `success` (a draft is produced),
//! `skipped` (duplicate normalized domain, in-store or in-batch), or
//! `failed` (missing name/website). A bad row never aborts the batch.

use std::collections::HashSet;

use crate::csv::RawRecord;
use crate::moderation::PRICING_FREE;
use crate::slug::slugify;
use crate::website::{favicon_url, normalize_domain, PLACEHOLDER_LOGO};

/// Maximum length of an auto-derived short description.
pub const SHORT_DESCRIPTION_MAX: usize = 150;

/// Default rating for bulk-imported tools with no explicit rating.
pub const DEFAULT_RATING: f64 = 4.5;

/// Default category list when a row specifies none.
pub const DEFAULT_CATEGORY: &str = "AI Tools";

// Column-name aliases per logical field, resolved first-non-empty in
// order. The odd names are historical CSV export headers that uploads
// still use.
const NAME_ALIASES: &[&str] = &["Name", "name"];
const WEBSITE_ALIASES: &[&str] = &["Website (Original)", "website", "Website"];
const CATEGORY_ALIASES: &[&str] = &["Category", "category", "categories"];
const PRICING_ALIASES: &[&str] = &["Pricing", "pricing"];
const DESCRIPTION_ALIASES: &[&str] = &["Description", "description", "shortDescription"];
const SHORT_DESCRIPTION_ALIASES: &[&str] = &["Short Description", "short_description"];
const LOGO_ALIASES: &[&str] = &["logo", "Logo"];
const TAGS_ALIASES: &[&str] = &["tags", "Tags"];
const RATING_ALIASES: &[&str] = &["rating", "Rating"];
const VOTES_ALIASES: &[&str] = &["votes", "Votes"];
const FEATURED_ALIASES: &[&str] = &["featured", "Featured"];

/// An insert-ready tool candidate produced from one import row.
///
/// `status` is implicitly `approved`: bulk-imported tools bypass
/// moderation. `trending` and `sponsored` start false.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolDraft {
    pub name: String,
    pub slug: String,
    pub short_description: String,
    pub description: String,
    pub logo: String,
    pub website: String,
    /// Normalized dedup key; `None` when the website URL is unparseable
    /// (the row is still imported).
    pub website_domain: Option<String>,
    pub categories: Vec<String>,
    pub tags: Vec<String>,
    pub pricing: String,
    pub rating: f64,
    pub votes: i32,
    pub featured: bool,
}

/// Per-batch outcome counts. Every input row lands in exactly one bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct BatchSummary {
    pub success_count: i32,
    pub skipped_count: i32,
    pub failed_count: i32,
    pub errors: Vec<String>,
}

/// The result of planning a batch: drafts to insert plus the summary.
#[derive(Debug)]
pub struct ImportPlan {
    pub drafts: Vec<ToolDraft>,
    pub summary: BatchSummary,
}

/// Plan a bulk import.
///
/// `existing_domains` must be seeded with the normalized domains of every
/// stored tool; domains of rows accepted here are added to it, so
/// duplicate rows *within* the batch are skipped too.
pub fn plan_import(rows: &[RawRecord], existing_domains: &mut HashSet<String>) -> ImportPlan {
    let mut drafts = Vec::new();
    let mut summary = BatchSummary::default();

    for row in rows {
        let name = resolve(row, NAME_ALIASES);
        let website = resolve(row, WEBSITE_ALIASES);

        let (name, website) = match (name, website) {
            (Some(n), Some(w)) => (n, w),
            (n, _) => {
                summary.failed_count += 1;
                summary.errors.push(format!(
                    "Missing required fields for tool: {}",
                    n.as_deref().unwrap_or("Unknown")
                ));
                continue;
            }
        };

        let domain = normalize_domain(&website);
        if let Some(ref d) = domain {
            if existing_domains.contains(d) {
                summary.skipped_count += 1;
                summary.errors.push(format!("Duplicate skipped: {name} ({d})"));
                continue;
            }
            existing_domains.insert(d.clone());
        }

        drafts.push(build_draft(row, name, website, domain));
        summary.success_count += 1;
    }

    ImportPlan { drafts, summary }
}

fn build_draft(
    row: &RawRecord,
    name: String,
    website: String,
    website_domain: Option<String>,
) -> ToolDraft {
    let description = resolve(row, DESCRIPTION_ALIASES).unwrap_or_default();
    let short_description = resolve(row, SHORT_DESCRIPTION_ALIASES)
        .unwrap_or_else(|| truncate(&description, SHORT_DESCRIPTION_MAX));

    let logo = resolve(row, LOGO_ALIASES).unwrap_or_else(|| {
        website_domain
            .as_deref()
            .map(favicon_url)
            .unwrap_or_else(|| PLACEHOLDER_LOGO.to_string())
    });

    let categories = resolve(row, CATEGORY_ALIASES)
        .map(|c| split_list(&c))
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| vec![DEFAULT_CATEGORY.to_string()]);

    let tags = resolve(row, TAGS_ALIASES)
        .map(|t| split_list(&t))
        .unwrap_or_default();

    let rating = resolve(row, RATING_ALIASES)
        .and_then(|r| r.parse::<f64>().ok())
        .unwrap_or(DEFAULT_RATING);

    let votes = resolve(row, VOTES_ALIASES)
        .and_then(|v| v.parse::<i32>().ok())
        .unwrap_or(0);

    let featured = resolve(row, FEATURED_ALIASES)
        .map(|f| f.eq_ignore_ascii_case("true"))
        .unwrap_or(false);

    ToolDraft {
        slug: slugify(&name),
        short_description,
        description,
        logo,
        website,
        website_domain,
        categories,
        tags,
        pricing: resolve(row, PRICING_ALIASES).unwrap_or_else(|| PRICING_FREE.to_string()),
        rating,
        votes,
        featured,
        name,
    }
}

/// Resolve a logical field from its column-name aliases; first non-empty
/// value wins.
fn resolve(row: &RawRecord, aliases: &[&str]) -> Option<String> {
    aliases
        .iter()
        .filter_map(|key| row.get(*key))
        .map(|v| v.trim())
        .find(|v| !v.is_empty())
        .map(str::to_string)
}

/// Split a comma-separated list value into trimmed, non-empty entries.
fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Truncate to at most `max` characters on a char boundary.
fn truncate(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

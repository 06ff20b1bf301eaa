//! Moderation lifecycle rules for submitted entities.
//!
//! Tools move `pending -> {approved, rejected}`, and a rejected tool may
//! be re-approved (or re-rejected with a fresh comment). An approved tool
//! is final: it never transitions again. Blogs follow the same shape with
//! `published` in place of `approved`.
//!
//! The `featured` / `trending` flags are independent of this lifecycle and
//! are plain idempotent field sets, not transitions.

use crate::error::CoreError;

// ── Tool statuses ────────────────────────────────────────────────────

pub const STATUS_PENDING: &str = "pending";
pub const STATUS_APPROVED: &str = "approved";
pub const STATUS_REJECTED: &str = "rejected";
pub const VALID_TOOL_STATUSES: &[&str] = &[STATUS_PENDING, STATUS_APPROVED, STATUS_REJECTED];

// ── Blog statuses ────────────────────────────────────────────────────

pub const BLOG_STATUS_PENDING: &str = "pending";
pub const BLOG_STATUS_PUBLISHED: &str = "published";
pub const BLOG_STATUS_REJECTED: &str = "rejected";
pub const VALID_BLOG_STATUSES: &[&str] = &[
    BLOG_STATUS_PENDING,
    BLOG_STATUS_PUBLISHED,
    BLOG_STATUS_REJECTED,
];

// ── Pricing ──────────────────────────────────────────────────────────

pub const PRICING_FREE: &str = "Free";
pub const VALID_PRICING: &[&str] = &["Free", "Freemium", "Paid", "Contact for Pricing"];

/// Comment stored when a rejection arrives with no reason.
pub const DEFAULT_REJECTION_COMMENT: &str = "No reason provided";

/// Validate a moderation transition for a tool.
///
/// `target` must be `approved` or `rejected`. Any transition out of
/// `approved` is refused; re-approving or re-rejecting a rejected tool is
/// allowed.
pub fn check_transition(current: &str, target: &str) -> Result<(), CoreError> {
    match target {
        STATUS_APPROVED | STATUS_REJECTED => {}
        other => {
            return Err(CoreError::Validation(format!(
                "Invalid target status '{other}'"
            )));
        }
    }

    if current == STATUS_APPROVED {
        return Err(CoreError::Validation(format!(
            "Tool is already approved and cannot transition to '{target}'"
        )));
    }

    Ok(())
}

/// Validate a moderation transition for a blog (`published` is terminal).
pub fn check_blog_transition(current: &str, target: &str) -> Result<(), CoreError> {
    match target {
        BLOG_STATUS_PUBLISHED | BLOG_STATUS_REJECTED => {}
        other => {
            return Err(CoreError::Validation(format!(
                "Invalid target status '{other}'"
            )));
        }
    }

    if current == BLOG_STATUS_PUBLISHED {
        return Err(CoreError::Validation(format!(
            "Blog is already published and cannot transition to '{target}'"
        )));
    }

    Ok(())
}

/// Normalize a rejection comment, substituting the default for blank input.
pub fn rejection_comment(comment: Option<&str>) -> String {
    match comment.map(str::trim) {
        Some(c) if !c.is_empty() => c.to_string(),
        _ => DEFAULT_REJECTION_COMMENT.to_string(),
    }
}

/// Validate that `pricing` is one of the known tiers.
pub fn validate_pricing(pricing: &str) -> Result<(), CoreError> {
    if VALID_PRICING.contains(&pricing) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid pricing '{pricing}'. Must be one of: {}",
            VALID_PRICING.join(", ")
        )))
    }
}

/// Validate that `status` is a known tool status.
pub fn validate_tool_status(status: &str) -> Result<(), CoreError> {
    if VALID_TOOL_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid status '{status}'. Must be one of: {}",
            VALID_TOOL_STATUSES.join(", ")
        )))
    }
}

//! Pure domain logic for the aidex tool directory.
//!
//! This crate has no database or HTTP dependencies. It holds the error
//! taxonomy, shared type aliases, and the logic that is worth testing in
//! isolation: slug derivation, website-domain normalization, the CSV row
//! parser, bulk-import field resolution, and moderation status rules.

pub mod csv;
pub mod error;
pub mod importer;
pub mod moderation;
pub mod roles;
pub mod slug;
pub mod types;
pub mod website;

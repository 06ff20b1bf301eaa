pub mod blog_repo;
pub mod bulk_upload_log_repo;
pub mod shop_product_repo;
pub mod tool_repo;
pub mod user_role_repo;

pub use blog_repo::BlogRepo;
pub use bulk_upload_log_repo::BulkUploadLogRepo;
pub use shop_product_repo::ShopProductRepo;
pub use tool_repo::ToolRepo;
pub use user_role_repo::UserRoleRepo;

/// Escape LIKE/ILIKE metacharacters in a user-supplied search term so it
/// matches as a literal substring.
pub(crate) fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

pub mod blog;
pub mod bulk_upload_log;
pub mod shop_product;
pub mod tool;
pub mod user_role;

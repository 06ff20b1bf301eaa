pub mod admin_blogs;
pub mod admin_tools;
pub mod blogs;
pub mod bulk;
pub mod search;
pub mod shop;
pub mod tools;
pub mod users;

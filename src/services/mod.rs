pub mod auth;
pub mod feed;
pub mod posts;
pub mod seo;
pub mod slug;
pub mod text;

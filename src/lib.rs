pub mod cli;
pub mod config;
pub mod db;
pub mod models;
pub mod services;
pub mod web;

#[cfg(test)]
mod tests;

pub use config::Config;
pub use db::Database;
pub use services::seo::score_seo;
pub use services::slug::generate_slug;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub site: SiteConfig,
    #[serde(default)]
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub content: ContentConfig,
    #[serde(default)]
    pub feed: FeedConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SiteConfig {
    pub title: String,
    pub description: String,
    pub url: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub favicon: Option<String>,
    #[serde(default)]
    pub copyright: Option<String>,
    pub author: AuthorConfig,
}

impl SiteConfig {
    pub fn base_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }

    pub fn blog_url(&self) -> String {
        format!("{}/blog", self.base_url())
    }

    /// Public address of a post, also used as its feed id.
    pub fn post_url(&self, slug: &str) -> String {
        format!("{}/{}", self.blog_url(), slug)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthorConfig {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub path: String,
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    #[serde(default = "default_session_lifetime_days")]
    pub session_lifetime_days: i64,
    /// Accounts granted admin access regardless of their stored role.
    #[serde(default)]
    pub admin_emails: Vec<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_lifetime_days: default_session_lifetime_days(),
            admin_emails: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ContentConfig {
    /// Allowed post categories. Empty accepts any category.
    #[serde(default)]
    pub categories: Vec<String>,
}

impl ContentConfig {
    pub fn accepts_category(&self, category: &str) -> bool {
        self.categories.is_empty() || self.categories.iter().any(|c| c == category)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FeedConfig {
    #[serde(default = "default_feed_limit")]
    pub limit: usize,
    #[serde(default = "default_generator")]
    pub generator: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            limit: default_feed_limit(),
            generator: default_generator(),
        }
    }
}

fn default_language() -> String {
    "en".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_pool_size() -> u32 {
    10
}

fn default_session_lifetime_days() -> i64 {
    7
}

fn default_feed_limit() -> usize {
    10
}

fn default_generator() -> String {
    format!("blogdesk {}", env!("CARGO_PKG_VERSION"))
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            anyhow::anyhow!(
                "Could not read config file '{}': {}. Run 'blogdesk init' to create one.",
                path.display(),
                e
            )
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let site_url = url::Url::parse(&self.site.url)
            .map_err(|e| anyhow::anyhow!("site.url '{}' is not a valid URL: {}", self.site.url, e))?;
        if !matches!(site_url.scheme(), "http" | "https") {
            anyhow::bail!("site.url must use http or https");
        }
        if self.database.pool_size == 0 {
            anyhow::bail!("database.pool_size must be greater than 0");
        }
        if self.auth.session_lifetime_days <= 0 {
            anyhow::bail!("auth.session_lifetime_days must be greater than 0");
        }
        if self.feed.limit == 0 {
            anyhow::bail!("feed.limit must be greater than 0");
        }
        if self.feed.limit > 100 {
            anyhow::bail!("feed.limit must be 100 or less");
        }
        Ok(())
    }
}

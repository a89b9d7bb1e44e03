use anyhow::Result;
use std::path::PathBuf;

pub async fn run(path: PathBuf, name: Option<String>) -> Result<()> {
    let site_name = name.unwrap_or_else(|| "My Blog".to_string());
    let config_path = path.join("blogdesk.toml");

    if config_path.exists() {
        anyhow::bail!("{} already exists", config_path.display());
    }

    std::fs::create_dir_all(path.join("data"))?;

    let config = format!(
        r#"[site]
title = "{}"
description = "A blog"
url = "http://localhost:3000"
language = "en"

[site.author]
name = "{}"

[server]
host = "127.0.0.1"
port = 3000

[database]
path = "./data/blogdesk.db"
pool_size = 10

[auth]
session_lifetime_days = 7
# Accounts listed here may manage posts whatever their role.
admin_emails = []

[content]
# Leave empty to accept any category.
categories = []

[feed]
limit = 10
"#,
        site_name.replace('"', "\\\""),
        site_name.replace('"', "\\\""),
    );

    std::fs::write(&config_path, config)?;

    tracing::info!("Created new blog config at {:?}", config_path);
    tracing::info!("Run 'blogdesk migrate' to set up the database");
    tracing::info!("Run 'blogdesk serve' and open /admin/setup to create the first admin");

    Ok(())
}

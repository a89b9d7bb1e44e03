use crate::config::ContentConfig;
use crate::models::{Post, PostInput};
use crate::services::slug::{generate_slug, shorten_slug, validate_slug};
use crate::services::text::{html_to_text, reading_time_minutes, sanitize_html};
use crate::Database;
use anyhow::Result;
use rusqlite::OptionalExtension;
use thiserror::Error;

const POST_COLUMNS: &str = "id, slug, title, meta_description, keywords, image_url, category, content, plain_content, reading_time, views, created_at, updated_at";

const MAX_TITLE_LENGTH: usize = 300;
const MAX_DESCRIPTION_LENGTH: usize = 1000;

#[derive(Debug, Error)]
pub enum PostError {
    #[error("{0}")]
    Validation(String),
    #[error("A post with the slug '{0}' already exists")]
    DuplicateSlug(String),
    #[error("Post not found")]
    NotFound,
}

/// Validated, derived column values for an insert or update.
struct PreparedPost {
    slug: String,
    title: String,
    meta_description: String,
    keywords: String,
    image_url: Option<String>,
    category: Option<String>,
    content: String,
    plain_content: String,
    reading_time: u32,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn prepare(input: PostInput, content_config: &ContentConfig) -> Result<PreparedPost, PostError> {
    let title = input.title.trim().to_string();
    let slug = match input.slug.trim() {
        "" => shorten_slug(&generate_slug(&title)).to_string(),
        provided => provided.to_string(),
    };

    if title.is_empty() || slug.is_empty() {
        return Err(PostError::Validation(
            "Title and URL slug are required".to_string(),
        ));
    }
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(PostError::Validation(format!(
            "Title must be {} characters or less",
            MAX_TITLE_LENGTH
        )));
    }
    if !validate_slug(&slug) {
        return Err(PostError::Validation(
            "Invalid slug: must be 1-200 characters, lowercase letters, numbers, and hyphens only"
                .to_string(),
        ));
    }
    if input.meta_description.chars().count() > MAX_DESCRIPTION_LENGTH {
        return Err(PostError::Validation(format!(
            "Meta description must be {} characters or less",
            MAX_DESCRIPTION_LENGTH
        )));
    }

    let image_url = non_empty(input.image_url);
    if let Some(ref raw) = image_url {
        let parsed = url::Url::parse(raw)
            .map_err(|_| PostError::Validation(format!("Invalid image URL '{}'", raw)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(PostError::Validation(
                "Image URL must use http or https".to_string(),
            ));
        }
    }

    let category = non_empty(input.category);
    if let Some(ref c) = category {
        if !content_config.accepts_category(c) {
            return Err(PostError::Validation(format!("Unknown category '{}'", c)));
        }
    }

    let content = sanitize_html(&input.content);
    let plain_content = html_to_text(&content);
    let reading_time = reading_time_minutes(&plain_content);

    Ok(PreparedPost {
        slug,
        title,
        meta_description: input.meta_description,
        keywords: input.keywords,
        image_url,
        category,
        content,
        plain_content,
        reading_time,
    })
}

fn map_unique_violation(err: rusqlite::Error, slug: &str) -> anyhow::Error {
    match err {
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            PostError::DuplicateSlug(slug.to_string()).into()
        }
        other => other.into(),
    }
}

pub fn create_post(db: &Database, input: PostInput, content_config: &ContentConfig) -> Result<i64> {
    let post = prepare(input, content_config)?;
    let now = chrono::Utc::now().to_rfc3339();

    let conn = db.get()?;
    conn.execute(
        r#"
        INSERT INTO posts (slug, title, meta_description, keywords, image_url, category, content, plain_content, reading_time, views, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, 0, ?, ?)
        "#,
        (
            &post.slug,
            &post.title,
            &post.meta_description,
            &post.keywords,
            &post.image_url,
            &post.category,
            &post.content,
            &post.plain_content,
            post.reading_time,
            &now,
            &now,
        ),
    )
    .map_err(|e| map_unique_violation(e, &post.slug))?;

    let id = conn.last_insert_rowid();
    tracing::info!("Created post id={} slug={}", id, post.slug);
    Ok(id)
}

pub fn update_post(
    db: &Database,
    id: i64,
    input: PostInput,
    content_config: &ContentConfig,
) -> Result<()> {
    let post = prepare(input, content_config)?;
    let now = chrono::Utc::now().to_rfc3339();

    let conn = db.get()?;
    let affected = conn
        .execute(
            r#"
            UPDATE posts SET slug = ?, title = ?, meta_description = ?, keywords = ?, image_url = ?, category = ?, content = ?, plain_content = ?, reading_time = ?, updated_at = ?
            WHERE id = ?
            "#,
            (
                &post.slug,
                &post.title,
                &post.meta_description,
                &post.keywords,
                &post.image_url,
                &post.category,
                &post.content,
                &post.plain_content,
                post.reading_time,
                &now,
                id,
            ),
        )
        .map_err(|e| map_unique_violation(e, &post.slug))?;

    if affected == 0 {
        return Err(PostError::NotFound.into());
    }
    tracing::info!("Updated post id={}", id);
    Ok(())
}

pub fn delete_post(db: &Database, id: i64) -> Result<()> {
    let conn = db.get()?;
    let affected = conn.execute("DELETE FROM posts WHERE id = ?", [id])?;
    if affected == 0 {
        return Err(PostError::NotFound.into());
    }
    tracing::info!("Deleted post id={}", id);
    Ok(())
}

pub fn get_post(db: &Database, id: i64) -> Result<Option<Post>> {
    let conn = db.get()?;
    let post = conn
        .query_row(
            &format!("SELECT {POST_COLUMNS} FROM posts WHERE id = ?"),
            [id],
            row_to_post,
        )
        .optional()?;
    Ok(post)
}

pub fn get_post_by_slug(db: &Database, slug: &str) -> Result<Option<Post>> {
    let conn = db.get()?;
    let post = conn
        .query_row(
            &format!("SELECT {POST_COLUMNS} FROM posts WHERE slug = ?"),
            [slug],
            row_to_post,
        )
        .optional()?;
    Ok(post)
}

/// Newest first, by creation time.
pub fn list_posts(db: &Database, limit: usize, offset: usize) -> Result<Vec<Post>> {
    let conn = db.get()?;
    let mut stmt = conn.prepare(&format!(
        "SELECT {POST_COLUMNS} FROM posts ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?"
    ))?;
    let posts = stmt
        .query_map((limit as i64, offset as i64), row_to_post)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(posts)
}

pub fn count_posts(db: &Database) -> Result<i64> {
    let conn = db.get()?;
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM posts", [], |row| row.get(0))?;
    Ok(count)
}

/// Bumps the view counter; returns false when no post has that slug.
pub fn record_view(db: &Database, slug: &str) -> Result<bool> {
    let conn = db.get()?;
    let affected = conn.execute("UPDATE posts SET views = views + 1 WHERE slug = ?", [slug])?;
    Ok(affected > 0)
}

/// Categories in use, for the editor's category picker.
pub fn used_categories(db: &Database) -> Result<Vec<String>> {
    let conn = db.get()?;
    let mut stmt = conn.prepare(
        "SELECT DISTINCT category FROM posts WHERE category IS NOT NULL ORDER BY category",
    )?;
    let categories = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(categories)
}

fn row_to_post(row: &rusqlite::Row) -> rusqlite::Result<Post> {
    Ok(Post {
        id: row.get(0)?,
        slug: row.get(1)?,
        title: row.get(2)?,
        meta_description: row.get(3)?,
        keywords: row.get(4)?,
        image_url: row.get(5)?,
        category: row.get(6)?,
        content: row.get(7)?,
        plain_content: row.get(8)?,
        reading_time: row.get(9)?,
        views: row.get(10)?,
        created_at: row.get(11)?,
        updated_at: row.get(12)?,
    })
}

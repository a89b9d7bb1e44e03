use crate::web::security::RateLimiter;
use crate::{Config, Database};
use anyhow::Result;
use std::collections::HashMap;
use std::sync::Arc;
use tera::{Tera, Value};

pub struct AppState {
    pub config: Config,
    pub db: Database,
    pub templates: Tera,
    pub rate_limiter: Arc<RateLimiter>,
}

impl AppState {
    pub fn new(config: Config, db: Database) -> Result<Self> {
        Ok(Self {
            config,
            db,
            templates: load_templates()?,
            rate_limiter: Arc::new(RateLimiter::default()),
        })
    }
}

fn load_templates() -> Result<Tera> {
    let mut templates = Tera::default();

    templates.register_filter("format_date", format_date_filter);
    templates.add_raw_templates(vec![
        ("admin/base.html", include_str!("../../templates/admin/base.html")),
        ("admin/login.html", include_str!("../../templates/admin/login.html")),
        ("admin/setup.html", include_str!("../../templates/admin/setup.html")),
        ("admin/posts/index.html", include_str!("../../templates/admin/posts/index.html")),
        ("admin/posts/form.html", include_str!("../../templates/admin/posts/form.html")),
        ("htmx/seo.html", include_str!("../../templates/htmx/seo.html")),
        ("htmx/slug.html", include_str!("../../templates/htmx/slug.html")),
    ])?;

    Ok(templates)
}

fn format_date_filter(value: &Value, args: &HashMap<String, Value>) -> tera::Result<Value> {
    let date_str = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("format_date requires a string"))?;

    let format = args
        .get("format")
        .and_then(|v| v.as_str())
        .unwrap_or("%B %d, %Y");

    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(date_str) {
        return Ok(Value::String(dt.format(format).to_string()));
    }

    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(date_str, "%Y-%m-%d %H:%M:%S") {
        return Ok(Value::String(dt.format(format).to_string()));
    }

    Ok(Value::String(date_str.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date_rfc3339() {
        let value = Value::String("2025-03-01T10:00:00+00:00".to_string());
        let formatted = format_date_filter(&value, &HashMap::new()).unwrap();
        assert_eq!(formatted, Value::String("March 01, 2025".to_string()));
    }

    fn editor_context(is_new: bool) -> tera::Context {
        let input = crate::models::PostInput {
            title: "Tenses".to_string(),
            ..Default::default()
        };
        let mut ctx = tera::Context::new();
        ctx.insert("site", &serde_json::json!({"title": "Blog", "language": "en"}));
        ctx.insert("post", &input);
        ctx.insert("post_id", &(!is_new).then_some(7));
        ctx.insert("is_new", &is_new);
        ctx.insert("categories", &Vec::<String>::new());
        ctx.insert("seo", &crate::web::handlers::htmx::SeoPanel::for_input(&input));
        ctx.insert("error", &Option::<String>::None);
        ctx
    }

    #[test]
    fn test_editor_rescores_on_every_input() {
        let templates = load_templates().unwrap();
        let html = templates
            .render("admin/posts/form.html", &editor_context(true))
            .unwrap();
        assert!(html.contains(r#"hx-trigger="input delay:400ms, change""#));
        assert!(html.contains(r#"hx-post="/htmx/slug""#));
        assert!(html.contains("id=\"seo-panel\""));
    }

    #[test]
    fn test_editor_delete_asks_for_confirmation() {
        let templates = load_templates().unwrap();
        let html = templates
            .render("admin/posts/form.html", &editor_context(false))
            .unwrap();
        assert!(html.contains(r#"hx-post="/admin/posts/7/delete""#));
        assert!(html.contains("hx-confirm="));
        assert!(!html.contains(r#"hx-post="/htmx/slug""#));
    }

    #[test]
    fn test_post_list_renders_page_links() {
        let templates = load_templates().unwrap();
        let mut ctx = tera::Context::new();
        ctx.insert("site", &serde_json::json!({"title": "Blog", "language": "en"}));
        ctx.insert(
            "listing",
            &serde_json::json!({
                "posts": [],
                "total": 60,
                "page": 2,
                "per_page": 25,
                "total_pages": 3,
                "prev_page": 1,
                "next_page": 3,
            }),
        );
        let html = templates.render("admin/posts/index.html", &ctx).unwrap();
        assert!(html.contains("/admin?page=1&amp;per_page=25"));
        assert!(html.contains("/admin?page=3&amp;per_page=25"));
        assert!(html.contains("Page 2 of 3"));
    }

    #[test]
    fn test_format_date_passthrough() {
        let value = Value::String("yesterday".to_string());
        let formatted = format_date_filter(&value, &HashMap::new()).unwrap();
        assert_eq!(formatted, Value::String("yesterday".to_string()));
    }
}

use crate::models::{PostInput, ScoreInput, ScoreResult};
use crate::services::seo::{score_seo, DESCRIPTION_SOFT_LIMIT};
use crate::services::slug::{generate_slug, shorten_slug};
use crate::services::text::html_to_text;
use crate::web::error::AppResult;
use crate::web::extractors::PostEditor;
use crate::web::state::AppState;
use axum::extract::State;
use axum::response::Html;
use axum::Form;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tera::Context;

/// Everything the SEO panel of the editor shows.
#[derive(Debug, Serialize)]
pub struct SeoPanel {
    pub score: ScoreResult,
    pub measured: ScoreInput,
    pub description_limit: usize,
    pub description_too_long: bool,
}

impl SeoPanel {
    pub fn for_input(input: &PostInput) -> Self {
        let plain = html_to_text(&input.content);
        let measured = ScoreInput::from_fields(
            &input.title,
            &input.meta_description,
            &plain,
            &input.keywords,
        );

        Self {
            score: score_seo(measured),
            measured,
            description_limit: DESCRIPTION_SOFT_LIMIT,
            description_too_long: measured.description_length > DESCRIPTION_SOFT_LIMIT,
        }
    }
}

pub async fn seo(
    State(state): State<Arc<AppState>>,
    PostEditor(_user): PostEditor,
    Form(input): Form<PostInput>,
) -> AppResult<Html<String>> {
    let mut ctx = Context::new();
    ctx.insert("seo", &SeoPanel::for_input(&input));

    let rendered = state.templates.render("htmx/seo.html", &ctx)?;
    Ok(Html(rendered))
}

#[derive(Deserialize)]
pub struct SlugForm {
    #[serde(default)]
    title: String,
}

pub async fn slug(
    State(state): State<Arc<AppState>>,
    PostEditor(_user): PostEditor,
    Form(form): Form<SlugForm>,
) -> AppResult<Html<String>> {
    let mut ctx = Context::new();
    ctx.insert("slug", shorten_slug(&generate_slug(&form.title)));

    let rendered = state.templates.render("htmx/slug.html", &ctx)?;
    Ok(Html(rendered))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Badge, Signal, SignalRating};

    #[test]
    fn test_panel_measures_plain_text_of_content() {
        let input = PostInput {
            title: "  Fifty chars of title text for the search engines  ".to_string(),
            content: format!("<p>{}</p>", "a".repeat(1500)),
            keywords: "grammar,tips,english".to_string(),
            meta_description: "d".repeat(130),
            ..PostInput::default()
        };

        let panel = SeoPanel::for_input(&input);
        assert_eq!(panel.measured.content_length, 1500);
        assert_eq!(panel.measured.title_length, 52);
        assert_eq!(panel.score.percent, 100);
        assert_eq!(panel.score.badge, Badge::Good);
        assert!(!panel.description_too_long);
    }

    #[test]
    fn test_panel_measures_title_as_typed() {
        let input = PostInput {
            title: format!("{} ", "a".repeat(39)),
            ..PostInput::default()
        };

        let panel = SeoPanel::for_input(&input);
        assert_eq!(panel.measured.title_length, 40);
        assert_eq!(panel.score.label(Signal::Title), SignalRating::Excellent);
        assert_eq!(panel.score.percent, 100);
    }

    #[test]
    fn test_panel_flags_long_description() {
        let input = PostInput {
            meta_description: "d".repeat(156),
            ..PostInput::default()
        };

        let panel = SeoPanel::for_input(&input);
        assert!(panel.description_too_long);
        assert_eq!(panel.score.percent, 100);
    }

    #[test]
    fn test_empty_form_scores_zero() {
        let panel = SeoPanel::for_input(&PostInput::default());
        assert_eq!(panel.score.percent, 0);
        assert_eq!(panel.score.badge, Badge::Poor);
    }
}

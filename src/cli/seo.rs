use crate::models::{ScoreInput, Signal};
use crate::services::seo::score_seo;
use crate::services::slug::generate_slug;
use crate::services::text::html_to_text;
use anyhow::Result;
use std::path::PathBuf;

pub fn slug(title: &str) -> Result<()> {
    println!("{}", generate_slug(title));
    Ok(())
}

pub struct SeoArgs {
    pub title: String,
    pub description: String,
    pub keywords: String,
    pub content_file: Option<PathBuf>,
    pub json: bool,
}

fn measure(args: &SeoArgs, content_html: &str) -> ScoreInput {
    ScoreInput::from_fields(
        &args.title,
        &args.description,
        &html_to_text(content_html),
        &args.keywords,
    )
}

pub fn score(args: SeoArgs) -> Result<()> {
    let content = match &args.content_file {
        Some(path) => std::fs::read_to_string(path).map_err(|e| {
            anyhow::anyhow!("Could not read content file '{}': {}", path.display(), e)
        })?,
        None => String::new(),
    };

    let input = measure(&args, &content);
    let result = score_seo(input);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("SEO score: {}% ({})", result.percent, result.badge);
    println!("{:<12} {:>8}  {}", "SIGNAL", "VALUE", "RATING");
    for signal in Signal::ALL {
        println!(
            "{:<12} {:>8}  {}",
            signal.to_string(),
            input.value(signal),
            result.label(signal)
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(title: &str) -> SeoArgs {
        SeoArgs {
            title: title.to_string(),
            description: String::new(),
            keywords: "a,b,".to_string(),
            content_file: None,
            json: false,
        }
    }

    #[test]
    fn test_measure_keeps_title_whitespace() {
        let input = measure(&args(&format!("{} ", "a".repeat(39))), "");
        assert_eq!(input.title_length, 40);
        assert_eq!(input.value(Signal::Title), 40);
    }

    #[test]
    fn test_measure_content_and_keywords() {
        let input = measure(&args("Title"), "<p>Hello <b>world</b></p>");
        assert_eq!(input.content_length, 11);
        assert_eq!(input.keyword_count, 3);
    }
}

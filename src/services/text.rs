use once_cell::sync::Lazy;
use regex::Regex;

const WORDS_PER_MINUTE: usize = 225;

static BLOCK_BOUNDARY_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)<br\s*/?>|</(p|div|h[1-6]|li|blockquote|pre)>")
        .expect("Invalid block boundary regex pattern")
});
static TAG_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<[^>]*>").expect("Invalid tag regex pattern"));
static ENTITY_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"&(#[0-9]+|#[xX][0-9a-fA-F]+|[a-zA-Z]+);").expect("Invalid entity regex pattern")
});

/// Cleans editor HTML down to the formatting the post editor can produce.
pub fn sanitize_html(html: &str) -> String {
    let mut builder = ammonia::Builder::default();
    builder
        .add_tags(["pre", "span", "sub", "sup", "s", "u"])
        .add_generic_attributes(["class"]);
    builder.clean(html).to_string()
}

/// Extracts the readable text of editor HTML: block ends become newlines,
/// tags are dropped and entities decoded.
pub fn html_to_text(html: &str) -> String {
    let with_breaks = BLOCK_BOUNDARY_REGEX.replace_all(html, "\n");
    let stripped = TAG_REGEX.replace_all(&with_breaks, "");
    let decoded = ENTITY_REGEX.replace_all(&stripped, |caps: &regex::Captures| {
        decode_entity(&caps[1]).unwrap_or_else(|| caps[0].to_string())
    });
    decoded.trim().to_string()
}

fn decode_entity(entity: &str) -> Option<String> {
    let decoded = match entity {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => ' ',
        _ => {
            let code = if let Some(hex) = entity
                .strip_prefix("#x")
                .or_else(|| entity.strip_prefix("#X"))
            {
                u32::from_str_radix(hex, 16).ok()?
            } else {
                entity.strip_prefix('#')?.parse().ok()?
            };
            char::from_u32(code)?
        }
    };
    Some(decoded.to_string())
}

pub fn reading_time_minutes(text: &str) -> u32 {
    let words = text.split_whitespace().count();
    words.div_ceil(WORDS_PER_MINUTE).max(1) as u32
}

/// Keywords as shown to readers: trimmed, with empty entries dropped.
pub fn parse_keywords(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|k| k.trim())
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect()
}

/// Number of comma-separated entries the SEO score counts. Empty entries
/// from stray commas are included; an empty field counts as zero.
pub fn raw_keyword_count(raw: &str) -> usize {
    if raw.is_empty() {
        0
    } else {
        raw.split(',').count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_to_text_strips_tags() {
        assert_eq!(
            html_to_text("<p>Hello <strong>world</strong></p>"),
            "Hello world"
        );
    }

    #[test]
    fn test_html_to_text_block_breaks() {
        assert_eq!(html_to_text("<p>One</p><p>Two</p>"), "One\nTwo");
        assert_eq!(html_to_text("a<br>b<br/>c"), "a\nb\nc");
    }

    #[test]
    fn test_html_to_text_entities() {
        assert_eq!(html_to_text("Fish &amp; chips &lt;3"), "Fish & chips <3");
        assert_eq!(html_to_text("&#261;&#x107;"), "ąć");
        assert_eq!(html_to_text("&bogus;"), "&bogus;");
    }

    #[test]
    fn test_sanitize_html_drops_scripts() {
        let cleaned = sanitize_html("<p class=\"ql-align-center\">Hi<script>alert(1)</script></p>");
        assert_eq!(cleaned, "<p class=\"ql-align-center\">Hi</p>");
    }

    #[test]
    fn test_reading_time() {
        assert_eq!(reading_time_minutes(""), 1);
        assert_eq!(reading_time_minutes(&"word ".repeat(225)), 1);
        assert_eq!(reading_time_minutes(&"word ".repeat(226)), 2);
        assert_eq!(reading_time_minutes(&"word ".repeat(1000)), 5);
    }

    #[test]
    fn test_parse_keywords() {
        assert_eq!(
            parse_keywords(" rust, grammar ,, tips,"),
            vec!["rust", "grammar", "tips"]
        );
        assert!(parse_keywords("").is_empty());
    }

    #[test]
    fn test_raw_keyword_count() {
        assert_eq!(raw_keyword_count(""), 0);
        assert_eq!(raw_keyword_count("rust"), 1);
        assert_eq!(raw_keyword_count("a,b,"), 3);
        assert_eq!(raw_keyword_count(","), 2);
    }
}

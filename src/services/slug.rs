use once_cell::sync::Lazy;
use regex::Regex;

pub const MAX_SLUG_LENGTH: usize = 200;

/// Accented letters folded to ASCII before slugification. Applied literally,
/// not through Unicode normalization, so existing post URLs stay stable.
const TRANSLITERATIONS: [(char, char); 9] = [
    ('ą', 'a'),
    ('ć', 'c'),
    ('ę', 'e'),
    ('ł', 'l'),
    ('ń', 'n'),
    ('ó', 'o'),
    ('ś', 's'),
    ('ż', 'z'),
    ('ź', 'z'),
];

static NON_SLUG_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9]+").expect("Invalid slug regex pattern"));

fn transliterate(c: char) -> char {
    TRANSLITERATIONS
        .iter()
        .find(|(from, _)| *from == c)
        .map(|(_, to)| *to)
        .unwrap_or(c)
}

/// Turns a post title into the URL slug used for its public path.
///
/// Lower-cases, folds the transliteration table, collapses every run of
/// characters outside `[a-z0-9]` into one `-`, then drops a single leading
/// and a single trailing `-`.
pub fn generate_slug(title: &str) -> String {
    let folded: String = title.to_lowercase().chars().map(transliterate).collect();
    let dashed = NON_SLUG_RUN.replace_all(&folded, "-");

    let trimmed = dashed.strip_prefix('-').unwrap_or(&dashed);
    let trimmed = trimmed.strip_suffix('-').unwrap_or(trimmed);
    trimmed.to_string()
}

/// Cuts a generated slug down to the stored length limit, without leaving a
/// dangling `-`. Generated slugs are ASCII, so byte slicing is safe.
pub fn shorten_slug(slug: &str) -> &str {
    if slug.len() <= MAX_SLUG_LENGTH {
        return slug;
    }
    let cut = &slug[..MAX_SLUG_LENGTH];
    cut.strip_suffix('-').unwrap_or(cut)
}

pub fn validate_slug(slug: &str) -> bool {
    if slug.is_empty() || slug.len() > MAX_SLUG_LENGTH {
        return false;
    }
    slug.chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

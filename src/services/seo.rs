//! Heuristic SEO score for a post being edited.
//!
//! Four signals are rated on their own: title length, meta description
//! length, plain-text content length and keyword count. A signal whose raw
//! value is zero has not been filled in yet and is left out of the average
//! entirely instead of counting as poor.

use crate::models::{Badge, ScoreInput, ScoreResult, Signal, SignalRating};
use crate::services::text::raw_keyword_count;
use std::collections::BTreeMap;
use std::ops::RangeInclusive;

const TITLE_EXCELLENT: RangeInclusive<usize> = 40..=60;
const TITLE_ACCEPTABLE_MIN: usize = 30;
const DESCRIPTION_EXCELLENT: RangeInclusive<usize> = 120..=160;
const DESCRIPTION_ACCEPTABLE_MIN: usize = 80;
const CONTENT_EXCELLENT_MIN: usize = 1500;
const CONTENT_ACCEPTABLE_MIN: usize = 800;
const KEYWORDS_EXCELLENT_MIN: usize = 3;

/// Meta descriptions longer than this get truncated in search results.
pub const DESCRIPTION_SOFT_LIMIT: usize = 155;

impl ScoreInput {
    /// Measures the editor fields. Lengths are counted in characters, and
    /// keywords by the raw comma split of the field.
    pub fn from_fields(title: &str, description: &str, plain_content: &str, keywords: &str) -> Self {
        Self {
            title_length: title.chars().count(),
            description_length: description.chars().count(),
            content_length: plain_content.chars().count(),
            keyword_count: raw_keyword_count(keywords),
        }
    }

    pub fn value(&self, signal: Signal) -> usize {
        match signal {
            Signal::Title => self.title_length,
            Signal::Description => self.description_length,
            Signal::Content => self.content_length,
            Signal::Keywords => self.keyword_count,
        }
    }
}

pub fn rate_signal(signal: Signal, value: usize) -> SignalRating {
    if value == 0 {
        return SignalRating::NotApplicable;
    }

    match signal {
        Signal::Title if TITLE_EXCELLENT.contains(&value) => SignalRating::Excellent,
        Signal::Title if (TITLE_ACCEPTABLE_MIN..*TITLE_EXCELLENT.start()).contains(&value) => {
            SignalRating::Acceptable
        }
        Signal::Description if DESCRIPTION_EXCELLENT.contains(&value) => SignalRating::Excellent,
        Signal::Description
            if (DESCRIPTION_ACCEPTABLE_MIN..*DESCRIPTION_EXCELLENT.start()).contains(&value) =>
        {
            SignalRating::Acceptable
        }
        Signal::Content if value >= CONTENT_EXCELLENT_MIN => SignalRating::Excellent,
        Signal::Content if value >= CONTENT_ACCEPTABLE_MIN => SignalRating::Acceptable,
        Signal::Keywords if value >= KEYWORDS_EXCELLENT_MIN => SignalRating::Excellent,
        Signal::Keywords => SignalRating::Acceptable,
        _ => SignalRating::Poor,
    }
}

pub fn score_seo(input: ScoreInput) -> ScoreResult {
    let labels: BTreeMap<Signal, SignalRating> = Signal::ALL
        .iter()
        .map(|&signal| (signal, rate_signal(signal, input.value(signal))))
        .collect();

    let points: Vec<f64> = labels.values().filter_map(|r| r.points()).collect();
    let percent = if points.is_empty() {
        0
    } else {
        let sum: f64 = points.iter().sum();
        ((sum / points.len() as f64) * 100.0).round() as u8
    };

    ScoreResult {
        percent,
        badge: Badge::for_percent(percent),
        labels,
    }
}

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The four independently measured inputs of the SEO score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    Title,
    Description,
    Content,
    Keywords,
}

impl Signal {
    pub const ALL: [Signal; 4] = [
        Signal::Title,
        Signal::Description,
        Signal::Content,
        Signal::Keywords,
    ];
}

impl std::fmt::Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Title => write!(f, "title"),
            Self::Description => write!(f, "description"),
            Self::Content => write!(f, "content"),
            Self::Keywords => write!(f, "keywords"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalRating {
    Excellent,
    Acceptable,
    Poor,
    /// The field is still empty, so the signal does not count.
    NotApplicable,
}

impl SignalRating {
    pub fn points(self) -> Option<f64> {
        match self {
            Self::Excellent => Some(1.0),
            Self::Acceptable => Some(0.5),
            Self::Poor => Some(0.0),
            Self::NotApplicable => None,
        }
    }
}

impl std::fmt::Display for SignalRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Excellent => write!(f, "excellent"),
            Self::Acceptable => write!(f, "acceptable"),
            Self::Poor => write!(f, "poor"),
            Self::NotApplicable => write!(f, "n/a"),
        }
    }
}

/// Qualitative tier of the overall percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Badge {
    Good,
    Warning,
    Poor,
}

impl Badge {
    pub fn for_percent(percent: u8) -> Self {
        if percent >= 80 {
            Self::Good
        } else if percent >= 50 {
            Self::Warning
        } else {
            Self::Poor
        }
    }
}

impl std::fmt::Display for Badge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Good => write!(f, "good"),
            Self::Warning => write!(f, "warning"),
            Self::Poor => write!(f, "poor"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreInput {
    pub title_length: usize,
    pub description_length: usize,
    pub content_length: usize,
    pub keyword_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreResult {
    pub percent: u8,
    pub badge: Badge,
    pub labels: BTreeMap<Signal, SignalRating>,
}

impl ScoreResult {
    pub fn label(&self, signal: Signal) -> SignalRating {
        self.labels
            .get(&signal)
            .copied()
            .unwrap_or(SignalRating::NotApplicable)
    }
}

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    Page,
    Line,
    Word,
    Other,
}

/// One block of a document text detection result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OcrBlock {
    pub kind: BlockKind,
    pub text: Option<String>,
}

impl OcrBlock {
    pub fn line(text: impl Into<String>) -> Self {
        Self {
            kind: BlockKind::Line,
            text: Some(text.into()),
        }
    }

    pub fn word(text: impl Into<String>) -> Self {
        Self {
            kind: BlockKind::Word,
            text: Some(text.into()),
        }
    }
}

/// An entity reported by the ingredient model, as character offsets into
/// the text it was given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedSpan {
    pub start: usize,
    pub end: usize,
    pub label: String,
}

impl TaggedSpan {
    pub fn new(start: usize, end: usize, label: impl Into<String>) -> Self {
        Self {
            start,
            end,
            label: label.into(),
        }
    }
}

/// Scores per model label, in the model's label order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryScores(pub Vec<(String, f32)>);

impl CategoryScores {
    /// Label with the strictly highest score. Among equal maxima the first
    /// label in model order wins; NaN never wins.
    pub fn top_label(&self) -> Option<&str> {
        let mut best: Option<(&str, f32)> = None;
        for (label, score) in &self.0 {
            if score.is_nan() {
                continue;
            }
            match best {
                Some((_, best_score)) if *score <= best_score => {}
                _ => best = Some((label.as_str(), *score)),
            }
        }
        best.map(|(label, _)| label)
    }
}

impl FromIterator<(String, f32)> for CategoryScores {
    fn from_iter<I: IntoIterator<Item = (String, f32)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// What happens to ingredients whose label is outside the display order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UncategorizedPolicy {
    /// Silently left out of the rendered message.
    #[default]
    Drop,
    /// Rendered in a trailing `UNCATEGORIZED` section.
    Surface,
}

#[derive(Debug, Clone, Default)]
pub struct ShoppingListOptions {
    pub uncategorized: UncategorizedPolicy,
}

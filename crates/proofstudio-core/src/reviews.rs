//! Domain types for a generated review page.
//!
//! All values are built fresh per request from the model's response text,
//! never persisted, and never mutated after construction. Wire names are
//! camelCase to match the JSON contract served to clients.

use serde::{Deserialize, Serialize};

/// A single customer review, in relevance order as returned by the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub author: String,
    /// Star rating, 1–5.
    pub rating: u8,
    pub text: String,
}

/// Review summary, covering both schema versions observed in the wild.
///
/// The JSON shape is the discriminant: a plain string is the legacy
/// one-paragraph form, an object is the structured form the prompt asks for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReviewSummary {
    Text(String),
    Structured(StructuredSummary),
}

impl ReviewSummary {
    /// The one-paragraph rendering of the summary, whichever variant it is.
    #[must_use]
    pub fn overall_text(&self) -> &str {
        match self {
            ReviewSummary::Text(text) => text,
            ReviewSummary::Structured(summary) => &summary.overall_summary,
        }
    }
}

/// Five-field summary distilled from the review themes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredSummary {
    pub price: String,
    pub service: String,
    pub the_good: String,
    pub the_bad: String,
    pub overall_summary: String,
}

/// Everything needed to render one shareable review page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewsData {
    pub business_name: String,
    /// Average star rating, 0–5.
    pub average_rating: f64,
    pub total_reviews: u32,
    pub summary: ReviewSummary,
    #[serde(default)]
    pub reviews: Vec<Review>,
}

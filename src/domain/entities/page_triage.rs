use serde::{Deserialize, Serialize};

/// Whether a page carries machine-readable spec text or is a drawing.
///
/// Pages with almost no extractable text are assumed to be drawings or
/// scanned plan sheets; those go to a human (or a vision model) instead
/// of keyword triage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageClassification {
    Text,
    Drawing,
}

/// What to do with an RFP page after scoring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriageRecommendation {
    /// Strong display-spec signal, route to extraction
    Keep,
    /// Weak signal, worth a skim
    Maybe,
    /// No display-relevant content
    Discard,
    /// Drawing page, needs human or vision review
    Review,
}

impl TriageRecommendation {
    /// Map a relevance score and classification to a recommendation.
    pub fn from_score(score: f64, classification: PageClassification) -> Self {
        if classification == PageClassification::Drawing {
            return TriageRecommendation::Review;
        }
        if score >= 0.3 {
            TriageRecommendation::Keep
        } else if score > 0.0 {
            TriageRecommendation::Maybe
        } else {
            TriageRecommendation::Discard
        }
    }
}

/// Scoring result for a single RFP page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageTriageResult {
    /// 1-indexed page number
    pub page_num: usize,
    pub classification: PageClassification,
    /// Keyword hits normalized by sqrt of text length, 4 decimal places
    pub score: f64,
    pub text_length: usize,
    pub matched_keywords: Vec<String>,
    pub matched_categories: Vec<String>,
    /// First 200 characters of the raw page text, newlines flattened
    pub snippet: String,
    pub recommendation: TriageRecommendation,
}

/// Triage outcome for a whole document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentTriageSummary {
    pub total_pages: usize,
    pub text_pages: usize,
    pub drawing_pages: usize,
    pub processing_time_ms: u64,
    pub pages: Vec<PageTriageResult>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drawing_pages_always_reviewed() {
        let rec = TriageRecommendation::from_score(0.9, PageClassification::Drawing);
        assert_eq!(rec, TriageRecommendation::Review);
    }

    #[test]
    fn test_high_score_kept() {
        let rec = TriageRecommendation::from_score(0.3, PageClassification::Text);
        assert_eq!(rec, TriageRecommendation::Keep);
    }

    #[test]
    fn test_low_score_maybe() {
        let rec = TriageRecommendation::from_score(0.05, PageClassification::Text);
        assert_eq!(rec, TriageRecommendation::Maybe);
    }

    #[test]
    fn test_zero_score_discarded() {
        let rec = TriageRecommendation::from_score(0.0, PageClassification::Text);
        assert_eq!(rec, TriageRecommendation::Discard);
    }

    #[test]
    fn test_classification_serializes_lowercase() {
        let json = serde_json::to_string(&PageClassification::Drawing).unwrap();
        assert_eq!(json, "\"drawing\"");
    }
}

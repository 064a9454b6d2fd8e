use regex::Regex;
use tracing::debug;

use crate::domain::entities::page_triage::{
    PageClassification, PageTriageResult, TriageRecommendation,
};
use crate::domain::services::triage::keyword_bank::KeywordBank;

/// Pages with fewer trimmed characters than this are treated as
/// drawings: plan sheets render almost no extractable text.
const DRAWING_TEXT_THRESHOLD: usize = 50;

const SNIPPET_CHARS: usize = 200;

/// Lowercase, strip punctuation to spaces, collapse whitespace.
pub fn normalize_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last_was_space = true;
    for c in text.chars() {
        if c.is_alphanumeric() {
            out.extend(c.to_lowercase());
            last_was_space = false;
        } else if !last_was_space {
            out.push(' ');
            last_was_space = true;
        }
    }
    if out.ends_with(' ') {
        out.pop();
    }
    out
}

/// Scores one page of RFP text against the keyword bank.
///
/// Phrase patterns are compiled once at construction; scoring is then a
/// pure function of the page text.
pub struct PageScorer {
    phrases: Vec<CompiledPhrase>,
}

struct CompiledPhrase {
    category: String,
    keyword: String,
    pattern: Regex,
}

impl Default for PageScorer {
    fn default() -> Self {
        Self::new(KeywordBank::builtin())
    }
}

impl PageScorer {
    pub fn new(bank: KeywordBank) -> Self {
        let mut phrases = Vec::with_capacity(bank.phrase_count());
        for category in bank.categories() {
            for keyword in &category.keywords {
                // Keywords are matched against normalized text, so the
                // phrase itself is normalized before compiling
                let normalized = normalize_text(keyword);
                if normalized.is_empty() {
                    continue;
                }
                let pattern = format!(r"\b{}\b", regex::escape(&normalized));
                if let Ok(regex) = Regex::new(&pattern) {
                    phrases.push(CompiledPhrase {
                        category: category.name.clone(),
                        keyword: keyword.clone(),
                        pattern: regex,
                    });
                }
            }
        }
        PageScorer { phrases }
    }

    /// Score a single page.
    ///
    /// Near-empty pages classify as drawings with a zero score; text
    /// pages score `hits / sqrt(text length)` so long boilerplate pages
    /// don't outrank dense spec pages, rounded to 4 decimal places.
    pub fn score_page(&self, page_num: usize, text: &str) -> PageTriageResult {
        if text.trim().chars().count() < DRAWING_TEXT_THRESHOLD {
            return PageTriageResult {
                page_num,
                classification: PageClassification::Drawing,
                score: 0.0,
                text_length: text.chars().count(),
                matched_keywords: Vec::new(),
                matched_categories: Vec::new(),
                snippet: String::new(),
                recommendation: TriageRecommendation::Review,
            };
        }

        let normalized = normalize_text(text);
        let mut hits = 0usize;
        let mut matched_keywords = Vec::new();
        let mut matched_categories: Vec<String> = Vec::new();

        for phrase in &self.phrases {
            let count = phrase.pattern.find_iter(&normalized).count();
            if count > 0 {
                hits += count;
                matched_keywords.push(phrase.keyword.clone());
                if !matched_categories.contains(&phrase.category) {
                    matched_categories.push(phrase.category.clone());
                }
            }
        }

        let text_length = normalized.chars().count();
        let score = if text_length > 0 {
            let raw = hits as f64 / (text_length as f64).sqrt();
            (raw * 10_000.0).round() / 10_000.0
        } else {
            0.0
        };

        let snippet: String = text
            .trim()
            .chars()
            .take(SNIPPET_CHARS)
            .map(|c| if c == '\n' { ' ' } else { c })
            .collect();

        debug!(
            page = page_num,
            hits,
            score,
            categories = matched_categories.len(),
            "Scored RFP page"
        );

        PageTriageResult {
            page_num,
            classification: PageClassification::Text,
            score,
            text_length: text.chars().count(),
            matched_keywords,
            matched_categories,
            snippet,
            recommendation: TriageRecommendation::from_score(score, PageClassification::Text),
        }
    }
}

use std::time::Instant;

use tracing::{debug, info};

use crate::domain::entities::page_triage::{DocumentTriageSummary, PageClassification};
use crate::domain::services::triage::keyword_bank::KeywordBank;
use crate::domain::services::triage::scorer::PageScorer;

/// Triages a whole RFP document from its extracted page text.
pub struct DocumentTriageService {
    scorer: PageScorer,
}

impl Default for DocumentTriageService {
    fn default() -> Self {
        Self::new(KeywordBank::builtin())
    }
}

impl DocumentTriageService {
    pub fn new(bank: KeywordBank) -> Self {
        DocumentTriageService {
            scorer: PageScorer::new(bank),
        }
    }

    /// Score every page and summarize the document.
    ///
    /// Pages are 1-indexed in the results, matching how reviewers refer
    /// to PDF pages.
    pub fn triage_document(&self, pages: &[String]) -> DocumentTriageSummary {
        let started = Instant::now();
        debug!(pages = pages.len(), "Starting document triage");

        let mut results = Vec::with_capacity(pages.len());
        let mut text_pages = 0usize;
        let mut drawing_pages = 0usize;

        for (idx, text) in pages.iter().enumerate() {
            let result = self.scorer.score_page(idx + 1, text);
            match result.classification {
                PageClassification::Text => text_pages += 1,
                PageClassification::Drawing => drawing_pages += 1,
            }
            results.push(result);
        }

        let processing_time_ms = started.elapsed().as_millis() as u64;
        info!(
            total_pages = pages.len(),
            text_pages,
            drawing_pages,
            processing_time_ms,
            "Completed document triage"
        );

        DocumentTriageSummary {
            total_pages: pages.len(),
            text_pages,
            drawing_pages,
            processing_time_ms,
            pages: results,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::page_triage::TriageRecommendation;

    #[test]
    fn test_triage_document_counts_classifications() {
        let service = DocumentTriageService::default();
        let pages = vec![
            "The LED display shall have a pixel pitch of 3.9mm with structural steel \
             mounting and power distribution per division 26."
                .to_string(),
            "E-101".to_string(), // drawing sheet label
        ];
        let summary = service.triage_document(&pages);
        assert_eq!(summary.total_pages, 2);
        assert_eq!(summary.text_pages, 1);
        assert_eq!(summary.drawing_pages, 1);
    }

    #[test]
    fn test_triage_document_pages_are_one_indexed_in_order() {
        let service = DocumentTriageService::default();
        let pages = vec!["".to_string(), "".to_string(), "".to_string()];
        let summary = service.triage_document(&pages);
        let numbers: Vec<usize> = summary.pages.iter().map(|p| p.page_num).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[test]
    fn test_triage_empty_document() {
        let service = DocumentTriageService::default();
        let summary = service.triage_document(&[]);
        assert_eq!(summary.total_pages, 0);
        assert!(summary.pages.is_empty());
    }

    #[test]
    fn test_custom_bank_changes_recommendations() {
        let service = DocumentTriageService::new(
            KeywordBank::builtin().with_custom_keywords(vec!["halo board".to_string()]),
        );
        let text = "The halo board above the concourse requires its own dedicated review \
                    during the walkthrough scheduled for next month with the owner."
            .to_string();
        let summary = service.triage_document(&[text]);
        assert_ne!(
            summary.pages[0].recommendation,
            TriageRecommendation::Discard
        );
        assert!(summary.pages[0]
            .matched_categories
            .iter()
            .any(|c| c == "custom"));
    }
}

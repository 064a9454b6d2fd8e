pub mod keyword_bank;
pub mod scorer;
pub mod service;

pub use keyword_bank::{KeywordBank, KeywordCategory};
pub use scorer::{normalize_text, PageScorer};
pub use service::DocumentTriageService;

//! Document classification
//!
//! The pipeline only needs a label/score pair and stores it unexamined, so
//! any model can sit behind [`DocumentClassifier`]. [`KeywordClassifier`] is
//! the built-in implementation: it scores how many notice-related keyword
//! groups appear in the OCR text.

use shared_types::Classification;
use std::path::Path;
use tracing::debug;

pub const ACQUISITION_NOTICE: &str = "acquisition_notice";
pub const OTHER_DOCUMENT: &str = "other_document";

/// Acquisition vocabulary
pub const ACQUISITION_KEYWORDS: &[&str] = &["acquisition", "acquire", "acquired", "requisition"];

/// Payout vocabulary
pub const COMPENSATION_KEYWORDS: &[&str] =
    &["compensation", "award", "payment", "amount", "solatium"];

/// Land measurement vocabulary
pub const LAND_KEYWORDS: &[&str] = &["survey", "land area", "extent", "acre", "hectare", "cent"];

/// Revenue administration vocabulary
pub const REVENUE_KEYWORDS: &[&str] = &["village", "taluk", "district", "register", "patta"];

/// Formal notice vocabulary
pub const NOTICE_KEYWORDS: &[&str] = &["notice", "notification", "gazette", "section"];

const KEYWORD_GROUPS: &[&[&str]] = &[
    ACQUISITION_KEYWORDS,
    COMPENSATION_KEYWORDS,
    LAND_KEYWORDS,
    REVENUE_KEYWORDS,
    NOTICE_KEYWORDS,
];

/// Produces a label/score pair for an uploaded document
pub trait DocumentClassifier: Send + Sync {
    /// `source` is the uploaded file, `text` its OCR output
    fn classify(&self, source: &Path, text: &str) -> Classification;
}

/// Keyword-group scoring classifier
#[derive(Debug, Clone)]
pub struct KeywordClassifier {
    threshold: f64,
}

impl KeywordClassifier {
    /// `threshold` is the fraction of keyword groups that must be present
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// Fraction of keyword groups with at least one hit
    pub fn score(text: &str) -> f64 {
        let text_lower = text.to_lowercase();
        let found_groups = KEYWORD_GROUPS
            .iter()
            .filter(|group| group.iter().any(|keyword| text_lower.contains(keyword)))
            .count();

        found_groups as f64 / KEYWORD_GROUPS.len() as f64
    }
}

impl Default for KeywordClassifier {
    fn default() -> Self {
        Self::new(0.6)
    }
}

impl DocumentClassifier for KeywordClassifier {
    fn classify(&self, source: &Path, text: &str) -> Classification {
        let score = Self::score(text);
        let label = if score >= self.threshold {
            ACQUISITION_NOTICE
        } else {
            OTHER_DOCUMENT
        };

        debug!(source = %source.display(), score, label, "classified document");
        Classification::new(label, score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classifies_acquisition_notice() {
        let text = "NOTICE under Section 21 of the Land Acquisition Act. \
                    Survey No: 45/2, Village: Kolathur, Taluk: Ambattur. \
                    Compensation awarded: Rs. 50,000";
        let classification = KeywordClassifier::default().classify(Path::new("notice.png"), text);

        assert_eq!(classification.label, ACQUISITION_NOTICE);
        assert_eq!(classification.score, 1.0);
    }

    #[test]
    fn test_classifies_unrelated_document() {
        let text = "Electricity bill for the month of March. Units consumed: 240.";
        let classification = KeywordClassifier::default().classify(Path::new("bill.png"), text);

        assert_eq!(classification.label, OTHER_DOCUMENT);
        assert!(classification.score < 0.6);
    }

    #[test]
    fn test_empty_text_scores_zero() {
        assert_eq!(KeywordClassifier::score(""), 0.0);
    }

    #[test]
    fn test_threshold_is_configurable() {
        let text = "survey number 12, village kolathur";
        let lenient = KeywordClassifier::new(0.2).classify(Path::new("a.png"), text);
        let strict = KeywordClassifier::new(0.9).classify(Path::new("a.png"), text);

        assert_eq!(lenient.label, ACQUISITION_NOTICE);
        assert_eq!(strict.label, OTHER_DOCUMENT);
        assert_eq!(lenient.score, strict.score);
    }
}

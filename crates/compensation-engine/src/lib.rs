pub mod assess;
pub mod classify;
pub mod config;
pub mod extract;
pub mod labels;
pub mod normalize;
pub mod pipeline;
pub mod report;
pub mod summary;

pub use assess::{fair_compensation, format_inr, is_compensation_fair, market_comparison};
pub use classify::{DocumentClassifier, KeywordClassifier};
pub use config::{parse_toml, read_toml_file, ConfigError, EngineConfig, MarketConfig, RateTable};
pub use extract::{extract_fields, ExtractedFields};
pub use labels::FieldKind;
pub use normalize::{clean_value, parse_numeric_amount, ParsedAmount};
pub use pipeline::{process_notice, ProcessedNotice};
pub use summary::DashboardSummary;

use shared_types::{Classification, MarketComparison};

/// CompensationEngine entry point
pub struct CompensationEngine {
    config: EngineConfig,
}

impl CompensationEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Extract and assess one notice's OCR text
    pub fn process(&self, raw_text: &str, classification: Classification) -> ProcessedNotice {
        process_notice(raw_text, classification, &self.config)
    }

    /// Market comparison at the configured current rate
    pub fn compare_with_market(&self, land_area: f64, received_amount: f64) -> MarketComparison {
        market_comparison(
            land_area,
            received_amount,
            self.config.market.current_rate_per_unit,
        )
    }
}

impl Default for CompensationEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_engine_flags_underpaid_notice() {
        let engine = CompensationEngine::default();
        let text = "Land Acquisition Notice\nSurvey No: 45/2\nLand Area: 2.5 acres\nCompensation: 50000";
        let classification = KeywordClassifier::default().classify(Path::new("notice.png"), text);

        let notice = engine.process(text, classification);

        assert!(!notice.is_fair_compensation);
        assert_eq!(notice.fair_compensation, 250_000.0);
    }

    #[test]
    fn test_engine_uses_injected_rates() {
        let config = EngineConfig {
            rates: RateTable::new(10_000.0),
            ..Default::default()
        };
        let engine = CompensationEngine::new(config);
        let notice = engine.process(
            "Survey No: 7\nExtent: 2 acres\nAmount: 20000",
            Classification::new("acquisition_notice", 1.0),
        );

        assert!(notice.is_fair_compensation);
    }

    #[test]
    fn test_compare_with_market_uses_configured_rate() {
        let engine = CompensationEngine::new(EngineConfig {
            market: MarketConfig {
                current_rate_per_unit: 100.0,
            },
            ..Default::default()
        });
        let comparison = engine.compare_with_market(3.0, 100.0);
        assert_eq!(comparison.market_value, 300.0);
        assert_eq!(comparison.amount_owed, 200.0);
    }
}

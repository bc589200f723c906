use std::fmt;

/// Label/score pair produced by a document classifier
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Classification {
    pub label: String,
    pub score: f64, // 0.0..=1.0
}

impl Classification {
    pub fn new(label: impl Into<String>, score: f64) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.2})", self.label, self.score)
    }
}

#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct CompensationAssessment {
    pub fair_compensation: f64,
    pub compensation_received: f64,
    pub is_fair: bool,
    pub market_value: f64,
    pub compensation_gap: f64,
    pub amount_owed: f64, // max(market_value - compensation_received, 0)
}

/// Comparison of a recorded payout against today's market value
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MarketComparison {
    pub market_value: f64,
    pub compensation_gap: f64,
    pub amount_owed: f64,
    pub recommendation: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_display() {
        let classification = Classification::new("acquisition_notice", 0.875);
        assert_eq!(classification.to_string(), "acquisition_notice (0.88)");
    }

    #[test]
    fn test_assessment_serializes_snake_case_fields() {
        let assessment = CompensationAssessment {
            fair_compensation: 250000.0,
            compensation_received: 50000.0,
            is_fair: false,
            market_value: 500000.0,
            compensation_gap: 450000.0,
            amount_owed: 450000.0,
        };
        let json = serde_json::to_value(&assessment).unwrap();
        assert_eq!(json["amount_owed"], 450000.0);
        assert_eq!(json["is_fair"], false);
    }
}

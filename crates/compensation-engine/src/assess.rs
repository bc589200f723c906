// Compensation fairness assessment
use crate::config::{EngineConfig, RateTable};
use crate::extract::ExtractedFields;
use crate::labels::FieldKind;
use crate::normalize::{numeric_value, parse_numeric_amount};
use shared_types::{CompensationAssessment, MarketComparison};
use tracing::{debug, warn};

pub const FAIR_MESSAGE: &str = "Compensation seems fair.";
pub const UNFAIR_MESSAGE: &str = "Below fair rate. Consider grievance filing.";
pub const ADEQUATE_RECOMMENDATION: &str =
    "Your compensation matches or exceeds today's market rate. No further grievance is suggested.";

/// Reference compensation for a land area at a location
///
/// `parse_numeric_amount(land_area_text) * rate`, where the rate comes from
/// the table (case-insensitive) or its default entry.
pub fn fair_compensation(land_area_text: &str, location_key: &str, rates: &RateTable) -> f64 {
    let area = numeric_value(land_area_text);
    let rate = rates.rate_per_unit(location_key);
    debug!(area, rate, location = location_key, "computed fair compensation");
    area * rate
}

/// True when the received amount is at least the fair value
pub fn is_compensation_fair(received_text: &str, fair_value: f64) -> bool {
    numeric_value(received_text) >= fair_value
}

/// Compare a payout with today's market value of the land
pub fn market_comparison(
    land_area: f64,
    received_amount: f64,
    current_rate_per_unit: f64,
) -> MarketComparison {
    let market_value = land_area * current_rate_per_unit;
    let compensation_gap = market_value - received_amount;
    let amount_owed = compensation_gap.max(0.0);

    let recommendation = if amount_owed > 0.0 {
        format!(
            "You are owed approx. INR {} as per today's value. \
             Prepare grievance documents using the grievance report. \
             Contact your local land acquisition office, attach the report, \
             and request enhanced compensation referencing present land market rates. \
             You may also seek legal help or approach Lok Adalat for dispute resolution.",
            format_inr(amount_owed)
        )
    } else {
        ADEQUATE_RECOMMENDATION.to_string()
    };

    MarketComparison {
        market_value,
        compensation_gap,
        amount_owed,
        recommendation,
    }
}

/// Lower-cased district, else lower-cased village, else empty
pub fn location_key(fields: &ExtractedFields) -> String {
    fields
        .get(FieldKind::District)
        .filter(|d| !d.is_empty())
        .or_else(|| fields.get(FieldKind::Village))
        .unwrap_or_default()
        .to_lowercase()
}

/// Full assessment of an extracted notice
pub fn assess(fields: &ExtractedFields, config: &EngineConfig) -> CompensationAssessment {
    let land_area = fields.get(FieldKind::LandArea).unwrap_or_default();
    let received_text = fields.get(FieldKind::CompensationAmount).unwrap_or_default();

    if !parse_numeric_amount(land_area).found_digits {
        warn!(land_area, "no land area figure found; fair compensation is zero");
    }

    let location = location_key(fields);
    let fair = fair_compensation(land_area, &location, &config.rates);
    let is_fair = is_compensation_fair(received_text, fair);

    let received = numeric_value(received_text);
    let market = market_comparison(
        numeric_value(land_area),
        received,
        config.market.current_rate_per_unit,
    );

    CompensationAssessment {
        fair_compensation: fair,
        compensation_received: received,
        is_fair,
        market_value: market.market_value,
        compensation_gap: market.compensation_gap,
        amount_owed: market.amount_owed,
    }
}

pub fn verdict_message(is_fair: bool) -> &'static str {
    if is_fair {
        FAIR_MESSAGE
    } else {
        UNFAIR_MESSAGE
    }
}

/// Formats an amount with comma thousands separators and two decimals
pub fn format_inr(amount: f64) -> String {
    if !amount.is_finite() {
        return amount.to_string();
    }

    let formatted = format!("{:.2}", amount.abs());
    let (whole, fraction) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 && formatted != "0.00" { "-" } else { "" };
    format!("{}{}.{}", sign, grouped, fraction)
}

//! Aggregates over stored records for dashboards

use serde::Serialize;
use shared_types::NoticeRecord;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub total_records: usize,
    /// Records per public usage; records without one are skipped
    pub land_usage: BTreeMap<String, usize>,
    /// Families affected, summed per survey number
    pub families_by_survey: BTreeMap<String, i64>,
    /// Records per classifier label
    pub classification_counts: BTreeMap<String, usize>,
    pub fairness_passed: usize,
    pub fairness_failed: usize,
    pub total_amount_owed: f64,
}

impl DashboardSummary {
    pub fn from_records(records: &[NoticeRecord]) -> Self {
        let mut summary = Self {
            total_records: records.len(),
            ..Default::default()
        };

        for record in records {
            if let Some(usage) = record.impact.public_usage.as_deref() {
                if !usage.is_empty() {
                    *summary.land_usage.entry(usage.to_string()).or_default() += 1;
                }
            }

            *summary
                .families_by_survey
                .entry(record.survey_number.clone())
                .or_default() += record.impact.families_affected.unwrap_or(0);

            *summary
                .classification_counts
                .entry(record.classification.label.clone())
                .or_default() += 1;

            if record.assessment.is_fair {
                summary.fairness_passed += 1;
            } else {
                summary.fairness_failed += 1;
            }
            summary.total_amount_owed += record.assessment.amount_owed;
        }

        summary
    }
}

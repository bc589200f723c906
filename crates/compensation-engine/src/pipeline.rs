//! Single-notice processing: extract, assess, merge

use crate::assess::{assess, location_key, verdict_message};
use crate::config::EngineConfig;
use crate::extract::{extract_fields, ExtractedFields};
use crate::labels::FieldKind;
use serde::Serialize;
use shared_types::{Classification, CompensationAssessment, ImpactDetails, NoticeRecord};
use tracing::info;

/// Outcome of running one notice through the pipeline
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessedNotice {
    pub extracted_data: ExtractedFields,
    pub classification: Classification,
    pub location_key: String,
    pub fair_compensation: f64,
    /// Compensation text as it appeared in the notice
    pub compensation_received: String,
    pub is_fair_compensation: bool,
    pub message: String,
    pub assessment: CompensationAssessment,
    #[serde(skip)]
    pub raw_text: String,
}

impl ProcessedNotice {
    /// Survey number, if one was extracted and is non-empty
    pub fn survey_number(&self) -> Option<&str> {
        self.extracted_data
            .get(FieldKind::SurveyNumber)
            .filter(|s| !s.is_empty())
    }

    /// Merge everything into a storable record
    ///
    /// Returns `None` when no survey number was found, since records are
    /// keyed by it.
    pub fn to_record(&self) -> Option<NoticeRecord> {
        let survey_number = self.survey_number()?.to_string();
        let field = |kind| self.extracted_data.get_owned(kind);

        Some(NoticeRecord {
            survey_number,
            owner_name: field(FieldKind::OwnerName),
            register_number: field(FieldKind::RegisterNumber),
            village: field(FieldKind::Village),
            taluk: field(FieldKind::Taluk),
            district: field(FieldKind::District),
            land_area: field(FieldKind::LandArea),
            compensation_amount: field(FieldKind::CompensationAmount),
            date: field(FieldKind::Date),
            raw_text: self.raw_text.clone(),
            assessment: self.assessment.clone(),
            classification: self.classification.clone(),
            impact: ImpactDetails::default(),
            created_at: None,
        })
    }
}

/// Run extraction and assessment over OCR text
///
/// Pure and deterministic; the classification is merged as given.
pub fn process_notice(
    raw_text: &str,
    classification: Classification,
    config: &EngineConfig,
) -> ProcessedNotice {
    let extracted_data = extract_fields(raw_text);
    let assessment = assess(&extracted_data, config);

    info!(
        fields = extracted_data.len(),
        fair = assessment.fair_compensation,
        is_fair = assessment.is_fair,
        "processed notice"
    );

    ProcessedNotice {
        location_key: location_key(&extracted_data),
        fair_compensation: assessment.fair_compensation,
        compensation_received: extracted_data
            .get(FieldKind::CompensationAmount)
            .unwrap_or_default()
            .to_string(),
        is_fair_compensation: assessment.is_fair,
        message: verdict_message(assessment.is_fair).to_string(),
        extracted_data,
        classification,
        assessment,
        raw_text: raw_text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assess::UNFAIR_MESSAGE;
    use pretty_assertions::assert_eq;

    const NOTICE: &str = "Owner Name: John Smith\nSurvey No: 45/2\nLand Area: 2.5 acres\nCompensation: 50000";

    #[test]
    fn test_process_notice() {
        let notice = process_notice(
            NOTICE,
            Classification::new("acquisition_notice", 0.9),
            &EngineConfig::default(),
        );

        assert_eq!(notice.survey_number(), Some("452"));
        assert_eq!(notice.location_key, "");
        assert_eq!(notice.fair_compensation, 250_000.0);
        assert_eq!(notice.compensation_received, "50000");
        assert!(!notice.is_fair_compensation);
        assert_eq!(notice.message, UNFAIR_MESSAGE);
        assert_eq!(notice.assessment.amount_owed, 450_000.0);
    }

    #[test]
    fn test_process_is_deterministic() {
        let config = EngineConfig::default();
        let classification = Classification::new("acquisition_notice", 0.9);
        let first = process_notice(NOTICE, classification.clone(), &config);
        let second = process_notice(NOTICE, classification, &config);
        assert_eq!(first, second);
    }

    #[test]
    fn test_to_record_merges_fields() {
        let notice = process_notice(
            NOTICE,
            Classification::new("acquisition_notice", 0.9),
            &EngineConfig::default(),
        );
        let record = notice.to_record().unwrap();

        assert_eq!(record.survey_number, "452");
        assert_eq!(record.land_area.as_deref(), Some("2.5 acres"));
        assert_eq!(record.compensation_amount.as_deref(), Some("50000"));
        assert_eq!(record.village, None);
        assert_eq!(record.raw_text, NOTICE);
        assert_eq!(record.classification.label, "acquisition_notice");
        assert_eq!(record.assessment, notice.assessment);
        assert!(record.impact.is_empty());
    }

    #[test]
    fn test_record_requires_survey_number() {
        let notice = process_notice(
            "Land Area: 2 acres",
            Classification::new("other_document", 0.2),
            &EngineConfig::default(),
        );
        assert_eq!(notice.survey_number(), None);
        assert!(notice.to_record().is_none());
    }

    #[test]
    fn test_raw_text_not_serialized() {
        let notice = process_notice(
            NOTICE,
            Classification::new("acquisition_notice", 0.9),
            &EngineConfig::default(),
        );
        let json = serde_json::to_value(&notice).unwrap();
        assert!(json.get("raw_text").is_none());
        assert_eq!(json["extracted_data"]["land_area"], "2.5 acres");
    }
}

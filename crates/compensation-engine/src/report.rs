// Plain-text grievance report for a stored record
use crate::assess::format_inr;
use shared_types::NoticeRecord;
use std::fmt;

pub const REPORT_TITLE: &str = "Land Compensation Grievance Report";
pub const REPORT_FOOTER: &str =
    "This report highlights potential under-compensation and legal support to seek justice.";

/// "survey_number" -> "Survey Number"
pub fn title_case_field(name: &str) -> String {
    name.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Grievance report for one record, rendered through `Display`
pub struct GrievanceReport<'a> {
    record: &'a NoticeRecord,
}

impl<'a> GrievanceReport<'a> {
    pub fn new(record: &'a NoticeRecord) -> Self {
        Self { record }
    }
}

impl fmt::Display for GrievanceReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", REPORT_TITLE)?;
        writeln!(f, "{}", "=".repeat(REPORT_TITLE.len()))?;
        writeln!(f)?;

        for (name, value) in self.record.display_fields() {
            writeln!(f, "{}: {}", title_case_field(name), value)?;
        }

        let assessment = &self.record.assessment;
        writeln!(f)?;
        writeln!(f, "Market Value: INR {}", format_inr(assessment.market_value))?;
        writeln!(
            f,
            "Compensation Received: INR {}",
            format_inr(assessment.compensation_received)
        )?;
        writeln!(f, "Amount Still Owed: INR {}", format_inr(assessment.amount_owed))?;
        writeln!(f)?;
        writeln!(f, "{}", REPORT_FOOTER)
    }
}

/// Render the grievance report: title, one line per field, market figures, footer
pub fn render_grievance_report(record: &NoticeRecord) -> String {
    GrievanceReport::new(record).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::{Classification, CompensationAssessment, ImpactDetails};

    #[test]
    fn test_title_case_field() {
        assert_eq!(title_case_field("survey_number"), "Survey Number");
        assert_eq!(title_case_field("date"), "Date");
        assert_eq!(title_case_field("classification_result"), "Classification Result");
    }

    #[test]
    fn test_render_grievance_report() {
        let record = NoticeRecord {
            survey_number: "452".to_string(),
            owner_name: Some("muthu".to_string()),
            register_number: None,
            village: Some("kolathur".to_string()),
            taluk: None,
            district: None,
            land_area: Some("2.5 acres".to_string()),
            compensation_amount: Some("50000".to_string()),
            date: None,
            raw_text: String::new(),
            assessment: CompensationAssessment {
                fair_compensation: 250_000.0,
                compensation_received: 50_000.0,
                is_fair: false,
                market_value: 500_000.0,
                compensation_gap: 450_000.0,
                amount_owed: 450_000.0,
            },
            classification: Classification::new("acquisition_notice", 1.0),
            impact: ImpactDetails {
                families_affected: Some(3),
                ..Default::default()
            },
            created_at: None,
        };

        let report = render_grievance_report(&record);

        assert!(report.starts_with(REPORT_TITLE));
        assert!(report.contains("Survey Number: 452"));
        assert!(report.contains("Owner Name: muthu"));
        assert!(report.contains("Fairness Passed: false"));
        assert!(report.contains("Families Affected: 3"));
        assert!(report.contains("Amount Still Owed: INR 450,000.00"));
        assert!(report.trim_end().ends_with(REPORT_FOOTER));
    }

    #[test]
    fn test_report_lines_in_order() {
        let record = NoticeRecord {
            survey_number: "7".to_string(),
            owner_name: None,
            register_number: None,
            village: None,
            taluk: None,
            district: None,
            land_area: None,
            compensation_amount: None,
            date: None,
            raw_text: String::new(),
            assessment: CompensationAssessment::default(),
            classification: Classification::new("other_document", 0.2),
            impact: ImpactDetails::default(),
            created_at: None,
        };

        let report = GrievanceReport::new(&record).to_string();
        let lines: Vec<&str> = report.lines().collect();

        assert_eq!(lines[0], REPORT_TITLE);
        assert_eq!(lines[1], "=".repeat(REPORT_TITLE.len()));
        assert_eq!(lines[2], "");
        assert_eq!(lines[3], "Survey Number: 7");
        assert_eq!(lines[4], "Owner Name: ");
        assert!(lines.contains(&"Amount Still Owed: INR 0.00"));
        assert_eq!(lines.last(), Some(&REPORT_FOOTER));
        assert_eq!(report, render_grievance_report(&record));
    }
}

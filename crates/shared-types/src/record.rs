//! Persisted notice records
//!
//! A [`NoticeRecord`] is created once per ingested notice and keyed by its
//! survey number. Only the [`ImpactDetails`] part is amended afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{Classification, CompensationAssessment};

/// Social impact details entered after ingestion
///
/// Every field is optional. When used as an update, only the `Some` fields
/// are written.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ImpactDetails {
    #[serde(default)]
    pub public_usage: Option<String>,
    #[serde(default)]
    pub families_affected: Option<i64>,
    #[serde(default)]
    pub other_properties: Option<String>,
    #[serde(default)]
    pub rehab_plan: Option<String>,
    #[serde(default)]
    pub estimated_cost: Option<f64>,
    #[serde(default)]
    pub positive_impact: Option<String>,
}

impl ImpactDetails {
    /// True when the update would not change anything
    pub fn is_empty(&self) -> bool {
        self.public_usage.is_none()
            && self.families_affected.is_none()
            && self.other_properties.is_none()
            && self.rehab_plan.is_none()
            && self.estimated_cost.is_none()
            && self.positive_impact.is_none()
    }

    /// Overlay the supplied fields of `update` onto `self`
    pub fn apply(&mut self, update: &ImpactDetails) {
        if let Some(v) = &update.public_usage {
            self.public_usage = Some(v.clone());
        }
        if let Some(v) = update.families_affected {
            self.families_affected = Some(v);
        }
        if let Some(v) = &update.other_properties {
            self.other_properties = Some(v.clone());
        }
        if let Some(v) = &update.rehab_plan {
            self.rehab_plan = Some(v.clone());
        }
        if let Some(v) = update.estimated_cost {
            self.estimated_cost = Some(v);
        }
        if let Some(v) = &update.positive_impact {
            self.positive_impact = Some(v.clone());
        }
    }
}

/// Full record for one acquisition notice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoticeRecord {
    pub survey_number: String,
    pub owner_name: Option<String>,
    pub register_number: Option<String>,
    pub village: Option<String>,
    pub taluk: Option<String>,
    pub district: Option<String>,
    pub land_area: Option<String>,
    pub compensation_amount: Option<String>,
    pub date: Option<String>,
    pub raw_text: String,
    pub assessment: CompensationAssessment,
    pub classification: Classification,
    #[serde(default)]
    pub impact: ImpactDetails,
    /// Set by the store on insert
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl NoticeRecord {
    /// Field name/value pairs in display order, used by reports
    pub fn display_fields(&self) -> Vec<(&'static str, String)> {
        let opt = |v: &Option<String>| v.clone().unwrap_or_default();
        let mut fields = vec![
            ("survey_number", self.survey_number.clone()),
            ("owner_name", opt(&self.owner_name)),
            ("register_number", opt(&self.register_number)),
            ("village", opt(&self.village)),
            ("taluk", opt(&self.taluk)),
            ("district", opt(&self.district)),
            ("land_area", opt(&self.land_area)),
            ("compensation_amount", opt(&self.compensation_amount)),
            ("date", opt(&self.date)),
            (
                "fair_compensation",
                format!("{:.2}", self.assessment.fair_compensation),
            ),
            ("fairness_passed", self.assessment.is_fair.to_string()),
            ("classification_result", self.classification.to_string()),
        ];

        if let Some(v) = &self.impact.public_usage {
            fields.push(("public_usage", v.clone()));
        }
        if let Some(v) = self.impact.families_affected {
            fields.push(("families_affected", v.to_string()));
        }
        if let Some(v) = &self.impact.other_properties {
            fields.push(("other_properties", v.clone()));
        }
        if let Some(v) = &self.impact.rehab_plan {
            fields.push(("rehab_plan", v.clone()));
        }
        if let Some(v) = self.impact.estimated_cost {
            fields.push(("estimated_cost", format!("{:.2}", v)));
        }
        if let Some(v) = &self.impact.positive_impact {
            fields.push(("positive_impact", v.clone()));
        }

        fields
    }
}

//! Label dictionary for notice fields
//!
//! Each canonical field carries an ordered list of lower-case phrases that
//! introduce it in OCR text. Declaration order matters: the extractor walks
//! fields and phrases in exactly this order.

use serde::{Deserialize, Serialize};
use std::fmt;

pub const OWNER_NAME_LABELS: &[&str] = &["owner name", "owner", "name of owner", "owner of land"];

pub const SURVEY_NUMBER_LABELS: &[&str] = &["survey number", "survey no"];

pub const LAND_AREA_LABELS: &[&str] = &["land area", "area", "extent"];

pub const COMPENSATION_AMOUNT_LABELS: &[&str] = &["compensation", "amount", "payment"];

pub const DATE_LABELS: &[&str] = &["date", "issued on", "notice date"];

pub const REGISTER_NUMBER_LABELS: &[&str] = &["register number", "reg no", "registration no"];

pub const VILLAGE_LABELS: &[&str] = &["village", "place"];

pub const TALUK_LABELS: &[&str] = &["taluk", "taluka"];

pub const DISTRICT_LABELS: &[&str] = &["district", "dist"];

/// Canonical fields recognized in acquisition notices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    OwnerName,
    SurveyNumber,
    LandArea,
    CompensationAmount,
    Date,
    RegisterNumber,
    Village,
    Taluk,
    District,
}

impl FieldKind {
    /// All fields in declaration order
    pub const ALL: [FieldKind; 9] = [
        FieldKind::OwnerName,
        FieldKind::SurveyNumber,
        FieldKind::LandArea,
        FieldKind::CompensationAmount,
        FieldKind::Date,
        FieldKind::RegisterNumber,
        FieldKind::Village,
        FieldKind::Taluk,
        FieldKind::District,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::OwnerName => "owner_name",
            FieldKind::SurveyNumber => "survey_number",
            FieldKind::LandArea => "land_area",
            FieldKind::CompensationAmount => "compensation_amount",
            FieldKind::Date => "date",
            FieldKind::RegisterNumber => "register_number",
            FieldKind::Village => "village",
            FieldKind::Taluk => "taluk",
            FieldKind::District => "district",
        }
    }

    /// Synonym phrases, in match order
    pub fn synonyms(&self) -> &'static [&'static str] {
        match self {
            FieldKind::OwnerName => OWNER_NAME_LABELS,
            FieldKind::SurveyNumber => SURVEY_NUMBER_LABELS,
            FieldKind::LandArea => LAND_AREA_LABELS,
            FieldKind::CompensationAmount => COMPENSATION_AMOUNT_LABELS,
            FieldKind::Date => DATE_LABELS,
            FieldKind::RegisterNumber => REGISTER_NUMBER_LABELS,
            FieldKind::Village => VILLAGE_LABELS,
            FieldKind::Taluk => TALUK_LABELS,
            FieldKind::District => DISTRICT_LABELS,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_field_has_lowercase_synonyms() {
        for kind in FieldKind::ALL {
            let synonyms = kind.synonyms();
            assert!(!synonyms.is_empty(), "{} has no synonyms", kind);
            for synonym in synonyms {
                assert_eq!(*synonym, synonym.to_lowercase());
            }
        }
    }

    #[test]
    fn test_declaration_order_matches_ord() {
        let mut sorted = FieldKind::ALL;
        sorted.sort();
        assert_eq!(sorted, FieldKind::ALL);
    }

    #[test]
    fn test_name_round_trip() {
        for kind in FieldKind::ALL {
            assert_eq!(FieldKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(FieldKind::from_name("pincode"), None);
    }

    #[test]
    fn test_serde_uses_canonical_name() {
        let json = serde_json::to_string(&FieldKind::CompensationAmount).unwrap();
        assert_eq!(json, "\"compensation_amount\"");
    }
}

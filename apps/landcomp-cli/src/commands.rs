//! Subcommand handlers
//!
//! Handlers write their result to `out` as pretty JSON (or plain text for the
//! grievance report) and leave logging to `tracing`.

use anyhow::{bail, Context, Result};
use compensation_engine::report::render_grievance_report;
use compensation_engine::{CompensationEngine, DashboardSummary, DocumentClassifier, ProcessedNotice};
use record_store::{RecordStore, StoreError};
use serde::Serialize;
use shared_types::ImpactDetails;
use std::io::Write;
use std::path::Path;
use tracing::{info, warn};

fn write_json<T: Serialize>(out: &mut impl Write, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

/// Process one notice's text and store the resulting record
///
/// The processing result is always printed; storing can still fail
/// afterwards when there is no survey number or it is already taken.
pub async fn ingest(
    source: &Path,
    raw_text: &str,
    engine: &CompensationEngine,
    classifier: &dyn DocumentClassifier,
    store: &dyn RecordStore,
    out: &mut impl Write,
) -> Result<ProcessedNotice> {
    let classification = classifier.classify(source, raw_text);
    let notice = engine.process(raw_text, classification);
    write_json(out, &notice)?;

    let Some(record) = notice.to_record() else {
        warn!(source = %source.display(), "no survey number extracted");
        bail!(
            "No survey number found in {}; record not stored",
            source.display()
        );
    };

    match store.insert(&record).await {
        Ok(()) => {
            info!(survey_number = %record.survey_number, "stored notice");
            Ok(notice)
        }
        Err(e @ StoreError::Duplicate(_)) => Err(e.into()),
        Err(e) => Err(e).context("Failed to store record"),
    }
}

pub async fn update_impact(
    store: &dyn RecordStore,
    survey_number: &str,
    update: &ImpactDetails,
    out: &mut impl Write,
) -> Result<()> {
    if update.is_empty() {
        bail!("Nothing to update: give at least one impact field");
    }

    store.update_impact(survey_number, update).await?;
    writeln!(out, "Details updated for Survey No {}", survey_number)?;
    Ok(())
}

pub async fn list_records(store: &dyn RecordStore, out: &mut impl Write) -> Result<()> {
    let records = store.list().await?;
    write_json(out, &records)
}

pub async fn show_record(
    store: &dyn RecordStore,
    survey_number: &str,
    out: &mut impl Write,
) -> Result<()> {
    let record = store
        .get(survey_number)
        .await?
        .ok_or_else(|| StoreError::NotFound(survey_number.to_string()))?;
    write_json(out, &record)
}

/// Strict amount parsing for command-line input: commas allowed, nothing else
///
/// A blank value counts as zero.
pub fn parse_amount_arg(input: &str) -> Result<f64> {
    let cleaned: String = input.chars().filter(|c| *c != ',').collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return Ok(0.0);
    }

    let value: f64 = cleaned
        .parse()
        .with_context(|| format!("Invalid amount: {:?}", input))?;

    if !value.is_finite() || value < 0.0 {
        bail!("Invalid amount: {:?}", input);
    }
    Ok(value)
}

pub fn market(
    engine: &CompensationEngine,
    land_area: &str,
    received: &str,
    out: &mut impl Write,
) -> Result<()> {
    let area = parse_amount_arg(land_area)?;
    let received = parse_amount_arg(received)?;
    let comparison = engine.compare_with_market(area, received);
    write_json(out, &comparison)
}

pub async fn grievance(
    store: &dyn RecordStore,
    survey_number: &str,
    out: &mut impl Write,
) -> Result<()> {
    let record = store
        .get(survey_number)
        .await?
        .ok_or_else(|| StoreError::NotFound(survey_number.to_string()))?;

    out.write_all(render_grievance_report(&record).as_bytes())?;
    Ok(())
}

pub async fn summary(store: &dyn RecordStore, out: &mut impl Write) -> Result<()> {
    let records = store.list().await?;
    write_json(out, &DashboardSummary::from_records(&records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use compensation_engine::KeywordClassifier;
    use pretty_assertions::assert_eq;
    use record_store::MemoryRecordStore;
    use serde_json::Value;

    const NOTICE: &str = "Land Acquisition Notice\n\
        Survey No: 45/2\n\
        Village: Kolathur\n\
        Land Area: 2.5 acres\n\
        Compensation: 50000";

    async fn ingest_notice(store: &MemoryRecordStore, text: &str) -> (Result<ProcessedNotice>, String) {
        let mut out = Vec::new();
        let result = ingest(
            Path::new("notice.txt"),
            text,
            &CompensationEngine::default(),
            &KeywordClassifier::default(),
            store,
            &mut out,
        )
        .await;
        (result, String::from_utf8(out).unwrap())
    }

    #[tokio::test]
    async fn test_ingest_prints_and_stores() {
        let store = MemoryRecordStore::new();
        let (result, printed) = ingest_notice(&store, NOTICE).await;
        result.unwrap();

        let json: Value = serde_json::from_str(&printed).unwrap();
        assert_eq!(json["extracted_data"]["survey_number"], "452");
        assert_eq!(json["fair_compensation"], 250_000.0);
        assert_eq!(json["is_fair_compensation"], false);
        assert_eq!(json["message"], "Below fair rate. Consider grievance filing.");

        let record = store.get("452").await.unwrap().unwrap();
        assert_eq!(record.village.as_deref(), Some("kolathur"));
    }

    #[tokio::test]
    async fn test_ingest_duplicate_still_prints() {
        let store = MemoryRecordStore::new();
        ingest_notice(&store, NOTICE).await.0.unwrap();

        let (result, printed) = ingest_notice(&store, NOTICE).await;
        let err = result.unwrap_err();
        assert_eq!(err.to_string(), "Survey No 452 already exists");
        assert!(printed.contains("extracted_data"));
    }

    #[tokio::test]
    async fn test_ingest_without_survey_number() {
        let store = MemoryRecordStore::new();
        let (result, printed) = ingest_notice(&store, "Land Area: 2 acres").await;

        assert!(result.unwrap_err().to_string().contains("No survey number"));
        assert!(printed.contains("fair_compensation"));
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_impact_and_summary() {
        let store = MemoryRecordStore::new();
        ingest_notice(&store, NOTICE).await.0.unwrap();

        let mut out = Vec::new();
        let update = ImpactDetails {
            public_usage: Some("highway".to_string()),
            families_affected: Some(3),
            ..Default::default()
        };
        update_impact(&store, "452", &update, &mut out).await.unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Details updated for Survey No 452\n");

        let mut out = Vec::new();
        summary(&store, &mut out).await.unwrap();
        let json: Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["total_records"], 1);
        assert_eq!(json["land_usage"]["highway"], 1);
        assert_eq!(json["families_by_survey"]["452"], 3);
    }

    #[tokio::test]
    async fn test_empty_impact_update_rejected() {
        let store = MemoryRecordStore::new();
        let mut out = Vec::new();
        let err = update_impact(&store, "452", &ImpactDetails::default(), &mut out)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Nothing to update"));
    }

    #[tokio::test]
    async fn test_show_unknown_record() {
        let store = MemoryRecordStore::new();
        let mut out = Vec::new();
        let err = show_record(&store, "77", &mut out).await.unwrap_err();
        assert_eq!(err.to_string(), "No record found for survey number 77");
    }

    #[tokio::test]
    async fn test_grievance_report_for_stored_record() {
        let store = MemoryRecordStore::new();
        ingest_notice(&store, NOTICE).await.0.unwrap();

        let mut out = Vec::new();
        grievance(&store, "452", &mut out).await.unwrap();
        let report = String::from_utf8(out).unwrap();
        assert!(report.contains("Survey Number: 452"));
        assert!(report.contains("Amount Still Owed: INR 450,000.00"));
    }

    #[test]
    fn test_parse_amount_arg() {
        assert_eq!(parse_amount_arg("50,000").unwrap(), 50_000.0);
        assert_eq!(parse_amount_arg(" 2.5 ").unwrap(), 2.5);
        assert!(parse_amount_arg("2.5 acres").is_err());
        assert_eq!(parse_amount_arg("").unwrap(), 0.0);
        assert_eq!(parse_amount_arg("   ").unwrap(), 0.0);
        assert_eq!(parse_amount_arg(",").unwrap(), 0.0);
        assert!(parse_amount_arg("-4").is_err());
        assert!(parse_amount_arg("inf").is_err());
    }

    #[test]
    fn test_market_output() {
        let mut out = Vec::new();
        market(&CompensationEngine::default(), "2.5", "50,000", &mut out).unwrap();
        let json: Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["market_value"], 500_000.0);
        assert_eq!(json["amount_owed"], 450_000.0);
    }

    #[test]
    fn test_market_blank_received_counts_as_zero() {
        let mut out = Vec::new();
        market(&CompensationEngine::default(), "1", "", &mut out).unwrap();
        let json: Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["market_value"], 200_000.0);
        assert_eq!(json["amount_owed"], 200_000.0);
    }
}

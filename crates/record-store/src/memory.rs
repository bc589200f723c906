// In-process record store, used by tests and dry runs
use crate::{RecordStore, StoreError};
use async_trait::async_trait;
use chrono::Utc;
use shared_types::{ImpactDetails, NoticeRecord};
use tokio::sync::RwLock;

#[derive(Default)]
pub struct MemoryRecordStore {
    // Insertion order
    records: RwLock<Vec<NoticeRecord>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn insert(&self, record: &NoticeRecord) -> Result<(), StoreError> {
        let mut records = self.records.write().await;
        if records
            .iter()
            .any(|r| r.survey_number == record.survey_number)
        {
            return Err(StoreError::Duplicate(record.survey_number.clone()));
        }

        let mut stored = record.clone();
        stored.created_at.get_or_insert_with(Utc::now);
        records.push(stored);
        Ok(())
    }

    async fn update_impact(
        &self,
        survey_number: &str,
        update: &ImpactDetails,
    ) -> Result<(), StoreError> {
        let mut records = self.records.write().await;
        let record = records
            .iter_mut()
            .find(|r| r.survey_number == survey_number)
            .ok_or_else(|| StoreError::NotFound(survey_number.to_string()))?;

        record.impact.apply(update);
        Ok(())
    }

    async fn get(&self, survey_number: &str) -> Result<Option<NoticeRecord>, StoreError> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .find(|r| r.survey_number == survey_number)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<NoticeRecord>, StoreError> {
        let records = self.records.read().await;
        Ok(records.iter().rev().cloned().collect())
    }
}

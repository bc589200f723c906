//! Record storage for processed notices
//!
//! One record per survey number. Inserting an existing survey number fails
//! with [`StoreError::Duplicate`] and never overwrites. After insertion only
//! the impact details can change; there is no delete.

mod memory;
mod sqlite;

pub use memory::MemoryRecordStore;
pub use sqlite::SqliteRecordStore;

use async_trait::async_trait;
use shared_types::{ImpactDetails, NoticeRecord};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Survey No {0} already exists")]
    Duplicate(String),

    #[error("No record found for survey number {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Store a new record; fails if the survey number is taken
    async fn insert(&self, record: &NoticeRecord) -> Result<(), StoreError>;

    /// Write the supplied impact fields, leaving everything else untouched
    async fn update_impact(
        &self,
        survey_number: &str,
        update: &ImpactDetails,
    ) -> Result<(), StoreError>;

    async fn get(&self, survey_number: &str) -> Result<Option<NoticeRecord>, StoreError>;

    /// All records, newest first
    async fn list(&self) -> Result<Vec<NoticeRecord>, StoreError>;
}

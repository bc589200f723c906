//! SQLite-backed record store

use crate::{RecordStore, StoreError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared_types::{Classification, CompensationAssessment, ImpactDetails, NoticeRecord};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use sqlx::FromRow;

const SELECT_COLUMNS: &str = r#"
    SELECT survey_number, owner_name, register_number, village, taluk, district,
           land_area, compensation_amount, date, raw_text,
           fair_compensation, compensation_received, fairness_passed,
           market_value, compensation_gap, amount_owed,
           classification_label, classification_score,
           public_usage, families_affected, other_properties, rehab_plan,
           estimated_cost, positive_impact, created_at
    FROM records
"#;

/// Row as stored in the `records` table
#[derive(Debug, Clone, FromRow)]
struct DbRecord {
    survey_number: String,
    owner_name: Option<String>,
    register_number: Option<String>,
    village: Option<String>,
    taluk: Option<String>,
    district: Option<String>,
    land_area: Option<String>,
    compensation_amount: Option<String>,
    date: Option<String>,
    raw_text: String,
    fair_compensation: f64,
    compensation_received: f64,
    fairness_passed: bool,
    market_value: f64,
    compensation_gap: f64,
    amount_owed: f64,
    classification_label: String,
    classification_score: f64,
    public_usage: Option<String>,
    families_affected: Option<i64>,
    other_properties: Option<String>,
    rehab_plan: Option<String>,
    estimated_cost: Option<f64>,
    positive_impact: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<DbRecord> for NoticeRecord {
    fn from(row: DbRecord) -> Self {
        NoticeRecord {
            survey_number: row.survey_number,
            owner_name: row.owner_name,
            register_number: row.register_number,
            village: row.village,
            taluk: row.taluk,
            district: row.district,
            land_area: row.land_area,
            compensation_amount: row.compensation_amount,
            date: row.date,
            raw_text: row.raw_text,
            assessment: CompensationAssessment {
                fair_compensation: row.fair_compensation,
                compensation_received: row.compensation_received,
                is_fair: row.fairness_passed,
                market_value: row.market_value,
                compensation_gap: row.compensation_gap,
                amount_owed: row.amount_owed,
            },
            classification: Classification::new(row.classification_label, row.classification_score),
            impact: ImpactDetails {
                public_usage: row.public_usage,
                families_affected: row.families_affected,
                other_properties: row.other_properties,
                rehab_plan: row.rehab_plan,
                estimated_cost: row.estimated_cost,
                positive_impact: row.positive_impact,
            },
            created_at: Some(row.created_at),
        }
    }
}

pub struct SqliteRecordStore {
    pool: SqlitePool,
}

impl SqliteRecordStore {
    /// Connect to a database URL such as `sqlite:compensation.db?mode=rwc`
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        tracing::info!("Connecting to database: {}", database_url);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;

        Self::from_pool(pool).await
    }

    /// Private in-memory database
    ///
    /// Every SQLite connection gets its own memory database, so the pool is
    /// pinned to one connection that is never recycled.
    pub async fn in_memory() -> Result<Self, StoreError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;

        Self::from_pool(pool).await
    }

    pub async fn from_pool(pool: SqlitePool) -> Result<Self, StoreError> {
        Self::run_migrations(&pool).await?;
        Ok(Self { pool })
    }

    async fn run_migrations(pool: &SqlitePool) -> Result<(), StoreError> {
        tracing::debug!("Ensuring records table exists");

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS records (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                survey_number TEXT NOT NULL UNIQUE,
                owner_name TEXT,
                register_number TEXT,
                village TEXT,
                taluk TEXT,
                district TEXT,
                land_area TEXT,
                compensation_amount TEXT,
                date TEXT,
                raw_text TEXT NOT NULL,
                fair_compensation REAL NOT NULL,
                compensation_received REAL NOT NULL,
                fairness_passed BOOLEAN NOT NULL,
                market_value REAL NOT NULL,
                compensation_gap REAL NOT NULL,
                amount_owed REAL NOT NULL,
                classification_label TEXT NOT NULL,
                classification_score REAL NOT NULL,
                public_usage TEXT,
                families_affected INTEGER,
                other_properties TEXT,
                rehab_plan TEXT,
                estimated_cost REAL,
                positive_impact TEXT,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl RecordStore for SqliteRecordStore {
    async fn insert(&self, record: &NoticeRecord) -> Result<(), StoreError> {
        let created_at = record.created_at.unwrap_or_else(Utc::now);

        let result = sqlx::query(
            r#"
            INSERT INTO records (
                survey_number, owner_name, register_number, village, taluk, district,
                land_area, compensation_amount, date, raw_text,
                fair_compensation, compensation_received, fairness_passed,
                market_value, compensation_gap, amount_owed,
                classification_label, classification_score,
                public_usage, families_affected, other_properties, rehab_plan,
                estimated_cost, positive_impact, created_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&record.survey_number)
        .bind(&record.owner_name)
        .bind(&record.register_number)
        .bind(&record.village)
        .bind(&record.taluk)
        .bind(&record.district)
        .bind(&record.land_area)
        .bind(&record.compensation_amount)
        .bind(&record.date)
        .bind(&record.raw_text)
        .bind(record.assessment.fair_compensation)
        .bind(record.assessment.compensation_received)
        .bind(record.assessment.is_fair)
        .bind(record.assessment.market_value)
        .bind(record.assessment.compensation_gap)
        .bind(record.assessment.amount_owed)
        .bind(&record.classification.label)
        .bind(record.classification.score)
        .bind(&record.impact.public_usage)
        .bind(record.impact.families_affected)
        .bind(&record.impact.other_properties)
        .bind(&record.impact.rehab_plan)
        .bind(record.impact.estimated_cost)
        .bind(&record.impact.positive_impact)
        .bind(created_at.to_rfc3339())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => {
                tracing::info!("Inserted record for survey number {}", record.survey_number);
                Ok(())
            }
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                tracing::warn!("Rejected duplicate survey number {}", record.survey_number);
                Err(StoreError::Duplicate(record.survey_number.clone()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn update_impact(
        &self,
        survey_number: &str,
        update: &ImpactDetails,
    ) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE records
            SET public_usage = COALESCE(?, public_usage),
                families_affected = COALESCE(?, families_affected),
                other_properties = COALESCE(?, other_properties),
                rehab_plan = COALESCE(?, rehab_plan),
                estimated_cost = COALESCE(?, estimated_cost),
                positive_impact = COALESCE(?, positive_impact)
            WHERE survey_number = ?
            "#,
        )
        .bind(&update.public_usage)
        .bind(update.families_affected)
        .bind(&update.other_properties)
        .bind(&update.rehab_plan)
        .bind(update.estimated_cost)
        .bind(&update.positive_impact)
        .bind(survey_number)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(survey_number.to_string()));
        }

        tracing::info!("Updated impact details for survey number {}", survey_number);
        Ok(())
    }

    async fn get(&self, survey_number: &str) -> Result<Option<NoticeRecord>, StoreError> {
        let row: Option<DbRecord> =
            sqlx::query_as(&format!("{} WHERE survey_number = ?", SELECT_COLUMNS))
                .bind(survey_number)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(NoticeRecord::from))
    }

    async fn list(&self) -> Result<Vec<NoticeRecord>, StoreError> {
        let rows: Vec<DbRecord> = sqlx::query_as(&format!("{} ORDER BY id DESC", SELECT_COLUMNS))
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(NoticeRecord::from).collect())
    }
}

use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Row;

use super::domain::{ContactSubmission, StoredSubmission, SubmissionId};

const CREATE_CONTACTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS contacts (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL CHECK (length(name) BETWEEN 1 AND 80),
    phone TEXT NOT NULL CHECK (length(phone) BETWEEN 10 AND 13),
    email TEXT NOT NULL CHECK (length(email) BETWEEN 1 AND 100),
    reason TEXT NOT NULL CHECK (length(reason) BETWEEN 1 AND 300),
    submitted_at TEXT NOT NULL
)
"#;

/// Storage abstraction so the contact service can be exercised in isolation.
#[async_trait]
pub trait SubmissionRepository: Send + Sync {
    /// Persist a validated submission, stamping its id and creation time.
    async fn save(&self, submission: ContactSubmission) -> Result<StoredSubmission, RepositoryError>;
    async fn count(&self) -> Result<u64, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("store rejected the write: {0}")]
    Rejected(String),
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

impl From<sqlx::Error> for RepositoryError {
    fn from(value: sqlx::Error) -> Self {
        match &value {
            sqlx::Error::Database(db) if db.is_check_violation() || db.is_unique_violation() => {
                Self::Rejected(db.message().to_string())
            }
            _ => Self::Unavailable(value.to_string()),
        }
    }
}

/// SQLite-backed repository over a shared connection pool.
#[derive(Debug, Clone)]
pub struct SqliteSubmissionRepository {
    pool: SqlitePool,
}

impl SqliteSubmissionRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open (creating if missing) the database behind `url`.
    pub async fn connect(url: &str) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;
        Ok(Self::new(pool))
    }

    /// Create the contacts table if it does not exist yet.
    pub async fn migrate(&self) -> Result<(), sqlx::Error> {
        sqlx::query(CREATE_CONTACTS_TABLE)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl SubmissionRepository for SqliteSubmissionRepository {
    async fn save(&self, submission: ContactSubmission) -> Result<StoredSubmission, RepositoryError> {
        let submitted_at: DateTime<Utc> = Utc::now();

        let row = sqlx::query(
            "INSERT INTO contacts (name, phone, email, reason, submitted_at) \
             VALUES (?, ?, ?, ?, ?) RETURNING id",
        )
        .bind(&submission.name)
        .bind(&submission.phone)
        .bind(&submission.email)
        .bind(&submission.reason)
        .bind(submitted_at)
        .fetch_one(&self.pool)
        .await?;

        let id: i64 = row.try_get("id")?;
        Ok(StoredSubmission::from_submission(
            SubmissionId(id),
            submission,
            submitted_at,
        ))
    }

    async fn count(&self) -> Result<u64, RepositoryError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM contacts")
            .fetch_one(&self.pool)
            .await?;
        Ok(total.max(0) as u64)
    }
}

//! Resume Record Store — persistence for `resumes` rows.

use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;

use crate::models::resume::{NewResume, ResumeRow, ResumeUpdate};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// `get_by_id` and `update` return `Ok(None)` for an unknown id; that is not an error.
#[async_trait]
pub trait ResumeStore: Send + Sync {
    async fn create(&self, new: NewResume) -> Result<ResumeRow, StoreError>;

    async fn get_by_id(&self, id: i64) -> Result<Option<ResumeRow>, StoreError>;

    async fn update(&self, id: i64, update: ResumeUpdate)
        -> Result<Option<ResumeRow>, StoreError>;
}

#[derive(Clone)]
pub struct PgResumeStore {
    pool: PgPool,
}

impl PgResumeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResumeStore for PgResumeStore {
    async fn create(&self, new: NewResume) -> Result<ResumeRow, StoreError> {
        Ok(sqlx::query_as::<_, ResumeRow>(
            r#"
            INSERT INTO resumes (original_filename, job_title)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(&new.original_filename)
        .bind(&new.job_title)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<ResumeRow>, StoreError> {
        Ok(
            sqlx::query_as::<_, ResumeRow>("SELECT * FROM resumes WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn update(
        &self,
        id: i64,
        update: ResumeUpdate,
    ) -> Result<Option<ResumeRow>, StoreError> {
        // All four AI-derived columns change together in one statement.
        Ok(sqlx::query_as::<_, ResumeRow>(
            r#"
            UPDATE resumes
            SET resume_html = $2,
                feedback_text = $3,
                revised_html = $4,
                result_pdf_path = $5
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&update.resume_html)
        .bind(&update.feedback_text)
        .bind(&update.revised_html)
        .bind(&update.result_pdf_path)
        .fetch_optional(&self.pool)
        .await?)
    }
}

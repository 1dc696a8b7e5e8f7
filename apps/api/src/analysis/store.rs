//! Persistence for `resume_analyses`.
//!
//! `AppState` holds an `Arc<dyn AnalysisStore>`; `PgAnalysisStore` is the
//! production backend. Rows are insert-only: nothing here updates or deletes.

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::models::analysis::{InsertResumeAnalysis, ResumeAnalysis};

#[async_trait]
pub trait AnalysisStore: Send + Sync {
    /// Writes a validated payload; the database assigns `id` and `created_at`.
    async fn insert(&self, analysis: &InsertResumeAnalysis) -> Result<ResumeAnalysis, AppError>;

    async fn get(&self, id: i32) -> Result<Option<ResumeAnalysis>, AppError>;

    /// Newest first.
    async fn list_recent(&self, limit: i64) -> Result<Vec<ResumeAnalysis>, AppError>;
}

pub struct PgAnalysisStore {
    pool: PgPool,
}

impl PgAnalysisStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AnalysisStore for PgAnalysisStore {
    async fn insert(&self, analysis: &InsertResumeAnalysis) -> Result<ResumeAnalysis, AppError> {
        warn_out_of_range(analysis);

        let row = sqlx::query_as::<_, ResumeAnalysis>(
            r#"
            INSERT INTO resume_analyses
                (filename, file_type, content, job_description,
                 overall_score, keyword_match_percentage, format_score,
                 score_breakdown, missing_keywords, suggestions)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(&analysis.filename)
        .bind(&analysis.file_type)
        .bind(&analysis.content)
        .bind(analysis.job_description.as_deref())
        .bind(analysis.overall_score)
        .bind(analysis.keyword_match_percentage)
        .bind(analysis.format_score)
        .bind(Json(&analysis.score_breakdown))
        .bind(Json(&analysis.missing_keywords))
        .bind(Json(&analysis.suggestions))
        .fetch_one(&self.pool)
        .await?;

        info!(
            "Stored resume analysis {} for '{}' (overall score {})",
            row.id, row.filename, row.overall_score
        );
        Ok(row)
    }

    async fn get(&self, id: i32) -> Result<Option<ResumeAnalysis>, AppError> {
        Ok(
            sqlx::query_as::<_, ResumeAnalysis>("SELECT * FROM resume_analyses WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn list_recent(&self, limit: i64) -> Result<Vec<ResumeAnalysis>, AppError> {
        Ok(sqlx::query_as::<_, ResumeAnalysis>(
            "SELECT * FROM resume_analyses ORDER BY created_at DESC, id DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?)
    }
}

/// Scores outside 0–100 are stored as given, but flagged in the logs.
pub(crate) fn warn_out_of_range(analysis: &InsertResumeAnalysis) {
    for (field, value) in analysis.out_of_range_scores() {
        warn!(
            "Storing analysis for '{}' with {field}={value} outside 0-100",
            analysis.filename
        );
    }
}

// ────────────────────────────────────────────────────────────────────────────
// In-memory backend for handler tests
// ────────────────────────────────────────────────────────────────────────────


#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::analysis::{BreakdownStatus, Impact, Priority, ScoreBreakdownItem};
    use crate::models::analysis::{MissingKeyword, Suggestion};

    fn sample_insert(filename: &str) -> InsertResumeAnalysis {
        InsertResumeAnalysis {
            filename: filename.to_string(),
            file_type: "application/pdf".to_string(),
            content: "Platform engineer".to_string(),
            job_description: None,
            overall_score: 82,
            keyword_match_percentage: 70,
            format_score: 90,
            score_breakdown: vec![ScoreBreakdownItem {
                category: "Format".to_string(),
                score: 90.5,
                status: BreakdownStatus::Excellent,
            }],
            missing_keywords: vec![MissingKeyword {
                keyword: "Terraform".to_string(),
                priority: Priority::Low,
                match_rate: 0.1,
            }],
            suggestions: vec![Suggestion {
                id: "summary".to_string(),
                title: "Add a summary".to_string(),
                description: "Two lines at the top".to_string(),
                impact: Impact::Medium,
                estimated_time: "5 min".to_string(),
                icon: "pencil".to_string(),
            }],
        }
    }

    // Needs a Postgres reachable through DATABASE_URL: `cargo test -- --ignored`.
    #[sqlx::test]
    #[ignore]
    async fn test_pg_store_round_trips_jsonb_columns(pool: PgPool) {
        let store = PgAnalysisStore::new(pool);

        let first = store.insert(&sample_insert("first.pdf")).await.unwrap();
        let second = store.insert(&sample_insert("second.pdf")).await.unwrap();
        assert!(second.id > first.id);
        assert!(first.job_description.is_none());
        assert_eq!(first.score_breakdown, sample_insert("x").score_breakdown);
        assert_eq!(first.missing_keywords, sample_insert("x").missing_keywords);
        assert_eq!(first.suggestions, sample_insert("x").suggestions);

        let fetched = store.get(first.id).await.unwrap().unwrap();
        assert_eq!(fetched, first);
        assert!(store.get(first.id + 100).await.unwrap().is_none());

        let recent = store.list_recent(1).await.unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].id, second.id);
    }
}

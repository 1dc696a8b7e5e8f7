#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ────────────────────────────────────────────────────────────────────────────
// Value types carried inside an analysis (stored as JSONB)
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum BreakdownStatus {
    Excellent,
    Good,
    NeedsImprovement,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    High,
    Medium,
    Low,
}

/// Per-category sub-score with a qualitative label.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdownItem {
    pub category: String,
    pub score: f64,
    pub status: BreakdownStatus,
}

/// A keyword from the job description that the resume does not cover.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MissingKeyword {
    pub keyword: String,
    pub priority: Priority,
    pub match_rate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub id: String,
    pub title: String,
    pub description: String,
    pub impact: Impact,
    pub estimated_time: String,
    pub icon: String,
}

/// Output of the external scoring engine. Never persisted as-is; it is mapped
/// into an `InsertResumeAnalysis` together with the upload metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub overall_score: i32,
    pub keyword_match_percentage: i32,
    pub format_score: i32,
    pub score_breakdown: Vec<ScoreBreakdownItem>,
    pub missing_keywords: Vec<MissingKeyword>,
    pub suggestions: Vec<Suggestion>,
}

// ────────────────────────────────────────────────────────────────────────────
// Record shapes
// ────────────────────────────────────────────────────────────────────────────

/// Every column of `resume_analyses`, in wire (camelCase) naming.
pub const RECORD_FIELDS: &[&str] = &[
    "id",
    "filename",
    "fileType",
    "content",
    "jobDescription",
    "overallScore",
    "keywordMatchPercentage",
    "formatScore",
    "scoreBreakdown",
    "missingKeywords",
    "suggestions",
    "createdAt",
];

/// Columns the database fills in on insert.
pub const SYSTEM_ASSIGNED_FIELDS: &[&str] = &["id", "createdAt"];

/// `RECORD_FIELDS` minus `SYSTEM_ASSIGNED_FIELDS`. This is the field set of
/// `InsertResumeAnalysis`.
pub const INSERTABLE_FIELDS: &[&str] = &[
    "filename",
    "fileType",
    "content",
    "jobDescription",
    "overallScore",
    "keywordMatchPercentage",
    "formatScore",
    "scoreBreakdown",
    "missingKeywords",
    "suggestions",
];

/// A stored row of `resume_analyses` (read shape).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResumeAnalysis {
    pub id: i32,
    pub filename: String,
    pub file_type: String,
    pub content: String,
    pub job_description: Option<String>,
    pub overall_score: i32,
    pub keyword_match_percentage: i32,
    pub format_score: i32,
    #[sqlx(json)]
    pub score_breakdown: Vec<ScoreBreakdownItem>,
    #[sqlx(json)]
    pub missing_keywords: Vec<MissingKeyword>,
    #[sqlx(json)]
    pub suggestions: Vec<Suggestion>,
    pub created_at: DateTime<Utc>,
}

/// Write shape: a `ResumeAnalysis` without `id` and `created_at`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InsertResumeAnalysis {
    pub filename: String,
    pub file_type: String,
    pub content: String,
    #[serde(default)]
    pub job_description: Option<String>,
    pub overall_score: i32,
    pub keyword_match_percentage: i32,
    pub format_score: i32,
    pub score_breakdown: Vec<ScoreBreakdownItem>,
    pub missing_keywords: Vec<MissingKeyword>,
    pub suggestions: Vec<Suggestion>,
}

/// What the uploader supplied alongside the file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UploadMetadata {
    pub filename: String,
    pub file_type: String,
    pub content: String,
    #[serde(default)]
    pub job_description: Option<String>,
}

impl InsertResumeAnalysis {
    /// Builds the insert payload for a finished analysis. Field values are
    /// carried over untouched.
    pub fn from_result(upload: UploadMetadata, result: AnalysisResult) -> Self {
        let UploadMetadata {
            filename,
            file_type,
            content,
            job_description,
        } = upload;
        let AnalysisResult {
            overall_score,
            keyword_match_percentage,
            format_score,
            score_breakdown,
            missing_keywords,
            suggestions,
        } = result;

        Self {
            filename,
            file_type,
            content,
            job_description,
            overall_score,
            keyword_match_percentage,
            format_score,
            score_breakdown,
            missing_keywords,
            suggestions,
        }
    }

    /// Score fields that fall outside 0–100, as `(field, value)` pairs.
    /// The range is advisory and never blocks an insert.
    pub fn out_of_range_scores(&self) -> Vec<(&'static str, i32)> {
        [
            ("overallScore", self.overall_score),
            ("keywordMatchPercentage", self.keyword_match_percentage),
            ("formatScore", self.format_score),
        ]
        .into_iter()
        .filter(|(_, v)| !(0..=100).contains(v))
        .collect()
    }
}

impl ResumeAnalysis {
    /// The analysis portion of a stored record.
    pub fn result(&self) -> AnalysisResult {
        AnalysisResult {
            overall_score: self.overall_score,
            keyword_match_percentage: self.keyword_match_percentage,
            format_score: self.format_score,
            score_breakdown: self.score_breakdown.clone(),
            missing_keywords: self.missing_keywords.clone(),
            suggestions: self.suggestions.clone(),
        }
    }
}

//! Insert validation for `resume_analyses`.
//!
//! `parse_insert` turns an untyped JSON payload into an `InsertResumeAnalysis`,
//! collecting one `FieldIssue` per failing field instead of stopping at the
//! first. System-assigned fields (`id`, `createdAt`) and unknown keys are
//! ignored whatever their value. `parse_submission` does the same for a
//! scoring result wrapped with its upload metadata; issues inside the result
//! are reported under `result.`.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

use crate::models::analysis::{
    AnalysisResult, InsertResumeAnalysis, MissingKeyword, ScoreBreakdownItem, Suggestion,
    UploadMetadata, INSERTABLE_FIELDS,
};

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldIssue {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid analysis payload: {}", summarize(.issues))]
pub struct ValidationError {
    pub issues: Vec<FieldIssue>,
}

impl ValidationError {
    fn single(field: &str, message: impl Into<String>) -> Self {
        Self {
            issues: vec![FieldIssue {
                field: field.to_string(),
                message: message.into(),
            }],
        }
    }

    #[cfg(test)]
    /// Whether any issue was reported against `field`.
    pub fn mentions(&self, field: &str) -> bool {
        self.issues.iter().any(|i| i.field == field)
    }
}

fn summarize(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(|i| {
            if i.field.is_empty() {
                i.message.clone()
            } else {
                format!("{}: {}", i.field, i.message)
            }
        })
        .collect::<Vec<_>>()
        .join("; ")
}

const REQUIRED: &str = "required";
const EMPTY: &str = "must not be empty";

const UPLOAD_TEXT_FIELDS: [&str; 3] = ["filename", "fileType", "content"];
const SCORE_FIELDS: [&str; 3] = ["overallScore", "keywordMatchPercentage", "formatScore"];

/// Validates a candidate insert payload.
pub fn parse_insert(payload: &Value) -> Result<InsertResumeAnalysis, ValidationError> {
    let obj = payload
        .as_object()
        .ok_or_else(|| ValidationError::single("", "expected a JSON object"))?;

    for key in obj.keys() {
        if !INSERTABLE_FIELDS.contains(&key.as_str()) {
            debug!("Ignoring non-insertable field '{key}'");
        }
    }

    let mut issues = Vec::new();
    check_upload_fields(obj, &mut issues);
    check_result_fields(obj, "", &mut issues);

    if !issues.is_empty() {
        return Err(ValidationError { issues });
    }

    // Every field checked out individually; unknown keys are dropped here.
    serde_json::from_value(Value::Object(normalize_scores(obj)))
        .map_err(|e| ValidationError::single("", e.to_string()))
}

/// Validates `{filename, fileType, content, jobDescription?, result}`, the
/// shape a scoring engine submits.
pub fn parse_submission(
    payload: &Value,
) -> Result<(UploadMetadata, AnalysisResult), ValidationError> {
    let obj = payload
        .as_object()
        .ok_or_else(|| ValidationError::single("", "expected a JSON object"))?;

    let mut issues = Vec::new();
    check_upload_fields(obj, &mut issues);
    let result = match present(obj, "result") {
        None => {
            push(&mut issues, "result", REQUIRED);
            None
        }
        Some(Value::Object(result)) => {
            check_result_fields(result, "result.", &mut issues);
            Some(result)
        }
        Some(other) => {
            push(
                &mut issues,
                "result",
                format!("expected an object, got {}", kind(other)),
            );
            None
        }
    };

    let result = match result {
        Some(result) if issues.is_empty() => result,
        _ => return Err(ValidationError { issues }),
    };

    let upload: UploadMetadata = serde_json::from_value(payload.clone())
        .map_err(|e| ValidationError::single("", e.to_string()))?;
    let result: AnalysisResult = serde_json::from_value(Value::Object(normalize_scores(result)))
        .map_err(|e| ValidationError::single("result", e.to_string()))?;
    Ok((upload, result))
}

impl InsertResumeAnalysis {
    /// Checks the constraints serde cannot express on an already-typed value.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let issues: Vec<FieldIssue> = [
            ("filename", &self.filename),
            ("fileType", &self.file_type),
            ("content", &self.content),
        ]
        .into_iter()
        .filter(|(_, v)| v.trim().is_empty())
        .map(|(field, _)| FieldIssue {
            field: field.to_string(),
            message: EMPTY.to_string(),
        })
        .collect();

        if issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { issues })
        }
    }
}

fn check_upload_fields(obj: &Map<String, Value>, issues: &mut Vec<FieldIssue>) {
    for field in UPLOAD_TEXT_FIELDS {
        check_text(obj, field, issues);
    }
    check_field::<Option<String>>(obj, "jobDescription", "", false, issues);
}

/// The `AnalysisResult` fields; `prefix` is prepended to reported field names.
fn check_result_fields(obj: &Map<String, Value>, prefix: &str, issues: &mut Vec<FieldIssue>) {
    for field in SCORE_FIELDS {
        check_integer(obj, field, prefix, issues);
    }
    check_sequence::<ScoreBreakdownItem>(obj, "scoreBreakdown", prefix, issues);
    check_sequence::<MissingKeyword>(obj, "missingKeywords", prefix, issues);
    check_sequence::<Suggestion>(obj, "suggestions", prefix, issues);
}

/// Rewrites whole-number scores such as `82.0` as integers so serde accepts
/// them as `i32`. Only called once `check_integer` has passed.
fn normalize_scores(obj: &Map<String, Value>) -> Map<String, Value> {
    let mut normalized = obj.clone();
    for field in SCORE_FIELDS {
        if let Some(n) = obj.get(field).and_then(whole_number) {
            normalized.insert(field.to_string(), Value::from(n));
        }
    }
    normalized
}

/// JSON has a single number type, so `82.0` counts as an integer but `82.5`
/// does not.
fn whole_number(value: &Value) -> Option<i32> {
    if let Some(n) = value.as_i64() {
        return i32::try_from(n).ok();
    }
    let f = value.as_f64()?;
    if f.is_finite() && f.fract() == 0.0 && f >= f64::from(i32::MIN) && f <= f64::from(i32::MAX)
    {
        Some(f as i32)
    } else {
        None
    }
}

/// Missing and `null` are treated alike, matching an absent column value.
fn present<'a>(obj: &'a Map<String, Value>, field: &str) -> Option<&'a Value> {
    obj.get(field).filter(|v| !v.is_null())
}

fn push(issues: &mut Vec<FieldIssue>, field: &str, message: impl Into<String>) {
    issues.push(FieldIssue {
        field: field.to_string(),
        message: message.into(),
    });
}

fn check_field<T: DeserializeOwned>(
    obj: &Map<String, Value>,
    field: &str,
    prefix: &str,
    required: bool,
    issues: &mut Vec<FieldIssue>,
) {
    match present(obj, field) {
        None if required => push(issues, &format!("{prefix}{field}"), REQUIRED),
        None => {}
        Some(value) => {
            if let Err(e) = serde_json::from_value::<T>(value.clone()) {
                push(issues, &format!("{prefix}{field}"), e.to_string());
            }
        }
    }
}

fn check_integer(
    obj: &Map<String, Value>,
    field: &str,
    prefix: &str,
    issues: &mut Vec<FieldIssue>,
) {
    let name = format!("{prefix}{field}");
    match present(obj, field) {
        None => push(issues, &name, REQUIRED),
        Some(value) if value.is_number() => {
            if whole_number(value).is_none() {
                push(issues, &name, format!("expected a 32-bit integer, got {value}"));
            }
        }
        Some(other) => push(issues, &name, format!("expected an integer, got {}", kind(other))),
    }
}

fn check_text(obj: &Map<String, Value>, field: &str, issues: &mut Vec<FieldIssue>) {
    match present(obj, field) {
        None => push(issues, field, REQUIRED),
        Some(Value::String(s)) if s.trim().is_empty() => push(issues, field, EMPTY),
        Some(Value::String(_)) => {}
        Some(other) => push(issues, field, format!("expected a string, got {}", kind(other))),
    }
}

/// Reports element failures as `field[index]` so a bad item is easy to find.
fn check_sequence<T: DeserializeOwned>(
    obj: &Map<String, Value>,
    field: &str,
    prefix: &str,
    issues: &mut Vec<FieldIssue>,
) {
    match present(obj, field) {
        None => push(issues, &format!("{prefix}{field}"), REQUIRED),
        Some(Value::Array(items)) => {
            for (idx, item) in items.iter().enumerate() {
                if let Err(e) = serde_json::from_value::<T>(item.clone()) {
                    push(issues, &format!("{prefix}{field}[{idx}]"), e.to_string());
                }
            }
        }
        Some(other) => push(
            issues,
            &format!("{prefix}{field}"),
            format!("expected an array, got {}", kind(other)),
        ),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

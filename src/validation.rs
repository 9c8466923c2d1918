//! Request validation for the three write endpoints.
//!
//! Untrusted JSON bodies are checked field by field and normalized into
//! typed request records. All violations are collected in declaration
//! order and reported together, never just the first one.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::models::PieceStatus;

/// One field-level validation failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: &'static str,
}

/// Join errors as "field: message" pairs for the `details` response field
pub fn details(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Validated request to create a piece
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePieceRequest {
    pub name: String,
    pub composer: String,
    pub work: Option<String>,
    pub source: Option<String>,
    pub status: PieceStatus,
}

/// Validated request to create an exercise
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateExerciseRequest {
    pub name: String,
}

/// Validated request to create a training session.
/// ID lists are passed through as given, duplicates included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTrainingSessionRequest {
    pub date: DateTime<Utc>,
    pub duration: i64,
    pub exercises: Vec<i64>,
    pub new_pieces: Vec<i64>,
    pub repertoire: Vec<i64>,
}

/// Accepts an RFC 3339 datetime, a naive datetime, or a bare date.
/// Bare dates and naive datetimes are interpreted as UTC.
pub fn parse_session_date(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Some(Utc.from_utc_datetime(&dt));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| Utc.from_utc_datetime(&dt))
}

/// Require a present, non-empty string field, returning it trimmed
fn required_text(
    data: &Value,
    field: &'static str,
    message: &'static str,
    errors: &mut Vec<ValidationError>,
) -> Option<String> {
    match data.get(field).and_then(Value::as_str) {
        Some(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => {
            errors.push(ValidationError { field, message });
            None
        }
    }
}

/// Optional text field: absent and null are fine, anything else must be a
/// string. Strings that trim to empty are coerced to absent.
fn optional_text(
    data: &Value,
    field: &'static str,
    message: &'static str,
    errors: &mut Vec<ValidationError>,
) -> Option<String> {
    match data.get(field) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Some(_) => {
            errors.push(ValidationError { field, message });
            None
        }
    }
}

/// Array field where every element must be a positive integer ID
fn id_array(
    data: &Value,
    field: &'static str,
    not_array_message: &'static str,
    bad_id_message: &'static str,
    errors: &mut Vec<ValidationError>,
) -> Option<Vec<i64>> {
    match data.get(field) {
        Some(Value::Array(items)) => {
            let mut ids = Vec::with_capacity(items.len());
            for item in items {
                match item.as_i64() {
                    Some(id) if id > 0 => ids.push(id),
                    _ => {
                        errors.push(ValidationError {
                            field,
                            message: bad_id_message,
                        });
                        return None;
                    }
                }
            }
            Some(ids)
        }
        _ => {
            errors.push(ValidationError {
                field,
                message: not_array_message,
            });
            None
        }
    }
}

pub fn validate_create_piece(data: &Value) -> Result<CreatePieceRequest, Vec<ValidationError>> {
    let mut errors = Vec::new();

    let name = required_text(
        data,
        "name",
        "Name is required and must be a non-empty string",
        &mut errors,
    );
    let composer = required_text(
        data,
        "composer",
        "Composer is required and must be a non-empty string",
        &mut errors,
    );
    let work = optional_text(data, "work", "Work must be a string if provided", &mut errors);
    let source = optional_text(
        data,
        "source",
        "Source must be a string if provided",
        &mut errors,
    );
    let status = match data.get("status") {
        None => Some(PieceStatus::Training),
        Some(value) => match value.as_str().and_then(PieceStatus::parse) {
            Some(status) => Some(status),
            None => {
                errors.push(ValidationError {
                    field: "status",
                    message: "Status must be either TRAINING or REPERTOIRE",
                });
                None
            }
        },
    };

    match (name, composer, status) {
        (Some(name), Some(composer), Some(status)) if errors.is_empty() => Ok(CreatePieceRequest {
            name,
            composer,
            work,
            source,
            status,
        }),
        _ => Err(errors),
    }
}

pub fn validate_create_exercise(
    data: &Value,
) -> Result<CreateExerciseRequest, Vec<ValidationError>> {
    let mut errors = Vec::new();

    let name = required_text(
        data,
        "name",
        "Name is required and must be a non-empty string",
        &mut errors,
    );

    match name {
        Some(name) if errors.is_empty() => Ok(CreateExerciseRequest { name }),
        _ => Err(errors),
    }
}

pub fn validate_create_training_session(
    data: &Value,
) -> Result<CreateTrainingSessionRequest, Vec<ValidationError>> {
    let mut errors = Vec::new();

    let date = match data.get("date").and_then(Value::as_str) {
        Some(s) => match parse_session_date(s) {
            Some(date) => Some(date),
            None => {
                errors.push(ValidationError {
                    field: "date",
                    message: "Date must be a valid ISO date string",
                });
                None
            }
        },
        None => {
            errors.push(ValidationError {
                field: "date",
                message: "Date is required and must be a valid ISO date string",
            });
            None
        }
    };

    let duration = match data.get("duration").and_then(Value::as_i64) {
        Some(d) if d > 0 => Some(d),
        _ => {
            errors.push(ValidationError {
                field: "duration",
                message: "Duration is required and must be a positive integer (minutes)",
            });
            None
        }
    };

    let exercises = id_array(
        data,
        "exercises",
        "Exercises must be an array of exercise IDs",
        "All exercise IDs must be positive integers",
        &mut errors,
    );
    let new_pieces = id_array(
        data,
        "newPieces",
        "NewPieces must be an array of piece IDs",
        "All new piece IDs must be positive integers",
        &mut errors,
    );
    let repertoire = id_array(
        data,
        "repertoire",
        "Repertoire must be an array of piece IDs",
        "All repertoire piece IDs must be positive integers",
        &mut errors,
    );

    match (date, duration, exercises, new_pieces, repertoire) {
        (Some(date), Some(duration), Some(exercises), Some(new_pieces), Some(repertoire))
            if errors.is_empty() =>
        {
            Ok(CreateTrainingSessionRequest {
                date,
                duration,
                exercises,
                new_pieces,
                repertoire,
            })
        }
        _ => Err(errors),
    }
}

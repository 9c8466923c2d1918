use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Practice status of a piece, stored as TEXT in the pieces table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PieceStatus {
    Training,
    Repertoire,
}

impl PieceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceStatus::Training => "TRAINING",
            PieceStatus::Repertoire => "REPERTOIRE",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "TRAINING" => Some(PieceStatus::Training),
            "REPERTOIRE" => Some(PieceStatus::Repertoire),
            _ => None,
        }
    }
}

/// Status of a training session, stored as TEXT in the training_sessions table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionStatus {
    Planned,
    Completed,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Planned => "PLANNED",
            SessionStatus::Completed => "COMPLETED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "PLANNED" => Some(SessionStatus::Planned),
            "COMPLETED" => Some(SessionStatus::Completed),
            _ => None,
        }
    }
}

/// A musical work being tracked
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Piece {
    pub id: i64,
    pub name: String,
    pub composer: String,
    pub work: Option<String>,
    pub source: Option<String>,
    pub status: PieceStatus,
    pub play_count: i64,
    pub date_added: DateTime<Utc>,
    pub last_played: Option<DateTime<Utc>>,
}

/// A named practice drill
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub id: i64,
    pub name: String,
    pub last_practiced: Option<DateTime<Utc>>,
}

/// A dated practice event
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingSession {
    pub id: i64,
    pub date: DateTime<Utc>,
    pub duration: i64,
    pub status: SessionStatus,
    pub created_at: DateTime<Utc>,
}

/// One session-exercise join row with the exercise record expanded
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionExerciseLink {
    pub exercise_id: i64,
    pub training_session_id: i64,
    pub exercise: Exercise,
}

/// One session-piece join row with the piece record expanded
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionPieceLink {
    pub piece_id: i64,
    pub training_session_id: i64,
    pub piece: Piece,
}

/// A training session with its three relation sets expanded,
/// used directly as the response body for the training-sessions endpoints
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingSessionExpanded {
    #[serde(flatten)]
    pub session: TrainingSession,
    pub exercises: Vec<SessionExerciseLink>,
    pub new_pieces: Vec<SessionPieceLink>,
    pub repertoire_pieces: Vec<SessionPieceLink>,
}

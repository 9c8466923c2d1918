//! Repository layer over the SQLite pool.
//!
//! The `Store` is constructed once at startup and passed into handlers and
//! use cases by reference, never reached through a global. Functions that
//! must run inside a caller-owned transaction are free functions generic
//! over the executor, mirroring how the count/update steps of session
//! creation need to share one transaction.

use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Executor, Row, Sqlite, SqlitePool};

use crate::models::{
    Exercise, Piece, PieceStatus, SessionExerciseLink, SessionPieceLink, SessionStatus,
    TrainingSession, TrainingSessionExpanded,
};
use crate::queries;
use crate::validation::{CreateExerciseRequest, CreatePieceRequest};

/// Timestamps are stored as millisecond-precision RFC 3339 TEXT so that
/// lexicographic ORDER BY matches chronological order.
pub(crate) fn format_timestamp(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, sqlx::Error> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| sqlx::Error::Decode(format!("invalid timestamp '{}': {}", s, e).into()))
}

fn parse_optional_timestamp(s: Option<String>) -> Result<Option<DateTime<Utc>>, sqlx::Error> {
    s.as_deref().map(parse_timestamp).transpose()
}

/// Map a piece from a row, starting at `offset` (join queries prepend columns)
fn piece_from_row(row: &SqliteRow, offset: usize) -> Result<Piece, sqlx::Error> {
    let status: String = row.try_get(offset + 5)?;
    let status = PieceStatus::parse(&status)
        .ok_or_else(|| sqlx::Error::Decode(format!("invalid piece status '{}'", status).into()))?;
    Ok(Piece {
        id: row.try_get(offset)?,
        name: row.try_get(offset + 1)?,
        composer: row.try_get(offset + 2)?,
        work: row.try_get(offset + 3)?,
        source: row.try_get(offset + 4)?,
        status,
        play_count: row.try_get(offset + 6)?,
        date_added: parse_timestamp(row.try_get::<String, _>(offset + 7)?.as_str())?,
        last_played: parse_optional_timestamp(row.try_get(offset + 8)?)?,
    })
}

fn exercise_from_row(row: &SqliteRow, offset: usize) -> Result<Exercise, sqlx::Error> {
    Ok(Exercise {
        id: row.try_get(offset)?,
        name: row.try_get(offset + 1)?,
        last_practiced: parse_optional_timestamp(row.try_get(offset + 2)?)?,
    })
}

fn session_from_row(row: &SqliteRow) -> Result<TrainingSession, sqlx::Error> {
    let status: String = row.try_get(3)?;
    let status = SessionStatus::parse(&status).ok_or_else(|| {
        sqlx::Error::Decode(format!("invalid session status '{}'", status).into())
    })?;
    Ok(TrainingSession {
        id: row.try_get(0)?,
        date: parse_timestamp(row.try_get::<String, _>(1)?.as_str())?,
        duration: row.try_get(2)?,
        status,
        created_at: parse_timestamp(row.try_get::<String, _>(4)?.as_str())?,
    })
}

/// COUNT of exercises whose id is in `ids`; duplicates in `ids` count once
pub async fn count_existing_exercises<'e, E>(executor: E, ids: &[i64]) -> Result<i64, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    if ids.is_empty() {
        return Ok(0);
    }
    let sql = queries::exercises::count_existing(ids);
    let row = sqlx::query(&sql).fetch_one(executor).await?;
    row.try_get(0)
}

/// COUNT of pieces whose id is in `ids`; duplicates in `ids` count once
pub async fn count_existing_pieces<'e, E>(executor: E, ids: &[i64]) -> Result<i64, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    if ids.is_empty() {
        return Ok(0);
    }
    let sql = queries::pieces::count_existing(ids);
    let row = sqlx::query(&sql).fetch_one(executor).await?;
    row.try_get(0)
}

/// Set last_practiced on every exercise in `ids`
pub async fn set_exercises_last_practiced<'e, E>(
    executor: E,
    ids: &[i64],
    date: DateTime<Utc>,
) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = queries::exercises::set_last_practiced(ids, &format_timestamp(date));
    sqlx::query(&sql).execute(executor).await?;
    Ok(())
}

/// Set last_played on every piece in `ids`
pub async fn set_pieces_last_played<'e, E>(
    executor: E,
    ids: &[i64],
    date: DateTime<Utc>,
) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = queries::pieces::set_last_played(ids, &format_timestamp(date));
    sqlx::query(&sql).execute(executor).await?;
    Ok(())
}

/// Increment play_count by 1 on every piece in `ids`
pub async fn increment_play_counts<'e, E>(executor: E, ids: &[i64]) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = queries::pieces::increment_play_count(ids);
    sqlx::query(&sql).execute(executor).await?;
    Ok(())
}

/// Shared handle to the relational store, injected into handlers and use cases
#[derive(Clone)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Insert a piece with defaults applied and return the stored row
    pub async fn create_piece(&self, request: &CreatePieceRequest) -> Result<Piece, sqlx::Error> {
        let date_added = format_timestamp(Utc::now());
        let sql = queries::pieces::insert(
            &request.name,
            &request.composer,
            request.work.as_deref(),
            request.source.as_deref(),
            request.status.as_str(),
            &date_added,
        );
        let result = sqlx::query(&sql).execute(&self.pool).await?;
        let id = result.last_insert_rowid();

        let sql = queries::pieces::select_by_id(id);
        let row = sqlx::query(&sql).fetch_one(&self.pool).await?;
        piece_from_row(&row, 0)
    }

    /// All pieces, most recently added first
    pub async fn list_pieces(&self) -> Result<Vec<Piece>, sqlx::Error> {
        let sql = queries::pieces::select_all();
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        rows.iter().map(|row| piece_from_row(row, 0)).collect()
    }

    pub async fn get_piece(&self, id: i64) -> Result<Option<Piece>, sqlx::Error> {
        let sql = queries::pieces::select_by_id(id);
        let row = sqlx::query(&sql).fetch_optional(&self.pool).await?;
        row.as_ref().map(|r| piece_from_row(r, 0)).transpose()
    }

    /// Insert an exercise and return the stored row
    pub async fn create_exercise(
        &self,
        request: &CreateExerciseRequest,
    ) -> Result<Exercise, sqlx::Error> {
        let sql = queries::exercises::insert(&request.name);
        let result = sqlx::query(&sql).execute(&self.pool).await?;
        let id = result.last_insert_rowid();

        let sql = queries::exercises::select_by_id(id);
        let row = sqlx::query(&sql).fetch_one(&self.pool).await?;
        exercise_from_row(&row, 0)
    }

    /// All exercises, name ascending
    pub async fn list_exercises(&self) -> Result<Vec<Exercise>, sqlx::Error> {
        let sql = queries::exercises::select_all();
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        rows.iter().map(|row| exercise_from_row(row, 0)).collect()
    }

    pub async fn get_exercise(&self, id: i64) -> Result<Option<Exercise>, sqlx::Error> {
        let sql = queries::exercises::select_by_id(id);
        let row = sqlx::query(&sql).fetch_optional(&self.pool).await?;
        row.as_ref().map(|r| exercise_from_row(r, 0)).transpose()
    }

    /// One session with its three relation sets expanded
    pub async fn get_session_expanded(
        &self,
        id: i64,
    ) -> Result<Option<TrainingSessionExpanded>, sqlx::Error> {
        let sql = queries::sessions::select_by_id(id);
        let row = match sqlx::query(&sql).fetch_optional(&self.pool).await? {
            Some(row) => row,
            None => return Ok(None),
        };
        let session = session_from_row(&row)?;
        Ok(Some(self.expand_session(session).await?))
    }

    /// All sessions, date descending, each with its relation sets expanded
    pub async fn list_sessions_expanded(
        &self,
    ) -> Result<Vec<TrainingSessionExpanded>, sqlx::Error> {
        let sql = queries::sessions::select_all();
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;

        let mut sessions = Vec::with_capacity(rows.len());
        for row in &rows {
            let session = session_from_row(row)?;
            sessions.push(self.expand_session(session).await?);
        }
        Ok(sessions)
    }

    async fn expand_session(
        &self,
        session: TrainingSession,
    ) -> Result<TrainingSessionExpanded, sqlx::Error> {
        let sql = queries::sessions::select_exercise_links(session.id);
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        let exercises = rows
            .iter()
            .map(|row| {
                Ok(SessionExerciseLink {
                    exercise_id: row.try_get(0)?,
                    training_session_id: row.try_get(1)?,
                    exercise: exercise_from_row(row, 2)?,
                })
            })
            .collect::<Result<Vec<_>, sqlx::Error>>()?;

        let sql = queries::sessions::select_new_piece_links(session.id);
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        let new_pieces = rows
            .iter()
            .map(|row| piece_link_from_row(row))
            .collect::<Result<Vec<_>, sqlx::Error>>()?;

        let sql = queries::sessions::select_repertoire_links(session.id);
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        let repertoire_pieces = rows
            .iter()
            .map(|row| piece_link_from_row(row))
            .collect::<Result<Vec<_>, sqlx::Error>>()?;

        Ok(TrainingSessionExpanded {
            session,
            exercises,
            new_pieces,
            repertoire_pieces,
        })
    }
}

fn piece_link_from_row(row: &SqliteRow) -> Result<SessionPieceLink, sqlx::Error> {
    Ok(SessionPieceLink {
        piece_id: row.try_get(0)?,
        training_session_id: row.try_get(1)?,
        piece: piece_from_row(row, 2)?,
    })
}

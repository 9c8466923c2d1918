//! Session creation, the one multi-table write in the system.
//!
//! The referential check, the session and join-row inserts, and the derived
//! timestamp/counter updates all run inside a single transaction, so a
//! failure at any step leaves the store unchanged.

use chrono::Utc;

use crate::models::{SessionStatus, TrainingSessionExpanded};
use crate::queries;
use crate::store::{self, Store};
use crate::validation::CreateTrainingSessionRequest;

#[derive(Debug, thiserror::Error)]
pub enum CreateSessionError {
    #[error("Some referenced exercises do not exist")]
    UnknownExercises,
    #[error("Some referenced pieces do not exist")]
    UnknownPieces,
    #[error(transparent)]
    Db(#[from] sqlx::Error),
}

/// Create a training session from a validated request.
///
/// Rejects before any write when a referenced exercise or piece ID does not
/// exist. The existence check compares COUNT against the input list length,
/// so a duplicated ID in the request also fails the check (the count sees
/// each row once). On success returns the session with its relation sets
/// expanded, read back after commit.
pub async fn create_training_session(
    store: &Store,
    request: &CreateTrainingSessionRequest,
) -> Result<TrainingSessionExpanded, CreateSessionError> {
    let mut tx = store.pool().begin().await?;

    let exercise_count = store::count_existing_exercises(&mut *tx, &request.exercises).await?;
    if exercise_count != request.exercises.len() as i64 {
        return Err(CreateSessionError::UnknownExercises);
    }

    let piece_ids: Vec<i64> = request
        .new_pieces
        .iter()
        .chain(request.repertoire.iter())
        .copied()
        .collect();
    let piece_count = store::count_existing_pieces(&mut *tx, &piece_ids).await?;
    if piece_count != piece_ids.len() as i64 {
        return Err(CreateSessionError::UnknownPieces);
    }

    let sql = queries::sessions::insert(
        &store::format_timestamp(request.date),
        request.duration,
        SessionStatus::Planned.as_str(),
        &store::format_timestamp(Utc::now()),
    );
    let result = sqlx::query(&sql).execute(&mut *tx).await?;
    let session_id = result.last_insert_rowid();

    // One join row per listed ID, duplicates included
    for &exercise_id in &request.exercises {
        let sql = queries::sessions::insert_exercise_link(session_id, exercise_id);
        sqlx::query(&sql).execute(&mut *tx).await?;
    }
    for &piece_id in &request.new_pieces {
        let sql = queries::sessions::insert_new_piece_link(session_id, piece_id);
        sqlx::query(&sql).execute(&mut *tx).await?;
    }
    for &piece_id in &request.repertoire {
        let sql = queries::sessions::insert_repertoire_link(session_id, piece_id);
        sqlx::query(&sql).execute(&mut *tx).await?;
    }

    if !request.exercises.is_empty() {
        store::set_exercises_last_practiced(&mut *tx, &request.exercises, request.date).await?;
    }
    if !piece_ids.is_empty() {
        store::set_pieces_last_played(&mut *tx, &piece_ids, request.date).await?;
    }
    if !request.repertoire.is_empty() {
        store::increment_play_counts(&mut *tx, &request.repertoire).await?;
    }

    tx.commit().await?;

    let session = store
        .get_session_expanded(session_id)
        .await?
        .ok_or(sqlx::Error::RowNotFound)?;
    Ok(session)
}

//! # Session Creation Tests
//!
//! These tests verify the multi-table write performed when a training
//! session is recorded: the referential check, the join rows, and the
//! derived last-practiced / last-played / play-count updates.

use chrono::{DateTime, TimeZone, Utc};

use practice_tracker::db;
use practice_tracker::models::{Exercise, Piece, PieceStatus};
use practice_tracker::sessions::{self, CreateSessionError};
use practice_tracker::store::Store;
use practice_tracker::validation::{
    CreateExerciseRequest, CreatePieceRequest, CreateTrainingSessionRequest,
};

async fn create_test_store() -> Store {
    let pool = db::create_test_pool_in_memory().await;
    db::init_database_schema(&pool).await.unwrap();
    Store::new(pool)
}

async fn add_piece(store: &Store, name: &str, status: PieceStatus) -> Piece {
    store
        .create_piece(&CreatePieceRequest {
            name: name.to_string(),
            composer: "Czerny".to_string(),
            work: None,
            source: None,
            status,
        })
        .await
        .unwrap()
}

async fn add_exercise(store: &Store, name: &str) -> Exercise {
    store
        .create_exercise(&CreateExerciseRequest {
            name: name.to_string(),
        })
        .await
        .unwrap()
}

fn session_request(
    date: DateTime<Utc>,
    exercises: Vec<i64>,
    new_pieces: Vec<i64>,
    repertoire: Vec<i64>,
) -> CreateTrainingSessionRequest {
    CreateTrainingSessionRequest {
        date,
        duration: 45,
        exercises,
        new_pieces,
        repertoire,
    }
}

#[tokio::test]
async fn test_session_applies_derived_updates() {
    let store = create_test_store().await;
    let exercise = add_exercise(&store, "Scales").await;
    let new_piece = add_piece(&store, "Arabesque No. 1", PieceStatus::Training).await;
    let rep_piece = add_piece(&store, "Clair de Lune", PieceStatus::Repertoire).await;

    let date = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let session = sessions::create_training_session(
        &store,
        &session_request(
            date,
            vec![exercise.id],
            vec![new_piece.id],
            vec![rep_piece.id],
        ),
    )
    .await
    .unwrap();

    assert_eq!(session.session.duration, 45);
    assert_eq!(session.session.date, date);
    assert_eq!(session.exercises.len(), 1);
    assert_eq!(session.exercises[0].exercise_id, exercise.id);
    assert_eq!(session.exercises[0].training_session_id, session.session.id);
    assert_eq!(session.exercises[0].exercise.name, "Scales");
    assert_eq!(session.new_pieces.len(), 1);
    assert_eq!(session.new_pieces[0].piece.name, "Arabesque No. 1");
    assert_eq!(session.repertoire_pieces.len(), 1);
    assert_eq!(session.repertoire_pieces[0].piece.name, "Clair de Lune");

    // derived updates
    let exercise = store.get_exercise(exercise.id).await.unwrap().unwrap();
    assert_eq!(exercise.last_practiced, Some(date));

    let new_piece = store.get_piece(new_piece.id).await.unwrap().unwrap();
    assert_eq!(new_piece.last_played, Some(date));
    assert_eq!(new_piece.play_count, 0);

    let rep_piece = store.get_piece(rep_piece.id).await.unwrap().unwrap();
    assert_eq!(rep_piece.last_played, Some(date));
    assert_eq!(rep_piece.play_count, 1);
}

#[tokio::test]
async fn test_repertoire_play_count_accumulates() {
    let store = create_test_store().await;
    let piece = add_piece(&store, "Clair de Lune", PieceStatus::Repertoire).await;

    let first = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let second = Utc.with_ymd_and_hms(2024, 1, 8, 0, 0, 0).unwrap();
    for date in [first, second] {
        sessions::create_training_session(
            &store,
            &session_request(date, vec![], vec![], vec![piece.id]),
        )
        .await
        .unwrap();
    }

    let piece = store.get_piece(piece.id).await.unwrap().unwrap();
    assert_eq!(piece.play_count, 2);
    assert_eq!(piece.last_played, Some(second));
}

#[tokio::test]
async fn test_unknown_exercise_rejected_without_writes() {
    let store = create_test_store().await;
    let piece = add_piece(&store, "Clair de Lune", PieceStatus::Repertoire).await;

    let date = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let result = sessions::create_training_session(
        &store,
        &session_request(date, vec![999], vec![], vec![piece.id]),
    )
    .await;

    assert!(matches!(result, Err(CreateSessionError::UnknownExercises)));

    // store state unchanged
    assert!(store.list_sessions_expanded().await.unwrap().is_empty());
    let piece = store.get_piece(piece.id).await.unwrap().unwrap();
    assert_eq!(piece.last_played, None);
    assert_eq!(piece.play_count, 0);
}

#[tokio::test]
async fn test_unknown_piece_rejected_without_writes() {
    let store = create_test_store().await;
    let exercise = add_exercise(&store, "Scales").await;

    let date = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let result = sessions::create_training_session(
        &store,
        &session_request(date, vec![exercise.id], vec![999], vec![]),
    )
    .await;

    assert!(matches!(result, Err(CreateSessionError::UnknownPieces)));

    assert!(store.list_sessions_expanded().await.unwrap().is_empty());
    let exercise = store.get_exercise(exercise.id).await.unwrap().unwrap();
    assert_eq!(exercise.last_practiced, None);
}

#[tokio::test]
async fn test_empty_session_creates_no_joins_and_no_updates() {
    let store = create_test_store().await;
    let exercise = add_exercise(&store, "Scales").await;
    let piece = add_piece(&store, "Arabesque No. 1", PieceStatus::Training).await;

    let date = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let session =
        sessions::create_training_session(&store, &session_request(date, vec![], vec![], vec![]))
            .await
            .unwrap();

    assert!(session.exercises.is_empty());
    assert!(session.new_pieces.is_empty());
    assert!(session.repertoire_pieces.is_empty());

    let exercise = store.get_exercise(exercise.id).await.unwrap().unwrap();
    assert_eq!(exercise.last_practiced, None);
    let piece = store.get_piece(piece.id).await.unwrap().unwrap();
    assert_eq!(piece.last_played, None);
    assert_eq!(piece.play_count, 0);
}

// The existence check compares COUNT(DISTINCT rows) against list length,
// so a duplicated ID reads as a missing reference. Deduplicating or
// rejecting duplicates up front is a pending product decision.
#[tokio::test]
async fn test_duplicate_piece_id_fails_existence_check() {
    let store = create_test_store().await;
    let piece = add_piece(&store, "Clair de Lune", PieceStatus::Repertoire).await;

    let date = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let result = sessions::create_training_session(
        &store,
        &session_request(date, vec![], vec![piece.id, piece.id], vec![]),
    )
    .await;

    assert!(matches!(result, Err(CreateSessionError::UnknownPieces)));
    assert!(store.list_sessions_expanded().await.unwrap().is_empty());
}

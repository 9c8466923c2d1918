//! # CRUD and Listing Tests
//!
//! These tests verify creation defaults, the fixed list orderings, and the
//! JSON wire shape of the stored entities.

use chrono::{TimeZone, Utc};
use serde_json::json;

use practice_tracker::db;
use practice_tracker::models::{PieceStatus, SessionStatus};
use practice_tracker::sessions;
use practice_tracker::store::Store;
use practice_tracker::validation::{
    self, CreateExerciseRequest, CreateTrainingSessionRequest,
};

async fn create_test_store() -> Store {
    let pool = db::create_test_pool_in_memory().await;
    db::init_database_schema(&pool).await.unwrap();
    Store::new(pool)
}

#[tokio::test]
async fn test_piece_defaults_and_roundtrip() {
    let store = create_test_store().await;

    let request = validation::validate_create_piece(&json!({
        "name": "  Nocturne Op. 9 No. 2 ",
        "composer": " Chopin",
        "source": "Henle",
    }))
    .unwrap();
    let piece = store.create_piece(&request).await.unwrap();

    assert_eq!(piece.name, "Nocturne Op. 9 No. 2");
    assert_eq!(piece.composer, "Chopin");
    assert_eq!(piece.work, None);
    assert_eq!(piece.source, Some("Henle".to_string()));
    assert_eq!(piece.status, PieceStatus::Training);
    assert_eq!(piece.play_count, 0);
    assert_eq!(piece.last_played, None);

    // round-trip: the same values come back from the list endpoint query
    let listed = store.list_pieces().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, piece.id);
    assert_eq!(listed[0].name, piece.name);
    assert_eq!(listed[0].composer, piece.composer);
    assert_eq!(listed[0].source, piece.source);
    assert_eq!(listed[0].status, piece.status);
    assert_eq!(listed[0].date_added, piece.date_added);
}

#[tokio::test]
async fn test_pieces_listed_newest_first() {
    let store = create_test_store().await;

    let mut ids = Vec::new();
    for name in ["First", "Second", "Third"] {
        let request = validation::validate_create_piece(&json!({
            "name": name,
            "composer": "Bach",
        }))
        .unwrap();
        ids.push(store.create_piece(&request).await.unwrap().id);
    }

    let listed: Vec<i64> = store.list_pieces().await.unwrap().iter().map(|p| p.id).collect();
    ids.reverse();
    assert_eq!(listed, ids);
}

#[tokio::test]
async fn test_exercises_listed_by_name() {
    let store = create_test_store().await;

    for name in ["Scales", "Arpeggios", "Hanon no. 1"] {
        store
            .create_exercise(&CreateExerciseRequest {
                name: name.to_string(),
            })
            .await
            .unwrap();
    }

    let names: Vec<String> = store
        .list_exercises()
        .await
        .unwrap()
        .into_iter()
        .map(|e| e.name)
        .collect();
    assert_eq!(names, vec!["Arpeggios", "Hanon no. 1", "Scales"]);
}

#[tokio::test]
async fn test_sessions_listed_by_date_descending() {
    let store = create_test_store().await;

    let exercise = store
        .create_exercise(&CreateExerciseRequest {
            name: "Scales".to_string(),
        })
        .await
        .unwrap();

    let dates = [
        Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap(),
    ];
    for date in dates {
        sessions::create_training_session(
            &store,
            &CreateTrainingSessionRequest {
                date,
                duration: 30,
                exercises: vec![exercise.id],
                new_pieces: vec![],
                repertoire: vec![],
            },
        )
        .await
        .unwrap();
    }

    let listed = store.list_sessions_expanded().await.unwrap();
    let listed_dates: Vec<_> = listed.iter().map(|s| s.session.date).collect();
    assert_eq!(
        listed_dates,
        vec![
            Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        ]
    );

    // each listed session carries its expanded relations
    for session in &listed {
        assert_eq!(session.session.status, SessionStatus::Planned);
        assert_eq!(session.exercises.len(), 1);
        assert_eq!(session.exercises[0].exercise.name, "Scales");
    }
}

#[tokio::test]
async fn test_piece_json_wire_shape() {
    let store = create_test_store().await;

    let request = validation::validate_create_piece(&json!({
        "name": "Waldstein",
        "composer": "Beethoven",
        "status": "REPERTOIRE",
    }))
    .unwrap();
    let piece = store.create_piece(&request).await.unwrap();

    let value = serde_json::to_value(&piece).unwrap();
    assert_eq!(value["name"], "Waldstein");
    assert_eq!(value["status"], "REPERTOIRE");
    assert_eq!(value["playCount"], 0);
    assert!(value["dateAdded"].is_string());
    assert!(value["lastPlayed"].is_null());
    assert!(value.get("play_count").is_none());
}

#[tokio::test]
async fn test_session_json_wire_shape() {
    let store = create_test_store().await;

    let exercise = store
        .create_exercise(&CreateExerciseRequest {
            name: "Scales".to_string(),
        })
        .await
        .unwrap();

    let session = sessions::create_training_session(
        &store,
        &CreateTrainingSessionRequest {
            date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            duration: 45,
            exercises: vec![exercise.id],
            new_pieces: vec![],
            repertoire: vec![],
        },
    )
    .await
    .unwrap();

    let value = serde_json::to_value(&session).unwrap();
    // the session fields are flattened next to the relation arrays
    assert_eq!(value["duration"], 45);
    assert_eq!(value["status"], "PLANNED");
    assert_eq!(value["exercises"][0]["exerciseId"], exercise.id);
    assert_eq!(value["exercises"][0]["trainingSessionId"], session.session.id);
    assert_eq!(value["exercises"][0]["exercise"]["name"], "Scales");
    assert!(value["newPieces"].as_array().unwrap().is_empty());
    assert!(value["repertoirePieces"].as_array().unwrap().is_empty());
}

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use log::error;
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::db::DynError;
use crate::sessions::{self, CreateSessionError};
use crate::store::Store;
use crate::validation;

/// State for the API handlers
pub struct AppState {
    pub store: Store,
}

/// Serve the practice tracker API from a SQLite database file
pub fn serve(sqlite_file: PathBuf, port: u16) -> Result<(), DynError> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        let pool = crate::db::open_database_pool(&sqlite_file).await?;
        crate::db::init_database_schema(&pool).await?;
        crate::db::check_schema_version(&pool).await?;

        println!("Database: {}", sqlite_file.display());
        println!("Listening on: http://[::]:{} (IPv4 + IPv6)", port);
        println!("Endpoints:");
        println!("  GET  /pieces  - List pieces, newest first");
        println!("  POST /pieces  - Create a piece");
        println!("  GET  /exercises  - List exercises by name");
        println!("  POST /exercises  - Create an exercise");
        println!("  GET  /training-sessions  - List sessions, newest first");
        println!("  POST /training-sessions  - Record a practice session");
        println!("  GET  /health  - Health check");

        let state = Arc::new(AppState {
            store: Store::new(pool),
        });

        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        let app = Router::new()
            .route("/health", get(health_handler))
            .route(
                "/pieces",
                get(list_pieces_handler).post(create_piece_handler),
            )
            .route(
                "/exercises",
                get(list_exercises_handler).post(create_exercise_handler),
            )
            .route(
                "/training-sessions",
                get(list_sessions_handler).post(create_session_handler),
            )
            .layer(cors)
            .with_state(state);

        let listener = tokio::net::TcpListener::bind(format!("[::]:{}", port))
            .await
            .map_err(|e| format!("Failed to bind to port {}: {}", port, e))?;
        axum::serve(listener, app)
            .await
            .map_err(|e| format!("Server error: {}", e))?;

        Ok::<(), DynError>(())
    })
}

async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

fn validation_failure(errors: &[validation::ValidationError]) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(serde_json::json!({
            "error": "Invalid input data",
            "details": validation::details(errors),
        })),
    )
        .into_response()
}

fn store_failure(message: &str) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({"error": message})),
    )
        .into_response()
}

async fn list_pieces_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.store.list_pieces().await {
        Ok(pieces) => Json(pieces).into_response(),
        Err(e) => {
            error!("Failed to fetch pieces: {}", e);
            store_failure("Failed to fetch pieces")
        }
    }
}

async fn create_piece_handler(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    let request = match validation::validate_create_piece(&body) {
        Ok(request) => request,
        Err(errors) => return validation_failure(&errors),
    };

    match state.store.create_piece(&request).await {
        Ok(piece) => (StatusCode::CREATED, Json(piece)).into_response(),
        Err(e) => {
            error!("Failed to create piece: {}", e);
            store_failure("Failed to create piece")
        }
    }
}

async fn list_exercises_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.store.list_exercises().await {
        Ok(exercises) => Json(exercises).into_response(),
        Err(e) => {
            error!("Failed to fetch exercises: {}", e);
            store_failure("Failed to fetch exercises")
        }
    }
}

async fn create_exercise_handler(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    let request = match validation::validate_create_exercise(&body) {
        Ok(request) => request,
        Err(errors) => return validation_failure(&errors),
    };

    match state.store.create_exercise(&request).await {
        Ok(exercise) => (StatusCode::CREATED, Json(exercise)).into_response(),
        Err(e) => {
            error!("Failed to create exercise: {}", e);
            store_failure("Failed to create exercise")
        }
    }
}

async fn list_sessions_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.store.list_sessions_expanded().await {
        Ok(sessions) => Json(sessions).into_response(),
        Err(e) => {
            error!("Failed to fetch sessions: {}", e);
            store_failure("Failed to fetch sessions")
        }
    }
}

async fn create_session_handler(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    let request = match validation::validate_create_training_session(&body) {
        Ok(request) => request,
        Err(errors) => return validation_failure(&errors),
    };

    match sessions::create_training_session(&state.store, &request).await {
        Ok(session) => (StatusCode::CREATED, Json(session)).into_response(),
        Err(e @ CreateSessionError::UnknownExercises)
        | Err(e @ CreateSessionError::UnknownPieces) => (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"error": e.to_string()})),
        )
            .into_response(),
        Err(CreateSessionError::Db(e)) => {
            error!("Failed to create session: {}", e);
            store_failure("Failed to create session")
        }
    }
}

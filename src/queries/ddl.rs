use sea_query::{ColumnDef, ForeignKey, ForeignKeyAction, Index, SqliteQueryBuilder, Table};

use crate::schema::{
    Exercises, Metadata, Pieces, SessionExercises, SessionNewPieces, SessionRepertoirePieces,
    TrainingSessions,
};

/// CREATE TABLE IF NOT EXISTS metadata (key TEXT PRIMARY KEY, value TEXT NOT NULL)
pub fn create_metadata_table() -> String {
    Table::create()
        .table(Metadata::Table)
        .if_not_exists()
        .col(ColumnDef::new(Metadata::Key).string().primary_key())
        .col(ColumnDef::new(Metadata::Value).string().not_null())
        .to_string(SqliteQueryBuilder)
}

/// CREATE TABLE IF NOT EXISTS pieces (
///     id INTEGER PRIMARY KEY AUTOINCREMENT,
///     name TEXT NOT NULL,
///     composer TEXT NOT NULL,
///     work TEXT,
///     source TEXT,
///     status TEXT NOT NULL DEFAULT 'TRAINING',
///     play_count INTEGER NOT NULL DEFAULT 0,
///     date_added TEXT NOT NULL,
///     last_played TEXT
/// )
pub fn create_pieces_table() -> String {
    Table::create()
        .table(Pieces::Table)
        .if_not_exists()
        .col(
            ColumnDef::new(Pieces::Id)
                .integer()
                .primary_key()
                .auto_increment(),
        )
        .col(ColumnDef::new(Pieces::Name).string().not_null())
        .col(ColumnDef::new(Pieces::Composer).string().not_null())
        .col(ColumnDef::new(Pieces::Work).string())
        .col(ColumnDef::new(Pieces::Source).string())
        .col(
            ColumnDef::new(Pieces::Status)
                .string()
                .not_null()
                .default("TRAINING"),
        )
        .col(
            ColumnDef::new(Pieces::PlayCount)
                .integer()
                .not_null()
                .default(0),
        )
        .col(ColumnDef::new(Pieces::DateAdded).string().not_null())
        .col(ColumnDef::new(Pieces::LastPlayed).string())
        .to_string(SqliteQueryBuilder)
}

/// CREATE TABLE IF NOT EXISTS exercises (
///     id INTEGER PRIMARY KEY AUTOINCREMENT,
///     name TEXT NOT NULL,
///     last_practiced TEXT
/// )
pub fn create_exercises_table() -> String {
    Table::create()
        .table(Exercises::Table)
        .if_not_exists()
        .col(
            ColumnDef::new(Exercises::Id)
                .integer()
                .primary_key()
                .auto_increment(),
        )
        .col(ColumnDef::new(Exercises::Name).string().not_null())
        .col(ColumnDef::new(Exercises::LastPracticed).string())
        .to_string(SqliteQueryBuilder)
}

/// CREATE TABLE IF NOT EXISTS training_sessions (
///     id INTEGER PRIMARY KEY AUTOINCREMENT,
///     date TEXT NOT NULL,
///     duration INTEGER NOT NULL,
///     status TEXT NOT NULL DEFAULT 'PLANNED',
///     created_at TEXT NOT NULL
/// )
pub fn create_training_sessions_table() -> String {
    Table::create()
        .table(TrainingSessions::Table)
        .if_not_exists()
        .col(
            ColumnDef::new(TrainingSessions::Id)
                .integer()
                .primary_key()
                .auto_increment(),
        )
        .col(ColumnDef::new(TrainingSessions::Date).string().not_null())
        .col(
            ColumnDef::new(TrainingSessions::Duration)
                .integer()
                .not_null(),
        )
        .col(
            ColumnDef::new(TrainingSessions::Status)
                .string()
                .not_null()
                .default("PLANNED"),
        )
        .col(
            ColumnDef::new(TrainingSessions::CreatedAt)
                .string()
                .not_null(),
        )
        .to_string(SqliteQueryBuilder)
}

/// CREATE TABLE IF NOT EXISTS session_exercises (
///     session_id INTEGER NOT NULL REFERENCES training_sessions(id) ON DELETE CASCADE,
///     exercise_id INTEGER NOT NULL REFERENCES exercises(id)
/// )
pub fn create_session_exercises_table() -> String {
    Table::create()
        .table(SessionExercises::Table)
        .if_not_exists()
        .col(
            ColumnDef::new(SessionExercises::SessionId)
                .integer()
                .not_null(),
        )
        .col(
            ColumnDef::new(SessionExercises::ExerciseId)
                .integer()
                .not_null(),
        )
        .foreign_key(
            ForeignKey::create()
                .from(SessionExercises::Table, SessionExercises::SessionId)
                .to(TrainingSessions::Table, TrainingSessions::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .foreign_key(
            ForeignKey::create()
                .from(SessionExercises::Table, SessionExercises::ExerciseId)
                .to(Exercises::Table, Exercises::Id),
        )
        .to_string(SqliteQueryBuilder)
}

/// CREATE TABLE IF NOT EXISTS session_new_pieces (
///     session_id INTEGER NOT NULL REFERENCES training_sessions(id) ON DELETE CASCADE,
///     piece_id INTEGER NOT NULL REFERENCES pieces(id)
/// )
pub fn create_session_new_pieces_table() -> String {
    Table::create()
        .table(SessionNewPieces::Table)
        .if_not_exists()
        .col(
            ColumnDef::new(SessionNewPieces::SessionId)
                .integer()
                .not_null(),
        )
        .col(
            ColumnDef::new(SessionNewPieces::PieceId)
                .integer()
                .not_null(),
        )
        .foreign_key(
            ForeignKey::create()
                .from(SessionNewPieces::Table, SessionNewPieces::SessionId)
                .to(TrainingSessions::Table, TrainingSessions::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .foreign_key(
            ForeignKey::create()
                .from(SessionNewPieces::Table, SessionNewPieces::PieceId)
                .to(Pieces::Table, Pieces::Id),
        )
        .to_string(SqliteQueryBuilder)
}

/// CREATE TABLE IF NOT EXISTS session_repertoire_pieces (
///     session_id INTEGER NOT NULL REFERENCES training_sessions(id) ON DELETE CASCADE,
///     piece_id INTEGER NOT NULL REFERENCES pieces(id)
/// )
pub fn create_session_repertoire_pieces_table() -> String {
    Table::create()
        .table(SessionRepertoirePieces::Table)
        .if_not_exists()
        .col(
            ColumnDef::new(SessionRepertoirePieces::SessionId)
                .integer()
                .not_null(),
        )
        .col(
            ColumnDef::new(SessionRepertoirePieces::PieceId)
                .integer()
                .not_null(),
        )
        .foreign_key(
            ForeignKey::create()
                .from(
                    SessionRepertoirePieces::Table,
                    SessionRepertoirePieces::SessionId,
                )
                .to(TrainingSessions::Table, TrainingSessions::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .foreign_key(
            ForeignKey::create()
                .from(
                    SessionRepertoirePieces::Table,
                    SessionRepertoirePieces::PieceId,
                )
                .to(Pieces::Table, Pieces::Id),
        )
        .to_string(SqliteQueryBuilder)
}

/// CREATE INDEX IF NOT EXISTS idx_session_exercises_session_id ON session_exercises(session_id)
pub fn create_session_exercises_index() -> String {
    Index::create()
        .if_not_exists()
        .name("idx_session_exercises_session_id")
        .table(SessionExercises::Table)
        .col(SessionExercises::SessionId)
        .to_string(SqliteQueryBuilder)
}

/// CREATE INDEX IF NOT EXISTS idx_session_new_pieces_session_id ON session_new_pieces(session_id)
pub fn create_session_new_pieces_index() -> String {
    Index::create()
        .if_not_exists()
        .name("idx_session_new_pieces_session_id")
        .table(SessionNewPieces::Table)
        .col(SessionNewPieces::SessionId)
        .to_string(SqliteQueryBuilder)
}

/// CREATE INDEX IF NOT EXISTS idx_session_repertoire_pieces_session_id ON session_repertoire_pieces(session_id)
pub fn create_session_repertoire_pieces_index() -> String {
    Index::create()
        .if_not_exists()
        .name("idx_session_repertoire_pieces_session_id")
        .table(SessionRepertoirePieces::Table)
        .col(SessionRepertoirePieces::SessionId)
        .to_string(SqliteQueryBuilder)
}

/// CREATE INDEX IF NOT EXISTS idx_training_sessions_date ON training_sessions(date)
pub fn create_training_sessions_date_index() -> String {
    Index::create()
        .if_not_exists()
        .name("idx_training_sessions_date")
        .table(TrainingSessions::Table)
        .col(TrainingSessions::Date)
        .to_string(SqliteQueryBuilder)
}

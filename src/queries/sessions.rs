use sea_query::{Expr, Order, Query, SqliteQueryBuilder};

use crate::queries::{exercises, pieces};
use crate::schema::{
    Exercises, Pieces, SessionExercises, SessionNewPieces, SessionRepertoirePieces,
    TrainingSessions,
};

/// The column order every session SELECT uses
pub const SELECT_COLUMNS: [TrainingSessions; 5] = [
    TrainingSessions::Id,
    TrainingSessions::Date,
    TrainingSessions::Duration,
    TrainingSessions::Status,
    TrainingSessions::CreatedAt,
];

/// INSERT INTO training_sessions (date, duration, status, created_at) VALUES (?, ?, ?, ?)
pub fn insert(date: &str, duration: i64, status: &str, created_at: &str) -> String {
    Query::insert()
        .into_table(TrainingSessions::Table)
        .columns([
            TrainingSessions::Date,
            TrainingSessions::Duration,
            TrainingSessions::Status,
            TrainingSessions::CreatedAt,
        ])
        .values_panic([
            date.into(),
            duration.into(),
            status.into(),
            created_at.into(),
        ])
        .to_string(SqliteQueryBuilder)
}

/// SELECT ... FROM training_sessions ORDER BY date DESC, id DESC
pub fn select_all() -> String {
    Query::select()
        .columns(SELECT_COLUMNS)
        .from(TrainingSessions::Table)
        .order_by(TrainingSessions::Date, Order::Desc)
        .order_by(TrainingSessions::Id, Order::Desc)
        .to_string(SqliteQueryBuilder)
}

/// SELECT ... FROM training_sessions WHERE id = ?
pub fn select_by_id(id: i64) -> String {
    Query::select()
        .columns(SELECT_COLUMNS)
        .from(TrainingSessions::Table)
        .and_where(Expr::col(TrainingSessions::Id).eq(id))
        .to_string(SqliteQueryBuilder)
}

/// INSERT INTO session_exercises (session_id, exercise_id) VALUES (?, ?)
pub fn insert_exercise_link(session_id: i64, exercise_id: i64) -> String {
    Query::insert()
        .into_table(SessionExercises::Table)
        .columns([SessionExercises::SessionId, SessionExercises::ExerciseId])
        .values_panic([session_id.into(), exercise_id.into()])
        .to_string(SqliteQueryBuilder)
}

/// INSERT INTO session_new_pieces (session_id, piece_id) VALUES (?, ?)
pub fn insert_new_piece_link(session_id: i64, piece_id: i64) -> String {
    Query::insert()
        .into_table(SessionNewPieces::Table)
        .columns([SessionNewPieces::SessionId, SessionNewPieces::PieceId])
        .values_panic([session_id.into(), piece_id.into()])
        .to_string(SqliteQueryBuilder)
}

/// INSERT INTO session_repertoire_pieces (session_id, piece_id) VALUES (?, ?)
pub fn insert_repertoire_link(session_id: i64, piece_id: i64) -> String {
    Query::insert()
        .into_table(SessionRepertoirePieces::Table)
        .columns([
            SessionRepertoirePieces::SessionId,
            SessionRepertoirePieces::PieceId,
        ])
        .values_panic([session_id.into(), piece_id.into()])
        .to_string(SqliteQueryBuilder)
}

/// SELECT se.exercise_id, se.session_id, e.id, e.name, e.last_practiced
/// FROM session_exercises se INNER JOIN exercises e ON se.exercise_id = e.id
/// WHERE se.session_id = ?
pub fn select_exercise_links(session_id: i64) -> String {
    Query::select()
        .column((SessionExercises::Table, SessionExercises::ExerciseId))
        .column((SessionExercises::Table, SessionExercises::SessionId))
        .columns(exercises::SELECT_COLUMNS.map(|c| (Exercises::Table, c)))
        .from(SessionExercises::Table)
        .inner_join(
            Exercises::Table,
            Expr::col((SessionExercises::Table, SessionExercises::ExerciseId))
                .equals((Exercises::Table, Exercises::Id)),
        )
        .and_where(Expr::col((SessionExercises::Table, SessionExercises::SessionId)).eq(session_id))
        .to_string(SqliteQueryBuilder)
}

/// SELECT sp.piece_id, sp.session_id, p.*
/// FROM session_new_pieces sp INNER JOIN pieces p ON sp.piece_id = p.id
/// WHERE sp.session_id = ?
pub fn select_new_piece_links(session_id: i64) -> String {
    Query::select()
        .column((SessionNewPieces::Table, SessionNewPieces::PieceId))
        .column((SessionNewPieces::Table, SessionNewPieces::SessionId))
        .columns(pieces::SELECT_COLUMNS.map(|c| (Pieces::Table, c)))
        .from(SessionNewPieces::Table)
        .inner_join(
            Pieces::Table,
            Expr::col((SessionNewPieces::Table, SessionNewPieces::PieceId))
                .equals((Pieces::Table, Pieces::Id)),
        )
        .and_where(Expr::col((SessionNewPieces::Table, SessionNewPieces::SessionId)).eq(session_id))
        .to_string(SqliteQueryBuilder)
}

/// SELECT sp.piece_id, sp.session_id, p.*
/// FROM session_repertoire_pieces sp INNER JOIN pieces p ON sp.piece_id = p.id
/// WHERE sp.session_id = ?
pub fn select_repertoire_links(session_id: i64) -> String {
    Query::select()
        .column((
            SessionRepertoirePieces::Table,
            SessionRepertoirePieces::PieceId,
        ))
        .column((
            SessionRepertoirePieces::Table,
            SessionRepertoirePieces::SessionId,
        ))
        .columns(pieces::SELECT_COLUMNS.map(|c| (Pieces::Table, c)))
        .from(SessionRepertoirePieces::Table)
        .inner_join(
            Pieces::Table,
            Expr::col((
                SessionRepertoirePieces::Table,
                SessionRepertoirePieces::PieceId,
            ))
            .equals((Pieces::Table, Pieces::Id)),
        )
        .and_where(
            Expr::col((
                SessionRepertoirePieces::Table,
                SessionRepertoirePieces::SessionId,
            ))
            .eq(session_id),
        )
        .to_string(SqliteQueryBuilder)
}

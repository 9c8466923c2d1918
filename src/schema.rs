use sea_query::Iden;

/// Metadata table - key-value store for database configuration
#[derive(Iden)]
pub enum Metadata {
    Table,
    Key,
    Value,
}

/// Pieces table - musical works being tracked
#[derive(Iden)]
pub enum Pieces {
    Table,
    Id,
    Name,
    Composer,
    Work,
    Source,
    Status,
    PlayCount,
    DateAdded,
    LastPlayed,
}

/// Exercises table - named practice drills
#[derive(Iden)]
pub enum Exercises {
    Table,
    Id,
    Name,
    LastPracticed,
}

/// Training sessions table - dated practice events
#[derive(Iden)]
pub enum TrainingSessions {
    Table,
    Id,
    Date,
    Duration,
    Status,
    CreatedAt,
}

/// Join table - exercises practiced in a session
#[derive(Iden)]
pub enum SessionExercises {
    Table,
    SessionId,
    ExerciseId,
}

/// Join table - pieces practiced as new material in a session
#[derive(Iden)]
pub enum SessionNewPieces {
    Table,
    SessionId,
    PieceId,
}

/// Join table - repertoire pieces played in a session
#[derive(Iden)]
pub enum SessionRepertoirePieces {
    Table,
    SessionId,
    PieceId,
}

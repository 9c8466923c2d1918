use sea_query::{Expr, Order, Query, SqliteQueryBuilder};

use crate::schema::Pieces;

/// The column order every piece SELECT uses, so row mapping can stay positional
pub const SELECT_COLUMNS: [Pieces; 9] = [
    Pieces::Id,
    Pieces::Name,
    Pieces::Composer,
    Pieces::Work,
    Pieces::Source,
    Pieces::Status,
    Pieces::PlayCount,
    Pieces::DateAdded,
    Pieces::LastPlayed,
];

/// INSERT INTO pieces (name, composer, work, source, status, play_count, date_added)
/// VALUES (?, ?, ?, ?, ?, 0, ?)
pub fn insert(
    name: &str,
    composer: &str,
    work: Option<&str>,
    source: Option<&str>,
    status: &str,
    date_added: &str,
) -> String {
    Query::insert()
        .into_table(Pieces::Table)
        .columns([
            Pieces::Name,
            Pieces::Composer,
            Pieces::Work,
            Pieces::Source,
            Pieces::Status,
            Pieces::PlayCount,
            Pieces::DateAdded,
        ])
        .values_panic([
            name.into(),
            composer.into(),
            work.into(),
            source.into(),
            status.into(),
            0i64.into(),
            date_added.into(),
        ])
        .to_string(SqliteQueryBuilder)
}

/// SELECT ... FROM pieces ORDER BY date_added DESC, id DESC
///
/// The id tiebreak keeps the order stable when two pieces share a timestamp.
pub fn select_all() -> String {
    Query::select()
        .columns(SELECT_COLUMNS)
        .from(Pieces::Table)
        .order_by(Pieces::DateAdded, Order::Desc)
        .order_by(Pieces::Id, Order::Desc)
        .to_string(SqliteQueryBuilder)
}

/// SELECT ... FROM pieces WHERE id = ?
pub fn select_by_id(id: i64) -> String {
    Query::select()
        .columns(SELECT_COLUMNS)
        .from(Pieces::Table)
        .and_where(Expr::col(Pieces::Id).eq(id))
        .to_string(SqliteQueryBuilder)
}

/// SELECT COUNT(*) FROM pieces WHERE id IN (?, ...)
pub fn count_existing(ids: &[i64]) -> String {
    Query::select()
        .expr(Expr::col(Pieces::Id).count())
        .from(Pieces::Table)
        .and_where(Expr::col(Pieces::Id).is_in(ids.iter().copied()))
        .to_string(SqliteQueryBuilder)
}

/// UPDATE pieces SET last_played = ? WHERE id IN (?, ...)
pub fn set_last_played(ids: &[i64], last_played: &str) -> String {
    Query::update()
        .table(Pieces::Table)
        .value(Pieces::LastPlayed, last_played)
        .and_where(Expr::col(Pieces::Id).is_in(ids.iter().copied()))
        .to_string(SqliteQueryBuilder)
}

/// UPDATE pieces SET play_count = play_count + 1 WHERE id IN (?, ...)
pub fn increment_play_count(ids: &[i64]) -> String {
    Query::update()
        .table(Pieces::Table)
        .value(Pieces::PlayCount, Expr::col(Pieces::PlayCount).add(1))
        .and_where(Expr::col(Pieces::Id).is_in(ids.iter().copied()))
        .to_string(SqliteQueryBuilder)
}

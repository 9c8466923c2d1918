use sea_query::{Expr, Order, Query, SqliteQueryBuilder};

use crate::schema::Exercises;

/// The column order every exercise SELECT uses
pub const SELECT_COLUMNS: [Exercises; 3] =
    [Exercises::Id, Exercises::Name, Exercises::LastPracticed];

/// INSERT INTO exercises (name) VALUES (?)
pub fn insert(name: &str) -> String {
    Query::insert()
        .into_table(Exercises::Table)
        .columns([Exercises::Name])
        .values_panic([name.into()])
        .to_string(SqliteQueryBuilder)
}

/// SELECT id, name, last_practiced FROM exercises ORDER BY name ASC
pub fn select_all() -> String {
    Query::select()
        .columns(SELECT_COLUMNS)
        .from(Exercises::Table)
        .order_by(Exercises::Name, Order::Asc)
        .to_string(SqliteQueryBuilder)
}

/// SELECT id, name, last_practiced FROM exercises WHERE id = ?
pub fn select_by_id(id: i64) -> String {
    Query::select()
        .columns(SELECT_COLUMNS)
        .from(Exercises::Table)
        .and_where(Expr::col(Exercises::Id).eq(id))
        .to_string(SqliteQueryBuilder)
}

/// SELECT COUNT(*) FROM exercises WHERE id IN (?, ...)
pub fn count_existing(ids: &[i64]) -> String {
    Query::select()
        .expr(Expr::col(Exercises::Id).count())
        .from(Exercises::Table)
        .and_where(Expr::col(Exercises::Id).is_in(ids.iter().copied()))
        .to_string(SqliteQueryBuilder)
}

/// UPDATE exercises SET last_practiced = ? WHERE id IN (?, ...)
pub fn set_last_practiced(ids: &[i64], last_practiced: &str) -> String {
    Query::update()
        .table(Exercises::Table)
        .value(Exercises::LastPracticed, last_practiced)
        .and_where(Expr::col(Exercises::Id).is_in(ids.iter().copied()))
        .to_string(SqliteQueryBuilder)
}

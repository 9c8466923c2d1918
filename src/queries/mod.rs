pub mod ddl;
pub mod exercises;
pub mod metadata;
pub mod pieces;
pub mod sessions;

//! Repository Implementations
//!
//! Domain層のRepositoryトレイトの実装

pub mod csv_snapshot_repository;
pub mod duckdb_sink;
pub mod http_census_repository;
pub mod postgres_sink;
pub mod sql;

//! Adapter Layer
//!
//! 外部システム（Census API, PostgreSQL, DuckDB, ファイルシステム）との統合

pub mod auth;
pub mod census;
pub mod config;
pub mod repositories;

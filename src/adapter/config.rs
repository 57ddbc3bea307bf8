//! Configuration File
//!
//! JSON設定ファイルの読み込み

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;

use crate::domain::services::geography::GeoIdStyle;

pub const DEFAULT_POSTGRES_TABLE: &str = "justice_counts.geoid_population";
pub const DEFAULT_DUCKDB_TABLE: &str = "cesnsus_illinois_county_population";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub census: CensusConfig,
    pub sink: SinkConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

/// Census API settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CensusConfig {
    pub base_url: String,
    pub dataset: String,
    pub state_fips: String,
    pub start_year: i32,
    pub end_year: i32,
}

impl Default for CensusConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.census.gov/data".to_string(),
            dataset: "acs/acs5".to_string(),
            state_fips: "17".to_string(),
            start_year: 2009,
            end_year: 2023,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SinkConfig {
    Postgres(PostgresConfig),
    Duckdb(DuckDbConfig),
}

impl SinkConfig {
    pub fn table(&self) -> &str {
        match self {
            SinkConfig::Postgres(pg) => &pg.table,
            SinkConfig::Duckdb(duck) => &duck.table,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PostgresConfig {
    #[serde(default = "default_postgres_host")]
    pub host: String,
    #[serde(default = "default_postgres_port")]
    pub port: u16,
    #[serde(default = "default_postgres_dbname")]
    pub dbname: String,
    #[serde(default = "default_postgres_table")]
    pub table: String,
    // Environment variable names holding credentials
    #[serde(default = "default_user_env")]
    pub user_env: String,
    #[serde(default = "default_password_env")]
    pub password_env: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DuckDbConfig {
    pub path: String,
    #[serde(default = "default_duckdb_table")]
    pub table: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ExportConfig {
    pub enabled: bool,
    pub directory: String,
    pub geo_id_style: GeoIdStyle,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            directory: "~/census_county_data".to_string(),
            geo_id_style: GeoIdStyle::StateCounty,
        }
    }
}

fn default_postgres_host() -> String {
    "ccjda1.icjia.org".to_string()
}

fn default_postgres_port() -> u16 {
    5432
}

fn default_postgres_dbname() -> String {
    "archives".to_string()
}

fn default_postgres_table() -> String {
    DEFAULT_POSTGRES_TABLE.to_string()
}

fn default_duckdb_table() -> String {
    DEFAULT_DUCKDB_TABLE.to_string()
}

fn default_user_env() -> String {
    "POSTGRES_USER".to_string()
}

fn default_password_env() -> String {
    "POSTGRES_PASSWORD".to_string()
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(shellexpand::tilde(path).as_ref())
            .with_context(|| format!("Failed to read config file: {}", path))?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let config: Config =
            serde_json::from_str(content).context("Failed to parse config JSON")?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_minimal_postgres_config_uses_defaults() {
        let config = Config::from_json(r#"{"sink": {"kind": "postgres"}}"#).unwrap();

        assert_eq!(config.census.start_year, 2009);
        assert_eq!(config.census.end_year, 2023);
        assert_eq!(config.census.state_fips, "17");
        assert!(!config.export.enabled);
        assert_eq!(config.export.directory, "~/census_county_data");
        match config.sink {
            SinkConfig::Postgres(pg) => {
                assert_eq!(pg.port, 5432);
                assert_eq!(pg.dbname, "archives");
                assert_eq!(pg.table, DEFAULT_POSTGRES_TABLE);
                assert_eq!(pg.user_env, "POSTGRES_USER");
            }
            SinkConfig::Duckdb(_) => panic!("expected postgres sink"),
        }
    }

    #[test]
    fn test_duckdb_config() {
        let config = Config::from_json(
            r#"{
                "census": {"start_year": 2020},
                "sink": {"kind": "duckdb", "path": "~/data/census.duckdb"},
                "export": {"enabled": true, "directory": "/tmp/out", "geo_id_style": "full"}
            }"#,
        )
        .unwrap();

        assert_eq!(config.census.start_year, 2020);
        assert_eq!(config.census.end_year, 2023);
        assert_eq!(config.sink.table(), DEFAULT_DUCKDB_TABLE);
        assert!(config.export.enabled);
        assert_eq!(config.export.geo_id_style, GeoIdStyle::Full);
    }

    #[test]
    fn test_missing_sink_is_error() {
        assert!(Config::from_json(r#"{"census": {}}"#).is_err());
    }

    #[test]
    fn test_unknown_sink_kind_is_error() {
        assert!(Config::from_json(r#"{"sink": {"kind": "sqlite"}}"#).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"sink": {"kind": "duckdb", "path": "db.duckdb", "table": "pop"}}"#)
            .unwrap();

        let config = Config::load(path.to_str().unwrap()).unwrap();

        assert_eq!(config.sink.table(), "pop");
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load("/nonexistent/census-loader.json").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}

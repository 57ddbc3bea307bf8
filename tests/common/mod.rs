//! Shared fixtures for integration tests

#![allow(dead_code)]

use anyhow::Result;
use async_trait::async_trait;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use census_loader::adapter::census::client::parse_census_body;
use census_loader::domain::entities::census_table::CensusTable;
use census_loader::domain::repositories::census_repository::CensusRepository;

/// Get the path to test fixtures
pub fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Serves the recorded B01001 / B03002 responses for every year
#[derive(Default)]
pub struct FixtureCensusRepository {
    pub requests: Mutex<Vec<(i32, String)>>,
}

#[async_trait]
impl CensusRepository for FixtureCensusRepository {
    async fn fetch_year(&self, year: i32, query: &str) -> Result<CensusTable> {
        self.requests.lock().unwrap().push((year, query.to_string()));

        let file = if query.starts_with("group(B01001)") {
            "sex_b01001.json"
        } else {
            "race_b03002.json"
        };
        let body = fs::read_to_string(fixtures_path().join(file))?;
        parse_census_body(&body)
    }
}

//! Census API Client
//!
//! HTTPクライアントとレスポンスの解析

use anyhow::{Context, Result};
use serde_json::Value;

use crate::domain::entities::census_table::CensusTable;

/// Thin wrapper around `reqwest::Client` that knows the ACS URL layout
pub struct CensusClient {
    http: reqwest::Client,
    base_url: String,
    dataset: String,
}

impl CensusClient {
    pub fn new(base_url: &str, dataset: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            dataset: dataset.trim_matches('/').to_string(),
        })
    }

    /// `{base_url}/{year}/{dataset}?get={query}`
    pub fn year_url(&self, year: i32, query: &str) -> String {
        format!("{}/{}/{}?get={}", self.base_url, year, self.dataset, query)
    }

    /// GET the url and return the body; non-2xx statuses are errors
    pub async fn get_body(&self, url: &str) -> Result<String> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .with_context(|| format!("Census request failed: {}", url))?
            .error_for_status()
            .with_context(|| format!("Census API returned an error status: {}", url))?;

        response
            .text()
            .await
            .context("Failed to read Census response body")
    }
}

/// Parse a Census JSON body (array of arrays, first row = header)
pub fn parse_census_body(body: &str) -> Result<CensusTable> {
    let data: Vec<Vec<Value>> =
        serde_json::from_str(body).context("Census response is not a JSON array of arrays")?;
    Ok(CensusTable::from_json_rows(data)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_url() {
        let client = CensusClient::new("https://api.census.gov/data/", "acs/acs5").unwrap();

        let url = client.year_url(2015, "B03002_001E&for=county:*&in=state:17");

        assert_eq!(
            url,
            "https://api.census.gov/data/2015/acs/acs5?get=B03002_001E&for=county:*&in=state:17"
        );
    }

    #[test]
    fn test_parse_census_body() {
        let body = r#"[["NAME","B01001_002E","ucgid"],
            ["Adams County, Illinois","32000","0500000US17001"],
            ["Cook County, Illinois","2500000","0500000US17031"]]"#;

        let table = parse_census_body(body).unwrap();

        assert_eq!(table.columns(), &["NAME", "B01001_002E", "ucgid"]);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_parse_census_body_malformed() {
        let err = parse_census_body("error: unknown variable 'B01001_999E'").unwrap_err();
        assert!(err.to_string().contains("not a JSON array of arrays"));
    }

    #[test]
    fn test_parse_census_body_empty_array() {
        assert!(parse_census_body("[]").is_err());
    }

    #[test]
    fn test_parse_census_body_ragged() {
        assert!(parse_census_body(r#"[["a","b"],["1"]]"#).is_err());
    }
}

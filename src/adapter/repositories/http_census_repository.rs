//! HTTP Census Repository Implementation
//!
//! CensusRepositoryのHTTP実装

use anyhow::Result;
use async_trait::async_trait;
use log::debug;

use crate::adapter::census::client::{parse_census_body, CensusClient};
use crate::adapter::config::CensusConfig;
use crate::domain::entities::census_table::CensusTable;
use crate::domain::repositories::census_repository::CensusRepository;

/// Census API リポジトリ
pub struct HttpCensusRepository {
    client: CensusClient,
}

impl HttpCensusRepository {
    pub fn new(client: CensusClient) -> Self {
        Self { client }
    }

    pub fn from_config(config: &CensusConfig) -> Result<Self> {
        Ok(Self::new(CensusClient::new(&config.base_url, &config.dataset)?))
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[async_trait]
impl CensusRepository for HttpCensusRepository {
    async fn fetch_year(&self, year: i32, query: &str) -> Result<CensusTable> {
        let url = self.client.year_url(year, query);
        debug!("GET {}", url);

        let body = self.client.get_body(&url).await?;
        parse_census_body(&body)
    }
}

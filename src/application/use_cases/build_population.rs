//! # Build Population Use Case
//!
//! 性別表と人種・民族表を取得し、ロング形式の1つの表にまとめるユースケース

use std::sync::Arc;

use anyhow::{Context, Result};
use log::info;

use crate::application::dto::pipeline_config::PipelineConfig;
use crate::application::use_cases::assemble_table::AssembleTableUseCase;
use crate::domain::entities::census_variables::{race_query, sex_query};
use crate::domain::entities::population_record::PopulationRecord;
use crate::domain::repositories::census_repository::CensusRepository;
use crate::domain::services::geography::{combine, GeoIdStyle, MergeTemplate};
use crate::domain::services::reshape::ReshapeService;

/// 連結済みの人口データ
///
/// `records` の `ucgid` は Census の複合識別子のまま（出力先ごとに変換する）
#[derive(Debug, Clone)]
pub struct PopulationDataset {
    pub records: Vec<PopulationRecord>,
    pub sex_rows: usize,
    pub race_rows: usize,
    pub template_size: usize,
}

/// 人口データ構築ユースケース
pub struct BuildPopulationUseCase<C: CensusRepository + ?Sized> {
    assemble: AssembleTableUseCase<C>,
}

impl<C: CensusRepository + ?Sized> BuildPopulationUseCase<C> {
    /// 新しいユースケースを作成
    ///
    /// # Arguments
    ///
    /// * `census_repository` - Census リポジトリ
    pub fn new(census_repository: Arc<C>) -> Self {
        Self {
            assemble: AssembleTableUseCase::new(census_repository),
        }
    }

    /// 性別表 → マージテンプレート → 人種表 → 連結の順に処理する
    ///
    /// # Errors
    ///
    /// 取得または変換に失敗した場合にエラーを返す
    pub async fn execute(&self, config: &PipelineConfig) -> Result<PopulationDataset> {
        let sex_table = self
            .assemble
            .execute(config.years(), &sex_query(&config.state_fips))
            .await
            .context("Failed to assemble sex table")?;
        let sex = ReshapeService::reshape_sex(&sex_table).context("Failed to reshape sex table")?;
        info!("Sex table: {} wide rows -> {} long rows", sex_table.len(), sex.len());

        let template = MergeTemplate::from_records(&sex, &config.state_fips);
        info!("Merge template: {} counties", template.len());

        let race_table = self
            .assemble
            .execute(config.years(), &race_query(&config.state_fips))
            .await
            .context("Failed to assemble race table")?;
        let race = ReshapeService::reshape_race(&race_table, &template)
            .context("Failed to reshape race table")?;
        info!("Race table: {} wide rows -> {} long rows", race_table.len(), race.len());

        let sex_rows = sex.len();
        let race_rows = race.len();

        Ok(PopulationDataset {
            records: combine(sex, race, GeoIdStyle::Full),
            sex_rows,
            race_rows,
            template_size: template.len(),
        })
    }
}

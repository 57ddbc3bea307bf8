//! # Load Population Use Case
//!
//! 出力先テーブルの内容を人口レコードで置き換えるユースケース

use std::sync::Arc;

use anyhow::{Context, Result};
use log::info;

use crate::domain::entities::output_table::OutputTable;
use crate::domain::entities::population_record::PopulationRecord;
use crate::domain::entities::table_name::TableName;
use crate::domain::repositories::population_sink::PopulationSink;
use crate::domain::services::geography::{restyle, GeoIdStyle};

/// 投入結果のサマリー
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadSummary {
    /// 出力先テーブル
    pub table: String,
    /// 投入した行数
    pub rows_loaded: u64,
}

/// 人口データ投入ユースケース
///
/// 識別子を州+郡コードに変換し、テーブルを全件入れ替える
pub struct LoadPopulationUseCase<S: PopulationSink + ?Sized> {
    sink: Arc<S>,
}

impl<S: PopulationSink + ?Sized> LoadPopulationUseCase<S> {
    /// 新しいユースケースを作成
    ///
    /// # Arguments
    ///
    /// * `sink` - 出力先
    pub fn new(sink: Arc<S>) -> Self {
        Self { sink }
    }

    /// テーブルを全件入れ替える
    ///
    /// 同じレコードで2回実行しても結果は同じになる
    ///
    /// # Errors
    ///
    /// 出力先への書き込みに失敗した場合にエラーを返す
    pub async fn execute(
        &self,
        table: &TableName,
        records: &[PopulationRecord],
    ) -> Result<LoadSummary> {
        let output = OutputTable::from_records(&restyle(records, GeoIdStyle::StateCounty));
        info!("Loading {} rows into {}", output.len(), table);

        let rows_loaded = self
            .sink
            .replace(table, &output)
            .await
            .with_context(|| format!("Failed to load {}", table))?;

        Ok(LoadSummary {
            table: table.to_string(),
            rows_loaded,
        })
    }
}

//! # Pipeline Configuration DTO
//!
//! パイプライン設定のData Transfer Object

use std::ops::RangeInclusive;

use crate::domain::entities::table_name::TableName;
use crate::domain::services::geography::GeoIdStyle;

/// パイプライン設定
///
/// 取得対象の州と年、出力先テーブル、スナップショットの識別子形式
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// 州 FIPS コード（例: "17" = Illinois）
    pub state_fips: String,
    /// 取得開始年（含む）
    pub start_year: i32,
    /// 取得終了年（含む）
    pub end_year: i32,
    /// 出力先テーブル
    pub table: TableName,
    /// CSV スナップショットの地理識別子形式
    pub export_style: GeoIdStyle,
}

impl PipelineConfig {
    /// 新しいパイプライン設定を作成します。
    ///
    /// # 例
    ///
    /// ```
    /// use census_loader::application::dto::pipeline_config::PipelineConfig;
    /// use census_loader::domain::entities::table_name::TableName;
    /// use census_loader::domain::services::geography::GeoIdStyle;
    ///
    /// let config = PipelineConfig::new(
    ///     "17".to_string(),
    ///     2009,
    ///     2023,
    ///     TableName::parse("justice_counts.geoid_population").unwrap(),
    ///     GeoIdStyle::StateCounty,
    /// );
    ///
    /// assert_eq!(config.years().count(), 15);
    /// assert_eq!(config.table.to_string(), "justice_counts.geoid_population");
    /// ```
    pub fn new(
        state_fips: String,
        start_year: i32,
        end_year: i32,
        table: TableName,
        export_style: GeoIdStyle,
    ) -> Self {
        Self {
            state_fips,
            start_year,
            end_year,
            table,
            export_style,
        }
    }

    /// 取得対象の年（昇順）
    pub fn years(&self) -> RangeInclusive<i32> {
        self.start_year..=self.end_year
    }
}

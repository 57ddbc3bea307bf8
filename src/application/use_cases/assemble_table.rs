//! # Assemble Table Use Case
//!
//! 年ごとの表を取得して1つの表に連結するユースケース

use std::ops::RangeInclusive;
use std::sync::Arc;

use anyhow::{Context, Result};
use log::info;

use crate::domain::entities::census_table::{CensusTable, TableError};
use crate::domain::entities::census_variables::YEAR_COLUMN;
use crate::domain::repositories::census_repository::CensusRepository;

/// 表の取得・連結ユースケース
///
/// 各年の表を順番に取得し、`year` 列を付けて年の昇順で連結する
pub struct AssembleTableUseCase<C: CensusRepository + ?Sized> {
    census_repository: Arc<C>,
}

impl<C: CensusRepository + ?Sized> AssembleTableUseCase<C> {
    /// 新しいユースケースを作成
    ///
    /// # Arguments
    ///
    /// * `census_repository` - Census リポジトリ
    pub fn new(census_repository: Arc<C>) -> Self {
        Self { census_repository }
    }

    /// 全ての年の表を取得して連結する
    ///
    /// # Arguments
    ///
    /// * `years` - 取得する年の範囲
    /// * `query` - `get=` 以降のクエリ文字列
    ///
    /// # Errors
    ///
    /// 年の範囲が空の場合、またはいずれかの年の取得に失敗した場合にエラーを返す
    pub async fn execute(&self, years: RangeInclusive<i32>, query: &str) -> Result<CensusTable> {
        if years.is_empty() {
            return Err(TableError::EmptyYearRange {
                start: *years.start(),
                end: *years.end(),
            }
            .into());
        }

        let mut tables = Vec::new();
        for year in years {
            let table = self
                .census_repository
                .fetch_year(year, query)
                .await
                .with_context(|| format!("Failed to fetch census data for {}", year))?;

            info!("Fetched {} rows for {}", table.len(), year);
            tables.push(table.with_constant_column(YEAR_COLUMN, &year.to_string()));
        }

        Ok(CensusTable::concat(tables))
    }
}

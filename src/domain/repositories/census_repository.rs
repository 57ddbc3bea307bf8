//! # Census Repository Trait
//!
//! Census API からの年次データ取得を抽象化

use anyhow::Result;
use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use crate::domain::entities::census_table::CensusTable;

/// Census リポジトリ
///
/// 年とクエリ文字列で1つの表を取得する
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CensusRepository: Send + Sync {
    /// 指定年の表を取得する
    ///
    /// # Arguments
    ///
    /// * `year` - 取得する年
    /// * `query` - `get=` 以降のクエリ文字列
    ///
    /// # Errors
    ///
    /// HTTP エラー、または応答が配列の配列でない場合にエラーを返す
    async fn fetch_year(&self, year: i32, query: &str) -> Result<CensusTable>;
}

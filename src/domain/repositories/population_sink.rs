//! # Population Sink Trait
//!
//! 出力先テーブルへの全件入れ替えを抽象化

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::entities::output_table::{ColumnSpec, OutputTable};
use crate::domain::entities::table_name::TableName;

/// 人口データの出力先
///
/// テーブルの作成・全削除・一括投入の3つの機能を持つ
#[async_trait]
pub trait PopulationSink: Send + Sync {
    /// テーブルがなければ作成する
    async fn ensure_schema(&self, table: &TableName, columns: &[ColumnSpec]) -> Result<()>;

    /// テーブルの全行を削除する
    async fn truncate(&self, table: &TableName) -> Result<()>;

    /// 全行を投入し、投入した行数を返す
    async fn bulk_load(&self, table: &TableName, data: &OutputTable) -> Result<u64>;

    /// テーブルの内容を `data` で置き換える
    ///
    /// 既定の実装は作成・削除・投入を順に呼ぶだけで、途中で失敗すると
    /// テーブルが空のまま残る。トランザクションを持つ実装は上書きすること。
    async fn replace(&self, table: &TableName, data: &OutputTable) -> Result<u64> {
        self.ensure_schema(table, &data.infer_schema()).await?;
        self.truncate(table).await?;
        self.bulk_load(table, data).await
    }
}

//! # Snapshot Repository Trait
//!
//! 連結済みの表のファイル保存を抽象化

use std::path::PathBuf;

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDateTime;

use crate::domain::entities::population_record::PopulationRecord;

/// スナップショットリポジトリ
#[async_trait]
pub trait SnapshotRepository: Send + Sync {
    /// レコードを `taken_at` の時刻付きで保存し、保存先を返す
    async fn write_snapshot(
        &self,
        records: &[PopulationRecord],
        taken_at: NaiveDateTime,
    ) -> Result<PathBuf>;
}

//! # Export Snapshot Use Case
//!
//! 連結済みの表を時刻付きファイルとして保存するユースケース

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use chrono::NaiveDateTime;

use crate::domain::entities::population_record::PopulationRecord;
use crate::domain::repositories::snapshot_repository::SnapshotRepository;
use crate::domain::services::geography::{restyle, GeoIdStyle};

/// スナップショット保存ユースケース
pub struct ExportSnapshotUseCase<R: SnapshotRepository + ?Sized> {
    snapshot_repository: Arc<R>,
}

impl<R: SnapshotRepository + ?Sized> ExportSnapshotUseCase<R> {
    pub fn new(snapshot_repository: Arc<R>) -> Self {
        Self {
            snapshot_repository,
        }
    }

    /// 識別子を `style` で変換して保存する
    ///
    /// # Returns
    ///
    /// 保存先のパス
    pub async fn execute(
        &self,
        records: &[PopulationRecord],
        style: GeoIdStyle,
        taken_at: NaiveDateTime,
    ) -> Result<PathBuf> {
        let styled = restyle(records, style);
        self.snapshot_repository
            .write_snapshot(&styled, taken_at)
            .await
    }
}

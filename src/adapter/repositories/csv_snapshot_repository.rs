//! CSV Snapshot Repository Implementation
//!
//! SnapshotRepositoryのCSV実装（時刻付きファイル名でディレクトリに保存）

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::entities::population_record::{PopulationRecord, POPULATION_COLUMNS};
use crate::domain::repositories::snapshot_repository::SnapshotRepository;

/// CSVファイルベースのスナップショットリポジトリ
pub struct CsvSnapshotRepository {
    directory: PathBuf,
}

impl CsvSnapshotRepository {
    /// `directory` に保存するリポジトリを作成（`~` は展開する）
    pub fn new(directory: &str) -> Self {
        Self {
            directory: PathBuf::from(shellexpand::tilde(directory).as_ref()),
        }
    }

    /// `upload_YYYYmmdd_HHMMSS.csv`
    pub fn file_name(taken_at: NaiveDateTime) -> String {
        format!("upload_{}.csv", taken_at.format("%Y%m%d_%H%M%S"))
    }

    /// ファイルに書き出す（同期処理）
    fn write_sync(path: &Path, records: &[PopulationRecord]) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create snapshot directory")?;
        }

        // Header is written explicitly so an empty snapshot still carries it
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(path)
            .with_context(|| format!("Failed to create snapshot file: {}", path.display()))?;

        writer.write_record(POPULATION_COLUMNS)?;
        for record in records {
            writer
                .serialize(record)
                .context("Failed to write snapshot row")?;
        }
        writer.flush().context("Failed to flush snapshot file")?;

        Ok(())
    }
}

#[async_trait]
impl SnapshotRepository for CsvSnapshotRepository {
    async fn write_snapshot(
        &self,
        records: &[PopulationRecord],
        taken_at: NaiveDateTime,
    ) -> Result<PathBuf> {
        let path = self.directory.join(Self::file_name(taken_at));
        let records = records.to_vec();

        let written = path.clone();
        tokio::task::spawn_blocking(move || Self::write_sync(&written, &records))
            .await
            .map_err(|e| anyhow::anyhow!("Failed to spawn blocking task: {}", e))??;

        info!("Wrote snapshot to {}", path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn taken_at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 11, 2)
            .unwrap()
            .and_hms_opt(9, 5, 7)
            .unwrap()
    }

    #[test]
    fn test_file_name() {
        assert_eq!(
            CsvSnapshotRepository::file_name(taken_at()),
            "upload_20241102_090507.csv"
        );
    }

    #[tokio::test]
    async fn test_write_snapshot() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("census_county_data");
        let repo = CsvSnapshotRepository::new(target.to_str().unwrap());

        let records = vec![
            PopulationRecord::new(
                Some("Adams County, Illinois".into()),
                Some("17001".into()),
                2019,
                "Female",
                33_000,
            ),
            PopulationRecord::new(None, None, 2019, "White", 5),
        ];

        let path = repo.write_snapshot(&records, taken_at()).await.unwrap();

        assert_eq!(path, target.join("upload_20241102_090507.csv"));
        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "county_name,ucgid,year,variable,value");
        assert_eq!(lines[1], "\"Adams County, Illinois\",17001,2019,Female,33000");
        assert_eq!(lines[2], ",,2019,White,5");
        assert_eq!(lines.len(), 3);
    }

    #[tokio::test]
    async fn test_write_empty_snapshot_has_header() {
        let dir = TempDir::new().unwrap();
        let repo = CsvSnapshotRepository::new(dir.path().to_str().unwrap());

        let path = repo.write_snapshot(&[], taken_at()).await.unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "county_name,ucgid,year,variable,value\n");
    }
}

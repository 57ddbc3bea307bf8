//! # Use Cases
//!
//! アプリケーションのビジネスフロー（ユースケース）
//!
//! ## ユースケース
//!
//! - **AssembleTableUseCase**: 年ごとの表の取得と連結
//! - **BuildPopulationUseCase**: 性別表・人種表のロング形式への変換と連結
//! - **ExportSnapshotUseCase**: CSV スナップショットの保存
//! - **LoadPopulationUseCase**: 出力先テーブルの全件入れ替え

pub mod assemble_table;
pub mod build_population;
pub mod export_snapshot;
pub mod load_population;

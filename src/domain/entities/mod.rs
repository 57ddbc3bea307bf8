//! # Domain Entities
//!
//! ビジネスエンティティとバリューオブジェクトを定義するモジュール
//!
//! ## エンティティ
//!
//! - **CensusTable**: Census API から取得した表
//! - **PopulationRecord**: ロング形式の人口レコード
//! - **OutputTable**: シンクに渡す型付きの表
//! - **TableName**: 検証済みのテーブル名

pub mod census_table;
pub mod census_variables;
pub mod output_table;
pub mod population_record;
pub mod table_name;

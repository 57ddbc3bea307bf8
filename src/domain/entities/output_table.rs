//! # OutputTable Value Object
//!
//! シンクに依存しない型付きの出力表と、列型の推論

use chrono::NaiveDateTime;

use super::population_record::{PopulationRecord, POPULATION_COLUMNS};

/// 型付きセル値
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Timestamp(NaiveDateTime),
    Text(String),
    Null,
}

/// セル値の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Integer,
    Float,
    Boolean,
    Timestamp,
    Text,
}

impl CellValue {
    /// 値の種類（`Null` は `None`）
    pub fn kind(&self) -> Option<CellKind> {
        match self {
            CellValue::Integer(_) => Some(CellKind::Integer),
            CellValue::Float(_) => Some(CellKind::Float),
            CellValue::Boolean(_) => Some(CellKind::Boolean),
            CellValue::Timestamp(_) => Some(CellKind::Timestamp),
            CellValue::Text(_) => Some(CellKind::Text),
            CellValue::Null => None,
        }
    }
}

impl From<Option<String>> for CellValue {
    fn from(value: Option<String>) -> Self {
        value.map(CellValue::Text).unwrap_or(CellValue::Null)
    }
}

/// SQL列型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlType {
    Integer,
    DoublePrecision,
    Boolean,
    Timestamp,
    Varchar,
}

impl SqlType {
    /// セル種類から SQL 型への対応表
    ///
    /// 種類が不明（全て NULL）の列は VARCHAR
    pub fn from_kind(kind: Option<CellKind>) -> Self {
        match kind {
            Some(CellKind::Integer) => SqlType::Integer,
            Some(CellKind::Float) => SqlType::DoublePrecision,
            Some(CellKind::Boolean) => SqlType::Boolean,
            Some(CellKind::Timestamp) => SqlType::Timestamp,
            Some(CellKind::Text) | None => SqlType::Varchar,
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            SqlType::Integer => "INTEGER",
            SqlType::DoublePrecision => "DOUBLE PRECISION",
            SqlType::Boolean => "BOOLEAN",
            SqlType::Timestamp => "TIMESTAMP",
            SqlType::Varchar => "VARCHAR",
        }
    }
}

/// 列定義
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    pub name: String,
    pub sql_type: SqlType,
}

/// 出力表
///
/// 全ての行は列数と同じ幅を持つ
#[derive(Debug, Clone, PartialEq)]
pub struct OutputTable {
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl OutputTable {
    /// 人口レコードから出力表を作成
    pub fn from_records(records: &[PopulationRecord]) -> Self {
        let rows = records
            .iter()
            .map(|r| {
                vec![
                    CellValue::from(r.county_name.clone()),
                    CellValue::from(r.ucgid.clone()),
                    CellValue::Integer(i64::from(r.year)),
                    CellValue::Text(r.variable.clone()),
                    CellValue::Integer(r.value),
                ]
            })
            .collect();

        Self {
            columns: POPULATION_COLUMNS.iter().map(|c| (*c).to_string()).collect(),
            rows,
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 値の型から列定義を推論
    ///
    /// 各列で最初の非 NULL 値の種類を採用する
    pub fn infer_schema(&self) -> Vec<ColumnSpec> {
        self.columns
            .iter()
            .enumerate()
            .map(|(index, name)| {
                let kind = self.rows.iter().find_map(|row| row[index].kind());
                ColumnSpec {
                    name: name.clone(),
                    sql_type: SqlType::from_kind(kind),
                }
            })
            .collect()
    }
}

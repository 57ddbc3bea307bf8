//! # CensusTable Entity
//!
//! Census API のレスポンスを表す表形式エンティティ

use serde_json::Value;
use thiserror::Error;

/// 表操作のエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    /// レスポンスにヘッダー行がない
    #[error("census response contained no header row")]
    EmptyResponse,

    /// 行の幅がヘッダーと一致しない
    #[error("row {row} has {found} cells, header has {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// 列が存在しない
    #[error("column not found: {0}")]
    MissingColumn(String),

    /// 整数に変換できない値
    #[error("column {column} holds non-numeric value {value:?}")]
    NonNumeric { column: String, value: String },

    /// 年の値が不正
    #[error("invalid year value {0:?}")]
    InvalidYear(String),

    /// 年の範囲が空
    #[error("year range {start}..={end} is empty")]
    EmptyYearRange { start: i32, end: i32 },
}

/// Census の表
///
/// 列名（ヘッダー）と文字列セルの行で構成される。
/// 全ての行はヘッダーと同じ幅を持つ。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CensusTable {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl CensusTable {
    /// 列名と行から表を作成
    ///
    /// # Errors
    ///
    /// 行の幅がヘッダーと一致しない場合にエラーを返す
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self, TableError> {
        for (index, row) in rows.iter().enumerate() {
            if row.len() != columns.len() {
                return Err(TableError::RaggedRow {
                    row: index,
                    expected: columns.len(),
                    found: row.len(),
                });
            }
        }
        Ok(Self { columns, rows })
    }

    /// Census API の配列の配列から表を作成
    ///
    /// 先頭行をヘッダー、残りをデータ行として扱う。
    /// `null` は空文字列、数値と真偽値は文字列表現に変換する。
    pub fn from_json_rows(data: Vec<Vec<Value>>) -> Result<Self, TableError> {
        let mut rows = data.into_iter();
        let header = rows.next().ok_or(TableError::EmptyResponse)?;

        let columns = header.into_iter().map(cell_to_string).collect();
        let rows = rows
            .map(|row| row.into_iter().map(cell_to_string).collect())
            .collect();

        Self::new(columns, rows)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
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

    /// 列の位置を返す
    pub fn column_index(&self, name: &str) -> Result<usize, TableError> {
        self.columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| TableError::MissingColumn(name.to_string()))
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// 列の値を行順に返す
    pub fn column(&self, name: &str) -> Result<Vec<&str>, TableError> {
        let index = self.column_index(name)?;
        Ok(self.rows.iter().map(|row| row[index].as_str()).collect())
    }

    /// 全行に同じ値を持つ列を追加（既存なら上書き）
    pub fn with_constant_column(mut self, name: &str, value: &str) -> Self {
        match self.column_index(name) {
            Ok(index) => {
                for row in &mut self.rows {
                    row[index] = value.to_string();
                }
            }
            Err(_) => {
                self.columns.push(name.to_string());
                for row in &mut self.rows {
                    row.push(value.to_string());
                }
            }
        }
        self
    }

    /// 列名を変更する
    ///
    /// 対応表にない列はそのまま残る。
    pub fn rename(mut self, mapping: &[(&str, &str)]) -> Self {
        for column in &mut self.columns {
            if let Some((_, to)) = mapping.iter().find(|(from, _)| from == column) {
                *column = (*to).to_string();
            }
        }
        self
    }

    /// 指定した列だけを指定順で残す
    pub fn select(&self, names: &[&str]) -> Result<Self, TableError> {
        let indices = names
            .iter()
            .map(|name| self.column_index(name))
            .collect::<Result<Vec<_>, _>>()?;

        let rows = self
            .rows
            .iter()
            .map(|row| indices.iter().map(|&i| row[i].clone()).collect())
            .collect();

        Ok(Self {
            columns: names.iter().map(|n| (*n).to_string()).collect(),
            rows,
        })
    }

    /// 列を削除する
    pub fn drop_column(mut self, name: &str) -> Result<Self, TableError> {
        let index = self.column_index(name)?;
        self.columns.remove(index);
        for row in &mut self.rows {
            row.remove(index);
        }
        Ok(self)
    }

    /// 列の値を置き換える
    ///
    /// `values` の長さは行数と一致しなければならない
    pub fn replace_column(&mut self, name: &str, values: Vec<String>) -> Result<(), TableError> {
        let index = self.column_index(name)?;
        if values.len() != self.rows.len() {
            return Err(TableError::RaggedRow {
                row: values.len().min(self.rows.len()),
                expected: self.rows.len(),
                found: values.len(),
            });
        }
        for (row, value) in self.rows.iter_mut().zip(values) {
            row[index] = value;
        }
        Ok(())
    }

    /// 表を縦に連結する
    ///
    /// 列は名前で揃え、出現順の和集合になる。
    /// 列を持たない表の行は空文字列で埋める。
    pub fn concat(tables: Vec<CensusTable>) -> Self {
        let mut columns: Vec<String> = Vec::new();
        for table in &tables {
            for column in &table.columns {
                if !columns.contains(column) {
                    columns.push(column.clone());
                }
            }
        }

        let mut rows = Vec::with_capacity(tables.iter().map(CensusTable::len).sum());
        for table in tables {
            let positions: Vec<Option<usize>> = columns
                .iter()
                .map(|c| table.columns.iter().position(|t| t == c))
                .collect();

            for row in table.rows {
                rows.push(
                    positions
                        .iter()
                        .map(|p| p.map(|i| row[i].clone()).unwrap_or_default())
                        .collect(),
                );
            }
        }

        Self { columns, rows }
    }
}

fn cell_to_string(value: Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    }
}

/// 整数へのキャスト
///
/// 前後の空白は許容しない。
pub fn parse_count(column: &str, value: &str) -> Result<i64, TableError> {
    value.parse::<i64>().map_err(|_| TableError::NonNumeric {
        column: column.to_string(),
        value: value.to_string(),
    })
}

//! # TableName Value Object
//!
//! スキーマ修飾付きのテーブル名

use std::fmt;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableNameError {
    #[error("table name is empty")]
    Empty,
    #[error("invalid identifier {0:?} in table name")]
    InvalidIdentifier(String),
}

/// 検証済みのテーブル名
///
/// `schema.table` 形式を許容する。各部分は英数字とアンダースコアのみで、
/// 数字から始まらない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableName {
    parts: Vec<String>,
}

impl TableName {
    pub fn parse(name: &str) -> Result<Self, TableNameError> {
        if name.trim().is_empty() {
            return Err(TableNameError::Empty);
        }

        let parts = name
            .split('.')
            .map(|part| {
                if is_identifier(part) {
                    Ok(part.to_string())
                } else {
                    Err(TableNameError::InvalidIdentifier(part.to_string()))
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { parts })
    }

    /// 引用符付きの SQL 表現（`"schema"."table"`）
    pub fn quoted(&self) -> String {
        self.parts
            .iter()
            .map(|p| format!("\"{}\"", p))
            .collect::<Vec<_>>()
            .join(".")
    }

    /// 最後の部分（スキーマを除いたテーブル名）
    pub fn base_name(&self) -> &str {
        self.parts.last().map(String::as_str).unwrap_or_default()
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.parts.join("."))
    }
}

fn is_identifier(part: &str) -> bool {
    let mut chars = part.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

//! # PopulationRecord Entity
//!
//! ロング形式の人口レコード

use serde::Serialize;

/// 出力列名（出力順）
pub const POPULATION_COLUMNS: [&str; 5] = ["county_name", "ucgid", "year", "variable", "value"];

/// ロング形式の人口レコード
///
/// 1レコード = (郡, 年, 変数) ごとの1観測値。
/// `county_name` と `ucgid` は人種表の行がマージテンプレートに
/// 一致しなかった場合のみ `None` になる。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PopulationRecord {
    pub county_name: Option<String>,
    pub ucgid: Option<String>,
    pub year: i32,
    pub variable: String,
    pub value: i64,
}

impl PopulationRecord {
    pub fn new(
        county_name: Option<String>,
        ucgid: Option<String>,
        year: i32,
        variable: impl Into<String>,
        value: i64,
    ) -> Self {
        Self {
            county_name,
            ucgid,
            year,
            variable: variable.into(),
            value,
        }
    }
}

//! # Geography Service
//!
//! 地理識別子の変換とマージテンプレート

use serde::{Deserialize, Serialize};

use crate::domain::entities::population_record::PopulationRecord;

/// 出力時の地理識別子の形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeoIdStyle {
    /// `0500000US17031` → `17031`
    #[default]
    StateCounty,
    /// 変換しない
    Full,
}

impl GeoIdStyle {
    pub fn apply(&self, ucgid: &str) -> Option<String> {
        match self {
            GeoIdStyle::StateCounty => state_county_code(ucgid),
            GeoIdStyle::Full => Some(ucgid.to_string()),
        }
    }
}

/// 最初の `US` 以降（州+郡コード）を取り出す
pub fn state_county_code(ucgid: &str) -> Option<String> {
    ucgid.split("US").nth(1).map(String::from)
}

/// 最初の `US{州}` 以降（郡 FIPS コード）を取り出す
pub fn merge_code(ucgid: &str, state_fips: &str) -> Option<String> {
    let separator = format!("US{state_fips}");
    ucgid.split(separator.as_str()).nth(1).map(String::from)
}

/// マージテンプレートの1行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeEntry {
    pub county_name: String,
    pub ucgid: String,
    pub merge_code: Option<String>,
}

/// マージテンプレート
///
/// 性別表から作った `(county_name, ucgid)` の重複なしの組。
/// 郡 FIPS コードしか持たない人種表に名前と識別子を付与するために使う。
#[derive(Debug, Clone, Default)]
pub struct MergeTemplate {
    entries: Vec<MergeEntry>,
}

impl MergeTemplate {
    /// レコードから最初の出現順でテンプレートを作成
    pub fn from_records(records: &[PopulationRecord], state_fips: &str) -> Self {
        let mut entries: Vec<MergeEntry> = Vec::new();

        for record in records {
            let (Some(county_name), Some(ucgid)) = (&record.county_name, &record.ucgid) else {
                continue;
            };
            let seen = entries
                .iter()
                .any(|e| &e.county_name == county_name && &e.ucgid == ucgid);
            if !seen {
                entries.push(MergeEntry {
                    county_name: county_name.clone(),
                    ucgid: ucgid.clone(),
                    merge_code: merge_code(ucgid, state_fips),
                });
            }
        }

        Self { entries }
    }

    pub fn entries(&self) -> &[MergeEntry] {
        &self.entries
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 郡コードに一致する全てのエントリ
    pub fn lookup<'a>(&'a self, county_code: &'a str) -> impl Iterator<Item = &'a MergeEntry> + 'a {
        self.entries
            .iter()
            .filter(move |e| e.merge_code.as_deref() == Some(county_code))
    }
}

/// 性別表と人種表を連結し、地理識別子を変換する
pub fn combine(
    sex: Vec<PopulationRecord>,
    race: Vec<PopulationRecord>,
    style: GeoIdStyle,
) -> Vec<PopulationRecord> {
    sex.into_iter()
        .chain(race)
        .map(|record| with_style(record, style))
        .collect()
}

/// 既に連結済みのレコードに形式を適用する
pub fn restyle(records: &[PopulationRecord], style: GeoIdStyle) -> Vec<PopulationRecord> {
    records
        .iter()
        .cloned()
        .map(|record| with_style(record, style))
        .collect()
}

fn with_style(mut record: PopulationRecord, style: GeoIdStyle) -> PopulationRecord {
    record.ucgid = record.ucgid.as_deref().and_then(|id| style.apply(id));
    record
}

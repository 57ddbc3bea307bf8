//! # Census Variables
//!
//! ACS5 の変数コードとラベル、およびクエリ文字列

/// 郡名の列
pub const NAME_COLUMN: &str = "NAME";
/// 複合地理識別子の列
pub const UCGID_COLUMN: &str = "ucgid";
/// 郡 FIPS コードの列（人種エンドポイント）
pub const COUNTY_COLUMN: &str = "county";
/// 年の列
pub const YEAR_COLUMN: &str = "year";

pub const MALE: &str = "Male";
pub const FEMALE: &str = "Female";
pub const AMERICAN_INDIAN: &str = "American Indian";
pub const PACIFIC_ISLANDER: &str = "Pacific Islander";

/// 性別表 (B01001) の変数コード → ラベル
pub const SEX_VARIABLES: [(&str, &str); 2] = [("B01001_002E", MALE), ("B01001_026E", FEMALE)];

/// 人種・民族表 (B03002) の変数コード → ラベル
///
/// 順序がそのままリクエストの列順になる
pub const RACE_VARIABLES: [(&str, &str); 8] = [
    ("B03002_001E", "Total"),
    ("B03002_003E", "White"),
    ("B03002_004E", "Black"),
    ("B03002_006E", "Asian"),
    ("B03002_007E", PACIFIC_ISLANDER),
    ("B03002_005E", AMERICAN_INDIAN),
    ("B03002_009E", "Bi-Racial"),
    ("B03002_012E", "Hispanic"),
];

/// 性別表のクエリ（州内の全ての郡）
pub fn sex_query(state_fips: &str) -> String {
    format!("group(B01001)&ucgid=pseudo(0400000US{state_fips}$0500000)")
}

/// 人種・民族表のクエリ（州内の全ての郡）
pub fn race_query(state_fips: &str) -> String {
    let codes = RACE_VARIABLES
        .iter()
        .map(|(code, _)| *code)
        .collect::<Vec<_>>()
        .join(",");
    format!("{codes}&for=county:*&in=state:{state_fips}")
}

//! # Reshape Service
//!
//! ワイド形式の Census 表をロング形式の人口レコードに変換する

use crate::domain::entities::census_table::{parse_count, CensusTable, TableError};
use crate::domain::entities::census_variables::{
    AMERICAN_INDIAN, COUNTY_COLUMN, FEMALE, MALE, NAME_COLUMN, PACIFIC_ISLANDER, RACE_VARIABLES,
    SEX_VARIABLES, UCGID_COLUMN, YEAR_COLUMN,
};
use crate::domain::entities::population_record::PopulationRecord;
use crate::domain::services::geography::MergeTemplate;

const COUNTY_NAME: &str = "county_name";

/// 表変換サービス
pub struct ReshapeService;

impl ReshapeService {
    /// 性別表をロング形式に変換
    ///
    /// 男性・女性の2列を行に展開する（変数ごとに全行、Male が先）。
    /// 出力行数は入力行数のちょうど2倍になる。
    ///
    /// # Errors
    ///
    /// 必要な列がない場合、または値が整数でない場合にエラーを返す
    pub fn reshape_sex(table: &CensusTable) -> Result<Vec<PopulationRecord>, TableError> {
        let mut mapping: Vec<(&str, &str)> = SEX_VARIABLES.to_vec();
        mapping.push((NAME_COLUMN, COUNTY_NAME));

        let table = table
            .clone()
            .rename(&mapping)
            .select(&[COUNTY_NAME, UCGID_COLUMN, YEAR_COLUMN, MALE, FEMALE])?;

        let mut records = Vec::with_capacity(table.len() * 2);
        for label in [MALE, FEMALE] {
            let index = table.column_index(label)?;
            for row in table.rows() {
                records.push(PopulationRecord::new(
                    Some(row[0].clone()),
                    Some(row[1].clone()),
                    parse_year(&row[2])?,
                    label,
                    parse_count(label, &row[index])?,
                ));
            }
        }

        Ok(records)
    }

    /// 人種・民族表をロング形式に変換
    ///
    /// ラベル列のみを展開し（`state` などの地理列は対象外）、
    /// 郡 FIPS コードでマージテンプレートと左結合して郡名と識別子を付与する。
    /// 一致しない行は郡名・識別子が `None` のまま残る。
    pub fn reshape_race(
        table: &CensusTable,
        template: &MergeTemplate,
    ) -> Result<Vec<PopulationRecord>, TableError> {
        let table = Self::fold_pacific_islander_into_american_indian(
            table.clone().rename(&RACE_VARIABLES),
        )?;

        let county_index = table.column_index(COUNTY_COLUMN)?;
        let year_index = table.column_index(YEAR_COLUMN)?;
        let labels: Vec<(usize, String)> = table
            .columns()
            .iter()
            .enumerate()
            .filter(|(_, column)| RACE_VARIABLES.iter().any(|(_, label)| label == column))
            .map(|(index, column)| (index, column.clone()))
            .collect();

        let mut records = Vec::with_capacity(table.len() * labels.len());
        for (index, label) in &labels {
            for row in table.rows() {
                let year = parse_year(&row[year_index])?;
                let value = parse_count(label, &row[*index])?;

                let mut matched = false;
                for entry in template.lookup(&row[county_index]) {
                    matched = true;
                    records.push(PopulationRecord::new(
                        Some(entry.county_name.clone()),
                        Some(entry.ucgid.clone()),
                        year,
                        label.as_str(),
                        value,
                    ));
                }
                if !matched {
                    records.push(PopulationRecord::new(None, None, year, label.as_str(), value));
                }
            }
        }

        Ok(records)
    }

    /// Pacific Islander を American Indian に合算する
    ///
    /// 両カテゴリとも標本が小さいため、`American Indian` ラベルの下に
    /// 整数和として統合し、`Pacific Islander` 列を削除する。
    pub fn fold_pacific_islander_into_american_indian(
        table: CensusTable,
    ) -> Result<CensusTable, TableError> {
        let sums = {
            let american_indian = table.column(AMERICAN_INDIAN)?;
            let pacific_islander = table.column(PACIFIC_ISLANDER)?;
            american_indian
                .iter()
                .zip(pacific_islander.iter())
                .map(|(ai, pi)| {
                    let total =
                        parse_count(AMERICAN_INDIAN, ai)? + parse_count(PACIFIC_ISLANDER, pi)?;
                    Ok(total.to_string())
                })
                .collect::<Result<Vec<_>, TableError>>()?
        };

        let mut table = table;
        table.replace_column(AMERICAN_INDIAN, sums)?;
        table.drop_column(PACIFIC_ISLANDER)
    }
}

fn parse_year(value: &str) -> Result<i32, TableError> {
    value
        .parse::<i32>()
        .map_err(|_| TableError::InvalidYear(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    fn sex_table() -> CensusTable {
        CensusTable::new(
            strings(&["GEO_ID", "NAME", "B01001_002E", "B01001_026E", "ucgid", "year"]),
            vec![
                strings(&["x", "Adams County, Illinois", "32000", "33000", "0500000US17001", "2009"]),
                strings(&["x", "Cook County, Illinois", "2500000", "2600000", "0500000US17031", "2009"]),
                strings(&["x", "Adams County, Illinois", "32100", "33100", "0500000US17001", "2010"]),
            ],
        )
        .unwrap()
    }

    fn race_table() -> CensusTable {
        CensusTable::new(
            strings(&[
                "B03002_001E",
                "B03002_003E",
                "B03002_004E",
                "B03002_006E",
                "B03002_007E",
                "B03002_005E",
                "B03002_009E",
                "B03002_012E",
                "state",
                "county",
                "year",
            ]),
            vec![
                strings(&["100", "60", "20", "5", "2", "3", "4", "6", "17", "001", "2009"]),
                strings(&["200", "120", "40", "10", "1", "9", "8", "12", "17", "031", "2009"]),
            ],
        )
        .unwrap()
    }

    fn template() -> MergeTemplate {
        let sex = ReshapeService::reshape_sex(&sex_table()).unwrap();
        MergeTemplate::from_records(&sex, "17")
    }

    #[test]
    fn test_reshape_sex_doubles_rows() {
        let table = sex_table();

        let records = ReshapeService::reshape_sex(&table).unwrap();

        assert_eq!(records.len(), table.len() * 2);
        assert!(records[..3].iter().all(|r| r.variable == "Male"));
        assert!(records[3..].iter().all(|r| r.variable == "Female"));
    }

    #[test]
    fn test_reshape_sex_values_match_wide_cells() {
        let records = ReshapeService::reshape_sex(&sex_table()).unwrap();

        let cook_female = records
            .iter()
            .find(|r| r.variable == "Female" && r.ucgid.as_deref() == Some("0500000US17031"))
            .unwrap();
        assert_eq!(cook_female.value, 2_600_000);
        assert_eq!(cook_female.county_name.as_deref(), Some("Cook County, Illinois"));
        assert_eq!(cook_female.year, 2009);

        let adams_male_2010 = records
            .iter()
            .find(|r| r.variable == "Male" && r.year == 2010)
            .unwrap();
        assert_eq!(adams_male_2010.value, 32_100);
    }

    #[test]
    fn test_reshape_sex_non_numeric() {
        let mut table = sex_table();
        table
            .replace_column("B01001_002E", strings(&["1", "", "3"]))
            .unwrap();

        let result = ReshapeService::reshape_sex(&table);

        assert_eq!(
            result.unwrap_err(),
            TableError::NonNumeric {
                column: "Male".into(),
                value: "".into()
            }
        );
    }

    #[test]
    fn test_reshape_sex_missing_column() {
        let table = sex_table().drop_column("ucgid").unwrap();
        let result = ReshapeService::reshape_sex(&table);
        assert_eq!(result.unwrap_err(), TableError::MissingColumn("ucgid".into()));
    }

    #[test]
    fn test_fold_pacific_islander() {
        let table = race_table().rename(&RACE_VARIABLES);

        let folded = ReshapeService::fold_pacific_islander_into_american_indian(table).unwrap();

        assert!(!folded.has_column("Pacific Islander"));
        assert_eq!(folded.column("American Indian").unwrap(), vec!["5", "10"]);
    }

    #[test]
    fn test_reshape_race_rows_and_labels() {
        let records = ReshapeService::reshape_race(&race_table(), &template()).unwrap();

        // 7 labels x 2 counties
        assert_eq!(records.len(), 14);
        assert!(records.iter().all(|r| r.variable != "Pacific Islander"));
        assert!(records.iter().all(|r| r.variable != "state"));

        let labels: Vec<&str> = records.iter().step_by(2).map(|r| r.variable.as_str()).collect();
        assert_eq!(
            labels,
            vec!["Total", "White", "Black", "Asian", "American Indian", "Bi-Racial", "Hispanic"]
        );
    }

    #[test]
    fn test_reshape_race_american_indian_sum() {
        let records = ReshapeService::reshape_race(&race_table(), &template()).unwrap();

        let cook = records
            .iter()
            .find(|r| r.variable == "American Indian" && r.ucgid.as_deref() == Some("0500000US17031"))
            .unwrap();
        assert_eq!(cook.value, 10);
        assert_eq!(cook.county_name.as_deref(), Some("Cook County, Illinois"));
    }

    #[test]
    fn test_reshape_race_unmatched_county() {
        let table = race_table();
        let empty = MergeTemplate::default();

        let records = ReshapeService::reshape_race(&table, &empty).unwrap();

        assert_eq!(records.len(), 14);
        assert!(records.iter().all(|r| r.county_name.is_none() && r.ucgid.is_none()));
    }
}

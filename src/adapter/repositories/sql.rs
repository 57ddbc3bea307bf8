//! SQL Statement Builders
//!
//! PostgreSQL / DuckDB 共通のSQL文

use crate::domain::entities::output_table::ColumnSpec;
use crate::domain::entities::table_name::TableName;

pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

pub fn create_table_sql(table: &TableName, columns: &[ColumnSpec]) -> String {
    let columns = columns
        .iter()
        .map(|c| format!("{} {}", quote_identifier(&c.name), c.sql_type.as_sql()))
        .collect::<Vec<_>>()
        .join(", ");
    format!("CREATE TABLE IF NOT EXISTS {} ({})", table.quoted(), columns)
}

pub fn truncate_sql(table: &TableName) -> String {
    format!("TRUNCATE TABLE {}", table.quoted())
}

/// Parameterized insert with `$1..$n` placeholders
pub fn insert_sql(table: &TableName, columns: &[String]) -> String {
    let names = columns
        .iter()
        .map(|c| quote_identifier(c))
        .collect::<Vec<_>>()
        .join(", ");
    let placeholders = (1..=columns.len())
        .map(|i| format!("${}", i))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        table.quoted(),
        names,
        placeholders
    )
}

//! DuckDB Sink Implementation
//!
//! PopulationSinkのDuckDB実装（ステージング表への一括追加 + INSERT ... SELECT）

use anyhow::{Context, Result};
use async_trait::async_trait;
use duckdb::types::{TimeUnit, ToSqlOutput, Value};
use duckdb::{appender_params_from_iter, Connection, ToSql};
use log::info;
use std::path::Path;
use std::sync::{Arc, Mutex};

use super::sql::{create_table_sql, quote_identifier, truncate_sql};
use crate::domain::entities::output_table::{CellValue, ColumnSpec, OutputTable};
use crate::domain::entities::table_name::TableName;
use crate::domain::repositories::population_sink::PopulationSink;

/// DuckDB sink over a single connection
pub struct DuckDbSink {
    conn: Arc<Mutex<Connection>>,
}

impl DuckDbSink {
    /// Open a database file at `path`, creating it (and its directory) if missing
    pub fn open(path: &str) -> Result<Self> {
        let expanded = shellexpand::tilde(path).to_string();
        if let Some(parent) = Path::new(&expanded).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory {}", parent.display()))?;
            }
        }

        let conn = Connection::open(&expanded)
            .with_context(|| format!("Failed to open DuckDB database {}", expanded))?;
        info!("Opened DuckDB database {}", expanded);
        Ok(Self::from_connection(conn))
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to open in-memory DuckDB")?;
        Ok(Self::from_connection(conn))
    }

    fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Run `f` against the connection on the blocking pool
    async fn with_connection<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = self.conn.clone();
        tokio::task::spawn_blocking(move || {
            let mut guard = conn
                .lock()
                .map_err(|_| anyhow::anyhow!("DuckDB connection lock poisoned"))?;
            f(&mut *guard)
        })
        .await
        .map_err(|e| anyhow::anyhow!("Failed to spawn blocking task: {}", e))?
    }
}

struct DuckCell<'a>(&'a CellValue);

impl ToSql for DuckCell<'_> {
    fn to_sql(&self) -> duckdb::Result<ToSqlOutput<'_>> {
        let value = match self.0 {
            CellValue::Integer(v) => Value::BigInt(*v),
            CellValue::Float(v) => Value::Double(*v),
            CellValue::Boolean(v) => Value::Boolean(*v),
            CellValue::Timestamp(v) => {
                Value::Timestamp(TimeUnit::Microsecond, v.and_utc().timestamp_micros())
            }
            CellValue::Text(v) => Value::Text(v.clone()),
            CellValue::Null => Value::Null,
        };
        Ok(ToSqlOutput::Owned(value))
    }
}

fn create_table(conn: &Connection, table: &TableName, columns: &[ColumnSpec]) -> Result<()> {
    conn.execute_batch(&create_table_sql(table, columns))
        .with_context(|| format!("Failed to create {}", table))
}

fn truncate(conn: &Connection, table: &TableName) -> Result<()> {
    conn.execute_batch(&truncate_sql(table))
        .with_context(|| format!("Failed to truncate {}", table))
}

/// Append rows into a staging table shaped like `table`, then move them
/// over with a single `INSERT ... SELECT`
fn load(conn: &Connection, table: &TableName, data: &OutputTable) -> Result<u64> {
    let staging = format!("{}__staging", table.base_name());

    conn.execute_batch(&format!(
        "CREATE OR REPLACE TABLE {} AS SELECT * FROM {} LIMIT 0",
        quote_identifier(&staging),
        table.quoted()
    ))
    .context("Failed to create staging table")?;

    {
        let mut appender = conn
            .appender(&staging)
            .context("Failed to open appender on staging table")?;
        for row in data.rows() {
            appender.append_row(appender_params_from_iter(row.iter().map(DuckCell)))?;
        }
        appender.flush()?;
    }

    let inserted = conn
        .execute(
            &format!(
                "INSERT INTO {} SELECT * FROM {}",
                table.quoted(),
                quote_identifier(&staging)
            ),
            [],
        )
        .with_context(|| format!("Failed to insert into {}", table))?;

    conn.execute_batch(&format!("DROP TABLE {}", quote_identifier(&staging)))?;
    Ok(inserted as u64)
}

#[async_trait]
impl PopulationSink for DuckDbSink {
    async fn ensure_schema(&self, table: &TableName, columns: &[ColumnSpec]) -> Result<()> {
        let table = table.clone();
        let columns = columns.to_vec();
        self.with_connection(move |conn| create_table(conn, &table, &columns))
            .await
    }

    async fn truncate(&self, table: &TableName) -> Result<()> {
        let table = table.clone();
        self.with_connection(move |conn| truncate(conn, &table)).await
    }

    async fn bulk_load(&self, table: &TableName, data: &OutputTable) -> Result<u64> {
        let table = table.clone();
        let data = data.clone();
        self.with_connection(move |conn| {
            let tx = conn.transaction()?;
            let inserted = load(&tx, &table, &data)?;
            tx.commit()?;
            Ok(inserted)
        })
        .await
    }

    async fn replace(&self, table: &TableName, data: &OutputTable) -> Result<u64> {
        let table = table.clone();
        let data = data.clone();
        let inserted = self
            .with_connection(move |conn| {
                let tx = conn.transaction()?;
                create_table(&tx, &table, &data.infer_schema())?;
                truncate(&tx, &table)?;
                let inserted = load(&tx, &table, &data)?;
                tx.commit()?;
                Ok(inserted)
            })
            .await?;

        info!("Committed {} rows", inserted);
        Ok(inserted)
    }
}

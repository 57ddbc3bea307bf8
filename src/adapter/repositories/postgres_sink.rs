//! PostgreSQL Sink Implementation
//!
//! PopulationSinkのPostgreSQL実装（1行ずつのパラメータ付きINSERT）

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::info;
use sqlx::postgres::{PgArguments, PgConnectOptions, PgConnection, PgPool, PgPoolOptions};
use sqlx::query::Query;
use sqlx::Postgres;

use super::sql::{create_table_sql, insert_sql, truncate_sql};
use crate::adapter::config::PostgresConfig;
use crate::domain::entities::output_table::{CellValue, ColumnSpec, OutputTable};
use crate::domain::entities::table_name::TableName;
use crate::domain::repositories::credential_provider::Credentials;
use crate::domain::repositories::population_sink::PopulationSink;

/// PostgreSQL sink backed by a single-connection pool
pub struct PostgresSink {
    pool: PgPool,
}

impl PostgresSink {
    /// Connect with host/port/dbname from config and the given credentials
    pub async fn connect(config: &PostgresConfig, credentials: &Credentials) -> Result<Self> {
        let mut options = PgConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .database(&config.dbname)
            .username(&credentials.username);
        if let Some(password) = &credentials.password {
            options = options.password(password);
        }

        let pool = PgPoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .with_context(|| {
                format!(
                    "Failed to connect to {}:{}/{}",
                    config.host, config.port, config.dbname
                )
            })?;

        info!(
            "Connected to PostgreSQL at {}:{}/{}",
            config.host, config.port, config.dbname
        );
        Ok(Self::from_pool(pool))
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn insert_rows(
        conn: &mut PgConnection,
        table: &TableName,
        data: &OutputTable,
    ) -> Result<u64> {
        let sql = insert_sql(table, data.columns());
        let mut inserted = 0;

        for (index, row) in data.rows().iter().enumerate() {
            let query = row
                .iter()
                .fold(sqlx::query(&sql), |query, cell| bind_cell(query, cell));
            query
                .execute(&mut *conn)
                .await
                .with_context(|| format!("Failed to insert row {} into {}", index, table))?;
            inserted += 1;
        }

        Ok(inserted)
    }
}

fn bind_cell<'q>(
    query: Query<'q, Postgres, PgArguments>,
    cell: &CellValue,
) -> Query<'q, Postgres, PgArguments> {
    match cell {
        CellValue::Integer(v) => query.bind(*v),
        CellValue::Float(v) => query.bind(*v),
        CellValue::Boolean(v) => query.bind(*v),
        CellValue::Timestamp(v) => query.bind(*v),
        CellValue::Text(v) => query.bind(v.clone()),
        CellValue::Null => query.bind(None::<String>),
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[async_trait]
impl PopulationSink for PostgresSink {
    async fn ensure_schema(&self, table: &TableName, columns: &[ColumnSpec]) -> Result<()> {
        sqlx::query(&create_table_sql(table, columns))
            .execute(&self.pool)
            .await
            .with_context(|| format!("Failed to create {}", table))?;
        Ok(())
    }

    async fn truncate(&self, table: &TableName) -> Result<()> {
        sqlx::query(&truncate_sql(table))
            .execute(&self.pool)
            .await
            .with_context(|| format!("Failed to truncate {}", table))?;
        Ok(())
    }

    async fn bulk_load(&self, table: &TableName, data: &OutputTable) -> Result<u64> {
        let mut tx = self.pool.begin().await.context("Failed to begin transaction")?;
        let inserted = Self::insert_rows(&mut tx, table, data).await?;
        tx.commit().await.context("Failed to commit load")?;
        Ok(inserted)
    }

    /// Create, truncate and insert in one transaction; a failure rolls
    /// back and leaves the previous contents in place.
    async fn replace(&self, table: &TableName, data: &OutputTable) -> Result<u64> {
        let mut tx = self.pool.begin().await.context("Failed to begin transaction")?;

        sqlx::query(&create_table_sql(table, &data.infer_schema()))
            .execute(&mut *tx)
            .await
            .with_context(|| format!("Failed to create {}", table))?;
        sqlx::query(&truncate_sql(table))
            .execute(&mut *tx)
            .await
            .with_context(|| format!("Failed to truncate {}", table))?;

        let inserted = Self::insert_rows(&mut tx, table, data).await?;

        tx.commit().await.context("Failed to commit load")?;
        info!("Committed {} rows into {}", inserted, table);
        Ok(inserted)
    }
}

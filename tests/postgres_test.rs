//! PostgreSQL Integration Tests
//!
//! 実際のデータベースが必要なため `#[ignore]`。
//! `DATABASE_URL=postgres://... cargo test -- --ignored` で実行する。

mod common;

use std::sync::Arc;

use census_loader::adapter::repositories::postgres_sink::PostgresSink;
use census_loader::application::dto::pipeline_config::PipelineConfig;
use census_loader::application::use_cases::build_population::BuildPopulationUseCase;
use census_loader::application::use_cases::load_population::LoadPopulationUseCase;
use census_loader::domain::entities::table_name::TableName;
use census_loader::domain::services::geography::GeoIdStyle;
use common::FixtureCensusRepository;
use sqlx::postgres::PgPoolOptions;

#[tokio::test]
#[ignore]
async fn test_postgres_load_twice_is_idempotent() {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&url)
        .await
        .unwrap();

    let config = PipelineConfig::new(
        "17".to_string(),
        2022,
        2023,
        TableName::parse("census_loader_it_population").unwrap(),
        GeoIdStyle::StateCounty,
    );
    let dataset = BuildPopulationUseCase::new(Arc::new(FixtureCensusRepository::default()))
        .execute(&config)
        .await
        .unwrap();

    let load = LoadPopulationUseCase::new(Arc::new(PostgresSink::from_pool(pool.clone())));
    load.execute(&config.table, &dataset.records).await.unwrap();
    load.execute(&config.table, &dataset.records).await.unwrap();

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM census_loader_it_population")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 36);

    sqlx::query("DROP TABLE census_loader_it_population")
        .execute(&pool)
        .await
        .unwrap();
}

#[tokio::test]
#[ignore]
async fn test_postgres_failed_load_rolls_back() {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&url)
        .await
        .unwrap();

    sqlx::query("DROP TABLE IF EXISTS census_loader_it_rollback")
        .execute(&pool)
        .await
        .unwrap();
    sqlx::query(
        "CREATE TABLE census_loader_it_rollback (county_name VARCHAR, ucgid VARCHAR, \
         year INTEGER, variable VARCHAR, value INTEGER CHECK (value < 1000000))",
    )
    .execute(&pool)
    .await
    .unwrap();
    sqlx::query(
        "INSERT INTO census_loader_it_rollback \
         VALUES ('Adams County, Illinois', '17001', 2019, 'Male', 32000)",
    )
    .execute(&pool)
    .await
    .unwrap();

    let config = PipelineConfig::new(
        "17".to_string(),
        2022,
        2022,
        TableName::parse("census_loader_it_rollback").unwrap(),
        GeoIdStyle::StateCounty,
    );
    // Cook County's counts exceed the CHECK bound
    let dataset = BuildPopulationUseCase::new(Arc::new(FixtureCensusRepository::default()))
        .execute(&config)
        .await
        .unwrap();

    let load = LoadPopulationUseCase::new(Arc::new(PostgresSink::from_pool(pool.clone())));
    let result = load.execute(&config.table, &dataset.records).await;
    assert!(result.is_err());

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM census_loader_it_rollback")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);

    sqlx::query("DROP TABLE census_loader_it_rollback")
        .execute(&pool)
        .await
        .unwrap();
}

//! Workflow Orchestration
//!
//! ワークフローのオーケストレーション

use anyhow::{bail, Result};
use chrono::Local;
use log::info;

use std::sync::Arc;

use crate::adapter::auth::{
    ChainedCredentialProvider, EnvCredentialProvider, PromptCredentialProvider,
};
use crate::adapter::config::{Config, PostgresConfig, SinkConfig};
use crate::adapter::repositories::csv_snapshot_repository::CsvSnapshotRepository;
use crate::adapter::repositories::duckdb_sink::DuckDbSink;
use crate::adapter::repositories::http_census_repository::HttpCensusRepository;
use crate::adapter::repositories::postgres_sink::PostgresSink;
use crate::application::dto::pipeline_config::PipelineConfig;
use crate::application::use_cases::build_population::BuildPopulationUseCase;
use crate::application::use_cases::export_snapshot::ExportSnapshotUseCase;
use crate::application::use_cases::load_population::LoadPopulationUseCase;
use crate::domain::entities::table_name::TableName;
use crate::domain::repositories::census_repository::CensusRepository;
use crate::domain::repositories::credential_provider::{CredentialProvider, Credentials};
use crate::domain::repositories::population_sink::PopulationSink;

use super::cli::Args;

/// Label shown when prompting for database credentials
const CREDENTIAL_PROMPT_LABEL: &str = "ccjda";

/// Population Load Workflow
pub struct PopulationLoadWorkflow<C: CensusRepository + ?Sized = HttpCensusRepository> {
    config: Config,
    build_use_case: BuildPopulationUseCase<C>,
}

impl PopulationLoadWorkflow<HttpCensusRepository> {
    /// Create a new workflow instance backed by the Census HTTP API
    pub fn new(config: Config) -> Result<Self> {
        let census_repo = Arc::new(HttpCensusRepository::from_config(&config.census)?);
        Ok(Self::with_census(config, census_repo))
    }
}

impl<C: CensusRepository + ?Sized> PopulationLoadWorkflow<C> {
    /// Create a workflow with an injected census repository
    pub fn with_census(config: Config, census_repository: Arc<C>) -> Self {
        Self {
            config,
            build_use_case: BuildPopulationUseCase::new(census_repository),
        }
    }

    /// Resolve the pipeline settings, applying CLI year overrides
    pub fn pipeline_config(&self, args: &Args) -> Result<PipelineConfig> {
        let census = &self.config.census;
        let table = TableName::parse(self.config.sink.table())?;

        Ok(PipelineConfig::new(
            census.state_fips.clone(),
            args.start_year.unwrap_or(census.start_year),
            args.end_year.unwrap_or(census.end_year),
            table,
            self.config.export.geo_id_style,
        ))
    }

    /// Execute the load workflow
    pub async fn execute(&self, args: Args) -> Result<()> {
        info!("Starting census population loader...");
        info!("Dry run: {}", args.dry_run);

        let pipeline = self.pipeline_config(&args)?;

        println!("✓ Using configuration:");
        println!(
            "  Census: {}/{}",
            self.config.census.base_url, self.config.census.dataset
        );
        println!("  State: {}", pipeline.state_fips);
        println!("  Years: {}-{}", pipeline.start_year, pipeline.end_year);
        match &self.config.sink {
            SinkConfig::Postgres(pg) => println!(
                "  Sink: PostgreSQL {}:{}/{} ({})",
                pg.host, pg.port, pg.dbname, pipeline.table
            ),
            SinkConfig::Duckdb(duck) => {
                println!("  Sink: DuckDB {} ({})", duck.path, pipeline.table)
            }
        }

        let dataset = self.build_use_case.execute(&pipeline).await?;
        println!(
            "✓ Built {} rows ({} sex, {} race/ethnicity, {} counties)",
            dataset.records.len(),
            dataset.sex_rows,
            dataset.race_rows,
            dataset.template_size
        );

        if self.config.export.enabled && !args.no_export {
            let snapshot_repo = Arc::new(CsvSnapshotRepository::new(
                &self.config.export.directory,
            ));
            let export_use_case = ExportSnapshotUseCase::new(snapshot_repo);
            let path = export_use_case
                .execute(
                    &dataset.records,
                    pipeline.export_style,
                    Local::now().naive_local(),
                )
                .await?;
            println!("✓ Wrote snapshot to {}", path.display());
        }

        if args.dry_run {
            println!("✓ Dry-run mode (not actually loading)");
            println!(
                "  Would load {} rows into {}",
                dataset.records.len(),
                pipeline.table
            );
            return Ok(());
        }

        let sink = self.open_sink().await?;
        let load_use_case = LoadPopulationUseCase::new(sink);
        let summary = load_use_case
            .execute(&pipeline.table, &dataset.records)
            .await?;

        println!(
            "✓ Loaded {} rows into {}",
            summary.rows_loaded, summary.table
        );
        println!("✓ Load complete!");

        Ok(())
    }

    async fn open_sink(&self) -> Result<Arc<dyn PopulationSink>> {
        match &self.config.sink {
            SinkConfig::Postgres(pg) => Ok(Arc::new(connect_postgres(pg).await?)),
            SinkConfig::Duckdb(duck) => Ok(Arc::new(DuckDbSink::open(&duck.path)?)),
        }
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
async fn connect_postgres(config: &PostgresConfig) -> Result<PostgresSink> {
    let provider = ChainedCredentialProvider::new(vec![
        Box::new(EnvCredentialProvider::new(
            &config.user_env,
            &config.password_env,
        )),
        Box::new(PromptCredentialProvider::stdio(CREDENTIAL_PROMPT_LABEL)),
    ]);

    let Some(credentials) = resolve_credentials(provider).await? else {
        bail!(
            "No database credentials: set {} / {} or enter them at the prompt",
            config.user_env,
            config.password_env
        );
    };

    PostgresSink::connect(config, &credentials).await
}

/// Ask `provider` on the blocking pool; the prompt reads stdin
async fn resolve_credentials<P>(provider: P) -> Result<Option<Credentials>>
where
    P: CredentialProvider + 'static,
{
    tokio::task::spawn_blocking(move || provider.credentials())
        .await
        .map_err(|e| anyhow::anyhow!("Failed to spawn blocking task: {}", e))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::census_repository::MockCensusRepository;
    use crate::domain::services::geography::GeoIdStyle;
    use clap::Parser;

    fn config(json: &str) -> Config {
        Config::from_json(json).unwrap()
    }

    fn workflow(json: &str) -> PopulationLoadWorkflow<MockCensusRepository> {
        PopulationLoadWorkflow::with_census(config(json), Arc::new(MockCensusRepository::new()))
    }

    #[test]
    fn test_pipeline_config_from_file() {
        let workflow = workflow(r#"{"sink": {"kind": "postgres"}}"#);
        let args = Args::parse_from(["census-loader"]);

        let pipeline = workflow.pipeline_config(&args).unwrap();

        assert_eq!(pipeline.state_fips, "17");
        assert_eq!(pipeline.years(), 2009..=2023);
        assert_eq!(pipeline.table.to_string(), "justice_counts.geoid_population");
        assert_eq!(pipeline.export_style, GeoIdStyle::StateCounty);
    }

    #[test]
    fn test_pipeline_config_year_overrides() {
        let workflow = workflow(r#"{"sink": {"kind": "duckdb", "path": "db.duckdb"}}"#);
        let args = Args::parse_from(["census-loader", "--start-year", "2021", "--end-year", "2022"]);

        let pipeline = workflow.pipeline_config(&args).unwrap();

        assert_eq!(pipeline.years(), 2021..=2022);
        assert_eq!(
            pipeline.table.to_string(),
            "cesnsus_illinois_county_population"
        );
    }

    #[test]
    fn test_pipeline_config_invalid_table() {
        let workflow = workflow(r#"{"sink": {"kind": "duckdb", "path": "db.duckdb", "table": "bad name;"}}"#);
        let args = Args::parse_from(["census-loader"]);

        assert!(workflow.pipeline_config(&args).is_err());
    }

    #[tokio::test]
    async fn test_execute_propagates_fetch_failure() {
        let mut census = MockCensusRepository::new();
        census
            .expect_fetch_year()
            .returning(|_, _| Err(anyhow::anyhow!("connection refused")));
        let workflow = PopulationLoadWorkflow::with_census(
            config(r#"{"sink": {"kind": "duckdb", "path": "db.duckdb"}}"#),
            Arc::new(census),
        );

        let err = workflow
            .execute(Args::parse_from(["census-loader", "--dry-run"]))
            .await
            .unwrap_err();

        assert!(format!("{:#}", err).contains("connection refused"));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_resolve_credentials_from_prompt() {
        let input = std::io::Cursor::new(b"analyst\nhunter2\n".to_vec());
        let provider = ChainedCredentialProvider::new(vec![
            Box::new(EnvCredentialProvider::with_lookup("U", "P", |_| None)),
            Box::new(PromptCredentialProvider::new("ccjda", input, Vec::new())),
        ]);

        let creds = resolve_credentials(provider).await.unwrap().unwrap();

        assert_eq!(creds.username, "analyst");
        assert_eq!(creds.password.as_deref(), Some("hunter2"));
    }

    #[tokio::test]
    async fn test_resolve_credentials_prompt_error() {
        let input = std::io::Cursor::new(b"\n".to_vec());
        let provider = PromptCredentialProvider::new("ccjda", input, Vec::new());

        let err = resolve_credentials(provider).await.unwrap_err();

        assert!(err.to_string().contains("No username entered"));
    }
}

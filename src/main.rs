//! Census Loader - ACS5 County Population Loader
//!
//! Census API の郡別人口データを PostgreSQL / DuckDB に投入

// coverage_nightly cfg が設定されている場合のみ coverage_attribute を有効化
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use anyhow::Result;
use clap::Parser;

use census_loader::adapter::config::Config;
use census_loader::driver::{Args, PopulationLoadWorkflow};

#[cfg_attr(coverage_nightly, coverage(off))]
#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();

    // Load configuration
    let config = Config::load(&args.config)?;

    // Create workflow with injected dependencies
    let workflow = PopulationLoadWorkflow::new(config)?;

    workflow.execute(args).await
}

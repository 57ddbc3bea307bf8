//! CLI Argument Parsing
//!
//! CLIの引数解析

use clap::Parser;

/// Census の郡別人口データをデータベースに投入するCLI
#[derive(Parser, Debug, Clone)]
#[command(name = "census-loader")]
#[command(about = "Load ACS5 county population tables into PostgreSQL or DuckDB", long_about = None)]
pub struct Args {
    /// Dry run mode - fetch and transform, but don't load
    #[arg(long)]
    pub dry_run: bool,

    /// Skip the CSV snapshot even when enabled in the config
    #[arg(long)]
    pub no_export: bool,

    /// First year to fetch (overrides config)
    #[arg(long)]
    pub start_year: Option<i32>,

    /// Last year to fetch (overrides config)
    #[arg(long)]
    pub end_year: Option<i32>,

    /// Config file path
    #[arg(short, long, default_value = "./census-loader.json")]
    pub config: String,
}

pub mod backend;
pub mod catalog;
pub mod env_file;

#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "food-seed")]
#[command(about = "Seed the food-ordering backend with categories, customizations and menu items")]
pub struct CliConfig {
    /// Base env file (endpoint, project id, collection ids)
    #[arg(long, default_value = ".env")]
    pub env_file: PathBuf,

    /// Secret env file holding APPWRITE_API_KEY
    #[arg(long, default_value = ".env.seed")]
    pub secret_file: PathBuf,

    /// TOML catalog to import instead of the built-in one
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Validate and print the plan without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Log per-stage timings and memory
    #[arg(long)]
    pub monitor: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

use clap::Parser;
use food_ordering::utils::logger;
use food_ordering::{AppwriteClient, BackendConfig, CliConfig, EnvVars, SeedCatalog, Seeder};
use std::time::Duration;

const REQUEST_TIMEOUT_SECS: u64 = 30;

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    if config.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting food-seed");
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = run(config).await {
        tracing::error!(
            "❌ Seed failed: {} (Category: {:?})",
            e,
            e.category()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌  {}", e.user_friendly_message());
        eprintln!("💡  {}", e.recovery_suggestion());
        std::process::exit(1);
    }
}

async fn run(config: CliConfig) -> food_ordering::Result<()> {
    let mut env = EnvVars::from_process_env();
    env.load_file(&config.env_file, true)?;
    env.load_file(&config.secret_file, true)?;

    let backend = BackendConfig::from_env(&env)?;
    tracing::info!("✅ Configuration loaded and validated");
    tracing::debug!("Backend config: {:?}", backend);

    let catalog = match &config.catalog {
        Some(path) => {
            tracing::info!("📁 Loading catalog from: {}", path.display());
            SeedCatalog::from_file(path, &env)?
        }
        None => SeedCatalog::builtin()?,
    };

    if config.dry_run {
        tracing::info!("🔍 DRY RUN MODE - nothing will be written");
        print_plan(&backend, &catalog);
        return Ok(());
    }

    if config.monitor {
        tracing::info!("🔍 Stage monitoring enabled");
    }

    let collections = backend.collections.clone();
    let store = AppwriteClient::with_timeout(backend, Duration::from_secs(REQUEST_TIMEOUT_SECS))?;
    let seeder = Seeder::new_with_monitoring(store, collections, config.monitor);
    let report = seeder.run(&catalog).await?;

    tracing::info!(
        "Seeded {} categories, {} customizations, {} menu items, {} links",
        report.categories,
        report.customizations,
        report.menu_items,
        report.links
    );
    Ok(())
}

fn print_plan(backend: &BackendConfig, catalog: &SeedCatalog) {
    println!("📋 Seed Plan:");
    println!("  Endpoint: {}", backend.endpoint);
    println!("  Database: {}", backend.database_id);
    println!();
    println!(
        "  {:<22} {:>4} -> {}",
        "categories",
        catalog.categories.len(),
        backend.collections.categories
    );
    println!(
        "  {:<22} {:>4} -> {}",
        "customizations",
        catalog.customizations.len(),
        backend.collections.customizations
    );
    println!(
        "  {:<22} {:>4} -> {}",
        "menu items",
        catalog.menu.len(),
        backend.collections.menu
    );
    println!(
        "  {:<22} {:>4} -> {}",
        "menu customizations",
        catalog.link_count(),
        backend.collections.menu_customizations
    );
    println!();
    println!("  Total documents: {}", catalog.document_count());
    println!("⚠️  Running the seed again creates duplicate records.");
}

//! opcat - operator catalog loader.

mod config;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::{Args, Command};
use opcat_core::{CatalogLoader, DbConfig, FamilyManifest, OperatorReport, PgExecutor, SyncConfig};

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize tracing
    let log_filter = args.log_level.clone();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    format!("opcat={},opcat_core={}", log_filter, log_filter).into()
                }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match run(args).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            tracing::error!(error = %e, "catalog load aborted");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Returns whether every batch succeeded.
async fn run(args: Args) -> Result<bool, Box<dyn std::error::Error>> {
    let sync = SyncConfig::from(&args);
    let db = DbConfig::from(&args);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        operators_root = %sync.operators_root.display(),
        families = %sync.families_path.display(),
        db = ?db,
        "configuration loaded"
    );

    let families = FamilyManifest::load(&sync.families_path)?;
    let loader = CatalogLoader::new(sync, families, PgExecutor::from_config(&db));

    let ok = match args.command {
        Command::Reset => loader.delete_catalog_postgres().await == 0,
        Command::Families => loader.populate_catalog_families().await == 0,
        Command::Load { operators } => {
            let mut reports = Vec::with_capacity(operators.len());
            for operator in &operators {
                reports.push(loader.process_operator_catalog(operator).await);
            }
            summarize(&reports)
        }
        Command::LoadAll => summarize(&loader.process_all().await?),
        Command::Sync => {
            let reset_ok = loader.delete_catalog_postgres().await == 0;
            let families_ok = loader.populate_catalog_families().await == 0;
            let reports = loader.process_all().await?;
            summarize(&reports) && reset_ok && families_ok
        }
        Command::Render { operator } => {
            print!("{}", loader.render_operator(&operator));
            true
        }
    };

    Ok(ok)
}

fn summarize(reports: &[OperatorReport]) -> bool {
    let loaded: usize = reports.iter().map(|r| r.loaded.len()).sum();
    let failed: usize = reports.iter().map(|r| r.failed.len()).sum();
    let skipped: usize = reports.iter().map(|r| r.skipped_files.len()).sum();
    let warnings: usize = reports.iter().map(|r| r.warnings).sum();

    tracing::info!(
        operators = reports.len(),
        loaded,
        failed,
        skipped,
        warnings,
        "catalog load finished"
    );

    reports.iter().all(OperatorReport::is_success)
}

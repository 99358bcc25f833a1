use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use agency_detector::input::read_url_file;
use agency_detector::report::write_report;
use agency_detector::{
    BatchScanner, ConfigManager, ExportFormat, RegistryLoader, SignatureRegistry,
    DEFAULT_HTTP_TIMEOUT,
};

#[derive(Parser)]
#[command(
    name = "agency-detector",
    about = "Detect which marketing agency built a law-firm website",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a file of URLs (.csv or one URL per line)
    Scan {
        /// Input file
        input: PathBuf,

        /// Write the report to a file instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Report format (csv, json)
        #[arg(long, short = 'f', default_value = "csv")]
        format: String,

        /// JSON signature registry replacing the builtin vendor list
        #[arg(long)]
        signatures: Option<PathBuf>,

        /// Per-request timeout in seconds
        #[arg(long, default_value_t = DEFAULT_HTTP_TIMEOUT)]
        timeout: u64,

        /// Number of sites fetched at the same time
        #[arg(long, default_value_t = 1)]
        concurrency: usize,

        /// Enable debug logging
        #[arg(long, short = 'v')]
        verbose: bool,
    },

    /// Print the vendor signature registry
    Vendors {
        /// JSON signature registry replacing the builtin vendor list
        #[arg(long)]
        signatures: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Scan {
            input,
            output,
            format,
            signatures,
            timeout,
            concurrency,
            verbose,
        } => {
            init_logging(verbose);
            cmd_scan(input, output, format, signatures, timeout, concurrency).await
        }
        Commands::Vendors { signatures } => {
            init_logging(false);
            cmd_vendors(signatures).await
        }
    }
}

/// 日志输出到 stderr，RUST_LOG 优先
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn load_registry(path: Option<PathBuf>) -> Result<Arc<SignatureRegistry>> {
    match path {
        Some(path) => {
            let registry = RegistryLoader::from_file(&path)
                .await
                .with_context(|| format!("failed to load signatures from {}", path.display()))?;
            Ok(Arc::new(registry))
        }
        None => Ok(SignatureRegistry::builtin()),
    }
}

async fn cmd_scan(
    input: PathBuf,
    output: Option<PathBuf>,
    format_str: String,
    signatures: Option<PathBuf>,
    timeout: u64,
    concurrency: usize,
) -> Result<()> {
    let Some(format) = ExportFormat::from_str_lenient(&format_str) else {
        bail!("unknown format '{}', expected csv or json", format_str);
    };

    let registry = load_registry(signatures).await?;
    let urls = read_url_file(&input)
        .await
        .with_context(|| format!("failed to read URLs from {}", input.display()))?;
    info!("Loaded {} URLs from {}", urls.len(), input.display());

    let config = ConfigManager::custom()
        .http_timeout(timeout)
        .concurrency(concurrency)
        .build();
    let scanner = BatchScanner::from_config(&config, registry)?;

    let progress = |completed: usize, total: usize| info!("Scanning… {}/{}", completed, total);
    let report = scanner.scan(&urls, &progress).await;

    match output {
        Some(path) => {
            let file = std::fs::File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            write_report(&report, format, file)?;
            info!("Report written to {}", path.display());
        }
        None => write_report(&report, format, std::io::stdout().lock())?,
    }

    let summary = report.summary();
    info!(
        "Done: {} URLs, {} detected, {} none, {} errors",
        summary.total_urls, summary.detected_urls, summary.no_match_urls, summary.error_urls
    );
    Ok(())
}

async fn cmd_vendors(signatures: Option<PathBuf>) -> Result<()> {
    let registry = load_registry(signatures).await?;
    for entry in registry.entries() {
        println!("{}: {}", entry.vendor_name, entry.signatures.join(", "));
    }
    Ok(())
}

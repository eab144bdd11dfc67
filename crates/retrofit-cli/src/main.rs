//! retrofit - find deprecated React APIs and rewrite the safe ones
//!
//! # Usage
//!
//! ```bash
//! # Scan ./src, print issues and fix previews, apply high-confidence fixes
//! retrofit
//!
//! # Preview only
//! retrofit "app/**/*.{tsx,jsx}" --dry-run
//!
//! # Machine-readable output
//! retrofit src --format json --dry-run
//! ```

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use retrofit_analysis::fixes::{FixApplier, FixGenerator};
use retrofit_analysis::reporters::console::ConsoleReporter;
use retrofit_analysis::reporters::json::JsonReporter;
use retrofit_analysis::{Confidence, Detector, Reporter, RuleCatalog, RunSummary, TreeSitterProvider};
use retrofit_core::config::{CliOverrides, RetrofitConfig};
use retrofit_core::tracing::init_tracing;
use retrofit_core::RetrofitErrorCode;

const DEFAULT_PATTERN: &str = "./src/**/*.{tsx,jsx,ts,js}";

#[derive(Parser)]
#[command(name = "retrofit")]
#[command(version)]
#[command(about = "Find deprecated React APIs and fix the safe ones", long_about = None)]
struct Cli {
    /// File, directory or glob to scan
    #[arg(default_value = DEFAULT_PATTERN)]
    pattern: String,

    /// Report fixes without modifying any file
    #[arg(long)]
    dry_run: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "console")]
    format: OutputFormat,

    /// Config file to use instead of the layered lookup
    #[arg(long)]
    config: Option<PathBuf>,

    /// Rule catalog JSON replacing the built-in one
    #[arg(long)]
    catalog: Option<String>,

    /// Disable ANSI colors in console output
    #[arg(long)]
    no_color: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Console,
    Json,
}

fn main() {
    init_tracing();
    process::exit(run(&Cli::parse()));
}

fn run(cli: &Cli) -> i32 {
    let config = match load_config(cli) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("retrofit: {message}");
            return 1;
        }
    };
    let dry_run = cli.dry_run || config.fix.effective_dry_run();

    let catalog = match config.catalog.path.as_deref() {
        Some(path) => RuleCatalog::load_from_file(path.as_ref()),
        None => RuleCatalog::load_default(),
    };
    let catalog = match catalog {
        Ok(catalog) => catalog,
        Err(e) => {
            eprintln!("retrofit: {}", e.coded_string());
            return 1;
        }
    };
    tracing::debug!(rules = catalog.len(), "catalog loaded");

    let provider = TreeSitterProvider::new(config.scan.clone());
    let detector = Detector::with_provider(catalog, provider.clone());
    let detection = match detector.detect(&cli.pattern) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("retrofit: {}", e.coded_string());
            return 1;
        }
    };

    let generated = FixGenerator::with_provider(provider.clone()).generate(&detection.issues);
    let min_confidence = config
        .fix
        .effective_min_confidence()
        .parse::<Confidence>()
        .unwrap_or(Confidence::High);
    let mut summary = RunSummary::new(&cli.pattern, dry_run, detection, generated.data, &generated.errors)
        .with_min_confidence(min_confidence);

    let mut exit_code = 0;
    if !dry_run {
        let report = FixApplier::with_provider(provider).apply(&summary.fixes);
        if !report.is_clean() {
            exit_code = 1;
        }
        summary = summary.with_apply(&report);
    }

    let reporter: Box<dyn Reporter> = match cli.format {
        OutputFormat::Console => Box::new(ConsoleReporter::new(
            !cli.no_color && std::io::stdout().is_terminal(),
        )),
        OutputFormat::Json => Box::new(JsonReporter),
    };
    match reporter.generate(&summary) {
        Ok(output) => println!("{output}"),
        Err(message) => {
            eprintln!("retrofit: {message}");
            return 1;
        }
    }
    exit_code
}

fn load_config(cli: &Cli) -> Result<RetrofitConfig, String> {
    let mut config = match &cli.config {
        Some(path) => RetrofitConfig::load_file(path).map_err(|e| e.coded_string())?,
        None => {
            let overrides = CliOverrides {
                dry_run: cli.dry_run.then_some(true),
                max_file_size: None,
                catalog_path: cli.catalog.clone(),
            };
            let root = std::env::current_dir().map_err(|e| e.to_string())?;
            RetrofitConfig::load(&root, Some(&overrides)).map_err(|e| e.coded_string())?
        }
    };
    if let Some(catalog) = &cli.catalog {
        config.catalog.path = Some(catalog.clone());
    }
    Ok(config)
}

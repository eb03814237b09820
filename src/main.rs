//! CLI entry point for the student performance reporter.
//!
//! Reads one or more CSV files, runs the requested report over their
//! records and prints the result to stdout.

use anyhow::Result;
use clap::{CommandFactory, FromArgMatches, Parser};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use student_reports::error::{ErrorClass, ReportError};
use student_reports::output::{NO_RECORDS_MESSAGE, OutputFormat, write_report};
use student_reports::reader::read_csv_files;
use student_reports::reports::ReportRegistry;
use tracing::level_filters::LevelFilter;
use tracing::{debug, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "student_reports")]
#[command(about = "Анализ успеваемости студентов", long_about = None)]
struct Cli {
    /// CSV files to read, in order
    #[arg(long, required = true, num_args = 1.., value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Report to generate
    #[arg(long, value_name = "NAME")]
    report: String,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let _log_guard = init_tracing();

    let registry = ReportRegistry::with_builtin_reports();
    let cli = parse_cli(&registry);

    match run(&cli, &registry) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let class = e
                .downcast_ref::<ReportError>()
                .map_or(ErrorClass::Processing, ReportError::class);
            debug!(error = %e, ?class, "Run failed");
            eprintln!("{}{e:#}", class.prefix());
            ExitCode::FAILURE
        }
    }
}

/// Parses arguments, listing the registered report names in `--help`.
fn parse_cli(registry: &ReportRegistry) -> Cli {
    let reports = registry.names().join(", ");
    let matches = Cli::command()
        .mut_arg("report", |arg| {
            arg.help(format!("Report to generate (available: {reports})"))
        })
        .get_matches();

    Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit())
}

#[tracing::instrument(skip_all, fields(report = %cli.report, files = cli.files.len()))]
fn run(cli: &Cli, registry: &ReportRegistry) -> Result<()> {
    let report = registry.resolve(&cli.report)?;

    let records = read_csv_files(&cli.files)?;
    if records.is_empty() {
        info!("No records in input");
        println!("{NO_RECORDS_MESSAGE}");
        return Ok(());
    }

    let table = report.generate(&records)?;
    info!(rows = table.rows.len(), "Report generated");

    let stdout = std::io::stdout();
    write_report(&mut stdout.lock(), &table, cli.format)?;

    Ok(())
}

/// Logging setup: stderr for humans, plus a JSON rolling log file when
/// `LOG_FILE_PATH` is set. The returned guard flushes the file on drop.
fn init_tracing() -> Option<WorkerGuard> {
    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr)
        .with_filter(env_filter("RUST_LOG", LevelFilter::WARN));

    let (json_layer, guard) = match std::env::var("LOG_FILE_PATH") {
        Ok(log_file_path) => {
            let log_dir = Path::new(&log_file_path)
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(Path::new("logs"));
            let log_file_name = Path::new(&log_file_path)
                .file_name()
                .unwrap_or(OsStr::new("student_reports.log"));

            let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
            let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

            let layer = fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_list(true)
                .with_writer(non_blocking_file)
                .with_filter(env_filter("RUST_LOG_JSON", LevelFilter::DEBUG));
            (Some(layer), Some(guard))
        }
        Err(_) => (None, None),
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    guard
}

fn env_filter(var: &str, default: LevelFilter) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(default.into())
        .with_env_var(var)
        .from_env_lossy()
}

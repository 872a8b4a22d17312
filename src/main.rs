use analytics::report;
use analytics::{EngineSettings, compute_group_summaries, summarize_weekday, sweep_all_weekdays};
use anyhow::Context;
use clap::{Parser, Subcommand};
use comfy_table::Table;
use configuration::Config;
use core_types::Weekday;
use exporter::Sheet;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// The main entry point for the opentime reporting application.
fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Parse command-line arguments and load the configuration
    let cli = Cli::parse();
    let config = configuration::load_config()?;

    // Execute the appropriate command
    match cli.command {
        Commands::Report(args) => handle_report(args, config),
        Commands::Weekday(args) => handle_weekday(args, config),
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Per-open-time trading performance reports from CSV trade logs.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process every trade log in the data directory and export the
    /// summary workbooks.
    Report(ReportArgs),

    /// Print one weekday's open-time summary for a single trade log.
    Weekday(WeekdayArgs),
}

#[derive(Parser)]
struct ReportArgs {
    /// Directory containing the `.csv` trade logs (overrides the config).
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Directory the workbooks are written into (overrides the config).
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

#[derive(Parser)]
struct WeekdayArgs {
    /// The trade log to analyze.
    #[arg(long)]
    file: PathBuf,

    /// Weekday to filter on: "monday".."sunday" or 0-6 (0=Monday).
    #[arg(long)]
    day: String,
}

// ==============================================================================
// Report Command Logic
// ==============================================================================

/// Handles the full batch run: one summary sheet and one weekday sheet per
/// input file, collected into the two output workbooks.
fn handle_report(args: ReportArgs, config: Config) -> anyhow::Result<()> {
    let data_dir = args
        .data_dir
        .unwrap_or_else(|| PathBuf::from(&config.report.data_dir));
    let output_dir = args
        .output_dir
        .unwrap_or_else(|| PathBuf::from(&config.report.output_dir));
    let settings = engine_settings(&config);

    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("failed to create output directory {}", output_dir.display()))?;

    let files = ingest::discover_trade_logs(&data_dir)?;
    if files.is_empty() {
        info!(dir = %data_dir.display(), "no trade logs found, nothing to do");
        return Ok(());
    }

    // Set up the progress bar
    let progress_bar = ProgressBar::new(files.len() as u64);
    progress_bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let mut summary_sheets = Vec::new();
    let mut weekday_sheets = Vec::new();

    for path in &files {
        let name = sheet_name(path);
        progress_bar.set_message(format!("Processing {name}..."));

        // A broken file is logged and skipped; it never aborts the batch.
        match process_file(path, &settings) {
            Ok((summary_rows, weekday_rows)) => {
                summary_sheets.push(Sheet {
                    name: name.clone(),
                    headers: report::SUMMARY_HEADERS.map(String::from).to_vec(),
                    rows: summary_rows,
                });
                weekday_sheets.push(Sheet {
                    name,
                    headers: report::WEEKDAY_HEADERS.map(String::from).to_vec(),
                    rows: weekday_rows,
                });
            }
            Err(e) => error!(file = %path.display(), cause = %e, "skipping trade log"),
        }
        progress_bar.inc(1);
    }
    progress_bar.finish_with_message("Reports computed");

    let summary_path = output_dir.join("summary_all.xlsx");
    exporter::write_workbook(&summary_path, &summary_sheets)?;
    let weekday_path = output_dir.join("summary_all_days.xlsx");
    exporter::write_workbook(&weekday_path, &weekday_sheets)?;

    info!(
        summary = %summary_path.display(),
        weekdays = %weekday_path.display(),
        "summary workbooks saved"
    );
    Ok(())
}

/// Loads, normalizes and analyzes one trade log, returning the formatted
/// rows of its summary sheet and its weekday sheet.
fn process_file(
    path: &Path,
    settings: &EngineSettings,
) -> anyhow::Result<(Vec<Vec<String>>, Vec<Vec<String>>)> {
    let records = ingest::load_trade_log(path)?;
    let trades = normalizer::normalize_all(&records);

    let summary_rows = compute_group_summaries(&trades, settings)
        .iter()
        .map(report::summary_row)
        .collect();
    let weekday_rows = sweep_all_weekdays(&trades, settings)
        .iter()
        .map(report::weekday_row)
        .collect();
    Ok((summary_rows, weekday_rows))
}

// ==============================================================================
// Weekday Command Logic
// ==============================================================================

/// Prints a single weekday's open-time summary as a terminal table.
fn handle_weekday(args: WeekdayArgs, config: Config) -> anyhow::Result<()> {
    let weekday: Weekday = args.day.parse()?;

    let records = ingest::load_trade_log(&args.file)?;
    let trades = normalizer::normalize_all(&records);
    let summaries = summarize_weekday(&trades, weekday, &engine_settings(&config));

    if summaries.is_empty() {
        info!(weekday = %weekday, file = %args.file.display(), "no trades on that weekday");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(report::SUMMARY_HEADERS);
    for summary in &summaries {
        table.add_row(report::summary_row(summary));
    }

    println!("{weekday} open-time summary for {}", args.file.display());
    println!("{table}");
    Ok(())
}

fn engine_settings(config: &Config) -> EngineSettings {
    EngineSettings {
        starting_capital: config.metrics.starting_capital,
        sorted_drawdown: config.metrics.sorted_drawdown,
    }
}

/// Sheet name for a trade log: the file stem, truncated by the exporter.
fn sheet_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

// SocialGaze - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. Configuration loading (config.toml + CLI overrides)
// 3. Logging initialisation (debug mode support)
// 4. Load -> aggregate -> render

use socialgaze::app::source::DataSource;
use socialgaze::app::state::{AppState, DataState, View};
use socialgaze::core::export;
use socialgaze::platform::config::{self, AppConfig, PlatformPaths};
use socialgaze::ui::render;
use socialgaze::util::{self, constants};
use socialgaze::util::error::{ExportError, SocialGazeError};

use clap::{Parser, ValueEnum};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

/// Output format for the finished dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Human-readable cards and charts.
    Text,
    /// The full report as JSON.
    Json,
    /// Cards and chart points as `chart,name,value` rows.
    Csv,
}

/// SocialGaze - Social media account dataset analyser.
///
/// Reads a CSV of social media accounts and prints activity, profile
/// picture, region, account type and influencer breakdowns.
#[derive(Parser, Debug)]
#[command(name = "SocialGaze", version, about)]
struct Cli {
    /// CSV data source ("-" for stdin). Defaults to config [source] path, then data.csv.
    source: Option<String>,

    /// Config file to use instead of the platform default.
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Output format.
    #[arg(short = 'f', long = "format", value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Write output to this file instead of stdout.
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Field delimiter: "auto", "tab", or a single character.
    #[arg(long = "delimiter")]
    delimiter: Option<String>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Config is read before logging so [logging] settings can apply.
    let (mut app_config, warnings) = match load_config(&cli) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    util::logging::init(
        cli.debug,
        app_config.log_level.as_deref(),
        app_config.log_file.as_deref(),
    );

    tracing::info!(
        version = constants::APP_VERSION,
        debug = cli.debug,
        "SocialGaze starting"
    );
    for warning in &warnings {
        tracing::warn!(warning = %warning, "Config warning");
    }

    if let Some(ref value) = cli.delimiter {
        match config::parse_delimiter(value) {
            Some(d) => app_config.delimiter = d,
            None => {
                eprintln!(
                    "Error: invalid --delimiter '{value}'. \
                     Use \"auto\", \"tab\", or a single character."
                );
                return ExitCode::FAILURE;
            }
        }
    }

    let source_arg = cli
        .source
        .clone()
        .or_else(|| app_config.source_path.clone())
        .unwrap_or_else(|| constants::DEFAULT_SOURCE_PATH.to_string());

    let mut state = AppState::from_config(DataSource::from_arg(&source_arg), &app_config);
    state.load();

    // A failed load still renders its message, then exits non-zero.
    let result = run(&cli, &state).and_then(|()| match state.data {
        DataState::Failed(e) => Err(SocialGazeError::from(e)),
        _ => Ok(()),
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "SocialGaze failed");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn load_config(cli: &Cli) -> Result<(AppConfig, Vec<String>), SocialGazeError> {
    match cli.config {
        Some(ref path) => Ok(config::load_config_file(path)?),
        None => Ok(config::load_default_config(&PlatformPaths::resolve())),
    }
}

/// Render or export the current view.
///
/// Text output renders every state (including load failures). JSON and CSV
/// output are written only for a ready report.
fn run(cli: &Cli, state: &AppState) -> Result<(), SocialGazeError> {
    let view = state.view();
    if cli.format != OutputFormat::Text && !matches!(view, View::Ready { .. }) {
        if let View::NoData { origin } = view {
            eprintln!("No accounts found in '{origin}'; nothing to export.");
        }
        return Ok(());
    }

    let target = cli
        .output
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "<stdout>".to_string());
    let io_err = |e: std::io::Error| ExportError::Io {
        target: target.clone(),
        source: e,
    };

    let mut out: Box<dyn Write> = match cli.output {
        Some(ref path) => Box::new(std::fs::File::create(path).map_err(io_err)?),
        None => Box::new(std::io::stdout().lock()),
    };

    match (&view, cli.format) {
        (View::Ready { report, .. }, OutputFormat::Json) => {
            export::export_json(report, &mut out, &target)?;
        }
        (View::Ready { report, .. }, OutputFormat::Csv) => {
            let rows = export::export_series_csv(report, &mut out, &target)?;
            tracing::debug!(rows, "CSV rows written");
        }
        _ => render::render_view(&view, &mut out).map_err(io_err)?,
    }
    out.flush().map_err(io_err)?;
    tracing::info!(output = %target, format = ?cli.format, "Dashboard written");
    Ok(())
}

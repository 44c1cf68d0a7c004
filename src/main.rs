mod app;
mod config;
mod data;
mod diagnostics;
mod error;
mod layout;
mod processing;
mod shell;
mod signal;
mod state;
mod ui;

use std::path::{Path, PathBuf};
use app::{LogPlotterApp, DEFAULT_FONT_SIZE};
use clap::Parser;
use data::ReadWindow;
use eframe::egui;
use state::size::{Dpi, DEFAULT_DPI};
use state::{PlotSession, SessionConfig};
use tracing_subscriber::EnvFilter;

/// Plot robot log topics on a grid described by a plot and a layout config.
#[derive(Parser, Debug)]
#[command(name = "logplotter", version, about)]
struct Cli {
    /// Log path prefix; topics are read from `<file>.<topic>`
    #[arg(short = 'f', long = "file")]
    file: PathBuf,

    /// Plot config (JSON). Both configs are picked with a file dialog unless both are given
    #[arg(long)]
    plot: Option<PathBuf>,

    /// Layout config (JSON)
    #[arg(long)]
    layout: Option<PathBuf>,

    /// Window title (defaults to the log file name)
    #[arg(short = 't', long)]
    title: Option<String>,

    /// Read shell commands from stdin while the window is open
    #[arg(short = 'i', long)]
    interactive: bool,

    /// First row to read from each topic file
    #[arg(long, default_value_t = 0)]
    start: usize,

    /// Number of rows to read (0 = all)
    #[arg(long, default_value_t = 0)]
    length: usize,

    /// Screen resolution used for mm/pt sizes
    #[arg(long, default_value_t = DEFAULT_DPI)]
    dpi: f64,

    /// Font size for plot titles, legends and axes
    #[arg(long, default_value_t = DEFAULT_FONT_SIZE)]
    font_size: f32,
}

/// Ask for a config file the command line did not name.
fn pick_config(title: &str) -> Result<PathBuf, String> {
    rfd::FileDialog::new()
        .set_title(title)
        .add_filter("JSON", &["json"])
        .add_filter("All Files", &["*"])
        .pick_file()
        .ok_or_else(|| format!("no file chosen for: {title}"))
}

/// Both config paths from the command line, or both from `pick` when either is missing.
fn config_paths(
    plot: Option<PathBuf>,
    layout: Option<PathBuf>,
    mut pick: impl FnMut(&str) -> Result<PathBuf, String>,
) -> Result<(PathBuf, PathBuf), String> {
    match (plot, layout) {
        (Some(plot), Some(layout)) => Ok((plot, layout)),
        _ => Ok((pick("Select plot config")?, pick("Select layout config")?)),
    }
}

fn window_title(cli_title: Option<String>, log_path: &Path) -> String {
    cli_title.unwrap_or_else(|| {
        log_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "logplotter".to_string())
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let (plot_path, layout_path) = config_paths(cli.plot, cli.layout, pick_config)?;

    let config = SessionConfig {
        log_path: cli.file,
        plot_path,
        layout_path,
        window: ReadWindow { start: cli.start, length: cli.length },
        dpi: Dpi::uniform(cli.dpi),
    };
    let session = PlotSession::load(&config).inspect_err(|e| tracing::error!("{e}"))?;
    tracing::info!(
        "{} plots, {} diagnostics",
        session.cells.len(),
        session.diagnostics.len()
    );

    let title = window_title(cli.title, &config.log_path);
    let interactive = cli.interactive;
    let font_size = cli.font_size;
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(&title)
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        &title,
        options,
        Box::new(move |cc| Ok(Box::new(LogPlotterApp::new(cc, config, session, interactive, font_size)))),
    )?;
    Ok(())
}

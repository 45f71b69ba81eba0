use std::path::PathBuf;
use std::sync::mpsc::{self, Sender};

use clap::Parser;
use color_eyre::Result;
use grid_core::{build_dashboard, ChartFrame, Dashboard, DashboardConfig, FileSource};
use serde::Serialize;
use tracing::{error, info};

mod app;
mod ui;

use app::InspectorApp;

#[derive(Clone)]
struct ChannelWriter {
    sender: Sender<String>,
}

impl std::io::Write for ChannelWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        if let Ok(text) = String::from_utf8(buf.to_vec()) {
            let _ = self.sender.send(text);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Battery grid-connection dashboard inspector", long_about = None)]
struct Cli {
    /// Print the derived views as JSON instead of opening the terminal UI.
    #[arg(long)]
    headless: bool,
    /// Region to select right after the dataset loads.
    #[arg(long)]
    select: Option<String>,
    /// Outer timeline chart width used for headless geometry.
    #[arg(long, default_value_t = 600.0)]
    chart_width: f64,
    /// Outer timeline chart height used for headless geometry.
    #[arg(long, default_value_t = 200.0)]
    chart_height: f64,
}

#[derive(Serialize)]
struct HeadlessReport<'a> {
    views: &'a grid_core::DerivedViews,
    cursor: &'a grid_core::SelectionCursor,
    detail: &'a grid_core::DetailView,
    camera: Option<&'a grid_core::CameraFocus>,
}

fn dataset_path(config: &DashboardConfig) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join(config.data().battery())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let (log_tx, log_rx) = mpsc::channel::<String>();
    if cli.headless {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .compact()
            .init();
    } else {
        let log_writer_tx = log_tx.clone();
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .compact()
            .with_writer(move || ChannelWriter {
                sender: log_writer_tx.clone(),
            })
            .init();
    }

    let config = DashboardConfig::builtin();
    let frame = ChartFrame::new(cli.chart_width, cli.chart_height, config.chart());
    let source = FileSource::new(dataset_path(&config));
    info!(path = %source.path().display(), "Loading dataset");

    // Nothing is drawn unless the whole dataset loads.
    let mut dashboard = match build_dashboard(&source, config, frame).await {
        Ok(dashboard) => dashboard,
        Err(err) => {
            error!("Dashboard initialization failed: {}", err);
            return Err(err.into());
        }
    };

    if let Some(id) = cli.select.as_deref() {
        dashboard.select_region(id);
    }

    if cli.headless {
        return print_report(&dashboard);
    }

    let app = InspectorApp::new(dashboard, source, log_rx)?;
    app.run().await
}

fn print_report(dashboard: &Dashboard) -> Result<()> {
    let selection = dashboard.selection();
    let report = HeadlessReport {
        views: dashboard.views(),
        cursor: selection.cursor(),
        detail: selection.detail(),
        camera: selection.camera_target(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

#![allow(dead_code)]

use std::path::PathBuf;

use anyhow::Result;
use grid_core::{build_dashboard, ChartFrame, Dashboard, DashboardConfig, StaticSource};

pub const PLOT_WIDTH: f64 = 300.0;
pub const PLOT_HEIGHT: f64 = 100.0;

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub fn fixture_document(name: &str) -> Result<String> {
    let path = fixture_path(name);
    std::fs::read_to_string(&path)
        .map_err(|err| anyhow::anyhow!("missing fixture {}: {err}", path.display()))
}

/// Dashboard over `name` with the built-in configuration and a fixed plot.
pub async fn fixture_dashboard(name: &str) -> Result<Dashboard> {
    let source = StaticSource::new(name, fixture_document(name)?);
    let dashboard = build_dashboard(
        &source,
        DashboardConfig::builtin(),
        ChartFrame::plot(PLOT_WIDTH, PLOT_HEIGHT),
    )
    .await?;
    Ok(dashboard)
}

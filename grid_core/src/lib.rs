//! State synchronization and visual-mapping engine for the battery
//! grid-connection dashboard.
//!
//! Turns a loaded [`Dataset`] into bubble layers, summary cards, national
//! figures and timeline geometry, and keeps the map, cards and detail panel
//! consistent behind a single selection cursor. Rendering is left to the
//! caller; everything here returns plain data.

pub mod dashboard_config;
pub mod events;
pub mod format;
pub mod layers;
pub mod loader;
mod scale;
pub mod selection;
mod state;
pub mod summary;
pub mod timeline;

pub use grid_schema::{Dataset, GeoPoint, GridStatus, Region, RegionId, Summary, Timeline};

pub use dashboard_config::{DashboardConfig, DashboardConfigError};
pub use events::{SelectionChannel, SelectionEvent, SelectionSender, TriggerOrigin};
pub use layers::{
    build_layers, build_map_layers, MarkerFlags, MarkerKind, RegionLayers, VisualMarker,
};
pub use loader::{load_dataset, DatasetSource, FileSource, LoadError, StaticSource};
pub use scale::{build_scale, RadiusScale};
pub use selection::{
    CameraFocus, CardHighlight, SelectionChange, SelectionController, SelectionCursor,
};
pub use state::{Dashboard, DerivedViews};
pub use summary::{
    comparison_bar, project_detail, ComparisonBar, CurtailmentLevel, DetailView, NationalSummary,
    RegionDetail, SummaryCard,
};
pub use timeline::{project_timeline, ChartFrame, TimelineGeometry};

/// Load the dataset once and derive the full dashboard from it.
///
/// This is the only suspension point. Any error is returned before a single
/// view has been built.
pub async fn build_dashboard<S: DatasetSource>(
    source: &S,
    config: std::sync::Arc<DashboardConfig>,
    frame: ChartFrame,
) -> Result<Dashboard, LoadError> {
    let dataset = load_dataset(source).await?;
    Ok(Dashboard::new(dataset, config, frame))
}

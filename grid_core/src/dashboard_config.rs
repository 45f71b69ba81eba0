//! Visual and data-source constants for the dashboard.
//!
//! The values are compiled in from `data/dashboard_config.json`; there is no
//! environment or file override at runtime.

use std::sync::Arc;

use grid_schema::GeoPoint;
use serde::Deserialize;
use thiserror::Error;

pub const BUILTIN_DASHBOARD_CONFIG: &str = include_str!("data/dashboard_config.json");

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    map: MapViewConfig,
    bubble: BubbleConfig,
    focus: FocusConfig,
    chart: ChartConfig,
    data: DataSourceConfig,
}

impl DashboardConfig {
    pub fn builtin() -> Arc<Self> {
        Arc::new(
            Self::from_json_str(BUILTIN_DASHBOARD_CONFIG)
                .expect("builtin dashboard config should parse and validate"),
        )
    }

    pub fn from_json_str(json: &str) -> Result<Self, DashboardConfigError> {
        let config: DashboardConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), DashboardConfigError> {
        if self.map.min_zoom > self.map.max_zoom {
            return Err(DashboardConfigError::ZoomBounds {
                min: self.map.min_zoom,
                max: self.map.max_zoom,
            });
        }
        if !(self.bubble.max_radius.is_finite() && self.bubble.max_radius >= 0.0) {
            return Err(DashboardConfigError::MaxRadius(self.bubble.max_radius));
        }
        Ok(())
    }

    pub fn map(&self) -> &MapViewConfig {
        &self.map
    }

    pub fn bubble(&self) -> &BubbleConfig {
        &self.bubble
    }

    pub fn focus(&self) -> &FocusConfig {
        &self.focus
    }

    pub fn chart(&self) -> &ChartConfig {
        &self.chart
    }

    pub fn data(&self) -> &DataSourceConfig {
        &self.data
    }
}

#[derive(Debug, Error)]
pub enum DashboardConfigError {
    #[error("failed to parse dashboard config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("min zoom {min} exceeds max zoom {max}")]
    ZoomBounds { min: f64, max: f64 },
    #[error("bubble max radius must be a non-negative number, got {0}")]
    MaxRadius(f64),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MapViewConfig {
    center: GeoPoint,
    zoom: f64,
    min_zoom: f64,
    max_zoom: f64,
}

impl MapViewConfig {
    pub fn center(&self) -> GeoPoint {
        self.center
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn min_zoom(&self) -> f64 {
        self.min_zoom
    }

    pub fn max_zoom(&self) -> f64 {
        self.max_zoom
    }

    pub fn clamp_zoom(&self, zoom: f64) -> f64 {
        zoom.clamp(self.min_zoom, self.max_zoom.max(self.min_zoom))
    }
}

impl Default for MapViewConfig {
    fn default() -> Self {
        Self {
            center: GeoPoint::new(36.5, 137.5),
            zoom: 5.5,
            min_zoom: 4.0,
            max_zoom: 10.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BubbleConfig {
    max_radius: f64,
    label_gap: f64,
    label_width: f64,
    label_height: f64,
}

impl BubbleConfig {
    pub fn max_radius(&self) -> f64 {
        self.max_radius
    }

    pub fn label_gap(&self) -> f64 {
        self.label_gap
    }

    pub fn label_width(&self) -> f64 {
        self.label_width
    }

    pub fn label_height(&self) -> f64 {
        self.label_height
    }
}

impl Default for BubbleConfig {
    fn default() -> Self {
        Self {
            max_radius: 90.0,
            label_gap: 5.0,
            label_width: 60.0,
            label_height: 30.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FocusConfig {
    duration_secs: f64,
}

impl FocusConfig {
    pub fn duration_secs(&self) -> f64 {
        self.duration_secs
    }
}

impl Default for FocusConfig {
    fn default() -> Self {
        Self { duration_secs: 1.5 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    margin_top: f64,
    margin_right: f64,
    margin_bottom: f64,
    margin_left: f64,
    headroom: f64,
    dot_radius: f64,
    value_tick_count: usize,
}

impl ChartConfig {
    pub fn margin_top(&self) -> f64 {
        self.margin_top
    }

    pub fn margin_right(&self) -> f64 {
        self.margin_right
    }

    pub fn margin_bottom(&self) -> f64 {
        self.margin_bottom
    }

    pub fn margin_left(&self) -> f64 {
        self.margin_left
    }

    /// Multiplier applied to the series maximum for the value-axis domain.
    pub fn headroom(&self) -> f64 {
        self.headroom.max(1.0)
    }

    pub fn dot_radius(&self) -> f64 {
        self.dot_radius
    }

    pub fn value_tick_count(&self) -> usize {
        self.value_tick_count
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            margin_top: 10.0,
            margin_right: 30.0,
            margin_bottom: 20.0,
            margin_left: 40.0,
            headroom: 1.1,
            dot_radius: 4.0,
            value_tick_count: 5,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DataSourceConfig {
    battery: String,
}

impl DataSourceConfig {
    /// Location of the battery dataset, relative to the workspace root.
    pub fn battery(&self) -> &str {
        &self.battery
    }
}

impl Default for DataSourceConfig {
    fn default() -> Self {
        Self {
            battery: "data/battery-data.json".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_config_parses() {
        let config = DashboardConfig::builtin();
        assert_eq!(config.bubble().max_radius(), 90.0);
        assert_eq!(config.map().zoom(), 5.5);
        assert_eq!(config.focus().duration_secs(), 1.5);
        assert_eq!(config.data().battery(), "data/battery-data.json");
    }

    #[test]
    fn builtin_document_passes_validation() {
        let config = DashboardConfig::from_json_str(BUILTIN_DASHBOARD_CONFIG)
            .expect("builtin document validates");
        assert!(config.map().min_zoom() <= config.map().max_zoom());
        assert_eq!(config.map().min_zoom(), 4.0);
        assert_eq!(config.map().max_zoom(), 10.0);
    }

    #[test]
    fn builtin_matches_defaults() {
        let builtin = DashboardConfig::builtin();
        let defaults = DashboardConfig::default();
        assert_eq!(builtin.map().center(), defaults.map().center());
        assert_eq!(builtin.chart().margin_left(), defaults.chart().margin_left());
        assert_eq!(
            builtin.chart().value_tick_count(),
            defaults.chart().value_tick_count()
        );
    }

    #[test]
    fn partial_document_falls_back_to_defaults() {
        let config = DashboardConfig::from_json_str(r#"{ "bubble": { "max_radius": 40.0 } }"#)
            .expect("partial config parses");
        assert_eq!(config.bubble().max_radius(), 40.0);
        assert_eq!(config.bubble().label_gap(), 5.0);
        assert_eq!(config.map().max_zoom(), 10.0);
    }

    #[test]
    fn inverted_zoom_bounds_are_rejected() {
        let err = DashboardConfig::from_json_str(
            r#"{ "map": { "min_zoom": 12.0, "max_zoom": 4.0 } }"#,
        )
        .unwrap_err();
        assert!(matches!(err, DashboardConfigError::ZoomBounds { .. }));
    }

    #[test]
    fn zoom_is_clamped_to_bounds() {
        let config = DashboardConfig::default();
        assert_eq!(config.map().clamp_zoom(20.0), 10.0);
        assert_eq!(config.map().clamp_zoom(1.0), 4.0);
        assert_eq!(config.map().clamp_zoom(5.5), 5.5);
    }
}

//! Data contracts for the battery grid-connection dashboard.
//!
//! These types mirror the JSON document the dashboard fetches at startup:
//! `{ "regions": [...], "summary": {...}, "timeline": {...} }` with camelCase
//! keys. They carry no presentation logic; projections live in `grid_core`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable key identifying a grid-connection area.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionId(pub String);

impl RegionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RegionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for RegionId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Geographic coordinate. Serialized as `[lon, lat]`, the order the data
/// source uses.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl From<[f64; 2]> for GeoPoint {
    fn from([lon, lat]: [f64; 2]) -> Self {
        Self { lat, lon }
    }
}

impl From<GeoPoint> for [f64; 2] {
    fn from(point: GeoPoint) -> Self {
        [point.lon, point.lat]
    }
}

/// The three sequential interconnection stages, in layering priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GridStatus {
    UnderReview,
    Contracted,
    Connected,
}

impl GridStatus {
    pub const ALL: [GridStatus; 3] = [
        GridStatus::UnderReview,
        GridStatus::Contracted,
        GridStatus::Connected,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            GridStatus::UnderReview => "under-review",
            GridStatus::Contracted => "contracted",
            GridStatus::Connected => "connected",
        }
    }
}

/// Battery-interconnection statistics for one grid area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    pub id: RegionId,
    pub name: String,
    pub center: GeoPoint,
    pub under_review: f64,
    pub contracted: f64,
    pub connected: f64,
    pub vre_ratio: f64,
    pub curtailment_rate: f64,
    pub solar_applications: u64,
    pub wind_applications: u64,
    #[serde(default)]
    pub characteristics: String,
}

impl Region {
    pub fn status_value(&self, status: GridStatus) -> f64 {
        match status {
            GridStatus::UnderReview => self.under_review,
            GridStatus::Contracted => self.contracted,
            GridStatus::Connected => self.connected,
        }
    }

    /// Sum across the three stages; the comparison-bar denominator.
    pub fn status_total(&self) -> f64 {
        self.under_review + self.contracted + self.connected
    }

    pub fn renewable_applications(&self) -> u64 {
        self.solar_applications.saturating_add(self.wind_applications)
    }
}

/// National totals. Supplied by the data source and never recomputed from
/// the per-region figures, so the two may legitimately disagree.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_under_review: f64,
    pub total_contracted: f64,
    pub total_connected: f64,
}

impl Summary {
    pub fn total(&self, status: GridStatus) -> f64 {
        match status {
            GridStatus::UnderReview => self.total_under_review,
            GridStatus::Contracted => self.total_contracted,
            GridStatus::Connected => self.total_connected,
        }
    }
}

/// Parallel category/value sequences for the under-review trend chart.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timeline {
    pub labels: Vec<String>,
    pub total_under_review: Vec<f64>,
}

impl Timeline {
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty() || self.total_under_review.is_empty()
    }

    /// Label/value pairs, truncated to the shorter of the two sequences.
    pub fn points(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.total_under_review.iter().copied())
    }
}

/// The whole document fetched at startup.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Dataset {
    pub regions: Vec<Region>,
    pub summary: Summary,
    #[serde(default)]
    pub timeline: Timeline,
}

impl Dataset {
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn region(&self, id: &str) -> Option<&Region> {
        self.regions.iter().find(|region| region.id.as_str() == id)
    }

    pub fn region_index(&self, id: &str) -> Option<usize> {
        self.regions
            .iter()
            .position(|region| region.id.as_str() == id)
    }

    /// Every value of one status column, in region order.
    pub fn status_values(&self, status: GridStatus) -> Vec<f64> {
        self.regions
            .iter()
            .map(|region| region.status_value(status))
            .collect()
    }
}

//! National figures, summary cards, and the region detail view.
//!
//! Everything here is pure arithmetic over the dataset. National totals are
//! taken verbatim from the document's `summary` block and are never summed
//! from regions: the two sources may disagree, and the summary block wins.

use grid_schema::{Dataset, GridStatus, Region, RegionId, Summary};
use serde::Serialize;

use crate::events::{SelectionSender, TriggerOrigin};
use crate::format::{group_digits, group_rounded};

/// Curtailment rates above this percentage are flagged.
pub const CURTAILMENT_ALERT_THRESHOLD: f64 = 3.0;

pub const DETAIL_PLACEHOLDER: &str = "Select an area on the map or a card";

/// Unit of every capacity figure in the dataset (10 MW).
pub const CAPACITY_UNIT: &str = "万kW";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub value: f64,
    pub display: String,
}

impl Figure {
    pub fn grouped(value: f64) -> Self {
        Self {
            value,
            display: group_digits(value),
        }
    }

    pub fn rounded(value: f64) -> Self {
        Self {
            value,
            display: group_rounded(value),
        }
    }

    /// Display text followed by [`CAPACITY_UNIT`].
    pub fn with_unit(&self) -> String {
        format!("{} {}", self.display, CAPACITY_UNIT)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NationalSummary {
    pub under_review: Figure,
    pub contracted: Figure,
    pub connected: Figure,
}

impl NationalSummary {
    pub fn figure(&self, status: GridStatus) -> &Figure {
        match status {
            GridStatus::UnderReview => &self.under_review,
            GridStatus::Contracted => &self.contracted,
            GridStatus::Connected => &self.connected,
        }
    }
}

pub fn project_national(summary: &Summary) -> NationalSummary {
    NationalSummary {
        under_review: Figure::grouped(summary.total(GridStatus::UnderReview)),
        contracted: Figure::grouped(summary.total(GridStatus::Contracted)),
        connected: Figure::grouped(summary.total(GridStatus::Connected)),
    }
}

/// Percentage widths of the three stacked comparison-bar segments.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ComparisonBar {
    pub under_review: f64,
    pub contracted: f64,
    pub connected: f64,
}

impl ComparisonBar {
    pub fn width(&self, status: GridStatus) -> f64 {
        match status {
            GridStatus::UnderReview => self.under_review,
            GridStatus::Contracted => self.contracted,
            GridStatus::Connected => self.connected,
        }
    }

    pub fn total(&self) -> f64 {
        self.under_review + self.contracted + self.connected
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0.0
    }
}

/// A zero (or non-finite) denominator yields an all-zero bar instead of NaN.
pub fn comparison_bar(region: &Region) -> ComparisonBar {
    let total = region.status_total();
    if !total.is_finite() || total <= 0.0 {
        return ComparisonBar::default();
    }
    let width = |value: f64| (value * 100.0 / total).clamp(0.0, 100.0);
    ComparisonBar {
        under_review: width(region.under_review),
        contracted: width(region.contracted),
        connected: width(region.connected),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CurtailmentLevel {
    Normal,
    Elevated,
}

pub fn curtailment_level(rate: f64) -> CurtailmentLevel {
    if rate > CURTAILMENT_ALERT_THRESHOLD {
        CurtailmentLevel::Elevated
    } else {
        CurtailmentLevel::Normal
    }
}

/// One entry of the area-card strip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryCard {
    pub region_id: RegionId,
    pub name: String,
    pub vre_ratio: f64,
    pub under_review: Figure,
    pub contracted: Figure,
    pub connected: Figure,
}

impl SummaryCard {
    /// Cards select their region through the same channel as map markers.
    pub fn activate(&self, sender: &SelectionSender) -> bool {
        sender.send(self.region_id.clone(), TriggerOrigin::SummaryCard)
    }
}

pub fn project_card(region: &Region) -> SummaryCard {
    SummaryCard {
        region_id: region.id.clone(),
        name: region.name.clone(),
        vre_ratio: region.vre_ratio,
        under_review: Figure::rounded(region.under_review),
        contracted: Figure::rounded(region.contracted),
        connected: Figure::rounded(region.connected),
    }
}

pub fn project_cards(dataset: &Dataset) -> Vec<SummaryCard> {
    dataset.regions.iter().map(project_card).collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionDetail {
    pub region_id: RegionId,
    pub name: String,
    pub vre_ratio: f64,
    pub curtailment_rate: f64,
    pub curtailment_level: CurtailmentLevel,
    pub under_review: Figure,
    pub contracted: Figure,
    pub connected: Figure,
    pub comparison: ComparisonBar,
    pub solar_applications: Figure,
    pub wind_applications: Figure,
    pub renewable_applications: Figure,
    pub characteristics: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DetailView {
    /// Nothing has been selected yet, or the selection was cleared.
    Placeholder { message: String },
    /// The cursor names an id the dataset does not contain.
    NotFound { region_id: RegionId, message: String },
    Region(Box<RegionDetail>),
}

impl DetailView {
    pub fn placeholder() -> Self {
        DetailView::Placeholder {
            message: DETAIL_PLACEHOLDER.to_string(),
        }
    }

    pub fn region(&self) -> Option<&RegionDetail> {
        match self {
            DetailView::Region(detail) => Some(detail),
            DetailView::Placeholder { .. } | DetailView::NotFound { .. } => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.region().is_some()
    }
}

pub fn project_region_detail(region: &Region) -> RegionDetail {
    RegionDetail {
        region_id: region.id.clone(),
        name: region.name.clone(),
        vre_ratio: region.vre_ratio,
        curtailment_rate: region.curtailment_rate,
        curtailment_level: curtailment_level(region.curtailment_rate),
        under_review: Figure::grouped(region.under_review),
        contracted: Figure::grouped(region.contracted),
        connected: Figure::grouped(region.connected),
        comparison: comparison_bar(region),
        solar_applications: Figure::grouped(region.solar_applications as f64),
        wind_applications: Figure::grouped(region.wind_applications as f64),
        renewable_applications: Figure::grouped(region.renewable_applications() as f64),
        characteristics: region.characteristics.clone(),
    }
}

/// Detail view for `id`; an unknown id resolves to [`DetailView::NotFound`].
pub fn project_detail(dataset: &Dataset, id: &str) -> DetailView {
    match dataset.region(id) {
        Some(region) => DetailView::Region(Box::new(project_region_detail(region))),
        None => DetailView::NotFound {
            region_id: RegionId::from(id),
            message: DETAIL_PLACEHOLDER.to_string(),
        },
    }
}

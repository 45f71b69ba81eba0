//! Per-region map layers: three status bubbles plus a name label.

use bitflags::bitflags;
use grid_schema::{Dataset, GeoPoint, GridStatus, Region, RegionId};
use serde::Serialize;

use crate::dashboard_config::BubbleConfig;
use crate::events::{SelectionSender, TriggerOrigin};
use crate::scale::RadiusScale;

pub const UNDER_REVIEW_Z: i32 = 10;
pub const CONTRACTED_Z: i32 = 20;
pub const CONNECTED_Z: i32 = 30;
pub const LABEL_Z: i32 = 1000;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
    pub struct MarkerFlags: u8 {
        /// Receives pointer events. Markers without it let clicks fall through.
        const INTERACTIVE = 0b0000_0001;
        /// Activation selects the marker's region.
        const SELECTS_REGION = 0b0000_0010;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MarkerKind {
    Status(GridStatus),
    Label,
}

impl MarkerKind {
    pub fn z_index(self) -> i32 {
        match self {
            MarkerKind::Status(GridStatus::UnderReview) => UNDER_REVIEW_Z,
            MarkerKind::Status(GridStatus::Contracted) => CONTRACTED_Z,
            MarkerKind::Status(GridStatus::Connected) => CONNECTED_Z,
            MarkerKind::Label => LABEL_Z,
        }
    }
}

/// Screen-space label box, offset from the region centre so it clears the
/// under-review bubble.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelAnchor {
    pub text: String,
    pub width: f64,
    pub height: f64,
    /// Pixels above the region centre where the label's bottom edge sits.
    pub offset_above: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum MarkerShape {
    Bubble { radius: f64 },
    Label(LabelAnchor),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisualMarker {
    pub region_id: RegionId,
    pub kind: MarkerKind,
    pub center: GeoPoint,
    pub z_index: i32,
    pub flags: MarkerFlags,
    pub shape: MarkerShape,
}

impl VisualMarker {
    pub fn is_interactive(&self) -> bool {
        self.flags.contains(MarkerFlags::INTERACTIVE)
    }

    pub fn radius(&self) -> Option<f64> {
        match self.shape {
            MarkerShape::Bubble { radius } => Some(radius),
            MarkerShape::Label(_) => None,
        }
    }

    /// Forward a pointer activation to the selection channel. Decorative
    /// markers ignore it and return `false`.
    pub fn activate(&self, sender: &SelectionSender) -> bool {
        if !self
            .flags
            .contains(MarkerFlags::INTERACTIVE | MarkerFlags::SELECTS_REGION)
        {
            return false;
        }
        sender.send(self.region_id.clone(), TriggerOrigin::MapMarker)
    }
}

/// All markers for one region, lowest z first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionLayers {
    pub region_id: RegionId,
    pub markers: Vec<VisualMarker>,
}

impl RegionLayers {
    pub fn click_target(&self) -> Option<&VisualMarker> {
        self.markers.iter().find(|marker| marker.is_interactive())
    }

    pub fn bubble(&self, status: GridStatus) -> Option<&VisualMarker> {
        self.markers
            .iter()
            .find(|marker| marker.kind == MarkerKind::Status(status))
    }

    pub fn label(&self) -> Option<&VisualMarker> {
        self.markers
            .iter()
            .find(|marker| marker.kind == MarkerKind::Label)
    }
}

/// Build the z-ordered markers for a single region.
///
/// Zero-radius bubbles are left out rather than drawn invisibly, so they can
/// never act as hit targets. Only the under-review bubble is interactive.
pub fn build_layers(region: &Region, scale: &RadiusScale, bubble: &BubbleConfig) -> RegionLayers {
    let mut markers = Vec::with_capacity(GridStatus::ALL.len() + 1);

    for status in GridStatus::ALL {
        let radius = scale.radius(region.status_value(status));
        if radius <= 0.0 {
            continue;
        }
        let flags = if status == GridStatus::UnderReview {
            MarkerFlags::INTERACTIVE | MarkerFlags::SELECTS_REGION
        } else {
            MarkerFlags::empty()
        };
        let kind = MarkerKind::Status(status);
        markers.push(VisualMarker {
            region_id: region.id.clone(),
            kind,
            center: region.center,
            z_index: kind.z_index(),
            flags,
            shape: MarkerShape::Bubble { radius },
        });
    }

    let under_review_radius = scale.radius(region.under_review);
    markers.push(VisualMarker {
        region_id: region.id.clone(),
        kind: MarkerKind::Label,
        center: region.center,
        z_index: LABEL_Z,
        flags: MarkerFlags::empty(),
        shape: MarkerShape::Label(LabelAnchor {
            text: region.name.clone(),
            width: bubble.label_width(),
            height: bubble.label_height(),
            offset_above: under_review_radius + bubble.label_gap(),
        }),
    });

    RegionLayers {
        region_id: region.id.clone(),
        markers,
    }
}

/// Build layers for every region, in dataset order.
pub fn build_map_layers(
    dataset: &Dataset,
    scale: &RadiusScale,
    bubble: &BubbleConfig,
) -> Vec<RegionLayers> {
    dataset
        .regions
        .iter()
        .map(|region| build_layers(region, scale, bubble))
        .collect()
}

//! The single "selected region" cursor and everything that follows it.
//!
//! [`SelectionController`] is the only writer of the cursor. A transition
//! updates the card highlight, the camera focus request, and the detail view
//! together before returning, so readers never observe a half-applied
//! selection.

use grid_schema::{Dataset, GeoPoint, RegionId};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::dashboard_config::DashboardConfig;
use crate::events::SelectionEvent;
use crate::summary::{project_detail, DetailView};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", content = "region_id", rename_all = "snake_case")]
pub enum SelectionCursor {
    #[default]
    Unselected,
    Selected(RegionId),
}

impl SelectionCursor {
    pub fn region_id(&self) -> Option<&RegionId> {
        match self {
            SelectionCursor::Unselected => None,
            SelectionCursor::Selected(id) => Some(id),
        }
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.region_id().is_some_and(|current| current.as_str() == id)
    }
}

/// Request to animate the map camera onto a region. A newer request replaces
/// an in-flight one; nothing is queued.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CameraFocus {
    pub region_id: RegionId,
    pub center: GeoPoint,
    pub zoom: f64,
    pub duration_secs: f64,
}

/// The one highlighted card. `reveal` asks the card strip to scroll it into
/// view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardHighlight {
    pub region_id: RegionId,
    pub index: usize,
    pub reveal: bool,
}

/// Everything one transition published.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionChange {
    pub cursor: SelectionCursor,
    pub highlight: Option<CardHighlight>,
    pub focus: Option<CameraFocus>,
    pub detail: DetailView,
    pub revision: u64,
}

#[derive(Debug, Clone)]
pub struct SelectionController {
    cursor: SelectionCursor,
    highlight: Option<CardHighlight>,
    camera: Option<CameraFocus>,
    detail: DetailView,
    focus_zoom: f64,
    focus_duration_secs: f64,
    revision: u64,
}

impl SelectionController {
    pub fn new(config: &DashboardConfig) -> Self {
        Self {
            cursor: SelectionCursor::Unselected,
            highlight: None,
            camera: None,
            detail: DetailView::placeholder(),
            focus_zoom: config.map().clamp_zoom(config.map().zoom()),
            focus_duration_secs: config.focus().duration_secs(),
            revision: 0,
        }
    }

    pub fn cursor(&self) -> &SelectionCursor {
        &self.cursor
    }

    pub fn highlight(&self) -> Option<&CardHighlight> {
        self.highlight.as_ref()
    }

    pub fn is_highlighted(&self, id: &str) -> bool {
        self.highlight
            .as_ref()
            .is_some_and(|highlight| highlight.region_id.as_str() == id)
    }

    /// Most recent camera request; later selections overwrite it.
    pub fn camera_target(&self) -> Option<&CameraFocus> {
        self.camera.as_ref()
    }

    pub fn detail(&self) -> &DetailView {
        &self.detail
    }

    /// Number of transitions applied so far.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Select `id`, even if it is already selected.
    ///
    /// Re-selecting re-issues the camera focus, which matters after the
    /// dataset has been replaced. An id missing from the dataset still moves
    /// the cursor, clears the highlight, leaves the camera alone, and publishes
    /// [`DetailView::NotFound`].
    pub fn select_region(&mut self, dataset: &Dataset, id: &str) -> SelectionChange {
        let region_id = RegionId::from(id);
        self.cursor = SelectionCursor::Selected(region_id.clone());

        self.highlight = dataset.region_index(id).map(|index| CardHighlight {
            region_id: region_id.clone(),
            index,
            reveal: true,
        });

        let focus = dataset.region(id).map(|region| CameraFocus {
            region_id: region_id.clone(),
            center: region.center,
            zoom: self.focus_zoom,
            duration_secs: self.focus_duration_secs,
        });
        if let Some(request) = &focus {
            if let Some(previous) = &self.camera {
                if previous.region_id != request.region_id {
                    debug!(
                        target: "grid_dashboard::selection",
                        from = %previous.region_id,
                        to = %request.region_id,
                        "camera.retargeted"
                    );
                }
            }
            self.camera = Some(request.clone());
        }

        self.detail = project_detail(dataset, id);
        self.revision += 1;

        if self.detail.is_resolved() {
            info!(
                target: "grid_dashboard::selection",
                region = %region_id,
                revision = self.revision,
                "selection.changed"
            );
        } else {
            warn!(
                target: "grid_dashboard::selection",
                region = %region_id,
                revision = self.revision,
                "selection.unresolved"
            );
        }

        SelectionChange {
            cursor: self.cursor.clone(),
            highlight: self.highlight.clone(),
            focus,
            detail: self.detail.clone(),
            revision: self.revision,
        }
    }

    pub fn dispatch(&mut self, dataset: &Dataset, event: &SelectionEvent) -> SelectionChange {
        debug!(
            target: "grid_dashboard::selection",
            region = %event.region_id,
            origin = event.origin.as_str(),
            "selection.event"
        );
        self.select_region(dataset, event.region_id.as_str())
    }

    /// Return to `Unselected` with the placeholder detail view. The camera
    /// stays where it is.
    pub fn clear_selection(&mut self) -> SelectionChange {
        self.cursor = SelectionCursor::Unselected;
        self.highlight = None;
        self.detail = DetailView::placeholder();
        self.revision += 1;
        info!(
            target: "grid_dashboard::selection",
            revision = self.revision,
            "selection.cleared"
        );
        SelectionChange {
            cursor: SelectionCursor::Unselected,
            highlight: None,
            focus: None,
            detail: self.detail.clone(),
            revision: self.revision,
        }
    }

    /// Re-run the current selection against a replacement dataset.
    pub fn reapply(&mut self, dataset: &Dataset) -> Option<SelectionChange> {
        let id = self.cursor.region_id()?.clone();
        Some(self.select_region(dataset, id.as_str()))
    }
}

impl Default for SelectionController {
    fn default() -> Self {
        Self::new(&DashboardConfig::default())
    }
}

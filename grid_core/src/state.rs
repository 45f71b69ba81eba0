use std::sync::Arc;

use grid_schema::{Dataset, GridStatus};
use serde::Serialize;
use tracing::info;

use crate::dashboard_config::DashboardConfig;
use crate::events::{SelectionChannel, SelectionSender};
use crate::layers::{build_map_layers, RegionLayers};
use crate::scale::{build_scale, RadiusScale};
use crate::selection::{SelectionChange, SelectionController};
use crate::summary::{project_cards, project_national, NationalSummary, SummaryCard};
use crate::timeline::{project_timeline, ChartFrame, TimelineGeometry};

/// Projections derived from one dataset. Rebuilt wholesale, never patched.
#[derive(Debug, Clone, Serialize)]
pub struct DerivedViews {
    pub scale: RadiusScale,
    pub layers: Vec<RegionLayers>,
    pub cards: Vec<SummaryCard>,
    pub national: NationalSummary,
    pub timeline: Option<TimelineGeometry>,
}

impl DerivedViews {
    pub fn derive(dataset: &Dataset, config: &DashboardConfig, frame: ChartFrame) -> Self {
        let scale = build_scale(
            &dataset.status_values(GridStatus::UnderReview),
            config.bubble().max_radius(),
        );
        let layers = build_map_layers(dataset, &scale, config.bubble());
        let cards = project_cards(dataset);
        let national = project_national(&dataset.summary);
        let timeline = project_timeline(&dataset.timeline, frame, config.chart());

        let markers: usize = layers.iter().map(|layer| layer.markers.len()).sum();
        info!(
            target: "grid_dashboard::state",
            regions = dataset.regions.len(),
            markers,
            domain_max = scale.domain_max(),
            timeline_drawn = timeline.is_some(),
            "dashboard.derived"
        );

        Self {
            scale,
            layers,
            cards,
            national,
            timeline,
        }
    }
}

/// Application state shared by every view.
///
/// The dataset is write-once per load (replaced wholesale by
/// [`Dashboard::replace_dataset`]); the selection is only reachable mutably
/// through the methods that delegate to [`SelectionController`].
#[derive(Debug)]
pub struct Dashboard {
    config: Arc<DashboardConfig>,
    dataset: Arc<Dataset>,
    frame: ChartFrame,
    views: DerivedViews,
    selection: SelectionController,
    channel: SelectionChannel,
}

impl Dashboard {
    pub fn new(dataset: Dataset, config: Arc<DashboardConfig>, frame: ChartFrame) -> Self {
        let views = DerivedViews::derive(&dataset, &config, frame);
        let selection = SelectionController::new(&config);
        Self {
            config,
            dataset: Arc::new(dataset),
            frame,
            views,
            selection,
            channel: SelectionChannel::new(),
        }
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn dataset(&self) -> &Arc<Dataset> {
        &self.dataset
    }

    pub fn views(&self) -> &DerivedViews {
        &self.views
    }

    pub fn scale(&self) -> &RadiusScale {
        &self.views.scale
    }

    pub fn layers(&self) -> &[RegionLayers] {
        &self.views.layers
    }

    pub fn cards(&self) -> &[SummaryCard] {
        &self.views.cards
    }

    pub fn national(&self) -> &NationalSummary {
        &self.views.national
    }

    pub fn timeline(&self) -> Option<&TimelineGeometry> {
        self.views.timeline.as_ref()
    }

    pub fn selection(&self) -> &SelectionController {
        &self.selection
    }

    /// Handle for map markers and cards to emit selection events.
    pub fn selection_sender(&self) -> SelectionSender {
        self.channel.sender()
    }

    pub fn select_region(&mut self, id: &str) -> SelectionChange {
        self.selection.select_region(&self.dataset, id)
    }

    pub fn clear_selection(&mut self) -> SelectionChange {
        self.selection.clear_selection()
    }

    /// Apply every queued selection event in arrival order. Returns the last
    /// change, if any event was pending.
    pub fn process_events(&mut self) -> Option<SelectionChange> {
        let mut last = None;
        for event in self.channel.drain() {
            last = Some(self.selection.dispatch(&self.dataset, &event));
        }
        last
    }

    /// Swap in a new dataset, re-derive every projection, and re-apply the
    /// current selection against it.
    pub fn replace_dataset(&mut self, dataset: Dataset) -> Option<SelectionChange> {
        self.views = DerivedViews::derive(&dataset, &self.config, self.frame);
        self.dataset = Arc::new(dataset);
        info!(
            target: "grid_dashboard::state",
            regions = self.dataset.regions.len(),
            "dataset.replaced"
        );
        self.selection.reapply(&self.dataset)
    }

    /// Re-project the timeline for a new chart size.
    pub fn resize_chart(&mut self, frame: ChartFrame) {
        if frame == self.frame {
            return;
        }
        self.frame = frame;
        self.views.timeline = project_timeline(&self.dataset.timeline, frame, self.config.chart());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grid_schema::{GeoPoint, Region, RegionId, Summary, Timeline};

    use crate::events::TriggerOrigin;

    fn region(id: &str, under_review: f64) -> Region {
        Region {
            id: RegionId::from(id),
            name: id.to_string(),
            center: GeoPoint::new(35.0, 135.0),
            under_review,
            contracted: 1.0,
            connected: 1.0,
            vre_ratio: 10.0,
            curtailment_rate: 0.5,
            solar_applications: 0,
            wind_applications: 0,
            characteristics: String::new(),
        }
    }

    fn dataset(max: f64) -> Dataset {
        Dataset {
            regions: vec![region("a", max), region("b", max / 4.0)],
            summary: Summary {
                total_under_review: 1.0,
                total_contracted: 2.0,
                total_connected: 3.0,
            },
            timeline: Timeline {
                labels: vec!["Q1".into(), "Q2".into()],
                total_under_review: vec![1.0, 2.0],
            },
        }
    }

    fn dashboard(max: f64) -> Dashboard {
        Dashboard::new(
            dataset(max),
            Arc::new(DashboardConfig::default()),
            ChartFrame::plot(200.0, 100.0),
        )
    }

    #[test]
    fn derivation_covers_every_view() {
        let dash = dashboard(100.0);
        assert_eq!(dash.scale().domain_max(), 100.0);
        assert_eq!(dash.layers().len(), 2);
        assert_eq!(dash.cards().len(), 2);
        assert_eq!(dash.national().connected.display, "3");
        assert!(dash.timeline().is_some());
    }

    #[test]
    fn card_and_marker_events_share_one_path() {
        let mut dash = dashboard(100.0);
        let sender = dash.selection_sender();

        let marker = dash.layers()[0].click_target().cloned().expect("clickable bubble");
        assert!(marker.activate(&sender));
        let from_marker = dash.process_events().expect("event pending");

        let card = dash.cards()[0].clone();
        assert!(card.activate(&sender));
        let from_card = dash.process_events().expect("event pending");

        assert_eq!(from_marker.detail, from_card.detail);
        assert_eq!(from_marker.highlight, from_card.highlight);
        assert!(dash.process_events().is_none());
    }

    #[test]
    fn events_apply_in_order_last_wins() {
        let mut dash = dashboard(100.0);
        let sender = dash.selection_sender();
        sender.send(RegionId::from("a"), TriggerOrigin::MapMarker);
        sender.send(RegionId::from("b"), TriggerOrigin::SummaryCard);
        let change = dash.process_events().unwrap();
        assert!(change.cursor.is_selected("b"));
        assert_eq!(dash.selection().revision(), 2);
    }

    #[test]
    fn replacing_dataset_rederives_and_keeps_cursor() {
        let mut dash = dashboard(100.0);
        dash.select_region("b");
        let change = dash.replace_dataset(dataset(400.0)).expect("cursor re-applied");

        assert_eq!(dash.scale().domain_max(), 400.0);
        assert!(change.cursor.is_selected("b"));
        assert!(change.focus.is_some());
        assert_eq!(
            dash.selection().detail().region().map(|d| d.under_review.value),
            Some(100.0)
        );
    }

    #[test]
    fn resize_reprojects_timeline() {
        let mut dash = dashboard(100.0);
        dash.resize_chart(ChartFrame::plot(400.0, 100.0));
        let xs: Vec<f64> = dash.timeline().unwrap().points.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![0.0, 400.0]);
    }
}

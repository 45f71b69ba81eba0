//! Selection-event channel.
//!
//! Map markers and summary cards do not hold callbacks. Activating either
//! pushes a [`SelectionEvent`] onto one channel, and the dashboard drains it
//! into the selection controller, so both trigger surfaces behave the same.

use crossbeam_channel::{unbounded, Receiver, Sender, TrySendError};
use grid_schema::RegionId;
use serde::Serialize;

/// Which surface produced a selection. Only used for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerOrigin {
    MapMarker,
    SummaryCard,
    Programmatic,
}

impl TriggerOrigin {
    pub fn as_str(self) -> &'static str {
        match self {
            TriggerOrigin::MapMarker => "map_marker",
            TriggerOrigin::SummaryCard => "summary_card",
            TriggerOrigin::Programmatic => "programmatic",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionEvent {
    pub region_id: RegionId,
    pub origin: TriggerOrigin,
}

impl SelectionEvent {
    pub fn new(region_id: impl Into<RegionId>, origin: TriggerOrigin) -> Self {
        Self {
            region_id: region_id.into(),
            origin,
        }
    }
}

/// Cloneable handle given to every trigger surface.
#[derive(Debug, Clone)]
pub struct SelectionSender {
    sender: Sender<SelectionEvent>,
}

impl SelectionSender {
    /// Returns `false` when the receiving side has been dropped.
    pub fn send(&self, region_id: RegionId, origin: TriggerOrigin) -> bool {
        match self.sender.try_send(SelectionEvent { region_id, origin }) {
            Ok(()) => true,
            Err(TrySendError::Disconnected(event)) => {
                tracing::warn!(
                    target: "grid_dashboard::events",
                    region = %event.region_id,
                    origin = event.origin.as_str(),
                    "selection.dropped=disconnected"
                );
                false
            }
            Err(TrySendError::Full(_)) => false,
        }
    }
}

#[derive(Debug)]
pub struct SelectionChannel {
    sender: Sender<SelectionEvent>,
    receiver: Receiver<SelectionEvent>,
}

impl Default for SelectionChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionChannel {
    pub fn new() -> Self {
        let (sender, receiver) = unbounded();
        Self { sender, receiver }
    }

    pub fn sender(&self) -> SelectionSender {
        SelectionSender {
            sender: self.sender.clone(),
        }
    }

    /// Take every pending event, oldest first.
    pub fn drain(&self) -> impl Iterator<Item = SelectionEvent> + '_ {
        self.receiver.try_iter()
    }

    pub fn pending(&self) -> usize {
        self.receiver.len()
    }
}

use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};

use color_eyre::Result;
use crossterm::event::{self, Event, KeyCode};
use grid_core::{load_dataset, Dashboard, FileSource, SelectionChange, SelectionSender};
use ratatui::backend::CrosstermBackend;
use ratatui::prelude::*;
use tracing::{error, info, warn};

use crate::ui::{draw_ui, UiState};

pub struct InspectorApp {
    terminal: Terminal<CrosstermBackend<std::io::Stdout>>,
    ui_state: UiState,
    dashboard: Dashboard,
    sender: SelectionSender,
    source: FileSource,
    log_receiver: Receiver<String>,
}

impl InspectorApp {
    pub fn new(
        dashboard: Dashboard,
        source: FileSource,
        log_receiver: Receiver<String>,
    ) -> Result<Self> {
        let stdout = std::io::stdout();
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        crossterm::terminal::enable_raw_mode()?;
        terminal.clear()?;
        terminal.hide_cursor()?;
        let sender = dashboard.selection_sender();
        let mut ui_state = UiState::default();
        if let Some(highlight) = dashboard.selection().highlight() {
            ui_state.focus_card(highlight.index);
        }
        Ok(Self {
            terminal,
            ui_state,
            dashboard,
            sender,
            source,
            log_receiver,
        })
    }

    pub async fn run(mut self) -> Result<()> {
        let mut last_draw: Option<Instant> = None;

        loop {
            if let Some(change) = self.dashboard.process_events() {
                self.apply_change(&change);
            }

            while let Ok(line) = self.log_receiver.try_recv() {
                self.ui_state.push_log(line);
            }

            if last_draw.map_or(true, |at| at.elapsed() >= Duration::from_millis(100)) {
                self.terminal
                    .draw(|frame| draw_ui(frame, &self.dashboard, &self.ui_state))?;
                last_draw = Some(Instant::now());
            }

            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => break,
                        KeyCode::Left | KeyCode::Up => {
                            self.ui_state.step_card(-1, self.dashboard.cards().len());
                        }
                        KeyCode::Right | KeyCode::Down => {
                            self.ui_state.step_card(1, self.dashboard.cards().len());
                        }
                        KeyCode::Enter => self.activate_card(),
                        KeyCode::Char('m') => self.activate_marker(),
                        KeyCode::Char('x') => {
                            let change = self.dashboard.clear_selection();
                            self.apply_change(&change);
                        }
                        KeyCode::Char('r') => self.reload().await,
                        _ => {}
                    }
                }
            }
        }

        self.terminal.show_cursor()?;
        crossterm::terminal::disable_raw_mode()?;
        Ok(())
    }

    fn activate_card(&mut self) {
        let Some(card) = self.dashboard.cards().get(self.ui_state.focused_card()) else {
            return;
        };
        if !card.activate(&self.sender) {
            error!("Selection channel closed; card {} ignored", card.region_id);
        }
    }

    /// Stands in for a click on the focused region's under-review bubble.
    fn activate_marker(&mut self) {
        let Some(card) = self.dashboard.cards().get(self.ui_state.focused_card()) else {
            return;
        };
        let target = self
            .dashboard
            .layers()
            .iter()
            .find(|layers| layers.region_id == card.region_id)
            .and_then(|layers| layers.click_target());
        match target {
            Some(marker) => {
                marker.activate(&self.sender);
            }
            None => warn!("{} has no clickable bubble", card.region_id),
        }
    }

    async fn reload(&mut self) {
        match load_dataset(&self.source).await {
            Ok(dataset) => {
                info!(regions = dataset.regions.len(), "Dataset reloaded");
                if let Some(change) = self.dashboard.replace_dataset(dataset) {
                    self.apply_change(&change);
                }
                let count = self.dashboard.cards().len();
                self.ui_state.step_card(0, count);
            }
            Err(err) => error!("Reload failed: {}", err),
        }
    }

    fn apply_change(&mut self, change: &SelectionChange) {
        if let Some(highlight) = change.highlight.as_ref().filter(|h| h.reveal) {
            self.ui_state.focus_card(highlight.index);
        }
    }
}

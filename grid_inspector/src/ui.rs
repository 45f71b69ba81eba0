use std::collections::VecDeque;

use grid_core::layers::MarkerShape;
use grid_core::timeline::PathCommand;
use grid_core::{
    CurtailmentLevel, Dashboard, DetailView, GridStatus, MarkerKind, TimelineGeometry,
};
use ratatui::layout::{Constraint, Direction, Layout, Margin};
use ratatui::prelude::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Canvas, Circle};
use ratatui::widgets::{
    Axis, Block, Borders, Chart, Dataset as ChartSeries, GraphType, List, ListItem, ListState,
    Paragraph, Wrap,
};
use ratatui::Frame;

/// Viewport the map canvas pretends to be, in web-map pixels.
const MAP_VIEWPORT_PX: (f64, f64) = (800.0, 600.0);
const CURVE_SAMPLES: usize = 12;

pub struct UiState {
    pub logs: VecDeque<String>,
    pub max_logs: usize,
    focused_card: usize,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            logs: VecDeque::new(),
            max_logs: 8,
            focused_card: 0,
        }
    }
}

impl UiState {
    pub fn push_log<S: Into<String>>(&mut self, line: S) {
        let mut text: String = line.into();
        while text.ends_with('\n') || text.ends_with('\r') {
            text.pop();
        }
        if text.is_empty() {
            return;
        }
        self.logs.push_front(text);
        while self.logs.len() > self.max_logs {
            self.logs.pop_back();
        }
    }

    pub fn focused_card(&self) -> usize {
        self.focused_card
    }

    pub fn focus_card(&mut self, index: usize) {
        self.focused_card = index;
    }

    /// Move the card cursor by `step`, wrapping, and keep it inside `count`.
    pub fn step_card(&mut self, step: isize, count: usize) {
        if count == 0 {
            self.focused_card = 0;
            return;
        }
        let current = self.focused_card.min(count - 1) as isize;
        self.focused_card = (current + step).rem_euclid(count as isize) as usize;
    }
}

pub fn draw_ui(frame: &mut Frame, dashboard: &Dashboard, state: &UiState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(12),
            Constraint::Length(12),
            Constraint::Length(7),
        ])
        .split(frame.size());
    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(rows[1]);
    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(rows[2]);

    draw_header(frame, rows[0], dashboard);
    draw_map(frame, middle[0], dashboard);
    draw_detail(frame, middle[1], dashboard);
    draw_cards(frame, bottom[0], dashboard, state);
    draw_timeline(frame, bottom[1], dashboard);
    draw_logs(frame, rows[3], state);
}

fn status_color(status: GridStatus) -> Color {
    match status {
        GridStatus::UnderReview => Color::LightBlue,
        GridStatus::Contracted => Color::Yellow,
        GridStatus::Connected => Color::Green,
    }
}

fn draw_header(frame: &mut Frame, area: Rect, dashboard: &Dashboard) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Battery Grid Connections");
    let mut spans = Vec::new();
    for status in GridStatus::ALL {
        spans.push(Span::raw(format!("{} ", status.as_str())));
        spans.push(Span::styled(
            dashboard.national().figure(status).with_unit(),
            Style::default().fg(status_color(status)),
        ));
        spans.push(Span::raw(" | "));
    }
    spans.push(Span::raw("←/→ card  enter select  m marker  x clear  r reload  q quit"));
    let text = Paragraph::new(Line::from(spans)).wrap(Wrap { trim: true });
    frame.render_widget(block, area);
    frame.render_widget(
        text,
        area.inner(&Margin {
            vertical: 1,
            horizontal: 1,
        }),
    );
}

fn draw_map(frame: &mut Frame, area: Rect, dashboard: &Dashboard) {
    let map = dashboard.config().map();
    let (center, zoom) = match dashboard.selection().camera_target() {
        Some(focus) => (focus.center, map.clamp_zoom(focus.zoom)),
        None => (map.center(), map.zoom()),
    };
    let degrees_per_px = 360.0 / (256.0 * 2f64.powf(zoom));
    let half_lon = MAP_VIEWPORT_PX.0 * degrees_per_px / 2.0;
    let half_lat = MAP_VIEWPORT_PX.1 * degrees_per_px / 2.0;

    let layers = dashboard.layers();
    let selection = dashboard.selection();
    let canvas = Canvas::default()
        .block(Block::default().borders(Borders::ALL).title(format!(
            "Map (zoom {zoom:.1}, {:.0}-{:.0})",
            map.min_zoom(),
            map.max_zoom()
        )))
        .marker(symbols::Marker::Braille)
        .x_bounds([center.lon - half_lon, center.lon + half_lon])
        .y_bounds([center.lat - half_lat, center.lat + half_lat])
        .paint(move |ctx| {
            // Markers are already z-ordered within a region; draw every
            // region's bubbles before any label.
            for layer in layers {
                for marker in &layer.markers {
                    if let (MarkerKind::Status(status), Some(radius)) =
                        (marker.kind, marker.radius())
                    {
                        ctx.draw(&Circle {
                            x: marker.center.lon,
                            y: marker.center.lat,
                            radius: radius * degrees_per_px,
                            color: status_color(status),
                        });
                    }
                }
            }
            ctx.layer();
            for layer in layers {
                let Some(label) = layer.label() else {
                    continue;
                };
                let MarkerShape::Label(anchor) = &label.shape else {
                    continue;
                };
                let style = if selection.is_highlighted(layer.region_id.as_str()) {
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Gray)
                };
                ctx.print(
                    label.center.lon,
                    label.center.lat + anchor.offset_above * degrees_per_px,
                    Span::styled(anchor.text.clone(), style),
                );
            }
        });
    frame.render_widget(canvas, area);
}

fn draw_detail(frame: &mut Frame, area: Rect, dashboard: &Dashboard) {
    let block = Block::default().borders(Borders::ALL).title("Detail");
    let lines = match dashboard.selection().detail() {
        DetailView::Placeholder { message } => vec![Line::from(Span::raw(message.as_str()))],
        DetailView::NotFound { region_id, message } => vec![
            Line::from(Span::styled(
                format!("unknown area {region_id}"),
                Style::default().fg(Color::Red),
            )),
            Line::from(Span::raw(message.as_str())),
        ],
        DetailView::Region(detail) => {
            let curtailment_style = match detail.curtailment_level {
                CurtailmentLevel::Elevated => Style::default().fg(Color::Red),
                CurtailmentLevel::Normal => Style::default(),
            };
            let mut lines = vec![
                Line::from(Span::styled(
                    detail.name.as_str(),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(format!("VRE ratio {:.1}%", detail.vre_ratio)),
                Line::from(vec![
                    Span::raw("Curtailment "),
                    Span::styled(format!("{:.1}%", detail.curtailment_rate), curtailment_style),
                ]),
            ];
            for status in GridStatus::ALL {
                let figure = match status {
                    GridStatus::UnderReview => &detail.under_review,
                    GridStatus::Contracted => &detail.contracted,
                    GridStatus::Connected => &detail.connected,
                };
                lines.push(Line::from(vec![
                    Span::styled(
                        format!("{:<13}", status.as_str()),
                        Style::default().fg(status_color(status)),
                    ),
                    Span::raw(format!("{:>12}  ", figure.with_unit())),
                    Span::styled(
                        bar(detail.comparison.width(status), 20),
                        Style::default().fg(status_color(status)),
                    ),
                ]));
            }
            lines.push(Line::from(format!(
                "Applications: solar {} / wind {} / total {}",
                detail.solar_applications.display,
                detail.wind_applications.display,
                detail.renewable_applications.display
            )));
            if !detail.characteristics.is_empty() {
                lines.push(Line::from(detail.characteristics.as_str()));
            }
            lines
        }
    };
    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(block, area);
    frame.render_widget(
        paragraph,
        area.inner(&Margin {
            vertical: 1,
            horizontal: 1,
        }),
    );
}

fn bar(percent: f64, cells: usize) -> String {
    let filled = ((percent / 100.0) * cells as f64).round() as usize;
    "█".repeat(filled.min(cells))
}

fn draw_cards(frame: &mut Frame, area: Rect, dashboard: &Dashboard, state: &UiState) {
    let selection = dashboard.selection();
    let items: Vec<ListItem> = dashboard
        .cards()
        .iter()
        .map(|card| {
            let style = if selection.is_highlighted(card.region_id.as_str()) {
                Style::default().fg(Color::Black).bg(Color::LightBlue)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:<10}", card.name), style),
                Span::raw(format!(
                    " {:>8} {:>7} {:>6}  VRE {:.1}%",
                    card.under_review.display,
                    card.contracted.display,
                    card.connected.display,
                    card.vre_ratio
                )),
            ]))
        })
        .collect();
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Areas"))
        .highlight_symbol("> ");
    let mut list_state = ListState::default();
    if !dashboard.cards().is_empty() {
        list_state.select(Some(state.focused_card().min(dashboard.cards().len() - 1)));
    }
    frame.render_stateful_widget(list, area, &mut list_state);
}

/// Flatten the line commands into chart coordinates, y pointing up.
fn sample_line(geometry: &TimelineGeometry) -> Vec<(f64, f64)> {
    let height = geometry.frame.height;
    let mut samples = Vec::new();
    let mut cursor = (0.0, 0.0);
    for command in &geometry.line {
        match *command {
            PathCommand::MoveTo { x, y } | PathCommand::LineTo { x, y } => {
                cursor = (x, y);
                samples.push((x, height - y));
            }
            PathCommand::CubicTo {
                c1x,
                c1y,
                c2x,
                c2y,
                x,
                y,
            } => {
                let (x0, y0) = cursor;
                for step in 1..=CURVE_SAMPLES {
                    let t = step as f64 / CURVE_SAMPLES as f64;
                    let u = 1.0 - t;
                    let (a, b, c, d) = (u * u * u, 3.0 * u * u * t, 3.0 * u * t * t, t * t * t);
                    let bx = a * x0 + b * c1x + c * c2x + d * x;
                    let by = a * y0 + b * c1y + c * c2y + d * y;
                    samples.push((bx, height - by));
                }
                cursor = (x, y);
            }
        }
    }
    samples
}

fn draw_timeline(frame: &mut Frame, area: Rect, dashboard: &Dashboard) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Under review over time");
    let Some(geometry) = dashboard.timeline() else {
        frame.render_widget(Paragraph::new("No timeline data").block(block), area);
        return;
    };

    let height = geometry.frame.height;
    let line = sample_line(geometry);
    let dots: Vec<(f64, f64)> = geometry
        .points
        .iter()
        .map(|point| (point.x, height - point.y))
        .collect();
    let series = vec![
        ChartSeries::default()
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::LightBlue))
            .data(&line),
        ChartSeries::default()
            .marker(symbols::Marker::Dot)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(Color::White))
            .data(&dots),
    ];

    let x_labels: Vec<Span> = geometry
        .points
        .iter()
        .map(|point| Span::raw(point.label.as_str()))
        .collect();
    let y_labels: Vec<Span> = geometry
        .value_ticks
        .iter()
        .map(|tick| Span::raw(tick.label.as_str()))
        .collect();

    let chart = Chart::new(series)
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([0.0, geometry.frame.width])
                .labels(x_labels),
        )
        .y_axis(Axis::default().bounds([0.0, height]).labels(y_labels));
    frame.render_widget(chart, area);
}

fn draw_logs(frame: &mut Frame, area: Rect, state: &UiState) {
    let block = Block::default().borders(Borders::ALL).title("Logs");
    let lines: Vec<Line> = state
        .logs
        .iter()
        .map(|entry| Line::from(Span::raw(entry)))
        .collect();
    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(block, area);
    frame.render_widget(
        paragraph,
        area.inner(&Margin {
            vertical: 1,
            horizontal: 1,
        }),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_cursor_wraps_both_ways() {
        let mut state = UiState::default();
        state.step_card(-1, 3);
        assert_eq!(state.focused_card(), 2);
        state.step_card(1, 3);
        assert_eq!(state.focused_card(), 0);
        state.focus_card(9);
        state.step_card(0, 3);
        assert_eq!(state.focused_card(), 2);
    }

    #[test]
    fn logs_are_trimmed_and_capped() {
        let mut state = UiState::default();
        for i in 0..20 {
            state.push_log(format!("line {i}\n"));
        }
        state.push_log("\n");
        assert_eq!(state.logs.len(), state.max_logs);
        assert_eq!(state.logs.front().map(String::as_str), Some("line 19"));
    }

    #[test]
    fn bar_fills_proportionally() {
        assert_eq!(bar(50.0, 20).chars().count(), 10);
        assert_eq!(bar(0.0, 20), "");
        assert_eq!(bar(100.0, 20).chars().count(), 20);
    }
}

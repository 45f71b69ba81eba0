//! Screen-space geometry for the under-review trend chart.
//!
//! Categories sit on a point scale across the plot width; values use a linear
//! scale over `[0, max * headroom]` mapped to `[height, 0]`. The line is a
//! monotone cubic in x, so it never overshoots between neighbouring points.

use std::fmt::Write as _;

use grid_schema::Timeline;
use serde::Serialize;

use crate::dashboard_config::ChartConfig;
use crate::format::thousands_label;

/// Plot area after margins are removed from the outer chart size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartFrame {
    pub width: f64,
    pub height: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl ChartFrame {
    pub fn new(outer_width: f64, outer_height: f64, config: &ChartConfig) -> Self {
        Self {
            width: (outer_width - config.margin_left() - config.margin_right()).max(0.0),
            height: (outer_height - config.margin_top() - config.margin_bottom()).max(0.0),
            offset_x: config.margin_left(),
            offset_y: config.margin_top(),
        }
    }

    pub fn plot(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisTick {
    pub value: f64,
    pub position: f64,
    pub label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum PathCommand {
    MoveTo {
        x: f64,
        y: f64,
    },
    LineTo {
        x: f64,
        y: f64,
    },
    CubicTo {
        c1x: f64,
        c1y: f64,
        c2x: f64,
        c2y: f64,
        x: f64,
        y: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineGeometry {
    pub frame: ChartFrame,
    pub value_domain: (f64, f64),
    pub points: Vec<ChartPoint>,
    pub line: Vec<PathCommand>,
    pub value_ticks: Vec<AxisTick>,
    pub dot_radius: f64,
}

impl TimelineGeometry {
    pub fn svg_path(&self) -> String {
        svg_path(&self.line)
    }
}

/// Evenly spaced category positions across `[0, width]`, input order kept.
/// A single category sits in the middle.
pub fn point_positions(count: usize, width: f64) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![width / 2.0],
        n => {
            let step = width / (n - 1) as f64;
            (0..n).map(|i| i as f64 * step).collect()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct LinearScale {
    domain_max: f64,
    height: f64,
}

impl LinearScale {
    fn y(&self, value: f64) -> f64 {
        if self.domain_max <= 0.0 {
            return self.height;
        }
        self.height - (value / self.domain_max) * self.height
    }
}

/// Project the series into chart geometry. An empty series yields `None`: the
/// chart is cleared and nothing is drawn.
pub fn project_timeline(
    timeline: &Timeline,
    frame: ChartFrame,
    config: &ChartConfig,
) -> Option<TimelineGeometry> {
    if timeline.is_empty() {
        return None;
    }
    if timeline.labels.len() != timeline.total_under_review.len() {
        tracing::warn!(
            target: "grid_dashboard::timeline",
            labels = timeline.labels.len(),
            values = timeline.total_under_review.len(),
            "timeline.length_mismatch"
        );
    }

    let series: Vec<(&str, f64)> = timeline.points().collect();
    let max_value = series
        .iter()
        .map(|(_, value)| *value)
        .filter(|value| value.is_finite())
        .fold(0.0_f64, f64::max);
    let domain_max = max_value * config.headroom();
    let y_scale = LinearScale {
        domain_max,
        height: frame.height,
    };

    let xs = point_positions(series.len(), frame.width);
    let points: Vec<ChartPoint> = series
        .iter()
        .zip(xs)
        .map(|((label, value), x)| ChartPoint {
            label: (*label).to_string(),
            value: *value,
            x,
            y: y_scale.y(*value),
        })
        .collect();

    let coords: Vec<(f64, f64)> = points.iter().map(|point| (point.x, point.y)).collect();
    let line = monotone_x_path(&coords);

    let value_ticks = nice_ticks(0.0, domain_max, config.value_tick_count())
        .into_iter()
        .map(|value| AxisTick {
            value,
            position: y_scale.y(value),
            label: thousands_label(value),
        })
        .collect();

    Some(TimelineGeometry {
        frame,
        value_domain: (0.0, domain_max),
        points,
        line,
        value_ticks,
        dot_radius: config.dot_radius(),
    })
}

fn sign(value: f64) -> f64 {
    if value < 0.0 {
        -1.0
    } else {
        1.0
    }
}

/// Monotone cubic interpolation (Steffen) through points ordered by x.
///
/// Interior tangents are limited by the neighbouring secants, so each Bézier
/// segment stays within the y-range of its endpoints.
pub fn monotone_x_path(points: &[(f64, f64)]) -> Vec<PathCommand> {
    let mut commands = Vec::with_capacity(points.len());
    let Some(&(x0, y0)) = points.first() else {
        return commands;
    };
    commands.push(PathCommand::MoveTo { x: x0, y: y0 });
    match points.len() {
        1 => return commands,
        2 => {
            let (x, y) = points[1];
            commands.push(PathCommand::LineTo { x, y });
            return commands;
        }
        _ => {}
    }

    let n = points.len();
    let secant = |k: usize| {
        let (xa, ya) = points[k];
        let (xb, yb) = points[k + 1];
        let h = xb - xa;
        if h == 0.0 {
            0.0
        } else {
            (yb - ya) / h
        }
    };

    let mut tangents = vec![0.0; n];
    for i in 1..n - 1 {
        let h0 = points[i].0 - points[i - 1].0;
        let h1 = points[i + 1].0 - points[i].0;
        let s0 = secant(i - 1);
        let s1 = secant(i);
        let p = if h0 + h1 == 0.0 {
            0.0
        } else {
            (s0 * h1 + s1 * h0) / (h0 + h1)
        };
        let t = (sign(s0) + sign(s1)) * s0.abs().min(s1.abs()).min(0.5 * p.abs());
        tangents[i] = if t.is_finite() { t } else { 0.0 };
    }
    tangents[0] = (3.0 * secant(0) - tangents[1]) / 2.0;
    tangents[n - 1] = (3.0 * secant(n - 2) - tangents[n - 2]) / 2.0;

    for k in 0..n - 1 {
        let (xa, ya) = points[k];
        let (xb, yb) = points[k + 1];
        let dx = (xb - xa) / 3.0;
        commands.push(PathCommand::CubicTo {
            c1x: xa + dx,
            c1y: ya + dx * tangents[k],
            c2x: xb - dx,
            c2y: yb - dx * tangents[k + 1],
            x: xb,
            y: yb,
        });
    }
    commands
}

pub fn svg_path(commands: &[PathCommand]) -> String {
    let mut out = String::new();
    for command in commands {
        let _ = match *command {
            PathCommand::MoveTo { x, y } => write!(out, "M{x},{y}"),
            PathCommand::LineTo { x, y } => write!(out, "L{x},{y}"),
            PathCommand::CubicTo {
                c1x,
                c1y,
                c2x,
                c2y,
                x,
                y,
            } => write!(out, "C{c1x},{c1y},{c2x},{c2y},{x},{y}"),
        };
    }
    out
}

/// Roughly `count` round tick values covering `[start, stop]` (steps of 1, 2,
/// or 5 times a power of ten).
pub fn nice_ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if count == 0 || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }
    let (lo, hi) = if start < stop { (start, stop) } else { (stop, start) };
    let Some((i1, i2, inc)) = tick_spec(lo, hi, count as f64) else {
        return Vec::new();
    };
    if i2 < i1 {
        return Vec::new();
    }
    (i1..=i2)
        .map(|i| {
            if inc < 0.0 {
                i as f64 / -inc
            } else {
                i as f64 * inc
            }
        })
        .collect()
}

fn tick_spec(start: f64, stop: f64, count: f64) -> Option<(i64, i64, f64)> {
    let e10 = 50f64.sqrt();
    let e5 = 10f64.sqrt();
    let e2 = 2f64.sqrt();

    let step = (stop - start) / count.max(0.0);
    if !step.is_finite() || step <= 0.0 {
        return None;
    }
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= e10 {
        10.0
    } else if error >= e5 {
        5.0
    } else if error >= e2 {
        2.0
    } else {
        1.0
    };

    let (mut i1, mut i2, inc);
    if power < 0.0 {
        let scale = 10f64.powf(-power) / factor;
        i1 = (start * scale).round() as i64;
        i2 = (stop * scale).round() as i64;
        if (i1 as f64) / scale < start {
            i1 += 1;
        }
        if (i2 as f64) / scale > stop {
            i2 -= 1;
        }
        inc = -scale;
    } else {
        let step = 10f64.powf(power) * factor;
        i1 = (start / step).round() as i64;
        i2 = (stop / step).round() as i64;
        if (i1 as f64) * step < start {
            i1 += 1;
        }
        if (i2 as f64) * step > stop {
            i2 -= 1;
        }
        inc = step;
    }
    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }
    Some((i1, i2, inc))
}

//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - recorded observations: `o`
//! - progress line between observations: `-`
//! - optional target rule: `=`

use crate::domain::RecordGrammar;
use crate::series::ProgressSeries;

/// Render the progress chart as a character grid.
///
/// The x axis spans the series' date range (days since the first record);
/// the y axis covers quantities and the target, padded 5% on both sides.
pub fn render_ascii_chart(series: &ProgressSeries, width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let points = day_offset_points(series);
    let (t_min, t_max) = x_range(&points);
    let target = series.target().map(f64::from);
    let (y_min, y_max) = y_range(&points, target);
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    // Progress line first, sampled per column so gap days interpolate.
    draw_series_line(&mut grid, &points, t_min, t_max, y_min, y_max);

    // Target rule fills whatever the line left blank on its row.
    if let Some(t) = target {
        let row = map_y(t, y_min, y_max, height);
        for cell in grid[row].iter_mut() {
            if *cell == ' ' {
                *cell = '=';
            }
        }
    }

    // Observation markers overlay everything.
    for &(t, y) in &points {
        let x = map_x(t, t_min, t_max, width);
        let row = map_y(y, y_min, y_max, height);
        grid[row][x] = 'o';
    }

    // Build final string. We include a small header with ranges.
    let fmt = RecordGrammar::DATE_FORMAT;
    let mut out = String::new();
    out.push_str(&format!(
        "Plot: {} → {} | pages=[{y_min:.2}, {y_max:.2}]\n",
        series.first().date.format(fmt),
        series.last().date.format(fmt),
    ));

    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    out
}

/// Records as `(days since first record, quantity)` pairs.
fn day_offset_points(series: &ProgressSeries) -> Vec<(f64, f64)> {
    let first = series.first().date;
    series
        .records()
        .iter()
        .map(|r| ((r.date - first).num_days() as f64, r.quantity as f64))
        .collect()
}

fn x_range(points: &[(f64, f64)]) -> (f64, f64) {
    // A single-day series still needs a non-degenerate axis.
    let span = points.last().map(|&(t, _)| t).unwrap_or(0.0);
    (0.0, span.max(1.0))
}

fn y_range(points: &[(f64, f64)], target: Option<f64>) -> (f64, f64) {
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;

    for &(_, y) in points {
        min_y = min_y.min(y);
        max_y = max_y.max(y);
    }
    if let Some(t) = target {
        min_y = min_y.min(t);
        max_y = max_y.max(t);
    }

    if max_y > min_y {
        (min_y, max_y)
    } else {
        // Flat series (and flat target): open up a unit band around it.
        (min_y - 0.5, max_y + 0.5)
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(t: f64, t_min: f64, t_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((t - t_min) / (t_max - t_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

/// Piecewise-linear quantity at day offset `t` (clamped at the ends).
fn interpolate(points: &[(f64, f64)], t: f64) -> f64 {
    let (first_t, first_y) = points[0];
    if t <= first_t {
        return first_y;
    }
    for pair in points.windows(2) {
        let (t0, y0) = pair[0];
        let (t1, y1) = pair[1];
        if t <= t1 {
            let u = (t - t0) / (t1 - t0);
            return y0 + u * (y1 - y0);
        }
    }
    points[points.len() - 1].1
}

fn draw_series_line(
    grid: &mut [Vec<char>],
    points: &[(f64, f64)],
    t_min: f64,
    t_max: f64,
    y_min: f64,
    y_max: f64,
) {
    if points.is_empty() {
        return;
    }
    let height = grid.len();
    let width = grid[0].len();

    let mut prev_row: Option<usize> = None;
    for col in 0..width {
        let u = col as f64 / (width as f64 - 1.0);
        let t = t_min + u * (t_max - t_min);
        let row = map_y(interpolate(points, t), y_min, y_max, height);

        grid[row][col] = '-';

        // Steep segments skip rows between adjacent columns; fill them so the
        // line stays connected.
        if let Some(prev) = prev_row {
            let (lo, hi) = if prev < row { (prev, row) } else { (row, prev) };
            for r in lo + 1..hi {
                if grid[r][col] == ' ' {
                    grid[r][col] = '-';
                }
            }
        }
        prev_row = Some(row);
    }
}

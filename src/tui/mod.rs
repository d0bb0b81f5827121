//! Ratatui-based interactive chart view.
//!
//! The view is read-only: it renders the already-computed run output (summary
//! header, progress chart with optional target rule, key hints) and waits for
//! dismissal. All numbers come from the pipeline; nothing is recomputed here.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph},
    Terminal,
};

use crate::app::pipeline::RunOutput;
use crate::domain::RecordGrammar;
use crate::error::{AnalysisError, AppError};

mod plotters_chart;

use plotters_chart::ProgressChart;

/// Show the chart until the user dismisses it (`q` / `Esc`).
pub fn run(run: &RunOutput) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    let view = ChartView { run };
    view.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(4, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(4, format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

struct ChartView<'a> {
    run: &'a RunOutput,
}

impl<'a> ChartView<'a> {
    fn event_loop<B: ratatui::backend::Backend>(
        &self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(4, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(4, format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::new(4, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn draw(&self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_chart(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let run = self.run;
        let fmt = RecordGrammar::DATE_FORMAT;
        let first = run.series.first();
        let last = run.series.last();

        let target = match run.series.target() {
            Some(t) => t.to_string(),
            None => "none".to_string(),
        };

        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(vec![
            Span::styled("pace", Style::default().fg(Color::Cyan)),
            Span::raw(" — reading progress"),
        ]));
        lines.push(Line::from(Span::styled(
            format!(
                "{} → {} | pages: {} → {} | target: {target}",
                first.date.format(fmt),
                last.date.format(fmt),
                first.quantity,
                last.quantity,
            ),
            Style::default().fg(Color::Gray),
        )));
        lines.push(Line::from(Span::styled(
            format!(
                "speed: {} | last {}d: {} | eta: {} / {}",
                fmt_speed(&run.average_speed),
                run.window_days,
                fmt_speed(&run.window_speed),
                fmt_eta(&run.average_eta),
                fmt_eta(&run.window_eta),
            ),
            Style::default().fg(Color::Gray),
        )));

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Progress").borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let (series, target, x_bounds, y_bounds) = chart_series(self.run);

        let widget = ProgressChart {
            series: &series,
            target,
            first_date: self.run.series.first().date,
            x_bounds,
            y_bounds,
            y_label: "pages",
        };

        frame.render_widget(widget, inner);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "q / Esc quit";
        let line = Line::from(Span::styled(help, Style::default().fg(Color::Gray)));
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

fn fmt_speed(speed: &Result<f64, AnalysisError>) -> String {
    match speed {
        Ok(v) => format!("{v:.2}/day"),
        Err(_) => "n/a".to_string(),
    }
}

fn fmt_eta(eta: &Result<f64, AnalysisError>) -> String {
    match eta {
        Ok(v) => format!("{v:.2}d"),
        Err(_) => "n/a".to_string(),
    }
}

/// Build the chart series and bounds for Plotters.
fn chart_series(run: &RunOutput) -> (Vec<(f64, f64)>, Option<f64>, [f64; 2], [f64; 2]) {
    let first = run.series.first().date;

    let points: Vec<(f64, f64)> = run
        .series
        .records()
        .iter()
        .map(|r| ((r.date - first).num_days() as f64, r.quantity as f64))
        .collect();

    let target = run.series.target().map(f64::from);

    let span = points.last().map(|&(t, _)| t).unwrap_or(0.0);
    let x_bounds = [0.0, span.max(1.0)];

    let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
    for &(_, y) in &points {
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }
    if let Some(t) = target {
        y_min = y_min.min(t);
        y_max = y_max.max(t);
    }

    if !y_min.is_finite() || !y_max.is_finite() || y_max <= y_min {
        y_min -= 0.5;
        y_max = y_min + 1.0;
    }

    let pad = ((y_max - y_min).abs() * 0.05).max(1e-12);
    let y_bounds = [y_min - pad, y_max + pad];

    (points, target, x_bounds, y_bounds)
}

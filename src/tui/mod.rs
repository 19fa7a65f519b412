//! Ratatui-based terminal UI.
//!
//! The TUI provides a settings panel for the two lifters (bodyweight and sex)
//! plus a cursor over lifter 1's lift, and renders the shaded equivalence
//! curve with the hover readout for the selected sample.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
};
use tracing::debug;

use crate::app::pipeline::{RunOutput, run_curve};
use crate::domain::{CurveConfig, MassUnit};
use crate::error::AppError;

mod plotters_chart;

use plotters_chart::DotsPlottersChart;

const FIELD_COUNT: usize = 5;
const FIELD_BW1: usize = 0;
const FIELD_SEX1: usize = 1;
const FIELD_BW2: usize = 2;
const FIELD_SEX2: usize = 3;
const FIELD_CURSOR: usize = 4;

/// Start the TUI.
pub fn run(config: CurveConfig) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(config);
    app.event_loop(&mut terminal)
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

/// Bodyweight limits for the interactive controls.
fn bodyweight_limits(unit: MassUnit) -> (f64, f64) {
    match unit {
        MassUnit::Pound => (100.0, 400.0),
        MassUnit::Kilogram => (45.0, 181.0),
    }
}

struct App {
    config: CurveConfig,
    selected_field: usize,
    /// Index into the curve's samples.
    cursor: usize,
    status: String,
    run: Option<RunOutput>,
}

impl App {
    fn new(mut config: CurveConfig) -> Self {
        let (min_bw, max_bw) = bodyweight_limits(config.unit);
        for lifter in [&mut config.lifter1, &mut config.lifter2] {
            lifter.bodyweight = lifter.bodyweight.clamp(min_bw, max_bw);
        }

        let mut app = Self {
            config,
            selected_field: 0,
            cursor: 0,
            status: String::new(),
            run: None,
        };
        app.recompute();
        app
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(4, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100)).map_err(|e| AppError::new(4, format!("Event poll error: {e}")))? {
                continue;
            }

            match event::read().map_err(|e| AppError::new(4, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
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

    /// Returns `true` when the app should exit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Up => {
                self.selected_field = self.selected_field.saturating_sub(1);
            }
            KeyCode::Down => {
                if self.selected_field + 1 < FIELD_COUNT {
                    self.selected_field += 1;
                }
            }
            KeyCode::Left => self.adjust_field(-1),
            KeyCode::Right => self.adjust_field(1),
            KeyCode::PageDown => self.adjust_field(-10),
            KeyCode::PageUp => self.adjust_field(10),
            KeyCode::Char('s') => {
                std::mem::swap(&mut self.config.lifter1, &mut self.config.lifter2);
                self.recompute();
            }
            KeyCode::Char('x') => {
                self.config.lifter1.sex = self.config.lifter1.sex.toggled();
                self.config.lifter2.sex = self.config.lifter2.sex.toggled();
                self.recompute();
            }
            _ => {}
        }
        false
    }

    fn adjust_field(&mut self, delta: i32) {
        let (min_bw, max_bw) = bodyweight_limits(self.config.unit);
        let step = f64::from(delta);
        match self.selected_field {
            FIELD_BW1 => {
                let bw = &mut self.config.lifter1.bodyweight;
                *bw = (*bw + step).clamp(min_bw, max_bw);
                self.recompute();
            }
            FIELD_SEX1 => {
                self.config.lifter1.sex = self.config.lifter1.sex.toggled();
                self.recompute();
            }
            FIELD_BW2 => {
                let bw = &mut self.config.lifter2.bodyweight;
                *bw = (*bw + step).clamp(min_bw, max_bw);
                self.recompute();
            }
            FIELD_SEX2 => {
                self.config.lifter2.sex = self.config.lifter2.sex.toggled();
                self.recompute();
            }
            FIELD_CURSOR => {
                let len = self.run.as_ref().map(|r| r.curve.len()).unwrap_or(0);
                if len > 0 {
                    let next = self.cursor as i64 + i64::from(delta);
                    self.cursor = next.clamp(0, len as i64 - 1) as usize;
                }
            }
            _ => {}
        }
    }

    fn recompute(&mut self) {
        match run_curve(&self.config) {
            Ok(run) => {
                self.cursor = self.cursor.min(run.curve.len().saturating_sub(1));
                self.status = if run.retried {
                    format!("bracket widened to [{}, {}]", run.bracket.lo, run.bracket.hi)
                } else {
                    format!("{} samples", run.curve.len())
                };
                debug!(points = run.curve.len(), retried = run.retried, "tui curve updated");
                self.run = Some(run);
            }
            Err(err) => {
                // Keep the last good curve on screen.
                self.status = err.to_string();
            }
        }
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let u = self.config.unit.label();
        let l1 = &self.config.lifter1;
        let l2 = &self.config.lifter2;

        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(vec![
            Span::styled("dots", Style::default().fg(Color::Cyan)),
            Span::raw(format!(
                ": {} {u} {} vs {} {u} {}",
                l1.bodyweight,
                l1.sex.noun(),
                l2.bodyweight,
                l2.sex.noun()
            )),
        ]));

        if let Some(run) = &self.run {
            lines.push(Line::from(Span::styled(
                format!(
                    "DOTS {}..{} | lift {}..{} {u} step {} | bracket [{}, {}]",
                    run.curve.score_min,
                    run.curve.score_max,
                    self.config.range.lo,
                    self.config.range.hi,
                    self.config.step,
                    run.bracket.lo,
                    run.bracket.hi,
                ),
                Style::default().fg(Color::Gray),
            )));
        }

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(10)])
            .split(area);

        self.draw_chart(frame, chunks[0]);
        self.draw_settings(frame, chunks[1]);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Equivalence Curve").borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let Some(run) = &self.run else {
            let msg = Paragraph::new("No curve (check the status line).")
                .style(Style::default().fg(Color::Yellow))
                .block(Block::default());
            frame.render_widget(msg, inner);
            return;
        };

        let series = chart_series(run);
        let cursor = run
            .curve
            .points
            .get(self.cursor)
            .map(|p| (p.source_lift, p.target_lift));

        let u = self.config.unit.label();
        let x_label = format!("{} lift ({u})", self.config.lifter1.sex.noun());
        let y_label = format!("{} lift ({u})", self.config.lifter2.sex.noun());

        let (chart_rect, insets) = chart_layout(inner);
        let widget = DotsPlottersChart {
            points: &series.points,
            fractions: &run.curve.segment_fractions,
            cursor,
            x_bounds: series.x_bounds,
            y_bounds: series.y_bounds,
            x_label: &x_label,
            y_label: &y_label,
        };

        frame.render_widget(widget, chart_rect);
        if let Some(insets) = insets {
            let labels = AxisLabels {
                x: &x_label,
                y: &y_label,
            };
            draw_axis_ticks(frame, inner, chart_rect, insets, series.x_bounds, series.y_bounds, labels);
        }
    }

    fn draw_settings(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let u = self.config.unit.label();
        let l1 = &self.config.lifter1;
        let l2 = &self.config.lifter2;
        let cursor_lift = self
            .run
            .as_ref()
            .and_then(|r| r.curve.points.get(self.cursor))
            .map(|p| format!("{} {u}", p.source_lift))
            .unwrap_or_else(|| "-".to_string());

        let items = vec![
            ListItem::new(format!("Lifter 1 bodyweight: {} {u}", l1.bodyweight)),
            ListItem::new(format!("Lifter 1 sex: {}", l1.sex.display_name())),
            ListItem::new(format!("Lifter 2 bodyweight: {} {u}", l2.bodyweight)),
            ListItem::new(format!("Lifter 2 sex: {}", l2.sex.display_name())),
            ListItem::new(format!("Cursor lift: {cursor_lift}")),
        ];

        let list = List::new(items)
            .block(Block::default().title("Settings").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(7), Constraint::Min(0)])
            .split(area);

        let mut state = ratatui::widgets::ListState::default();
        state.select(Some(self.selected_field));
        frame.render_stateful_widget(list, chunks[0], &mut state);

        if let Some(hover) = self.hover() {
            let p = Paragraph::new(hover.to_string())
                .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD));
            frame.render_widget(p, chunks[1]);
        }
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ select  ←/→ ±1  PgUp/PgDn ±10  s swap  x flip sexes  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn hover(&self) -> Option<&str> {
        self.run
            .as_ref()
            .and_then(|r| r.curve.hover_text.get(self.cursor))
            .map(String::as_str)
    }
}

struct ChartSeries {
    points: Vec<(f64, f64)>,
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
}

/// Build chart series and padded bounds for Plotters.
fn chart_series(run: &RunOutput) -> ChartSeries {
    let points = run
        .curve
        .points
        .iter()
        .map(|p| (p.source_lift, p.target_lift))
        .collect::<Vec<_>>();

    let (mut x0, mut x1) = match (points.first(), points.last()) {
        (Some(first), Some(last)) => (first.0, last.0),
        _ => (0.0, 1.0),
    };
    if !(x0.is_finite() && x1.is_finite()) || x1 <= x0 {
        x0 -= 1.0;
        x1 = x0 + 2.0;
    }

    let (mut y0, mut y1) = run.curve.target_range().unwrap_or((0.0, 1.0));
    if y1 <= y0 {
        y0 -= 1.0;
        y1 = y0 + 2.0;
    }
    let pad = ((y1 - y0).abs() * 0.05).max(1e-12);

    ChartSeries {
        points,
        x_bounds: [x0, x1],
        y_bounds: [y0 - pad, y1 + pad],
    }
}

#[derive(Debug, Clone, Copy)]
struct AxisInsets {
    left: u16,
    right: u16,
    top: u16,
    bottom: u16,
}

struct AxisLabels<'a> {
    x: &'a str,
    y: &'a str,
}

fn chart_layout(inner: Rect) -> (Rect, Option<AxisInsets>) {
    let insets = AxisInsets {
        left: 8,
        right: 2,
        top: 1,
        bottom: 2,
    };

    if inner.width <= insets.left + insets.right + 10 || inner.height <= insets.top + insets.bottom + 5 {
        return (inner, None);
    }

    let rect = Rect {
        x: inner.x + insets.left,
        y: inner.y + insets.top,
        width: inner.width - insets.left - insets.right,
        height: inner.height - insets.top - insets.bottom,
    };

    (rect, Some(insets))
}

fn draw_axis_ticks(
    frame: &mut ratatui::Frame<'_>,
    inner: Rect,
    chart: Rect,
    insets: AxisInsets,
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
    labels: AxisLabels<'_>,
) {
    let ticks = 5usize;
    let style = Style::default().fg(Color::Gray);

    for i in 0..ticks {
        let u = i as f64 / (ticks as f64 - 1.0);
        let x_val = x_bounds[0] + u * (x_bounds[1] - x_bounds[0]);
        let x = chart.x + ((chart.width - 1) as f64 * u).round() as u16;
        let label = format!("{x_val:.0}");
        let label_len = label.len() as u16;
        let start = x.saturating_sub(label_len / 2);
        let y = chart.y + chart.height;
        if y >= inner.y + inner.height - 1 {
            continue;
        }
        frame.render_widget(
            Paragraph::new(label).style(style),
            Rect {
                x: start,
                y,
                width: label_len,
                height: 1,
            },
        );
    }

    for i in 0..ticks {
        let u = i as f64 / (ticks as f64 - 1.0);
        let y_val = y_bounds[0] + u * (y_bounds[1] - y_bounds[0]);
        let y = chart.y + (chart.height - 1) - ((chart.height - 1) as f64 * u).round() as u16;
        let label = format!("{y_val:.0}");
        let label_len = label.len() as u16;
        let x = inner.x + insets.left.saturating_sub(1);
        let start = x.saturating_sub(label_len);
        if start < inner.x {
            continue;
        }
        frame.render_widget(
            Paragraph::new(label).style(style),
            Rect {
                x: start,
                y,
                width: label_len,
                height: 1,
            },
        );
    }

    let x_label = Paragraph::new(labels.x.to_string())
        .alignment(Alignment::Center)
        .style(style);
    let x_rect = Rect {
        x: chart.x,
        y: chart.y + chart.height + 1,
        width: chart.width,
        height: 1,
    };
    if x_rect.y < inner.y + inner.height {
        frame.render_widget(x_label, x_rect);
    }

    let y_label = Paragraph::new(labels.y.to_string()).style(style.add_modifier(Modifier::BOLD));
    let y_rect = Rect {
        x: inner.x,
        y: inner.y,
        width: insets.left.saturating_sub(1),
        height: 1,
    };
    frame.render_widget(y_label, y_rect);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LifterProfile, Sex};

    fn app() -> App {
        App::new(CurveConfig {
            step: 10.0,
            ..CurveConfig::default()
        })
    }

    #[test]
    fn starts_with_a_curve_and_first_hover() {
        let app = app();
        let run = app.run.as_ref().unwrap();
        assert_eq!(run.curve.len(), 71);
        let hover = app.hover().unwrap();
        assert!(hover.starts_with("170 lb woman lifting 100 lb"), "{hover}");
    }

    #[test]
    fn bodyweight_moves_and_clamps() {
        let mut app = app();
        app.handle_key(KeyCode::Right);
        assert_eq!(app.config.lifter1.bodyweight, 171.0);
        app.handle_key(KeyCode::PageDown);
        assert_eq!(app.config.lifter1.bodyweight, 161.0);
        for _ in 0..30 {
            app.handle_key(KeyCode::PageUp);
        }
        assert_eq!(app.config.lifter1.bodyweight, 400.0);
    }

    #[test]
    fn sex_field_toggles_and_swap_exchanges_lifters() {
        let mut app = app();
        app.handle_key(KeyCode::Down);
        app.handle_key(KeyCode::Left);
        assert_eq!(app.config.lifter1.sex, Sex::Male);

        app.handle_key(KeyCode::Char('s'));
        assert_eq!(
            app.config.lifter1,
            LifterProfile {
                bodyweight: 225.0,
                sex: Sex::Male
            }
        );
        assert_eq!(app.config.lifter2.bodyweight, 170.0);
    }

    #[test]
    fn cursor_stays_within_the_curve() {
        let mut app = app();
        for _ in 0..FIELD_CURSOR {
            app.handle_key(KeyCode::Down);
        }
        app.handle_key(KeyCode::Left);
        assert_eq!(app.cursor, 0);
        for _ in 0..10 {
            app.handle_key(KeyCode::PageUp);
        }
        assert_eq!(app.cursor, 70);
        assert!(app.hover().unwrap().contains("lifting 800 lb"));
    }

    #[test]
    fn starting_bodyweights_are_clamped_to_the_controls() {
        let app = App::new(CurveConfig {
            unit: MassUnit::Kilogram,
            step: 50.0,
            ..CurveConfig::default()
        });
        assert_eq!(app.config.lifter1.bodyweight, 170.0);
        assert_eq!(app.config.lifter2.bodyweight, 181.0);

        let mut app = App::new(CurveConfig {
            lifter1: LifterProfile {
                bodyweight: 60.0,
                sex: Sex::Female,
            },
            step: 10.0,
            ..CurveConfig::default()
        });
        assert_eq!(app.config.lifter1.bodyweight, 100.0);
        app.handle_key(KeyCode::Right);
        assert_eq!(app.config.lifter1.bodyweight, 101.0);
    }

    #[test]
    fn quit_keys() {
        let mut app = app();
        assert!(!app.handle_key(KeyCode::Char('z')));
        assert!(app.handle_key(KeyCode::Char('q')));
    }

    #[test]
    fn chart_bounds_are_padded() {
        let app = app();
        let series = chart_series(app.run.as_ref().unwrap());
        assert_eq!(series.x_bounds, [100.0, 800.0]);
        let (lo, hi) = app.run.as_ref().unwrap().curve.target_range().unwrap();
        assert!(series.y_bounds[0] < lo && series.y_bounds[1] > hi);
    }
}

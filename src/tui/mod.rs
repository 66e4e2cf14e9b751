//! Ratatui-based terminal dashboard.
//!
//! The TUI provides a settings panel for the date range and the season,
//! weather and day-type selections, then renders KPIs, the daily trend, grouped
//! averages and the hourly pattern. A second view shows the filtered rows.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use plotters::style::RGBColor;
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Clear, List, ListItem, ListState, Paragraph, Row, Table},
};
use tracing::{debug, info};

use crate::analysis::{Filter, GroupMean};
use crate::app::pipeline::{Dashboard, build_dashboard, load_dataset};
use crate::domain::{Category, DashboardConfig, Dataset, DayType, Observation, Season, Weather};
use crate::error::{AppError, EXIT_RUNTIME};
use crate::io::DatasetCache;
use crate::report::{fmt_opt, fmt_thousands};

mod plotters_chart;

use plotters_chart::{LinePlottersChart, XAxis, line_bounds};

/// Rows moved per PgUp/PgDn in the raw data view.
const PAGE: usize = 10;

/// Start the TUI.
///
/// The dataset is loaded before the terminal is touched: on failure the caller
/// prints one error and no dashboard is drawn.
pub fn run(config: DashboardConfig) -> Result<(), AppError> {
    let mut cache: DatasetCache = DatasetCache::default();
    let dataset = load_dataset(&mut cache, &config)?;
    let filter = Filter::from_selection(&config.selection, &dataset);

    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(EXIT_RUNTIME, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(dataset, filter);
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(EXIT_RUNTIME, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(EXIT_RUNTIME, format!("Failed to enter alternate screen: {e}")));
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

/// One row of the settings panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SettingsItem {
    From,
    To,
    Season(Season),
    Weather(Weather),
    DayType(DayType),
}

impl SettingsItem {
    fn all() -> Vec<SettingsItem> {
        let mut items = vec![SettingsItem::From, SettingsItem::To];
        items.extend(Season::ALL.iter().copied().map(SettingsItem::Season));
        items.extend(Weather::ALL.iter().copied().map(SettingsItem::Weather));
        items.extend(DayType::ALL.iter().copied().map(SettingsItem::DayType));
        items
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum View {
    Charts,
    Raw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RawSource {
    Daily,
    Hourly,
}

struct App {
    dataset: Arc<Dataset>,
    filter: Filter,
    /// Bounds the date inputs are clamped to.
    span: Option<(NaiveDate, NaiveDate)>,
    items: Vec<SettingsItem>,
    selected: usize,
    editing_date: bool,
    date_input: String,
    view: View,
    raw_source: RawSource,
    scroll: usize,
    status: String,
}

impl App {
    fn new(dataset: Arc<Dataset>, filter: Filter) -> Self {
        let span = dataset.date_span();
        let status = format!(
            "Loaded {} days / {} hourly rows.",
            fmt_thousands(dataset.daily.len() as u64),
            fmt_thousands(dataset.hourly.len() as u64)
        );
        Self {
            dataset,
            filter,
            span,
            items: SettingsItem::all(),
            selected: 0,
            editing_date: false,
            date_input: String::new(),
            view: View::Charts,
            raw_source: RawSource::Daily,
            scroll: 0,
            status,
        }
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(EXIT_RUNTIME, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(EXIT_RUNTIME, format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::new(EXIT_RUNTIME, format!("Event read error: {e}")))? {
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
        info!("dashboard closed");
        Ok(())
    }

    /// Returns `true` when the app should quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        if self.editing_date {
            self.handle_date_edit(code);
            return false;
        }

        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Up => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down => {
                if self.selected + 1 < self.items.len() {
                    self.selected += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.activate_selected(),
            KeyCode::Char('a') => self.select_all_in_group(),
            KeyCode::Char('r') => {
                self.filter = Filter::full_span(&self.dataset);
                self.filters_changed("Filters reset.");
            }
            KeyCode::Tab => {
                self.view = match self.view {
                    View::Charts => View::Raw,
                    View::Raw => View::Charts,
                };
                self.scroll = 0;
            }
            KeyCode::Char('h') if self.view == View::Raw => {
                self.raw_source = match self.raw_source {
                    RawSource::Daily => RawSource::Hourly,
                    RawSource::Hourly => RawSource::Daily,
                };
                self.scroll = 0;
            }
            KeyCode::PageDown if self.view == View::Raw => self.scroll = self.scroll.saturating_add(PAGE),
            KeyCode::PageUp if self.view == View::Raw => self.scroll = self.scroll.saturating_sub(PAGE),
            _ => {}
        }

        false
    }

    fn activate_selected(&mut self) {
        match self.items[self.selected] {
            SettingsItem::From => self.start_date_edit(self.filter.date_min),
            SettingsItem::To => self.start_date_edit(self.filter.date_max),
            SettingsItem::Season(s) => {
                toggle(&mut self.filter.seasons, s);
                self.filters_changed(&format!("season {}: {}", s.label(), on_off(self.filter.seasons.contains(&s))));
            }
            SettingsItem::Weather(w) => {
                toggle(&mut self.filter.weather, w);
                self.filters_changed(&format!("weather {}: {}", w.label(), on_off(self.filter.weather.contains(&w))));
            }
            SettingsItem::DayType(d) => {
                toggle(&mut self.filter.day_types, d);
                self.filters_changed(&format!("day type {}: {}", d.label(), on_off(self.filter.day_types.contains(&d))));
            }
        }
    }

    fn select_all_in_group(&mut self) {
        match self.items[self.selected] {
            SettingsItem::From | SettingsItem::To => return,
            SettingsItem::Season(_) => self.filter.seasons = Season::ALL.iter().copied().collect(),
            SettingsItem::Weather(_) => self.filter.weather = Weather::ALL.iter().copied().collect(),
            SettingsItem::DayType(_) => self.filter.day_types = DayType::ALL.iter().copied().collect(),
        }
        self.filters_changed("Selected all.");
    }

    fn start_date_edit(&mut self, current: NaiveDate) {
        self.editing_date = true;
        self.date_input = current.format("%Y-%m-%d").to_string();
        self.status = "Editing date (YYYY-MM-DD). Enter to apply, Esc to cancel.".to_string();
    }

    fn handle_date_edit(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => {
                self.editing_date = false;
                self.status = "Date edit canceled.".to_string();
            }
            KeyCode::Enter => {
                self.editing_date = false;
                self.apply_date_input();
            }
            KeyCode::Backspace => {
                self.date_input.pop();
            }
            KeyCode::Char(c) => {
                if c.is_ascii_digit() || c == '-' {
                    self.date_input.push(c);
                }
            }
            _ => {}
        }
    }

    fn apply_date_input(&mut self) {
        let trimmed = self.date_input.trim();
        let date = match NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
            Ok(d) => d,
            Err(e) => {
                self.status = format!("Invalid date '{trimmed}': {e}");
                return;
            }
        };
        let date = match self.span {
            Some((lo, hi)) => date.clamp(lo, hi),
            None => date,
        };

        match self.items[self.selected] {
            SettingsItem::From => self.filter.date_min = date,
            SettingsItem::To => self.filter.date_max = date,
            _ => return,
        }

        if self.filter.date_min > self.filter.date_max {
            self.filters_changed("Start date is after end date; nothing matches.");
        } else {
            self.filters_changed(&format!("Dates: {} to {}", self.filter.date_min, self.filter.date_max));
        }
    }

    fn filters_changed(&mut self, status: &str) {
        self.scroll = 0;
        self.status = status.to_string();
        debug!(filter = ?self.filter, "filter changed");
    }

    fn draw(&self, frame: &mut ratatui::Frame<'_>) {
        // Full recomputation from the shared dataset on every redraw.
        let dash = build_dashboard(&self.dataset, &self.filter);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(frame.area());

        self.draw_header(frame, chunks[0]);
        draw_kpis(frame, chunks[1], &dash);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(30)])
            .split(chunks[2]);

        match self.view {
            View::Charts => draw_charts(frame, body[0], &dash),
            View::Raw => self.draw_raw(frame, body[0], &dash),
        }
        self.draw_settings(frame, body[1]);
        self.draw_footer(frame, chunks[3]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let line = Line::from(vec![
            Span::styled("Bike Sharing Analysis Dashboard", Style::default().fg(Color::Cyan)),
            Span::raw("  "),
            Span::styled(
                crate::report::format_filter(&self.filter).trim_end().to_string(),
                Style::default().fg(Color::Gray),
            ),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_raw(&self, frame: &mut ratatui::Frame<'_>, area: Rect, dash: &Dashboard<'_>) {
        match self.raw_source {
            RawSource::Daily => draw_table(frame, area, "Daily Data", dash.daily.headers, dash.daily.iter(), dash.daily.len(), self.scroll),
            RawSource::Hourly => draw_table(frame, area, "Hourly Data", dash.hourly.headers, dash.hourly.iter(), dash.hourly.len(), self.scroll),
        }
    }

    fn draw_settings(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let items: Vec<ListItem> = self
            .items
            .iter()
            .enumerate()
            .map(|(idx, item)| {
                let text = match *item {
                    SettingsItem::From => {
                        let value = if self.editing_date && idx == self.selected {
                            format!("{}_", self.date_input)
                        } else {
                            self.filter.date_min.to_string()
                        };
                        format!("From: {value}")
                    }
                    SettingsItem::To => {
                        let value = if self.editing_date && idx == self.selected {
                            format!("{}_", self.date_input)
                        } else {
                            self.filter.date_max.to_string()
                        };
                        format!("To:   {value}")
                    }
                    SettingsItem::Season(s) => check_line("Season", s, &self.filter.seasons),
                    SettingsItem::Weather(w) => check_line("Weather", w, &self.filter.weather),
                    SettingsItem::DayType(d) => check_line("Days", d, &self.filter.day_types),
                };
                ListItem::new(text)
            })
            .collect();

        let list = List::new(items)
            .block(Block::default().title("Filters").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ListState::default();
        state.select(Some(self.selected));
        frame.render_stateful_widget(list, area, &mut state);

        if self.editing_date {
            let hint = Paragraph::new("Editing date…")
                .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
            let rect = Rect {
                x: area.x + 2,
                y: area.y + area.height.saturating_sub(2),
                width: area.width.saturating_sub(4),
                height: 1,
            };
            frame.render_widget(hint, rect);
        }
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = match self.view {
            View::Charts => "↑/↓ select  Space toggle  Enter edit date  a all  r reset  Tab raw data  q quit",
            View::Raw => "↑/↓ select  Space toggle  h daily/hourly  PgUp/PgDn scroll  Tab charts  q quit",
        };
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

fn draw_kpis(frame: &mut ratatui::Frame<'_>, area: Rect, dash: &Dashboard<'_>) {
    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    let kpis = [
        ("Total Bike Rentals", fmt_thousands(dash.kpis.total)),
        ("Average Daily Rentals", fmt_opt(dash.kpis.average)),
        ("Max Daily Rentals", fmt_opt(dash.kpis.max.map(u64::from))),
        ("Total Days Analyzed", fmt_thousands(dash.kpis.count as u64)),
    ];

    for ((title, value), cell) in kpis.into_iter().zip(cells.iter()) {
        let p = Paragraph::new(Span::styled(
            value,
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center)
        .block(Block::default().title(title).borders(Borders::ALL));
        frame.render_widget(p, *cell);
    }
}

fn draw_charts(frame: &mut ratatui::Frame<'_>, area: Rect, dash: &Dashboard<'_>) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Percentage(30),
            Constraint::Percentage(30),
        ])
        .split(area);
    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);
    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[2]);

    let (daily, daily_axis) = daily_chart_series(&dash.daily_series);
    draw_line_chart(frame, rows[0], "Daily Bike Rental Trends", &daily, daily_axis, "rentals", RGBColor(0, 255, 255));

    draw_group_bars(frame, middle[0], "Average Rentals by Weather Condition", &dash.by_weather, |w| w.label().to_string());

    let hourly: Vec<(f64, f64)> = dash
        .hourly_pattern
        .iter()
        .map(|g| (f64::from(g.key), g.mean))
        .collect();
    draw_line_chart(frame, middle[1], "Average Hourly Rental Pattern", &hourly, XAxis::Hour, "avg rentals", RGBColor(255, 165, 0));

    draw_group_bars(frame, bottom[0], "Average Rentals by Season", &dash.by_season, |s| s.label().to_string());
    draw_group_bars(frame, bottom[1], "Working Days vs Weekends", &dash.by_day_type, |d| d.label().to_string());
}

/// Daily series as (days since first date, count).
fn daily_chart_series(series: &[(NaiveDate, u32)]) -> (Vec<(f64, f64)>, XAxis) {
    let Some(&(origin, _)) = series.first() else {
        return (Vec::new(), XAxis::Hour);
    };
    let points = series
        .iter()
        .map(|&(d, c)| ((d - origin).num_days() as f64, f64::from(c)))
        .collect();
    (points, XAxis::Days(origin))
}

fn draw_line_chart(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    title: &str,
    series: &[(f64, f64)],
    x_axis: XAxis,
    y_label: &str,
    color: RGBColor,
) {
    let block = Block::default().title(title).borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    frame.render_widget(Clear, inner);

    let Some((x_bounds, y_bounds)) = line_bounds(series) else {
        frame.render_widget(no_data(), inner);
        return;
    };

    let widget = LinePlottersChart {
        series,
        x_bounds,
        y_bounds,
        x_axis,
        y_label,
        color,
    };
    frame.render_widget(widget, inner);
}

fn draw_group_bars<K: Copy>(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    title: &str,
    groups: &[GroupMean<K>],
    label: impl Fn(K) -> String,
) {
    let block = Block::default().title(title).borders(Borders::ALL);
    if groups.is_empty() {
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(no_data(), inner);
        return;
    }

    let bars: Vec<Bar> = groups
        .iter()
        .map(|g| {
            let value = g.mean.round() as u64;
            Bar::default()
                .value(value)
                .label(Line::from(label(g.key)))
                .text_value(fmt_thousands(value))
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(0)
        .bar_style(Style::default().fg(Color::Cyan))
        .value_style(Style::default().fg(Color::Black).bg(Color::Cyan))
        .data(BarGroup::default().bars(&bars));
    frame.render_widget(chart, area);
}

fn draw_table<'a, R: Observation + 'a>(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    title: &str,
    headers: &csv::StringRecord,
    rows: impl Iterator<Item = &'a R>,
    total: usize,
    scroll: usize,
) {
    let block = Block::default()
        .title(format!("{title} ({} rows)", fmt_thousands(total as u64)))
        .borders(Borders::ALL);
    if total == 0 {
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(no_data(), inner);
        return;
    }

    // Header row + borders.
    let visible = area.height.saturating_sub(3) as usize;
    let start = scroll.min(total.saturating_sub(1));
    let body: Vec<Row> = rows
        .skip(start)
        .take(visible)
        .map(|r| Row::new(r.raw().iter().map(str::to_string).collect::<Vec<_>>()))
        .collect();

    let widths = headers.iter().map(|h| Constraint::Length(h.len().max(10) as u16));
    let table = Table::new(body, widths)
        .header(
            Row::new(headers.iter().map(str::to_string).collect::<Vec<_>>())
                .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        )
        .block(block);
    frame.render_widget(table, area);
}

fn no_data() -> Paragraph<'static> {
    Paragraph::new(Text::from("No data for the current filters."))
        .style(Style::default().fg(Color::Yellow))
}

fn check_line<C: Category>(group: &str, value: C, selected: &std::collections::BTreeSet<C>) -> String {
    let mark = if selected.contains(&value) { "[x]" } else { "[ ]" };
    format!("{group:<8}{mark} {}", value.label())
}

fn toggle<C: Category>(set: &mut std::collections::BTreeSet<C>, value: C) {
    if !set.remove(&value) {
        set.insert(value);
    }
}

fn on_off(on: bool) -> &'static str {
    if on { "on" } else { "off" }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        let start = NaiveDate::from_ymd_opt(2011, 1, 1).unwrap();
        let dataset = Arc::new(crate::data::generate(start, 60, 5).unwrap());
        let filter = Filter::full_span(&dataset);
        App::new(dataset, filter)
    }

    fn select(app: &mut App, item: SettingsItem) {
        app.selected = app.items.iter().position(|i| *i == item).unwrap();
    }

    #[test]
    fn space_toggles_a_category() {
        let mut app = app();
        select(&mut app, SettingsItem::Season(Season::Winter));
        app.handle_key(KeyCode::Char(' '));
        assert!(!app.filter.seasons.contains(&Season::Winter));
        app.handle_key(KeyCode::Char(' '));
        assert!(app.filter.seasons.contains(&Season::Winter));
    }

    #[test]
    fn select_all_restores_a_cleared_group() {
        let mut app = app();
        app.filter.weather.clear();
        select(&mut app, SettingsItem::Weather(Weather::Mist));
        app.handle_key(KeyCode::Char('a'));
        assert_eq!(app.filter.weather.len(), Weather::ALL.len());
    }

    #[test]
    fn date_edit_applies_and_clamps_to_the_dataset() {
        let mut app = app();
        select(&mut app, SettingsItem::From);
        app.handle_key(KeyCode::Enter);
        assert!(app.editing_date);

        app.date_input.clear();
        for c in "2010-06-01".chars() {
            app.handle_key(KeyCode::Char(c));
        }
        app.handle_key(KeyCode::Enter);
        assert!(!app.editing_date);
        assert_eq!(app.filter.date_min, NaiveDate::from_ymd_opt(2011, 1, 1).unwrap());

        select(&mut app, SettingsItem::To);
        app.handle_key(KeyCode::Enter);
        app.date_input = "2011-01-31".to_string();
        app.handle_key(KeyCode::Enter);
        assert_eq!(app.filter.date_max, NaiveDate::from_ymd_opt(2011, 1, 31).unwrap());

        let dash = build_dashboard(&app.dataset, &app.filter);
        assert_eq!(dash.kpis.count, 31);
    }

    #[test]
    fn invalid_date_keeps_the_filter() {
        let mut app = app();
        let before = app.filter.clone();
        select(&mut app, SettingsItem::To);
        app.handle_key(KeyCode::Enter);
        app.date_input = "2011-13-01".to_string();
        app.handle_key(KeyCode::Enter);
        assert_eq!(app.filter, before);
        assert!(app.status.starts_with("Invalid date"));
    }

    #[test]
    fn escape_cancels_and_q_quits() {
        let mut app = app();
        select(&mut app, SettingsItem::From);
        app.handle_key(KeyCode::Enter);
        assert!(!app.handle_key(KeyCode::Char('q')));
        app.handle_key(KeyCode::Esc);
        assert!(!app.editing_date);
        assert!(app.handle_key(KeyCode::Char('q')));
    }

    #[test]
    fn reset_restores_the_full_span() {
        let mut app = app();
        app.filter.seasons.clear();
        app.filter.date_max = app.filter.date_min;
        app.handle_key(KeyCode::Char('r'));
        assert_eq!(app.filter, Filter::full_span(&app.dataset));
    }

    #[test]
    fn raw_view_navigation() {
        let mut app = app();
        app.handle_key(KeyCode::Tab);
        assert_eq!(app.view, View::Raw);
        app.handle_key(KeyCode::PageDown);
        assert_eq!(app.scroll, PAGE);
        app.handle_key(KeyCode::Char('h'));
        assert_eq!(app.raw_source, RawSource::Hourly);
        assert_eq!(app.scroll, 0);
    }

    #[test]
    fn daily_series_is_offset_from_the_first_date() {
        let d = |day| NaiveDate::from_ymd_opt(2011, 1, day).unwrap();
        let (points, axis) = daily_chart_series(&[(d(1), 10), (d(4), 20)]);
        assert_eq!(points, vec![(0.0, 10.0), (3.0, 20.0)]);
        assert_eq!(axis, XAxis::Days(d(1)));
    }
}

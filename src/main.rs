use std::io;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols;
use ratatui::widgets::{
    Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Clear, Dataset, GraphType, Paragraph,
};

use ufc_terminal::config::AppConfig;
use ufc_terminal::detail::fighter_detail_sections;
use ufc_terminal::export::export_views;
use ufc_terminal::roster::load_roster;
use ufc_terminal::state::AppState;
use ufc_terminal::views::{AxisRange, CoordinateSeries, DerivedView, ViewMode, WeightclassCount};

const GROUP_COLORS: [Color; 8] = [
    Color::Red,
    Color::Green,
    Color::Yellow,
    Color::Blue,
    Color::Magenta,
    Color::Cyan,
    Color::LightRed,
    Color::LightGreen,
];

struct App {
    state: AppState,
    config: AppConfig,
    should_quit: bool,
}

impl App {
    fn new(state: AppState, config: AppConfig) -> Self {
        Self {
            state,
            config,
            should_quit: false,
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('1') => self.state.set_view_mode(ViewMode::WeightclassCounts),
            KeyCode::Char('2') => self.state.set_view_mode(ViewMode::DefenceVsWeight),
            KeyCode::Char('3') => self.state.set_view_mode(ViewMode::TakedownAccVsDef),
            KeyCode::Char('4') => self.state.set_view_mode(ViewMode::StrikesVsTakedowns),
            KeyCode::Tab => self.state.cycle_view_next(),
            KeyCode::BackTab => self.state.cycle_view_prev(),
            KeyCode::Char('j') | KeyCode::Down => self.state.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.state.select_prev(),
            KeyCode::Enter | KeyCode::Char('d') => self.state.select_fighter_under_cursor(),
            KeyCode::Char('c') | KeyCode::Esc => self.state.clear_fighter(),
            KeyCode::Char('x') | KeyCode::Char('X') => self.export(),
            KeyCode::Char('?') => self.state.help_overlay = !self.state.help_overlay,
            _ => {}
        }
    }

    fn export(&mut self) {
        let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S").to_string();
        let path = self.config.export_path(&stamp);
        match export_views(&path, self.state.roster()) {
            Ok(report) => self.state.push_log(format!(
                "[INFO] Exported {} fighters, {} weightclasses, {} points to {}",
                report.fighter_rows,
                report.weightclass_rows,
                report.coordinate_rows,
                path.display()
            )),
            Err(err) => self.state.push_log(format!("[WARN] Export failed: {err:#}")),
        }
    }
}

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let config = AppConfig::from_env().with_args(std::env::args().skip(1));
    let roster = load_roster(&config.dataset_path)?;

    let mut state = AppState::new(roster);
    state.push_log(format!(
        "[INFO] Loaded {} fighters from {}",
        state.roster().len(),
        config.dataset_path.display()
    ));
    let dups = state.roster().duplicate_keys();
    if !dups.is_empty() {
        state.push_log(format!(
            "[WARN] Duplicate roster keys: ids {:?}, names {:?}; lookups use the first match",
            dups.ids, dups.names
        ));
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let mut app = App::new(state, config);
    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    let tick_rate = app.config.tick_rate;
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| ui(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(4),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let header = Paragraph::new(header_text(&app.state))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(chunks[1]);
    render_ranking(frame, body[0], &app.state);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(60), Constraint::Min(8)])
        .split(body[1]);
    render_view(frame, right[0], &app.state);
    render_detail(frame, right[1], &app.state);

    let console = Paragraph::new(console_text(&app.state))
        .block(Block::default().title("Console").borders(Borders::ALL));
    frame.render_widget(console, chunks[2]);

    let footer = Paragraph::new(footer_text());
    frame.render_widget(footer, chunks[3]);

    if app.state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn header_text(state: &AppState) -> String {
    let line1 = format!(
        "  [X]  UFC TOP FIGHTERS | {} ranked | View: {}",
        state.roster().len(),
        state.view_mode().label()
    );
    let line2 = " /| |\\".to_string();
    let line3 = "  / \\".to_string();
    format!("{line1}\n{line2}\n{line3}")
}

fn footer_text() -> &'static str {
    "j/k/↑/↓ Move | Enter Select | c Clear | 1-4/Tab View | x Export | ? Help | q Quit"
}

fn ranking_columns() -> [Constraint; 6] {
    [
        Constraint::Length(4),
        Constraint::Min(16),
        Constraint::Length(9),
        Constraint::Length(7),
        Constraint::Length(7),
        Constraint::Min(12),
    ]
}

fn render_ranking(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default().title("Top Fighters").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(inner);

    let widths = ranking_columns();
    render_ranking_header(frame, sections[0], &widths);

    let list_area = sections[1];
    if state.ranking().is_empty() {
        let empty = Paragraph::new("Roster is empty")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, list_area);
        return;
    }
    if list_area.height == 0 {
        return;
    }

    let visible = list_area.height as usize;
    let (start, end) = visible_range(state.cursor, state.ranking().len(), visible);
    let picked = state.selected_fighter_id();

    for (i, idx) in (start..end).enumerate() {
        let row_area = Rect {
            x: list_area.x,
            y: list_area.y + i as u16,
            width: list_area.width,
            height: 1,
        };
        let under_cursor = idx == state.cursor;
        let mut row_style = if under_cursor {
            Style::default().fg(Color::White).bg(Color::DarkGray)
        } else {
            Style::default()
        };
        let row = &state.ranking()[idx];
        if picked == Some(row.id) {
            row_style = row_style.add_modifier(Modifier::BOLD);
        }
        if under_cursor {
            frame.render_widget(Block::default().style(row_style), row_area);
        }

        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(widths)
            .split(row_area);

        render_cell_text(frame, cols[0], &row.id.to_string(), row_style);
        render_cell_text(frame, cols[1], &row.name, row_style);
        render_cell_text(frame, cols[2], &row.record, row_style);
        render_cell_text(frame, cols[3], &fmt_opt(row.height_cm, 0), row_style);
        render_cell_text(frame, cols[4], &fmt_opt(row.weight_kg, 1), row_style);
        render_cell_text(frame, cols[5], &row.weightclass, row_style);
    }
}

fn render_ranking_header(frame: &mut Frame, area: Rect, widths: &[Constraint]) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(widths)
        .split(area);
    let style = Style::default().add_modifier(Modifier::BOLD);

    render_cell_text(frame, cols[0], "ID", style);
    render_cell_text(frame, cols[1], "Fighter", style);
    render_cell_text(frame, cols[2], "Record", style);
    render_cell_text(frame, cols[3], "cm", style);
    render_cell_text(frame, cols[4], "kg", style);
    render_cell_text(frame, cols[5], "Weight Class", style);
}

fn render_cell_text(frame: &mut Frame, area: Rect, text: &str, style: Style) {
    let text_area = Rect {
        x: area.x,
        y: area.y + (area.height / 2),
        width: area.width,
        height: 1,
    };
    let paragraph = Paragraph::new(text).style(style);
    frame.render_widget(paragraph, text_area);
}

fn visible_range(selected: usize, total: usize, visible: usize) -> (usize, usize) {
    if total == 0 {
        return (0, 0);
    }
    if total <= visible {
        return (0, total);
    }

    let mut start = selected.saturating_sub(visible / 2);
    if start + visible > total {
        start = total - visible;
    }
    (start, start + visible)
}

fn render_view(frame: &mut Frame, area: Rect, state: &AppState) {
    let title = state.view_mode().label();
    match state.view() {
        DerivedView::WeightclassCounts { counts } => render_counts(frame, area, title, counts),
        DerivedView::Coordinates(series) => render_scatter(frame, area, title, series),
    }
}

fn render_counts(frame: &mut Frame, area: Rect, title: &str, counts: &[WeightclassCount]) {
    let block = Block::default().title(title.to_string()).borders(Borders::ALL);
    if counts.is_empty() {
        let empty = Paragraph::new("No fighters to count")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let bars: Vec<Bar> = counts
        .iter()
        .map(|c| {
            Bar::default()
                .value(c.count as u64)
                .label(Line::from(c.weightclass.clone()))
                .style(Style::default().fg(Color::Red))
        })
        .collect();

    let inner_width = area.width.saturating_sub(2);
    let slots = counts.len() as u16;
    let bar_width = (inner_width / slots.max(1)).saturating_sub(1).clamp(1, 12);

    let chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width)
        .bar_gap(1)
        .value_style(Style::default().fg(Color::White).bg(Color::Red));
    frame.render_widget(chart, area);
}

fn render_scatter(frame: &mut Frame, area: Rect, title: &str, series: &CoordinateSeries) {
    let block = Block::default().title(title.to_string()).borders(Borders::ALL);

    let groups = series.groups();
    let mut buckets: Vec<(String, Vec<(f64, f64)>)> = if groups.is_empty() {
        vec![("Fighters".to_string(), Vec::with_capacity(series.points.len()))]
    } else {
        groups.iter().map(|g| (g.to_string(), Vec::new())).collect()
    };
    for point in &series.points {
        let Some(xy) = point.plottable() else {
            continue;
        };
        let slot = point
            .group
            .as_deref()
            .and_then(|g| groups.iter().position(|name| *name == g))
            .unwrap_or(0);
        buckets[slot].1.push(xy);
    }

    let all: Vec<(f64, f64)> = buckets.iter().flat_map(|(_, pts)| pts.iter().copied()).collect();
    if all.is_empty() {
        let empty = Paragraph::new("No plottable points")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let x_bounds = series
        .x_range
        .map(AxisRange::bounds)
        .unwrap_or_else(|| data_bounds(all.iter().map(|p| p.0)));
    let y_bounds = series
        .y_range
        .map(AxisRange::bounds)
        .unwrap_or_else(|| data_bounds(all.iter().map(|p| p.1)));

    let single = groups.is_empty();
    let datasets: Vec<Dataset> = buckets
        .iter()
        .enumerate()
        .map(|(idx, (name, pts))| {
            let color = if single {
                Color::Green
            } else {
                GROUP_COLORS[idx % GROUP_COLORS.len()]
            };
            Dataset::default()
                .name(name.clone())
                .marker(symbols::Marker::Dot)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(color))
                .data(pts)
        })
        .collect();

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .title(series.x_label)
                .style(Style::default().fg(Color::Gray))
                .bounds(x_bounds)
                .labels(axis_labels(x_bounds)),
        )
        .y_axis(
            Axis::default()
                .title(series.y_label)
                .style(Style::default().fg(Color::Gray))
                .bounds(y_bounds)
                .labels(axis_labels(y_bounds)),
        );
    frame.render_widget(chart, area);
}

fn data_bounds(values: impl Iterator<Item = f64>) -> [f64; 2] {
    let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !lo.is_finite() || !hi.is_finite() {
        return [0.0, 1.0];
    }
    let pad = ((hi - lo) * 0.05).max(0.5);
    [lo - pad, hi + pad]
}

fn axis_labels(bounds: [f64; 2]) -> Vec<Span<'static>> {
    let mid = (bounds[0] + bounds[1]) / 2.0;
    [bounds[0], mid, bounds[1]]
        .into_iter()
        .map(|v| Span::raw(format!("{v:.1}")))
        .collect()
}

fn render_detail(frame: &mut Frame, area: Rect, state: &AppState) {
    let Some(fighter) = state.fighter() else {
        let empty = Paragraph::new("No fighter selected (Enter to pick one)")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().title("Fighter").borders(Borders::ALL));
        frame.render_widget(empty, area);
        return;
    };

    let mut lines: Vec<Line> = Vec::new();
    if let Some(age) = fighter.age_on(chrono::Local::now().date_naive()) {
        lines.push(Line::from(format!("Age: {age}")));
    }
    for section in fighter_detail_sections(fighter) {
        lines.push(Line::styled(
            section.title,
            Style::default().add_modifier(Modifier::BOLD),
        ));
        for item in section.lines {
            lines.push(Line::from(format!("  {}: {}", item.label, item.value)));
        }
    }

    let detail = Paragraph::new(lines).block(
        Block::default()
            .title(format!("{} stats", fighter.name))
            .borders(Borders::ALL),
    );
    frame.render_widget(detail, area);
}

fn console_text(state: &AppState) -> String {
    if state.logs.is_empty() {
        return "No messages yet".to_string();
    }
    state
        .logs
        .iter()
        .rev()
        .take(2)
        .cloned()
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect::<Vec<_>>()
        .join("\n")
}

fn fmt_opt(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{v:.decimals$}"),
        _ => "-".to_string(),
    }
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "UFC Top Fighters - Help",
        "",
        "Ranking:",
        "  j/k or ↑/↓   Move cursor",
        "  Enter / d    Show fighter stats",
        "  c / Esc      Clear fighter",
        "",
        "Views:",
        "  1            Fighters per weightclass",
        "  2            Striking defence vs weight",
        "  3            Takedown accuracy vs defense",
        "  4            Strikes vs takedowns landed",
        "  Tab/S-Tab    Cycle views",
        "",
        "  x            Export workbook",
        "  ?            Toggle help",
        "  q            Quit",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}

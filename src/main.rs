use std::io;
use std::sync::mpsc;
use std::time::Duration;

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
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use matchday_terminal::config::AppConfig;
use matchday_terminal::feed;
use matchday_terminal::provider::{ScheduleProvider, provider_from_config};
use matchday_terminal::schedule::kickoff_time_label;
use matchday_terminal::seed::SeedProvider;
use matchday_terminal::selector::SelectorLevel;
use matchday_terminal::state::{
    AppState, Delta, LEAGUE_OPTIONS, ProviderCommand, Screen, apply_delta, screen_label,
};

struct App {
    state: AppState,
    should_quit: bool,
    cmd_tx: Option<mpsc::Sender<ProviderCommand>>,
}

impl App {
    fn new(cmd_tx: Option<mpsc::Sender<ProviderCommand>>) -> Self {
        Self {
            state: AppState::new(),
            should_quit: false,
            cmd_tx,
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('?') {
            self.state.help_overlay = !self.state.help_overlay;
            return;
        }
        match self.state.screen {
            Screen::Schedule => self.on_schedule_key(key),
            Screen::Customize => self.on_customize_key(key),
            Screen::Register => self.on_register_key(key),
        }
    }

    fn on_schedule_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('c') | KeyCode::Enter => self.state.open_customize(),
            KeyCode::Char('r') => self.request_fixtures(true),
            KeyCode::Char('j') | KeyCode::Down => self.state.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.state.select_prev(),
            _ => {}
        }
    }

    fn on_customize_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('c') | KeyCode::Esc => self.state.close_customize(),
            KeyCode::Char('a') => {
                self.request_catalog();
                self.state.open_register();
            }
            KeyCode::Char('x') | KeyCode::Delete | KeyCode::Backspace => {
                if self.state.remove_highlighted() {
                    self.request_fixtures(false);
                }
            }
            KeyCode::Char('j') | KeyCode::Down => self.state.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.state.select_prev(),
            _ => {}
        }
    }

    fn on_register_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.state.cancel_selector(),
            KeyCode::Enter => {
                let candidate = self.state.selector.candidate.clone();
                if self.state.commit_selector() {
                    if let Some(team) = candidate {
                        self.state
                            .push_log(format!("[INFO] Added {}", team.short_name));
                    }
                    self.request_fixtures(false);
                }
            }
            KeyCode::Tab | KeyCode::Char('j') | KeyCode::Down => self.state.select_next(),
            KeyCode::BackTab | KeyCode::Char('k') | KeyCode::Up => self.state.select_prev(),
            KeyCode::Char('l') | KeyCode::Right => self.state.step_selector(true),
            KeyCode::Char('h') | KeyCode::Left => self.state.step_selector(false),
            _ => {}
        }
    }

    fn request_fixtures(&mut self, announce: bool) {
        let cmd = self.state.fixtures_command();
        self.send(cmd, "Fixtures", announce);
    }

    fn request_catalog(&mut self) {
        let cmd = self.state.catalog_command();
        self.send(cmd, "Teams", false);
    }

    fn send(&mut self, cmd: ProviderCommand, what: &str, announce: bool) {
        let Some(tx) = &self.cmd_tx else {
            self.state
                .push_log(format!("[INFO] {what} fetch unavailable"));
            return;
        };
        if tx.send(cmd).is_err() {
            self.state
                .push_log(format!("[WARN] {what} request failed"));
        } else if announce {
            self.state.push_log(format!("[INFO] {what} request sent"));
        }
    }
}

fn main() -> io::Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let config = AppConfig::from_env();
    let mut startup_logs = Vec::new();
    let provider: Box<dyn ScheduleProvider> = match provider_from_config(&config) {
        Ok(provider) => provider,
        Err(err) => {
            startup_logs.push(format!("[WARN] {err:#}; using built-in seed data"));
            Box::new(SeedProvider::new())
        }
    };

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let (tx, rx) = mpsc::channel();
    let (cmd_tx, cmd_rx) = mpsc::channel();
    feed::spawn_provider(provider, tx, cmd_rx);

    let mut app = App::new(Some(cmd_tx));
    for line in startup_logs {
        app.state.push_log(line);
    }
    // Initial schedule for the (empty) selection.
    app.request_fixtures(false);
    let res = run_app(&mut terminal, &mut app, rx);

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

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    rx: mpsc::Receiver<Delta>,
) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);

    loop {
        while let Ok(delta) = rx.try_recv() {
            apply_delta(&mut app.state, delta);
        }

        terminal.draw(|f| ui(f, app))?;

        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
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
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(frame.size());

    let header = Paragraph::new(header_text(&app.state))
        .style(Style::default().fg(Color::Cyan))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    render_schedule(frame, chunks[1], &app.state);

    match app.state.screen {
        Screen::Schedule => {}
        Screen::Customize => render_customize(frame, chunks[1], &app.state),
        Screen::Register => {
            render_customize(frame, chunks[1], &app.state);
            render_register(frame, chunks[1], &app.state);
        }
    }

    let footer = Paragraph::new(footer_text(&app.state))
        .block(Block::default().borders(Borders::TOP));
    frame.render_widget(footer, chunks[2]);

    if app.state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn header_text(state: &AppState) -> String {
    let loading = if state.fixtures_loading {
        " | loading..."
    } else {
        ""
    };
    format!(
        " MATCHDAY | {} | Teams: {} | Fixtures: {}{loading}",
        screen_label(state.screen),
        state.selection.len(),
        state.fixture_count()
    )
}

fn footer_text(state: &AppState) -> String {
    let keys = match state.screen {
        Screen::Schedule => "c/Enter Customize | j/k Scroll | r Refresh | ? Help | q Quit",
        Screen::Customize => "a Add | x Remove | j/k Move | c/Esc Close | ? Help | q Quit",
        Screen::Register => "Tab/j/k Level | h/l/←/→ Browse | Enter Add | Esc Cancel",
    };
    let last = state
        .logs
        .back()
        .cloned()
        .unwrap_or_else(|| "No alerts yet".to_string());
    format!("{keys}\n{last}")
}

fn render_schedule(frame: &mut Frame, area: Rect, state: &AppState) {
    if state.fixtures.is_empty() {
        let empty = Paragraph::new("No Team Selected")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        frame.render_widget(empty, area);
        return;
    }

    let date_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let ours = Style::default().fg(Color::Yellow);

    let mut lines: Vec<Line> = Vec::with_capacity(state.fixture_count() + state.fixtures.len());
    for (date, fixtures) in &state.fixtures {
        lines.push(Line::from(Span::styled(date.clone(), date_style)));
        for fixture in fixtures {
            let (home_style, away_style) = if fixture.is_home {
                (ours, Style::default())
            } else {
                (Style::default(), ours)
            };
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(format!("{:>22}", fixture.home_team), home_style),
                Span::raw(format!("  {}  ", kickoff_time_label(fixture))),
                Span::styled(format!("{:<22}", fixture.away_team), away_style),
                Span::styled(
                    format!(" {}", fixture.competition),
                    Style::default().fg(Color::DarkGray),
                ),
            ]));
        }
    }

    let paragraph = Paragraph::new(lines).scroll((state.schedule_scroll, 0));
    frame.render_widget(paragraph, area);
}

fn render_customize(frame: &mut Frame, area: Rect, state: &AppState) {
    let popup = centered_rect(70, 80, area);
    frame.render_widget(Clear, popup);

    let mut lines: Vec<Line> = vec![
        Line::from("Choose & manage your favorite teams!"),
        Line::from(""),
    ];
    let groups = state.selection.by_league(&LEAGUE_OPTIONS);
    if groups.is_empty() {
        lines.push(Line::from(Span::styled(
            "No teams yet. Press a to add one.",
            Style::default().fg(Color::DarkGray),
        )));
    }
    let mut row = 0usize;
    for (option, teams) in groups {
        lines.push(Line::from(Span::styled(
            option.league,
            Style::default().add_modifier(Modifier::BOLD),
        )));
        for team in teams {
            let highlighted = row == state.customize_selected;
            let style = if highlighted {
                Style::default().fg(Color::Black).bg(Color::Cyan)
            } else {
                Style::default().fg(Color::Cyan)
            };
            let prefix = if highlighted { "> " } else { "  " };
            lines.push(Line::from(Span::styled(
                format!("{prefix}x {}", team.short_name),
                style,
            )));
            row += 1;
        }
    }

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .title("Customize Your Teams")
            .borders(Borders::ALL),
    );
    frame.render_widget(paragraph, popup);
}

fn render_register(frame: &mut Frame, area: Rect, state: &AppState) {
    let popup = centered_rect(50, 50, area);
    frame.render_widget(Clear, popup);

    let mut lines: Vec<Line> = Vec::new();
    if state.catalog_loading {
        lines.push(Line::from(Span::styled(
            "Loading teams...",
            Style::default().fg(Color::DarkGray),
        )));
    }
    for level in [
        SelectorLevel::Country,
        SelectorLevel::League,
        SelectorLevel::Team,
    ] {
        lines.push(Line::from(""));
        lines.push(carousel_line(state, level));
    }
    lines.push(Line::from(""));
    let candidate = match &state.selector.candidate {
        Some(team) => format!("Candidate: {} ({})", team.name, team.league),
        None => "Candidate: none".to_string(),
    };
    lines.push(Line::from(Span::styled(
        candidate,
        Style::default().fg(Color::Yellow),
    )));

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .title("Add Your Favorite Team!")
                .borders(Borders::ALL),
        );
    frame.render_widget(paragraph, popup);
}

fn carousel_line(state: &AppState, level: SelectorLevel) -> Line<'static> {
    let labels = state.selector.option_labels(level, &state.catalog);
    let focused = state.focus_level == level;
    let style = if focused {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let body = if labels.is_empty() {
        "(none)".to_string()
    } else {
        let idx = state
            .selector
            .current_index(level, &state.catalog)
            .unwrap_or(0);
        let label = labels.get(idx).cloned().unwrap_or_default();
        format!("< {label} >  {}/{}", idx + 1, labels.len())
    };
    Line::from(vec![
        Span::styled(format!("{:<8}", level.label()), Style::default().fg(Color::DarkGray)),
        Span::styled(body, style),
    ])
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "Matchday - Help",
        "",
        "Schedule:",
        "  c / Enter    Customize teams",
        "  j/k or ↑/↓   Scroll",
        "  r            Refresh fixtures",
        "",
        "Customize:",
        "  a            Add a team",
        "  x / Del      Remove highlighted team",
        "  c / Esc      Close",
        "",
        "Add team:",
        "  Tab / j / k  Switch country/league/team",
        "  h/l or ←/→   Browse options",
        "  Enter        Add candidate",
        "  Esc          Cancel",
        "",
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

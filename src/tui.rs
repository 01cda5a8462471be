use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};
use std::io::stdout;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

use crate::api::ApiClient;
use crate::classify::is_tax_id_shaped;
use crate::config::{Preferences, Theme};
use crate::i18n::Labels;
use crate::models::{CompanyStatus, NavTaxpayerResponse};
use crate::search::{Searcher, SearchUpdate};
use crate::state::{SearchState, GATED_FIELDS};

struct Palette {
    accent: Color,
    dim: Color,
    ok: Color,
    warn: Color,
    error: Color,
    info: Color,
}

impl Palette {
    fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                accent: Color::Yellow,
                dim: Color::DarkGray,
                ok: Color::Green,
                warn: Color::LightYellow,
                error: Color::LightRed,
                info: Color::LightBlue,
            },
            Theme::Light => Self {
                accent: Color::Yellow,
                dim: Color::Gray,
                ok: Color::Green,
                warn: Color::Yellow,
                error: Color::Red,
                info: Color::Blue,
            },
        }
    }
}

struct AppState {
    input: String,
    search: SearchState,
    searcher: Searcher,
    rx: mpsc::UnboundedReceiver<SearchUpdate>,
    highlighted: Option<usize>,
    labels: &'static Labels,
    palette: Palette,
}

impl AppState {
    fn submit(&mut self) {
        if let Some(submitted) = self.searcher.submit(&self.input) {
            self.search.begin(submitted);
            self.highlighted = None;
        }
    }

    fn drain_updates(&mut self) {
        while let Ok(update) = self.rx.try_recv() {
            self.search.apply(update);
        }
        // Rows may have been replaced under the highlight.
        if let Some(i) = self.highlighted {
            if i >= self.search.db_results().len() {
                self.highlighted = None;
            }
        }
    }

    fn next_row(&mut self) {
        let len = self.search.db_results().len();
        if len == 0 {
            return;
        }
        self.highlighted = Some(match self.highlighted {
            None => 0,
            Some(i) if i + 1 < len => i + 1,
            Some(i) => i,
        });
    }

    fn prev_row(&mut self) {
        self.highlighted = match self.highlighted {
            Some(0) | None => None,
            Some(i) => Some(i - 1),
        };
    }
}

pub fn run(client: Arc<ApiClient>, prefs: &Preferences) -> Result<()> {
    let (tx, rx) = mpsc::unbounded_channel();
    let mut app = AppState {
        input: String::new(),
        search: SearchState::default(),
        searcher: Searcher::new(client, tx),
        rx,
        highlighted: None,
        labels: prefs.lang.labels(),
        palette: Palette::for_theme(prefs.theme),
    };

    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = run_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    let mut list_state = ListState::default();

    loop {
        app.drain_updates();
        list_state.select(app.highlighted);
        terminal.draw(|frame| draw(frame, app, &mut list_state))?;

        if !event::poll(Duration::from_millis(50))? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => break,
                KeyCode::Esc => {
                    if app.search.selected_company().is_some() {
                        app.search.close_detail();
                    } else {
                        break;
                    }
                }
                KeyCode::Enter => {
                    if app.search.selected_company().is_some() {
                        // Detail overlay is read-only; Esc closes it.
                    } else if let Some(i) = app.highlighted {
                        app.search.select(i);
                    } else {
                        app.submit();
                    }
                }
                KeyCode::Down => app.next_row(),
                KeyCode::Up => app.prev_row(),
                KeyCode::Backspace => {
                    app.input.pop();
                    app.highlighted = None;
                }
                KeyCode::Char(c) => {
                    app.input.push(c);
                    app.highlighted = None;
                }
                _ => {}
            }
        }
    }
    Ok(())
}

fn draw(frame: &mut Frame, app: &AppState, list_state: &mut ListState) {
    let s = app.labels;
    let p = &app.palette;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // title + badge
            Constraint::Length(3), // search box
            Constraint::Length(1), // tip
            Constraint::Min(0),    // results
            Constraint::Length(1), // help
        ])
        .split(frame.area());

    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            s.page_title,
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(s.badge, Style::default().fg(p.info))),
    ]);
    frame.render_widget(header, chunks[0]);

    // Search box, with a live NAV marker whenever the text is tax-ID-shaped.
    let mut input_spans = if app.input.is_empty() {
        vec![Span::styled(s.search_placeholder, Style::default().fg(p.dim))]
    } else {
        vec![Span::raw(app.input.as_str())]
    };
    if is_tax_id_shaped(&app.input) {
        input_spans.push(Span::styled(
            "  [NAV]",
            Style::default().fg(p.info).add_modifier(Modifier::BOLD),
        ));
    }
    let input = Paragraph::new(Line::from(input_spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", s.search_button)),
    );
    frame.render_widget(input, chunks[1]);

    let tip = Paragraph::new(s.search_tip).style(Style::default().fg(p.dim));
    frame.render_widget(tip, chunks[2]);

    if app.search.selected_company().is_some() {
        draw_detail(frame, app, chunks[3]);
    } else {
        draw_results(frame, app, chunks[3], list_state);
    }

    let help = Paragraph::new(" Enter:search/open  Up/Down:select  Esc:close/quit  Ctrl-C:quit")
        .style(Style::default().fg(p.dim));
    frame.render_widget(help, chunks[4]);
}

fn draw_results(frame: &mut Frame, app: &AppState, area: Rect, list_state: &mut ListState) {
    let s = app.labels;
    let p = &app.palette;
    let mut top: Vec<Line> = Vec::new();

    if app.search.nav_pending() {
        top.push(Line::from(Span::styled(
            s.nav_querying,
            Style::default().fg(p.info),
        )));
        top.push(Line::from(""));
    }

    if let Some(nav) = app.search.nav_result() {
        top.extend(nav_card_lines(nav, s, p));
        top.push(Line::from(""));
    }

    if let Some(err) = app.search.nav_error() {
        top.push(Line::from(Span::styled(
            err.message(s),
            Style::default().fg(p.error),
        )));
        top.push(Line::from(""));
    }

    if app.search.db_pending() {
        top.push(Line::from(Span::styled(
            s.db_searching,
            Style::default().fg(p.dim),
        )));
    }

    if app.search.no_results() {
        top.push(Line::from(Span::styled(
            s.no_results_title,
            Style::default().add_modifier(Modifier::BOLD),
        )));
        for line in textwrap::fill(s.no_results_desc, 70).lines() {
            top.push(Line::from(Span::styled(
                line.to_string(),
                Style::default().fg(p.dim),
            )));
        }
    }

    if !app.search.has_searched() {
        top.extend(hint_lines(s, p));
    }

    let top_height = top.len() as u16;
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(top_height), Constraint::Min(0)])
        .split(area);

    frame.render_widget(Paragraph::new(top).wrap(Wrap { trim: false }), sections[0]);

    if app.search.db_results().is_empty() {
        return;
    }

    let items: Vec<ListItem> = app
        .search
        .db_results()
        .iter()
        .map(|c| {
            let status_style = match c.status_kind() {
                CompanyStatus::Active => Style::default().fg(p.ok),
                CompanyStatus::Terminated => Style::default().fg(p.error),
                CompanyStatus::Other => Style::default().fg(p.dim),
            };
            let mut meta = Vec::new();
            if let Some(form) = &c.legal_form {
                meta.push(form.clone());
            }
            if let Some(seat) = &c.registered_seat {
                meta.push(seat.clone());
            }
            ListItem::new(Line::from(vec![
                Span::styled(
                    c.name.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!("  [{}]", c.status), status_style),
                Span::styled(
                    format!("  {}", meta.join(" | ")),
                    Style::default().fg(p.dim),
                ),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(format!(
            " {} ({}) ",
            s.local_db_results,
            app.search.db_results().len()
        )))
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, sections[1], list_state);
}

fn nav_card_lines<'a>(
    nav: &'a NavTaxpayerResponse,
    s: &'static Labels,
    p: &Palette,
) -> Vec<Line<'a>> {
    let mut lines = Vec::new();
    lines.push(Line::from(Span::styled(
        s.nav_official_header,
        Style::default().fg(p.info).add_modifier(Modifier::BOLD),
    )));

    if let Some(name) = &nav.taxpayer_name {
        lines.push(Line::from(Span::styled(
            name.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        )));
    }
    if let Some(short) = nav.distinct_short_name() {
        lines.push(Line::from(Span::styled(short, Style::default().fg(p.dim))));
    }

    if let Some(detail) = &nav.tax_number_detail {
        lines.push(Line::from(format!(
            "{}: {}",
            s.label_tax_number,
            detail.formatted()
        )));
        if let Some(vat) = detail.is_vat_payer() {
            let (text, style) = if vat {
                (s.vat_yes, Style::default().fg(p.ok))
            } else {
                (s.vat_no, Style::default().fg(p.warn))
            };
            lines.push(Line::from(vec![
                Span::raw(format!("{}: ", s.label_vat_payer)),
                Span::styled(text, style),
            ]));
        }
    }

    if let Some(address) = &nav.taxpayer_address_formatted {
        lines.push(Line::from(format!("{}: {}", s.label_seat, address)));
    }

    if let Some(inc) = &nav.incorporation {
        lines.push(Line::from(format!(
            "{}: {}",
            s.label_type,
            s.incorporation(inc)
        )));
    }

    lines
}

fn hint_lines(s: &'static Labels, p: &Palette) -> Vec<Line<'static>> {
    let features = [
        (s.feature_tax_search, s.feature_tax_search_desc),
        (s.feature_name_search, s.feature_name_search_desc),
        (s.feature_official_data, s.feature_official_data_desc),
    ];
    let mut lines = vec![Line::from("")];
    for line in textwrap::fill(s.page_subtitle, 70).lines() {
        lines.push(Line::from(Span::styled(
            line.to_string(),
            Style::default().fg(p.dim),
        )));
    }
    lines.push(Line::from(""));
    for (label, desc) in features {
        lines.push(Line::from(vec![
            Span::styled(label, Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(format!("  {}", desc), Style::default().fg(p.dim)),
        ]));
    }
    lines
}

fn draw_detail(frame: &mut Frame, app: &AppState, area: Rect) {
    let s = app.labels;
    let p = &app.palette;
    let Some(company) = app.search.selected_company() else {
        return;
    };

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(Span::styled(
        company.name.clone(),
        Style::default().add_modifier(Modifier::BOLD),
    )));

    let mut meta = Vec::new();
    if let Some(form) = &company.legal_form {
        meta.push(form.clone());
    }
    if let Some(seat) = &company.registered_seat {
        meta.push(seat.clone());
    }
    if !meta.is_empty() {
        lines.push(Line::from(Span::styled(
            meta.join(" | "),
            Style::default().fg(p.dim),
        )));
    }
    lines.push(Line::from(""));

    // Gated placeholders: the same four fields for every company.
    for field in GATED_FIELDS {
        lines.push(Line::from(vec![
            Span::styled(
                format!("{:<20}", s.gated_field(field)),
                Style::default().fg(p.dim),
            ),
            Span::styled("••••••••", Style::default().fg(p.dim)),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        s.subscription_required,
        Style::default().fg(p.accent).add_modifier(Modifier::BOLD),
    )));
    for line in textwrap::fill(s.subscription_desc, 70).lines() {
        lines.push(Line::from(line.to_string()));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("-> {}", s.view_plans),
        Style::default().fg(p.accent),
    )));

    let detail = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL))
        .wrap(Wrap { trim: false });
    frame.render_widget(detail, area);
}

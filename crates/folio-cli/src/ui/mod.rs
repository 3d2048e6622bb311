//! TUI rendering: header, filter bar, panes and overlays.

pub mod picker;
pub mod portfolio_detail;
pub mod portfolio_list;

use chrono::Local;
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph},
};

use crate::app::{App, Screen};

// ─── Root draw ────────────────────────────────────────────────────────────────

/// Main draw function called each frame.
pub fn draw(f: &mut Frame, app: &App) {
  let area = f.area();

  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // header
      Constraint::Length(1), // active filters
      Constraint::Min(0),    // body
      Constraint::Length(1), // status bar
    ])
    .split(area);

  draw_header(f, rows[0], app);
  draw_filters(f, rows[1], app);
  draw_body(f, rows[2], app);
  draw_status(f, rows[3], app);

  if let Some(overlay) = app.overlay {
    picker::draw(f, area, app, overlay);
  }
}

// ─── Header ───────────────────────────────────────────────────────────────────

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
  let date = Local::now().format("%Y-%m-%d").to_string();
  let who = app
    .user
    .as_ref()
    .map(|u| match u.full_name() {
      name if name.is_empty() => u.email.clone(),
      name => name,
    })
    .unwrap_or_else(|| "guest".to_owned());

  let left = Span::styled(
    " folio  [?] help  [q] quit",
    Style::default()
      .fg(Color::White)
      .add_modifier(Modifier::BOLD),
  );
  let right = Span::styled(
    format!("{who}  {date} "),
    Style::default().fg(Color::Gray),
  );

  let left_width = left.width() as u16;
  let right_width = right.width() as u16;
  let pad = area
    .width
    .saturating_sub(left_width)
    .saturating_sub(right_width);

  let line = Line::from(vec![
    left,
    Span::raw(" ".repeat(pad as usize)),
    right,
  ]);

  let block = Block::default().style(Style::default().bg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(Paragraph::new(line), inner);
}

// ─── Filter summary ───────────────────────────────────────────────────────────

fn draw_filters(f: &mut Frame, area: Rect, app: &App) {
  let label = Style::default().fg(Color::DarkGray);
  let value = Style::default().fg(Color::Yellow);
  let join = |v: &[String]| if v.is_empty() { "any".to_owned() } else { v.join(", ") };

  let keyword = if app.keyword_active {
    format!("{}_", app.keyword)
  } else if app.keyword.is_empty() {
    "any".to_owned()
  } else {
    app.keyword.clone()
  };

  let line = Line::from(vec![
    Span::styled(" /keyword ", label),
    Span::styled(keyword, value),
    Span::styled("  y year ", label),
    Span::styled(join(app.years.selected()), value),
    Span::styled("  g genre ", label),
    Span::styled(join(app.genres.selected()), value),
    Span::styled(
      format!("  s skills {}/{} ", app.skills.len(), crate::app::MAX_FILTER_SKILLS),
      label,
    ),
    Span::styled(join(app.skills.selected()), value),
  ]);
  f.render_widget(Paragraph::new(line), area);
}

// ─── Body ─────────────────────────────────────────────────────────────────────

fn draw_body(f: &mut Frame, area: Rect, app: &App) {
  let cols = Layout::default()
    .direction(Direction::Horizontal)
    .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
    .split(area);

  portfolio_list::draw(f, cols[0], app);

  match &app.detail {
    Some(record) if app.screen == Screen::Detail => {
      portfolio_detail::draw(f, cols[1], app, record)
    }
    _ => draw_empty_detail(f, cols[1]),
  }
}

fn draw_empty_detail(f: &mut Frame, area: Rect) {
  let block = Block::default()
    .title(" Detail ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(
    Paragraph::new(Line::from(vec![Span::styled(
      "Select a portfolio and press Enter.",
      Style::default().fg(Color::DarkGray),
    )])),
    inner,
  );
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
  let (mode_label, hints) = match (&app.screen, app.overlay) {
    (_, Some(overlay)) => (
      "PICK",
      picker::hints(overlay),
    ),
    (Screen::Listing, None) if app.keyword_active => (
      "SEARCH",
      "Type to filter  Esc cancel  Enter done",
    ),
    (Screen::Listing, None) => (
      "LIST",
      "↑↓/jk navigate  / keyword  y year  g genre  s skills  c clear  Enter detail",
    ),
    (Screen::Detail, None) => (
      "DETAIL",
      "↑↓/jk scroll  Esc back  [ prev  ] next  q quit",
    ),
  };

  let status = if app.status_msg.is_empty() {
    hints.to_string()
  } else {
    app.status_msg.clone()
  };

  let mode_span = Span::styled(
    format!(" {mode_label} "),
    Style::default()
      .fg(Color::Black)
      .bg(Color::Cyan)
      .add_modifier(Modifier::BOLD),
  );
  let hint_span = Span::styled(
    format!("  {status}"),
    Style::default().fg(Color::Gray),
  );

  let line = Line::from(vec![mode_span, hint_span]);
  f.render_widget(
    Paragraph::new(line).style(Style::default().bg(Color::Black)),
    area,
  );
}

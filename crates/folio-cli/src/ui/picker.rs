//! Modal overlays: the three pickers and the help screen.

use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
};

use crate::app::{App, Overlay};

const HELP: &[(&str, &str)] = &[
  ("/", "filter by keyword (title or description)"),
  ("y", "pick graduation years"),
  ("g", "pick genres"),
  ("s", "pick skills (at most 5)"),
  ("c", "clear every filter"),
  ("Enter", "open the highlighted portfolio"),
  ("[ ]", "previous / next portfolio in detail"),
  ("Esc", "close a picker or go back"),
  ("q", "quit"),
];

/// Status-bar hints while `overlay` is open.
pub fn hints(overlay: Overlay) -> &'static str {
  match overlay {
    Overlay::YearPicker | Overlay::GenrePicker => "↑↓/jk move  Space/Enter toggle  Esc close",
    Overlay::SkillPicker => "Type to search  ↑↓ move  Enter add  Backspace remove  Esc close",
    Overlay::Help => "Any key closes",
  }
}

/// Render `overlay` centred over `area`.
pub fn draw(f: &mut Frame, area: Rect, app: &App, overlay: Overlay) {
  let popup = centered(area, 60, 60);
  f.render_widget(Clear, popup);

  let block = Block::default()
    .title(overlay.title())
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Cyan));
  let inner = block.inner(popup);
  f.render_widget(block, popup);

  match overlay {
    Overlay::Help => draw_help(f, inner),
    Overlay::SkillPicker => draw_search(f, inner, app),
    Overlay::YearPicker | Overlay::GenrePicker => draw_checkboxes(f, inner, app, overlay),
  }
}

fn draw_help(f: &mut Frame, area: Rect) {
  let lines: Vec<Line> = HELP
    .iter()
    .map(|(key, what)| {
      Line::from(vec![
        Span::styled(
          format!("{key:<8}"),
          Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
        ),
        Span::raw(*what),
      ])
    })
    .collect();
  f.render_widget(Paragraph::new(lines), area);
}

fn draw_checkboxes(f: &mut Frame, area: Rect, app: &App, overlay: Overlay) {
  let Some(selector) = app.picker(overlay) else {
    return;
  };
  let rows = app.picker_rows(overlay);
  if rows.is_empty() {
    f.render_widget(
      Paragraph::new("No options available.").style(Style::default().fg(Color::DarkGray)),
      area,
    );
    return;
  }

  let items: Vec<ListItem> = rows
    .iter()
    .map(|option| {
      let mark = if selector.is_selected(option) { "[x] " } else { "[ ] " };
      ListItem::new(format!("{mark}{option}"))
    })
    .collect();
  render_list(f, area, items, app.picker_cursor);
}

fn draw_search(f: &mut Frame, area: Rect, app: &App) {
  let selector = &app.skills;
  let parts = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // selected chips
      Constraint::Length(1), // query
      Constraint::Min(0),    // suggestions
    ])
    .split(area);

  let mut chips = vec![Span::styled(
    format!("{}/{} ", selector.len(), selector.max().unwrap_or_default()),
    Style::default().fg(Color::DarkGray),
  )];
  for skill in selector.selected() {
    chips.push(Span::styled(
      format!(" {skill} "),
      Style::default().fg(Color::Black).bg(Color::Cyan),
    ));
    chips.push(Span::raw(" "));
  }
  f.render_widget(Paragraph::new(Line::from(chips)), parts[0]);

  f.render_widget(
    Paragraph::new(format!("> {}_", selector.query())).style(Style::default().fg(Color::Yellow)),
    parts[1],
  );

  let items: Vec<ListItem> = selector
    .suggestions()
    .iter()
    .map(|s| ListItem::new(s.clone()))
    .collect();
  if items.is_empty() && !selector.query().trim().is_empty() {
    f.render_widget(
      Paragraph::new(format!("Enter adds \"{}\"", selector.query().trim()))
        .style(Style::default().fg(Color::DarkGray)),
      parts[2],
    );
    return;
  }
  render_list(f, parts[2], items, app.picker_cursor);
}

fn render_list(f: &mut Frame, area: Rect, items: Vec<ListItem>, cursor: usize) {
  let mut state = ListState::default();
  state.select((!items.is_empty()).then_some(cursor));
  f.render_stateful_widget(
    List::new(items).highlight_style(
      Style::default()
        .bg(Color::Blue)
        .fg(Color::White)
        .add_modifier(Modifier::BOLD),
    ),
    area,
    &mut state,
  );
}

/// A rectangle of `pct_x` × `pct_y` percent centred in `area`.
fn centered(area: Rect, pct_x: u16, pct_y: u16) -> Rect {
  let vertical = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Percentage((100 - pct_y) / 2),
      Constraint::Percentage(pct_y),
      Constraint::Percentage((100 - pct_y) / 2),
    ])
    .split(area);
  Layout::default()
    .direction(Direction::Horizontal)
    .constraints([
      Constraint::Percentage((100 - pct_x) / 2),
      Constraint::Percentage(pct_x),
      Constraint::Percentage((100 - pct_x) / 2),
    ])
    .split(vertical[1])[1]
}

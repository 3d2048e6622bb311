//! Portfolio list pane, left panel.

use folio_core::portfolio::PortfolioRecord;
use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use crate::app::App;

/// Render the filtered portfolio list into `area`.
pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let filtered = app.filtered();
  let total = app.records.len();

  let title = if app.criteria().is_empty() {
    format!(" Portfolios ({total}) ")
  } else {
    format!(" Portfolios ({}/{}) ", filtered.len(), total)
  };

  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);

  if filtered.is_empty() {
    let msg = if total == 0 {
      "No portfolios yet."
    } else {
      "Nothing matches the current filters."
    };
    f.render_widget(
      Paragraph::new(msg).style(Style::default().fg(Color::DarkGray)),
      inner,
    );
    return;
  }

  let items: Vec<ListItem> = filtered.iter().map(|r| ListItem::new(row(r))).collect();

  let mut state = ListState::default();
  state.select(Some(app.list_cursor));

  f.render_stateful_widget(
    List::new(items).highlight_style(
      Style::default()
        .bg(Color::Blue)
        .fg(Color::White)
        .add_modifier(Modifier::BOLD),
    ),
    inner,
    &mut state,
  );
}

/// Two lines per record: title with author badge, then school, year and
/// genres.
fn row(record: &PortfolioRecord) -> Vec<Line<'static>> {
  let dim = Style::default().fg(Color::DarkGray);
  let (initials, school) = record
    .user
    .as_ref()
    .map(|u| (u.initials(), u.school_name.clone()))
    .unwrap_or_default();
  let year = record
    .graduation_year()
    .map(|y| format!("{y}{}", folio_core::year::YEAR_SUFFIX))
    .unwrap_or_default();

  let mut meta: Vec<String> = Vec::new();
  if !school.is_empty() {
    meta.push(school);
  }
  if !year.is_empty() {
    meta.push(year);
  }
  if !record.genres.is_empty() {
    meta.push(record.genres.join(" / "));
  }

  vec![
    Line::from(vec![
      Span::styled(
        format!("{:<6}", if initials.is_empty() { "—" } else { initials.as_str() }),
        Style::default().fg(Color::Cyan),
      ),
      Span::raw(record.title.clone()),
    ]),
    Line::from(Span::styled(format!("      {}", meta.join("  ·  ")), dim)),
  ]
}

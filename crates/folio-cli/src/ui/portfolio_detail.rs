//! Portfolio detail pane, right panel.

use folio_core::portfolio::PortfolioRecord;
use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::app::App;

// ─── Public entry ─────────────────────────────────────────────────────────────

/// Render `record` into `area`.
pub fn draw(f: &mut Frame, area: Rect, app: &App, record: &PortfolioRecord) {
  let block = Block::default()
    .title(format!(" {} ", record.title))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));

  let inner = block.inner(area);
  f.render_widget(block, area);

  let mut lines: Vec<Line> = Vec::new();

  if let Some(author) = &record.user {
    field(&mut lines, "author", author.full_name());
    field(&mut lines, "school", author.school_name.clone());
    field(&mut lines, "department", author.department.clone());
    if let Some(year) = author.graduation_year() {
      field(
        &mut lines,
        "graduation",
        format!("{year}{}", folio_core::year::YEAR_SUFFIX),
      );
    }
  }
  if let Some(created) = record.created_at {
    field(&mut lines, "posted", created.format("%Y-%m-%d").to_string());
  }

  lines.push(Line::from(""));
  field(&mut lines, "genres", record.genres.join(", "));
  field(&mut lines, "skills", record.skills.join(", "));
  field(&mut lines, "github", record.github_link.clone());
  field(&mut lines, "product", record.product_link.clone());

  if !record.images.is_empty() {
    lines.push(Line::from(""));
    for (i, image) in record.images.iter().enumerate() {
      let label = if i == 0 { "images" } else { "" };
      field(&mut lines, label, app.client.asset_url(&image.url));
    }
  }

  if !record.description.is_empty() {
    lines.push(Line::from(""));
    lines.extend(
      record
        .description
        .lines()
        .map(|l| Line::from(l.to_owned())),
    );
  }

  let scroll_offset = app.detail_scroll.min(u16::MAX as usize) as u16;
  let para = Paragraph::new(lines)
    .wrap(Wrap { trim: false })
    .scroll((scroll_offset, 0));
  f.render_widget(para, inner);
}

/// Push a `label  value` line; blank values are skipped.
fn field(lines: &mut Vec<Line<'static>>, label: &'static str, value: String) {
  if value.trim().is_empty() {
    return;
  }
  lines.push(Line::from(vec![
    Span::styled(
      format!("{label:<12}"),
      Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD),
    ),
    Span::raw(value),
  ]));
}

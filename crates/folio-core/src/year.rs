//! Graduation years: option labels and the canonical form used for matching.
//!
//! Labels shown to the user carry a `卒` suffix (`"2026卒"`), while the
//! backend stores the bare year either as a string or a number. Both sides
//! are reduced to the bare year string before comparison.

use chrono::{Datelike, NaiveDate};

/// Suffix appended to a year in option labels ("graduating in").
pub const YEAR_SUFFIX: char = '卒';

/// Number of graduation years offered at a time.
pub const YEAR_WINDOW: i32 = 4;

/// The graduation year labels offered on `today`.
///
/// Up to and including March 31 the window starts at the current year (the
/// academic year has not ended); afterwards it starts at next year.
pub fn graduation_year_options(today: NaiveDate) -> Vec<String> {
  let before_april = today.month() < 4;
  let first = if before_april { today.year() } else { today.year() + 1 };
  (first..first + YEAR_WINDOW).map(label).collect()
}

/// `2026` → `"2026卒"`.
pub fn label(year: i32) -> String { format!("{year}{YEAR_SUFFIX}") }

/// Reduce a label or stored year to its canonical form.
///
/// Strips surrounding whitespace and a trailing `卒`. Returns `None` when
/// nothing remains.
pub fn normalize(raw: &str) -> Option<String> {
  let trimmed = raw.trim();
  let bare = trimmed.strip_suffix(YEAR_SUFFIX).unwrap_or(trimmed).trim();
  (!bare.is_empty()).then(|| bare.to_owned())
}

#[cfg(test)]
mod tests {
  use super::*;

  fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
  }

  #[test]
  fn window_starts_this_year_through_march() {
    assert_eq!(
      graduation_year_options(date(2026, 3, 31)),
      ["2026卒", "2027卒", "2028卒", "2029卒"]
    );
    assert_eq!(graduation_year_options(date(2026, 1, 1))[0], "2026卒");
  }

  #[test]
  fn window_starts_next_year_from_april() {
    assert_eq!(
      graduation_year_options(date(2026, 4, 1)),
      ["2027卒", "2028卒", "2029卒", "2030卒"]
    );
  }

  #[test]
  fn normalize_strips_suffix_and_whitespace() {
    assert_eq!(normalize("2026卒").as_deref(), Some("2026"));
    assert_eq!(normalize(" 2026 ").as_deref(), Some("2026"));
    assert_eq!(normalize("2026 卒").as_deref(), Some("2026"));
    assert_eq!(normalize("卒"), None);
    assert_eq!(normalize("  "), None);
  }
}

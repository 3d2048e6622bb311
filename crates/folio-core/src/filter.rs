//! The listing filter.
//!
//! Reduces the full, already-fetched list of portfolio records to the ones
//! matching a keyword and the selected years, genres and skills. The filter
//! is recomputed from scratch on every change; it keeps input order.

use std::collections::HashSet;

use crate::{portfolio::PortfolioRecord, selector::TagSelector, year};

/// What the listing is currently filtered by. Empty fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
  /// Case-insensitive substring of the title or description.
  pub keyword: String,
  /// Graduation year labels (`"2026卒"`) or bare years; any may match.
  pub years:   Vec<String>,
  /// Genres; a record matches if it has any of them.
  pub genres:  Vec<String>,
  /// Skills; a record matches if it has any of them.
  pub skills:  Vec<String>,
}

impl FilterCriteria {
  /// Snapshot the current state of the listing's controls.
  pub fn from_selectors(
    keyword: &str,
    years: &TagSelector,
    genres: &TagSelector,
    skills: &TagSelector,
  ) -> Self {
    Self {
      keyword: keyword.to_owned(),
      years:   years.selected().to_vec(),
      genres:  genres.selected().to_vec(),
      skills:  skills.selected().to_vec(),
    }
  }

  pub fn is_empty(&self) -> bool {
    self.keyword.is_empty()
      && self.years.is_empty()
      && self.genres.is_empty()
      && self.skills.is_empty()
  }

  /// Whether `record` passes every clause.
  pub fn matches(&self, record: &PortfolioRecord) -> bool {
    Prepared::new(self).matches(record)
  }
}

/// The subsequence of `records` matching `criteria`, in input order.
pub fn filter<'a>(
  records: &'a [PortfolioRecord],
  criteria: &FilterCriteria,
) -> Vec<&'a PortfolioRecord> {
  let prepared = Prepared::new(criteria);
  records.iter().filter(|r| prepared.matches(r)).collect()
}

/// Criteria with the per-call normalisation done once.
struct Prepared<'c> {
  keyword: String,
  /// `None` when no year was selected. A selection whose labels all
  /// normalise away still excludes every record.
  years:   Option<HashSet<String>>,
  genres:  &'c [String],
  skills:  &'c [String],
}

impl<'c> Prepared<'c> {
  fn new(criteria: &'c FilterCriteria) -> Self {
    Self {
      keyword: criteria.keyword.to_lowercase(),
      years:   (!criteria.years.is_empty()).then(|| {
        criteria
          .years
          .iter()
          .filter_map(|y| year::normalize(y))
          .collect()
      }),
      genres:  &criteria.genres,
      skills:  &criteria.skills,
    }
  }

  fn matches(&self, record: &PortfolioRecord) -> bool {
    self.matches_keyword(record)
      && self.matches_year(record)
      && overlaps(self.genres, &record.genres)
      && overlaps(self.skills, &record.skills)
  }

  fn matches_keyword(&self, record: &PortfolioRecord) -> bool {
    self.keyword.is_empty()
      || record.title.to_lowercase().contains(&self.keyword)
      || record.description.to_lowercase().contains(&self.keyword)
  }

  fn matches_year(&self, record: &PortfolioRecord) -> bool {
    let Some(years) = &self.years else {
      return true;
    };
    record
      .graduation_year()
      .is_some_and(|y| years.contains(&y))
  }
}

/// True when `wanted` is empty or shares at least one label with `have`.
fn overlaps(wanted: &[String], have: &[String]) -> bool {
  wanted.is_empty() || wanted.iter().any(|w| have.contains(w))
}

//! The tag selector: a multi-select with free-text entry.
//!
//! Each instance owns its selection, its query and the suggestions derived
//! from the query. Suggestions are recomputed whenever the query, the
//! selection or the option snapshot changes.

use crate::{Error, Result, option::OptionSet};

/// The result of a successful [`TagSelector::select`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
  /// The option was appended to the selection.
  Added,
  /// The option was already selected; nothing changed.
  AlreadySelected,
  /// The option was removed by [`TagSelector::toggle`].
  Removed,
  /// The option was blank; nothing changed.
  Blank,
}

/// Multi-select state over one [`OptionSet`].
#[derive(Debug, Clone)]
pub struct TagSelector {
  options:     OptionSet,
  selected:    Vec<String>,
  query:       String,
  suggestions: Vec<String>,
  max:         Option<usize>,
}

impl TagSelector {
  /// An unbounded selector over `options`.
  pub fn new(options: OptionSet) -> Self {
    Self {
      options,
      selected: Vec::new(),
      query: String::new(),
      suggestions: Vec::new(),
      max: None,
    }
  }

  /// Limit the selection to at most `max` options.
  pub fn with_max(mut self, max: usize) -> Self {
    self.max = Some(max);
    self
  }

  // ── Accessors ─────────────────────────────────────────────────────────────

  pub fn options(&self) -> &OptionSet { &self.options }

  /// Selected options in insertion order.
  pub fn selected(&self) -> &[String] { &self.selected }

  pub fn query(&self) -> &str { &self.query }

  pub fn suggestions(&self) -> &[String] { &self.suggestions }

  pub fn max(&self) -> Option<usize> { self.max }

  pub fn is_selected(&self, option: &str) -> bool {
    self.selected.iter().any(|s| s == option)
  }

  pub fn is_empty(&self) -> bool { self.selected.is_empty() }

  pub fn len(&self) -> usize { self.selected.len() }

  pub fn is_full(&self) -> bool {
    self.max.is_some_and(|max| self.selected.len() >= max)
  }

  // ── Operations ────────────────────────────────────────────────────────────

  /// Replace the query and recompute suggestions.
  pub fn set_query(&mut self, text: impl Into<String>) {
    self.query = text.into();
    self.refresh();
  }

  /// Append one character to the query (keystroke).
  pub fn push_char(&mut self, c: char) {
    self.query.push(c);
    self.refresh();
  }

  /// Remove the last character of the query (backspace).
  pub fn pop_char(&mut self) {
    self.query.pop();
    self.refresh();
  }

  /// Add `option` to the selection.
  ///
  /// Selecting an already-selected option is a no-op. When the selector is
  /// full the selection is left untouched and [`Error::SelectionLimit`] is
  /// returned. On success the query and suggestions are cleared.
  pub fn select(&mut self, option: &str) -> Result<Selection> {
    if option.is_empty() {
      return Ok(Selection::Blank);
    }
    if self.is_selected(option) {
      return Ok(Selection::AlreadySelected);
    }
    if let Some(max) = self.max
      && self.selected.len() >= max
    {
      return Err(Error::SelectionLimit { max });
    }

    self.selected.push(option.to_owned());
    self.query.clear();
    self.suggestions.clear();
    Ok(Selection::Added)
  }

  /// Select the trimmed query as a free-text option (the Enter key).
  ///
  /// Whitespace-only text is never added.
  pub fn submit_free_text(&mut self) -> Result<Selection> {
    let text = self.query.trim().to_owned();
    if text.is_empty() {
      return Ok(Selection::Blank);
    }
    self.select(&text)
  }

  /// Remove `option` from the selection; no-op when absent.
  pub fn remove(&mut self, option: &str) {
    let before = self.selected.len();
    self.selected.retain(|s| s != option);
    if self.selected.len() != before {
      self.refresh();
    }
  }

  /// Checkbox behaviour: deselect when selected, otherwise [`select`].
  ///
  /// [`select`]: Self::select
  pub fn toggle(&mut self, option: &str) -> Result<Selection> {
    if self.is_selected(option) {
      self.remove(option);
      return Ok(Selection::Removed);
    }
    self.select(option)
  }

  /// Clear the query and suggestions, keeping the selection (focus left).
  pub fn dismiss(&mut self) {
    self.query.clear();
    self.suggestions.clear();
  }

  /// Clear the selection, the query and the suggestions.
  pub fn clear(&mut self) {
    self.selected.clear();
    self.dismiss();
  }

  /// Swap in a freshly loaded snapshot and recompute suggestions.
  pub fn replace_options(&mut self, options: OptionSet) {
    self.options = options;
    self.refresh();
  }

  fn refresh(&mut self) {
    if self.query.is_empty() {
      self.suggestions.clear();
      return;
    }
    let needle = self.query.to_lowercase();
    self.suggestions = self
      .options
      .iter()
      .filter(|o| o.to_lowercase().contains(&needle) && !self.is_selected(o))
      .map(str::to_owned)
      .collect();
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::option::OptionKind;

  fn skills() -> OptionSet {
    OptionSet::new(
      OptionKind::Skills,
      ["Rust", "React", "React Native", "Go", "TypeScript", "ruby"],
    )
  }

  #[test]
  fn suggestions_match_case_insensitively() {
    let mut s = TagSelector::new(skills());
    s.set_query("R");
    assert_eq!(
      s.suggestions(),
      ["Rust", "React", "React Native", "TypeScript", "ruby"]
    );
    s.set_query("script");
    assert_eq!(s.suggestions(), ["TypeScript"]);
  }

  #[test]
  fn empty_query_has_no_suggestions() {
    let mut s = TagSelector::new(skills());
    s.set_query("");
    assert!(s.suggestions().is_empty());
    s.push_char('g');
    assert_eq!(s.suggestions(), ["Go"]);
    s.pop_char();
    assert!(s.suggestions().is_empty());
  }

  #[test]
  fn suggestions_exclude_selected() {
    let mut s = TagSelector::new(skills());
    s.select("React").unwrap();
    s.set_query("react");
    assert_eq!(s.suggestions(), ["React Native"]);

    // Removing re-admits the option into the suggestions.
    s.remove("React");
    assert_eq!(s.suggestions(), ["React", "React Native"]);
  }

  #[test]
  fn select_is_idempotent() {
    let mut s = TagSelector::new(skills());
    assert_eq!(s.select("Go").unwrap(), Selection::Added);
    let once = s.selected().to_vec();
    assert_eq!(s.select("Go").unwrap(), Selection::AlreadySelected);
    assert_eq!(s.selected(), once.as_slice());
  }

  #[test]
  fn select_clears_query_and_suggestions() {
    let mut s = TagSelector::new(skills());
    s.set_query("ru");
    s.select("Rust").unwrap();
    assert_eq!(s.query(), "");
    assert!(s.suggestions().is_empty());
    assert_eq!(s.selected(), ["Rust"]);
  }

  #[test]
  fn limit_rejects_without_mutation() {
    let mut s = TagSelector::new(skills()).with_max(5);
    for opt in ["Rust", "React", "React Native", "Go", "TypeScript"] {
      s.select(opt).unwrap();
    }
    assert!(s.is_full());
    s.set_query("ruby");

    let err = s.select("ruby").unwrap_err();
    assert!(matches!(err, Error::SelectionLimit { max: 5 }));
    assert_eq!(s.len(), 5);
    assert!(!s.is_selected("ruby"));
    assert_eq!(s.query(), "ruby");
  }

  #[test]
  fn limit_does_not_block_reselecting() {
    let mut s = TagSelector::new(skills()).with_max(1);
    s.select("Go").unwrap();
    assert_eq!(s.select("Go").unwrap(), Selection::AlreadySelected);
  }

  #[test]
  fn free_text_adds_trimmed_query() {
    let mut s = TagSelector::new(OptionSet::empty(OptionKind::Skills));
    s.set_query("React");
    assert_eq!(s.submit_free_text().unwrap(), Selection::Added);
    assert_eq!(s.selected(), ["React"]);
    assert_eq!(s.query(), "");

    s.set_query("  Elm  ");
    s.submit_free_text().unwrap();
    assert_eq!(s.selected(), ["React", "Elm"]);
  }

  #[test]
  fn whitespace_free_text_is_ignored() {
    let mut s = TagSelector::new(skills());
    s.set_query("   ");
    assert_eq!(s.submit_free_text().unwrap(), Selection::Blank);
    assert!(s.is_empty());
  }

  #[test]
  fn remove_absent_is_noop() {
    let mut s = TagSelector::new(skills());
    s.select("Go").unwrap();
    s.remove("Rust");
    assert_eq!(s.selected(), ["Go"]);
  }

  #[test]
  fn dismiss_keeps_selection() {
    let mut s = TagSelector::new(skills());
    s.select("Go").unwrap();
    s.set_query("ru");
    s.dismiss();
    assert_eq!(s.query(), "");
    assert!(s.suggestions().is_empty());
    assert_eq!(s.selected(), ["Go"]);
  }

  #[test]
  fn toggle_flips_membership() {
    let mut s = TagSelector::new(skills());
    assert_eq!(s.toggle("Go").unwrap(), Selection::Added);
    assert!(s.is_selected("Go"));
    assert_eq!(s.toggle("Go").unwrap(), Selection::Removed);
    assert!(!s.is_selected("Go"));
  }

  #[test]
  fn replacing_options_refreshes_suggestions() {
    let mut s = TagSelector::new(OptionSet::empty(OptionKind::Skills));
    s.set_query("go");
    assert!(s.suggestions().is_empty());
    s.replace_options(skills());
    assert_eq!(s.suggestions(), ["Go"]);
  }
}

//! Application state machine and event dispatcher.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use folio_client::ApiClient;
use folio_core::{
  filter::{self, FilterCriteria},
  option::{self, OptionKind, OptionSet},
  portfolio::PortfolioRecord,
  selector::{Selection, TagSelector},
  user::User,
};

/// The skill picker accepts at most this many skills.
pub const MAX_FILTER_SKILLS: usize = 5;

// ─── Screen ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
  /// Focus on the portfolio list.
  Listing,
  /// Focus on one portfolio.
  Detail,
}

/// A modal drawn on top of the current screen. At most one is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
  YearPicker,
  GenrePicker,
  SkillPicker,
  Help,
}

impl Overlay {
  pub fn title(self) -> &'static str {
    match self {
      Self::YearPicker => " Graduation year ",
      Self::GenrePicker => " Genre ",
      Self::SkillPicker => " Skills ",
      Self::Help => " Help ",
    }
  }
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state.
pub struct App {
  pub screen: Screen,

  pub overlay: Option<Overlay>,

  /// The signed-in user, if the session is authenticated.
  pub user: Option<User>,

  /// Every record returned by the backend on startup, in backend order.
  pub records: Vec<PortfolioRecord>,

  /// Keyword filter text.
  pub keyword: String,

  /// Whether the user is typing a keyword.
  pub keyword_active: bool,

  pub years:  TagSelector,
  pub genres: TagSelector,
  pub skills: TagSelector,

  /// Cursor position within the *filtered* list.
  pub list_cursor: usize,

  /// Cursor position within the open picker's rows.
  pub picker_cursor: usize,

  /// The record shown on the detail screen.
  pub detail: Option<PortfolioRecord>,

  pub detail_scroll: usize,

  /// One-line status message shown in the status bar.
  pub status_msg: String,

  /// Shared HTTP client.
  pub client: Arc<ApiClient>,
}

impl App {
  /// Create an [`App`] with no records and empty option sets.
  pub fn new(client: ApiClient) -> Self {
    Self {
      screen: Screen::Listing,
      overlay: None,
      user: None,
      records: Vec::new(),
      keyword: String::new(),
      keyword_active: false,
      years: TagSelector::new(OptionSet::empty(OptionKind::GraduationYears)),
      genres: TagSelector::new(OptionSet::empty(OptionKind::Genres)),
      skills: TagSelector::new(OptionSet::empty(OptionKind::Skills))
        .with_max(MAX_FILTER_SKILLS),
      list_cursor: 0,
      picker_cursor: 0,
      detail: None,
      detail_scroll: 0,
      status_msg: String::new(),
      client: Arc::new(client),
    }
  }

  // ── Data loading ──────────────────────────────────────────────────────────

  /// Fetch the current user, every record and the option sets concurrently.
  ///
  /// Each fetch stands alone: a failure leaves its part empty and is
  /// reported in the status bar.
  pub async fn load(&mut self) {
    self.status_msg = "Loading portfolios…".into();
    let client = &*self.client;
    let (user, records, years, genres, skills) = tokio::join!(
      client.user_info(),
      client.all_posts(),
      option::load(client, OptionKind::GraduationYears),
      option::load(client, OptionKind::Genres),
      option::load(client, OptionKind::Skills),
    );

    self.years.replace_options(years);
    self.genres.replace_options(genres);
    self.skills.replace_options(skills);

    match user {
      Ok(user) => self.user = Some(user),
      Err(e) if e.is_unauthorized() => tracing::info!("browsing without a session"),
      Err(e) => tracing::warn!(error = %e, "failed to load the current user"),
    }

    match records {
      Ok(records) => {
        tracing::info!(count = records.len(), "loaded portfolios");
        self.records = records;
        self.list_cursor = 0;
        self.status_msg.clear();
      }
      Err(e) => self.status_msg = format!("Error: {e}"),
    }
  }

  // ── Filtered list ─────────────────────────────────────────────────────────

  pub fn criteria(&self) -> FilterCriteria {
    FilterCriteria::from_selectors(&self.keyword, &self.years, &self.genres, &self.skills)
  }

  /// Records matching the current criteria, in backend order.
  pub fn filtered(&self) -> Vec<&PortfolioRecord> {
    filter::filter(&self.records, &self.criteria())
  }

  /// The record under the list cursor in the filtered view, if any.
  pub fn cursor_record(&self) -> Option<&PortfolioRecord> {
    self.filtered().get(self.list_cursor).copied()
  }

  /// The selector behind a picker overlay.
  pub fn picker(&self, overlay: Overlay) -> Option<&TagSelector> {
    match overlay {
      Overlay::YearPicker => Some(&self.years),
      Overlay::GenrePicker => Some(&self.genres),
      Overlay::SkillPicker => Some(&self.skills),
      Overlay::Help => None,
    }
  }

  fn picker_mut(&mut self, overlay: Overlay) -> Option<&mut TagSelector> {
    match overlay {
      Overlay::YearPicker => Some(&mut self.years),
      Overlay::GenrePicker => Some(&mut self.genres),
      Overlay::SkillPicker => Some(&mut self.skills),
      Overlay::Help => None,
    }
  }

  /// The rows listed by a picker: every option for the checkbox pickers,
  /// the current suggestions for the skill picker.
  pub fn picker_rows(&self, overlay: Overlay) -> Vec<String> {
    match (overlay, self.picker(overlay)) {
      (Overlay::SkillPicker, Some(selector)) => selector.suggestions().to_vec(),
      (_, Some(selector)) => selector.options().as_slice().to_vec(),
      (_, None) => Vec::new(),
    }
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub async fn handle_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      return Ok(false);
    }

    if let Some(overlay) = self.overlay {
      self.handle_overlay_key(overlay, key);
      return Ok(true);
    }

    if self.keyword_active {
      self.handle_keyword_key(key);
      return Ok(true);
    }

    match self.screen {
      Screen::Listing => self.handle_list_key(key).await,
      Screen::Detail => self.handle_detail_key(key).await,
    }
  }

  fn handle_keyword_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Esc => {
        self.keyword_active = false;
        self.keyword.clear();
      }
      KeyCode::Enter => self.keyword_active = false,
      KeyCode::Backspace => {
        self.keyword.pop();
      }
      KeyCode::Char(c) => self.keyword.push(c),
      _ => return,
    }
    self.list_cursor = 0;
  }

  async fn handle_list_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    match key.code {
      KeyCode::Char('q') => return Ok(false),

      KeyCode::Down | KeyCode::Char('j') => {
        let len = self.filtered().len();
        if self.list_cursor + 1 < len {
          self.list_cursor += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        self.list_cursor = self.list_cursor.saturating_sub(1);
      }

      KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => {
        if let Some(id) = self.cursor_record().map(|r| r.id) {
          self.open_detail(id).await;
        }
      }

      KeyCode::Char('/') => {
        self.keyword_active = true;
        self.keyword.clear();
        self.list_cursor = 0;
      }
      KeyCode::Char('y') => self.open_overlay(Overlay::YearPicker),
      KeyCode::Char('g') => self.open_overlay(Overlay::GenrePicker),
      KeyCode::Char('s') => self.open_overlay(Overlay::SkillPicker),
      KeyCode::Char('?') => self.open_overlay(Overlay::Help),
      KeyCode::Char('c') => self.clear_filters(),

      _ => {}
    }
    Ok(true)
  }

  async fn handle_detail_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    match key.code {
      KeyCode::Char('q') => return Ok(false),

      KeyCode::Esc | KeyCode::Left | KeyCode::Char('h') => {
        self.screen = Screen::Listing;
        self.detail = None;
      }

      KeyCode::Down | KeyCode::Char('j') => self.detail_scroll += 1,
      KeyCode::Up | KeyCode::Char('k') => {
        self.detail_scroll = self.detail_scroll.saturating_sub(1);
      }

      KeyCode::Char(']') | KeyCode::PageDown => {
        let len = self.filtered().len();
        if self.list_cursor + 1 < len {
          self.list_cursor += 1;
          if let Some(id) = self.cursor_record().map(|r| r.id) {
            self.open_detail(id).await;
          }
        }
      }
      KeyCode::Char('[') | KeyCode::PageUp => {
        if self.list_cursor > 0 {
          self.list_cursor -= 1;
          if let Some(id) = self.cursor_record().map(|r| r.id) {
            self.open_detail(id).await;
          }
        }
      }

      KeyCode::Char('?') => self.open_overlay(Overlay::Help),

      _ => {}
    }
    Ok(true)
  }

  fn handle_overlay_key(&mut self, overlay: Overlay, key: KeyEvent) {
    match overlay {
      Overlay::Help => self.close_overlay(),
      Overlay::SkillPicker => self.handle_skill_key(key),
      Overlay::YearPicker | Overlay::GenrePicker => self.handle_checkbox_key(overlay, key),
    }
  }

  /// Year and genre pickers: a checkbox list over every option.
  fn handle_checkbox_key(&mut self, overlay: Overlay, key: KeyEvent) {
    let rows = self.picker_rows(overlay);
    match key.code {
      KeyCode::Esc | KeyCode::Char('q') => self.close_overlay(),
      KeyCode::Down | KeyCode::Char('j') => {
        if self.picker_cursor + 1 < rows.len() {
          self.picker_cursor += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        self.picker_cursor = self.picker_cursor.saturating_sub(1);
      }
      KeyCode::Enter | KeyCode::Char(' ') => {
        if let Some(option) = rows.get(self.picker_cursor) {
          self.apply(overlay, |s| s.toggle(option));
        }
      }
      _ => {}
    }
  }

  /// Skill picker: type to get suggestions, Enter picks the highlighted
  /// suggestion or adds the typed text as-is.
  fn handle_skill_key(&mut self, key: KeyEvent) {
    let overlay = Overlay::SkillPicker;
    match key.code {
      KeyCode::Esc => self.close_overlay(),
      KeyCode::Down => {
        if self.picker_cursor + 1 < self.skills.suggestions().len() {
          self.picker_cursor += 1;
        }
      }
      KeyCode::Up => self.picker_cursor = self.picker_cursor.saturating_sub(1),
      KeyCode::Enter => {
        match self.skills.suggestions().get(self.picker_cursor).cloned() {
          Some(option) => self.apply(overlay, |s| s.select(&option)),
          None => self.apply(overlay, TagSelector::submit_free_text),
        }
        self.picker_cursor = 0;
      }
      KeyCode::Backspace if self.skills.query().is_empty() => {
        if let Some(last) = self.skills.selected().last().cloned() {
          self.skills.remove(&last);
          self.list_cursor = 0;
        }
      }
      KeyCode::Backspace => {
        self.skills.pop_char();
        self.picker_cursor = 0;
      }
      KeyCode::Char(c) => {
        self.skills.push_char(c);
        self.picker_cursor = 0;
      }
      _ => {}
    }
  }

  /// Run `op` on the picker's selector and report the outcome.
  fn apply<F>(&mut self, overlay: Overlay, op: F)
  where
    F: FnOnce(&mut TagSelector) -> folio_core::Result<Selection>,
  {
    let Some(selector) = self.picker_mut(overlay) else {
      return;
    };
    match op(selector) {
      Ok(Selection::Added | Selection::Removed) => {
        self.list_cursor = 0;
        self.status_msg.clear();
      }
      Ok(Selection::AlreadySelected | Selection::Blank) => {}
      Err(e) => self.status_msg = e.to_string(),
    }
  }

  fn open_overlay(&mut self, overlay: Overlay) {
    self.overlay = Some(overlay);
    self.picker_cursor = 0;
  }

  /// Close the open overlay, keeping its selection.
  fn close_overlay(&mut self) {
    if let Some(overlay) = self.overlay.take()
      && let Some(selector) = self.picker_mut(overlay)
    {
      selector.dismiss();
    }
    self.picker_cursor = 0;
  }

  /// Reset the keyword and every selection.
  pub fn clear_filters(&mut self) {
    self.keyword.clear();
    self.years.clear();
    self.genres.clear();
    self.skills.clear();
    self.list_cursor = 0;
    self.status_msg = "Filters cleared".into();
  }

  /// Transition to [`Screen::Detail`] for `id`.
  ///
  /// Falls back to the listing's copy of the record when the fetch fails.
  async fn open_detail(&mut self, id: u64) {
    self.detail_scroll = 0;
    match self.client.post(id).await {
      Ok(record) => {
        self.detail = Some(record);
        self.status_msg.clear();
      }
      Err(e) => {
        tracing::warn!(id, error = %e, "failed to load portfolio");
        self.detail = self.records.iter().find(|r| r.id == id).cloned();
        self.status_msg = format!("Error: {e}");
      }
    }
    if self.detail.is_some() {
      self.screen = Screen::Detail;
    }
  }
}

//! The draft submission: unsaved state of the portfolio creation form.
//!
//! A draft lives only in memory. It is created when the form opens,
//! validated into a [`Submission`] on submit, and discarded once the backend
//! accepts it.

use crate::{
  Error, Result,
  attachment::ImageAttachment,
  field::{Field, FieldErrors},
  option::OptionSet,
  selector::TagSelector,
};

/// Most images a single portfolio may carry.
pub const MAX_IMAGES: usize = 4;

/// Largest accepted image, in bytes (8 MiB).
pub const MAX_IMAGE_BYTES: usize = 8 * 1024 * 1024;

/// An image refused by [`DraftSubmission::attach`] for being too large.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedImage {
  pub file_name: String,
  pub size:      usize,
}

/// Outcome of attaching a batch of images.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttachReport {
  pub added:    usize,
  pub rejected: Vec<RejectedImage>,
}

/// A validated draft, ready to be sent.
#[derive(Debug, Clone)]
pub struct Submission {
  pub title:       String,
  pub description: String,
  pub genres:      Vec<String>,
  pub skills:      Vec<String>,
  pub images:      Vec<ImageAttachment>,
}

/// Form state for a new portfolio.
#[derive(Debug, Clone)]
pub struct DraftSubmission {
  title:       String,
  description: String,
  genres:      TagSelector,
  skills:      TagSelector,
  images:      Vec<ImageAttachment>,
  dirty:       bool,
}

impl DraftSubmission {
  pub fn new(genres: OptionSet, skills: OptionSet) -> Self {
    Self {
      title:       String::new(),
      description: String::new(),
      genres:      TagSelector::new(genres),
      skills:      TagSelector::new(skills),
      images:      Vec::new(),
      dirty:       false,
    }
  }

  // ── Fields ────────────────────────────────────────────────────────────────

  pub fn title(&self) -> &str { &self.title }

  pub fn set_title(&mut self, title: impl Into<String>) {
    self.title = title.into();
    self.dirty = true;
  }

  pub fn description(&self) -> &str { &self.description }

  pub fn set_description(&mut self, description: impl Into<String>) {
    self.description = description.into();
    self.dirty = true;
  }

  pub fn genres(&self) -> &TagSelector { &self.genres }

  /// Mutable access to the genre selector; marks the draft dirty.
  pub fn genres_mut(&mut self) -> &mut TagSelector {
    self.dirty = true;
    &mut self.genres
  }

  pub fn skills(&self) -> &TagSelector { &self.skills }

  /// Mutable access to the skill selector; marks the draft dirty.
  pub fn skills_mut(&mut self) -> &mut TagSelector {
    self.dirty = true;
    &mut self.skills
  }

  pub fn images(&self) -> &[ImageAttachment] { &self.images }

  /// Whether the user has edited anything since the form opened.
  pub fn is_dirty(&self) -> bool { self.dirty }

  // ── Images ────────────────────────────────────────────────────────────────

  /// Attach a batch of images.
  ///
  /// A batch that would take the draft past [`MAX_IMAGES`] is refused as a
  /// whole. Otherwise each file larger than [`MAX_IMAGE_BYTES`] is skipped
  /// and reported, and the rest are appended.
  pub fn attach(&mut self, batch: Vec<ImageAttachment>) -> Result<AttachReport> {
    let attempted = self.images.len() + batch.len();
    if attempted > MAX_IMAGES {
      return Err(Error::TooManyImages {
        max: MAX_IMAGES,
        attempted,
      });
    }

    let mut report = AttachReport::default();
    for image in batch {
      if image.size() > MAX_IMAGE_BYTES {
        report.rejected.push(RejectedImage {
          file_name: image.file_name().to_owned(),
          size:      image.size(),
        });
        continue;
      }
      self.images.push(image);
      report.added += 1;
    }
    if report.added > 0 {
      self.dirty = true;
    }
    Ok(report)
  }

  /// Detach the image at `index`, if any.
  pub fn remove_image(&mut self, index: usize) -> Option<ImageAttachment> {
    (index < self.images.len()).then(|| {
      self.dirty = true;
      self.images.remove(index)
    })
  }

  // ── Validation ────────────────────────────────────────────────────────────

  /// Check required fields and build the payload.
  ///
  /// All failures are reported together, one per field.
  pub fn validate(&self) -> Result<Submission, FieldErrors> {
    let mut errors = FieldErrors::new();
    errors.require(Field::Title, self.title.trim().is_empty());
    errors.require(Field::Genres, self.genres.is_empty());
    errors.require(Field::Images, self.images.is_empty());
    errors.require(Field::Skills, self.skills.is_empty());

    errors.into_result(Submission {
      title:       self.title.trim().to_owned(),
      description: self.description.clone(),
      genres:      self.genres.selected().to_vec(),
      skills:      self.skills.selected().to_vec(),
      images:      self.images.clone(),
    })
  }
}

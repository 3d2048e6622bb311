//! Binary attachments (portfolio images, profile icons).

use bytes::Bytes;

/// A file picked by the user, held in memory until it is uploaded.
///
/// Clones share the payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAttachment {
  file_name: String,
  data:      Bytes,
}

impl ImageAttachment {
  pub fn new(file_name: impl Into<String>, data: impl Into<Bytes>) -> Self {
    Self {
      file_name: file_name.into(),
      data:      data.into(),
    }
  }

  /// The original file name, preserved in the upload.
  pub fn file_name(&self) -> &str { &self.file_name }

  pub fn data(&self) -> &Bytes { &self.data }

  pub fn size(&self) -> usize { self.data.len() }
}

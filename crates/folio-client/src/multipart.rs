//! Multipart payloads for portfolio creation and profile edits.

use folio_core::{attachment::ImageAttachment, draft::Submission, user::ProfileUpdate};
use reqwest::multipart::{Form, Part};

use crate::{ClientError, Result};

/// Text parts for scalar fields, one repeated part per genre and skill, and
/// one binary `images` part per attachment.
pub(crate) fn submission_form(submission: &Submission) -> Result<Form> {
  let mut form = Form::new()
    .text("title", submission.title.clone())
    .text("description", submission.description.clone());

  for genre in &submission.genres {
    form = form.text("genres", genre.clone());
  }
  for skill in &submission.skills {
    form = form.text("skills", skill.clone());
  }
  for image in &submission.images {
    form = form.part("images", image_part(image)?);
  }
  Ok(form)
}

pub(crate) fn profile_form(update: &ProfileUpdate) -> Result<Form> {
  let mut form = Form::new()
    .text("firstName", update.first_name.clone())
    .text("lastName", update.last_name.clone())
    .text("firstNameKana", update.first_name_kana.clone())
    .text("lastNameKana", update.last_name_kana.clone());

  if let Some(icon) = &update.icon {
    form = form.part("profileImage", image_part(icon)?);
  }
  Ok(form)
}

/// A binary part keeping the original file name. The MIME type is sniffed
/// from the content and left unset when unrecognised.
fn image_part(image: &ImageAttachment) -> Result<Part> {
  let part = Part::stream_with_length(image.data().clone(), image.size() as u64)
    .file_name(image.file_name().to_owned());

  match infer::get(image.data()) {
    Some(kind) => part
      .mime_str(kind.mime_type())
      .map_err(|source| ClientError::Attachment {
        file_name: image.file_name().to_owned(),
        source,
      }),
    None => Ok(part),
  }
}

//! User profiles and the forms that update them.

use serde::{Deserialize, Serialize};

use crate::{attachment::ImageAttachment, de, year};

// ─── Profile ─────────────────────────────────────────────────────────────────

/// A user profile, either the signed-in user or a portfolio's author.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct User {
  #[serde(alias = "id", rename = "ID", default)]
  pub id:                u64,
  #[serde(alias = "firstName", default, deserialize_with = "de::nullable_string")]
  pub first_name:        String,
  #[serde(alias = "lastName", default, deserialize_with = "de::nullable_string")]
  pub last_name:         String,
  #[serde(alias = "firstNameKana", default, deserialize_with = "de::nullable_string")]
  pub first_name_kana:   String,
  #[serde(alias = "lastNameKana", default, deserialize_with = "de::nullable_string")]
  pub last_name_kana:    String,
  #[serde(alias = "email", default, deserialize_with = "de::nullable_string")]
  pub email:             String,
  #[serde(alias = "schoolName", default, deserialize_with = "de::nullable_string")]
  pub school_name:       String,
  #[serde(alias = "department", default, deserialize_with = "de::nullable_string")]
  pub department:        String,
  #[serde(alias = "laboratory", default, deserialize_with = "de::nullable_string")]
  pub laboratory:        String,
  /// Stored as a string or a number depending on the backend version.
  #[serde(alias = "graduationYear", default, deserialize_with = "de::string_or_number")]
  graduation_year:       Option<String>,
  #[serde(alias = "desiredJobTypes", default, deserialize_with = "de::nullable_vec")]
  pub desired_job_types: Vec<String>,
  #[serde(alias = "skills", default, deserialize_with = "de::nullable_vec")]
  pub skills:            Vec<String>,
  #[serde(alias = "selfIntroduction", default, deserialize_with = "de::nullable_string")]
  pub self_introduction: String,
  #[serde(alias = "profileImageUrl", rename = "ProfileImageURL", default, deserialize_with = "de::nullable_string")]
  pub profile_image_url: String,
}

impl User {
  /// The canonical graduation year (`"2026"`), if set.
  pub fn graduation_year(&self) -> Option<String> {
    self.graduation_year.as_deref().and_then(year::normalize)
  }

  pub fn set_graduation_year(&mut self, raw: &str) {
    self.graduation_year = year::normalize(raw);
  }

  /// Family name first, as displayed in the UI.
  pub fn full_name(&self) -> String {
    format!("{} {}", self.last_name, self.first_name)
      .trim()
      .to_owned()
  }

  /// Initials derived from the kana names, family name first (`"T.K."`).
  pub fn initials(&self) -> String {
    format!(
      "{}.{}.",
      kana_initial(&self.last_name_kana),
      kana_initial(&self.first_name_kana)
    )
  }

  /// Whether onboarding has been completed. New accounts have no name.
  pub fn has_minimum_info(&self) -> bool { !self.first_name.is_empty() }
}

/// Romanised initial of the first katakana character; `'X'` when unknown.
pub fn kana_initial(kana: &str) -> char {
  match kana.chars().next() {
    Some('ア') => 'A',
    Some('イ') => 'I',
    Some('ウ') => 'U',
    Some('エ') => 'E',
    Some('オ') => 'O',
    Some('カ' | 'キ' | 'ク' | 'ケ' | 'コ' | 'ガ' | 'ギ' | 'グ' | 'ゲ' | 'ゴ') => 'K',
    Some('サ' | 'シ' | 'ス' | 'セ' | 'ソ' | 'ザ' | 'ジ' | 'ズ' | 'ゼ' | 'ゾ') => 'S',
    Some('タ' | 'チ' | 'ツ' | 'テ' | 'ト' | 'ダ' | 'ヂ' | 'ヅ' | 'デ' | 'ド') => 'T',
    Some('ナ' | 'ニ' | 'ヌ' | 'ネ' | 'ノ' | 'ン') => 'N',
    Some('ハ' | 'ヒ' | 'フ' | 'ヘ' | 'ホ') => 'H',
    Some('バ' | 'ビ' | 'ブ' | 'ベ' | 'ボ') => 'B',
    Some('パ' | 'ピ' | 'プ' | 'ペ' | 'ポ') => 'P',
    Some('マ' | 'ミ' | 'ム' | 'メ' | 'モ') => 'M',
    Some('ヤ' | 'ユ' | 'ヨ') => 'Y',
    Some('ラ' | 'リ' | 'ル' | 'レ' | 'ロ') => 'R',
    Some('ワ' | 'ヲ') => 'W',
    _ => 'X',
  }
}

// ─── Update forms ────────────────────────────────────────────────────────────

/// The onboarding form, sent as JSON.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MinimumUserInfo {
  pub first_name:        String,
  pub last_name:         String,
  pub first_name_kana:   String,
  pub last_name_kana:    String,
  pub school_name:       String,
  pub department:        String,
  pub laboratory:        String,
  /// Canonical year; use [`MinimumUserInfo::with_graduation_year`].
  pub graduation_year:   String,
  pub desired_job_types: Vec<String>,
  pub skills:            Vec<String>,
}

impl MinimumUserInfo {
  /// Set the graduation year from a label such as `"2026卒"`.
  pub fn with_graduation_year(mut self, label: &str) -> Self {
    self.graduation_year = year::normalize(label).unwrap_or_default();
    self
  }
}

/// The profile edit form, sent as multipart because of the icon.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
  pub first_name:      String,
  pub last_name:       String,
  pub first_name_kana: String,
  pub last_name_kana:  String,
  pub icon:            Option<ImageAttachment>,
}

impl ProfileUpdate {
  /// Start from the current profile so unchanged fields are resent as-is.
  pub fn from_user(user: &User) -> Self {
    Self {
      first_name:      user.first_name.clone(),
      last_name:       user.last_name.clone(),
      first_name_kana: user.first_name_kana.clone(),
      last_name_kana:  user.last_name_kana.clone(),
      icon:            None,
    }
  }
}

//! Non-interactive subcommands.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use clap::{Args, Subcommand};
use folio_client::{ApiClient, ClientError};
use folio_core::{
  FieldErrors,
  attachment::ImageAttachment,
  auth::{LoginInput, PasswordReset, PasswordResetRequest, SignupInput, TokenInput},
  draft::DraftSubmission,
  filter::{self, FilterCriteria},
  option::{self, OptionKind},
  portfolio::PortfolioRecord,
  user::{MinimumUserInfo, ProfileUpdate, User},
  year,
};

use crate::settings::Settings;

#[derive(Subcommand, Debug)]
pub enum Command {
  /// Print the portfolios matching the given filters.
  List(ListArgs),
  /// Print one portfolio.
  Show { id: u64 },
  /// Publish a new portfolio.
  Post(PostArgs),
  /// Print the labels of an option set (skills, genres, job-types,
  /// graduation-years).
  Options { kind: OptionKind },
  /// Print the signed-in user's profile and posts.
  Me,
  /// Update the signed-in user's profile.
  Profile(ProfileArgs),
  /// Create an account with the configured email and password.
  Signup,
  /// Confirm an email address with the token from the verification mail.
  Verify { token: String },
  /// Ask for a password reset mail.
  ForgotPassword { email: String },
  /// Set a new password with the token from the reset mail.
  ResetPassword {
    token:        String,
    #[arg(long)]
    new_password: String,
    #[arg(long)]
    confirm:      String,
  },
  /// End the session.
  Logout,
  /// Print the URL that starts the Google sign-in flow.
  OauthUrl,
}

#[derive(Args, Debug, Default)]
pub struct ListArgs {
  /// Case-insensitive substring of the title or description.
  #[arg(short, long, default_value = "")]
  keyword: String,
  /// Graduation year, as `2026` or `2026卒`. Repeatable.
  #[arg(long = "year")]
  years:   Vec<String>,
  /// Repeatable.
  #[arg(long = "genre")]
  genres:  Vec<String>,
  /// Repeatable.
  #[arg(long = "skill")]
  skills:  Vec<String>,
  /// Only the signed-in user's posts.
  #[arg(long)]
  mine:    bool,
}

#[derive(Args, Debug)]
pub struct PostArgs {
  #[arg(long, default_value = "")]
  title:       String,
  #[arg(long, default_value = "")]
  description: String,
  /// Repeatable.
  #[arg(long = "genre")]
  genres:      Vec<String>,
  /// Repeatable.
  #[arg(long = "skill")]
  skills:      Vec<String>,
  /// Image file to attach. Repeatable.
  #[arg(long = "image", value_name = "FILE")]
  images:      Vec<PathBuf>,
}

/// Without any of the onboarding flags only the names and icon are sent.
#[derive(Args, Debug)]
pub struct ProfileArgs {
  #[arg(long)]
  first_name:      Option<String>,
  #[arg(long)]
  last_name:       Option<String>,
  #[arg(long)]
  first_name_kana: Option<String>,
  #[arg(long)]
  last_name_kana:  Option<String>,
  /// Profile icon image.
  #[arg(long, value_name = "FILE")]
  icon:            Option<PathBuf>,

  #[arg(long)]
  school:          Option<String>,
  #[arg(long)]
  department:      Option<String>,
  #[arg(long)]
  laboratory:      Option<String>,
  /// `2026` or `2026卒`.
  #[arg(long)]
  graduation_year: Option<String>,
  /// Repeatable.
  #[arg(long = "job-type")]
  job_types:       Vec<String>,
  /// Repeatable.
  #[arg(long = "skill")]
  skills:          Vec<String>,
}

impl ProfileArgs {
  fn is_onboarding(&self) -> bool {
    self.school.is_some()
      || self.department.is_some()
      || self.laboratory.is_some()
      || self.graduation_year.is_some()
      || !self.job_types.is_empty()
      || !self.skills.is_empty()
  }
}

impl Command {
  /// Whether the command needs no session, so no login is attempted.
  fn is_anonymous(&self) -> bool {
    matches!(
      self,
      Self::Signup
        | Self::Verify { .. }
        | Self::ForgotPassword { .. }
        | Self::ResetPassword { .. }
        | Self::OauthUrl
        | Self::Options {
          kind: OptionKind::GraduationYears,
        }
    )
  }
}

// ─── Dispatch ─────────────────────────────────────────────────────────────────

pub async fn run(command: Command, settings: &Settings) -> Result<()> {
  let client = ApiClient::new(settings.api_config()).context("building HTTP client")?;
  if !command.is_anonymous() {
    login(&client, settings).await?;
  }

  match command {
    Command::List(args) => list(&client, args).await,
    Command::Show { id } => show(&client, id).await,
    Command::Post(args) => post(&client, args).await,
    Command::Options { kind } => options(&client, kind).await,
    Command::Me => me(&client).await,
    Command::Profile(args) => profile(&client, args).await,
    Command::Signup => signup(&client, settings).await,
    Command::Verify { token } => {
      let input = TokenInput::new(token).map_err(invalid)?;
      let message = client.verify(&input).await?;
      println!("{}", message.as_deref().unwrap_or("email address verified"));
      Ok(())
    }
    Command::ForgotPassword { email } => {
      let input = PasswordResetRequest::new(email).map_err(invalid)?;
      let message = client.request_password_reset(&input).await?;
      println!("{}", message.as_deref().unwrap_or("password reset mail sent"));
      Ok(())
    }
    Command::ResetPassword {
      token,
      new_password,
      confirm,
    } => {
      let input = PasswordReset::new(token, new_password, &confirm).map_err(invalid)?;
      client
        .check_reset_token(&TokenInput::new(input.token.clone()).map_err(invalid)?)
        .await
        .context("the reset link is invalid or has expired")?;
      let message = client.reset_password(&input).await?;
      println!("{}", message.as_deref().unwrap_or("password updated"));
      Ok(())
    }
    Command::Logout => {
      client.logout().await?;
      println!("logged out");
      Ok(())
    }
    Command::OauthUrl => {
      println!("{}", client.google_login_url());
      Ok(())
    }
  }
}

/// Log in with the configured credentials, if any.
pub async fn login(client: &ApiClient, settings: &Settings) -> Result<()> {
  let Some((email, password)) = settings.credentials() else {
    tracing::debug!("no credentials configured; continuing without a session");
    return Ok(());
  };
  let input = LoginInput::new(email, password, false).map_err(invalid)?;
  client.login(&input).await.context("login failed")
}

/// Print per-field errors to stderr and turn them into one error.
fn invalid(errors: FieldErrors) -> anyhow::Error {
  for (field, message) in errors.iter() {
    eprintln!("  {field}: {message}");
  }
  anyhow!("the form is incomplete ({} field(s))", errors.len())
}

// ─── Portfolios ───────────────────────────────────────────────────────────────

async fn list(client: &ApiClient, args: ListArgs) -> Result<()> {
  let records = if args.mine {
    client.user_posts().await?
  } else {
    client.all_posts().await?
  };
  let criteria = FilterCriteria {
    keyword: args.keyword,
    years:   args.years,
    genres:  args.genres,
    skills:  args.skills,
  };

  let matched = filter::filter(&records, &criteria);
  for record in &matched {
    println!("{}", summary(record));
  }
  tracing::info!(total = records.len(), matched = matched.len(), "listed portfolios");
  Ok(())
}

fn summary(record: &PortfolioRecord) -> String {
  let author = record
    .user
    .as_ref()
    .map(|u| {
      let year = u
        .graduation_year()
        .map(|y| format!(" {y}{}", year::YEAR_SUFFIX))
        .unwrap_or_default();
      format!("[{}] {}{year}", u.initials(), u.school_name)
    })
    .unwrap_or_default();
  format!(
    "{:>5}  {}  {}  {}",
    record.id,
    record.title,
    author.trim(),
    record.genres.join(", ")
  )
  .trim_end()
  .to_owned()
}

async fn show(client: &ApiClient, id: u64) -> Result<()> {
  let record = client.post(id).await?;
  println!("{}", record.title);
  if let Some(author) = &record.user {
    println!("by {} ({})", author.full_name(), author.school_name);
  }
  if !record.description.is_empty() {
    println!("\n{}\n", record.description);
  }
  for (label, value) in [
    ("genres", record.genres.join(", ")),
    ("skills", record.skills.join(", ")),
    ("github", record.github_link.clone()),
    ("product", record.product_link.clone()),
  ] {
    if !value.is_empty() {
      println!("{label:<8} {value}");
    }
  }
  for image in &record.images {
    println!("image    {}", client.asset_url(&image.url));
  }
  Ok(())
}

async fn post(client: &ApiClient, args: PostArgs) -> Result<()> {
  let (genres, skills) = tokio::join!(
    option::load(client, OptionKind::Genres),
    option::load(client, OptionKind::Skills),
  );
  let mut draft = DraftSubmission::new(genres, skills);
  draft.set_title(args.title);
  draft.set_description(args.description);

  for genre in &args.genres {
    if !draft.genres().options().is_empty() && !draft.genres().options().contains(genre) {
      tracing::warn!(%genre, "genre is not one of the known options");
    }
    draft.genres_mut().select(genre)?;
  }
  for skill in &args.skills {
    draft.skills_mut().select(skill)?;
  }

  let mut batch = Vec::with_capacity(args.images.len());
  for path in &args.images {
    batch.push(read_image(path).await?);
  }
  let report = draft.attach(batch)?;
  for rejected in &report.rejected {
    eprintln!(
      "skipped {} ({} bytes): larger than {} bytes",
      rejected.file_name,
      rejected.size,
      folio_core::draft::MAX_IMAGE_BYTES
    );
  }

  match client.submit_draft(&draft).await {
    Ok(submitted) => {
      println!(
        "{}",
        submitted.message.as_deref().unwrap_or("portfolio published")
      );
      Ok(())
    }
    Err(ClientError::Invalid(errors)) => Err(invalid(errors)),
    Err(e) => Err(e.into()),
  }
}

async fn read_image(path: &Path) -> Result<ImageAttachment> {
  let data = tokio::fs::read(path)
    .await
    .with_context(|| format!("reading {}", path.display()))?;
  let file_name = path
    .file_name()
    .map(|n| n.to_string_lossy().into_owned())
    .ok_or_else(|| anyhow!("{} is not a file", path.display()))?;
  Ok(ImageAttachment::new(file_name, data))
}

async fn options(client: &ApiClient, kind: OptionKind) -> Result<()> {
  let set = option::load(client, kind).await;
  if set.is_empty() {
    bail!("no {kind} options are available");
  }
  for label in set.iter() {
    println!("{label}");
  }
  Ok(())
}

// ─── User ─────────────────────────────────────────────────────────────────────

async fn me(client: &ApiClient) -> Result<()> {
  if !client.check_auth().await? {
    bail!("not signed in; set email and password in the config or pass --email/--password");
  }
  let (user, posts) = tokio::join!(client.user_info(), client.user_posts());
  let user = user?;

  println!("{} ({})", user.full_name(), user.initials());
  for (label, value) in [
    ("email", user.email.clone()),
    ("school", user.school_name.clone()),
    ("department", user.department.clone()),
    ("laboratory", user.laboratory.clone()),
    (
      "graduation",
      user
        .graduation_year()
        .map(|y| format!("{y}{}", year::YEAR_SUFFIX))
        .unwrap_or_default(),
    ),
    ("job types", user.desired_job_types.join(", ")),
    ("skills", user.skills.join(", ")),
  ] {
    if !value.is_empty() {
      println!("  {label:<11} {value}");
    }
  }
  if !user.has_minimum_info() {
    println!("  profile incomplete: run `folio profile` to finish onboarding");
  }

  match posts {
    Ok(posts) => {
      println!("\n{} post(s)", posts.len());
      for record in &posts {
        println!("{}", summary(record));
      }
    }
    Err(e) => tracing::warn!(error = %e, "failed to load own posts"),
  }
  Ok(())
}

async fn profile(client: &ApiClient, args: ProfileArgs) -> Result<()> {
  let current = client.user_info().await?;

  let updated = if args.is_onboarding() {
    let info = minimum_info(args, current);
    client.update_minimum_user_info(&info).await?
  } else {
    let mut update = ProfileUpdate::from_user(&current);
    if let Some(v) = args.first_name {
      update.first_name = v;
    }
    if let Some(v) = args.last_name {
      update.last_name = v;
    }
    if let Some(v) = args.first_name_kana {
      update.first_name_kana = v;
    }
    if let Some(v) = args.last_name_kana {
      update.last_name_kana = v;
    }
    if let Some(path) = &args.icon {
      update.icon = Some(read_image(path).await?);
    }
    client.update_profile(&update).await?
  };

  println!("updated profile for {}", updated.full_name());
  Ok(())
}

/// Merge the onboarding flags over the current profile. Unset flags keep
/// the stored value.
fn minimum_info(args: ProfileArgs, current: User) -> MinimumUserInfo {
  let graduation_year = current.graduation_year().unwrap_or_default();
  let info = MinimumUserInfo {
    first_name: args.first_name.unwrap_or(current.first_name),
    last_name: args.last_name.unwrap_or(current.last_name),
    first_name_kana: args.first_name_kana.unwrap_or(current.first_name_kana),
    last_name_kana: args.last_name_kana.unwrap_or(current.last_name_kana),
    school_name: args.school.unwrap_or(current.school_name),
    department: args.department.unwrap_or(current.department),
    laboratory: args.laboratory.unwrap_or(current.laboratory),
    graduation_year,
    desired_job_types: if args.job_types.is_empty() {
      current.desired_job_types
    } else {
      args.job_types
    },
    skills: if args.skills.is_empty() {
      current.skills
    } else {
      args.skills
    },
  };
  match args.graduation_year.as_deref() {
    Some(label) => info.with_graduation_year(label),
    None => info,
  }
}

async fn signup(client: &ApiClient, settings: &Settings) -> Result<()> {
  let (Some(email), Some(password)) = (settings.email.as_deref(), settings.password.as_deref())
  else {
    bail!("signup needs --email and --password");
  };
  let input = SignupInput::new(email, password).map_err(invalid)?;
  let message = client.signup(&input).await?;
  println!(
    "{}",
    message
      .as_deref()
      .unwrap_or("check your inbox for the verification link")
  );
  Ok(())
}

#[cfg(test)]
mod tests {
  use clap::Parser;

  use super::*;

  #[derive(Parser)]
  struct Cli {
    #[command(subcommand)]
    command: Command,
  }

  fn parse(args: &[&str]) -> Command {
    Cli::try_parse_from(std::iter::once("folio").chain(args.iter().copied()))
      .unwrap()
      .command
  }

  #[test]
  fn list_flags_repeat() {
    let Command::List(args) = parse(&["list", "--skill", "Go", "--skill", "Rust", "--year", "2026卒"])
    else {
      panic!("expected list");
    };
    assert_eq!(args.skills, ["Go", "Rust"]);
    assert_eq!(args.years, ["2026卒"]);
    assert!(args.keyword.is_empty());
  }

  #[test]
  fn option_kinds_parse_from_kebab_case() {
    assert!(matches!(
      parse(&["options", "job-types"]),
      Command::Options { kind: OptionKind::JobTypes }
    ));
    assert!(Cli::try_parse_from(["folio", "options", "colours"]).is_err());
  }

  #[test]
  fn auth_flows_skip_login() {
    assert!(parse(&["verify", "tok"]).is_anonymous());
    assert!(parse(&["oauth-url"]).is_anonymous());
    assert!(!parse(&["me"]).is_anonymous());
    assert!(!parse(&["post", "--title", "x"]).is_anonymous());
  }

  #[test]
  fn remote_options_need_a_session() {
    assert!(!parse(&["options", "skills"]).is_anonymous());
    assert!(!parse(&["options", "job-types"]).is_anonymous());
    assert!(parse(&["options", "graduation-years"]).is_anonymous());
  }

  #[test]
  fn onboarding_keeps_unset_fields() {
    let mut current = User::default();
    current.first_name = "健心".into();
    current.laboratory = "Robotics".into();
    current.skills = vec!["Go".into()];
    current.set_graduation_year("2026");

    let Command::Profile(args) = parse(&["profile", "--school", "HAL"]) else {
      panic!("expected profile");
    };
    let info = minimum_info(args, current.clone());
    assert_eq!(info.first_name, "健心");
    assert_eq!(info.school_name, "HAL");
    assert_eq!(info.laboratory, "Robotics");
    assert_eq!(info.graduation_year, "2026");
    assert_eq!(info.skills, ["Go"]);

    let Command::Profile(args) =
      parse(&["profile", "--laboratory", "Vision", "--graduation-year", "2027卒"])
    else {
      panic!("expected profile");
    };
    let info = minimum_info(args, current);
    assert_eq!(info.laboratory, "Vision");
    assert_eq!(info.graduation_year, "2027");
  }

  #[test]
  fn onboarding_is_detected_from_flags() {
    let Command::Profile(args) = parse(&["profile", "--first-name", "Ken"]) else {
      panic!("expected profile");
    };
    assert!(!args.is_onboarding());

    let Command::Profile(args) = parse(&["profile", "--graduation-year", "2027卒"]) else {
      panic!("expected profile");
    };
    assert!(args.is_onboarding());
  }

  #[test]
  fn summary_shows_author_and_year() {
    let mut user = User::default();
    user.last_name_kana = "タニ".into();
    user.first_name_kana = "ケンシン".into();
    user.school_name = "HAL".into();
    user.set_graduation_year("2026卒");
    let record = PortfolioRecord {
      id: 3,
      title: "Robot Arm".into(),
      genres: vec!["ゲーム開発".into()],
      user: Some(user),
      ..Default::default()
    };
    assert_eq!(summary(&record), "    3  Robot Arm  [T.K.] HAL 2026卒  ゲーム開発");
  }
}

//! [`ApiClient`]: one method per backend endpoint.

use std::time::Duration;

use folio_core::{
  auth::{LoginInput, PasswordReset, PasswordResetRequest, SignupInput, TokenInput},
  draft::{DraftSubmission, Submission},
  option::{OptionKind, OptionSource},
  portfolio::PortfolioRecord,
  user::{MinimumUserInfo, ProfileUpdate, User},
};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::{
  ClientError, Result,
  envelope::{AllPosts, ErrorBody, MessageBody, OnePost, OptionsBody, UserBody, UserPosts},
  error::REJECTED_FALLBACK,
  multipart,
};

/// Connection settings for the backend.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
  pub timeout:  Duration,
}

impl Default for ApiConfig {
  fn default() -> Self {
    Self {
      base_url: "http://localhost:8080".to_owned(),
      timeout:  Duration::from_secs(30),
    }
  }
}

/// Returned once the backend has accepted a new portfolio. The caller should
/// leave the form and drop the draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submitted {
  /// Confirmation text from the backend, if any.
  pub message: Option<String>,
}

/// Async HTTP client for the portfolio backend.
///
/// Clones share the inner [`reqwest::Client`] and its cookie store, and so
/// one session.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(config.timeout)
      .cookie_store(true)
      .build()
      .map_err(ClientError::Build)?;
    Ok(Self { client, config })
  }

  pub fn config(&self) -> &ApiConfig { &self.config }

  fn url(&self, path: &str) -> String {
    format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
  }

  /// Absolute URL for a backend-relative asset path such as an image URL.
  pub fn asset_url(&self, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
      return path.to_owned();
    }
    format!(
      "{}/{}",
      self.config.base_url.trim_end_matches('/'),
      path.trim_start_matches('/')
    )
  }

  // ── Plumbing ──────────────────────────────────────────────────────────────

  /// Send `req`, turning transport failures and non-2xx statuses into errors.
  async fn send(&self, endpoint: &str, req: RequestBuilder) -> Result<Response> {
    tracing::debug!(endpoint, "sending request");
    let resp = req.send().await.map_err(ClientError::Network)?;
    let status = resp.status();
    if status.is_success() {
      return Ok(resp);
    }

    // An unreadable error body still yields the fallback message.
    let body = resp.bytes().await.unwrap_or_default();
    let message = ErrorBody::parse(&body).unwrap_or_else(|| REJECTED_FALLBACK.to_owned());
    tracing::warn!(endpoint, %status, %message, "request rejected");
    Err(ClientError::Rejected {
      status: status.as_u16(),
      message,
    })
  }

  async fn json<T: DeserializeOwned>(&self, endpoint: &str, req: RequestBuilder) -> Result<T> {
    let resp = self.send(endpoint, req).await?;
    let body = resp.bytes().await.map_err(ClientError::Network)?;
    serde_json::from_slice(&body).map_err(|source| ClientError::Decode {
      endpoint: endpoint.to_owned(),
      source,
    })
  }

  /// Like [`json`](Self::json) for endpoints whose success body is only a
  /// message; an empty or non-JSON body is not an error.
  async fn message(&self, endpoint: &str, req: RequestBuilder) -> Result<Option<String>> {
    let resp = self.send(endpoint, req).await?;
    let body = resp.bytes().await.map_err(ClientError::Network)?;
    Ok(
      serde_json::from_slice::<MessageBody>(&body)
        .unwrap_or_default()
        .message,
    )
  }

  // ── Options ───────────────────────────────────────────────────────────────

  /// `GET /options/{skills|genre|job-types}`
  pub async fn options(&self, kind: OptionKind) -> Result<Vec<String>> {
    let (Some(path), Some(key)) = (kind.path(), kind.response_key()) else {
      return Err(ClientError::NotServed(kind));
    };
    let endpoint = format!("GET /options/{path}");
    let mut body: OptionsBody = self
      .json(&endpoint, self.client.get(self.url(&format!("/options/{path}"))))
      .await?;
    Ok(body.remove(key).flatten().unwrap_or_default())
  }

  // ── Portfolios ────────────────────────────────────────────────────────────

  /// `GET /Portfolio/getAllPosts`
  pub async fn all_posts(&self) -> Result<Vec<PortfolioRecord>> {
    let body: AllPosts = self
      .json(
        "GET /Portfolio/getAllPosts",
        self.client.get(self.url("/Portfolio/getAllPosts")),
      )
      .await?;
    Ok(body.into_records())
  }

  /// `GET /Portfolio/getUserPosts`: the signed-in user's own posts.
  pub async fn user_posts(&self) -> Result<Vec<PortfolioRecord>> {
    let body: UserPosts = self
      .json(
        "GET /Portfolio/getUserPosts",
        self.client.get(self.url("/Portfolio/getUserPosts")),
      )
      .await?;
    Ok(body.into_records())
  }

  /// `GET /Portfolio/{id}`
  pub async fn post(&self, id: u64) -> Result<PortfolioRecord> {
    let body: OnePost = self
      .json(
        "GET /Portfolio/{id}",
        self.client.get(self.url(&format!("/Portfolio/{id}"))),
      )
      .await?;
    Ok(body.into_post())
  }

  /// `POST /Portfolio/posts` (multipart)
  pub async fn create_post(&self, submission: &Submission) -> Result<Submitted> {
    let form = multipart::submission_form(submission)?;
    let message = self
      .message(
        "POST /Portfolio/posts",
        self.client.post(self.url("/Portfolio/posts")).multipart(form),
      )
      .await?;
    tracing::info!(title = %submission.title, "portfolio submitted");
    Ok(Submitted { message })
  }

  /// Validate `draft` and, when it is complete, send it as one request.
  ///
  /// Validation failures come back as [`ClientError::Invalid`] without
  /// touching the network.
  pub async fn submit_draft(&self, draft: &DraftSubmission) -> Result<Submitted> {
    let submission = draft.validate()?;
    self.create_post(&submission).await
  }

  // ── User ──────────────────────────────────────────────────────────────────

  /// `GET /user/GetInfo`
  pub async fn user_info(&self) -> Result<User> {
    let body: UserBody = self
      .json("GET /user/GetInfo", self.client.get(self.url("/user/GetInfo")))
      .await?;
    Ok(body.user)
  }

  /// `PUT /user/UpdateMinimumUserInfo` (JSON)
  pub async fn update_minimum_user_info(&self, info: &MinimumUserInfo) -> Result<User> {
    let body: UserBody = self
      .json(
        "PUT /user/UpdateMinimumUserInfo",
        self
          .client
          .put(self.url("/user/UpdateMinimumUserInfo"))
          .json(info),
      )
      .await?;
    Ok(body.user)
  }

  /// `PUT /user/UpdateMinimumUserInfo` (multipart, with an optional icon)
  pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<User> {
    let form = multipart::profile_form(update)?;
    let body: UserBody = self
      .json(
        "PUT /user/UpdateMinimumUserInfo",
        self
          .client
          .put(self.url("/user/UpdateMinimumUserInfo"))
          .multipart(form),
      )
      .await?;
    Ok(body.user)
  }

  // ── Auth ──────────────────────────────────────────────────────────────────

  /// `POST /auth/login`. The session cookie is kept by the client.
  pub async fn login(&self, input: &LoginInput) -> Result<()> {
    self
      .message("POST /auth/login", self.client.post(self.url("/auth/login")).json(input))
      .await?;
    tracing::info!(email = %input.email, "logged in");
    Ok(())
  }

  /// `POST /auth/signup`. The backend emails a verification link.
  pub async fn signup(&self, input: &SignupInput) -> Result<Option<String>> {
    self
      .message("POST /auth/signup", self.client.post(self.url("/auth/signup")).json(input))
      .await
  }

  /// `POST /auth/verify`
  pub async fn verify(&self, input: &TokenInput) -> Result<Option<String>> {
    self
      .message("POST /auth/verify", self.client.post(self.url("/auth/verify")).json(input))
      .await
  }

  /// `POST /auth/logout`
  pub async fn logout(&self) -> Result<()> {
    self
      .message("POST /auth/logout", self.client.post(self.url("/auth/logout")))
      .await?;
    Ok(())
  }

  /// `GET /auth/check`: `false` for any non-2xx status.
  pub async fn check_auth(&self) -> Result<bool> {
    match self
      .send("GET /auth/check", self.client.get(self.url("/auth/check")))
      .await
    {
      Ok(_) => Ok(true),
      Err(ClientError::Rejected { .. }) => Ok(false),
      Err(e) => Err(e),
    }
  }

  /// `POST /auth/RequestPasswordReset`
  pub async fn request_password_reset(
    &self,
    input: &PasswordResetRequest,
  ) -> Result<Option<String>> {
    self
      .message(
        "POST /auth/RequestPasswordReset",
        self
          .client
          .post(self.url("/auth/RequestPasswordReset"))
          .json(input),
      )
      .await
  }

  /// `POST /auth/CheckResetToken`: `Ok(())` when the token is still valid.
  pub async fn check_reset_token(&self, input: &TokenInput) -> Result<()> {
    self
      .message(
        "POST /auth/CheckResetToken",
        self.client.post(self.url("/auth/CheckResetToken")).json(input),
      )
      .await?;
    Ok(())
  }

  /// `POST /auth/ResetPassword`
  pub async fn reset_password(&self, input: &PasswordReset) -> Result<Option<String>> {
    self
      .message(
        "POST /auth/ResetPassword",
        self.client.post(self.url("/auth/ResetPassword")).json(input),
      )
      .await
  }

  /// Where to send the user's browser to start the Google OAuth flow.
  pub fn google_login_url(&self) -> String { self.url("/auth/google/login") }
}

impl OptionSource for ApiClient {
  type Error = ClientError;

  async fn fetch_options(&self, kind: OptionKind) -> Result<Vec<String>> {
    self.options(kind).await
  }
}

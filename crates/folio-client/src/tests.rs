//! Tests for `ApiClient` against a mock backend.

use folio_core::{
  Field,
  attachment::ImageAttachment,
  auth::{LoginInput, PasswordReset},
  draft::DraftSubmission,
  option::{self, OptionKind, OptionSet},
  user::ProfileUpdate,
};
use httpmock::prelude::*;
use serde_json::json;

use crate::{ApiClient, ApiConfig, ClientError, Submitted, error::REJECTED_FALLBACK};

fn client(server: &MockServer) -> ApiClient {
  ApiClient::new(ApiConfig {
    base_url: server.base_url(),
    ..Default::default()
  })
  .expect("client")
}

fn draft() -> DraftSubmission {
  DraftSubmission::new(
    OptionSet::new(OptionKind::Genres, ["web開発", "ゲーム開発"]),
    OptionSet::new(OptionKind::Skills, ["Rust", "Go"]),
  )
}

// ─── Options ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn options_unwrap_the_envelope() {
  let server = MockServer::start_async().await;
  let mock = server
    .mock_async(|when, then| {
      when.method(GET).path("/options/job-types");
      then
        .status(200)
        .json_body(json!({ "jobTypes": ["エンジニア", "デザイナー"] }));
    })
    .await;

  let jobs = client(&server).options(OptionKind::JobTypes).await.unwrap();
  mock.assert_async().await;
  assert_eq!(jobs, ["エンジニア", "デザイナー"]);
}

#[tokio::test]
async fn null_option_list_is_empty() {
  let server = MockServer::start_async().await;
  server
    .mock_async(|when, then| {
      when.method(GET).path("/options/genre");
      then.status(200).json_body(json!({ "genres": null }));
    })
    .await;

  let genres = client(&server).options(OptionKind::Genres).await.unwrap();
  assert!(genres.is_empty());
}

#[tokio::test]
async fn option_load_failure_yields_empty_set() {
  let server = MockServer::start_async().await;
  server
    .mock_async(|when, then| {
      when.method(GET).path("/options/skills");
      then.status(500).json_body(json!({ "error": "Failed to get skills" }));
    })
    .await;

  let set = option::load(&client(&server), OptionKind::Skills).await;
  assert!(set.is_empty());
  assert_eq!(set.kind(), OptionKind::Skills);
}

#[tokio::test]
async fn graduation_years_are_not_served() {
  let server = MockServer::start_async().await;
  let err = client(&server)
    .options(OptionKind::GraduationYears)
    .await
    .unwrap_err();
  assert!(matches!(err, ClientError::NotServed(OptionKind::GraduationYears)));
}

// ─── Portfolios ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn all_posts_decodes_records() {
  let server = MockServer::start_async().await;
  server
    .mock_async(|when, then| {
      when.method(GET).path("/Portfolio/getAllPosts");
      then.status(200).json_body(json!({
        "portfolio": [
          { "ID": 1, "Title": "Robot Arm", "Genres": ["ゲーム開発"], "Skills": ["Go"] },
          { "ID": 2, "Title": "Chat App", "Genres": null, "Skills": ["TypeScript"] }
        ]
      }));
    })
    .await;

  let posts = client(&server).all_posts().await.unwrap();
  assert_eq!(posts.len(), 2);
  assert_eq!(posts[0].title, "Robot Arm");
  assert!(posts[1].genres.is_empty());
}

#[tokio::test]
async fn user_posts_with_null_list() {
  let server = MockServer::start_async().await;
  server
    .mock_async(|when, then| {
      when.method(GET).path("/Portfolio/getUserPosts");
      then.status(200).json_body(json!({ "posts": null }));
    })
    .await;

  assert!(client(&server).user_posts().await.unwrap().is_empty());
}

#[tokio::test]
async fn single_post_by_id() {
  let server = MockServer::start_async().await;
  server
    .mock_async(|when, then| {
      when.method(GET).path("/Portfolio/7");
      then
        .status(200)
        .json_body(json!({ "post": { "ID": 7, "Title": "Portfolio A" } }));
    })
    .await;

  let post = client(&server).post(7).await.unwrap();
  assert_eq!(post.id, 7);
  assert_eq!(post.title, "Portfolio A");
}

#[tokio::test]
async fn unwrapped_camel_case_posts_decode() {
  let server = MockServer::start_async().await;
  server
    .mock_async(|when, then| {
      when.method(GET).path("/Portfolio/getAllPosts");
      then.status(200).json_body(json!([
        {
          "id": 3,
          "createdAt": "2025-04-01T09:00:00Z",
          "title": "Drone",
          "genres": ["IoT"],
          "skills": null,
          "images": [{ "id": 1, "url": "/uploads/a.png", "postId": 3 }],
          "userId": 9,
          "user": { "id": 9, "firstName": "Ken", "graduationYear": 2026 }
        }
      ]));
    })
    .await;
  server
    .mock_async(|when, then| {
      when.method(GET).path("/Portfolio/3");
      then.status(200).json_body(json!({ "id": 3, "title": "Drone" }));
    })
    .await;

  let client = client(&server);
  let posts = client.all_posts().await.unwrap();
  assert_eq!(posts.len(), 1);
  assert_eq!(posts[0].title, "Drone");
  assert_eq!(posts[0].user_id, 9);
  assert_eq!(posts[0].images[0].url, "/uploads/a.png");
  assert!(posts[0].skills.is_empty());
  assert!(posts[0].created_at.is_some());
  assert_eq!(posts[0].graduation_year().as_deref(), Some("2026"));

  let post = client.post(3).await.unwrap();
  assert_eq!(post.id, 3);
  assert_eq!(post.title, "Drone");
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
  let server = MockServer::start_async().await;
  server
    .mock_async(|when, then| {
      when.method(GET).path("/Portfolio/getAllPosts");
      then.status(200).body("<html>oops</html>");
    })
    .await;

  let err = client(&server).all_posts().await.unwrap_err();
  assert!(matches!(err, ClientError::Decode { .. }));
}

// ─── Submission ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn incomplete_draft_sends_nothing() {
  let server = MockServer::start_async().await;
  let mock = server
    .mock_async(|when, then| {
      when.method(POST).path("/Portfolio/posts");
      then.status(201);
    })
    .await;

  let err = client(&server).submit_draft(&draft()).await.unwrap_err();
  let errors = match err {
    ClientError::Invalid(errors) => errors,
    other => panic!("expected validation errors, got {other:?}"),
  };
  assert_eq!(errors.len(), 4);
  for field in [Field::Title, Field::Genres, Field::Images, Field::Skills] {
    assert!(errors.contains(field));
  }
  mock.assert_hits_async(0).await;
}

#[tokio::test]
async fn complete_draft_is_one_multipart_post() {
  let server = MockServer::start_async().await;
  let mock = server
    .mock_async(|when, then| {
      when
        .method(POST)
        .path("/Portfolio/posts")
        .body_contains("name=\"title\"")
        .body_contains("Portfolio A")
        .body_contains("name=\"genres\"")
        .body_contains("web開発")
        .body_contains("name=\"skills\"")
        .body_contains("filename=\"shot.png\"");
      then
        .status(201)
        .json_body(json!({ "message": "Post created successfully" }));
    })
    .await;

  let mut d = draft();
  d.set_title("Portfolio A");
  d.genres_mut().select("web開発").unwrap();
  d.skills_mut().select("Rust").unwrap();
  // Two megabytes of printable filler.
  d.attach(vec![ImageAttachment::new("shot.png", vec![b'x'; 2 * 1024 * 1024])])
    .unwrap();

  let submitted = client(&server).submit_draft(&d).await.unwrap();
  mock.assert_hits_async(1).await;
  assert_eq!(
    submitted,
    Submitted {
      message: Some("Post created successfully".into()),
    }
  );
}

#[tokio::test]
async fn server_error_message_is_surfaced_verbatim() {
  let server = MockServer::start_async().await;
  server
    .mock_async(|when, then| {
      when.method(POST).path("/Portfolio/posts");
      then.status(500).json_body(json!({
        "error": "Failed to create post",
        "details": "file shot.png is too large"
      }));
    })
    .await;

  let mut d = draft();
  d.set_title("Portfolio A");
  d.genres_mut().select("web開発").unwrap();
  d.skills_mut().select("Go").unwrap();
  d.attach(vec![ImageAttachment::new("shot.png", &b"png"[..])]).unwrap();

  let err = client(&server).submit_draft(&d).await.unwrap_err();
  assert_eq!(err.status(), Some(500));
  assert_eq!(err.to_string(), "Failed to create post");
}

#[tokio::test]
async fn missing_error_message_uses_fallback() {
  let server = MockServer::start_async().await;
  server
    .mock_async(|when, then| {
      when.method(GET).path("/user/GetInfo");
      then.status(401);
    })
    .await;

  let err = client(&server).user_info().await.unwrap_err();
  assert!(err.is_unauthorized());
  assert_eq!(err.to_string(), REJECTED_FALLBACK);
}

// ─── User & auth ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn user_info_decodes_profile() {
  let server = MockServer::start_async().await;
  server
    .mock_async(|when, then| {
      when.method(GET).path("/user/GetInfo");
      then.status(200).json_body(json!({
        "user": {
          "ID": 4,
          "FirstName": "健心",
          "LastNameKana": "タニ",
          "FirstNameKana": "ケンシン",
          "GraduationYear": "2026",
          "Skills": null
        }
      }));
    })
    .await;

  let user = client(&server).user_info().await.unwrap();
  assert_eq!(user.initials(), "T.K.");
  assert_eq!(user.graduation_year().as_deref(), Some("2026"));
  assert!(user.skills.is_empty());
}

#[tokio::test]
async fn profile_update_is_multipart() {
  let server = MockServer::start_async().await;
  let mock = server
    .mock_async(|when, then| {
      when
        .method(PUT)
        .path("/user/UpdateMinimumUserInfo")
        .body_contains("name=\"firstName\"")
        .body_contains("name=\"profileImage\"");
      then
        .status(200)
        .json_body(json!({ "user": { "ID": 4, "FirstName": "Ken" } }));
    })
    .await;

  let update = ProfileUpdate {
    first_name: "Ken".into(),
    icon: Some(ImageAttachment::new("me.txt", &b"icon"[..])),
    ..Default::default()
  };
  let user = client(&server).update_profile(&update).await.unwrap();
  mock.assert_async().await;
  assert_eq!(user.first_name, "Ken");
}

#[tokio::test]
async fn login_posts_credentials() {
  let server = MockServer::start_async().await;
  let mock = server
    .mock_async(|when, then| {
      when
        .method(POST)
        .path("/auth/login")
        .json_body(json!({
          "email": "a@example.com",
          "password": "password1",
          "rememberMe": false
        }));
      then
        .status(200)
        .header("set-cookie", "Authorization=abc; Path=/")
        .json_body(json!({ "message": "ok" }));
    })
    .await;

  let input = LoginInput::new("a@example.com", "password1", false).unwrap();
  client(&server).login(&input).await.unwrap();
  mock.assert_async().await;
}

#[tokio::test]
async fn login_cookie_is_sent_on_later_requests() {
  let server = MockServer::start_async().await;
  server
    .mock_async(|when, then| {
      when.method(POST).path("/auth/login");
      then
        .status(200)
        .header("set-cookie", "jwt-token=abc; Path=/; HttpOnly")
        .json_body(json!({ "message": "ok" }));
    })
    .await;
  let info = server
    .mock_async(|when, then| {
      when
        .method(GET)
        .path("/user/GetInfo")
        .header("cookie", "jwt-token=abc");
      then
        .status(200)
        .json_body(json!({ "user": { "ID": 4, "FirstName": "Ken" } }));
    })
    .await;

  let client = client(&server);
  let input = LoginInput::new("a@example.com", "password1", false).unwrap();
  client.login(&input).await.unwrap();
  // A clone shares the session.
  let user = client.clone().user_info().await.unwrap();
  info.assert_async().await;
  assert_eq!(user.first_name, "Ken");
}

#[tokio::test]
async fn check_auth_maps_status_to_bool() {
  let server = MockServer::start_async().await;
  server
    .mock_async(|when, then| {
      when.method(GET).path("/auth/check");
      then.status(401).json_body(json!({ "error": "Unauthorized" }));
    })
    .await;

  assert!(!client(&server).check_auth().await.unwrap());
}

#[tokio::test]
async fn reset_password_returns_server_message() {
  let server = MockServer::start_async().await;
  server
    .mock_async(|when, then| {
      when
        .method(POST)
        .path("/auth/ResetPassword")
        .json_body(json!({ "token": "tok", "new_password": "secret1" }));
      then
        .status(200)
        .json_body(json!({ "message": "Password has been reset" }));
    })
    .await;

  let input = PasswordReset::new("tok", "secret1", "secret1").unwrap();
  let message = client(&server).reset_password(&input).await.unwrap();
  assert_eq!(message.as_deref(), Some("Password has been reset"));
}

#[tokio::test]
async fn network_failure_is_generic() {
  // Nothing listens on this port.
  let client = ApiClient::new(ApiConfig {
    base_url: "http://127.0.0.1:1".into(),
    ..Default::default()
  })
  .unwrap();
  let err = client.all_posts().await.unwrap_err();
  assert!(matches!(err, ClientError::Network(_)));
  assert_eq!(err.to_string(), "a network error occurred");
}

#[test]
fn asset_urls_are_joined_to_the_base() {
  let client = ApiClient::new(ApiConfig {
    base_url: "http://localhost:8080/".into(),
    ..Default::default()
  })
  .unwrap();
  assert_eq!(
    client.asset_url("uploads/PortfolioImages/1_a.png"),
    "http://localhost:8080/uploads/PortfolioImages/1_a.png"
  );
  assert_eq!(client.asset_url("https://cdn/x.png"), "https://cdn/x.png");
  assert_eq!(
    client.google_login_url(),
    "http://localhost:8080/auth/google/login"
  );
}

//! Unit tests for `GitHubClient` against an in-process mock of the GitHub API.

#[path = "../common/mock_github.rs"]
mod mock_github;

use ghcard::services::github_client::{GitHubApi, GitHubClient};
use ghcard::types::errors::LookupError;
use ghcard::types::settings::{ApiToken, ClientSettings};

use mock_github::{closed_base_url, spawn, UNKNOWN_USER, VUEJS_AVATAR};

fn client_for(base_url: &str) -> GitHubClient {
    let settings = ClientSettings {
        api_base_url: base_url.to_string(),
        ..ClientSettings::default()
    };
    GitHubClient::new(&settings).unwrap()
}

// ─── Profiles ───

#[tokio::test]
async fn test_fetch_profile_vuejs() {
    let mock = spawn().await;
    let client = client_for(&mock.base_url);

    let profile = client.fetch_profile("vuejs").await.unwrap();

    assert_eq!(profile.login, "vuejs");
    assert_eq!(profile.name.as_deref(), Some("vuejs"));
    assert_eq!(profile.avatar_url, VUEJS_AVATAR);
    assert_eq!(profile.html_url, "https://github.com/vuejs");
}

#[tokio::test]
async fn test_fetch_profile_unknown_user_is_not_found() {
    let mock = spawn().await;
    let client = client_for(&mock.base_url);

    let err = client.fetch_profile(UNKNOWN_USER).await.unwrap_err();
    assert_eq!(err, LookupError::NotFound(UNKNOWN_USER.to_string()));
}

#[tokio::test]
async fn test_fetch_profile_server_error_is_status() {
    let mock = spawn().await;
    let client = client_for(&mock.base_url);

    let err = client.fetch_profile("server-error").await.unwrap_err();
    assert_eq!(err, LookupError::Status(500));
}

#[tokio::test]
async fn test_fetch_profile_wrong_shape_is_decode_error() {
    let mock = spawn().await;
    let client = client_for(&mock.base_url);

    let err = client.fetch_profile("garbled").await.unwrap_err();
    assert!(matches!(err, LookupError::Decode(_)), "got {:?}", err);
}

#[tokio::test]
async fn test_empty_username_is_not_found() {
    let mock = spawn().await;
    let client = client_for(&mock.base_url);

    let err = client.fetch_profile("").await.unwrap_err();
    assert_eq!(err, LookupError::NotFound(String::new()));
}

#[tokio::test]
async fn test_unreachable_api_is_network_error() {
    let base_url = closed_base_url().await;
    let client = client_for(&base_url);

    let err = client.fetch_profile("vuejs").await.unwrap_err();
    assert!(matches!(err, LookupError::Network(_)), "got {:?}", err);
}

#[tokio::test]
async fn test_base_url_with_path_prefix() {
    let mock = spawn().await;
    // A trailing slash on the base must not produce `//users`.
    let client = client_for(&format!("{}/", mock.base_url));

    let profile = client.fetch_profile("vuejs").await.unwrap();
    assert_eq!(profile.login, "vuejs");
}

// ─── Repositories ───

#[tokio::test]
async fn test_fetch_repos_keeps_upstream_order() {
    let mock = spawn().await;
    let client = client_for(&mock.base_url);

    let repos = client.fetch_repos("vuejs").await.unwrap();

    let names: Vec<&str> = repos.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["vue", "vue-router", "art"]);
    assert_eq!(repos[0].html_url, "https://github.com/vuejs/vue");
    assert_eq!(repos[0].forks_count, 33712);
    assert_eq!(repos[2].description, None);
    assert_eq!(mock.recorded.repo_hits(), 1);
}

#[tokio::test]
async fn test_fetch_repos_failure_is_status() {
    let mock = spawn().await;
    let client = client_for(&mock.base_url);

    let err = client.fetch_repos("norepos").await.unwrap_err();
    assert_eq!(err, LookupError::Status(502));
}

#[tokio::test]
async fn test_per_page_forwarded_only_when_configured() {
    let mock = spawn().await;

    client_for(&mock.base_url).fetch_repos("vuejs").await.unwrap();
    assert_eq!(*mock.recorded.last_per_page.lock().unwrap(), None);

    let settings = ClientSettings {
        api_base_url: mock.base_url.clone(),
        repos_per_page: Some(100),
        ..ClientSettings::default()
    };
    GitHubClient::new(&settings).unwrap().fetch_repos("vuejs").await.unwrap();
    assert_eq!(
        mock.recorded.last_per_page.lock().unwrap().as_deref(),
        Some("100")
    );
}

// ─── Headers ───

#[tokio::test]
async fn test_user_agent_sent_and_no_auth_without_token() {
    let mock = spawn().await;
    let client = client_for(&mock.base_url);

    client.fetch_profile("vuejs").await.unwrap();

    let user_agent = mock.recorded.last_user_agent.lock().unwrap().clone();
    assert!(user_agent.unwrap_or_default().starts_with("ghcard/"));
    assert_eq!(*mock.recorded.last_authorization.lock().unwrap(), None);
}

#[tokio::test]
async fn test_token_sent_as_bearer() {
    let mock = spawn().await;
    let settings = ClientSettings {
        api_base_url: mock.base_url.clone(),
        token: Some(ApiToken::new("ghp_test_token")),
        ..ClientSettings::default()
    };
    let client = GitHubClient::new(&settings).unwrap();

    client.fetch_profile("vuejs").await.unwrap();

    assert_eq!(
        mock.recorded.last_authorization.lock().unwrap().as_deref(),
        Some("Bearer ghp_test_token")
    );
}

// ─── Live API ───

/// Hits the real api.github.com; run with `cargo test -- --ignored`.
#[tokio::test]
#[ignore]
async fn test_live_github_lookups() {
    let client = GitHubClient::new(&ClientSettings::default()).unwrap();

    let profile = client.fetch_profile("vuejs").await.unwrap();
    assert_eq!(profile.avatar_url, VUEJS_AVATAR);

    let err = client.fetch_profile(UNKNOWN_USER).await.unwrap_err();
    assert_eq!(err, LookupError::NotFound(UNKNOWN_USER.to_string()));
}

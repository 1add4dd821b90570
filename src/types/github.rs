use serde::{Deserialize, Serialize};

/// GitHub user profile as returned by `GET /users/{username}`.
///
/// Only the fields the card shows are kept; serde ignores the rest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GitHubProfile {
    pub login: String,
    pub name: Option<String>,
    pub avatar_url: String,
    pub html_url: String,
}

/// A repository item from `GET /users/{username}/repos`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GitHubRepo {
    pub name: String,
    pub html_url: String,
    #[serde(default)]
    pub forks_count: u32,
    pub description: Option<String>,
}

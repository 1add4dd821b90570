use serde::{Deserialize, Serialize};

use super::errors::LookupError;
use super::github::{GitHubProfile, GitHubRepo};

/// Profile shown on the card after a successful lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// The username exactly as the user submitted it.
    pub username: String,
    /// The login reported by GitHub (canonical casing).
    pub login: String,
    pub display_name: Option<String>,
    pub avatar_url: String,
    pub profile_url: String,
}

impl Profile {
    pub fn from_api(username: &str, api: GitHubProfile) -> Self {
        Self {
            username: username.to_string(),
            login: api.login,
            display_name: api.name.filter(|n| !n.trim().is_empty()),
            avatar_url: api.avatar_url,
            profile_url: api.html_url,
        }
    }

    /// Name shown as the card title; falls back to the login.
    pub fn title(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.login)
    }
}

/// One row of the repository list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositoryEntry {
    pub name: String,
    pub url: String,
    pub forks: u32,
    /// Empty when the repository has no description upstream.
    pub description: String,
}

impl From<GitHubRepo> for RepositoryEntry {
    fn from(repo: GitHubRepo) -> Self {
        Self {
            name: repo.name,
            url: repo.html_url,
            forks: repo.forks_count,
            description: repo.description.unwrap_or_default(),
        }
    }
}

/// Outcome of the most recent profile lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum Lookup {
    Idle,
    Pending { username: String },
    NotFound { username: String },
    Found { profile: Profile },
}

/// Visibility of the repository list. Only leaves `Hidden` while the lookup is `Found`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum RepoPanel {
    Hidden,
    Pending,
    Shown { repositories: Vec<RepositoryEntry> },
}

/// Complete display state of one widget instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetState {
    /// Current value of the username input field.
    pub username: String,
    pub lookup: Lookup,
    pub repos: RepoPanel,
}

impl Default for WidgetState {
    fn default() -> Self {
        Self {
            username: String::new(),
            lookup: Lookup::Idle,
            repos: RepoPanel::Hidden,
        }
    }
}

impl WidgetState {
    pub fn profile(&self) -> Option<&Profile> {
        match &self.lookup {
            Lookup::Found { profile } => Some(profile),
            _ => None,
        }
    }

    pub fn repositories(&self) -> Option<&[RepositoryEntry]> {
        match &self.repos {
            RepoPanel::Shown { repositories } => Some(repositories),
            _ => None,
        }
    }
}

/// Keys the input field reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Enter,
    Other(String),
}

impl Key {
    /// Maps a DOM `KeyboardEvent.key` name.
    pub fn from_name(name: &str) -> Self {
        if name.eq_ignore_ascii_case("enter") {
            Key::Enter
        } else {
            Key::Other(name.to_string())
        }
    }
}

/// Everything that can happen to a widget: user input and fetch completions.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetEvent {
    Input(String),
    KeyDown(Key),
    ShowRepos,
    ProfileLoaded {
        username: String,
        result: Result<GitHubProfile, LookupError>,
    },
    ReposLoaded {
        username: String,
        result: Result<Vec<GitHubRepo>, LookupError>,
    },
}

/// Side effect requested by a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    FetchProfile(String),
    FetchRepos(String),
}

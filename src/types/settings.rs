use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";

/// Settings for the GitHub API client, persisted as JSON.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClientSettings {
    pub api_base_url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
    /// Forwarded as `per_page` to the repositories endpoint when set.
    pub repos_per_page: Option<u32>,
    /// Never persisted; populated from the environment.
    #[serde(skip)]
    pub token: Option<ApiToken>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            user_agent: format!("ghcard/{}", env!("CARGO_PKG_VERSION")),
            timeout_secs: 10,
            repos_per_page: None,
            token: None,
        }
    }
}

/// GitHub access token, wiped from memory on drop.
#[derive(Clone, PartialEq)]
pub struct ApiToken(Zeroizing<String>);

impl ApiToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(Zeroizing::new(token.into()))
    }

    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiToken(***)")
    }
}

//! Widget Manager for ghcard.
//!
//! Owns one widget instance: its display state, the pure transition function
//! that advances it, and the async execution of the fetches a transition asks for.

use std::sync::Arc;

use tracing::debug;

use crate::services::github_client::GitHubApi;
use crate::types::widget::{
    Command, Key, Lookup, Profile, RepoPanel, RepositoryEntry, WidgetEvent, WidgetState,
};
use crate::ui::markup::Element;
use crate::ui::render;

/// Advances `state` by one event.
///
/// Pure: no I/O happens here. A returned [`Command`] must be executed and its
/// completion fed back as the matching `*Loaded` event.
pub fn transition(state: &WidgetState, event: WidgetEvent) -> (WidgetState, Option<Command>) {
    let mut next = state.clone();

    match event {
        WidgetEvent::Input(value) => {
            next.username = value;
            (next, None)
        }

        WidgetEvent::KeyDown(Key::Enter) => {
            let username = next.username.clone();
            next.lookup = Lookup::Pending { username: username.clone() };
            next.repos = RepoPanel::Hidden;
            (next, Some(Command::FetchProfile(username)))
        }

        WidgetEvent::KeyDown(Key::Other(_)) => (next, None),

        WidgetEvent::ShowRepos => {
            let username = match next.profile() {
                Some(profile) if next.repos == RepoPanel::Hidden => Some(profile.username.clone()),
                _ => None,
            };
            match username {
                Some(username) => {
                    next.repos = RepoPanel::Pending;
                    (next, Some(Command::FetchRepos(username)))
                }
                None => (next, None),
            }
        }

        WidgetEvent::ProfileLoaded { username, result } => {
            let pending_for = match &next.lookup {
                Lookup::Pending { username } => Some(username.as_str()),
                _ => None,
            };
            if pending_for != Some(username.as_str()) {
                debug!(%username, "dropping stale profile response");
                return (next, None);
            }

            next.lookup = match result {
                Ok(api) => Lookup::Found { profile: Profile::from_api(&username, api) },
                Err(err) => {
                    debug!(%username, error = %err, "lookup failed");
                    Lookup::NotFound { username }
                }
            };
            next.repos = RepoPanel::Hidden;
            (next, None)
        }

        WidgetEvent::ReposLoaded { username, result } => {
            let matches_profile = next
                .profile()
                .map(|p| p.username == username)
                .unwrap_or(false);
            if !matches_profile || next.repos != RepoPanel::Pending {
                debug!(%username, "dropping stale repositories response");
                return (next, None);
            }

            next.repos = match result {
                Ok(repos) => RepoPanel::Shown {
                    repositories: repos.into_iter().map(RepositoryEntry::from).collect(),
                },
                Err(err) => {
                    // Back to the button so the user can ask again.
                    debug!(%username, error = %err, "repositories lookup failed");
                    RepoPanel::Hidden
                }
            };
            (next, None)
        }
    }
}

/// Runs the fetch behind a command and wraps the outcome as its completion event.
pub async fn run_command(api: &dyn GitHubApi, command: Command) -> WidgetEvent {
    match command {
        Command::FetchProfile(username) => {
            let result = api.fetch_profile(&username).await;
            WidgetEvent::ProfileLoaded { username, result }
        }
        Command::FetchRepos(username) => {
            let result = api.fetch_repos(&username).await;
            WidgetEvent::ReposLoaded { username, result }
        }
    }
}

/// One widget instance bound to a GitHub API.
pub struct WidgetManager {
    api: Arc<dyn GitHubApi>,
    state: WidgetState,
}

impl WidgetManager {
    pub fn new(api: Arc<dyn GitHubApi>) -> Self {
        Self {
            api,
            state: WidgetState::default(),
        }
    }

    pub fn state(&self) -> &WidgetState {
        &self.state
    }

    pub fn api(&self) -> Arc<dyn GitHubApi> {
        self.api.clone()
    }

    pub fn replace_api(&mut self, api: Arc<dyn GitHubApi>) {
        self.api = api;
    }

    /// Applies an event without executing any resulting command.
    pub fn apply(&mut self, event: WidgetEvent) -> Option<Command> {
        let (next, command) = transition(&self.state, event);
        self.state = next;
        command
    }

    /// Applies an event and runs every command it triggers to completion.
    ///
    /// Lookup failures end up in the state (not-found view); nothing is returned to the caller.
    pub async fn dispatch(&mut self, event: WidgetEvent) {
        let mut pending = self.apply(event);
        while let Some(command) = pending.take() {
            let completion = run_command(self.api.as_ref(), command).await;
            pending = self.apply(completion);
        }
    }

    /// Sets the input field value.
    pub fn set_input(&mut self, value: &str) {
        self.apply(WidgetEvent::Input(value.to_string()));
    }

    pub async fn press_key(&mut self, key: Key) {
        self.dispatch(WidgetEvent::KeyDown(key)).await;
    }

    pub async fn click_show_repos(&mut self) {
        self.dispatch(WidgetEvent::ShowRepos).await;
    }

    pub fn render(&self) -> Element {
        render::render(&self.state)
    }
}

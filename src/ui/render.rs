//! Pure projection of [`WidgetState`] into markup.
//!
//! Bootstrap class names are used for the regions (`.alert`, `.card`,
//! `.list-group`, `.badge`) so the output drops into a Bootstrap page as is.

use crate::types::widget::{Lookup, Profile, RepoPanel, RepositoryEntry, WidgetState};
use crate::ui::markup::Element;

pub const INPUT_PLACEHOLDER: &str = "GitHub username";
pub const SHOW_REPOS_LABEL: &str = "Show repositories";

pub fn render(state: &WidgetState) -> Element {
    let mut root = Element::new("div")
        .with_class("github-widget")
        .with_attr("id", "github-widget")
        .with_child(username_input(&state.username));

    match &state.lookup {
        Lookup::Idle => {}
        Lookup::Pending { username } => {
            root = root.with_child(muted(&format!("Looking up {}…", username)));
        }
        Lookup::NotFound { username } => {
            root = root.with_child(not_found_alert(username));
        }
        Lookup::Found { profile } => {
            root = root.with_child(profile_card(profile, &state.repos));
            match &state.repos {
                RepoPanel::Hidden => {}
                RepoPanel::Pending => {
                    root = root.with_child(muted("Loading repositories…"));
                }
                RepoPanel::Shown { repositories } => {
                    root = root.with_child(repository_list(repositories));
                }
            }
        }
    }

    root
}

fn username_input(value: &str) -> Element {
    Element::new("input")
        .with_attr("type", "text")
        .with_class("form-control")
        .with_attr("placeholder", INPUT_PLACEHOLDER)
        .with_attr("value", value)
}

fn muted(text: &str) -> Element {
    Element::new("p").with_class("text-muted").with_text(text)
}

fn not_found_alert(username: &str) -> Element {
    Element::new("div")
        .with_class("alert alert-danger")
        .with_attr("role", "alert")
        .with_text(format!("User \"{}\" was not found on GitHub.", username))
}

/// The button is offered until the list is shown; disabled while it loads.
fn show_repos_button(repos: &RepoPanel) -> Option<Element> {
    let button = Element::new("button")
        .with_attr("type", "button")
        .with_class("btn btn-primary")
        .with_attr("data-action", "show-repos")
        .with_text(SHOW_REPOS_LABEL);
    match repos {
        RepoPanel::Hidden => Some(button),
        RepoPanel::Pending => Some(button.with_attr("disabled", "disabled")),
        RepoPanel::Shown { .. } => None,
    }
}

fn profile_card(profile: &Profile, repos: &RepoPanel) -> Element {
    Element::new("div")
        .with_class("card")
        .with_child(
            Element::new("img")
                .with_class("card-img-top")
                .with_attr("src", &profile.avatar_url)
                .with_attr("alt", &profile.login),
        )
        .with_child(
            Element::new("div")
                .with_class("card-body")
                .with_child(Element::new("h5").with_class("card-title").with_text(profile.title()))
                .with_child(
                    Element::new("p")
                        .with_class("card-subtitle text-muted")
                        .with_text(format!("@{}", profile.login)),
                )
                .with_child(
                    Element::new("a")
                        .with_class("card-link")
                        .with_attr("href", &profile.profile_url)
                        .with_attr("target", "_blank")
                        .with_text(&profile.profile_url),
                )
                .with_children(show_repos_button(repos)),
        )
}

fn repository_list(repositories: &[RepositoryEntry]) -> Element {
    Element::new("ul")
        .with_class("list-group")
        .with_children(repositories.iter().map(repository_item))
}

fn repository_item(repo: &RepositoryEntry) -> Element {
    Element::new("li")
        .with_class("list-group-item d-flex justify-content-between align-items-center")
        .with_child(
            Element::new("div")
                .with_child(
                    Element::new("a")
                        .with_attr("href", &repo.url)
                        .with_attr("target", "_blank")
                        .with_text(&repo.name),
                )
                .with_child(
                    Element::new("small")
                        .with_class("repo-description text-muted")
                        .with_attr("title", &repo.description)
                        .with_text(&repo.description),
                ),
        )
        .with_child(
            Element::new("span")
                .with_class("badge bg-primary rounded-pill")
                .with_text(repo.forks.to_string()),
        )
}

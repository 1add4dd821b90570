//! ghcard: look up a GitHub user and render the profile card widget.
//!
//! Console mode drives the widget with the same events a browser would send
//! and prints the rendered HTML (or the widget state as JSON). Built with the
//! `gui` feature and started without a username, it opens a WebView window.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use ghcard::app::App;
use ghcard::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use ghcard::types::widget::Key;

#[derive(Debug, Parser)]
#[command(name = "ghcard", version, about = "GitHub user card widget")]
struct Cli {
    /// GitHub username to look up.
    username: Option<String>,

    /// Also request and show the user's repositories.
    #[arg(long)]
    repos: bool,

    /// Print the widget state as JSON instead of HTML.
    #[arg(long)]
    json: bool,

    /// GitHub API base URL (not persisted).
    #[arg(long, env = "GHCARD_API_URL")]
    api_url: Option<String>,

    /// Settings file path.
    #[arg(long, env = "GHCARD_CONFIG")]
    config: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ghcard=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut settings_engine = SettingsEngine::new(cli.config.clone());
    settings_engine.load()?;
    if let Some(url) = &cli.api_url {
        settings_engine.settings_mut().api_base_url = url.clone();
    }
    let app = App::from_engine(settings_engine)?;
    let runtime = tokio::runtime::Runtime::new()?;

    match cli.username {
        Some(username) => runtime.block_on(run_console(app, &username, cli.repos, cli.json)),
        None => run_interactive(app, runtime),
    }
}

async fn run_console(
    mut app: App,
    username: &str,
    show_repos: bool,
    as_json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    app.widget.set_input(username);
    app.widget.press_key(Key::Enter).await;
    if show_repos {
        // No-op unless the lookup succeeded.
        app.widget.click_show_repos().await;
    }

    if as_json {
        println!("{}", serde_json::to_string_pretty(app.widget.state())?);
    } else {
        println!("{}", app.widget.render().to_html());
    }
    Ok(())
}

#[cfg(feature = "gui")]
fn run_interactive(app: App, runtime: tokio::runtime::Runtime) -> Result<(), Box<dyn std::error::Error>> {
    ghcard::ui::webview_app::run(app, runtime);
    Ok(())
}

#[cfg(not(feature = "gui"))]
fn run_interactive(_app: App, _runtime: tokio::runtime::Runtime) -> Result<(), Box<dyn std::error::Error>> {
    Err("a username is required (build with the `gui` feature for the interactive window)".into())
}

// ghcard services
// Services talk to the outside world: the GitHub API and the settings file.

pub mod github_client;
pub mod settings_engine;

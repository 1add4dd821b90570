// ghcard platform paths
// Resolves the per-user configuration directory on Windows, macOS, and Linux.

use std::env;
use std::path::PathBuf;

const APP_DIR: &str = "ghcard";

/// Returns the platform-specific configuration directory for ghcard.
///
/// - **Linux**: `~/.config/ghcard` (or `$XDG_CONFIG_HOME/ghcard`)
/// - **macOS**: `~/Library/Application Support/ghcard`
/// - **Windows**: `%APPDATA%/ghcard`
pub fn get_config_dir() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        let appdata = env::var("APPDATA")
            .unwrap_or_else(|_| String::from("C:\\Users\\Default\\AppData\\Roaming"));
        PathBuf::from(appdata).join(APP_DIR)
    }
    #[cfg(target_os = "macos")]
    {
        home_dir()
            .join("Library")
            .join("Application Support")
            .join(APP_DIR)
    }
    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        xdg_config_dir(env::var("XDG_CONFIG_HOME").ok(), home_dir())
    }
}

#[allow(dead_code)]
fn home_dir() -> PathBuf {
    PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from("/tmp")))
}

/// `$XDG_CONFIG_HOME/ghcard`, or `~/.config/ghcard` when unset or empty.
#[allow(dead_code)]
fn xdg_config_dir(xdg_config_home: Option<String>, home: PathBuf) -> PathBuf {
    match xdg_config_home.filter(|p| !p.is_empty()) {
        Some(xdg) => PathBuf::from(xdg).join(APP_DIR),
        None => home.join(".config").join(APP_DIR),
    }
}

// ghcard shared type definitions
// Each submodule defines types used across the crate.

pub mod errors;
pub mod github;
pub mod settings;
pub mod widget;

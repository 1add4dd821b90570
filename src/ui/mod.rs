//! ghcard UI layer.
//!
//! The widget renders to an owned markup tree (`markup`) through a pure
//! projection of its state (`render`). With the `gui` feature the same HTML is
//! shown in a `wry` WebView and DOM events come back over wry IPC.

pub mod markup;
pub mod render;

#[cfg(feature = "gui")]
pub mod webview_app;

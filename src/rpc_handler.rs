//! RPC method handler for the ghcard JSON-RPC protocol.
//!
//! Extracted from `rpc_server.rs` so it can be unit-tested independently.
//! `handle_method` drives the widget with the same events a browser would
//! send (input, key press, button click) and answers with the rendered markup.

use serde::Serialize;
use serde_json::{json, Map, Value};
use tokio::sync::Mutex;

use crate::app::App;
use crate::services::settings_engine::SettingsEngineTrait;
use crate::types::widget::Key;

/// Rendered HTML plus the phase names, returned by every widget-mutating method.
fn render_result(app: &App) -> Result<Value, String> {
    let state = app.widget.state();
    Ok(json!({
        "html": app.widget.render().to_html(),
        "lookup": phase_of(&state.lookup)?,
        "repos": phase_of(&state.repos)?,
    }))
}

fn phase_of<T: Serialize>(part: &T) -> Result<Value, String> {
    let value = serde_json::to_value(part).map_err(|e| e.to_string())?;
    Ok(value.get("phase").cloned().unwrap_or(Value::Null))
}

/// Dispatch a JSON-RPC method call to the widget or settings.
///
/// Returns `Ok(Value)` on success or `Err(String)` with an error message.
pub async fn handle_method(app: &Mutex<App>, method: &str, params: &Value) -> Result<Value, String> {
    match method {
        "ping" => Ok(json!({"pong": true})),

        // ─── Widget ───
        "widget.input" => {
            let value = params.get("value").and_then(|v| v.as_str()).ok_or("missing value")?;
            let mut a = app.lock().await;
            a.widget.set_input(value);
            render_result(&a)
        }
        "widget.keydown" => {
            let key = params.get("key").and_then(|v| v.as_str()).ok_or("missing key")?;
            let mut a = app.lock().await;
            a.widget.press_key(Key::from_name(key)).await;
            render_result(&a)
        }
        "widget.show_repos" => {
            let mut a = app.lock().await;
            a.widget.click_show_repos().await;
            render_result(&a)
        }
        "widget.render" => {
            let a = app.lock().await;
            Ok(json!({"html": a.widget.render().to_html()}))
        }
        "widget.state" => {
            let a = app.lock().await;
            serde_json::to_value(a.widget.state()).map_err(|e| e.to_string())
        }
        "widget.query" => {
            let selector = params.get("selector").and_then(|v| v.as_str()).ok_or("missing selector")?;
            let a = app.lock().await;
            let root = a.widget.render();
            let matches = root.find_all(selector);
            match matches.first() {
                Some(first) => {
                    let attrs: Map<String, Value> = first
                        .attributes()
                        .iter()
                        .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                        .collect();
                    Ok(json!({
                        "found": true,
                        "count": matches.len(),
                        "text": first.text(),
                        "attrs": attrs,
                    }))
                }
                None => Ok(json!({"found": false, "count": 0})),
            }
        }

        // ─── Settings ───
        "settings.get" => {
            let a = app.lock().await;
            serde_json::to_value(a.settings_engine.get_settings()).map_err(|e| e.to_string())
        }
        "settings.set" => {
            let key = params.get("key").and_then(|v| v.as_str()).ok_or("missing key")?;
            let value = params.get("value").cloned().ok_or("missing value")?;
            let mut a = app.lock().await;
            a.update_setting(key, value).map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }

        _ => Err(format!("unknown method: {}", method)),
    }
}

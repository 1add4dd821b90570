//! WebView shell for the widget using `wry` + `tao`.
//!
//! Architecture:
//! - The page is served from the `ghcard://` custom protocol and contains the
//!   widget rendered by `ui::render`.
//! - DOM events go JS → Rust via `window.ipc.postMessage()`; the transition
//!   runs on the UI thread, fetches run on the tokio runtime.
//! - Completions come back as `UserEvent`s and the widget is re-rendered by
//!   replacing its root element through `evaluate_script`.

use std::sync::{Arc, Mutex};

use tao::event::{Event, WindowEvent};
use tao::event_loop::{ControlFlow, EventLoop, EventLoopBuilder, EventLoopProxy};
use tao::window::WindowBuilder;
use tokio::runtime::Runtime;
use tracing::{debug, error, warn};
use wry::WebViewBuilder;

use crate::app::App;
use crate::managers::widget_manager::run_command;
use crate::types::widget::{Command, Key, WidgetEvent};

#[derive(Debug)]
enum UserEvent {
    Rerender,
    Completed(WidgetEvent),
}

const PAGE_CSS: &str = r#"
body{font-family:-apple-system,BlinkMacSystemFont,"Segoe UI",Helvetica,Arial,sans-serif;margin:0;padding:24px;background:#f6f8fa;color:#1f2328}
.github-widget{max-width:560px;margin:0 auto}
.form-control{width:100%;padding:8px 12px;font-size:16px;border:1px solid #d0d7de;border-radius:6px;box-sizing:border-box}
.text-muted{color:#656d76}
.alert{margin-top:16px;padding:12px 16px;border-radius:6px;background:#ffebe9;border:1px solid #ff8182}
.card{margin-top:16px;border:1px solid #d0d7de;border-radius:6px;background:#fff;overflow:hidden}
.card-img-top{width:100%;max-height:240px;object-fit:cover}
.card-body{padding:16px}
.card-title{margin:0 0 4px;font-size:20px}
.card-link{display:block;margin:8px 0}
.btn{padding:6px 14px;border-radius:6px;border:1px solid #1f883d;background:#1f883d;color:#fff;cursor:pointer}
.btn[disabled]{opacity:.6;cursor:default}
.list-group{list-style:none;margin:16px 0 0;padding:0;border:1px solid #d0d7de;border-radius:6px;background:#fff}
.list-group-item{display:flex;justify-content:space-between;align-items:center;padding:10px 16px;border-top:1px solid #d0d7de}
.list-group-item:first-child{border-top:none}
.repo-description{display:block;max-width:420px;white-space:nowrap;overflow:hidden;text-overflow:ellipsis}
.badge{padding:2px 8px;border-radius:999px;background:#0969da;color:#fff;font-size:12px}
"#;

const PAGE_JS: &str = r#"
(function(){
function post(msg){window.ipc.postMessage(JSON.stringify(msg))}
function inWidget(el){return el && el.closest && el.closest('#github-widget')}
document.addEventListener('input',function(e){
  if(inWidget(e.target)&&e.target.tagName==='INPUT')post({cmd:'input',value:e.target.value});
});
document.addEventListener('keydown',function(e){
  if(inWidget(e.target)&&e.target.tagName==='INPUT'&&e.key==='Enter')post({cmd:'keydown',key:e.key});
});
document.addEventListener('click',function(e){
  var b=e.target.closest&&e.target.closest('[data-action="show-repos"]');
  if(b&&!b.disabled)post({cmd:'show_repos'});
});
window.__ghcard_render=function(html){
  var cur=document.getElementById('github-widget');
  var focused=document.activeElement&&document.activeElement.tagName==='INPUT';
  cur.outerHTML=html;
  if(focused){var i=document.querySelector('#github-widget input');if(i){i.focus();i.setSelectionRange(i.value.length,i.value.length);}}
};
})();
"#;

fn page_html(widget_html: &str) -> String {
    let mut html = String::with_capacity(widget_html.len() + PAGE_CSS.len() + PAGE_JS.len() + 256);
    html.push_str("<!DOCTYPE html><html><head><meta charset=\"UTF-8\"><title>ghcard</title><style>");
    html.push_str(PAGE_CSS);
    html.push_str("</style></head><body>");
    html.push_str(widget_html);
    html.push_str("<script>");
    html.push_str(PAGE_JS);
    html.push_str("</script></body></html>");
    html
}

fn render_script(app: &App) -> String {
    let html = app.widget.render().to_html();
    let literal = serde_json::to_string(&html).unwrap_or_else(|_| "\"\"".to_string());
    format!("window.__ghcard_render({})", literal)
}

// ─── IPC handler ───

/// Maps an IPC message to a widget event. Unknown messages are ignored.
fn ipc_to_event(message: &str) -> Option<WidgetEvent> {
    let msg: serde_json::Value = serde_json::from_str(message).ok()?;
    match msg.get("cmd")?.as_str()? {
        "input" => {
            let value = msg.get("value").and_then(|v| v.as_str()).unwrap_or("");
            Some(WidgetEvent::Input(value.to_string()))
        }
        "keydown" => {
            let key = msg.get("key").and_then(|v| v.as_str()).unwrap_or("");
            Some(WidgetEvent::KeyDown(Key::from_name(key)))
        }
        "show_repos" => Some(WidgetEvent::ShowRepos),
        _ => None,
    }
}

/// Spawns the fetch behind `command`; its completion is posted back to the event loop.
fn spawn_command(app: &App, runtime: &tokio::runtime::Handle, proxy: &EventLoopProxy<UserEvent>, command: Command) {
    let api = app.widget.api();
    let proxy = proxy.clone();
    runtime.spawn(async move {
        let completion = run_command(api.as_ref(), command).await;
        if proxy.send_event(UserEvent::Completed(completion)).is_err() {
            warn!("event loop closed before fetch completed");
        }
    });
}

// ─── Main entry point ───

pub fn run(app: App, runtime: Runtime) {
    let state = Arc::new(Mutex::new(app));

    let event_loop: EventLoop<UserEvent> = EventLoopBuilder::with_user_event().build();
    let proxy = event_loop.create_proxy();

    let window = match WindowBuilder::new()
        .with_title("ghcard")
        .with_inner_size(tao::dpi::LogicalSize::new(640.0, 800.0))
        .build(&event_loop)
    {
        Ok(window) => window,
        Err(e) => {
            error!(error = %e, "failed to create window");
            return;
        }
    };

    let page_state = state.clone();
    let ipc_state = state.clone();
    let ipc_proxy = proxy.clone();
    let handle = runtime.handle().clone();

    let builder = WebViewBuilder::new()
        .with_custom_protocol("ghcard".into(), move |_wv_id, _request| {
            let widget_html = match page_state.lock() {
                Ok(app) => app.widget.render().to_html(),
                Err(_) => String::new(),
            };
            let body = page_html(&widget_html).into_bytes();
            wry::http::Response::builder()
                .header("Content-Type", "text/html; charset=utf-8")
                .body(body.clone().into())
                .unwrap_or_else(|_| wry::http::Response::new(body.into()))
        })
        .with_url("ghcard://localhost/")
        .with_ipc_handler(move |msg: wry::http::Request<String>| {
            let body = msg.body().as_str();
            debug!(len = body.len(), "ipc message");
            let Some(event) = ipc_to_event(body) else { return };
            let rerender = !matches!(event, WidgetEvent::Input(_));

            let Ok(mut app) = ipc_state.lock() else { return };
            if let Some(command) = app.widget.apply(event) {
                spawn_command(&app, &handle, &ipc_proxy, command);
            }
            if rerender {
                let _ = ipc_proxy.send_event(UserEvent::Rerender);
            }
        })
        .with_devtools(cfg!(debug_assertions));

    #[cfg(target_os = "linux")]
    let webview = {
        use tao::platform::unix::WindowExtUnix;
        use wry::WebViewBuilderExtUnix;
        let Some(vbox) = window.default_vbox() else {
            error!("failed to get GTK vbox");
            return;
        };
        builder.build_gtk(vbox)
    };

    #[cfg(not(target_os = "linux"))]
    let webview = builder.build(&window);

    let webview = match webview {
        Ok(webview) => webview,
        Err(e) => {
            error!(error = %e, "failed to create WebView");
            return;
        }
    };

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                *control_flow = ControlFlow::Exit;
            }

            Event::UserEvent(user_event) => {
                let Ok(mut app) = state.lock() else { return };
                if let UserEvent::Completed(completion) = user_event {
                    if let Some(command) = app.widget.apply(completion) {
                        spawn_command(&app, runtime.handle(), &proxy, command);
                    }
                }
                let _ = webview.evaluate_script(&render_script(&app));
            }

            _ => {}
        }
    });
}

//! Embedded static assets.
//!
//! The client runtime and stylesheet are compiled into the binary with
//! `include_str!`, keeping the demo a single deployable file.

use axum::{
    Router,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};

use crate::app::AppState;

const MENUKIT_JS: &str = include_str!("../assets/menukit.js");
const MENUKIT_CSS: &str = include_str!("../assets/menukit.css");

/// Routes for the embedded assets.
pub fn asset_router() -> Router<AppState> {
    Router::new()
        .route("/static/menukit.js", get(js_handler))
        .route("/static/menukit.css", get(css_handler))
}

async fn js_handler() -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
        MENUKIT_JS,
    )
        .into_response()
}

async fn css_handler() -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        MENUKIT_CSS,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runtime_defines_the_menu_namespace() {
        assert!(MENUKIT_JS.contains("var menukit"));
        for function in [
            "get_content",
            "process_commands",
            "post_button",
            "dropdown_menu",
            "bind_keys",
        ] {
            assert!(
                MENUKIT_JS.contains(function),
                "menukit.js should define {function}"
            );
        }
    }

    #[test]
    fn runtime_handles_every_emitted_command() {
        for command in [
            "html:",
            "message:",
            "onload:",
            "clear_timers:",
            "timer:",
            "context_menu:",
            "enable_context_menu:",
        ] {
            assert!(
                MENUKIT_JS.contains(command),
                "menukit.js should handle {command}"
            );
        }
    }
}

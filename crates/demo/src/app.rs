//! Router assembly and handlers for the demo app.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::get,
};
use tracing::{info, warn};

use menukit_config::MenuSettings;
use menukit_core::{AjaxCommand, CommandResponse, MenuDisplay};
use menukit_routes::{RouteTable, ViewMeta};
use menukit_views::{AjaxResponse, ExtractContext, TabView, timer_menu};

use crate::assets;
use crate::pages;

/// Shared application state: the route table and settings, built once.
#[derive(Clone)]
pub struct AppState {
    pub routes: Arc<RouteTable>,
    pub settings: Arc<MenuSettings>,
}

/// Register every named route the demo links to.
///
/// The names drive menu reversal; the paths must agree with the axum
/// router below.
pub fn build_route_table() -> RouteTable {
    let mut table = RouteTable::new();
    let mut register = |name: &str, pattern: &str, meta: Option<ViewMeta>| {
        let result = match meta {
            Some(meta) => table.register_with_meta(name, pattern, meta),
            None => table.register(name, pattern),
        };
        result.expect("demo route patterns are valid");
    };

    register("view1", "/view1/", None);
    register("view2", "/view2/", None);
    register("view3", "/view3/", Some(ViewMeta::new().with_display("View-3")));
    register(
        "view4",
        "/view4/",
        Some(
            ViewMeta::new().with_display(
                MenuDisplay::new("View4")
                    .with_icon("fas fa-adjust")
                    .with_css_class("btn-success")
                    .with_tooltip("Menu display tool tip"),
            ),
        ),
    );
    register("int_path", "/intpath/{int}", None);
    register("ajaxtab", "/ajax-tab-example/", None);
    register("content2", "/ajax-tab-example/tab2/", None);
    register("tab_timer", "/ajax-tab-example/timer", None);
    register("context_examples", "/context/", None);
    register(
        "restricted",
        "/restricted/",
        Some(ViewMeta::new().with_permission(|ctx| ctx.has_flag("staff"))),
    );
    table
}

/// Build the demo router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { Redirect::to("/view1/") }))
        .route("/view1/", get(kitchen_sink).post(view_button))
        .route("/view2/", get(kitchen_sink))
        .route("/view3/", get(kitchen_sink))
        .route("/view4/", get(kitchen_sink))
        .route("/intpath/{int}", get(int_path))
        .route("/restricted/", get(restricted))
        .route("/ajax-tab-example/", get(tab_example))
        .route("/ajax-tab-example/tab2/", get(tab_example))
        .route("/ajax-tab-example/timer", get(tab_timer))
        .route("/context/", get(context_examples).post(context_menu))
        .merge(assets::asset_router())
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the demo server.
pub async fn serve(settings: MenuSettings) -> anyhow::Result<()> {
    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let state = AppState {
        routes: Arc::new(build_route_table()),
        settings: Arc::new(settings),
    };
    let app = build_router(state);

    info!(addr = %addr, "menukit demo starting");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

// --- Handlers ---

/// The kitchen-sink pages: one handler, four routes, differing only in
/// which route is current (and therefore in breadcrumb and active marker).
async fn kitchen_sink(
    State(state): State<AppState>,
    ExtractContext(ctx): ExtractContext,
) -> Response {
    let current = state
        .routes
        .resolve(&ctx.path)
        .map(|m| m.full_name())
        .unwrap_or_else(|| "view1".to_string());
    let view = pages::KitchenSinkView::for_route(&current, state.settings.clone());
    match view.render_page(&ctx, &state.routes) {
        Ok(html) => axum::response::Html(html.into_string()).into_response(),
        Err(e) => {
            warn!(error = %e, path = %ctx.path, "Page render failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Buttons posted back to the view (`menukit.post_button`).
async fn view_button(
    ExtractContext(_ctx): ExtractContext,
    Json(payload): Json<serde_json::Value>,
) -> AjaxResponse {
    let button = payload["data"]["button"].as_str().unwrap_or_default();
    let response = match button {
        "test_button" => CommandResponse::of(AjaxCommand::message("From view")),
        other => {
            warn!(button = %other, "Unknown button posted");
            CommandResponse::of(AjaxCommand::message(format!("No handler for '{other}'")))
        }
    };
    AjaxResponse(response)
}

async fn int_path(
    State(state): State<AppState>,
    Path(int): Path<i64>,
    ExtractContext(ctx): ExtractContext,
) -> Response {
    let view = pages::KitchenSinkView::for_route("view1", state.settings.clone());
    match view.render_int_path(&ctx, &state.routes, int) {
        Ok(html) => axum::response::Html(html.into_string()).into_response(),
        Err(e) => {
            warn!(error = %e, "Page render failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Gated behind the `staff` flag; without an auth layer filling flags in,
/// menu items pointing here stay hidden.
async fn restricted() -> &'static str {
    "staff only"
}

/// The tabbed example. Both tab URLs serve the same view; a partial
/// request patches only the tab sections.
async fn tab_example(
    State(state): State<AppState>,
    ExtractContext(ctx): ExtractContext,
) -> Response {
    let view = pages::TabExampleView::for_path(&ctx.path, state.settings.clone());
    let full_page = match view.render_page(&ctx, &state.routes) {
        Ok(html) => html,
        Err(e) => {
            warn!(error = %e, path = %ctx.path, "Page render failed");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };
    view.respond(&ctx, &state.routes, full_page)
}

/// Polled badge refresh for the tab page.
async fn tab_timer(
    State(state): State<AppState>,
    ExtractContext(ctx): ExtractContext,
) -> AjaxResponse {
    let view = pages::TabExampleView::for_path(&ctx.path, state.settings.clone());
    AjaxResponse(timer_menu(&view, &ctx))
}

async fn context_examples(
    State(state): State<AppState>,
    ExtractContext(ctx): ExtractContext,
) -> Response {
    match pages::context_examples_page(&ctx, &state.routes, &state.settings) {
        Ok(html) => axum::response::Html(html.into_string()).into_response(),
        Err(e) => {
            warn!(error = %e, "Page render failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Right-click menu content, popped at the cursor position the client
/// sends along.
async fn context_menu(
    State(state): State<AppState>,
    ExtractContext(ctx): ExtractContext,
    Json(payload): Json<serde_json::Value>,
) -> Response {
    let pos = payload.get("pos").cloned();
    match pages::context_menu_commands(&ctx, &state.routes, pos) {
        Ok(response) => AjaxResponse(response).into_response(),
        Err(e) => {
            warn!(error = %e, "Context menu render failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

//! # menukit Views
//!
//! View-layer glue between menus and axum: extracting a
//! [`RequestContext`](menukit_core::RequestContext) from a request,
//! grouping menus per view ([`MenuSet`]/[`MenuView`]), serving tabbed
//! pages with partial updates ([`TabView`]), refreshing badges from polled
//! timers, and the page-fragment helpers templates splice in.

pub mod context;
pub mod fragments;
pub mod menus;
pub mod tabs;

pub use context::{AjaxResponse, ExtractContext};
pub use fragments::{
    add_context_menu, commands_script, context_menu_response, display_button,
    enable_context_menu, menu_content, template_content,
};
pub use menus::{MenuSet, MenuView, timer_menu};
pub use tabs::{SectionKind, TabView};

//! # menukit Core
//!
//! Domain types and error definitions for the menukit menu rendering
//! toolkit. This crate has **zero framework dependencies** — it defines the
//! vocabulary (safe HTML fragments, link types, UI-patch commands) that all
//! other crates build on.
//!
//! ## Design Philosophy
//!
//! Rendering and route lookup live in their own crates. Everything here is
//! a plain value object so that menu construction can be tested without an
//! HTTP server in sight.

pub mod command;
pub mod context;
pub mod display;
pub mod error;
pub mod html;
pub mod link;

// Re-export key types at crate root for ergonomics
pub use command::{AjaxCommand, CommandResponse, button_javascript};
pub use context::RequestContext;
pub use display::MenuDisplay;
pub use error::{Error, RenderError, Result, RouteError};
pub use html::{SafeHtml, attr_string, escape};
pub use link::LinkType;

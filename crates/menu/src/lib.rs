//! # menukit Menu
//!
//! The menu model and its HTML renderers: items, badges, dropdowns, and
//! the [`HtmlMenu`] container that turns an ordered list of entries into a
//! navbar, tab bar, button group, breadcrumb, dropdown panel, or context
//! menu.
//!
//! Menus are plain values. Rendering needs two collaborators: a
//! [`RequestContext`](menukit_core::RequestContext) (active detection,
//! permission hooks) and a [`RouteTable`](menukit_routes::RouteTable)
//! (named-route reversal and view metadata).

pub mod badge;
pub mod item;
pub mod menu;
mod render;

pub use badge::Badge;
pub use item::{MenuEntry, MenuItem};
pub use menu::{HtmlMenu, MenuStyle};

// The display type lives in core so route metadata can carry it; re-export
// it here where most callers reach for it.
pub use menukit_core::MenuDisplay;

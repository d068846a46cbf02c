//! # menukit Routes
//!
//! A named route table for axum applications. axum dispatches requests but
//! has no notion of a *named* route; menus need one to turn `"view1"` into
//! `/view1/` (reverse) and to turn the current path back into a route name
//! (resolve, for active-item detection).
//!
//! Routes can also carry [`ViewMeta`]: display defaults, a permission hook,
//! and link formatting that the menu layer consults when an item points at
//! the route.

pub mod pattern;
pub mod table;

pub use pattern::RoutePattern;
pub use table::{RouteMatch, RouteTable, ViewMeta};

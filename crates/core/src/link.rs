//! Link types — how a menu item turns into an href.

use serde::{Deserialize, Serialize};

/// The kind of link a menu item carries.
///
/// `RouteName` is the default: the item's URL is the name of a registered
/// route and is reversed at render time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkType {
    /// A raw URL used as-is.
    Href,
    /// A route name fetched into the page via an async GET.
    AjaxGet,
    /// A named route, reversed against the route table.
    #[default]
    RouteName,
    /// A named button posted back to the serving view.
    AjaxButton,
    /// Inline javascript.
    Javascript,
    /// A pre-built list of UI-patch commands run client-side.
    AjaxCommand,
}

impl LinkType {
    /// Link types whose href is a plain path that can be resolved back to
    /// a route (used for active detection and permission checks).
    pub fn is_resolvable(self) -> bool {
        matches!(self, Self::Href | Self::AjaxGet | Self::RouteName)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolvable_link_types() {
        assert!(LinkType::Href.is_resolvable());
        assert!(LinkType::AjaxGet.is_resolvable());
        assert!(LinkType::RouteName.is_resolvable());
        assert!(!LinkType::AjaxButton.is_resolvable());
        assert!(!LinkType::Javascript.is_resolvable());
        assert!(!LinkType::AjaxCommand.is_resolvable());
    }

    #[test]
    fn default_is_route_name() {
        assert_eq!(LinkType::default(), LinkType::RouteName);
    }
}

//! Display metadata for a menu entry: label, icon, css, tooltip.
//!
//! Label text is trusted markup — callers may pass HTML spans as labels,
//! exactly like they may pass plain words. Escape at the call site when the
//! label comes from user input.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::html::SafeHtml;

/// How a menu entry presents itself.
///
/// Also usable as a route-level default: a route can carry a `MenuDisplay`
/// so that every item linking to it inherits the same label and styling.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MenuDisplay {
    /// Label markup. May be empty for icon-only entries.
    #[serde(default)]
    pub text: String,

    /// Icon css classes (e.g. `fas fa-pen`), rendered before the label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    /// Extra css classes on the anchor.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub css_classes: Vec<String>,

    /// Tooltip text, rendered as title/data attributes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<String>,

    /// Extra anchor attributes.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
}

impl MenuDisplay {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_css_class(mut self, class: impl Into<String>) -> Self {
        self.css_classes.push(class.into());
        self
    }

    pub fn with_css_classes<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.css_classes.extend(classes.into_iter().map(Into::into));
        self
    }

    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// The label markup: icon (if any) followed by the text.
    pub fn display_html(&self) -> SafeHtml {
        match &self.icon {
            Some(icon) if self.text.is_empty() => {
                SafeHtml::from_trusted(format!("<i class=\"{icon}\"></i>"))
            }
            Some(icon) => SafeHtml::from_trusted(format!("<i class=\"{icon}\"></i> {}", self.text)),
            None => SafeHtml::from_trusted(self.text.clone()),
        }
    }

    /// Anchor attributes including the tooltip expansion.
    pub fn attribute_map(&self) -> BTreeMap<String, String> {
        let mut attributes = self.attributes.clone();
        if let Some(tooltip) = &self.tooltip {
            attributes.insert("title".into(), tooltip.clone());
            attributes.insert("data-tooltip".into(), "tooltip".into());
            attributes.insert("data-placement".into(), "bottom".into());
        }
        attributes
    }
}

impl From<&str> for MenuDisplay {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for MenuDisplay {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icon_precedes_text() {
        let display = MenuDisplay::new("Edit").with_icon("fas fa-pen");
        assert_eq!(
            display.display_html().as_str(),
            "<i class=\"fas fa-pen\"></i> Edit"
        );
    }

    #[test]
    fn icon_only_has_no_trailing_space() {
        let display = MenuDisplay::new("").with_icon("fas fa-pen");
        assert_eq!(display.display_html().as_str(), "<i class=\"fas fa-pen\"></i>");
    }

    #[test]
    fn tooltip_expands_to_attributes() {
        let display = MenuDisplay::new("Edit").with_tooltip("edit this");
        let attrs = display.attribute_map();
        assert_eq!(attrs.get("title").map(String::as_str), Some("edit this"));
        assert_eq!(attrs.get("data-tooltip").map(String::as_str), Some("tooltip"));
        assert_eq!(attrs.get("data-placement").map(String::as_str), Some("bottom"));
    }

    #[test]
    fn from_str_builds_plain_display() {
        let display: MenuDisplay = "View 1".into();
        assert_eq!(display.display_html().as_str(), "View 1");
        assert!(display.css_classes.is_empty());
    }
}

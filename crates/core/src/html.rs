//! Safe HTML fragments and escaping.
//!
//! Menus are assembled as strings of markup. `SafeHtml` marks a fragment as
//! already trusted; `escape` is applied exactly once, at the point where
//! untrusted text enters a fragment.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// An owned HTML fragment that is safe to emit without further escaping.
///
/// Serializes as a plain JSON string so fragments can ride inside
/// UI-patch commands unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SafeHtml(String);

impl SafeHtml {
    /// Wrap markup that the caller vouches for.
    pub fn from_trusted(html: impl Into<String>) -> Self {
        Self(html.into())
    }

    /// Escape untrusted text into a safe fragment.
    pub fn from_text(text: &str) -> Self {
        Self(escape(text))
    }

    /// An empty fragment.
    pub fn empty() -> Self {
        Self(String::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Append another safe fragment.
    pub fn push(&mut self, other: &SafeHtml) {
        self.0.push_str(&other.0);
    }

    /// Append trusted markup.
    pub fn push_trusted(&mut self, html: &str) {
        self.0.push_str(html);
    }
}

impl fmt::Display for SafeHtml {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<SafeHtml> for String {
    fn from(html: SafeHtml) -> Self {
        html.0
    }
}

/// HTML-escape the five characters with meaning in markup and attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render attribute pairs as ` k="v"` text, escaped, in key order.
///
/// Returns an empty string for an empty map so callers can splice the
/// result directly after a tag name.
pub fn attr_string(attributes: &BTreeMap<String, String>) -> String {
    let mut out = String::new();
    for (key, value) in attributes {
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        out.push_str(&escape(value));
        out.push('"');
    }
    out
}

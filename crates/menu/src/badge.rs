//! Badges — small counters/markers rendered next to a menu label.
//!
//! A badge with an id can be refreshed in place: the menu emits an `html`
//! patch command targeting `#<id>` with freshly formatted badge markup.

use std::fmt;
use std::sync::Arc;

use menukit_core::{SafeHtml, escape};

/// Formatter callback run each time the badge renders. Sets `text` and
/// `css_class` from current application state.
pub type BadgeFormatFn = Arc<dyn Fn(&mut Badge) + Send + Sync>;

#[derive(Clone, Default)]
pub struct Badge {
    /// DOM id of the badge wrapper; required for timer refresh.
    pub id: Option<String>,

    /// Badge text. An empty/absent text renders nothing.
    pub text: Option<String>,

    /// Bootstrap badge flavor (`warning`, `danger`, ...).
    pub css_class: Option<String>,

    format: Option<BadgeFormatFn>,
}

impl Badge {
    /// A static badge.
    pub fn new(text: impl Into<String>, css_class: impl Into<String>) -> Self {
        Self {
            id: None,
            text: Some(text.into()),
            css_class: Some(css_class.into()),
            format: None,
        }
    }

    /// A refreshable badge: `format` runs at every render.
    pub fn with_format<F>(id: impl Into<String>, format: F) -> Self
    where
        F: Fn(&mut Badge) + Send + Sync + 'static,
    {
        Self {
            id: Some(id.into()),
            text: None,
            css_class: None,
            format: Some(Arc::new(format)),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// The inner badge markup (no id wrapper), after running the formatter.
    pub fn badge_html(&self) -> SafeHtml {
        let mut badge = self.clone();
        if let Some(format) = &self.format {
            format(&mut badge);
        }
        match &badge.text {
            Some(text) if !text.is_empty() => {
                let css = badge.css_class.as_deref().unwrap_or("secondary");
                SafeHtml::from_trusted(format!(
                    "&nbsp;<sup><span class=\"badge badge-pill badge-{css}\">{}</span></sup>",
                    escape(text)
                ))
            }
            _ => SafeHtml::empty(),
        }
    }

    /// The badge with its id wrapper, ready to sit inside an anchor.
    pub fn html(&self) -> SafeHtml {
        match &self.id {
            Some(id) => SafeHtml::from_trusted(format!(
                "<span id=\"{id}\">{}</span>",
                self.badge_html()
            )),
            None => self.badge_html(),
        }
    }
}

impl fmt::Debug for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Badge")
            .field("id", &self.id)
            .field("text", &self.text)
            .field("css_class", &self.css_class)
            .field("format", &self.format.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

//! Per-style HTML assembly.
//!
//! Markup follows Bootstrap 4 conventions (`nav-tabs`, `btn-group`,
//! `breadcrumb`, `dropdown-menu`), matching the fragments the badge and
//! divider markup already commit to.

use menukit_core::SafeHtml;

use crate::menu::MenuStyle;

/// A fully resolved item, ready to become an anchor.
pub(crate) struct RenderedItem {
    pub label: SafeHtml,
    pub badge: SafeHtml,
    pub href: SafeHtml,
    pub css_classes: Vec<String>,
    pub active: bool,
    pub disabled: bool,
    /// Pre-rendered ` key="value"` attribute text.
    pub attrs: String,
    /// Anchor id, set for dropdown parents (`{menu_id}-{n}`).
    pub anchor_id: Option<String>,
    /// Render the dropdown caret class.
    pub caret: bool,
}

pub(crate) enum RenderedEntry {
    Item(RenderedItem),
    Divider,
    Html(SafeHtml),
}

/// Build the anchor for one item.
///
/// `base_class` is the style's anchor class; `default_class` fills in when
/// the item brings no css of its own (e.g. `btn-primary` in button groups).
fn anchor(item: &RenderedItem, base_class: &str, default_class: Option<&str>) -> String {
    let mut classes = Vec::new();
    if !base_class.is_empty() {
        classes.push(base_class.to_string());
    }
    if item.css_classes.is_empty() {
        if let Some(default) = default_class {
            classes.push(default.to_string());
        }
    } else {
        classes.extend(item.css_classes.iter().cloned());
    }
    if item.caret {
        classes.push("dropdown-toggle".to_string());
    }
    if item.active {
        classes.push("active".to_string());
    }
    if item.disabled {
        classes.push("disabled".to_string());
    }

    let id_attr = match &item.anchor_id {
        Some(id) => format!(" id=\"{id}\""),
        None => String::new(),
    };
    format!(
        "<a{id_attr} class=\"{}\" href=\"{}\"{}>{}{}</a>",
        classes.join(" "),
        item.href,
        item.attrs,
        item.label,
        item.badge
    )
}

fn container_class(base: &str, alignment: Option<&str>) -> String {
    match alignment {
        Some(alignment) => format!("{base} {alignment}"),
        None => base.to_string(),
    }
}

pub(crate) fn render_style(
    style: MenuStyle,
    id: &str,
    alignment: Option<&str>,
    entries: &[RenderedEntry],
) -> SafeHtml {
    match style {
        MenuStyle::Main => render_list("navbar-nav", id, alignment, entries),
        MenuStyle::Tabs => render_list("nav nav-tabs", id, alignment, entries),
        MenuStyle::ButtonGroup => render_button_group(id, alignment, entries),
        MenuStyle::Buttons => render_buttons(id, alignment, entries),
        MenuStyle::Breadcrumb => render_breadcrumb(id, alignment, entries),
        MenuStyle::Dropdown => render_dropdown("dropdown-menu", id, alignment, entries),
        MenuStyle::Context => {
            render_dropdown("dropdown-menu context-menu", id, alignment, entries)
        }
    }
}

/// `Main` and `Tabs`: a `<ul>` of `nav-item` list entries.
fn render_list(
    base: &str,
    id: &str,
    alignment: Option<&str>,
    entries: &[RenderedEntry],
) -> SafeHtml {
    let mut out = format!(
        "<ul class=\"{}\" id=\"{id}\">",
        container_class(base, alignment)
    );
    for entry in entries {
        match entry {
            RenderedEntry::Item(item) => {
                out.push_str("<li class=\"nav-item\">");
                out.push_str(&anchor(item, "nav-link", None));
                out.push_str("</li>");
            }
            RenderedEntry::Html(html) => {
                out.push_str("<li class=\"nav-item\">");
                out.push_str(html.as_str());
                out.push_str("</li>");
            }
            RenderedEntry::Divider => {}
        }
    }
    out.push_str("</ul>");
    SafeHtml::from_trusted(out)
}

fn render_button_group(id: &str, alignment: Option<&str>, entries: &[RenderedEntry]) -> SafeHtml {
    let mut out = format!(
        "<div class=\"{}\" id=\"{id}\" role=\"group\">",
        container_class("btn-group", alignment)
    );
    push_buttons(&mut out, entries);
    out.push_str("</div>");
    SafeHtml::from_trusted(out)
}

fn render_buttons(id: &str, alignment: Option<&str>, entries: &[RenderedEntry]) -> SafeHtml {
    let mut out = format!(
        "<div class=\"{}\" id=\"{id}\">",
        container_class("menukit-buttons", alignment)
    );
    push_buttons(&mut out, entries);
    out.push_str("</div>");
    SafeHtml::from_trusted(out)
}

fn push_buttons(out: &mut String, entries: &[RenderedEntry]) {
    for entry in entries {
        match entry {
            RenderedEntry::Item(item) => {
                out.push_str(&anchor(item, "btn", Some("btn-primary")));
            }
            RenderedEntry::Html(html) => out.push_str(html.as_str()),
            RenderedEntry::Divider => {}
        }
    }
}

/// Breadcrumb: every item links except the last, which is the current page.
fn render_breadcrumb(id: &str, alignment: Option<&str>, entries: &[RenderedEntry]) -> SafeHtml {
    let mut out = format!(
        "<ol class=\"{}\" id=\"{id}\">",
        container_class("breadcrumb", alignment)
    );
    let last_item = entries
        .iter()
        .rposition(|e| matches!(e, RenderedEntry::Item(_)));
    for (index, entry) in entries.iter().enumerate() {
        match entry {
            RenderedEntry::Item(item) if Some(index) == last_item => {
                out.push_str("<li class=\"breadcrumb-item active\" aria-current=\"page\">");
                out.push_str(item.label.as_str());
                out.push_str(item.badge.as_str());
                out.push_str("</li>");
            }
            RenderedEntry::Item(item) => {
                out.push_str("<li class=\"breadcrumb-item\">");
                out.push_str(&anchor(item, "", None));
                out.push_str("</li>");
            }
            RenderedEntry::Html(html) => {
                out.push_str("<li class=\"breadcrumb-item\">");
                out.push_str(html.as_str());
                out.push_str("</li>");
            }
            RenderedEntry::Divider => {}
        }
    }
    out.push_str("</ol>");
    SafeHtml::from_trusted(out)
}

fn render_dropdown(
    base: &str,
    id: &str,
    alignment: Option<&str>,
    entries: &[RenderedEntry],
) -> SafeHtml {
    let mut out = format!(
        "<div class=\"{}\" id=\"{id}\">",
        container_class(base, alignment)
    );
    for entry in entries {
        match entry {
            RenderedEntry::Item(item) => {
                out.push_str(&anchor(item, "dropdown-item", None));
            }
            RenderedEntry::Divider => {
                out.push_str("<div class=\"dropdown-divider\"></div>");
            }
            RenderedEntry::Html(html) => out.push_str(html.as_str()),
        }
    }
    out.push_str("</div>");
    SafeHtml::from_trusted(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(label: &str, href: &str) -> RenderedItem {
        RenderedItem {
            label: SafeHtml::from_trusted(label),
            badge: SafeHtml::empty(),
            href: SafeHtml::from_trusted(href),
            css_classes: Vec::new(),
            active: false,
            disabled: false,
            attrs: String::new(),
            anchor_id: None,
            caret: false,
        }
    }

    #[test]
    fn button_group_defaults_to_primary() {
        let entries = vec![RenderedEntry::Item(item("Go", "/go/"))];
        let html = render_style(MenuStyle::ButtonGroup, "g", None, &entries);
        assert!(html.as_str().contains("class=\"btn btn-primary\""));
        assert!(html.as_str().contains("role=\"group\""));
    }

    #[test]
    fn explicit_css_replaces_default() {
        let mut styled = item("Go", "/go/");
        styled.css_classes = vec!["btn-danger".into()];
        let entries = vec![RenderedEntry::Item(styled)];
        let html = render_style(MenuStyle::ButtonGroup, "g", None, &entries);
        assert!(html.as_str().contains("class=\"btn btn-danger\""));
        assert!(!html.as_str().contains("btn-primary"));
    }

    #[test]
    fn breadcrumb_marks_last_item_current() {
        let entries = vec![
            RenderedEntry::Item(item("Home", "/")),
            RenderedEntry::Item(item("Here", "/here/")),
        ];
        let html = render_style(MenuStyle::Breadcrumb, "b", None, &entries);
        let html = html.as_str();
        assert!(html.contains("<li class=\"breadcrumb-item\"><a class=\"\" href=\"/\">Home</a></li>"));
        assert!(html.contains("<li class=\"breadcrumb-item active\" aria-current=\"page\">Here</li>"));
    }

    #[test]
    fn dropdown_renders_dividers() {
        let entries = vec![
            RenderedEntry::Item(item("A", "/a/")),
            RenderedEntry::Divider,
            RenderedEntry::Item(item("B", "/b/")),
        ];
        let html = render_style(MenuStyle::Dropdown, "d", None, &entries);
        assert!(html.as_str().contains("<div class=\"dropdown-divider\"></div>"));
        assert!(html.as_str().contains("class=\"dropdown-item\""));
    }

    #[test]
    fn context_menu_carries_marker_class() {
        let entries = vec![RenderedEntry::Item(item("A", "/a/"))];
        let html = render_style(MenuStyle::Context, "c", None, &entries);
        assert!(html.as_str().contains("dropdown-menu context-menu"));
    }

    #[test]
    fn alignment_extends_container_class() {
        let entries = vec![RenderedEntry::Item(item("A", "/a/"))];
        let html = render_style(MenuStyle::Dropdown, "d", Some("dropdown-menu-right"), &entries);
        assert!(html.as_str().contains("class=\"dropdown-menu dropdown-menu-right\""));
    }

    #[test]
    fn disabled_and_active_classes_applied() {
        let mut styled = item("A", "/a/");
        styled.active = true;
        styled.disabled = true;
        let entries = vec![RenderedEntry::Item(styled)];
        let html = render_style(MenuStyle::Tabs, "t", None, &entries);
        assert!(html.as_str().contains("class=\"nav-link active disabled\""));
    }
}

//! The menu container: an ordered collection of entries bound to a
//! rendering style and an active marker.

use std::collections::BTreeMap;

use rand::Rng;
use rand::distr::Alphanumeric;
use serde::Serialize;
use tracing::warn;

use menukit_core::{AjaxCommand, LinkType, MenuDisplay, RequestContext, Result, SafeHtml};
use menukit_routes::RouteTable;

use crate::badge::Badge;
use crate::item::{MenuEntry, MenuItem};
use crate::render::{self, RenderedEntry, RenderedItem};

/// How a menu renders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MenuStyle {
    /// Navbar-style main menu.
    #[default]
    Main,
    /// Tab bar.
    Tabs,
    /// Joined button group.
    ButtonGroup,
    /// Breadcrumb trail; the last visible item is the current page.
    Breadcrumb,
    /// Dropdown panel (also used for sub-menus).
    Dropdown,
    /// Loose buttons.
    Buttons,
    /// Right-click context menu.
    Context,
}

/// One keyboard shortcut, serialized into the key-binding script.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct KeyBinding {
    pub key: String,
    pub shift: bool,
    pub alt: bool,
    pub href: String,
}

/// An ordered menu bound to a rendering style.
///
/// Menus are built fluently and rendered against a request context and a
/// route table:
///
/// ```no_run
/// use menukit_core::RequestContext;
/// use menukit_menu::{HtmlMenu, MenuItem};
/// use menukit_routes::RouteTable;
///
/// let routes = RouteTable::new();
/// let ctx = RequestContext::new("/view1/");
/// let mut menu = HtmlMenu::tabs();
/// menu.add_route("view1").add_item(MenuItem::route("view2"));
/// let html = menu.render(&ctx, &routes).unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct HtmlMenu {
    entries: Vec<MenuEntry>,
    style: MenuStyle,
    active: Option<String>,
    fixed_id: Option<String>,
    pub(crate) placement: Option<String>,
    alignment: Option<String>,
    pub(crate) no_hover: bool,
    compare_full_path: bool,
    default_link_type: LinkType,
    button_defaults: BTreeMap<String, MenuDisplay>,
}

impl HtmlMenu {
    pub fn new(style: MenuStyle) -> Self {
        Self {
            entries: Vec::new(),
            style,
            active: None,
            fixed_id: None,
            placement: None,
            alignment: None,
            no_hover: false,
            compare_full_path: false,
            default_link_type: LinkType::RouteName,
            button_defaults: BTreeMap::new(),
        }
    }

    pub fn main() -> Self {
        Self::new(MenuStyle::Main)
    }

    pub fn tabs() -> Self {
        Self::new(MenuStyle::Tabs)
    }

    pub fn button_group() -> Self {
        Self::new(MenuStyle::ButtonGroup)
    }

    pub fn breadcrumb() -> Self {
        Self::new(MenuStyle::Breadcrumb)
    }

    pub fn dropdown() -> Self {
        Self::new(MenuStyle::Dropdown)
    }

    pub fn buttons() -> Self {
        Self::new(MenuStyle::Buttons)
    }

    pub fn context() -> Self {
        Self::new(MenuStyle::Context)
    }

    pub fn style(&self) -> MenuStyle {
        self.style
    }

    // --- Configuration ---

    /// Mark the route name whose item should render as active.
    pub fn set_active(&mut self, name: impl Into<String>) -> &mut Self {
        self.active = Some(name.into());
        self
    }

    /// Use a fixed DOM id instead of a fresh random one per render.
    pub fn set_id(&mut self, id: impl Into<String>) -> &mut Self {
        self.fixed_id = Some(id.into());
        self
    }

    pub fn set_placement(&mut self, placement: impl Into<String>) -> &mut Self {
        self.placement = Some(placement.into());
        self
    }

    /// Extra css class on the container (e.g. `dropdown-menu-right`).
    pub fn set_alignment(&mut self, alignment: impl Into<String>) -> &mut Self {
        self.alignment = Some(alignment.into());
        self
    }

    pub fn set_no_hover(&mut self) -> &mut Self {
        self.no_hover = true;
        self
    }

    /// Compare the full path (with query string) for active detection.
    pub fn set_compare_full_path(&mut self) -> &mut Self {
        self.compare_full_path = true;
        self
    }

    /// Link type used by [`HtmlMenu::add_route`].
    pub fn set_default_link_type(&mut self, link_type: LinkType) -> &mut Self {
        self.default_link_type = link_type;
        self
    }

    /// Per-menu display defaults, keyed by item display text. Merged over
    /// the application-level defaults by the caller.
    pub fn set_button_defaults(&mut self, defaults: BTreeMap<String, MenuDisplay>) -> &mut Self {
        self.button_defaults.extend(defaults);
        self
    }

    pub fn set_button_default(
        &mut self,
        name: impl Into<String>,
        display: impl Into<MenuDisplay>,
    ) -> &mut Self {
        self.button_defaults.insert(name.into(), display.into());
        self
    }

    // --- Building ---

    pub fn add(&mut self, entry: impl Into<MenuEntry>) -> &mut Self {
        self.entries.push(entry.into());
        self
    }

    pub fn add_item(&mut self, item: MenuItem) -> &mut Self {
        self.add(MenuEntry::Item(item))
    }

    /// Add an item for a named route using the menu's default link type.
    pub fn add_route(&mut self, name: &str) -> &mut Self {
        self.add_item(MenuItem::of_type(name, self.default_link_type))
    }

    /// Add a named-route item with an explicit display.
    pub fn add_route_with(&mut self, name: &str, display: impl Into<MenuDisplay>) -> &mut Self {
        self.add_item(MenuItem::of_type(name, self.default_link_type).with_display(display))
    }

    pub fn add_divider(&mut self) -> &mut Self {
        self.add(MenuEntry::Divider)
    }

    pub fn add_html(&mut self, html: SafeHtml) -> &mut Self {
        self.add(MenuEntry::Html(html))
    }

    pub fn add_items<I, E>(&mut self, entries: I) -> &mut Self
    where
        I: IntoIterator<Item = E>,
        E: Into<MenuEntry>,
    {
        for entry in entries {
            self.add(entry.into());
        }
        self
    }

    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Items that pass visibility checks for this request.
    pub fn visible_items(&self, ctx: &RequestContext, routes: &RouteTable) -> Vec<&MenuItem> {
        self.entries
            .iter()
            .filter_map(|entry| match entry {
                MenuEntry::Item(item) if item.test_visible(ctx, routes) => Some(item),
                _ => None,
            })
            .collect()
    }

    // --- Rendering ---

    /// Render the menu. Returns an empty fragment when nothing is visible.
    pub fn render(&self, ctx: &RequestContext, routes: &RouteTable) -> Result<SafeHtml> {
        let id = self.fixed_id.clone().unwrap_or_else(random_id);
        self.render_with_id(ctx, routes, &id, None)
    }

    pub(crate) fn render_with_id(
        &self,
        ctx: &RequestContext,
        routes: &RouteTable,
        id: &str,
        inherited_defaults: Option<&BTreeMap<String, MenuDisplay>>,
    ) -> Result<SafeHtml> {
        let button_defaults = match inherited_defaults {
            Some(inherited) if self.button_defaults.is_empty() => inherited,
            _ => &self.button_defaults,
        };

        let mut rendered = Vec::new();
        let mut sub_menus = SafeHtml::empty();
        let mut scripts = SafeHtml::empty();
        let mut key_map: BTreeMap<String, KeyBinding> = BTreeMap::new();
        let mut item_index = 0usize;
        let mut any_items = false;

        for entry in &self.entries {
            match entry {
                MenuEntry::Divider => rendered.push(RenderedEntry::Divider),
                MenuEntry::Html(html) => rendered.push(RenderedEntry::Html(html.clone())),
                MenuEntry::Item(item) => {
                    if !item.test_visible(ctx, routes) {
                        continue;
                    }

                    let mut anchor_id = None;
                    if let Some(dropdown) = &item.dropdown {
                        let item_id = format!("{id}-{item_index}");
                        let menu_id = format!("{item_id}-menu");
                        let sub = dropdown.render_with_id(
                            ctx,
                            routes,
                            &menu_id,
                            Some(button_defaults),
                        )?;
                        if sub.is_empty() {
                            // A dropdown with nothing visible hides its parent.
                            item_index += 1;
                            continue;
                        }
                        sub_menus.push(&sub);
                        let placement = item
                            .placement
                            .as_deref()
                            .or(dropdown.placement.as_deref())
                            .unwrap_or("bottom-start");
                        let no_hover = item.no_hover || dropdown.no_hover;
                        scripts.push_trusted(&format!(
                            "<script>menukit.dropdown_menu('{item_id}', '{placement}', {no_hover});</script>"
                        ));
                        anchor_id = Some(item_id);
                    }

                    let href = item.href(routes)?;
                    for key in item.keys() {
                        match parse_key(key, href.as_str()) {
                            Some(binding) => {
                                key_map.insert(binding.key.clone(), binding);
                            }
                            None => warn!(key = %key, "Ignoring unparseable key binding"),
                        }
                    }

                    let display = item.effective_display(routes, button_defaults);
                    let attrs =
                        menukit_core::attr_string(&item.attribute_map(routes, &display));
                    rendered.push(RenderedEntry::Item(RenderedItem {
                        label: display.display_html(),
                        badge: item
                            .badge()
                            .map(Badge::html)
                            .unwrap_or_else(SafeHtml::empty),
                        href,
                        css_classes: display.css_classes.clone(),
                        active: item.is_active(
                            ctx,
                            self.active.as_deref(),
                            self.compare_full_path,
                            routes,
                        ),
                        disabled: item.is_disabled(),
                        attrs,
                        anchor_id,
                        caret: item.has_dropdown() && item.show_caret,
                    }));
                    any_items = true;
                    item_index += 1;
                }
            }
        }

        if !any_items {
            return Ok(SafeHtml::empty());
        }

        let mut html = render::render_style(self.style, id, self.alignment.as_deref(), &rendered);
        html.push(&sub_menus);
        if !key_map.is_empty() {
            let json = serde_json::to_string(&key_map)?;
            scripts.push_trusted(&format!("<script>menukit.bind_keys({json});</script>"));
        }
        html.push(&scripts);
        Ok(html)
    }

    /// Badge refresh commands: one `html` patch per identifiable badge.
    pub fn badge_commands(&self) -> Vec<AjaxCommand> {
        self.entries
            .iter()
            .filter_map(|entry| match entry {
                MenuEntry::Item(item) => item.badge(),
                _ => None,
            })
            .filter_map(|badge| {
                badge
                    .id
                    .as_ref()
                    .map(|id| AjaxCommand::html(format!("#{id}"), badge.badge_html()))
            })
            .collect()
    }
}

impl Default for HtmlMenu {
    fn default() -> Self {
        Self::new(MenuStyle::Main)
    }
}

/// A fresh DOM id: a letter prefix keeps it selector-safe.
fn random_id() -> String {
    let suffix: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(9)
        .map(char::from)
        .collect();
    format!("m{suffix}")
}

/// `"alt-b"` → alt + `b`; `"shift-F2"` → shift + `F2`; `"a"` → plain `a`.
fn parse_key(spec: &str, href: &str) -> Option<KeyBinding> {
    let mut binding = KeyBinding {
        key: String::new(),
        shift: false,
        alt: false,
        href: href.to_string(),
    };
    for part in spec.split('-') {
        match part.to_ascii_lowercase().as_str() {
            "shift" => binding.shift = true,
            "alt" => binding.alt = true,
            _ => binding.key = part.to_string(),
        }
    }
    if binding.key.is_empty() {
        return None;
    }
    Some(binding)
}

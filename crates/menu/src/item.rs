//! Menu items — a single navigable entry and its href/visibility logic.

use std::collections::BTreeMap;

use menukit_core::{
    AjaxCommand, LinkType, MenuDisplay, RequestContext, Result, SafeHtml, button_javascript, escape,
};
use menukit_routes::RouteTable;

use crate::badge::Badge;
use crate::menu::HtmlMenu;

/// One entry in a menu: an item, a divider, or raw markup.
#[derive(Debug, Clone)]
pub enum MenuEntry {
    Item(MenuItem),
    Divider,
    Html(SafeHtml),
}

impl From<MenuItem> for MenuEntry {
    fn from(item: MenuItem) -> Self {
        Self::Item(item)
    }
}

/// A single navigable menu entry.
///
/// Constructed through one shortcut per link kind, then refined with
/// builder setters:
///
/// ```
/// use menukit_menu::MenuItem;
///
/// let item = MenuItem::route("int_path,4")
///     .with_display("Fourth")
///     .with_css_class("btn-danger");
/// ```
#[derive(Debug, Clone)]
pub struct MenuItem {
    url: Option<String>,
    link_type: LinkType,
    url_args: Vec<String>,
    url_kwargs: BTreeMap<String, String>,
    display: Option<MenuDisplay>,
    icon: Option<String>,
    css_classes: Vec<String>,
    tooltip: Option<String>,
    attributes: BTreeMap<String, String>,
    badge: Option<Badge>,
    target: Option<String>,
    disabled: bool,
    visible: bool,
    keys: Vec<String>,
    pub(crate) dropdown: Option<Box<HtmlMenu>>,
    pub(crate) show_caret: bool,
    pub(crate) no_hover: bool,
    pub(crate) placement: Option<String>,
    permission_name: Option<String>,
}

impl MenuItem {
    fn with_url(url: Option<String>, link_type: LinkType) -> Self {
        Self {
            url,
            link_type,
            url_args: Vec::new(),
            url_kwargs: BTreeMap::new(),
            display: None,
            icon: None,
            css_classes: Vec::new(),
            tooltip: None,
            attributes: BTreeMap::new(),
            badge: None,
            target: None,
            disabled: false,
            visible: true,
            keys: Vec::new(),
            dropdown: None,
            show_caret: true,
            no_hover: false,
            placement: None,
            permission_name: None,
        }
    }

    /// An item linking to a named route. `"name,arg1,arg2"` embeds
    /// positional arguments in the name.
    pub fn route(name: &str) -> Self {
        let (name, args) = split_embedded_args(name);
        let mut item = Self::with_url(Some(name), LinkType::RouteName);
        item.url_args = args;
        item
    }

    /// An item that fetches a named route into the page asynchronously.
    pub fn ajax_get(name: &str) -> Self {
        let (name, args) = split_embedded_args(name);
        let mut item = Self::with_url(Some(name), LinkType::AjaxGet);
        item.url_args = args;
        item
    }

    /// An item with a raw URL.
    pub fn href(url: impl Into<String>) -> Self {
        Self::with_url(Some(url.into()), LinkType::Href)
    }

    /// An item running inline javascript.
    pub fn javascript(code: impl Into<String>) -> Self {
        Self::with_url(Some(code.into()), LinkType::Javascript)
    }

    /// An item posting a named button back to the serving view.
    pub fn ajax_button(button_name: impl Into<String>) -> Self {
        Self::with_url(Some(button_name.into()), LinkType::AjaxButton)
    }

    /// An item running a pre-built list of UI-patch commands client-side.
    pub fn ajax_commands(commands: &[AjaxCommand]) -> Self {
        let json = serde_json::to_string(commands).unwrap_or_else(|_| "[]".into());
        Self::with_url(Some(json), LinkType::AjaxCommand)
    }

    /// A label-only item (dropdown parents without their own link).
    pub fn label(display: impl Into<MenuDisplay>) -> Self {
        Self::with_url(None, LinkType::Href).with_display(display)
    }

    /// An item of an explicit link type — used by menus with a non-default
    /// `default_link_type`.
    pub fn of_type(url: &str, link_type: LinkType) -> Self {
        match link_type {
            LinkType::RouteName => Self::route(url),
            LinkType::AjaxGet => Self::ajax_get(url),
            LinkType::Href => Self::href(url),
            LinkType::Javascript => Self::javascript(url),
            LinkType::AjaxButton => Self::ajax_button(url),
            LinkType::AjaxCommand => Self::with_url(Some(url.to_string()), LinkType::AjaxCommand),
        }
    }

    // --- Builder setters ---

    pub fn with_display(mut self, display: impl Into<MenuDisplay>) -> Self {
        self.display = Some(display.into());
        self
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

    pub fn with_badge(mut self, badge: Badge) -> Self {
        self.badge = Some(badge);
        self
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Bind a keyboard shortcut (`"a"`, `"alt-b"`, `"shift-F2"`).
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.keys.push(key.into());
        self
    }

    pub fn with_url_arg(mut self, arg: impl ToString) -> Self {
        self.url_args.push(arg.to_string());
        self
    }

    pub fn with_url_kwarg(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.url_kwargs.insert(name.into(), value.to_string());
        self
    }

    /// Attach a dropdown sub-menu built from entries.
    pub fn with_dropdown<I, E>(self, entries: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<MenuEntry>,
    {
        let mut menu = HtmlMenu::dropdown();
        for entry in entries {
            menu.add(entry.into());
        }
        self.with_dropdown_menu(menu)
    }

    /// Attach a fully built dropdown sub-menu.
    pub fn with_dropdown_menu(mut self, menu: HtmlMenu) -> Self {
        self.dropdown = Some(Box::new(menu));
        self
    }

    /// Suppress the dropdown caret.
    pub fn no_caret(mut self) -> Self {
        self.show_caret = false;
        self
    }

    /// Open the dropdown on click only, not hover.
    pub fn no_hover(mut self) -> Self {
        self.no_hover = true;
        self
    }

    /// Popper placement for the dropdown (`bottom-start` by default).
    pub fn with_placement(mut self, placement: impl Into<String>) -> Self {
        self.placement = Some(placement.into());
        self
    }

    /// Check visibility against a different route's permission hook.
    pub fn with_permission_name(mut self, name: impl Into<String>) -> Self {
        self.permission_name = Some(name.into());
        self
    }

    // --- Accessors used by the container/renderers ---

    pub fn badge(&self) -> Option<&Badge> {
        self.badge.as_ref()
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn has_dropdown(&self) -> bool {
        self.dropdown.is_some()
    }

    // --- href assembly ---

    /// The unadorned href for this item.
    ///
    /// Named routes are reversed; javascript-flavored link types build the
    /// client call with attribute-safe single quotes.
    pub fn raw_href(&self, routes: &RouteTable) -> Result<String> {
        let Some(url) = &self.url else {
            return Ok("javascript:void(0)".into());
        };
        match self.link_type {
            LinkType::RouteName | LinkType::AjaxGet => {
                if self.url_kwargs.is_empty() {
                    let args: Vec<&str> = self.url_args.iter().map(String::as_str).collect();
                    routes.reverse(url, &args)
                } else {
                    let kwargs: BTreeMap<&str, String> = self
                        .url_kwargs
                        .iter()
                        .map(|(k, v)| (k.as_str(), v.clone()))
                        .collect();
                    routes.reverse_kwargs(url, &kwargs)
                }
            }
            LinkType::AjaxButton => Ok(format!(
                "javascript:{}",
                button_javascript(url, None).replace('"', "'")
            )),
            LinkType::AjaxCommand => Ok(format!(
                "javascript:menukit.process_commands({})",
                url.replace('"', "'")
            )),
            LinkType::Javascript => Ok(format!("javascript:{url}")),
            LinkType::Href => Ok(url.clone()),
        }
    }

    /// The full href attribute value: disabled short-circuit, view-level
    /// href formatting, async-get wrapping, target splice.
    pub fn href(&self, routes: &RouteTable) -> Result<SafeHtml> {
        if self.disabled {
            return Ok(SafeHtml::from_trusted("javascript:void(0)"));
        }
        let raw = self.raw_href(routes)?;
        let mut href = raw.clone();

        let href_format = self
            .resolved_name(routes, &raw)
            .and_then(|name| routes.meta(&name).and_then(|m| m.href_format.clone()));
        if let Some(format) = href_format {
            href = format.replace("{}", &raw);
        } else if self.link_type == LinkType::AjaxGet {
            href = format!("javascript: menukit.get_content('{href}')");
        }

        if let Some(target) = &self.target {
            // Splices a target attribute through the anchor's quote pair.
            href.push_str(&format!("\" target=\"{target}"));
        }
        Ok(SafeHtml::from_trusted(href))
    }

    /// Resolve this item's href back to a (namespace-qualified) route name.
    pub(crate) fn resolved_name(&self, routes: &RouteTable, raw_href: &str) -> Option<String> {
        if !self.link_type.is_resolvable() {
            return None;
        }
        let path = raw_href.split('?').next().unwrap_or(raw_href);
        routes.resolve(path).map(|m| m.full_name())
    }

    // --- Active / visibility ---

    /// Active detection: against the menu's active marker when set,
    /// against the request path otherwise.
    pub(crate) fn is_active(
        &self,
        ctx: &RequestContext,
        marker: Option<&str>,
        compare_full_path: bool,
        routes: &RouteTable,
    ) -> bool {
        let Ok(raw) = self.raw_href(routes) else {
            return false;
        };
        if let Some(marker) = marker {
            return self.resolved_name(routes, &raw).as_deref() == Some(marker);
        }
        if self.link_type.is_resolvable() {
            if compare_full_path {
                return ctx.full_path() == raw;
            }
            return ctx.path == raw;
        }
        false
    }

    /// Visibility: the `visible` flag, then the permission hook of the
    /// route this item links to (or of `permission_name` when overridden).
    pub fn test_visible(&self, ctx: &RequestContext, routes: &RouteTable) -> bool {
        if !self.visible {
            return false;
        }
        let permission_route = match &self.permission_name {
            Some(name) => Some(name.clone()),
            None => self
                .raw_href(routes)
                .ok()
                .and_then(|raw| self.resolved_name(routes, &raw)),
        };
        match permission_route.as_deref().and_then(|name| routes.meta(name)) {
            Some(meta) => meta.permits(ctx),
            None => true,
        }
    }

    // --- Display ---

    /// The display used at render time: explicit display, or the target
    /// route's default, or the capitalized route name; then button
    /// defaults and item-level icon/css/tooltip overlays.
    pub(crate) fn effective_display(
        &self,
        routes: &RouteTable,
        button_defaults: &BTreeMap<String, MenuDisplay>,
    ) -> MenuDisplay {
        let mut display = match &self.display {
            Some(display) => display.clone(),
            None => self.derived_display(routes),
        };

        if let Some(default) = button_defaults.get(&display.text) {
            display = default.clone();
        }

        if display.icon.is_none() {
            display.icon = self.icon.clone();
        }
        display.css_classes.extend(self.css_classes.iter().cloned());
        if display.tooltip.is_none() {
            display.tooltip = self.tooltip.clone();
        }
        display
    }

    fn derived_display(&self, routes: &RouteTable) -> MenuDisplay {
        if self.link_type.is_resolvable() {
            if let Ok(raw) = self.raw_href(routes) {
                if let Some(name) = self.resolved_name(routes, &raw) {
                    if let Some(display) = routes.meta(&name).and_then(|m| m.display.clone()) {
                        return display;
                    }
                    let bare = name.rsplit(':').next().unwrap_or(&name);
                    return MenuDisplay::new(capitalize(bare));
                }
            }
        }
        MenuDisplay::new(escape(self.url.as_deref().unwrap_or("")))
    }

    /// Anchor attributes: route metadata, then item-level, then display
    /// (later layers win on key collisions).
    pub(crate) fn attribute_map(
        &self,
        routes: &RouteTable,
        display: &MenuDisplay,
    ) -> BTreeMap<String, String> {
        let mut attributes = BTreeMap::new();
        if let Ok(raw) = self.raw_href(routes) {
            if let Some(name) = self.resolved_name(routes, &raw) {
                if let Some(meta) = routes.meta(&name) {
                    attributes.extend(meta.attributes.clone());
                }
            }
        }
        attributes.extend(self.attributes.clone());
        if let Some(tooltip) = &self.tooltip {
            attributes.insert("title".into(), tooltip.clone());
            attributes.insert("data-tooltip".into(), "tooltip".into());
            attributes.insert("data-placement".into(), "bottom".into());
        }
        attributes.extend(display.attribute_map());
        attributes
    }
}

/// `"name,arg1,arg2"` → `("name", ["arg1", "arg2"])`.
fn split_embedded_args(name: &str) -> (String, Vec<String>) {
    let mut parts = name.split(',');
    let name = parts.next().unwrap_or(name).to_string();
    let args = parts.map(str::to_string).collect();
    (name, args)
}

/// Python-style capitalize: first character upper, the rest lower.
fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn routes() -> RouteTable {
        let mut table = RouteTable::new();
        table.register("view1", "/view1/").unwrap();
        table.register("int_path", "/intpath/{int}").unwrap();
        table.register("content2", "/ajax-tab-example/tab2/").unwrap();
        table
    }

    #[test]
    fn route_item_reverses() {
        let item = MenuItem::route("view1");
        assert_eq!(item.raw_href(&routes()).unwrap(), "/view1/");
    }

    #[test]
    fn embedded_args_split() {
        let item = MenuItem::route("int_path,3");
        assert_eq!(item.raw_href(&routes()).unwrap(), "/intpath/3");
    }

    #[test]
    fn url_kwargs_reverse() {
        let item = MenuItem::route("int_path").with_url_kwarg("int", 2);
        assert_eq!(item.raw_href(&routes()).unwrap(), "/intpath/2");
    }

    #[test]
    fn ajax_get_wraps_href() {
        let item = MenuItem::ajax_get("content2");
        assert_eq!(
            item.href(&routes()).unwrap().as_str(),
            "javascript: menukit.get_content('/ajax-tab-example/tab2/')"
        );
    }

    #[test]
    fn disabled_items_link_nowhere() {
        let item = MenuItem::route("view1").disabled();
        assert_eq!(item.href(&routes()).unwrap().as_str(), "javascript:void(0)");
    }

    #[test]
    fn target_splices_attribute() {
        let item = MenuItem::href("/docs/").with_target("_blank");
        assert_eq!(
            item.href(&routes()).unwrap().as_str(),
            "/docs/\" target=\"_blank"
        );
    }

    #[test]
    fn ajax_button_flips_quotes() {
        let item = MenuItem::ajax_button("test_button");
        let href = item.raw_href(&routes()).unwrap();
        assert!(href.starts_with("javascript:menukit.post_button("));
        assert!(!href.contains('"'));
        assert!(href.contains("'button':'test_button'"));
    }

    #[test]
    fn ajax_commands_link() {
        let item = MenuItem::ajax_commands(&[AjaxCommand::message("hello")]);
        let href = item.raw_href(&routes()).unwrap();
        assert!(href.starts_with("javascript:menukit.process_commands(["));
        assert!(href.contains("'function':'message'"));
    }

    #[test]
    fn missing_url_is_void() {
        let item = MenuItem::label("Dropdown parent");
        assert_eq!(item.raw_href(&routes()).unwrap(), "javascript:void(0)");
    }

    #[test]
    fn unknown_route_errors() {
        let item = MenuItem::route("missing");
        assert!(item.raw_href(&routes()).is_err());
    }

    #[test]
    fn display_derived_from_route_name() {
        let item = MenuItem::route("view1");
        let display = item.effective_display(&routes(), &BTreeMap::new());
        assert_eq!(display.text, "View1");
    }

    #[test]
    fn display_prefers_route_default() {
        let mut table = RouteTable::new();
        table
            .register_with_meta(
                "view3",
                "/view3/",
                menukit_routes::ViewMeta::new().with_display("View-3"),
            )
            .unwrap();
        let item = MenuItem::route("view3");
        let display = item.effective_display(&table, &BTreeMap::new());
        assert_eq!(display.text, "View-3");
    }

    #[test]
    fn button_defaults_replace_display() {
        let mut defaults = BTreeMap::new();
        defaults.insert(
            "edit".to_string(),
            MenuDisplay::new("Edit-default")
                .with_icon("fas fa-pen")
                .with_css_class("btn-success"),
        );
        let item = MenuItem::route("view1").with_display("edit");
        let display = item.effective_display(&routes(), &defaults);
        assert_eq!(display.text, "Edit-default");
        assert_eq!(display.icon.as_deref(), Some("fas fa-pen"));
    }

    #[test]
    fn item_css_overlays_derived_display() {
        let item = MenuItem::route("view1").with_css_class("btn-warning");
        let display = item.effective_display(&routes(), &BTreeMap::new());
        assert_eq!(display.css_classes, ["btn-warning"]);
    }

    #[test]
    fn active_against_marker() {
        let table = routes();
        let ctx = RequestContext::new("/elsewhere/");
        let item = MenuItem::route("view1");
        assert!(item.is_active(&ctx, Some("view1"), false, &table));
        assert!(!item.is_active(&ctx, Some("content2"), false, &table));
    }

    #[test]
    fn active_against_request_path() {
        let table = routes();
        let ctx = RequestContext::new("/view1/");
        let item = MenuItem::route("view1");
        assert!(item.is_active(&ctx, None, false, &table));
        assert!(!MenuItem::route("content2").is_active(&ctx, None, false, &table));
    }

    #[test]
    fn active_against_full_path() {
        let table = routes();
        let ctx = RequestContext::new("/view1/").with_query("page=2");
        let item = MenuItem::route("view1");
        assert!(!item.is_active(&ctx, None, true, &table));
        assert!(item.is_active(&ctx, None, false, &table));
    }

    #[test]
    fn permission_hook_hides_item() {
        let mut table = RouteTable::new();
        table
            .register_with_meta(
                "secret",
                "/secret/",
                menukit_routes::ViewMeta::new().with_permission(|ctx| ctx.has_flag("staff")),
            )
            .unwrap();
        let item = MenuItem::route("secret");
        assert!(!item.test_visible(&RequestContext::new("/"), &table));
        assert!(item.test_visible(&RequestContext::new("/").with_flag("staff"), &table));
    }

    #[test]
    fn permission_name_override() {
        let mut table = RouteTable::new();
        table
            .register_with_meta(
                "secret",
                "/secret/",
                menukit_routes::ViewMeta::new().with_permission(|_| false),
            )
            .unwrap();
        let item = MenuItem::javascript("alert('x')").with_permission_name("secret");
        assert!(!item.test_visible(&RequestContext::new("/"), &table));
    }

    #[test]
    fn hidden_flag_wins() {
        let item = MenuItem::route("view1").with_visible(false);
        assert!(!item.test_visible(&RequestContext::new("/"), &routes()));
    }
}

//! Menu sets and the menu-view trait.

use std::collections::BTreeMap;

use menukit_core::{AjaxCommand, MenuDisplay, RequestContext, Result, SafeHtml};
use menukit_menu::{HtmlMenu, MenuStyle};
use menukit_routes::RouteTable;

/// A named, ordered collection of menus owned by one view.
#[derive(Debug, Clone, Default)]
pub struct MenuSet {
    menus: Vec<(String, HtmlMenu)>,
    defaults: BTreeMap<String, MenuDisplay>,
}

impl MenuSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// A set whose menus start from application-level button defaults.
    pub fn with_defaults(defaults: BTreeMap<String, MenuDisplay>) -> Self {
        Self {
            menus: Vec::new(),
            defaults,
        }
    }

    /// Add a menu and return it for building. Re-adding a name replaces
    /// the previous menu.
    pub fn add_menu(&mut self, name: impl Into<String>, style: MenuStyle) -> &mut HtmlMenu {
        let mut menu = HtmlMenu::new(style);
        if !self.defaults.is_empty() {
            menu.set_button_defaults(self.defaults.clone());
        }
        self.insert(name.into(), menu)
    }

    /// Add a pre-built menu.
    pub fn add_built(&mut self, name: impl Into<String>, menu: HtmlMenu) -> &mut HtmlMenu {
        self.insert(name.into(), menu)
    }

    fn insert(&mut self, name: String, menu: HtmlMenu) -> &mut HtmlMenu {
        if let Some(index) = self.menus.iter().position(|(n, _)| *n == name) {
            self.menus[index].1 = menu;
            &mut self.menus[index].1
        } else {
            self.menus.push((name, menu));
            &mut self.menus.last_mut().expect("just pushed").1
        }
    }

    pub fn get(&self, name: &str) -> Option<&HtmlMenu> {
        self.menus.iter().find(|(n, _)| n == name).map(|(_, m)| m)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut HtmlMenu> {
        self.menus
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, m)| m)
    }

    pub fn names(&self) -> Vec<&str> {
        self.menus.iter().map(|(n, _)| n.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.menus.is_empty()
    }

    /// Render every menu, in insertion order.
    pub fn render_all(
        &self,
        ctx: &RequestContext,
        routes: &RouteTable,
    ) -> Result<Vec<(String, SafeHtml)>> {
        self.menus
            .iter()
            .map(|(name, menu)| Ok((name.clone(), menu.render(ctx, routes)?)))
            .collect()
    }

    /// Badge refresh commands across all menus.
    pub fn badge_commands(&self) -> Vec<AjaxCommand> {
        self.menus
            .iter()
            .flat_map(|(_, menu)| menu.badge_commands())
            .collect()
    }
}

/// A view that owns a set of menus.
///
/// Implementors describe their menus in [`MenuView::setup_menu`]; the
/// provided [`MenuView::build_menus`] assembles a fresh set per request so
/// badges and visibility reflect current state.
pub trait MenuView {
    /// Application-level button display defaults (usually from settings).
    fn button_defaults(&self) -> BTreeMap<String, MenuDisplay> {
        BTreeMap::new()
    }

    /// Populate the view's menus for this request.
    fn setup_menu(&self, ctx: &RequestContext, menus: &mut MenuSet);

    /// Build the menu set for a request.
    fn build_menus(&self, ctx: &RequestContext) -> MenuSet {
        let mut menus = MenuSet::with_defaults(self.button_defaults());
        self.setup_menu(ctx, &mut menus);
        menus
    }
}

/// Badge refresh for polled timers: rebuild the view's menus and return
/// one patch command per identifiable badge.
pub fn timer_menu<V: MenuView>(view: &V, ctx: &RequestContext) -> menukit_core::CommandResponse {
    view.build_menus(ctx).badge_commands().into()
}

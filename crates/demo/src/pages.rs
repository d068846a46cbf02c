//! The demo pages: a kitchen-sink menu page, a tabbed page with partial
//! updates and a timer-refreshed badge, and a context-menu page.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;

use menukit_config::MenuSettings;
use menukit_core::{AjaxCommand, CommandResponse, MenuDisplay, RequestContext, Result, SafeHtml};
use menukit_menu::{Badge, MenuEntry, MenuItem, MenuStyle};
use menukit_routes::RouteTable;
use menukit_views::{
    MenuSet, MenuView, SectionKind, TabView, add_context_menu, commands_script,
    enable_context_menu, menu_content, template_content,
};

/// The shared page shell.
fn shell(title: &str, body: &str) -> SafeHtml {
    SafeHtml::from_trusted(format!(
        "<!DOCTYPE html>\
         <html lang=\"en\"><head><meta charset=\"utf-8\">\
         <title>{title} — menukit demo</title>\
         <link rel=\"stylesheet\" href=\"https://cdn.jsdelivr.net/npm/bootstrap@4.6.2/dist/css/bootstrap.min.css\">\
         <link rel=\"stylesheet\" href=\"/static/menukit.css\">\
         </head><body><div class=\"container\">{body}</div>\
         <script src=\"/static/menukit.js\"></script>\
         </body></html>"
    ))
}

fn section(title: &str, html: &SafeHtml) -> String {
    format!("<h5 class=\"mt-4\">{title}</h5>{html}")
}

/// The site-wide main menu, shared by every page.
fn add_main_menu(menus: &mut MenuSet, active: &str) {
    let menu = menus.add_menu("main_menu", MenuStyle::Main);
    menu.set_active(active);
    menu.add_route("view1")
        .add_route_with("ajaxtab", "Ajax Tabs")
        .add_route_with("context_examples", "Context Examples")
        .add_route("restricted");
}

fn seconds_badge(badge: &mut Badge) {
    badge.text = Some(Utc::now().format("%S").to_string());
    badge.css_class = Some("warning".into());
}

// --- Kitchen sink ---

/// The `view1`..`view4` pages: every menu form on one page, varying only
/// in which route is current.
pub struct KitchenSinkView {
    current: String,
    breadcrumb: Vec<(&'static str, Option<&'static str>)>,
    settings: Arc<MenuSettings>,
}

impl KitchenSinkView {
    pub fn for_route(current: &str, settings: Arc<MenuSettings>) -> Self {
        let breadcrumb: Vec<(&'static str, Option<&'static str>)> = match current {
            "view2" => vec![("view1", None), ("view2", None)],
            "view3" => vec![("view1", None), ("view2", None), ("view3", None)],
            "view4" => vec![
                ("view1", None),
                ("view2", None),
                ("view3", None),
                ("view4", Some("View4")),
            ],
            _ => vec![("view1", None)],
        };
        Self {
            current: current.to_string(),
            breadcrumb,
            settings,
        }
    }

    pub fn render_page(&self, ctx: &RequestContext, routes: &RouteTable) -> Result<SafeHtml> {
        let menus = self.build_menus(ctx);
        let mut body = String::new();
        for (name, html) in menus.render_all(ctx, routes)? {
            if name == "main_menu" {
                body.push_str(html.as_str());
            } else {
                body.push_str(&section(&name.replace('_', " "), &html));
            }
        }
        Ok(shell(&self.current, &body))
    }

    pub fn render_int_path(
        &self,
        ctx: &RequestContext,
        routes: &RouteTable,
        int: i64,
    ) -> Result<SafeHtml> {
        let mut menus = MenuSet::with_defaults(self.button_defaults());
        add_main_menu(&mut menus, "view1");
        let main = menus
            .get("main_menu")
            .expect("just added")
            .render(ctx, routes)?;
        Ok(shell(
            "int path",
            &format!("{main}<p class=\"mt-4\">Path argument: {int}</p>"),
        ))
    }
}

impl MenuView for KitchenSinkView {
    fn button_defaults(&self) -> BTreeMap<String, MenuDisplay> {
        self.settings.button_defaults.clone()
    }

    fn setup_menu(&self, _ctx: &RequestContext, menus: &mut MenuSet) {
        add_main_menu(menus, &self.current);

        let breadcrumb = menus.add_menu("breadcrumb", MenuStyle::Breadcrumb);
        for (route, label) in &self.breadcrumb {
            match label {
                Some(label) => breadcrumb.add_route_with(route, *label),
                None => breadcrumb.add_route(route),
            };
        }

        menus
            .add_menu("menu_items", MenuStyle::ButtonGroup)
            .add_route("view1")
            .add_item(
                MenuItem::route("view1")
                    .with_display("Styled")
                    .with_css_class("btn-secondary"),
            )
            .add_item(MenuItem::route("view2"));

        // Route-level display defaults (view3/view4), per-menu button
        // defaults ("edit") and settings-level defaults all in one group.
        menus
            .add_menu("menu_display", MenuStyle::ButtonGroup)
            .set_button_default(
                "edit",
                MenuDisplay::new("Edit-default")
                    .with_icon("fas fa-pen")
                    .with_css_class("btn-success"),
            )
            .add_route("view3")
            .add_route("view4")
            .add_item(MenuItem::route("view1").with_display("edit"))
            .add_item(
                MenuItem::route("view1")
                    .with_display("Warn")
                    .with_icon("fas fa-exclamation-triangle")
                    .with_css_classes(["btn-danger"]),
            )
            .add_item(MenuItem::route("view1").with_display("").with_icon("fas fa-pen"))
            .add_item(MenuItem::route("view1").with_display("global_edit"))
            .add_item(MenuItem::route("view1").with_display("Tip").with_tooltip("tooltip"));

        menus
            .add_menu("link_examples", MenuStyle::ButtonGroup)
            .add_route_with("view1", "Simple route name")
            .add_item(
                MenuItem::route("int_path")
                    .with_display("Path with url args")
                    .with_url_arg(1),
            )
            .add_item(
                MenuItem::route("int_path")
                    .with_display("Path with url kwargs")
                    .with_url_kwarg("int", 2),
            )
            .add_item(MenuItem::route("int_path,3").with_display("Path with embedded args"))
            .add_item(MenuItem::href("/view1/#123").with_display("Raw URL"))
            .add_item(
                MenuItem::href("https://example.com/docs")
                    .with_display("External")
                    .with_target("_blank"),
            )
            .add_item(MenuItem::javascript("alert('javascript alert')").with_display("Javascript"))
            .add_item(MenuItem::ajax_button("test_button").with_display("Send to View"))
            .add_item(
                MenuItem::ajax_commands(&[AjaxCommand::message("from a command link")])
                    .with_display("Command link"),
            );

        menus
            .add_menu("demo_dropdown", MenuStyle::ButtonGroup)
            .add_route("view1")
            .add_item(MenuItem::label("All Views").with_dropdown([
                MenuItem::route("view1"),
                MenuItem::route("view2"),
                MenuItem::route("view3"),
                MenuItem::route("view4"),
            ]))
            .add_item(
                MenuItem::label("")
                    .with_icon("fas fa-info")
                    .no_caret()
                    .with_dropdown([
                        MenuEntry::Item(MenuItem::route("view1")),
                        MenuEntry::Item(MenuItem::route("view2").disabled()),
                        MenuEntry::Divider,
                        MenuEntry::Item(MenuItem::route("view4")),
                    ]),
            )
            .add_item(
                MenuItem::label("No hover")
                    .no_hover()
                    .with_placement("bottom-end")
                    .with_dropdown([MenuItem::route("view1"), MenuItem::route("view2")]),
            );

        menus
            .add_menu("tab_menu", MenuStyle::Tabs)
            .add_item(MenuItem::route("view1").with_key("a"))
            .add_item(
                MenuItem::route("view2")
                    .with_display("View 2 (ALT b or B)")
                    .with_key("alt-b")
                    .with_key("alt-B"),
            )
            .add_route("view3")
            .add_route("view4");

        menus
            .add_menu("badge", MenuStyle::Main)
            .add_item(
                MenuItem::route("view1")
                    .with_badge(Badge::with_format("demo_badge_1", seconds_badge)),
            )
            .add_item(MenuItem::route("view2").with_badge(Badge::new("!", "danger")))
            .add_route("view3");

        menus.add_menu("attr", MenuStyle::ButtonGroup).add_item(
            MenuItem::route("view1")
                .with_display("Look at link")
                .with_attribute("data-toggle", "hello_world")
                .with_attribute("data-target", "this_world"),
        );
    }
}

// --- Tabbed example ---

/// The `/ajax-tab-example/` pages: two tabs served by the same view,
/// patched in place on tab clicks, with a timer-refreshed badge.
pub struct TabExampleView {
    tab2: bool,
    settings: Arc<MenuSettings>,
}

impl TabExampleView {
    pub fn for_path(path: &str, settings: Arc<MenuSettings>) -> Self {
        Self {
            tab2: path.contains("tab2"),
            settings,
        }
    }

    /// The full page: main menu, then each patchable section in its
    /// wrapper, then the timer that keeps the badge fresh.
    pub fn render_page(&self, ctx: &RequestContext, routes: &RouteTable) -> Result<SafeHtml> {
        let menus = self.build_menus(ctx);
        let mut body = String::new();
        body.push_str(
            menus
                .get("main_menu")
                .expect("main menu is always set up")
                .render(ctx, routes)?
                .as_str(),
        );

        for (name, kind) in self.content_sections() {
            let fragment = match kind {
                SectionKind::Template => {
                    template_content(&name, &self.tab_content(ctx, &name)?)
                }
                SectionKind::Menu => {
                    let menu = menus.get(&name).ok_or_else(|| {
                        menukit_core::RenderError::UnknownMenu(name.clone())
                    })?;
                    menu_content(&name, menu, ctx, routes)?
                }
            };
            body.push_str(fragment.as_str());
        }

        let timer = {
            let mut payload = serde_json::Map::new();
            payload.insert("store".into(), Value::String("tab".into()));
            payload.insert("url".into(), Value::String("/ajax-tab-example/timer".into()));
            payload.insert("interval".into(), Value::from(1000));
            AjaxCommand::new("timer", payload)
        };
        body.push_str(commands_script(&[timer])?.as_str());

        Ok(shell("Ajax Tabs", &body))
    }
}

impl MenuView for TabExampleView {
    fn button_defaults(&self) -> BTreeMap<String, MenuDisplay> {
        self.settings.button_defaults.clone()
    }

    fn setup_menu(&self, _ctx: &RequestContext, menus: &mut MenuSet) {
        add_main_menu(menus, "ajaxtab");

        menus
            .add_menu("tab_menu", MenuStyle::Tabs)
            .add_item(MenuItem::ajax_get("ajaxtab").with_display("Tab1"))
            .add_item(
                MenuItem::ajax_get("content2")
                    .with_display("Tab2")
                    .with_badge(Badge::with_format("demo-badge", seconds_badge)),
            );

        menus
            .add_menu("button_menu", MenuStyle::ButtonGroup)
            .add_route_with("ajaxtab", "Tab 1")
            .add_route_with("content2", "Tab 2");
    }
}

impl TabView for TabExampleView {
    fn additional_content(&self) -> Vec<(String, SectionKind)> {
        vec![("button_menu".to_string(), SectionKind::Menu)]
    }

    fn tab_content(&self, _ctx: &RequestContext, name: &str) -> Result<SafeHtml> {
        if name != "tab_template" {
            return Err(menukit_core::RenderError::MissingContent(name.to_string()).into());
        }
        let label = if self.tab2 { "Tab 2" } else { "Tab 1" };
        Ok(SafeHtml::from_trusted(format!(
            "<h2>{label} content</h2><p>Loaded without a full page refresh.</p>"
        )))
    }
}

// --- Context menu page ---

pub fn context_examples_page(
    ctx: &RequestContext,
    routes: &RouteTable,
    settings: &MenuSettings,
) -> Result<SafeHtml> {
    let mut menus = MenuSet::new();
    add_main_menu(&mut menus, "context_examples");
    let main = menus
        .get("main_menu")
        .expect("just added")
        .render(ctx, routes)?;

    let arm = commands_script(&[enable_context_menu(&settings.context_menu_selector)])?;
    let body = format!(
        "{main}\
         <p class=\"context_menu mt-4 p-4 border\">Right-click me for a context menu.</p>\
         <p class=\"context_menu p-4 border\">Or me.</p>\
         {arm}"
    );
    Ok(shell("Context Examples", &body))
}

pub fn context_menu_commands(
    ctx: &RequestContext,
    routes: &RouteTable,
    pos: Option<Value>,
) -> Result<CommandResponse> {
    add_context_menu(
        [
            MenuItem::route("view1"),
            MenuItem::route("view2"),
            MenuItem::route("view3"),
            MenuItem::ajax_button("test_button").with_display("Send to View"),
        ],
        ctx,
        routes,
        pos,
    )
}

//! Page-fragment helpers — the pieces a page template splices in.
//!
//! Each patched section lives in a `<div id="...">` wrapper so partial
//! updates can re-target it later by selector.

use serde_json::Value;

use menukit_core::{AjaxCommand, CommandResponse, RequestContext, Result, SafeHtml};
use menukit_menu::{HtmlMenu, MenuItem, MenuStyle};
use menukit_routes::RouteTable;

/// Wrap already-rendered section content in its patchable container.
pub fn template_content(name: &str, inner: &SafeHtml) -> SafeHtml {
    SafeHtml::from_trusted(format!("<div id=\"{name}\">{inner}</div>"))
}

/// Render a menu inside its patchable container.
pub fn menu_content(
    name: &str,
    menu: &HtmlMenu,
    ctx: &RequestContext,
    routes: &RouteTable,
) -> Result<SafeHtml> {
    let rendered = menu.render(ctx, routes)?;
    Ok(template_content(name, &rendered))
}

/// Render a single item as a standalone button.
pub fn display_button(
    item: MenuItem,
    ctx: &RequestContext,
    routes: &RouteTable,
) -> Result<SafeHtml> {
    let mut menu = HtmlMenu::button_group();
    menu.add_item(item);
    menu.render(ctx, routes)
}

/// The page command that arms right-click context menus on `selector`.
pub fn enable_context_menu(selector: &str) -> AjaxCommand {
    let mut payload = serde_json::Map::new();
    payload.insert("selector".into(), Value::String(selector.to_string()));
    AjaxCommand::new("enable_context_menu", payload)
}

/// A partial-update response that pops a context menu at `pos`.
pub fn context_menu_response(
    menu: &HtmlMenu,
    ctx: &RequestContext,
    routes: &RouteTable,
    pos: Option<Value>,
) -> Result<CommandResponse> {
    let rendered = menu.render(ctx, routes)?;
    Ok(CommandResponse::of(AjaxCommand::context_menu(rendered, pos)))
}

/// Build a context menu from entries and wrap it in a response.
pub fn add_context_menu<I, E>(
    entries: I,
    ctx: &RequestContext,
    routes: &RouteTable,
    pos: Option<Value>,
) -> Result<CommandResponse>
where
    I: IntoIterator<Item = E>,
    E: Into<menukit_menu::MenuEntry>,
{
    let mut menu = HtmlMenu::new(MenuStyle::Context);
    menu.add_items(entries);
    context_menu_response(&menu, ctx, routes, pos)
}

/// An inline script that runs commands as soon as the page loads — used
/// when the full page render needs the same on-load behavior a partial
/// update would get from its `onload` command.
pub fn commands_script(commands: &[AjaxCommand]) -> Result<SafeHtml> {
    let onload = AjaxCommand::onload(commands.to_vec());
    let json = serde_json::to_string(&vec![onload])?;
    Ok(SafeHtml::from_trusted(format!(
        "<script>menukit.process_commands({json});</script>"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn routes() -> RouteTable {
        let mut table = RouteTable::new();
        table.register("view1", "/view1/").unwrap();
        table.register("view2", "/view2/").unwrap();
        table
    }

    fn ctx() -> RequestContext {
        RequestContext::new("/view1/")
    }

    #[test]
    fn template_content_wraps_by_id() {
        let html = template_content("tab_template", &SafeHtml::from_trusted("<p>hi</p>"));
        assert_eq!(html.as_str(), "<div id=\"tab_template\"><p>hi</p></div>");
    }

    #[test]
    fn menu_content_wraps_rendered_menu() {
        let mut menu = HtmlMenu::tabs();
        menu.set_id("inner").add_route("view1");
        let html = menu_content("tab_menu", &menu, &ctx(), &routes()).unwrap();
        assert!(html.as_str().starts_with("<div id=\"tab_menu\">"));
        assert!(html.as_str().contains("nav-tabs"));
    }

    #[test]
    fn display_button_renders_one_button() {
        let html = display_button(
            MenuItem::route("view1").with_css_class("btn-secondary"),
            &ctx(),
            &routes(),
        )
        .unwrap();
        assert!(html.as_str().contains("btn-group"));
        assert!(html.as_str().contains("btn-secondary"));
    }

    #[test]
    fn context_menu_response_carries_position() {
        let pos = serde_json::json!({"x": 10, "y": 20});
        let response = add_context_menu(
            [MenuItem::route("view1"), MenuItem::route("view2")],
            &ctx(),
            &routes(),
            Some(pos),
        )
        .unwrap();

        assert_eq!(response.len(), 1);
        let command = &response.commands()[0];
        assert_eq!(command.function, "context_menu");
        assert_eq!(command.payload["pos"]["x"], 10);
        assert!(
            command.payload["menu"]
                .as_str()
                .unwrap()
                .contains("context-menu")
        );
    }

    #[test]
    fn enable_context_menu_targets_selector() {
        let command = enable_context_menu(".context_menu");
        assert_eq!(command.function, "enable_context_menu");
        assert_eq!(command.payload["selector"], ".context_menu");
    }

    #[test]
    fn commands_script_wraps_onload() {
        let script = commands_script(&[AjaxCommand::message("ready")]).unwrap();
        assert!(script.as_str().starts_with("<script>menukit.process_commands(["));
        assert!(script.as_str().contains("\"function\":\"onload\""));
        assert!(script.as_str().contains("ready"));
    }
}

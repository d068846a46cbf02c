//! Tabbed views with partial updates.
//!
//! A [`TabView`] serves the same page two ways. A plain GET renders the
//! full page; a partial GET (`X-Requested-With: XMLHttpRequest`, sent when
//! the user clicks a tab) returns only the changed fragments as a list of
//! UI-patch commands.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use tracing::error;

use menukit_core::{AjaxCommand, CommandResponse, RenderError, RequestContext, Result, SafeHtml};
use menukit_routes::RouteTable;

use crate::context::AjaxResponse;
use crate::menus::MenuView;

/// What fills a content section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    /// Rendered by [`TabView::tab_content`].
    Template,
    /// A menu from the view's menu set, rendered in place.
    Menu,
}

/// A view participating in the tab partial-update protocol.
pub trait TabView: MenuView {
    /// Extra sections beyond the standard `tab_template`/`tab_menu` pair.
    fn additional_content(&self) -> Vec<(String, SectionKind)> {
        Vec::new()
    }

    /// All patched sections, in patch order.
    fn content_sections(&self) -> Vec<(String, SectionKind)> {
        let mut sections = vec![
            ("tab_template".to_string(), SectionKind::Template),
            ("tab_menu".to_string(), SectionKind::Menu),
        ];
        sections.extend(self.additional_content());
        sections
    }

    /// Render a template section.
    fn tab_content(&self, ctx: &RequestContext, name: &str) -> Result<SafeHtml>;

    /// Commands to run client-side once the new tab content is in place.
    fn tab_commands(&self, _ctx: &RequestContext) -> Vec<AjaxCommand> {
        Vec::new()
    }

    /// The partial-update response: stop tab timers, patch each section,
    /// then run any on-load commands.
    fn tab_response(&self, ctx: &RequestContext, routes: &RouteTable) -> Result<CommandResponse> {
        let menus = self.build_menus(ctx);
        let mut response = CommandResponse::of(AjaxCommand::clear_timers("tab"));

        for (name, kind) in self.content_sections() {
            let html = match kind {
                SectionKind::Template => self.tab_content(ctx, &name)?,
                SectionKind::Menu => menus
                    .get(&name)
                    .ok_or_else(|| RenderError::UnknownMenu(name.clone()))?
                    .render(ctx, routes)?,
            };
            response.push(AjaxCommand::html(format!("#{name}"), html));
        }

        let on_load = self.tab_commands(ctx);
        if !on_load.is_empty() {
            response.push(AjaxCommand::onload(on_load));
        }
        Ok(response)
    }

    /// Serve the request: partial responses for tab clicks, the given
    /// full page otherwise.
    fn respond(&self, ctx: &RequestContext, routes: &RouteTable, full_page: SafeHtml) -> Response {
        if !ctx.is_ajax {
            return Html(full_page.into_string()).into_response();
        }
        match self.tab_response(ctx, routes) {
            Ok(response) => AjaxResponse(response).into_response(),
            Err(e) => {
                error!(error = %e, path = %ctx.path, "Tab response failed");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menus::MenuSet;
    use menukit_menu::MenuStyle;

    fn routes() -> RouteTable {
        let mut table = RouteTable::new();
        table.register("ajaxtab", "/ajax-tab-example/").unwrap();
        table
            .register("content2", "/ajax-tab-example/tab2/")
            .unwrap();
        table
    }

    struct TabExample;

    impl MenuView for TabExample {
        fn setup_menu(&self, _ctx: &RequestContext, menus: &mut MenuSet) {
            let menu = menus.add_menu("tab_menu", MenuStyle::Tabs);
            menu.set_id("tab_menu_inner");
            menu.add_route("ajaxtab").add_route("content2");
        }
    }

    impl TabView for TabExample {
        fn additional_content(&self) -> Vec<(String, SectionKind)> {
            vec![("button_menu".to_string(), SectionKind::Menu)]
        }

        fn tab_content(&self, _ctx: &RequestContext, name: &str) -> Result<SafeHtml> {
            Ok(SafeHtml::from_trusted(format!("<h2>{name}</h2>")))
        }

        fn tab_commands(&self, _ctx: &RequestContext) -> Vec<AjaxCommand> {
            vec![AjaxCommand::message("tab loaded")]
        }
    }

    #[test]
    fn tab_response_patches_each_section_in_order() {
        // button_menu is declared but never built — that must error, so
        // give the view its menu here.
        struct Complete;
        impl MenuView for Complete {
            fn setup_menu(&self, _ctx: &RequestContext, menus: &mut MenuSet) {
                menus
                    .add_menu("tab_menu", MenuStyle::Tabs)
                    .add_route("ajaxtab");
                menus
                    .add_menu("button_menu", MenuStyle::ButtonGroup)
                    .add_route("content2");
            }
        }
        impl TabView for Complete {
            fn additional_content(&self) -> Vec<(String, SectionKind)> {
                vec![("button_menu".to_string(), SectionKind::Menu)]
            }
            fn tab_content(&self, _ctx: &RequestContext, name: &str) -> Result<SafeHtml> {
                Ok(SafeHtml::from_trusted(format!("<p>{name}</p>")))
            }
        }

        let ctx = RequestContext::new("/ajax-tab-example/").with_ajax(true);
        let response = Complete.tab_response(&ctx, &routes()).unwrap();

        let functions: Vec<_> = response
            .commands()
            .iter()
            .map(|c| c.function.as_str())
            .collect();
        assert_eq!(functions, ["clear_timers", "html", "html", "html"]);
        assert_eq!(response.commands()[1].payload["selector"], "#tab_template");
        assert_eq!(response.commands()[2].payload["selector"], "#tab_menu");
        assert_eq!(response.commands()[3].payload["selector"], "#button_menu");
    }

    #[test]
    fn missing_menu_section_errors() {
        let ctx = RequestContext::new("/ajax-tab-example/").with_ajax(true);
        let err = TabExample.tab_response(&ctx, &routes()).unwrap_err();
        assert!(err.to_string().contains("button_menu"));
    }

    #[test]
    fn tab_commands_wrap_in_onload() {
        struct NoExtra;
        impl MenuView for NoExtra {
            fn setup_menu(&self, _ctx: &RequestContext, menus: &mut MenuSet) {
                menus
                    .add_menu("tab_menu", MenuStyle::Tabs)
                    .add_route("ajaxtab");
            }
        }
        impl TabView for NoExtra {
            fn tab_content(&self, _ctx: &RequestContext, _name: &str) -> Result<SafeHtml> {
                Ok(SafeHtml::from_trusted("<p>x</p>"))
            }
            fn tab_commands(&self, _ctx: &RequestContext) -> Vec<AjaxCommand> {
                vec![AjaxCommand::message("tab loaded")]
            }
        }

        let ctx = RequestContext::new("/ajax-tab-example/").with_ajax(true);
        let response = NoExtra.tab_response(&ctx, &routes()).unwrap();
        let last = response.commands().last().unwrap();
        assert_eq!(last.function, "onload");
        assert_eq!(last.payload["commands"][0]["function"], "message");
    }

    #[test]
    fn non_ajax_requests_get_the_full_page() {
        let ctx = RequestContext::new("/ajax-tab-example/");
        let response = TabExample.respond(&ctx, &routes(), SafeHtml::from_trusted("<html></html>"));
        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response
            .headers()
            .get("content-type")
            .unwrap()
            .to_str()
            .unwrap();
        assert!(content_type.contains("text/html"));
    }
}

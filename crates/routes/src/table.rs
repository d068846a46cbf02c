//! The route table: name → pattern registry with per-route view metadata.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use menukit_core::{MenuDisplay, RequestContext, Result, RouteError};

use crate::pattern::RoutePattern;

/// Permission hook: decides whether the current request may see links to a
/// route.
pub type PermissionFn = Arc<dyn Fn(&RequestContext) -> bool + Send + Sync>;

/// Metadata a route exposes to the menu layer.
///
/// All fields are optional; a bare route renders with a capitalized name
/// and no gating.
#[derive(Clone, Default)]
pub struct ViewMeta {
    /// Default display for items linking here.
    pub display: Option<MenuDisplay>,

    /// Visibility gate for items linking here.
    pub permission: Option<PermissionFn>,

    /// `{}`-style wrapper applied to the reversed href.
    pub href_format: Option<String>,

    /// Extra anchor attributes for items linking here.
    pub attributes: BTreeMap<String, String>,
}

impl ViewMeta {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_display(mut self, display: impl Into<MenuDisplay>) -> Self {
        self.display = Some(display.into());
        self
    }

    pub fn with_permission<F>(mut self, permission: F) -> Self
    where
        F: Fn(&RequestContext) -> bool + Send + Sync + 'static,
    {
        self.permission = Some(Arc::new(permission));
        self
    }

    pub fn with_href_format(mut self, format: impl Into<String>) -> Self {
        self.href_format = Some(format.into());
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Run the permission hook; unguarded routes are always visible.
    pub fn permits(&self, ctx: &RequestContext) -> bool {
        match &self.permission {
            Some(permission) => permission(ctx),
            None => true,
        }
    }
}

impl fmt::Debug for ViewMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewMeta")
            .field("display", &self.display)
            .field("permission", &self.permission.as_ref().map(|_| "<fn>"))
            .field("href_format", &self.href_format)
            .field("attributes", &self.attributes)
            .finish()
    }
}

/// The result of resolving a path back to a route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    /// Bare route name.
    pub name: String,

    /// Namespace, when the route was registered as `ns:name`.
    pub namespace: Option<String>,

    /// Captured path parameters.
    pub params: BTreeMap<String, String>,
}

impl RouteMatch {
    /// `ns:name` when namespaced, the bare name otherwise.
    pub fn full_name(&self) -> String {
        match &self.namespace {
            Some(ns) => format!("{ns}:{}", self.name),
            None => self.name.clone(),
        }
    }
}

struct RouteEntry {
    full_name: String,
    pattern: RoutePattern,
    meta: ViewMeta,
}

/// A registry of named routes.
///
/// Registration order matters for `resolve` (first match wins);
/// re-registering a name replaces the existing entry in place.
#[derive(Default)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
    by_name: HashMap<String, usize>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a route with no metadata. Names may be namespaced
    /// (`admin:index`).
    pub fn register(&mut self, name: impl Into<String>, pattern: &str) -> Result<()> {
        self.register_with_meta(name, pattern, ViewMeta::default())
    }

    /// Register a route carrying view metadata.
    pub fn register_with_meta(
        &mut self,
        name: impl Into<String>,
        pattern: &str,
        meta: ViewMeta,
    ) -> Result<()> {
        let full_name = name.into();
        let pattern = RoutePattern::parse(pattern)?;
        let entry = RouteEntry {
            full_name: full_name.clone(),
            pattern,
            meta,
        };
        match self.by_name.get(&full_name) {
            Some(&index) => {
                debug!(route = %full_name, "Replacing registered route");
                self.entries[index] = entry;
            }
            None => {
                self.by_name.insert(full_name, self.entries.len());
                self.entries.push(entry);
            }
        }
        Ok(())
    }

    fn entry(&self, name: &str) -> Result<&RouteEntry> {
        self.by_name
            .get(name)
            .map(|&index| &self.entries[index])
            .ok_or_else(|| RouteError::NotFound(name.to_string()).into())
    }

    /// Is `name` registered?
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Build the path for a named route from positional arguments.
    pub fn reverse(&self, name: &str, args: &[&str]) -> Result<String> {
        let entry = self.entry(name)?;
        entry.pattern.fill_positional(name, args)
    }

    /// Build the path for a named route from named arguments.
    pub fn reverse_kwargs(&self, name: &str, kwargs: &BTreeMap<&str, String>) -> Result<String> {
        let entry = self.entry(name)?;
        entry.pattern.fill_named(name, kwargs)
    }

    /// Resolve a request path (query string ignored) back to a route.
    pub fn resolve(&self, path: &str) -> Option<RouteMatch> {
        let path = path.split('?').next().unwrap_or(path);
        for entry in &self.entries {
            if let Some(params) = entry.pattern.match_path(path) {
                let (namespace, name) = match entry.full_name.split_once(':') {
                    Some((ns, name)) => (Some(ns.to_string()), name.to_string()),
                    None => (None, entry.full_name.clone()),
                };
                return Some(RouteMatch {
                    name,
                    namespace,
                    params,
                });
            }
        }
        None
    }

    /// View metadata for a named route.
    pub fn meta(&self, name: &str) -> Option<&ViewMeta> {
        self.by_name.get(name).map(|&index| &self.entries[index].meta)
    }

    /// All registered route names, in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.full_name.as_str()).collect()
    }
}

impl fmt::Debug for RouteTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteTable")
            .field("routes", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RouteTable {
        let mut table = RouteTable::new();
        table.register("view1", "/view1/").unwrap();
        table.register("int_path", "/intpath/{int}").unwrap();
        table.register("admin:index", "/admin/").unwrap();
        table
    }

    #[test]
    fn reverse_then_resolve_round_trips() {
        let table = table();
        let path = table.reverse("int_path", &["7"]).unwrap();
        let matched = table.resolve(&path).unwrap();
        assert_eq!(matched.full_name(), "int_path");
        assert_eq!(matched.params.get("int").map(String::as_str), Some("7"));
    }

    #[test]
    fn reverse_unknown_route_errors() {
        let err = table().reverse("nope", &[]).unwrap_err();
        assert!(matches!(
            err,
            menukit_core::Error::Route(RouteError::NotFound(_))
        ));
    }

    #[test]
    fn resolve_strips_query_string() {
        let table = table();
        let matched = table.resolve("/view1/?page=2").unwrap();
        assert_eq!(matched.full_name(), "view1");
    }

    #[test]
    fn namespaced_full_name() {
        let table = table();
        let matched = table.resolve("/admin/").unwrap();
        assert_eq!(matched.namespace.as_deref(), Some("admin"));
        assert_eq!(matched.full_name(), "admin:index");
        assert_eq!(table.reverse("admin:index", &[]).unwrap(), "/admin/");
    }

    #[test]
    fn reregistration_replaces_in_place() {
        let mut table = table();
        table.register("view1", "/elsewhere/").unwrap();
        assert_eq!(table.reverse("view1", &[]).unwrap(), "/elsewhere/");
        // Still resolves with its original priority slot.
        assert_eq!(table.resolve("/elsewhere/").unwrap().name, "view1");
    }

    #[test]
    fn meta_permission_gates() {
        let mut table = RouteTable::new();
        table
            .register_with_meta(
                "secret",
                "/secret/",
                ViewMeta::new().with_permission(|ctx| ctx.has_flag("staff")),
            )
            .unwrap();

        let meta = table.meta("secret").unwrap();
        assert!(!meta.permits(&RequestContext::new("/")));
        assert!(meta.permits(&RequestContext::new("/").with_flag("staff")));
    }

    #[test]
    fn meta_display_default() {
        let mut table = RouteTable::new();
        table
            .register_with_meta(
                "view3",
                "/view3/",
                ViewMeta::new().with_display("View-3"),
            )
            .unwrap();
        let display = table.meta("view3").unwrap().display.clone().unwrap();
        assert_eq!(display.text, "View-3");
    }
}

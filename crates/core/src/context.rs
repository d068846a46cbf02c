//! Request context — what menus are allowed to know about a request.
//!
//! Menus never see the framework's request type. Active detection,
//! visibility hooks, and partial-update branching all work off this value,
//! which the view layer extracts once per request.

use std::collections::BTreeSet;

/// A framework-neutral view of the current request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    /// Request path, query string excluded.
    pub path: String,

    /// Raw query string, if any.
    pub query: Option<String>,

    /// True when the request asked for a partial update
    /// (`X-Requested-With: XMLHttpRequest`).
    pub is_ajax: bool,

    /// Authenticated user name, if the host app provides one.
    pub user: Option<String>,

    /// Free-form permission flags; route permission hooks read these.
    pub flags: BTreeSet<String>,
}

impl RequestContext {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn with_ajax(mut self, is_ajax: bool) -> Self {
        self.is_ajax = is_ajax;
        self
    }

    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    pub fn with_flag(mut self, flag: impl Into<String>) -> Self {
        self.flags.insert(flag.into());
        self
    }

    pub fn has_flag(&self, flag: &str) -> bool {
        self.flags.contains(flag)
    }

    /// Path plus query string, as the browser sent it.
    pub fn full_path(&self) -> String {
        match &self.query {
            Some(query) if !query.is_empty() => format!("{}?{query}", self.path),
            _ => self.path.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_path_appends_query() {
        let ctx = RequestContext::new("/view1/").with_query("page=2");
        assert_eq!(ctx.full_path(), "/view1/?page=2");
    }

    #[test]
    fn full_path_without_query_is_path() {
        let ctx = RequestContext::new("/view1/");
        assert_eq!(ctx.full_path(), "/view1/");
    }

    #[test]
    fn flags_are_queryable() {
        let ctx = RequestContext::new("/").with_flag("staff");
        assert!(ctx.has_flag("staff"));
        assert!(!ctx.has_flag("admin"));
    }
}

//! The UI-patch command protocol.
//!
//! Partial-update responses are an ordered list of commands, each telling
//! the client runtime to patch one piece of the page:
//! `{"function": "html", "selector": "#tab_menu", "html": "..."}`.
//! The client runtime (`menukit.js`) walks the list in order.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::html::SafeHtml;

/// One UI-patch instruction.
///
/// `function` names the client-side handler; everything else is the
/// handler's payload, flattened into the same JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AjaxCommand {
    pub function: String,
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl AjaxCommand {
    /// A command with an arbitrary function name and payload.
    pub fn new(function: impl Into<String>, payload: Map<String, Value>) -> Self {
        Self {
            function: function.into(),
            payload,
        }
    }

    /// Replace the inner HTML of the element matching `selector`.
    pub fn html(selector: impl Into<String>, html: SafeHtml) -> Self {
        let mut payload = Map::new();
        payload.insert("selector".into(), Value::String(selector.into()));
        payload.insert("html".into(), Value::String(html.into_string()));
        Self::new("html", payload)
    }

    /// Show a transient message to the user.
    pub fn message(text: impl Into<String>) -> Self {
        let mut payload = Map::new();
        payload.insert("text".into(), Value::String(text.into()));
        Self::new("message", payload)
    }

    /// Pop up a context menu at `pos` (client-supplied coordinates).
    pub fn context_menu(menu: SafeHtml, pos: Option<Value>) -> Self {
        let mut payload = Map::new();
        payload.insert("menu".into(), Value::String(menu.into_string()));
        if let Some(pos) = pos {
            payload.insert("pos".into(), pos);
        }
        Self::new("context_menu", payload)
    }

    /// Cancel all client timers registered under `store`.
    pub fn clear_timers(store: impl Into<String>) -> Self {
        let mut payload = Map::new();
        payload.insert("store".into(), Value::String(store.into()));
        Self::new("clear_timers", payload)
    }

    /// Run `commands` once the patched content is in the DOM.
    pub fn onload(commands: Vec<AjaxCommand>) -> Self {
        let mut payload = Map::new();
        payload.insert("commands".into(), json!(commands));
        Self::new("onload", payload)
    }
}

/// An ordered list of [`AjaxCommand`]s — the body of a partial-update
/// response. Order is preserved; the client applies commands in sequence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommandResponse {
    commands: Vec<AjaxCommand>,
}

impl CommandResponse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a response from a single command.
    pub fn of(command: AjaxCommand) -> Self {
        Self {
            commands: vec![command],
        }
    }

    pub fn push(&mut self, command: AjaxCommand) {
        self.commands.push(command);
    }

    pub fn extend(&mut self, commands: impl IntoIterator<Item = AjaxCommand>) {
        self.commands.extend(commands);
    }

    pub fn commands(&self) -> &[AjaxCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }
}

impl From<Vec<AjaxCommand>> for CommandResponse {
    fn from(commands: Vec<AjaxCommand>) -> Self {
        Self { commands }
    }
}

/// The javascript call that posts a named button back to the serving view.
///
/// Emitted with double quotes; callers embedding the call inside an HTML
/// attribute flip them to single quotes.
pub fn button_javascript(button_name: &str, url: Option<&str>) -> String {
    let mut data = Map::new();
    data.insert("button".into(), Value::String(button_name.to_string()));
    let mut payload = Map::new();
    payload.insert("data".into(), Value::Object(data));
    if let Some(url) = url {
        payload.insert("url".into(), Value::String(url.to_string()));
    }
    format!("menukit.post_button({})", Value::Object(payload))
}

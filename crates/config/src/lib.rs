//! Configuration loading and validation for menukit.
//!
//! Loads settings from a TOML file (path overridable via the
//! `MENUKIT_CONFIG` environment variable) with defaults for every field,
//! so a missing file is not an error.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info};

use menukit_core::{Error, MenuDisplay, Result};

/// The root settings structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuSettings {
    /// Demo/app server binding.
    #[serde(default)]
    pub server: ServerConfig,

    /// Application-wide button display defaults, keyed by the display
    /// text items use to opt in (`display = "edit"` picks up
    /// `[button_defaults.edit]`).
    #[serde(default)]
    pub button_defaults: BTreeMap<String, MenuDisplay>,

    /// css selector that right-click context menus attach to.
    #[serde(default = "default_context_menu_selector")]
    pub context_menu_selector: String,
}

impl Default for MenuSettings {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            button_defaults: BTreeMap::new(),
            context_menu_selector: default_context_menu_selector(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".into()
}
fn default_port() -> u16 {
    8080
}
fn default_context_menu_selector() -> String {
    ".context_menu".into()
}

impl MenuSettings {
    /// Load settings from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| Error::Config {
            message: format!("cannot read {}: {e}", path.display()),
        })?;
        let settings: Self = toml::from_str(&raw).map_err(|e| Error::Config {
            message: format!("invalid settings in {}: {e}", path.display()),
        })?;
        settings.validate()?;
        info!(path = %path.display(), "Settings loaded");
        Ok(settings)
    }

    /// Load from `MENUKIT_CONFIG` if set, else defaults.
    pub fn load_or_default() -> Result<Self> {
        match std::env::var("MENUKIT_CONFIG") {
            Ok(path) => Self::load(Path::new(&path)),
            Err(_) => {
                debug!("MENUKIT_CONFIG unset, using default settings");
                Ok(Self::default())
            }
        }
    }

    fn validate(&self) -> Result<()> {
        if self.context_menu_selector.trim().is_empty() {
            return Err(Error::Config {
                message: "context_menu_selector must not be empty".into(),
            });
        }
        if self.server.host.trim().is_empty() {
            return Err(Error::Config {
                message: "server.host must not be empty".into(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_usable() {
        let settings = MenuSettings::default();
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.context_menu_selector, ".context_menu");
        assert!(settings.button_defaults.is_empty());
    }

    #[test]
    fn loads_button_defaults_from_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[server]
port = 9000

[button_defaults.global_edit]
text = "Edit"
icon = "fas fa-pen"
css_classes = ["btn-success"]
"#
        )
        .unwrap();

        let settings = MenuSettings::load(file.path()).unwrap();
        assert_eq!(settings.server.port, 9000);
        let edit = settings.button_defaults.get("global_edit").unwrap();
        assert_eq!(edit.text, "Edit");
        assert_eq!(edit.icon.as_deref(), Some("fas fa-pen"));
        assert_eq!(edit.css_classes, ["btn-success"]);
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = MenuSettings::load(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn empty_selector_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "context_menu_selector = \"  \"").unwrap();
        let err = MenuSettings::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("context_menu_selector"));
    }
}

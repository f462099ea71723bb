//! Names, selectors, and colors the controller works against.
//!
//! Every field has a default, so a host page can pass a partial JSON object
//! (or nothing) to `init_theme_system`.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::theme::Theme;

/// `localStorage` key holding the explicit preference.
pub const DEFAULT_STORAGE_KEY: &str = "avatar-theme-preference";
/// Attribute set on `<html>`.
pub const DEFAULT_THEME_ATTRIBUTE: &str = "data-theme";
/// Selector for the mobile browser chrome color tag.
pub const DEFAULT_META_SELECTOR: &str = r#"meta[name="theme-color"]"#;
/// Selector for the toggle button carrying the ARIA state.
pub const DEFAULT_TOGGLE_SELECTOR: &str = ".hero__theme-toggle";
/// Name of the `CustomEvent` dispatched on `window`.
pub const DEFAULT_CHANGE_EVENT: &str = "themechange";
/// Media query whose match means the system prefers dark.
pub const DARK_SCHEME_QUERY: &str = "(prefers-color-scheme: dark)";

/// Meta `theme-color` values per theme.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ThemePalette {
    pub dark: String,
    /// Falls back to `dark` when unset.
    pub light: Option<String>,
}

impl Default for ThemePalette {
    fn default() -> Self {
        Self { dark: "#060641".to_owned(), light: Some("#f5f7fa".to_owned()) }
    }
}

impl ThemePalette {
    /// Color for `theme`, falling back to the dark color.
    #[must_use]
    pub fn color_for(&self, theme: Theme) -> &str {
        match theme {
            Theme::Dark => &self.dark,
            Theme::Light => self.light.as_deref().unwrap_or(&self.dark),
        }
    }
}

/// Configuration for one theme controller.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub storage_key: String,
    pub theme_attribute: String,
    pub meta_selector: String,
    pub toggle_selector: String,
    pub change_event: String,
    pub palette: ThemePalette,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_owned(),
            theme_attribute: DEFAULT_THEME_ATTRIBUTE.to_owned(),
            meta_selector: DEFAULT_META_SELECTOR.to_owned(),
            toggle_selector: DEFAULT_TOGGLE_SELECTOR.to_owned(),
            change_event: DEFAULT_CHANGE_EVENT.to_owned(),
            palette: ThemePalette::default(),
        }
    }
}

impl ThemeConfig {
    /// Parse a (possibly partial) JSON object and validate it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::EmptyField`] when a required name is blank.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Default config, or the parsed override when one is given.
    ///
    /// # Errors
    ///
    /// Same as [`ThemeConfig::from_json`].
    pub fn from_optional_json(raw: Option<&str>) -> Result<Self, ConfigError> {
        match raw {
            Some(raw) if !raw.trim().is_empty() => Self::from_json(raw),
            _ => Ok(Self::default()),
        }
    }

    /// Reject blank names that would make the DOM calls meaningless.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyField`] naming the first blank field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("storage_key", &self.storage_key),
            ("theme_attribute", &self.theme_attribute),
            ("change_event", &self.change_event),
            ("palette.dark", &self.palette.dark),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::EmptyField(name));
            }
        }
        Ok(())
    }
}

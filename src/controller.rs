//! Theme state manager.
//!
//! `ThemeController` owns the resolution rules (explicit preference beats the
//! system signal, invalid input is ignored, storage failures degrade to "no
//! preference") and drives every side effect of applying a theme through the
//! [`ports`](crate::ports) traits. It has no browser dependency, so the whole
//! behavior is unit-tested against in-memory fakes.
//!
//! Change notifications are queued rather than delivered inline. The browser
//! shell drains the queue once its borrow of the controller is released, so
//! observers may call back into the controller.

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

use crate::config::ThemeConfig;
use crate::ports::{ColorSchemeSource, DocumentSurface, PreferenceStore};
use crate::theme::{Theme, ThemeChange};

/// Whether an application writes the preference record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Persist {
    Yes,
    No,
}

/// Theme controller generic over its storage, document, and media signal.
pub struct ThemeController<S, D, M> {
    config: ThemeConfig,
    store: S,
    document: D,
    scheme: M,
    outbox: Vec<ThemeChange>,
}

impl<S, D, M> ThemeController<S, D, M>
where
    S: PreferenceStore,
    D: DocumentSurface,
    M: ColorSchemeSource,
{
    #[must_use]
    pub fn new(config: ThemeConfig, store: S, document: D, scheme: M) -> Self {
        Self { config, store, document, scheme, outbox: Vec::new() }
    }

    // --- Accessors ---

    #[must_use]
    pub fn config(&self) -> &ThemeConfig {
        &self.config
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    #[must_use]
    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn scheme_mut(&mut self) -> &mut M {
        &mut self.scheme
    }

    // --- Preference sources ---

    /// Theme the OS/browser currently asks for.
    #[must_use]
    pub fn detect_system_preference(&self) -> Theme {
        Theme::from_prefers_dark(self.scheme.prefers_dark())
    }

    /// The explicit user choice, if one is stored and readable.
    ///
    /// Storage errors and values outside the enum are logged and read as
    /// "no preference".
    #[must_use]
    pub fn read_persisted_preference(&self) -> Option<Theme> {
        let raw = match self.store.get(&self.config.storage_key) {
            Ok(raw) => raw?,
            Err(err) => {
                log::warn!("theme: unable to access storage: {err}");
                return None;
            }
        };
        let theme = Theme::parse(&raw);
        if theme.is_none() {
            log::warn!("theme: ignoring stored preference {raw:?}");
        }
        theme
    }

    /// Store `theme` as the explicit choice. Failures are logged and ignored.
    pub fn write_persisted_preference(&mut self, theme: Theme) {
        if let Err(err) = self.store.set(&self.config.storage_key, theme.as_str()) {
            log::warn!("theme: {err}");
        }
    }

    /// Forget the explicit choice. Failures are logged and ignored.
    pub fn clear_persisted_preference(&mut self) {
        if let Err(err) = self.store.remove(&self.config.storage_key) {
            log::warn!("theme: {err}");
        }
    }

    // --- Apply ---

    /// Apply `theme` to the document and record it as the explicit choice.
    ///
    /// With `suppress_transition`, CSS transitions are off for the attribute
    /// change and come back after a forced layout.
    pub fn apply_theme(&mut self, theme: Theme, suppress_transition: bool) {
        self.render(theme, suppress_transition, Persist::Yes);
    }

    fn render(&mut self, theme: Theme, suppress_transition: bool, persist: Persist) {
        if suppress_transition {
            self.document.disable_transitions();
        }

        self.document.set_root_attribute(&self.config.theme_attribute, theme.as_str());
        self.document
            .set_meta_color(&self.config.meta_selector, self.config.palette.color_for(theme));
        self.document.set_toggle_aria(
            &self.config.toggle_selector,
            theme == Theme::Dark,
            &theme.toggle_label(),
        );

        if persist == Persist::Yes {
            self.write_persisted_preference(theme);
        }

        if suppress_transition {
            self.document.force_layout();
            self.document.restore_transitions();
        }

        log::debug!("theme: applied {theme}");
        self.outbox.push(ThemeChange { theme });
    }

    // --- Lifecycle and actions ---

    /// Resolve and apply the page-load theme without a transition.
    ///
    /// Resolution alone does not create a preference record.
    pub fn initialize(&mut self) -> Theme {
        let theme = self
            .read_persisted_preference()
            .unwrap_or_else(|| self.detect_system_preference());
        self.render(theme, true, Persist::No);
        theme
    }

    /// Flip the theme currently on the document. Anything but `dark` flips to `dark`.
    pub fn toggle(&mut self) -> Theme {
        let next = match self.current_theme() {
            Some(Theme::Dark) => Theme::Light,
            _ => Theme::Dark,
        };
        self.apply_theme(next, false);
        next
    }

    /// React to the system signal changing. Ignored while a preference is stored.
    pub fn on_system_preference_change(&mut self, prefers_dark: bool) -> Option<Theme> {
        if self.read_persisted_preference().is_some() {
            return None;
        }
        let theme = Theme::from_prefers_dark(prefers_dark);
        self.render(theme, false, Persist::No);
        Some(theme)
    }

    /// Apply `raw` if it names a theme; otherwise do nothing.
    pub fn set_theme(&mut self, raw: &str) -> Option<Theme> {
        let theme = Theme::parse(raw)?;
        self.apply_theme(theme, false);
        Some(theme)
    }

    /// Drop the explicit choice and follow the system signal again.
    pub fn reset_to_system_theme(&mut self) -> Theme {
        self.clear_persisted_preference();
        let theme = self.detect_system_preference();
        self.render(theme, false, Persist::No);
        theme
    }

    // --- Queries ---

    /// Raw value of the theme attribute on the document.
    #[must_use]
    pub fn current_theme_attribute(&self) -> Option<String> {
        self.document.root_attribute(&self.config.theme_attribute)
    }

    /// The applied theme, if the attribute holds a valid one.
    #[must_use]
    pub fn current_theme(&self) -> Option<Theme> {
        self.current_theme_attribute().as_deref().and_then(Theme::parse)
    }

    /// Notifications queued since the last drain, oldest first.
    #[must_use]
    pub fn pending_changes(&self) -> &[ThemeChange] {
        &self.outbox
    }

    /// Take all queued notifications.
    pub fn drain_changes(&mut self) -> Vec<ThemeChange> {
        std::mem::take(&mut self.outbox)
    }
}

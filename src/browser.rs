//! Browser bindings for the theme controller.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module is the only place that touches `web_sys`. It adapts
//! `localStorage`, the live document, and the `prefers-color-scheme` media
//! query to the [`ports`](crate::ports) traits, installs the page-lifetime
//! listeners, and exposes the public API to other scripts:
//!
//! - `window.toggleTheme()`
//! - `window.themeSystem.getCurrentTheme() / setTheme(theme) / resetToSystemTheme()`
//!
//! The host page loads the wasm module and calls `init_theme_system()` once,
//! as early as possible so the first paint already carries the theme.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    CustomEvent, CustomEventInit, Document, Element, HtmlElement, KeyboardEvent, MediaQueryList,
    MediaQueryListEvent, Storage, Window,
};

use crate::config::{DARK_SCHEME_QUERY, ThemeConfig};
use crate::controller::ThemeController;
use crate::error::StorageError;
use crate::ports::{ColorSchemeSource, DocumentSurface, PreferenceStore};
use crate::shortcut::{Modifiers, is_toggle_shortcut};
use crate::theme::ThemeChange;

type BrowserController = ThemeController<LocalStore, DomDocument, MediaScheme>;

/// Best-effort text for a thrown JS value.
fn js_error_text(value: &JsValue) -> String {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

fn js_error(message: &str) -> JsValue {
    js_sys::Error::new(message).into()
}

// =============================================================
// localStorage
// =============================================================

/// `window.localStorage`, looked up on every access.
///
/// Access can start failing mid-session (privacy mode, storage cleared by the
/// user), so no handle is cached.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStore;

impl LocalStore {
    fn storage() -> Result<Storage, StorageError> {
        let window =
            web_sys::window().ok_or_else(|| StorageError::Unavailable("no window".to_owned()))?;
        match window.local_storage() {
            Ok(Some(storage)) => Ok(storage),
            Ok(None) => Err(StorageError::Unavailable("localStorage is disabled".to_owned())),
            Err(err) => Err(StorageError::Unavailable(js_error_text(&err))),
        }
    }
}

impl PreferenceStore for LocalStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Self::storage()?
            .get_item(key)
            .map_err(|err| StorageError::Read(js_error_text(&err)))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|err| StorageError::Write(js_error_text(&err)))
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        Self::storage()?
            .remove_item(key)
            .map_err(|err| StorageError::Remove(js_error_text(&err)))
    }
}

// =============================================================
// Document
// =============================================================

/// The live document and its `<html>` element.
pub struct DomDocument {
    document: Document,
    root: Element,
}

impl DomDocument {
    /// `None` when the document has no root element yet.
    #[must_use]
    pub fn new(document: Document) -> Option<Self> {
        let root = document.document_element()?;
        Some(Self { document, root })
    }

    fn find(&self, selector: &str) -> Option<Element> {
        if selector.is_empty() {
            return None;
        }
        match self.document.query_selector(selector) {
            Ok(found) => found,
            Err(err) => {
                log::warn!("theme: bad selector {selector:?}: {}", js_error_text(&err));
                None
            }
        }
    }

    fn root_html(&self) -> Option<&HtmlElement> {
        self.root.dyn_ref::<HtmlElement>()
    }
}

fn set_attribute(element: &Element, name: &str, value: &str) {
    if let Err(err) = element.set_attribute(name, value) {
        log::warn!("theme: failed to set {name}: {}", js_error_text(&err));
    }
}

impl DocumentSurface for DomDocument {
    fn root_attribute(&self, name: &str) -> Option<String> {
        self.root.get_attribute(name)
    }

    fn set_root_attribute(&mut self, name: &str, value: &str) {
        set_attribute(&self.root, name, value);
    }

    fn set_meta_color(&mut self, selector: &str, color: &str) {
        if let Some(meta) = self.find(selector) {
            set_attribute(&meta, "content", color);
        }
    }

    fn set_toggle_aria(&mut self, selector: &str, pressed: bool, label: &str) {
        if let Some(button) = self.find(selector) {
            set_attribute(&button, "aria-pressed", if pressed { "true" } else { "false" });
            set_attribute(&button, "aria-label", label);
        }
    }

    fn disable_transitions(&mut self) {
        if let Some(html) = self.root_html() {
            if let Err(err) = html.style().set_property("transition", "none") {
                log::warn!("theme: failed to disable transitions: {}", js_error_text(&err));
            }
        }
    }

    fn force_layout(&mut self) {
        if let Some(html) = self.root_html() {
            // Reading a layout property flushes pending style changes.
            let height = html.offset_height();
            log::trace!("theme: reflow at height {height}");
        }
    }

    fn restore_transitions(&mut self) {
        if let Some(html) = self.root_html() {
            if let Err(err) = html.style().remove_property("transition") {
                log::warn!("theme: failed to restore transitions: {}", js_error_text(&err));
            }
        }
    }
}

// =============================================================
// prefers-color-scheme
// =============================================================

/// The `(prefers-color-scheme: dark)` media query, if the browser supports it.
pub struct MediaScheme {
    query: Option<MediaQueryList>,
}

impl MediaScheme {
    #[must_use]
    pub fn new(window: &Window) -> Self {
        let query = match window.match_media(DARK_SCHEME_QUERY) {
            Ok(query) => query,
            Err(err) => {
                log::warn!("theme: matchMedia unavailable: {}", js_error_text(&err));
                None
            }
        };
        Self { query }
    }

    #[must_use]
    pub fn query(&self) -> Option<&MediaQueryList> {
        self.query.as_ref()
    }
}

impl ColorSchemeSource for MediaScheme {
    fn prefers_dark(&self) -> bool {
        self.query.as_ref().is_some_and(MediaQueryList::matches)
    }
}

/// `MediaQueryList.addListener`, for browsers without `EventTarget` media queries.
#[allow(deprecated)]
fn add_legacy_listener(
    query: &MediaQueryList,
    callback: &Closure<dyn FnMut(MediaQueryListEvent)>,
) -> Result<(), JsValue> {
    query.add_listener_with_opt_callback(Some(callback.as_ref().unchecked_ref()))
}

// =============================================================
// Public handle
// =============================================================

struct Shared {
    window: Window,
    change_event: String,
    controller: RefCell<BrowserController>,
}

/// Handle to the page's theme controller, exposed to JS as `window.themeSystem`.
#[wasm_bindgen]
#[derive(Clone)]
pub struct ThemeSystem {
    inner: Rc<Shared>,
}

#[wasm_bindgen]
impl ThemeSystem {
    /// Flip between dark and light.
    pub fn toggle(&self) {
        self.with_controller(ThemeController::toggle);
    }

    /// Current value of the theme attribute.
    #[wasm_bindgen(js_name = getCurrentTheme)]
    pub fn get_current_theme(&self) -> Option<String> {
        match self.inner.controller.try_borrow() {
            Ok(controller) => controller.current_theme_attribute(),
            Err(_) => {
                log::warn!("theme: controller busy, current theme unavailable");
                None
            }
        }
    }

    /// Apply `theme` if it is `"dark"` or `"light"`; ignore anything else.
    #[wasm_bindgen(js_name = setTheme)]
    pub fn set_theme(&self, theme: &str) {
        self.with_controller(|controller| controller.set_theme(theme));
    }

    /// Forget the stored choice and follow the system preference.
    #[wasm_bindgen(js_name = resetToSystemTheme)]
    pub fn reset_to_system_theme(&self) {
        self.with_controller(ThemeController::reset_to_system_theme);
    }
}

impl ThemeSystem {
    fn new(window: Window, controller: BrowserController) -> Self {
        let change_event = controller.config().change_event.clone();
        Self {
            inner: Rc::new(Shared { window, change_event, controller: RefCell::new(controller) }),
        }
    }

    /// Run `action`, then dispatch the notifications it queued.
    ///
    /// Dispatch happens after the borrow is released so `themechange`
    /// listeners can call back into the API.
    fn with_controller<R>(&self, action: impl FnOnce(&mut BrowserController) -> R) -> Option<R> {
        let (result, changes) = {
            let Ok(mut controller) = self.inner.controller.try_borrow_mut() else {
                log::warn!("theme: ignoring re-entrant theme update");
                return None;
            };
            let result = action(&mut controller);
            (result, controller.drain_changes())
        };
        for change in changes {
            self.dispatch_change(change);
        }
        Some(result)
    }

    fn dispatch_change(&self, change: ThemeChange) {
        let detail = match serde_json::to_string(&change)
            .map_err(|err| err.to_string())
            .and_then(|json| js_sys::JSON::parse(&json).map_err(|err| js_error_text(&err)))
        {
            Ok(detail) => detail,
            Err(err) => {
                log::warn!("theme: failed to build {} detail: {err}", self.inner.change_event);
                return;
            }
        };

        let init = CustomEventInit::new();
        init.set_detail(&detail);
        let event = match CustomEvent::new_with_event_init_dict(&self.inner.change_event, &init) {
            Ok(event) => event,
            Err(err) => {
                log::warn!("theme: failed to create {}: {}", self.inner.change_event, js_error_text(&err));
                return;
            }
        };
        if let Err(err) = self.inner.window.dispatch_event(&event) {
            log::warn!("theme: failed to dispatch {}: {}", self.inner.change_event, js_error_text(&err));
        }
    }

    /// Follow system preference changes for the page lifetime.
    fn watch_system_theme(&self, query: &MediaQueryList) {
        let system = self.clone();
        let on_change = Closure::wrap(Box::new(move |ev: MediaQueryListEvent| {
            let prefers_dark = ev.matches();
            system.with_controller(|controller| controller.on_system_preference_change(prefers_dark));
        }) as Box<dyn FnMut(MediaQueryListEvent)>);

        if let Err(err) = query.add_event_listener_with_callback("change", on_change.as_ref().unchecked_ref()) {
            log::debug!("theme: addEventListener on media query failed: {}", js_error_text(&err));
            if let Err(err) = add_legacy_listener(query, &on_change) {
                log::warn!("theme: cannot watch system theme: {}", js_error_text(&err));
                return;
            }
        }
        on_change.forget();
    }

    /// Toggle on Ctrl/Cmd + Shift + D.
    fn watch_keyboard(&self, document: &Document) -> Result<(), JsValue> {
        let system = self.clone();
        let on_key_down = Closure::wrap(Box::new(move |ev: KeyboardEvent| {
            let modifiers = Modifiers::new(ev.shift_key(), ev.ctrl_key(), ev.alt_key(), ev.meta_key());
            if is_toggle_shortcut(&ev.key(), modifiers) {
                ev.prevent_default();
                system.toggle();
            }
        }) as Box<dyn FnMut(KeyboardEvent)>);

        document.add_event_listener_with_callback("keydown", on_key_down.as_ref().unchecked_ref())?;
        on_key_down.forget();
        Ok(())
    }

    /// Assign `window.toggleTheme` and `window.themeSystem`.
    fn expose_globals(&self) -> Result<(), JsValue> {
        let window = &self.inner.window;

        let system = self.clone();
        let toggle = Closure::wrap(Box::new(move || system.toggle()) as Box<dyn FnMut()>);
        js_sys::Reflect::set(window, &JsValue::from_str("toggleTheme"), toggle.as_ref())?;
        toggle.forget();

        js_sys::Reflect::set(window, &JsValue::from_str("themeSystem"), &JsValue::from(self.clone()))?;
        Ok(())
    }
}

// =============================================================
// Entry points
// =============================================================

/// Module start: panic hook and console logging.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_ok() {
        log::debug!("theme: console logger installed");
    }
}

/// Apply the initial theme and install listeners and globals.
///
/// `config_json` optionally overrides [`ThemeConfig`] fields, e.g.
/// `{"storage_key": "site-theme"}`. Call once per page.
///
/// # Errors
///
/// Throws when the config is invalid, when there is no window or document,
/// or when the keydown listener or globals cannot be installed.
#[wasm_bindgen]
pub fn init_theme_system(config_json: Option<String>) -> Result<ThemeSystem, JsValue> {
    let config = ThemeConfig::from_optional_json(config_json.as_deref())
        .map_err(|err| js_error(&err.to_string()))?;
    let window = web_sys::window().ok_or_else(|| js_error("theme: no window"))?;
    let document = window.document().ok_or_else(|| js_error("theme: no document"))?;
    let dom = DomDocument::new(document.clone()).ok_or_else(|| js_error("theme: no root element"))?;
    let scheme = MediaScheme::new(&window);
    let query = scheme.query().cloned();

    let system = ThemeSystem::new(window, ThemeController::new(config, LocalStore, dom, scheme));
    if let Some(theme) = system.with_controller(ThemeController::initialize) {
        log::info!("theme: initialized as {theme}");
    }
    if let Some(query) = query {
        system.watch_system_theme(&query);
    }
    system.watch_keyboard(&document)?;
    system.expose_globals()?;
    Ok(system)
}

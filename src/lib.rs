//! Dark/light theme controller for the browser.
//!
//! This crate is compiled to WebAssembly and loaded by the page's bootstrap
//! script. It resolves the initial theme (stored user choice, else the system
//! `prefers-color-scheme` signal), writes it to `<html data-theme="…">`, keeps
//! the `theme-color` meta tag and the toggle button's ARIA state in sync, and
//! broadcasts a `themechange` event on every change.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`controller`] | Browser-independent [`controller::ThemeController`] |
//! | [`ports`] | Storage, document, and media-signal traits the controller drives |
//! | [`browser`] | web-sys implementations of the ports and the JS-facing API |
//! | [`theme`] | The [`theme::Theme`] enum and change payload |
//! | [`config`] | Storage key, attribute, selectors, and palette |
//! | [`shortcut`] | Ctrl/Cmd + Shift + D detection |
//! | [`error`] | Storage and config errors |

pub mod browser;
pub mod config;
pub mod controller;
pub mod error;
pub mod ports;
pub mod shortcut;
pub mod theme;

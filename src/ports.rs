//! Seams between the controller and the host environment.
//!
//! The browser implementations live in [`crate::browser`]; tests substitute
//! in-memory fakes.

use crate::error::StorageError;

/// Durable key-value storage scoped to the page origin.
pub trait PreferenceStore {
    /// Read `key`. `Ok(None)` means the key is absent.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] when storage cannot be accessed.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] when the write is refused.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`. Deleting an absent key succeeds.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] when storage cannot be accessed.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// The parts of the document the controller reads and writes.
///
/// Missing optional targets (meta tag, toggle button) are silent no-ops.
pub trait DocumentSurface {
    /// Current value of `name` on the root element.
    fn root_attribute(&self, name: &str) -> Option<String>;

    /// Set `name` on the root element.
    fn set_root_attribute(&mut self, name: &str, value: &str);

    /// Set the `content` of the first element matching `selector`.
    fn set_meta_color(&mut self, selector: &str, color: &str);

    /// Set `aria-pressed` and `aria-label` on the first element matching `selector`.
    fn set_toggle_aria(&mut self, selector: &str, pressed: bool, label: &str);

    /// Turn off CSS transitions on the root element.
    fn disable_transitions(&mut self);

    /// Force a synchronous layout so style changes are not batched together.
    fn force_layout(&mut self);

    /// Restore the root element's transition style.
    fn restore_transitions(&mut self);
}

/// The OS/browser color-scheme signal.
pub trait ColorSchemeSource {
    /// Whether `(prefers-color-scheme: dark)` currently matches.
    fn prefers_dark(&self) -> bool;
}

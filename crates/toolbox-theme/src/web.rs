//! Browser bindings (feature `web`, wasm32 only).
//!
//! - [`WebStorage`]: `window.localStorage` as a [`KeyValueStore`]
//! - [`DocumentRoot`]: `document.documentElement` as a [`RootElement`]
//! - [`MediaQueryWatch`]: forwards `(prefers-color-scheme: dark)` changes
//!   into a shared [`ThemeContext`]
//!
//! ```rust,ignore
//! let context = Rc::new(RefCell::new(
//!     ThemeContext::builder()
//!         .store(WebStorage)
//!         .appearance(MediaQueryWatch::appearance())
//!         .build()?,
//! ));
//! if let Some(root) = DocumentRoot::current() {
//!     context.borrow_mut().attach_root(root);
//! }
//! let _watch = MediaQueryWatch::attach(Rc::clone(&context));
//! ```

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tracing::debug;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{HtmlElement, MediaQueryList, MediaQueryListEvent, Storage};

use crate::apply::RootElement;
use crate::context::ThemeContext;
use crate::error::StoreError;
use crate::store::KeyValueStore;
use crate::theme::{ColorMode, SystemAppearance};

/// Media query reporting the system dark-mode signal.
pub const DARK_MODE_QUERY: &str = "(prefers-color-scheme: dark)";

fn js_message(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

/// The browser's `localStorage`.
///
/// Looked up on every access, so storage disabled mid-session surfaces as
/// an error on the next call.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebStorage;

impl WebStorage {
    fn storage() -> Result<Storage, StoreError> {
        let window = web_sys::window()
            .ok_or_else(|| StoreError::Unavailable("no window".to_string()))?;
        window
            .local_storage()
            .map_err(|err| StoreError::Unavailable(js_message(&err)))?
            .ok_or_else(|| StoreError::Unavailable("localStorage is disabled".to_string()))
    }
}

impl KeyValueStore for WebStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Self::storage()?
            .get_item(key)
            .map_err(|err| StoreError::Unavailable(js_message(&err)))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|err| StoreError::Rejected(js_message(&err)))
    }
}

/// The document's root element.
#[derive(Debug, Clone)]
pub struct DocumentRoot {
    element: HtmlElement,
}

impl DocumentRoot {
    /// `document.documentElement` of the current window.
    pub fn current() -> Option<Self> {
        let element = web_sys::window()?
            .document()?
            .document_element()?
            .dyn_into::<HtmlElement>()
            .ok()?;
        Some(Self { element })
    }
}

fn traced<T>(op: &'static str, name: &str, result: Result<T, JsValue>) {
    if let Err(err) = result {
        debug!(op, name, error = %js_message(&err), "document root update failed");
    }
}

impl RootElement for DocumentRoot {
    fn set_style_property(&mut self, name: &str, value: &str) {
        traced("style", name, self.element.style().set_property(name, value));
    }

    fn set_attribute(&mut self, name: &str, value: &str) {
        traced("attribute", name, self.element.set_attribute(name, value));
    }

    fn set_class(&mut self, name: &str, present: bool) {
        traced(
            "class",
            name,
            self.element.class_list().toggle_with_force(name, present),
        );
    }
}

fn dark_mode_query() -> Option<MediaQueryList> {
    web_sys::window()?.match_media(DARK_MODE_QUERY).ok()?
}

fn query_detector() -> ColorMode {
    match dark_mode_query() {
        Some(query) if query.matches() => ColorMode::Dark,
        _ => ColorMode::Light,
    }
}

/// Subscription to system dark-mode changes.
///
/// Holds the context weakly; dropping the watch removes the listener.
pub struct MediaQueryWatch {
    query: MediaQueryList,
    listener: Closure<dyn FnMut(MediaQueryListEvent)>,
}

impl MediaQueryWatch {
    /// A [`SystemAppearance`] reading the media query.
    pub fn appearance() -> SystemAppearance {
        SystemAppearance::with_detector(query_detector)
    }

    /// Starts forwarding change events to `context`.
    ///
    /// Returns `None` outside a window or when the query is unsupported.
    pub fn attach(context: Rc<RefCell<ThemeContext>>) -> Option<Self> {
        let query = dark_mode_query()?;
        let target: Weak<RefCell<ThemeContext>> = Rc::downgrade(&context);
        let listener = Closure::<dyn FnMut(MediaQueryListEvent)>::new(
            move |event: MediaQueryListEvent| {
                if let Some(context) = target.upgrade() {
                    context.borrow_mut().set_system_dark(event.matches());
                }
            },
        );
        query
            .add_event_listener_with_callback("change", listener.as_ref().unchecked_ref())
            .ok()?;
        context.borrow_mut().set_system_dark(query.matches());
        Some(Self { query, listener })
    }
}

impl Drop for MediaQueryWatch {
    fn drop(&mut self) {
        traced(
            "listener",
            "change",
            self.query
                .remove_event_listener_with_callback("change", self.listener.as_ref().unchecked_ref()),
        );
    }
}

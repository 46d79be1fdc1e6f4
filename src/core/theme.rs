//! Theme preference store.
//!
//! Initial theme resolution: persisted preference, then the OS dark-mode
//! hint, then light. Every change is persisted and reflected onto the
//! document immediately.

use std::sync::Arc;

use crate::config::theme;
use crate::core::store::{Store, Subscription};
use crate::models::Theme;
use crate::utils::dom;

/// Where the theme store reads hints from and writes its value to.
pub trait ThemeEnvironment: Send + Sync + 'static {
    /// Previously persisted preference, if any.
    fn saved(&self) -> Option<Theme>;
    /// Whether the OS asks for a dark color scheme.
    fn prefers_dark(&self) -> bool;
    /// Persist the theme and reflect it for styling.
    fn apply(&self, theme: Theme);
}

/// localStorage + `matchMedia` + `<html data-theme>`.
///
/// Storage and DOM failures are ignored.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserTheme;

impl ThemeEnvironment for BrowserTheme {
    fn saved(&self) -> Option<Theme> {
        let storage = dom::local_storage()?;
        storage.get_item(theme::STORAGE_KEY).ok()??.parse().ok()
    }

    fn prefers_dark(&self) -> bool {
        dom::media_matches(theme::DARK_SCHEME_QUERY)
    }

    fn apply(&self, value: Theme) {
        dom::set_root_attribute(theme::DOCUMENT_ATTRIBUTE, value.as_str());
        if let Some(storage) = dom::local_storage() {
            let _ = storage.set_item(theme::STORAGE_KEY, value.as_str());
        }
    }
}

/// Light/dark state machine.
pub struct ThemeStore<E> {
    state: Store<Theme>,
    env: Arc<E>,
}

impl<E> Clone for ThemeStore<E> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            env: Arc::clone(&self.env),
        }
    }
}

impl<E: ThemeEnvironment> ThemeStore<E> {
    /// Create a store in the light state. Nothing is applied until [`init`](Self::init).
    pub fn new(env: E) -> Self {
        Self {
            state: Store::new(Theme::Light),
            env: Arc::new(env),
        }
    }

    /// Resolve the initial theme and apply it.
    pub fn init(&self) {
        let theme = self.initial_theme();
        log::debug!("initial theme: {}", theme);
        self.set_theme(theme);
    }

    fn initial_theme(&self) -> Theme {
        if let Some(saved) = self.env.saved() {
            return saved;
        }
        if self.env.prefers_dark() {
            return Theme::Dark;
        }
        Theme::Light
    }

    pub fn set_theme(&self, theme: Theme) {
        self.state.set(theme);
        self.env.apply(theme);
    }

    pub fn toggle(&self) {
        self.set_theme(self.get().toggled());
    }

    pub fn get(&self) -> Theme {
        self.state.get()
    }

    pub fn store(&self) -> &Store<Theme> {
        &self.state
    }

    #[must_use = "dropping the subscription unsubscribes"]
    pub fn subscribe(&self, f: impl Fn(&Theme) + Send + Sync + 'static) -> Subscription {
        self.state.subscribe(f)
    }
}

//! Root application module.
//!
//! Contains the App component, the AppContext holding the page-lifetime
//! singletons, and the bridge from [`Store`]s into Leptos signals.

use leptos::prelude::*;

use crate::components::{AppRouter, Header};
use crate::config::{API_BASE, cache::MODEL_CACHE_NAME};
use crate::core::{ApiClient, BrowserTheme, ModelCache, Router, Store, ThemeStore, ViewerStore};
use crate::utils::{BrowserTransport, CacheStorageStore, SessionCache};

stylance::import_crate_style!(css, "src/components/shell.module.css");

// ============================================================================
// AppContext
// ============================================================================

/// Application-wide services, constructed once per page.
///
/// Provided at the root of the component tree and available anywhere through
/// `use_context::<AppContext>()`. Every field is a cheap-clone handle onto
/// shared state.
#[derive(Clone)]
pub struct AppContext {
    /// Coin catalog client with session query caching.
    pub api: ApiClient<BrowserTransport>,
    /// Cache Storage for downloaded models.
    pub models: ModelCache<CacheStorageStore>,
    /// Hash router.
    pub router: Router,
    /// Light/dark preference.
    pub theme: ThemeStore<BrowserTheme>,
    /// 3D viewer controls.
    pub viewer: ViewerStore,
}

impl AppContext {
    /// Creates the services without touching the page.
    pub fn new() -> Self {
        Self {
            api: ApiClient::new(API_BASE, BrowserTransport).with_cache(SessionCache),
            models: ModelCache::new(CacheStorageStore::new(MODEL_CACHE_NAME)),
            router: Router::new(),
            theme: ThemeStore::new(BrowserTheme),
            viewer: ViewerStore::new(),
        }
    }

    /// Apply the initial theme and attach the router to the page.
    pub fn init(&self) {
        self.theme.init();
        self.router.init();
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Mirror a [`Store`] into a read-only signal owned by the current scope.
///
/// The store subscription is dropped when the owning scope is cleaned up.
pub fn use_store<T>(store: &Store<T>) -> ReadSignal<T>
where
    T: Clone + Send + Sync + 'static,
{
    let (value, set_value) = signal(store.get());
    let subscription = store.subscribe(move |next| {
        let _ = set_value.try_set(next.clone());
    });
    on_cleanup(move || subscription.unsubscribe());
    value
}

/// Root application component.
#[component]
pub fn App() -> impl IntoView {
    let ctx = AppContext::new();
    ctx.init();
    provide_context(ctx);

    view! {
        <div class=css::shell>
            <Header />
            <main class=css::page>
                <AppRouter />
            </main>
        </div>
    }
}

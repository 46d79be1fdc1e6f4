//! Hash router.
//!
//! The URL fragment is the source of truth: the current [`Route`] is re-parsed
//! on every `hashchange`, and same-origin anchor clicks are rewritten into
//! fragment navigations so they never trigger a full page load.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::Closure;
use web_sys::{Element, HtmlAnchorElement, MouseEvent};

use crate::config::routes::ROOT;
use crate::core::store::{Store, Subscription};
use crate::models::Route;
use crate::utils::dom;

/// What the click interceptor does with an anchor's `href`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LinkAction {
    /// Prevent the default and navigate to this fragment path.
    Navigate(String),
    /// Leave the click to the browser.
    PassThrough,
}

/// Decide how a clicked link on a page at `origin` is handled.
///
/// - off-origin links pass through;
/// - links that already carry a fragment pass through;
/// - any other same-origin link becomes a fragment navigation to its
///   pathname (`/` for the site root).
pub fn classify_link(href: &str, origin: &str) -> LinkAction {
    let Some(rest) = href.strip_prefix(origin) else {
        return LinkAction::PassThrough;
    };
    // `https://a.b` must not claim `https://a.bc/...`.
    if !(rest.is_empty() || rest.starts_with(['/', '?', '#'])) {
        return LinkAction::PassThrough;
    }

    let (before_fragment, fragment) = rest.split_once('#').unwrap_or((rest, ""));
    if !fragment.is_empty() {
        return LinkAction::PassThrough;
    }

    let pathname = before_fragment.split('?').next().unwrap_or_default();
    if pathname.is_empty() {
        return LinkAction::Navigate(ROOT.to_string());
    }
    LinkAction::Navigate(pathname.to_string())
}

/// Current-route holder plus navigation.
#[derive(Clone, Default)]
pub struct Router {
    route: Store<Route>,
}

impl Router {
    /// Router at `/`. Call [`init`](Self::init) to attach it to the page.
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish the current hash and start listening for navigation.
    ///
    /// Listeners stay installed for the page lifetime.
    pub fn init(&self) {
        self.handle_hash(&dom::get_hash());

        let Some(window) = dom::window() else {
            return;
        };

        let router = self.clone();
        let on_hash_change = Closure::<dyn FnMut()>::new(move || {
            router.handle_hash(&dom::get_hash());
        });
        let _ = window
            .add_event_listener_with_callback("hashchange", on_hash_change.as_ref().unchecked_ref());
        on_hash_change.forget();

        let Some(document) = dom::document() else {
            return;
        };

        let router = self.clone();
        let on_click = Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
            router.intercept_click(&event);
        });
        let _ = document.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref());
        on_click.forget();
    }

    /// Re-parse a `location.hash` value and publish it.
    pub fn handle_hash(&self, hash: &str) {
        let route = Route::from_hash(hash);
        log::debug!("route: {:?}", route);
        self.route.set(route);
    }

    fn intercept_click(&self, event: &MouseEvent) {
        let Some(anchor) = event
            .target()
            .and_then(|target| target.dyn_into::<Element>().ok())
            .and_then(|element| element.closest("a").ok().flatten())
            .and_then(|element| element.dyn_into::<HtmlAnchorElement>().ok())
        else {
            return;
        };
        let Some(origin) = dom::origin() else {
            return;
        };

        if let LinkAction::Navigate(path) = classify_link(&anchor.href(), &origin) {
            event.prevent_default();
            self.navigate(&path);
        }
    }

    /// Set `location.hash`; the resulting `hashchange` updates the route.
    pub fn navigate(&self, path: &str) {
        dom::set_hash(path);
    }

    pub fn current(&self) -> Route {
        self.route.get()
    }

    /// The route pattern alone, republished only when it changes.
    pub fn current_path(&self) -> Store<String> {
        self.route.derive(|route| route.path.clone())
    }

    pub fn store(&self) -> &Store<Route> {
        &self.route
    }

    #[must_use = "dropping the subscription unsubscribes"]
    pub fn subscribe(&self, f: impl Fn(&Route) + Send + Sync + 'static) -> Subscription {
        self.route.subscribe(f)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    const ORIGIN: &str = "https://coins.example";

    fn navigate(path: &str) -> LinkAction {
        LinkAction::Navigate(path.to_string())
    }

    #[test]
    fn test_same_origin_paths_become_fragment_routes() {
        assert_eq!(
            classify_link("https://coins.example/coin/abc", ORIGIN),
            navigate("/coin/abc")
        );
        assert_eq!(
            classify_link("https://coins.example/upload?draft=1", ORIGIN),
            navigate("/upload")
        );
    }

    #[test]
    fn test_root_link_navigates_to_root() {
        assert_eq!(classify_link("https://coins.example/", ORIGIN), navigate("/"));
        assert_eq!(classify_link("https://coins.example", ORIGIN), navigate("/"));
        // An empty fragment is no fragment.
        assert_eq!(classify_link("https://coins.example/#", ORIGIN), navigate("/"));
    }

    #[test]
    fn test_fragment_links_pass_through() {
        assert_eq!(
            classify_link("https://coins.example/#/coin/abc", ORIGIN),
            LinkAction::PassThrough
        );
        assert_eq!(
            classify_link("https://coins.example/about#team", ORIGIN),
            LinkAction::PassThrough
        );
    }

    #[test]
    fn test_off_origin_links_pass_through() {
        assert_eq!(
            classify_link("https://museum.example/coin/abc", ORIGIN),
            LinkAction::PassThrough
        );
        assert_eq!(
            classify_link("https://coins.example.org/coin/abc", ORIGIN),
            LinkAction::PassThrough
        );
        assert_eq!(classify_link("mailto:curator@coins.example", ORIGIN), LinkAction::PassThrough);
    }

    #[test]
    fn test_handle_hash_publishes_route() {
        let router = Router::new();
        assert_eq!(router.current(), Route::root());

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let _sub = router.subscribe(move |r| sink.lock().unwrap().push(r.clone()));

        router.handle_hash("#/coin/sestertius/7");
        router.handle_hash("");

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 3);
        assert_eq!(seen[1].path, "/coin/:id");
        assert_eq!(seen[1].param("id"), Some("sestertius/7"));
        assert_eq!(seen[2], Route::root());
    }

    #[test]
    fn test_current_path_follows_route() {
        let router = Router::new();
        let path = router.current_path();
        assert_eq!(path.get(), "/");

        router.handle_hash("#/coin/a");
        assert_eq!(path.get(), "/coin/:id");
        router.handle_hash("#/upload");
        assert_eq!(path.get(), "/upload");
    }

    #[test]
    fn test_current_path_handles_do_not_accumulate() {
        let router = Router::new();
        for _ in 0..5 {
            assert_eq!(router.current_path().get(), "/");
        }
        router.handle_hash("#/upload");
        assert_eq!(router.store().subscriber_count(), 0);
    }
}

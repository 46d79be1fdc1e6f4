//! Application router component.
//!
//! Renders the page for the current fragment route. The route itself lives in
//! the [`Router`](crate::core::Router) store; this component only mirrors it.
//!
//! - `#/` → coin catalog
//! - `#/coin/<id>` → coin detail
//! - `#/upload` → upload form
//! - anything else → not found

use leptos::prelude::*;

use super::coin_detail::CoinDetail;
use super::coin_list::CoinList;
use super::upload::UploadForm;
use crate::app::{AppContext, use_store};
use crate::config::routes::{COIN_PATTERN, ROOT, UPLOAD};
use crate::models::Route;

stylance::import_crate_style!(css, "src/components/router.module.css");

/// Main application router.
#[component]
pub fn AppRouter() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let route_signal = use_store(ctx.router.store());

    // Only re-render when the parsed route actually changes.
    let route = Memo::new(move |_| route_signal.get());

    move || {
        let route = route.get();
        match route.path.as_str() {
            ROOT => view! { <CoinList /> }.into_any(),
            COIN_PATTERN => {
                let id = route.coin_id().unwrap_or_default().to_string();
                view! { <CoinDetail id=id /> }.into_any()
            }
            UPLOAD => view! { <UploadForm /> }.into_any(),
            other => view! { <NotFound path=other.to_string() /> }.into_any(),
        }
    }
}

#[component]
fn NotFound(path: String) -> impl IntoView {
    view! {
        <section>
            <h2>"Page not found"</h2>
            <p class=css::muted>"Nothing lives at " <code>{path}</code> "."</p>
            <a href=Route::root().href()>"Back to the collection"</a>
        </section>
    }
}

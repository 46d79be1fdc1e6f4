//! Title bar with navigation links and the theme toggle.

use leptos::prelude::*;

use crate::app::{AppContext, use_store};
use crate::config::{APP_NAME, routes::UPLOAD};
use crate::models::{Route, Theme};

stylance::import_crate_style!(css, "src/components/header.module.css");

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header class=css::header>
            <a class=css::brand href=Route::root().href()>{APP_NAME}</a>
            <nav class=css::nav>
                <a href=Route::root().href()>"Collection"</a>
                <a href=Route::literal(UPLOAD).href()>"Upload"</a>
                <ThemeToggle />
            </nav>
        </header>
    }
}

/// Button flipping between light and dark.
#[component]
fn ThemeToggle() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let theme = use_store(ctx.theme.store());

    let store = ctx.theme.clone();
    let toggle = move |_: leptos::ev::MouseEvent| store.toggle();

    let title = Signal::derive(move || format!("Switch to {} theme", theme.get().toggled()));

    view! {
        <button class=css::themeToggle on:click=toggle title=title>
            {move || match theme.get() {
                Theme::Light => "Dark",
                Theme::Dark => "Light",
            }}
        </button>
    }
}

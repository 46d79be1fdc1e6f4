//! Coin detail page: metadata, model download, and viewer controls.
//!
//! The model is read from the Cache Storage first and only downloaded on a
//! miss. Load state is published through the viewer store so any viewer
//! widget can show progress.

use leptos::prelude::*;

use crate::app::{AppContext, use_store};
use crate::models::{Coin, EnvironmentPreset, Route};

stylance::import_crate_style!(css, "src/components/coin_detail.module.css");

#[component]
pub fn CoinDetail(id: String) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let api = ctx.api.clone();
    let coin = LocalResource::new(move || {
        let api = api.clone();
        let id = id.clone();
        async move { api.fetch_coin_cached(&id).await }
    });

    view! {
        <section>
            <a href=Route::root().href()>"← Collection"</a>
            <Suspense fallback=|| view! { <p class=css::muted>"Loading coin..."</p> }>
                {move || Suspend::new(async move {
                    match coin.await {
                        Ok(coin) => {
                            let model_url = coin.model_url.clone();
                            view! {
                                <CoinInfo coin=coin />
                                <ModelPanel url=model_url />
                            }
                            .into_any()
                        }
                        Err(e) => view! { <p class=css::error>{e.to_string()}</p> }.into_any(),
                    }
                })}
            </Suspense>
        </section>
    }
}

#[component]
fn CoinInfo(coin: Coin) -> impl IntoView {
    let rows: Vec<(&'static str, String)> = [
        ("Year", coin.year),
        ("Mint", coin.mint),
        ("Ruler", coin.ruler),
        ("Denomination", coin.denomination),
        ("Metal", coin.metal),
        ("Weight", coin.weight_grams.map(|g| format!("{} g", g))),
        ("Diameter", coin.diameter_mm.map(|d| format!("{} mm", d))),
        ("Grade", coin.grade),
        ("Reference", coin.catalog_reference),
        ("Obverse", coin.obverse_description),
        ("Obverse legend", coin.obverse_legend),
        ("Reverse", coin.reverse_description),
        ("Reverse legend", coin.reverse_legend),
    ]
    .into_iter()
    .filter_map(|(label, value)| value.map(|v| (label, v)))
    .collect();

    view! {
        <h2>{coin.name}</h2>
        <p>{coin.description}</p>
        <dl class=css::details>
            {rows
                .into_iter()
                .map(|(label, value)| view! { <dt>{label}</dt> <dd>{value}</dd> })
                .collect_view()}
        </dl>
    }
}

/// Fetches the binary model (cache-first) and hosts the viewer controls.
#[component]
fn ModelPanel(url: String) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let viewer = use_store(ctx.viewer.store());

    let loader = ctx.clone();
    let model = LocalResource::new(move || {
        let ctx = loader.clone();
        let url = url.clone();
        async move {
            ctx.viewer.set_model_loading(true, 0.0);
            let result = ctx
                .models
                .load_model(&url, || ctx.api.fetch_model(&url))
                .await;
            let progress = if result.is_ok() { 100.0 } else { 0.0 };
            ctx.viewer.set_model_loading(false, progress);
            result.map(|bytes| bytes.len())
        }
    });

    view! {
        <div>
            <Show when=move || viewer.with(|s| s.model_loading)>
                <progress max="100" value=move || viewer.with(|s| s.model_progress.to_string())></progress>
            </Show>
            <Suspense fallback=|| view! { <p class=css::muted>"Loading model..."</p> }>
                {move || Suspend::new(async move {
                    match model.await {
                        Ok(size) => view! {
                            <p class=css::muted>{format!("Model ready ({} KB)", size.div_ceil(1024))}</p>
                        }
                        .into_any(),
                        Err(e) => view! { <p class=css::error>{e.to_string()}</p> }.into_any(),
                    }
                })}
            </Suspense>
            <ViewerControls />
        </div>
    }
}

#[component]
fn ViewerControls() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let state = use_store(ctx.viewer.store());
    let viewer = ctx.viewer;

    let toggle_auto_rotate = {
        let viewer = viewer.clone();
        move |_: leptos::ev::Event| viewer.toggle_auto_rotate()
    };
    let toggle_grid = {
        let viewer = viewer.clone();
        move |_: leptos::ev::Event| viewer.toggle_grid()
    };
    let toggle_stats = {
        let viewer = viewer.clone();
        move |_: leptos::ev::Event| viewer.toggle_stats()
    };
    let rotate_light = {
        let viewer = viewer.clone();
        move |ev: leptos::ev::Event| {
            if let Ok(rotation) = event_target_value(&ev).parse::<f64>() {
                viewer.set_light_rotation(rotation);
            }
        }
    };
    let choose_environment = {
        let viewer = viewer.clone();
        move |ev: leptos::ev::Event| {
            if let Ok(preset) = event_target_value(&ev).parse::<EnvironmentPreset>() {
                viewer.set_environment(preset);
            }
        }
    };
    let reset = move |_: leptos::ev::MouseEvent| viewer.reset();

    view! {
        <div class=css::controls>
            <label>
                <input
                    type="checkbox"
                    prop:checked=move || state.with(|s| s.auto_rotate)
                    on:change=toggle_auto_rotate
                />
                " Auto-rotate"
            </label>
            <label>
                <input
                    type="checkbox"
                    prop:checked=move || state.with(|s| s.show_grid)
                    on:change=toggle_grid
                />
                " Grid"
            </label>
            <label>
                <input
                    type="checkbox"
                    prop:checked=move || state.with(|s| s.show_stats)
                    on:change=toggle_stats
                />
                " Stats"
            </label>
            <label>
                "Light "
                <input
                    type="range"
                    min="0"
                    max="360"
                    prop:value=move || state.with(|s| s.light_rotation.to_string())
                    on:input=rotate_light
                />
            </label>
            <select
                prop:value=move || state.with(|s| s.environment_preset.as_str())
                on:change=choose_environment
            >
                {EnvironmentPreset::ALL
                    .into_iter()
                    .map(|preset| view! { <option value=preset.as_str()>{preset.as_str()}</option> })
                    .collect_view()}
            </select>
            <button on:click=reset>"Reset view"</button>
        </div>
    }
}

//! Catalog overview.

use leptos::prelude::*;

use crate::app::AppContext;
use crate::config::routes::UPLOAD;
use crate::models::{Coin, Route};

stylance::import_crate_style!(css, "src/components/coin_list.module.css");

/// Grid of every coin in the catalog.
#[component]
pub fn CoinList() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let api = ctx.api.clone();
    let coins = LocalResource::new(move || {
        let api = api.clone();
        async move { api.fetch_coins_cached().await }
    });

    view! {
        <section>
            <h2>"Collection"</h2>
            <Suspense fallback=|| view! { <p class=css::muted>"Loading coins..."</p> }>
                {move || Suspend::new(async move {
                    match coins.await {
                        Ok(list) if list.is_empty() => view! {
                            <p class=css::muted>
                                "No coins yet. "
                                <a href=Route::literal(UPLOAD).href()>"Upload the first one"</a>
                            </p>
                        }
                        .into_any(),
                        Ok(list) => view! {
                            <ul class=css::coinList>
                                {list.into_iter().map(|coin| view! { <CoinCard coin=coin /> }).collect_view()}
                            </ul>
                        }
                        .into_any(),
                        Err(e) => view! { <p class=css::error>{e.to_string()}</p> }.into_any(),
                    }
                })}
            </Suspense>
        </section>
    }
}

#[component]
fn CoinCard(coin: Coin) -> impl IntoView {
    let href = Route::coin(coin.id.clone()).href();
    let caption = coin.caption();
    let thumbnail = coin.thumbnail_url.clone().map(|src| {
        view! { <img class=css::thumbnail src=src alt=coin.name.clone() loading="lazy" /> }
    });

    view! {
        <li class=css::coinCard>
            <a href=href>
                {thumbnail}
                <span>{caption}</span>
            </a>
        </li>
    }
}

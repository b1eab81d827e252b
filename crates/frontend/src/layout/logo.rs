use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use leptos_router::NavigateOptions;

use crate::routes::definitions::HOME_PATH;
use crate::shared::config::config;

/// Application mark; only the initial is shown when `collapsed`.
#[component]
pub fn Logo(#[prop(into, optional)] collapsed: Signal<bool>) -> impl IntoView {
    let title = config().app.title.clone();
    let initial: String = title.chars().next().map(String::from).unwrap_or_default();
    let label = title.clone();
    let navigate = use_navigate();

    view! {
        <div
            class="logo"
            class:logo--collapsed=move || collapsed.get()
            title=title
            on:click=move |_| navigate(HOME_PATH, NavigateOptions::default())
        >
            <span class="logo__mark">{initial}</span>
            <Show when=move || !collapsed.get()>
                <span class="logo__title">{label.clone()}</span>
            </Show>
        </div>
    }
}

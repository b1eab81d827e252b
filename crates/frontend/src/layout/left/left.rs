use leptos::prelude::*;

use crate::layout::global_context::use_config;

/// Fixed sidebar column; narrows when the sidebar is collapsed.
#[component]
pub fn Left(children: Children) -> impl IntoView {
    let state = use_config().state;
    let collapsed = move || state.with(|s| s.sidebar_collapsed());

    view! {
        <aside data-zone="left" class="left" class:left--collapsed=collapsed>
            {children()}
        </aside>
    }
}

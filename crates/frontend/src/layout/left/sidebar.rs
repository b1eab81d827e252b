//! Sidebar contents: logo, inline menu, user actions and the collapse toggle.
//!
//! The same component fills the fixed column and the mobile drawer.

use leptos::prelude::*;

use crate::layout::global_context::use_config;
use crate::layout::logo::Logo;
use crate::layout::menu::{Menu, MenuMode};
use crate::layout::user_actions::UserActions;
use crate::shared::icons::icon;

#[component]
pub fn Sidebar() -> impl IntoView {
    let config = use_config();
    let state = config.state;
    let store = config.store.clone();

    // the drawer always shows the full-width sidebar
    let collapsed = Signal::derive(move || state.with(|s| s.sidebar_collapsed() && !s.is_drawer_mode));
    let toggle = move |_| store.toggle_sidebar();

    view! {
        <div class="app-sidebar">
            <Show when=move || state.with(|s| s.show_sidebar_logo())>
                <Logo collapsed=collapsed />
            </Show>

            <div class="app-sidebar__content">
                <Show when=move || state.with(|s| s.show_sidebar_menu() || s.is_drawer_mode)>
                    <Menu mode=MenuMode::Inline />
                </Show>
            </div>

            <Show when=move || state.with(|s| s.show_sidebar_user_actions() && !s.is_drawer_mode)>
                <UserActions vertical=true />
            </Show>

            <Show when=move || !state.with(|s| s.is_drawer_mode)>
                <button
                    class="app-sidebar__collapse"
                    on:click=toggle.clone()
                    title=move || if collapsed.get() { "Expand sidebar" } else { "Collapse sidebar" }
                >
                    {move || if collapsed.get() {
                        icon("panel-left-open")
                    } else {
                        icon("panel-left-close")
                    }}
                </button>
            </Show>
        </div>
    }
}

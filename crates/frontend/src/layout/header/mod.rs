use leptos::prelude::*;

use super::global_context::use_config;
use super::logo::Logo;
use super::menu::{Menu, MenuMode};
use super::user_actions::UserActions;
use crate::shared::icons::icon;

/// Top bar. Carries the drawer toggle on narrow screens.
#[component]
pub fn Header() -> impl IntoView {
    let config = use_config();
    let state = config.state;
    let store = config.store.clone();

    let toggle_drawer = move |_| store.toggle_drawer();

    view! {
        <header class="app-header">
            <div class="app-header__left">
                <Show when=move || state.with(|s| s.is_drawer_mode)>
                    <button class="app-header__icon-btn" on:click=toggle_drawer.clone() title="Open navigation">
                        {icon("menu")}
                    </button>
                </Show>
                <Show when=move || state.with(|s| s.show_header_logo())>
                    <Logo />
                </Show>
            </div>

            <div class="app-header__menu">
                <Show when=move || state.with(|s| s.show_header_menu())>
                    <Menu mode=MenuMode::Horizontal />
                </Show>
            </div>

            <div class="app-header__right">
                <Show when=move || state.with(|s| s.show_header_user_actions() || s.is_drawer_mode)>
                    <UserActions />
                </Show>
            </div>
        </header>
    }
}

pub mod config_store;
pub mod global_context;
pub mod header;
pub mod left;
pub mod logo;
pub mod menu;
pub mod menu_store;
pub mod setting_drawer;
pub mod user_actions;

use leptos::prelude::*;

use global_context::use_config;
use header::Header;
use left::{Left, Sidebar};
use setting_drawer::SettingDrawer;

/// Main application shell.
///
/// ```text
/// +------------------------------------------+
/// |                 Header                   |   hidden in vertical layout
/// +------------------------------------------+
/// |  Sidebar  |           Content            |   sidebar hidden in horizontal
/// +------------------------------------------+   layout and in drawer mode
/// ```
///
/// Below the drawer breakpoint the sidebar moves into an overlay drawer
/// opened from the header.
#[component]
pub fn Shell(children: Children) -> impl IntoView {
    let config = use_config();
    let state = config.state;
    let store = config.store.clone();

    let layout_class = move || {
        let (mode, style) = state.with(|s| (s.layout.mode, s.theme.style));
        format!("app-layout app-layout--{} {}", mode.as_str(), style.class_name())
    };
    let css_vars = move || state.with(|s| s.theme.css_vars());
    let close_drawer = move |_| store.close_drawer();

    view! {
        <div class=layout_class style=css_vars class:app-layout--dark=move || state.with(|s| s.is_dark_mode)>
            <Show when=move || state.with(|s| s.show_header())>
                <Header />
            </Show>

            <div class="app-body">
                <Show when=move || state.with(|s| s.show_sidebar())>
                    <Left>
                        <Sidebar />
                    </Left>
                </Show>

                <main class="app-main">
                    {children()}
                </main>
            </div>

            <Show when=move || state.with(|s| s.is_drawer_mode && s.drawer_visible)>
                <div class="drawer-mask" on:click=close_drawer.clone()></div>
                <aside class="nav-drawer">
                    <Sidebar />
                </aside>
            </Show>

            <SettingDrawer />
        </div>
    }
}

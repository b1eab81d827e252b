use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;
use leptos_router::NavigateOptions;

use super::global_context::use_config;
use crate::routes::definitions::LOGIN_PATH;
use crate::shared::icons::icon;
use crate::system::auth::context::{do_logout, use_auth, use_auth_service};

/// Dark mode toggle, settings, profile link and logout.
#[component]
pub fn UserActions(#[prop(optional)] vertical: bool) -> impl IntoView {
    let config = use_config();
    let (auth_state, set_auth_state) = use_auth();
    let service = StoredValue::new(use_auth_service());
    let navigate = StoredValue::new(use_navigate());

    let is_dark = move || config.state.with(|s| s.is_dark_mode);
    let store = config.store.clone();
    let toggle_dark = move |_| store.toggle_dark_mode();
    let store = config.store.clone();
    let toggle_settings = move |_| store.toggle_setting_drawer();

    let open_profile = move |_: leptos::ev::MouseEvent| {
        navigate.with_value(|nav| nav("/system/profile", NavigateOptions::default()));
    };

    let logout = move |_: leptos::ev::MouseEvent| {
        let service = service.get_value();
        spawn_local(async move {
            do_logout(service, set_auth_state).await;
            navigate.with_value(|nav| nav(LOGIN_PATH, NavigateOptions::default()));
        });
    };

    view! {
        <div class="user-actions" class:user-actions--vertical=vertical>
            <button
                class="user-actions__btn"
                on:click=toggle_dark
                title=move || if is_dark() { "Switch to light mode" } else { "Switch to dark mode" }
            >
                {move || if is_dark() { icon("sun") } else { icon("moon") }}
            </button>

            <button class="user-actions__btn" on:click=toggle_settings title="Layout settings">
                {icon("settings")}
            </button>

            <button class="user-actions__user" on:click=open_profile title="Profile">
                {icon("user")}
                <span>
                    {move || auth_state.get().username().unwrap_or_else(|| "Guest".to_string())}
                </span>
            </button>

            <button class="user-actions__btn" on:click=logout title="Sign out">
                {icon("log-out")}
            </button>
        </div>
    }
}

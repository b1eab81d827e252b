use chrono::Utc;
use leptos::prelude::*;
use leptos_router::components::A;

use crate::layout::global_context::use_config;
use crate::shared::date_utils::format_relative;
use crate::system::auth::context::use_auth;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let (auth_state, _) = use_auth();
    let state = use_config().state;

    let greeting = move || {
        auth_state
            .get()
            .username()
            .map(|name| format!("Welcome back, {}", name))
            .unwrap_or_else(|| "Welcome".to_string())
    };
    let last_login = move || {
        auth_state
            .get()
            .user_info
            .map(|u| u.last_login)
            .filter(|l| !l.is_empty())
            .map(|l| format_relative(&l, Utc::now()))
    };

    view! {
        <div class="page page-dashboard">
            <h1>{greeting}</h1>
            {move || last_login().map(|l| view! { <p class="page__muted">"Last sign-in: " {l}</p> })}

            <div class="dashboard-cards">
                <div class="dashboard-card">
                    <h3>"Layout"</h3>
                    <p>{move || state.with(|s| s.layout.mode.display_name())}</p>
                </div>
                <div class="dashboard-card">
                    <h3>"Theme"</h3>
                    <p>{move || state.with(|s| format!("{} / {}", s.theme.style.display_name(), s.theme.mode.display_name()))}</p>
                </div>
                <div class="dashboard-card">
                    <h3>"Roles"</h3>
                    <p>{move || {
                        let roles = auth_state.get().roles();
                        if roles.is_empty() { "none".to_string() } else { roles.join(", ") }
                    }}</p>
                </div>
            </div>

            <A href="/system/profile">"Manage your profile"</A>
        </div>
    }
}

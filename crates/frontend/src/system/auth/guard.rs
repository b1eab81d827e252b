use leptos::prelude::*;
use leptos_router::hooks::{use_location, use_navigate};
use leptos_router::NavigateOptions;
use serde::{Deserialize, Serialize};

use super::context::use_auth;
use crate::routes::definitions::{HOME_PATH, LOGIN_PATH};
use crate::routes::generator::roles_allow;

#[derive(Debug, Default, Serialize, Deserialize)]
struct RedirectQuery {
    #[serde(default)]
    redirect: Option<String>,
}

/// Login URL that brings the user back to `current` afterwards.
pub fn login_redirect_url(current: &str) -> String {
    if current.is_empty() || current == HOME_PATH {
        return LOGIN_PATH.to_string();
    }
    let query = serde_qs::to_string(&RedirectQuery {
        redirect: Some(current.to_string()),
    })
    .unwrap_or_default();
    format!("{}?{}", LOGIN_PATH, query)
}

/// Where to go after login, read from the login page query string.
///
/// Only same-origin absolute paths are honored.
pub fn redirect_target(search: &str) -> String {
    serde_qs::from_str::<RedirectQuery>(search.trim_start_matches('?'))
        .ok()
        .and_then(|q| q.redirect)
        .filter(|r| r.starts_with('/') && !r.starts_with("//"))
        .unwrap_or_else(|| HOME_PATH.to_string())
}

/// Renders children for signed-in users, otherwise sends them to login.
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let (auth_state, _) = use_auth();
    let location = use_location();
    let navigate = use_navigate();

    Effect::new(move |_| {
        if auth_state.with(|s| s.access_token.is_none()) {
            let search = location.search.get_untracked();
            let current = if search.is_empty() {
                location.pathname.get_untracked()
            } else {
                format!(
                    "{}?{}",
                    location.pathname.get_untracked(),
                    search.trim_start_matches('?')
                )
            };
            navigate(
                &login_redirect_url(&current),
                NavigateOptions {
                    replace: true,
                    ..Default::default()
                },
            );
        }
    });

    view! {
        <Show when=move || auth_state.get().access_token.is_some()>
            {children()}
        </Show>
    }
}

/// Renders children only for holders of one of `roles`.
#[component]
pub fn RequireRoles(roles: Vec<String>, children: ChildrenFn) -> impl IntoView {
    let (auth_state, _) = use_auth();
    let roles = StoredValue::new(roles);

    view! {
        <Show
            when=move || roles.with_value(|r| roles_allow(r, &auth_state.get().roles()))
            fallback=|| view! { <div class="page-forbidden">"Access denied. You do not have permission to view this page."</div> }
        >
            {children()}
        </Show>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redirect_round_trips_through_login_url() {
        let url = login_redirect_url("/system/profile?tab=security");
        let search = url.split_once('?').map(|(_, q)| q).unwrap();
        assert_eq!(redirect_target(search), "/system/profile?tab=security");
    }

    #[test]
    fn home_needs_no_redirect_parameter() {
        assert_eq!(login_redirect_url("/"), LOGIN_PATH);
        assert_eq!(redirect_target(""), HOME_PATH);
    }

    #[test]
    fn foreign_redirects_are_ignored() {
        assert_eq!(redirect_target("redirect=https%3A%2F%2Fevil.test"), HOME_PATH);
        assert_eq!(redirect_target("redirect=%2F%2Fevil.test"), HOME_PATH);
    }
}

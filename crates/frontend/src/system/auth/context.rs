use contracts::system::auth::{LoginResponse, UserInfo};
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::api::BrowserAuthService;
use crate::shared::error::ApiError;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub access_token: Option<String>,
    pub user_info: Option<UserInfo>,
}

impl AuthState {
    pub fn roles(&self) -> Vec<String> {
        self.user_info
            .as_ref()
            .map(|u| u.roles.clone())
            .unwrap_or_default()
    }

    pub fn username(&self) -> Option<String> {
        self.user_info.as_ref().map(|u| u.username.clone())
    }
}

/// Auth context provider component
#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let service = BrowserAuthService::browser();
    let (auth_state, set_auth_state) = signal(AuthState {
        access_token: service.get_token(),
        user_info: None,
    });

    // Restore the user behind a persisted token
    if service.is_authenticated() {
        let service = service.clone();
        spawn_local(async move {
            match service.get_current_user().await {
                Ok(user) => set_auth_state.update(|s| s.user_info = Some(user)),
                Err(ApiError::Status { status: 401, .. }) => {
                    log::warn!("stored token rejected, signing out");
                    service.clear_token();
                    set_auth_state.set(AuthState::default());
                }
                Err(e) => log::error!("failed to load current user: {}", e),
            }
        });
    }

    provide_context(service);
    provide_context(auth_state);
    provide_context(set_auth_state);

    children()
}

/// Hook to access auth state
pub fn use_auth() -> (ReadSignal<AuthState>, WriteSignal<AuthState>) {
    let auth_state =
        use_context::<ReadSignal<AuthState>>().expect("AuthProvider not found in component tree");
    let set_auth_state =
        use_context::<WriteSignal<AuthState>>().expect("AuthProvider not found in component tree");

    (auth_state, set_auth_state)
}

pub fn use_auth_service() -> BrowserAuthService {
    use_context::<BrowserAuthService>().expect("AuthProvider not found in component tree")
}

/// Publish a successful login. The token is already persisted by the service.
pub fn complete_login(set_auth_state: WriteSignal<AuthState>, response: LoginResponse) {
    set_auth_state.set(AuthState {
        access_token: Some(response.token),
        user_info: Some(response.user),
    });
}

pub async fn do_logout(service: BrowserAuthService, set_auth_state: WriteSignal<AuthState>) {
    service.logout().await;
    set_auth_state.set(AuthState::default());
}

use leptos::prelude::*;
use leptos_router::components::Router;

use crate::layout::global_context::ConfigContext;
use crate::layout::menu_store::MenuStore;
use crate::routes::routes::{build_route_table, AppRoutes};
use crate::shared::config::config;
use crate::shared::notify::{Notifier, ToastHost};
use crate::system::auth::context::AuthProvider;

#[component]
pub fn App() -> impl IntoView {
    // Layout and theme state, wired to the live window
    let config_ctx = ConfigContext::browser(config());
    config_ctx.connect_browser();
    provide_context(config_ctx.clone());
    on_cleanup(move || config_ctx.dispose());

    provide_context(build_route_table());
    provide_context(MenuStore::new(Vec::new()));
    provide_context(Notifier::new());

    view! {
        <AuthProvider>
            <Router>
                <AppRoutes />
            </Router>
            <ToastHost />
        </AuthProvider>
    }
}

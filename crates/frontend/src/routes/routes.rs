use leptos::prelude::*;
use leptos_router::components::Redirect;
use leptos_router::hooks::use_location;

use super::definitions::{route_definitions, Page};
use super::generator::{create_routes, Resolved, RouteTable};
use crate::app_shell::MainLayout;
use crate::system::auth::guard::{RequireAuth, RequireRoles};
use crate::system::pages::appearance::AppearancePage;
use crate::system::pages::dashboard::DashboardPage;
use crate::system::pages::login::LoginPage;
use crate::system::pages::not_found::NotFoundPage;
use crate::system::pages::register::RegisterPage;
use crate::system::pages::reset_password::ResetPasswordPage;
use crate::system::profile::page::ProfilePage;

fn page_view(page: Page) -> AnyView {
    match page {
        Page::Dashboard => view! { <DashboardPage /> }.into_any(),
        Page::Profile => view! { <ProfilePage /> }.into_any(),
        Page::Appearance => view! { <AppearancePage /> }.into_any(),
        Page::Login => view! { <LoginPage /> }.into_any(),
        Page::Register => view! { <RegisterPage /> }.into_any(),
        Page::ResetPassword => view! { <ResetPasswordPage /> }.into_any(),
        Page::NotFound => view! { <NotFoundPage /> }.into_any(),
    }
}

pub fn build_route_table() -> RouteTable {
    let table = create_routes(&route_definitions());
    for route in table.routes() {
        log::debug!(
            "route {} ({} children)",
            route.full_path,
            route.children.len()
        );
    }
    table
}

pub fn use_route_table() -> RouteTable {
    use_context::<RouteTable>().expect("RouteTable not provided")
}

/// Renders the page for the current location: auth pages stand alone, the
/// rest sits inside the shell behind the login guard.
#[component]
pub fn AppRoutes() -> impl IntoView {
    let table = StoredValue::new(use_route_table());
    let location = use_location();
    let resolved = Memo::new(move |_| {
        let path = location.pathname.get();
        table.with_value(|t| t.resolve(&path))
    });
    let standalone = move || matches!(resolved.get(), Resolved::Independent(_));

    view! {
        <Show
            when=standalone
            fallback=move || view! {
                <RequireAuth>
                    <MainLayout>
                        {move || match resolved.get() {
                            Resolved::Layout { page, roles } if roles.is_empty() => page_view(page),
                            Resolved::Layout { page, roles } => view! {
                                <RequireRoles roles=roles>
                                    {page_view(page)}
                                </RequireRoles>
                            }.into_any(),
                            Resolved::Redirect(to) => view! { <Redirect path=to /> }.into_any(),
                            Resolved::Independent(_) | Resolved::NotFound => page_view(Page::NotFound),
                        }}
                    </MainLayout>
                </RequireAuth>
            }
        >
            {move || match resolved.get() {
                Resolved::Independent(page) => page_view(page),
                _ => ().into_any(),
            }}
        </Show>
    }
}

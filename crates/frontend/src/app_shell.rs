//! Signed-in part of the application: the shell plus a menu that follows the
//! user's roles.

use leptos::prelude::*;

use crate::layout::menu_store::use_menu;
use crate::layout::Shell;
use crate::routes::generator::{filter_routes_by_roles, generate_menu};
use crate::routes::routes::use_route_table;
use crate::system::auth::context::use_auth;

#[component]
pub fn MainLayout(children: Children) -> impl IntoView {
    let menu = use_menu();
    let table = StoredValue::new(use_route_table());
    let (auth_state, _) = use_auth();

    let roles = Memo::new(move |_| auth_state.with(|s| s.roles()));
    Effect::new(move |_| {
        let roles = roles.get();
        let items = table.with_value(|t| generate_menu(&filter_routes_by_roles(t.layout_routes(), &roles)));
        log::debug!("menu rebuilt: {} top-level entries", items.len());
        menu.menu_list.set(items);
    });

    view! {
        <Shell>
            {children()}
        </Shell>
    }
}

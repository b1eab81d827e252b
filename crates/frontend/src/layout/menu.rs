//! Navigation menu rendered from the route tree.

use leptos::prelude::*;
use leptos_router::hooks::{use_location, use_navigate};
use leptos_router::NavigateOptions;

use super::global_context::use_config;
use super::menu_store::{contains_key, use_menu, MenuStore};
use crate::routes::generator::MenuItem;
use crate::shared::icons::{icon, icon_sized};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuMode {
    /// Single row in the header; groups open as dropdowns.
    Horizontal,
    /// Sidebar tree; groups expand in place.
    Inline,
}

#[component]
pub fn Menu(mode: MenuMode) -> impl IntoView {
    let menu = use_menu();
    let config = use_config();
    let state = config.state;
    let store = config.store.clone();
    let location = use_location();
    let navigate = StoredValue::new(use_navigate());

    // rerun when the menu is rebuilt so ancestors of the current page open
    Effect::new(move |_| {
        menu.menu_list.track();
        menu.sync_location(&location.pathname.get());
    });

    let on_select = Callback::new(move |key: String| {
        menu.select(&key);
        navigate.with_value(|nav| nav(&key, NavigateOptions::default()));
        // picking an entry closes the mobile drawer
        if state.with_untracked(|s| s.is_drawer_mode) {
            store.close_drawer();
        }
    });

    let collapsed =
        move || mode == MenuMode::Inline && state.with(|s| s.sidebar_collapsed() && !s.is_drawer_mode);

    view! {
        <nav
            class=move || match mode {
                MenuMode::Horizontal => "menu menu--horizontal",
                MenuMode::Inline => "menu menu--inline",
            }
            class:menu--collapsed=collapsed
        >
            {move || {
                menu.menu_list
                    .get()
                    .into_iter()
                    .map(|item| render_item(item, 0, mode, menu, on_select))
                    .collect_view()
            }}
        </nav>
    }
}

fn render_item(
    item: MenuItem,
    depth: usize,
    mode: MenuMode,
    menu: MenuStore,
    on_select: Callback<String>,
) -> AnyView {
    let key = StoredValue::new(item.key.clone());
    let item_icon = item.icon.clone();
    let label = item.label.clone();
    let title = label.clone();
    let indent = format!("{}px", 12 + depth * 16);

    match item.children.clone() {
        None => view! {
            <div
                class="menu__item"
                class:menu__item--active=move || {
                    menu.selected_keys.with(|s| key.with_value(|k| s.contains(k)))
                }
                style:padding-left=indent
                title=title
                on:click=move |_| on_select.run(key.get_value())
            >
                {item_icon.map(|name| icon(&name))}
                <span class="menu__label">{label}</span>
            </div>
        }
        .into_any(),
        Some(children) => {
            let group = StoredValue::new(item);
            let is_open = move || key.with_value(|k| menu.open_keys.with(|o| o.contains(k)));
            let has_selected = move || {
                menu.selected_keys
                    .with(|s| s.iter().any(|sel| group.with_value(|g| contains_key(g, sel))))
            };
            let children = StoredValue::new(children);

            view! {
                <div class="menu__group" class:menu__group--dropdown={mode == MenuMode::Horizontal}>
                    <div
                        class="menu__item menu__item--group"
                        class:menu__item--child-active=has_selected
                        style:padding-left=indent
                        title=title
                        on:click=move |_| key.with_value(|k| menu.toggle_open(k))
                    >
                        {item_icon.map(|name| icon(&name))}
                        <span class="menu__label">{label}</span>
                        <span class="menu__arrow">
                            {move || if is_open() {
                                icon_sized("chevron-down", 16)
                            } else {
                                icon_sized("chevron-right", 16)
                            }}
                        </span>
                    </div>
                    <Show when=is_open>
                        <div class="menu__children">
                            {children
                                .get_value()
                                .into_iter()
                                .map(|child| render_item(child, depth + 1, mode, menu, on_select))
                                .collect_view()}
                        </div>
                    </Show>
                </div>
            }
            .into_any()
        }
    }
}

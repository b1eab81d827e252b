//! Right-hand drawer with layout and theme preferences.

use leptos::prelude::*;

use super::config_store::{LayoutMode, Placement, ThemeMode, ThemeStyle, PRESET_COLORS};
use super::global_context::use_config;
use crate::shared::icons::icon;

#[component]
pub fn SettingDrawer() -> impl IntoView {
    let config = use_config();
    let state = config.state;
    let store = StoredValue::new(config.store.clone());

    let visible = move || state.with(|s| s.setting_drawer_visible);
    let close = move |_| store.with_value(|s| s.close_setting_drawer());

    view! {
        <Show when=visible>
            <div class="drawer-mask" on:click=close></div>
        </Show>
        <aside class="setting-drawer" class:setting-drawer--open=visible>
            <div class="setting-drawer__header">
                <h3>"Layout settings"</h3>
                <button class="btn-close" on:click=close>{icon("x")}</button>
            </div>

            <section class="setting-drawer__section">
                <h4>"Theme style"</h4>
                <div class="segmented">
                    {ThemeStyle::all().into_iter().map(|style| view! {
                        <button
                            class="segmented__item"
                            class:segmented__item--active=move || state.with(|s| s.theme.style == style)
                            on:click=move |_| store.with_value(|s| s.set_theme_style(style))
                        >
                            {style.display_name()}
                        </button>
                    }).collect_view()}
                </div>
            </section>

            <section class="setting-drawer__section">
                <h4>"Appearance"</h4>
                <div class="segmented">
                    {ThemeMode::all().into_iter().map(|mode| view! {
                        <button
                            class="segmented__item"
                            class:segmented__item--active=move || state.with(|s| s.theme.mode == mode)
                            on:click=move |_| store.with_value(|s| s.set_theme_mode(mode))
                        >
                            {mode.display_name()}
                        </button>
                    }).collect_view()}
                </div>
            </section>

            <section class="setting-drawer__section">
                <h4>"Theme color"</h4>
                <div class="color-swatches">
                    {PRESET_COLORS.iter().map(|preset| {
                        let color = preset.color;
                        view! {
                            <button
                                class="color-swatch"
                                class:color-swatch--active=move || {
                                    state.with(|s| s.theme.color_primary.eq_ignore_ascii_case(color))
                                }
                                style:background-color=color
                                title=preset.name
                                on:click=move |_| store.with_value(|s| s.set_theme_color(color))
                            ></button>
                        }
                    }).collect_view()}
                </div>
            </section>

            <section class="setting-drawer__section">
                <h4>"Navigation layout"</h4>
                <div class="segmented">
                    {LayoutMode::all().into_iter().map(|mode| view! {
                        <button
                            class="segmented__item"
                            class:segmented__item--active=move || state.with(|s| s.layout.mode == mode)
                            on:click=move |_| store.with_value(|s| s.set_layout_mode(mode))
                        >
                            {mode.display_name()}
                        </button>
                    }).collect_view()}
                </div>
            </section>

            <Show when=move || state.with(|s| s.layout.mode == LayoutMode::Mix)>
                <section class="setting-drawer__section">
                    <h4>"Logo position"</h4>
                    <PlacementPicker
                        current=Signal::derive(move || state.with(|s| s.layout.logo_position))
                        on_pick=Callback::new(move |p| store.with_value(|s| s.set_logo_position(p)))
                    />
                    <h4>"User actions position"</h4>
                    <PlacementPicker
                        current=Signal::derive(move || state.with(|s| s.layout.user_actions_position))
                        on_pick=Callback::new(move |p| store.with_value(|s| s.set_user_actions_position(p)))
                    />
                </section>
            </Show>

            <section class="setting-drawer__section">
                <label class="setting-drawer__row">
                    <span>"Show logo"</span>
                    <input
                        type="checkbox"
                        prop:checked=move || state.with(|s| s.layout.show_logo)
                        on:change=move |ev| {
                            let show = event_target_checked(&ev);
                            store.with_value(|s| s.set_show_logo(show));
                        }
                    />
                </label>
                <label class="setting-drawer__row">
                    <span>"Collapse sidebar"</span>
                    <input
                        type="checkbox"
                        prop:checked=move || state.with(|s| s.sidebar_collapsed())
                        on:change=move |ev| {
                            let collapsed = event_target_checked(&ev);
                            store.with_value(|s| s.set_sidebar_collapsed(collapsed));
                        }
                    />
                </label>
            </section>

            <div class="setting-drawer__footer">
                <button class="btn-secondary" on:click=move |_| store.with_value(|s| s.clear_config())>
                    "Reset to defaults"
                </button>
            </div>
        </aside>
    }
}

#[component]
fn PlacementPicker(current: Signal<Placement>, on_pick: Callback<Placement>) -> impl IntoView {
    view! {
        <div class="segmented">
            {[(Placement::Header, "Header"), (Placement::Sidebar, "Sidebar")]
                .into_iter()
                .map(|(placement, label)| view! {
                    <button
                        class="segmented__item"
                        class:segmented__item--active=move || current.get() == placement
                        on:click=move |_| on_pick.run(placement)
                    >
                        {label}
                    </button>
                })
                .collect_view()}
        </div>
    }
}

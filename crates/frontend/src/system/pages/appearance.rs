use leptos::prelude::*;

use crate::layout::global_context::use_config;

/// Read-only summary of the current preferences with shortcuts into the
/// settings drawer.
#[component]
pub fn AppearancePage() -> impl IntoView {
    let config = use_config();
    let state = config.state;
    let store = StoredValue::new(config.store.clone());

    let rows = move || {
        state.with(|s| {
            vec![
                ("Layout", s.layout.mode.display_name().to_string()),
                ("Theme style", s.theme.style.display_name().to_string()),
                ("Theme mode", s.theme.mode.display_name().to_string()),
                ("Dark palette", if s.is_dark_mode { "on" } else { "off" }.to_string()),
                (
                    "Primary color",
                    s.current_preset_color()
                        .map(|p| p.name.to_string())
                        .unwrap_or_else(|| s.theme.color_primary.clone()),
                ),
                ("Sidebar", if s.sidebar_collapsed() { "collapsed" } else { "expanded" }.to_string()),
            ]
        })
    };

    view! {
        <div class="page page-appearance">
            <h1>"Appearance"</h1>
            <table class="table">
                <tbody>
                    {move || rows().into_iter().map(|(name, value)| view! {
                        <tr><th>{name}</th><td>{value}</td></tr>
                    }).collect_view()}
                </tbody>
            </table>
            <div class="form-actions">
                <button class="btn-primary" on:click=move |_| store.with_value(|s| s.open_setting_drawer())>
                    "Open settings"
                </button>
                <button class="btn-secondary" on:click=move |_| store.with_value(|s| s.toggle_theme_style())>
                    "Switch theme style"
                </button>
            </div>
        </div>
    }
}

use std::sync::Arc;

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::window;

use crate::layout::config_store::{
    BrowserThemeHost, ConfigState, ConfigStore, SubscriptionId, DARK_MEDIA_QUERY,
};
use crate::shared::config::AppConfig;
use crate::shared::storage::BrowserStorage;

/// Layout and theme state shared with every component.
///
/// `state` mirrors the store after each mutation so views can track it; all
/// writes go through `store`.
#[derive(Clone)]
pub struct ConfigContext {
    pub store: ConfigStore,
    pub state: RwSignal<ConfigState>,
    subscription: SubscriptionId,
}

impl ConfigContext {
    pub fn new(store: ConfigStore) -> Self {
        let state = RwSignal::new(store.snapshot());
        let subscription = store.subscribe(move |next| {
            let _ = state.try_set(next.clone());
        });
        Self {
            store,
            state,
            subscription,
        }
    }

    /// Store backed by local storage and the live document.
    pub fn browser(config: &AppConfig) -> Self {
        Self::new(ConfigStore::new(
            Arc::new(BrowserStorage::local()),
            Arc::new(BrowserThemeHost),
            config,
        ))
    }

    /// Feed window resizes and OS theme changes into the store.
    pub fn connect_browser(&self) {
        let Some(win) = window() else {
            return;
        };

        if let Ok(width) = win.inner_width() {
            if let Some(width) = width.as_f64() {
                self.store.on_viewport_resize(width);
            }
        }

        let store = self.store.clone();
        let handle = window_event_listener(leptos::ev::resize, move |_| {
            if let Some(width) = window()
                .and_then(|w| w.inner_width().ok())
                .and_then(|w| w.as_f64())
            {
                store.on_viewport_resize(width);
            }
        });
        self.store
            .attach_resize_listener(Box::new(move || handle.remove()));

        if let Ok(Some(media)) = win.match_media(DARK_MEDIA_QUERY) {
            let store = self.store.clone();
            let closure = Closure::wrap(Box::new(move |event: web_sys::MediaQueryListEvent| {
                store.on_system_theme_change(event.matches());
            }) as Box<dyn FnMut(_)>);
            let _ = media.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
            // lives as long as the page
            closure.forget();
        }
    }

    pub fn dispose(&self) {
        self.store.unsubscribe(self.subscription);
        self.store.dispose();
    }
}

pub fn use_config() -> ConfigContext {
    use_context::<ConfigContext>().expect("ConfigContext not found")
}

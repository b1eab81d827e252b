use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use super::{
    keys, ConfigState, LayoutMode, Placement, SidebarState, ThemeAlgorithm, ThemeHost, ThemeMode,
    ThemeStyle, ViewportClass, DARK_CLASS,
};
use crate::shared::config::{AppConfig, ViewportConfig};
use crate::shared::storage::KeyValueStore;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Arc<dyn Fn(&ConfigState) + Send + Sync>;

/// Releases an event subscription held by the store.
pub type Teardown = Box<dyn FnOnce() + Send + Sync>;

struct Inner {
    state: Mutex<ConfigState>,
    prefs: Arc<dyn KeyValueStore>,
    host: Arc<dyn ThemeHost>,
    viewport: ViewportConfig,
    theme_defaults: crate::shared::config::ThemeDefaults,
    listeners: Mutex<Vec<(SubscriptionId, Listener)>>,
    next_id: AtomicU64,
    resize: Mutex<Option<Teardown>>,
}

/// Layout/theme state container.
///
/// Cheap to clone; clones share the same state.
#[derive(Clone)]
pub struct ConfigStore {
    inner: Arc<Inner>,
}

impl ConfigStore {
    /// Build the store from persisted preferences and apply the resulting
    /// theme classes to the document root.
    pub fn new(prefs: Arc<dyn KeyValueStore>, host: Arc<dyn ThemeHost>, config: &AppConfig) -> Self {
        let state = restore_state(prefs.as_ref(), host.as_ref(), config);
        log::debug!(
            "config store restored: layout={} theme={}/{} dark={}",
            state.layout.mode.as_str(),
            state.theme.style.as_str(),
            state.theme.mode.as_str(),
            state.is_dark_mode
        );
        apply_style_class(host.as_ref(), state.theme.style);
        host.set_root_class(DARK_CLASS, state.is_dark_mode);

        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(state),
                prefs,
                host,
                viewport: config.viewport,
                theme_defaults: config.theme.clone(),
                listeners: Mutex::new(Vec::new()),
                next_id: AtomicU64::new(1),
                resize: Mutex::new(None),
            }),
        }
    }

    pub fn snapshot(&self) -> ConfigState {
        self.read(Clone::clone)
    }

    fn read<R>(&self, f: impl FnOnce(&ConfigState) -> R) -> R {
        match self.inner.state.lock() {
            Ok(state) => f(&state),
            Err(poisoned) => f(&poisoned.into_inner()),
        }
    }

    /// Apply `f` and notify subscribers if anything changed.
    fn update(&self, f: impl FnOnce(&mut ConfigState)) {
        let next = {
            let mut state = match self.inner.state.lock() {
                Ok(state) => state,
                Err(poisoned) => poisoned.into_inner(),
            };
            let before = state.clone();
            f(&mut state);
            if *state == before {
                return;
            }
            state.clone()
        };
        self.notify(&next);
    }

    fn notify(&self, state: &ConfigState) {
        let listeners: Vec<Listener> = match self.inner.listeners.lock() {
            Ok(listeners) => listeners.iter().map(|(_, l)| l.clone()).collect(),
            Err(_) => return,
        };
        for listener in listeners {
            listener(state);
        }
    }

    /// Register `listener`; it is called synchronously after every mutation
    /// that changes the state.
    pub fn subscribe(&self, listener: impl Fn(&ConfigState) + Send + Sync + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.inner.next_id.fetch_add(1, Ordering::Relaxed));
        if let Ok(mut listeners) = self.inner.listeners.lock() {
            listeners.push((id, Arc::new(listener)));
        }
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        match self.inner.listeners.lock() {
            Ok(mut listeners) => {
                let before = listeners.len();
                listeners.retain(|(lid, _)| *lid != id);
                listeners.len() != before
            }
            Err(_) => false,
        }
    }

    // ── theme ────────────────────────────────────────────────────────────

    pub fn set_theme_style(&self, style: ThemeStyle) {
        log::debug!("set_theme_style: {}", style.as_str());
        apply_style_class(self.inner.host.as_ref(), style);
        self.inner.prefs.set(keys::THEME_STYLE, style.as_str());
        self.update(|s| s.theme.style = style);
    }

    pub fn toggle_theme_style(&self) {
        let next = match self.read(|s| s.theme.style) {
            ThemeStyle::Dynamic => ThemeStyle::Classic,
            ThemeStyle::Classic => ThemeStyle::Dynamic,
        };
        self.set_theme_style(next);
    }

    pub fn set_theme_mode(&self, mode: ThemeMode) {
        log::debug!("set_theme_mode: {}", mode.as_str());
        self.inner.prefs.set(keys::THEME_MODE, mode.as_str());
        let dark = resolve_dark(mode, self.inner.host.as_ref());
        self.persist_dark(dark);
        self.update(|s| {
            s.theme.mode = mode;
            set_dark(s, dark);
        });
    }

    /// Mirror an OS dark/light change. Ignored unless the mode is `System`.
    pub fn on_system_theme_change(&self, prefers_dark: bool) {
        if self.read(|s| s.theme.mode) != ThemeMode::System {
            return;
        }
        log::debug!("system theme changed: dark={}", prefers_dark);
        self.persist_dark(prefers_dark);
        self.update(|s| set_dark(s, prefers_dark));
    }

    /// Switch between explicit light and dark.
    pub fn toggle_dark_mode(&self) {
        let next = if self.read(|s| s.is_dark_mode) {
            ThemeMode::Light
        } else {
            ThemeMode::Dark
        };
        self.set_theme_mode(next);
    }

    /// Root class and stored flag; the state itself changes in the caller's
    /// single `update`.
    fn persist_dark(&self, dark: bool) {
        self.inner.host.set_root_class(DARK_CLASS, dark);
        self.inner.prefs.set_bool(keys::IS_DARK_MODE, dark);
    }

    pub fn set_theme_color(&self, color: &str) {
        let color = color.trim().to_string();
        self.update(|s| s.theme.color_primary = color);
    }

    // ── layout ───────────────────────────────────────────────────────────

    pub fn set_layout_mode(&self, mode: LayoutMode) {
        log::debug!("set_layout_mode: {}", mode.as_str());
        self.inner.prefs.set(keys::LAYOUT_MODE, mode.as_str());
        self.update(|s| s.layout.mode = mode);
    }

    pub fn set_logo_position(&self, position: Placement) {
        self.inner.prefs.set(keys::LOGO_POSITION, position.as_str());
        self.update(|s| s.layout.logo_position = position);
    }

    pub fn set_user_actions_position(&self, position: Placement) {
        self.inner
            .prefs
            .set(keys::USER_ACTIONS_POSITION, position.as_str());
        self.update(|s| s.layout.user_actions_position = position);
    }

    pub fn set_show_logo(&self, show: bool) {
        self.inner.prefs.set_bool(keys::SHOW_LOGO, show);
        self.update(|s| s.layout.show_logo = show);
    }

    pub fn toggle_show_logo(&self) {
        let show = !self.read(|s| s.layout.show_logo);
        self.set_show_logo(show);
    }

    /// Manual toggle. Always flips and always clears auto-collapse.
    pub fn toggle_sidebar(&self) {
        let next = self.read(|s| s.layout.sidebar).toggled();
        self.set_sidebar_state(next);
    }

    pub fn set_sidebar_collapsed(&self, collapsed: bool) {
        self.set_sidebar_state(SidebarState::from_collapsed(collapsed));
    }

    fn set_sidebar_state(&self, next: SidebarState) {
        log::debug!("sidebar -> {:?}", next);
        self.inner
            .prefs
            .set_bool(keys::SIDEBAR_COLLAPSED, next.is_collapsed());
        self.update(|s| s.layout.sidebar = next);
    }

    /// React to a viewport width change.
    pub fn on_viewport_resize(&self, width: f64) {
        let class = ViewportClass::classify(width, &self.inner.viewport);
        self.update(|s| match class {
            ViewportClass::Drawer => {
                if !s.is_drawer_mode {
                    s.is_drawer_mode = true;
                    s.drawer_visible = false;
                }
            }
            ViewportClass::Narrow => {
                s.is_drawer_mode = false;
                s.drawer_visible = false;
                s.layout.sidebar = s.layout.sidebar.narrowed();
            }
            ViewportClass::Wide => {
                s.is_drawer_mode = false;
                s.drawer_visible = false;
                s.layout.sidebar = s.layout.sidebar.widened();
            }
        });
    }

    // ── drawers ──────────────────────────────────────────────────────────

    /// Open/close the navigation drawer; only meaningful in drawer mode.
    pub fn toggle_drawer(&self) {
        self.update(|s| {
            if s.is_drawer_mode {
                s.drawer_visible = !s.drawer_visible;
            }
        });
    }

    pub fn close_drawer(&self) {
        self.update(|s| s.drawer_visible = false);
    }

    pub fn open_setting_drawer(&self) {
        self.update(|s| s.setting_drawer_visible = true);
    }

    pub fn close_setting_drawer(&self) {
        self.update(|s| s.setting_drawer_visible = false);
    }

    pub fn toggle_setting_drawer(&self) {
        self.update(|s| s.setting_drawer_visible = !s.setting_drawer_visible);
    }

    /// Forget every persisted preference and return to defaults.
    ///
    /// Viewport-derived flags are kept since the window has not changed.
    pub fn clear_config(&self) {
        for key in keys::ALL {
            self.inner.prefs.remove(key);
        }
        let host = self.inner.host.as_ref();
        let mut fresh = ConfigState::new(&self.inner.theme_defaults);
        let dark = resolve_dark(fresh.theme.mode, host);
        set_dark(&mut fresh, dark);
        apply_style_class(host, fresh.theme.style);
        host.set_root_class(DARK_CLASS, fresh.is_dark_mode);
        log::info!("layout and theme preferences reset");
        self.update(|s| {
            fresh.is_drawer_mode = s.is_drawer_mode;
            *s = fresh;
        });
    }

    // ── lifecycle ────────────────────────────────────────────────────────

    /// Hand the store the teardown for its resize subscription. A previously
    /// attached subscription is released first.
    pub fn attach_resize_listener(&self, teardown: Teardown) {
        let previous = match self.inner.resize.lock() {
            Ok(mut slot) => slot.replace(teardown),
            Err(_) => None,
        };
        if let Some(release) = previous {
            release();
        }
    }

    /// Release the resize subscription. Safe to call when nothing was
    /// attached and safe to call twice.
    pub fn dispose(&self) {
        let teardown = match self.inner.resize.lock() {
            Ok(mut slot) => slot.take(),
            Err(_) => None,
        };
        if let Some(release) = teardown {
            log::debug!("config store: releasing resize listener");
            release();
        }
    }
}

fn restore_state(prefs: &dyn KeyValueStore, host: &dyn ThemeHost, config: &AppConfig) -> ConfigState {
    let mut state = ConfigState::new(&config.theme);

    if let Some(style) = prefs.get(keys::THEME_STYLE).and_then(|v| ThemeStyle::parse(&v)) {
        state.theme.style = style;
    }
    if let Some(mode) = prefs.get(keys::THEME_MODE).and_then(|v| ThemeMode::parse(&v)) {
        state.theme.mode = mode;
    }
    if let Some(mode) = prefs.get(keys::LAYOUT_MODE).and_then(|v| LayoutMode::parse(&v)) {
        state.layout.mode = mode;
    }
    if let Some(collapsed) = prefs.get_bool(keys::SIDEBAR_COLLAPSED) {
        state.layout.sidebar = SidebarState::from_collapsed(collapsed);
    }
    if let Some(p) = prefs
        .get(keys::USER_ACTIONS_POSITION)
        .and_then(|v| Placement::parse(&v))
    {
        state.layout.user_actions_position = p;
    }
    if let Some(p) = prefs.get(keys::LOGO_POSITION).and_then(|v| Placement::parse(&v)) {
        state.layout.logo_position = p;
    }
    // anything but an explicit "false" keeps the logo
    state.layout.show_logo = prefs.get(keys::SHOW_LOGO).as_deref() != Some("false");

    let dark = resolve_dark(state.theme.mode, host);
    set_dark(&mut state, dark);
    state
}

fn set_dark(state: &mut ConfigState, dark: bool) {
    state.is_dark_mode = dark;
    state.theme.algorithm = if dark {
        ThemeAlgorithm::Dark
    } else {
        ThemeAlgorithm::Default
    };
}

fn resolve_dark(mode: ThemeMode, host: &dyn ThemeHost) -> bool {
    match mode {
        ThemeMode::Light => false,
        ThemeMode::Dark => true,
        ThemeMode::System => host.prefers_dark(),
    }
}

fn apply_style_class(host: &dyn ThemeHost, style: ThemeStyle) {
    for other in ThemeStyle::all() {
        host.set_root_class(other.class_name(), other == style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::config::load_config;
    use crate::shared::storage::MemoryStorage;
    use std::collections::BTreeSet;
    use std::sync::atomic::{AtomicBool, AtomicUsize};

    #[derive(Default)]
    struct RecordingHost {
        classes: Mutex<BTreeSet<String>>,
        dark: AtomicBool,
    }

    impl RecordingHost {
        fn with_os_dark(dark: bool) -> Arc<Self> {
            let host = Self::default();
            host.dark.store(dark, Ordering::SeqCst);
            Arc::new(host)
        }

        fn has(&self, class: &str) -> bool {
            self.classes.lock().unwrap().contains(class)
        }
    }

    impl ThemeHost for RecordingHost {
        fn set_root_class(&self, class: &str, enabled: bool) {
            let mut classes = self.classes.lock().unwrap();
            if enabled {
                classes.insert(class.to_string());
            } else {
                classes.remove(class);
            }
        }

        fn prefers_dark(&self) -> bool {
            self.dark.load(Ordering::SeqCst)
        }
    }

    /// A store that rejects every write, like storage in private browsing.
    struct RejectingStorage;

    impl KeyValueStore for RejectingStorage {
        fn get(&self, _key: &str) -> Option<String> {
            None
        }
        fn set(&self, _key: &str, _value: &str) {}
        fn remove(&self, _key: &str) {}
    }

    fn store_with(prefs: Arc<MemoryStorage>, host: Arc<RecordingHost>) -> ConfigStore {
        ConfigStore::new(prefs, host, &load_config(None).unwrap())
    }

    fn fresh() -> (ConfigStore, Arc<MemoryStorage>, Arc<RecordingHost>) {
        let prefs = Arc::new(MemoryStorage::new());
        let host = RecordingHost::with_os_dark(false);
        (store_with(prefs.clone(), host.clone()), prefs, host)
    }

    #[test]
    fn defaults_without_persisted_preferences() {
        let (store, _, host) = fresh();
        let s = store.snapshot();
        assert_eq!(s.layout.mode, LayoutMode::Mix);
        assert_eq!(s.theme.mode, ThemeMode::System);
        assert_eq!(s.theme.color_primary, "#1890ff");
        assert_eq!(s.theme.border_radius, 6);
        assert!(s.layout.show_logo);
        assert!(!s.sidebar_collapsed());
        assert!(host.has("theme-dynamic"));
        assert!(!host.has(DARK_CLASS));
    }

    #[test]
    fn restores_persisted_preferences() {
        let prefs = Arc::new(MemoryStorage::with_items([
            ("themeStyle", "classic"),
            ("themeMode", "dark"),
            ("layoutMode", "vertical"),
            ("sidebarCollapsed", "true"),
            ("userActionsPosition", "sidebar"),
            ("logoPosition", "sidebar"),
            ("showLogo", "false"),
        ]));
        let host = RecordingHost::with_os_dark(false);
        let store = store_with(prefs, host.clone());
        let s = store.snapshot();

        assert_eq!(s.theme.style, ThemeStyle::Classic);
        assert_eq!(s.layout.mode, LayoutMode::Vertical);
        assert_eq!(s.layout.sidebar, SidebarState::ManuallyCollapsed);
        assert_eq!(s.layout.user_actions_position, Placement::Sidebar);
        assert!(!s.layout.show_logo);
        assert!(s.is_dark_mode);
        assert!(host.has("theme-classic"));
        assert!(!host.has("theme-dynamic"));
        assert!(host.has(DARK_CLASS));
    }

    #[test]
    fn invalid_persisted_values_fall_back_to_defaults() {
        let prefs = Arc::new(MemoryStorage::with_items([
            ("layoutMode", "diagonal"),
            ("themeMode", ""),
            ("sidebarCollapsed", "maybe"),
        ]));
        let store = store_with(prefs, RecordingHost::with_os_dark(false));
        let s = store.snapshot();
        assert_eq!(s.layout.mode, LayoutMode::Mix);
        assert_eq!(s.theme.mode, ThemeMode::System);
        assert_eq!(s.layout.sidebar, SidebarState::Expanded);
    }

    #[test]
    fn unavailable_storage_never_fails() {
        let store = ConfigStore::new(
            Arc::new(RejectingStorage),
            RecordingHost::with_os_dark(false),
            &load_config(None).unwrap(),
        );
        store.set_layout_mode(LayoutMode::Horizontal);
        store.set_theme_mode(ThemeMode::Dark);
        store.toggle_sidebar();
        let s = store.snapshot();
        assert_eq!(s.layout.mode, LayoutMode::Horizontal);
        assert!(s.is_dark_mode);
        assert!(s.sidebar_collapsed());
    }

    #[test]
    fn setters_persist() {
        let (store, prefs, host) = fresh();
        store.set_theme_style(ThemeStyle::Classic);
        store.set_layout_mode(LayoutMode::Horizontal);
        store.set_sidebar_collapsed(true);
        store.set_logo_position(Placement::Sidebar);
        store.set_user_actions_position(Placement::Sidebar);
        store.toggle_show_logo();

        assert_eq!(prefs.get("themeStyle").as_deref(), Some("classic"));
        assert_eq!(prefs.get("layoutMode").as_deref(), Some("horizontal"));
        assert_eq!(prefs.get("sidebarCollapsed").as_deref(), Some("true"));
        assert_eq!(prefs.get("logoPosition").as_deref(), Some("sidebar"));
        assert_eq!(prefs.get("userActionsPosition").as_deref(), Some("sidebar"));
        assert_eq!(prefs.get("showLogo").as_deref(), Some("false"));
        assert!(host.has("theme-classic"));
        assert!(!host.has("theme-dynamic"));
    }

    #[test]
    fn viewport_widths_drive_drawer_and_auto_collapse() {
        let (store, _, _) = fresh();

        store.on_viewport_resize(500.0);
        let s = store.snapshot();
        assert!(s.is_drawer_mode);
        assert!(!s.drawer_visible);

        store.on_viewport_resize(700.0);
        let s = store.snapshot();
        assert!(!s.is_drawer_mode);
        assert_eq!(s.layout.sidebar, SidebarState::AutoCollapsed);

        store.on_viewport_resize(1280.0);
        let s = store.snapshot();
        assert!(!s.is_drawer_mode);
        assert_eq!(s.layout.sidebar, SidebarState::Expanded);
    }

    #[test]
    fn widening_never_undoes_a_manual_collapse() {
        let (store, _, _) = fresh();
        store.toggle_sidebar();
        store.on_viewport_resize(700.0);
        assert_eq!(store.snapshot().layout.sidebar, SidebarState::ManuallyCollapsed);
        store.on_viewport_resize(1280.0);
        assert_eq!(store.snapshot().layout.sidebar, SidebarState::ManuallyCollapsed);
    }

    #[test]
    fn manual_toggle_overrides_auto_collapse() {
        let (store, prefs, _) = fresh();
        store.on_viewport_resize(700.0);
        assert_eq!(store.snapshot().layout.sidebar, SidebarState::AutoCollapsed);
        // auto-collapse is not a preference
        assert_eq!(prefs.get("sidebarCollapsed"), None);

        store.toggle_sidebar();
        assert_eq!(store.snapshot().layout.sidebar, SidebarState::Expanded);

        // collapse manually while narrow, then widen: stays collapsed
        store.toggle_sidebar();
        store.on_viewport_resize(1024.0);
        assert_eq!(store.snapshot().layout.sidebar, SidebarState::ManuallyCollapsed);
    }

    #[test]
    fn drawer_toggle_only_works_in_drawer_mode() {
        let (store, _, _) = fresh();
        store.toggle_drawer();
        assert!(!store.snapshot().drawer_visible);

        store.on_viewport_resize(375.0);
        store.toggle_drawer();
        assert!(store.snapshot().drawer_visible);

        // further resizes inside drawer mode keep the drawer as is
        store.on_viewport_resize(390.0);
        assert!(store.snapshot().drawer_visible);

        store.close_drawer();
        assert!(!store.snapshot().drawer_visible);

        store.toggle_drawer();
        store.on_viewport_resize(1024.0);
        let s = store.snapshot();
        assert!(!s.is_drawer_mode);
        assert!(!s.drawer_visible);
    }

    #[test]
    fn system_mode_follows_os_preference() {
        let prefs = Arc::new(MemoryStorage::new());
        let host = RecordingHost::with_os_dark(true);
        let store = store_with(prefs.clone(), host.clone());

        store.set_theme_mode(ThemeMode::System);
        assert!(store.snapshot().is_dark_mode);
        assert!(host.has(DARK_CLASS));

        store.on_system_theme_change(false);
        let s = store.snapshot();
        assert!(!s.is_dark_mode);
        assert_eq!(s.theme.algorithm, ThemeAlgorithm::Default);
        assert!(!host.has(DARK_CLASS));
        assert_eq!(prefs.get("isDarkMode").as_deref(), Some("false"));
    }

    #[test]
    fn os_changes_are_ignored_outside_system_mode() {
        let (store, _, host) = fresh();
        store.set_theme_mode(ThemeMode::Light);
        store.on_system_theme_change(true);
        assert!(!store.snapshot().is_dark_mode);
        assert!(!host.has(DARK_CLASS));

        store.set_theme_mode(ThemeMode::Dark);
        store.on_system_theme_change(false);
        assert!(store.snapshot().is_dark_mode);
        assert!(host.has(DARK_CLASS));
    }

    #[test]
    fn toggle_dark_mode_switches_to_explicit_mode() {
        let (store, prefs, _) = fresh();
        store.toggle_dark_mode();
        let s = store.snapshot();
        assert_eq!(s.theme.mode, ThemeMode::Dark);
        assert!(s.is_dark_mode);
        assert_eq!(prefs.get("isDarkMode").as_deref(), Some("true"));

        store.toggle_dark_mode();
        assert_eq!(store.snapshot().theme.mode, ThemeMode::Light);
    }

    #[test]
    fn subscribers_see_each_change_once() {
        let (store, _, _) = fresh();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let id = store.subscribe(move |s| sink.lock().unwrap().push(s.layout.mode));

        store.set_layout_mode(LayoutMode::Vertical);
        // no-op mutation does not notify
        store.set_layout_mode(LayoutMode::Vertical);
        store.set_layout_mode(LayoutMode::Horizontal);
        assert!(store.unsubscribe(id));
        store.set_layout_mode(LayoutMode::Mix);

        assert_eq!(
            *seen.lock().unwrap(),
            vec![LayoutMode::Vertical, LayoutMode::Horizontal]
        );
        assert!(!store.unsubscribe(id));
    }

    #[test]
    fn switching_to_system_mode_notifies_once_with_resolved_darkness() {
        let prefs = Arc::new(MemoryStorage::with_items([("themeMode", "light")]));
        let host = RecordingHost::with_os_dark(true);
        let store = store_with(prefs, host.clone());
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        store.subscribe(move |s| {
            sink.lock()
                .unwrap()
                .push((s.theme.mode, s.is_dark_mode, s.theme.algorithm));
        });

        store.set_theme_mode(ThemeMode::System);

        assert_eq!(
            *seen.lock().unwrap(),
            vec![(ThemeMode::System, true, ThemeAlgorithm::Dark)]
        );
        assert!(host.has(DARK_CLASS));
    }

    #[test]
    fn settings_button_toggles_the_drawer() {
        let (store, _, _) = fresh();
        store.toggle_setting_drawer();
        assert!(store.snapshot().setting_drawer_visible);
        store.toggle_setting_drawer();
        assert!(!store.snapshot().setting_drawer_visible);

        store.open_setting_drawer();
        store.close_setting_drawer();
        assert!(!store.snapshot().setting_drawer_visible);
    }

    #[test]
    fn dispose_releases_resize_listener_once() {
        let (store, _, _) = fresh();
        // never subscribed
        store.dispose();

        let released = Arc::new(AtomicUsize::new(0));
        let counter = released.clone();
        store.attach_resize_listener(Box::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }));
        store.dispose();
        store.dispose();
        assert_eq!(released.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn reattaching_releases_previous_listener() {
        let (store, _, _) = fresh();
        let released = Arc::new(AtomicUsize::new(0));
        for _ in 0..2 {
            let counter = released.clone();
            store.attach_resize_listener(Box::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }));
        }
        assert_eq!(released.load(Ordering::SeqCst), 1);
        store.dispose();
        assert_eq!(released.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn clear_config_forgets_preferences() {
        let (store, prefs, host) = fresh();
        store.set_layout_mode(LayoutMode::Vertical);
        store.set_theme_style(ThemeStyle::Classic);
        store.set_theme_color("#722ed1");
        store.on_viewport_resize(400.0);
        prefs.set("token", "keep-me");

        store.clear_config();

        let s = store.snapshot();
        assert_eq!(s.layout.mode, LayoutMode::Mix);
        assert_eq!(s.theme.style, ThemeStyle::Dynamic);
        assert_eq!(s.theme.color_primary, "#1890ff");
        assert!(s.is_drawer_mode);
        assert_eq!(prefs.get("layoutMode"), None);
        assert_eq!(prefs.get("token").as_deref(), Some("keep-me"));
        assert!(host.has("theme-dynamic"));
    }
}

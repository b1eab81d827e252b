//! Layout and theme preferences.
//!
//! [`ConfigStore`] is the single source of truth for how the shell is laid
//! out and themed. It is an explicit state container: every mutation runs to
//! completion, persists what it must, touches the document root through a
//! [`ThemeHost`] and then notifies subscribers with the new [`ConfigState`].
//! Visibility flags are derived from the state on read.

mod host;
mod state;
mod store;

pub use host::{BrowserThemeHost, ThemeHost, DARK_MEDIA_QUERY};
pub use state::{ConfigState, LayoutConfig, PresetColor, ThemeConfig, PRESET_COLORS};
pub use store::{ConfigStore, SubscriptionId, Teardown};

/// Persisted preference keys.
pub mod keys {
    pub const THEME_STYLE: &str = "themeStyle";
    pub const THEME_MODE: &str = "themeMode";
    pub const LAYOUT_MODE: &str = "layoutMode";
    pub const SIDEBAR_COLLAPSED: &str = "sidebarCollapsed";
    pub const USER_ACTIONS_POSITION: &str = "userActionsPosition";
    pub const LOGO_POSITION: &str = "logoPosition";
    pub const SHOW_LOGO: &str = "showLogo";
    pub const IS_DARK_MODE: &str = "isDarkMode";

    pub const ALL: [&str; 8] = [
        THEME_STYLE,
        THEME_MODE,
        LAYOUT_MODE,
        SIDEBAR_COLLAPSED,
        USER_ACTIONS_POSITION,
        LOGO_POSITION,
        SHOW_LOGO,
        IS_DARK_MODE,
    ];
}

/// Root class toggled while the dark palette is active.
pub const DARK_CLASS: &str = "dark";

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum ThemeStyle {
    #[default]
    Dynamic,
    Classic,
}

impl ThemeStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeStyle::Dynamic => "dynamic",
            ThemeStyle::Classic => "classic",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "dynamic" => Some(ThemeStyle::Dynamic),
            "classic" => Some(ThemeStyle::Classic),
            _ => None,
        }
    }

    /// Class set on the document root, e.g. `theme-dynamic`.
    pub fn class_name(&self) -> &'static str {
        match self {
            ThemeStyle::Dynamic => "theme-dynamic",
            ThemeStyle::Classic => "theme-classic",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ThemeStyle::Dynamic => "Dynamic",
            ThemeStyle::Classic => "Classic",
        }
    }

    pub fn all() -> [ThemeStyle; 2] {
        [ThemeStyle::Dynamic, ThemeStyle::Classic]
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum ThemeMode {
    Light,
    Dark,
    #[default]
    System,
}

impl ThemeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
            ThemeMode::System => "system",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "light" => Some(ThemeMode::Light),
            "dark" => Some(ThemeMode::Dark),
            "system" => Some(ThemeMode::System),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ThemeMode::Light => "Light",
            ThemeMode::Dark => "Dark",
            ThemeMode::System => "Follow system",
        }
    }

    pub fn all() -> [ThemeMode; 3] {
        [ThemeMode::Light, ThemeMode::Dark, ThemeMode::System]
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum LayoutMode {
    /// Top bar only.
    Horizontal,
    /// Sidebar only.
    Vertical,
    /// Top bar and sidebar, with configurable placement of logo and actions.
    #[default]
    Mix,
}

impl LayoutMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutMode::Horizontal => "horizontal",
            LayoutMode::Vertical => "vertical",
            LayoutMode::Mix => "mix",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "horizontal" => Some(LayoutMode::Horizontal),
            "vertical" => Some(LayoutMode::Vertical),
            "mix" => Some(LayoutMode::Mix),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            LayoutMode::Horizontal => "Top navigation",
            LayoutMode::Vertical => "Side navigation",
            LayoutMode::Mix => "Mixed",
        }
    }

    pub fn all() -> [LayoutMode; 3] {
        [LayoutMode::Horizontal, LayoutMode::Vertical, LayoutMode::Mix]
    }
}

/// Where the logo or the user actions are placed in `Mix` layout.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Placement {
    #[default]
    Header,
    Sidebar,
}

impl Placement {
    pub fn as_str(&self) -> &'static str {
        match self {
            Placement::Header => "header",
            Placement::Sidebar => "sidebar",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "header" => Some(Placement::Header),
            "sidebar" => Some(Placement::Sidebar),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum ThemeAlgorithm {
    #[default]
    Default,
    Dark,
}

/// Sidebar collapse state.
///
/// `AutoCollapsed` is only ever entered from `Expanded` by a narrowing
/// viewport and only ever left back to `Expanded` by a widening one or by a
/// manual toggle; a manual collapse survives any resize.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum SidebarState {
    #[default]
    Expanded,
    ManuallyCollapsed,
    AutoCollapsed,
}

impl SidebarState {
    pub fn from_collapsed(collapsed: bool) -> Self {
        if collapsed {
            SidebarState::ManuallyCollapsed
        } else {
            SidebarState::Expanded
        }
    }

    pub fn is_collapsed(self) -> bool {
        !matches!(self, SidebarState::Expanded)
    }

    /// Manual toggle: flips the visible state and never yields `AutoCollapsed`.
    pub fn toggled(self) -> Self {
        Self::from_collapsed(!self.is_collapsed())
    }

    pub fn narrowed(self) -> Self {
        match self {
            SidebarState::Expanded => SidebarState::AutoCollapsed,
            other => other,
        }
    }

    pub fn widened(self) -> Self {
        match self {
            SidebarState::AutoCollapsed => SidebarState::Expanded,
            other => other,
        }
    }
}

/// Viewport width bucket.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ViewportClass {
    Drawer,
    Narrow,
    Wide,
}

impl ViewportClass {
    pub fn classify(width: f64, breakpoints: &crate::shared::config::ViewportConfig) -> Self {
        if width < breakpoints.drawer_below {
            ViewportClass::Drawer
        } else if width < breakpoints.collapse_below {
            ViewportClass::Narrow
        } else {
            ViewportClass::Wide
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::config::ViewportConfig;

    #[test]
    fn sidebar_transition_table() {
        use SidebarState::*;

        assert_eq!(Expanded.narrowed(), AutoCollapsed);
        assert_eq!(ManuallyCollapsed.narrowed(), ManuallyCollapsed);
        assert_eq!(AutoCollapsed.narrowed(), AutoCollapsed);

        assert_eq!(AutoCollapsed.widened(), Expanded);
        assert_eq!(ManuallyCollapsed.widened(), ManuallyCollapsed);
        assert_eq!(Expanded.widened(), Expanded);

        assert_eq!(Expanded.toggled(), ManuallyCollapsed);
        assert_eq!(ManuallyCollapsed.toggled(), Expanded);
        assert_eq!(AutoCollapsed.toggled(), Expanded);
    }

    #[test]
    fn toggle_never_produces_auto_collapse() {
        for state in [
            SidebarState::Expanded,
            SidebarState::ManuallyCollapsed,
            SidebarState::AutoCollapsed,
        ] {
            let next = state.toggled();
            assert_ne!(next, SidebarState::AutoCollapsed);
            assert_ne!(next.is_collapsed(), state.is_collapsed());
        }
    }

    #[test]
    fn viewport_buckets_follow_breakpoints() {
        let bp = ViewportConfig::default();
        assert_eq!(ViewportClass::classify(320.0, &bp), ViewportClass::Drawer);
        assert_eq!(ViewportClass::classify(639.9, &bp), ViewportClass::Drawer);
        assert_eq!(ViewportClass::classify(640.0, &bp), ViewportClass::Narrow);
        assert_eq!(ViewportClass::classify(767.0, &bp), ViewportClass::Narrow);
        assert_eq!(ViewportClass::classify(768.0, &bp), ViewportClass::Wide);
    }

    #[test]
    fn enum_strings_round_trip_through_storage_values() {
        for mode in LayoutMode::all() {
            assert_eq!(LayoutMode::parse(mode.as_str()), Some(mode));
        }
        for mode in ThemeMode::all() {
            assert_eq!(ThemeMode::parse(mode.as_str()), Some(mode));
        }
        assert_eq!(ThemeStyle::parse("neon"), None);
        assert_eq!(Placement::parse("footer"), None);
    }
}

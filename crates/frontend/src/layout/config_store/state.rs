use super::{LayoutMode, Placement, SidebarState, ThemeAlgorithm, ThemeMode, ThemeStyle};
use crate::shared::config::ThemeDefaults;

#[derive(Clone, Debug, PartialEq)]
pub struct LayoutConfig {
    pub mode: LayoutMode,
    pub show_logo: bool,
    pub sidebar: SidebarState,
    pub logo_position: Placement,
    pub user_actions_position: Placement,
}

impl LayoutConfig {
    pub fn sidebar_collapsed(&self) -> bool {
        self.sidebar.is_collapsed()
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            mode: LayoutMode::default(),
            show_logo: true,
            sidebar: SidebarState::Expanded,
            logo_position: Placement::Header,
            user_actions_position: Placement::Header,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ThemeConfig {
    pub style: ThemeStyle,
    pub mode: ThemeMode,
    pub color_primary: String,
    pub border_radius: u32,
    pub algorithm: ThemeAlgorithm,
}

impl ThemeConfig {
    pub fn from_defaults(defaults: &ThemeDefaults) -> Self {
        Self {
            style: ThemeStyle::default(),
            mode: ThemeMode::default(),
            color_primary: defaults.color_primary.clone(),
            border_radius: defaults.border_radius,
            algorithm: ThemeAlgorithm::Default,
        }
    }

    /// CSS custom properties for the current palette.
    pub fn css_vars(&self) -> String {
        format!(
            "--color-primary: {}; --border-radius: {}px;",
            self.color_primary, self.border_radius
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PresetColor {
    pub name: &'static str,
    pub color: &'static str,
}

pub const PRESET_COLORS: [PresetColor; 8] = [
    PresetColor { name: "Daybreak Blue", color: "#1890ff" },
    PresetColor { name: "Geek Blue", color: "#2f54eb" },
    PresetColor { name: "Golden Purple", color: "#722ed1" },
    PresetColor { name: "Cyan", color: "#13c2c2" },
    PresetColor { name: "Polar Green", color: "#52c41a" },
    PresetColor { name: "Sunset Orange", color: "#fa8c16" },
    PresetColor { name: "Dust Red", color: "#f5222d" },
    PresetColor { name: "Magenta", color: "#eb2f96" },
];

/// Everything the shell renders from. Cloned into subscribers after each
/// mutation.
#[derive(Clone, Debug, PartialEq)]
pub struct ConfigState {
    pub layout: LayoutConfig,
    pub theme: ThemeConfig,
    pub is_dark_mode: bool,
    pub is_drawer_mode: bool,
    pub drawer_visible: bool,
    pub setting_drawer_visible: bool,
}

impl ConfigState {
    pub fn new(theme_defaults: &ThemeDefaults) -> Self {
        Self {
            layout: LayoutConfig::default(),
            theme: ThemeConfig::from_defaults(theme_defaults),
            is_dark_mode: false,
            is_drawer_mode: false,
            drawer_visible: false,
            setting_drawer_visible: false,
        }
    }

    pub fn sidebar_collapsed(&self) -> bool {
        self.layout.sidebar_collapsed()
    }

    pub fn show_header_logo(&self) -> bool {
        self.layout.show_logo
            && match self.layout.mode {
                LayoutMode::Horizontal => true,
                LayoutMode::Mix => self.layout.logo_position == Placement::Header,
                LayoutMode::Vertical => false,
            }
    }

    pub fn show_sidebar_logo(&self) -> bool {
        self.layout.show_logo
            && match self.layout.mode {
                LayoutMode::Vertical => true,
                LayoutMode::Mix => self.layout.logo_position == Placement::Sidebar,
                LayoutMode::Horizontal => false,
            }
    }

    pub fn show_header_user_actions(&self) -> bool {
        match self.layout.mode {
            LayoutMode::Horizontal => true,
            LayoutMode::Mix => self.layout.user_actions_position == Placement::Header,
            LayoutMode::Vertical => false,
        }
    }

    pub fn show_sidebar_user_actions(&self) -> bool {
        match self.layout.mode {
            LayoutMode::Vertical => true,
            LayoutMode::Mix => self.layout.user_actions_position == Placement::Sidebar,
            LayoutMode::Horizontal => false,
        }
    }

    /// The header carries the drawer toggle, so it is shown in drawer mode
    /// even for a vertical layout.
    pub fn show_header(&self) -> bool {
        self.layout.mode != LayoutMode::Vertical || self.is_drawer_mode
    }

    pub fn show_sidebar(&self) -> bool {
        self.layout.mode != LayoutMode::Horizontal && !self.is_drawer_mode
    }

    pub fn show_header_menu(&self) -> bool {
        self.layout.mode == LayoutMode::Horizontal && !self.is_drawer_mode
    }

    pub fn show_sidebar_menu(&self) -> bool {
        self.layout.mode != LayoutMode::Horizontal
    }

    pub fn current_preset_color(&self) -> Option<&'static PresetColor> {
        PRESET_COLORS
            .iter()
            .find(|p| p.color.eq_ignore_ascii_case(&self.theme.color_primary))
    }
}

use once_cell::sync::Lazy;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    pub app: AppSection,
    pub api: ApiConfig,
    pub viewport: ViewportConfig,
    pub theme: ThemeDefaults,
    pub auth: AuthConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppSection {
    pub title: String,
    pub toast_ms: u32,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ApiConfig {
    /// Absolute base URL. When empty the base is derived from the page
    /// location and `port`.
    #[serde(default)]
    pub base_url: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct ViewportConfig {
    /// Below this width the sidebar turns into a drawer.
    pub drawer_below: f64,
    /// Below this width an expanded sidebar is auto-collapsed.
    pub collapse_below: f64,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ThemeDefaults {
    pub color_primary: String,
    pub border_radius: u32,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct AuthConfig {
    pub resend_seconds: u32,
    pub qr_poll_ms: u32,
}

/// Default configuration embedded in the bundle
const DEFAULT_CONFIG: &str = r##"
[app]
title = "Coffee Admin"
toast_ms = 3000

[api]
base_url = ""
port = 3000

[viewport]
drawer_below = 640.0
collapse_below = 768.0

[theme]
color_primary = "#1890ff"
border_radius = 6

[auth]
resend_seconds = 60
qr_poll_ms = 2000
"##;

/// Id of the optional `<script type="text/toml">` element whose body is
/// layered over the embedded defaults at start-up.
pub const CONFIG_ELEMENT_ID: &str = "app-config";

static CONFIG: Lazy<AppConfig> = Lazy::new(|| resolve_config(page_overrides().as_deref()));

/// Like [`load_config`], but a broken override document is dropped with a
/// warning instead of failing start-up.
fn resolve_config(overrides: Option<&str>) -> AppConfig {
    match load_config(overrides) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("invalid configuration, using built-in values: {}", e);
            load_config(None).unwrap_or_else(|_| AppConfig::fallback())
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn page_overrides() -> Option<String> {
    web_sys::window()?
        .document()?
        .get_element_by_id(CONFIG_ELEMENT_ID)?
        .text_content()
        .filter(|text| !text.trim().is_empty())
}

#[cfg(not(target_arch = "wasm32"))]
fn page_overrides() -> Option<String> {
    None
}

/// Parse configuration, layering `overrides` (a TOML document) on top of the
/// embedded defaults. Missing sections in `overrides` keep their defaults.
pub fn load_config(overrides: Option<&str>) -> Result<AppConfig, toml::de::Error> {
    let mut base: toml::Table = toml::from_str(DEFAULT_CONFIG)?;
    if let Some(src) = overrides {
        let extra: toml::Table = toml::from_str(src)?;
        merge_tables(&mut base, extra);
    }
    toml::Value::Table(base).try_into()
}

fn merge_tables(base: &mut toml::Table, extra: toml::Table) {
    for (key, value) in extra {
        if let toml::Value::Table(src) = value {
            if let Some(toml::Value::Table(dst)) = base.get_mut(&key) {
                merge_tables(dst, src);
                continue;
            }
            base.insert(key, toml::Value::Table(src));
        } else {
            base.insert(key, value);
        }
    }
}

/// Process-wide configuration.
pub fn config() -> &'static AppConfig {
    &CONFIG
}

impl AppConfig {
    fn fallback() -> Self {
        Self {
            app: AppSection {
                title: "Coffee Admin".into(),
                toast_ms: 3000,
            },
            api: ApiConfig {
                base_url: String::new(),
                port: 3000,
            },
            viewport: ViewportConfig::default(),
            theme: ThemeDefaults {
                color_primary: "#1890ff".into(),
                border_radius: 6,
            },
            auth: AuthConfig {
                resend_seconds: 60,
                qr_poll_ms: 2000,
            },
        }
    }
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            drawer_below: 640.0,
            collapse_below: 768.0,
        }
    }
}

use web_sys::window;

/// The document and OS signals the config store reads and writes.
pub trait ThemeHost: Send + Sync {
    /// Add or remove `class` on `<html>`. Idempotent.
    fn set_root_class(&self, class: &str, enabled: bool);

    /// Current OS dark-mode preference.
    fn prefers_dark(&self) -> bool;
}

pub const DARK_MEDIA_QUERY: &str = "(prefers-color-scheme: dark)";

#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserThemeHost;

impl ThemeHost for BrowserThemeHost {
    fn set_root_class(&self, class: &str, enabled: bool) {
        let root = match window()
            .and_then(|w| w.document())
            .and_then(|d| d.document_element())
        {
            Some(root) => root,
            None => return,
        };
        let _ = root.class_list().toggle_with_force(class, enabled);
    }

    fn prefers_dark(&self) -> bool {
        window()
            .and_then(|w| w.match_media(DARK_MEDIA_QUERY).ok().flatten())
            .map(|mq| mq.matches())
            .unwrap_or(false)
    }
}

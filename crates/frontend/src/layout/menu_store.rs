use leptos::prelude::*;

use crate::routes::generator::MenuItem;

/// Navigation menu entries and the current selection.
#[derive(Clone, Copy)]
pub struct MenuStore {
    pub menu_list: RwSignal<Vec<MenuItem>>,
    pub selected_keys: RwSignal<Vec<String>>,
    /// Expanded groups of the inline menu.
    pub open_keys: RwSignal<Vec<String>>,
}

impl MenuStore {
    pub fn new(menu_list: Vec<MenuItem>) -> Self {
        Self {
            menu_list: RwSignal::new(menu_list),
            selected_keys: RwSignal::new(Vec::new()),
            open_keys: RwSignal::new(Vec::new()),
        }
    }

    /// Follow the router: the selection is exactly the current path.
    pub fn sync_location(&self, path: &str) {
        let selected = vec![path.to_string()];
        if self.selected_keys.with_untracked(|keys| *keys != selected) {
            self.selected_keys.set(selected);
        }
        let ancestors = self
            .menu_list
            .with_untracked(|menu| ancestor_keys(menu, path));
        if !ancestors.is_empty() {
            self.open_keys.update(|open| {
                for key in ancestors {
                    if !open.contains(&key) {
                        open.push(key);
                    }
                }
            });
        }
    }

    pub fn select(&self, key: &str) {
        self.selected_keys.set(vec![key.to_string()]);
    }

    pub fn toggle_open(&self, key: &str) {
        self.open_keys.update(|open| {
            if let Some(pos) = open.iter().position(|k| k == key) {
                open.remove(pos);
            } else {
                open.push(key.to_string());
            }
        });
    }
}

pub fn use_menu() -> MenuStore {
    use_context::<MenuStore>().expect("MenuStore not provided")
}

/// Keys of the groups enclosing the entry whose key is `key`.
pub fn ancestor_keys(menu: &[MenuItem], key: &str) -> Vec<String> {
    fn walk(items: &[MenuItem], key: &str, trail: &mut Vec<String>) -> bool {
        for item in items {
            if item.key == key {
                return true;
            }
            if let Some(children) = &item.children {
                trail.push(item.key.clone());
                if walk(children, key, trail) {
                    return true;
                }
                trail.pop();
            }
        }
        false
    }

    let mut trail = Vec::new();
    if walk(menu, key, &mut trail) {
        trail
    } else {
        Vec::new()
    }
}

/// Whether `item` or one of its descendants is selected.
pub fn contains_key(item: &MenuItem, key: &str) -> bool {
    item.key == key
        || item
            .children
            .as_ref()
            .map(|c| c.iter().any(|child| contains_key(child, key)))
            .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::definitions::route_definitions;
    use crate::routes::generator::{generate_menu, generate_routes};

    fn menu() -> Vec<MenuItem> {
        generate_menu(&generate_routes(&route_definitions()).layout_routes)
    }

    #[test]
    fn ancestors_of_nested_entry() {
        assert_eq!(ancestor_keys(&menu(), "/system/profile"), vec!["/system"]);
        assert!(ancestor_keys(&menu(), "/").is_empty());
        assert!(ancestor_keys(&menu(), "/missing").is_empty());
    }

    #[test]
    fn group_contains_its_descendants() {
        let menu = menu();
        let system = menu.iter().find(|m| m.key == "/system").unwrap();
        assert!(contains_key(system, "/system/appearance"));
        assert!(!contains_key(system, "/"));
    }

    #[test]
    fn selection_follows_location_exactly() {
        let store = MenuStore::new(menu());

        store.sync_location("/system/profile");
        assert_eq!(store.selected_keys.get_untracked(), vec!["/system/profile"]);
        // the enclosing group opens but is not itself selected
        assert_eq!(store.open_keys.get_untracked(), vec!["/system"]);

        store.sync_location("/");
        assert_eq!(store.selected_keys.get_untracked(), vec!["/"]);
        assert_eq!(store.open_keys.get_untracked(), vec!["/system"]);
    }

    #[test]
    fn click_selects_the_key() {
        let store = MenuStore::new(menu());
        store.sync_location("/system/profile");

        store.select("/");
        assert_eq!(store.selected_keys.get_untracked(), vec!["/"]);

        store.toggle_open("/system");
        store.toggle_open("/system");
        assert_eq!(store.open_keys.get_untracked(), vec!["/system"]);
    }
}

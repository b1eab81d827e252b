//! Route tree partitioning and menu projection.
//!
//! A static tree of [`RouteDef`]s is split into routes rendered inside the
//! application shell and routes rendered on their own (login and friends).
//! The shell routes are then projected into the navigation menu.

use super::definitions::Page;

/// Declarative route definition.
#[derive(Clone, Debug, PartialEq)]
pub struct RouteDef {
    /// Absolute (`/system`) or relative to the parent (`profile`).
    pub path: &'static str,
    pub label: Option<&'static str>,
    pub icon: Option<&'static str>,
    /// Rendered outside the shell and hoisted to the top level.
    pub independent: bool,
    pub page: Option<Page>,
    /// Visible only to users holding one of these roles; empty means everyone.
    pub roles: Vec<&'static str>,
    pub children: Vec<RouteDef>,
}

impl RouteDef {
    pub fn new(path: &'static str) -> Self {
        Self {
            path,
            label: None,
            icon: None,
            independent: false,
            page: None,
            roles: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn label(mut self, label: &'static str) -> Self {
        self.label = Some(label);
        self
    }

    pub fn icon(mut self, icon: &'static str) -> Self {
        self.icon = Some(icon);
        self
    }

    pub fn page(mut self, page: Page) -> Self {
        self.page = Some(page);
        self
    }

    pub fn independent(mut self) -> Self {
        self.independent = true;
        self
    }

    pub fn roles(mut self, roles: &[&'static str]) -> Self {
        self.roles = roles.to_vec();
        self
    }

    pub fn children(mut self, children: Vec<RouteDef>) -> Self {
        self.children = children;
        self
    }
}

/// A route ready for the router: the definition plus its resolved path.
#[derive(Clone, Debug, PartialEq)]
pub struct RouteNode {
    pub path: String,
    pub full_path: String,
    pub label: Option<String>,
    pub icon: Option<String>,
    pub page: Option<Page>,
    pub roles: Vec<String>,
    pub root: bool,
    pub children: Vec<RouteNode>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GeneratedRoutes {
    pub layout_routes: Vec<RouteNode>,
    pub independent_routes: Vec<RouteNode>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MenuItem {
    pub key: String,
    pub label: String,
    pub icon: Option<String>,
    pub children: Option<Vec<MenuItem>>,
}

pub fn generate_routes(defs: &[RouteDef]) -> GeneratedRoutes {
    let mut independent_routes = Vec::new();
    let layout_routes = partition(defs, "", &mut independent_routes);
    GeneratedRoutes {
        layout_routes,
        independent_routes,
    }
}

fn partition(defs: &[RouteDef], parent: &str, independent: &mut Vec<RouteNode>) -> Vec<RouteNode> {
    let mut layout = Vec::new();
    for def in defs {
        if def.independent {
            // the ancestor path does not apply to a hoisted route
            independent.push(to_node(def, normalize(def.path)));
            continue;
        }
        let full_path = join(parent, def.path);
        let children = partition(&def.children, &full_path, independent);
        layout.push(RouteNode {
            children,
            ..leaf(def, full_path)
        });
    }
    layout
}

fn to_node(def: &RouteDef, full_path: String) -> RouteNode {
    let children = def
        .children
        .iter()
        .map(|child| to_node(child, join(&full_path, child.path)))
        .collect();
    RouteNode {
        children,
        ..leaf(def, full_path)
    }
}

fn leaf(def: &RouteDef, full_path: String) -> RouteNode {
    RouteNode {
        path: def.path.to_string(),
        full_path,
        label: def.label.map(str::to_string),
        icon: def.icon.map(str::to_string),
        page: def.page,
        roles: def.roles.iter().map(|r| r.to_string()).collect(),
        root: false,
        children: Vec::new(),
    }
}

/// `/` + path without a trailing slash; the root stays `/`.
pub fn normalize(path: &str) -> String {
    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{}", trimmed)
    }
}

fn join(parent: &str, path: &str) -> String {
    if path.starts_with('/') || parent.is_empty() {
        return normalize(path);
    }
    let parent = normalize(parent);
    if parent == "/" {
        normalize(path)
    } else {
        normalize(&format!("{}/{}", parent, path))
    }
}

/// Depth-first menu projection of shell routes.
///
/// Unlabeled leaves are dropped; an unlabeled route is kept as a group when
/// any descendant is labeled.
pub fn generate_menu(routes: &[RouteNode]) -> Vec<MenuItem> {
    routes.iter().filter_map(menu_item).collect()
}

fn menu_item(node: &RouteNode) -> Option<MenuItem> {
    let children = generate_menu(&node.children);
    let label = match &node.label {
        Some(label) => label.clone(),
        None if !children.is_empty() => fallback_label(&node.full_path),
        None => return None,
    };
    Some(MenuItem {
        key: node.full_path.clone(),
        label,
        icon: node.icon.clone(),
        children: if children.is_empty() {
            None
        } else {
            Some(children)
        },
    })
}

fn fallback_label(full_path: &str) -> String {
    let segment = full_path
        .rsplit('/')
        .find(|s| !s.is_empty())
        .unwrap_or("/");
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => segment.to_string(),
    }
}

/// Whether a holder of `user_roles` may see a route requiring `required`.
pub fn roles_allow(required: &[String], user_roles: &[String]) -> bool {
    required.is_empty() || required.iter().any(|r| user_roles.contains(r))
}

/// Drop routes (and their subtrees) the user may not see.
pub fn filter_routes_by_roles(routes: &[RouteNode], user_roles: &[String]) -> Vec<RouteNode> {
    routes
        .iter()
        .filter(|node| roles_allow(&node.roles, user_roles))
        .map(|node| RouteNode {
            children: filter_routes_by_roles(&node.children, user_roles),
            ..node.clone()
        })
        .collect()
}

/// Outcome of matching a location against the [`RouteTable`].
#[derive(Clone, Debug, PartialEq)]
pub enum Resolved {
    Independent(Page),
    Layout { page: Page, roles: Vec<String> },
    /// A group without its own page; go to its first page instead.
    Redirect(String),
    NotFound,
}

/// Router configuration: the shell root wrapping all layout routes, followed
/// by the independent routes.
#[derive(Clone, Debug, PartialEq)]
pub struct RouteTable {
    pub root: RouteNode,
    pub independent: Vec<RouteNode>,
}

pub fn create_routes(defs: &[RouteDef]) -> RouteTable {
    let GeneratedRoutes {
        layout_routes,
        independent_routes,
    } = generate_routes(defs);
    RouteTable {
        root: RouteNode {
            path: "/".into(),
            full_path: "/".into(),
            label: None,
            icon: None,
            page: None,
            roles: Vec::new(),
            root: true,
            children: layout_routes,
        },
        independent: independent_routes,
    }
}

impl RouteTable {
    pub fn layout_routes(&self) -> &[RouteNode] {
        &self.root.children
    }

    /// Top-level routes in router order.
    pub fn routes(&self) -> impl Iterator<Item = &RouteNode> {
        std::iter::once(&self.root).chain(self.independent.iter())
    }

    pub fn resolve(&self, location: &str) -> Resolved {
        let path = normalize(location.split(['?', '#']).next().unwrap_or(""));

        if let Some(page) = self
            .independent
            .iter()
            .find_map(|node| find(node, &path))
            .and_then(|node| node.page)
        {
            return Resolved::Independent(page);
        }

        match self.layout_routes().iter().find_map(|node| find(node, &path)) {
            Some(node) => match node.page {
                Some(page) => Resolved::Layout {
                    page,
                    roles: node.roles.clone(),
                },
                None => match first_page(node) {
                    Some(target) => Resolved::Redirect(target.full_path.clone()),
                    None => Resolved::NotFound,
                },
            },
            None => Resolved::NotFound,
        }
    }
}

fn find<'a>(node: &'a RouteNode, path: &str) -> Option<&'a RouteNode> {
    if node.full_path == path {
        return Some(node);
    }
    node.children.iter().find_map(|child| find(child, path))
}

fn first_page(node: &RouteNode) -> Option<&RouteNode> {
    node.children.iter().find_map(|child| {
        if child.page.is_some() {
            Some(child)
        } else {
            first_page(child)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(nodes: &[RouteNode]) -> Vec<&str> {
        nodes.iter().map(|n| n.full_path.as_str()).collect()
    }

    #[test]
    fn home_and_login_scenario() {
        let defs = vec![
            RouteDef::new("/").label("Home").page(Page::Dashboard),
            RouteDef::new("/login").independent().page(Page::Login),
        ];
        let generated = generate_routes(&defs);
        assert_eq!(paths(&generated.layout_routes), vec!["/"]);
        assert_eq!(paths(&generated.independent_routes), vec!["/login"]);

        let menu = generate_menu(&generated.layout_routes);
        assert_eq!(
            menu,
            vec![MenuItem {
                key: "/".into(),
                label: "Home".into(),
                icon: None,
                children: None,
            }]
        );
    }

    #[test]
    fn nested_independent_route_is_hoisted_without_ancestor_path() {
        let defs = vec![
            RouteDef::new("/").label("Home").page(Page::Dashboard),
            RouteDef::new("/system").label("System").children(vec![
                RouteDef::new("profile").label("Profile").page(Page::Profile),
                RouteDef::new("lock").independent().page(Page::Login),
            ]),
            RouteDef::new("/register").independent().page(Page::Register),
        ];
        let generated = generate_routes(&defs);

        assert_eq!(paths(&generated.independent_routes), vec!["/lock", "/register"]);
        let system = &generated.layout_routes[1];
        assert_eq!(paths(&system.children), vec!["/system/profile"]);
        assert_eq!(system.children[0].path, "profile");
    }

    #[test]
    fn unlabeled_routes_drop_unless_they_group_labeled_children() {
        let defs = vec![
            RouteDef::new("/hidden").page(Page::NotFound),
            RouteDef::new("/tools").children(vec![
                RouteDef::new("inner").children(vec![RouteDef::new("deep")
                    .label("Deep")
                    .page(Page::Appearance)]),
                RouteDef::new("plain").page(Page::Profile),
            ]),
            RouteDef::new("/empty").children(vec![RouteDef::new("x").page(Page::Profile)]),
        ];
        let generated = generate_routes(&defs);
        // layout routes keep everything
        assert_eq!(paths(&generated.layout_routes), vec!["/hidden", "/tools", "/empty"]);

        let menu = generate_menu(&generated.layout_routes);
        assert_eq!(menu.len(), 1);
        assert_eq!(menu[0].key, "/tools");
        assert_eq!(menu[0].label, "Tools");
        let inner = &menu[0].children.as_ref().unwrap()[0];
        assert_eq!(inner.key, "/tools/inner");
        assert_eq!(inner.children.as_ref().unwrap()[0].key, "/tools/inner/deep");
        assert_eq!(menu[0].children.as_ref().unwrap().len(), 1);
    }

    #[test]
    fn sibling_order_is_preserved() {
        let defs = vec![
            RouteDef::new("/c").label("C"),
            RouteDef::new("/a").label("A"),
            RouteDef::new("/x").independent(),
            RouteDef::new("/b").label("B"),
            RouteDef::new("/y").independent(),
        ];
        let generated = generate_routes(&defs);
        let labels: Vec<_> = generate_menu(&generated.layout_routes)
            .into_iter()
            .map(|m| m.label)
            .collect();
        assert_eq!(labels, vec!["C", "A", "B"]);
        assert_eq!(paths(&generated.independent_routes), vec!["/x", "/y"]);
    }

    #[test]
    fn generation_is_idempotent() {
        let defs = crate::routes::definitions::route_definitions();
        let first = generate_routes(&defs);
        let second = generate_routes(&defs);
        assert_eq!(first, second);
        assert_eq!(
            generate_menu(&first.layout_routes),
            generate_menu(&second.layout_routes)
        );
        assert_eq!(create_routes(&defs), create_routes(&defs));
    }

    #[test]
    fn route_table_wraps_layout_under_root() {
        let table = create_routes(&crate::routes::definitions::route_definitions());
        let top: Vec<_> = table.routes().map(|r| r.full_path.as_str()).collect();
        assert_eq!(top[0], "/");
        assert!(table.routes().next().unwrap().root);
        assert!(top.contains(&"/auth/login"));
    }

    #[test]
    fn resolve_matches_exact_paths() {
        let table = create_routes(&crate::routes::definitions::route_definitions());
        assert_eq!(table.resolve("/auth/login?redirect=%2F"), Resolved::Independent(Page::Login));
        assert_eq!(
            table.resolve("/system/profile/"),
            Resolved::Layout {
                page: Page::Profile,
                roles: vec![]
            }
        );
        assert_eq!(table.resolve("/system"), Resolved::Redirect("/system/profile".into()));
        assert_eq!(table.resolve("/system/profile/extra"), Resolved::NotFound);
        assert_eq!(table.resolve("/nowhere"), Resolved::NotFound);
    }

    #[test]
    fn role_filter_hides_restricted_subtrees() {
        let defs = vec![
            RouteDef::new("/").label("Home").page(Page::Dashboard),
            RouteDef::new("/admin")
                .label("Admin")
                .roles(&["admin"])
                .children(vec![RouteDef::new("appearance").label("Appearance")]),
        ];
        let routes = generate_routes(&defs).layout_routes;

        let guest = filter_routes_by_roles(&routes, &[]);
        assert_eq!(paths(&guest), vec!["/"]);

        let admin = filter_routes_by_roles(&routes, &["admin".to_string()]);
        assert_eq!(generate_menu(&admin).len(), 2);
    }

    #[test]
    fn normalize_and_join() {
        assert_eq!(normalize(""), "/");
        assert_eq!(normalize("/"), "/");
        assert_eq!(normalize("a/b/"), "/a/b");
        assert_eq!(join("/", "x"), "/x");
        assert_eq!(join("/a", "b"), "/a/b");
        assert_eq!(join("/a", "/abs"), "/abs");
    }
}

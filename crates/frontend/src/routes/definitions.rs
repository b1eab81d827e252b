use super::generator::RouteDef;

/// Every screen the router can render.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Page {
    Dashboard,
    Profile,
    Appearance,
    Login,
    Register,
    ResetPassword,
    NotFound,
}

pub const LOGIN_PATH: &str = "/auth/login";
pub const HOME_PATH: &str = "/";

/// Static route tree of the application.
pub fn route_definitions() -> Vec<RouteDef> {
    vec![
        RouteDef::new("/")
            .label("Dashboard")
            .icon("home")
            .page(Page::Dashboard),
        RouteDef::new("/system")
            .label("System")
            .icon("settings")
            .children(vec![
                RouteDef::new("profile")
                    .label("Profile")
                    .icon("user")
                    .page(Page::Profile),
                RouteDef::new("appearance")
                    .label("Appearance")
                    .icon("palette")
                    .roles(&["admin"])
                    .page(Page::Appearance),
            ]),
        RouteDef::new("/auth").children(vec![
            RouteDef::new("/auth/login").independent().page(Page::Login),
            RouteDef::new("/auth/register")
                .independent()
                .page(Page::Register),
            RouteDef::new("/auth/reset-password")
                .independent()
                .page(Page::ResetPassword),
        ]),
    ]
}

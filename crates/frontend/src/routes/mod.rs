pub mod definitions;
pub mod generator;
pub mod routes;

pub use definitions::{route_definitions, Page};
pub use generator::{create_routes, generate_menu, generate_routes, MenuItem, RouteTable};

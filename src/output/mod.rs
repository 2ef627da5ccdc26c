//! Output formatting for the route-map configuration.
//!
//! - [`route_map`] - Router configuration text

mod route_map;

pub use route_map::{print_route_map, write_route_map};

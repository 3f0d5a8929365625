pub mod controller;
pub mod crud;
pub mod extractor;
pub mod model;
pub mod routes;
pub mod schema;

pub use routes::{auth_routes, user_routes};

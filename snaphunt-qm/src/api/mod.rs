//! API handlers for snaphunt-qm

pub mod health;
pub mod match_image;

pub use health::health_routes;
pub use match_image::match_routes;

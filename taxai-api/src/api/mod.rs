//! HTTP API handlers for taxai-api

pub mod health;
pub mod predict;
pub mod taxon;

pub use health::health_routes;
pub use predict::predict_routes;
pub use taxon::taxon_routes;

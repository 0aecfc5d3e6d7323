/*
 * Responsibility
 * - Open Service Broker API v2 surface (routes() re-export)
 */
pub mod dto;
pub mod extractors;
pub mod handlers;
mod routes;
pub mod validate;

pub use routes::routes;

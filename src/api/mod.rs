//! HTTP API layer.
//!
//! Routes, handlers, middleware, DTOs, and the OpenAPI document.

pub mod doc;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;

//! REST API server: routes, parameter decoding, error envelope, and OpenAPI documentation.

pub mod dto;
pub mod error;
pub mod openapi;
pub mod routes;
pub mod state;

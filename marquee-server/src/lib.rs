//! # Marquee Server
//!
//! Read-only HTTP API for the Marquee cinema catalog. Every route under
//! `/api/v1` builds a [`marquee_core::ListService`] or
//! [`marquee_core::RetrieveService`] for the request and returns its result
//! as JSON. The OpenAPI description of those routes is served unauthenticated
//! at the configured docs path.

pub mod app;
pub mod auth;
pub mod handlers;
pub mod infra;
pub mod openapi;
pub mod routes;

pub use app::create_app;
pub use infra::app_state::AppState;
pub use infra::errors::{AppError, AppResult};

//! Web layer for the transit backend.
//!
//! Provides HTTP endpoints for arrivals, stations and line metadata.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;

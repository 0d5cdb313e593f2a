//! Web layer for the departure board.
//!
//! Provides the JSON API, the board page, and static assets.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{ApiError, create_router};
pub use state::AppState;

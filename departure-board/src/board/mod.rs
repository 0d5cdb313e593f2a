//! Departure board aggregation.
//!
//! Turns a lookahead request into bounded upstream queries, merges their
//! results into a single ordered board, and resolves calling points for
//! individual services.

mod aggregate;
mod calling_points;
mod planner;

pub use aggregate::get_departure_board;
pub use calling_points::{ServiceCallingPoints, get_calling_points};
pub use planner::{CHUNK_MINS, Chunk, plan_chunks};

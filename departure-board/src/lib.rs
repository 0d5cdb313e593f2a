//! Departure board server.
//!
//! A web application that answers: "what leaves this station in the next
//! couple of hours?" Boards are assembled from several bounded Huxley
//! queries, merged into a single ordered list.

pub mod board;
pub mod config;
pub mod domain;
pub mod huxley;
pub mod stations;
pub mod web;

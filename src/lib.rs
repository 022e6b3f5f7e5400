//! Attendance tracking and monthly points for a corporation's site runs.
//!
//! Events are split between the players whose characters attended them, and
//! a player earns a point for each operational day where their share of the
//! day's events meets the minimum value.

pub mod config;
pub mod db;
pub mod error;
pub mod graphql;
pub mod models;
pub mod util;

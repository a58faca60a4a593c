//! Greedy timetable generation for an academic calendar.
//!
//! Subjects are placed week by week onto a 52-week, 6-day, 5-pair grid under
//! group and teacher hour caps, with holiday repair and a display-only
//! conflict classifier on top. `server` wraps the engine in a small HTTP API.

pub mod config;
pub mod conflicts;
pub mod data;
pub mod error;
pub mod feasibility;
pub mod ledger;
pub mod priority;
pub mod repair;
pub mod server;
pub mod solver;
pub mod store;
pub mod validation;

//! Centralized constants for the nginx controller.
//!
//! All project-wide constant values live here.
//! Change a value in one place and it applies everywhere.

pub mod nginx;
pub mod paths;

//! REST API handlers grouped by domain.

pub mod process;

//! Route Handlers

pub mod estimate;
pub mod schema;

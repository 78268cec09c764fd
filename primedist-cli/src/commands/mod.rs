//! Command implementations for the primedist CLI

pub mod distance;
pub mod scan;
pub mod config;

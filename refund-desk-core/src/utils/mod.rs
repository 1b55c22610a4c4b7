//! Utility functions module

pub mod datetime;

// src/core/mod.rs

pub mod fixed;
pub mod format;
pub mod numeric;
pub mod sanitize;

pub use fixed::FixedLine;

//! Trait seams for persistence and extraction backends.

pub mod backend;
pub mod driver;

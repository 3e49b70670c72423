//! Data model for file previews and extraction runs.

pub mod config;
pub mod file;
pub mod result;
pub mod template;

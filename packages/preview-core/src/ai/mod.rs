//! Remote AI backend client.

pub mod client;

pub use client::{ExtractClient, ExtractResponse};

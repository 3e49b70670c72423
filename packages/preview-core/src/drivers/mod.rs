//! Extraction and assistant driver implementations.

pub mod assistant;
pub mod mock;

pub use assistant::{Entity, MockAssistant};
pub use mock::MockDriver;

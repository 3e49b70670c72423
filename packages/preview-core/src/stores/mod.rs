//! Extract store and persistence backends.

pub mod extract;
pub mod file;
pub mod memory;

pub use extract::ExtractStore;
pub use file::JsonFileBackend;
pub use memory::MemoryBackend;

//! Worksheet store implementations

pub mod file;
pub mod memory;
pub mod sheets;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use sheets::SheetsStore;

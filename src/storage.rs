//! Storage abstraction for the persistent cache.
//!
//! Entries are addressed by slash-separated relative names such as
//! `context/bg-bira-1a2b3c4d.bin`. [`file::FileStorage`] maps names onto a
//! directory tree; [`memory::MemoryStorage`] keeps them in a map.

pub mod cache;
pub mod file;
pub mod memory;
pub mod traits;

pub use cache::{CacheKind, CacheStore};
pub use file::FileStorage;
pub use memory::MemoryStorage;
pub use traits::Storage;

//! Durable key-value cache for expensive remote lookups
//!
//! Entries are JSON documents keyed by string. The primary implementation is
//! `JsonFileCache`, one file per key under a directory; `MemoryCache` backs
//! tests.

mod json_file;
mod memory;
mod traits;

pub use json_file::JsonFileCache;
pub use memory::MemoryCache;
pub use traits::{image_key, Cache, CacheError, CacheResult, OpenCache, NETWORK_KEY};

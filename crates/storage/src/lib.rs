#![forbid(unsafe_code)]

pub mod keys;
pub mod kv;

pub use kv::{InMemoryStore, JsonFileStore, KeyValueStore, StoreError};

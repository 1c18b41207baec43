//! Repository layer for data access.

pub mod entities;
mod directory_store;

pub use directory_store::DirectoryStore;

//! mapek-storage
//!
//! Append-only persistence for interaction events and layout plans. The
//! [`store::AdaptationStore`] trait is the seam; S3 is the production backend
//! and an in-memory store serves tests and local runs.

pub mod client;
pub mod error;
pub mod json;
pub mod memory;
pub mod objects;
pub mod s3;
pub mod store;

pub use crate::error::StorageError;
pub use crate::memory::MemoryStore;
pub use crate::s3::S3Store;
pub use crate::store::AdaptationStore;

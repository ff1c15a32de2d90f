//! Repository layer for data access.

mod document_store;
mod profile_repository;

pub use document_store::{DocumentStore, MemoryDocumentStore, RedisDocumentStore};
pub use profile_repository::{ProfileRepository, ProfileStore};

#[cfg(any(test, feature = "test-utils"))]
pub use profile_repository::MockProfileRepository;

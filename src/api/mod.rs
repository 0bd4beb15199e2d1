//! Storage service client and types.

pub mod client;
pub mod envelope;
#[cfg(test)]
pub(crate) mod mock;
pub mod storage;

pub use client::ApiClient;
pub use storage::StorageApi;

//! Concrete [`RemoteClient`](crate::framework::RemoteClient) implementations.

pub mod memory;

pub use memory::InMemoryClient;

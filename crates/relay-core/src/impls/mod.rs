//! Impls - ports の実装

pub mod inmem_store;

pub use self::inmem_store::InMemoryTaskStore;

//! Spatial indexing for collision queries

pub mod sparse_hash;

pub use sparse_hash::AtomIndex;

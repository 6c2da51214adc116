//! Determinism helpers: byte-wise ordering and domain-separated hashing.

pub mod hashing;
pub mod stable_sort;

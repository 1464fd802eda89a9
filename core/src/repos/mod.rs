// core/src/repos/mod.rs

//! Typed repositories over the record store.
//!
//! Each collection is one JSON array (or map) under a fixed key. Mutations
//! take the shared write gate, reload the collection, change it and write it
//! back before releasing the gate.

pub mod investments;
pub mod projects;
pub mod users;

pub use investments::InvestmentRepository;
pub use projects::ProjectRepository;
pub use users::UserRepository;

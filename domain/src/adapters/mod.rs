//! Store adapters that live inside the domain crate for convenience.
//!
//! The in-memory store backs both tiers of the fallback service, in tests and
//! in the command-line front end alike.

pub mod memory_repo;

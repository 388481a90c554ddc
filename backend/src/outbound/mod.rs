//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **rest**: the hosted PostgREST-style table store and its auth endpoint,
//!   reached over reqwest.
//! - **memory**: an in-process store with the same behaviour, used in
//!   development mode and by integration tests.
//!
//! Adapters are thin translators between domain types and storage shapes.
//! They contain no business logic.

pub mod memory;
pub mod rest;

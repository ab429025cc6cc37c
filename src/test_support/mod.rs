//! Shared helpers for unit tests.

pub mod fake_registry;
pub mod socket_guard;

//! Persistence contracts for host-backed storage.

pub mod prefs;

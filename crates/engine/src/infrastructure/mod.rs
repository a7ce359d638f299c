//! Infrastructure implementations.
//!
//! Contains the port traits and their adapters for the host's entity store,
//! the local filesystem and the notification channel.

pub mod filesystem;
pub mod notifications;
pub mod ports;
pub mod settings;
pub mod snapshot_store;

//! Entry points into the engine.

pub mod cli;

pub use cli::{run, Cli};

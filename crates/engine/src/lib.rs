//! TomeBridge Engine library.
//!
//! Orchestrates the character import and folder merge pipeline against the
//! host's entity store.
//!
//! ## Structure
//!
//! - `entities/` - Entity modules wrapping store operations
//! - `use_cases/` - Import, merge and maintenance orchestration across entities
//! - `infrastructure/` - External dependency implementations (ports + adapters)
//! - `api/` - CLI entry point and report rendering
//! - `app` - Application composition

pub mod api;
pub mod app;
pub mod entities;
pub mod infrastructure;
pub mod use_cases;

pub use app::App;

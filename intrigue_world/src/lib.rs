//! # Intrigue World
//!
//! The data rule graphs are evaluated against: actors, their roles, clans,
//! families and cultures, and the typed variables attached to all of them.
//! This crate holds no rule logic; it only answers queries through
//! [`WorldQuery`].

pub mod entities;
pub mod error;
pub mod variables;
pub mod world_state;

pub use entities::*;
pub use error::*;
pub use variables::*;
pub use world_state::*;

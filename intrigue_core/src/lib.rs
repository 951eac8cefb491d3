//! # Intrigue Core
//!
//! Decides whether a scheme may start between two actors by interpreting an
//! authored rule graph against the world in `intrigue_world`.
//!
//! ## Core Components
//!
//! - **graph**: the immutable rule graph model and its JSON document form
//! - **bridge**: name-keyed dispatch from Invoke nodes to host predicates
//! - **interpreter**: the [`Ruler`], which walks a graph and returns a [`RuleResult`]
//! - **scheme**: target checks in front of the interpreter
//! - **matchmaking**: cooperative async search for a compatible partner
//!
//! ## Failure Model
//!
//! Evaluation never returns a Rust error. Unknown rules, drafts without a
//! Start node and runaway cycles all come back as a Failed [`RuleResult`];
//! missing or ambiguous bridge methods yield null and follow the Null port.

pub mod bridge;
pub mod config;
pub mod error;
pub mod graph;
pub mod interpreter;
pub mod matchmaking;
pub mod scheme;

pub use bridge::*;
pub use config::*;
pub use error::*;
pub use graph::*;
pub use interpreter::*;
pub use matchmaking::*;
pub use scheme::*;

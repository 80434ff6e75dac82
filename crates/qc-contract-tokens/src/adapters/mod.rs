//! # Adapters Layer (Outer Hexagon)
//!
//! In-process implementations of the driven ports. The networked quorum
//! client and the terminal prompt live in the CLI tool.

pub mod scripted_input;
pub mod scripted_quorum;

pub use scripted_input::*;
pub use scripted_quorum::*;

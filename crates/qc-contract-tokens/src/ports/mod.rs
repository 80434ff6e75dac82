//! # Ports Layer (Middle Hexagon)
//!
//! Trait definitions between the lifecycle core and the outside world.
//!
//! - **Driving Port (Inbound)**: `ContractTokenApi`
//! - **Driven Ports (Outbound)**: `QuorumClient`, `InputProvider`
//! - No concrete implementations in this module

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;

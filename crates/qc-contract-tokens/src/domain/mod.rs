//! # Domain Layer (Inner Hexagon)
//!
//! Pure decision logic for the token lifecycle: validation, request building,
//! the state machine and the quorum response interpreter.
//! NO I/O, NO async.

pub mod entities;
pub mod interpreter;
pub mod lifecycle;
pub mod requests;
pub mod validation;
pub mod value_objects;

pub use entities::*;
pub use interpreter::*;
pub use lifecycle::*;
pub use requests::*;
pub use validation::*;
pub use value_objects::*;

//! # Device Status State Machine
//!
//! The device lifecycle is the one stateful business rule in the system:
//! devices cycle through `stock` → `installé` → `maintenance` → `stock`,
//! with self-transitions always permitted. Transitions against the cycle
//! (e.g. sending a stocked device straight to maintenance) are rejected.

pub mod states;
pub mod transitions;

pub use states::DeviceStatus;
pub use transitions::{allowed_predecessors, check_transition};

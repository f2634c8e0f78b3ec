//! Domain events module.
//!
//! Services emit these after a mutation commits; the server decides what to
//! do with them.

mod domain_event;
mod sink;

pub use domain_event::*;
pub use sink::*;

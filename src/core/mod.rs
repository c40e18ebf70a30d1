//! Core boundary types and the `enter` state machine.
//!
//! This module contains everything a boundary is made of:
//! - The `Boundary` handle and its `enter`/`in_boundary` operations
//! - The execution slot and the scope that guarantees it is cleared
//! - `ExitInfo`, through which the exit hook sees and claims faults
//! - The `Phase` of the current call and the `CannotEnter` fault

mod boundary;
mod error;
mod execution;
mod exit;
mod phase;

pub use boundary::{Boundary, EnterHook, ExitHook, WeakBoundary};
pub use error::{BoxFault, CannotEnter};
pub use exit::ExitInfo;
pub use phase::Phase;

//! Boundary: a reentrancy-scoped guard for a region of the call stack.
//!
//! A boundary represents everything below a given point in the call stack.
//! The first `enter` on a stack runs an optional enter hook, then the work,
//! then an optional exit hook. `enter` calls nested inside that work run
//! immediately with the same enter result and never re-run either hook.
//!
//! # Core Concepts
//!
//! - **Boundary**: Cloneable handle exposing `enter` and `in_boundary`
//! - **Enter hook**: Runs once per outermost call; its result reaches all work
//! - **Exit hook**: Runs once per outermost call, after the boundary is left,
//!   even when the work failed
//! - **Claiming**: The exit hook may take the work fault via `ExitInfo`,
//!   which stops `enter` from re-raising it
//!
//! # Fault precedence
//!
//! An enter hook fault aborts the call before the work or the exit hook run.
//! A work fault the exit hook did not claim is re-raised, and it wins over a
//! fault from the exit hook itself, the same way a `finally` block never
//! masks an error already in flight. Every fault leaves `enter` as the exact
//! value that was raised.
//!
//! # Example
//!
//! ```rust
//! use boundary::core::{BoxFault, Boundary};
//!
//! let boundary: Boundary<u32, BoxFault> = Boundary::builder()
//!     .on_enter(|| Ok(7))
//!     .on_exit(|info| {
//!         assert!(!info.fault_occurred());
//!         Ok(())
//!     })
//!     .build();
//!
//! let nested = boundary.clone();
//! let result = boundary.enter(|seven| {
//!     assert!(nested.in_boundary());
//!     nested.enter(|again| Ok(format!("{seven}/{again}")))
//! });
//!
//! assert_eq!(result.unwrap(), "7/7");
//! assert!(!boundary.in_boundary());
//! ```

pub mod builder;
pub mod core;

// Re-export commonly used types
pub use builder::{BoundaryBuilder, BoundaryOptions, BuildError};
pub use core::{Boundary, CannotEnter, ExitInfo, Phase, WeakBoundary};

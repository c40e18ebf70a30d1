//! Builder API for ergonomic boundary construction.
//!
//! This module provides the options a boundary is built from, a fluent
//! builder over them, and helpers for common hook setups.

pub mod boundary;
pub mod error;
pub mod options;

pub use boundary::BoundaryBuilder;
pub use error::BuildError;
pub use options::BoundaryOptions;

use crate::core::Boundary;

/// Create a boundary whose exit hook claims every work fault and hands it
/// to `handler`.
///
/// `enter` on such a boundary never fails. A work fault turns into
/// `T::default()` once `handler` has seen it.
///
/// # Example
///
/// ```
/// use boundary::builder::recovering;
/// use boundary::core::{BoxFault, Boundary};
///
/// let boundary: Boundary<(), BoxFault> = recovering(|fault: BoxFault| {
///     assert_eq!(fault.to_string(), "lost connection");
/// });
///
/// let result: Result<Option<u32>, BoxFault> =
///     boundary.enter(|_| Err("lost connection".into()));
/// assert_eq!(result.unwrap(), None);
/// ```
pub fn recovering<E, F, H>(handler: H) -> Boundary<E, F>
where
    E: Default,
    H: Fn(F) + 'static,
{
    BoundaryBuilder::new()
        .on_exit(move |info| {
            if let Some(fault) = info.retrieve_fault() {
                handler(fault);
            }
            Ok(())
        })
        .build()
}

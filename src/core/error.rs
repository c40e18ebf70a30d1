//! Faults raised by the boundary itself.

use thiserror::Error;

/// Boxed fault used when a boundary is not given a fault type of its own.
pub type BoxFault = Box<dyn std::error::Error + 'static>;

/// Raised when `enter` is called while the outermost call's enter hook is
/// still running.
///
/// The enter result does not exist yet at that point, so there is nothing
/// to hand to the nested work. Reaching this is a programming error: an
/// enter hook must not itself enter the boundary it belongs to.
///
/// The boundary never wraps user faults. `CannotEnter` reaches callers
/// through the fault type's `From<CannotEnter>` impl, the same way `?`
/// converts errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cannot enter the boundary while its enter hook is running")]
pub struct CannotEnter;

//! Observable phase of a boundary.

use serde::{Deserialize, Serialize};

/// Where a boundary currently is in its per-call lifecycle.
///
/// An outermost call moves `Idle -> Entering -> Working -> Idle`. An enter
/// hook fault takes the short edge `Entering -> Idle`. The exit hook runs
/// after the boundary is back in `Idle`, so it observes `Idle` and may start
/// a fresh outermost call of its own.
///
/// # Example
///
/// ```rust
/// use boundary::core::Phase;
///
/// assert!(!Phase::Idle.is_inside());
/// assert!(Phase::Entering.is_inside());
/// assert_eq!(Phase::Working.name(), "Working");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// No call is inside the boundary.
    Idle,
    /// The enter hook of the outermost call is running.
    Entering,
    /// The enter result is available and work is running.
    Working,
}

impl Phase {
    /// Get the phase's name for display/logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Entering => "Entering",
            Self::Working => "Working",
        }
    }

    /// True for every phase in which `in_boundary()` holds.
    pub fn is_inside(&self) -> bool {
        !matches!(self, Self::Idle)
    }
}

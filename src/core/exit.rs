//! What the exit hook gets to see.

use std::cell::Cell;
use tracing::trace;

/// Passed to the exit hook once per outermost call.
///
/// Holds the enter result, whether the work faulted, and the work fault
/// itself. The fault stays pending until the hook claims it with
/// [`retrieve_fault`](Self::retrieve_fault). A fault that is still pending
/// when the hook returns is re-raised from `enter`.
///
/// # Example
///
/// ```rust
/// use boundary::core::{BoxFault, Boundary};
///
/// let boundary: Boundary<(), BoxFault> = Boundary::builder()
///     .on_exit(|info| {
///         if let Some(fault) = info.retrieve_fault() {
///             eprintln!("handled: {fault}");
///         }
///         Ok(())
///     })
///     .build();
///
/// let result: Result<u32, BoxFault> = boundary.enter(|_| Err("disk full".into()));
/// assert_eq!(result.unwrap(), 0);
/// ```
pub struct ExitInfo<'a, E, F> {
    enter_result: &'a E,
    fault_occurred: bool,
    pending: &'a Cell<Option<F>>,
}

impl<'a, E, F> ExitInfo<'a, E, F> {
    pub(crate) fn new(
        enter_result: &'a E,
        fault_occurred: bool,
        pending: &'a Cell<Option<F>>,
    ) -> Self {
        Self {
            enter_result,
            fault_occurred,
            pending,
        }
    }

    /// The value the enter hook produced, or `E::default()` without one.
    pub fn enter_result(&self) -> &'a E {
        self.enter_result
    }

    /// True iff the work returned a fault.
    pub fn fault_occurred(&self) -> bool {
        self.fault_occurred
    }

    /// Claim the work fault.
    ///
    /// The first call moves the fault out and stops `enter` from re-raising
    /// it. Later calls, and calls when the work succeeded, return `None`.
    /// Returning the claimed fault from the hook re-raises it.
    pub fn retrieve_fault(&self) -> Option<F> {
        let fault = self.pending.take();
        if fault.is_some() {
            trace!("exit hook claimed work fault");
        }
        fault
    }

    /// True once a work fault has been claimed.
    pub fn is_claimed(&self) -> bool {
        if !self.fault_occurred {
            return false;
        }
        let fault = self.pending.take();
        let claimed = fault.is_none();
        self.pending.set(fault);
        claimed
    }
}

//! Configuration for a boundary's hooks.

use crate::core::{BoxFault, EnterHook, ExitHook};
use std::fmt;

/// The two optional hooks a boundary is constructed from.
///
/// Both default to `None`. A boundary without an enter hook hands
/// `E::default()` to its work; a boundary without an exit hook re-raises
/// every work fault.
pub struct BoundaryOptions<E = (), F = BoxFault> {
    /// Runs once before the work of every outermost call.
    pub on_enter: Option<EnterHook<E, F>>,

    /// Runs once after the work of every outermost call.
    pub on_exit: Option<ExitHook<E, F>>,
}

impl<E, F> Default for BoundaryOptions<E, F> {
    fn default() -> Self {
        Self {
            on_enter: None,
            on_exit: None,
        }
    }
}

impl<E, F> fmt::Debug for BoundaryOptions<E, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundaryOptions")
            .field("on_enter", &self.on_enter.is_some())
            .field("on_exit", &self.on_exit.is_some())
            .finish()
    }
}

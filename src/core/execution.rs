//! The single mutable slot a boundary owns, and the scope that clears it.

use super::phase::Phase;
use std::cell::RefCell;
use std::rc::Rc;

/// The execution currently inside a boundary.
///
/// Being inside and having an enter result are one value, so the two can
/// never disagree.
#[derive(Debug)]
pub(crate) enum Execution<E> {
    /// The enter hook is still running; there is no result yet.
    Entering,
    /// The enter hook finished (or none was configured).
    Entered(Rc<E>),
}

impl<E> Execution<E> {
    /// The enter result, if it exists yet.
    pub(crate) fn enter_result(&self) -> Option<Rc<E>> {
        match self {
            Self::Entering => None,
            Self::Entered(result) => Some(Rc::clone(result)),
        }
    }

    pub(crate) fn phase(&self) -> Phase {
        match self {
            Self::Entering => Phase::Entering,
            Self::Entered(_) => Phase::Working,
        }
    }
}

pub(crate) type ExecutionSlot<E> = RefCell<Option<Execution<E>>>;

/// Marks an outermost execution as current for as long as it is alive.
///
/// Dropping the scope empties the slot. That happens on the normal path
/// through `close`, on an enter hook fault, and when a hook or the work
/// panics, so the slot never outlives the call that filled it.
///
/// No `RefCell` borrow of the slot is held while user code runs.
pub(crate) struct ExecutionScope<'a, E> {
    slot: &'a ExecutionSlot<E>,
}

impl<'a, E> ExecutionScope<'a, E> {
    /// Fill an empty slot with `Execution::Entering`.
    pub(crate) fn open(slot: &'a ExecutionSlot<E>) -> Self {
        debug_assert!(slot.borrow().is_none(), "outermost call on a busy slot");
        *slot.borrow_mut() = Some(Execution::Entering);
        Self { slot }
    }

    /// Record the enter result, moving the execution to `Working`.
    pub(crate) fn entered(&self, result: Rc<E>) {
        *self.slot.borrow_mut() = Some(Execution::Entered(result));
    }

    /// Leave the boundary.
    pub(crate) fn close(self) {}
}

impl<E> Drop for ExecutionScope<'_, E> {
    fn drop(&mut self) {
        self.slot.replace(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::{self, AssertUnwindSafe};

    #[test]
    fn open_marks_entering() {
        let slot: ExecutionSlot<u32> = RefCell::new(None);
        let scope = ExecutionScope::open(&slot);

        let phase = slot.borrow().as_ref().map(Execution::phase);
        assert_eq!(phase, Some(Phase::Entering));
        assert!(slot.borrow().as_ref().and_then(Execution::enter_result).is_none());

        scope.close();
    }

    #[test]
    fn entered_exposes_result() {
        let slot: ExecutionSlot<u32> = RefCell::new(None);
        let scope = ExecutionScope::open(&slot);
        scope.entered(Rc::new(7));

        let result = slot.borrow().as_ref().and_then(Execution::enter_result);
        assert_eq!(result.as_deref(), Some(&7));
        assert_eq!(
            slot.borrow().as_ref().map(Execution::phase),
            Some(Phase::Working)
        );

        scope.close();
        assert!(slot.borrow().is_none());
    }

    #[test]
    fn drop_clears_slot() {
        let slot: ExecutionSlot<()> = RefCell::new(None);
        {
            let _scope = ExecutionScope::open(&slot);
            assert!(slot.borrow().is_some());
        }
        assert!(slot.borrow().is_none());
    }

    #[test]
    fn unwinding_clears_slot() {
        let slot: ExecutionSlot<()> = RefCell::new(None);

        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            let scope = ExecutionScope::open(&slot);
            scope.entered(Rc::new(()));
            panic!("work panicked");
        }));

        assert!(result.is_err());
        assert!(slot.borrow().is_none());
    }
}

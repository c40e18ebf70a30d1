//! Property-based tests for boundary nesting and fault precedence.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated nestings and fault combinations.

use boundary::core::{Boundary, CannotEnter};
use proptest::prelude::*;
use std::cell::Cell;
use std::rc::Rc;

#[derive(Clone, Debug, PartialEq)]
enum Fault {
    Work(u32),
    Exit(u32),
    CannotEnter,
}

impl From<CannotEnter> for Fault {
    fn from(_: CannotEnter) -> Self {
        Fault::CannotEnter
    }
}

/// How the exit hook of a generated scenario behaves.
#[derive(Clone, Copy, Debug)]
struct ExitPlan {
    claim: bool,
    fail: bool,
}

prop_compose! {
    fn arbitrary_exit_plan()(claim in any::<bool>(), fail in any::<bool>()) -> ExitPlan {
        ExitPlan { claim, fail }
    }
}

struct Counted {
    boundary: Boundary<u32, Fault>,
    enters: Rc<Cell<u32>>,
    exits: Rc<Cell<u32>>,
}

fn counted(enter_result: u32, plan: ExitPlan) -> Counted {
    let enters = Rc::new(Cell::new(0));
    let exits = Rc::new(Cell::new(0));
    let hook_enters = Rc::clone(&enters);
    let hook_exits = Rc::clone(&exits);

    let boundary: Boundary<u32, Fault> = Boundary::builder()
        .on_enter(move || {
            hook_enters.set(hook_enters.get() + 1);
            Ok(enter_result)
        })
        .on_exit(move |info| {
            hook_exits.set(hook_exits.get() + 1);
            if plan.claim {
                let _ = info.retrieve_fault();
            }
            if plan.fail {
                Err(Fault::Exit(*info.enter_result()))
            } else {
                Ok(())
            }
        })
        .build();

    Counted {
        boundary,
        enters,
        exits,
    }
}

/// Enter `boundary` `depth` more times, returning `value` from the innermost
/// call and checking every level sees `expected`.
fn nest(
    boundary: &Boundary<u32, Fault>,
    depth: usize,
    expected: u32,
    value: u32,
) -> Result<u32, Fault> {
    boundary.enter(|result| {
        assert_eq!(*result, expected);
        assert!(boundary.in_boundary());
        if depth == 0 {
            Ok(value)
        } else {
            nest(boundary, depth - 1, expected, value)
        }
    })
}

proptest! {
    #[test]
    fn hooks_run_once_per_outermost_call(
        depth in 0usize..16,
        calls in 1u32..6,
        enter_result in any::<u32>(),
    ) {
        let plan = ExitPlan { claim: false, fail: false };
        let counted = counted(enter_result, plan);

        for call in 1..=calls {
            let value = nest(&counted.boundary, depth, enter_result, call);
            prop_assert_eq!(value, Ok(call));
            prop_assert_eq!(counted.enters.get(), call);
            prop_assert_eq!(counted.exits.get(), call);
            prop_assert!(!counted.boundary.in_boundary());
        }
    }

    #[test]
    fn fault_precedence_follows_claim_and_exit_outcome(
        work_fault in proptest::option::of(any::<u32>()),
        plan in arbitrary_exit_plan(),
        enter_result in any::<u32>(),
    ) {
        let counted = counted(enter_result, plan);

        let result = counted.boundary.enter(|_| match work_fault {
            Some(code) => Err(Fault::Work(code)),
            None => Ok(1u32),
        });

        let expected = match (work_fault, plan.claim, plan.fail) {
            (Some(code), false, _) => Err(Fault::Work(code)),
            (_, _, true) => Err(Fault::Exit(enter_result)),
            (Some(_), true, false) => Ok(0),
            (None, _, false) => Ok(1),
        };

        prop_assert_eq!(result, expected);
        prop_assert_eq!(counted.exits.get(), 1);
        prop_assert!(!counted.boundary.in_boundary());
    }

    #[test]
    fn nested_faults_pass_through_unchanged(
        depth in 1usize..8,
        code in any::<u32>(),
    ) {
        let boundary: Boundary<(), Fault> = Boundary::default();
        let nested = boundary.clone();

        let result: Result<(), Fault> = boundary.enter(|_| {
            let mut inner: Result<(), Fault> = Err(Fault::Work(code));
            for _ in 0..depth {
                inner = nested.enter(|_| inner.clone());
            }
            inner
        });

        prop_assert_eq!(result, Err(Fault::Work(code)));
    }

    #[test]
    fn enter_hook_fault_leaves_no_residue(attempts in 1u32..6) {
        let failures = Rc::new(Cell::new(attempts));
        let hook_failures = Rc::clone(&failures);
        let exits = Rc::new(Cell::new(0u32));
        let hook_exits = Rc::clone(&exits);

        let boundary: Boundary<(), Fault> = Boundary::builder()
            .on_enter(move || {
                let remaining = hook_failures.get();
                if remaining > 0 {
                    hook_failures.set(remaining - 1);
                    Err(Fault::Work(remaining))
                } else {
                    Ok(())
                }
            })
            .on_exit(move |_| {
                hook_exits.set(hook_exits.get() + 1);
                Ok(())
            })
            .build();

        for remaining in (1..=attempts).rev() {
            prop_assert_eq!(boundary.enter(|_| Ok(5u8)), Err(Fault::Work(remaining)));
            prop_assert!(!boundary.in_boundary());
        }

        prop_assert_eq!(boundary.enter(|_| Ok(5u8)), Ok(5));
        prop_assert_eq!(exits.get(), 1);
    }
}

//! The boundary and its `enter` state machine.

use super::error::{BoxFault, CannotEnter};
use super::execution::{Execution, ExecutionScope, ExecutionSlot};
use super::exit::ExitInfo;
use super::phase::Phase;
use crate::builder::{BoundaryBuilder, BoundaryOptions, BuildError};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};
use tracing::{debug, trace};

/// Hook run once before the work of every outermost call.
pub type EnterHook<E, F> = Box<dyn Fn() -> Result<E, F>>;

/// Hook run once after the work of every outermost call.
pub type ExitHook<E, F> = Box<dyn for<'a> Fn(ExitInfo<'a, E, F>) -> Result<(), F>>;

/// Where an outermost call gets its enter result from.
enum EnterWith<E, F> {
    Hook(EnterHook<E, F>),
    DefaultValue(fn() -> E),
}

impl<E, F> EnterWith<E, F> {
    fn run(&self) -> Result<E, F> {
        match self {
            Self::Hook(on_enter) => on_enter(),
            Self::DefaultValue(make) => Ok(make()),
        }
    }
}

struct Inner<E, F> {
    on_enter: EnterWith<E, F>,
    on_exit: Option<ExitHook<E, F>>,
    execution: ExecutionSlot<E>,
}

impl<E, F> Inner<E, F> {
    fn with_hooks(on_enter: EnterWith<E, F>, on_exit: Option<ExitHook<E, F>>) -> Self {
        Self {
            on_enter,
            on_exit,
            execution: RefCell::new(None),
        }
    }

    fn from_options(options: BoundaryOptions<E, F>) -> Self
    where
        E: Default,
    {
        let on_enter = match options.on_enter {
            Some(on_enter) => EnterWith::Hook(on_enter),
            None => EnterWith::DefaultValue(E::default),
        };
        Self::with_hooks(on_enter, options.on_exit)
    }

    fn try_from_options(options: BoundaryOptions<E, F>) -> Result<Self, BuildError> {
        let on_enter = options.on_enter.ok_or(BuildError::MissingEnterHook)?;
        Ok(Self::with_hooks(EnterWith::Hook(on_enter), options.on_exit))
    }
}

/// Everything below a given point in the call stack.
///
/// The first [`enter`](Self::enter) on a stack runs the enter hook, then the
/// work, then the exit hook. Nested `enter` calls made from inside that work
/// run their work straight away with the same enter result, and neither hook
/// runs again. The exit hook sees the work fault (if any) and may claim it;
/// an unclaimed fault is re-raised from `enter` after the hook returns.
///
/// `Boundary` is a cheap handle. Clones share one boundary, so `enter` and
/// `in_boundary` can be handed around independently of the value that
/// created them. The handle is `!Send`: a boundary tracks one call stack,
/// and each thread that needs one builds its own.
///
/// # Example
///
/// ```rust
/// use boundary::core::{BoxFault, Boundary};
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// let exits = Rc::new(Cell::new(0));
/// let counter = Rc::clone(&exits);
///
/// let boundary: Boundary<u32, BoxFault> = Boundary::builder()
///     .on_enter(|| Ok(7))
///     .on_exit(move |_| {
///         counter.set(counter.get() + 1);
///         Ok(())
///     })
///     .build();
///
/// let inner = boundary.clone();
/// let value = boundary.enter(|seven| {
///     inner.enter(|again| Ok(*seven + *again))
/// });
///
/// assert_eq!(value.unwrap(), 14);
/// assert_eq!(exits.get(), 1);
/// ```
pub struct Boundary<E = (), F = BoxFault> {
    inner: Rc<Inner<E, F>>,
}

/// Non-owning handle to a [`Boundary`], for hooks that re-enter their own
/// boundary.
pub struct WeakBoundary<E = (), F = BoxFault> {
    inner: Weak<Inner<E, F>>,
}

impl<E, F> Boundary<E, F> {
    /// Create a boundary from its options.
    ///
    /// Without an enter hook, work receives `E::default()`.
    pub fn new(options: BoundaryOptions<E, F>) -> Self
    where
        E: Default,
    {
        Self {
            inner: Rc::new(Inner::from_options(options)),
        }
    }

    /// Create a boundary whose enter result has no default.
    ///
    /// The options must carry an enter hook, otherwise this fails with
    /// [`BuildError::MissingEnterHook`].
    pub fn try_new(options: BoundaryOptions<E, F>) -> Result<Self, BuildError> {
        Ok(Self {
            inner: Rc::new(Inner::try_from_options(options)?),
        })
    }

    /// Start building a boundary.
    pub fn builder() -> BoundaryBuilder<E, F> {
        BoundaryBuilder::new()
    }

    /// Create a boundary whose hooks can refer back to it.
    ///
    /// `configure` receives a weak handle to the boundary being built and
    /// returns the configured builder. Hooks that keep the handle can
    /// upgrade it and call `enter` without forming an `Rc` cycle.
    ///
    /// # Example
    ///
    /// ```rust
    /// use boundary::builder::BoundaryBuilder;
    /// use boundary::core::{BoxFault, Boundary, WeakBoundary};
    ///
    /// let boundary: Boundary<(), BoxFault> =
    ///     Boundary::new_cyclic(|weak: &WeakBoundary<(), BoxFault>| {
    ///         let weak = weak.clone();
    ///         BoundaryBuilder::new().on_exit(move |_| {
    ///             let boundary = weak.upgrade().expect("boundary is alive");
    ///             assert!(!boundary.in_boundary());
    ///             Ok(())
    ///         })
    ///     });
    ///
    /// boundary.enter_empty().unwrap();
    /// ```
    pub fn new_cyclic<C>(configure: C) -> Self
    where
        E: Default,
        C: FnOnce(&WeakBoundary<E, F>) -> BoundaryBuilder<E, F>,
    {
        let inner = Rc::new_cyclic(|weak| {
            let handle = WeakBoundary {
                inner: Weak::clone(weak),
            };
            Inner::from_options(configure(&handle).into_options())
        });
        Self { inner }
    }

    /// Get a weak handle to this boundary.
    pub fn downgrade(&self) -> WeakBoundary<E, F> {
        WeakBoundary {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// True while some call is inside the boundary, including while the
    /// enter hook runs. False outside any call and inside the exit hook.
    pub fn in_boundary(&self) -> bool {
        self.inner.execution.borrow().is_some()
    }

    /// [`in_boundary`](Self::in_boundary) as a free-standing closure.
    pub fn in_boundary_fn(&self) -> impl Fn() -> bool + 'static
    where
        E: 'static,
        F: 'static,
    {
        let boundary = self.clone();
        move || boundary.in_boundary()
    }

    /// Current phase of the outermost call, if any.
    pub fn phase(&self) -> Phase {
        self.inner
            .execution
            .borrow()
            .as_ref()
            .map_or(Phase::Idle, Execution::phase)
    }

    /// Run `work` inside the boundary.
    ///
    /// On an outermost call:
    /// 1. the enter hook runs; its fault is returned as-is and nothing else
    ///    runs,
    /// 2. `work` runs with the enter result,
    /// 3. the boundary is left, so the exit hook observes `in_boundary() ==
    ///    false` and may enter again,
    /// 4. the exit hook runs and may claim the work fault.
    ///
    /// A pending work fault wins over an exit hook fault. With no pending
    /// fault the exit hook's fault is returned. A claimed work fault makes
    /// `enter` succeed with `T::default()`; use
    /// [`enter_claimable`](Self::enter_claimable) for values without one.
    ///
    /// A nested call runs `work` with the outer enter result and passes its
    /// value or fault through untouched. A nested call made from the enter
    /// hook fails with [`CannotEnter`].
    ///
    /// Faults are returned as the exact values that were raised.
    pub fn enter<T, W>(&self, work: W) -> Result<T, F>
    where
        T: Default,
        W: FnOnce(&E) -> Result<T, F>,
        F: From<CannotEnter>,
    {
        self.enter_claimable(work).map(Option::unwrap_or_default)
    }

    /// [`enter`](Self::enter) for any work value.
    ///
    /// Returns `Ok(None)` when the exit hook claimed the work fault, and
    /// `Ok(Some(value))` whenever the work succeeded.
    pub fn enter_claimable<T, W>(&self, work: W) -> Result<Option<T>, F>
    where
        W: FnOnce(&E) -> Result<T, F>,
        F: From<CannotEnter>,
    {
        let nested = self
            .inner
            .execution
            .borrow()
            .as_ref()
            .map(Execution::enter_result);

        match nested {
            Some(Some(enter_result)) => work(&*enter_result).map(Some),
            Some(None) => {
                debug!(phase = Phase::Entering.name(), "rejected entry from enter hook");
                Err(CannotEnter.into())
            }
            None => self.enter_outermost(work),
        }
    }

    /// Drive the enter and exit hooks without any work.
    pub fn enter_empty(&self) -> Result<(), F>
    where
        F: From<CannotEnter>,
    {
        self.enter(|_| Ok(()))
    }

    fn enter_outermost<T, W>(&self, work: W) -> Result<Option<T>, F>
    where
        W: FnOnce(&E) -> Result<T, F>,
    {
        let inner = &*self.inner;

        let scope = ExecutionScope::open(&inner.execution);
        trace!(phase = Phase::Entering.name(), "entering boundary");

        let enter_result = match inner.on_enter.run() {
            Ok(result) => Rc::new(result),
            Err(fault) => {
                drop(scope);
                trace!("enter hook failed, boundary left without running work");
                return Err(fault);
            }
        };

        scope.entered(Rc::clone(&enter_result));
        trace!(phase = Phase::Working.name(), "running work");

        let (value, fault) = match work(&*enter_result) {
            Ok(value) => (Some(value), None),
            Err(fault) => (None, Some(fault)),
        };
        scope.close();

        let fault_occurred = fault.is_some();
        trace!(phase = Phase::Idle.name(), fault_occurred, "left boundary");

        let pending = Cell::new(fault);
        if let Some(on_exit) = &inner.on_exit {
            let info = ExitInfo::new(&*enter_result, fault_occurred, &pending);
            if let Err(exit_fault) = on_exit(info) {
                return match pending.take() {
                    Some(work_fault) => {
                        trace!("exit hook failed, unclaimed work fault takes precedence");
                        Err(work_fault)
                    }
                    None => Err(exit_fault),
                };
            }
        }

        match pending.take() {
            Some(work_fault) => Err(work_fault),
            None => Ok(value),
        }
    }
}

impl<E, F> Clone for Boundary<E, F> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<E: Default, F> Default for Boundary<E, F> {
    fn default() -> Self {
        Self::new(BoundaryOptions::default())
    }
}

impl<E: Default, F> From<BoundaryOptions<E, F>> for Boundary<E, F> {
    fn from(options: BoundaryOptions<E, F>) -> Self {
        Self::new(options)
    }
}

impl<E, F> fmt::Debug for Boundary<E, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Boundary")
            .field("on_enter", &matches!(self.inner.on_enter, EnterWith::Hook(_)))
            .field("on_exit", &self.inner.on_exit.is_some())
            .field("phase", &self.phase())
            .finish()
    }
}

impl<E, F> WeakBoundary<E, F> {
    /// Get the boundary back, if it is still alive.
    pub fn upgrade(&self) -> Option<Boundary<E, F>> {
        self.inner.upgrade().map(|inner| Boundary { inner })
    }
}

impl<E, F> Clone for WeakBoundary<E, F> {
    fn clone(&self) -> Self {
        Self {
            inner: Weak::clone(&self.inner),
        }
    }
}

impl<E, F> fmt::Debug for WeakBoundary<E, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakBoundary")
            .field("alive", &(self.inner.strong_count() > 0))
            .finish()
    }
}

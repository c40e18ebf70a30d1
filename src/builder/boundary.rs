//! Builder for constructing boundaries.

use crate::builder::error::BuildError;
use crate::builder::options::BoundaryOptions;
use crate::core::{BoxFault, Boundary, ExitInfo};

/// Builder for constructing boundaries with a fluent API.
///
/// Both hooks are optional when the enter result has a `Default`, and
/// [`build`](Self::build) never fails. An enter result without one needs an
/// enter hook, checked by [`try_build`](Self::try_build).
pub struct BoundaryBuilder<E = (), F = BoxFault> {
    options: BoundaryOptions<E, F>,
}

impl<E, F> BoundaryBuilder<E, F> {
    /// Create a new builder with no hooks.
    pub fn new() -> Self {
        Self {
            options: BoundaryOptions::default(),
        }
    }

    /// Set the enter hook (optional).
    pub fn on_enter<H>(mut self, hook: H) -> Self
    where
        H: Fn() -> Result<E, F> + 'static,
    {
        self.options.on_enter = Some(Box::new(hook));
        self
    }

    /// Set the exit hook (optional).
    pub fn on_exit<H>(mut self, hook: H) -> Self
    where
        H: for<'a> Fn(ExitInfo<'a, E, F>) -> Result<(), F> + 'static,
    {
        self.options.on_exit = Some(Box::new(hook));
        self
    }

    /// Take the configured options without building.
    pub fn into_options(self) -> BoundaryOptions<E, F> {
        self.options
    }

    /// Build the boundary. Without an enter hook the work sees `E::default()`.
    pub fn build(self) -> Boundary<E, F>
    where
        E: Default,
    {
        Boundary::new(self.options)
    }

    /// Build a boundary whose enter result has no default.
    ///
    /// Fails with [`BuildError::MissingEnterHook`] if no enter hook was set.
    pub fn try_build(self) -> Result<Boundary<E, F>, BuildError> {
        Boundary::try_new(self.options)
    }
}

impl<E, F> Default for BoundaryBuilder<E, F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E, F> From<BoundaryBuilder<E, F>> for BoundaryOptions<E, F> {
    fn from(builder: BoundaryBuilder<E, F>) -> Self {
        builder.into_options()
    }
}

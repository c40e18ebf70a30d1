//! Build errors for boundaries whose enter result has no default.

use thiserror::Error;

/// Errors that can occur when building a boundary without `E: Default`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("Enter hook not specified. Call .on_enter(hook) or give the enter result a Default")]
    MissingEnterHook,
}

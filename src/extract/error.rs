//! Error and diagnostic types for the extraction engine

use std::fmt;
use thiserror::Error;

/// Unexpected failure while evaluating one resolver against one fragment
///
/// A fragment that simply does not match a resolver is not an error; the
/// resolver returns `Ok(None)` for it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// A digit run could not be converted into an integer
    #[error("numeric value out of range: {0}")]
    NumericOverflow(String),
}

/// Recoverable per-item signal raised when a resolver fails
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Name of the resolver that failed
    pub component: &'static str,

    /// Identifier of the listing item, usually its title
    pub item: Option<String>,

    /// The fragment being resolved when the failure occurred
    pub fragment: String,

    /// Underlying cause
    pub cause: ResolveError,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} failed on {:?} (item: {}): {}",
            self.component,
            self.fragment,
            self.item.as_deref().unwrap_or("<unknown>"),
            self.cause
        )
    }
}

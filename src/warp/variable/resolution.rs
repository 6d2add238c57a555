// SPDX-License-Identifier: MIT

//! Outcome of resolving a value that may depend on external input

/// A value, or the marker that an external input could not be obtained.
///
/// `Unresolved` is not an error: comparisons against it are false.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<T> {
    Resolved(T),
    Unresolved,
}

impl<T> Resolution<T> {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Resolution::Resolved(_))
    }

    pub fn as_ref(&self) -> Resolution<&T> {
        match self {
            Resolution::Resolved(v) => Resolution::Resolved(v),
            Resolution::Unresolved => Resolution::Unresolved,
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Resolution<U> {
        match self {
            Resolution::Resolved(v) => Resolution::Resolved(f(v)),
            Resolution::Unresolved => Resolution::Unresolved,
        }
    }

    /// Apply a fallible conversion; errors propagate, unresolved stays unresolved
    pub fn try_map<U, E, F: FnOnce(T) -> Result<U, E>>(self, f: F) -> Result<Resolution<U>, E> {
        match self {
            Resolution::Resolved(v) => f(v).map(Resolution::Resolved),
            Resolution::Unresolved => Ok(Resolution::Unresolved),
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Resolution::Resolved(v) => Some(v),
            Resolution::Unresolved => None,
        }
    }
}

impl<T> From<Option<T>> for Resolution<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Resolution::Resolved(v),
            None => Resolution::Unresolved,
        }
    }
}

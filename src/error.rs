//! Errors raised when a component is asked for a representation it cannot give.

use thiserror::Error;

/// Maximum number of characters of an offending value kept in an error message.
const MAX_VALUE_CHARS: usize = 4096;

/// A specialized [`Result`](core::result::Result) type for this crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// An error occurred when producing the representation of a component.
///
/// Construction of components never fails. Every error below is raised at the
/// moment a representation ([`as_string`] or [`encoded`]) is requested.
///
/// [`as_string`]: crate::component::UriComponent::as_string
/// [`encoded`]: crate::component::UriComponent::encoded
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// A representation was requested from an undefined component.
    #[error("no representation for undefined {component}")]
    UndefinedComponent {
        /// Name of the component kind, e.g. `"authority"`.
        component: &'static str,
    },
    /// A path segment violates a constraint of its position in the path.
    #[error("{reason}: {value}")]
    IllegalSegment {
        /// What went wrong.
        reason: &'static str,
        /// The offending segment, possibly truncated.
        value: String,
    },
    /// A path cannot be embedded in the component it was given to.
    #[error("{reason}: {value}")]
    IllegalPath {
        /// What went wrong.
        reason: &'static str,
        /// The offending path, possibly truncated.
        value: String,
    },
    /// A caller-chosen delimiter collides with the encoding rules.
    #[error("{reason}: {value}")]
    IllegalDelimiter {
        /// What went wrong.
        reason: &'static str,
        /// The offending delimiter.
        value: String,
    },
    /// A scheme name is not lexically valid.
    #[error("{reason}: {value}")]
    IllegalScheme {
        /// What went wrong.
        reason: &'static str,
        /// The offending scheme, possibly truncated.
        value: String,
    },
    /// A port is not lexically valid.
    #[error("{reason}: {value}")]
    IllegalPort {
        /// What went wrong.
        reason: &'static str,
        /// The offending port, possibly truncated.
        value: String,
    },
    /// A host is not lexically valid.
    #[error("{reason}: {value}")]
    IllegalHost {
        /// What went wrong.
        reason: &'static str,
        /// The offending host, possibly truncated.
        value: String,
    },
    /// A `..` segment had nothing left to remove.
    ///
    /// Raised only when [`Normalizer::allow_path_underflow`] is set to `false`.
    ///
    /// [`Normalizer::allow_path_underflow`]: crate::normalize::Normalizer::allow_path_underflow
    #[error("underflow occurred in path normalization: {value}")]
    PathUnderflow {
        /// The path being normalized, possibly truncated.
        value: String,
    },
}

impl Error {
    pub(crate) fn undefined(component: &'static str) -> Self {
        Self::UndefinedComponent { component }
    }

    pub(crate) fn illegal_segment(reason: &'static str, value: &str) -> Self {
        Self::IllegalSegment {
            reason,
            value: truncate(value),
        }
    }

    pub(crate) fn illegal_path(reason: &'static str, value: &str) -> Self {
        Self::IllegalPath {
            reason,
            value: truncate(value),
        }
    }

    pub(crate) fn illegal_delimiter(reason: &'static str, delim: char) -> Self {
        Self::IllegalDelimiter {
            reason,
            value: delim.to_string(),
        }
    }

    pub(crate) fn illegal_scheme(reason: &'static str, value: &str) -> Self {
        Self::IllegalScheme {
            reason,
            value: truncate(value),
        }
    }

    pub(crate) fn illegal_port(reason: &'static str, value: &str) -> Self {
        Self::IllegalPort {
            reason,
            value: truncate(value),
        }
    }

    pub(crate) fn illegal_host(reason: &'static str, value: &str) -> Self {
        Self::IllegalHost {
            reason,
            value: truncate(value),
        }
    }

    pub(crate) fn path_underflow(value: &str) -> Self {
        Self::PathUnderflow {
            value: truncate(value),
        }
    }
}

/// Bounds the size of a value embedded in an error message.
fn truncate(value: &str) -> String {
    match value.char_indices().nth(MAX_VALUE_CHARS) {
        Some((i, _)) => {
            let mut s = String::with_capacity(i + 3);
            s.push_str(&value[..i]);
            s.push_str("...");
            s
        }
        None => value.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_values_are_kept() {
        let e = Error::illegal_path("Illegal path in hier-part component", "a/b");
        assert_eq!(e.to_string(), "Illegal path in hier-part component: a/b");
    }

    #[test]
    fn long_values_are_truncated() {
        let long = "é".repeat(MAX_VALUE_CHARS + 10);
        let Error::IllegalSegment { value, .. } = Error::illegal_segment("bad", &long) else {
            unreachable!()
        };
        assert_eq!(value.chars().count(), MAX_VALUE_CHARS + 3);
        assert!(value.ends_with("é..."));

        let exact = "a".repeat(MAX_VALUE_CHARS);
        let Error::IllegalSegment { value, .. } = Error::illegal_segment("bad", &exact) else {
            unreachable!()
        };
        assert_eq!(value, exact);
    }

    #[test]
    fn undefined_message() {
        assert_eq!(
            Error::undefined("scheme").to_string(),
            "no representation for undefined scheme"
        );
    }
}

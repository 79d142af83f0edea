use crate::{
    component::UriComponent,
    error::{Error, Result},
    pct_enc::{encode, table, ByteEncoding, EString},
};
use std::sync::Arc;
use tracing::debug;

/// The kind of a path segment, derived from its value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    /// Any segment other than `"."` and `".."`.
    Normal,
    /// The segment `"."`.
    Dot,
    /// The segment `".."`.
    DotDot,
}

/// A [path segment].
///
/// The kind of a segment is decided by its value alone, so the segment `"."`
/// is always a [`Dot`] segment no matter how it was created. Segments are
/// cheap to clone and may be shared between paths.
///
/// [path segment]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.3
/// [`Dot`]: SegmentKind::Dot
///
/// # Examples
///
/// ```
/// use uri_compose::{component::UriComponent, path::{PathSegment, SegmentKind}, pct_enc::ByteEncoding};
///
/// assert_eq!(PathSegment::new("..").kind(), SegmentKind::DotDot);
/// assert_eq!(PathSegment::new("a/b").kind(), SegmentKind::Normal);
/// assert_eq!(PathSegment::new("a/b").encoded(ByteEncoding::Utf8)?, "a%2Fb");
/// # Ok::<_, uri_compose::Error>(())
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PathSegment {
    value: Arc<str>,
}

impl PathSegment {
    /// Creates a segment from its unencoded value.
    pub fn new(value: impl Into<Arc<str>>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// Creates an empty segment.
    #[must_use]
    pub fn empty() -> Self {
        Self::new("")
    }

    /// Creates the segment `"."`.
    #[must_use]
    pub fn dot() -> Self {
        Self::new(".")
    }

    /// Creates the segment `".."`.
    #[must_use]
    pub fn dot_dot() -> Self {
        Self::new("..")
    }

    /// Returns the unencoded value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Checks whether the segment is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Returns the kind of the segment.
    #[must_use]
    pub fn kind(&self) -> SegmentKind {
        match &*self.value {
            "." => SegmentKind::Dot,
            ".." => SegmentKind::DotDot,
            _ => SegmentKind::Normal,
        }
    }

    /// Checks whether the segment is `"."` or `".."`.
    #[must_use]
    pub fn is_dot_segment(&self) -> bool {
        self.kind() != SegmentKind::Normal
    }

    /// Calls the handler matching the kind of the segment.
    ///
    /// The handler for normal segments receives the segment itself.
    pub fn classify<R>(
        &self,
        on_dot: impl FnOnce() -> R,
        on_dot_dot: impl FnOnce() -> R,
        on_normal: impl FnOnce(&Self) -> R,
    ) -> R {
        match self.kind() {
            SegmentKind::Dot => on_dot(),
            SegmentKind::DotDot => on_dot_dot(),
            SegmentKind::Normal => on_normal(self),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for PathSegment {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&PathSegment> for PathSegment {
    fn from(segment: &PathSegment) -> Self {
        segment.clone()
    }
}

impl UriComponent for PathSegment {
    const NAME: &'static str = "path segment";

    fn as_string(&self) -> Result<String> {
        Ok(self.value.to_string())
    }

    fn encoded(&self, encoding: ByteEncoding) -> Result<EString> {
        Ok(encode(&self.value, table::SEGMENT, encoding).to_estring())
    }
}

/// A constraint on a segment imposed by its position in a path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum SegmentConstraint {
    /// `segment-nz = 1*pchar`: the segment must not be empty.
    NonZero,
    /// `segment-nz-nc = 1*( unreserved / pct-encoded / sub-delims / "@" )`:
    /// the segment must not contain `':'`.
    NonColon,
}

impl SegmentConstraint {
    /// Checks a representation of a segment against the constraint.
    fn check(self, repr: &str) -> Result<()> {
        match self {
            Self::NonZero if repr.is_empty() => Err(Error::illegal_segment(
                "Illegal empty first segment in a path without leading '/'",
                repr,
            )),
            Self::NonColon if repr.contains(':') => Err(Error::illegal_segment(
                "Illegal ':' in the first segment of a relative path",
                repr,
            )),
            _ => Ok(()),
        }
    }
}

/// A segment wrapped with the constraints of its position.
///
/// The kind of a constrained segment is that of the wrapped segment.
/// Constraints are checked when a representation is requested.
///
/// # Examples
///
/// ```
/// use uri_compose::{component::UriComponent, path::{Constrained, PathSegment, SegmentConstraint}};
///
/// const NO_SCHEME: &[SegmentConstraint] = &[SegmentConstraint::NonZero, SegmentConstraint::NonColon];
///
/// let segment = PathSegment::new("a:b");
/// assert!(Constrained::new(&segment, &[]).as_string().is_ok());
/// assert!(Constrained::new(&segment, NO_SCHEME).as_string().is_err());
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Constrained<'a> {
    segment: &'a PathSegment,
    constraints: &'a [SegmentConstraint],
}

impl<'a> Constrained<'a> {
    /// Wraps a segment with constraints.
    pub fn new(segment: &'a PathSegment, constraints: &'a [SegmentConstraint]) -> Self {
        Self {
            segment,
            constraints,
        }
    }

    /// Returns the wrapped segment.
    #[must_use]
    pub fn segment(&self) -> &'a PathSegment {
        self.segment
    }

    /// Returns the kind of the wrapped segment.
    #[must_use]
    pub fn kind(&self) -> SegmentKind {
        self.segment.kind()
    }

    fn check(&self, repr: &str) -> Result<()> {
        self.constraints.iter().try_for_each(|c| {
            c.check(repr).map_err(|e| {
                debug!(segment = repr, constraint = ?c, "segment constraint violated");
                e
            })
        })
    }
}

impl UriComponent for Constrained<'_> {
    const NAME: &'static str = PathSegment::NAME;

    fn as_string(&self) -> Result<String> {
        let s = self.segment.as_string()?;
        self.check(&s)?;
        Ok(s)
    }

    fn encoded(&self, encoding: ByteEncoding) -> Result<EString> {
        self.check(self.segment.as_str())?;
        let s = self.segment.encoded(encoding)?;
        self.check(s.as_str())?;
        Ok(s)
    }
}

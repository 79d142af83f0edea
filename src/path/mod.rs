//! Paths and path segments.
//!
//! A [`Path`] is a sequence of [`PathSegment`]s tagged with its shape. How a
//! path may be written depends on where it ends up: after an authority it must
//! be empty or absolute, and without one its first segment is constrained so
//! that the output cannot be misread. These rules are applied when a path is
//! projected into a [hier-part] or [relative-part].
//!
//! [hier-part]: https://datatracker.ietf.org/doc/html/rfc3986#section-3
//! [relative-part]: https://datatracker.ietf.org/doc/html/rfc3986#section-4.2

mod segment;

pub use segment::{Constrained, PathSegment, SegmentConstraint, SegmentKind};

use crate::{
    component::{Authority, Defined, Repr, UriComponent},
    error::{Error, Result},
    normalize::remove_dot_segments,
    pct_enc::{ByteEncoding, EString},
};
use tracing::debug;

/// Constraints on the first segment of a rootless path in a `hier-part`.
const ROOTLESS: &[SegmentConstraint] = &[SegmentConstraint::NonZero];

/// Constraints on the first segment of a rootless path in a `relative-part`.
const NO_SCHEME: &[SegmentConstraint] = &[SegmentConstraint::NonZero, SegmentConstraint::NonColon];

/// The part of a URI reference a path is projected into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Part {
    /// `hier-part`, found in a URI.
    Hier,
    /// `relative-part`, found in a relative reference.
    Relative,
}

impl Part {
    fn illegal_path_reason(self) -> &'static str {
        match self {
            Self::Hier => "Illegal path in hier-part component",
            Self::Relative => "Illegal path in relative-part component",
        }
    }

    fn first_segment_constraints(self) -> &'static [SegmentConstraint] {
        match self {
            Self::Hier => ROOTLESS,
            Self::Relative => NO_SCHEME,
        }
    }
}

/// A [path] component.
///
/// A rootless path created with [`Path::rootless`] has at least one segment;
/// an empty list of segments yields [`Path::Empty`] instead.
///
/// [path]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.3
///
/// # Examples
///
/// ```
/// use uri_compose::{component::{Authority, Host}, path::Path, pct_enc::ByteEncoding};
///
/// let path = Path::absolute(["a b", "c"]);
/// let authority = Authority::new(Host::reg_name("example.com"));
/// assert_eq!(path.hier_part(Some(&authority), ByteEncoding::Utf8)?, "//example.com/a%20b/c");
///
/// let rootless = Path::rootless(["a", "b"]);
/// assert!(rootless.hier_part(Some(&authority), ByteEncoding::Utf8).is_err());
/// assert_eq!(rootless.hier_part(None, ByteEncoding::Utf8)?, "a/b");
/// # Ok::<_, uri_compose::Error>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum Path {
    /// `path-empty`: no segment at all.
    #[default]
    Empty,
    /// A path beginning with `"/"`.
    ///
    /// An absolute path without any segment is written as `"/"`.
    Absolute(Vec<PathSegment>),
    /// A path not beginning with `"/"`.
    Rootless(Vec<PathSegment>),
}

impl Path {
    /// Creates an empty path.
    #[must_use]
    pub fn empty() -> Self {
        Self::Empty
    }

    /// Creates an absolute path from segments.
    pub fn absolute<I>(segments: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<PathSegment>,
    {
        Self::Absolute(segments.into_iter().map(Into::into).collect())
    }

    /// Creates a rootless path from segments, or an empty path if there is none.
    pub fn rootless<I>(segments: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<PathSegment>,
    {
        let segments: Vec<_> = segments.into_iter().map(Into::into).collect();
        if segments.is_empty() {
            Self::Empty
        } else {
            Self::Rootless(segments)
        }
    }

    /// Returns the segments of the path.
    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        match self {
            Self::Empty => &[],
            Self::Absolute(segments) | Self::Rootless(segments) => segments,
        }
    }

    /// Checks whether the path is written as an empty string.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Absolute(_) => false,
            Self::Rootless(segments) => segments.is_empty(),
        }
    }

    /// Checks whether the path begins with `"/"`.
    #[must_use]
    pub fn is_absolute(&self) -> bool {
        matches!(self, Self::Absolute(_))
    }

    /// Creates a path of the same shape with other segments.
    ///
    /// An empty path yields a rootless one.
    pub fn with_segments<I>(&self, segments: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<PathSegment>,
    {
        match self {
            Self::Absolute(_) => Self::absolute(segments),
            Self::Empty | Self::Rootless(_) => Self::rootless(segments),
        }
    }

    /// Returns the path with the same segments made absolute.
    #[must_use]
    pub fn to_absolute(&self) -> Self {
        Self::Absolute(self.segments().to_vec())
    }

    /// Removes dot segments from the path, absorbing excess `".."` segments.
    ///
    /// Use a [`Normalizer`](crate::normalize::Normalizer) for other behavior.
    #[must_use]
    pub fn normalize(&self) -> Self {
        self.with_segments(remove_dot_segments(self.segments()))
    }

    /// Projects the path into a `hier-part`, preceded by the authority if given.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the path cannot follow the authority, if its first
    /// segment cannot begin a rootless path, or if the authority fails.
    pub fn hier_part(
        &self,
        authority: Option<&Authority>,
        encoding: ByteEncoding,
    ) -> Result<EString> {
        let repr = Repr::Encoded(encoding);
        self.project(Part::Hier, authority, repr)
            .map(|s| repr.finish(s))
    }

    /// Projects the path into a `relative-part`, preceded by the authority if given.
    ///
    /// Unlike [`hier_part`](Self::hier_part), the first segment of a rootless
    /// path must not contain `':'` here.
    ///
    /// # Errors
    ///
    /// Returns `Err` under the same conditions as `hier_part`, or if the first
    /// segment contains `':'`.
    pub fn relative_part(
        &self,
        authority: Option<&Authority>,
        encoding: ByteEncoding,
    ) -> Result<EString> {
        let repr = Repr::Encoded(encoding);
        self.project(Part::Relative, authority, repr)
            .map(|s| repr.finish(s))
    }

    pub(crate) fn project(
        &self,
        part: Part,
        authority: Option<&Authority>,
        repr: Repr,
    ) -> Result<String> {
        let mut buf = authority.fold_defined(
            |&authority| repr.render(authority).map(|s| format!("//{s}")),
            || Ok(String::new()),
        )?;
        buf.push_str(&self.render_in(part, authority.is_some(), repr)?);
        Ok(buf)
    }

    fn render_in(&self, part: Part, has_authority: bool, repr: Repr) -> Result<String> {
        match self {
            Self::Empty => Ok(String::new()),
            Self::Rootless(segments) if has_authority && !segments.is_empty() => {
                let value = self.join(Repr::Unencoded).unwrap_or_default();
                debug!(path = %value, ?part, "rootless path cannot follow an authority");
                Err(Error::illegal_path(part.illegal_path_reason(), &value))
            }
            Self::Rootless(segments) => {
                let mut buf = String::new();
                if let [first, rest @ ..] = &segments[..] {
                    buf.push_str(&repr.render(&Constrained::new(
                        first,
                        part.first_segment_constraints(),
                    ))?);
                    for segment in rest {
                        buf.push('/');
                        buf.push_str(&repr.render(segment)?);
                    }
                }
                Ok(buf)
            }
            Self::Absolute(segments) => {
                let mut buf = String::new();
                // Without an authority, "//" would be read as one.
                if !has_authority && segments.len() > 1 && segments[0].is_empty() {
                    buf.push_str("/.");
                }
                buf.push_str(&self.join(repr)?);
                Ok(buf)
            }
        }
    }

    fn join(&self, repr: Repr) -> Result<String> {
        let mut buf = String::new();
        if self.is_absolute() {
            buf.push('/');
        }
        for (i, segment) in self.segments().iter().enumerate() {
            if i > 0 {
                buf.push('/');
            }
            buf.push_str(&repr.render(segment)?);
        }
        Ok(buf)
    }
}

impl UriComponent for Path {
    const NAME: &'static str = "path";

    fn as_string(&self) -> Result<String> {
        self.join(Repr::Unencoded)
    }

    fn encoded(&self, encoding: ByteEncoding) -> Result<EString> {
        let repr = Repr::Encoded(encoding);
        self.join(repr).map(|s| repr.finish(s))
    }
}

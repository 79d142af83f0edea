//! Module for normalization.

use crate::{
    component::{Authority, Scheme},
    error::{Error, Result},
    path::{Path, PathSegment, SegmentKind},
    uri::{Hierarchy, RelativeRef, Uri},
};
use core::convert::Infallible;
use tracing::{debug, trace};

/// Removes dot segments from a sequence of path segments.
///
/// This is the algorithm of [Section 5.2.4 of RFC 3986], run in a single pass
/// over the input: a `"."` segment is dropped, a `".."` segment removes the
/// last segment kept so far, and any other segment is kept. A `".."` with
/// nothing left to remove is dropped as well.
///
/// The output contains only segments of the input, in their original order.
///
/// [Section 5.2.4 of RFC 3986]: https://datatracker.ietf.org/doc/html/rfc3986/#section-5.2.4
///
/// # Examples
///
/// ```
/// use uri_compose::{normalize::remove_dot_segments, path::PathSegment};
///
/// let segments: Vec<_> = ["..", "..", "ok"].map(PathSegment::new).into();
/// assert_eq!(remove_dot_segments(&segments), [PathSegment::new("ok")]);
///
/// let segments: Vec<_> = ["a", ".", "b", "..", "c"].map(PathSegment::new).into();
/// assert_eq!(remove_dot_segments(&segments), ["a", "c"].map(PathSegment::new));
/// ```
#[must_use]
pub fn remove_dot_segments(segments: &[PathSegment]) -> Vec<PathSegment> {
    match remove_dot_segments_with(segments, false, || Ok::<_, Infallible>(())) {
        Ok(output) => output,
        Err(e) => match e {},
    }
}

fn remove_dot_segments_with<E>(
    segments: &[PathSegment],
    keep_trailing_slash: bool,
    mut on_underflow: impl FnMut() -> Result<(), E>,
) -> Result<Vec<PathSegment>, E> {
    let mut output = Vec::with_capacity(segments.len());

    for segment in segments {
        match segment.kind() {
            SegmentKind::Dot => {}
            SegmentKind::DotDot => {
                if output.pop().is_none() {
                    on_underflow()?;
                }
            }
            SegmentKind::Normal => output.push(segment.clone()),
        }
    }

    if keep_trailing_slash && segments.last().map_or(false, PathSegment::is_dot_segment) {
        output.push(PathSegment::empty());
    }
    Ok(output)
}

/// A configurable normalizer of paths and URI references.
///
/// # Examples
///
/// ```
/// use uri_compose::{component::{Authority, Host, Port, Scheme, UriComponent}, normalize::Normalizer, path::Path, Hierarchy, Uri};
///
/// let uri = Uri::new(
///     Scheme::new("HTTP"),
///     Hierarchy::new(
///         Some(Authority::new(Host::reg_name("Example.COM")).with_port(Port::from(80))),
///         Path::absolute(["a", ".", "b", ".."]),
///     ),
///     None,
///     None,
/// );
///
/// assert_eq!(Normalizer::new().normalize_uri(&uri)?.as_string()?, "http://example.com/a");
/// assert_eq!(
///     Normalizer::new().keep_trailing_slash(true).normalize_uri(&uri)?.as_string()?,
///     "http://example.com/a/"
/// );
/// # Ok::<_, uri_compose::Error>(())
/// ```
#[derive(Clone, Copy)]
#[must_use]
pub struct Normalizer {
    pub(crate) allow_path_underflow: bool,
    pub(crate) keep_trailing_slash: bool,
    default_port_f: fn(&Scheme) -> Option<u16>,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Normalizer {
    /// Creates a new `Normalizer` with default configuration.
    pub fn new() -> Self {
        Self {
            allow_path_underflow: true,
            keep_trailing_slash: false,
            default_port_f: Scheme::default_port,
        }
    }

    /// Sets whether to allow underflow in path normalization.
    ///
    /// This defaults to `true`, in which case an excess `".."` segment is
    /// silently dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use uri_compose::{normalize::Normalizer, path::Path, Error};
    ///
    /// let normalizer = Normalizer::new().allow_path_underflow(false);
    /// let path = Path::absolute(["a", "..", ".."]);
    ///
    /// assert!(matches!(normalizer.normalize_path(&path), Err(Error::PathUnderflow { .. })));
    /// ```
    pub fn allow_path_underflow(mut self, value: bool) -> Self {
        self.allow_path_underflow = value;
        self
    }

    /// Sets whether a path ending in a dot segment keeps its trailing slash.
    ///
    /// This defaults to `false`, so that `/a/b/..` becomes `/a`. With `true`
    /// it becomes `/a/` as in [Section 5.2.4 of RFC 3986].
    ///
    /// [Section 5.2.4 of RFC 3986]: https://datatracker.ietf.org/doc/html/rfc3986/#section-5.2.4
    pub fn keep_trailing_slash(mut self, value: bool) -> Self {
        self.keep_trailing_slash = value;
        self
    }

    /// Sets the function with which to get the default port of a scheme.
    ///
    /// This defaults to [`Scheme::default_port`].
    ///
    /// # Examples
    ///
    /// ```
    /// use uri_compose::{component::{Authority, Host, Port, Scheme, UriComponent}, normalize::Normalizer, path::Path, Hierarchy, Uri};
    ///
    /// let normalizer = Normalizer::new().default_port_with(|scheme| {
    ///     if scheme.as_str().eq_ignore_ascii_case("foo") {
    ///         Some(4673)
    ///     } else {
    ///         scheme.default_port()
    ///     }
    /// });
    /// let authority = Authority::new(Host::reg_name("localhost")).with_port(Port::from(4673));
    /// let uri = Uri::new(Scheme::new("foo"), Hierarchy::new(Some(authority), Path::Empty), None, None);
    ///
    /// assert_eq!(normalizer.normalize_uri(&uri)?.as_string()?, "foo://localhost");
    /// # Ok::<_, uri_compose::Error>(())
    /// ```
    pub fn default_port_with(mut self, f: fn(&Scheme) -> Option<u16>) -> Self {
        self.default_port_f = f;
        self
    }

    /// Removes dot segments from a sequence of path segments.
    ///
    /// See [`remove_dot_segments`] for the algorithm.
    ///
    /// # Errors
    ///
    /// Returns `Err` if an underflow occurred when [`allow_path_underflow`]
    /// is set to `false`.
    ///
    /// [`allow_path_underflow`]: Self::allow_path_underflow
    pub fn remove_dot_segments(&self, segments: &[PathSegment]) -> Result<Vec<PathSegment>> {
        remove_dot_segments_with(segments, self.keep_trailing_slash, || {
            if self.allow_path_underflow {
                trace!("excess \"..\" segment dropped");
                Ok(())
            } else {
                Err(Error::path_underflow(&join(segments)))
            }
        })
    }

    /// Removes dot segments from a path, keeping its shape.
    ///
    /// A rootless output may begin with an empty segment. Such a path is
    /// kept as is and fails to render.
    ///
    /// # Errors
    ///
    /// Returns `Err` under the same conditions as [`remove_dot_segments`](Self::remove_dot_segments).
    pub fn normalize_path(&self, path: &Path) -> Result<Path> {
        let segments = self.remove_dot_segments(path.segments())?;
        Ok(path.with_segments(segments))
    }

    /// Normalizes a URI.
    ///
    /// The scheme and a registered name are lowercased, an empty port or a
    /// port equal to the default port of the scheme is removed, and dot
    /// segments are removed from the path. The query and the fragment are
    /// left untouched.
    ///
    /// # Errors
    ///
    /// Returns `Err` under the same conditions as [`remove_dot_segments`](Self::remove_dot_segments).
    pub fn normalize_uri(&self, uri: &Uri) -> Result<Uri> {
        let scheme = uri.scheme().normalized();
        let default_port = (self.default_port_f)(&scheme);
        let authority = uri
            .authority()
            .map(|authority| normalize_authority(authority, default_port));
        let path = self.normalize_path(uri.path())?;
        debug!(scheme = scheme.as_str(), "normalized URI");

        Ok(Uri::new(
            scheme,
            Hierarchy::new(authority, path),
            uri.query().cloned(),
            uri.fragment().cloned(),
        ))
    }

    /// Normalizes a relative reference.
    ///
    /// Same as [`normalize_uri`](Self::normalize_uri) except that there is no
    /// scheme and thus no default port, and that dot segments are removed only
    /// from an absolute path. A relative path is kept as is, since its dot
    /// segments matter when it is resolved.
    ///
    /// # Errors
    ///
    /// Returns `Err` under the same conditions as [`remove_dot_segments`](Self::remove_dot_segments).
    pub fn normalize_relative(&self, reference: &RelativeRef) -> Result<RelativeRef> {
        let authority = reference
            .authority()
            .map(|authority| normalize_authority(authority, None));
        let path = if reference.path().is_absolute() {
            self.normalize_path(reference.path())?
        } else {
            reference.path().clone()
        };

        Ok(RelativeRef::new(
            Hierarchy::new(authority, path),
            reference.query().cloned(),
            reference.fragment().cloned(),
        ))
    }
}

fn normalize_authority(authority: &Authority, default_port: Option<u16>) -> Authority {
    let port = authority
        .port()
        .filter(|port| !port.is_empty())
        .filter(|port| default_port.map_or(true, |default| port.as_u16() != Some(default)))
        .cloned();

    let mut normalized = authority.clone().with_port_opt(port);
    if let Some(host) = authority.host() {
        normalized = normalized.with_host(host.normalized());
    }
    normalized
}

fn join(segments: &[PathSegment]) -> String {
    let mut buf = String::new();
    for (i, segment) in segments.iter().enumerate() {
        if i > 0 {
            buf.push('/');
        }
        buf.push_str(segment.as_str());
    }
    buf
}

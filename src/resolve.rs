//! Module for reference resolution.

use crate::{
    component::Defined,
    error::Result,
    normalize::Normalizer,
    path::Path,
    uri::{Hierarchy, RelativeRef, Uri, UriReference},
};
use tracing::debug;

/// Merges a reference path with the path of a base.
///
/// This is the algorithm of [Section 5.2.3 of RFC 3986]:
///
/// - If the base has an authority and an empty path, the result is the
///   reference path made absolute.
/// - Otherwise, the result has the shape of the base path and consists of
///   the segments of the base path except the last one, followed by the
///   segments of the reference path. A base path with at most one segment
///   contributes nothing.
///
/// Dot segments are kept. Normalize the result afterwards if needed.
///
/// [Section 5.2.3 of RFC 3986]: https://datatracker.ietf.org/doc/html/rfc3986/#section-5.2.3
///
/// # Examples
///
/// ```
/// use uri_compose::{component::{Authority, Host}, path::Path, resolve::merge, Hierarchy};
///
/// let base = Hierarchy::new(None, Path::absolute(["a", "b"]));
/// assert_eq!(merge(&base, &Path::rootless(["c", ".."])), Path::absolute(["a", "c", ".."]));
///
/// let base = Hierarchy::new(Some(Authority::new(Host::reg_name("h"))), Path::Empty);
/// assert_eq!(merge(&base, &Path::rootless(["a", "b"])), Path::absolute(["a", "b"]));
/// ```
#[must_use]
pub fn merge(base: &Hierarchy, reference: &Path) -> Path {
    if base.authority().is_defined() && base.path().is_empty() {
        debug!("base has an authority and an empty path");
        return reference.to_absolute();
    }

    let base_segments = base.path().segments();
    let kept: &[_] = match base_segments {
        [init @ .., _] if !init.is_empty() => init,
        _ => &[],
    };
    let merged = base
        .path()
        .with_segments(kept.iter().chain(reference.segments()));
    debug!(
        base_segments = base_segments.len(),
        merged_segments = merged.segments().len(),
        "merged paths"
    );
    merged
}

/// A configurable resolver of URI references against a fixed base URI.
///
/// Resolution follows [Section 5.2.2 of RFC 3986]. A fragment of the base is
/// ignored. Dot segments are removed with the configured [`Normalizer`],
/// which defaults to `Normalizer::new()`.
///
/// [Section 5.2.2 of RFC 3986]: https://datatracker.ietf.org/doc/html/rfc3986/#section-5.2.2
///
/// # Examples
///
/// ```
/// use uri_compose::{
///     component::{Authority, Host, Query, Scheme, UriComponent},
///     path::Path,
///     resolve::Resolver,
///     Hierarchy, RelativeRef, Uri,
/// };
///
/// let base = Uri::new(
///     Scheme::new("http"),
///     Hierarchy::new(Some(Authority::new(Host::reg_name("example.com"))), Path::absolute(["foo", "bar"])),
///     None,
///     None,
/// );
/// let resolver = Resolver::with_base(base);
///
/// let reference = RelativeRef::new(Hierarchy::new(None, Path::rootless(["baz"])), None, None);
/// assert_eq!(resolver.resolve(&reference.into())?.as_string()?, "http://example.com/foo/baz");
///
/// let reference = RelativeRef::new(Hierarchy::new(None, Path::rootless(["..", "baz"])), None, None);
/// assert_eq!(resolver.resolve(&reference.into())?.as_string()?, "http://example.com/baz");
///
/// let reference = RelativeRef::new(Hierarchy::default(), Some(Query::new("baz")), None);
/// assert_eq!(resolver.resolve(&reference.into())?.as_string()?, "http://example.com/foo/bar?baz");
/// # Ok::<_, uri_compose::Error>(())
/// ```
#[derive(Clone, Debug)]
#[must_use]
pub struct Resolver {
    base: Uri,
    normalizer: Normalizer,
}

impl Resolver {
    /// Creates a new `Resolver` with the given base.
    pub fn with_base(base: Uri) -> Self {
        Self {
            base,
            normalizer: Normalizer::new(),
        }
    }

    /// Sets the normalizer with which to remove dot segments.
    pub fn normalizer(mut self, normalizer: Normalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    /// Sets whether to allow underflow in path resolution.
    ///
    /// Shorthand for configuring
    /// [`Normalizer::allow_path_underflow`] of the current normalizer.
    pub fn allow_path_underflow(mut self, value: bool) -> Self {
        self.normalizer = self.normalizer.allow_path_underflow(value);
        self
    }

    /// Returns the base.
    #[must_use]
    pub fn base(&self) -> &Uri {
        &self.base
    }

    /// Resolves the given reference against the configured base.
    ///
    /// # Errors
    ///
    /// Returns `Err` if an underflow occurred in path resolution when
    /// underflow is disallowed by the normalizer.
    pub fn resolve(&self, reference: &UriReference) -> Result<Uri> {
        resolve(&self.base, reference, &self.normalizer)
    }
}

pub(crate) fn resolve(base: &Uri, reference: &UriReference, normalizer: &Normalizer) -> Result<Uri> {
    let r = match reference {
        UriReference::Uri(r) => {
            debug!("reference has a scheme");
            return Ok(Uri::new(
                r.scheme().clone(),
                Hierarchy::new(r.authority().cloned(), normalizer.normalize_path(r.path())?),
                r.query().cloned(),
                r.fragment().cloned(),
            ));
        }
        UriReference::Relative(r) => r,
    };

    let (t_authority, t_path, t_query);
    if r.authority().is_defined() {
        debug!("reference has an authority");
        t_authority = r.authority().cloned();
        t_path = normalizer.normalize_path(r.path())?;
        t_query = r.query().cloned();
    } else {
        if r.path().is_empty() {
            debug!("reference has an empty path");
            t_path = base.path().clone();
            t_query = r.query().or(base.query()).cloned();
        } else {
            t_path = if r.path().is_absolute() {
                debug!("reference has an absolute path");
                normalizer.normalize_path(r.path())?
            } else {
                debug!("merging reference path with base path");
                normalizer.normalize_path(&merge(base.hierarchy(), r.path()))?
            };
            t_query = r.query().cloned();
        }
        t_authority = base.authority().cloned();
    }

    Ok(Uri::new(
        base.scheme().clone(),
        Hierarchy::new(t_authority, t_path),
        t_query,
        r.fragment().cloned(),
    ))
}

impl Uri {
    /// Resolves a reference against this URI with a default [`Resolver`].
    ///
    /// # Errors
    ///
    /// Never fails with the default configuration. See [`Resolver::resolve`].
    pub fn resolve(&self, reference: &UriReference) -> Result<Uri> {
        resolve(self, reference, &Normalizer::new())
    }
}

impl RelativeRef {
    /// Resolves this reference against a base URI with a default [`Resolver`].
    ///
    /// # Errors
    ///
    /// Never fails with the default configuration. See [`Resolver::resolve`].
    pub fn resolve_against(&self, base: &Uri) -> Result<Uri> {
        resolve(base, &UriReference::Relative(self.clone()), &Normalizer::new())
    }
}

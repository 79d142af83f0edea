//! Module for URI (reference) building.

#![allow(missing_debug_implementations)]

mod imp;
pub(crate) mod state;

pub(crate) use imp::assemble;

use imp::*;
use state::*;

use crate::{
    component::{Authority, Fragment, Query, Scheme},
    path::Path,
};
use core::marker::PhantomData;

/// A builder for URI (reference).
///
/// This struct is created by the `builder` associated functions on
/// [`Uri`], [`RelativeRef`], and [`UriReference`].
///
/// [`Uri`]: crate::Uri
/// [`RelativeRef`]: crate::RelativeRef
/// [`UriReference`]: crate::UriReference
///
/// # Examples
///
/// ```
/// use uri_compose::{
///     component::{Authority, Fragment, Host, Port, Query, Scheme, UriComponent, Userinfo},
///     path::Path,
///     pct_enc::ByteEncoding,
///     Uri,
/// };
///
/// let uri = Uri::builder()
///     .scheme(Scheme::new("foo"))
///     .authority(
///         Authority::new(Host::reg_name("example.com"))
///             .with_userinfo(Userinfo::new("user"))
///             .with_port(Port::from(8042)),
///     )
///     .path(Path::absolute(["over", "there"]))
///     .query(Query::pairs([("name", "ferret")]))
///     .fragment(Fragment::new("nose"))
///     .build();
///
/// assert_eq!(
///     uri.encoded(ByteEncoding::Utf8)?,
///     "foo://user@example.com:8042/over/there?name=ferret#nose"
/// );
/// # Ok::<_, uri_compose::Error>(())
/// ```
///
/// # Constraints
///
/// Typestates are used to avoid misconfigurations,
/// which puts the following constraints:
///
/// - Components must be set from start to end, no repetition allowed.
/// - Setting [`scheme`] is mandatory when building a [`Uri`] and
///   unavailable when building a [`RelativeRef`].
/// - Setting [`path`] is mandatory.
///
/// You may otherwise skip setting optional components
/// (scheme of a URI reference, authority, query, and fragment)
/// with [`advance`] or set them optionally with [`optional`].
///
/// Building never fails. Whether the components fit together is checked
/// when a representation of the result is requested.
///
/// [`Uri`]: crate::Uri
/// [`RelativeRef`]: crate::RelativeRef
/// [`advance`]: Self::advance
/// [`optional`]: Self::optional
/// [`scheme`]: Self::scheme
/// [`path`]: Self::path
#[must_use]
pub struct Builder<R, S> {
    inner: BuilderInner,
    _marker: PhantomData<(R, S)>,
}

impl<R, S> Builder<R, S> {
    pub(crate) fn new() -> Self {
        Self {
            inner: BuilderInner::default(),
            _marker: PhantomData,
        }
    }
}

impl<R, S> Builder<R, S> {
    fn cast<T>(self) -> Builder<R, T>
    where
        S: To<T>,
    {
        self.advance_unchecked()
    }

    fn advance_unchecked<T>(self) -> Builder<R, T> {
        Builder {
            inner: self.inner,
            _marker: PhantomData,
        }
    }

    /// Advances the builder state, skipping optional components in between.
    ///
    /// Variable rebinding may be necessary as this changes the type of the builder.
    ///
    /// ```
    /// use uri_compose::{
    ///     component::{Authority, Host, Scheme, UriComponent},
    ///     path::Path,
    ///     UriReference,
    /// };
    ///
    /// fn build(relative: bool) -> UriReference {
    ///     let b = UriReference::builder();
    ///     let b = if relative {
    ///         b.advance()
    ///     } else {
    ///         b.scheme(Scheme::new("http"))
    ///             .authority(Authority::new(Host::reg_name("example.com")))
    ///     };
    ///     b.path(Path::absolute(["foo"])).build()
    /// }
    ///
    /// assert_eq!(build(false).as_string()?, "http://example.com/foo");
    /// assert_eq!(build(true).as_string()?, "/foo");
    /// # Ok::<_, uri_compose::Error>(())
    /// ```
    pub fn advance<T>(self) -> Builder<R, T>
    where
        S: AdvanceTo<T>,
    {
        self.advance_unchecked()
    }

    /// Optionally calls a builder method with a value.
    ///
    /// ```
    /// use uri_compose::{build::Builder, component::{Query, UriComponent}, path::Path, RelativeRef};
    ///
    /// let reference = RelativeRef::builder()
    ///     .path(Path::rootless(["foo"]))
    ///     .optional(Builder::query, Some(Query::new("bar")))
    ///     .optional(Builder::fragment, None)
    ///     .build();
    ///
    /// assert_eq!(reference.as_string()?, "foo?bar");
    /// # Ok::<_, uri_compose::Error>(())
    /// ```
    pub fn optional<F, V, T>(self, f: F, opt: Option<V>) -> Builder<R, T>
    where
        F: FnOnce(Self, V) -> Builder<R, T>,
        S: AdvanceTo<T>,
    {
        match opt {
            Some(value) => f(self, value),
            None => self.advance(),
        }
    }
}

impl<R, S: To<SchemeEnd>> Builder<R, S> {
    /// Sets the [scheme] component.
    ///
    /// [scheme]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.1
    pub fn scheme(mut self, scheme: Scheme) -> Builder<R, SchemeEnd> {
        self.inner.scheme = Some(scheme);
        self.cast()
    }
}

impl<R, S: To<AuthorityEnd>> Builder<R, S> {
    /// Sets the [authority] component.
    ///
    /// [authority]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.2
    pub fn authority(mut self, authority: Authority) -> Builder<R, AuthorityEnd> {
        self.inner.authority = Some(authority);
        self.cast()
    }
}

impl<R, S: To<PathEnd>> Builder<R, S> {
    /// Sets the [path] component.
    ///
    /// When an authority is set, the path must be empty or absolute for the
    /// result to have a representation.
    ///
    /// [path]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.3
    pub fn path(mut self, path: Path) -> Builder<R, PathEnd> {
        self.inner.path = path;
        self.cast()
    }
}

impl<R, S: To<QueryEnd>> Builder<R, S> {
    /// Sets the [query] component.
    ///
    /// [query]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.4
    pub fn query(mut self, query: Query) -> Builder<R, QueryEnd> {
        self.inner.query = Some(query);
        self.cast()
    }
}

impl<R, S: To<FragmentEnd>> Builder<R, S> {
    /// Sets the [fragment] component.
    ///
    /// [fragment]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.5
    pub fn fragment(mut self, fragment: Fragment) -> Builder<R, FragmentEnd> {
        self.inner.fragment = Some(fragment);
        self.cast()
    }
}

impl<R: Target, S: To<End>> Builder<R, S> {
    /// Builds the URI (reference).
    pub fn build(self) -> R {
        R::from_inner(self.inner)
    }
}

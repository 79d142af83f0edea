use crate::{
    build::{
        assemble,
        state::{RefStart, RelativeStart, UriStart},
        Builder,
    },
    component::{Authority, Fragment, Query, Repr, Scheme, UriComponent},
    error::Result,
    normalize::Normalizer,
    path::{Part, Path},
    pct_enc::{ByteEncoding, EString},
};

#[cfg(feature = "serde")]
use serde::{ser, Serialize, Serializer};

/// An authority together with a path.
///
/// Written after the scheme of a URI as a [`hier-part`], or at the start of
/// a relative reference as a [`relative-part`].
///
/// [`hier-part`]: https://datatracker.ietf.org/doc/html/rfc3986#section-3
/// [`relative-part`]: https://datatracker.ietf.org/doc/html/rfc3986#section-4.2
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Hierarchy {
    authority: Option<Authority>,
    path: Path,
}

impl Hierarchy {
    /// Creates a hierarchy from an optional authority and a path.
    pub fn new(authority: Option<Authority>, path: Path) -> Self {
        Self { authority, path }
    }

    /// Returns the authority.
    #[must_use]
    pub fn authority(&self) -> Option<&Authority> {
        self.authority.as_ref()
    }

    /// Returns the path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the percent-encoded `hier-part`.
    ///
    /// # Errors
    ///
    /// See [`Path::hier_part`].
    pub fn hier_part(&self, encoding: ByteEncoding) -> Result<EString> {
        self.path.hier_part(self.authority(), encoding)
    }

    /// Returns the unencoded `hier-part`.
    ///
    /// # Errors
    ///
    /// See [`Path::hier_part`].
    pub fn hier_part_string(&self) -> Result<String> {
        self.project(Part::Hier, Repr::Unencoded)
    }

    /// Returns the percent-encoded `relative-part`.
    ///
    /// # Errors
    ///
    /// See [`Path::relative_part`].
    pub fn relative_part(&self, encoding: ByteEncoding) -> Result<EString> {
        self.path.relative_part(self.authority(), encoding)
    }

    /// Returns the unencoded `relative-part`.
    ///
    /// # Errors
    ///
    /// See [`Path::relative_part`].
    pub fn relative_part_string(&self) -> Result<String> {
        self.project(Part::Relative, Repr::Unencoded)
    }

    pub(crate) fn project(&self, part: Part, repr: Repr) -> Result<String> {
        self.path.project(part, self.authority(), repr)
    }
}

/// A [URI], which always has a scheme.
///
/// [URI]: https://datatracker.ietf.org/doc/html/rfc3986#section-3
///
/// # Examples
///
/// ```
/// use uri_compose::{component::{Scheme, UriComponent}, path::Path, pct_enc::ByteEncoding, Hierarchy, Uri};
///
/// let uri = Uri::new(
///     Scheme::new("urn"),
///     Hierarchy::new(None, Path::rootless(["example:animal:ferret:nose"])),
///     None,
///     None,
/// );
/// assert_eq!(uri.encoded(ByteEncoding::Utf8)?, "urn:example:animal:ferret:nose");
/// # Ok::<_, uri_compose::Error>(())
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Uri {
    scheme: Scheme,
    hierarchy: Hierarchy,
    query: Option<Query>,
    fragment: Option<Fragment>,
}

impl Uri {
    /// Creates a URI from its components.
    pub fn new(
        scheme: Scheme,
        hierarchy: Hierarchy,
        query: Option<Query>,
        fragment: Option<Fragment>,
    ) -> Self {
        Self {
            scheme,
            hierarchy,
            query,
            fragment,
        }
    }

    /// Creates a new builder for URI.
    pub fn builder() -> Builder<Self, UriStart> {
        Builder::new()
    }

    /// Returns the scheme.
    #[must_use]
    pub fn scheme(&self) -> &Scheme {
        &self.scheme
    }

    /// Returns the authority and the path.
    #[must_use]
    pub fn hierarchy(&self) -> &Hierarchy {
        &self.hierarchy
    }

    /// Returns the authority.
    #[must_use]
    pub fn authority(&self) -> Option<&Authority> {
        self.hierarchy.authority()
    }

    /// Returns the path.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.hierarchy.path()
    }

    /// Returns the query.
    #[must_use]
    pub fn query(&self) -> Option<&Query> {
        self.query.as_ref()
    }

    /// Returns the fragment.
    #[must_use]
    pub fn fragment(&self) -> Option<&Fragment> {
        self.fragment.as_ref()
    }

    /// Normalizes the URI with a default [`Normalizer`].
    ///
    /// # Errors
    ///
    /// Never fails with the default configuration. See [`Normalizer::normalize_uri`].
    pub fn normalize(&self) -> Result<Self> {
        Normalizer::new().normalize_uri(self)
    }

    fn render(&self, repr: Repr) -> Result<String> {
        assemble(
            Some(&self.scheme),
            &self.hierarchy,
            &self.query,
            &self.fragment,
            repr,
        )
    }
}

impl UriComponent for Uri {
    const NAME: &'static str = "URI";

    fn as_string(&self) -> Result<String> {
        self.render(Repr::Unencoded)
    }

    fn encoded(&self, encoding: ByteEncoding) -> Result<EString> {
        let repr = Repr::Encoded(encoding);
        self.render(repr).map(|s| repr.finish(s))
    }
}

/// A [relative reference], which has no scheme.
///
/// [relative reference]: https://datatracker.ietf.org/doc/html/rfc3986#section-4.2
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct RelativeRef {
    hierarchy: Hierarchy,
    query: Option<Query>,
    fragment: Option<Fragment>,
}

impl RelativeRef {
    /// Creates a relative reference from its components.
    pub fn new(hierarchy: Hierarchy, query: Option<Query>, fragment: Option<Fragment>) -> Self {
        Self {
            hierarchy,
            query,
            fragment,
        }
    }

    /// Creates a new builder for relative reference.
    pub fn builder() -> Builder<Self, RelativeStart> {
        Builder::new()
    }

    /// Returns the authority and the path.
    #[must_use]
    pub fn hierarchy(&self) -> &Hierarchy {
        &self.hierarchy
    }

    /// Returns the authority.
    #[must_use]
    pub fn authority(&self) -> Option<&Authority> {
        self.hierarchy.authority()
    }

    /// Returns the path.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.hierarchy.path()
    }

    /// Returns the query.
    #[must_use]
    pub fn query(&self) -> Option<&Query> {
        self.query.as_ref()
    }

    /// Returns the fragment.
    #[must_use]
    pub fn fragment(&self) -> Option<&Fragment> {
        self.fragment.as_ref()
    }

    /// Normalizes the reference with a default [`Normalizer`].
    ///
    /// # Errors
    ///
    /// Never fails with the default configuration. See [`Normalizer::normalize_relative`].
    pub fn normalize(&self) -> Result<Self> {
        Normalizer::new().normalize_relative(self)
    }

    fn render(&self, repr: Repr) -> Result<String> {
        assemble(None, &self.hierarchy, &self.query, &self.fragment, repr)
    }
}

impl UriComponent for RelativeRef {
    const NAME: &'static str = "relative reference";

    fn as_string(&self) -> Result<String> {
        self.render(Repr::Unencoded)
    }

    fn encoded(&self, encoding: ByteEncoding) -> Result<EString> {
        let repr = Repr::Encoded(encoding);
        self.render(repr).map(|s| repr.finish(s))
    }
}

/// A [URI reference], either a URI or a relative reference.
///
/// [URI reference]: https://datatracker.ietf.org/doc/html/rfc3986#section-4.1
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum UriReference {
    /// A URI.
    Uri(Uri),
    /// A relative reference.
    Relative(RelativeRef),
}

impl UriReference {
    /// Creates a new builder for URI reference.
    ///
    /// The result is a URI if a scheme is set, or a relative reference otherwise.
    pub fn builder() -> Builder<Self, RefStart> {
        Builder::new()
    }

    /// Returns the scheme, if any.
    #[must_use]
    pub fn scheme(&self) -> Option<&Scheme> {
        match self {
            Self::Uri(uri) => Some(uri.scheme()),
            Self::Relative(_) => None,
        }
    }

    /// Checks whether the reference is relative.
    #[must_use]
    pub fn is_relative(&self) -> bool {
        matches!(self, Self::Relative(_))
    }

    /// Returns the authority and the path.
    #[must_use]
    pub fn hierarchy(&self) -> &Hierarchy {
        match self {
            Self::Uri(uri) => uri.hierarchy(),
            Self::Relative(r) => r.hierarchy(),
        }
    }

    /// Returns the authority.
    #[must_use]
    pub fn authority(&self) -> Option<&Authority> {
        self.hierarchy().authority()
    }

    /// Returns the path.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.hierarchy().path()
    }

    /// Returns the query.
    #[must_use]
    pub fn query(&self) -> Option<&Query> {
        match self {
            Self::Uri(uri) => uri.query(),
            Self::Relative(r) => r.query(),
        }
    }

    /// Returns the fragment.
    #[must_use]
    pub fn fragment(&self) -> Option<&Fragment> {
        match self {
            Self::Uri(uri) => uri.fragment(),
            Self::Relative(r) => r.fragment(),
        }
    }
}

impl From<Uri> for UriReference {
    fn from(uri: Uri) -> Self {
        Self::Uri(uri)
    }
}

impl From<RelativeRef> for UriReference {
    fn from(r: RelativeRef) -> Self {
        Self::Relative(r)
    }
}

impl UriComponent for UriReference {
    const NAME: &'static str = "URI reference";

    fn as_string(&self) -> Result<String> {
        match self {
            Self::Uri(uri) => uri.as_string(),
            Self::Relative(r) => r.as_string(),
        }
    }

    fn encoded(&self, encoding: ByteEncoding) -> Result<EString> {
        match self {
            Self::Uri(uri) => uri.encoded(encoding),
            Self::Relative(r) => r.encoded(encoding),
        }
    }
}

#[cfg(feature = "serde")]
macro_rules! impl_serialize {
    ($($ty:ty),*) => {
        $(
            impl Serialize for $ty {
                fn serialize<S>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error>
                where
                    S: Serializer,
                {
                    let s = self
                        .encoded(ByteEncoding::Utf8)
                        .map_err(ser::Error::custom)?;
                    serializer.serialize_str(s.as_str())
                }
            }
        )*
    };
}

#[cfg(feature = "serde")]
impl_serialize!(Uri, RelativeRef, UriReference);

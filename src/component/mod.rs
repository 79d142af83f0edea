//! URI components and the contract they share.
//!
//! Every component has two representations: the unencoded value supplied by
//! the caller ([`as_string`]) and the percent-encoded form for its position in
//! the grammar ([`encoded`]). Both are computed on request and both may fail
//! for values that turn out to be invalid.
//!
//! A component that may be absent is modeled as an [`Option`]. The `None`
//! variant is the *undefined* component: it has no representation, and asking
//! for one fails with [`Error::UndefinedComponent`]. Use [`Defined::fold_defined`]
//! to branch on presence instead.
//!
//! [`as_string`]: UriComponent::as_string
//! [`encoded`]: UriComponent::encoded

mod authority;
mod query;
mod scheme;

pub use authority::{Authority, Host, Port, Userinfo};
pub use query::{Query, QueryDelimiters, QueryPair};
pub use scheme::Scheme;

use crate::{
    error::{Error, Result},
    pct_enc::{encode, table, ByteEncoding, EString},
};

/// A value that can be rendered as a part of a URI reference.
///
/// # Examples
///
/// ```
/// use uri_compose::{component::{Fragment, UriComponent}, pct_enc::ByteEncoding};
///
/// let fragment = Fragment::new("top of page");
/// assert_eq!(fragment.as_string()?, "top of page");
/// assert_eq!(fragment.encoded(ByteEncoding::Utf8)?, "top%20of%20page");
///
/// let undefined: Option<Fragment> = None;
/// assert_eq!(
///     undefined.as_string().unwrap_err().to_string(),
///     "no representation for undefined fragment"
/// );
/// # Ok::<_, uri_compose::Error>(())
/// ```
pub trait UriComponent {
    /// Name of the component kind, used in error messages.
    const NAME: &'static str;

    /// Returns the unencoded representation.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the component is undefined or its value is invalid.
    fn as_string(&self) -> Result<String>;

    /// Returns the percent-encoded representation, encoding characters that
    /// cannot pass through with the given byte encoding.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the component is undefined or its value is invalid.
    fn encoded(&self, encoding: ByteEncoding) -> Result<EString>;
}

impl<T: UriComponent> UriComponent for Option<T> {
    const NAME: &'static str = T::NAME;

    fn as_string(&self) -> Result<String> {
        match self {
            Some(c) => c.as_string(),
            None => Err(Error::undefined(T::NAME)),
        }
    }

    fn encoded(&self, encoding: ByteEncoding) -> Result<EString> {
        match self {
            Some(c) => c.encoded(encoding),
            None => Err(Error::undefined(T::NAME)),
        }
    }
}

/// Branching over a component that may be undefined.
///
/// # Examples
///
/// ```
/// use uri_compose::component::{Authority, Defined, Host};
///
/// let undefined: Option<Authority> = None;
/// assert_eq!(undefined.fold_defined(|_| "defined", || "X"), "X");
///
/// let defined = Some(Authority::new(Host::reg_name("example.com")));
/// assert!(defined.fold_defined(|a| a.port().is_none(), || false));
/// ```
pub trait Defined<T> {
    /// Applies `on_defined` to the value if it is defined, or calls `on_undefined` otherwise.
    fn fold_defined<R>(&self, on_defined: impl FnOnce(&T) -> R, on_undefined: impl FnOnce() -> R)
        -> R;

    /// Checks whether the value is defined.
    fn is_defined(&self) -> bool {
        self.fold_defined(|_| true, || false)
    }
}

impl<T> Defined<T> for Option<T> {
    #[inline]
    fn fold_defined<R>(
        &self,
        on_defined: impl FnOnce(&T) -> R,
        on_undefined: impl FnOnce() -> R,
    ) -> R {
        match self {
            Some(value) => on_defined(value),
            None => on_undefined(),
        }
    }
}

/// The representation requested from a composite component.
#[derive(Clone, Copy, Debug)]
pub(crate) enum Repr {
    Unencoded,
    Encoded(ByteEncoding),
}

impl Repr {
    pub(crate) fn render<C: UriComponent + ?Sized>(self, c: &C) -> Result<String> {
        match self {
            Self::Unencoded => c.as_string(),
            Self::Encoded(encoding) => c.encoded(encoding).map(EString::into_string),
        }
    }

    /// Renders an optional component with a leading delimiter, or nothing if it is undefined.
    pub(crate) fn render_prefixed<C: UriComponent>(
        self,
        prefix: &str,
        c: &Option<C>,
    ) -> Result<String> {
        c.fold_defined(
            |c| {
                self.render(c).map(|s| {
                    let mut buf = String::with_capacity(prefix.len() + s.len());
                    buf.push_str(prefix);
                    buf.push_str(&s);
                    buf
                })
            },
            || Ok(String::new()),
        )
    }

    /// Wraps the output of a composite component.
    ///
    /// Encoded output is ASCII because every piece of it is.
    pub(crate) fn finish(self, buf: String) -> EString {
        debug_assert!(matches!(self, Self::Unencoded) || buf.is_ascii());
        EString::new_validated(buf)
    }
}

/// A [fragment] component.
///
/// [fragment]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.5
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Fragment(String);

impl Fragment {
    /// Creates a fragment from its unencoded value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the unencoded value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl UriComponent for Fragment {
    const NAME: &'static str = "fragment";

    fn as_string(&self) -> Result<String> {
        Ok(self.0.clone())
    }

    fn encoded(&self, encoding: ByteEncoding) -> Result<EString> {
        Ok(encode(&self.0, table::FRAGMENT, encoding).to_estring())
    }
}

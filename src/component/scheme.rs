use super::UriComponent;
use crate::{
    error::{Error, Result},
    pct_enc::{table, ByteEncoding, EString},
};
use core::hash;

/// Default ports of a few well-known schemes.
const WELL_KNOWN_PORTS: &[(&str, u16)] = &[
    ("ftp", 21),
    ("http", 80),
    ("https", 443),
    ("ws", 80),
    ("wss", 443),
];

/// A [scheme] component.
///
/// Schemes are compared case-insensitively.
///
/// [scheme]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.1
///
/// # Examples
///
/// ```
/// use uri_compose::component::{Scheme, UriComponent};
///
/// let scheme = Scheme::new("HTTP");
/// assert_eq!(scheme, Scheme::new("http"));
/// assert_eq!(scheme.default_port(), Some(80));
/// assert_eq!(scheme.normalized().as_str(), "http");
///
/// assert!(Scheme::new("1http").as_string().is_err());
/// ```
#[derive(Clone)]
pub struct Scheme {
    name: String,
    default_port: Option<u16>,
}

impl Scheme {
    /// Creates a scheme from its name.
    ///
    /// The name is checked when a representation is requested.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default_port: None,
        }
    }

    /// Creates a scheme with an explicit default port.
    pub fn with_default_port(name: impl Into<String>, port: u16) -> Self {
        Self {
            name: name.into(),
            default_port: Some(port),
        }
    }

    /// Returns the scheme name as given.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.name
    }

    /// Returns the default port of the scheme, if known.
    #[must_use]
    pub fn default_port(&self) -> Option<u16> {
        self.default_port.or_else(|| {
            WELL_KNOWN_PORTS
                .iter()
                .find(|(name, _)| self.name.eq_ignore_ascii_case(name))
                .map(|&(_, port)| port)
        })
    }

    /// Returns a copy of the scheme with its name lowercased.
    #[must_use]
    pub fn normalized(&self) -> Self {
        Self {
            name: self.name.to_ascii_lowercase(),
            default_port: self.default_port,
        }
    }

    fn validate(&self) -> Result<()> {
        match self.name.as_bytes() {
            [first, rest @ ..]
                if first.is_ascii_alphabetic() && rest.iter().all(|&x| table::SCHEME.contains_byte(x)) =>
            {
                Ok(())
            }
            _ => Err(Error::illegal_scheme(
                "Scheme must start with a letter and contain only letters, digits, '+', '-', and '.'",
                &self.name,
            )),
        }
    }
}

impl PartialEq for Scheme {
    fn eq(&self, other: &Self) -> bool {
        self.name.eq_ignore_ascii_case(&other.name)
    }
}

impl Eq for Scheme {}

impl hash::Hash for Scheme {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        for x in self.name.bytes() {
            state.write_u8(x.to_ascii_lowercase());
        }
        state.write_u8(0xff);
    }
}

impl UriComponent for Scheme {
    const NAME: &'static str = "scheme";

    fn as_string(&self) -> Result<String> {
        self.validate()?;
        Ok(self.name.clone())
    }

    fn encoded(&self, _encoding: ByteEncoding) -> Result<EString> {
        self.validate()?;
        // A valid scheme is ASCII and has nothing to encode.
        Ok(EString::new_validated(self.name.clone()))
    }
}

use super::{Defined, Repr, UriComponent};
use crate::{
    error::{Error, Result},
    pct_enc::{encode, table, ByteEncoding, EString},
};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// A [userinfo] subcomponent.
///
/// [userinfo]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.2.1
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Userinfo(String);

impl Userinfo {
    /// Creates a userinfo from its unencoded value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the unencoded value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl UriComponent for Userinfo {
    const NAME: &'static str = "userinfo";

    fn as_string(&self) -> Result<String> {
        Ok(self.0.clone())
    }

    fn encoded(&self, encoding: ByteEncoding) -> Result<EString> {
        Ok(encode(&self.0, table::USERINFO, encoding).to_estring())
    }
}

/// A [host] subcomponent.
///
/// [host]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.2.2
///
/// # Examples
///
/// ```
/// use std::net::Ipv6Addr;
/// use uri_compose::{component::{Host, UriComponent}, pct_enc::ByteEncoding};
///
/// assert_eq!(Host::reg_name("例え.jp").encoded(ByteEncoding::Utf8)?, "%E4%BE%8B%E3%81%88.jp");
/// assert_eq!(Host::from(Ipv6Addr::LOCALHOST).as_string()?, "[::1]");
/// assert_eq!(Host::ipv_future("1", "fe80::a+en1").as_string()?, "[v1.fe80::a+en1]");
/// # Ok::<_, uri_compose::Error>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Host {
    /// A registered name, usually a domain name.
    RegName(String),
    /// An IPv4 address.
    Ipv4(Ipv4Addr),
    /// An IPv6 address.
    Ipv6(Ipv6Addr),
    /// An address of a future version, written `"[v" version "." address "]"`.
    IpvFuture {
        /// The version, one or more hexadecimal digits.
        version: String,
        /// The address.
        address: String,
    },
}

impl Host {
    /// Creates a host from a registered name.
    pub fn reg_name(name: impl Into<String>) -> Self {
        Self::RegName(name.into())
    }

    /// Creates a host from an address of a future version.
    pub fn ipv_future(version: impl Into<String>, address: impl Into<String>) -> Self {
        Self::IpvFuture {
            version: version.into(),
            address: address.into(),
        }
    }

    /// Returns a copy of the host with a registered name lowercased.
    #[must_use]
    pub fn normalized(&self) -> Self {
        match self {
            Self::RegName(name) => Self::RegName(name.to_lowercase()),
            Self::IpvFuture { version, address } => Self::IpvFuture {
                version: version.to_ascii_lowercase(),
                address: address.to_ascii_lowercase(),
            },
            _ => self.clone(),
        }
    }

    fn render(&self, repr: Repr) -> Result<String> {
        Ok(match self {
            Self::RegName(name) => match repr {
                Repr::Unencoded => name.clone(),
                Repr::Encoded(encoding) => encode(name, table::REG_NAME, encoding).to_string(),
            },
            Self::Ipv4(addr) => addr.to_string(),
            Self::Ipv6(addr) => format!("[{addr}]"),
            Self::IpvFuture { version, address } => {
                if version.is_empty() || !table::HEXDIG.contains_all(version) {
                    return Err(Error::illegal_host(
                        "IPvFuture version must be one or more hexadecimal digits",
                        version,
                    ));
                }
                if address.is_empty() || !table::IPV_FUTURE.contains_all(address) {
                    return Err(Error::illegal_host(
                        "IPvFuture address must be one or more unreserved, sub-delims, or ':' characters",
                        address,
                    ));
                }
                format!("[v{version}.{address}]")
            }
        })
    }
}

impl From<Ipv4Addr> for Host {
    fn from(addr: Ipv4Addr) -> Self {
        Self::Ipv4(addr)
    }
}

impl From<Ipv6Addr> for Host {
    fn from(addr: Ipv6Addr) -> Self {
        Self::Ipv6(addr)
    }
}

impl From<IpAddr> for Host {
    fn from(addr: IpAddr) -> Self {
        match addr {
            IpAddr::V4(addr) => Self::Ipv4(addr),
            IpAddr::V6(addr) => Self::Ipv6(addr),
        }
    }
}

impl UriComponent for Host {
    const NAME: &'static str = "host";

    fn as_string(&self) -> Result<String> {
        self.render(Repr::Unencoded)
    }

    fn encoded(&self, encoding: ByteEncoding) -> Result<EString> {
        let repr = Repr::Encoded(encoding);
        self.render(repr).map(|s| repr.finish(s))
    }
}

/// A [port] subcomponent.
///
/// A port may be empty, in which case it is written as a bare `":"`.
///
/// [port]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.2.3
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Port(String);

impl Port {
    /// Creates a port from its digits.
    ///
    /// The digits are checked when a representation is requested.
    pub fn new(digits: impl Into<String>) -> Self {
        Self(digits.into())
    }

    /// Returns the digits as given.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Checks whether the port is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Converts the port to `u16`.
    ///
    /// Returns `None` if the port is empty, not all digits, or too large.
    /// Leading zeros are allowed.
    #[must_use]
    pub fn as_u16(&self) -> Option<u16> {
        if self.0.is_empty() || !table::DIGIT.contains_all(&self.0) {
            return None;
        }
        self.0.parse().ok()
    }

    fn validate(&self) -> Result<()> {
        if table::DIGIT.contains_all(&self.0) {
            Ok(())
        } else {
            Err(Error::illegal_port("Port must contain only digits", &self.0))
        }
    }
}

impl From<u16> for Port {
    fn from(port: u16) -> Self {
        Self(port.to_string())
    }
}

impl UriComponent for Port {
    const NAME: &'static str = "port";

    fn as_string(&self) -> Result<String> {
        self.validate()?;
        Ok(self.0.clone())
    }

    fn encoded(&self, _encoding: ByteEncoding) -> Result<EString> {
        self.validate()?;
        Ok(EString::new_validated(self.0.clone()))
    }
}

/// An [authority] component.
///
/// [authority]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.2
///
/// # Examples
///
/// ```
/// use uri_compose::{component::{Authority, Host, Port, UriComponent, Userinfo}, pct_enc::ByteEncoding};
///
/// let authority = Authority::new(Host::reg_name("example.com"))
///     .with_userinfo(Userinfo::new("user name"))
///     .with_port(Port::from(8042));
/// assert_eq!(authority.encoded(ByteEncoding::Utf8)?, "user%20name@example.com:8042");
/// # Ok::<_, uri_compose::Error>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Authority {
    userinfo: Option<Userinfo>,
    host: Option<Host>,
    port: Option<Port>,
}

impl Authority {
    /// Creates an authority with the given host and neither userinfo nor port.
    pub fn new(host: Host) -> Self {
        Self {
            userinfo: None,
            host: Some(host),
            port: None,
        }
    }

    /// Creates an authority whose host is undefined.
    ///
    /// Such an authority has no representation until a host is set.
    pub fn without_host() -> Self {
        Self {
            userinfo: None,
            host: None,
            port: None,
        }
    }

    /// Sets the host subcomponent.
    #[must_use]
    pub fn with_host(mut self, host: Host) -> Self {
        self.host = Some(host);
        self
    }

    /// Sets the userinfo subcomponent.
    #[must_use]
    pub fn with_userinfo(mut self, userinfo: Userinfo) -> Self {
        self.userinfo = Some(userinfo);
        self
    }

    /// Sets the port subcomponent.
    #[must_use]
    pub fn with_port(mut self, port: Port) -> Self {
        self.port = Some(port);
        self
    }

    /// Sets or clears the port subcomponent.
    #[must_use]
    pub fn with_port_opt(mut self, port: Option<Port>) -> Self {
        self.port = port;
        self
    }

    /// Returns the userinfo subcomponent.
    #[must_use]
    pub fn userinfo(&self) -> Option<&Userinfo> {
        self.userinfo.as_ref()
    }

    /// Returns the host subcomponent.
    #[must_use]
    pub fn host(&self) -> Option<&Host> {
        self.host.as_ref()
    }

    /// Returns the port subcomponent.
    #[must_use]
    pub fn port(&self) -> Option<&Port> {
        self.port.as_ref()
    }

    /// Returns the port as `u16`, if defined and valid.
    #[must_use]
    pub fn port_to_u16(&self) -> Option<u16> {
        self.port.as_ref().and_then(Port::as_u16)
    }

    fn render(&self, repr: Repr) -> Result<String> {
        let mut buf = self.userinfo.fold_defined(
            |userinfo| {
                repr.render(userinfo).map(|mut s| {
                    s.push('@');
                    s
                })
            },
            || Ok(String::new()),
        )?;
        buf.push_str(&repr.render(&self.host)?);
        buf.push_str(&repr.render_prefixed(":", &self.port)?);
        Ok(buf)
    }
}

impl UriComponent for Authority {
    const NAME: &'static str = "authority";

    fn as_string(&self) -> Result<String> {
        self.render(Repr::Unencoded)
    }

    fn encoded(&self, encoding: ByteEncoding) -> Result<EString> {
        let repr = Repr::Encoded(encoding);
        self.render(repr).map(|s| repr.finish(s))
    }
}

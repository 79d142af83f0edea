#![warn(missing_debug_implementations, missing_docs, rust_2018_idioms)]

//! Build, validate, and percent-encode URI references as defined in IETF [RFC 3986].
//!
//! [RFC 3986]: https://datatracker.ietf.org/doc/html/rfc3986/
//!
//! A URI reference is assembled from structured [components], each of which
//! knows its unencoded value and how to percent-encode itself for its position
//! in the grammar. Nothing is validated at construction. A value that cannot be
//! written in its position makes the request for a representation fail with an
//! [`Error`] instead.
//!
//! # Examples
//!
//! ```
//! use uri_compose::{
//!     component::{Authority, Host, Query, Scheme, UriComponent},
//!     path::Path,
//!     pct_enc::ByteEncoding,
//!     RelativeRef, Uri,
//! };
//!
//! let base = Uri::builder()
//!     .scheme(Scheme::new("https"))
//!     .authority(Authority::new(Host::reg_name("example.com")))
//!     .path(Path::absolute(["docs", "guide"]))
//!     .build();
//!
//! let reference = RelativeRef::builder()
//!     .path(Path::rootless(["..", "café menu"]))
//!     .query(Query::pairs([("lang", "fr & en")]))
//!     .build();
//!
//! let target = base.resolve(&reference.into())?;
//! assert_eq!(
//!     target.encoded(ByteEncoding::Utf8)?,
//!     "https://example.com/caf%C3%A9%20menu?lang=fr%20%26%20en"
//! );
//! # Ok::<_, uri_compose::Error>(())
//! ```
//!
//! # Feature flags
//!
//! All features are disabled by default.
//!
//! - `serde`: Implements [`Serialize`] for [`Uri`], [`RelativeRef`], and
//!   [`UriReference`], which are serialized as their percent-encoded form.
//!
//! # Logging
//!
//! Diagnostics are emitted as [`tracing`] events at the `trace` and `debug`
//! levels. No subscriber is installed by this crate.
//!
//! [components]: component
//! [`Serialize`]: https://docs.rs/serde/latest/serde/trait.Serialize.html

pub mod build;
pub mod component;
mod error;
mod fmt;
pub mod normalize;
pub mod path;
pub mod pct_enc;
pub mod resolve;
mod uri;

pub use error::{Error, Result};
pub use uri::{Hierarchy, RelativeRef, Uri, UriReference};

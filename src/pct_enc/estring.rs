use super::{encode, ByteEncoding, EStr, Table};
use core::{borrow::Borrow, cmp::Ordering, fmt, hash, ops::Deref};

/// A percent-encoded, growable string.
///
/// The borrowed counterpart of `EString` is [`EStr`].
///
/// # Comparison
///
/// `EString`s are compared [lexicographically](Ord#lexicographical-comparison)
/// by their byte values. Normalization is **not** performed prior to comparison.
///
/// # Examples
///
/// Encode key-value pairs by hand, escaping the delimiters inside the data:
///
/// ```
/// use uri_compose::pct_enc::{table::{self, Table}, ByteEncoding, EString};
///
/// const DATA: Table = table::QUERY.difference(Table::new(b"&="));
///
/// let mut buf = EString::new();
/// for (k, v) in [("name", "张三"), ("a&b", "c=d")] {
///     if !buf.is_empty() {
///         buf.push_ascii('&');
///     }
///     buf.encode_str(k, DATA, ByteEncoding::Utf8);
///     buf.push_ascii('=');
///     buf.encode_str(v, DATA, ByteEncoding::Utf8);
/// }
///
/// assert_eq!(buf, "name=%E5%BC%A0%E4%B8%89&a%26b=c%3Dd");
/// ```
#[derive(Clone, Default)]
pub struct EString {
    buf: String,
}

impl Deref for EString {
    type Target = EStr;

    fn deref(&self) -> &EStr {
        EStr::new_validated(&self.buf)
    }
}

impl EString {
    pub(crate) fn new_validated(buf: String) -> Self {
        Self { buf }
    }

    /// Creates a new empty `EString`.
    #[must_use]
    pub fn new() -> Self {
        Self::new_validated(String::new())
    }

    /// Creates a new empty `EString` with at least the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::new_validated(String::with_capacity(capacity))
    }

    /// Coerces to an `EStr` slice.
    #[must_use]
    pub fn as_estr(&self) -> &EStr {
        self
    }

    /// Encodes a string and appends the result onto the end of this `EString`.
    ///
    /// See [`encode`] for the exact behavior.
    pub fn encode_str(&mut self, s: &str, table: Table, encoding: ByteEncoding) {
        for chunk in encode(s, table, encoding) {
            self.buf.push_str(chunk.as_str());
        }
    }

    /// Appends an unencoded ASCII character onto the end of this `EString`.
    ///
    /// # Panics
    ///
    /// Panics if the character is not ASCII.
    pub fn push_ascii(&mut self, ch: char) {
        assert!(ch.is_ascii(), "non-ASCII char pushed into EString");
        self.buf.push(ch);
    }

    /// Appends an `EStr` slice onto the end of this `EString`.
    pub fn push_estr(&mut self, s: &EStr) {
        self.buf.push_str(s.as_str());
    }

    /// Truncates this `EString`, removing all contents.
    pub fn clear(&mut self) {
        self.buf.clear();
    }

    /// Consumes this `EString` and yields the underlying `String`.
    #[must_use]
    pub fn into_string(self) -> String {
        self.buf
    }
}

impl AsRef<EStr> for EString {
    fn as_ref(&self) -> &EStr {
        self
    }
}

impl AsRef<str> for EString {
    fn as_ref(&self) -> &str {
        &self.buf
    }
}

impl Borrow<EStr> for EString {
    fn borrow(&self) -> &EStr {
        self
    }
}

impl From<&EStr> for EString {
    fn from(s: &EStr) -> Self {
        s.to_owned()
    }
}

impl From<EString> for String {
    fn from(s: EString) -> Self {
        s.buf
    }
}

impl PartialEq for EString {
    fn eq(&self, other: &Self) -> bool {
        self.buf == other.buf
    }
}

impl PartialEq<EStr> for EString {
    fn eq(&self, other: &EStr) -> bool {
        self.as_str() == other.as_str()
    }
}

impl PartialEq<EString> for EStr {
    fn eq(&self, other: &EString) -> bool {
        self.as_str() == other.as_str()
    }
}

impl PartialEq<str> for EString {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<EString> for str {
    fn eq(&self, other: &EString) -> bool {
        self == other.as_str()
    }
}

impl PartialEq<&str> for EString {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl PartialEq<EString> for &str {
    fn eq(&self, other: &EString) -> bool {
        *self == other.as_str()
    }
}

impl Eq for EString {}

impl hash::Hash for EString {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.buf.hash(state);
    }
}

impl PartialOrd for EString {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for EString {
    fn cmp(&self, other: &Self) -> Ordering {
        self.buf.cmp(&other.buf)
    }
}

impl fmt::Debug for EString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_str().fmt(f)
    }
}

impl fmt::Display for EString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_str().fmt(f)
    }
}

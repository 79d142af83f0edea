//! Percent-encoding utilities.

mod estring;
pub mod table;

pub use estring::EString;
pub use table::Table;

use core::{cmp::Ordering, fmt, hash, iter::FusedIterator, str};
use ref_cast::{ref_cast_custom, RefCastCustom};

/// A byte encoding used for characters that cannot pass through unencoded.
///
/// Characters that the target encoding cannot represent are replaced by `'?'`
/// before being percent-encoded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ByteEncoding {
    /// UTF-8, as recommended by RFC 3986.
    #[default]
    Utf8,
    /// ISO-8859-1.
    Latin1,
    /// US-ASCII.
    Ascii,
}

impl ByteEncoding {
    /// Encodes a character into the buffer and returns the bytes written.
    pub fn encode_char(self, ch: char, buf: &mut [u8; 4]) -> &[u8] {
        let limit = match self {
            Self::Utf8 => return ch.encode_utf8(buf).as_bytes(),
            Self::Latin1 => 0xff,
            Self::Ascii => 0x7f,
        };
        buf[0] = if ch as u32 <= limit { ch as u8 } else { b'?' };
        &buf[..1]
    }
}

/// Percent-encoded string slices.
///
/// The owned counterpart of `EStr` is [`EString`].
///
/// An `EStr` only ever holds ASCII: characters that were allowed unencoded,
/// and `%XX` triplets with uppercase hexadecimal digits.
///
/// # Comparison
///
/// `EStr` slices are compared [lexicographically](Ord#lexicographical-comparison)
/// by their byte values. Normalization is **not** performed prior to comparison.
#[derive(RefCastCustom)]
#[repr(transparent)]
pub struct EStr {
    inner: str,
}

impl EStr {
    /// Converts a string slice to an `EStr` slice assuming validity.
    #[ref_cast_custom]
    pub(crate) const fn new_validated(s: &str) -> &Self;

    /// An empty `EStr` slice.
    pub const EMPTY: &'static Self = Self::new_validated("");

    /// Yields the underlying string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Returns the length of the `EStr` slice in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Checks whether the `EStr` slice is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Checks whether the `EStr` slice contains no percent-encoded octet.
    #[must_use]
    pub fn is_unencoded(&self) -> bool {
        !self.inner.contains('%')
    }
}

impl AsRef<str> for EStr {
    fn as_ref(&self) -> &str {
        &self.inner
    }
}

impl PartialEq for EStr {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl PartialEq<str> for EStr {
    fn eq(&self, other: &str) -> bool {
        &self.inner == other
    }
}

impl PartialEq<EStr> for str {
    fn eq(&self, other: &EStr) -> bool {
        self == &other.inner
    }
}

impl PartialEq<&str> for EStr {
    fn eq(&self, other: &&str) -> bool {
        &self.inner == *other
    }
}

impl Eq for EStr {}

impl hash::Hash for EStr {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.inner.hash(state);
    }
}

impl PartialOrd for EStr {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for EStr {
    fn cmp(&self, other: &Self) -> Ordering {
        self.inner.cmp(&other.inner)
    }
}

impl Default for &EStr {
    /// Creates an empty `EStr` slice.
    fn default() -> Self {
        EStr::EMPTY
    }
}

impl ToOwned for EStr {
    type Owned = EString;

    fn to_owned(&self) -> EString {
        EString::new_validated(self.inner.to_owned())
    }
}

/// Percent-encodes a byte, returning an uppercase `%XX` triplet.
///
/// # Examples
///
/// ```
/// assert_eq!(uri_compose::pct_enc::encode_byte(b'%'), "%25");
/// assert_eq!(uri_compose::pct_enc::encode_byte(0xe9), "%E9");
/// ```
#[must_use]
pub fn encode_byte(x: u8) -> &'static str {
    const TABLE: &[u8; 256 * 3] = &{
        const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

        let mut i = 0;
        let mut table = [0; 256 * 3];
        while i < 256 {
            table[i * 3] = b'%';
            table[i * 3 + 1] = HEX_DIGITS[i >> 4];
            table[i * 3 + 2] = HEX_DIGITS[i & 0b1111];
            i += 1;
        }
        table
    };

    const TABLE_STR: &str = match str::from_utf8(TABLE) {
        Ok(s) => s,
        Err(_) => unreachable!(),
    };

    &TABLE_STR[x as usize * 3..x as usize * 3 + 3]
}

/// Returns a lazily percent-encoded view of a string.
///
/// A character passes through unencoded if and only if it is ASCII and
/// a member of `table`. Every other character is converted to bytes with
/// `encoding` and each byte is written as a `%XX` triplet. Note that `'%'`
/// is encoded too unless `table` contains it; reapplying the encoding to
/// its own output is then **not** idempotent, so never double-encode.
///
/// Nothing is computed until the view is iterated or formatted.
///
/// # Examples
///
/// ```
/// use uri_compose::pct_enc::{encode, table::{Table, UNRESERVED}, ByteEncoding};
///
/// assert_eq!(encode("é", UNRESERVED, ByteEncoding::Utf8).to_string(), "%C3%A9");
/// assert_eq!(encode("é", UNRESERVED, ByteEncoding::Latin1).to_string(), "%E9");
/// assert_eq!(encode("%", Table::EMPTY, ByteEncoding::Utf8).to_string(), "%25");
/// ```
pub fn encode(source: &str, table: Table, encoding: ByteEncoding) -> Encoded<'_> {
    Encoded {
        table,
        encoding,
        source,
        to_enc: [0; 4],
        to_enc_range: (0, 0),
    }
}

/// An iterator used to percent-encode a string slice.
///
/// This struct is created by [`encode`]. It can be formatted directly, or
/// collected with [`to_estring`](Self::to_estring).
///
/// See the [`EncodedChunk`] type for documentation of the items yielded by this iterator.
#[derive(Clone, Debug)]
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Encoded<'s> {
    table: Table,
    encoding: ByteEncoding,
    source: &'s str,
    to_enc: [u8; 4],
    to_enc_range: (usize, usize),
}

/// An item returned by the [`Encoded`] iterator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EncodedChunk<'a> {
    /// An unencoded subslice.
    Unencoded(&'a str),
    /// A byte, percent-encoded (for example, `0x20` encoded as `"%20"`).
    PctEncoded(&'static str),
}

impl<'a> EncodedChunk<'a> {
    /// Returns the chunk as a string slice.
    #[must_use]
    pub fn as_str(self) -> &'a str {
        match self {
            Self::Unencoded(s) | Self::PctEncoded(s) => s,
        }
    }
}

impl Encoded<'_> {
    /// Collects the encoded output into an [`EString`].
    #[must_use]
    pub fn to_estring(&self) -> EString {
        let mut buf = String::with_capacity(self.source.len());
        for chunk in self.clone() {
            buf.push_str(chunk.as_str());
        }
        EString::new_validated(buf)
    }
}

impl<'a> Iterator for Encoded<'a> {
    type Item = EncodedChunk<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let (start, end) = self.to_enc_range;
        if start < end {
            self.to_enc_range.0 += 1;
            return Some(EncodedChunk::PctEncoded(encode_byte(self.to_enc[start])));
        }

        let mut chars = self.source.chars();
        let first = chars.next()?;

        if self.table.contains(first) {
            let i = self
                .source
                .find(|ch| !self.table.contains(ch))
                .unwrap_or(self.source.len());
            let allowed;
            (allowed, self.source) = self.source.split_at(i);
            return Some(EncodedChunk::Unencoded(allowed));
        }

        self.source = chars.as_str();
        let len = self.encoding.encode_char(first, &mut self.to_enc).len();
        self.to_enc_range = (1, len);
        Some(EncodedChunk::PctEncoded(encode_byte(self.to_enc[0])))
    }
}

impl FusedIterator for Encoded<'_> {}

impl fmt::Display for Encoded<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for chunk in self.clone() {
            f.write_str(chunk.as_str())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{table::*, *};

    #[test]
    fn passes_allowed_ascii_through() {
        let chunks: Vec<_> = encode("ab/cd", UNRESERVED, ByteEncoding::Utf8).collect();
        assert_eq!(
            chunks,
            [
                EncodedChunk::Unencoded("ab"),
                EncodedChunk::PctEncoded("%2F"),
                EncodedChunk::Unencoded("cd"),
            ]
        );
    }

    #[test]
    fn splits_multibyte_chars_into_octets() {
        assert_eq!(
            encode("te😃a 测", UNRESERVED, ByteEncoding::Utf8).to_string(),
            "te%F0%9F%98%83a%20%E6%B5%8B"
        );
    }

    #[test]
    fn unrepresentable_chars_become_question_marks() {
        assert_eq!(
            encode("é測", Table::EMPTY, ByteEncoding::Latin1).to_string(),
            "%E9%3F"
        );
        assert_eq!(
            encode("é", Table::EMPTY, ByteEncoding::Ascii).to_string(),
            "%3F"
        );
    }

    #[test]
    fn percent_is_escaped_unless_allowed() {
        assert_eq!(encode("%", Table::EMPTY, ByteEncoding::Utf8).to_string(), "%25");
        assert_eq!(encode("%41", PCHAR, ByteEncoding::Utf8).to_string(), "%41");
        assert_eq!(encode("%41", SEGMENT, ByteEncoding::Utf8).to_string(), "%2541");
    }

    #[test]
    fn empty_input() {
        assert_eq!(encode("", Table::EMPTY, ByteEncoding::Utf8).count(), 0);
        assert!(encode("", UNRESERVED, ByteEncoding::Utf8).to_estring().is_empty());
    }

    #[test]
    fn encode_byte_table() {
        for x in 0..=255u8 {
            let s = encode_byte(x);
            assert_eq!(s.len(), 3);
            assert_eq!(u8::from_str_radix(&s[1..], 16), Ok(x));
            assert!(!s.bytes().any(|b| b.is_ascii_lowercase()));
        }
    }
}

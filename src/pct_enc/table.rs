//! Character sets from RFC 3986.
//!
//! The predefined table constants in this module are documented with
//! the ABNF notation of [RFC 5234].
//!
//! [RFC 5234]: https://datatracker.ietf.org/doc/html/rfc5234

use core::fmt;

/// An immutable set of ASCII characters.
///
/// A table describes which characters may appear unencoded in a given grammar
/// position. Tables are built from the named primitives in this module and
/// combined with [`union`], [`difference`], and [`intersection`], none of
/// which touch their operands.
///
/// No character outside the ASCII range is ever a member.
///
/// [`union`]: Self::union
/// [`difference`]: Self::difference
/// [`intersection`]: Self::intersection
///
/// # Examples
///
/// ```
/// use uri_compose::pct_enc::table::{Table, PCHAR, PERCENT, SUB_DELIMS};
///
/// const SEGMENT_DATA: Table = PCHAR.difference(PERCENT);
///
/// assert!(SEGMENT_DATA.contains(':'));
/// assert!(!SEGMENT_DATA.contains('%'));
/// assert!(SEGMENT_DATA.intersection(SUB_DELIMS).contains('='));
/// assert!(!SEGMENT_DATA.contains('é'));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Table(u64, u64);

impl Table {
    /// A table without any character.
    pub const EMPTY: Table = Table(0, 0);

    /// Creates a table that contains exactly the given bytes.
    ///
    /// # Panics
    ///
    /// Panics if any of the bytes is not ASCII.
    #[must_use]
    pub const fn new(mut bytes: &[u8]) -> Self {
        let mut table = 0;
        while let [cur, rem @ ..] = bytes {
            assert!(cur.is_ascii(), "cannot put non-ASCII byte into a table");
            table |= 1u128 << *cur;
            bytes = rem;
        }
        Self(table as u64, (table >> 64) as u64)
    }

    /// Returns a new table containing the characters of `self` or of `other`.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0, self.1 | other.1)
    }

    /// Returns a new table containing the characters of `self` that are not in `other`.
    #[must_use]
    pub const fn difference(self, other: Self) -> Self {
        Self(self.0 & !other.0, self.1 & !other.1)
    }

    /// Returns a new table containing the characters in both `self` and `other`.
    #[must_use]
    pub const fn intersection(self, other: Self) -> Self {
        Self(self.0 & other.0, self.1 & other.1)
    }

    /// Alias of [`union`](Self::union).
    #[inline]
    #[must_use]
    pub const fn or(self, other: Self) -> Self {
        self.union(other)
    }

    /// Alias of [`difference`](Self::difference).
    #[inline]
    #[must_use]
    pub const fn sub(self, other: Self) -> Self {
        self.difference(other)
    }

    /// Alias of [`intersection`](Self::intersection).
    #[inline]
    #[must_use]
    pub const fn and(self, other: Self) -> Self {
        self.intersection(other)
    }

    /// Checks whether the table is a subset of another.
    #[must_use]
    pub const fn is_subset(self, other: Self) -> bool {
        self.0 & other.0 == self.0 && self.1 & other.1 == self.1
    }

    /// Checks whether the table has no member.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0 && self.1 == 0
    }

    /// Returns the number of members.
    #[must_use]
    pub const fn len(self) -> usize {
        (self.0.count_ones() + self.1.count_ones()) as usize
    }

    /// Checks whether the given byte is a member.
    #[inline]
    #[must_use]
    pub const fn contains_byte(self, x: u8) -> bool {
        let bits = if x < 64 {
            self.0
        } else if x < 128 {
            self.1
        } else {
            return false;
        };
        bits & (1u64 << (x % 64)) != 0
    }

    /// Checks whether the given character is a member.
    #[inline]
    #[must_use]
    pub const fn contains(self, ch: char) -> bool {
        ch.is_ascii() && self.contains_byte(ch as u8)
    }

    /// Returns an iterator over the members in ascending order.
    pub fn iter(self) -> impl Iterator<Item = char> {
        (0u8..128)
            .filter(move |&x| self.contains_byte(x))
            .map(char::from)
    }

    /// Checks whether every character of the string is a member.
    pub(crate) fn contains_all(self, s: &str) -> bool {
        s.chars().all(|ch| self.contains(ch))
    }
}

impl fmt::Debug for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

const fn new(bytes: &[u8]) -> Table {
    Table::new(bytes)
}

// Primitives from RFC 3986:

/// Lowercase letters `%x61-7A`.
pub const ALPHA_LOWER: Table = new(b"abcdefghijklmnopqrstuvwxyz");

/// Uppercase letters `%x41-5A`.
pub const ALPHA_UPPER: Table = new(b"ABCDEFGHIJKLMNOPQRSTUVWXYZ");

/// `ALPHA = %x41-5A / %x61-7A`
pub const ALPHA: Table = ALPHA_LOWER.union(ALPHA_UPPER);

/// `DIGIT = %x30-39`
pub const DIGIT: Table = new(b"0123456789");

/// `HEXDIG = DIGIT / "A" / "B" / "C" / "D" / "E" / "F"`
pub const HEXDIG: Table = DIGIT.union(new(b"ABCDEFabcdef"));

/// The percent character `"%"`.
pub const PERCENT: Table = new(b"%");

/// `unreserved = ALPHA / DIGIT / "-" / "." / "_" / "~"`
pub const UNRESERVED: Table = ALPHA.union(DIGIT).union(new(b"-._~"));

/// `gen-delims = ":" / "/" / "?" / "#" / "[" / "]" / "@"`
pub const GEN_DELIMS: Table = new(b":/?#[]@");

/// `sub-delims = "!" / "$" / "&" / "'" / "(" / ")"
///             / "*" / "+" / "," / ";" / "="`
pub const SUB_DELIMS: Table = new(b"!$&'()*+,;=");

/// `reserved = gen-delims / sub-delims`
pub const RESERVED: Table = GEN_DELIMS.union(SUB_DELIMS);

/// `pchar = unreserved / pct-encoded / sub-delims / ":" / "@"`
///
/// The `pct-encoded` alternative is represented by the membership of `"%"`.
/// Encode with [`SEGMENT`] instead, which leaves `"%"` out.
pub const PCHAR: Table = UNRESERVED.union(SUB_DELIMS).union(new(b":@")).union(PERCENT);

// Characters that pass through unencoded when encoding the data of each component.
// None of them contains "%", so the output never becomes ambiguous.

/// Rest of `scheme = ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`
pub const SCHEME: Table = ALPHA.union(DIGIT).union(new(b"+-."));

/// `userinfo = *( unreserved / pct-encoded / sub-delims / ":" )`
pub const USERINFO: Table = UNRESERVED.union(SUB_DELIMS).union(new(b":"));

/// `reg-name = *( unreserved / pct-encoded / sub-delims )`
pub const REG_NAME: Table = UNRESERVED.union(SUB_DELIMS);

/// Address of `IPvFuture = "v" 1*HEXDIG "." 1*( unreserved / sub-delims / ":" )`
pub const IPV_FUTURE: Table = UNRESERVED.union(SUB_DELIMS).union(new(b":"));

/// `segment = *pchar`
pub const SEGMENT: Table = PCHAR.difference(PERCENT);

/// `query = *( pchar / "/" / "?" )`
pub const QUERY: Table = SEGMENT.union(new(b"/?"));

/// `fragment = *( pchar / "/" / "?" )`
pub const FRAGMENT: Table = QUERY;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitives() {
        assert_eq!(ALPHA.len(), 52);
        assert_eq!(DIGIT.len(), 10);
        assert_eq!(UNRESERVED.len(), 66);
        assert_eq!(GEN_DELIMS.len(), 7);
        assert_eq!(SUB_DELIMS.len(), 11);
        assert_eq!(RESERVED.len(), 18);
        assert_eq!(PCHAR.len(), 66 + 11 + 2 + 1);
        assert!(PCHAR.contains('%'));
        assert!(!SEGMENT.contains('%'));
        assert!(!SEGMENT.contains('/'));
        assert!(QUERY.contains('/') && QUERY.contains('?'));
        assert!(!QUERY.contains('#'));
    }

    #[test]
    fn algebra() {
        let a = new(b"abc");
        let b = new(b"bcd");

        assert_eq!(a.union(b), new(b"abcd"));
        assert_eq!(a.union(b), b.union(a));
        assert_eq!(a.difference(b), new(b"a"));
        assert_eq!(a.intersection(b), new(b"bc"));
        assert_eq!(a.intersection(b), b.intersection(a));
        assert_eq!(
            a.union(b).union(DIGIT),
            a.union(b.union(DIGIT)),
            "union is associative"
        );
        assert!(a.intersection(b).is_subset(a));
        assert!(a.difference(a).is_empty());

        // Operands are left untouched.
        assert_eq!(a, new(b"abc"));
        assert_eq!(b, new(b"bcd"));
    }

    #[test]
    fn membership_is_ascii_only() {
        let all = Table::new(&{
            let mut bytes = [0; 128];
            let mut i = 0;
            while i < 128 {
                bytes[i] = i as u8;
                i += 1;
            }
            bytes
        });
        assert_eq!(all.len(), 128);
        assert!(all.contains('\0'));
        assert!(all.contains('\x7f'));
        assert!(!all.contains('\u{80}'));
        assert!(!all.contains('é'));
        assert!(!all.contains_byte(0xff));
    }

    #[test]
    fn iterates_in_order() {
        assert!(GEN_DELIMS.iter().eq("#/:?@[]".chars()));
        assert_eq!(format!("{:?}", new(b"ba")), "{'a', 'b'}");
    }

    #[test]
    #[should_panic = "non-ASCII"]
    fn rejects_non_ascii() {
        let _ = Table::new(&[0xc3, 0xa9]);
    }
}

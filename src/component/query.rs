use super::{Repr, UriComponent};
use crate::{
    error::{Error, Result},
    pct_enc::{encode, table, ByteEncoding, EString, Table},
};

/// Delimiters of a query made of key-value pairs.
///
/// Both delimiters must be allowed unencoded in a query and must differ
/// from each other. This is checked when a representation is requested.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct QueryDelimiters {
    /// Delimiter between pairs, `'&'` by default.
    pub pair: char,
    /// Delimiter between a key and its value, `'='` by default.
    pub key_value: char,
}

impl Default for QueryDelimiters {
    fn default() -> Self {
        Self {
            pair: '&',
            key_value: '=',
        }
    }
}

impl QueryDelimiters {
    fn validate(self) -> Result<Table> {
        for delim in [self.pair, self.key_value] {
            if !table::QUERY.contains(delim) {
                return Err(Error::illegal_delimiter(
                    "Query delimiter must be a character allowed unencoded in a query",
                    delim,
                ));
            }
        }
        if self.pair == self.key_value {
            return Err(Error::illegal_delimiter(
                "Pair and key-value delimiters must differ",
                self.pair,
            ));
        }
        let mut buf = [0; 2];
        // Both are ASCII at this point.
        buf[0] = self.pair as u8;
        buf[1] = self.key_value as u8;
        Ok(table::QUERY.difference(Table::new(&buf)))
    }
}

/// A key with an optional value in a [`Query`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct QueryPair {
    key: String,
    value: Option<String>,
}

impl QueryPair {
    /// Creates a pair with a value.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: Some(value.into()),
        }
    }

    /// Creates a pair without a value, written as the bare key.
    pub fn key_only(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: None,
        }
    }

    /// Returns the key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the value.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

impl<K: Into<String>, V: Into<String>> From<(K, V)> for QueryPair {
    fn from((key, value): (K, V)) -> Self {
        Self::new(key, value)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
enum Kind {
    Raw(String),
    Pairs {
        pairs: Vec<QueryPair>,
        delims: QueryDelimiters,
    },
    Array {
        values: Vec<String>,
        separator: char,
    },
}

/// A [query] component.
///
/// A query is either a raw string, a list of key-value pairs, or a list of
/// values joined by a separator. Delimiters occurring inside the data of the
/// latter two are percent-encoded.
///
/// [query]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.4
///
/// # Examples
///
/// ```
/// use uri_compose::{component::{Query, QueryDelimiters, QueryPair, UriComponent}, pct_enc::ByteEncoding};
///
/// let query = Query::pairs([("q", "a&b"), ("lang", "en")]);
/// assert_eq!(query.encoded(ByteEncoding::Utf8)?, "q=a%26b&lang=en");
///
/// let query = Query::pairs([QueryPair::new("a", "1"), QueryPair::key_only("flag")])
///     .with_delimiters(QueryDelimiters { pair: ';', key_value: ':' });
/// assert_eq!(query.as_string()?, "a:1;flag");
///
/// let query = Query::array(["x,y", "z"], ',');
/// assert_eq!(query.encoded(ByteEncoding::Utf8)?, "x%2Cy,z");
/// # Ok::<_, uri_compose::Error>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Query {
    kind: Kind,
}

impl Query {
    /// Creates a query from its raw unencoded value.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            kind: Kind::Raw(value.into()),
        }
    }

    /// Creates a query from key-value pairs, delimited by `'&'` and `'='`.
    pub fn pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<QueryPair>,
    {
        Self {
            kind: Kind::Pairs {
                pairs: pairs.into_iter().map(Into::into).collect(),
                delims: QueryDelimiters::default(),
            },
        }
    }

    /// Creates a query from values joined by a separator.
    pub fn array<I>(values: I, separator: char) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            kind: Kind::Array {
                values: values.into_iter().map(Into::into).collect(),
                separator,
            },
        }
    }

    /// Replaces the delimiters of a query made of pairs.
    ///
    /// Has no effect on other queries.
    #[must_use]
    pub fn with_delimiters(mut self, delimiters: QueryDelimiters) -> Self {
        if let Kind::Pairs { delims, .. } = &mut self.kind {
            *delims = delimiters;
        }
        self
    }

    /// Returns the pairs if the query is made of pairs.
    #[must_use]
    pub fn as_pairs(&self) -> Option<&[QueryPair]> {
        match &self.kind {
            Kind::Pairs { pairs, .. } => Some(pairs),
            _ => None,
        }
    }

    fn render(&self, repr: Repr) -> Result<String> {
        let encode_data = |buf: &mut String, s: &str, table: Table| match repr {
            Repr::Unencoded => buf.push_str(s),
            Repr::Encoded(encoding) => {
                for chunk in encode(s, table, encoding) {
                    buf.push_str(chunk.as_str());
                }
            }
        };

        let mut buf = String::new();
        match &self.kind {
            Kind::Raw(value) => encode_data(&mut buf, value, table::QUERY),
            Kind::Pairs { pairs, delims } => {
                let data = delims.validate()?;
                for (i, pair) in pairs.iter().enumerate() {
                    if i > 0 {
                        buf.push(delims.pair);
                    }
                    encode_data(&mut buf, &pair.key, data);
                    if let Some(value) = &pair.value {
                        buf.push(delims.key_value);
                        encode_data(&mut buf, value, data);
                    }
                }
            }
            Kind::Array { values, separator } => {
                if !table::QUERY.contains(*separator) {
                    return Err(Error::illegal_delimiter(
                        "Query delimiter must be a character allowed unencoded in a query",
                        *separator,
                    ));
                }
                let data = table::QUERY.difference(Table::new(&[*separator as u8]));
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        buf.push(*separator);
                    }
                    encode_data(&mut buf, value, data);
                }
            }
        }
        Ok(buf)
    }
}

impl UriComponent for Query {
    const NAME: &'static str = "query";

    fn as_string(&self) -> Result<String> {
        self.render(Repr::Unencoded)
    }

    fn encoded(&self, encoding: ByteEncoding) -> Result<EString> {
        let repr = Repr::Encoded(encoding);
        self.render(repr).map(|s| repr.finish(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const UTF8: ByteEncoding = ByteEncoding::Utf8;

    #[test]
    fn raw_query_keeps_delimiters() {
        let query = Query::new("a=1&b=2/?#");
        assert_eq!(query.as_string().unwrap(), "a=1&b=2/?#");
        assert_eq!(query.encoded(UTF8).unwrap(), "a=1&b=2/?%23");
    }

    #[test]
    fn pairs_escape_delimiters_in_data() {
        let query = Query::pairs([("k=1", "v&2"), ("", "")]);
        assert_eq!(query.encoded(UTF8).unwrap(), "k%3D1=v%262&=");
        assert_eq!(query.as_string().unwrap(), "k=1=v&2&=");
    }

    #[test]
    fn custom_delimiters() {
        let delims = QueryDelimiters {
            pair: ';',
            key_value: '=',
        };
        let query = Query::pairs([("a", "x;y&z")]).with_delimiters(delims);
        assert_eq!(query.encoded(UTF8).unwrap(), "a=x%3By&z");
    }

    #[test]
    fn illegal_delimiters() {
        for (pair, key_value) in [('#', '='), ('&', '%'), ('&', '&'), ('&', 'é')] {
            let query =
                Query::pairs([("a", "b")]).with_delimiters(QueryDelimiters { pair, key_value });
            assert!(
                matches!(query.encoded(UTF8), Err(Error::IllegalDelimiter { .. })),
                "{pair:?} {key_value:?}"
            );
            assert!(query.as_string().is_err());
        }
        assert!(Query::array(["a"], '#').as_string().is_err());
    }

    #[test]
    fn empty_lists() {
        assert_eq!(Query::pairs(Vec::<QueryPair>::new()).as_string().unwrap(), "");
        assert_eq!(Query::array(Vec::<String>::new(), ',').encoded(UTF8).unwrap(), "");
    }
}

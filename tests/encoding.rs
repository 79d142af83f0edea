use uri_compose::{
    component::{Authority, Fragment, Host, Query, Scheme, UriComponent, Userinfo},
    path::{Path, PathSegment},
    pct_enc::{
        encode,
        table::{self, Table},
        ByteEncoding, EString,
    },
    Hierarchy, Uri,
};

const UTF8: ByteEncoding = ByteEncoding::Utf8;

trait Test {
    fn enc(&self, encoding: ByteEncoding, expected: &str);
}

impl<T: UriComponent> Test for T {
    #[track_caller]
    fn enc(&self, encoding: ByteEncoding, expected: &str) {
        let s = self.encoded(encoding).unwrap();
        assert_eq!(s, expected);
        assert!(s.as_str().is_ascii());
    }
}

#[test]
fn encode_with_tables() {
    assert_eq!(encode("é", table::UNRESERVED, UTF8).to_string(), "%C3%A9");
    assert_eq!(encode("%", Table::EMPTY, UTF8).to_string(), "%25");
    assert_eq!(encode("a-b_c.d~e", table::UNRESERVED, UTF8).to_string(), "a-b_c.d~e");
    assert_eq!(encode("a b+c", table::UNRESERVED, UTF8).to_string(), "a%20b%2Bc");
    assert_eq!(
        encode("\0\x7f", table::UNRESERVED, UTF8).to_string(),
        "%00%7F"
    );

    // Non-ASCII characters are never allowed, whatever the table.
    let wide = table::PCHAR.union(table::GEN_DELIMS);
    assert_eq!(encode("ü", wide, UTF8).to_string(), "%C3%BC");
}

#[test]
fn byte_encodings() {
    let s = "naïve ☃";
    assert_eq!(
        encode(s, table::UNRESERVED, ByteEncoding::Utf8).to_string(),
        "na%C3%AFve%20%E2%98%83"
    );
    assert_eq!(
        encode(s, table::UNRESERVED, ByteEncoding::Latin1).to_string(),
        "na%EFve%20%3F"
    );
    assert_eq!(
        encode(s, table::UNRESERVED, ByteEncoding::Ascii).to_string(),
        "na%3Fve%20%3F"
    );
    assert_eq!(ByteEncoding::default(), ByteEncoding::Utf8);
}

#[test]
fn table_algebra() {
    let t = Table::new(b"abc");
    assert!(t.contains('a'));
    assert!(!t.contains('d'));
    assert!(!t.contains('é'));
    assert_eq!(t.len(), 3);
    assert!(t.is_subset(table::ALPHA));
    assert!(Table::EMPTY.is_empty());

    assert_eq!(t.union(Table::new(b"d")).len(), 4);
    assert_eq!(t.difference(Table::new(b"a")), Table::new(b"bc"));
    assert_eq!(t.intersection(Table::new(b"cx")), Table::new(b"c"));
    assert_eq!(t.iter().collect::<String>(), "abc");

    assert!(!table::SEGMENT.contains('%'));
    assert!(!table::SEGMENT.contains('/'));
    assert!(table::QUERY.contains('/'));
    assert!(table::QUERY.contains('?'));
    assert!(!table::FRAGMENT.contains('#'));
}

#[test]
fn estring_building() {
    let mut buf = EString::new();
    buf.encode_str("a b", table::UNRESERVED, UTF8);
    buf.push_ascii('&');
    buf.encode_str("ç", table::UNRESERVED, ByteEncoding::Latin1);
    assert_eq!(buf, "a%20b&%E7");
    assert_eq!(buf.len(), 9);
    assert!(!buf.is_unencoded());

    let copy = buf.as_estr().to_owned();
    buf.clear();
    assert!(buf.is_empty());
    assert_eq!(copy.into_string(), "a%20b&%E7");
}

#[test]
fn component_encoding() {
    Userinfo::new("us er:pa@ss").enc(UTF8, "us%20er:pa%40ss");
    Host::reg_name("ex ample.com").enc(UTF8, "ex%20ample.com");
    PathSegment::new("a/b?c").enc(UTF8, "a%2Fb%3Fc");
    Query::new("a=b c#d").enc(UTF8, "a=b%20c%23d");
    Fragment::new("sec #2/?").enc(UTF8, "sec%20%232/?");
    Scheme::new("Svn+SSH").enc(UTF8, "Svn+SSH");
}

#[test]
fn literal_percent_is_always_escaped() {
    // Values are unencoded, so '%' is data everywhere.
    PathSegment::new("100%").enc(UTF8, "100%25");
    Query::new("%41").enc(UTF8, "%2541");
    Fragment::new("%").enc(UTF8, "%25");
    Userinfo::new("%").enc(UTF8, "%25");
    Host::reg_name("%").enc(UTF8, "%25");
}

#[test]
fn uri_encoding() {
    let uri = Uri::new(
        Scheme::new("http"),
        Hierarchy::new(
            Some(Authority::new(Host::reg_name("例え.jp"))),
            Path::absolute(["ä ö", "ü"]),
        ),
        Some(Query::pairs([("q", "ß")])),
        Some(Fragment::new("é")),
    );
    uri.enc(
        UTF8,
        "http://%E4%BE%8B%E3%81%88.jp/%C3%A4%20%C3%B6/%C3%BC?q=%C3%9F#%C3%A9",
    );
    uri.enc(ByteEncoding::Latin1, "http://%3F%3F.jp/%E4%20%F6/%FC?q=%DF#%E9");
    assert_eq!(uri.as_string().unwrap(), "http://例え.jp/ä ö/ü?q=ß#é");
}

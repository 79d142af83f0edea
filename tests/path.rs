use uri_compose::{
    component::{Authority, Host, Scheme, UriComponent},
    path::{Path, PathSegment, SegmentKind},
    pct_enc::ByteEncoding,
    Error, Hierarchy, RelativeRef, Uri,
};

const UTF8: ByteEncoding = ByteEncoding::Utf8;

fn authority() -> Option<Authority> {
    Some(Authority::new(Host::reg_name("example.com")))
}

fn uri(authority: Option<Authority>, path: Path) -> Uri {
    Uri::new(Scheme::new("s"), Hierarchy::new(authority, path), None, None)
}

fn relative(authority: Option<Authority>, path: Path) -> RelativeRef {
    RelativeRef::new(Hierarchy::new(authority, path), None, None)
}

trait Test {
    fn pass(&self, expected: &str);
    fn fail(&self, expected: Error);
}

impl<T: UriComponent> Test for T {
    #[track_caller]
    fn pass(&self, expected: &str) {
        assert_eq!(self.encoded(UTF8).unwrap(), expected);
    }

    #[track_caller]
    fn fail(&self, expected: Error) {
        assert_eq!(self.encoded(UTF8).unwrap_err(), expected);
        assert_eq!(self.as_string().unwrap_err(), expected);
    }
}

#[test]
fn hier_part() {
    uri(authority(), Path::Empty).pass("s://example.com");
    uri(authority(), Path::absolute(["a", "b c"])).pass("s://example.com/a/b%20c");
    uri(authority(), Path::absolute(Vec::<&str>::new())).pass("s://example.com/");
    uri(None, Path::Empty).pass("s:");
    uri(None, Path::absolute(["a"])).pass("s:/a");
    uri(None, Path::rootless(["a:b", "c"])).pass("s:a:b/c");
}

#[test]
fn relative_part() {
    relative(authority(), Path::Empty).pass("//example.com");
    relative(authority(), Path::absolute(["x"])).pass("//example.com/x");
    relative(None, Path::Empty).pass("");
    relative(None, Path::absolute(["x", ""])).pass("/x/");
    relative(None, Path::rootless(["x", "y:z"])).pass("x/y:z");
    relative(None, Path::rootless(["."])).pass(".");
}

#[test]
fn rootless_path_after_authority() {
    let path = Path::rootless(["a b", "c"]);
    let expected = Error::IllegalPath {
        reason: "Illegal path in hier-part component",
        value: path.as_string().unwrap(),
    };
    uri(authority(), path.clone()).fail(expected);

    let expected = Error::IllegalPath {
        reason: "Illegal path in relative-part component",
        value: "a b/c".to_owned(),
    };
    relative(authority(), path).fail(expected);
}

#[test]
fn first_segment_of_relative_path() {
    relative(None, Path::rootless(["a:b"])).fail(Error::IllegalSegment {
        reason: "Illegal ':' in the first segment of a relative path",
        value: "a:b".to_owned(),
    });
    relative(None, Path::rootless(["", "a"])).fail(Error::IllegalSegment {
        reason: "Illegal empty first segment in a path without leading '/'",
        value: String::new(),
    });
    uri(None, Path::rootless(["", "a"])).fail(Error::IllegalSegment {
        reason: "Illegal empty first segment in a path without leading '/'",
        value: String::new(),
    });

    // The colon may be written with a leading "./".
    relative(None, Path::rootless([".", "a:b"])).pass("./a:b");
}

#[test]
fn empty_first_segment_of_absolute_path() {
    uri(None, Path::absolute(["", "a"])).pass("s:/.//a");
    relative(None, Path::absolute(["", ""])).pass("/.//");
    uri(authority(), Path::absolute(["", "a"])).pass("s://example.com//a");
    relative(None, Path::absolute([""])).pass("/");

    // The prefix is not a part of the path itself.
    assert_eq!(Path::absolute(["", "a"]).as_string().unwrap(), "//a");
}

#[test]
fn segments_are_shared() {
    let segment = PathSegment::new("shared");
    let a = Path::absolute([&segment, &segment]);
    let b = Path::rootless([&segment]);
    assert!(core::ptr::eq(a.segments()[1].as_str(), b.segments()[0].as_str()));
    assert_eq!(a.segments().iter().map(PathSegment::kind).collect::<Vec<_>>(), [SegmentKind::Normal; 2]);
}

#[test]
fn normalize_keeps_shape() {
    assert_eq!(Path::absolute(["a", "..", ".."]).normalize(), Path::absolute(Vec::<&str>::new()));
    assert_eq!(Path::rootless([".", "a", "..", "b"]).normalize(), Path::rootless(["b"]));
    assert_eq!(Path::rootless(["a", ".."]).normalize(), Path::Empty);
    assert_eq!(Path::rootless(["a", "..", "", "b"]).normalize(), Path::rootless(["", "b"]));
    assert_eq!(Path::Empty.normalize(), Path::Empty);
}

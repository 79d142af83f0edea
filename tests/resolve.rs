use uri_compose::{
    component::{Authority, Fragment, Host, Query, Scheme, UriComponent},
    normalize::Normalizer,
    path::Path,
    resolve::Resolver,
    Error, Hierarchy, RelativeRef, Uri, UriReference,
};

/// Splits a reference without percent-encoded octets into its components.
fn reference(s: &str) -> UriReference {
    let (rest, fragment) = match s.split_once('#') {
        Some((rest, fragment)) => (rest, Some(Fragment::new(fragment))),
        None => (s, None),
    };
    let (rest, query) = match rest.split_once('?') {
        Some((rest, query)) => (rest, Some(Query::new(query))),
        None => (rest, None),
    };
    let (scheme, rest) = match rest.split_once(':') {
        Some((scheme, rest)) if !scheme.contains('/') => (Some(Scheme::new(scheme)), rest),
        _ => (None, rest),
    };
    let (authority, path) = match rest.strip_prefix("//") {
        Some(rest) => {
            let i = rest.find('/').unwrap_or(rest.len());
            (Some(Authority::new(Host::reg_name(&rest[..i]))), &rest[i..])
        }
        None => (None, rest),
    };
    let path = if path.is_empty() {
        Path::Empty
    } else if let Some(path) = path.strip_prefix('/') {
        Path::absolute(path.split('/'))
    } else {
        Path::rootless(path.split('/'))
    };

    let hierarchy = Hierarchy::new(authority, path);
    match scheme {
        Some(scheme) => Uri::new(scheme, hierarchy, query, fragment).into(),
        None => RelativeRef::new(hierarchy, query, fragment).into(),
    }
}

fn uri(s: &str) -> Uri {
    match reference(s) {
        UriReference::Uri(uri) => uri,
        UriReference::Relative(_) => panic!("not a URI: {s}"),
    }
}

trait Test {
    fn pass(&self, r: &str, expected: &str);
    fn underflow(&self, r: &str);
}

impl Test for Resolver {
    #[track_caller]
    fn pass(&self, r: &str, expected: &str) {
        let resolved = self.resolve(&reference(r)).unwrap();
        assert_eq!(resolved.as_string().unwrap(), expected, "{r:?}");
    }

    #[track_caller]
    fn underflow(&self, r: &str) {
        let err = self.resolve(&reference(r)).unwrap_err();
        assert!(matches!(err, Error::PathUnderflow { .. }), "{r:?}: {err}");
    }
}

fn rfc_resolver(allow_path_underflow: bool) -> Resolver {
    Resolver::with_base(uri("http://a/b/c/d;p?q")).normalizer(
        Normalizer::new()
            .keep_trailing_slash(true)
            .allow_path_underflow(allow_path_underflow),
    )
}

#[test]
fn resolve() {
    // Examples from Section 5.4.1 of RFC 3986.
    for allow_path_underflow in [true, false] {
        let base = rfc_resolver(allow_path_underflow);

        base.pass("g:h", "g:h");
        base.pass("g", "http://a/b/c/g");
        base.pass("./g", "http://a/b/c/g");
        base.pass("g/", "http://a/b/c/g/");
        base.pass("/g", "http://a/g");
        base.pass("//g", "http://g");
        base.pass("?y", "http://a/b/c/d;p?y");
        base.pass("g?y", "http://a/b/c/g?y");
        base.pass("#s", "http://a/b/c/d;p?q#s");
        base.pass("g#s", "http://a/b/c/g#s");
        base.pass("g?y#s", "http://a/b/c/g?y#s");
        base.pass(";x", "http://a/b/c/;x");
        base.pass("g;x", "http://a/b/c/g;x");
        base.pass("g;x?y#s", "http://a/b/c/g;x?y#s");
        base.pass("", "http://a/b/c/d;p?q");
        base.pass(".", "http://a/b/c/");
        base.pass("./", "http://a/b/c/");
        base.pass("..", "http://a/b/");
        base.pass("../", "http://a/b/");
        base.pass("../g", "http://a/b/g");
        base.pass("../..", "http://a/");
        base.pass("../../", "http://a/");
        base.pass("../../g", "http://a/g");
    }
}

#[test]
fn resolve_abnormal() {
    // Examples from Section 5.4.2 of RFC 3986.
    for allow_path_underflow in [true, false] {
        let base = rfc_resolver(allow_path_underflow);

        base.pass("/./g", "http://a/g");
        base.pass("g.", "http://a/b/c/g.");
        base.pass(".g", "http://a/b/c/.g");
        base.pass("g..", "http://a/b/c/g..");
        base.pass("..g", "http://a/b/c/..g");

        base.pass("./../g", "http://a/b/g");
        base.pass("./g/.", "http://a/b/c/g/");
        base.pass("g/./h", "http://a/b/c/g/h");
        base.pass("g/../h", "http://a/b/c/h");
        base.pass("g;x=1/./y", "http://a/b/c/g;x=1/y");
        base.pass("g;x=1/../y", "http://a/b/c/y");

        base.pass("g?y/./x", "http://a/b/c/g?y/./x");
        base.pass("g?y/../x", "http://a/b/c/g?y/../x");
        base.pass("g#s/./x", "http://a/b/c/g#s/./x");
        base.pass("g#s/../x", "http://a/b/c/g#s/../x");

        base.pass("http:g", "http:g");
    }
}

#[test]
fn resolve_underflow() {
    let base = rfc_resolver(true);
    base.pass("../../../g", "http://a/g");
    base.pass("../../../../g", "http://a/g");
    base.pass("/../g", "http://a/g");

    let base = rfc_resolver(false);
    base.underflow("../../../g");
    base.underflow("../../../../g");
    base.underflow("/../g");

    let base = Resolver::with_base(uri("http://a/b/c/d;p?q")).allow_path_underflow(false);
    base.underflow("../../../g");
}

#[test]
fn default_normalizer_drops_trailing_slash() {
    let base = Resolver::with_base(uri("http://a/b/c/d;p?q"));
    base.pass(".", "http://a/b/c");
    base.pass("..", "http://a/b");
    base.pass("../..", "http://a/");
    base.pass("g/", "http://a/b/c/g/");
}

#[test]
fn base_fragment_is_ignored() {
    let base = Resolver::with_base(uri("http://a/b#frag"));
    base.pass("c", "http://a/c");
    base.pass("", "http://a/b");
    base.pass("#s", "http://a/b#s");
}

#[test]
fn base_with_authority_and_empty_path() {
    let base = Resolver::with_base(uri("http://a"));
    base.pass("g", "http://a/g");
    base.pass("g/h", "http://a/g/h");
    base.pass("?y", "http://a?y");
}

#[test]
fn base_with_rootless_path() {
    let base = Resolver::with_base(uri("foo:a/b"));
    base.pass("c", "foo:a/c");
    base.pass("#s", "foo:a/b#s");
    base.pass("/c", "foo:/c");

    let base = Resolver::with_base(uri("foo:a"));
    base.pass("c", "foo:c");
}

#[test]
fn rootless_result_keeps_empty_first_segment() {
    let base = Resolver::with_base(uri("foo:a/b"));
    let resolved = base.resolve(&reference("..//c")).unwrap();
    assert_eq!(resolved.path(), &Path::rootless(["", "c"]));
    assert_eq!(
        resolved.as_string(),
        Err(Error::IllegalSegment {
            reason: "Illegal empty first segment in a path without leading '/'",
            value: String::new(),
        })
    );
}

#[test]
fn shortcuts() {
    let base = uri("http://a/b/c");
    let r = reference("../d");
    assert_eq!(base.resolve(&r).unwrap(), Resolver::with_base(base.clone()).resolve(&r).unwrap());

    let UriReference::Relative(relative) = r else {
        unreachable!()
    };
    assert_eq!(
        relative.resolve_against(&base).unwrap().as_string().unwrap(),
        "http://a/d"
    );
}

#![no_main]
use libfuzzer_sys::{arbitrary, fuzz_target};
use uri_compose::{
    component::{Authority, Host, Scheme, UriComponent},
    path::Path,
    pct_enc::ByteEncoding,
    resolve::{merge, Resolver},
    Hierarchy, RelativeRef, Uri, UriReference,
};

#[derive(Debug, arbitrary::Arbitrary)]
struct Input<'a> {
    base: Vec<&'a str>,
    base_absolute: bool,
    base_authority: bool,
    reference: Vec<&'a str>,
    reference_absolute: bool,
}

fn path(segments: Vec<&str>, absolute: bool) -> Path {
    if absolute {
        Path::absolute(segments)
    } else {
        Path::rootless(segments)
    }
}

fuzz_target!(|input: Input<'_>| {
    let authority = input
        .base_authority
        .then(|| Authority::new(Host::reg_name("example.com")));
    let base_path = path(input.base, input.base_absolute || input.base_authority);
    let base = Uri::new(
        Scheme::new("http"),
        Hierarchy::new(authority, base_path),
        None,
        None,
    );
    let reference_path = path(input.reference, input.reference_absolute);

    // Merging never loses reference segments.
    let merged = merge(base.hierarchy(), &reference_path);
    assert!(merged.segments().len() >= reference_path.segments().len());

    let reference: UriReference = RelativeRef::new(Hierarchy::new(None, reference_path), None, None).into();
    let u1 = Resolver::with_base(base.clone()).resolve(&reference).unwrap();
    if base.authority().is_some() {
        assert!(u1.encoded(ByteEncoding::Utf8).is_ok());
    }

    // Normalizing the result changes nothing more in the path.
    let u2 = u1.normalize().unwrap();
    if !u1.path().is_empty() && u1.path() != base.path() {
        assert_eq!(u1.path(), u2.path());
    }
});

#![no_main]
use libfuzzer_sys::{arbitrary, fuzz_target};
use uri_compose::{normalize::Normalizer, path::Path};

#[derive(Debug, arbitrary::Arbitrary)]
struct Input<'a> {
    segments: Vec<&'a str>,
    absolute: bool,
    keep_trailing_slash: bool,
    allow_path_underflow: bool,
}

fuzz_target!(|input: Input<'_>| {
    let path = if input.absolute {
        Path::absolute(input.segments)
    } else {
        Path::rootless(input.segments)
    };
    let normalizer = Normalizer::new()
        .keep_trailing_slash(input.keep_trailing_slash)
        .allow_path_underflow(input.allow_path_underflow);

    let Ok(p1) = normalizer.normalize_path(&path) else {
        assert!(!input.allow_path_underflow);
        return;
    };
    assert!(p1.segments().iter().all(|s| !s.is_dot_segment()));
    assert_eq!(p1.is_absolute(), path.is_absolute());

    // `normalize_path` is idempotent.
    assert_eq!(normalizer.normalize_path(&p1).unwrap(), p1);
});

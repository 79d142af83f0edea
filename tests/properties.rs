use proptest::{collection::vec, prelude::*};
use uri_compose::{
    component::{Authority, Fragment, Host, Query, Scheme, UriComponent, Userinfo},
    normalize::{remove_dot_segments, Normalizer},
    path::{Path, PathSegment},
    pct_enc::{encode, table, ByteEncoding},
    resolve::{merge, Resolver},
    Hierarchy, RelativeRef, Uri,
};

const TABLES: &[table::Table] = &[
    table::UNRESERVED,
    table::SEGMENT,
    table::QUERY,
    table::USERINFO,
    table::REG_NAME,
    table::Table::EMPTY,
];

fn decode(s: &str) -> Vec<u8> {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            out.push(u8::from_str_radix(&s[i + 1..i + 3], 16).unwrap());
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    out
}

fn segment() -> impl Strategy<Value = PathSegment> {
    prop_oneof![
        Just(PathSegment::dot()),
        Just(PathSegment::dot_dot()),
        Just(PathSegment::empty()),
        "[a-z%:é. ]{1,4}".prop_map(PathSegment::new),
    ]
}

fn path() -> impl Strategy<Value = Path> {
    (vec(segment(), 0..6), any::<bool>()).prop_map(|(segments, absolute)| {
        if absolute {
            Path::absolute(segments)
        } else {
            Path::rootless(segments)
        }
    })
}

/// Checks that a component made of characters it allows unencoded
/// renders the same with every byte encoding.
fn assert_unchanged<C: UriComponent>(component: &C, value: &str) -> Result<(), TestCaseError> {
    prop_assert_eq!(component.as_string().unwrap(), value);
    for encoding in [ByteEncoding::Utf8, ByteEncoding::Latin1, ByteEncoding::Ascii] {
        prop_assert_eq!(component.encoded(encoding).unwrap().into_string(), value);
    }
    Ok(())
}

proptest! {
    #[test]
    fn encoded_output_is_ascii(s in any::<String>()) {
        for &table in TABLES {
            for encoding in [ByteEncoding::Utf8, ByteEncoding::Latin1, ByteEncoding::Ascii] {
                prop_assert!(encode(&s, table, encoding).to_string().is_ascii());
            }
        }
    }

    #[test]
    fn safe_text_is_unchanged(s in "[A-Za-z0-9._~-]*") {
        for &table in TABLES.iter().take(5) {
            prop_assert_eq!(encode(&s, table, ByteEncoding::Utf8).to_string(), s.clone());
        }
    }

    #[test]
    fn allowed_characters_pass_through_components(
        segment in "[A-Za-z0-9._~!$&'()*+,;=:@-]*",
        query in "[A-Za-z0-9._~!$&'()*+,;=:@/?-]*",
        userinfo in "[A-Za-z0-9._~!$&'()*+,;=:-]*",
    ) {
        assert_unchanged(&PathSegment::new(segment.as_str()), &segment)?;
        assert_unchanged(&Query::new(query.as_str()), &query)?;
        assert_unchanged(&Fragment::new(query.as_str()), &query)?;
        assert_unchanged(&Userinfo::new(userinfo.as_str()), &userinfo)?;
    }

    #[test]
    fn decoding_restores_utf8(s in any::<String>()) {
        for &table in TABLES {
            let encoded = encode(&s, table, ByteEncoding::Utf8).to_string();
            prop_assert_eq!(decode(&encoded), s.as_bytes());
        }
    }

    #[test]
    fn dot_segment_removal_is_idempotent(segments in vec(segment(), 0..10)) {
        let once = remove_dot_segments(&segments);
        prop_assert!(once.iter().all(|s| !s.is_dot_segment()));
        prop_assert!(once.len() <= segments.len());
        prop_assert_eq!(remove_dot_segments(&once), once);
    }

    #[test]
    fn path_normalization_is_idempotent(path in path(), keep_trailing_slash: bool) {
        let normalizer = Normalizer::new().keep_trailing_slash(keep_trailing_slash);
        let once = normalizer.normalize_path(&path).unwrap();
        prop_assert_eq!(once.is_absolute(), path.is_absolute());
        prop_assert_eq!(normalizer.normalize_path(&once).unwrap(), once);
    }

    #[test]
    fn merge_then_normalize_never_panics(
        base in path(),
        reference in vec(segment(), 0..6),
        has_authority: bool,
    ) {
        let authority = has_authority.then(|| Authority::new(Host::reg_name("h")));
        let merged = merge(&Hierarchy::new(authority, base), &Path::rootless(reference));
        let normalized = Normalizer::new().normalize_path(&merged).unwrap();
        prop_assert!(normalized.segments().iter().all(|s| !s.is_dot_segment()));
    }

    #[test]
    fn resolution_against_authority_is_representable(
        base in vec("[a-z]{1,3}", 0..4),
        reference in path(),
    ) {
        let base = Uri::new(
            Scheme::new("http"),
            Hierarchy::new(Some(Authority::new(Host::reg_name("h"))), Path::absolute(base)),
            None,
            None,
        );
        let reference = RelativeRef::new(Hierarchy::new(None, reference), None, None);
        let resolved = Resolver::with_base(base).resolve(&reference.into()).unwrap();
        prop_assert!(resolved.path().is_absolute() || resolved.path().is_empty());
        prop_assert!(resolved.encoded(ByteEncoding::Utf8).is_ok());
    }
}

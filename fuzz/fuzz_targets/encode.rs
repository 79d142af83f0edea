#![no_main]
use libfuzzer_sys::fuzz_target;
use uri_compose::pct_enc::{encode, table, ByteEncoding};

fuzz_target!(|data: &str| {
    for table in [table::UNRESERVED, table::SEGMENT, table::QUERY, table::USERINFO] {
        let encoded = encode(data, table, ByteEncoding::Utf8).to_estring();
        assert!(encoded.as_str().is_ascii());

        // Decoding restores the UTF-8 bytes of the input.
        let bytes = encoded.as_str().as_bytes();
        let mut decoded = Vec::with_capacity(bytes.len());
        let mut i = 0;
        while i < bytes.len() {
            if bytes[i] == b'%' {
                let hex = &encoded.as_str()[i + 1..i + 3];
                decoded.push(u8::from_str_radix(hex, 16).unwrap());
                i += 3;
            } else {
                assert!(table.contains_byte(bytes[i]));
                decoded.push(bytes[i]);
                i += 1;
            }
        }
        assert_eq!(decoded, data.as_bytes());
    }

    for encoding in [ByteEncoding::Latin1, ByteEncoding::Ascii] {
        let encoded = encode(data, table::SEGMENT, encoding).to_estring();
        assert!(encoded.as_str().is_ascii());
    }
});

//! Universal properties that must hold for any input, not just the examples
//! exercised by unit tests: canonicalization idempotence and cross-component
//! hash agreement.

use docpull_rs::cache::manager::compute_checksum;
use docpull_rs::ImUrl;
use proptest::prelude::*;

fn arbitrary_url_string() -> impl Strategy<Value = String> {
    (
        prop_oneof!["http", "https", "HTTP", "HTTPS"],
        "[a-zA-Z][a-zA-Z0-9-]{0,12}(\\.[a-z]{2,4}){0,2}",
        prop::collection::vec("[a-zA-Z0-9_-]{1,8}", 0..4),
        prop::option::of("[a-zA-Z0-9_-]{1,8}"),
    )
        .prop_map(|(scheme, host, segments, fragment)| {
            let path = if segments.is_empty() {
                String::new()
            } else {
                format!("/{}", segments.join("/"))
            };
            let frag = fragment.map(|f| format!("#{f}")).unwrap_or_default();
            format!("{scheme}://{host}{path}{frag}")
        })
}

proptest! {
    #[test]
    fn canonicalization_is_idempotent(raw in arbitrary_url_string()) {
        let Ok(url) = ImUrl::parse(&raw) else { return Ok(()); };
        let Ok(once) = url.canonical() else { return Ok(()); };
        let twice = once.canonical().unwrap();
        prop_assert_eq!(once.as_str(), twice.as_str());
    }

    #[test]
    fn hashing_utf8_text_matches_hashing_the_same_bytes(content in ".{0,200}") {
        let from_str_bytes = compute_checksum(content.as_bytes());
        let owned: Vec<u8> = content.clone().into_bytes();
        let from_owned_bytes = compute_checksum(&owned);
        prop_assert_eq!(from_str_bytes.clone(), from_owned_bytes);

        // Determinism: hashing twice yields the same digest.
        prop_assert_eq!(from_str_bytes, compute_checksum(content.as_bytes()));
    }
}

use super::headers::{has_header, header_value, vary_values};
use http::HeaderMap;

#[track_caller]
pub fn assert_header_eq(headers: &HeaderMap, name: &str, expected: &str) {
    assert_eq!(
        header_value(headers, name).as_deref(),
        Some(expected),
        "unexpected value for {name}"
    );
}

#[track_caller]
pub fn assert_header_absent(headers: &HeaderMap, name: &str) {
    assert!(!has_header(headers, name), "expected {name} to be absent");
}

#[track_caller]
pub fn assert_vary_eq<const N: usize>(headers: &HeaderMap, expected: [&str; N]) {
    assert_eq!(vary_values(headers), expected.to_vec());
}

#[track_caller]
pub fn assert_vary_contains(headers: &HeaderMap, name: &str) {
    let values = vary_values(headers);
    assert!(
        values.iter().any(|value| value == name),
        "expected Vary to contain {name}, got {values:?}"
    );
}

#[track_caller]
pub fn assert_vary_is_empty(headers: &HeaderMap) {
    assert!(
        vary_values(headers).is_empty(),
        "expected no Vary header, got {:?}",
        vary_values(headers)
    );
}

use http::HeaderMap;
use stack_cors::constants::header;

/// Every occurrence of `name` joined with `,`.
pub fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    let values = headers
        .get_all(name)
        .iter()
        .map(|value| value.to_str().expect("ascii header value").to_string())
        .collect::<Vec<_>>();

    if values.is_empty() {
        None
    } else {
        Some(values.join(","))
    }
}

pub fn has_header(headers: &HeaderMap, name: &str) -> bool {
    headers.contains_key(name)
}

pub fn vary_values(headers: &HeaderMap) -> Vec<String> {
    header_value(headers, header::VARY)
        .map(|value| value.split(',').map(str::to_string).collect())
        .unwrap_or_default()
}

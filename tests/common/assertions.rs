//! Custom assertion utilities
//!
//! Assertions for the JSON error body every failing endpoint returns.

use axum::http::StatusCode;
use axum_test::TestResponse;
use serde_json::Value;

/// Assert that a string contains a substring
#[macro_export]
macro_rules! assert_contains {
    ($haystack:expr, $needle:expr) => {
        assert!(
            $haystack.contains($needle),
            "Expected '{}' to contain '{}'",
            $haystack,
            $needle
        );
    };
}

/// Assert the status and the `error` message of a failure body
pub fn assert_error(response: &TestResponse, status: StatusCode, message: &str) {
    assert_eq!(response.status_code(), status, "body: {}", response.text());
    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["status"], status.as_u16());
    assert_eq!(body["error"], message);
}

/// Field names listed in a validation failure body, in order
pub fn error_fields(response: &TestResponse) -> Vec<String> {
    let body: Value = response.json();
    body["errors"]
        .as_array()
        .map(|errors| {
            errors
                .iter()
                .filter_map(|e| e["field"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

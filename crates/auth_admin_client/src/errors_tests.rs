use super::*;
use std::error::Error as StdError;

#[test]
fn test_api_error() {
    let error = Error::Api {
        status: 422,
        message: r#"{"msg":"Password should be at least 6 characters"}"#.to_string(),
    };

    assert_eq!(
        error.to_string(),
        r#"Admin API request failed with status 422: {"msg":"Password should be at least 6 characters"}"#
    );
    assert!(error.source().is_none());
}

#[test]
fn test_deserialization_error_keeps_source() {
    let json_error = serde_json::from_str::<serde_json::Value>("{ not json").unwrap_err();
    let error = Error::from(json_error);

    assert!(error
        .to_string()
        .starts_with("Failed to deserialize admin API response:"));
    assert!(error.source().is_some());
}

#[test]
fn test_invalid_base_url_error() {
    let error = Error::InvalidBaseUrl {
        url: "not a url".to_string(),
        reason: "relative URL without a base".to_string(),
    };

    assert_eq!(
        error.to_string(),
        "Invalid service URL 'not a url': relative URL without a base"
    );
}

#[test]
fn test_not_found_error_keeps_body() {
    let error = Error::NotFound(r#"{"msg":"User not found"}"#.to_string());

    assert_eq!(error.to_string(), r#"User not found: {"msg":"User not found"}"#);
    assert!(error.source().is_none());
}

#[test]
fn test_rate_limit_error_keeps_body() {
    let error = Error::RateLimitExceeded("too many requests".to_string());

    assert_eq!(error.to_string(), "Rate limit exceeded: too many requests");
}

#[test]
fn test_unauthorized_error() {
    let error = Error::Unauthorized("invalid JWT".to_string());

    assert_eq!(
        error.to_string(),
        "Service role key was rejected: invalid JWT"
    );
}

#[test]
fn test_error_debug_format() {
    let error = Error::Api {
        status: 500,
        message: "boom".to_string(),
    };
    let debug_output = format!("{:?}", error);

    assert!(debug_output.contains("Api"));
    assert!(debug_output.contains("500"));
}

#[test]
fn test_error_is_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Error>();
}

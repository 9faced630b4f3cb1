//! Responses as the storefront sees them.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::FetchError;

/// A buffered response: status, headers and the whole body.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

/// Error payload of the storefront API, e.g. `{"error": "Not logged in"}`.
#[derive(Deserialize)]
struct ApiError {
    error: String,
}

impl Response {
    pub fn new(status: u16, headers: HashMap<String, String>, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// A response declaring `application/json`.
    pub fn json_body(status: u16, body: impl Into<Vec<u8>>) -> Self {
        let headers = HashMap::from([(
            "Content-Type".to_string(),
            "application/json".to_string(),
        )]);
        Self::new(status, headers, body.into())
    }

    /// `true` for 2xx, the only statuses treated as success.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn text(&self) -> Result<String, FetchError> {
        std::str::from_utf8(&self.body)
            .map(str::to_owned)
            .map_err(|e| FetchError::ParseError(format!("body is not UTF-8: {}", e)))
    }

    /// Decode the body. A body of the wrong shape is a [`FetchError::ParseError`].
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, FetchError> {
        serde_json::from_slice(&self.body).map_err(|e| FetchError::ParseError(e.to_string()))
    }

    /// Header lookup, ignoring ASCII case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Turn a non-2xx answer into [`FetchError::HttpError`].
    ///
    /// The message is the API's `error` field when the body carries one,
    /// otherwise the body text.
    pub fn error_for_status(self) -> Result<Self, FetchError> {
        if self.is_success() {
            return Ok(self);
        }

        let message = match self.json::<ApiError>() {
            Ok(api) => api.error,
            Err(_) => self.text().unwrap_or_default(),
        };
        Err(FetchError::HttpError {
            status: self.status,
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(status: u16, body: &[u8]) -> Response {
        Response::new(status, HashMap::new(), body.to_vec())
    }

    #[test]
    fn test_only_2xx_is_success() {
        assert!(plain(200, b"").is_success());
        assert!(plain(204, b"").is_success());
        assert!(!plain(199, b"").is_success());
        assert!(!plain(304, b"").is_success());
        assert!(!plain(401, b"").is_success());
    }

    #[test]
    fn test_text_rejects_invalid_utf8() {
        assert!(plain(200, &[0xff, 0xfe]).text().is_err());
        assert_eq!(plain(200, b"ok").text().unwrap(), "ok");
    }

    #[test]
    fn test_json_decodes_user_list() {
        #[derive(Deserialize, Debug, PartialEq)]
        struct User {
            name: String,
        }

        let resp = Response::json_body(200, r#"[{"name": "Ada"}]"#);
        let users: Vec<User> = resp.json().unwrap();
        assert_eq!(users, vec![User { name: "Ada".to_string() }]);
    }

    #[test]
    fn test_json_wrong_shape_is_parse_error() {
        let result: Result<Vec<String>, _> = plain(200, b"<html>").json();
        assert!(matches!(result, Err(FetchError::ParseError(_))));
    }

    #[test]
    fn test_header_ignores_case() {
        let resp = Response::json_body(200, Vec::new());
        assert_eq!(resp.header("content-type"), Some("application/json"));
        assert_eq!(resp.header("X-Missing"), None);
    }

    #[test]
    fn test_error_for_status_uses_api_error_field() {
        let err = plain(401, br#"{"error": "Not logged in"}"#)
            .error_for_status()
            .unwrap_err();

        assert_eq!(err.status(), Some(401));
        assert_eq!(err.to_string(), "HTTP 401: Not logged in");
    }

    #[test]
    fn test_error_for_status_falls_back_to_body_text() {
        let err = plain(500, b"Internal Server Error").error_for_status().unwrap_err();
        assert!(matches!(
            err,
            FetchError::HttpError { status: 500, ref message } if message == "Internal Server Error"
        ));
    }

    #[test]
    fn test_error_for_status_passes_success_through() {
        assert!(plain(200, b"[]").error_for_status().is_ok());
    }
}

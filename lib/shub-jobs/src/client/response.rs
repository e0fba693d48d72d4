use headers::{ContentType, HeaderMapExt};
use http::{HeaderMap, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

const BODY_MAX_LENGTH: usize = 1024;

/// The body of a received response.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    /// No content.
    Empty,
    /// A body that parsed as JSON.
    Json(Value),
    /// Any other body, decoded as (lossy) UTF-8 text.
    Text(String),
}

impl ResponseBody {
    fn parse(bytes: &[u8]) -> Self {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Self::Empty;
        }
        match serde_json::from_slice(bytes) {
            Ok(json) => Self::Json(json),
            Err(_) => Self::Text(String::from_utf8_lossy(bytes).into_owned()),
        }
    }
}

/// Errors raised when decoding a response body into a typed model.
#[derive(Debug, derive_more::Error, derive_more::Display)]
pub enum DecodeError {
    /// The JSON body does not match the expected structure.
    #[display("Failed to deserialize JSON at '{path}': {error}\n{body}")]
    JsonError {
        /// Path to the offending element.
        path: String,
        /// The underlying JSON error.
        error: serde_json::Error,
        /// The body that failed to decode, truncated.
        body: String,
    },

    /// The body is not JSON at all.
    #[display("Response body is not JSON:\n{body:?}")]
    NotJson {
        /// The received body.
        body: ResponseBody,
    },
}

/// A response received from the jobs API, whatever its status.
///
/// Both [`Outcome::Success`](super::Outcome::Success) and
/// [`Outcome::Rejection`](super::Outcome::Rejection) carry an `ApiResponse`, so
/// callers can always inspect the status, headers and body. The API reports
/// its own verdict in the `status` and `message` body fields, available through
/// [`api_status`](Self::api_status) and [`message`](Self::message).
#[derive(Debug, Clone)]
pub struct ApiResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: ResponseBody,
}

impl ApiResponse {
    pub(super) fn new(status: StatusCode, headers: HeaderMap, bytes: &[u8]) -> Self {
        Self {
            status,
            headers,
            body: ResponseBody::parse(bytes),
        }
    }

    /// The HTTP status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// The response headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The `Content-Type` header, if present and well-formed.
    pub fn content_type(&self) -> Option<ContentType> {
        self.headers.typed_get()
    }

    /// The parsed body.
    pub fn body(&self) -> &ResponseBody {
        &self.body
    }

    /// The body as JSON, if it is JSON.
    pub fn json(&self) -> Option<&Value> {
        match &self.body {
            ResponseBody::Json(json) => Some(json),
            ResponseBody::Empty | ResponseBody::Text(_) => None,
        }
    }

    /// A top-level field of a JSON object body.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.json().and_then(|json| json.get(name))
    }

    /// The API-level `status` field (`"ok"`, `"error"`, `"badrequest"`...).
    pub fn api_status(&self) -> Option<&str> {
        self.field("status").and_then(Value::as_str)
    }

    /// The API-level `message` field, usually set on rejections.
    pub fn message(&self) -> Option<&str> {
        self.field("message").and_then(Value::as_str)
    }

    /// Decodes the JSON body into a typed model.
    ///
    /// # Errors
    ///
    /// Returns `DecodeError::NotJson` for non-JSON bodies and
    /// `DecodeError::JsonError` (with the path of the failing element) when
    /// the structure does not match.
    pub fn decode<T>(&self) -> Result<T, DecodeError>
    where
        T: DeserializeOwned,
    {
        let Some(json) = self.json() else {
            return Err(DecodeError::NotJson {
                body: self.body.clone(),
            });
        };

        serde_path_to_error::deserialize(json).map_err(|err| DecodeError::JsonError {
            path: err.path().to_string(),
            error: err.into_inner(),
            body: truncate(json.to_string()),
        })
    }
}

fn truncate(text: String) -> String {
    if text.chars().count() > BODY_MAX_LENGTH {
        let head: String = text.chars().take(BODY_MAX_LENGTH).collect();
        format!("{head}... (truncated)")
    } else {
        text
    }
}

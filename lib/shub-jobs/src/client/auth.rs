use std::fmt;

use base64::Engine;
use http::HeaderValue;
use reqwest::header::{AUTHORIZATION, HeaderName};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::ValidationError;

/// Errors raised while turning the API key into request credentials.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Error, derive_more::Display)]
pub enum AuthenticationError {
    /// The encoded credentials are not a valid header value.
    #[display("API key cannot be used as credentials: {message}")]
    InvalidApiKey {
        /// Description of the invalid characters or format issue.
        message: String,
    },
}

/// A validated, non-empty API key.
///
/// The key is cleared from memory when dropped and never printed in full:
/// `Debug` redacts it and `Display` masks everything but its edges.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct ApiKey(String);

impl ApiKey {
    /// Validates and wraps an API key.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyApiKey`] if the key is empty.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::EmptyApiKey);
        }
        Ok(Self(value))
    }

    /// Returns the raw key.
    ///
    /// # Security Note
    /// The returned reference should not be stored for extended periods
    /// to minimize exposure time of sensitive data.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Builds the `Authorization` header carrying this key.
    ///
    /// The key is the Basic auth username and the password is empty, so the
    /// header value is `Basic base64("<key>:")`. The value is flagged as
    /// sensitive so it is hidden from `Debug` output of requests.
    ///
    /// # Errors
    ///
    /// Returns `AuthenticationError` if the encoded value is not a valid header.
    pub fn to_header(&self) -> Result<(HeaderName, HeaderValue), AuthenticationError> {
        let credentials =
            base64::engine::general_purpose::STANDARD.encode(format!("{}:", self.0));
        let mut value = HeaderValue::from_str(&format!("Basic {credentials}")).map_err(|e| {
            AuthenticationError::InvalidApiKey {
                message: e.to_string(),
            }
        })?;
        value.set_sensitive(true);

        Ok((AUTHORIZATION, value))
    }

    fn mask_sensitive(value: &str) -> String {
        let count = value.chars().count();
        if count <= 8 {
            "***".to_string()
        } else {
            let head: String = value.chars().take(4).collect();
            let tail: String = value.chars().skip(count - 4).collect();
            format!("{head}...{tail}")
        }
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ApiKey").field(&"[REDACTED]").finish()
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Self::mask_sensitive(&self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_key_is_rejected() {
        let result = ApiKey::new("");

        assert_eq!(result, Err(ValidationError::EmptyApiKey));
    }

    #[test]
    fn test_basic_header_uses_key_as_username_and_empty_password() {
        let key = ApiKey::new("XXX").expect("valid key");

        let (name, value) = key.to_header().expect("valid header");

        assert_eq!(name, AUTHORIZATION);
        // base64("XXX:")
        assert_eq!(value.to_str().expect("ascii header"), "Basic WFhYOg==");
        assert!(value.is_sensitive());
    }

    #[test]
    fn test_key_with_colon_is_sent_as_is() {
        let key = ApiKey::new("abc:def").expect("non-empty key");

        let (_, value) = key.to_header().expect("valid header");

        // base64("abc:def:")
        assert_eq!(value.to_str().expect("ascii header"), "Basic YWJjOmRlZjo=");
    }

    #[test]
    fn test_debug_and_display_do_not_leak() {
        let short = ApiKey::new("XXX").expect("valid key");
        let long = ApiKey::new("0123456789abcdef").expect("valid key");

        insta::assert_snapshot!(format!("{short:?}"), @r#"ApiKey("[REDACTED]")"#);
        insta::assert_snapshot!(short.to_string(), @"***");
        insta::assert_snapshot!(long.to_string(), @"0123...cdef");
    }
}

use super::AuthenticationError;
use crate::ValidationError;

/// Errors that can occur while building a [`JobsClient`](super::JobsClient).
///
/// Operations never return this type: once a client exists, calls only fail
/// locally with a [`ValidationError`] or report their outcome through an
/// [`Outcome`](super::Outcome).
#[derive(Debug, derive_more::Error, derive_more::Display, derive_more::From)]
pub enum ClientError {
    /// The API key is missing or empty.
    Validation(ValidationError),

    /// The API key cannot be encoded as Basic auth credentials.
    Authentication(AuthenticationError),

    /// HTTP protocol error from the http crate.
    ///
    /// Occurs when the scheme, host and port do not form a valid URI.
    HttpError(http::Error),

    /// URL parsing error when resolving the API base URL.
    UrlError(url::ParseError),

    /// Invalid base path configuration.
    #[display("Invalid base path: {error}")]
    #[from(skip)]
    InvalidBasePath {
        /// Description of why the base path is invalid.
        error: String,
    },

    /// The environment variable holding the API key is not set.
    #[display("Environment variable {var} is not set")]
    #[from(skip)]
    MissingEnvironment {
        /// Name of the variable.
        var: &'static str,
    },

    /// The environment variable holding the API key is set but not valid Unicode.
    #[display("Environment variable {var} is not valid unicode")]
    #[from(skip)]
    InvalidEnvironment {
        /// Name of the variable.
        var: &'static str,
    },
}

/// A failure of the transport layer: the exchange could not complete.
///
/// Wraps the underlying [`reqwest::Error`]: connection refused, DNS failure,
/// timeout, or a response body that could not be read.
#[derive(Debug, derive_more::Error, derive_more::Display, derive_more::From)]
#[display("transport failure: {_0}")]
pub struct TransportError(reqwest::Error);

impl TransportError {
    /// Returns `true` if the exchange timed out.
    pub fn is_timeout(&self) -> bool {
        self.0.is_timeout()
    }

    /// Returns `true` if no connection could be established.
    pub fn is_connect(&self) -> bool {
        self.0.is_connect()
    }

    /// The URL of the failed request, if known.
    pub fn url(&self) -> Option<&url::Url> {
        self.0.url()
    }

    /// Gives back the underlying transport error.
    pub fn into_inner(self) -> reqwest::Error {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errors_are_send_and_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<ClientError>();
        assert_sync::<ClientError>();
        assert_send::<TransportError>();
        assert_sync::<TransportError>();
    }

    #[test]
    fn test_client_error_display() {
        let error = ClientError::from(ValidationError::EmptyApiKey);
        insta::assert_snapshot!(error, @"api_key must be a non-empty string");

        let error = ClientError::MissingEnvironment { var: "SHUB_APIKEY" };
        insta::assert_snapshot!(error, @"Environment variable SHUB_APIKEY is not set");

        let error = ClientError::InvalidEnvironment { var: "SHUB_APIKEY" };
        insta::assert_snapshot!(error, @"Environment variable SHUB_APIKEY is not valid unicode");
    }
}

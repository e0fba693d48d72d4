use std::fmt::Debug;

use http::Uri;
use http::uri::{PathAndQuery, Scheme};
use url::Url;

use super::{ApiKey, ClientError, JobsClient};
use crate::ValidationError;

/// Builder for creating `JobsClient` instances.
///
/// # Default Configuration
///
/// - **Scheme**: HTTPS
/// - **Host**: `dash.scrapinghub.com`
/// - **Port**: the scheme default
/// - **Base path**: None (operation paths start at the root)
/// - **Transport**: a default `reqwest::Client`
///
/// The API key has no default and must be provided.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
///
/// use http::uri::Scheme;
/// use shub_jobs::JobsClient;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let transport = reqwest::Client::builder()
///     .timeout(Duration::from_secs(10))
///     .build()?;
///
/// let client = JobsClient::builder()
///     .with_api_key("XXX")
///     .with_scheme(Scheme::HTTP)
///     .with_host("localhost")
///     .with_port(8080)
///     .with_client(transport)
///     .build()?;
///
/// assert_eq!(client.base_url().as_str(), "http://localhost:8080/");
/// # Ok(())
/// # }
/// ```
#[derive(Clone, derive_more::Debug)]
pub struct JobsClientBuilder {
    client: reqwest::Client,
    scheme: Scheme,
    host: String,
    port: Option<u16>,
    base_path: Option<PathAndQuery>,
    #[debug(skip)]
    api_key: Option<String>,
}

impl JobsClientBuilder {
    /// Builds the client.
    ///
    /// # Errors
    ///
    /// This method can fail if:
    /// - no API key was set, or it is empty
    /// - the API key cannot be encoded as Basic auth credentials
    /// - the scheme, host, port and base path do not form a valid URL
    pub fn build(self) -> Result<JobsClient, ClientError> {
        let Self {
            client,
            scheme,
            host,
            port,
            base_path,
            api_key,
        } = self;

        let api_key = ApiKey::new(api_key.ok_or(ValidationError::MissingApiKey)?)?;
        let (_, authorization) = api_key.to_header()?;

        let authority = match port {
            Some(port) => format!("{host}:{port}"),
            None => host,
        };
        let builder = Uri::builder().scheme(scheme).authority(authority);
        let builder = if let Some(path) = &base_path {
            builder.path_and_query(path.path())
        } else {
            builder.path_and_query("/")
        };
        let base_uri = builder.build()?;
        let base_url = base_uri.to_string().parse::<Url>()?;

        Ok(JobsClient {
            client,
            base_url,
            api_key,
            authorization,
        })
    }

    /// Sets the API key. Required.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Sets the HTTP scheme. Defaults to `Scheme::HTTPS`.
    pub fn with_scheme(mut self, scheme: Scheme) -> Self {
        self.scheme = scheme;
        self
    }

    /// Sets the API host. Defaults to `dash.scrapinghub.com`.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Sets an explicit port instead of the scheme default.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Sets a path prefix for every operation path.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InvalidBasePath` if the path contains invalid characters
    /// (such as spaces) or cannot be parsed as a valid URI path.
    pub fn with_base_path<P>(mut self, base_path: P) -> Result<Self, ClientError>
    where
        P: TryInto<PathAndQuery>,
        P::Error: Debug + 'static,
    {
        let base_path = base_path
            .try_into()
            .map_err(|err| ClientError::InvalidBasePath {
                error: format!("{err:?}"),
            })?;
        self.base_path = Some(base_path);
        Ok(self)
    }

    /// Uses a preconfigured transport, e.g. with a timeout or a proxy.
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }
}

impl Default for JobsClientBuilder {
    fn default() -> Self {
        Self {
            client: reqwest::Client::new(),
            scheme: Scheme::HTTPS,
            host: JobsClient::DEFAULT_HOST.to_string(),
            port: None,
            base_path: None,
            api_key: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> JobsClientBuilder {
        JobsClientBuilder::default().with_api_key("XXX")
    }

    #[test]
    fn test_default_builder_targets_https_default_host() {
        let client = builder().build().expect("should build client");

        insta::assert_snapshot!(client.base_url, @"https://dash.scrapinghub.com/");
    }

    #[test]
    fn test_builder_with_local_endpoint() {
        let client = builder()
            .with_scheme(Scheme::HTTP)
            .with_host("127.0.0.1")
            .with_port(8080)
            .build()
            .expect("should build client");

        insta::assert_snapshot!(client.base_url, @"http://127.0.0.1:8080/");
    }

    #[test]
    fn test_builder_with_valid_base_path() {
        let client = builder()
            .with_base_path("/proxy/v1")
            .expect("valid base path")
            .build()
            .expect("should build client");

        insta::assert_snapshot!(client.endpoint(crate::Operation::Stop), @"https://dash.scrapinghub.com/proxy/v1/api/jobs/stop.json");
    }

    #[test]
    fn test_builder_with_invalid_base_path() {
        let result = builder().with_base_path("/with space");

        assert!(matches!(result, Err(ClientError::InvalidBasePath { .. })));
    }

    #[test]
    fn test_builder_without_api_key() {
        let error = JobsClientBuilder::default()
            .build()
            .expect_err("api key is required");

        insta::assert_snapshot!(error, @"api_key is required");
    }

    #[test]
    fn test_builder_with_invalid_host() {
        let result = builder().with_host("not a host").build();

        assert!(matches!(result, Err(ClientError::HttpError(_))));
    }
}

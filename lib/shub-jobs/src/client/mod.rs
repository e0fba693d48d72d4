use std::env::VarError;

use http::HeaderValue;
use url::Url;

use crate::schema::{Arguments, Operation, ValidationError};

mod builder;
pub use self::builder::JobsClientBuilder;

mod auth;
pub use self::auth::{ApiKey, AuthenticationError};

mod call;

mod error;
pub use self::error::{ClientError, TransportError};

mod outcome;
pub use self::outcome::{Failure, Outcome};

mod response;
pub use self::response::{ApiResponse, DecodeError, ResponseBody};

/// Client for the jobs API.
///
/// `JobsClient` holds a validated [`ApiKey`] and performs the five job
/// operations. Every operation follows the same steps:
///
/// 1. the [`Arguments`] are checked against the operation schema; any violation
///    is returned as a [`ValidationError`] and nothing is sent,
/// 2. exactly one HTTP request is performed, authenticated with the key as the
///    Basic auth username,
/// 3. the exchange is classified into an [`Outcome`].
///
/// # Example
///
/// ```rust,no_run
/// use shub_jobs::{JobsClient, ListJobs, JobState};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = JobsClient::new("XXX")?;
///
/// let outcome = client
///     .list(ListJobs::new(1).with_state(JobState::Finished))
///     .await?;
///
/// if let Some(response) = outcome.success() {
///     println!("total: {:?}", response.field("total"));
/// }
/// # Ok(())
/// # }
/// ```
///
/// # Thread Safety
///
/// The client holds no per-call state: it can be cloned cheaply and shared
/// between tasks.
#[derive(Debug, Clone)]
pub struct JobsClient {
    client: reqwest::Client,
    base_url: Url,
    api_key: ApiKey,
    authorization: HeaderValue,
}

// Create
impl JobsClient {
    /// The default API host.
    pub const DEFAULT_HOST: &'static str = "dash.scrapinghub.com";

    /// The environment variable read by [`from_env`](Self::from_env).
    pub const API_KEY_VAR: &'static str = "SHUB_APIKEY";

    /// Starts configuring a client.
    pub fn builder() -> JobsClientBuilder {
        JobsClientBuilder::default()
    }

    /// Creates a client for the default endpoint.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Validation` if the key is empty and
    /// `ClientError::Authentication` if it cannot be used as Basic auth
    /// credentials.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ClientError> {
        Self::builder().with_api_key(api_key).build()
    }

    /// Creates a client for the default endpoint, reading the key from the
    /// `SHUB_APIKEY` environment variable.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::MissingEnvironment` if the variable is not set,
    /// `ClientError::InvalidEnvironment` if it is not valid Unicode, or any
    /// error of [`new`](Self::new).
    pub fn from_env() -> Result<Self, ClientError> {
        let api_key = env_value(Self::API_KEY_VAR, std::env::var(Self::API_KEY_VAR))?;
        Self::new(api_key)
    }

    /// The API key used by this client.
    pub fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    /// The base URL every operation path is resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

fn env_value(var: &'static str, value: Result<String, VarError>) -> Result<String, ClientError> {
    value.map_err(|err| match err {
        VarError::NotPresent => ClientError::MissingEnvironment { var },
        VarError::NotUnicode(_) => ClientError::InvalidEnvironment { var },
    })
}

// Operations
impl JobsClient {
    /// Performs an operation with the given arguments.
    ///
    /// The dedicated methods ([`list`](Self::list), [`schedule`](Self::schedule)...)
    /// are shortcuts for this one.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` if the arguments do not satisfy the
    /// operation schema. In that case no request is sent.
    pub async fn call(
        &self,
        operation: Operation,
        args: impl Into<Arguments>,
    ) -> Result<Outcome, ValidationError> {
        self.exchange(operation, args.into()).await
    }

    /// Retrieves information about jobs.
    ///
    /// Requires `project`; accepts `job`, `spider`, `state`, `has_tag`,
    /// `lacks_tag` and `count`. Arguments are sent as query parameters.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` if the arguments are invalid.
    pub async fn list(&self, args: impl Into<Arguments>) -> Result<Outcome, ValidationError> {
        self.call(Operation::List, args).await
    }

    /// Schedules a spider run.
    ///
    /// Requires `project` and `spider`; accepts `add_tag`, `priority` (0 to 4)
    /// and `extra`, a map of spider arguments sent as top-level fields.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` if the arguments are invalid.
    pub async fn schedule(&self, args: impl Into<Arguments>) -> Result<Outcome, ValidationError> {
        self.call(Operation::Schedule, args).await
    }

    /// Updates the jobs matching a query.
    ///
    /// Requires `project`; filters are `job`, `spider`, `state`, `has_tag` and
    /// `lacks_tag`, modifiers are `add_tag` and `remove_tag`. The service
    /// rejects an update without filters or without modifiers.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` if the arguments are invalid.
    pub async fn update(&self, args: impl Into<Arguments>) -> Result<Outcome, ValidationError> {
        self.call(Operation::Update, args).await
    }

    /// Deletes one or more jobs.
    ///
    /// Requires `project` and `job`.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` if the arguments are invalid.
    pub async fn delete(&self, args: impl Into<Arguments>) -> Result<Outcome, ValidationError> {
        self.call(Operation::Delete, args).await
    }

    /// Stops a running job.
    ///
    /// Requires `project` and `job`, a single job id.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` if the arguments are invalid.
    pub async fn stop(&self, args: impl Into<Arguments>) -> Result<Outcome, ValidationError> {
        self.call(Operation::Stop, args).await
    }
}

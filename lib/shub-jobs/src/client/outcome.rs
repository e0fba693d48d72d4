use super::{ApiResponse, TransportError};

/// The outcome of one call to the jobs API.
///
/// Exactly one variant is produced per call:
///
/// - [`TransportFailure`](Self::TransportFailure): the exchange never completed,
/// - [`Rejection`](Self::Rejection): the service answered with a non-200 status,
/// - [`Success`](Self::Success): the service answered with `200 OK`.
///
/// Network problems never surface as `Err`: they are reported here. The
/// combinators ([`map`](Self::map), [`and_then`](Self::and_then)) only touch
/// the success track, so a chain of transformations keeps the first failure.
///
/// # Example
///
/// ```rust,no_run
/// use shub_jobs::{Arguments, JobsClient, Outcome};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = JobsClient::new("XXX")?;
/// let outcome = client.list(Arguments::new().arg("project", 1)).await?;
///
/// match outcome.map(|response| response.field("total").cloned()) {
///     Outcome::Success(total) => println!("total: {total:?}"),
///     Outcome::Rejection(response) => println!("rejected: {:?}", response.message()),
///     Outcome::TransportFailure(error) => println!("unreachable: {error}"),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
#[must_use = "an Outcome may be a rejection or a transport failure"]
pub enum Outcome<T = ApiResponse> {
    /// The exchange could not complete.
    TransportFailure(TransportError),
    /// The exchange completed with a non-success status.
    Rejection(ApiResponse),
    /// The exchange completed with `200 OK`.
    Success(T),
}

/// The failure side of an [`Outcome`], see [`Outcome::into_result`].
#[derive(Debug, derive_more::Error, derive_more::Display, derive_more::From)]
pub enum Failure {
    /// The exchange could not complete.
    Transport(TransportError),

    /// The service rejected the call.
    #[display(
        "rejected with status {}: {}",
        _0.status(),
        _0.message().unwrap_or("<no message>")
    )]
    Rejected(#[error(not(source))] ApiResponse),
}

impl<T> Outcome<T> {
    /// Returns `true` for [`Outcome::Success`].
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Returns `true` for [`Outcome::Rejection`].
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejection(_))
    }

    /// Returns `true` for [`Outcome::TransportFailure`].
    pub fn is_transport_failure(&self) -> bool {
        matches!(self, Self::TransportFailure(_))
    }

    /// The success payload, if any.
    pub fn success(self) -> Option<T> {
        match self {
            Self::Success(value) => Some(value),
            Self::Rejection(_) | Self::TransportFailure(_) => None,
        }
    }

    /// The rejected response, if any.
    pub fn rejection(self) -> Option<ApiResponse> {
        match self {
            Self::Rejection(response) => Some(response),
            Self::Success(_) | Self::TransportFailure(_) => None,
        }
    }

    /// The transport error, if any.
    pub fn transport_failure(self) -> Option<TransportError> {
        match self {
            Self::TransportFailure(error) => Some(error),
            Self::Success(_) | Self::Rejection(_) => None,
        }
    }

    /// Borrows the success payload, if any.
    pub fn as_success(&self) -> Option<&T> {
        match self {
            Self::Success(value) => Some(value),
            Self::Rejection(_) | Self::TransportFailure(_) => None,
        }
    }

    /// Borrows the rejected response, if any.
    pub fn as_rejection(&self) -> Option<&ApiResponse> {
        match self {
            Self::Rejection(response) => Some(response),
            Self::Success(_) | Self::TransportFailure(_) => None,
        }
    }

    /// Transforms the success payload, leaving failures untouched.
    pub fn map<U, F>(self, f: F) -> Outcome<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Success(value) => Outcome::Success(f(value)),
            Self::Rejection(response) => Outcome::Rejection(response),
            Self::TransportFailure(error) => Outcome::TransportFailure(error),
        }
    }

    /// Chains a computation that may itself fail, on the success track only.
    pub fn and_then<U, F>(self, f: F) -> Outcome<U>
    where
        F: FnOnce(T) -> Outcome<U>,
    {
        match self {
            Self::Success(value) => f(value),
            Self::Rejection(response) => Outcome::Rejection(response),
            Self::TransportFailure(error) => Outcome::TransportFailure(error),
        }
    }

    /// Converts into a standard `Result`, merging both failure tracks.
    ///
    /// # Errors
    ///
    /// Returns [`Failure::Transport`] or [`Failure::Rejected`] for the
    /// corresponding variants.
    pub fn into_result(self) -> Result<T, Failure> {
        match self {
            Self::Success(value) => Ok(value),
            Self::Rejection(response) => Err(Failure::Rejected(response)),
            Self::TransportFailure(error) => Err(Failure::Transport(error)),
        }
    }
}

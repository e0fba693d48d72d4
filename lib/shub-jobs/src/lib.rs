//! # shub-jobs
//!
//! Async client for the Scrapinghub jobs API: list, schedule, update, delete
//! and stop the jobs of a project.
//!
//! Every operation:
//! - validates its arguments against a static schema before any network
//!   activity, returning a [`ValidationError`] on the first violation,
//! - performs exactly one HTTP exchange,
//! - reports what happened as an [`Outcome`] with three disjoint variants:
//!   [`TransportFailure`](Outcome::TransportFailure),
//!   [`Rejection`](Outcome::Rejection) and [`Success`](Outcome::Success).
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use shub_jobs::{JobList, JobsClient, ListJobs, Outcome};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = JobsClient::from_env()?;
//!
//! match client.list(ListJobs::new(1).with_has_tag("consumed")).await? {
//!     Outcome::Success(response) => {
//!         let list: JobList = response.decode()?;
//!         println!("{} jobs", list.total);
//!     }
//!     Outcome::Rejection(response) => {
//!         eprintln!("rejected ({}): {:?}", response.status(), response.message());
//!     }
//!     Outcome::TransportFailure(error) => eprintln!("{error}"),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Untyped arguments
//!
//! Operations accept anything convertible into [`Arguments`], an ordered bag
//! of JSON values:
//!
//! ```rust,no_run
//! use serde_json::json;
//! use shub_jobs::{Arguments, JobsClient};
//!
//! # async fn example(client: &JobsClient) -> Result<(), Box<dyn std::error::Error>> {
//! let args = Arguments::new()
//!     .arg("project", 1)
//!     .arg("spider", "foo")
//!     .arg("extra", json!({"DOWNLOAD_DELAY": "0.5"}));
//!
//! let jobid = client
//!     .schedule(args)
//!     .await?
//!     .into_result()?
//!     .field("jobid")
//!     .cloned();
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! - [`ValidationError`]: invalid arguments or API key, nothing was sent
//! - [`ClientError`]: the client could not be built
//! - [`Failure`]: both failure tracks of an [`Outcome`], via [`Outcome::into_result`]
//! - [`DecodeError`]: a response body does not match a typed model

mod client;
mod model;
mod request;
mod schema;

pub use self::client::{
    ApiKey, ApiResponse, AuthenticationError, ClientError, DecodeError, Failure, JobsClient,
    JobsClientBuilder, Outcome, ResponseBody, TransportError,
};
pub use self::model::{ApiStatus, Job, JobList, JobsUpdated, ScheduledJob};
pub use self::request::{
    DeleteJobs, JobState, ListJobs, OneOrMany, ScheduleJob, StopJob, UpdateJobs,
};
pub use self::schema::{
    Arguments, Field, Operation, OperationSchema, Presence, Shape, ValidationError,
};

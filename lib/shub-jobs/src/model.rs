//! Typed views of the JSON bodies returned by the jobs API.
//!
//! These are optional: a [`Success`](crate::Outcome::Success) carries the raw
//! [`ApiResponse`](crate::ApiResponse), which can be decoded into one of these
//! types with [`ApiResponse::decode`](crate::ApiResponse::decode).

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::JobState;

/// Body of a successful `list` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobList {
    /// API-level status, `"ok"` on success.
    pub status: String,
    /// Number of jobs in this page.
    #[serde(default)]
    pub count: Option<u64>,
    /// Number of jobs matching the query.
    pub total: u64,
    /// The matching jobs.
    #[serde(default)]
    pub jobs: Vec<Job>,
}

/// A job record.
///
/// Only the commonly used attributes are typed; the rest is kept in
/// [`other`](Self::other).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    /// Composite id, `project/spider/run`.
    pub id: String,
    /// Name of the spider that produced the job.
    pub spider: String,
    /// Current state.
    #[serde(default)]
    pub state: Option<JobState>,
    /// Tags, possibly empty.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Why a finished job stopped (`finished`, `cancelled`...).
    #[serde(default)]
    pub close_reason: Option<String>,
    /// Priority, from 0 to 4.
    #[serde(default)]
    pub priority: Option<u8>,
    /// Number of scraped items.
    #[serde(default)]
    pub items_scraped: Option<u64>,
    /// Number of logged errors.
    #[serde(default)]
    pub errors_count: Option<u64>,
    /// Start time, as reported by the service.
    #[serde(default)]
    pub started_time: Option<String>,
    /// Last update time, as reported by the service.
    #[serde(default)]
    pub updated_time: Option<String>,
    /// Arguments the job was scheduled with.
    #[serde(default)]
    pub spider_args: IndexMap<String, Value>,
    /// Any other attribute.
    #[serde(flatten)]
    pub other: IndexMap<String, Value>,
}

impl Job {
    /// Whether the job carries this tag.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|it| it == tag)
    }
}

/// Body of a successful `schedule` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledJob {
    /// API-level status.
    pub status: String,
    /// Id of the new job.
    pub jobid: String,
}

/// Body of a successful `update`, `delete` or `stop` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobsUpdated {
    /// API-level status.
    pub status: String,
    /// Number of affected jobs, when reported.
    #[serde(default)]
    pub count: Option<u64>,
}

/// The `status` and `message` pair found in every body, notably rejections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiStatus {
    /// `ok`, `error` or `badrequest`.
    pub status: String,
    /// Human-readable detail.
    #[serde(default)]
    pub message: Option<String>,
}

//! Typed builders for the operation arguments.
//!
//! Each request type converts into [`Arguments`], so it can be passed to the
//! matching [`JobsClient`](crate::JobsClient) method. The conversion does not
//! bypass validation: a [`ScheduleJob`] with a priority of 7 is still rejected
//! before anything is sent.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Arguments;

/// The state of a job, as used by the `state` filter.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum JobState {
    /// Waiting to be run.
    #[display("pending")]
    Pending,
    /// Currently running.
    #[display("running")]
    Running,
    /// Done, whatever the close reason.
    #[display("finished")]
    Finished,
}

impl JobState {
    /// The wire value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Running => "running",
            Self::Finished => "finished",
        }
    }
}

impl From<JobState> for Value {
    fn from(state: JobState) -> Self {
        Value::String(state.as_str().to_string())
    }
}

/// A single string or a list of strings (job ids, tags).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OneOrMany {
    /// A single value.
    One(String),
    /// Several values, sent as repeated fields in this order.
    Many(Vec<String>),
}

impl From<&str> for OneOrMany {
    fn from(value: &str) -> Self {
        Self::One(value.to_string())
    }
}

impl From<String> for OneOrMany {
    fn from(value: String) -> Self {
        Self::One(value)
    }
}

impl From<Vec<String>> for OneOrMany {
    fn from(values: Vec<String>) -> Self {
        Self::Many(values)
    }
}

impl From<Vec<&str>> for OneOrMany {
    fn from(values: Vec<&str>) -> Self {
        Self::Many(values.into_iter().map(str::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for OneOrMany {
    fn from(values: [&str; N]) -> Self {
        Self::Many(values.into_iter().map(str::to_string).collect())
    }
}

impl From<OneOrMany> for Value {
    fn from(value: OneOrMany) -> Self {
        match value {
            OneOrMany::One(value) => Value::String(value),
            OneOrMany::Many(values) => Value::from(values),
        }
    }
}

fn push(args: &mut Arguments, key: &str, value: Option<impl Into<Value>>) {
    if let Some(value) = value {
        args.insert(key, value);
    }
}

/// Arguments of [`JobsClient::list`](crate::JobsClient::list).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListJobs {
    /// The project id.
    pub project: u64,
    /// Restrict to these job ids.
    pub job: Option<OneOrMany>,
    /// Restrict to jobs of this spider.
    pub spider: Option<String>,
    /// Restrict to jobs in this state.
    pub state: Option<JobState>,
    /// Restrict to jobs having these tags.
    pub has_tag: Option<OneOrMany>,
    /// Restrict to jobs lacking these tags.
    pub lacks_tag: Option<OneOrMany>,
    /// Maximum number of jobs to return.
    pub count: Option<u64>,
}

impl ListJobs {
    /// Lists the jobs of a project.
    pub fn new(project: u64) -> Self {
        Self {
            project,
            job: None,
            spider: None,
            state: None,
            has_tag: None,
            lacks_tag: None,
            count: None,
        }
    }

    /// Restricts to these job ids.
    #[must_use]
    pub fn with_job(mut self, job: impl Into<OneOrMany>) -> Self {
        self.job = Some(job.into());
        self
    }

    /// Restricts to jobs of this spider.
    #[must_use]
    pub fn with_spider(mut self, spider: impl Into<String>) -> Self {
        self.spider = Some(spider.into());
        self
    }

    /// Restricts to jobs in this state.
    #[must_use]
    pub fn with_state(mut self, state: JobState) -> Self {
        self.state = Some(state);
        self
    }

    /// Restricts to jobs having these tags.
    #[must_use]
    pub fn with_has_tag(mut self, tags: impl Into<OneOrMany>) -> Self {
        self.has_tag = Some(tags.into());
        self
    }

    /// Restricts to jobs lacking these tags.
    #[must_use]
    pub fn with_lacks_tag(mut self, tags: impl Into<OneOrMany>) -> Self {
        self.lacks_tag = Some(tags.into());
        self
    }

    /// Caps the number of returned jobs.
    #[must_use]
    pub fn with_count(mut self, count: u64) -> Self {
        self.count = Some(count);
        self
    }
}

impl From<ListJobs> for Arguments {
    fn from(request: ListJobs) -> Self {
        let mut args = Arguments::new().arg("project", request.project);
        push(&mut args, "job", request.job);
        push(&mut args, "spider", request.spider);
        push(&mut args, "state", request.state);
        push(&mut args, "has_tag", request.has_tag);
        push(&mut args, "lacks_tag", request.lacks_tag);
        push(&mut args, "count", request.count);
        args
    }
}

/// Arguments of [`JobsClient::schedule`](crate::JobsClient::schedule).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleJob {
    /// The project id.
    pub project: u64,
    /// The spider to run.
    pub spider: String,
    /// Tags to add to the new job.
    pub add_tag: Option<OneOrMany>,
    /// Priority, from 0 (lowest) to 4 (highest). The service default is 2.
    pub priority: Option<u8>,
    /// Spider arguments, sent as top-level fields.
    pub extra: IndexMap<String, String>,
}

impl ScheduleJob {
    /// Schedules a run of `spider` in `project`.
    pub fn new(project: u64, spider: impl Into<String>) -> Self {
        Self {
            project,
            spider: spider.into(),
            add_tag: None,
            priority: None,
            extra: IndexMap::new(),
        }
    }

    /// Tags the new job.
    #[must_use]
    pub fn with_add_tag(mut self, tags: impl Into<OneOrMany>) -> Self {
        self.add_tag = Some(tags.into());
        self
    }

    /// Sets the job priority.
    #[must_use]
    pub fn with_priority(mut self, priority: u8) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Adds a spider argument.
    #[must_use]
    pub fn with_extra(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(name.into(), value.into());
        self
    }
}

impl From<ScheduleJob> for Arguments {
    fn from(request: ScheduleJob) -> Self {
        let mut args = Arguments::new()
            .arg("project", request.project)
            .arg("spider", request.spider);
        push(&mut args, "add_tag", request.add_tag);
        push(&mut args, "priority", request.priority);
        if !request.extra.is_empty() {
            let extra: serde_json::Map<_, _> = request
                .extra
                .into_iter()
                .map(|(name, value)| (name, Value::String(value)))
                .collect();
            args.insert("extra", extra);
        }
        args
    }
}

/// Arguments of [`JobsClient::update`](crate::JobsClient::update).
///
/// The service requires at least one filter (`job`, `spider`, `state`,
/// `has_tag`, `lacks_tag`) and one modifier (`add_tag`, `remove_tag`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateJobs {
    /// The project id.
    pub project: u64,
    /// Filter on job ids.
    pub job: Option<OneOrMany>,
    /// Filter on spider name.
    pub spider: Option<String>,
    /// Filter on job state.
    pub state: Option<JobState>,
    /// Filter on jobs having these tags.
    pub has_tag: Option<OneOrMany>,
    /// Filter on jobs lacking these tags.
    pub lacks_tag: Option<OneOrMany>,
    /// Tags to add.
    pub add_tag: Option<OneOrMany>,
    /// Tags to remove.
    pub remove_tag: Option<OneOrMany>,
}

impl UpdateJobs {
    /// Updates jobs of a project.
    pub fn new(project: u64) -> Self {
        Self {
            project,
            job: None,
            spider: None,
            state: None,
            has_tag: None,
            lacks_tag: None,
            add_tag: None,
            remove_tag: None,
        }
    }

    /// Filters on job ids.
    #[must_use]
    pub fn with_job(mut self, job: impl Into<OneOrMany>) -> Self {
        self.job = Some(job.into());
        self
    }

    /// Filters on spider name.
    #[must_use]
    pub fn with_spider(mut self, spider: impl Into<String>) -> Self {
        self.spider = Some(spider.into());
        self
    }

    /// Filters on job state.
    #[must_use]
    pub fn with_state(mut self, state: JobState) -> Self {
        self.state = Some(state);
        self
    }

    /// Filters on jobs having these tags.
    #[must_use]
    pub fn with_has_tag(mut self, tags: impl Into<OneOrMany>) -> Self {
        self.has_tag = Some(tags.into());
        self
    }

    /// Filters on jobs lacking these tags.
    #[must_use]
    pub fn with_lacks_tag(mut self, tags: impl Into<OneOrMany>) -> Self {
        self.lacks_tag = Some(tags.into());
        self
    }

    /// Adds tags to the matching jobs.
    #[must_use]
    pub fn with_add_tag(mut self, tags: impl Into<OneOrMany>) -> Self {
        self.add_tag = Some(tags.into());
        self
    }

    /// Removes tags from the matching jobs.
    #[must_use]
    pub fn with_remove_tag(mut self, tags: impl Into<OneOrMany>) -> Self {
        self.remove_tag = Some(tags.into());
        self
    }
}

impl From<UpdateJobs> for Arguments {
    fn from(request: UpdateJobs) -> Self {
        let mut args = Arguments::new().arg("project", request.project);
        push(&mut args, "job", request.job);
        push(&mut args, "spider", request.spider);
        push(&mut args, "state", request.state);
        push(&mut args, "has_tag", request.has_tag);
        push(&mut args, "lacks_tag", request.lacks_tag);
        push(&mut args, "add_tag", request.add_tag);
        push(&mut args, "remove_tag", request.remove_tag);
        args
    }
}

/// Arguments of [`JobsClient::delete`](crate::JobsClient::delete).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteJobs {
    /// The project id.
    pub project: u64,
    /// The jobs to delete.
    pub job: OneOrMany,
}

impl DeleteJobs {
    /// Deletes `job` from `project`.
    pub fn new(project: u64, job: impl Into<OneOrMany>) -> Self {
        Self {
            project,
            job: job.into(),
        }
    }
}

impl From<DeleteJobs> for Arguments {
    fn from(request: DeleteJobs) -> Self {
        Arguments::new()
            .arg("project", request.project)
            .arg("job", request.job)
    }
}

/// Arguments of [`JobsClient::stop`](crate::JobsClient::stop).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopJob {
    /// The project id.
    pub project: u64,
    /// The job to stop.
    pub job: String,
}

impl StopJob {
    /// Stops `job` in `project`.
    pub fn new(project: u64, job: impl Into<String>) -> Self {
        Self {
            project,
            job: job.into(),
        }
    }
}

impl From<StopJob> for Arguments {
    fn from(request: StopJob) -> Self {
        Arguments::new()
            .arg("project", request.project)
            .arg("job", request.job)
    }
}

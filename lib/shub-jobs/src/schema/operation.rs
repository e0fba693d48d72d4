use http::Method;

use super::{Field, OperationSchema, Shape};

/// Accepted values for the `state` filter.
pub(crate) const JOB_STATES: &[&str] = &["pending", "running", "finished"];

const PROJECT: Field = Field::required("project", Shape::Natural);
const JOB: Field = Field::optional("job", Shape::TextOrList);
const SPIDER: Field = Field::optional("spider", Shape::Text);
const STATE: Field = Field::optional("state", Shape::OneOf(JOB_STATES));
const HAS_TAG: Field = Field::optional("has_tag", Shape::TextOrList);
const LACKS_TAG: Field = Field::optional("lacks_tag", Shape::TextOrList);
const ADD_TAG: Field = Field::optional("add_tag", Shape::TextOrList);
const REMOVE_TAG: Field = Field::optional("remove_tag", Shape::TextOrList);

static LIST: OperationSchema = OperationSchema::new(
    Operation::List,
    &[
        PROJECT,
        JOB,
        SPIDER,
        STATE,
        HAS_TAG,
        LACKS_TAG,
        Field::optional("count", Shape::Natural),
    ],
);

static SCHEDULE: OperationSchema = OperationSchema::new(
    Operation::Schedule,
    &[
        PROJECT,
        Field::required("spider", Shape::Text),
        ADD_TAG,
        Field::optional("priority", Shape::BoundedInteger { min: 0, max: 4 }),
        Field::optional("extra", Shape::TextMap),
    ],
);

static UPDATE: OperationSchema = OperationSchema::new(
    Operation::Update,
    &[
        PROJECT, JOB, SPIDER, STATE, HAS_TAG, LACKS_TAG, ADD_TAG, REMOVE_TAG,
    ],
);

static DELETE: OperationSchema = OperationSchema::new(
    Operation::Delete,
    &[PROJECT, Field::required("job", Shape::TextOrList)],
);

static STOP: OperationSchema = OperationSchema::new(
    Operation::Stop,
    &[PROJECT, Field::required("job", Shape::Text)],
);

/// The operations exposed by the jobs API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Operation {
    /// Retrieve information about jobs.
    #[display("list")]
    List,
    /// Schedule a spider run.
    #[display("schedule")]
    Schedule,
    /// Update (tag or untag) the jobs matching a query.
    #[display("update")]
    Update,
    /// Delete one or more jobs.
    #[display("delete")]
    Delete,
    /// Stop a running job.
    #[display("stop")]
    Stop,
}

impl Operation {
    /// Every operation, in API documentation order.
    pub const ALL: [Self; 5] = [
        Self::List,
        Self::Schedule,
        Self::Update,
        Self::Delete,
        Self::Stop,
    ];

    /// The static argument schema of this operation.
    pub fn schema(self) -> &'static OperationSchema {
        match self {
            Self::List => &LIST,
            Self::Schedule => &SCHEDULE,
            Self::Update => &UPDATE,
            Self::Delete => &DELETE,
            Self::Stop => &STOP,
        }
    }

    /// The HTTP method used on the wire.
    pub fn method(self) -> Method {
        match self {
            Self::List => Method::GET,
            Self::Schedule | Self::Update | Self::Delete | Self::Stop => Method::POST,
        }
    }

    /// The endpoint path, relative to the API base URL.
    pub fn path(self) -> &'static str {
        match self {
            Self::List => "/api/jobs/list.json",
            Self::Schedule => "/api/schedule.json",
            Self::Update => "/api/jobs/update.json",
            Self::Delete => "/api/jobs/delete.json",
            Self::Stop => "/api/jobs/stop.json",
        }
    }
}

#![allow(missing_docs, clippy::expect_used)]

use rstest::rstest;
use serde_json::json;
use tracing::info;
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shub_jobs::{
    Arguments, DeleteJobs, Failure, JobList, JobState, ListJobs, Outcome, ScheduleJob,
    ScheduledJob, StopJob, UpdateJobs, ValidationError,
};

mod common;
pub use self::common::*;

#[rstest]
#[tokio::test]
async fn test_list_success(#[future] server: MockServer) -> anyhow::Result<()> {
    let server = server.await;
    Mock::given(method("GET"))
        .and(path("/api/jobs/list.json"))
        .and(query_param("project", "1"))
        .and(query_param("has_tag", "consumed"))
        .and(header("authorization", AUTHORIZATION))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "ok",
            "count": 1,
            "total": 1,
            "jobs": [{"id": "1/1/6", "spider": "foo", "state": "finished", "tags": ["consumed"]}]
        })))
        .expect(1)
        .mount(&server)
        .await;
    let client = client_for(*server.address())?;

    let outcome = client
        .list(ListJobs::new(1).with_has_tag("consumed"))
        .await?;

    let response = outcome.success().expect("should succeed");
    assert_eq!(response.field("total"), Some(&json!(1)));
    let list: JobList = response.decode()?;
    assert_eq!(list.jobs.len(), 1);
    info!(?list, "decoded");

    Ok(())
}

#[rstest]
#[tokio::test]
async fn test_authentication_rejected(#[future] server: MockServer) -> anyhow::Result<()> {
    let server = server.await;
    Mock::given(method("GET"))
        .and(path("/api/jobs/list.json"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "status": "error",
            "message": "Authentication failed"
        })))
        .mount(&server)
        .await;
    let client = client_for(*server.address())?;

    let outcome = client.list(Arguments::new().arg("project", 1)).await?;

    assert!(outcome.is_rejection());
    let response = outcome.rejection().expect("should be rejected");
    assert_eq!(response.status(), 403);
    assert_eq!(response.message(), Some("Authentication failed"));

    Ok(())
}

#[rstest]
#[tokio::test]
async fn test_connection_refused_is_transport_failure() -> anyhow::Result<()> {
    init_tracing();
    let client = client_for(closed_address()?)?;

    let outcome = client.stop(StopJob::new(1, "1/1/6")).await?;

    assert!(outcome.is_transport_failure());
    let error = outcome.transport_failure().expect("should fail");
    assert!(error.is_connect());

    Ok(())
}

#[rstest]
#[tokio::test]
async fn test_job_ids_are_repeated_in_order(#[future] server: MockServer) -> anyhow::Result<()> {
    let server = server.await;
    Mock::given(method("GET"))
        .and(path("/api/jobs/list.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "ok",
            "count": 2,
            "total": 2,
            "jobs": []
        })))
        .mount(&server)
        .await;
    let client = client_for(*server.address())?;

    let outcome = client
        .list(
            ListJobs::new(1)
                .with_job(["1/1/2", "1/1/1"])
                .with_state(JobState::Finished),
        )
        .await?;
    assert!(outcome.is_success());

    let requests = server.received_requests().await.expect("recording enabled");
    let request = requests.first().expect("one request");
    insta::assert_snapshot!(
        request.url.query().unwrap_or_default(),
        @"project=1&job=1%2F1%2F2&job=1%2F1%2F1&state=finished"
    );

    Ok(())
}

#[rstest]
#[tokio::test]
async fn test_schedule_flattens_extra(#[future] server: MockServer) -> anyhow::Result<()> {
    let server = server.await;
    Mock::given(method("POST"))
        .and(path("/api/schedule.json"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(header("authorization", AUTHORIZATION))
        .and(body_string_contains("DOWNLOAD_DELAY=0.5"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"status": "ok", "jobid": "1/1/7"})),
        )
        .expect(1)
        .mount(&server)
        .await;
    let client = client_for(*server.address())?;

    let outcome = client
        .schedule(
            ScheduleJob::new(1, "foo")
                .with_add_tag(["a", "b"])
                .with_extra("DOWNLOAD_DELAY", "0.5"),
        )
        .await?;

    let scheduled: ScheduledJob = outcome.into_result()?.decode()?;
    assert_eq!(scheduled.jobid, "1/1/7");

    let requests = server.received_requests().await.expect("recording enabled");
    let request = requests.first().expect("one request");
    let fields: Vec<(String, String)> = serde_urlencoded::from_bytes(&request.body)?;
    insta::assert_debug_snapshot!(fields, @r#"
    [
        (
            "project",
            "1",
        ),
        (
            "spider",
            "foo",
        ),
        (
            "add_tag",
            "a",
        ),
        (
            "add_tag",
            "b",
        ),
        (
            "DOWNLOAD_DELAY",
            "0.5",
        ),
    ]
    "#);
    assert!(fields.iter().all(|(name, _)| name != "extra"));

    Ok(())
}

#[rstest]
#[tokio::test]
async fn test_update_without_filters_is_bad_request(
    #[future] server: MockServer,
) -> anyhow::Result<()> {
    let server = server.await;
    Mock::given(method("POST"))
        .and(path("/api/jobs/update.json"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "status": "badrequest",
            "message": "No filters provided"
        })))
        .mount(&server)
        .await;
    let client = client_for(*server.address())?;

    let outcome = client
        .update(UpdateJobs::new(1).with_add_tag("consumed"))
        .await?;

    let Err(Failure::Rejected(response)) = outcome.into_result() else {
        anyhow::bail!("expected a rejection");
    };
    assert_eq!(response.api_status(), Some("badrequest"));

    Ok(())
}

#[rstest]
#[tokio::test]
async fn test_delete_sends_every_job(#[future] server: MockServer) -> anyhow::Result<()> {
    let server = server.await;
    Mock::given(method("POST"))
        .and(path("/api/jobs/delete.json"))
        .and(body_string_contains("job=1%2F1%2F1&job=1%2F1%2F2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok", "count": 2})))
        .expect(1)
        .mount(&server)
        .await;
    let client = client_for(*server.address())?;

    let outcome = client
        .delete(DeleteJobs::new(1, vec!["1/1/1", "1/1/2"]))
        .await?;

    let count = outcome
        .map(|response| response.field("count").and_then(serde_json::Value::as_u64))
        .success()
        .flatten();
    assert_eq!(count, Some(2));

    Ok(())
}

#[rstest]
#[case::unknown_key(
    Arguments::new().arg("project", 1).arg("spider", "foo").arg("bogus", 1),
    "bogus"
)]
#[case::missing_spider(Arguments::new().arg("project", 1), "spider")]
#[case::priority_out_of_range(
    Arguments::new().arg("project", 1).arg("spider", "foo").arg("priority", 7),
    "priority"
)]
#[case::non_string_extra(
    Arguments::new().arg("project", 1).arg("spider", "foo").arg("extra", json!({"depth": 2})),
    "extra"
)]
#[tokio::test]
async fn test_invalid_arguments_send_nothing(
    #[future] server: MockServer,
    #[case] args: Arguments,
    #[case] key: &str,
) -> anyhow::Result<()> {
    let server = server.await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let client = client_for(*server.address())?;

    let error = client
        .schedule(args)
        .await
        .expect_err("should be rejected before sending");

    let reported = match &error {
        ValidationError::UnknownArgument { key, .. } => key.as_str(),
        ValidationError::MissingArgument { key, .. }
        | ValidationError::InvalidArgument { key, .. }
        | ValidationError::OutOfDomain { key, .. } => *key,
        other => anyhow::bail!("unexpected error: {other}"),
    };
    assert_eq!(reported, key);

    Ok(())
}

#[rstest]
#[tokio::test]
async fn test_outcome_track_for_each_status(#[future] server: MockServer) -> anyhow::Result<()> {
    let server = server.await;
    Mock::given(method("POST"))
        .and(path("/api/jobs/stop.json"))
        .respond_with(ResponseTemplate::new(201).set_body_string("created"))
        .mount(&server)
        .await;
    let client = client_for(*server.address())?;

    let outcome = client.stop(StopJob::new(1, "1/1/6")).await?;

    // only 200 is a success
    let Outcome::Rejection(response) = outcome else {
        anyhow::bail!("expected a rejection");
    };
    assert_eq!(response.status(), 201);
    assert!(response.json().is_none());

    Ok(())
}

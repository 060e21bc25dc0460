//! Job submission, polling and cleanup.

use super::common::init_tracing;
use spark_jobserver_client::api::{PARAM_APP_NAME, PARAM_CLASS_PATH, PARAM_CONTEXT};
use spark_jobserver_client::{JobOutcome, JobParams, JobServerClient};
use wiremock::matchers::{body_string, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn params() -> JobParams {
    JobParams::new()
        .with(PARAM_APP_NAME, "wordcount")
        .with(PARAM_CLASS_PATH, "spark.jobserver.WordCountExample")
        .with(PARAM_CONTEXT, "analytics")
}

#[tokio::test]
async fn test_async_job_workflow() {
    init_tracing();
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/jobs"))
        .and(body_string("input.string = a b c a b"))
        .respond_with(ResponseTemplate::new(202).set_body_json(serde_json::json!({
            "status": "STARTED",
            "result": {"context": "analytics", "jobId": "j-42"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    // First poll sees the job running, later polls see it finished.
    Mock::given(method("GET"))
        .and(path("/jobs/j-42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "RUNNING",
            "duration": "Job not done yet"
        })))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/jobs/j-42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "FINISHED",
            "result": {"a": 2, "b": 2, "c": 1}
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/jobs/j-42/config"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "input.string": "a b c a b"
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/jobs/j-42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"status": "KILLED"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = JobServerClient::new(mock_server.uri()).unwrap();

    let started = client
        .start_job(Some("input.string = a b c a b"), &params())
        .await
        .unwrap();
    assert!(started.is_started());
    assert_eq!(started.context(), Some("analytics"));
    let job_id = started.job_id().unwrap().to_string();

    let running = client.get_job_result(&job_id).await.unwrap();
    match running.outcome() {
        JobOutcome::Extended(attributes) => {
            assert_eq!(attributes["duration"], "Job not done yet");
        }
        other => panic!("expected running job attributes, got {other:?}"),
    }
    assert_eq!(running.status(), Some("RUNNING"));
    assert_eq!(running.job_id(), Some("j-42"));

    let finished = client.get_job_result(&job_id).await.unwrap();
    assert!(finished.is_completed());
    let counts: serde_json::Value = serde_json::from_str(finished.payload().unwrap()).unwrap();
    assert_eq!(counts["a"], 2);

    let config = client.get_config(&job_id).await.unwrap();
    assert_eq!(config.get_str("input.string"), Some("a b c a b"));

    assert!(client.delete_job(&job_id).await.unwrap());
}

#[tokio::test]
async fn test_failed_job_details() {
    init_tracing();
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/jobs/j-bad"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "ERROR",
            "result": {
                "message": "boom",
                "errorClass": "java.lang.IllegalArgumentException",
                "stack": ["at WordCount.run(WordCount.scala:10)", "at Runner.main(Runner.scala:3)"]
            }
        })))
        .mount(&mock_server)
        .await;

    let client = JobServerClient::new(mock_server.uri()).unwrap();
    let result = client.get_job_result("j-bad").await.unwrap();

    let error = result.error().unwrap();
    assert_eq!(error.message.as_deref(), Some("boom"));
    assert_eq!(
        error.error_class.as_deref(),
        Some("java.lang.IllegalArgumentException")
    );
    assert_eq!(error.stack.len(), 2);
}

#[tokio::test]
async fn test_unknown_job_is_not_an_error() {
    init_tracing();
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/jobs/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "status": "ERROR",
            "result": "No such job ID missing"
        })))
        .mount(&mock_server)
        .await;

    let client = JobServerClient::new(mock_server.uri()).unwrap();
    let result = client.get_job_result("missing").await.unwrap();

    assert!(result.is_not_found());
    assert_eq!(result.job_id(), Some("missing"));
    assert!(result.raw().contains("No such job ID missing"));
}

#[tokio::test]
async fn test_start_job_from_file() {
    init_tracing();
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/jobs"))
        .and(body_string("input.string = x\nsecond.line = y"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "OK",
            "result": "done"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("job.conf");
    std::fs::write(&input, "input.string = x\r\nsecond.line = y\r\n").unwrap();

    let client = JobServerClient::new(mock_server.uri()).unwrap();
    let result = client.start_job_file(&input, &params()).await.unwrap();

    assert_eq!(result.payload(), Some("done"));
}

#[tokio::test]
async fn test_job_listing() {
    init_tracing();
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/jobs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {
                "duration": "1.2 secs",
                "classPath": "spark.jobserver.WordCountExample",
                "startTime": "2024-03-01T10:15:30.000Z",
                "context": "analytics",
                "status": "FINISHED",
                "jobId": "j-1"
            }
        ])))
        .mount(&mock_server)
        .await;

    let client = JobServerClient::new(mock_server.uri()).unwrap();
    let jobs = client.list_jobs().await.unwrap();

    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].context, "analytics");
    assert!(jobs[0].started_at().is_some());
}

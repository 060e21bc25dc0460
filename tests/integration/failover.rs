//! Host failover across whole operations.

use std::time::{Duration, Instant};

use super::common::{
    init_tracing, resetting_server, test_config, RecordingPolicy, UNREACHABLE, UNREACHABLE_STANDBY,
};
use spark_jobserver_client::{
    ClientConfig, EndpointScope, ErrorKind, FailoverBackoff, HostRotation, JobParams,
    JobServerClient,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn contexts_server() -> MockServer {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/contexts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(["ctx"]))
        .mount(&mock_server)
        .await;
    mock_server
}

#[tokio::test]
async fn test_retries_are_bounded_and_reset_per_call() {
    init_tracing();
    let policy = RecordingPolicy::new(2, UNREACHABLE_STANDBY);
    let client = JobServerClient::with_config(UNREACHABLE, test_config(EndpointScope::Shared))
        .unwrap()
        .with_failover(policy.clone());

    let err = client.list_jars().await.unwrap_err();
    assert!(matches!(err.kind, ErrorKind::RetriesExhausted { .. }));
    assert_eq!(err.attempts(), Some(3));
    assert_eq!(
        err.to_string(),
        "Error occurs when retry to get information of jars, retried 3 times"
    );
    assert_eq!(client.endpoint().as_str(), UNREACHABLE_STANDBY);

    let err = client.list_jobs().await.unwrap_err();
    assert_eq!(err.attempts(), Some(3));
    assert_eq!(policy.seen(), vec![1, 2, 3, 1, 2, 3]);
}

#[tokio::test]
async fn test_failover_moves_shared_endpoint() {
    init_tracing();
    let mock_server = contexts_server().await;
    let policy = RecordingPolicy::new(2, mock_server.uri());
    let client = JobServerClient::with_config(UNREACHABLE, test_config(EndpointScope::Shared))
        .unwrap()
        .with_failover(policy.clone());

    assert_eq!(client.list_contexts().await.unwrap(), vec!["ctx"]);
    assert_eq!(client.endpoint().as_str(), format!("{}/", mock_server.uri()));

    // The next call starts from the standby and needs no failover.
    assert_eq!(client.list_contexts().await.unwrap(), vec!["ctx"]);
    assert_eq!(policy.seen(), vec![1]);
}

#[tokio::test]
async fn test_connection_reset_fails_over() {
    init_tracing();
    let mock_server = contexts_server().await;
    let primary = resetting_server().await;
    let policy = RecordingPolicy::new(1, mock_server.uri());
    let client = JobServerClient::with_config(&primary, test_config(EndpointScope::Shared))
        .unwrap()
        .with_failover(policy.clone());

    assert_eq!(client.list_contexts().await.unwrap(), vec!["ctx"]);
    assert_eq!(policy.seen(), vec![1]);
}

#[tokio::test]
async fn test_per_call_scope_keeps_endpoint() {
    init_tracing();
    let mock_server = contexts_server().await;
    let policy = RecordingPolicy::new(2, mock_server.uri());
    let client = JobServerClient::with_config(UNREACHABLE, test_config(EndpointScope::PerCall))
        .unwrap()
        .with_failover(policy.clone());

    client.list_contexts().await.unwrap();
    client.list_contexts().await.unwrap();

    assert_eq!(client.endpoint().as_str(), UNREACHABLE);
    assert_eq!(policy.seen(), vec![1, 1]);
}

#[tokio::test]
async fn test_concurrent_calls_keep_their_own_counts() {
    init_tracing();
    let policy = RecordingPolicy::new(2, UNREACHABLE_STANDBY);
    let client = JobServerClient::with_config(UNREACHABLE, test_config(EndpointScope::PerCall))
        .unwrap()
        .with_failover(policy.clone());

    let calls = (0..4).map(|_| client.list_contexts());
    let results = futures::future::join_all(calls).await;

    for result in results {
        assert_eq!(result.unwrap_err().attempts(), Some(3));
    }

    let mut seen = policy.seen();
    seen.sort_unstable();
    assert_eq!(seen, vec![1, 1, 1, 1, 2, 2, 2, 2, 3, 3, 3, 3]);
}

#[tokio::test]
async fn test_host_rotation_reaches_live_standby() {
    init_tracing();
    let mock_server = contexts_server().await;
    let rotation = HostRotation::new(3, [UNREACHABLE_STANDBY.to_string(), mock_server.uri()]).unwrap();
    let client = JobServerClient::with_config(UNREACHABLE, test_config(EndpointScope::Shared))
        .unwrap()
        .with_failover(rotation);

    assert_eq!(client.list_contexts().await.unwrap(), vec!["ctx"]);
    assert_eq!(client.endpoint().as_str(), format!("{}/", mock_server.uri()));
}

#[tokio::test]
async fn test_without_policy_connectivity_failure_is_not_retried() {
    init_tracing();
    let client =
        JobServerClient::with_config(UNREACHABLE, test_config(EndpointScope::Shared)).unwrap();

    let err = client.list_contexts().await.unwrap_err();
    assert!(matches!(err.kind, ErrorKind::NoFailover(_)));
    assert_eq!(client.endpoint().as_str(), UNREACHABLE);
}

#[tokio::test]
async fn test_invalid_input_is_not_retried() {
    init_tracing();
    let policy = RecordingPolicy::new(2, UNREACHABLE_STANDBY);
    let client = JobServerClient::with_config(UNREACHABLE, test_config(EndpointScope::Shared))
        .unwrap()
        .with_failover(policy.clone());

    let err = client.start_job(None, &JobParams::new()).await.unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidInput(_)));
    assert!(policy.seen().is_empty());
}

#[tokio::test]
async fn test_upload_connectivity_failure_is_raised_not_false() {
    init_tracing();
    let policy = RecordingPolicy::new(1, UNREACHABLE_STANDBY);
    let client = JobServerClient::with_config(UNREACHABLE, test_config(EndpointScope::Shared))
        .unwrap()
        .with_failover(policy.clone());

    let err = client.upload_jar(vec![1u8, 2, 3], "app").await.unwrap_err();
    assert_eq!(err.attempts(), Some(2));
    assert!(err.to_string().contains("uploading spark job jars"));
}

#[tokio::test]
async fn test_failover_backoff_delays_retries() {
    init_tracing();
    let config = ClientConfig::builder()
        .with_connect_timeout(Duration::from_secs(2))
        .with_failover_backoff(FailoverBackoff::constant(Duration::from_millis(50)))
        .build();
    let policy = RecordingPolicy::new(2, UNREACHABLE_STANDBY);
    let client = JobServerClient::with_config(UNREACHABLE, config)
        .unwrap()
        .with_failover(policy);

    let started = Instant::now();
    let err = client.list_contexts().await.unwrap_err();

    assert_eq!(err.attempts(), Some(3));
    assert!(started.elapsed() >= Duration::from_millis(100));
}

//! Context lifecycle.

use super::common::init_tracing;
use spark_jobserver_client::api::{PARAM_MEM_PER_NODE, PARAM_NUM_CPU_CORES};
use spark_jobserver_client::{JobParams, JobServerClient};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_context_lifecycle() {
    init_tracing();
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/contexts/analytics"))
        .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/contexts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(["analytics"]))
        .mount(&mock_server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/contexts/analytics"))
        .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = JobServerClient::new(mock_server.uri()).unwrap();
    let params = JobParams::new()
        .with(PARAM_NUM_CPU_CORES, "2")
        .with(PARAM_MEM_PER_NODE, "512m");

    assert!(client.create_context("analytics", &params).await.unwrap());
    assert_eq!(client.list_contexts().await.unwrap(), vec!["analytics"]);
    assert!(client.delete_context("analytics").await.unwrap());

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(
        requests[0].url.query(),
        Some("num-cpu-cores=2&memory-per-node=512m")
    );
}

#[tokio::test]
async fn test_context_names_are_encoded() {
    init_tracing();
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/contexts/my%20ctx"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = JobServerClient::new(mock_server.uri()).unwrap();
    assert!(client.create_context("my ctx", &JobParams::new()).await.unwrap());
}

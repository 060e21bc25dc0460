//! Jar upload and listing through a base URL with a path prefix.

use super::common::{init_tracing, ADMIN_AUTH};
use spark_jobserver_client::JobServerClient;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_upload_then_list_jars() {
    init_tracing();
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/sjs/jars/wordcount"))
        .and(header("Authorization", ADMIN_AUTH))
        .and(header("Content-Type", "application/java-archive"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Jar uploaded"))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/sjs/jars"))
        .and(header("Authorization", ADMIN_AUTH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "wordcount": "2024-03-01T10:15:30.000Z",
            "pi": "2024-02-11T08:00:00.000Z"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = JobServerClient::new(format!("{}/sjs", mock_server.uri()))
        .unwrap()
        .with_credentials("admin", "secret");

    let dir = tempfile::tempdir().unwrap();
    let jar_path = dir.path().join("wordcount.jar");
    std::fs::write(&jar_path, b"PK\x03\x04").unwrap();
    assert!(client.upload_jar_file(&jar_path, "wordcount").await.unwrap());

    let mut jars = client.list_jars().await.unwrap();
    jars.sort_by(|a, b| a.jar_name.cmp(&b.jar_name));
    let names: Vec<&str> = jars.iter().map(|j| j.jar_name.as_str()).collect();
    assert_eq!(names, vec!["pi", "wordcount"]);
    assert!(jars.iter().all(|j| j.uploaded_at().is_some()));
}

#[tokio::test]
async fn test_rejected_upload_returns_false() {
    init_tracing();
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/jars/broken"))
        .respond_with(ResponseTemplate::new(400).set_body_string("Jar is not of the right format"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = JobServerClient::new(mock_server.uri()).unwrap();
    let uploaded = client
        .upload_jar_reader(&b"not a jar"[..], "broken")
        .await
        .unwrap();

    assert!(!uploaded);
}

//! Integration tests: uploader over the HTTP bulk destination

use std::sync::Arc;

use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use cv_core::domain::entities::upload::UploadBatch;
use cv_core::errors::UploadError;
use cv_infra::build_uploader;
use cv_shared::config::UploadConfig;

fn config(endpoint: String) -> UploadConfig {
    UploadConfig {
        endpoint,
        api_key: "integration-key".to_string(),
        max_attempts: 3,
        base_delay_ms: 1,
        request_timeout_seconds: 5,
        ..Default::default()
    }
}

fn records(count: usize) -> Vec<Value> {
    (0..count)
        .map(|i| json!({"id": format!("movie-{}", i), "values": [i as f64]}))
        .collect()
}

#[tokio::test]
async fn test_transient_errors_are_retried_until_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/vectors/upsert"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/vectors/upsert"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let uploader = Arc::new(build_uploader(&config(server.uri())).unwrap());
    let batches = UploadBatch::chunk(records(5), 2);

    let report = uploader
        .spawn("movies".to_string(), batches, None)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(report.delivered, 3);
    assert_eq!(report.attempts, 5);
}

#[tokio::test]
async fn test_permanent_rejection_stops_the_run() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/vectors/upsert"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad api key"))
        .expect(1)
        .mount(&server)
        .await;

    let uploader = build_uploader(&config(server.uri())).unwrap();
    let batches = UploadBatch::chunk(records(4), 2);

    match uploader.upload("movies", &batches, None).await {
        Err(UploadError::PermanentFailure {
            batch_index,
            delivered,
            ..
        }) => {
            assert_eq!(batch_index, 0);
            assert_eq!(delivered, 0);
        }
        other => panic!("expected permanent failure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_resume_skips_delivered_batches() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/vectors/upsert"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let uploader = build_uploader(&config(server.uri())).unwrap();
    let batches = UploadBatch::chunk(records(6), 2);

    let report = uploader.upload("movies", &batches, Some(1)).await.unwrap();
    assert_eq!(report.skipped, 2);
    assert_eq!(report.delivered, 1);
}

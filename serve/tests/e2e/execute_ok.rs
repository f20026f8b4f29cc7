use serde_json::json;
use std::time::Duration;
use tokio::time::timeout;

use crate::common::{echo_registry, post_execute, spawn_server_once};

#[tokio::test]
async fn submission_is_echoed_back_as_markdown() {
    let (url, handle) = spawn_server_once(echo_registry("planner"), None).await;

    let (status, body) = post_execute(
        &url,
        &json!({ "agent": "planner", "objective": "plan a trip" }),
    )
    .await;

    assert_eq!(status, 200);
    let output = body["output"].as_str().unwrap();
    assert!(output.contains("# Écho — planner"));
    assert!(output.contains("**objective** : plan a trip"));

    // Once mode: the server exits after answering.
    timeout(Duration::from_secs(5), handle)
        .await
        .expect("server did not exit in once mode")
        .unwrap()
        .unwrap();
}

#[tokio::test]
async fn health_probe_does_not_consume_the_once_budget() {
    let (url, handle) = spawn_server_once(echo_registry("planner"), None).await;

    let health = reqwest::get(format!("{url}/health")).await.unwrap();
    assert_eq!(health.status().as_u16(), 200);

    // The endpoint still answers a submission after the probe.
    let (status, _) = post_execute(&url, &json!({ "agent": "planner" })).await;
    assert_eq!(status, 200);

    timeout(Duration::from_secs(5), handle)
        .await
        .expect("server did not exit in once mode")
        .unwrap()
        .unwrap();
}

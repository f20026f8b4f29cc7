use serde_json::json;
use std::time::Duration;
use tokio::time::timeout;

use crate::common::{echo_registry, post_execute, spawn_server_once};

#[tokio::test]
async fn invalid_json_is_rejected_and_the_server_keeps_serving() {
    let (url, handle) = spawn_server_once(echo_registry("planner"), None).await;

    let res = reqwest::Client::new()
        .post(format!("{url}/execute_agent"))
        .header("Content-Type", "application/json")
        .body("not json")
        .send()
        .await
        .unwrap();
    eprintln!("[e2e] received: {}", res.status());
    assert!(res.status().is_client_error());

    // The rejection happened before any submission was answered; once mode is
    // still pending and a valid submission goes through.
    let (status, _) = post_execute(&url, &json!({ "agent": "planner" })).await;
    assert_eq!(status, 200);

    timeout(Duration::from_secs(5), handle)
        .await
        .expect("server did not exit in once mode")
        .unwrap()
        .unwrap();
}

#[tokio::test]
async fn non_string_field_values_are_rejected() {
    let (url, _handle) = spawn_server_once(echo_registry("planner"), None).await;

    let res = reqwest::Client::new()
        .post(format!("{url}/execute_agent"))
        .json(&json!({ "agent": "planner", "objective": 42 }))
        .send()
        .await
        .unwrap();
    eprintln!("[e2e] received: {}", res.status());
    assert!(res.status().is_client_error());
}

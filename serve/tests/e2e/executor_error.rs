use serde_json::json;
use std::sync::Arc;

use serve::AgentRegistry;

use crate::common::{post_execute, spawn_server_once, FailingExecutor, SilentExecutor};

#[tokio::test]
async fn executor_failure_is_a_500_with_its_message() {
    let mut registry = AgentRegistry::new();
    registry.register(Arc::new(FailingExecutor));
    let (url, _handle) = spawn_server_once(registry, None).await;

    let (status, body) = post_execute(&url, &json!({ "agent": "failing" })).await;

    assert_eq!(status, 500);
    assert!(body["detail"]
        .as_str()
        .unwrap()
        .contains("le moteur est tombé"));
}

#[tokio::test]
async fn empty_output_is_a_500_no_result() {
    let mut registry = AgentRegistry::new();
    registry.register(Arc::new(SilentExecutor));
    let (url, _handle) = spawn_server_once(registry, None).await;

    let (status, body) = post_execute(&url, &json!({ "agent": "silent" })).await;

    assert_eq!(status, 500);
    assert_eq!(
        body["detail"].as_str().unwrap(),
        "L'agent n'a produit aucun résultat."
    );
}

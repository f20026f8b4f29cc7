use serde_json::json;

use crate::common::{echo_registry, post_execute, spawn_server_once};

#[tokio::test]
async fn unknown_agent_is_a_400_with_french_detail() {
    let (url, _handle) = spawn_server_once(echo_registry("planner"), None).await;

    let (status, body) = post_execute(&url, &json!({ "agent": "visualizer" })).await;

    assert_eq!(status, 400);
    assert_eq!(
        body["detail"].as_str().unwrap(),
        "Agent 'visualizer' non valide ou non appelable directement."
    );
}

use serde_json::json;

use crate::common::{echo_registry, post_execute, spawn_server_once};

#[tokio::test]
async fn successful_output_is_persisted_under_history() {
    let history = tempfile::tempdir().unwrap();
    let (url, _handle) = spawn_server_once(
        echo_registry("planner"),
        Some(history.path().to_path_buf()),
    )
    .await;

    let (status, body) = post_execute(
        &url,
        &json!({ "agent": "planner", "objective": "plan: a/trip!" }),
    )
    .await;
    assert_eq!(status, 200);

    let entries: Vec<_> = std::fs::read_dir(history.path())
        .unwrap()
        .map(|e| e.unwrap())
        .collect();
    assert_eq!(entries.len(), 1);

    let name = entries[0].file_name().to_string_lossy().to_string();
    // Objective is sanitized into the file name.
    assert!(name.ends_with("_planner_plan atrip.md"), "got: {name}");

    let saved = std::fs::read_to_string(entries[0].path()).unwrap();
    assert_eq!(saved, body["output"].as_str().unwrap());
}

#[tokio::test]
async fn failures_leave_no_history_entry() {
    let history = tempfile::tempdir().unwrap();
    let (url, _handle) = spawn_server_once(
        echo_registry("planner"),
        Some(history.path().to_path_buf()),
    )
    .await;

    let (status, _) = post_execute(&url, &json!({ "agent": "unknown" })).await;
    assert_eq!(status, 400);

    // The directory is only created on the first save.
    assert!(std::fs::read_dir(history.path()).unwrap().next().is_none());
}

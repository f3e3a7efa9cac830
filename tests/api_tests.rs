//! API 集成测试（内存后端）

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};
use std::sync::Arc;
use uuid::Uuid;

use not_todo::app::{api_router, AppState};
use not_todo::infrastructure::memory::MemoryStore;

fn test_server() -> TestServer {
    let state = AppState::new(Arc::new(MemoryStore::new()));
    TestServer::new(api_router(state)).unwrap()
}

async fn create_user(server: &TestServer, email: &str) -> Value {
    let response = server.post("/api/users").json(&json!({ "email": email })).await;
    response.assert_status_ok();
    response.json()
}

#[tokio::test]
async fn health_check_reports_healthy() {
    let server = test_server();

    let response = server.get("/health").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "connected");
}

#[tokio::test]
async fn creating_a_user_twice_returns_the_same_id() {
    let server = test_server();

    let first = create_user(&server, "a@b.com").await;
    let second = create_user(&server, "a@b.com").await;

    assert_eq!(first["email"], "a@b.com");
    assert_eq!(first["id"], second["id"]);
}

#[tokio::test]
async fn get_users_also_creates_when_absent() {
    let server = test_server();

    let response = server
        .get("/api/users")
        .add_query_param("email", "fresh@example.com")
        .await;
    response.assert_status_ok();

    let via_get: Value = response.json();
    let via_post = create_user(&server, "fresh@example.com").await;
    assert_eq!(via_get["id"], via_post["id"]);
}

#[tokio::test]
async fn missing_email_is_rejected() {
    let server = test_server();

    let response = server.get("/api/users").await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "Email is required");

    let response = server.post("/api/users").json(&json!({})).await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let response = server.post("/api/users").json(&json!({ "email": "" })).await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn end_to_end_task_flow() {
    let server = test_server();

    let user = create_user(&server, "a@b.com").await;
    let user_id = user["id"].as_str().unwrap().to_string();

    // 新用户没有任务
    let response = server
        .get("/api/tasks")
        .add_query_param("userId", &user_id)
        .await;
    response.assert_status_ok();
    let tasks: Vec<Value> = response.json();
    assert!(tasks.is_empty());

    // 添加一条
    let response = server
        .post("/api/tasks")
        .json(&json!({
            "userId": user_id,
            "text": "doom-scroll",
            "priority": 5,
        }))
        .await;
    response.assert_status_ok();
    let task: Value = response.json();
    assert_eq!(task["text"], "doom-scroll");
    assert_eq!(task["priority"], 5);
    assert_eq!(task["user_id"].as_str().unwrap(), user_id);

    // 列表里恰好这一条
    let response = server
        .get("/api/tasks")
        .add_query_param("userId", &user_id)
        .await;
    let tasks: Vec<Value> = response.json();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["id"], task["id"]);
}

#[tokio::test]
async fn tasks_are_listed_newest_first() {
    let server = test_server();

    let user = create_user(&server, "a@b.com").await;
    let user_id = user["id"].as_str().unwrap().to_string();

    for text in ["first", "second", "third"] {
        let response = server
            .post("/api/tasks")
            .json(&json!({ "userId": user_id, "text": text, "priority": 3 }))
            .await;
        response.assert_status_ok();
    }

    let response = server
        .get("/api/tasks")
        .add_query_param("userId", &user_id)
        .await;
    let tasks: Vec<Value> = response.json();
    let texts: Vec<&str> = tasks.iter().map(|t| t["text"].as_str().unwrap()).collect();
    assert_eq!(texts, ["third", "second", "first"]);
}

#[tokio::test]
async fn missing_task_fields_are_rejected() {
    let server = test_server();

    let user = create_user(&server, "a@b.com").await;
    let user_id = user["id"].as_str().unwrap().to_string();

    let cases = [
        json!({ "text": "x", "priority": 3 }),
        json!({ "userId": user_id, "priority": 3 }),
        json!({ "userId": user_id, "text": "x" }),
        json!({ "userId": user_id, "text": "", "priority": 3 }),
    ];

    for body in cases {
        let response = server.post("/api/tasks").json(&body).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let error: Value = response.json();
        assert_eq!(error["error"], "User ID, text, and priority are required");
    }
}

#[tokio::test]
async fn priority_out_of_range_is_rejected() {
    let server = test_server();

    let user = create_user(&server, "a@b.com").await;
    let user_id = user["id"].as_str().unwrap().to_string();

    for priority in [0, 6, -1] {
        let response = server
            .post("/api/tasks")
            .json(&json!({ "userId": user_id, "text": "x", "priority": priority }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    // 边界值合法
    for priority in [1, 5] {
        let response = server
            .post("/api/tasks")
            .json(&json!({ "userId": user_id, "text": "x", "priority": priority }))
            .await;
        response.assert_status_ok();
    }
}

#[tokio::test]
async fn partial_update_keeps_the_other_field() {
    let server = test_server();

    let user = create_user(&server, "a@b.com").await;
    let user_id = user["id"].as_str().unwrap().to_string();

    let response = server
        .post("/api/tasks")
        .json(&json!({ "userId": user_id, "text": "doom-scroll", "priority": 5 }))
        .await;
    let task: Value = response.json();
    let task_id = task["id"].as_str().unwrap().to_string();

    // 只改优先级
    let response = server
        .put("/api/tasks")
        .json(&json!({ "id": task_id, "updates": { "priority": 2 } }))
        .await;
    response.assert_status_ok();
    let updated: Value = response.json();
    assert_eq!(updated["text"], "doom-scroll");
    assert_eq!(updated["priority"], 2);

    // 只改文本
    let response = server
        .put("/api/tasks")
        .json(&json!({ "id": task_id, "updates": { "text": "argue online" } }))
        .await;
    response.assert_status_ok();
    let updated: Value = response.json();
    assert_eq!(updated["text"], "argue online");
    assert_eq!(updated["priority"], 2);
}

#[tokio::test]
async fn empty_update_set_is_rejected() {
    let server = test_server();

    let user = create_user(&server, "a@b.com").await;
    let user_id = user["id"].as_str().unwrap().to_string();

    let response = server
        .post("/api/tasks")
        .json(&json!({ "userId": user_id, "text": "x", "priority": 3 }))
        .await;
    let task: Value = response.json();

    let response = server
        .put("/api/tasks")
        .json(&json!({ "id": task["id"], "updates": {} }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let error: Value = response.json();
    assert_eq!(error["error"], "No fields to update");

    // id 或 updates 缺失
    let response = server.put("/api/tasks").json(&json!({ "id": task["id"] })).await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let error: Value = response.json();
    assert_eq!(error["error"], "Task ID and updates are required");
}

#[tokio::test]
async fn updating_a_missing_task_surfaces_an_error() {
    let server = test_server();

    let id = Uuid::new_v4();
    let response = server
        .put("/api/tasks")
        .json(&json!({ "id": id, "updates": { "priority": 1 } }))
        .await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let error: Value = response.json();
    assert_eq!(
        error["error"],
        format!("Task with ID {} not found", id)
    );
}

#[tokio::test]
async fn deleting_a_missing_task_surfaces_an_error() {
    let server = test_server();

    let id = Uuid::new_v4();
    let response = server
        .delete("/api/tasks")
        .add_query_param("id", id.to_string())
        .await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let error: Value = response.json();
    assert_eq!(
        error["error"],
        format!("Task with ID {} not found", id)
    );
}

#[tokio::test]
async fn delete_returns_a_message_and_removes_the_row() {
    let server = test_server();

    let user = create_user(&server, "a@b.com").await;
    let user_id = user["id"].as_str().unwrap().to_string();

    let response = server
        .post("/api/tasks")
        .json(&json!({ "userId": user_id, "text": "x", "priority": 3 }))
        .await;
    let task: Value = response.json();

    let response = server
        .delete("/api/tasks")
        .add_query_param("id", task["id"].as_str().unwrap())
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["message"], "Task deleted successfully");

    let response = server
        .get("/api/tasks")
        .add_query_param("userId", &user_id)
        .await;
    let tasks: Vec<Value> = response.json();
    assert!(tasks.is_empty());

    let response = server.delete("/api/tasks").await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let error: Value = response.json();
    assert_eq!(error["error"], "Task ID is required");
}

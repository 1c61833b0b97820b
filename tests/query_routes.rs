mod common;

use chrono::{DateTime, Utc};
use common::{create_query, json, spawn_app, FORM_DATA_ID, MISSING_ID};
use serde_json::json;

fn timestamp(value: &serde_json::Value) -> DateTime<Utc> {
    value
        .as_str()
        .expect("timestamp should be a string")
        .parse()
        .expect("timestamp should be RFC 3339")
}

#[tokio::test]
async fn test_create_defaults_to_open() {
    let client = spawn_app().await;

    let (status, body) = json(
        client
            .post(
                "/query",
                json!({
                    "title": "Test Query",
                    "description": "Test description",
                    "formDataId": FORM_DATA_ID
                }),
            )
            .await,
    )
    .await;

    assert_eq!(status, 201);
    assert_eq!(body["statusCode"], 201);
    let data = &body["data"];
    assert!(data["id"].is_string());
    assert_eq!(data["title"], "Test Query");
    assert_eq!(data["description"], "Test description");
    assert_eq!(data["status"], "OPEN");
    assert_eq!(data["formDataId"], FORM_DATA_ID);
    assert_eq!(data["formData"]["id"], FORM_DATA_ID);
    assert!(data["createdAt"].is_string());
    assert!(data["updatedAt"].is_string());
}

#[tokio::test]
async fn test_create_with_explicit_statuses() {
    let client = spawn_app().await;

    for status in ["OPEN", "RESOLVED"] {
        let data = create_query(
            &client,
            json!({"title": "Explicit", "formDataId": FORM_DATA_ID, "status": status}),
        )
        .await;
        assert_eq!(data["status"], status);
    }
}

#[tokio::test]
async fn test_create_without_description_is_null() {
    let client = spawn_app().await;
    let data = create_query(&client, json!({"title": "Q", "formDataId": FORM_DATA_ID})).await;
    assert!(data["description"].is_null());
}

#[tokio::test]
async fn test_create_rejects_invalid_status() {
    let client = spawn_app().await;

    let (status, body) = json(
        client
            .post(
                "/query",
                json!({"title": "Q", "formDataId": FORM_DATA_ID, "status": "BOGUS"}),
            )
            .await,
    )
    .await;

    assert_eq!(status, 400);
    assert_eq!(body["statusCode"], 400);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("Status must be either OPEN or RESOLVED"));
}

#[tokio::test]
async fn test_create_rejects_missing_fields() {
    let client = spawn_app().await;

    let (status, body) = json(
        client
            .post("/query", json!({"description": "Missing title", "formDataId": FORM_DATA_ID}))
            .await,
    )
    .await;
    assert_eq!(status, 400);
    assert_eq!(body["message"], "title is required");

    let (status, body) = json(client.post("/query", json!({"title": "Missing id"})).await).await;
    assert_eq!(status, 400);
    assert_eq!(body["message"], "formDataId is required");
}

#[tokio::test]
async fn test_create_with_unknown_form_data_writes_nothing() {
    let client = spawn_app().await;

    let (status, body) = json(
        client
            .post("/query", json!({"title": "Q", "formDataId": MISSING_ID}))
            .await,
    )
    .await;
    assert_eq!(status, 404);
    assert_eq!(body["statusCode"], 404);
    assert_eq!(body["message"], "FormData not found");

    let (_, body) = json(client.get("/form-data").await).await;
    let total_queries: usize = body["data"]["formData"]
        .as_array()
        .unwrap()
        .iter()
        .map(|fd| fd["queries"].as_array().unwrap().len())
        .sum();
    assert_eq!(total_queries, 0);
}

#[tokio::test]
async fn test_update_fields() {
    let client = spawn_app().await;
    let created = create_query(
        &client,
        json!({
            "title": "Query to Update",
            "description": "Original description",
            "formDataId": FORM_DATA_ID,
            "status": "OPEN"
        }),
    )
    .await;
    let path = format!("/query/{}", created["id"].as_str().unwrap());

    let (status, body) = json(client.patch(&path, json!({"title": "Updated Title"})).await).await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["title"], "Updated Title");
    assert_eq!(body["data"]["description"], "Original description");

    let (_, body) = json(client.patch(&path, json!({"description": "Updated description"})).await).await;
    assert_eq!(body["data"]["description"], "Updated description");
    assert_eq!(body["data"]["title"], "Updated Title");

    let (_, body) = json(
        client
            .patch(&path, json!({"title": "Multi-field Update", "status": "RESOLVED"}))
            .await,
    )
    .await;
    assert_eq!(body["data"]["title"], "Multi-field Update");
    assert_eq!(body["data"]["status"], "RESOLVED");
    assert_eq!(body["data"]["formData"]["id"], FORM_DATA_ID);

    let (_, body) = json(client.patch(&path, json!({"description": null})).await).await;
    assert!(body["data"]["description"].is_null());
}

#[tokio::test]
async fn test_resolve_bumps_updated_at() {
    let client = spawn_app().await;
    let created = create_query(
        &client,
        json!({"title": "Q", "formDataId": FORM_DATA_ID, "status": "OPEN"}),
    )
    .await;
    let path = format!("/query/{}", created["id"].as_str().unwrap());

    let (status, body) = json(client.patch(&path, json!({"status": "RESOLVED"})).await).await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["status"], "RESOLVED");
    assert_eq!(body["data"]["createdAt"], created["createdAt"]);
    assert!(timestamp(&body["data"]["updatedAt"]) > timestamp(&created["updatedAt"]));

    // Toggling back is allowed and bumps again
    let previous = timestamp(&body["data"]["updatedAt"]);
    let (status, body) = json(client.patch(&path, json!({"status": "OPEN"})).await).await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["status"], "OPEN");
    assert!(timestamp(&body["data"]["updatedAt"]) > previous);
}

#[tokio::test]
async fn test_update_rejects_invalid_status() {
    let client = spawn_app().await;
    let created = create_query(&client, json!({"title": "Q", "formDataId": FORM_DATA_ID})).await;
    let path = format!("/query/{}", created["id"].as_str().unwrap());

    let (status, body) = json(client.patch(&path, json!({"status": "INVALID_STATUS"})).await).await;
    assert_eq!(status, 400);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("Status must be either OPEN or RESOLVED"));
}

#[tokio::test]
async fn test_update_unknown_query() {
    let client = spawn_app().await;

    let (status, body) = json(
        client
            .patch(&format!("/query/{}", MISSING_ID), json!({"title": "x"}))
            .await,
    )
    .await;
    assert_eq!(status, 404);
    assert_eq!(body["message"], "Query not found");
}

#[tokio::test]
async fn test_delete_then_update_and_delete_are_not_found() {
    let client = spawn_app().await;
    let created = create_query(&client, json!({"title": "Q", "formDataId": FORM_DATA_ID})).await;
    let path = format!("/query/{}", created["id"].as_str().unwrap());

    let (status, body) = json(client.delete(&path).await).await;
    assert_eq!(status, 200);
    assert_eq!(body["statusCode"], 200);
    assert_eq!(body["data"]["message"], "Query deleted successfully");

    let (status, body) = json(client.patch(&path, json!({"status": "RESOLVED"})).await).await;
    assert_eq!(status, 404);
    assert_eq!(body["message"], "Query not found");

    let (status, body) = json(client.delete(&path).await).await;
    assert_eq!(status, 404);
    assert_eq!(body["message"], "Query not found");
}

#[tokio::test]
async fn test_malformed_path_id() {
    let client = spawn_app().await;

    let (status, body) = json(client.delete("/query/not-a-uuid").await).await;
    assert_eq!(status, 400);
    assert_eq!(body["statusCode"], 400);
}

//! Integration tests for the clothing item endpoints.

mod helpers;

use axum::http::StatusCode;

use wardrobe_entity::profile::Tier;

#[tokio::test]
async fn test_item_crud_flow() {
    let app = helpers::TestApp::new();
    let owner = app.create_owner(Tier::Free).await;
    let token = app.token_for(owner);

    let created = app
        .request(
            "POST",
            "/api/items",
            Some(serde_json::json!({
                "label": "denim jacket",
                "category": "tops",
                "attributes": {"color": "blue"}
            })),
            Some(&token),
        )
        .await;
    assert_eq!(created.status, StatusCode::OK, "body: {:?}", created.body);
    let item_id = created.body["data"]["id"].as_str().unwrap().to_string();

    let listed = app.request("GET", "/api/items", None, Some(&token)).await;
    assert_eq!(listed.body["data"].as_array().unwrap().len(), 1);
    assert_eq!(listed.body["data"][0]["label"], "denim jacket");

    let deleted = app
        .request(
            "DELETE",
            &format!("/api/items/{item_id}"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(deleted.status, StatusCode::OK);

    // The cached list was invalidated by the delete.
    let after = app.request("GET", "/api/items", None, Some(&token)).await;
    assert!(after.body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_empty_label_is_rejected() {
    let app = helpers::TestApp::new();
    let owner = app.create_owner(Tier::Free).await;
    let token = app.token_for(owner);

    let resp = app
        .request(
            "POST",
            "/api/items",
            Some(serde_json::json!({"label": ""})),
            Some(&token),
        )
        .await;

    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.body["error"], "VALIDATION");
}

#[tokio::test]
async fn test_delete_unknown_item_is_not_found() {
    let app = helpers::TestApp::new();
    let owner = app.create_owner(Tier::Free).await;
    let token = app.token_for(owner);

    let resp = app
        .request(
            "DELETE",
            &format!("/api/items/{}", uuid::Uuid::new_v4()),
            None,
            Some(&token),
        )
        .await;

    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_items_are_owner_scoped() {
    let app = helpers::TestApp::new();
    let owner = app.create_owner(Tier::Free).await;
    let other = app.create_owner(Tier::Free).await;

    app.request(
        "POST",
        "/api/items",
        Some(serde_json::json!({"label": "scarf"})),
        Some(&app.token_for(owner)),
    )
    .await;

    let listed = app
        .request("GET", "/api/items", None, Some(&app.token_for(other)))
        .await;
    assert!(listed.body["data"].as_array().unwrap().is_empty());
}

use super::helpers::*;
use axum::http::{Method, StatusCode};
use serde_json::json;

#[tokio::test]
async fn test_user_routes_require_token() {
    let app = test_app().await;
    let (_, id) = register(&app, "alice", "a@x.com", "pass1234").await;

    let requests = [
        (Method::GET, "/api/users".to_string()),
        (Method::POST, "/api/users".to_string()),
        (Method::GET, format!("/api/users/{id}")),
        (Method::PUT, format!("/api/users/{id}")),
        (Method::DELETE, format!("/api/users/{id}")),
    ];
    for (method, uri) in requests {
        let (status, body) = send(&app, method.clone(), &uri, None, Some(json!({}))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{method} {uri}");
        assert_eq!(body["message"], "Token is missing");
    }
}

#[tokio::test]
async fn test_update_other_user_is_forbidden() {
    let app = test_app().await;
    let (_, alice_id) = register(&app, "alice", "a@x.com", "pass1234").await;
    let (bob_token, _) = register(&app, "bob", "b@x.com", "pass1234").await;

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/users/{alice_id}"),
        Some(&bob_token),
        Some(json!({ "username": "hacked" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Permission denied");

    let (status, _) = send(
        &app,
        Method::DELETE,
        &format!("/api/users/{alice_id}"),
        Some(&bob_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/api/users/{alice_id}"),
        Some(&bob_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["username"], "alice");
}

#[tokio::test]
async fn test_update_own_profile() {
    let app = test_app().await;
    let (token, id) = register(&app, "alice", "a@x.com", "pass1234").await;
    register(&app, "bob", "b@x.com", "pass1234").await;
    let uri = format!("/api/users/{id}");

    let (status, body) = send(
        &app,
        Method::PUT,
        &uri,
        Some(&token),
        Some(json!({ "username": "bob" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "Username already exists");

    let (status, body) = send(
        &app,
        Method::PUT,
        &uri,
        Some(&token),
        Some(json!({ "email": "broken" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"], json!(["Invalid email format"]));

    let (status, body) = send(
        &app,
        Method::PUT,
        &uri,
        Some(&token),
        Some(json!({ "email": "alice@x.com", "password": "newpass99" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["email"], "alice@x.com");
    assert_eq!(body["data"]["username"], "alice");

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": "alice@x.com", "password": "newpass99" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_missing_user_is_not_found() {
    let app = test_app().await;
    let (token, _) = register(&app, "alice", "a@x.com", "pass1234").await;

    for method in [Method::GET, Method::PUT, Method::DELETE] {
        let (status, body) = send(
            &app,
            method.clone(),
            "/api/users/9999",
            Some(&token),
            Some(json!({})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{method}");
        assert_eq!(body["message"], "User not found");
    }
}

#[tokio::test]
async fn test_create_user_as_authenticated_caller() {
    let app = test_app().await;
    let (token, _) = register(&app, "alice", "a@x.com", "pass1234").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/users",
        Some(&token),
        Some(json!({ "username": "carol", "email": "c@x.com", "password": "pass1234" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["username"], "carol");
    assert!(body["data"].get("token").is_none());

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/users",
        Some(&token),
        Some(json!({ "username": "carol2", "email": "c@x.com", "password": "pass1234" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_removed_caller_cannot_mutate() {
    let app = test_app().await;
    let (token, id) = register(&app, "alice", "a@x.com", "pass1234").await;

    let (status, _) = send(
        &app,
        Method::DELETE,
        &format!("/api/users/{id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/users",
        Some(&token),
        Some(json!({ "username": "carol", "email": "c@x.com", "password": "pass1234" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "User no longer exists");
}

#[tokio::test]
async fn test_list_users_paginates() {
    let app = test_app().await;
    let (token, _) = register(&app, "alice", "a@x.com", "pass1234").await;
    for (name, email) in [("bob", "b@x.com"), ("carol", "c@x.com"), ("dave", "d@x.com")] {
        register(&app, name, email, "pass1234").await;
    }

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/users?page=2&per_page=3",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let data = &body["data"];
    assert_eq!(data["total"], 4);
    assert_eq!(data["page"], 2);
    assert_eq!(data["perPage"], 3);
    assert_eq!(data["totalPages"], 2);
    assert_eq!(data["items"].as_array().unwrap().len(), 1);
    assert_eq!(data["items"][0]["username"], "dave");

    let (_, body) = send(&app, Method::GET, "/api/users", Some(&token), None).await;
    assert_eq!(body["data"]["perPage"], 10);
    assert_eq!(body["data"]["items"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_unparseable_path_and_query_use_envelope() {
    let app = test_app().await;
    let (token, _) = register(&app, "alice", "a@x.com", "pass1234").await;

    for uri in ["/api/users/abc", "/api/users?page=-1", "/api/users?per_page=lots"] {
        let (status, body) = send(&app, Method::GET, uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["success"], false, "{uri}");
        assert!(body["message"].is_string(), "{uri}");
    }

    let (status, body) = send(&app, Method::DELETE, "/api/users/abc", Some(&token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

//! End-to-end tests for the bearer gate and directory configuration.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use reqwest::StatusCode;
use serde_json::{Value, json};

use user_directory_integration_tests::{SEED_EMAIL, SEED_PASSWORD, TestServer, test_config};

const REJECTED_HEADERS: [Option<&str>; 4] = [
    None,
    Some("InvalidFormat token"),
    Some("Bearer "),
    Some("bearer lowercase-scheme"),
];

#[tokio::test]
async fn test_protected_reads_reject_bad_headers() {
    let server = TestServer::start().await;

    for path in ["/users", "/users/1"] {
        for header in REJECTED_HEADERS {
            let response = server.get_with_authorization(path, header).await;
            assert_eq!(
                response.status(),
                StatusCode::UNAUTHORIZED,
                "path {path} header {header:?}"
            );
            let body: Value = response.json().await.unwrap();
            assert_eq!(body, json!({ "error": "Unauthorized" }));
        }
    }
}

#[tokio::test]
async fn test_gate_checks_shape_only() {
    let server = TestServer::start().await;

    let response = server
        .get_with_authorization("/users/1", Some("Bearer anything-at-all"))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_registration_open_by_default() {
    let server = TestServer::start().await;

    let response = server
        .register(&json!({ "email": "open@example.com", "password": "pw", "name": "O" }), None)
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_gated_registration_rejects_without_mutation() {
    let mut config = test_config();
    config.require_auth_for_registration = true;
    let server = TestServer::start_with(config).await;

    let body = json!({ "email": "gated@example.com", "password": "pw", "name": "G" });
    for header in REJECTED_HEADERS {
        let mut request = server.client.post(server.url("/users")).json(&body);
        if let Some(value) = header {
            request = request.header(reqwest::header::AUTHORIZATION, value);
        }
        let response = request.send().await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "header {header:?}");
    }
    assert_eq!(server.state.directory().store().len().await, 1);

    let token = server.seed_token().await;
    let response = server.register(&body, Some(&token)).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(server.state.directory().store().len().await, 2);
}

#[tokio::test]
async fn test_case_sensitive_emails_by_default() {
    let server = TestServer::start().await;

    let upper = SEED_EMAIL.to_uppercase();
    assert_eq!(
        server.login(&upper, SEED_PASSWORD).await.status(),
        StatusCode::UNAUTHORIZED
    );

    let response = server
        .register(&json!({ "email": upper, "password": "pw", "name": "Upper" }), None)
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_case_insensitive_emails_when_configured() {
    let mut config = test_config();
    config.case_insensitive_emails = true;
    let server = TestServer::start_with(config).await;

    let upper = SEED_EMAIL.to_uppercase();
    assert_eq!(server.login(&upper, SEED_PASSWORD).await.status(), StatusCode::OK);

    let response = server
        .register(&json!({ "email": upper, "password": "pw", "name": "Upper" }), None)
        .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_same_email_registrations() {
    let server = Arc::new(TestServer::start().await);

    let handles: Vec<_> = (0..6)
        .map(|i| {
            let server = Arc::clone(&server);
            tokio::spawn(async move {
                server
                    .register(
                        &json!({ "email": "race@example.com", "password": "pw", "name": format!("R{i}") }),
                        None,
                    )
                    .await
                    .status()
            })
        })
        .collect();

    let mut created = 0;
    let mut conflicts = 0;
    for handle in handles {
        let status = handle.await.unwrap();
        if status == StatusCode::CREATED {
            created += 1;
        } else if status == StatusCode::CONFLICT {
            conflicts += 1;
        } else {
            panic!("unexpected status {status}");
        }
    }

    assert_eq!(created, 1);
    assert_eq!(conflicts, 5);
    assert_eq!(server.state.directory().store().len().await, 2);
}

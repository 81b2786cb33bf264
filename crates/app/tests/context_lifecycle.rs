//! Integration tests for AppContext lifecycle
//!
//! Startup reads the configured session backend; shutdown cancels every
//! request issued through the context.

mod support;

use partnerdesk_app::AppContext;
use partnerdesk_core::SessionStore;
use partnerdesk_domain::{
    Config, PartnerDeskError, StorageBackend, StorageConfig, StoredSession, TokenPair,
};
use partnerdesk_infra::FileSessionStore;
use support::{signed_out_context, test_config};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn memory_backend_starts_signed_out() {
    let server = MockServer::start().await;

    let ctx = AppContext::new(test_config(&server)).await.unwrap();

    assert!(!ctx.tokens.is_authenticated());
    assert_eq!(ctx.config.api.base_url, server.uri());
    assert!(!ctx.cancellation_token().is_cancelled());
}

#[tokio::test]
async fn file_backend_restores_previous_session() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let session_path = dir.path().join("session.json");

    FileSessionStore::new(session_path.clone())
        .save(&StoredSession {
            tokens: Some(TokenPair::new("access-1", Some("refresh-1".to_string()))),
            remembered_phone: Some("9876543210".to_string()),
        })
        .await
        .unwrap();

    let config = Config {
        storage: StorageConfig { backend: StorageBackend::File, path: Some(session_path) },
        ..test_config(&server)
    };
    let ctx = AppContext::new(config).await.unwrap();

    assert!(ctx.tokens.is_authenticated());
    assert_eq!(ctx.tokens.access_token().as_deref(), Some("access-1"));
    assert_eq!(ctx.tokens.snapshot().remembered_phone.as_deref(), Some("9876543210"));
}

#[tokio::test]
async fn corrupt_session_file_fails_startup() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let session_path = dir.path().join("session.json");
    std::fs::write(&session_path, "{not json").unwrap();

    let config = Config {
        storage: StorageConfig { backend: StorageBackend::File, path: Some(session_path) },
        ..test_config(&server)
    };
    let result = AppContext::new(config).await;

    assert!(matches!(result, Err(PartnerDeskError::Storage(_))));
}

#[tokio::test]
async fn shutdown_cancels_requests() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/check-hotel"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": {"name": "Hotel Sunrise", "isFirstLogin": false}
        })))
        .expect(0)
        .mount(&server)
        .await;

    let ctx = signed_out_context(&server);
    ctx.shutdown();

    let err = partnerdesk_app::commands::check_hotel(&ctx, Some("9876543210")).await.unwrap_err();

    assert!(ctx.cancellation_token().is_cancelled());
    assert_eq!(err, PartnerDeskError::Cancelled);
}

//! Signup, login, logout and route guarding against the fake API.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::sync::Arc;

use serde_json::json;

use shopfront_integration_tests::{FakeApi, RecordingNotifier, StatusCode, token_for};
use shopfront_storefront::pages::{LoginForm, SignupForm, login, signup};
use shopfront_storefront::storage::{FileStore, KeyValueStore, MemoryStore, keys};
use shopfront_storefront::{AppError, Route};

fn login_form(email: &str, password: &str) -> LoginForm {
    LoginForm {
        email: email.to_string(),
        password: password.to_string(),
    }
}

#[tokio::test]
async fn test_signup_then_login_then_logout() {
    let api = FakeApi::start().await;
    let (mut ctx, storage) = api.context();
    let notifier = RecordingNotifier::new();

    let form = SignupForm {
        name: "Ada".to_string(),
        email: "ada@example.com".to_string(),
        password: "secret".to_string(),
    };
    let next = signup::submit(&ctx, &form, &notifier).await.unwrap();
    assert_eq!(next, Route::Login);
    assert_eq!(notifier.last().as_deref(), Some("Signup successful! Redirecting to login..."));

    let next = login::submit(&mut ctx, &login_form("ada@example.com", "secret"), &notifier)
        .await
        .unwrap();
    assert_eq!(next, Route::Products);
    assert!(storage.get(keys::TOKEN).unwrap().is_some());
    assert_eq!(ctx.session().claims().unwrap().name.as_deref(), Some("Ada"));
    assert_eq!(ctx.navigate(Route::Products).unwrap(), Route::Products);

    let next = login::logout(&mut ctx).unwrap();
    assert_eq!(next, Route::Login);
    assert!(storage.get(keys::TOKEN).unwrap().is_none());
    assert_eq!(ctx.navigate(Route::Products).unwrap(), Route::Login);
}

#[tokio::test]
async fn test_duplicate_signup_shows_server_message() {
    let api = FakeApi::start().await;
    api.add_user("Ada", "ada@example.com", "secret", "customer");
    let (ctx, _) = api.context();
    let notifier = RecordingNotifier::new();

    let form = SignupForm {
        name: "Ada".to_string(),
        email: "ada@example.com".to_string(),
        password: "secret".to_string(),
    };
    let err = signup::submit(&ctx, &form, &notifier).await.unwrap_err();
    assert!(matches!(err, AppError::Api(_)));
    assert_eq!(notifier.notices(), ["User already exists"]);
}

#[tokio::test]
async fn test_invalid_signup_email_never_reaches_server() {
    let api = FakeApi::start().await;
    let (ctx, _) = api.context();
    let notifier = RecordingNotifier::new();

    let form = SignupForm {
        name: "Ada".to_string(),
        email: "ada.example.com".to_string(),
        password: "secret".to_string(),
    };
    assert!(signup::submit(&ctx, &form, &notifier).await.is_err());
    assert!(api.calls().is_empty());
    assert_eq!(notifier.notices().len(), 1);
}

#[tokio::test]
async fn test_wrong_password_keeps_session_empty() {
    let api = FakeApi::start().await;
    api.add_user("Ada", "ada@example.com", "secret", "customer");
    let (mut ctx, storage) = api.context();
    let notifier = RecordingNotifier::new();

    let result = login::submit(&mut ctx, &login_form("ada@example.com", "nope"), &notifier).await;
    assert!(result.is_err());
    assert_eq!(notifier.notices(), ["Invalid credentials"]);
    assert!(!ctx.session().is_authenticated());
    assert!(storage.get(keys::TOKEN).unwrap().is_none());
}

#[tokio::test]
async fn test_login_failure_without_message_uses_fallback() {
    let api = FakeApi::start().await;
    api.fail_next("POST", "/auth/login", StatusCode::INTERNAL_SERVER_ERROR, None);
    let (mut ctx, _) = api.context();
    let notifier = RecordingNotifier::new();

    let result = login::submit(&mut ctx, &login_form("ada@example.com", "secret"), &notifier).await;
    assert!(result.is_err());
    assert_eq!(notifier.notices(), ["Login failed"]);
}

#[tokio::test]
async fn test_undecodable_login_token_clears_session() {
    let api = FakeApi::start().await;
    api.add_user("Ada", "ada@example.com", "secret", "customer");
    api.override_login_token("not-a-jwt");
    let (mut ctx, storage) = api.context();
    let notifier = RecordingNotifier::new();

    let err = login::submit(&mut ctx, &login_form("ada@example.com", "secret"), &notifier)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Session(_)));
    assert!(!ctx.session().is_authenticated());
    assert!(ctx.session().claims().is_none());
    assert!(storage.get(keys::TOKEN).unwrap().is_none());
    assert_eq!(notifier.notices(), ["Login failed"]);
}

#[tokio::test]
async fn test_bearer_token_follows_session() {
    let api = FakeApi::start().await;
    api.add_user("Ada", "ada@example.com", "secret", "customer");
    let (mut ctx, storage) = api.context();
    let notifier = RecordingNotifier::new();

    login::submit(&mut ctx, &login_form("ada@example.com", "secret"), &notifier)
        .await
        .unwrap();
    let token = storage.get(keys::TOKEN).unwrap().unwrap();

    ctx.api().list_products().await.unwrap();
    login::logout(&mut ctx).unwrap();
    ctx.api().list_products().await.unwrap();

    let calls = api.calls();
    assert_eq!(calls.len(), 3);
    assert_eq!(calls[0].bearer, None);
    assert_eq!(calls[1].bearer.as_deref(), Some(token.as_str()));
    assert_eq!(calls[2].bearer, None);
    assert!(
        calls
            .iter()
            .all(|c| c.content_type.as_deref() == Some("application/json"))
    );
}

#[tokio::test]
async fn test_session_survives_restart_in_file_store() {
    let api = FakeApi::start().await;
    api.add_user("Ada", "ada@example.com", "secret", "customer");
    let dir = tempfile::tempdir().unwrap();
    let notifier = RecordingNotifier::new();

    {
        let mut ctx = api.context_with(Arc::new(FileStore::new(dir.path())));
        login::submit(&mut ctx, &login_form("ada@example.com", "secret"), &notifier)
            .await
            .unwrap();
    }

    let mut ctx = api.context_with(Arc::new(FileStore::new(dir.path())));
    assert!(ctx.session().is_authenticated());
    assert_eq!(ctx.navigate(Route::Orders).unwrap(), Route::Orders);
}

#[tokio::test]
async fn test_expired_persisted_token_is_discarded() {
    let api = FakeApi::start().await;
    let expired = token_for(&json!({"id": "u1", "name": "Ada", "role": "admin", "exp": 1}));
    let storage = Arc::new(MemoryStore::with_entries([(keys::TOKEN, expired.as_str())]));

    let mut ctx = api.context_with(storage.clone());
    assert!(!ctx.session().is_authenticated());
    assert!(storage.get(keys::TOKEN).unwrap().is_none());
    assert_eq!(ctx.navigate(Route::Admin).unwrap(), Route::Login);
}

#[tokio::test]
async fn test_customer_is_kept_out_of_admin_pages() {
    let api = FakeApi::start().await;
    api.add_user("Ada", "ada@example.com", "secret", "customer");
    let (mut ctx, _) = api.context();
    let notifier = RecordingNotifier::new();

    login::submit(&mut ctx, &login_form("ada@example.com", "secret"), &notifier)
        .await
        .unwrap();
    api.clear_calls();

    assert_eq!(ctx.navigate(Route::Admin).unwrap(), Route::Products);
    assert_eq!(ctx.navigate(Route::AdminAddProduct).unwrap(), Route::Products);
    assert_eq!(ctx.navigate(Route::from_path("/nowhere")).unwrap(), Route::Login);
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn test_admin_reaches_admin_pages() {
    let api = FakeApi::start().await;
    api.add_user("Grace", "grace@example.com", "secret", "admin");
    let (mut ctx, _) = api.context();
    let notifier = RecordingNotifier::new();

    login::submit(&mut ctx, &login_form("grace@example.com", "secret"), &notifier)
        .await
        .unwrap();
    assert!(ctx.session().is_admin());
    assert_eq!(ctx.navigate(Route::Admin).unwrap(), Route::Admin);
    assert_eq!(ctx.navigate(Route::AdminAddProduct).unwrap(), Route::AdminAddProduct);
}

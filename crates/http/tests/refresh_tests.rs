//! Tests for the refresh-and-retry decorator

use mockall::Sequence;
use serde_json::json;
use std::sync::Arc;
use wicket_core::store::mock::MockCredentialStore;
use wicket_core::{CoreError, CredentialStore, Credentials, MemoryCredentialStore};
use wicket_http::client::{error::ClientError, ApiClient, RefreshingClient};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn stale_pair() -> Credentials {
    Credentials {
        access_token: "stale-access".to_string(),
        refresh_token: "stale-refresh".to_string(),
    }
}

fn seeded_store() -> Arc<MemoryCredentialStore> {
    let store = MemoryCredentialStore::new();
    store.save(&stale_pair()).unwrap();
    Arc::new(store)
}

fn decorated(server: &MockServer, store: Arc<dyn CredentialStore>) -> RefreshingClient {
    let inner = ApiClient::builder()
        .base_url(server.uri())
        .store(store)
        .build()
        .unwrap();
    RefreshingClient::new(inner)
}

async fn mount_refresh_success(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .and(body_json(json!({
            "refreshToken": "stale-refresh",
            "expiresInMins": 30
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "accessToken": "fresh-access",
            "refreshToken": "fresh-refresh"
        })))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn a_401_triggers_one_refresh_and_one_replay() {
    let server = MockServer::start().await;
    let store = seeded_store();

    // First attempt carries the stale token and is rejected
    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .and(header("authorization", "Bearer stale-access"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"message": "Token Expired!"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    mount_refresh_success(&server).await;

    // The replay must carry the rewritten authorization header
    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .and(header("authorization", "Bearer fresh-access"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "firstName": "Emily",
            "lastName": "Johnson"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = decorated(&server, store.clone());
    let user = client.current_user().await.unwrap();
    assert_eq!(user.first_name, "Emily");
    assert_eq!(user.last_name, "Johnson");

    // The stored pair was overwritten wholesale
    let stored = store.load().unwrap().unwrap();
    assert_eq!(stored.access_token, "fresh-access");
    assert_eq!(stored.refresh_token, "fresh-refresh");
}

#[tokio::test]
async fn a_second_consecutive_401_surfaces_instead_of_looping() {
    let server = MockServer::start().await;

    // Both the original attempt and the replay are rejected
    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"message": "Token Expired!"})),
        )
        .expect(2)
        .mount(&server)
        .await;

    mount_refresh_success(&server).await;

    let client = decorated(&server, seeded_store());

    let result = client.current_user().await;
    assert!(matches!(result, Err(ClientError::AuthenticationFailed(_))));
}

#[tokio::test]
async fn a_failed_refresh_propagates_the_original_error() {
    let server = MockServer::start().await;
    let store = seeded_store();

    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"message": "Token Expired!"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ResponseTemplate::new(500).set_body_string("refresh unavailable"))
        .expect(1)
        .mount(&server)
        .await;

    let client = decorated(&server, store.clone());

    match client.current_user().await {
        Err(ClientError::AuthenticationFailed(message)) => {
            assert_eq!(message, "Token Expired!")
        }
        other => panic!("expected the original 401, got {other:?}"),
    }

    // The stale pair is untouched
    assert_eq!(store.load().unwrap().unwrap(), stale_pair());
}

#[tokio::test]
async fn non_auth_failures_pass_through_untouched() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = decorated(&server, seeded_store());

    let result = client.current_user().await;
    assert!(matches!(
        result,
        Err(ClientError::ServerError { status: 500, .. })
    ));
}

#[tokio::test]
async fn double_activation_still_retries_only_once() {
    let server = MockServer::start().await;
    let store = seeded_store();

    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .and(header("authorization", "Bearer stale-access"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"message": "Token Expired!"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    mount_refresh_success(&server).await;

    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .and(header("authorization", "Bearer fresh-access"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "firstName": "Emily",
            "lastName": "Johnson"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let inner = ApiClient::builder()
        .base_url(server.uri())
        .store(store)
        .build()
        .unwrap();

    // An over-eager caller constructing the decorator twice gets two handles
    // to the same single-retry behavior, not a retry per activation
    let _first = RefreshingClient::new(inner.clone());
    let second = RefreshingClient::new(inner);

    let user = second.current_user().await.unwrap();
    assert_eq!(user.first_name, "Emily");
}

#[tokio::test]
async fn a_store_failure_during_refresh_suppresses_the_retry() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"message": "Token Expired!"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    // First load builds the original request; the second, inside refresh,
    // fails. No save may happen.
    let mut seq = Sequence::new();
    let mut store = MockCredentialStore::new();
    store
        .expect_load()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|| Ok(Some(stale_pair())));
    store
        .expect_load()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|| Err(CoreError::store_error("backend gone")));

    let client = decorated(&server, Arc::new(store));

    let result = client.current_user().await;
    assert!(matches!(result, Err(ClientError::AuthenticationFailed(_))));
}

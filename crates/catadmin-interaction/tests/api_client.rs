use std::sync::{Arc, Mutex};
use std::time::Duration;

use catadmin_core::attribute::{CategoryAttributeApi, CategoryAttributePayload};
use catadmin_core::category::CategoryApi;
use catadmin_core::error::AdminError;
use catadmin_core::storage::{ABILITIES_KEY, KeyValueStore, TOKEN_KEY};
use catadmin_core::user::UserApi;
use catadmin_core::{InMemoryKeyValueStore, Navigator, Route, SessionHandle, SessionStore};
use catadmin_interaction::ApiClient;
use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Default)]
struct RecordingNavigator {
    visited: Mutex<Vec<Route>>,
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        self.visited.lock().unwrap().push(route);
    }
}

fn signed_in_store() -> InMemoryKeyValueStore {
    InMemoryKeyValueStore::with_entries([(TOKEN_KEY, "t1"), (ABILITIES_KEY, r#"["admin"]"#)])
}

fn client_for(server: &MockServer, store: &InMemoryKeyValueStore) -> ApiClient {
    let handle = SessionHandle::hydrate(Arc::new(store.clone()));
    ApiClient::new(server.uri(), Duration::from_secs(5), handle).unwrap()
}

#[tokio::test]
async fn test_attaches_bearer_token_and_content_type() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/categories"))
        .and(header("authorization", "Bearer t1"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {"id": 1, "parent_id": null, "name": "Vehicles", "sort": 1, "status": 1},
                {"id": 2, "parent_id": 1, "name": "Cars", "sort": 0, "status": "1"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, &signed_in_store());
    let categories = client.list_categories().await.unwrap();

    assert_eq!(categories.len(), 2);
    assert_eq!(categories[1].parent(), Some(1));
    assert!(categories[1].status);
}

#[tokio::test]
async fn test_omits_authorization_without_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .mount(&server)
        .await;

    let client = client_for(&server, &InMemoryKeyValueStore::new());
    let users = client.list_users().await.unwrap();
    assert!(users.is_empty());

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].headers.get("authorization").is_none());
    assert_eq!(
        requests[0].headers.get("content-type").unwrap(),
        "application/json"
    );
}

#[tokio::test]
async fn test_missing_data_is_empty_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"meta": {}})))
        .mount(&server)
        .await;

    let client = client_for(&server, &signed_in_store());
    assert!(client.list_users().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unauthorized_clears_session_and_navigates_to_login() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/users"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"message": "Unauthenticated."})),
        )
        .mount(&server)
        .await;

    let store = signed_in_store();
    let navigator = Arc::new(RecordingNavigator::default());
    let client = client_for(&server, &store).with_navigator(navigator.clone());
    assert!(client.session().has_ability("admin"));

    let err = client.list_users().await.unwrap_err();

    assert!(err.is_unauthenticated());
    assert_eq!(client.session().token(), "");
    assert!(!client.session().has_ability("admin"));
    assert_eq!(store.get(TOKEN_KEY).unwrap(), None);
    assert_eq!(store.get(ABILITIES_KEY).unwrap(), None);
    assert_eq!(*navigator.visited.lock().unwrap(), vec![Route::Login]);
}

/// Answers one request with a 401 whose body ends before its declared length.
async fn truncated_unauthorized_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = [0u8; 4096];
        let _ = socket.read(&mut request).await;
        socket
            .write_all(
                b"HTTP/1.1 401 Unauthorized\r\ncontent-type: application/json\r\ncontent-length: 64\r\n\r\n{\"mess",
            )
            .await
            .unwrap();
        socket.shutdown().await.unwrap();
    });
    format!("http://{}", addr)
}

#[tokio::test]
async fn test_unauthorized_with_unreadable_body_still_signs_out() {
    let base_url = truncated_unauthorized_server().await;
    let store = signed_in_store();
    let handle = SessionHandle::hydrate(Arc::new(store.clone()));
    let navigator = Arc::new(RecordingNavigator::default());
    let client = ApiClient::new(base_url, Duration::from_secs(5), handle)
        .unwrap()
        .with_navigator(navigator.clone());

    let err = client.list_users().await.unwrap_err();

    assert!(err.is_unauthenticated());
    assert_eq!(client.session().token(), "");
    assert_eq!(store.get(TOKEN_KEY).unwrap(), None);
    assert_eq!(*navigator.visited.lock().unwrap(), vec![Route::Login]);
}

#[tokio::test]
async fn test_backend_error_message_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/admin/categories/4"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "error": {"message": "Category has children"}
        })))
        .mount(&server)
        .await;

    let store = signed_in_store();
    let client = client_for(&server, &store);
    let err = client.delete_category(4).await.unwrap_err();

    match err {
        AdminError::Api { status, ref message } => {
            assert_eq!(status, 422);
            assert_eq!(message, "Category has children");
        }
        other => panic!("unexpected error: {:?}", other),
    }
    // Non-401 failures leave the session alone
    assert_eq!(client.session().token(), "t1");
    assert_eq!(store.get(TOKEN_KEY).unwrap().as_deref(), Some("t1"));
}

#[tokio::test]
async fn test_transport_failure_is_network_error() {
    let handle = SessionHandle::hydrate(Arc::new(signed_in_store()));
    let client = ApiClient::new("http://127.0.0.1:1", Duration::from_secs(2), handle).unwrap();

    let err = client.list_categories().await.unwrap_err();
    assert!(err.is_network(), "unexpected error: {:?}", err);
}

#[tokio::test]
async fn test_update_sort_sends_sort_body() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/admin/categories/7/sort"))
        .and(body_json(json!({"sort": 5})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, &signed_in_store());
    client.update_sort(7, 5).await.unwrap();
}

#[tokio::test]
async fn test_get_category_without_data_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/categories/9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": null})))
        .mount(&server)
        .await;

    let client = client_for(&server, &signed_in_store());
    let err = client.get_category(9).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_category_attribute_routes() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/admin/categories/3/attributes"))
        .and(body_json(json!({
            "attribute_id": 12,
            "is_required": true,
            "show_in_filter": false,
            "unique_per_listing": false,
            "sort_order": 1
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"data": {"id": 40}})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/admin/categories/3/attributes/12"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/admin/category-attributes/40"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, &signed_in_store());
    let payload = CategoryAttributePayload {
        attribute_id: 12,
        is_required: true,
        sort_order: 1,
        ..CategoryAttributePayload::default()
    };
    client.attach_attribute(3, &payload).await.unwrap();
    client.detach_attribute(3, 12).await.unwrap();
    client.delete_category_attribute(40).await.unwrap();
}

#[tokio::test]
async fn test_login_persists_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({"email": "a@b.c", "password": "secret"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "token": "7|xyz",
                "abilities": ["admin"],
                "user": {"id": 1, "name": "Ana", "email": "a@b.c", "abilities": ["admin"]}
            }
        })))
        .mount(&server)
        .await;

    let store = InMemoryKeyValueStore::new();
    let client = client_for(&server, &store);
    let session = SessionStore::new(client.session().clone(), Arc::new(client.clone()));

    session.login("a@b.c", "secret").await.unwrap();

    assert!(session.has_ability("admin"));
    assert_eq!(session.session().user.map(|u| u.id), Some(1));
    assert_eq!(store.get(TOKEN_KEY).unwrap().as_deref(), Some("7|xyz"));
    assert_eq!(store.get(ABILITIES_KEY).unwrap().as_deref(), Some(r#"["admin"]"#));
}

#[tokio::test]
async fn test_invalid_credentials_leave_session_untouched() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "error": {"message": "Invalid credentials"}
        })))
        .mount(&server)
        .await;

    let store = InMemoryKeyValueStore::new();
    let client = client_for(&server, &store);
    let session = SessionStore::new(client.session().clone(), Arc::new(client.clone()));

    let err = session.login("a@b.c", "wrong").await.unwrap_err();

    assert_eq!(err.display_message("Login failed"), "Invalid credentials");
    assert!(!session.session().is_authenticated());
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_logout_clears_even_when_backend_fails() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/logout"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let store = signed_in_store();
    let client = client_for(&server, &store);
    let session = SessionStore::new(client.session().clone(), Arc::new(client.clone()));

    session.logout().await.unwrap();

    assert!(!session.session().is_authenticated());
    assert!(store.is_empty());
}

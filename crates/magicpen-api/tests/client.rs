//! HTTP behaviour of the API client against a mock backend.

use magicpen_api::{
    ApiClient, ApiConfig, Credentials, Method, PostAllowance, Registration, RequestDescriptor,
    FALLBACK_ERROR_MESSAGE,
};
use magicpen_session::SessionStore;
use magicpen_storage::Database;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Helper: a client with an empty in-memory session pointing at `server`.
fn test_client(server: &MockServer) -> ApiClient {
    let session = SessionStore::new(Database::open_in_memory().unwrap());
    ApiClient::new(ApiConfig::new(format!("{}/api", server.uri())), session)
}

fn history_body() -> serde_json::Value {
    json!({
        "success": true,
        "posts": [
            {
                "id": "p1",
                "prompt": "launch day",
                "tone": "Founder",
                "content": "Today we launch.",
                "createdAt": "2024-05-01T09:30:00.000Z"
            },
            {
                "id": "p2",
                "prompt": "pricing",
                "tone": "Freelancer",
                "content": "Charge more.",
                "createdAt": "2024-05-02T10:00:00.000Z"
            }
        ],
        "count": 2
    })
}

#[tokio::test]
async fn anonymous_requests_omit_authorization() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/posts/history"))
        .respond_with(ResponseTemplate::new(200).set_body_json(history_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    client.get_post_history().await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].headers.get("authorization").is_none());
    assert_eq!(
        requests[0].headers.get("content-type").unwrap(),
        "application/json"
    );
}

#[tokio::test]
async fn session_token_is_sent_as_bearer() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .and(header("authorization", "Bearer T"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "user": { "id": "u1", "name": "Ada", "email": "ada@example.com" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    client.session().set("T");

    let me = client.get_me().await.unwrap();
    assert!(me.success);
    assert_eq!(me.user.unwrap().name, "Ada");
}

#[tokio::test]
async fn login_with_token_establishes_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({ "email": "ada@example.com", "password": "pw" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "token": "T",
            "user": { "id": "u1", "name": "Ada", "email": "ada@example.com" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let response = client
        .login(&Credentials {
            email: "ada@example.com".to_string(),
            password: "pw".to_string(),
        })
        .await
        .unwrap();

    assert!(response.success);
    assert_eq!(client.session().get().as_deref(), Some("T"));
}

#[tokio::test]
async fn login_without_token_leaves_session_alone() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "success": false, "message": "Verify your email" })),
        )
        .mount(&server)
        .await;

    let client = test_client(&server);
    let response = client
        .login(&json!({ "email": "a@b.c", "password": "pw" }))
        .await
        .unwrap();

    assert!(!response.success);
    assert_eq!(response.message.as_deref(), Some("Verify your email"));
    assert_eq!(client.session().get(), None);
}

#[tokio::test]
async fn logout_makes_no_network_call() {
    let server = MockServer::start().await;
    let client = test_client(&server);
    client.session().set("T");

    client.logout();

    assert_eq!(client.session().get(), None);
    let requests = server.received_requests().await.unwrap();
    assert!(requests.is_empty());
}

#[tokio::test]
async fn requests_after_logout_are_anonymous() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/posts/history"))
        .respond_with(ResponseTemplate::new(200).set_body_json(history_body()))
        .mount(&server)
        .await;

    let client = test_client(&server);
    client.session().set("T");
    client.get_post_history().await.unwrap();
    client.logout();
    client.get_post_history().await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].headers.get("authorization").unwrap(), "Bearer T");
    assert!(requests[1].headers.get("authorization").is_none());
}

#[tokio::test]
async fn error_status_uses_body_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "success": false, "message": "X" })),
        )
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client
        .login(&json!({ "email": "a@b.c", "password": "bad" }))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "X");
    assert_eq!(err.status(), Some(401));
    assert_eq!(client.session().get(), None);
}

#[tokio::test]
async fn error_status_without_message_uses_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/posts/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "success": false })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client.get_post("missing").await.unwrap_err();

    assert_eq!(err.message(), FALLBACK_ERROR_MESSAGE);
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn invalid_json_is_a_failure_not_an_empty_result() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/posts/history"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/posts/p1"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let client = test_client(&server);

    let err = client.get_post_history().await.unwrap_err();
    assert_ne!(err.message(), FALLBACK_ERROR_MESSAGE);
    assert!(!err.message().is_empty());

    // Parse failure wins over the status fallback
    let err = client.delete_post("p1").await.unwrap_err();
    assert_ne!(err.message(), FALLBACK_ERROR_MESSAGE);
    assert_eq!(err.status(), Some(502));
}

#[tokio::test]
async fn transport_failure_is_request_failed() {
    // Nothing listens on port 1
    let client = ApiClient::new(
        ApiConfig::new("http://127.0.0.1:1/api"),
        SessionStore::detached(),
    );
    let err = client.get_me().await.unwrap_err();

    assert_eq!(err.status(), None);
    assert!(!err.message().is_empty());
}

#[tokio::test]
async fn generate_post_sends_prompt_and_tone() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/posts/generate"))
        .and(body_json(json!({ "prompt": "hello", "tone": "Professional" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "success": true,
            "post": {
                "id": "p9",
                "prompt": "hello",
                "tone": "Professional",
                "content": "Hello, network.",
                "createdAt": "2024-05-03T08:00:00.000Z"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let response = client.generate_post("hello", "Professional").await.unwrap();

    assert!(response.success);
    assert_eq!(response.post.unwrap().content, "Hello, network.");

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method.as_str(), "POST");
}

#[tokio::test]
async fn history_reads_are_idempotent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/posts/history"))
        .respond_with(ResponseTemplate::new(200).set_body_json(history_body()))
        .expect(2)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let first = client.get_post_history().await.unwrap();
    let second = client.get_post_history().await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first.count, 2);
    assert_eq!(first.posts[0].tone, "Founder");
}

#[tokio::test]
async fn register_get_and_delete_hit_their_routes() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/register"))
        .and(body_json(json!({
            "name": "Ada",
            "email": "ada@example.com",
            "password": "pw"
        })))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!({ "success": true, "message": "Registered" })),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/posts/p1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "post": { "id": "p1", "prompt": "a", "tone": "Founder", "content": "b" }
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/posts/p1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);

    let registered = client
        .register(&Registration {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password: "pw".to_string(),
        })
        .await
        .unwrap();
    assert!(registered.success);
    // Registration never establishes a session
    assert_eq!(client.session().get(), None);

    let post = client.get_post("p1").await.unwrap();
    assert_eq!(post.post.unwrap().id, "p1");

    let deleted = client.delete_post("p1").await.unwrap();
    assert!(deleted.success);
}

#[tokio::test]
async fn execute_returns_body_unchanged() {
    let server = MockServer::start().await;
    let body = json!({ "success": true, "extra": { "nested": [1, 2, 3] } });
    Mock::given(method("PATCH"))
        .and(path("/api/custom"))
        .and(header("x-client", "cli"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let descriptor = RequestDescriptor::new(Method::PATCH, "/custom")
        .with_body(json!({ "a": 1 }))
        .with_header("X-Client", "cli");

    let data = client.execute(descriptor).await.unwrap();
    assert_eq!(data, body);
}

#[tokio::test]
async fn user_allowance_from_me() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "user": {
                "id": "u1",
                "name": "Ada",
                "email": "ada@example.com",
                "accountType": "free",
                "postLimit": 5,
                "postsGenerated": 2
            }
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let user = client.get_me().await.unwrap().user.unwrap();
    assert_eq!(user.allowance(), PostAllowance::Remaining(3));
}

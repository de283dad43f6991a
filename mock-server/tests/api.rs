use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, Status};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn form_request(uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            http::header::CONTENT_TYPE,
            "application/x-www-form-urlencoded",
        )
        .body(body.to_string())
        .unwrap()
}

fn get_request(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

// --- update ---

#[tokio::test]
async fn update_returns_created_status() {
    let resp = app()
        .oneshot(form_request(
            "/api/statuses/update.json?apikey=alice",
            "status=Hello+Qaiku&lang=fi&source=tests&channel=rust",
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let status: Status = body_json(resp).await;
    assert_eq!(status.text, "Hello Qaiku");
    assert_eq!(status.lang, "fi");
    assert_eq!(status.source, "tests");
    assert_eq!(status.channel.as_deref(), Some("rust"));
    assert_eq!(status.user.screen_name, "alice");
    assert!(!status.id.is_empty());
}

#[tokio::test]
async fn update_without_apikey_returns_401() {
    let resp = app()
        .oneshot(form_request("/api/statuses/update.json", "status=hi"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn update_with_empty_status_returns_400() {
    let resp = app()
        .oneshot(form_request("/api/statuses/update.json?apikey=alice", "status="))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_replying_to_unknown_status_returns_404() {
    let resp = app()
        .oneshot(form_request(
            "/api/statuses/update.json?apikey=alice",
            "status=hi&in_reply_to_status_id=nope",
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- show ---

#[tokio::test]
async fn show_unknown_returns_404() {
    let resp = app()
        .oneshot(get_request("/api/statuses/show/missing.json?apikey=alice"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn show_without_json_suffix_returns_404() {
    let resp = app()
        .oneshot(get_request("/api/statuses/show/missing?apikey=alice"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn show_without_apikey_returns_401() {
    let resp = app()
        .oneshot(get_request("/api/statuses/show/missing.json"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(body_bytes(resp).await.is_empty());
}

// --- post, show, reply ---

#[tokio::test]
async fn post_show_reply_lifecycle() {
    use tower::Service;

    let mut app = app().into_service();

    // post
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(form_request(
            "/api/statuses/update.json?apikey=alice",
            "status=first",
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let first: Status = body_json(resp).await;

    // show
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get_request(&format!(
            "/api/statuses/show/{}.json?apikey=bob",
            first.id
        )))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: Status = body_json(resp).await;
    assert_eq!(fetched, first);

    // reply from another account
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(form_request(
            "/api/statuses/update.json?apikey=bob",
            &format!("status=reply&in_reply_to_status_id={}", first.id),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let reply: Status = body_json(resp).await;
    assert_eq!(reply.in_reply_to_status_id.as_deref(), Some(first.id.as_str()));
    assert_eq!(reply.in_reply_to_user_id.as_deref(), Some("u-alice"));
    assert_eq!(reply.user.id, "u-bob");
}

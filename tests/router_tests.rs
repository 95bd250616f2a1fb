//! End-to-end routing over a real TCP listener.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use axum::http::StatusCode;
use trie_router::{Dispatcher, RequestContext};

mod common;

#[tokio::test]
async fn test_root_is_not_found_without_handler() {
    let (addr, shutdown) = common::start_server(Dispatcher::new()).await;

    let res = common::client()
        .get(format!("http://{}", addr))
        .send()
        .await
        .expect("server unreachable");
    assert_eq!(res.status(), 404);
    assert_eq!(res.text().await.unwrap(), "Not Found");

    shutdown.trigger();
}

#[tokio::test]
async fn test_get_and_post_on_same_path() {
    let get_called = Arc::new(AtomicBool::new(false));
    let post_called = Arc::new(AtomicBool::new(false));

    let mut dispatcher = Dispatcher::new();
    let flag = get_called.clone();
    dispatcher.get("/", |_ctx: RequestContext| async { "home" });
    dispatcher.get("/api/v1/users", move |_ctx: RequestContext| {
        flag.store(true, Ordering::SeqCst);
        async { "list" }
    });
    let flag = post_called.clone();
    dispatcher.post("/api/v1/users", move |_ctx: RequestContext| {
        flag.store(true, Ordering::SeqCst);
        async { (StatusCode::CREATED, "created") }
    });

    let (addr, shutdown) = common::start_server(dispatcher).await;
    let client = common::client();

    let res = client.get(format!("http://{}/", addr)).send().await.unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.text().await.unwrap(), "home");

    let res = client.get(format!("http://{}/api/v1/users", addr)).send().await.unwrap();
    assert_eq!(res.status(), 200);
    assert!(get_called.load(Ordering::SeqCst));

    let res = client.post(format!("http://{}/api/v1/users", addr)).send().await.unwrap();
    assert_eq!(res.status(), 201);
    assert!(post_called.load(Ordering::SeqCst));

    let res = client.patch(format!("http://{}/api/v1/users", addr)).send().await.unwrap();
    assert_eq!(res.status(), 405);
    assert_eq!(res.headers()["allow"], "GET, POST");

    let res = client.get(format!("http://{}/not-found", addr)).send().await.unwrap();
    assert_eq!(res.status(), 404);

    shutdown.trigger();
}

#[tokio::test]
async fn test_path_parameter_and_query() {
    let seen: Arc<Mutex<Option<(String, String)>>> = Arc::default();

    let mut dispatcher = Dispatcher::new();
    let slot = seen.clone();
    dispatcher.get("/api/v1/users/:id", move |ctx: RequestContext| {
        let id = ctx.param("id").unwrap_or_default().to_string();
        let query = ctx.query().to_string();
        *slot.lock().unwrap() = Some((id, query));
        async { StatusCode::OK }
    });

    let (addr, shutdown) = common::start_server(dispatcher).await;

    let res = common::client()
        .get(format!("http://{}/api/v1/users/123?name=John&age=25", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);

    let (id, query) = seen.lock().unwrap().clone().unwrap();
    assert_eq!(id, "123");
    assert_eq!(query, "name=John&age=25");

    shutdown.trigger();
}

#[tokio::test]
async fn test_wildcard_extension() {
    let mut dispatcher = Dispatcher::new();
    dispatcher.get("/api/v1/files/*.css", |ctx: RequestContext| async move {
        ctx.filename().unwrap_or_default().to_string()
    });

    let (addr, shutdown) = common::start_server(dispatcher).await;
    let client = common::client();

    let res = client
        .get(format!("http://{}/api/v1/files/styles.css", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.text().await.unwrap(), "styles.css");

    let res = client
        .get(format!("http://{}/api/v1/files/styles.js", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 404);

    shutdown.trigger();
}

#[tokio::test]
async fn test_request_id_is_assigned_and_propagated() {
    let mut dispatcher = Dispatcher::new();
    dispatcher.get("/whoami", |ctx: RequestContext| async move {
        ctx.request_id().unwrap_or("missing").to_string()
    });

    let (addr, shutdown) = common::start_server(dispatcher).await;
    let client = common::client();

    let res = client.get(format!("http://{}/whoami", addr)).send().await.unwrap();
    let header = res.headers()["x-request-id"].to_str().unwrap().to_string();
    assert_eq!(res.text().await.unwrap(), header);
    assert_ne!(header, "missing");

    let res = client
        .get(format!("http://{}/whoami", addr))
        .header("x-request-id", "given-id")
        .send()
        .await
        .unwrap();
    assert_eq!(res.headers()["x-request-id"], "given-id");
    assert_eq!(res.text().await.unwrap(), "given-id");

    shutdown.trigger();
}

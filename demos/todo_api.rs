//! In-memory todo API on top of the trie router.
//!
//! ```text
//! POST   /todos       create (JSON body)
//! GET    /todos       list
//! GET    /todos/:id   fetch one
//! PATCH  /todos/:id   merge fields (JSON body)
//! DELETE /todos/:id   remove
//! ```
//!
//! Run with `cargo run --example todo_api`; `cargo test --example todo_api`
//! runs its tests.

use std::collections::HashMap;
use std::sync::Arc;

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use uuid::Uuid;

use trie_router::lifecycle::signals;
use trie_router::observability::logging;
use trie_router::{Dispatcher, Error, HttpServer, RequestContext, ServerConfig, Shutdown};

const MAX_BODY: usize = 64 * 1024;

#[derive(Debug, Clone, Serialize)]
struct Todo {
    id: String,
    title: String,
    description: String,
    done: bool,
}

#[derive(Debug, Deserialize)]
struct NewTodo {
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    done: bool,
}

#[derive(Debug, Deserialize)]
struct TodoPatch {
    title: Option<String>,
    description: Option<String>,
    done: Option<bool>,
}

type Store = Arc<RwLock<HashMap<String, Todo>>>;

fn json_error(status: StatusCode, message: impl Into<String>) -> Response {
    (status, axum::Json(serde_json::json!({ "error": message.into() }))).into_response()
}

fn is_json(ctx: &RequestContext) -> bool {
    ctx.header(header::CONTENT_TYPE.as_str())
        .map(|v| v.contains("application/json"))
        .unwrap_or(false)
}

async fn read_json<T: for<'de> Deserialize<'de>>(ctx: &mut RequestContext) -> Result<T, Response> {
    if !is_json(ctx) {
        return Err(json_error(StatusCode::BAD_REQUEST, "Invalid content type"));
    }
    let body = ctx
        .read_body(MAX_BODY)
        .await
        .map_err(|e| json_error(StatusCode::BAD_REQUEST, e.to_string()))?;
    serde_json::from_slice(&body).map_err(|e| json_error(StatusCode::BAD_REQUEST, e.to_string()))
}

fn routes(store: Store) -> Dispatcher {
    let mut dispatcher = Dispatcher::new();

    let s = store.clone();
    dispatcher.post("/todos", move |mut ctx: RequestContext| {
        let store = s.clone();
        async move {
            let new: NewTodo = match read_json(&mut ctx).await {
                Ok(new) => new,
                Err(response) => return response,
            };
            let todo = Todo {
                id: Uuid::new_v4().to_string(),
                title: new.title,
                description: new.description,
                done: new.done,
            };
            store.write().await.insert(todo.id.clone(), todo.clone());
            (StatusCode::CREATED, axum::Json(todo)).into_response()
        }
    });

    let s = store.clone();
    dispatcher.get("/todos", move |_ctx: RequestContext| {
        let store = s.clone();
        async move {
            let todos: Vec<Todo> = store.read().await.values().cloned().collect();
            axum::Json(todos)
        }
    });

    let s = store.clone();
    dispatcher.get("/todos/:id", move |ctx: RequestContext| {
        let store = s.clone();
        async move {
            let id = ctx.param("id").unwrap_or_default();
            match store.read().await.get(id) {
                Some(todo) => axum::Json(todo.clone()).into_response(),
                None => json_error(StatusCode::NOT_FOUND, "Not found"),
            }
        }
    });

    let s = store.clone();
    dispatcher.patch("/todos/:id", move |mut ctx: RequestContext| {
        let store = s.clone();
        async move {
            let patch: TodoPatch = match read_json(&mut ctx).await {
                Ok(patch) => patch,
                Err(response) => return response,
            };
            let id = ctx.param("id").unwrap_or_default();
            let mut todos = store.write().await;
            let Some(todo) = todos.get_mut(id) else {
                return json_error(
                    StatusCode::NOT_FOUND,
                    format!("Todo with ID \"{}\" wasn't found", id),
                );
            };
            if let Some(title) = patch.title {
                todo.title = title;
            }
            if let Some(description) = patch.description {
                todo.description = description;
            }
            if let Some(done) = patch.done {
                todo.done = done;
            }
            axum::Json(todo.clone()).into_response()
        }
    });

    let s = store;
    dispatcher.delete("/todos/:id", move |ctx: RequestContext| {
        let store = s.clone();
        async move {
            let id = ctx.param("id").unwrap_or_default();
            match store.write().await.remove(id) {
                Some(_) => StatusCode::NO_CONTENT.into_response(),
                None => json_error(StatusCode::NOT_FOUND, "Not found"),
            }
        }
    });

    dispatcher
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let mut config = ServerConfig::default();
    config.listener.bind_address = "127.0.0.1:42069".to_string();
    logging::init_logging(&config.observability.log_filter);

    let store: Store = Arc::default();
    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let shutdown = Shutdown::new();
    signals::spawn_signal_listener(&shutdown);

    HttpServer::new(config, routes(store))
        .run(listener, shutdown.subscribe())
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Method, Request};

    async fn call(
        dispatcher: &Dispatcher,
        method: Method,
        uri: &str,
        json: Option<serde_json::Value>,
    ) -> (StatusCode, serde_json::Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match json {
            Some(value) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(value.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        let response = dispatcher.dispatch(request).await;
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), MAX_BODY).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn test_create_fetch_patch_delete() {
        let dispatcher = routes(Store::default());

        let (status, created) = call(
            &dispatcher,
            Method::POST,
            "/todos",
            Some(serde_json::json!({ "title": "write tests", "description": "router" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["done"], false);
        let id = created["id"].as_str().unwrap().to_string();
        let item = format!("/todos/{}", id);

        let (status, fetched) = call(&dispatcher, Method::GET, &item, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["title"], "write tests");

        let (status, patched) = call(
            &dispatcher,
            Method::PATCH,
            &item,
            Some(serde_json::json!({ "done": true })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(patched["done"], true);
        assert_eq!(patched["title"], "write tests");
        assert_eq!(patched["description"], "router");

        let (_, list) = call(&dispatcher, Method::GET, "/todos", None).await;
        assert_eq!(list.as_array().map(Vec::len), Some(1));

        let (status, _) = call(&dispatcher, Method::DELETE, &item, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = call(&dispatcher, Method::GET, &item, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_rejects_non_json_body() {
        let dispatcher = routes(Store::default());
        let request = Request::builder()
            .method(Method::POST)
            .uri("/todos")
            .header(header::CONTENT_TYPE, "text/plain")
            .body(Body::from("title=nope"))
            .unwrap();

        let response = dispatcher.dispatch(request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_id() {
        let dispatcher = routes(Store::default());

        let (status, body) = call(
            &dispatcher,
            Method::PATCH,
            "/todos/missing",
            Some(serde_json::json!({ "done": true })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Todo with ID \"missing\" wasn't found");

        let (status, _) = call(&dispatcher, Method::DELETE, "/todos/missing", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = call(&dispatcher, Method::PUT, "/todos/missing", None).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    }
}

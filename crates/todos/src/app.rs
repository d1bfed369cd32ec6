use axum::{middleware, routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::{
    cors,
    handlers::{
        error::{method_not_allowed, route_not_found},
        health::{livez, readyz},
        todos::{create_todo, delete_todo, get_todo, list_todos, update_todo},
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route(
            "/todos/{id}",
            get(get_todo).put(update_todo).delete(delete_todo),
        )
        .method_not_allowed_fallback(method_not_allowed);

    // Main application router. Layers listed later wrap the earlier ones, so the
    // CORS headers are also set on the short-circuited preflight responses.
    Router::new()
        .route("/livez", get(livez))
        .route("/readyz", get(readyz))
        .nest("/api", api_routes)
        .method_not_allowed_fallback(method_not_allowed)
        .fallback(route_not_found)
        .layer(middleware::from_fn(cors::short_circuit_preflight))
        .layer(cors::allow_origin())
        .layer(cors::allow_methods())
        .layer(cors::allow_headers())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
        response::Response,
    };
    use http_body_util::BodyExt;
    use todos_core::storage::{RepositoryError, Result as RepoResult};
    use todos_core::todo::{CreateTodoRequest, TodoId, TodoItem, UpdateTodoRequest};
    use tower::ServiceExt;

    async fn send(app: &Router, request: Request<Body>) -> Response {
        app.clone().oneshot(request).await.unwrap()
    }

    fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn empty_request(method: &str, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&body).unwrap()
    }

    async fn create(app: &Router, title: &str, content: &str) -> serde_json::Value {
        let response = send(
            app,
            json_request(
                "POST",
                "/api/todos",
                serde_json::json!({"title": title, "content": content}),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        body_json(response).await["data"].clone()
    }

    #[tokio::test]
    async fn test_list_todos_empty() {
        let app = create_app(AppState::default());

        let response = send(&app, empty_request("GET", "/api/todos")).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({"code": 0, "data": [], "message": "success"})
        );
    }

    #[tokio::test]
    async fn test_create_todo() {
        let app = create_app(AppState::default());

        let response = send(
            &app,
            json_request(
                "POST",
                "/api/todos",
                serde_json::json!({"title": "Buy milk", "content": "2%"}),
            ),
        )
        .await;

        assert_eq!(response.status(), StatusCode::CREATED);
        let json = body_json(response).await;
        assert_eq!(json["code"], 0);
        assert_eq!(json["message"], "success");
        assert_eq!(json["data"]["id"], 1);
        assert_eq!(json["data"]["title"], "Buy milk");
        assert_eq!(json["data"]["content"], "2%");
        assert_eq!(json["data"]["completed"], false);
        assert_eq!(json["data"]["created_at"], json["data"]["updated_at"]);
    }

    #[tokio::test]
    async fn test_create_todo_ids_are_distinct() {
        let app = create_app(AppState::default());

        let first = create(&app, "one", "").await;
        let second = create(&app, "two", "").await;

        assert_ne!(first["id"], second["id"]);
    }

    #[tokio::test]
    async fn test_create_todo_without_title_is_rejected() {
        let app = create_app(AppState::default());

        for body in [
            serde_json::json!({"content": "no title"}),
            serde_json::json!({"title": "", "content": "empty"}),
            serde_json::json!({"title": "   "}),
        ] {
            let response = send(&app, json_request("POST", "/api/todos", body)).await;

            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            let json = body_json(response).await;
            assert_eq!(json["code"], 400);
            assert!(json["data"].is_null());
        }

        let response = send(&app, empty_request("GET", "/api/todos")).await;
        assert_eq!(body_json(response).await["data"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_create_todo_malformed_body() {
        let app = create_app(AppState::default());

        let request = Request::builder()
            .method("POST")
            .uri("/api/todos")
            .header("Content-Type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = send(&app, request).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["code"], 400);
    }

    #[tokio::test]
    async fn test_create_todo_without_content_type() {
        let app = create_app(AppState::default());

        let request = Request::builder()
            .method("POST")
            .uri("/api/todos")
            .body(Body::from(r#"{"title": "Buy milk"}"#))
            .unwrap();
        let response = send(&app, request).await;

        assert_eq!(response.status(), StatusCode::CREATED);
        let json = body_json(response).await;
        assert_eq!(json["code"], 0);
        assert_eq!(json["data"]["title"], "Buy milk");
    }

    #[tokio::test]
    async fn test_update_todo_without_content_type() {
        let app = create_app(AppState::default());
        let created = create(&app, "Buy milk", "").await;

        let request = Request::builder()
            .method("PUT")
            .uri(format!("/api/todos/{}", created["id"]))
            .header("Content-Type", "text/plain")
            .body(Body::from(r#"{"completed": true}"#))
            .unwrap();
        let response = send(&app, request).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["data"]["completed"], true);
    }

    #[tokio::test]
    async fn test_create_todo_empty_body() {
        let app = create_app(AppState::default());

        let response = send(&app, empty_request("POST", "/api/todos")).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["code"], 400);
    }

    #[tokio::test]
    async fn test_get_todo_after_create() {
        let app = create_app(AppState::default());
        let created = create(&app, "Buy milk", "2%").await;

        let response = send(
            &app,
            empty_request("GET", &format!("/api/todos/{}", created["id"])),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["code"], 0);
        assert_eq!(json["data"], created);
    }

    #[tokio::test]
    async fn test_get_nonexistent_todo() {
        let app = create_app(AppState::default());

        let response = send(&app, empty_request("GET", "/api/todos/99999")).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert_eq!(json["code"], 404);
        assert!(json["data"].is_null());
    }

    #[tokio::test]
    async fn test_get_non_numeric_id() {
        let app = create_app(AppState::default());

        let response = send(&app, empty_request("GET", "/api/todos/abc")).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({"code": 400, "data": null, "message": "invalid id"})
        );
    }

    #[tokio::test]
    async fn test_list_todos_newest_first() {
        let app = create_app(AppState::default());
        for title in ["first", "second", "third"] {
            create(&app, title, "").await;
        }

        let response = send(&app, empty_request("GET", "/api/todos")).await;

        let json = body_json(response).await;
        let titles: Vec<&str> = json["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["title"].as_str().unwrap())
            .collect();
        assert_eq!(titles, vec!["third", "second", "first"]);
    }

    #[tokio::test]
    async fn test_update_only_completed() {
        let app = create_app(AppState::default());
        let created = create(&app, "Buy milk", "2%").await;

        let response = send(
            &app,
            json_request(
                "PUT",
                &format!("/api/todos/{}", created["id"]),
                serde_json::json!({"completed": true}),
            ),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let data = body_json(response).await["data"].clone();
        assert_eq!(data["completed"], true);
        assert_eq!(data["title"], "Buy milk");
        assert_eq!(data["content"], "2%");
        assert_eq!(data["created_at"], created["created_at"]);

        let before: chrono::DateTime<chrono::Utc> =
            serde_json::from_value(created["updated_at"].clone()).unwrap();
        let after: chrono::DateTime<chrono::Utc> =
            serde_json::from_value(data["updated_at"].clone()).unwrap();
        assert!(after > before);
    }

    #[tokio::test]
    async fn test_update_rejects_bad_input() {
        let app = create_app(AppState::default());
        let created = create(&app, "Buy milk", "").await;
        let uri = format!("/api/todos/{}", created["id"]);

        let bad_id = send(
            &app,
            json_request("PUT", "/api/todos/abc", serde_json::json!({"completed": true})),
        )
        .await;
        assert_eq!(bad_id.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(bad_id).await["message"], "invalid id");

        let bad_body = send(
            &app,
            json_request("PUT", &uri, serde_json::json!({"completed": "yes"})),
        )
        .await;
        assert_eq!(bad_body.status(), StatusCode::BAD_REQUEST);

        let blank_title = send(
            &app,
            json_request("PUT", &uri, serde_json::json!({"title": ""})),
        )
        .await;
        assert_eq!(blank_title.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(blank_title).await["code"], 400);
    }

    #[tokio::test]
    async fn test_update_nonexistent_todo() {
        let app = create_app(AppState::default());

        let response = send(
            &app,
            json_request("PUT", "/api/todos/42", serde_json::json!({"completed": true})),
        )
        .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["code"], 404);
    }

    #[tokio::test]
    async fn test_delete_todo() {
        let app = create_app(AppState::default());
        let created = create(&app, "Buy milk", "").await;
        let uri = format!("/api/todos/{}", created["id"]);

        let response = send(&app, empty_request("DELETE", &uri)).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({"code": 0, "data": null, "message": "success"})
        );

        let response = send(&app, empty_request("GET", &uri)).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["code"], 404);
    }

    #[tokio::test]
    async fn test_delete_bad_id() {
        let app = create_app(AppState::default());

        let response = send(&app, empty_request("DELETE", "/api/todos/abc")).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["code"], 400);
    }

    #[tokio::test]
    async fn test_preflight_short_circuits_with_cors_headers() {
        let app = create_app(AppState::default());

        for uri in ["/api/todos", "/api/todos/1", "/api/todos/abc"] {
            let response = send(&app, empty_request("OPTIONS", uri)).await;

            assert_eq!(response.status(), StatusCode::NO_CONTENT);
            let headers = response.headers();
            assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
            assert_eq!(
                headers[header::ACCESS_CONTROL_ALLOW_METHODS],
                "GET, POST, PUT, DELETE, OPTIONS"
            );
            assert_eq!(
                headers[header::ACCESS_CONTROL_ALLOW_HEADERS],
                "Content-Type, Authorization"
            );
            let body = response.into_body().collect().await.unwrap().to_bytes();
            assert!(body.is_empty());
        }
    }

    #[tokio::test]
    async fn test_regular_responses_carry_cors_headers() {
        let app = create_app(AppState::default());

        let ok = send(&app, empty_request("GET", "/api/todos")).await;
        assert_eq!(ok.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");

        let not_found = send(&app, empty_request("GET", "/api/todos/99999")).await;
        assert_eq!(not_found.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(
            not_found.headers()[header::ACCESS_CONTROL_ALLOW_HEADERS],
            "Content-Type, Authorization"
        );
    }

    #[tokio::test]
    async fn test_signed_id_is_rejected() {
        let app = create_app(AppState::default());
        create(&app, "Buy milk", "").await;

        let response = send(&app, empty_request("GET", "/api/todos/+1")).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["message"], "invalid id");
    }

    #[tokio::test]
    async fn test_unsupported_method_gets_envelope() {
        let app = create_app(AppState::default());

        let response = send(&app, empty_request("PATCH", "/api/todos/1")).await;

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(
            body_json(response).await,
            serde_json::json!({"code": 405, "data": null, "message": "method not allowed"})
        );
    }

    #[tokio::test]
    async fn test_unknown_path_gets_envelope() {
        let app = create_app(AppState::default());

        for uri in ["/api/nothing", "/nothing"] {
            let response = send(&app, empty_request("GET", uri)).await;

            assert_eq!(response.status(), StatusCode::NOT_FOUND);
            let json = body_json(response).await;
            assert_eq!(json["code"], 404);
            assert_eq!(json["message"], "not found");
        }
    }

    /// Repository whose every call fails like a broken store.
    struct FailingRepository;

    #[async_trait::async_trait]
    impl todos_core::storage::TodoRepository for FailingRepository {
        async fn list_todos(&self) -> RepoResult<Vec<TodoItem>> {
            Err(store_down())
        }

        async fn get_todo(&self, _id: TodoId) -> RepoResult<Option<TodoItem>> {
            Err(store_down())
        }

        async fn create_todo(&self, _request: &CreateTodoRequest) -> RepoResult<TodoItem> {
            Err(store_down())
        }

        async fn update_todo(
            &self,
            _id: TodoId,
            _request: UpdateTodoRequest,
        ) -> RepoResult<TodoItem> {
            Err(store_down())
        }

        async fn delete_todo(&self, _id: TodoId) -> RepoResult<()> {
            Err(store_down())
        }

        async fn ping(&self) -> RepoResult<()> {
            Err(store_down())
        }
    }

    fn store_down() -> RepositoryError {
        RepositoryError::QueryFailed("disk I/O error".to_string())
    }

    #[tokio::test]
    async fn test_store_failure_maps_to_500() {
        let app = create_app(AppState::new(std::sync::Arc::new(FailingRepository)));

        let requests = [
            empty_request("GET", "/api/todos"),
            empty_request("GET", "/api/todos/1"),
            json_request("POST", "/api/todos", serde_json::json!({"title": "Buy milk"})),
            json_request("PUT", "/api/todos/1", serde_json::json!({"completed": true})),
            empty_request("DELETE", "/api/todos/1"),
        ];
        for request in requests {
            let response = send(&app, request).await;

            assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
            let json = body_json(response).await;
            assert_eq!(json["code"], 500);
            assert!(json["data"].is_null());
            assert_eq!(json["message"], "Query failed: disk I/O error");
        }

        let ready = send(&app, empty_request("GET", "/readyz")).await;
        assert_eq!(ready.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body_json(ready).await["healthy"], false);
    }

    #[tokio::test]
    async fn test_health_probes() {
        let app = create_app(AppState::default());

        let live = send(&app, empty_request("GET", "/livez")).await;
        assert_eq!(live.status(), StatusCode::OK);

        let ready = send(&app, empty_request("GET", "/readyz")).await;
        assert_eq!(ready.status(), StatusCode::OK);
        assert_eq!(body_json(ready).await["healthy"], true);
    }

    #[cfg(feature = "sqlite")]
    #[tokio::test]
    async fn test_example_scenario_on_sqlite() {
        use std::sync::Arc;

        use crate::storage::SqliteRepository;

        let repo = SqliteRepository::new_in_memory().await.unwrap();
        let app = create_app(AppState::new(Arc::new(repo)));

        let created = create(&app, "Buy milk", "2%").await;
        assert_eq!(created["id"], 1);
        assert_eq!(created["completed"], false);

        let response = send(
            &app,
            json_request(
                "PUT",
                "/api/todos/1",
                serde_json::json!({"title": "Buy milk", "content": "2%", "completed": true}),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["data"]["completed"], true);

        let response = send(&app, empty_request("DELETE", "/api/todos/1")).await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = send(&app, empty_request("GET", "/api/todos/1")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["code"], 404);
    }

    #[cfg(feature = "sqlite")]
    #[tokio::test]
    async fn test_get_matches_create_on_sqlite() {
        use std::sync::Arc;

        use crate::storage::SqliteRepository;

        let repo = SqliteRepository::new_in_memory().await.unwrap();
        let app = create_app(AppState::new(Arc::new(repo)));
        let created = create(&app, "Walk dog", "").await;

        let response = send(
            &app,
            empty_request("GET", &format!("/api/todos/{}", created["id"])),
        )
        .await;

        assert_eq!(body_json(response).await["data"], created);
    }
}

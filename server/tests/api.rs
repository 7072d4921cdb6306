use std::collections::BTreeSet;

use axum::http::{self, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use todo_core::{Category, CreatedTodo, Priority, Status, Todo};
use todo_server::{app, DatabaseConfig, Storage};
use tower::ServiceExt;

async fn test_app() -> Router {
    let storage = Storage::open(&DatabaseConfig::in_memory()).await.unwrap();
    app(storage)
}

async fn send(app: &Router, request: Request<String>) -> axum::response::Response {
    app.clone().oneshot(request).await.unwrap()
}

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn get(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

fn delete(uri: &str) -> Request<String> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(String::new())
        .unwrap()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

async fn create(app: &Router, id: i64, todo: &str, category: &str, priority: &str, status: &str, due: &str) {
    let body = serde_json::json!({
        "id": id,
        "todo": todo,
        "category": category,
        "priority": priority,
        "status": status,
        "dueDate": due,
    });
    let resp = send(app, json_request("POST", "/todos/", &body.to_string())).await;
    assert_eq!(resp.status(), StatusCode::OK, "creating todo {id}");
}

async fn fetch(app: &Router, id: i64) -> Todo {
    let resp = send(app, get(&format!("/todos/{id}/"))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    body_json(resp).await
}

/// 27 rows: one per (status, priority, category) combination, due dates
/// cycling through three days.
async fn seed_fixtures(app: &Router) -> Vec<Todo> {
    let mut rows = Vec::new();
    let mut id = 1;
    for status in Status::ALL {
        for priority in Priority::ALL {
            for category in Category::ALL {
                let todo = format!("Task {id} {}", if id % 2 == 0 { "even" } else { "odd" });
                let due = format!("2024-01-0{}", id % 3 + 1);
                create(app, id, &todo, category.as_str(), priority.as_str(), status.as_str(), &due).await;
                rows.push(Todo {
                    id,
                    todo,
                    category: category.as_str().to_string(),
                    priority: priority.as_str().to_string(),
                    status: status.as_str().to_string(),
                    due_date: due,
                });
                id += 1;
            }
        }
    }
    rows
}

fn ids(todos: &[Todo]) -> BTreeSet<i64> {
    todos.iter().map(|todo| todo.id).collect()
}

// --- list ---

#[tokio::test]
async fn list_todos_empty() {
    let app = test_app().await;
    let resp = send(&app, get("/todos/")).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let todos: Vec<Todo> = body_json(resp).await;
    assert!(todos.is_empty());
}

#[tokio::test]
async fn list_rejects_invalid_enum_values() {
    let app = test_app().await;
    for (uri, message) in [
        ("/todos/?status=LATER", "Invalid Todo Status"),
        ("/todos/?priority=URGENT", "Invalid Todo Priority"),
        ("/todos/?category=GARDEN", "Invalid Todo Category"),
        ("/todos/?status=DONE&priority=now", "Invalid Todo Priority"),
    ] {
        let resp = send(&app, get(uri)).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{uri}");
        let body: String = body_json(resp).await;
        assert_eq!(body, message, "{uri}");
    }
}

#[tokio::test]
async fn list_filters_combine_conjunctively() {
    let app = test_app().await;
    let rows = seed_fixtures(&app).await;

    let queries = [
        ("", None, None, None, None),
        ("status=TO%20DO", Some("TO DO"), None, None, None),
        ("priority=HIGH&status=IN%20PROGRESS", Some("IN PROGRESS"), Some("HIGH"), None, None),
        ("category=LEARNING", None, None, None, Some("LEARNING")),
        ("search_q=even", None, None, Some("even"), None),
        ("status=DONE&priority=LOW&category=WORK", Some("DONE"), Some("LOW"), None, Some("WORK")),
        ("search_q=odd&category=HOME", None, None, Some("odd"), Some("HOME")),
        ("status=&search_q=", None, None, None, None),
    ];

    for (query, status, priority, search, category) in queries {
        let resp = send(&app, get(&format!("/todos/?{query}"))).await;
        assert_eq!(resp.status(), StatusCode::OK, "{query}");
        let todos: Vec<Todo> = body_json(resp).await;

        let expected: Vec<Todo> = rows
            .iter()
            .filter(|row| status.map_or(true, |s| row.status == s))
            .filter(|row| priority.map_or(true, |p| row.priority == p))
            .filter(|row| search.map_or(true, |q| row.todo.contains(q)))
            .filter(|row| category.map_or(true, |c| row.category == c))
            .cloned()
            .collect();
        assert_eq!(ids(&todos), ids(&expected), "{query}");
    }
}

// --- get ---

#[tokio::test]
async fn get_todo_returns_the_row() {
    let app = test_app().await;
    create(&app, 1, "x", "WORK", "HIGH", "TO DO", "2024-01-01").await;

    let todo = fetch(&app, 1).await;
    assert_eq!(
        todo,
        Todo {
            id: 1,
            todo: "x".to_string(),
            category: "WORK".to_string(),
            priority: "HIGH".to_string(),
            status: "TO DO".to_string(),
            due_date: "2024-01-01".to_string(),
        }
    );
}

#[tokio::test]
async fn get_missing_todo_is_an_empty_ok() {
    let app = test_app().await;
    let resp = send(&app, get("/todos/42/")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_bytes(resp).await.is_empty());
}

#[tokio::test]
async fn get_todo_bad_id_returns_400() {
    let app = test_app().await;
    let resp = send(&app, get("/todos/1%20OR%201=1/")).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- agenda ---

#[tokio::test]
async fn agenda_matches_due_date_exactly() {
    let app = test_app().await;
    let rows = seed_fixtures(&app).await;

    let resp = send(&app, get("/agenda/?date=2024-01-02")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let todos: Vec<Todo> = body_json(resp).await;

    let expected: Vec<Todo> = rows
        .into_iter()
        .filter(|row| row.due_date == "2024-01-02")
        .collect();
    assert!(!expected.is_empty());
    assert_eq!(ids(&todos), ids(&expected));
}

#[tokio::test]
async fn agenda_normalizes_the_requested_date() {
    let app = test_app().await;
    create(&app, 1, "x", "HOME", "LOW", "DONE", "2024-01-05").await;

    let resp = send(&app, get("/agenda/?date=2024%2F1%2F5")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let todos: Vec<Todo> = body_json(resp).await;
    assert_eq!(ids(&todos), BTreeSet::from([1]));

    let resp = send(&app, get("/agenda/?date=2024-01-06")).await;
    let todos: Vec<Todo> = body_json(resp).await;
    assert!(todos.is_empty());
}

#[tokio::test]
async fn agenda_requires_a_parseable_date() {
    let app = test_app().await;
    for uri in ["/agenda/?date=not-a-date", "/agenda/", "/agenda/?date="] {
        let resp = send(&app, get(uri)).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{uri}");
        let body: String = body_json(resp).await;
        assert_eq!(body, "Invalid Due Date");
    }
}

// --- create ---

#[tokio::test]
async fn create_returns_the_row_id() {
    let app = test_app().await;
    let resp = send(
        &app,
        json_request(
            "POST",
            "/todos/",
            r#"{"id":1,"todo":"x","category":"WORK","priority":"HIGH","status":"TO DO","dueDate":"2024-01-01"}"#,
        ),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::OK);
    let created: CreatedTodo = body_json(resp).await;
    assert_eq!(created.book_id, 1);

    let resp = send(&app, get("/todos/")).await;
    let todos: Vec<Todo> = body_json(resp).await;
    assert_eq!(todos.len(), 1);
}

#[tokio::test]
async fn create_without_id_gets_one_assigned() {
    let app = test_app().await;
    create(&app, 7, "first", "WORK", "HIGH", "TO DO", "2024-01-01").await;

    let resp = send(
        &app,
        json_request(
            "POST",
            "/todos/",
            r#"{"todo":"second","category":"HOME","priority":"LOW","status":"DONE","dueDate":"2024-01-02"}"#,
        ),
    )
    .await;
    let created: CreatedTodo = body_json(resp).await;
    assert_eq!(created.book_id, 8);
    assert_eq!(fetch(&app, 8).await.todo, "second");
}

#[tokio::test]
async fn create_rejects_invalid_fields() {
    let app = test_app().await;
    let cases = [
        (r#"{"id":1,"todo":"x","category":"WORK","priority":"HIGH","status":"SOON","dueDate":"2024-01-01"}"#, "Invalid Todo Status"),
        (r#"{"id":1,"todo":"x","category":"WORK","priority":"HI","status":"DONE","dueDate":"2024-01-01"}"#, "Invalid Todo Priority"),
        (r#"{"id":1,"todo":"x","category":"GYM","priority":"HIGH","status":"DONE","dueDate":"2024-01-01"}"#, "Invalid Todo Category"),
        (r#"{"id":1,"todo":"x","category":"WORK","priority":"HIGH","dueDate":"2024-01-01"}"#, "Invalid Todo Status"),
        (r#"{"id":1,"todo":"x","category":"WORK","priority":"HIGH","status":"DONE","dueDate":"soon"}"#, "Invalid Due Date"),
    ];
    for (body, message) in cases {
        let resp = send(&app, json_request("POST", "/todos/", body)).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{body}");
        let text: String = body_json(resp).await;
        assert_eq!(text, message);
    }

    let resp = send(&app, get("/todos/")).await;
    let todos: Vec<Todo> = body_json(resp).await;
    assert!(todos.is_empty());
}

#[tokio::test]
async fn create_malformed_json_returns_400() {
    let app = test_app().await;
    let resp = send(&app, json_request("POST", "/todos/", r#"{"id":"one""#)).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_duplicate_id_returns_500() {
    let app = test_app().await;
    create(&app, 1, "x", "WORK", "HIGH", "TO DO", "2024-01-01").await;
    let resp = send(
        &app,
        json_request(
            "POST",
            "/todos/",
            r#"{"id":1,"todo":"y","category":"HOME","priority":"LOW","status":"DONE","dueDate":"2024-01-02"}"#,
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: String = body_json(resp).await;
    assert_eq!(body, "Internal Server Error");
    assert_eq!(fetch(&app, 1).await.todo, "x");
}

// --- update ---

#[tokio::test]
async fn update_missing_todo_is_404_regardless_of_body() {
    let app = test_app().await;
    for body in [
        r#"{"status":"DONE"}"#,
        r#"{"status":"NEVER"}"#,
        r#"{}"#,
        r#"{"dueDate":"garbage"}"#,
        "not json",
    ] {
        let resp = send(&app, json_request("PUT", "/todos/999/", body)).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{body}");
        let text: String = body_json(resp).await;
        assert_eq!(text, "Todo not found");
    }
}

#[tokio::test]
async fn update_changes_only_the_supplied_field() {
    let app = test_app().await;
    create(&app, 1, "x", "WORK", "HIGH", "TO DO", "2024-01-01").await;
    let before = fetch(&app, 1).await;

    for _ in 0..2 {
        let resp = send(&app, json_request("PUT", "/todos/1/", r#"{"status":"DONE"}"#)).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let text: String = body_json(resp).await;
        assert_eq!(text, "Todo Updated");
    }

    let after = fetch(&app, 1).await;
    assert_eq!(
        after,
        Todo {
            status: "DONE".to_string(),
            ..before
        }
    );
}

#[tokio::test]
async fn update_normalizes_due_date() {
    let app = test_app().await;
    create(&app, 1, "x", "WORK", "HIGH", "TO DO", "2024-01-01").await;

    let resp = send(
        &app,
        json_request("PUT", "/todos/1/", r#"{"todo":"y","dueDate":"Feb 3, 2024"}"#),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let todo = fetch(&app, 1).await;
    assert_eq!(todo.todo, "y");
    assert_eq!(todo.due_date, "2024-02-03");
}

#[tokio::test]
async fn update_rejects_bad_fields_without_writing() {
    let app = test_app().await;
    create(&app, 1, "x", "WORK", "HIGH", "TO DO", "2024-01-01").await;
    let before = fetch(&app, 1).await;

    for (body, message) in [
        (r#"{"status":"DONE","priority":"URGENT"}"#, "Invalid Todo Priority"),
        (r#"{"todo":"y","category":"GYM"}"#, "Invalid Todo Category"),
        (r#"{"status":"DONE","dueDate":"2024-13-40"}"#, "Invalid Due Date"),
        (r#"{}"#, "Invalid request. Please provide data to update."),
    ] {
        let resp = send(&app, json_request("PUT", "/todos/1/", body)).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{body}");
        let text: String = body_json(resp).await;
        assert_eq!(text, message);
    }

    assert_eq!(fetch(&app, 1).await, before);
}

// --- delete ---

#[tokio::test]
async fn delete_then_get_then_delete_again() {
    let app = test_app().await;
    create(&app, 1, "x", "WORK", "HIGH", "TO DO", "2024-01-01").await;

    let resp = send(&app, delete("/todos/1/")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let text: String = body_json(resp).await;
    assert_eq!(text, "Todo Deleted");

    let resp = send(&app, get("/todos/1/")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_bytes(resp).await.is_empty());

    let resp = send(&app, delete("/todos/1/")).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- round trip ---

#[tokio::test]
async fn created_due_date_is_found_through_agenda() {
    let app = test_app().await;
    create(&app, 3, "Dentist", "HOME", "MEDIUM", "TO DO", "Jan 5, 2024").await;

    assert_eq!(fetch(&app, 3).await.due_date, "2024-01-05");

    let resp = send(&app, get("/agenda/?date=2024-01-05")).await;
    let todos: Vec<Todo> = body_json(resp).await;
    assert_eq!(ids(&todos), BTreeSet::from([3]));
}

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use serde_json::{Value, json};
use std::{
    collections::HashSet,
    fs,
    path::PathBuf,
    time::{SystemTime, UNIX_EPOCH},
};
use tower::ServiceExt;
use trivia_api::config::QuizConfig;
use trivia_api::db::{DbActorHandle, NewQuestion};
use trivia_api::router::{TriviaState, trivia_router};

struct TestApp {
    app: Router,
    db: DbActorHandle,
    path: PathBuf,
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
    }
}

async fn spawn_app(tag: &str) -> TestApp {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before UNIX_EPOCH")
        .as_nanos();

    let mut path = std::env::temp_dir();
    path.push(format!(
        "trivia-routes-{tag}-{}-{}.sqlite",
        std::process::id(),
        nanos
    ));

    let database_url = format!("sqlite:{}", path.display());
    let db = trivia_api::db::spawn(&database_url, true)
        .await
        .expect("failed to spawn db actor");

    let state = TriviaState::new(db.clone(), QuizConfig::default());
    TestApp {
        app: trivia_router(state),
        db,
        path,
    }
}

impl TestApp {
    async fn insert(&self, question: &str, category: i64) -> i64 {
        self.db
            .insert_question(NewQuestion::new(question, "answer", category, 1))
            .await
            .expect("insert failed")
    }

    async fn send(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let req = match body {
            Some(v) => builder
                .header("content-type", "application/json")
                .body(Body::from(v.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("failed to build request");
        self.send_request(req).await
    }

    async fn send_request(&self, req: Request<Body>) -> (StatusCode, Value) {
        let resp = self.app.clone().oneshot(req).await.expect("request failed");
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX)
            .await
            .expect("failed to read response body");
        let value = serde_json::from_slice(&bytes).expect("response body was not json");
        (status, value)
    }
}

fn assert_error(status: StatusCode, body: &Value, expected: StatusCode, message: &str) {
    assert_eq!(status, expected);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], expected.as_u16());
    assert_eq!(body["message"], message);
}

fn ids(body: &Value) -> Vec<i64> {
    body["questions"]
        .as_array()
        .expect("questions array")
        .iter()
        .map(|q| q["id"].as_i64().expect("id"))
        .collect()
}

#[tokio::test]
async fn index_and_unknown_routes_use_uniform_payloads() {
    let t = spawn_app("index").await;

    let (status, body) = t.send("GET", "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (status, body) = t.send("PUT", "/", None).await;
    assert_error(status, &body, StatusCode::METHOD_NOT_ALLOWED, "Method not allowed");

    let (status, body) = t.send("GET", "/nowhere", None).await;
    assert_error(status, &body, StatusCode::NOT_FOUND, "Resource not found");
    let (status, body) = t.send("OPTIONS", "/", None).await;
    assert_error(status, &body, StatusCode::METHOD_NOT_ALLOWED, "Method not allowed");

    let (status, body) = t.send("OPTIONS", "/questions", None).await;
    assert_error(status, &body, StatusCode::METHOD_NOT_ALLOWED, "Method not allowed");
}

#[tokio::test]
async fn cors_preflight_allows_any_origin() {
    let t = spawn_app("cors").await;

    let req = Request::builder()
        .method("OPTIONS")
        .uri("/questions")
        .header("origin", "http://localhost:3000")
        .header("access-control-request-method", "DELETE")
        .body(Body::empty())
        .expect("failed to build request");
    let resp = t.app.clone().oneshot(req).await.expect("request failed");

    assert_eq!(resp.status(), StatusCode::OK);
    let headers = resp.headers();
    assert_eq!(headers["access-control-allow-origin"], "*");
    let methods = headers["access-control-allow-methods"]
        .to_str()
        .expect("ascii header");
    assert!(methods.contains("DELETE"));
    assert!(methods.contains("PATCH"));
}

#[tokio::test]
async fn categories_lists_only_labels_in_use() {
    let t = spawn_app("categories").await;
    t.insert("Which planet is red?", 1).await;
    t.insert("Who painted the Mona Lisa?", 2).await;
    t.insert("What is H2O?", 1).await;

    let (status, body) = t.send("GET", "/categories", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["categories"], json!(["Art", "Science"]));
    assert_eq!(body["total_categories"], 2);
}

#[tokio::test]
async fn questions_are_paginated_by_ten() {
    let t = spawn_app("pages").await;
    let mut inserted = Vec::new();
    for n in 0..12 {
        inserted.push(t.insert(&format!("Question number {n}?"), 1 + n % 2).await);
    }

    let (status, body) = t.send("GET", "/questions", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), inserted[..10].to_vec());
    assert_eq!(body["total_questions"], 12);
    assert_eq!(body["categories"], json!(["Art", "Science"]));
    assert!(body["current_category"].is_null());

    let (status, body) = t.send("GET", "/questions?page=2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), inserted[10..].to_vec());
    assert_eq!(body["total_questions"], 12);

    for uri in ["/questions?page=3", "/questions?page=0", "/questions?page=777"] {
        let (status, body) = t.send("GET", uri, None).await;
        assert_error(status, &body, StatusCode::NOT_FOUND, "Resource not found");
    }

    let (status, body) = t.send("GET", "/questions?page=-3", None).await;
    assert_error(status, &body, StatusCode::NOT_FOUND, "Resource not found");

    for uri in [
        "/questions?page=two",
        "/questions?page=",
        "/questions?page=99999999999999999999",
    ] {
        let (status, body) = t.send("GET", uri, None).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert_eq!(ids(&body), inserted[..10].to_vec(), "{uri}");
    }
}

#[tokio::test]
async fn empty_store_has_no_question_pages() {
    let t = spawn_app("empty").await;
    let (status, body) = t.send("GET", "/questions?page=1", None).await;
    assert_error(status, &body, StatusCode::NOT_FOUND, "Resource not found");

    let (status, body) = t.send("GET", "/categories", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_categories"], 0);
}

#[tokio::test]
async fn search_matches_substrings_case_insensitively() {
    let t = spawn_app("search").await;
    t.insert("Why was 6 afraid of 7?", 1).await;
    t.insert("What is the largest lake in Africa?", 3).await;

    let (status, body) = t
        .send("POST", "/search", Some(json!({"searchTerm": "AFRAID"})))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_questions"], 1);
    assert_eq!(body["questions"][0]["question"], "Why was 6 afraid of 7?");

    let (status, body) = t
        .send("POST", "/search", Some(json!({"searchTerm": "xyz"})))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["total_questions"], 0);

    for reset in [json!({"searchTerm": ""}), json!({"searchTerm": null}), json!({})] {
        let (status, body) = t.send("POST", "/search", Some(reset)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_questions"], 2);
    }
}

#[tokio::test]
async fn malformed_search_bodies_are_bad_requests() {
    let t = spawn_app("search-bad").await;

    let (status, body) = t
        .send("POST", "/search", Some(json!(["One", "Two", "Three"])))
        .await;
    assert_error(status, &body, StatusCode::BAD_REQUEST, "Bad request");

    let (status, body) = t
        .send("POST", "/search", Some(json!({"searchTerm": 42})))
        .await;
    assert_error(status, &body, StatusCode::BAD_REQUEST, "Bad request");

    let req = Request::builder()
        .method("POST")
        .uri("/search")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .expect("failed to build request");
    let (status, body) = t.send_request(req).await;
    assert_error(status, &body, StatusCode::BAD_REQUEST, "Bad request");

    let (status, body) = t.send("DELETE", "/search", None).await;
    assert_error(status, &body, StatusCode::METHOD_NOT_ALLOWED, "Method not allowed");
}

#[tokio::test]
async fn questions_by_category_filters_and_rejects_unknown_ids() {
    let t = spawn_app("by-category").await;
    let a = t.insert("Science one?", 1).await;
    t.insert("Sports one?", 6).await;
    let b = t.insert("Science two?", 1).await;

    let (status, body) = t.send("GET", "/categories/1/questions", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![a, b]);
    assert_eq!(body["total_questions"], 2);
    assert!(body["questions"]
        .as_array()
        .unwrap()
        .iter()
        .all(|q| q["category"] == 1));

    let (status, body) = t.send("GET", "/categories/-1/questions", None).await;
    assert_error(status, &body, StatusCode::NOT_FOUND, "Resource not found");

    // Known category, nothing in it.
    let (status, body) = t.send("GET", "/categories/4/questions", None).await;
    assert_error(status, &body, StatusCode::NOT_FOUND, "Resource not found");

    let (status, body) = t.send("POST", "/categories/1/questions", None).await;
    assert_error(status, &body, StatusCode::METHOD_NOT_ALLOWED, "Method not allowed");
}

#[tokio::test]
async fn quiz_walks_a_category_then_reports_completion() {
    let t = spawn_app("quiz").await;
    let mut science = HashSet::new();
    for n in 0..3 {
        science.insert(t.insert(&format!("Science {n}?"), 1).await);
    }
    t.insert("Sports?", 6).await;

    let mut previous: Vec<i64> = Vec::new();
    for _ in 0..3 {
        let (status, body) = t
            .send(
                "POST",
                "/quizzes",
                Some(json!({
                    "previous_questions": previous,
                    "quiz_category": {"type": "Science", "id": "1"}
                })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        let id = body["question"]["id"].as_i64().expect("question id");
        assert!(science.contains(&id));
        assert!(!previous.contains(&id));
        previous.push(id);
    }

    let (status, body) = t
        .send(
            "POST",
            "/quizzes",
            Some(json!({"previous_questions": previous, "quiz_category": {"id": 1}})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert!(body["question"].is_null());
}

#[tokio::test]
async fn quiz_category_zero_draws_from_every_question() {
    let t = spawn_app("quiz-all").await;
    let first = t.insert("Science?", 1).await;
    let second = t.insert("Sports?", 6).await;

    let (status, body) = t
        .send(
            "POST",
            "/quizzes",
            Some(json!({"previous_questions": [first], "quiz_category": {"type": "click", "id": 0}})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["question"]["id"], second);
}

#[tokio::test]
async fn quiz_rejects_missing_fields_and_empty_pools() {
    let t = spawn_app("quiz-bad").await;
    t.insert("Science?", 1).await;

    for bad in [
        json!({"previous_questions": [], "quiz_category": null}),
        json!({"quiz_category": {"id": 1}}),
        json!({}),
        json!({"previous_questions": [], "quiz_category": {"id": "science"}}),
    ] {
        let (status, body) = t.send("POST", "/quizzes", Some(bad)).await;
        assert_error(status, &body, StatusCode::BAD_REQUEST, "Bad request");
    }

    let (status, body) = t
        .send(
            "POST",
            "/quizzes",
            Some(json!({"previous_questions": [], "quiz_category": {"id": 5}})),
        )
        .await;
    assert_error(status, &body, StatusCode::NOT_FOUND, "Resource not found");

    let (status, body) = t.send("GET", "/quizzes", None).await;
    assert_error(status, &body, StatusCode::METHOD_NOT_ALLOWED, "Method not allowed");
}

#[tokio::test]
async fn created_question_lands_on_the_last_page() {
    let t = spawn_app("create").await;
    t.insert("Existing?", 1).await;

    let (status, body) = t
        .send(
            "POST",
            "/questions",
            Some(json!({
                "question": "What's better than 4 years at university?",
                "answer": "A nanodegree",
                "category": 1,
                "difficulty": 1
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let created = body["created"].as_i64().expect("created id");

    let (_, body) = t.send("GET", "/questions?page=1", None).await;
    assert_eq!(ids(&body).last(), Some(&created));
    assert_eq!(body["total_questions"], 2);
}

#[tokio::test]
async fn incomplete_question_is_an_internal_error() {
    let t = spawn_app("create-bad").await;

    let (status, body) = t
        .send(
            "POST",
            "/questions",
            Some(json!({"question": "No answer given?", "category": 1, "difficulty": 1})),
        )
        .await;
    assert_error(
        status,
        &body,
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal server error",
    );

    let (status, body) = t.send("POST", "/search", Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_questions"], 0);
}

#[tokio::test]
async fn delete_removes_once_then_not_found() {
    let t = spawn_app("delete").await;
    let id = t.insert("Delete me?", 1).await;
    let keep = t.insert("Keep me?", 1).await;

    let (status, body) = t.send("DELETE", &format!("/questions/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["deleted"], id);

    let (status, body) = t.send("DELETE", &format!("/questions/{id}"), None).await;
    assert_error(status, &body, StatusCode::NOT_FOUND, "Resource not found");

    for uri in ["/questions/-1", "/questions/abc"] {
        let (status, body) = t.send("DELETE", uri, None).await;
        assert_error(status, &body, StatusCode::NOT_FOUND, "Resource not found");
    }

    for method in ["PUT", "PATCH", "POST"] {
        let (status, body) = t.send(method, &format!("/questions/{keep}"), None).await;
        assert_error(status, &body, StatusCode::METHOD_NOT_ALLOWED, "Method not allowed");
    }

    let (_, body) = t.send("GET", "/questions", None).await;
    assert_eq!(ids(&body), vec![keep]);
}

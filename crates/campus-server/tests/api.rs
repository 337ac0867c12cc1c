//! End-to-end tests against the assembled router: guard behavior, the
//! refetch-after-mutation contract, and the page-specific read rules.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use campus_api::auth::{AppState, AppStateInner};
use campus_server::build_router;
use campus_types::models::AppRole;

const SEEDED_HOSTEL: &str = "00000000-0000-0000-0000-000000000001";

fn test_app() -> (Router, AppState) {
    let db = campus_db::Database::open_in_memory().unwrap();
    let state: AppState = Arc::new(AppStateInner {
        db,
        // must match the guard's fallback secret
        jwt_secret: "dev-secret-change-me".to_string(),
    });
    (build_router(state.clone()), state)
}

fn request(method: &str, path: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

/// Register an account and return (token, user_id).
async fn register(app: &Router, name: &str, email: &str) -> (String, String) {
    let (status, body) = send(
        app,
        request(
            "POST",
            "/auth/register",
            None,
            Some(json!({ "name": name, "email": email, "password": "hunter2pass" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    (
        body["token"].as_str().unwrap().to_string(),
        body["user_id"].as_str().unwrap().to_string(),
    )
}

#[tokio::test]
async fn guarded_routes_reject_anonymous_requests() {
    let (app, _) = test_app();

    for path in ["/", "/settings", "/marketplace", "/qna", "/achievements", "/admin"] {
        let (status, _) = send(&app, request("GET", path, None, None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "path {}", path);
    }
}

#[tokio::test]
async fn unknown_paths_hit_the_catch_all() {
    let (app, _) = test_app();

    let (status, body) = send(&app, request("GET", "/no-such-page", None, None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not found");
}

#[tokio::test]
async fn register_then_login_resolves_a_session() {
    let (app, _) = test_app();
    let (token, user_id) = register(&app, "Asha", "asha@campus.test").await;

    let (status, session) = send(&app, request("GET", "/auth/session", Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(session["user_id"], user_id.as_str());
    assert_eq!(session["name"], "Asha");
    assert_eq!(session["is_admin"], false);

    let (status, login) = send(
        &app,
        request(
            "POST",
            "/auth/login",
            None,
            Some(json!({ "email": "asha@campus.test", "password": "hunter2pass" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(login["token"].as_str().is_some());

    let (status, _) = send(
        &app,
        request(
            "POST",
            "/auth/login",
            None,
            Some(json!({ "email": "asha@campus.test", "password": "wrong-password" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn duplicate_registration_conflicts() {
    let (app, _) = test_app();
    register(&app, "Asha", "asha@campus.test").await;

    let (status, body) = send(
        &app,
        request(
            "POST",
            "/auth/register",
            None,
            Some(json!({ "name": "Imposter", "email": "asha@campus.test", "password": "hunter2pass" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains("already exists"));
}

#[tokio::test]
async fn admin_page_needs_the_role() {
    let (app, state) = test_app();
    let (token, user_id) = register(&app, "Asha", "asha@campus.test").await;

    let (status, _) = send(&app, request("GET", "/admin", Some(&token), None)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // grants happen out-of-band
    state.db.grant_role(&user_id, AppRole::Admin).unwrap();

    let (status, students) = send(&app, request("GET", "/admin", Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(students.as_array().unwrap().len(), 1);
    assert_eq!(students[0]["name"], "Asha");
}

#[tokio::test]
async fn dashboard_counts_the_collections() {
    let (app, _) = test_app();
    let (token, _) = register(&app, "Asha", "asha@campus.test").await;

    let (status, stats) = send(&app, request("GET", "/", Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["students"], 1);
    assert_eq!(stats["marketplace_items"], 0);
    // the starter set granted at registration
    assert_eq!(stats["achievements"], 3);
}

#[tokio::test]
async fn creating_a_question_returns_the_refetched_list() {
    let (app, _) = test_app();
    let (token, _) = register(&app, "Asha", "asha@campus.test").await;

    let (status, questions) = send(
        &app,
        request(
            "POST",
            "/qna",
            Some(&token),
            Some(json!({
                "title": "Where is the library?",
                "description": "Lost on day one.",
                "tags": "campus, directions"
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let questions = questions.as_array().unwrap();
    assert_eq!(questions.len(), 1);
    assert_eq!(questions[0]["title"], "Where is the library?");
    assert_eq!(questions[0]["asker_name"], "Asha");
    assert_eq!(questions[0]["answer_count"], 0);
    assert_eq!(questions[0]["tags"], json!(["campus", "directions"]));

    let question_id = questions[0]["id"].as_str().unwrap().to_string();

    let (status, answers) = send(
        &app,
        request(
            "POST",
            &format!("/qna/{}/answers", question_id),
            Some(&token),
            Some(json!({ "content": "Behind the main hall." })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let answers = answers.as_array().unwrap();
    assert_eq!(answers.len(), 1);
    assert_eq!(answers[0]["author_name"], "Asha");

    // the question list's answer count reflects the write
    let (_, questions) = send(&app, request("GET", "/qna", Some(&token), None)).await;
    assert_eq!(questions[0]["answer_count"], 1);
}

#[tokio::test]
async fn answers_for_an_unknown_question_are_not_found() {
    let (app, _) = test_app();
    let (token, _) = register(&app, "Asha", "asha@campus.test").await;

    let (status, _) = send(
        &app,
        request(
            "GET",
            "/qna/7c0e6a60-0000-0000-0000-000000000000/answers",
            Some(&token),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn resource_tabs_partition_by_type() {
    let (app, _) = test_app();
    let (token, _) = register(&app, "Asha", "asha@campus.test").await;

    let (status, visual) = send(
        &app,
        request(
            "POST",
            "/resources",
            Some(&token),
            Some(json!({
                "title": "Lecture recording",
                "description": "Week 1",
                "type": "visual",
                "url": "https://example.test/v1",
                "tags": "lecture"
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(visual.as_array().unwrap().len(), 1);

    let (status, text) = send(
        &app,
        request(
            "POST",
            "/resources",
            Some(&token),
            Some(json!({
                "title": "Course notes",
                "description": "Week 1",
                "type": "text",
                "url": "https://example.test/t1",
                "tags": "notes"
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    // the refetch is scoped to the submitted partition
    let text = text.as_array().unwrap();
    assert_eq!(text.len(), 1);
    assert_eq!(text[0]["type"], "text");

    let (_, visual_again) = send(
        &app,
        request("GET", "/resources?type=visual", Some(&token), None),
    )
    .await;
    let visual_again = visual_again.as_array().unwrap();
    assert_eq!(visual_again.len(), 1);
    assert_eq!(visual_again[0]["title"], "Lecture recording");

    // the default tab is visual
    let (_, default_tab) = send(&app, request("GET", "/resources", Some(&token), None)).await;
    assert_eq!(default_tab.as_array().unwrap().len(), 1);
    assert_eq!(default_tab[0]["type"], "visual");
}

#[tokio::test]
async fn hostel_reviews_appear_newest_first() {
    let (app, _) = test_app();
    let (token, _) = register(&app, "Asha", "asha@campus.test").await;

    // seeded catalogue, ordered by rating descending
    let (status, hostels) = send(&app, request("GET", "/hostels", Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);
    let hostels = hostels.as_array().unwrap();
    assert_eq!(hostels.len(), 3);
    assert_eq!(hostels[0]["name"], "Maple House");

    // no reviews yet
    let reviews_path = format!("/hostels/{}/reviews", SEEDED_HOSTEL);
    let (status, reviews) = send(&app, request("GET", &reviews_path, Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(reviews.as_array().unwrap().len(), 0);

    let (status, reviews) = send(
        &app,
        request(
            "POST",
            &reviews_path,
            Some(&token),
            Some(json!({ "rating": 5, "comment": "Great place" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let reviews = reviews.as_array().unwrap();
    assert_eq!(reviews.len(), 1);
    assert_eq!(reviews[0]["comment"], "Great place");
    assert_eq!(reviews[0]["reviewer_name"], "Asha");

    // a second review lands at the head of the refetched list
    let (_, reviews) = send(
        &app,
        request(
            "POST",
            &reviews_path,
            Some(&token),
            Some(json!({ "rating": 3, "comment": "Too noisy" })),
        ),
    )
    .await;
    let reviews = reviews.as_array().unwrap();
    assert_eq!(reviews.len(), 2);
    assert_eq!(reviews[0]["comment"], "Too noisy");

    let (status, body) = send(
        &app,
        request(
            "POST",
            &reviews_path,
            Some(&token),
            Some(json!({ "rating": 9, "comment": "off the scale" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("rating"));
}

#[tokio::test]
async fn achievement_claim_is_a_one_way_transition() {
    let (app, _) = test_app();
    let (token, _) = register(&app, "Asha", "asha@campus.test").await;

    let (status, achievements) =
        send(&app, request("GET", "/achievements", Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);
    let achievements = achievements.as_array().unwrap();
    assert_eq!(achievements.len(), 3);

    let claimable = achievements
        .iter()
        .find(|a| a["claimable"] == true)
        .expect("starter set contains one complete achievement");
    assert_eq!(claimable["title"], "Welcome Aboard");
    let claimable_id = claimable["id"].as_str().unwrap().to_string();

    let incomplete = achievements
        .iter()
        .find(|a| a["claimable"] == false)
        .unwrap();
    let incomplete_id = incomplete["id"].as_str().unwrap().to_string();

    // claiming an incomplete achievement is rejected
    let (status, _) = send(
        &app,
        request(
            "POST",
            &format!("/achievements/{}/claim", incomplete_id),
            Some(&token),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // claiming the complete one flips it
    let (status, refreshed) = send(
        &app,
        request(
            "POST",
            &format!("/achievements/{}/claim", claimable_id),
            Some(&token),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let claimed = refreshed
        .as_array()
        .unwrap()
        .iter()
        .find(|a| a["id"] == claimable_id.as_str())
        .unwrap();
    assert_eq!(claimed["claimed"], true);
    assert_eq!(claimed["claimable"], false);

    // a second claim conflicts
    let (status, _) = send(
        &app,
        request(
            "POST",
            &format!("/achievements/{}/claim", claimable_id),
            Some(&token),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn claiming_someone_elses_achievement_is_forbidden() {
    let (app, _) = test_app();
    let (asha_token, _) = register(&app, "Asha", "asha@campus.test").await;
    let (ravi_token, _) = register(&app, "Ravi", "ravi@campus.test").await;

    let (_, achievements) = send(&app, request("GET", "/achievements", Some(&asha_token), None)).await;
    let target = achievements[0]["id"].as_str().unwrap().to_string();

    let (status, _) = send(
        &app,
        request(
            "POST",
            &format!("/achievements/{}/claim", target),
            Some(&ravi_token),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn malformed_price_fails_without_creating_anything() {
    let (app, _) = test_app();
    let (token, _) = register(&app, "Asha", "asha@campus.test").await;

    let (status, body) = send(
        &app,
        request(
            "POST",
            "/marketplace",
            Some(&token),
            Some(json!({
                "title": "Bike",
                "description": "Barely used",
                "price": "cheap",
                "condition": "Used",
                "category": "Transport"
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("invalid price"));

    // exactly one failure, nothing written
    let (_, items) = send(&app, request("GET", "/marketplace", Some(&token), None)).await;
    assert_eq!(items.as_array().unwrap().len(), 0);

    // the coerced path works
    let (status, items) = send(
        &app,
        request(
            "POST",
            "/marketplace",
            Some(&token),
            Some(json!({
                "title": "Bike",
                "description": "Barely used",
                "price": "120.50",
                "condition": "Used",
                "category": "Transport"
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let items = items.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["price"], 120.5);
    assert_eq!(items[0]["seller_name"], "Asha");
}

#[tokio::test]
async fn settings_update_refetches_the_profile() {
    let (app, _) = test_app();
    let (token, _) = register(&app, "Asha", "asha@campus.test").await;

    let (status, profile) = send(&app, request("GET", "/settings", Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["name"], "Asha");
    assert!(profile["roll_no"].is_null());

    let (status, updated) = send(
        &app,
        request(
            "PUT",
            "/settings",
            Some(&token),
            Some(json!({
                "name": "Asha K",
                "roll_no": "CS-2024-017",
                "college": "Hilltop Engineering",
                "year": "2nd"
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "Asha K");
    assert_eq!(updated["roll_no"], "CS-2024-017");
    assert_eq!(updated["college"], "Hilltop Engineering");
    // untouched fields stay unset
    assert!(updated["interests"].is_null());
}

#[tokio::test]
async fn placeholder_pages_render_their_empty_states() {
    let (app, _) = test_app();
    let (token, _) = register(&app, "Asha", "asha@campus.test").await;

    let (status, chat) = send(&app, request("GET", "/chat", Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(chat["message"], "Chat feature coming soon!");

    let (status, announcements) =
        send(&app, request("GET", "/announcements", Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(announcements.as_array().unwrap().len(), 0);
}

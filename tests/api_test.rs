mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;
use wanderly::routes;
use wanderly::state::AppState;

async fn send(state: AppState, request: Request<Body>) -> (StatusCode, Value) {
    let response = routes::app(state).oneshot(request).await.unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

async fn get_json(uri: &str) -> (StatusCode, Value) {
    let (_dir, state) = common::seeded_state();
    send(state, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn health_reports_ok() {
    let (status, body) = get_json("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn places_endpoint_applies_filter_and_sort() {
    let (status, body) = get_json("/api/places?category=attraction&sort=name").await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<_> = body["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(
        names,
        vec![
            "Anne Frank House",
            "Colosseum",
            "Eiffel Tower",
            "Park Güell",
            "Sagrada Família",
            "Tokyo Senso-ji"
        ]
    );
    assert_eq!(body["filter"], "attraction");
    assert_eq!(body["isEmpty"], false);
}

#[tokio::test]
async fn unknown_place_is_404() {
    let (status, _) = get_json("/api/places/atlantis").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn bookmarks_without_list_filter_returns_all() {
    let (status, body) = get_json("/api/bookmarks?list=all").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 8);
}

#[tokio::test]
async fn map_endpoint_defaults_to_initial_viewport() {
    let (status, body) = get_json("/api/map?category=shopping").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["zoom"], 3);
    assert_eq!(body["center"]["latitude"], 40.0);
    assert!(body["focused"].is_null());
    assert_eq!(body["markers"][0]["id"], "tsukiji-outer-market");
}

#[tokio::test]
async fn cities_search_is_case_insensitive() {
    let (status, body) = get_json("/api/cities?search=JAPAN&sort=popular").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"][0]["id"], "tokyo");
    assert_eq!(body["count"], 2);
}

#[tokio::test]
async fn posting_a_review_returns_created() {
    let (_dir, state) = common::seeded_state();
    let (status, body) = send(
        state.clone(),
        post_json(
            "/api/places/colosseum/reviews",
            json!({ "rating": 3, "title": "Crowded", "content": "Midday was a crush.", "photos": [] }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["rating"], 3);
    assert_eq!(body["authorId"], "me");

    let (_, detail) = send(
        state,
        Request::builder()
            .uri("/api/places/colosseum")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(detail["reviews"]["count"], 2);
}

#[tokio::test]
async fn review_with_bad_rating_is_400() {
    for rating in [0, 6] {
        let (_dir, state) = common::seeded_state();
        let (status, _) = send(
            state,
            post_json(
                "/api/places/colosseum/reviews",
                json!({ "rating": rating, "title": "t", "content": "c" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "rating {rating}");
    }
}

#[tokio::test]
async fn review_for_unknown_place_is_404() {
    let (_dir, state) = common::seeded_state();
    let (status, _) = send(
        state,
        post_json(
            "/api/places/atlantis/reviews",
            json!({ "rating": 4, "title": "t", "content": "c" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn following_self_is_400() {
    let (_dir, state) = common::seeded_state();
    let (status, _) = send(state, post_json("/api/users/me/follow", Value::Null)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn follow_toggle_shows_in_following_endpoint() {
    let (_dir, state) = common::seeded_state();
    let (status, event) = send(state.clone(), post_json("/api/users/user4/follow", Value::Null)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(event["event"], "follow_toggled");
    assert_eq!(event["following"], false);

    let (_, following) = send(
        state.clone(),
        Request::builder().uri("/api/following").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(following.as_array().unwrap().len(), 5);

    let (status, user) = send(
        state,
        Request::builder().uri("/api/users/user4").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(user["isFollowing"], false);
}

#[tokio::test]
async fn unknown_user_is_404() {
    let (status, _) = get_json("/api/users/nobody").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn map_endpoint_applies_zoom_keys() {
    let (status, body) = get_json("/api/map?zoom=in,in,out,in").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["zoom"], 5);
}

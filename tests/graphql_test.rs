mod common;

use serde_json::Value;
use wanderly::graphql::CatalogSchema;

async fn run(schema: &CatalogSchema, query: &str) -> Value {
    let result = schema.execute(query).await;
    assert!(
        result.errors.is_empty(),
        "Expected no errors, got: {:?}",
        result.errors
    );
    result.data.into_json().unwrap()
}

fn ids(items: &Value, field: &str) -> Vec<String> {
    items
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item[field].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn places_filtered_and_sorted_by_rating() {
    let (_dir, state) = common::seeded_state();
    let data = run(
        &state.graphql_schema,
        r#"{ places(category: "restaurant", sort: "rating") {
                items { id rating thumbnailUrl }
                count total isEmpty sort
            } }"#,
    )
    .await;

    let page = &data["places"];
    assert_eq!(ids(&page["items"], "id"), vec!["le-jules-verne", "trattoria-veneto"]);
    assert_eq!(page["count"], 2);
    assert_eq!(page["total"], 10);
    assert_eq!(page["isEmpty"], false);
    assert_eq!(page["sort"], "rating");
    assert_eq!(page["items"][1]["thumbnailUrl"], "/placeholder.svg");
}

#[tokio::test]
async fn unmatched_category_is_an_empty_page() {
    let (_dir, state) = common::seeded_state();
    let data = run(
        &state.graphql_schema,
        r#"{ places(category: "nightlife") { items { id } count isEmpty } }"#,
    )
    .await;
    assert_eq!(data["places"]["isEmpty"], true);
    assert_eq!(data["places"]["count"], 0);
}

#[tokio::test]
async fn place_detail_orders_reviews() {
    let (_dir, state) = common::seeded_state();
    let data = run(
        &state.graphql_schema,
        r#"{ place(id: "eiffel-tower", reviewSort: "popular") {
                place { name }
                bookmarked
                reviews { items { id stars } count }
            } }"#,
    )
    .await;

    let detail = &data["place"];
    assert_eq!(detail["place"]["name"], "Eiffel Tower");
    assert_eq!(detail["bookmarked"], true);
    assert_eq!(
        ids(&detail["reviews"]["items"], "id"),
        vec!["review3", "review1", "review2"]
    );
    assert_eq!(
        detail["reviews"]["items"][2]["stars"],
        serde_json::json!([true, true, true, true, false])
    );

    let missing = run(&state.graphql_schema, r#"{ place(id: "atlantis") { bookmarked } }"#).await;
    assert!(missing["place"].is_null());
}

#[tokio::test]
async fn feed_filters_by_kind_newest_first() {
    let (_dir, state) = common::seeded_state();
    let data = run(
        &state.graphql_schema,
        r#"{ feed(kind: "list_created") { items { id target icon } sort } }"#,
    )
    .await;

    let feed = &data["feed"];
    assert_eq!(ids(&feed["items"], "id"), vec!["post3", "post6"]);
    assert_eq!(feed["items"][0]["target"], "Best Street Food in Asia");
    assert_eq!(feed["sort"], "recent");
}

#[tokio::test]
async fn trending_cities_by_name() {
    let (_dir, state) = common::seeded_state();
    let data = run(
        &state.graphql_schema,
        r#"{ cities(filter: "trending", sort: "name") { items { name } } }"#,
    )
    .await;
    assert_eq!(
        ids(&data["cities"]["items"], "name"),
        vec!["Barcelona", "Kyoto", "New York", "Paris", "Tokyo"]
    );
}

#[tokio::test]
async fn map_focus_zooms_in_and_saturates() {
    let (_dir, state) = common::seeded_state();
    let data = run(
        &state.graphql_schema,
        r#"{ map(focus: "eiffel-tower", zoomSteps: 10) {
                zoom
                center { latitude longitude }
                focused { id }
                markers { id focused }
            } }"#,
    )
    .await;

    let map = &data["map"];
    assert_eq!(map["zoom"], 15);
    assert_eq!(map["focused"]["id"], "eiffel-tower");
    assert_eq!(map["center"]["latitude"], 48.8584);
    assert_eq!(map["markers"].as_array().unwrap().len(), 10);
}

#[tokio::test]
async fn like_toggle_round_trips_counter() {
    let (_dir, state) = common::seeded_state();
    let schema = &state.graphql_schema;

    let liked = run(schema, r#"mutation { toggleLike(postId: "post1") { event active likes } }"#).await;
    assert_eq!(liked["toggleLike"]["event"], "like_toggled");
    assert_eq!(liked["toggleLike"]["active"], true);
    assert_eq!(liked["toggleLike"]["likes"], 235);

    let unliked = run(schema, r#"mutation { toggleLike(postId: "post1") { active likes } }"#).await;
    assert_eq!(unliked["toggleLike"]["active"], false);
    assert_eq!(unliked["toggleLike"]["likes"], 234);
}

#[tokio::test]
async fn bookmark_toggle_updates_saved_places() {
    let (_dir, state) = common::seeded_state();
    let schema = &state.graphql_schema;

    let removed = run(
        schema,
        r#"mutation { toggleBookmark(placeId: "colosseum") { active targetId } }"#,
    )
    .await;
    assert_eq!(removed["toggleBookmark"]["active"], false);
    assert_eq!(removed["toggleBookmark"]["targetId"], "colosseum");

    let visited = run(schema, r#"{ bookmarks(list: "visited") { items { place { id } } } }"#).await;
    assert_eq!(visited["bookmarks"]["items"].as_array().unwrap().len(), 1);

    let result = schema
        .execute(r#"mutation { toggleBookmark(placeId: "atlantis") { active } }"#)
        .await;
    assert!(!result.errors.is_empty());
}

#[tokio::test]
async fn notifications_mark_all_read() {
    let (_dir, state) = common::seeded_state();
    let schema = &state.graphql_schema;

    let unread = run(schema, r#"{ notifications(filter: "unread") { count } unreadCount }"#).await;
    assert_eq!(unread["notifications"]["count"], 3);
    assert_eq!(unread["unreadCount"], 3);

    let marked = run(schema, r#"mutation { markAllNotificationsRead { event count } }"#).await;
    assert_eq!(marked["markAllNotificationsRead"]["count"], 3);

    let after = run(schema, r#"{ unreadCount notifications(filter: "unread") { isEmpty } }"#).await;
    assert_eq!(after["unreadCount"], 0);
    assert_eq!(after["notifications"]["isEmpty"], true);
}

#[tokio::test]
async fn comment_on_missing_post_is_an_error() {
    let (_dir, state) = common::seeded_state();
    let result = state
        .graphql_schema
        .execute(r#"mutation { requestComment(postId: "nope") { event } }"#)
        .await;
    assert_eq!(result.errors.len(), 1);
    assert!(result.errors[0].message.contains("nope"));
}

#[tokio::test]
async fn created_review_joins_place_reviews() {
    let (_dir, state) = common::seeded_state();
    let schema = &state.graphql_schema;

    let created = run(
        schema,
        r#"mutation { createReview(placeId: "park-guell", input: {
                rating: 4, title: "Mosaics everywhere", content: "Book the monument zone ahead."
            }) { id authorName rating helpfulCount stars } }"#,
    )
    .await;
    let review = &created["createReview"];
    assert_eq!(review["authorName"], "Wanderer");
    assert_eq!(review["helpfulCount"], 0);
    assert_eq!(review["stars"], serde_json::json!([true, true, true, true, false]));

    let detail = run(
        schema,
        r#"{ place(id: "park-guell") { place { reviewCount } reviews { count items { id } } } }"#,
    )
    .await;
    assert_eq!(detail["place"]["place"]["reviewCount"], 2157);
    assert_eq!(detail["place"]["reviews"]["count"], 1);
    assert_eq!(detail["place"]["reviews"]["items"][0]["id"], review["id"]);
}

#[tokio::test]
async fn review_rating_outside_one_to_five_is_an_error() {
    let (_dir, state) = common::seeded_state();
    for rating in [0, 6] {
        let result = state
            .graphql_schema
            .execute(format!(
                r#"mutation {{ createReview(placeId: "park-guell", input: {{
                    rating: {rating}, title: "x", content: "y"
                }}) {{ id }} }}"#
            ))
            .await;
        assert_eq!(result.errors.len(), 1, "rating {rating} accepted");
    }

    let data = run(&state.graphql_schema, r#"{ reviews(placeId: "park-guell") { isEmpty } }"#).await;
    assert_eq!(data["reviews"]["isEmpty"], true);
}

#[tokio::test]
async fn review_like_and_reply_events() {
    let (_dir, state) = common::seeded_state();
    let schema = &state.graphql_schema;

    let liked = run(
        schema,
        r#"mutation { toggleReviewLike(reviewId: "review2") { event targetId active likes } }"#,
    )
    .await;
    assert_eq!(liked["toggleReviewLike"]["event"], "review_liked");
    assert_eq!(liked["toggleReviewLike"]["active"], true);
    assert_eq!(liked["toggleReviewLike"]["likes"], 157);

    let reply = run(schema, r#"mutation { requestReply(reviewId: "review2") { event targetId } }"#).await;
    assert_eq!(reply["requestReply"]["event"], "reply_requested");
    assert_eq!(reply["requestReply"]["targetId"], "review2");

    let result = schema
        .execute(r#"mutation { requestReply(reviewId: "review404") { event } }"#)
        .await;
    assert_eq!(result.errors.len(), 1);
}

#[tokio::test]
async fn follow_toggle_is_reflected_in_following() {
    let (_dir, state) = common::seeded_state();
    let schema = &state.graphql_schema;

    let before = run(schema, r#"{ following { id isFollowing } }"#).await;
    assert_eq!(
        ids(&before["following"], "id"),
        vec!["user1", "user2", "user3", "user4", "user5", "user6"]
    );

    let toggled = run(schema, r#"mutation { toggleFollow(userId: "user2") { active } }"#).await;
    assert_eq!(toggled["toggleFollow"]["active"], false);

    let after = run(
        schema,
        r#"{ following { id } user(id: "user2") { isFollowing followerCount username } }"#,
    )
    .await;
    assert!(!ids(&after["following"], "id").contains(&"user2".to_string()));
    assert_eq!(after["user"]["isFollowing"], false);
    assert_eq!(after["user"]["followerCount"], 0);
    assert_eq!(after["user"]["username"], "alexm");
}

#[tokio::test]
async fn map_zoom_keys_follow_zoom_steps() {
    let (_dir, state) = common::seeded_state();
    let data = run(
        &state.graphql_schema,
        r#"{ map(focus: "colosseum", zoomSteps: 2, zoom: ["out", "tilt", "out", "out"]) { zoom } }"#,
    )
    .await;
    assert_eq!(data["map"]["zoom"], 9);
}

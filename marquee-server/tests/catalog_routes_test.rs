mod support;

use axum::http::StatusCode;
use marquee_model::CatalogIndex;
use serde_json::{Value, json};
use support::build_test_app;
use uuid::Uuid;

fn titles(body: &Value) -> Vec<&str> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|film| film["title"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn films_filtered_by_genre_best_rated_first() {
    let app = build_test_app(true);
    let uri = format!(
        "/api/v1/films?filter[genre]={}&sort=-imdb_rating",
        app.catalog.comedy
    );

    let (status, body) = app.get(&uri).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(titles(&body), ["Laugh Track", "Second Laugh"]);
    assert_eq!(body[0]["uuid"], app.catalog.laugh_track.to_string());
    assert_eq!(body[0]["imdb_rating"], 8.1);
}

#[tokio::test]
async fn film_pages_follow_the_requested_sort() {
    let app = build_test_app(true);

    let (status, body) = app
        .get("/api/v1/films?sort=-imdb_rating&page[number]=2&page[size]=1")
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(titles(&body), ["Quiet Storm"]);
}

#[tokio::test]
async fn repeated_listing_is_served_from_cache() {
    let app = build_test_app(true);
    let uri = "/api/v1/films?sort=title";

    let (_, first) = app.get(uri).await;
    let searches = app.docs.search_calls();
    let (status, second) = app.get(uri).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(first, second);
    assert_eq!(app.docs.search_calls(), searches);
    assert_eq!(titles(&second), ["Laugh Track", "Quiet Storm", "Second Laugh"]);
}

#[tokio::test]
async fn genre_page_of_two_repeats_from_cache() {
    let app = build_test_app(true);
    app.docs
        .insert(
            CatalogIndex::Movies,
            json!({
                "id": Uuid::new_v4(),
                "title": "Third Laugh",
                "imdb_rating": 7.4,
                "description": "",
                "genre": ["Comedy"],
                "director": [],
                "actors_names": [],
                "writers_names": [],
                "actors": [],
                "writers": [],
            }),
        )
        .await;
    let uri = format!(
        "/api/v1/films?filter[genre]={}&sort=-imdb_rating&page[number]=1&page[size]=2",
        app.catalog.comedy
    );

    let (status, first) = app.get(&uri).await;
    let searches = app.docs.search_calls();
    let (_, second) = app.get(&uri).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(titles(&first), ["Laugh Track", "Third Laugh"]);
    assert_eq!(first, second);
    assert_eq!(app.docs.search_calls(), searches);
}

#[tokio::test]
async fn search_for_none_does_not_reuse_the_listing() {
    let app = build_test_app(true);

    let (status, _) = app.get("/api/v1/films").await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app.get("/api/v1/films/search?query=None").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn invalid_pagination_is_unprocessable() {
    let app = build_test_app(true);

    for query in [
        "page[number]=0",
        "page[size]=0",
        "page[size]=101",
        "page[number]=first",
    ] {
        let (status, body) = app.get(&format!("/api/v1/films?{query}")).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{query}");
        assert_eq!(body["error"]["status"], 422);
    }
}

#[tokio::test]
async fn malformed_genre_filter_is_unprocessable() {
    let app = build_test_app(true);

    let (status, _) = app.get("/api/v1/films?filter[genre]=comedy").await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn empty_genre_filter_lists_everything() {
    let app = build_test_app(true);

    let (status, body) = app.get("/api/v1/films?filter[genre]=").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(3));
}

#[tokio::test]
async fn film_details_resolve_genres_and_directors() {
    let app = build_test_app(true);
    let uri = format!("/api/v1/films/{}", app.catalog.laugh_track);

    let (status, film) = app.get(&uri).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(film["title"], "Laugh Track");
    assert_eq!(film["genre"][0]["name"], "Comedy");
    assert_eq!(film["genre"][0]["uuid"], app.catalog.comedy.to_string());
    assert_eq!(film["directors"][0]["full_name"], "Jo Park");
    assert_eq!(film["writers"][0]["uuid"], app.catalog.ann_lee.to_string());
}

#[tokio::test]
async fn unknown_and_malformed_film_ids() {
    let app = build_test_app(true);

    let (status, body) = app
        .get(&format!("/api/v1/films/{}", uuid::Uuid::new_v4()))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["status"], 404);

    let (status, _) = app.get("/api/v1/films/tt0111161").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn film_search_matches_titles() {
    let app = build_test_app(true);

    let (status, body) = app.get("/api/v1/films/search?query=laugh").await;

    assert_eq!(status, StatusCode::OK);
    let mut found = titles(&body);
    found.sort_unstable();
    assert_eq!(found, ["Laugh Track", "Second Laugh"]);
}

#[tokio::test]
async fn search_without_matches_is_not_found() {
    let app = build_test_app(true);

    let (status, _) = app.get("/api/v1/films/search?query=zeppelin").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn person_details_carry_role_and_films() {
    let app = build_test_app(true);

    let (status, person) = app
        .get(&format!("/api/v1/persons/{}", app.catalog.ann_lee))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(person["full_name"], "Ann Lee");
    assert_eq!(person["role"], "writer");
    assert_eq!(person["film_ids"].as_array().map(Vec::len), Some(3));

    let (status, person) = app
        .get(&format!("/api/v1/persons/{}", app.catalog.jo_park))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(person["role"], "director");
}

#[tokio::test]
async fn person_filmography_is_best_rated_first() {
    let app = build_test_app(true);

    let (status, body) = app
        .get(&format!("/api/v1/persons/{}/film", app.catalog.ann_lee))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(titles(&body), ["Laugh Track", "Quiet Storm", "Second Laugh"]);
}

#[tokio::test]
async fn person_search_matches_names() {
    let app = build_test_app(true);

    let (status, body) = app.get("/api/v1/persons/search?query=park").await;

    assert_eq!(status, StatusCode::OK);
    let people = body.as_array().unwrap();
    assert_eq!(people.len(), 1);
    assert_eq!(people[0]["uuid"], app.catalog.jo_park.to_string());
    assert_eq!(people[0]["role"], "director");
}

#[tokio::test]
async fn persons_listing_is_paginated() {
    let app = build_test_app(true);

    let (status, body) = app.get("/api/v1/persons?page[size]=1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn genres_listing_and_details() {
    let app = build_test_app(true);

    let (status, body) = app.get("/api/v1/genres").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(2));

    let (status, genre) = app
        .get(&format!("/api/v1/genres/{}", app.catalog.drama))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(genre["name"], "Drama");
    assert_eq!(genre["description"], "");
}

#[tokio::test]
async fn detail_responses_are_cached() {
    let app = build_test_app(true);
    let uri = format!("/api/v1/genres/{}", app.catalog.comedy);

    app.get(&uri).await;
    let lookups = app.docs.get_calls();
    let (status, _) = app.get(&uri).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(app.docs.get_calls(), lookups);
    assert!(app.cache.set_calls() >= 1);
}

use axum::{
    Json,
    extract::{Path, Query, State},
};
use marquee_core::{ListService, RetrieveService};
use marquee_model::{CatalogIndex, Genre, GenreList};

use super::params::{Paginator, parse_id};
use crate::infra::app_state::AppState;
use crate::infra::errors::{AppResult, ErrorBody};

#[utoipa::path(
    get,
    path = "/api/v1/genres",
    tag = "genres",
    params(
        ("page[number]" = Option<i64>, Query, description = "1-based page number, default 1"),
        ("page[size]" = Option<i64>, Query, description = "Page size, default 50, at most 100"),
    ),
    responses(
        (status = 200, description = "Page of genres", body = GenreList),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 404, description = "No genres on this page", body = ErrorBody),
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_genres(
    State(state): State<AppState>,
    Query(paginator): Query<Paginator>,
) -> AppResult<Json<GenreList>> {
    let page = paginator.page()?;

    let genres = ListService::<GenreList>::new(
        CatalogIndex::Genres,
        state.docs.clone(),
        state.cache_aside(),
    )
    .page(Some(page))
    .get()
    .await?;

    Ok(Json(genres))
}

#[utoipa::path(
    get,
    path = "/api/v1/genres/{genre_id}",
    tag = "genres",
    params(("genre_id" = Uuid, Path, description = "Genre id")),
    responses(
        (status = 200, description = "Genre", body = Genre),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 404, description = "Genre not found", body = ErrorBody),
        (status = 422, description = "Malformed id", body = ErrorBody),
    ),
    security(("bearer_auth" = []))
)]
pub async fn genre_details(
    State(state): State<AppState>,
    Path(genre_id): Path<String>,
) -> AppResult<Json<Genre>> {
    let id = parse_id("genre_id", &genre_id)?;

    let genre = RetrieveService::<Genre>::new(
        CatalogIndex::Genres,
        id,
        state.docs.clone(),
        state.cache_aside(),
    )
    .get()
    .await?;

    Ok(Json(genre))
}

use axum::{
    Json,
    extract::{Path, Query, State},
};
use marquee_core::{ListService, RetrieveService};
use marquee_model::{CatalogIndex, Film, FilmList, Filter};
use tracing::debug;

use super::params::{FilmListParams, Paginator, SearchParams, parse_id};
use crate::infra::app_state::AppState;
use crate::infra::errors::{AppError, AppResult, ErrorBody};

/// Popular films, optionally restricted to one genre.
#[utoipa::path(
    get,
    path = "/api/v1/films",
    tag = "films",
    params(
        ("filter[genre]" = Option<Uuid>, Query, description = "Only films of this genre"),
        ("sort" = Option<String>, Query, description = "Sort field, `-` prefix for descending"),
        ("page[number]" = Option<i64>, Query, description = "1-based page number, default 1"),
        ("page[size]" = Option<i64>, Query, description = "Page size, default 50, at most 100"),
    ),
    responses(
        (status = 200, description = "Page of films", body = FilmList),
        (status = 404, description = "No films match", body = ErrorBody),
        (status = 422, description = "Invalid filter or paging", body = ErrorBody),
    )
)]
pub async fn list_films(
    State(state): State<AppState>,
    Query(paginator): Query<Paginator>,
    Query(params): Query<FilmListParams>,
) -> AppResult<Json<FilmList>> {
    let page = paginator.page()?;
    let filter = Filter::parse_genre(params.genre.as_deref()).map_err(|_| {
        AppError::unprocessable(format!(
            "filter[genre] must be a UUID, got {:?}",
            params.genre.as_deref().unwrap_or_default()
        ))
    })?;

    debug!(%filter, sort = ?params.sort, "listing films");
    let films = ListService::<FilmList>::new(
        CatalogIndex::Movies,
        state.docs.clone(),
        state.cache_aside(),
    )
    .filter(filter)
    .sort(params.sort())
    .page(Some(page))
    .get()
    .await?;

    Ok(Json(films))
}

/// Full-text search over film titles.
#[utoipa::path(
    get,
    path = "/api/v1/films/search",
    tag = "films",
    params(
        ("query" = Option<String>, Query, description = "Text matched against titles"),
        ("page[number]" = Option<i64>, Query, description = "1-based page number, default 1"),
        ("page[size]" = Option<i64>, Query, description = "Page size, default 50, at most 100"),
    ),
    responses(
        (status = 200, description = "Matching films", body = FilmList),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 404, description = "No films match", body = ErrorBody),
        (status = 422, description = "Invalid paging", body = ErrorBody),
    ),
    security(("bearer_auth" = []))
)]
pub async fn search_films(
    State(state): State<AppState>,
    Query(paginator): Query<Paginator>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<FilmList>> {
    let page = paginator.page()?;

    let films = ListService::<FilmList>::new(
        CatalogIndex::Movies,
        state.docs.clone(),
        state.cache_aside(),
    )
    .search(params.intent(&["title"]))
    .page(Some(page))
    .get()
    .await?;

    Ok(Json(films))
}

#[utoipa::path(
    get,
    path = "/api/v1/films/{film_id}",
    tag = "films",
    params(("film_id" = Uuid, Path, description = "Film id")),
    responses(
        (status = 200, description = "Film with genres and crew", body = Film),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 404, description = "Film not found", body = ErrorBody),
        (status = 422, description = "Malformed id", body = ErrorBody),
    ),
    security(("bearer_auth" = []))
)]
pub async fn film_details(
    State(state): State<AppState>,
    Path(film_id): Path<String>,
) -> AppResult<Json<Film>> {
    let id = parse_id("film_id", &film_id)?;

    let film = RetrieveService::<Film>::new(
        CatalogIndex::Movies,
        id,
        state.docs.clone(),
        state.cache_aside(),
    )
    .get()
    .await?;

    Ok(Json(film))
}

use axum::{
    Json,
    extract::{Path, Query, State},
};
use marquee_core::{ListService, RetrieveService};
use marquee_model::{CatalogIndex, FilmList, Filter, Person, PersonList};

use super::params::{Paginator, SearchParams, parse_id};
use crate::infra::app_state::AppState;
use crate::infra::errors::{AppResult, ErrorBody};

#[utoipa::path(
    get,
    path = "/api/v1/persons",
    tag = "persons",
    params(
        ("page[number]" = Option<i64>, Query, description = "1-based page number, default 1"),
        ("page[size]" = Option<i64>, Query, description = "Page size, default 50, at most 100"),
    ),
    responses(
        (status = 200, description = "Page of persons", body = PersonList),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 404, description = "No persons on this page", body = ErrorBody),
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_persons(
    State(state): State<AppState>,
    Query(paginator): Query<Paginator>,
) -> AppResult<Json<PersonList>> {
    let page = paginator.page()?;

    let persons = ListService::<PersonList>::new(
        CatalogIndex::Persons,
        state.docs.clone(),
        state.cache_aside(),
    )
    .page(Some(page))
    .get()
    .await?;

    Ok(Json(persons))
}

/// Full-text search over person names.
#[utoipa::path(
    get,
    path = "/api/v1/persons/search",
    tag = "persons",
    params(
        ("query" = Option<String>, Query, description = "Text matched against full names"),
        ("page[number]" = Option<i64>, Query, description = "1-based page number, default 1"),
        ("page[size]" = Option<i64>, Query, description = "Page size, default 50, at most 100"),
    ),
    responses(
        (status = 200, description = "Matching persons", body = PersonList),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 404, description = "No persons match", body = ErrorBody),
    ),
    security(("bearer_auth" = []))
)]
pub async fn search_persons(
    State(state): State<AppState>,
    Query(paginator): Query<Paginator>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<PersonList>> {
    let page = paginator.page()?;

    let persons = ListService::<PersonList>::new(
        CatalogIndex::Persons,
        state.docs.clone(),
        state.cache_aside(),
    )
    .search(params.intent(&["full_name"]))
    .page(Some(page))
    .get()
    .await?;

    Ok(Json(persons))
}

#[utoipa::path(
    get,
    path = "/api/v1/persons/{person_id}",
    tag = "persons",
    params(("person_id" = Uuid, Path, description = "Person id")),
    responses(
        (status = 200, description = "Person with role and films", body = Person),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 404, description = "Person not found", body = ErrorBody),
        (status = 422, description = "Malformed id", body = ErrorBody),
    ),
    security(("bearer_auth" = []))
)]
pub async fn person_details(
    State(state): State<AppState>,
    Path(person_id): Path<String>,
) -> AppResult<Json<Person>> {
    let id = parse_id("person_id", &person_id)?;

    let person = RetrieveService::<Person>::new(
        CatalogIndex::Persons,
        id,
        state.docs.clone(),
        state.cache_aside(),
    )
    .get()
    .await?;

    Ok(Json(person))
}

/// Every film the person is credited on, best rated first. Not paginated.
#[utoipa::path(
    get,
    path = "/api/v1/persons/{person_id}/film",
    tag = "persons",
    params(("person_id" = Uuid, Path, description = "Person id")),
    responses(
        (status = 200, description = "The person's films", body = FilmList),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 404, description = "Person or films not found", body = ErrorBody),
        (status = 422, description = "Malformed id", body = ErrorBody),
    ),
    security(("bearer_auth" = []))
)]
pub async fn person_films(
    State(state): State<AppState>,
    Path(person_id): Path<String>,
) -> AppResult<Json<FilmList>> {
    let id = parse_id("person_id", &person_id)?;

    let films = ListService::<FilmList>::new(
        CatalogIndex::Movies,
        state.docs.clone(),
        state.cache_aside(),
    )
    .filter(Filter::ByPersonId(id))
    .get()
    .await?;

    Ok(Json(films))
}

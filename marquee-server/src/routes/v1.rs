use axum::{Router, middleware, routing::get};

use crate::{
    AppState, auth,
    handlers::{films, genres, persons},
};

/// Create all v1 API routes
pub fn create_v1_router(state: AppState) -> Router<AppState> {
    Router::new()
        // Public homepage listing
        .route("/films", get(films::list_films))
        .merge(create_protected_routes(state))
}

/// Routes that require a bearer token outside debug mode
fn create_protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/films/search", get(films::search_films))
        .route("/films/{film_id}", get(films::film_details))
        .route("/persons", get(persons::list_persons))
        .route("/persons/search", get(persons::search_persons))
        .route("/persons/{person_id}", get(persons::person_details))
        .route("/persons/{person_id}/film", get(persons::person_films))
        .route("/genres", get(genres::list_genres))
        .route("/genres/{genre_id}", get(genres::genre_details))
        .route_layer(middleware::from_fn_with_state(
            state,
            auth::middleware::auth_middleware,
        ))
}

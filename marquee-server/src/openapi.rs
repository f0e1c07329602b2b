//! OpenAPI description of the `/api/v1` routes.
//!
//! The document is served at `/{docs}.json` and, with the `swagger-ui`
//! feature, browsable at `/{docs}`. Neither route requires a token.

use axum::Router;
use marquee_config::ServerConfig;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::AppState;
use crate::handlers::{films, genres, persons};
use crate::infra::errors::{ErrorBody, ErrorDetail};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Marquee",
        description = "Read-only API for an online cinema catalog",
        license(name = "MIT OR Apache-2.0")
    ),
    paths(
        films::list_films,
        films::search_films,
        films::film_details,
        persons::list_persons,
        persons::search_persons,
        persons::person_details,
        persons::person_films,
        genres::list_genres,
        genres::genre_details,
    ),
    components(schemas(ErrorBody, ErrorDetail)),
    tags(
        (name = "films", description = "Films with genres and crew"),
        (name = "persons", description = "Actors, writers and directors"),
        (name = "genres", description = "Film genres"),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("HS256 token signed with SECRET_KEY"))
                        .build(),
                ),
            );
        }
    }
}

/// The generated document titled with the configured project name.
pub fn api_doc(project_name: &str) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    doc.info.title = project_name.to_string();
    doc
}

/// Routes serving the document, mounted outside access control.
#[cfg(feature = "swagger-ui")]
pub fn docs_router(server: &ServerConfig, project_name: &str) -> Router<AppState> {
    use utoipa_swagger_ui::SwaggerUi;

    Router::new().merge(
        SwaggerUi::new(server.docs_ui_path()).url(server.docs_json_path(), api_doc(project_name)),
    )
}

/// Routes serving the document, mounted outside access control.
#[cfg(not(feature = "swagger-ui"))]
pub fn docs_router(server: &ServerConfig, project_name: &str) -> Router<AppState> {
    use axum::{Json, routing::get};

    let doc = api_doc(project_name);
    Router::new().route(
        &server.docs_json_path(),
        get(move || {
            let doc = doc.clone();
            async move { Json(doc) }
        }),
    )
}

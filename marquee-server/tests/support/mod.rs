#![allow(dead_code)]

use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use jsonwebtoken::{EncodingKey, Header, encode};
use marquee_config::{
    AuthConfig, CacheConfig, Config, ConfigMetadata, ElasticConfig, RedisConfig, RetryConfig,
    ServerConfig,
};
use marquee_core::infra::{MemoryCache, MemoryDocumentStore};
use marquee_model::CatalogIndex;
use marquee_server::{AppState, create_app};
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

pub const SECRET: &str = "integration-secret";

/// Two genres, two people and three films:
///
/// | film         | rating | genre  | credits                              |
/// |--------------|--------|--------|--------------------------------------|
/// | Laugh Track  | 8.1    | Comedy | writer Ann Lee, director Jo Park     |
/// | Second Laugh | 6.5    | Comedy | writer Ann Lee                       |
/// | Quiet Storm  | 7.0    | Drama  | actor Ann Lee, director Jo Park      |
#[derive(Debug, Clone, Copy)]
pub struct Catalog {
    pub comedy: Uuid,
    pub drama: Uuid,
    pub ann_lee: Uuid,
    pub jo_park: Uuid,
    pub laugh_track: Uuid,
    pub second_laugh: Uuid,
    pub quiet_storm: Uuid,
}

impl Catalog {
    fn new() -> Self {
        Self {
            comedy: Uuid::new_v4(),
            drama: Uuid::new_v4(),
            ann_lee: Uuid::new_v4(),
            jo_park: Uuid::new_v4(),
            laugh_track: Uuid::new_v4(),
            second_laugh: Uuid::new_v4(),
            quiet_storm: Uuid::new_v4(),
        }
    }

    fn documents(&self) -> Vec<(CatalogIndex, Value)> {
        let ann = json!([{ "id": self.ann_lee, "name": "Ann Lee" }]);
        vec![
            (
                CatalogIndex::Genres,
                json!({
                    "id": self.comedy,
                    "name": "Comedy",
                    "description": "Films that make you laugh",
                }),
            ),
            (
                CatalogIndex::Genres,
                json!({ "id": self.drama, "name": "Drama", "description": null }),
            ),
            (
                CatalogIndex::Persons,
                json!({ "id": self.ann_lee, "full_name": "Ann Lee" }),
            ),
            (
                CatalogIndex::Persons,
                json!({ "id": self.jo_park, "full_name": "Jo Park" }),
            ),
            (
                CatalogIndex::Movies,
                json!({
                    "id": self.laugh_track,
                    "title": "Laugh Track",
                    "imdb_rating": 8.1,
                    "description": "A sitcom writer's worst week.",
                    "genre": ["Comedy"],
                    "director": ["Jo Park"],
                    "actors_names": [],
                    "writers_names": ["Ann Lee"],
                    "actors": [],
                    "writers": ann.clone(),
                }),
            ),
            (
                CatalogIndex::Movies,
                json!({
                    "id": self.second_laugh,
                    "title": "Second Laugh",
                    "imdb_rating": 6.5,
                    "description": null,
                    "genre": ["Comedy"],
                    "director": [],
                    "actors_names": [],
                    "writers_names": ["Ann Lee"],
                    "actors": [],
                    "writers": ann.clone(),
                }),
            ),
            (
                CatalogIndex::Movies,
                json!({
                    "id": self.quiet_storm,
                    "title": "Quiet Storm",
                    "imdb_rating": 7.0,
                    "description": "Weather and grief on a small island.",
                    "genre": ["Drama"],
                    "director": ["Jo Park"],
                    "actors_names": ["Ann Lee"],
                    "writers_names": [],
                    "actors": ann.clone(),
                    "writers": [],
                }),
            ),
        ]
    }
}

#[derive(Debug)]
pub struct TestApp {
    pub router: Router,
    pub docs: Arc<MemoryDocumentStore>,
    pub cache: Arc<MemoryCache>,
    pub catalog: Catalog,
}

impl TestApp {
    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(uri, None).await
    }

    pub async fn get_with_auth(&self, uri: &str, authorization: &str) -> (StatusCode, Value) {
        self.send(uri, Some(authorization)).await
    }

    /// Status only, for routes that do not answer with JSON.
    pub async fn status(&self, uri: &str) -> StatusCode {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        self.router.clone().oneshot(request).await.unwrap().status()
    }

    async fn send(&self, uri: &str, authorization: Option<&str>) -> (StatusCode, Value) {
        let mut request = Request::builder().uri(uri);
        if let Some(value) = authorization {
            request = request.header(header::AUTHORIZATION, value);
        }
        let response = self
            .router
            .clone()
            .oneshot(request.body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }
}

pub fn test_config(debug: bool) -> Config {
    Config {
        project_name: "Marquee test".into(),
        server: ServerConfig {
            host: "127.0.0.1".into(),
            port: 0,
            docs: "openapi".into(),
        },
        elastic: ElasticConfig {
            url: "http://127.0.0.1:9200".into(),
        },
        redis: RedisConfig {
            url: "redis://127.0.0.1:6379".into(),
        },
        cache: CacheConfig {
            ttl: Duration::from_secs(60),
        },
        retry: RetryConfig {
            max_attempts: 1,
            initial_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(1),
        },
        auth: AuthConfig {
            secret_key: SECRET.into(),
        },
        debug,
        metadata: ConfigMetadata::default(),
    }
}

pub fn build_test_app(debug: bool) -> TestApp {
    let catalog = Catalog::new();
    let docs = Arc::new(MemoryDocumentStore::seeded(catalog.documents()));
    let cache = Arc::new(MemoryCache::new());
    let state = AppState::new(docs.clone(), cache.clone(), test_config(debug));

    TestApp {
        router: create_app(state),
        docs,
        cache,
        catalog,
    }
}

/// Bearer header for a token expiring `expires_in` seconds from now.
pub fn bearer(secret: &str, expires_in: i64) -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as i64;
    let token = encode(
        &Header::default(),
        &json!({ "sub": "viewer", "exp": now + expires_in }),
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap();
    format!("Bearer {token}")
}

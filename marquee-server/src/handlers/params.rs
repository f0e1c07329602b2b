//! Query-string parsing shared by the catalog handlers.
//!
//! Everything arrives as raw text and is validated here, so malformed input
//! is reported as 422 with the offending parameter named.

use marquee_model::{Page, SearchIntent, SortSpec};
use serde::Deserialize;
use uuid::Uuid;

use crate::infra::errors::{AppError, AppResult};

pub const DEFAULT_PAGE_NUMBER: i64 = 1;
pub const DEFAULT_PAGE_SIZE: i64 = 50;

/// `page[number]` and `page[size]`.
#[derive(Debug, Default, Deserialize)]
pub struct Paginator {
    #[serde(rename = "page[number]")]
    pub number: Option<String>,
    #[serde(rename = "page[size]")]
    pub size: Option<String>,
}

impl Paginator {
    pub fn page(&self) -> AppResult<Page> {
        let number =
            parse_int("page[number]", self.number.as_deref())?.unwrap_or(DEFAULT_PAGE_NUMBER);
        let size = parse_int("page[size]", self.size.as_deref())?.unwrap_or(DEFAULT_PAGE_SIZE);
        Ok(Page::new(number, size)?)
    }
}

fn parse_int(name: &str, raw: Option<&str>) -> AppResult<Option<i64>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(|_| {
            AppError::unprocessable(format!("{name} must be an integer, got {value:?}"))
        }),
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct FilmListParams {
    #[serde(rename = "filter[genre]")]
    pub genre: Option<String>,
    pub sort: Option<String>,
}

impl FilmListParams {
    pub fn sort(&self) -> Option<SortSpec> {
        self.sort.as_deref().and_then(SortSpec::parse)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub query: Option<String>,
}

impl SearchParams {
    /// A missing or blank query lists without matching.
    pub fn intent(&self, fields: &[&str]) -> Option<SearchIntent> {
        self.query
            .as_deref()
            .and_then(|text| SearchIntent::new(text, fields.iter().copied()))
    }
}

pub fn parse_id(name: &str, raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw.trim())
        .map_err(|_| AppError::unprocessable(format!("{name} must be a UUID, got {raw:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    fn paginator(number: Option<&str>, size: Option<&str>) -> Paginator {
        Paginator {
            number: number.map(str::to_string),
            size: size.map(str::to_string),
        }
    }

    #[test]
    fn defaults_apply_when_absent() {
        let page = Paginator::default().page().unwrap();
        assert_eq!(page.number(), 1);
        assert_eq!(page.size(), 50);
    }

    #[test]
    fn explicit_values_are_used() {
        let page = paginator(Some("3"), Some("20")).page().unwrap();
        assert_eq!(page.number(), 3);
        assert_eq!(page.size(), 20);
        assert_eq!(page.offset(), 40);
    }

    #[test]
    fn out_of_range_and_non_numeric_are_unprocessable() {
        for (number, size) in [
            (Some("0"), None),
            (None, Some("0")),
            (None, Some("101")),
            (Some("first"), None),
            (Some("-2"), None),
        ] {
            let err = paginator(number, size).page().unwrap_err();
            assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY, "{number:?} {size:?}");
        }
    }

    #[test]
    fn blank_query_is_no_search() {
        let params = SearchParams {
            query: Some("   ".into()),
        };
        assert!(params.intent(&["title"]).is_none());

        let params = SearchParams {
            query: Some("storm".into()),
        };
        let intent = params.intent(&["title"]).unwrap();
        assert_eq!(intent.text(), "storm");
        assert_eq!(intent.fields(), ["title".to_string()]);
    }

    #[test]
    fn malformed_ids_name_the_parameter() {
        let err = parse_id("film_id", "tt0111161").unwrap_err();
        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(err.message.contains("film_id"));
    }
}

use std::fmt::{self, Display, Formatter};

use marquee_model::CatalogIndex;
use uuid::Uuid;

use crate::query::ListQuery;

/// Cache key derived from a service's index and bound parameters.
///
/// Lists render as
/// `{index}::filter::{f}::page_number::{n}::page_size::{s}::query::{q}::sort::{o}`
/// and single entities as `{index}::id::{id}`. Unbound parts render as
/// `None`; bound text parts render as `={value}` with `%`, `:` and `=`
/// percent-encoded, so no value can spell an absent part or a separator.
/// Search fields are not part of the key; each route searches a fixed field
/// set.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

fn or_none<T: Display>(value: Option<T>) -> String {
    value.map_or_else(|| "None".to_string(), |v| v.to_string())
}

fn text_or_none<T: Display>(value: Option<T>) -> String {
    value.map_or_else(|| "None".to_string(), |v| format!("={}", escape(&v.to_string())))
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '%' => out.push_str("%25"),
            ':' => out.push_str("%3A"),
            '=' => out.push_str("%3D"),
            other => out.push(other),
        }
    }
    out
}

impl CacheKey {
    pub fn list(index: CatalogIndex, query: &ListQuery) -> Self {
        Self(format!(
            "{}::filter::{}::page_number::{}::page_size::{}::query::{}::sort::{}",
            index,
            query.filter,
            or_none(query.page.map(|p| p.number())),
            or_none(query.page.map(|p| p.size())),
            text_or_none(query.search.as_ref().map(|s| s.text())),
            text_or_none(query.sort.as_ref()),
        ))
    }

    pub fn retrieve(index: CatalogIndex, id: Uuid) -> Self {
        Self(format!("{}::id::{}", index, id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for CacheKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marquee_model::{Filter, Page, SearchIntent, SortSpec};

    #[test]
    fn unbound_list_renders_none_everywhere() {
        let key = CacheKey::list(CatalogIndex::Genres, &ListQuery::new());
        assert_eq!(
            key.as_str(),
            "genres::filter::None::page_number::None::page_size::None::query::None::sort::None"
        );
    }

    #[test]
    fn bound_parameters_render_in_order() {
        let genre = Uuid::nil();
        let query = ListQuery::new()
            .filter(Filter::ByGenreId(genre))
            .sort(SortSpec::parse("-imdb_rating"))
            .page(Some(Page::new(2, 50).unwrap()));

        assert_eq!(
            CacheKey::list(CatalogIndex::Movies, &query).as_str(),
            format!(
                "movies::filter::genre:{genre}::page_number::2::page_size::50::query::None::sort::=-imdb_rating"
            )
        );
    }

    #[test]
    fn equal_parameters_give_equal_keys() {
        let build = || {
            ListQuery::new()
                .search(SearchIntent::new("alien", ["title"]))
                .page(Some(Page::new(1, 10).unwrap()))
        };
        assert_eq!(
            CacheKey::list(CatalogIndex::Movies, &build()),
            CacheKey::list(CatalogIndex::Movies, &build())
        );
        assert_ne!(
            CacheKey::list(CatalogIndex::Movies, &build()),
            CacheKey::list(CatalogIndex::Persons, &build())
        );
    }

    #[test]
    fn filter_kind_distinguishes_keys() {
        let id = Uuid::new_v4();
        let by_genre = ListQuery::new().filter(Filter::ByGenreId(id));
        let by_person = ListQuery::new().filter(Filter::ByPersonId(id));
        assert_ne!(
            CacheKey::list(CatalogIndex::Movies, &by_genre),
            CacheKey::list(CatalogIndex::Movies, &by_person)
        );
    }

    #[test]
    fn supply_order_does_not_change_the_key() {
        let genre = Uuid::new_v4();
        let first = ListQuery::new()
            .page(Some(Page::new(1, 2).unwrap()))
            .sort(SortSpec::parse("-imdb_rating"))
            .filter(Filter::ByGenreId(genre));
        let second = ListQuery::new()
            .filter(Filter::ByGenreId(genre))
            .page(Some(Page::new(1, 2).unwrap()))
            .sort(SortSpec::parse("-imdb_rating"));
        assert_eq!(
            CacheKey::list(CatalogIndex::Movies, &first),
            CacheKey::list(CatalogIndex::Movies, &second)
        );
    }

    #[test]
    fn literal_none_text_differs_from_absent_part() {
        let page = Some(Page::new(1, 50).unwrap());
        let unsearched = ListQuery::new().page(page);
        let searched = ListQuery::new()
            .page(page)
            .search(SearchIntent::new("None", ["title"]));
        assert_ne!(
            CacheKey::list(CatalogIndex::Movies, &unsearched),
            CacheKey::list(CatalogIndex::Movies, &searched)
        );

        let sorted = ListQuery::new().page(page).sort(SortSpec::parse("None"));
        assert!(sorted.sort.is_some());
        assert_ne!(
            CacheKey::list(CatalogIndex::Movies, &unsearched),
            CacheKey::list(CatalogIndex::Movies, &sorted)
        );
    }

    #[test]
    fn separators_inside_values_cannot_forge_other_parts() {
        let injected = ListQuery::new().search(SearchIntent::new("a::sort::X", ["title"]));
        let split = ListQuery::new()
            .search(SearchIntent::new("a", ["title"]))
            .sort(SortSpec::parse("X::sort::None"));
        let injected_key = CacheKey::list(CatalogIndex::Movies, &injected);
        assert_ne!(injected_key, CacheKey::list(CatalogIndex::Movies, &split));
        assert!(
            injected_key
                .as_str()
                .ends_with("::query::=a%3A%3Asort%3A%3AX::sort::None")
        );
    }

    #[test]
    fn escape_encodes_percent_first() {
        assert_eq!(escape("50%=a:b"), "50%25%3Da%3Ab");
        assert_eq!(escape("%3A"), "%253A");
    }

    #[test]
    fn retrieve_key_format() {
        let id = Uuid::nil();
        assert_eq!(
            CacheKey::retrieve(CatalogIndex::Movies, id).to_string(),
            format!("movies::id::{id}")
        );
    }
}

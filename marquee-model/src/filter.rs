use std::fmt::{self, Display, Formatter};

use uuid::Uuid;

/// Restricts a listing to documents related to another entity.
///
/// Constructing a filter from an absent or blank id yields [`Filter::None`]
/// rather than an error, so a caller passing `filter[genre]=` simply gets an
/// unfiltered listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Filter {
    #[default]
    None,
    ByGenreId(Uuid),
    ByPersonId(Uuid),
}

impl Filter {
    pub fn by_genre(id: Option<Uuid>) -> Self {
        id.map_or(Filter::None, Filter::ByGenreId)
    }

    pub fn by_person(id: Option<Uuid>) -> Self {
        id.map_or(Filter::None, Filter::ByPersonId)
    }

    /// Parses a raw genre id. Blank input is "no filter".
    pub fn parse_genre(raw: Option<&str>) -> Result<Self, uuid::Error> {
        Ok(Self::by_genre(parse_optional_id(raw)?))
    }

    /// Parses a raw person id. Blank input is "no filter".
    pub fn parse_person(raw: Option<&str>) -> Result<Self, uuid::Error> {
        Ok(Self::by_person(parse_optional_id(raw)?))
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Filter::None)
    }
}

fn parse_optional_id(raw: Option<&str>) -> Result<Option<Uuid>, uuid::Error> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => Uuid::parse_str(value).map(Some),
    }
}

/// Renders the cache-key fragment for this filter.
impl Display for Filter {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Filter::None => f.write_str("None"),
            Filter::ByGenreId(id) => write!(f, "genre:{}", id),
            Filter::ByPersonId(id) => write!(f, "person:{}", id),
        }
    }
}

/// Free-text query matched against an ordered set of fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchIntent {
    text: String,
    fields: Vec<String>,
}

impl SearchIntent {
    /// Returns `None` when the text is empty or whitespace only. Stored text
    /// is trimmed.
    pub fn new<I, S>(text: impl Into<String>, fields: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let text = text.into();
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        Some(Self {
            text: text.to_string(),
            fields: fields.into_iter().map(Into::into).collect(),
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_ids_mean_no_filter() {
        assert_eq!(Filter::parse_genre(None).unwrap(), Filter::None);
        assert_eq!(Filter::parse_genre(Some("")).unwrap(), Filter::None);
        assert_eq!(Filter::parse_person(Some("  ")).unwrap(), Filter::None);
        assert_eq!(Filter::by_genre(None), Filter::None);
    }

    #[test]
    fn malformed_ids_are_rejected() {
        assert!(Filter::parse_genre(Some("not-a-uuid")).is_err());
    }

    #[test]
    fn display_includes_filter_kind() {
        let id = Uuid::nil();
        assert_eq!(Filter::ByGenreId(id).to_string(), format!("genre:{id}"));
        assert_eq!(Filter::ByPersonId(id).to_string(), format!("person:{id}"));
        assert_eq!(Filter::None.to_string(), "None");
    }

    #[test]
    fn empty_search_text_is_absent() {
        assert!(SearchIntent::new("", ["title"]).is_none());
        assert!(SearchIntent::new("   ", ["title"]).is_none());

        let intent = SearchIntent::new("star", ["title"]).unwrap();
        assert_eq!(intent.text(), "star");
        assert_eq!(intent.fields(), ["title".to_string()]);
    }

    #[test]
    fn surrounding_whitespace_is_not_part_of_the_text() {
        let padded = SearchIntent::new(" alien ", ["title"]).unwrap();
        assert_eq!(padded.text(), "alien");
        assert_eq!(padded, SearchIntent::new("alien", ["title"]).unwrap());
    }
}

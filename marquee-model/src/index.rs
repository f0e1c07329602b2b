use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

/// Search indices holding catalog documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogIndex {
    Movies,
    Persons,
    Genres,
}

impl CatalogIndex {
    pub fn all() -> &'static [CatalogIndex] {
        &[CatalogIndex::Genres, CatalogIndex::Persons, CatalogIndex::Movies]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CatalogIndex::Movies => "movies",
            CatalogIndex::Persons => "persons",
            CatalogIndex::Genres => "genres",
        }
    }
}

impl Display for CatalogIndex {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for CatalogIndex {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

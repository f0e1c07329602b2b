use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The role a person holds in most of the films they appear in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum PrimaryRole {
    Actor,
    Writer,
    Director,
    /// No film credits the person by name.
    #[default]
    #[serde(rename = "")]
    Unassigned,
}

impl PrimaryRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrimaryRole::Actor => "actor",
            PrimaryRole::Writer => "writer",
            PrimaryRole::Director => "director",
            PrimaryRole::Unassigned => "",
        }
    }
}

impl Display for PrimaryRole {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Person with their primary role and the films they take part in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Person {
    pub uuid: Uuid,
    pub full_name: String,
    pub role: PrimaryRole,
    pub film_ids: Vec<Uuid>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(transparent)]
pub struct PersonList(pub Vec<Person>);

impl From<Vec<Person>> for PersonList {
    fn from(items: Vec<Person>) -> Self {
        Self(items)
    }
}

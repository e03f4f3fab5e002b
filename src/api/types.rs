use serde::{Deserialize, Serialize};

use crate::labels;

// ---------------------------------------------------------------------------
// Response envelope
// ---------------------------------------------------------------------------

/// Page envelope returned by `GET /characters`.
///
/// Only `items` is consumed; totals and paging metadata are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiResponse {
    #[serde(default)]
    pub items: Option<Vec<Character>>,
}

// ---------------------------------------------------------------------------
// Character
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub gender: Gender,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub species: String,
    /// Present on the wire but never displayed.
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub image: String,
}

// ---------------------------------------------------------------------------
// Enum-like wire fields
// ---------------------------------------------------------------------------

/// Character gender.
///
/// Unrecognised tags, `null` and missing values decode to
/// [`Gender::Unknown`], which keeps whatever the server sent so it
/// serializes back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum Gender {
    Male,
    Female,
    Unknown(Option<String>),
}

impl Default for Gender {
    fn default() -> Self {
        Self::Unknown(None)
    }
}

impl Gender {
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            "MALE" => Self::Male,
            "FEMALE" => Self::Female,
            other => Self::Unknown(Some(other.to_string())),
        }
    }

    /// Wire tag as received; empty when the server sent none.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Male => "MALE",
            Self::Female => "FEMALE",
            Self::Unknown(raw) => raw.as_deref().unwrap_or_default(),
        }
    }

    pub fn label(&self) -> &'static str {
        labels::translate_gender(self.as_str())
    }
}

impl From<Option<String>> for Gender {
    fn from(raw: Option<String>) -> Self {
        raw.as_deref().map_or_else(Self::default, Self::from_raw)
    }
}

impl From<Gender> for Option<String> {
    fn from(gender: Gender) -> Self {
        match gender {
            Gender::Unknown(raw) => raw,
            known => Some(known.as_str().to_string()),
        }
    }
}

/// Character life status. Unknown values keep their raw tag, as for
/// [`Gender`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum Status {
    Live,
    Dead,
    Unknown(Option<String>),
}

impl Default for Status {
    fn default() -> Self {
        Self::Unknown(None)
    }
}

impl Status {
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            "LIVE" => Self::Live,
            "DEAD" => Self::Dead,
            other => Self::Unknown(Some(other.to_string())),
        }
    }

    /// Wire tag as received; empty when the server sent none.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Live => "LIVE",
            Self::Dead => "DEAD",
            Self::Unknown(raw) => raw.as_deref().unwrap_or_default(),
        }
    }

    pub fn label(&self) -> &'static str {
        labels::translate_status(self.as_str())
    }
}

impl From<Option<String>> for Status {
    fn from(raw: Option<String>) -> Self {
        raw.as_deref().map_or_else(Self::default, Self::from_raw)
    }
}

impl From<Status> for Option<String> {
    fn from(status: Status) -> Self {
        match status {
            Status::Unknown(raw) => raw,
            known => Some(known.as_str().to_string()),
        }
    }
}

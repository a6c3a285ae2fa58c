//! Requests: a title of some medium asked for by a user in a server

use std::fmt;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{ServerId, ValidationError};

/// Discord user identifier (snowflake).
pub type UserId = i64;

/// Category of the requested title, stored as `SMALLINT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Medium {
    Anime,
    Manga,
    LightNovel,
    VisualNovel,
}

impl Medium {
    pub const ALL: [Medium; 4] = [
        Medium::Anime,
        Medium::Manga,
        Medium::LightNovel,
        Medium::VisualNovel,
    ];

    /// Storage code for this medium.
    pub fn code(self) -> i16 {
        match self {
            Medium::Anime => 0,
            Medium::Manga => 1,
            Medium::LightNovel => 2,
            Medium::VisualNovel => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Medium::Anime => "anime",
            Medium::Manga => "manga",
            Medium::LightNovel => "light_novel",
            Medium::VisualNovel => "visual_novel",
        }
    }
}

impl TryFrom<i16> for Medium {
    type Error = ValidationError;

    fn try_from(code: i16) -> Result<Self, Self::Error> {
        Medium::ALL
            .into_iter()
            .find(|m| m.code() == code)
            .ok_or_else(|| ValidationError::InvalidVariant {
                field: "medium",
                value: code.to_string(),
            })
    }
}

impl fmt::Display for Medium {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Non-empty request title. Mirrors the `title <> ''` table constraint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Title(String);

impl Title {
    pub fn new(s: impl Into<String>) -> Result<Self, ValidationError> {
        let s = s.into();
        if s.trim().is_empty() {
            return Err(ValidationError::Empty { field: "title" });
        }
        Ok(Self(s))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for Title {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Title> for String {
    fn from(title: Title) -> Self {
        title.0
    }
}

impl AsRef<str> for Title {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A request as it should be inserted; the id comes from the sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRequest {
    pub requester: UserId,
    pub server: ServerId,
    pub medium: Medium,
    pub title: Title,
}

/// A stored request. `(id, requester, server)` is the primary key.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct RequestRecord {
    pub id: i32,
    pub requester: UserId,
    pub server: ServerId,
    #[sqlx(try_from = "i16")]
    pub medium: Medium,
    #[sqlx(try_from = "String")]
    pub title: Title,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn medium_codes_are_stable() {
        assert_eq!(Medium::Anime.code(), 0);
        assert_eq!(Medium::Manga.code(), 1);
        assert_eq!(Medium::LightNovel.code(), 2);
        assert_eq!(Medium::VisualNovel.code(), 3);
    }

    #[test]
    fn medium_from_code() {
        for m in Medium::ALL {
            assert_eq!(Medium::try_from(m.code()).unwrap(), m);
        }
        let err = Medium::try_from(7).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidVariant { field: "medium", .. }));
    }

    #[test]
    fn title_rejects_blank() {
        assert!(matches!(
            Title::new("").unwrap_err(),
            ValidationError::Empty { field: "title" }
        ));
        assert!(Title::new("   ").is_err());
        assert_eq!(Title::new("Mushishi").unwrap().as_str(), "Mushishi");
    }

    #[test]
    fn title_deserialize_validates() {
        let ok: Result<Title, _> = title_from_toml("\"Planetes\"");
        assert!(ok.is_ok());
        let bad: Result<Title, _> = title_from_toml("\"\"");
        assert!(bad.is_err());
    }

    // toml needs a table at the top level, so wrap the value.
    fn title_from_toml(value: &str) -> Result<Title, toml::de::Error> {
        #[derive(Deserialize)]
        struct Wrap {
            t: Title,
        }
        toml::from_str::<Wrap>(&format!("t = {value}")).map(|w| w.t)
    }
}

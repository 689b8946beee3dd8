use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::store::Document;

/// A movie info record, as stored and as exchanged over HTTP.
///
/// `id` is assigned by the store; any value supplied by a client on create is
/// discarded. `cast` defaults to empty, `name` to blank and `year` to zero when
/// omitted, so a missing name or year is reported by validation rather than as
/// a decode failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieInfo {
    #[serde(default, alias = "movieInfoId")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub year: i32,
    #[serde(default)]
    pub cast: Vec<String>,
    #[serde(rename = "releaseDate", alias = "release_date")]
    pub release_date: NaiveDate,
}

impl MovieInfo {
    pub fn new(
        name: impl Into<String>,
        year: i32,
        cast: Vec<String>,
        release_date: NaiveDate,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            year,
            cast,
            release_date,
        }
    }

    /// Replace every field except the identifier with the fields of `patch`.
    pub fn replaced_by(self, patch: MovieInfo) -> Self {
        Self {
            id: self.id,
            ..patch
        }
    }

    /// This record without its identifier.
    pub fn without_id(self) -> Self {
        Self { id: None, ..self }
    }
}

impl Document for MovieInfo {
    const COLLECTION: &'static str = "movie_infos";

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn with_id(self, id: String) -> Self {
        Self {
            id: Some(id),
            ..self
        }
    }
}

//! Band and song records, plus the create/update payloads built from them.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::validation::{optional_str, required_str, Body};
use crate::error::ApiError;

/// A music group. `id` is chosen by the client and is the primary key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Band {
    /// Unique band id.
    pub id: String,
    /// Display name.
    pub name: String,
}

impl Band {
    /// Build a new band from a create request body.
    pub fn from_body(body: &Body) -> Result<Self, ApiError> {
        let id = required_str(body, "id")?;
        let name = required_str(body, "name")?;

        Ok(Self {
            id: id.to_string(),
            name: name.to_string(),
        })
    }
}

/// A track owned by a band through `band_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    /// Unique song id.
    pub id: String,
    /// Song title.
    pub name: String,
    /// Id of the owning band; not checked unless strict references are on.
    pub band_id: String,
}

impl Song {
    /// Build a new song from a create request body.
    pub fn from_body(body: &Body) -> Result<Self, ApiError> {
        let id = required_str(body, "id")?;
        let name = required_str(body, "name")?;
        let band_id = required_str(body, "bandId")?;

        Ok(Self {
            id: id.to_string(),
            name: name.to_string(),
            band_id: band_id.to_string(),
        })
    }
}

/// Row of the songs listing: a song joined with its band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
#[sqlx(rename_all = "camelCase")]
pub struct SongWithBand {
    pub id: String,
    pub name: String,
    pub band_id: String,
    pub band_name: String,
}

/// Fields to change on a band. `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BandPatch {
    pub id: Option<String>,
    pub name: Option<String>,
}

impl BandPatch {
    /// Build a patch from an update request body.
    pub fn from_body(body: &Body) -> Result<Self, ApiError> {
        Ok(Self {
            id: optional_str(body, "id")?.map(str::to_string),
            name: optional_str(body, "name")?.map(str::to_string),
        })
    }

    /// Merge onto the stored record.
    pub fn apply(&self, existing: Band) -> Band {
        Band {
            id: self.id.clone().unwrap_or(existing.id),
            name: self.name.clone().unwrap_or(existing.name),
        }
    }
}

/// Fields to change on a song. `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SongPatch {
    pub id: Option<String>,
    pub name: Option<String>,
    pub band_id: Option<String>,
}

impl SongPatch {
    /// Build a patch from an update request body.
    pub fn from_body(body: &Body) -> Result<Self, ApiError> {
        Ok(Self {
            id: optional_str(body, "id")?.map(str::to_string),
            name: optional_str(body, "name")?.map(str::to_string),
            band_id: optional_str(body, "bandId")?.map(str::to_string),
        })
    }

    /// Merge onto the stored record.
    pub fn apply(&self, existing: Song) -> Song {
        Song {
            id: self.id.clone().unwrap_or(existing.id),
            name: self.name.clone().unwrap_or(existing.name),
            band_id: self.band_id.clone().unwrap_or(existing.band_id),
        }
    }
}

//! Catalog domain: bands, songs, and request validation.

pub mod types;
pub mod validation;

pub use types::{Band, BandPatch, Song, SongPatch, SongWithBand};

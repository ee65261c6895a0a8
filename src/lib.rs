//! CRUD HTTP API for bands and their songs.
//!
//! Every endpoint follows the same shape: validate the raw JSON body, run one
//! query (or a lookup and a mutation inside one transaction), and map the
//! outcome to a status code and a short text or JSON body.
//!
//! # Endpoints
//!
//! ```text
//! GET    /ping         {"message":"Pong!"}
//! GET    /bands        [Band]
//! POST   /bands        {id, name}
//! PUT    /bands/:id    {id?, name?}
//! DELETE /bands/:id
//! GET    /songs        [{id, name, bandId, bandName}]
//! POST   /songs        {id, name, bandId}
//! PUT    /songs/:id    {id?, name?, bandId?}
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Process and per-request error types
//! - [`catalog`]: Band/song records and body validation
//! - [`store`]: SQLite queries
//! - [`api`]: HTTP handlers and router
//! - [`metrics`]: Prometheus metrics
//! - [`utils`]: Utility functions

pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod metrics;
pub mod store;
pub mod utils;

pub use config::Config;
pub use error::{ApiError, AppError, Result};

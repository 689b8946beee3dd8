//! Movie info service: validated CRUD over a record store.
//!
//! `MovieInfoService<S>` checks the create-path rules, clears client ids,
//! merges updates, and forwards everything else straight to the store. The
//! `http` module exposes it as a REST resource.
//!
//! ## Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use movies_info_service::{http, InMemoryStore, MovieInfoService};
//!
//! let service = Arc::new(MovieInfoService::new(InMemoryStore::new()));
//! http::serve(service, "0.0.0.0:8080").await?;
//! ```

mod error;
#[cfg(feature = "http")]
pub mod http;
mod movie_info_service;

pub use error::ServiceError;
pub use movie_info_service::MovieInfoService;

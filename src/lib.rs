pub mod config;
pub mod logging;
mod movie_info;
pub mod service;
pub mod store;
pub mod translator;
pub mod validation;

pub use config::{ConfigError, ServiceConfig, StoreKind};
pub use movie_info::MovieInfo;
pub use service::{MovieInfoService, ServiceError};
pub use store::{Document, DocumentStream, FileStore, InMemoryStore, RecordStore, StoreError};
pub use translator::translate;
pub use validation::{validate, FieldError};

// HTTP transport (requires "http" feature)
#[cfg(feature = "http")]
pub use service::http;

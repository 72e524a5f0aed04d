pub mod config;
pub mod error;
pub mod types;

pub use config::{Connection, StoreConfig, DEFAULT_CONNECTION};
pub use error::{ServiceError, ValidationError};
pub use types::{ListParams, ListResult, new_id, now};

mod fetch_service;
mod s3_store;
mod scratch;
mod store_service;

pub mod app;
pub mod config;

pub use app::start_app;
pub use fetch_service::{FetchError, FetchService};
pub use store_service::{ObjectStore, StoreError};

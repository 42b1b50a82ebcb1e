mod classify_service;
mod endpoint_service;
mod sagemaker_service;

pub mod app;
pub mod config;

pub use app::start_app;
pub use classify_service::{ClassifyError, ClassifyService};
pub use endpoint_service::{EndpointError, InferenceEndpoint};

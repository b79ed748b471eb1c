pub mod credential;
pub mod decoder;
pub mod executor;
pub mod inspector;
pub mod query;
pub mod service;

pub use crate::domain::model::{ApodRecord, Credential, Inspection, RateLimitInfo, Retrieval};
pub use crate::domain::ports::{ApodSource, ConfigProvider, Renderer};
pub use crate::utils::error::Result;
pub use credential::CredentialValidator;
pub use executor::RequestExecutor;
pub use service::ApodService;

use crate::domain::model::{ApodRecord, Retrieval};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait ConfigProvider: Send + Sync {
    fn api_endpoint(&self) -> &str;
    fn api_key(&self) -> Option<&str>;
    fn request_timeout(&self) -> Duration;
    fn high_definition(&self) -> bool;
    fn bind_address(&self) -> &str;
}

/// Anything that can produce the APOD record for a date.
///
/// `None` or an empty date means today.
#[async_trait]
pub trait ApodSource: Send + Sync {
    async fn fetch(&self, date: Option<&str>) -> Result<Retrieval>;
}

pub trait Renderer: Send + Sync {
    fn content_type(&self) -> &'static str;
    fn render(&self, record: &ApodRecord) -> Result<String>;
    fn render_error(&self, status: u16, message: &str) -> String;
}

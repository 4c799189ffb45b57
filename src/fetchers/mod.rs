use async_trait::async_trait;

use crate::error::ImportError;

mod charset;
mod request;

pub use charset::decode_body;
pub use request::RequestFetcher;

/// Status, content type and raw body of a GET request.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl FetchResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Retrieves the bytes behind a URL. Timeouts are the implementor's concern.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchResponse, ImportError>;
}

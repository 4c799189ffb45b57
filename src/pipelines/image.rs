use log::{debug, warn};

use crate::fetchers::Fetcher;
use crate::model::ImportedImage;

/// Fetch a recipe image. Every failure is logged and swallowed: a recipe
/// without its picture is still a successful import.
pub async fn download(fetcher: &dyn Fetcher, url: &str, max_bytes: usize) -> Option<ImportedImage> {
    let response = match fetcher.fetch(url).await {
        Ok(response) => response,
        Err(e) => {
            warn!("Image download failed for {url}: {e}");
            return None;
        }
    };

    if !response.is_success() {
        warn!("Image download for {url} returned HTTP {}", response.status);
        return None;
    }

    if let Some(content_type) = &response.content_type {
        if !content_type.trim().to_ascii_lowercase().starts_with("image/") {
            warn!("Image URL {url} served {content_type}, skipping");
            return None;
        }
    }

    if response.body.is_empty() || response.body.len() > max_bytes {
        warn!(
            "Image at {url} is {} bytes (limit {max_bytes}), skipping",
            response.body.len()
        );
        return None;
    }

    debug!("Downloaded image {url}: {} bytes", response.body.len());
    Some(ImportedImage {
        url: url.to_string(),
        content_type: response.content_type,
        bytes: response.body,
    })
}

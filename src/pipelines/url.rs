use log::{debug, warn};
use reqwest::Url;

use super::{image, ImportState};
use crate::config::ImportConfig;
use crate::error::ImportError;
use crate::extractors::{normalize, Extractor, JsonLdExtractor};
use crate::fetchers::{decode_body, FetchResponse, Fetcher, RequestFetcher};
use crate::model::{ImportOutcome, ImportedImage, ImportedRecipe};

const HTML_CONTENT_TYPES: [&str; 2] = ["text/html", "application/xhtml+xml"];

/// Turns a recipe page URL into an [`ImportedRecipe`].
///
/// The pipeline:
/// 1. Rejects anything that is not an http or https URL
/// 2. Fetches the page and checks status, content type and size
/// 3. Decodes the body (declared charset, then UTF-8, then Latin-1)
/// 4. Runs the JSON-LD extractor and the normalizer
/// 5. Downloads the recipe image if enabled, ignoring any failure
///
/// No step is retried. Callers retry by calling [`ImportPipeline::import`] again.
pub struct ImportPipeline<F: Fetcher = RequestFetcher> {
    fetcher: F,
    config: ImportConfig,
}

impl ImportPipeline<RequestFetcher> {
    /// Create a pipeline backed by a `reqwest` client built from `config`.
    pub fn from_config(config: ImportConfig) -> Result<Self, ImportError> {
        let fetcher = RequestFetcher::new(config.timeout_duration(), &config.user_agent)?;
        Ok(Self::new(fetcher, config))
    }
}

impl<F: Fetcher> ImportPipeline<F> {
    pub fn new(fetcher: F, config: ImportConfig) -> Self {
        Self { fetcher, config }
    }

    pub fn config(&self) -> &ImportConfig {
        &self.config
    }

    pub async fn import(&self, url: &str) -> Result<ImportOutcome, ImportError> {
        self.import_with_progress(url, |_| {}).await
    }

    /// Like [`import`](Self::import), reporting each state the import
    /// enters. The last state reported is always `Done` or `Failed`.
    pub async fn import_with_progress<P>(
        &self,
        url: &str,
        mut progress: P,
    ) -> Result<ImportOutcome, ImportError>
    where
        P: FnMut(ImportState) + Send,
    {
        let result = self.run(url, &mut progress).await;
        match &result {
            Ok(outcome) => {
                debug!("Imported \"{}\" from {url}", outcome.recipe.title);
                progress(ImportState::Done);
            }
            Err(e) => {
                warn!("Import of {url} failed: {e}");
                progress(ImportState::Failed);
            }
        }
        result
    }

    async fn run<P>(&self, url: &str, progress: &mut P) -> Result<ImportOutcome, ImportError>
    where
        P: FnMut(ImportState) + Send,
    {
        let source_url = url.trim();
        let page_url = parse_http_url(source_url)?;

        progress(ImportState::Fetching);
        let response = self.fetcher.fetch(page_url.as_str()).await?;
        let html = decode_page(response, self.config.max_body_bytes)?;

        progress(ImportState::Extracting);
        let candidate = JsonLdExtractor.extract(&html)?;

        progress(ImportState::Normalizing);
        let recipe = normalize(&candidate, Some(source_url))?;

        let image = if self.config.download_image {
            self.download_image(&page_url, &recipe).await
        } else {
            None
        };

        Ok(ImportOutcome { recipe, image })
    }

    async fn download_image(&self, page_url: &Url, recipe: &ImportedRecipe) -> Option<ImportedImage> {
        let advertised = recipe.image_url.as_deref()?;
        let image_url = match page_url.join(advertised) {
            Ok(resolved) => resolved,
            Err(e) => {
                warn!("Ignoring image URL {advertised}: {e}");
                return None;
            }
        };
        if !is_http(&image_url) {
            warn!("Ignoring image URL with scheme {}", image_url.scheme());
            return None;
        }

        image::download(&self.fetcher, image_url.as_str(), self.config.max_image_bytes).await
    }
}

fn parse_http_url(url: &str) -> Result<Url, ImportError> {
    let parsed = Url::parse(url).map_err(|e| ImportError::InvalidUrl(format!("{url}: {e}")))?;
    if !is_http(&parsed) {
        return Err(ImportError::UnsupportedScheme(parsed.scheme().to_string()));
    }
    Ok(parsed)
}

fn is_http(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https")
}

/// Check a page response and decode its body into text.
fn decode_page(response: FetchResponse, max_body_bytes: usize) -> Result<String, ImportError> {
    if !response.is_success() {
        return Err(ImportError::HttpStatus(response.status));
    }

    let content_type = response.content_type.as_deref();
    if let Some(content_type) = content_type {
        if !is_html(content_type) {
            return Err(ImportError::UnsupportedContentType(content_type.to_string()));
        }
    }

    if response.body.len() > max_body_bytes {
        return Err(ImportError::BodyTooLarge {
            limit: max_body_bytes,
            actual: response.body.len(),
        });
    }

    decode_body(&response.body, content_type).ok_or(ImportError::UndecodableBody)
}

fn is_html(content_type: &str) -> bool {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    HTML_CONTENT_TYPES.contains(&mime.as_str())
}

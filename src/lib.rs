pub mod builder;
pub mod config;
pub mod error;
pub mod extractors;
pub mod fetchers;
pub mod model;
pub mod parsers;
pub mod pipelines;

use log::debug;

use crate::extractors::Extractor;

// Re-export commonly used types
pub use builder::{RecipeImporter, RecipeImporterBuilder};
pub use config::{load_config, ImportConfig};
pub use error::ImportError;
pub use fetchers::{FetchResponse, Fetcher, RequestFetcher};
pub use model::{ImportOutcome, ImportedImage, ImportedRecipe};
pub use pipelines::{ImportPipeline, ImportState};

/// Fetch a recipe page and normalize its JSON-LD recipe.
///
/// Uses [`ImportConfig::default`] with image downloading turned off. Use
/// [`RecipeImporter::builder`] for anything else.
pub async fn fetch_recipe(url: &str) -> Result<ImportedRecipe, ImportError> {
    let config = ImportConfig {
        download_image: false,
        ..ImportConfig::default()
    };
    let outcome = ImportPipeline::from_config(config)?.import(url).await?;
    Ok(outcome.recipe)
}

/// Extract and normalize the recipe from HTML that is already in memory.
///
/// No network access happens here; `source_url` is only recorded on the result.
pub fn extract_recipe(html: &str, source_url: Option<&str>) -> Result<ImportedRecipe, ImportError> {
    let candidate = extractors::JsonLdExtractor.extract(html)?;
    debug!("Extracted recipe candidate with {} fields", candidate.as_map().len());
    extractors::normalize(&candidate, source_url)
}

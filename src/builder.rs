use std::time::Duration;

use crate::config::ImportConfig;
use crate::fetchers::RequestFetcher;
use crate::pipelines::ImportPipeline;
use crate::ImportError;

/// Builder for configuring an [`ImportPipeline`]
///
/// Settings left unset keep the values of the base configuration, which is
/// [`ImportConfig::default`] unless [`config`](Self::config) supplies one.
#[derive(Debug, Default)]
pub struct RecipeImporterBuilder {
    config: Option<ImportConfig>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    download_image: Option<bool>,
    max_body_bytes: Option<usize>,
}

impl RecipeImporterBuilder {
    /// Start from an existing configuration, e.g. one from [`crate::config::load_config`]
    ///
    /// # Example
    /// ```
    /// use recipe_import::{ImportConfig, RecipeImporter};
    ///
    /// let builder = RecipeImporter::builder()
    ///     .config(ImportConfig::default());
    /// ```
    pub fn config(mut self, config: ImportConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set a timeout for HTTP requests
    ///
    /// # Example
    /// ```
    /// use recipe_import::RecipeImporter;
    /// use std::time::Duration;
    ///
    /// let builder = RecipeImporter::builder()
    ///     .timeout(Duration::from_secs(10));
    /// ```
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Set the User-Agent header sent with every request
    ///
    /// # Example
    /// ```
    /// use recipe_import::RecipeImporter;
    ///
    /// let builder = RecipeImporter::builder()
    ///     .user_agent("my-recipe-box/1.0");
    /// ```
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Enable or disable downloading the recipe image
    ///
    /// # Example
    /// ```
    /// use recipe_import::RecipeImporter;
    ///
    /// let builder = RecipeImporter::builder()
    ///     .download_image(false);
    /// ```
    pub fn download_image(mut self, enabled: bool) -> Self {
        self.download_image = Some(enabled);
        self
    }

    /// Set the largest page body accepted, in bytes
    pub fn max_body_bytes(mut self, limit: usize) -> Self {
        self.max_body_bytes = Some(limit);
        self
    }

    /// Build the import pipeline
    ///
    /// # Errors
    /// Returns `ImportError` if:
    /// - The timeout is zero
    /// - The user agent is empty
    /// - The HTTP client cannot be created
    ///
    /// # Example
    /// ```no_run
    /// # use recipe_import::RecipeImporter;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let pipeline = RecipeImporter::builder().build()?;
    /// let outcome = pipeline.import("https://example.com/recipe").await?;
    /// println!("{}", outcome.recipe.title);
    /// # Ok(())
    /// # }
    /// ```
    pub fn build(self) -> Result<ImportPipeline<RequestFetcher>, ImportError> {
        let config = self.resolve()?;
        ImportPipeline::from_config(config)
    }

    fn resolve(self) -> Result<ImportConfig, ImportError> {
        let mut config = self.config.unwrap_or_default();

        if let Some(timeout) = self.timeout {
            if timeout.is_zero() {
                return Err(ImportError::BuilderError(
                    "Timeout must be greater than zero".to_string(),
                ));
            }
            // Sub-second timeouts round up
            config.timeout = timeout.as_secs() + u64::from(timeout.subsec_nanos() > 0);
        }
        if let Some(user_agent) = self.user_agent {
            config.user_agent = user_agent;
        }
        if let Some(enabled) = self.download_image {
            config.download_image = enabled;
        }
        if let Some(limit) = self.max_body_bytes {
            config.max_body_bytes = limit;
        }

        if config.user_agent.trim().is_empty() {
            return Err(ImportError::BuilderError(
                "User agent cannot be empty".to_string(),
            ));
        }

        Ok(config)
    }
}

/// Main entry point for the builder API
pub struct RecipeImporter;

impl RecipeImporter {
    /// Creates a new builder for importing recipes
    ///
    /// # Example
    /// ```
    /// use recipe_import::RecipeImporter;
    ///
    /// let builder = RecipeImporter::builder();
    /// ```
    pub fn builder() -> RecipeImporterBuilder {
        RecipeImporterBuilder::default()
    }
}

use thiserror::Error;

/// Errors that can occur during recipe import operations
#[derive(Error, Debug)]
pub enum ImportError {
    /// The URL could not be parsed at all
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Only http and https URLs are fetched
    #[error("Unsupported URL scheme: {0}")]
    UnsupportedScheme(String),

    /// Failed to fetch recipe from URL
    #[error("Failed to fetch URL: {0}")]
    FetchError(#[from] reqwest::Error),

    /// The server answered with a non-2xx status
    #[error("Server responded with HTTP status {0}")]
    HttpStatus(u16),

    /// The page is not an HTML document
    #[error("Unsupported content type: {0}")]
    UnsupportedContentType(String),

    /// The response body could not be decoded as text
    #[error("Response body could not be decoded as text")]
    UndecodableBody,

    /// The response body exceeds the configured limit
    #[error("Response body is {actual} bytes, limit is {limit}")]
    BodyTooLarge { limit: usize, actual: usize },

    /// No JSON-LD block on the page describes a recipe
    #[error("no recipe JSON found")]
    NoRecipeJson,

    /// The recipe JSON lacks a field the import cannot do without
    #[error("Recipe is missing required field: {0}")]
    MissingField(&'static str),

    /// Builder configuration error
    #[error("Builder error: {0}")]
    BuilderError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}

impl ImportError {
    /// True for failures that happened before any page content was parsed.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ImportError::InvalidUrl(_)
                | ImportError::UnsupportedScheme(_)
                | ImportError::FetchError(_)
                | ImportError::HttpStatus(_)
                | ImportError::UnsupportedContentType(_)
                | ImportError::UndecodableBody
                | ImportError::BodyTooLarge { .. }
        )
    }
}

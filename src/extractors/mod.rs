use serde_json::{Map, Value};

use crate::error::ImportError;

mod json_ld;
mod normalize;

pub use json_ld::{extract_candidate, JsonLdExtractor};
pub use normalize::normalize;

/// A JSON object from a page's structured data whose `@type` names a recipe.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeCandidate(Map<String, Value>);

impl RecipeCandidate {
    pub fn new(object: Map<String, Value>) -> Self {
        Self(object)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

pub trait Extractor {
    /// Locate recipe structured data in a page's HTML.
    fn extract(&self, html: &str) -> Result<RecipeCandidate, ImportError>;
}

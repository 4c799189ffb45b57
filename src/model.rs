use serde::{Deserialize, Serialize};

/// A recipe normalized from a page's structured data.
///
/// Built once per import attempt by the normalizer and handed to the caller
/// as-is; persistence layers copy it into their own records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportedRecipe {
    pub title: String,
    pub summary: Option<String>,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub prep_minutes: Option<u32>,
    pub cook_minutes: Option<u32>,
    pub total_minutes: Option<u32>,
    pub servings: Option<u32>,
    #[serde(rename = "imageURL")]
    pub image_url: Option<String>,
    pub nutrition_summary: Option<String>,
    pub author: Option<String>,
    pub keywords: Vec<String>,
    #[serde(rename = "sourceURL")]
    pub source_url: Option<String>,
}

/// Image bytes downloaded alongside a recipe.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedImage {
    pub url: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Everything a successful import produces.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportOutcome {
    pub recipe: ImportedRecipe,
    /// `None` when no image was advertised, downloading was disabled, or the
    /// download failed.
    pub image: Option<ImportedImage>,
}

use std::sync::LazyLock;

use html_escape::decode_html_entities;
use log::debug;
use regex::Regex;
use serde_json::Value;

use super::RecipeCandidate;
use crate::error::ImportError;
use crate::model::ImportedRecipe;
use crate::parsers::duration;

/// Nested instruction sections deeper than this are ignored.
const MAX_SECTION_DEPTH: usize = 8;

static FIRST_INTEGER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("Invalid integer regex"));

const NUTRITION_FIELDS: &[(&str, &str)] = &[
    ("calories", "Calories"),
    ("proteinContent", "Protein"),
    ("carbohydrateContent", "Carbohydrates"),
    ("fatContent", "Fat"),
];

/// Map a recipe candidate onto an [`ImportedRecipe`].
///
/// Only a missing or blank `name` is an error; every other field that is
/// absent or has an unexpected shape is simply left empty.
pub fn normalize(
    candidate: &RecipeCandidate,
    source_url: Option<&str>,
) -> Result<ImportedRecipe, ImportError> {
    let title = candidate
        .get("name")
        .and_then(Value::as_str)
        .map(clean_text)
        .filter(|name| !name.is_empty())
        .ok_or(ImportError::MissingField("name"))?;

    let ingredients = candidate
        .get("recipeIngredient")
        .or_else(|| candidate.get("ingredients"))
        .map(ingredients)
        .unwrap_or_default();

    let instructions = candidate
        .get("recipeInstructions")
        .map(|value| {
            let mut steps = Vec::new();
            collect_instructions(value, 0, &mut steps);
            steps
        })
        .unwrap_or_default();

    let recipe = ImportedRecipe {
        title,
        summary: candidate.get("description").and_then(non_empty_text),
        ingredients,
        instructions,
        prep_minutes: duration_field(candidate, "prepTime"),
        cook_minutes: duration_field(candidate, "cookTime"),
        total_minutes: duration_field(candidate, "totalTime"),
        servings: candidate.get("recipeYield").and_then(servings),
        image_url: candidate.get("image").and_then(image_url),
        nutrition_summary: candidate.get("nutrition").and_then(nutrition_summary),
        author: candidate.get("author").and_then(author),
        keywords: candidate.get("keywords").map(keywords).unwrap_or_default(),
        source_url: source_url.map(str::to_string),
    };

    debug!(
        "Normalized recipe '{}': {} ingredients, {} instructions",
        recipe.title,
        recipe.ingredients.len(),
        recipe.instructions.len()
    );
    Ok(recipe)
}

fn decode_html_symbols(text: &str) -> String {
    // pages sometimes double-encode entities (&amp;amp;)
    decode_html_entities(&decode_html_entities(text)).into_owned()
}

fn clean_text(text: &str) -> String {
    decode_html_symbols(text.trim()).trim().to_string()
}

fn non_empty_text(value: &Value) -> Option<String> {
    value
        .as_str()
        .map(clean_text)
        .filter(|text| !text.is_empty())
}

fn ingredients(value: &Value) -> Vec<String> {
    match value {
        Value::String(_) => non_empty_text(value).into_iter().collect(),
        Value::Array(items) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(_) => non_empty_text(item),
                Value::Object(object) => object.get("text").and_then(non_empty_text),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// Flatten strings, `HowToStep`s (`text`, else `name`) and `HowToSection`s
/// (`itemListElement`) into a list of steps.
fn collect_instructions(value: &Value, depth: usize, steps: &mut Vec<String>) {
    if depth > MAX_SECTION_DEPTH {
        return;
    }

    match value {
        Value::String(_) => steps.extend(non_empty_text(value)),
        Value::Array(items) => {
            for item in items {
                collect_instructions(item, depth + 1, steps);
            }
        }
        Value::Object(object) => {
            if let Some(elements) = object.get("itemListElement") {
                collect_instructions(elements, depth + 1, steps);
            } else if let Some(text) = object
                .get("text")
                .and_then(non_empty_text)
                .or_else(|| object.get("name").and_then(non_empty_text))
            {
                steps.push(text);
            }
        }
        _ => {}
    }
}

fn duration_field(candidate: &RecipeCandidate, key: &str) -> Option<u32> {
    candidate
        .get(key)
        .and_then(Value::as_str)
        .and_then(duration::minutes)
}

fn servings(value: &Value) -> Option<u32> {
    match value {
        Value::Number(number) => number
            .as_u64()
            .or_else(|| number.as_f64().filter(|n| *n >= 0.0).map(|n| n as u64))
            .and_then(|n| u32::try_from(n).ok()),
        Value::String(text) => FIRST_INTEGER_REGEX
            .find(text)
            .and_then(|m| m.as_str().parse().ok()),
        Value::Array(items) => items.first().and_then(servings),
        _ => None,
    }
}

fn image_url(value: &Value) -> Option<String> {
    match value {
        Value::String(_) => non_empty_text(value),
        Value::Array(items) => items.first().and_then(|first| match first {
            Value::String(_) => non_empty_text(first),
            Value::Object(object) => object.get("url").and_then(non_empty_text),
            _ => None,
        }),
        Value::Object(object) => object.get("url").and_then(non_empty_text),
        _ => None,
    }
}

fn nutrition_summary(value: &Value) -> Option<String> {
    let nutrition = value.as_object()?;
    let parts: Vec<String> = NUTRITION_FIELDS
        .iter()
        .filter_map(|(key, label)| {
            let amount = nutrition.get(*key).and_then(non_empty_text)?;
            Some(format!("{label}: {amount}"))
        })
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(", "))
    }
}

fn author(value: &Value) -> Option<String> {
    match value {
        Value::String(_) => non_empty_text(value),
        Value::Object(object) => object.get("name").and_then(non_empty_text),
        Value::Array(items) => {
            let names: Vec<String> = items.iter().filter_map(author).collect();
            if names.is_empty() {
                None
            } else {
                Some(names.join(", "))
            }
        }
        _ => None,
    }
}

fn keywords(value: &Value) -> Vec<String> {
    let split = |text: &str| -> Vec<String> {
        text.split(',')
            .map(clean_text)
            .filter(|keyword| !keyword.is_empty())
            .collect()
    };

    match value {
        Value::String(text) => split(text.as_str()),
        Value::Array(items) => items.iter().filter_map(Value::as_str).flat_map(split).collect(),
        _ => Vec::new(),
    }
}

use std::sync::LazyLock;

use log::debug;
use regex::Regex;
use serde_json::{Map, Value};

use super::{Extractor, RecipeCandidate};
use crate::error::ImportError;

/// Nesting deeper than this is not searched.
const MAX_DEPTH: usize = 32;

/// JSON-LD script blocks; attribute order and extra attributes vary by site.
static JSONLD_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?is)<script\b[^>]*\btype\s*=\s*["']?application/ld\+json["']?[^>]*>(.*?)</script\s*>"#,
    )
    .expect("Invalid JSON-LD script regex")
});

pub struct JsonLdExtractor;

impl Extractor for JsonLdExtractor {
    fn extract(&self, html: &str) -> Result<RecipeCandidate, ImportError> {
        extract_candidate(html).ok_or(ImportError::NoRecipeJson)
    }
}

/// Return the first recipe-typed object in the page's JSON-LD blocks, in
/// block order then depth-first order.
pub fn extract_candidate(html: &str) -> Option<RecipeCandidate> {
    let blocks: Vec<&str> = JSONLD_REGEX
        .captures_iter(html)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect();
    debug!("JsonLdExtractor: Found {} JSON-LD script tags", blocks.len());

    for (index, raw) in blocks.iter().enumerate() {
        let Some(json_ld) = parse_block(raw) else {
            debug!("JsonLdExtractor: Skipping unparsable JSON-LD block {index}");
            continue;
        };

        if let Some(recipe) = find_recipe(&json_ld, 0) {
            debug!("JsonLdExtractor: Found recipe in JSON-LD block {index}");
            return Some(RecipeCandidate::new(recipe.clone()));
        }
        debug!("JsonLdExtractor: No recipe found in JSON-LD block {index}");
    }

    None
}

/// Parse a block as-is, then with HTML escaping undone, then with raw
/// control characters inside strings escaped.
fn parse_block(raw: &str) -> Option<Value> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(value) = serde_json::from_str(trimmed) {
        return Some(value);
    }

    let unescaped = unescape_block(trimmed);
    match serde_json::from_str(&unescaped) {
        Ok(value) => Some(value),
        Err(e) => {
            debug!("JsonLdExtractor: Failed to parse unescaped JSON-LD: {e}");
            serde_json::from_str(&sanitize_json(&unescaped)).ok()
        }
    }
}

fn unescape_block(json: &str) -> String {
    json.replace("&quot;", "\"")
        .replace("\\u0022", "\"")
        .replace("<!--", "")
        .replace("-->", "")
        .replace("<![CDATA[", "")
        .replace("]]>", "")
        .trim()
        .to_string()
}

/// Some sites put literal newlines and tabs inside JSON strings.
fn sanitize_json(json: &str) -> String {
    let mut result = String::with_capacity(json.len());
    let mut in_string = false;
    let mut escaped = false;

    for c in json.chars() {
        if in_string {
            match c {
                _ if escaped => {
                    escaped = false;
                    result.push(c);
                }
                '\\' => {
                    escaped = true;
                    result.push(c);
                }
                '"' => {
                    in_string = false;
                    result.push(c);
                }
                '\n' => result.push_str("\\n"),
                '\r' => result.push_str("\\r"),
                '\t' => result.push_str("\\t"),
                c if c.is_control() => {}
                _ => result.push(c),
            }
        } else {
            if c == '"' {
                in_string = true;
            }
            result.push(c);
        }
    }

    result
}

fn find_recipe(value: &Value, depth: usize) -> Option<&Map<String, Value>> {
    if depth > MAX_DEPTH {
        return None;
    }

    match value {
        Value::Object(map) => {
            if is_recipe_type(map.get("@type")) {
                return Some(map);
            }
            ["@graph", "mainEntity"]
                .iter()
                .filter_map(|key| map.get(*key))
                .find_map(|nested| find_recipe(nested, depth + 1))
        }
        Value::Array(items) => items.iter().find_map(|item| find_recipe(item, depth + 1)),
        _ => None,
    }
}

fn is_recipe_type(type_value: Option<&Value>) -> bool {
    match type_value {
        Some(Value::String(s)) => has_recipe_token(s),
        Some(Value::Array(values)) => values.iter().filter_map(Value::as_str).any(has_recipe_token),
        _ => false,
    }
}

/// "Recipe", "schema:Recipe" and "http://schema.org/Recipe" qualify;
/// "RecipeCard" does not.
fn has_recipe_token(type_name: &str) -> bool {
    type_name
        .split(|c: char| !c.is_alphabetic())
        .any(|token| token.eq_ignore_ascii_case("recipe"))
}

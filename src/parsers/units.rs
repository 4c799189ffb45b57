//! Measurement units recognised after an ingredient quantity.
//!
//! Matching is case-insensitive. Entries are tried longest first so that
//! "tablespoons" wins over "tbs" and "fl oz" over "oz".

use std::sync::LazyLock;

/// Units sorted by length (longest first) for alternation order.
pub static UNITS_SORTED: LazyLock<Vec<&'static str>> = LazyLock::new(|| {
    let mut units = UNITS.to_vec();
    units.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()));
    units
});

pub const UNITS: &[&str] = &[
    // Volume - Metric
    "millilitres",
    "milliliters",
    "millilitre",
    "milliliter",
    "centilitres",
    "centiliters",
    "centilitre",
    "centiliter",
    "decilitres",
    "deciliters",
    "decilitre",
    "deciliter",
    "litres",
    "liters",
    "litre",
    "liter",
    "ml",
    "cl",
    "dl",
    "l",
    // Weight - Metric
    "kilogrammes",
    "kilogramme",
    "kilograms",
    "kilogram",
    "milligrams",
    "milligram",
    "grammes",
    "gramme",
    "grams",
    "gram",
    "kg",
    "mg",
    "g",
    // Volume - US / Imperial
    "fluid ounces",
    "fluid ounce",
    "tablespoons",
    "tablespoon",
    "teaspoons",
    "teaspoon",
    "gallons",
    "gallon",
    "quarts",
    "quart",
    "pints",
    "pint",
    "cups",
    "cup",
    "fl. oz.",
    "fl. oz",
    "fl oz",
    "tbsp.",
    "tbsp",
    "tbs",
    "tsp.",
    "tsp",
    "gal",
    "qt",
    "pt",
    // Weight - US / Imperial
    "ounces",
    "ounce",
    "pounds",
    "pound",
    "lbs.",
    "lbs",
    "lb.",
    "lb",
    "oz.",
    "oz",
    // French
    "cuillères à soupe",
    "cuillère à soupe",
    "cuillères à café",
    "cuillère à café",
    "cuillerées à soupe",
    "cuillerée à soupe",
    "cuillerées à café",
    "cuillerée à café",
    "c. à soupe",
    "c. à café",
    "c à soupe",
    "c à café",
    "c. à s.",
    "c. à c.",
    "c à s",
    "c à c",
    "c.à.s.",
    "c.à.c.",
    "càs",
    "càc",
    "pincées",
    "pincée",
    "tasses",
    "tasse",
    "verres",
    "verre",
];

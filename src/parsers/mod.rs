//! Text parsers shared by the importer and by callers working with imported
//! recipes. None of them fail: uninterpretable input yields `None` or an
//! empty result.

pub mod duration;
pub mod quantity;
pub mod time_expression;
pub mod units;

pub use quantity::{format_quantity, scale_ingredient, ParsedQuantity};
pub use time_expression::{detect as detect_times, DetectedTimeSpan};

//! Cell classification for pregen CSV values

use crate::app::models::CellValue;

/// Classify a raw CSV cell as numeric or text
///
/// A cell is numeric exactly when it parses as a decimal floating-point
/// literal (optional sign, digits, optional fraction and exponent). No
/// thousands separators or currency symbols are accepted; anything that
/// fails to parse is kept as raw text.
pub fn classify_cell(raw: &str) -> CellValue {
    match raw.parse::<f64>() {
        Ok(v) => CellValue::Numeric(v),
        Err(_) => CellValue::Text(raw.to_string()),
    }
}

//! Small helpers shared by the extractors and the run loop.
//!
//! - Date normalization into the `DD/MM/YYYY` output format
//! - Scalar-to-cell conversion for JSON values
//! - Log-friendly truncation of response bodies
//! - Output path preparation

use chrono::{DateTime, NaiveDate};
use serde_json::Value;
use std::io;
use std::path::Path;

/// Output format for every date cell.
pub const OUTPUT_DATE_FORMAT: &str = "%d/%m/%Y";

/// Format a milliseconds-since-epoch timestamp (UTC) as `DD/MM/YYYY`.
///
/// Accepts integral and fractional JSON numbers. Anything else, or a value
/// outside chrono's representable range, yields `None`.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(epoch_millis_to_date(&json!(0)).as_deref(), Some("01/01/1970"));
/// assert_eq!(epoch_millis_to_date(&json!("soon")), None);
/// ```
pub fn epoch_millis_to_date(value: &Value) -> Option<String> {
    let millis = match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.floor() as i64))?,
        _ => return None,
    };
    let dt = DateTime::from_timestamp_millis(millis)?;
    Some(dt.format(OUTPUT_DATE_FORMAT).to_string())
}

/// Reformat a long-form date such as `"5 March 2021"` as `DD/MM/YYYY`.
///
/// Surrounding whitespace is ignored. The month may be the full English name
/// or its three-letter abbreviation (`"5 Mar 2021"`), in any letter case;
/// anything else yields `None`.
pub fn long_date_to_date(text: &str) -> Option<String> {
    NaiveDate::parse_from_str(text.trim(), "%d %B %Y")
        .ok()
        .map(|d| d.format(OUTPUT_DATE_FORMAT).to_string())
}

/// Render a JSON scalar as a cell. Strings pass through unquoted, numbers and
/// booleans use their JSON text, everything else is absent.
pub fn scalar_to_cell(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Truncate a string for logging, on a character boundary.
///
/// Strings longer than `max` characters keep their first `max` characters and
/// gain a `"…(+N bytes)"` suffix counting the dropped bytes.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        None => s.to_string(),
        Some((cut, _)) => format!("{}…(+{} bytes)", &s[..cut], s.len() - cut),
    }
}

/// Create the parent directory of `path` if it has one and it is missing.
pub fn ensure_parent_dir(path: &Path) -> io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            std::fs::create_dir_all(parent)?;
            Ok(())
        }
        _ => Ok(()),
    }
}

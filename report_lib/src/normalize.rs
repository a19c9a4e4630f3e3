//! Canonical display form for raw checklist values.
//!
//! SPDX-License-Identifier: GPL-3.0-or-later

use serde_json::Value;

use crate::record::field_str;

// Placeholders operators type into a checklist field when no value was taken.
const PLACEHOLDERS: [&str; 3] = ["-", "N/A", "n/a"];

/// Clean a single raw field value into its display string.
///
/// Null/absent input and placeholder markers become the empty string;
/// decimal commas are rewritten as periods so measurements render uniformly.
pub fn normalize(raw: &Value) -> String {
    let s = field_str(raw);
    if PLACEHOLDERS.contains(&s.as_str()) {
        return String::new();
    }
    s.replace(',', ".")
}

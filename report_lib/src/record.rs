//! Raw checklist rows as returned by the checklist source.
//!
//! SPDX-License-Identifier: GPL-3.0-or-later

use serde::Deserialize;
use serde_json::Value;

/// One checklist submission row.
///
/// Upstream rows are semi-structured: any field may be missing, null, or of
/// the wrong type. Every field is kept as a raw JSON value and read through
/// the string-coercing accessors below, so no row can fail to deserialize
/// for data-quality reasons.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRecord {
    #[serde(default, rename = "shiftDate")]
    pub shift_date: Value,
    #[serde(default)]
    pub shift: Value,
    #[serde(default)]
    pub station: Value,
    #[serde(default)]
    pub donetime: Value,
    #[serde(default)]
    pub itemname: Value,
    #[serde(default)]
    pub itemresult: Value,
    #[serde(default)]
    pub operator: Value,
    #[serde(default, rename = "productproduced")]
    pub product_produced: Value,
    #[serde(default, rename = "productionOrder")]
    pub production_order: Value,
}

/// Coerce a raw field to a trimmed string.
/// Null and non-scalar values come back empty; numbers and booleans use
/// their canonical display form.
pub fn field_str(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

impl RawRecord {
    pub fn shift_date(&self) -> String {
        field_str(&self.shift_date)
    }

    pub fn shift(&self) -> String {
        field_str(&self.shift)
    }

    pub fn station(&self) -> String {
        field_str(&self.station)
    }

    pub fn donetime(&self) -> String {
        field_str(&self.donetime)
    }

    pub fn itemname(&self) -> String {
        field_str(&self.itemname)
    }

    pub fn operator(&self) -> String {
        field_str(&self.operator)
    }

    pub fn product_produced(&self) -> String {
        field_str(&self.product_produced)
    }

    pub fn production_order(&self) -> String {
        field_str(&self.production_order)
    }
}

//! HH:MM parsing and shift-relative time ordering.
//!
//! SPDX-License-Identifier: GPL-3.0-or-later

use std::collections::HashMap;

use chrono::{NaiveTime, Timelike};

pub const MINUTES_PER_DAY: i64 = 24 * 60;

/// Nominal start times per shift label, e.g. "A" -> "06:00".
///
/// Used only as a relative-ordering anchor, never for filtering. Labels
/// missing from the table (and entries that fail to parse) anchor at
/// midnight.
#[derive(Debug, Clone, Default)]
pub struct ShiftStartTable {
    starts: HashMap<String, String>,
}

impl ShiftStartTable {
    pub fn new(starts: HashMap<String, String>) -> Self {
        Self { starts }
    }

    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        Self {
            starts: pairs
                .iter()
                .map(|(label, start)| (label.to_string(), start.to_string()))
                .collect(),
        }
    }

    /// Start minute-of-day for a shift label, 0 when unknown.
    pub fn start_minutes(&self, shift: &str) -> i64 {
        self.starts
            .get(shift)
            .and_then(|s| parse_hhmm(s))
            .map(minutes_of_day)
            .unwrap_or(0)
    }
}

/// Strict 24-hour "HH:MM" parse; `None` on anything else.
pub fn parse_hhmm(s: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(s.trim(), "%H:%M").ok()
}

pub fn minutes_of_day(t: NaiveTime) -> i64 {
    (t.hour() * 60 + t.minute()) as i64
}

/// Elapsed minutes since the shift's nominal start, wrapping at midnight.
///
/// Unparsable donetimes anchor at 00:00. Sorting ascending by this key
/// yields shift-chronological order even when submissions cross midnight:
/// for a shift starting at 22:00, 23:00 maps to 60 and 01:00 to 180.
pub fn shift_relative_key(donetime: &str, shift: &str, table: &ShiftStartTable) -> i64 {
    let start = table.start_minutes(shift);
    let minute = parse_hhmm(donetime).map(minutes_of_day).unwrap_or(0);
    (minute - start).rem_euclid(MINUTES_PER_DAY)
}

/// Stable sort of donetime strings into shift-chronological order.
pub fn sort_donetimes(mut times: Vec<String>, shift: &str, table: &ShiftStartTable) -> Vec<String> {
    times.sort_by_key(|t| shift_relative_key(t, shift, table));
    times
}

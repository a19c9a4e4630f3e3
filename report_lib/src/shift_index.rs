//! Discovery of the (date, shift, station) groups present in a batch.
//!
//! SPDX-License-Identifier: GPL-3.0-or-later

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveTime};

use crate::record::RawRecord;
use crate::shift_time::parse_hhmm;

/// One distinct (shiftDate, shift, station) combination found in a batch,
/// annotated with the latest submission time seen for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftGroup {
    pub shift_date: String,
    pub shift: String,
    pub station: String,
    pub last_time: Option<NaiveTime>,
}

impl ShiftGroup {
    /// Composite picker key, `date|shift|station`.
    pub fn key(&self) -> String {
        format!("{}|{}|{}", self.shift_date, self.shift, self.station)
    }

    /// Display form of the last submission time.
    pub fn last_time_label(&self) -> String {
        match self.last_time {
            Some(t) => t.format("%H:%M").to_string(),
            None => "--:--".to_string(),
        }
    }
}

/// Scan a batch once and return its distinct groups, most recent first.
///
/// Records missing a non-empty shiftDate, shift, station or donetime are
/// ignored. Every surviving record feeds the `last_time` of its group: a
/// parsed time never loses to an unparsable one, and a later time always
/// replaces an earlier one. Groups sort descending by (calendar date, last
/// time); unparsable dates rank as the earliest possible date, missing
/// times as the earliest time-of-day. The sort is stable, so groups with
/// equal keys keep first-seen order.
pub fn index(records: &[RawRecord]) -> Vec<ShiftGroup> {
    let mut slot: HashMap<(String, String, String), usize> = HashMap::new();
    let mut groups: Vec<ShiftGroup> = Vec::new();

    for record in records {
        let shift_date = record.shift_date();
        let shift = record.shift();
        let station = record.station();
        let donetime = record.donetime();

        if shift_date.is_empty() || shift.is_empty() || station.is_empty() || donetime.is_empty() {
            continue;
        }

        let parsed = parse_hhmm(&donetime);
        let key = (shift_date.clone(), shift.clone(), station.clone());

        match slot.get(&key) {
            None => {
                slot.insert(key, groups.len());
                groups.push(ShiftGroup {
                    shift_date,
                    shift,
                    station,
                    last_time: parsed,
                });
            }
            Some(&i) => {
                if let Some(t) = parsed {
                    let group = &mut groups[i];
                    if group.last_time.map_or(true, |prev| t > prev) {
                        group.last_time = Some(t);
                    }
                }
            }
        }
    }

    groups.sort_by(|a, b| recency_key(b).cmp(&recency_key(a)));
    groups
}

fn recency_key(group: &ShiftGroup) -> (NaiveDate, NaiveTime) {
    let date =
        NaiveDate::parse_from_str(&group.shift_date, "%Y-%m-%d").unwrap_or(NaiveDate::MIN);
    let time = group.last_time.unwrap_or(NaiveTime::MIN);
    (date, time)
}

//! Pivot of filtered records into the printable item-by-time matrix.
//!
//! SPDX-License-Identifier: GPL-3.0-or-later

use std::collections::HashMap;

use crate::catalog::ItemCatalog;
use crate::normalize::normalize;
use crate::record::RawRecord;
use crate::shift_time::{sort_donetimes, ShiftStartTable};

/// Operator/product/order metadata shown at the top of the print form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportHeader {
    pub operator: String,
    pub product: String,
    pub production_order: String,
}

/// One matrix row: a catalog item plus its value per time column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub label: String,
    pub values: Vec<String>,
}

/// The assembled report for one (date, shift, station) selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub shift_date: String,
    pub shift: String,
    pub station: String,
    pub columns: Vec<String>,
    pub matrix: Vec<ReportRow>,
    pub header: ReportHeader,
}

impl Report {
    /// True when nothing survived filtering for the selection: no columns,
    /// every row empty. A no-data condition, not an error.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Assemble the report matrix for one (shiftDate, shift, station) selection.
///
/// Records are filtered by exact post-trim match on the three selectors,
/// then pivoted per donetime. Within one donetime, the last record wins for
/// an item value while the first record seen fixes the header triple; both
/// behaviors are kept as-is rather than unified. Columns sort by elapsed
/// time since the shift's nominal start, and the header comes from the
/// chronologically last column. Rows follow the catalog's display order and
/// always carry exactly one value per column.
pub fn build(
    records: &[RawRecord],
    shift_date: &str,
    shift_name: &str,
    station: &str,
    catalog: &ItemCatalog,
    table: &ShiftStartTable,
) -> Report {
    let mut seen_times: Vec<String> = Vec::new();
    let mut submissions: HashMap<String, HashMap<String, String>> = HashMap::new();
    let mut meta: HashMap<String, ReportHeader> = HashMap::new();

    for record in records {
        if record.shift_date() != shift_date
            || record.shift() != shift_name
            || record.station() != station
        {
            continue;
        }

        let donetime = record.donetime();
        let itemname = record.itemname();
        if donetime.is_empty() || !catalog.contains(&itemname) {
            continue;
        }

        if !submissions.contains_key(&donetime) {
            seen_times.push(donetime.clone());
        }
        submissions
            .entry(donetime.clone())
            .or_default()
            .insert(itemname, normalize(&record.itemresult));

        meta.entry(donetime).or_insert_with(|| ReportHeader {
            operator: record.operator(),
            product: record.product_produced(),
            production_order: record.production_order(),
        });
    }

    let columns = sort_donetimes(seen_times, shift_name, table);

    let matrix: Vec<ReportRow> = catalog
        .iter()
        .map(|item| ReportRow {
            label: item.to_string(),
            values: columns
                .iter()
                .map(|t| {
                    submissions
                        .get(t)
                        .and_then(|by_item| by_item.get(item))
                        .cloned()
                        .unwrap_or_default()
                })
                .collect(),
        })
        .collect();

    let header = columns
        .last()
        .and_then(|t| meta.get(t))
        .cloned()
        .unwrap_or_default();

    Report {
        shift_date: shift_date.to_string(),
        shift: shift_name.to_string(),
        station: station.to_string(),
        columns,
        matrix,
        header,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const ITEM: &str = "Θερμοκρασία λαμινατορίου (°C)";
    const OTHER_ITEM: &str = "Είδος μαργαρίνης";

    fn catalog() -> ItemCatalog {
        ItemCatalog::new([ITEM, OTHER_ITEM])
    }

    fn table() -> ShiftStartTable {
        ShiftStartTable::from_pairs(&[("A", "06:00"), ("B", "14:00"), ("Γ", "22:00")])
    }

    fn records() -> Vec<RawRecord> {
        serde_json::from_value(json!([
            {
                "shiftDate": "2024-01-01",
                "shift": "A",
                "station": "S1",
                "donetime": "06:05",
                "itemname": ITEM,
                "itemresult": "72,5",
                "operator": "John",
                "productproduced": "X",
                "productionOrder": "PO1",
            },
            {
                "shiftDate": "2024-01-01",
                "shift": "A",
                "station": "S1",
                "donetime": "07:10",
                "itemname": ITEM,
                "itemresult": "-",
            },
        ]))
        .unwrap()
    }

    #[test]
    fn pivots_columns_rows_and_header() {
        let report = build(&records(), "2024-01-01", "A", "S1", &catalog(), &table());

        assert_eq!(report.columns, vec!["06:05", "07:10"]);
        assert_eq!(report.matrix.len(), 2);
        assert_eq!(report.matrix[0].label, ITEM);
        assert_eq!(report.matrix[0].values, vec!["72.5", ""]);
        assert_eq!(report.matrix[1].values, vec!["", ""]);

        // The last column's record carries no header fields, and the header
        // is taken from the last column only.
        assert_eq!(report.header, ReportHeader::default());
    }

    #[test]
    fn header_comes_from_the_first_record_at_the_last_column() {
        let mut rows = records();
        rows.reverse();
        let report = build(&rows, "2024-01-01", "A", "S1", &catalog(), &table());

        assert_eq!(report.columns, vec!["06:05", "07:10"]);
        assert_eq!(report.header.operator, "");

        let late: Vec<RawRecord> = serde_json::from_value(json!([
            {
                "shiftDate": "2024-01-01", "shift": "A", "station": "S1",
                "donetime": "07:10", "itemname": ITEM, "itemresult": "71",
                "operator": "Jane", "productproduced": "Y", "productionOrder": "PO2",
            },
        ]))
        .unwrap();
        let mut rows = records();
        rows.extend(late);
        let report = build(&rows, "2024-01-01", "A", "S1", &catalog(), &table());

        // First record at 07:10 set the (empty) header; the later one only
        // overwrites the item value.
        assert_eq!(report.header.operator, "");
        assert_eq!(report.matrix[0].values, vec!["72.5", "71"]);
    }

    #[test]
    fn unrecognized_items_never_add_rows_or_columns() {
        let rows: Vec<RawRecord> = serde_json::from_value(json!([
            {
                "shiftDate": "2024-01-01", "shift": "A", "station": "S1",
                "donetime": "08:00", "itemname": "Άγνωστο πεδίο", "itemresult": "1",
            },
        ]))
        .unwrap();
        let report = build(&rows, "2024-01-01", "A", "S1", &catalog(), &table());

        assert!(report.is_empty());
        assert!(report.matrix.iter().all(|row| row.values.is_empty()));
    }

    #[test]
    fn no_matching_selection_yields_the_no_data_shape() {
        let report = build(&records(), "2024-01-02", "A", "S1", &catalog(), &table());

        assert!(report.columns.is_empty());
        assert_eq!(report.matrix.len(), 2);
        assert!(report.matrix.iter().all(|row| row.values.is_empty()));
        assert_eq!(report.header, ReportHeader::default());
        assert_eq!(report.shift_date, "2024-01-02");
    }

    #[test]
    fn rows_always_align_with_columns() {
        let report = build(&records(), "2024-01-01", "A", "S1", &catalog(), &table());
        for row in &report.matrix {
            assert_eq!(row.values.len(), report.columns.len());
        }
    }

    #[test]
    fn build_is_idempotent() {
        let rows = records();
        let first = build(&rows, "2024-01-01", "A", "S1", &catalog(), &table());
        let second = build(&rows, "2024-01-01", "A", "S1", &catalog(), &table());
        assert_eq!(first, second);
    }

    #[test]
    fn columns_follow_the_shift_clock_across_midnight() {
        let rows: Vec<RawRecord> = serde_json::from_value(json!([
            {
                "shiftDate": "2024-01-01", "shift": "Γ", "station": "S1",
                "donetime": "01:00", "itemname": ITEM, "itemresult": "1",
            },
            {
                "shiftDate": "2024-01-01", "shift": "Γ", "station": "S1",
                "donetime": "23:00", "itemname": ITEM, "itemresult": "2",
            },
        ]))
        .unwrap();
        let report = build(&rows, "2024-01-01", "Γ", "S1", &catalog(), &table());

        assert_eq!(report.columns, vec!["23:00", "01:00"]);
        assert_eq!(report.matrix[0].values, vec!["2", "1"]);
    }

    #[test]
    fn selector_match_is_exact_after_trimming() {
        let rows: Vec<RawRecord> = serde_json::from_value(json!([
            {
                "shiftDate": " 2024-01-01 ", "shift": "A", "station": "S1",
                "donetime": "06:05", "itemname": ITEM, "itemresult": "3",
            },
        ]))
        .unwrap();
        let report = build(&rows, "2024-01-01", "A", "S1", &catalog(), &table());
        assert_eq!(report.columns, vec!["06:05"]);

        let report = build(&rows, "2024-01-01", "A", "S2", &catalog(), &table());
        assert!(report.is_empty());
    }
}

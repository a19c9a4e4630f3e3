//! Report configuration: the printed item catalog and shift start times.
//!
//! SPDX-License-Identifier: GPL-3.0-or-later

use shiftprint_report_lib::catalog::ItemCatalog;
use shiftprint_report_lib::shift_time::ShiftStartTable;

/// Checklist items on the laminator print form, in display order.
const ORDERED_ITEMS: [&str; 10] = [
    "Θερμοκρασία λαμινατορίου (°C)",
    "Είδος μαργαρίνης",
    "Θερμοκρασία μαργαρίνης (°C)",
    "Λαμάκι μαργαρίνης (mm)",
    "Λαμάκι recupero (mm)",
    "Διάκενο μαχαιριών (cm)",
    "Πάχος extruder (1η)",
    "Πάχος extruder (2η)",
    "Ποσοστό μαργαρίνης (%)",
    "Ποσοστό ανακύκλωσης ζύμης recupero (%)",
];

// Nominal shift starts; Γ runs overnight into the next calendar day.
const SHIFT_STARTS: [(&str, &str); 3] = [("A", "06:00"), ("B", "14:00"), ("Γ", "22:00")];

pub fn item_catalog() -> ItemCatalog {
    ItemCatalog::new(ORDERED_ITEMS)
}

pub fn shift_start_table() -> ShiftStartTable {
    ShiftStartTable::from_pairs(&SHIFT_STARTS)
}

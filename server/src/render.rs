//! HTML for the picker and the printable report.
//! Deterministic string building, no template files, no external assets.
//!
//! SPDX-License-Identifier: GPL-3.0-or-later

use url::form_urlencoded;

use shiftprint_report_lib::report::Report;
use shiftprint_report_lib::shift_index::ShiftGroup;

const STYLE: &str = "\
body{font-family:sans-serif;margin:2rem}\
table{border-collapse:collapse;margin-top:1rem}\
th,td{border:1px solid #444;padding:.3rem .6rem;text-align:center}\
th.item{text-align:left}\
ul.shifts{list-style:none;padding:0}\
ul.shifts li{margin:.4rem 0}\
.meta span{margin-right:1.5rem}\
@media print{.toolbar{display:none}}";

/// Escape text for an HTML context.
fn esc(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn page(title: &str, body: &str) -> String {
    let mut out = String::with_capacity(body.len() + 512);
    out.push_str("<!DOCTYPE html><html lang=\"el\"><head><meta charset=\"utf-8\"><title>");
    out.push_str(&esc(title));
    out.push_str("</title><style>");
    out.push_str(STYLE);
    out.push_str("</style></head><body>");
    out.push_str(body);
    out.push_str("</body></html>");
    out
}

/// Link target for one picker entry, with the composite key query-encoded.
fn group_href(group: &ShiftGroup) -> String {
    let query: String = form_urlencoded::Serializer::new(String::new())
        .append_pair("key", &group.key())
        .finish();
    format!("/print/render?{}", query)
}

/// The shift picker: one link per (date, shift, station) group, most recent
/// first, annotated with the last submission time.
pub fn picker_page(groups: &[ShiftGroup]) -> String {
    let mut body = String::new();
    body.push_str("<h1>Checklist reports</h1><ul class=\"shifts\">");
    for group in groups {
        body.push_str("<li><a href=\"");
        body.push_str(&esc(&group_href(group)));
        body.push_str("\">");
        body.push_str(&esc(&group.shift_date));
        body.push_str(" · shift ");
        body.push_str(&esc(&group.shift));
        body.push_str(" · ");
        body.push_str(&esc(&group.station));
        body.push_str(" · last entry ");
        body.push_str(&esc(&group.last_time_label()));
        body.push_str("</a></li>");
    }
    body.push_str("</ul>");
    page("Checklist reports", &body)
}

/// The printable report: header metadata plus the item-by-time grid.
pub fn print_page(report: &Report) -> String {
    let mut body = String::new();
    body.push_str("<div class=\"toolbar\"><a href=\"/print\">Back</a> ");
    body.push_str("<button onclick=\"window.print()\">Print</button></div>");
    body.push_str("<h1>Production checklist</h1>");

    body.push_str("<div class=\"meta\"><span>Date: ");
    body.push_str(&esc(&report.shift_date));
    body.push_str("</span><span>Shift: ");
    body.push_str(&esc(&report.shift));
    body.push_str("</span><span>Station: ");
    body.push_str(&esc(&report.station));
    body.push_str("</span></div>");

    body.push_str("<div class=\"meta\"><span>Operator: ");
    body.push_str(&esc(&report.header.operator));
    body.push_str("</span><span>Product: ");
    body.push_str(&esc(&report.header.product));
    body.push_str("</span><span>Order: ");
    body.push_str(&esc(&report.header.production_order));
    body.push_str("</span></div>");

    body.push_str("<table><thead><tr><th class=\"item\"></th>");
    for column in &report.columns {
        body.push_str("<th>");
        body.push_str(&esc(column));
        body.push_str("</th>");
    }
    body.push_str("</tr></thead><tbody>");
    for row in &report.matrix {
        body.push_str("<tr><th class=\"item\">");
        body.push_str(&esc(&row.label));
        body.push_str("</th>");
        for value in &row.values {
            body.push_str("<td>");
            body.push_str(&esc(value));
            body.push_str("</td>");
        }
        body.push_str("</tr>");
    }
    body.push_str("</tbody></table>");

    page("Production checklist", &body)
}

/// Operator-facing note when a selection has no surviving records.
pub fn no_data_page(report: &Report, start_date: &str, end_date: &str) -> String {
    let body = format!(
        "<pre>No data found\n\nshiftDate={}\nshift={}\nstation={}\nrange={} → {}</pre>",
        esc(&report.shift_date),
        esc(&report.shift),
        esc(&report.station),
        esc(start_date),
        esc(end_date),
    );
    page("No data", &body)
}

/// Operator-facing error page wrapping upstream diagnostics.
pub fn error_page(detail: &str) -> String {
    let body = format!(
        "<pre style=\"white-space:pre-wrap\">ERROR:\n{}</pre>",
        esc(detail)
    );
    page("Error", &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shiftprint_report_lib::report::{ReportHeader, ReportRow};
    use shiftprint_report_lib::shift_time::parse_hhmm;

    fn group() -> ShiftGroup {
        ShiftGroup {
            shift_date: "2024-01-02".to_string(),
            shift: "Γ".to_string(),
            station: "S1 & S2".to_string(),
            last_time: parse_hhmm("09:45"),
        }
    }

    fn report() -> Report {
        Report {
            shift_date: "2024-01-01".to_string(),
            shift: "A".to_string(),
            station: "S1".to_string(),
            columns: vec!["06:05".to_string(), "07:10".to_string()],
            matrix: vec![
                ReportRow {
                    label: "Θερμοκρασία <λαμινατορίου>".to_string(),
                    values: vec!["72.5".to_string(), String::new()],
                },
                ReportRow {
                    label: "Είδος μαργαρίνης".to_string(),
                    values: vec![String::new(), String::new()],
                },
            ],
            header: ReportHeader {
                operator: "John".to_string(),
                product: "X".to_string(),
                production_order: "PO1".to_string(),
            },
        }
    }

    #[test]
    fn esc_covers_the_html_specials() {
        assert_eq!(esc("a&b<c>\"d'"), "a&amp;b&lt;c&gt;&quot;d&#39;");
        assert_eq!(esc("plain"), "plain");
    }

    #[test]
    fn picker_links_carry_the_encoded_key() {
        let html = picker_page(&[group()]);
        // Pipes percent-encode, the ampersand in the station escapes for
        // the attribute context.
        assert!(html.contains("/print/render?key=2024-01-02%7C%CE%93%7CS1+%26+S2"));
        assert!(html.contains("last entry 09:45"));
    }

    #[test]
    fn print_page_has_one_row_per_item_and_one_cell_per_column() {
        let html = print_page(&report());
        assert_eq!(html.matches("<tr>").count(), 3); // head row + 2 items
        assert_eq!(html.matches("<td>").count(), 4);
        assert!(html.contains("Θερμοκρασία &lt;λαμινατορίου&gt;"));
        assert!(html.contains("<span>Operator: John</span>"));
    }

    #[test]
    fn no_data_page_names_the_selection_and_range() {
        let html = no_data_page(&report(), "2023-12-31", "2024-01-02");
        assert!(html.contains("No data found"));
        assert!(html.contains("shiftDate=2024-01-01"));
        assert!(html.contains("range=2023-12-31 → 2024-01-02"));
    }

    #[test]
    fn error_page_preserves_the_diagnostic_text() {
        let html = error_page("STATUS: 503\nBODY:\n<oops>");
        assert!(html.contains("ERROR:"));
        assert!(html.contains("STATUS: 503"));
        assert!(html.contains("&lt;oops&gt;"));
    }
}

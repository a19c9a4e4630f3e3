//! Shiftprint server.
//! Serves the shift picker and the printable checklist report over HTTP.
//! All checklist data comes from the Evocon reporting API per request;
//! nothing is persisted here.
//!
//! SPDX-License-Identifier: GPL-3.0-or-later

#[macro_use]
extern crate rocket;

#[macro_use]
extern crate log;

use chrono::{Duration, Local, NaiveDate};
use rocket::http::Status;
use rocket::response::content::RawHtml;
use rocket::response::status::Custom;
use rocket::serde::json::Json;
use rocket::tokio::task;
use serde::Serialize;

use shiftprint_report_lib::report;
use shiftprint_report_lib::shift_index;

mod config;
mod evocon;
mod render;

// The picker offers every shift seen within this many days back from today.
const PICKER_LOOKBACK_DAYS: i64 = 3;

type PageResult = Result<RawHtml<String>, Custom<RawHtml<String>>>;

#[derive(Serialize)]
struct Health {
    ok: bool,
}

#[get("/health")]
fn health() -> Json<Health> {
    Json(Health { ok: true })
}

#[get("/")]
fn home() -> RawHtml<&'static str> {
    RawHtml("<a href='/print'>Go to Print</a> | <a href='/health'>Health</a>")
}

fn error_response(detail: String) -> Custom<RawHtml<String>> {
    Custom(
        Status::InternalServerError,
        RawHtml(render::error_page(&detail)),
    )
}

#[get("/print")]
async fn picker() -> PageResult {
    let today = Local::now().date_naive();
    let start_date = (today - Duration::days(PICKER_LOOKBACK_DAYS))
        .format("%Y-%m-%d")
        .to_string();
    let end_date = today.format("%Y-%m-%d").to_string();

    let rows = task::block_in_place(|| evocon::fetch_checklists(&start_date, &end_date))
        .map_err(|e| error_response(e.to_string()))?;

    let groups = shift_index::index(&rows);
    info!(
        "picker: {} groups between {} and {}",
        groups.len(),
        start_date,
        end_date
    );

    if groups.is_empty() {
        return Ok(RawHtml(format!(
            "No shifts found in last {} days.",
            PICKER_LOOKBACK_DAYS
        )));
    }
    Ok(RawHtml(render::picker_page(&groups)))
}

#[get("/print/render?<key>")]
async fn render_print(key: Option<&str>) -> PageResult {
    // The picker key is `date|shift|station`; anything else is a bad link.
    let key = key.unwrap_or_default();
    let parts: Vec<&str> = key.split('|').collect();
    if parts.len() != 3 {
        return Err(Custom(
            Status::BadRequest,
            RawHtml("Invalid selection".to_string()),
        ));
    }

    let shift_date = parts[0].trim();
    let shift_name = parts[1].trim();
    let station = parts[2].trim();

    let day = NaiveDate::parse_from_str(shift_date, "%Y-%m-%d").map_err(|e| {
        Custom(
            Status::BadRequest,
            RawHtml(format!("Bad shiftDate: {}", e)),
        )
    })?;

    // A shift can straddle midnight, so pull the surrounding days too and
    // let the builder filter back down to the selected shift date.
    let start_date = (day - Duration::days(1)).format("%Y-%m-%d").to_string();
    let end_date = (day + Duration::days(1)).format("%Y-%m-%d").to_string();

    let rows = task::block_in_place(|| evocon::fetch_checklists(&start_date, &end_date))
        .map_err(|e| {
            error_response(format!(
                "{}\n\nshiftDate={}\nshift={}\nstation={}\nrange={} → {}",
                e, shift_date, shift_name, station, start_date, end_date
            ))
        })?;

    let report = report::build(
        &rows,
        shift_date,
        shift_name,
        station,
        &config::item_catalog(),
        &config::shift_start_table(),
    );

    if report.is_empty() {
        info!(
            "no data for {}|{}|{} in {} .. {}",
            shift_date, shift_name, station, start_date, end_date
        );
        return Ok(RawHtml(render::no_data_page(&report, &start_date, &end_date)));
    }
    Ok(RawHtml(render::print_page(&report)))
}

#[launch]
fn rocket() -> _ {
    let _ = env_logger::try_init();

    let mut network_type: Option<String> = None;
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--network-type" {
            if let Some(value) = args.next() {
                network_type = Some(value);
            }
        } else if let Some(value) = arg.strip_prefix("--network-type=") {
            network_type = Some(value.to_string());
        }
    }

    let address = match network_type.as_deref() {
        Some("http") => "0.0.0.0",
        Some("https") | None => "127.0.0.1",
        Some(other) => {
            eprintln!("Unknown --network-type={other}. Use http or https.");
            "127.0.0.1"
        }
    };

    // Deployment platforms inject the port through the environment.
    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8000);

    let config = rocket::Config {
        port,
        address: address.parse().unwrap(),
        ..rocket::Config::default()
    };

    rocket::custom(config).mount("/", routes![health, home, picker, render_print])
}

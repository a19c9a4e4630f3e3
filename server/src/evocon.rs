//! Evocon checklist report client.
//! Pulls the raw checklist rows the report core works on.
//!
//! SPDX-License-Identifier: GPL-3.0-or-later

use std::env;
use std::fmt;
use std::sync::OnceLock;
use std::time::Duration;

use base64::{engine::general_purpose, Engine as _};
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde_json::Value;

use shiftprint_report_lib::record::RawRecord;

const CHECKLISTS_URL: &str = "https://api.evocon.com/api/reports/checklists_json";
const FETCH_TIMEOUT: Duration = Duration::from_secs(45);
const BODY_EXCERPT_LEN: usize = 1500;

/// A failed attempt to pull checklist rows.
/// Carries enough context for an operator-facing error page: the endpoint,
/// the requested range, the response status and a body excerpt.
#[derive(Debug)]
pub struct FetchError {
    pub url: String,
    pub start_date: String,
    pub end_date: String,
    pub status: Option<u16>,
    pub detail: String,
    pub body_excerpt: String,
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Evocon API error")?;
        writeln!(f, "URL: {}", self.url)?;
        writeln!(
            f,
            "PARAMS: startTime={} endTime={}",
            self.start_date, self.end_date
        )?;
        match self.status {
            Some(status) => writeln!(f, "STATUS: {}", status)?,
            None => writeln!(f, "STATUS: -")?,
        }
        writeln!(f, "{}", self.detail)?;
        if !self.body_excerpt.is_empty() {
            writeln!(f, "BODY:")?;
            write!(f, "{}", self.body_excerpt)?;
        }
        Ok(())
    }
}

impl std::error::Error for FetchError {}

/// Basic authorization header value for the tenant/secret pair.
pub fn basic_auth_value(tenant: &str, secret: &str) -> String {
    let token = general_purpose::STANDARD.encode(format!("{}:{}", tenant, secret));
    format!("Basic {}", token)
}

fn http_client() -> &'static Client {
    static CLIENT: OnceLock<Client> = OnceLock::new();
    CLIENT.get_or_init(|| {
        Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .expect("Failed to build the Evocon HTTP client")
    })
}

/// First part of a response body, cut on a char boundary, for diagnostics.
fn excerpt(body: &str) -> String {
    let mut s = body.to_string();
    if s.len() > BODY_EXCERPT_LEN {
        let mut cut = BODY_EXCERPT_LEN;
        while !s.is_char_boundary(cut) {
            cut -= 1;
        }
        s.truncate(cut);
    }
    s
}

fn fetch_error(
    start_date: &str,
    end_date: &str,
    status: Option<u16>,
    detail: String,
    body_excerpt: String,
) -> FetchError {
    FetchError {
        url: CHECKLISTS_URL.to_string(),
        start_date: start_date.to_string(),
        end_date: end_date.to_string(),
        status,
        detail,
        body_excerpt,
    }
}

/// Pull the raw checklist rows for an inclusive date range.
/// Both dates must be YYYY-MM-DD; the endpoint only accepts whole days.
///
/// One best-effort call, no retry. Credentials come from the
/// EVOCON_TENANT / EVOCON_SECRET environment variables.
pub fn fetch_checklists(start_date: &str, end_date: &str) -> Result<Vec<RawRecord>, FetchError> {
    let tenant = env::var("EVOCON_TENANT").unwrap_or_default();
    let secret = env::var("EVOCON_SECRET").unwrap_or_default();
    if tenant.is_empty() || secret.is_empty() {
        return Err(fetch_error(
            start_date,
            end_date,
            None,
            "Missing EVOCON_TENANT / EVOCON_SECRET".to_string(),
            String::new(),
        ));
    }

    debug!("fetching checklists for {} .. {}", start_date, end_date);

    let response = http_client()
        .get(CHECKLISTS_URL)
        .header(ACCEPT, "application/json")
        .header(AUTHORIZATION, basic_auth_value(&tenant, &secret))
        .query(&[("startTime", start_date), ("endTime", end_date)])
        .send()
        .map_err(|e| {
            fetch_error(
                start_date,
                end_date,
                None,
                format!("Request failed: {}", e),
                String::new(),
            )
        })?;

    let status = response.status().as_u16();
    let body = response.text().map_err(|e| {
        fetch_error(
            start_date,
            end_date,
            Some(status),
            format!("Failed to read response body: {}", e),
            String::new(),
        )
    })?;

    if status != 200 {
        return Err(fetch_error(
            start_date,
            end_date,
            Some(status),
            "Unexpected status".to_string(),
            excerpt(&body),
        ));
    }

    let data: Value = serde_json::from_str(&body).map_err(|e| {
        fetch_error(
            start_date,
            end_date,
            Some(status),
            format!("Evocon returned non-JSON: {}", e),
            excerpt(&body),
        )
    })?;

    let rows = match data {
        Value::Array(rows) => rows,
        other => {
            return Err(fetch_error(
                start_date,
                end_date,
                Some(status),
                format!("Unexpected API response type: {}", json_type_name(&other)),
                excerpt(&body),
            ))
        }
    };

    // Rows that are not objects coerce to an all-null record, which every
    // scan downstream then skips.
    Ok(rows
        .into_iter()
        .map(|row| serde_json::from_value(row).unwrap_or_default())
        .collect())
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

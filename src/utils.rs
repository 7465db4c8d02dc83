// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::{DateTime, Local, NaiveDate, NaiveTime, TimeZone, Utc};
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;

use crate::ledger::validate_amount;
use crate::models::{SortKey, SortOrder, TransactionKind};

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

/// Entry-boundary amount check: must parse as a decimal and be > 0.
pub fn parse_amount(s: &str) -> Result<Decimal> {
    let d = s
        .parse::<Decimal>()
        .with_context(|| format!("Invalid amount '{}', expected a positive number", s))?;
    Ok(validate_amount(d)?)
}

pub fn parse_kind(s: &str) -> Result<TransactionKind> {
    match s.to_lowercase().as_str() {
        "purchase" => Ok(TransactionKind::Purchase),
        "sale" => Ok(TransactionKind::Sale),
        "investment" => Ok(TransactionKind::Investment),
        _ => Err(anyhow::anyhow!(
            "Invalid kind '{}', expected purchase|sale|investment",
            s
        )),
    }
}

pub fn parse_sort_key(s: &str) -> Result<SortKey> {
    match s.to_lowercase().as_str() {
        "date" => Ok(SortKey::Date),
        "amount" => Ok(SortKey::Amount),
        "kind" => Ok(SortKey::Kind),
        _ => Err(anyhow::anyhow!(
            "Invalid sort key '{}', expected date|amount|kind",
            s
        )),
    }
}

pub fn parse_sort_order(s: &str) -> Result<SortOrder> {
    match s.to_lowercase().as_str() {
        "asc" => Ok(SortOrder::Asc),
        "desc" => Ok(SortOrder::Desc),
        _ => Err(anyhow::anyhow!(
            "Invalid sort order '{}', expected asc|desc",
            s
        )),
    }
}

/// Pin a calendar date to a wall-clock time-of-day, yielding the UTC
/// instant. A time skipped by a DST transition falls back to reading the
/// pair as UTC.
pub fn at_local_time(date: NaiveDate, time: NaiveTime) -> DateTime<Utc> {
    let naive = date.and_time(time);
    match Local.from_local_datetime(&naive).earliest() {
        Some(local) => local.with_timezone(&Utc),
        None => Utc.from_utc_datetime(&naive),
    }
}

pub fn fmt_money(d: &Decimal, ccy: &str) -> String {
    format!("{} {}", ccy, d.round_dp(2))
}

pub fn fmt_datetime(dt: &DateTime<Utc>) -> String {
    dt.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

// Display currency setting, kept in its own store slot.
pub fn get_display_currency(conn: &Connection) -> Result<String> {
    let v: Option<String> = conn
        .query_row("SELECT value FROM store WHERE key='currency'", [], |r| {
            r.get(0)
        })
        .optional()?;
    Ok(v.unwrap_or_else(|| "MYR".to_string()))
}

pub fn set_display_currency(conn: &Connection, ccy: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO store(key, value) VALUES('currency', ?1)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![ccy],
    )?;
    Ok(())
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

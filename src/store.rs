// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::{Connection, OptionalExtension, params};
use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

use crate::ledger::Ledger;
use crate::models::Transaction;

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("com.alphavelocity", "Captrack", "captrack"));

/// The one slot holding the full transaction list as a JSON array.
pub const TRANSACTIONS_SLOT: &str = "transactions";
/// Selected transaction ids, kept between runs so bulk deletes can span
/// invocations.
pub const SELECTION_SLOT: &str = "selection";

pub fn db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("captrack.sqlite"))
}

pub fn open_or_init() -> Result<Connection> {
    let path = db_path()?;
    let conn =
        Connection::open(&path).with_context(|| format!("Open store at {}", path.display()))?;
    init_schema(&conn)?;
    Ok(conn)
}

fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS store(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );
    "#,
    )?;
    Ok(())
}

fn read_slot(conn: &Connection, key: &str) -> Result<Option<String>> {
    let v = conn
        .query_row("SELECT value FROM store WHERE key=?1", params![key], |r| {
            r.get(0)
        })
        .optional()?;
    Ok(v)
}

fn write_slot(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO store(key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![key, value],
    )?;
    Ok(())
}

/// A missing or undecodable slot degrades to an empty list, never an error.
pub fn load_transactions(conn: &Connection) -> Result<Vec<Transaction>> {
    Ok(read_slot(conn, TRANSACTIONS_SLOT)?
        .and_then(|raw| serde_json::from_str(&raw).ok())
        .unwrap_or_default())
}

pub fn save_transactions(conn: &Connection, transactions: &[Transaction]) -> Result<()> {
    write_slot(
        conn,
        TRANSACTIONS_SLOT,
        &serde_json::to_string(transactions)?,
    )
}

pub fn load_selection(conn: &Connection) -> Result<BTreeSet<String>> {
    Ok(read_slot(conn, SELECTION_SLOT)?
        .and_then(|raw| serde_json::from_str(&raw).ok())
        .unwrap_or_default())
}

pub fn save_selection(conn: &Connection, selection: &BTreeSet<String>) -> Result<()> {
    write_slot(conn, SELECTION_SLOT, &serde_json::to_string(selection)?)
}

pub fn load_ledger(conn: &Connection) -> Result<Ledger> {
    Ok(Ledger::new(load_transactions(conn)?, load_selection(conn)?))
}

/// Written back in full on every mutation, fire-and-forget.
pub fn save_ledger(conn: &Connection, ledger: &Ledger) -> Result<()> {
    save_transactions(conn, ledger.transactions())?;
    save_selection(conn, ledger.selected())
}

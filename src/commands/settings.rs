// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;

use crate::store;
use crate::utils::{get_display_currency, set_display_currency};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set-currency", sub)) => {
            let ccy = sub.get_one::<String>("currency").unwrap().to_uppercase();
            set_display_currency(conn, &ccy)?;
            println!("Display currency set to {}", ccy);
        }
        Some(("show", _)) => {
            println!("currency = {}", get_display_currency(conn)?);
            println!("store    = {}", store::db_path()?.display());
        }
        _ => {}
    }
    Ok(())
}

// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::io::{self, Write};

use anyhow::Result;
use chrono::Local;
use rusqlite::Connection;
use serde::Serialize;

use crate::models::{SortKey, SortOrder, Transaction};
use crate::store;
use crate::utils::{
    fmt_datetime, fmt_money, get_display_currency, maybe_print_json, parse_amount, parse_date,
    parse_kind, parse_sort_key, parse_sort_order, pretty_table,
};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("edit", sub)) => edit(conn, sub)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        Some(("select", sub)) => select(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn remark_arg(sub: &clap::ArgMatches) -> Option<String> {
    sub.get_one::<String>("remark")
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let kind = parse_kind(sub.get_one::<String>("kind").unwrap())?;
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
    let date = match sub.get_one::<String>("date") {
        Some(s) => parse_date(s)?,
        None => Local::now().date_naive(),
    };
    let remark = remark_arg(sub);

    let mut ledger = store::load_ledger(conn)?;
    let id = ledger.add(kind, amount, date, remark)?;
    store::save_ledger(conn, &ledger)?;
    println!("Recorded {} of {} on {} (id: {})", kind, amount, date, id);
    Ok(())
}

fn edit(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap();
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;

    let mut ledger = store::load_ledger(conn)?;
    let Some(existing) = ledger.find(id) else {
        println!("No transaction with id {}", id);
        return Ok(());
    };
    let date = match sub.get_one::<String>("date") {
        Some(s) => parse_date(s)?,
        None => existing.date.with_timezone(&Local).date_naive(),
    };
    let remark = match sub.get_one::<String>("remark") {
        Some(_) => remark_arg(sub),
        None => existing.remark.clone(),
    };

    ledger.update(id, amount, date, remark)?;
    store::save_ledger(conn, &ledger)?;
    println!("Updated {}", id);
    Ok(())
}

/// The confirmation message shown before any deletion: the kind for a
/// single record, the count for a bulk delete.
pub fn deletion_prompt(doomed: &[&Transaction]) -> String {
    match doomed {
        [single] => format!(
            "Permanently delete this {} transaction? This cannot be undone.",
            single.kind
        ),
        many => format!(
            "Permanently delete the {} selected transactions? This cannot be undone.",
            many.len()
        ),
    }
}

fn confirm(prompt: &str, assume_yes: bool) -> Result<bool> {
    if assume_yes {
        return Ok(true);
    }
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(matches!(line.trim().to_lowercase().as_str(), "y" | "yes"))
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let assume_yes = sub.get_flag("yes");
    let mut ledger = store::load_ledger(conn)?;

    let ids: Vec<String> = if sub.get_flag("selected") {
        ledger.selected().iter().cloned().collect()
    } else {
        sub.get_many::<String>("id")
            .map(|vals| vals.cloned().collect())
            .unwrap_or_default()
    };
    let doomed: Vec<&Transaction> = ids.iter().filter_map(|id| ledger.find(id)).collect();
    if doomed.is_empty() {
        println!("Nothing to delete.");
        return Ok(());
    }

    if !confirm(&deletion_prompt(&doomed), assume_yes)? {
        println!("Cancelled.");
        return Ok(());
    }

    let removed = if ids.len() == 1 {
        ledger.delete_one(&ids[0]) as usize
    } else {
        ledger.delete_many(ids.iter().map(|s| s.as_str()))
    };
    ledger.clear_selection();
    store::save_ledger(conn, &ledger)?;
    println!("Deleted {} transaction(s)", removed);
    Ok(())
}

fn select(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let mut ledger = store::load_ledger(conn)?;
    if sub.get_flag("all") {
        ledger.toggle_select_all();
    } else {
        for id in sub.get_many::<String>("id").into_iter().flatten() {
            ledger.toggle_selection(id);
        }
    }
    store::save_ledger(conn, &ledger)?;
    println!("{} of {} selected", ledger.selected().len(), ledger.len());
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    if r.selected { "*".into() } else { String::new() },
                    r.date.clone(),
                    r.kind.clone(),
                    r.amount.clone(),
                    r.remark.clone(),
                    r.id.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Sel", "Date", "Kind", "Amount", "Remark", "Id"], rows)
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: String,
    pub kind: String,
    pub amount: String,
    pub date: String,
    pub remark: String,
    pub selected: bool,
}

pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let key = match sub.get_one::<String>("sort") {
        Some(s) => parse_sort_key(s)?,
        None => SortKey::Date,
    };
    let order = match sub.get_one::<String>("order") {
        Some(s) => parse_sort_order(s)?,
        None => SortOrder::Desc,
    };

    let ledger = store::load_ledger(conn)?;
    let ccy = get_display_currency(conn)?;
    let mut view = ledger.sorted(key, order);
    if let Some(limit) = sub.get_one::<usize>("limit") {
        view.truncate(*limit);
    }

    Ok(view
        .into_iter()
        .map(|t| TransactionRow {
            selected: ledger.selected().contains(&t.id),
            kind: t.kind.to_string(),
            amount: fmt_money(&t.amount, &ccy),
            date: fmt_datetime(&t.date),
            remark: t.remark.unwrap_or_default(),
            id: t.id,
        })
        .collect())
}

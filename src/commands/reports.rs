// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::aggregate;
use crate::store;
use crate::utils::{fmt_money, get_display_currency, maybe_print_json, pretty_table};

const CHART_WIDTH: u32 = 40;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(conn, sub)?,
        Some(("chart", sub)) => chart(conn, sub)?,
        Some(("sales", sub)) => sales(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn summary(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let transactions = store::load_transactions(conn)?;
    let s = aggregate::summary(&transactions);
    if !maybe_print_json(json_flag, jsonl_flag, &s)? {
        let ccy = get_display_currency(conn)?;
        let rows = vec![
            vec!["Capital".to_string(), fmt_money(&s.capital, &ccy)],
            vec!["Total profit".to_string(), fmt_money(&s.total_profit, &ccy)],
            vec!["Today's sales".to_string(), fmt_money(&s.daily_sales, &ccy)],
        ];
        println!("{}", pretty_table(&["Metric", "Value"], rows));
    }
    Ok(())
}

fn chart(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let transactions = store::load_transactions(conn)?;
    let series = aggregate::last_7_days(&transactions);
    if maybe_print_json(json_flag, jsonl_flag, &series)? {
        return Ok(());
    }

    let max = series
        .iter()
        .map(|d| d.total_sales)
        .max()
        .unwrap_or(Decimal::ZERO);
    if max.is_zero() {
        println!("No sales recorded in the last 7 days.");
        return Ok(());
    }

    let ccy = get_display_currency(conn)?;
    for day in &series {
        let width = (day.total_sales * Decimal::from(CHART_WIDTH) / max)
            .to_u32()
            .unwrap_or(0);
        println!(
            "{} {}  {:>14}  {}",
            day.date.format("%a"),
            day.date,
            fmt_money(&day.total_sales, &ccy),
            "#".repeat(width as usize)
        );
    }
    Ok(())
}

fn sales(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let period = sub.get_one::<String>("period").unwrap().to_lowercase();
    let transactions = store::load_transactions(conn)?;

    let buckets = match period.as_str() {
        "day" => aggregate::group_by_day(&transactions),
        "week" => aggregate::group_by_week(&transactions),
        "month" => aggregate::group_by_month(&transactions),
        _ => anyhow::bail!("Unknown period '{}' (use day|week|month)", period),
    };
    if !maybe_print_json(json_flag, jsonl_flag, &buckets)? {
        let ccy = get_display_currency(conn)?;
        let header = match period.as_str() {
            "week" => "Week of",
            "month" => "Month",
            _ => "Date",
        };
        let rows: Vec<Vec<String>> = buckets
            .iter()
            .map(|b| vec![b.key.clone(), fmt_money(&b.total_sales, &ccy)])
            .collect();
        println!("{}", pretty_table(&[header, "Total sales"], rows));
    }
    Ok(())
}

// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, Local, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Transaction, TransactionKind};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub capital: Decimal,
    pub total_profit: Decimal,
    pub daily_sales: Decimal,
}

/// One day of the fixed seven-day series. Days without sales stay at zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySales {
    pub date: NaiveDate,
    pub total_sales: Decimal,
}

/// A truncated-key sales total: `YYYY-MM-DD` for day buckets, the Sunday
/// start date for week buckets, `YYYY-MM` for month buckets.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesBucket {
    pub key: String,
    pub total_sales: Decimal,
}

pub fn summary(transactions: &[Transaction]) -> Summary {
    summary_on(transactions, Local::now().date_naive())
}

/// Single pass over the full list. Sales add to capital and profit,
/// purchases subtract from both, investments add to capital only.
///
/// The today check mixes clocks: stored days are UTC while `today` comes
/// from the local clock. Do not unify without deciding the intended
/// semantics near a UTC day boundary.
pub fn summary_on(transactions: &[Transaction], today: NaiveDate) -> Summary {
    let mut acc = Summary {
        capital: Decimal::ZERO,
        total_profit: Decimal::ZERO,
        daily_sales: Decimal::ZERO,
    };
    for tx in transactions {
        match tx.kind {
            TransactionKind::Sale => {
                acc.capital += tx.amount;
                acc.total_profit += tx.amount;
                if tx.date.date_naive() == today {
                    acc.daily_sales += tx.amount;
                }
            }
            TransactionKind::Purchase => {
                acc.capital -= tx.amount;
                acc.total_profit -= tx.amount;
            }
            TransactionKind::Investment => {
                acc.capital += tx.amount;
            }
        }
    }
    acc
}

pub fn last_7_days(transactions: &[Transaction]) -> Vec<DailySales> {
    last_7_days_ending(transactions, Utc::now().date_naive())
}

/// Exactly seven consecutive UTC calendar days ending at `end`, oldest
/// first, zero-filled. Sales outside the window are dropped.
pub fn last_7_days_ending(transactions: &[Transaction], end: NaiveDate) -> Vec<DailySales> {
    let mut series: Vec<DailySales> = (0..7)
        .rev()
        .map(|i| DailySales {
            date: end - Duration::days(i),
            total_sales: Decimal::ZERO,
        })
        .collect();
    for tx in transactions {
        if tx.kind != TransactionKind::Sale {
            continue;
        }
        let day = tx.date.date_naive();
        if let Some(slot) = series.iter_mut().find(|d| d.date == day) {
            slot.total_sales += tx.amount;
        }
    }
    series
}

/// Sunday-aligned start of week, computed on the UTC calendar day so the
/// boundary never drifts with the local timezone.
pub fn start_of_week(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_sunday() as i64)
}

pub fn group_by_day(transactions: &[Transaction]) -> Vec<SalesBucket> {
    group_sales(transactions, |d| d.format("%Y-%m-%d").to_string())
}

pub fn group_by_week(transactions: &[Transaction]) -> Vec<SalesBucket> {
    group_sales(transactions, |d| {
        start_of_week(d).format("%Y-%m-%d").to_string()
    })
}

pub fn group_by_month(transactions: &[Transaction]) -> Vec<SalesBucket> {
    group_sales(transactions, |d| d.format("%Y-%m").to_string())
}

/// Sales only; buckets exist only where a sale landed, keyed descending.
fn group_sales<F>(transactions: &[Transaction], bucket_key: F) -> Vec<SalesBucket>
where
    F: Fn(NaiveDate) -> String,
{
    let mut buckets: BTreeMap<String, Decimal> = BTreeMap::new();
    for tx in transactions {
        if tx.kind == TransactionKind::Sale {
            *buckets
                .entry(bucket_key(tx.date.date_naive()))
                .or_insert(Decimal::ZERO) += tx.amount;
        }
    }
    buckets
        .into_iter()
        .rev()
        .map(|(key, total_sales)| SalesBucket { key, total_sales })
        .collect()
}

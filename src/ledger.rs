// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeSet;

use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::{SortKey, SortOrder, Transaction, TransactionKind};
use crate::utils::at_local_time;

/// The only domain error: rejected input on add/edit. The store itself
/// never validates.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("amount must be greater than zero, got {0}")]
    AmountNotPositive(Decimal),
}

pub fn validate_amount(amount: Decimal) -> Result<Decimal, ValidationError> {
    if amount <= Decimal::ZERO {
        return Err(ValidationError::AmountNotPositive(amount));
    }
    Ok(amount)
}

/// The whole application state: the recorded transactions (newest-first
/// insertion order) plus the set of ids selected for bulk operations.
/// Handlers get a `&mut Ledger`; nothing global.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    transactions: Vec<Transaction>,
    selected: BTreeSet<String>,
}

impl Ledger {
    pub fn new(transactions: Vec<Transaction>, selected: BTreeSet<String>) -> Self {
        Self {
            transactions,
            selected,
        }
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn selected(&self) -> &BTreeSet<String> {
        &self.selected
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    /// Mint a fresh id and prepend the record. The chosen calendar date is
    /// combined with the current wall-clock time-of-day.
    pub fn add(
        &mut self,
        kind: TransactionKind,
        amount: Decimal,
        date: NaiveDate,
        remark: Option<String>,
    ) -> Result<String, ValidationError> {
        let amount = validate_amount(amount)?;
        let id = Uuid::new_v4().to_string();
        let tx = Transaction {
            id: id.clone(),
            kind,
            amount,
            date: at_local_time(date, Local::now().time()),
            remark,
        };
        self.transactions.insert(0, tx);
        Ok(id)
    }

    /// Replace amount, remark, and the calendar-date portion of the
    /// timestamp; `kind` and the original time-of-day stay. Returns false
    /// (without touching anything) when the id is unknown.
    pub fn update(
        &mut self,
        id: &str,
        amount: Decimal,
        date: NaiveDate,
        remark: Option<String>,
    ) -> Result<bool, ValidationError> {
        let amount = validate_amount(amount)?;
        let Some(tx) = self.transactions.iter_mut().find(|t| t.id == id) else {
            return Ok(false);
        };
        let time_of_day = tx.date.with_timezone(&Local).time();
        tx.date = at_local_time(date, time_of_day);
        tx.amount = amount;
        tx.remark = remark;
        Ok(true)
    }

    pub fn delete_one(&mut self, id: &str) -> bool {
        let before = self.transactions.len();
        self.transactions.retain(|t| t.id != id);
        self.selected.remove(id);
        self.transactions.len() != before
    }

    /// One pass over the list; unmatched ids are silently ignored, so the
    /// operation is idempotent.
    pub fn delete_many<'a, I>(&mut self, ids: I) -> usize
    where
        I: IntoIterator<Item = &'a str>,
    {
        let doomed: BTreeSet<&str> = ids.into_iter().collect();
        let before = self.transactions.len();
        self.transactions
            .retain(|t| !doomed.contains(t.id.as_str()));
        for id in doomed {
            self.selected.remove(id);
        }
        before - self.transactions.len()
    }

    pub fn toggle_selection(&mut self, id: &str) {
        if !self.selected.remove(id) {
            self.selected.insert(id.to_string());
        }
    }

    /// Clears the selection when everything is already selected, otherwise
    /// selects every transaction.
    pub fn toggle_select_all(&mut self) {
        if self.selected.len() == self.transactions.len() {
            self.selected.clear();
        } else {
            self.selected = self.transactions.iter().map(|t| t.id.clone()).collect();
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    /// Stable sort projection over a copy of the list; the underlying
    /// insertion order is never touched. Ties keep their original order.
    pub fn sorted(&self, key: SortKey, order: SortOrder) -> Vec<Transaction> {
        let mut view = self.transactions.clone();
        view.sort_by(|a, b| {
            let ord = match key {
                SortKey::Date => a.date.cmp(&b.date),
                SortKey::Amount => a.amount.cmp(&b.amount),
                SortKey::Kind => a.kind.as_str().cmp(b.kind.as_str()),
            };
            match order {
                SortOrder::Asc => ord,
                SortOrder::Desc => ord.reverse(),
            }
        });
        view
    }
}

// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use captrack::ledger::{Ledger, ValidationError};
use captrack::models::TransactionKind;
use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn add_then_find_returns_the_record() {
    let mut ledger = Ledger::default();
    let id = ledger
        .add(
            TransactionKind::Sale,
            Decimal::from(125),
            day(2024, 3, 5),
            Some("counter sale".to_string()),
        )
        .unwrap();

    let tx = ledger.find(&id).unwrap();
    assert_eq!(tx.kind, TransactionKind::Sale);
    assert_eq!(tx.amount, Decimal::from(125));
    assert_eq!(tx.remark.as_deref(), Some("counter sale"));
    assert_eq!(tx.date.with_timezone(&Local).date_naive(), day(2024, 3, 5));
}

#[test]
fn add_prepends_newest_first() {
    let mut ledger = Ledger::default();
    let first = ledger
        .add(TransactionKind::Sale, Decimal::from(1), day(2024, 1, 1), None)
        .unwrap();
    let second = ledger
        .add(TransactionKind::Purchase, Decimal::from(2), day(2024, 1, 2), None)
        .unwrap();

    assert_eq!(ledger.transactions()[0].id, second);
    assert_eq!(ledger.transactions()[1].id, first);
}

#[test]
fn add_mints_unique_ids() {
    let mut ledger = Ledger::default();
    let a = ledger
        .add(TransactionKind::Sale, Decimal::from(1), day(2024, 1, 1), None)
        .unwrap();
    let b = ledger
        .add(TransactionKind::Sale, Decimal::from(1), day(2024, 1, 1), None)
        .unwrap();
    assert_ne!(a, b);
}

#[test]
fn add_rejects_non_positive_amounts() {
    let mut ledger = Ledger::default();
    let zero = ledger.add(TransactionKind::Sale, Decimal::ZERO, day(2024, 1, 1), None);
    assert_eq!(
        zero,
        Err(ValidationError::AmountNotPositive(Decimal::ZERO))
    );
    let negative = ledger.add(
        TransactionKind::Purchase,
        Decimal::from(-5),
        day(2024, 1, 1),
        None,
    );
    assert!(negative.is_err());
    assert!(ledger.is_empty());
}

#[test]
fn update_preserves_kind_and_time_of_day() {
    let mut ledger = Ledger::default();
    let id = ledger
        .add(
            TransactionKind::Sale,
            Decimal::from(100),
            day(2024, 3, 5),
            None,
        )
        .unwrap();
    let before = ledger.find(&id).unwrap().date.with_timezone(&Local).time();

    let changed = ledger
        .update(
            &id,
            Decimal::from(42),
            day(2024, 6, 10),
            Some("adjusted".to_string()),
        )
        .unwrap();
    assert!(changed);

    let tx = ledger.find(&id).unwrap();
    assert_eq!(tx.kind, TransactionKind::Sale);
    assert_eq!(tx.amount, Decimal::from(42));
    assert_eq!(tx.remark.as_deref(), Some("adjusted"));
    let local = tx.date.with_timezone(&Local);
    assert_eq!(local.date_naive(), day(2024, 6, 10));
    assert_eq!(local.time(), before);
}

#[test]
fn update_missing_id_is_silent_noop() {
    let mut ledger = Ledger::default();
    let id = ledger
        .add(
            TransactionKind::Investment,
            Decimal::from(500),
            day(2024, 1, 1),
            None,
        )
        .unwrap();

    let changed = ledger
        .update("no-such-id", Decimal::from(9), day(2024, 2, 2), None)
        .unwrap();
    assert!(!changed);
    assert_eq!(ledger.len(), 1);
    assert_eq!(ledger.find(&id).unwrap().amount, Decimal::from(500));
}

#[test]
fn update_rejects_non_positive_amount_without_mutating() {
    let mut ledger = Ledger::default();
    let id = ledger
        .add(TransactionKind::Sale, Decimal::from(10), day(2024, 1, 1), None)
        .unwrap();

    let res = ledger.update(&id, Decimal::from(-1), day(2024, 2, 2), None);
    assert!(res.is_err());
    let tx = ledger.find(&id).unwrap();
    assert_eq!(tx.amount, Decimal::from(10));
    assert_eq!(tx.date.with_timezone(&Local).date_naive(), day(2024, 1, 1));
}

#[test]
fn delete_one_removes_only_the_match() {
    let mut ledger = Ledger::default();
    let keep = ledger
        .add(TransactionKind::Sale, Decimal::from(1), day(2024, 1, 1), None)
        .unwrap();
    let gone = ledger
        .add(TransactionKind::Sale, Decimal::from(2), day(2024, 1, 2), None)
        .unwrap();

    assert!(ledger.delete_one(&gone));
    assert_eq!(ledger.len(), 1);
    assert!(ledger.find(&keep).is_some());
    // absent id is a no-op
    assert!(!ledger.delete_one(&gone));
    assert_eq!(ledger.len(), 1);
}

#[test]
fn delete_many_is_idempotent() {
    let mut ledger = Ledger::default();
    let a = ledger
        .add(TransactionKind::Sale, Decimal::from(1), day(2024, 1, 1), None)
        .unwrap();
    let b = ledger
        .add(TransactionKind::Purchase, Decimal::from(2), day(2024, 1, 2), None)
        .unwrap();
    let c = ledger
        .add(TransactionKind::Investment, Decimal::from(3), day(2024, 1, 3), None)
        .unwrap();

    let ids = [a.as_str(), b.as_str(), "never-existed"];
    assert_eq!(ledger.delete_many(ids.iter().copied()), 2);
    assert_eq!(ledger.len(), 1);
    assert!(ledger.find(&c).is_some());

    assert_eq!(ledger.delete_many(ids.iter().copied()), 0);
    assert_eq!(ledger.len(), 1);
}

#[test]
fn deleting_drops_ids_from_the_selection() {
    let mut ledger = Ledger::default();
    let a = ledger
        .add(TransactionKind::Sale, Decimal::from(1), day(2024, 1, 1), None)
        .unwrap();
    let b = ledger
        .add(TransactionKind::Sale, Decimal::from(2), day(2024, 1, 2), None)
        .unwrap();
    ledger.toggle_selection(&a);
    ledger.toggle_selection(&b);

    ledger.delete_one(&a);
    assert!(!ledger.selected().contains(&a));
    assert!(ledger.selected().contains(&b));
}

#[test]
fn toggle_selection_flips_membership() {
    let mut ledger = Ledger::default();
    let id = ledger
        .add(TransactionKind::Sale, Decimal::from(1), day(2024, 1, 1), None)
        .unwrap();

    ledger.toggle_selection(&id);
    assert!(ledger.selected().contains(&id));
    ledger.toggle_selection(&id);
    assert!(ledger.selected().is_empty());
}

#[test]
fn toggle_select_all_cycles_between_all_and_none() {
    let mut ledger = Ledger::default();
    let a = ledger
        .add(TransactionKind::Sale, Decimal::from(1), day(2024, 1, 1), None)
        .unwrap();
    let _b = ledger
        .add(TransactionKind::Sale, Decimal::from(2), day(2024, 1, 2), None)
        .unwrap();

    ledger.toggle_select_all();
    assert_eq!(ledger.selected().len(), 2);

    // everything selected: toggling again clears
    ledger.toggle_select_all();
    assert!(ledger.selected().is_empty());

    // partial selection: toggling selects everything
    ledger.toggle_selection(&a);
    ledger.toggle_select_all();
    assert_eq!(ledger.selected().len(), 2);
}

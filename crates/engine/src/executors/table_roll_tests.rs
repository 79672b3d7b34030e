// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::test_support::{ctx, empty_system, step};
use grimoire_model::{TableKey, TableRollRef};
use grimoire_ports::FakeDiceService;
use indexmap::IndexMap;

fn loot_table() -> Table {
    let mut entries = IndexMap::new();
    entries.insert(TableKey::parse("1-3").unwrap(), TableEntryValue::Literal("Common".into()));
    entries.insert(TableKey::parse("4-7").unwrap(), TableEntryValue::Literal("Uncommon".into()));
    entries.insert(TableKey::parse("8-9").unwrap(), TableEntryValue::Literal("Rare".into()));
    entries.insert(TableKey::parse("10").unwrap(), TableEntryValue::Literal("Legendary".into()));
    Table {
        id: "loot".into(),
        name: "Loot".into(),
        roll: Some("1d10".into()),
        entry_type: "str".into(),
        entries,
    }
}

fn system_with_loot_table() -> System {
    let mut sys = empty_system();
    sys.tables.insert("loot".into(), loot_table());
    sys
}

#[tokio::test]
async fn resolves_ranges_by_roll_total() {
    let system = system_with_loot_table();
    for (roll, expected) in [(1, "Common"), (5, "Uncommon"), (9, "Rare"), (10, "Legendary")] {
        let dice = Arc::new(FakeDiceService::default());
        dice.queue("1d10", roll);
        let names = Arc::new(grimoire_ports::BuiltinNameGenerator::default());
        let executor = TableRollExecutor::new(dice, names);
        let mut c = ctx();
        let s = step(
            "loot",
            StepKind::TableRoll {
                tables: vec![TableRollRef {
                    table: "loot".into(),
                    count: None,
                }],
            },
        );
        let res = executor.execute(&s, &mut c, &system).await.expect("execute");
        let results = res.data.get("results").unwrap().as_array().unwrap();
        assert_eq!(results, &vec![Value::String(expected.into())]);
    }
}

#[tokio::test]
async fn a_roll_outside_every_range_yields_no_result() {
    let system = system_with_loot_table();
    let dice = Arc::new(FakeDiceService::default());
    dice.queue("1d10", 99);
    let names = Arc::new(grimoire_ports::BuiltinNameGenerator::default());
    let executor = TableRollExecutor::new(dice, names);
    let mut c = ctx();
    let s = step(
        "loot",
        StepKind::TableRoll {
            tables: vec![TableRollRef {
                table: "loot".into(),
                count: None,
            }],
        },
    );
    let res = executor.execute(&s, &mut c, &system).await.expect("execute");
    let results = res.data.get("results").unwrap().as_array().unwrap();
    assert!(results.is_empty());
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::fs;
use tempfile::tempdir;

fn write(dir: &std::path::Path, rel: &str, content: &str) {
    let full = dir.join(rel);
    if let Some(parent) = full.parent() {
        fs::create_dir_all(parent).expect("mkdir");
    }
    fs::write(full, content).expect("write");
}

const MINIMAL_SYSTEM_YAML: &str = r#"
id: knave
kind: system
name: "Knave"
version: "2e"
"#;

#[test]
fn lists_compendiums_and_tables_with_their_counts() {
    let dir = tempdir().expect("tempdir");
    write(dir.path(), "system.yaml", MINIMAL_SYSTEM_YAML);
    write(
        dir.path(),
        "models/weapon.yaml",
        "id: weapon\nname: Weapon\nattributes:\n  damage:\n    type: str\n",
    );
    write(
        dir.path(),
        "compendiums/weapons.yaml",
        r#"
id: weapons
name: Weapons
model: weapon
entries:
  sword: {damage: "1d6"}
  axe: {damage: "1d8"}
"#,
    );
    write(
        dir.path(),
        "tables/loot.yaml",
        r#"
id: loot
name: Loot
roll: 1d2
entry_type: str
entries:
  "1": Gold
  "2": Gem
"#,
    );
    let args = BrowseArgs {
        system_path: dir.path().to_path_buf(),
    };
    handle(args, OutputFormat::Text, &SystemLoader::new()).expect("browse should succeed");
}

#[test]
fn succeeds_for_a_system_with_no_compendiums_or_tables() {
    let dir = tempdir().expect("tempdir");
    write(dir.path(), "system.yaml", MINIMAL_SYSTEM_YAML);
    let args = BrowseArgs {
        system_path: dir.path().to_path_buf(),
    };
    handle(args, OutputFormat::Json, &SystemLoader::new()).expect("browse should succeed even when empty");
}

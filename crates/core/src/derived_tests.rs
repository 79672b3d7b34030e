// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn extracts_simple_identifiers() {
    let deps = extract_dependencies("{{ armor_class_base + dexterity_modifier }}");
    assert!(deps.contains("armor_class_base"));
    assert!(deps.contains("dexterity_modifier"));
    assert_eq!(deps.len(), 2);
}

#[test]
fn extracts_dotted_paths() {
    let deps = extract_dependencies("{{ user.email }} sent by {{ sender.name.first }}");
    assert!(deps.contains("user.email"));
    assert!(deps.contains("sender.name.first"));
}

#[test]
fn normalizes_current_instance_sigils() {
    let deps = extract_dependencies("{{ $.strength + $other.bonus }}");
    assert!(deps.contains("strength"));
    assert!(deps.contains("other.bonus"));
}

#[test]
fn ignores_filter_names() {
    let deps = extract_dependencies("{{ key|title_case }}: +{{ value.bonus }}");
    assert!(!deps.contains("title_case"));
    assert!(deps.contains("key"));
    assert!(deps.contains("value.bonus"));
}

#[test]
fn register_builds_reverse_dependency_graph() {
    let mut mgr = DerivedFieldManager::new();
    mgr.register(
        "armor_class",
        "{{ armor_class_base + dexterity_modifier }}",
    );
    assert!(mgr.is_derived("armor_class"));
    assert_eq!(
        mgr.dependents_of("armor_class_base"),
        vec!["armor_class".to_string()]
    );
    assert_eq!(
        mgr.dependents_of("dexterity_modifier"),
        vec!["armor_class".to_string()]
    );
}

#[test]
fn computing_guard_breaks_cycles() {
    let mut mgr = DerivedFieldManager::new();
    assert!(mgr.begin_computing("a"));
    assert!(!mgr.begin_computing("a"));
    mgr.end_computing("a");
    assert!(mgr.begin_computing("a"));
}

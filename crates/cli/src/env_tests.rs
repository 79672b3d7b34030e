// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::sync::Mutex;

// std::env is process-global; serialize the two tests that touch it.
static ENV_LOCK: Mutex<()> = Mutex::new(());

#[test]
fn defaults_to_info_without_the_verbose_flag() {
    let _guard = ENV_LOCK.lock().expect("lock");
    std::env::remove_var("GRIMOIRE_VERBOSE");
    assert_eq!(default_log_level(), "info");
}

#[test]
fn verbose_flag_raises_the_level_to_debug() {
    let _guard = ENV_LOCK.lock().expect("lock");
    std::env::set_var("GRIMOIRE_VERBOSE", "1");
    assert_eq!(default_log_level(), "debug");
    std::env::remove_var("GRIMOIRE_VERBOSE");
}

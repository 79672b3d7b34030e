// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use clap::Parser;
use std::fs;
use tempfile::tempdir;

#[derive(Parser)]
struct TestCli {
    #[command(flatten)]
    args: ExecuteArgs,
}

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
fn rejects_input_flags_without_an_equals_sign() {
    assert!(parse_key_value("no-equals-sign").is_err());
}

#[test]
fn splits_on_the_first_equals_sign() {
    let (key, value) = parse_key_value("hero_name=Bram=the=Bold").expect("parse");
    assert_eq!(key, "hero_name");
    assert_eq!(value, "Bram=the=Bold");
}

#[test]
fn parses_repeated_input_flags_and_no_interactive() {
    let cli = TestCli::parse_from([
        "grimoire",
        "--flow",
        "intro",
        "--input",
        "a=1",
        "--input",
        "b=2",
        "--no-interactive",
        "./my-system",
    ]);
    assert_eq!(cli.args.flow, "intro");
    assert!(cli.args.no_interactive);
    assert_eq!(
        cli.args.input,
        vec![("a".to_string(), "1".to_string()), ("b".to_string(), "2".to_string())]
    );
}

#[tokio::test]
async fn completes_a_flow_with_no_interactive_steps() {
    let dir = tempdir().expect("tempdir");
    write(dir.path(), "system.yaml", MINIMAL_SYSTEM_YAML);
    write(
        dir.path(),
        "flows/intro.yaml",
        r#"
id: intro
name: Intro
steps:
  - id: greet
    type: completion
    prompt: "Welcome!"
"#,
    );
    let args = ExecuteArgs {
        system_path: dir.path().to_path_buf(),
        flow: "intro".to_string(),
        output: None,
        no_interactive: true,
        input: vec![],
    };
    handle(args, OutputFormat::Text, &SystemLoader::new()).await.expect("flow should complete");
}

#[tokio::test]
async fn fails_fast_on_an_input_step_when_non_interactive() {
    let dir = tempdir().expect("tempdir");
    write(dir.path(), "system.yaml", MINIMAL_SYSTEM_YAML);
    write(
        dir.path(),
        "flows/intro.yaml",
        r#"
id: intro
name: Intro
steps:
  - id: name_step
    type: player_input
    prompt: "What is your name?"
"#,
    );
    let args = ExecuteArgs {
        system_path: dir.path().to_path_buf(),
        flow: "intro".to_string(),
        output: None,
        no_interactive: true,
        input: vec![],
    };
    let err = handle(args, OutputFormat::Text, &SystemLoader::new()).await.unwrap_err();
    assert!(err.to_string().contains("requires input"));
}

#[tokio::test]
async fn rejects_an_unknown_flow_id() {
    let dir = tempdir().expect("tempdir");
    write(dir.path(), "system.yaml", MINIMAL_SYSTEM_YAML);
    let args = ExecuteArgs {
        system_path: dir.path().to_path_buf(),
        flow: "does_not_exist".to_string(),
        output: None,
        no_interactive: true,
        input: vec![],
    };
    let err = handle(args, OutputFormat::Text, &SystemLoader::new()).await.unwrap_err();
    assert!(err.to_string().contains("unknown flow"));
}

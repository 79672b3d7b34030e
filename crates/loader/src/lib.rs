// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

//! The System Loader: walks a system directory, parses its YAML
//! files in dependency order, resolves load-time templates, and runs
//! cross-reference validation over the assembled object graph.

mod error;

pub use error::LoadError;

use grimoire_model::{Compendium, Flow, Model, Prompt, Source, System, Table, validate_system};
use grimoire_template::{is_runtime_template, TemplateService};
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Caches loaded systems by canonical path: subsequent loads of the same
/// path return the cached `System` rather than re-parsing it.
#[derive(Default)]
pub struct SystemLoader {
    cache: Mutex<HashMap<PathBuf, Arc<System>>>,
}

impl SystemLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(&self, path: &Path) -> Result<Arc<System>, LoadError> {
        let canonical = path
            .canonicalize()
            .map_err(|_| LoadError::NotFound(path.to_path_buf()))?;
        if let Some(cached) = self.cache.lock().expect("loader cache lock").get(&canonical) {
            tracing::debug!(path = %canonical.display(), "system load cache hit");
            return Ok(Arc::clone(cached));
        }
        let system = Arc::new(load_system(&canonical)?);
        self.cache
            .lock()
            .expect("loader cache lock")
            .insert(canonical, Arc::clone(&system));
        Ok(system)
    }
}

/// Loads a system directory without caching.
pub fn load_system(path: &Path) -> Result<System, LoadError> {
    tracing::info!(path = %path.display(), "loading system");
    let system_yaml_path = path.join("system.yaml");
    let raw = fs::read_to_string(&system_yaml_path)
        .map_err(|_| LoadError::NotFound(path.to_path_buf()))?;
    let doc: serde_yaml::Value = serde_yaml::from_str(&raw).map_err(|source| LoadError::Parse {
        path: system_yaml_path.clone(),
        source,
    })?;

    let mut errors = Vec::new();
    require_key(&doc, "id", &system_yaml_path, &mut errors);
    require_key(&doc, "name", &system_yaml_path, &mut errors);
    match doc.get("kind").and_then(serde_yaml::Value::as_str) {
        Some("system") => {}
        Some(other) => errors.push(format!(
            "{}: expected kind \"system\", found \"{other}\"",
            system_yaml_path.display()
        )),
        None => errors.push(format!(
            "{}: missing required key `kind`",
            system_yaml_path.display()
        )),
    }

    let mut system: System =
        serde_yaml::from_value(doc).map_err(|source| LoadError::Parse {
            path: system_yaml_path.clone(),
            source,
        })?;

    let templates = TemplateService::new();
    let metadata: JsonValue = system.metadata();

    resolve_descriptive_field(&templates, &metadata, &mut system.name, "system.name", &mut errors);
    if let Some(description) = system.description.as_mut() {
        resolve_descriptive_field(&templates, &metadata, description, "system.description", &mut errors);
    }

    // Parse order: sources -> models -> compendiums -> tables -> prompts -> flows (leaves first).
    let mut sources = load_dir::<Source>(path, "sources")?;
    for (file, source) in &mut sources {
        resolve_descriptive_field(
            &templates,
            &metadata,
            &mut source.name,
            &format!("{}", file.display()),
            &mut errors,
        );
    }
    system.sources = index_by(sources, |s| s.id.clone());

    let mut models = load_dir::<Model>(path, "models")?;
    for (file, model) in &mut models {
        resolve_descriptive_field(
            &templates,
            &metadata,
            &mut model.name,
            &format!("{}", file.display()),
            &mut errors,
        );
    }
    system.models = index_by(models, |m| m.id.clone());

    let mut compendiums = load_dir::<Compendium>(path, "compendiums")?;
    for (file, compendium) in &mut compendiums {
        resolve_descriptive_field(
            &templates,
            &metadata,
            &mut compendium.name,
            &format!("{}", file.display()),
            &mut errors,
        );
    }
    system.compendiums = index_by(compendiums, |c| c.id.clone());
    run_model_validations(&templates, &system, &mut errors);

    let mut tables = load_dir::<Table>(path, "tables")?;
    for (file, table) in &mut tables {
        resolve_descriptive_field(
            &templates,
            &metadata,
            &mut table.name,
            &format!("{}", file.display()),
            &mut errors,
        );
    }
    system.tables = index_by(tables, |t| t.id.clone());

    let prompts = load_dir::<Prompt>(path, "prompts")?;
    system.prompts = index_by(prompts, |p| p.id.clone());

    let mut flows = load_dir::<Flow>(path, "flows")?;
    for (file, flow) in &mut flows {
        let location = format!("{}", file.display());
        resolve_descriptive_field(&templates, &metadata, &mut flow.name, &location, &mut errors);
        if let Some(description) = flow.description.as_mut() {
            resolve_descriptive_field(&templates, &metadata, description, &location, &mut errors);
        }
        for step in &mut flow.steps {
            if let Some(name) = step.name.as_mut() {
                resolve_descriptive_field(&templates, &metadata, name, &location, &mut errors);
            }
            resolve_step_prompt(&templates, &metadata, step, &location, &mut errors);
        }
    }
    system.flows = index_by(flows, |f| f.id.clone());

    if let Err(grimoire_model::ModelError::Validation(msgs)) = validate_system(&system) {
        errors.extend(msgs);
    }

    if errors.is_empty() {
        Ok(system)
    } else {
        Err(LoadError::Validation(errors))
    }
}

/// Evaluates every `Model.validations` rule against each compendium entry
/// built on that model. Rules are ordinary run-time expressions, rendered
/// against the entry's own fields as top-level identifiers (the same
/// lenient resolver the engine uses for step conditions), so a rule can
/// read `hp > 0` rather than some compendium-specific accessor.
fn run_model_validations(templates: &TemplateService, system: &System, errors: &mut Vec<String>) {
    for (comp_id, compendium) in &system.compendiums {
        let Some(model) = system.models.get(&compendium.model) else {
            continue;
        };
        if model.validations.is_empty() {
            continue;
        }
        for (entry_id, entry) in &compendium.entries {
            let context = JsonValue::Object(entry.clone());
            for rule in &model.validations {
                let wrapped = if rule.expr.contains("{{") || rule.expr.contains("{%") {
                    rule.expr.clone()
                } else {
                    format!("{{{{ {} }}}}", rule.expr)
                };
                match templates.resolve_runtime(&wrapped, &context) {
                    Ok(rendered) => {
                        if !is_truthy(&rendered) {
                            let detail = rule.message.clone().unwrap_or_else(|| rule.expr.clone());
                            errors.push(format!(
                                "compendium `{comp_id}` entry `{entry_id}`: validation failed: {detail}"
                            ));
                        }
                    }
                    Err(e) => errors.push(format!(
                        "compendium `{comp_id}` entry `{entry_id}`: validation `{}` raised: {e}",
                        rule.expr
                    )),
                }
            }
        }
    }
}

fn is_truthy(value: &JsonValue) -> bool {
    match value {
        JsonValue::Bool(b) => *b,
        JsonValue::Null => false,
        JsonValue::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        JsonValue::String(s) => !matches!(s.to_lowercase().as_str(), "false" | "no" | "0" | ""),
        JsonValue::Array(a) => !a.is_empty(),
        JsonValue::Object(o) => !o.is_empty(),
    }
}

fn require_key(doc: &serde_yaml::Value, key: &str, path: &Path, errors: &mut Vec<String>) {
    if doc.get(key).is_none() {
        errors.push(format!("{}: missing required key `{key}`", path.display()));
    }
}

/// Reads every `*.yaml` file directly under `system_dir/subdir`, in
/// lexical order, and parses each one as `T`. A missing subdirectory is
/// not an error — not every system needs every category. A parse
/// failure short-circuits immediately, unlike
/// cross-reference validation, which aggregates.
fn load_dir<T: DeserializeOwned>(
    system_dir: &Path,
    subdir: &str,
) -> Result<Vec<(PathBuf, T)>, LoadError> {
    let dir = system_dir.join(subdir);
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut paths: Vec<PathBuf> = fs::read_dir(&dir)
        .map_err(|_| LoadError::NotFound(dir.clone()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.extension().and_then(|e| e.to_str()) == Some("yaml"))
        .collect();
    paths.sort();

    let mut out = Vec::with_capacity(paths.len());
    for path in paths {
        let raw = fs::read_to_string(&path).map_err(|_| LoadError::NotFound(path.clone()))?;
        let value: T = serde_yaml::from_str(&raw).map_err(|source| LoadError::Parse {
            path: path.clone(),
            source,
        })?;
        out.push((path, value));
    }
    Ok(out)
}

fn index_by<T>(
    items: Vec<(PathBuf, T)>,
    id_of: impl Fn(&T) -> String,
) -> indexmap::IndexMap<String, T> {
    items
        .into_iter()
        .map(|(_, value)| (id_of(&value), value))
        .collect()
}

/// Resolves a descriptive field in place against `system_metadata`
///. Run-time templates are left untouched; load-time
/// render failures are collected as validation errors rather than
/// aborting the whole load.
fn resolve_descriptive_field(
    templates: &TemplateService,
    metadata: &JsonValue,
    field: &mut String,
    location: &str,
    errors: &mut Vec<String>,
) {
    if !field.contains("{{") && !field.contains("{%") {
        return;
    }
    if is_runtime_template(field) {
        return;
    }
    match templates.resolve_loadtime(field, metadata) {
        Ok(rendered) => *field = rendered,
        Err(e) => errors.push(format!("{location}: {e}")),
    }
}

fn resolve_step_prompt(
    templates: &TemplateService,
    metadata: &JsonValue,
    step: &mut grimoire_model::Step,
    location: &str,
    errors: &mut Vec<String>,
) {
    use grimoire_model::StepKind;
    match &mut step.kind {
        StepKind::PlayerInput { prompt: Some(prompt) }
        | StepKind::Completion { prompt: Some(prompt) }
        | StepKind::LlmGeneration { prompt: Some(prompt), .. } => {
            resolve_descriptive_field(templates, metadata, prompt, location, errors);
        }
        _ => {}
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

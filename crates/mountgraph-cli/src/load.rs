//! Input loading: definitions documents, model config and kind allow-sets.

use anyhow::{anyhow, Context, Result};
use mountgraph_schema::{Definition, Definitions, KindSet, ModelConfig};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Reads an OpenAPI v2 document (its `definitions` object) or a bare
/// definitions map.
pub fn read_definitions(path: &Path) -> Result<Definitions> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read definitions from {}", path.display()))?;
    parse_definitions(&text).with_context(|| format!("invalid definitions in {}", path.display()))
}

pub fn parse_definitions(text: &str) -> Result<Definitions> {
    let document: Value = serde_json::from_str(text)?;
    let definitions = match document {
        Value::Object(mut map) if map.contains_key("definitions") => {
            map.remove("definitions").unwrap_or_default()
        }
        other => other,
    };
    if !definitions.is_object() {
        return Err(anyhow!("expected a JSON object of definitions"));
    }
    Ok(serde_json::from_value(definitions)?)
}

/// Kind list file: a JSON array of strings, or one key per line.
pub fn parse_kinds(text: &str) -> Result<KindSet> {
    if text.trim_start().starts_with('[') {
        let keys: Vec<String> = serde_json::from_str(text)?;
        Ok(keys.into_iter().collect())
    } else {
        Ok(KindSet::parse_list(text))
    }
}

/// Every group/version/kind annotated in `definitions`.
pub fn collect_kinds(definitions: &Definitions) -> KindSet {
    definitions.values().filter_map(Definition::gvk).collect()
}

/// Builds the model config: config file (or defaults), then kinds from a
/// kinds file, then every annotated kind if `all_kinds` is set.
pub fn load_config(
    config: Option<&Path>,
    kinds: Option<&Path>,
    all_kinds: bool,
    definitions: &Definitions,
) -> Result<ModelConfig> {
    let mut model = match config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            ModelConfig::from_json_str(&text)
                .with_context(|| format!("invalid config {}", path.display()))?
        }
        None => ModelConfig::default(),
    };

    if let Some(path) = kinds {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read kinds {}", path.display()))?;
        let extra = parse_kinds(&text).with_context(|| format!("invalid kinds {}", path.display()))?;
        for key in extra.iter() {
            model.kinds.insert(key);
        }
    }

    if all_kinds {
        for key in collect_kinds(definitions).iter() {
            model.kinds.insert(key);
        }
    }

    tracing::debug!(
        kinds = model.kinds.len(),
        patches = model.patches.len(),
        "loaded model config"
    );
    Ok(model)
}

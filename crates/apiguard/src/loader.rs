//! Loads API description documents from YAML or JSON files.

use std::path::Path;

use serde_json::Value;

use crate::error::LintError;

/// Parse a document from a YAML/JSON string.
///
/// YAML merge keys (`<<: *anchor`) are applied, and scalar mapping keys such
/// as unquoted response codes become strings. `origin` names the source in
/// error messages.
pub fn parse_document(input: &str, origin: &str) -> Result<Value, LintError> {
    let parse_error = |e: serde_yaml::Error| LintError::Parse {
        path: origin.to_string(),
        message: e.to_string(),
    };

    // Parse YAML (also handles JSON since JSON is valid YAML)
    let mut yaml: serde_yaml::Value = serde_yaml::from_str(input).map_err(parse_error)?;
    yaml.apply_merge().map_err(parse_error)?;
    let root: Value = serde_yaml::from_value(stringify_keys(yaml)).map_err(parse_error)?;

    if !root.is_object() {
        return Err(LintError::NotAnObject(origin.to_string()));
    }
    Ok(root)
}

/// Rewrite scalar mapping keys as strings so the tree fits a JSON object.
fn stringify_keys(value: serde_yaml::Value) -> serde_yaml::Value {
    use serde_yaml::Value as Yaml;

    match value {
        Yaml::Mapping(mapping) => Yaml::Mapping(
            mapping
                .into_iter()
                .map(|(key, value)| {
                    let key = match key {
                        Yaml::Number(n) => Yaml::String(n.to_string()),
                        Yaml::Bool(b) => Yaml::String(b.to_string()),
                        Yaml::Null => Yaml::String("null".to_string()),
                        other => other,
                    };
                    (key, stringify_keys(value))
                })
                .collect(),
        ),
        Yaml::Sequence(items) => Yaml::Sequence(items.into_iter().map(stringify_keys).collect()),
        Yaml::Tagged(tagged) => stringify_keys(tagged.value),
        other => other,
    }
}

/// Read and parse a document from a file path.
pub fn load_document(path: &Path) -> Result<Value, LintError> {
    let origin = path.display().to_string();
    let content = std::fs::read_to_string(path).map_err(|source| LintError::Io {
        path: origin.clone(),
        source,
    })?;
    let document = parse_document(&content, &origin)?;
    tracing::debug!(file = %origin, "document loaded");
    Ok(document)
}

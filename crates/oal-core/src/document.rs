use std::fs;
use std::path::Path;

use serde_json::{Map, Value};

use crate::error::{ParseError, WriteError};

/// On-disk notation of a spec document, selected by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// Sniff the format from a filename extension. `None` for anything that
    /// is not `.json`, `.yaml`, or `.yml` (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(DocumentFormat::Json),
            "yaml" | "yml" => Some(DocumentFormat::Yaml),
            _ => None,
        }
    }
}

/// Parse a spec document from YAML into a generic tree.
///
/// YAML allows non-string scalar keys (`200:`); these are coerced to strings
/// so the tree behaves like its JSON counterpart.
pub fn from_yaml(input: &str) -> Result<Value, ParseError> {
    let raw: serde_yaml_ng::Value = serde_yaml_ng::from_str(input)?;
    yaml_to_tree(raw)
}

/// Parse a spec document from JSON into a generic tree.
pub fn from_json(input: &str) -> Result<Value, ParseError> {
    Ok(serde_json::from_str(input)?)
}

fn yaml_to_tree(value: serde_yaml_ng::Value) -> Result<Value, ParseError> {
    use serde_yaml_ng::Value as Yaml;
    Ok(match value {
        Yaml::Null => Value::Null,
        Yaml::Bool(b) => Value::Bool(b),
        Yaml::Number(n) => serde_json::to_value(n)?,
        Yaml::String(s) => Value::String(s),
        Yaml::Sequence(items) => Value::Array(
            items
                .into_iter()
                .map(yaml_to_tree)
                .collect::<Result<_, _>>()?,
        ),
        Yaml::Mapping(mapping) => {
            let mut map = Map::with_capacity(mapping.len());
            for (key, child) in mapping {
                map.insert(scalar_key(key)?, yaml_to_tree(child)?);
            }
            Value::Object(map)
        }
        Yaml::Tagged(tagged) => yaml_to_tree(tagged.value)?,
    })
}

fn scalar_key(key: serde_yaml_ng::Value) -> Result<String, ParseError> {
    use serde_yaml_ng::Value as Yaml;
    match key {
        Yaml::String(s) => Ok(s),
        Yaml::Number(n) => Ok(n.to_string()),
        Yaml::Bool(b) => Ok(b.to_string()),
        Yaml::Null => Ok("null".to_string()),
        other => Err(ParseError::NonScalarKey(format!("{other:?}"))),
    }
}

/// Render a document tree in the requested notation: indented JSON with key
/// order as iterated, or a YAML dump that never emits anchors or aliases.
pub fn render(doc: &Value, format: DocumentFormat) -> Result<String, WriteError> {
    match format {
        DocumentFormat::Json => Ok(serde_json::to_string_pretty(doc)?),
        DocumentFormat::Yaml => Ok(serde_yaml_ng::to_string(doc)?),
    }
}

/// Result of a [`write`] call. An unrecognized extension is reported rather
/// than silently skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Written(DocumentFormat),
    UnknownExtension,
}

/// Serialize `doc` in the notation matching `path`'s extension and overwrite
/// the file. The write is all-or-nothing: a failure propagates, nothing is
/// retried.
pub fn write(doc: &Value, path: &Path) -> Result<WriteOutcome, WriteError> {
    let Some(format) = DocumentFormat::from_path(path) else {
        return Ok(WriteOutcome::UnknownExtension);
    };
    let rendered = render(doc, format)?;
    fs::write(path, rendered).map_err(|source| WriteError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(WriteOutcome::Written(format))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            DocumentFormat::from_path(Path::new("spec.json")),
            Some(DocumentFormat::Json)
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("spec.yaml")),
            Some(DocumentFormat::Yaml)
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("spec.YML")),
            Some(DocumentFormat::Yaml)
        );
        assert_eq!(DocumentFormat::from_path(Path::new("spec.txt")), None);
        assert_eq!(DocumentFormat::from_path(Path::new("spec")), None);
    }

    #[test]
    fn test_yaml_numeric_keys_coerced() {
        let doc = from_yaml("responses:\n  200:\n    description: ok\n").unwrap();
        assert_eq!(doc["responses"]["200"]["description"], "ok");
    }

    #[test]
    fn test_yaml_bool_and_null_keys_coerced() {
        let doc = from_yaml("true: yes-key\n~: null-key\n").unwrap();
        assert_eq!(doc["true"], "yes-key");
        assert_eq!(doc["null"], "null-key");
    }

    #[test]
    fn test_json_parses_directly() {
        let doc = from_json(r#"{"openapi": "3.0.0", "paths": {}}"#).unwrap();
        assert_eq!(doc["openapi"], "3.0.0");
    }
}

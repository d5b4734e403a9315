use std::collections::HashSet;

use serde_json::{Map, Value};

use crate::error::ResolveError;

/// Expand all internal `$ref` pointers in a spec tree, returning the
/// resolved view rules are evaluated against. The input is left untouched.
///
/// Reference cycles keep their innermost `$ref` node so resolution
/// terminates; non-local references (targets not starting with `#`) are left
/// as-is.
pub fn resolve_spec(spec: &Value) -> Result<Value, ResolveError> {
    let mut resolver = RefResolver {
        root: spec,
        visited: HashSet::new(),
    };
    resolver.resolve_value(spec)
}

struct RefResolver<'a> {
    root: &'a Value,
    // Reference strings on the current expansion stack, for cycle detection.
    visited: HashSet<String>,
}

impl RefResolver<'_> {
    fn resolve_value(&mut self, value: &Value) -> Result<Value, ResolveError> {
        match value {
            Value::Object(map) => {
                if let Some(target) = reference_target(map)? {
                    return self.resolve_reference(map, &target);
                }
                let mut resolved = Map::with_capacity(map.len());
                for (key, child) in map {
                    resolved.insert(key.clone(), self.resolve_value(child)?);
                }
                Ok(Value::Object(resolved))
            }
            Value::Array(items) => Ok(Value::Array(
                items
                    .iter()
                    .map(|item| self.resolve_value(item))
                    .collect::<Result<_, _>>()?,
            )),
            scalar => Ok(scalar.clone()),
        }
    }

    fn resolve_reference(
        &mut self,
        original: &Map<String, Value>,
        target: &str,
    ) -> Result<Value, ResolveError> {
        if !target.starts_with('#') {
            // External references are resolved upstream; keep the node.
            log::warn!("leaving non-local reference unresolved: {target}");
            return Ok(Value::Object(original.clone()));
        }
        if self.visited.contains(target) {
            log::warn!("reference cycle at {target}; keeping the reference");
            return Ok(Value::Object(original.clone()));
        }
        let node = lookup_pointer(self.root, target)?;
        self.visited.insert(target.to_string());
        let resolved = self.resolve_value(node);
        self.visited.remove(target);
        resolved
    }
}

/// Extract the `$ref` target from a mapping, if present.
fn reference_target(map: &Map<String, Value>) -> Result<Option<String>, ResolveError> {
    match map.get("$ref") {
        None => Ok(None),
        Some(Value::String(target)) => Ok(Some(target.clone())),
        Some(other) => Err(ResolveError::InvalidRefFormat(other.to_string())),
    }
}

/// Walk a `#/a/b/c` JSON-pointer reference from the document root.
fn lookup_pointer<'a>(root: &'a Value, target: &str) -> Result<&'a Value, ResolveError> {
    let pointer = match target.strip_prefix('#') {
        Some(p) => p,
        None => return Err(ResolveError::InvalidRefFormat(target.to_string())),
    };
    if pointer.is_empty() {
        return Ok(root);
    }
    let Some(tokens) = pointer.strip_prefix('/') else {
        return Err(ResolveError::InvalidRefFormat(target.to_string()));
    };
    let mut node = root;
    for token in tokens.split('/') {
        let token = token.replace("~1", "/").replace("~0", "~");
        let next = match node {
            Value::Object(map) => map.get(&token),
            Value::Array(items) => token.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        };
        node = next.ok_or_else(|| ResolveError::RefTargetNotFound(target.to_string()))?;
    }
    Ok(node)
}

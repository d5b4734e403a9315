use serde_json::{Map, Value};

/// HTTP method keys recognized in a path item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Head,
    Post,
    Put,
    Patch,
    Delete,
    Options,
    Trace,
}

impl HttpMethod {
    /// The lowercase key under which the method appears in a path item.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Head => "head",
            HttpMethod::Post => "post",
            HttpMethod::Put => "put",
            HttpMethod::Patch => "patch",
            HttpMethod::Delete => "delete",
            HttpMethod::Options => "options",
            HttpMethod::Trace => "trace",
        }
    }

    /// Recognize a path-item key. Non-method keys (`parameters`, `summary`)
    /// yield `None`.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "get" => Some(HttpMethod::Get),
            "head" => Some(HttpMethod::Head),
            "post" => Some(HttpMethod::Post),
            "put" => Some(HttpMethod::Put),
            "patch" => Some(HttpMethod::Patch),
            "delete" => Some(HttpMethod::Delete),
            "options" => Some(HttpMethod::Options),
            "trace" => Some(HttpMethod::Trace),
            _ => None,
        }
    }
}

/// One HTTP operation, flattened out of the resolved spec's path map.
#[derive(Debug, Clone, Copy)]
pub struct OperationRecord<'a> {
    pub path: &'a str,
    pub method: HttpMethod,
    pub operation: &'a Map<String, Value>,
}

impl OperationRecord<'_> {
    pub fn operation_id(&self) -> Option<&str> {
        self.operation.get("operationId").and_then(Value::as_str)
    }
}

/// Flatten the resolved spec's path map into operation records, preserving
/// path order and then key order within each path item. Keys that do not
/// name a recognized HTTP method are skipped, as are method entries whose
/// value is not a mapping.
pub fn collect_operations(resolved: &Value) -> Vec<OperationRecord<'_>> {
    let Some(paths) = resolved.get("paths").and_then(Value::as_object) else {
        return Vec::new();
    };
    let mut operations = Vec::new();
    for (path, item) in paths {
        let Some(item) = item.as_object() else {
            continue;
        };
        for (key, value) in item {
            let Some(method) = HttpMethod::from_key(key) else {
                continue;
            };
            let Some(operation) = value.as_object() else {
                continue;
            };
            operations.push(OperationRecord {
                path,
                method,
                operation,
            });
        }
    }
    operations
}

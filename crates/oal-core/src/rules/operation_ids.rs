use serde_json::{Map, Value};

use crate::config::{CaseSetting, RuleConfig, Severity};
use crate::fix::{Fix, FixOp};
use crate::operations::{HttpMethod, OperationRecord, collect_operations};
use crate::path::DocPath;
use crate::{Finding, Rule, RuleContext, RuleOutcome};

/// Operations must have a non-empty `operationId` that follows the
/// configured case convention. Where the path shape allows, a replacement
/// identifier is proposed as a fix.
pub struct OperationIdRule;

impl Rule for OperationIdRule {
    fn name(&self) -> &'static str {
        "operation-ids"
    }

    fn description(&self) -> &'static str {
        "operations carry a non-empty operationId in the configured case convention"
    }

    fn validate(&self, ctx: &RuleContext<'_>, config: &RuleConfig) -> RuleOutcome {
        let mut outcome = RuleOutcome::default();
        let Some(paths) = ctx.resolved_spec.get("paths").and_then(Value::as_object) else {
            return outcome;
        };

        for op in collect_operations(ctx.resolved_spec) {
            match op.operation_id() {
                Some(id) if !id.trim().is_empty() => {
                    // The convention check sees the raw identifier.
                    let CaseSetting(severity, convention) =
                        config.operations.operation_id_case_convention;
                    if severity != Severity::Off && !convention.matches(id) {
                        outcome.record(
                            severity,
                            Finding {
                                path: operation_id_path(&op),
                                message: format!(
                                    "operationIds must follow case convention: {convention}"
                                ),
                            },
                        );
                        outcome.fixes.extend(fix_operation_id(&op, paths));
                    }
                }
                // Absent, non-string, empty, or whitespace-only.
                _ => {
                    let severity = config.operations.no_operation_id;
                    if severity != Severity::Off {
                        outcome.record(
                            severity,
                            Finding {
                                path: operation_id_path(&op),
                                message: "Operations must have a non-empty `operationId`."
                                    .to_string(),
                            },
                        );
                        outcome.fixes.extend(fix_operation_id(&op, paths));
                    }
                }
            }
        }
        outcome
    }
}

fn operation_id_path(op: &OperationRecord<'_>) -> DocPath {
    DocPath::root()
        .key("paths")
        .key(op.path)
        .key(op.method.as_str())
        .key("operationId")
}

/// Propose a replacement identifier, or `None` when the path shape gives no
/// safe derivation (a parameterized path with no collection sibling).
fn fix_operation_id(op: &OperationRecord<'_>, paths: &Map<String, Value>) -> Option<Fix> {
    let value = propose_identifier(op, paths)?;
    Some(Fix {
        op: FixOp::Add,
        path: operation_id_path(op),
        value: Value::String(value),
    })
}

/// Heuristic: a path that is part of a collection/instance pair gets a
/// `<verb>_<noun>` identifier; an unpaired plain path reuses its final
/// segment as-is.
fn propose_identifier(op: &OperationRecord<'_>, paths: &Map<String, Value>) -> Option<String> {
    let collection = collection_sibling(op.path);
    let resource_oriented = match collection {
        Some(collection) => paths.contains_key(collection),
        None => {
            let probe = format!("{}/{{", op.path);
            paths.keys().any(|p| p.starts_with(&probe))
        }
    };

    if resource_oriented {
        let verb = if collection.is_some() {
            // Instance verbs; patch wins over post for update.
            let has_patch = paths
                .get(op.path)
                .and_then(Value::as_object)
                .is_some_and(|item| item.contains_key("patch"));
            match op.method {
                HttpMethod::Put => "replace",
                HttpMethod::Patch => "update",
                HttpMethod::Post if !has_patch => "update",
                method => method.as_str(),
            }
        } else {
            // Collection verbs.
            match op.method {
                HttpMethod::Post => "create",
                HttpMethod::Get => "list",
                method => method.as_str(),
            }
        };
        // The noun is the last path segment that is not a parameter
        // placeholder.
        let noun = op
            .path
            .split('/')
            .filter(|segment| !segment.starts_with('{'))
            .next_back()
            .unwrap_or_default();
        return Some(format!("{verb}_{noun}"));
    }

    if collection.is_none() {
        // Unpaired plain path: its final segment, unmodified.
        return op.path.rsplit('/').next().map(str::to_string);
    }

    None
}

/// For a path ending in a parameter segment, the collection path obtained by
/// stripping that segment.
fn collection_sibling(path: &str) -> Option<&str> {
    let (collection, last) = path.rsplit_once('/')?;
    (last.starts_with('{') && last.ends_with('}')).then_some(collection)
}

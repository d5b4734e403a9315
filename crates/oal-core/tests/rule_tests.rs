use oal_core::case::CaseConvention;
use oal_core::config::{CaseSetting, OperationsConfig, RuleConfig, Severity};
use oal_core::rules::{self, OperationIdRule};
use oal_core::{Rule, RuleContext, RuleOutcome};
use serde_json::{Value, json};

const WIDGETS: &str = include_str!("fixtures/widgets.yaml");

fn validate(spec: &Value, config: &RuleConfig) -> RuleOutcome {
    let ctx = RuleContext {
        resolved_spec: spec,
    };
    OperationIdRule.validate(&ctx, config)
}

#[test]
fn missing_operation_id_warns() {
    let spec = json!({
        "paths": {
            "/CoolPath": {
                "put": {"summary": "this is a summary"}
            }
        }
    });
    let outcome = validate(&spec, &RuleConfig::default());
    assert_eq!(outcome.errors.len(), 0);
    assert_eq!(outcome.warnings.len(), 1);
    assert_eq!(
        outcome.warnings[0].path.to_string(),
        "paths./CoolPath.put.operationId"
    );
    assert_eq!(
        outcome.warnings[0].message,
        "Operations must have a non-empty `operationId`."
    );
    // Unpaired plain path: the fix reuses the final segment as-is.
    assert_eq!(outcome.fixes.len(), 1);
    assert_eq!(outcome.fixes[0].value, json!("CoolPath"));
    assert_eq!(
        outcome.fixes[0].path.to_string(),
        "paths./CoolPath.put.operationId"
    );
}

#[test]
fn whitespace_operation_id_counts_as_missing() {
    let spec = json!({
        "paths": {
            "/CoolPath": {
                "put": {"operationId": " "}
            }
        }
    });
    let outcome = validate(&spec, &RuleConfig::default());
    assert_eq!(outcome.errors.len(), 0);
    assert_eq!(outcome.warnings.len(), 1);
    assert_eq!(
        outcome.warnings[0].message,
        "Operations must have a non-empty `operationId`."
    );
}

#[test]
fn wrong_case_operation_id_warns() {
    let spec = json!({
        "paths": {
            "/CoolPath": {
                "put": {"operationId": "coolPathPut"}
            }
        }
    });
    let outcome = validate(&spec, &RuleConfig::default());
    assert_eq!(outcome.errors.len(), 0);
    assert_eq!(outcome.warnings.len(), 1);
    assert_eq!(
        outcome.warnings[0].path.to_string(),
        "paths./CoolPath.put.operationId"
    );
    assert_eq!(
        outcome.warnings[0].message,
        "operationIds must follow case convention: lower_snake_case"
    );
}

#[test]
fn conforming_operation_id_passes() {
    let spec = json!({
        "paths": {
            "/CoolPath": {
                "put": {"operationId": "cool_path_put"}
            }
        }
    });
    let outcome = validate(&spec, &RuleConfig::default());
    assert_eq!(outcome.errors.len(), 0);
    assert_eq!(outcome.warnings.len(), 0);
    assert_eq!(outcome.fixes.len(), 0);
}

#[test]
fn off_severity_suppresses_findings_and_fixes() {
    let spec = json!({
        "paths": {
            "/a": {"get": {}},
            "/b": {"get": {"operationId": "wrongCase"}}
        }
    });
    let config = RuleConfig {
        operations: OperationsConfig {
            no_operation_id: Severity::Off,
            operation_id_case_convention: CaseSetting(
                Severity::Off,
                CaseConvention::LowerSnakeCase,
            ),
        },
    };
    let outcome = validate(&spec, &config);
    assert_eq!(outcome.errors.len(), 0);
    assert_eq!(outcome.warnings.len(), 0);
    assert_eq!(outcome.fixes.len(), 0);
}

#[test]
fn error_severity_routes_to_errors() {
    let spec = json!({"paths": {"/a": {"get": {}}}});
    let config = RuleConfig {
        operations: OperationsConfig {
            no_operation_id: Severity::Error,
            ..OperationsConfig::default()
        },
    };
    let outcome = validate(&spec, &config);
    assert_eq!(outcome.errors.len(), 1);
    assert_eq!(outcome.warnings.len(), 0);
}

fn fix_values(outcome: &RuleOutcome) -> Vec<(String, Value)> {
    outcome
        .fixes
        .iter()
        .map(|fix| (fix.path.to_string(), fix.value.clone()))
        .collect()
}

#[test]
fn resource_oriented_verbs() {
    let spec = json!({
        "paths": {
            "/widgets": {"get": {}, "post": {}},
            "/widgets/{id}": {"get": {}, "put": {}, "patch": {}}
        }
    });
    let outcome = validate(&spec, &RuleConfig::default());
    assert_eq!(outcome.warnings.len(), 5);
    assert_eq!(
        fix_values(&outcome),
        vec![
            ("paths./widgets.get.operationId".to_string(), json!("list_widgets")),
            ("paths./widgets.post.operationId".to_string(), json!("create_widgets")),
            ("paths./widgets/{id}.get.operationId".to_string(), json!("get_widgets")),
            ("paths./widgets/{id}.put.operationId".to_string(), json!("replace_widgets")),
            ("paths./widgets/{id}.patch.operationId".to_string(), json!("update_widgets")),
        ]
    );
}

#[test]
fn instance_post_updates_only_without_patch() {
    let spec = json!({
        "paths": {
            "/things": {"post": {}},
            "/things/{id}": {"post": {}}
        }
    });
    let outcome = validate(&spec, &RuleConfig::default());
    assert_eq!(
        fix_values(&outcome),
        vec![
            ("paths./things.post.operationId".to_string(), json!("create_things")),
            ("paths./things/{id}.post.operationId".to_string(), json!("update_things")),
        ]
    );
}

#[test]
fn patch_wins_over_post_for_update() {
    let spec = json!({
        "paths": {
            "/things": {"post": {}},
            "/things/{id}": {"post": {}, "patch": {}}
        }
    });
    let outcome = validate(&spec, &RuleConfig::default());
    assert_eq!(
        fix_values(&outcome),
        vec![
            ("paths./things.post.operationId".to_string(), json!("create_things")),
            ("paths./things/{id}.post.operationId".to_string(), json!("post_things")),
            ("paths./things/{id}.patch.operationId".to_string(), json!("update_things")),
        ]
    );
}

#[test]
fn plain_path_reuses_final_segment() {
    let spec = json!({"paths": {"/health": {"get": {}}}});
    let outcome = validate(&spec, &RuleConfig::default());
    assert_eq!(outcome.warnings.len(), 1);
    assert_eq!(
        fix_values(&outcome),
        vec![("paths./health.get.operationId".to_string(), json!("health"))]
    );
}

#[test]
fn unpaired_parameterized_path_has_no_fix() {
    let spec = json!({"paths": {"/solo/{id}": {"get": {}}}});
    let outcome = validate(&spec, &RuleConfig::default());
    assert_eq!(outcome.warnings.len(), 1);
    assert_eq!(outcome.fixes.len(), 0);
}

#[test]
fn wrong_case_fix_rederives_instead_of_recasing() {
    let spec = json!({
        "paths": {
            "/widgets": {"get": {"operationId": "listWidgets"}},
            "/widgets/{id}": {"get": {}}
        }
    });
    let outcome = validate(&spec, &RuleConfig::default());
    let values = fix_values(&outcome);
    assert_eq!(
        values[0],
        ("paths./widgets.get.operationId".to_string(), json!("list_widgets"))
    );
}

#[test]
fn spec_without_paths_is_clean() {
    let outcome = validate(&json!({"openapi": "3.0.0"}), &RuleConfig::default());
    assert_eq!(outcome.errors.len(), 0);
    assert_eq!(outcome.warnings.len(), 0);
    assert_eq!(outcome.fixes.len(), 0);
}

#[test]
fn run_rules_groups_fixes_by_rule() {
    let doc = oal_core::document::from_yaml(WIDGETS).unwrap();
    let resolved = oal_core::resolve::resolve_spec(&doc).unwrap();
    let ctx = RuleContext {
        resolved_spec: &resolved,
    };
    let report = rules::run_rules(&ctx, &RuleConfig::default());

    // /widgets get+post and /widgets/{id} put+patch are missing ids;
    // /health get has the wrong case; /widgets/{id} get conforms.
    assert_eq!(report.errors.len(), 0);
    assert_eq!(report.warnings.len(), 5);
    assert!(!report.has_errors());

    let fixes = report.fixes.get("operation-ids").expect("fixes grouped by rule");
    assert_eq!(fixes.len(), 5);
    assert_eq!(report.fix_count(), 5);
    let health = fixes
        .iter()
        .find(|fix| fix.path.to_string() == "paths./health.get.operationId")
        .expect("fix for /health");
    assert_eq!(health.value, json!("health"));
}

#[test]
fn rule_registry_contains_operation_ids() {
    let names: Vec<&str> = rules::all_rules().iter().map(|rule| rule.name()).collect();
    assert_eq!(names, vec!["operation-ids"]);
}

pub mod case;
pub mod config;
pub mod document;
pub mod error;
pub mod fix;
pub mod operations;
pub mod patch;
pub mod path;
pub mod resolve;
pub mod rules;

use serde::Serialize;
use serde_json::Value;

use config::{RuleConfig, Severity};
use fix::Fix;
use path::DocPath;

/// A single convention violation, addressed by structural path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Finding {
    pub path: DocPath,
    pub message: String,
}

/// Read-only context handed to every rule invocation.
pub struct RuleContext<'a> {
    /// The spec with all internal references already expanded.
    pub resolved_spec: &'a Value,
}

/// What one rule reports back: findings bucketed by severity, plus proposed
/// fixes. Fix lists may be shorter than finding lists, since not every
/// violation has a safe repair.
#[derive(Debug, Default)]
pub struct RuleOutcome {
    pub errors: Vec<Finding>,
    pub warnings: Vec<Finding>,
    pub fixes: Vec<Fix>,
}

impl RuleOutcome {
    /// File a finding under the configured severity. `Severity::Off` drops it.
    pub fn record(&mut self, severity: Severity, finding: Finding) {
        match severity {
            Severity::Error => self.errors.push(finding),
            Severity::Warning => self.warnings.push(finding),
            Severity::Off => {}
        }
    }
}

/// Trait for semantic lint rules evaluated against a resolved spec.
pub trait Rule {
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;
    fn validate(&self, ctx: &RuleContext<'_>, config: &RuleConfig) -> RuleOutcome;
}

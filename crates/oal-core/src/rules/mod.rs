pub mod operation_ids;

use indexmap::IndexMap;

use crate::config::RuleConfig;
use crate::fix::Fix;
use crate::{Finding, Rule, RuleContext};

pub use operation_ids::OperationIdRule;

/// Every registered rule, in evaluation order.
pub fn all_rules() -> Vec<Box<dyn Rule>> {
    vec![Box::new(OperationIdRule)]
}

/// Aggregated output of one validation pass over a resolved spec.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<Finding>,
    pub warnings: Vec<Finding>,
    /// Proposed fixes, grouped under the rule that produced them. Rules
    /// without fixes have no entry.
    pub fixes: IndexMap<String, Vec<Fix>>,
}

impl ValidationReport {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn fix_count(&self) -> usize {
        self.fixes.values().map(Vec::len).sum()
    }
}

/// Run every registered rule against the resolved spec and aggregate the
/// results. Rules only read the context; they are independent of each other.
pub fn run_rules(ctx: &RuleContext<'_>, config: &RuleConfig) -> ValidationReport {
    let mut report = ValidationReport::default();
    for rule in all_rules() {
        let outcome = rule.validate(ctx, config);
        log::debug!(
            "rule {}: {} errors, {} warnings, {} fixes",
            rule.name(),
            outcome.errors.len(),
            outcome.warnings.len(),
            outcome.fixes.len()
        );
        report.errors.extend(outcome.errors);
        report.warnings.extend(outcome.warnings);
        if !outcome.fixes.is_empty() {
            report.fixes.insert(rule.name().to_string(), outcome.fixes);
        }
    }
    report
}

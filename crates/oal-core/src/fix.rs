use std::path::Path;

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use crate::document::{self, WriteOutcome};
use crate::error::WriteError;
use crate::patch;
use crate::path::DocPath;

/// The patch operation kind. Everything rules propose today is an `add`
/// (set-at-path) edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FixOp {
    Add,
}

/// A proposed repair: one value written to one leaf of the original
/// document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Fix {
    pub op: FixOp,
    pub path: DocPath,
    pub value: Value,
}

/// Apply every rule's fixes to the original (unresolved) document and
/// overwrite `filename` in the notation matching its extension.
///
/// Fixes are applied in arrival order; later fixes to the same path win.
/// Paths are computed against the resolved view: a fix whose path crosses a
/// location that only exists after reference expansion lands on the wrong
/// branch of the original document. None of the shipped rules produce such
/// paths.
pub fn apply_fixes(
    fixes_by_rule: &IndexMap<String, Vec<Fix>>,
    document: &mut Value,
    filename: &Path,
) -> Result<WriteOutcome, WriteError> {
    for (rule, fixes) in fixes_by_rule {
        log::debug!("applying {} fixes from {rule}", fixes.len());
        for fix in fixes {
            patch::set_value(document, &fix.path, fix.value.clone());
        }
    }
    document::write(document, filename)
}

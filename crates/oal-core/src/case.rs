use std::fmt;

use heck::{
    ToKebabCase, ToLowerCamelCase, ToPascalCase, ToShoutyKebabCase, ToShoutySnakeCase, ToSnakeCase,
};
use serde::{Deserialize, Serialize};

/// A naming convention identifiers can be checked against.
///
/// Closed set: supporting a new convention means adding a variant here, not
/// touching callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseConvention {
    LowerSnakeCase,
    UpperSnakeCase,
    LowerCamelCase,
    UpperCamelCase,
    LowerDashCase,
    UpperDashCase,
}

impl CaseConvention {
    /// `true` when `value` already conforms: re-casing it is the identity.
    pub fn matches(&self, value: &str) -> bool {
        self.apply(value) == value
    }

    fn apply(&self, value: &str) -> String {
        match self {
            CaseConvention::LowerSnakeCase => value.to_snake_case(),
            CaseConvention::UpperSnakeCase => value.to_shouty_snake_case(),
            CaseConvention::LowerCamelCase => value.to_lower_camel_case(),
            CaseConvention::UpperCamelCase => value.to_pascal_case(),
            CaseConvention::LowerDashCase => value.to_kebab_case(),
            CaseConvention::UpperDashCase => value.to_shouty_kebab_case(),
        }
    }

    /// The configuration-facing name, as used in finding messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            CaseConvention::LowerSnakeCase => "lower_snake_case",
            CaseConvention::UpperSnakeCase => "upper_snake_case",
            CaseConvention::LowerCamelCase => "lower_camel_case",
            CaseConvention::UpperCamelCase => "upper_camel_case",
            CaseConvention::LowerDashCase => "lower_dash_case",
            CaseConvention::UpperDashCase => "upper_dash_case",
        }
    }
}

impl fmt::Display for CaseConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

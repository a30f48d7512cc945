// rulekeeper-core/src/domain/rules/expectation.rs

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::domain::nullable::null_as_default;

pub const NOT_NULL: &str = "expect_column_values_to_not_be_null";
pub const UNIQUE: &str = "expect_column_values_to_be_unique";
pub const BETWEEN: &str = "expect_column_values_to_be_between";
pub const IN_SET: &str = "expect_column_values_to_be_in_set";
pub const MATCH_REGEX: &str = "expect_column_values_to_match_regex";
pub const OF_TYPE: &str = "expect_column_values_to_be_of_type";
pub const GREATER_THAN_COLUMN: &str = "expect_column_values_to_be_greater_than_other_column";

/// Expectation types a user can pick when writing a rule by hand.
pub const EDITABLE_TYPES: [&str; 6] = [NOT_NULL, UNIQUE, BETWEEN, IN_SET, MATCH_REGEX, OF_TYPE];

/// Wire shape: `{"expectation_type": ..., "kwargs": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawExpectation {
    pub expectation_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub kwargs: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExpectationKind {
    NotNull {
        column: String,
    },
    Unique {
        column: String,
    },
    Between {
        column: String,
        min_value: Option<Value>,
        max_value: Option<Value>,
    },
    InSet {
        column: String,
        value_set: Vec<Value>,
    },
    MatchRegex {
        column: String,
        regex: String,
    },
    OfType {
        column: String,
        type_name: String,
    },
    /// `column` must be strictly greater than `compare_to` on every row.
    GreaterThanColumn {
        column: String,
        compare_to: String,
    },
    /// Unknown type, or a known type whose kwargs did not fit its shape.
    Opaque {
        expectation_type: String,
        kwargs: Map<String, Value>,
    },
}

/// One declarative data-quality check.
///
/// Known expectation types are parsed into typed parameters; anything else is
/// kept verbatim as [`ExpectationKind::Opaque`] so newer backends keep working.
/// Kwargs a typed variant does not know about are carried in `extra_kwargs`
/// and written back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawExpectation", into = "RawExpectation")]
pub struct Expectation {
    kind: ExpectationKind,
    extra_kwargs: Map<String, Value>,
}

impl Expectation {
    pub fn new(kind: ExpectationKind) -> Self {
        Self {
            kind,
            extra_kwargs: Map::new(),
        }
    }

    pub fn not_null(column: impl Into<String>) -> Self {
        Self::new(ExpectationKind::NotNull {
            column: column.into(),
        })
    }

    pub fn unique(column: impl Into<String>) -> Self {
        Self::new(ExpectationKind::Unique {
            column: column.into(),
        })
    }

    pub fn greater_than_column(column: impl Into<String>, compare_to: impl Into<String>) -> Self {
        Self::new(ExpectationKind::GreaterThanColumn {
            column: column.into(),
            compare_to: compare_to.into(),
        })
    }

    pub fn opaque(expectation_type: impl Into<String>, kwargs: Map<String, Value>) -> Self {
        Self::new(ExpectationKind::Opaque {
            expectation_type: expectation_type.into(),
            kwargs,
        })
    }

    pub fn kind(&self) -> &ExpectationKind {
        &self.kind
    }

    pub fn extra_kwargs(&self) -> &Map<String, Value> {
        &self.extra_kwargs
    }

    pub fn is_opaque(&self) -> bool {
        matches!(self.kind, ExpectationKind::Opaque { .. })
    }

    pub fn expectation_type(&self) -> &str {
        match &self.kind {
            ExpectationKind::NotNull { .. } => NOT_NULL,
            ExpectationKind::Unique { .. } => UNIQUE,
            ExpectationKind::Between { .. } => BETWEEN,
            ExpectationKind::InSet { .. } => IN_SET,
            ExpectationKind::MatchRegex { .. } => MATCH_REGEX,
            ExpectationKind::OfType { .. } => OF_TYPE,
            ExpectationKind::GreaterThanColumn { .. } => GREATER_THAN_COLUMN,
            ExpectationKind::Opaque {
                expectation_type, ..
            } => expectation_type.as_str(),
        }
    }

    /// The `kwargs.column` value.
    pub fn column(&self) -> Option<&str> {
        match &self.kind {
            ExpectationKind::NotNull { column }
            | ExpectationKind::Unique { column }
            | ExpectationKind::Between { column, .. }
            | ExpectationKind::InSet { column, .. }
            | ExpectationKind::MatchRegex { column, .. }
            | ExpectationKind::OfType { column, .. }
            | ExpectationKind::GreaterThanColumn { column, .. } => Some(column.as_str()),
            ExpectationKind::Opaque { kwargs, .. } => kwargs.get("column").and_then(Value::as_str),
        }
    }

    /// The `kwargs.compare_to` value.
    pub fn compare_to(&self) -> Option<&str> {
        match &self.kind {
            ExpectationKind::GreaterThanColumn { compare_to, .. } => Some(compare_to.as_str()),
            ExpectationKind::Opaque { kwargs, .. } => {
                kwargs.get("compare_to").and_then(Value::as_str)
            }
            _ => self.extra_kwargs.get("compare_to").and_then(Value::as_str),
        }
    }

    /// `column` then `compare_to`, whichever are present.
    pub fn referenced_columns(&self) -> Vec<&str> {
        self.column().into_iter().chain(self.compare_to()).collect()
    }

    /// Flattened kwargs as the backend sees them.
    pub fn kwargs(&self) -> Map<String, Value> {
        RawExpectation::from(self.clone()).kwargs
    }
}

impl fmt::Display for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExpectationKind::NotNull { column } => write!(f, "{} is not null", column),
            ExpectationKind::Unique { column } => write!(f, "{} is unique", column),
            ExpectationKind::Between {
                column,
                min_value,
                max_value,
            } => {
                let bound = |v: &Option<Value>| match v {
                    Some(v) => v.to_string(),
                    None => "..".to_string(),
                };
                write!(
                    f,
                    "{} between {} and {}",
                    column,
                    bound(min_value),
                    bound(max_value)
                )
            }
            ExpectationKind::InSet { column, value_set } => {
                write!(f, "{} in set of {} values", column, value_set.len())
            }
            ExpectationKind::MatchRegex { column, regex } => {
                write!(f, "{} matches /{}/", column, regex)
            }
            ExpectationKind::OfType { column, type_name } => {
                write!(f, "{} is of type {}", column, type_name)
            }
            ExpectationKind::GreaterThanColumn { column, compare_to } => {
                write!(f, "{} > {}", column, compare_to)
            }
            ExpectationKind::Opaque {
                expectation_type,
                kwargs,
            } => write!(f, "{} {}", expectation_type, Value::Object(kwargs.clone())),
        }
    }
}

// --- WIRE CONVERSIONS ---

fn take_string(kwargs: &mut Map<String, Value>, key: &str) -> Option<String> {
    match kwargs.remove(key) {
        Some(Value::String(s)) => Some(s),
        _ => None,
    }
}

fn take_optional(kwargs: &mut Map<String, Value>, key: &str) -> Option<Value> {
    kwargs.remove(key).filter(|v| !v.is_null())
}

fn take_array(kwargs: &mut Map<String, Value>, key: &str) -> Option<Vec<Value>> {
    match kwargs.remove(key) {
        Some(Value::Array(items)) => Some(items),
        _ => None,
    }
}

fn parse_kind(expectation_type: &str, rest: &mut Map<String, Value>) -> Option<ExpectationKind> {
    let kind = match expectation_type {
        NOT_NULL => ExpectationKind::NotNull {
            column: take_string(rest, "column")?,
        },
        UNIQUE => ExpectationKind::Unique {
            column: take_string(rest, "column")?,
        },
        BETWEEN => ExpectationKind::Between {
            column: take_string(rest, "column")?,
            min_value: take_optional(rest, "min_value"),
            max_value: take_optional(rest, "max_value"),
        },
        IN_SET => ExpectationKind::InSet {
            column: take_string(rest, "column")?,
            value_set: take_array(rest, "value_set")?,
        },
        MATCH_REGEX => ExpectationKind::MatchRegex {
            column: take_string(rest, "column")?,
            regex: take_string(rest, "regex")?,
        },
        OF_TYPE => ExpectationKind::OfType {
            column: take_string(rest, "column")?,
            type_name: take_string(rest, "type_")?,
        },
        GREATER_THAN_COLUMN => ExpectationKind::GreaterThanColumn {
            column: take_string(rest, "column")?,
            compare_to: take_string(rest, "compare_to")?,
        },
        _ => return None,
    };
    Some(kind)
}

impl From<RawExpectation> for Expectation {
    fn from(raw: RawExpectation) -> Self {
        let mut rest = raw.kwargs.clone();
        match parse_kind(&raw.expectation_type, &mut rest) {
            Some(kind) => Self {
                kind,
                extra_kwargs: rest,
            },
            None => Self::opaque(raw.expectation_type, raw.kwargs),
        }
    }
}

impl From<Expectation> for RawExpectation {
    fn from(expectation: Expectation) -> Self {
        let Expectation {
            kind,
            extra_kwargs: mut kwargs,
        } = expectation;

        let expectation_type = match kind {
            ExpectationKind::NotNull { column } => {
                kwargs.insert("column".into(), column.into());
                NOT_NULL.to_string()
            }
            ExpectationKind::Unique { column } => {
                kwargs.insert("column".into(), column.into());
                UNIQUE.to_string()
            }
            ExpectationKind::Between {
                column,
                min_value,
                max_value,
            } => {
                kwargs.insert("column".into(), column.into());
                if let Some(min) = min_value {
                    kwargs.insert("min_value".into(), min);
                }
                if let Some(max) = max_value {
                    kwargs.insert("max_value".into(), max);
                }
                BETWEEN.to_string()
            }
            ExpectationKind::InSet { column, value_set } => {
                kwargs.insert("column".into(), column.into());
                kwargs.insert("value_set".into(), Value::Array(value_set));
                IN_SET.to_string()
            }
            ExpectationKind::MatchRegex { column, regex } => {
                kwargs.insert("column".into(), column.into());
                kwargs.insert("regex".into(), regex.into());
                MATCH_REGEX.to_string()
            }
            ExpectationKind::OfType { column, type_name } => {
                kwargs.insert("column".into(), column.into());
                kwargs.insert("type_".into(), type_name.into());
                OF_TYPE.to_string()
            }
            ExpectationKind::GreaterThanColumn { column, compare_to } => {
                kwargs.insert("column".into(), column.into());
                kwargs.insert("compare_to".into(), compare_to.into());
                GREATER_THAN_COLUMN.to_string()
            }
            ExpectationKind::Opaque {
                expectation_type,
                kwargs: opaque,
            } => {
                kwargs.extend(opaque);
                expectation_type
            }
        };

        RawExpectation {
            expectation_type,
            kwargs,
        }
    }
}

// rulekeeper-core/src/domain/rules/config.rs

use serde::{Deserialize, Serialize};

use super::expectation::Expectation;
use crate::domain::error::DomainError;

/// Ordered, never empty list of expectations.
///
/// The backend sends either one expectation object or an array of them; both
/// land here. A single expectation is written back as a bare object, two or
/// more as an array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WireConfig", into = "WireConfig")]
pub struct RuleConfig {
    expectations: Vec<Expectation>,
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum WireConfig {
    Many(Vec<Expectation>),
    One(Expectation),
}

impl RuleConfig {
    pub fn single(expectation: Expectation) -> Self {
        Self {
            expectations: vec![expectation],
        }
    }

    pub fn try_new(expectations: Vec<Expectation>) -> Result<Self, DomainError> {
        if expectations.is_empty() {
            return Err(DomainError::EmptyRuleConfig);
        }
        Ok(Self { expectations })
    }

    pub fn expectations(&self) -> &[Expectation] {
        &self.expectations
    }

    pub fn first(&self) -> &Expectation {
        &self.expectations[0]
    }

    pub fn len(&self) -> usize {
        self.expectations.len()
    }

    // Never empty by construction.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// More than one expectation.
    pub fn is_compound(&self) -> bool {
        self.expectations.len() > 1
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Expectation> {
        self.expectations.iter()
    }

    pub fn into_vec(self) -> Vec<Expectation> {
        self.expectations
    }
}

impl<'a> IntoIterator for &'a RuleConfig {
    type Item = &'a Expectation;
    type IntoIter = std::slice::Iter<'a, Expectation>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl TryFrom<WireConfig> for RuleConfig {
    type Error = DomainError;

    fn try_from(wire: WireConfig) -> Result<Self, Self::Error> {
        match wire {
            WireConfig::One(expectation) => Ok(Self::single(expectation)),
            WireConfig::Many(expectations) => Self::try_new(expectations),
        }
    }
}

impl From<RuleConfig> for WireConfig {
    fn from(config: RuleConfig) -> Self {
        let mut expectations = config.expectations;
        if expectations.len() == 1 {
            if let Some(only) = expectations.pop() {
                return WireConfig::One(only);
            }
        }
        WireConfig::Many(expectations)
    }
}

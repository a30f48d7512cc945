// rulekeeper-core/src/domain/nullable.rs

use serde::{Deserialize, Deserializer};

/// Reads an explicit JSON `null` as the field's default. Pair it with
/// `#[serde(default)]` so a missing key behaves the same way.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

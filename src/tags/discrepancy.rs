/*!
 * Diff and repair of tag sets between a source and a produced translation.
 *
 * When an external engine drops or mangles placeholders, restoring the
 * affected markup would insert orphaned or wrong tags. The resolver instead
 * reports the discrepancy and deletes the affected placeholder tokens from
 * the final text.
 */

use std::collections::BTreeSet;

use super::codec::TagDictionary;

/// Result of comparing two tag dictionaries
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiscrepancySet {
    /// Placeholder keys present in the source but not the target
    pub missing_in_target: BTreeSet<String>,

    /// Placeholder keys present in the target but not the source
    pub missing_in_source: BTreeSet<String>,

    /// Keys present in both whose decoded markup differs
    pub mismatched_values: BTreeSet<String>,
}

impl DiscrepancySet {
    /// Check whether the two dictionaries agreed completely
    pub fn is_empty(&self) -> bool {
        self.missing_in_target.is_empty()
            && self.missing_in_source.is_empty()
            && self.mismatched_values.is_empty()
    }
}

/// Compare two tag dictionaries key by key.
///
/// Values are compared in their decoded, canonical form; the dictionaries
/// never store escaped markup.
pub fn diff(source: &TagDictionary, target: &TagDictionary) -> DiscrepancySet {
    let source_keys: BTreeSet<&str> = source.keys().collect();
    let target_keys: BTreeSet<&str> = target.keys().collect();

    let missing_in_target = source_keys
        .difference(&target_keys)
        .map(|key| key.to_string())
        .collect();

    let missing_in_source = target_keys
        .difference(&source_keys)
        .map(|key| key.to_string())
        .collect();

    let mismatched_values = source_keys
        .intersection(&target_keys)
        .filter(|key| source.get(key) != target.get(key))
        .map(|key| key.to_string())
        .collect();

    DiscrepancySet {
        missing_in_target,
        missing_in_source,
        mismatched_values,
    }
}

/// Remove every literal occurrence of the given placeholder tokens
pub fn strip<'a, I>(text: &str, keys: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut result = text.to_string();
    for key in keys {
        result = result.replace(key, "");
    }
    result
}

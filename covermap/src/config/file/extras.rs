use std::collections::{BTreeSet, HashMap};
use std::fmt::Debug;

use crate::config::file::ConfigFileResult;

pub type UnrecognizedValues = HashMap<String, serde_yaml::Value>;
pub type UnrecognizedKeys = BTreeSet<String>;

/// Hooks shared by the sections of the configuration file.
///
/// Called in this order after parsing:
/// 1. `finalize`
/// 2. `get_unrecognized_keys`
pub trait ConfigExtras: Clone + Debug + Default + PartialEq + Send {
    /// Validate the section and fill in derived values.
    fn finalize(&mut self) -> ConfigFileResult<()> {
        Ok(())
    }

    /// Keys of this section (and of its sub-sections) that were not understood.
    fn get_unrecognized_keys(&self) -> UnrecognizedKeys;

    /// Same as [`Self::get_unrecognized_keys`], with every key prefixed.
    fn get_unrecognized_keys_with_prefix(&self, prefix: &str) -> UnrecognizedKeys {
        self.get_unrecognized_keys()
            .into_iter()
            .map(|key| format!("{prefix}{key}"))
            .collect()
    }
}

pub fn copy_unrecognized_keys_from_config(
    result: &mut UnrecognizedKeys,
    prefix: &str,
    unrecognized: &UnrecognizedValues,
) {
    result.extend(unrecognized.keys().map(|k| format!("{prefix}{k}")));
}

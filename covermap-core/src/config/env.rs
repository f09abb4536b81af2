//! Environment variable access.
//!
//! Configuration files may reference environment variables as `${VAR}` or
//! `${VAR:default}`. The [`Env`] trait abstracts the lookup so tests can supply
//! a fixed set of variables.
//!
//! - [`OsEnv`]: reads the process environment and remembers what was looked up
//! - [`FauxEnv`]: fixed variables for tests

use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap};
use std::ffi::OsString;

use log::warn;
use subst::VariableMap;

/// Environment variable access usable for `${VAR}` substitution.
pub trait Env<'a>: VariableMap<'a> {
    /// Get an environment variable as an [`OsString`] without Unicode validation.
    fn var_os(&self, key: &str) -> Option<OsString>;

    /// Get an environment variable as a UTF-8 validated [`String`].
    ///
    /// Logs a warning and returns `None` if the variable contains invalid Unicode.
    #[must_use]
    fn get_env_str(&self, key: &str) -> Option<String> {
        let value = self.var_os(key)?;
        match value.into_string() {
            Ok(v) => Some(v),
            Err(v) => {
                warn!(
                    "Environment variable {key} has invalid unicode. Lossy representation: {}",
                    v.to_string_lossy()
                );
                None
            }
        }
    }
}

/// Process environment. Keeps track of the variables requested during substitution.
#[derive(Debug, Default)]
pub struct OsEnv(RefCell<BTreeSet<String>>);

impl OsEnv {
    /// Names of the variables looked up through [`VariableMap::get`] so far, sorted.
    #[must_use]
    pub fn substituted(&self) -> Vec<String> {
        self.0.borrow().iter().cloned().collect()
    }
}

impl Env<'_> for OsEnv {
    fn var_os(&self, key: &str) -> Option<OsString> {
        std::env::var_os(key)
    }
}

impl<'a> VariableMap<'a> for OsEnv {
    type Value = String;

    fn get(&'a self, key: &str) -> Option<Self::Value> {
        self.0.borrow_mut().insert(key.to_string());
        std::env::var(key).ok()
    }
}

/// Fixed set of environment variables, for tests.
#[derive(Debug, Default)]
pub struct FauxEnv(pub HashMap<&'static str, OsString>);

impl<'a> VariableMap<'a> for FauxEnv {
    type Value = String;

    fn get(&'a self, key: &str) -> Option<Self::Value> {
        self.0.get(key).map(|s| s.to_string_lossy().to_string())
    }
}

impl Env<'_> for FauxEnv {
    fn var_os(&self, key: &str) -> Option<OsString> {
        self.0.get(key).cloned()
    }
}

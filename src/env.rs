//! Environment overlay applied to every shell command

use std::collections::HashMap;
use std::ffi::OsString;

use log::trace;

/// Environment variables that override the inherited process environment.
///
/// Overlay entries win over inherited entries with the same key. An empty overlay leaves the
/// inherited environment untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvOverlay {
    vars: HashMap<String, String>,
}

impl EnvOverlay {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// Layer the overlay on top of `inherited`.
    pub fn compose<I, K, V>(&self, inherited: I) -> HashMap<OsString, OsString>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<OsString>,
        V: Into<OsString>,
    {
        let mut env: HashMap<OsString, OsString> = inherited
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        for (key, value) in &self.vars {
            trace!("Overriding environment variable {key}");
            env.insert(key.into(), value.into());
        }
        env
    }

    /// Layer the overlay on top of the current process environment.
    #[must_use]
    pub fn merged(&self) -> HashMap<OsString, OsString> {
        self.compose(std::env::vars_os())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for EnvOverlay {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        EnvOverlay {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl From<HashMap<String, String>> for EnvOverlay {
    fn from(vars: HashMap<String, String>) -> Self {
        EnvOverlay { vars }
    }
}

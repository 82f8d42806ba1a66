//! Scoped test fixtures: environment variables and temporary directories.

use std::env;
use std::ffi::{OsStr, OsString};
use std::io;

use tempfile::TempDir;
use tracing::debug;

/// Sets environment variables for a scope and restores the previous values
/// (or removes the variables) when dropped.
///
/// The process environment is shared: tests using this must not run
/// concurrently with other tests reading the same variables.
#[derive(Debug, Default)]
pub struct EnvVars {
    saved: Vec<(OsString, Option<OsString>)>,
}

impl EnvVars {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` to `value`. The original value is recorded on first touch only.
    pub fn set(&mut self, key: impl AsRef<OsStr>, value: impl AsRef<OsStr>) -> &mut Self {
        let key = key.as_ref();
        self.remember(key);
        env::set_var(key, value);
        self
    }

    pub fn remove(&mut self, key: impl AsRef<OsStr>) -> &mut Self {
        let key = key.as_ref();
        self.remember(key);
        env::remove_var(key);
        self
    }

    fn remember(&mut self, key: &OsStr) {
        if !self.saved.iter().any(|(k, _)| k == key) {
            self.saved.push((key.to_os_string(), env::var_os(key)));
        }
    }
}

impl Drop for EnvVars {
    fn drop(&mut self) {
        for (key, original) in self.saved.drain(..).rev() {
            match original {
                Some(v) => env::set_var(&key, v),
                None => env::remove_var(&key),
            }
            debug!(key = ?key, "restored environment variable");
        }
    }
}

/// A fresh temporary directory named after `scope`, deleted on drop.
pub fn temp_dir(scope: &str) -> io::Result<TempDir> {
    tempfile::Builder::new()
        .prefix(&format!("causematch-{scope}-"))
        .tempdir()
}

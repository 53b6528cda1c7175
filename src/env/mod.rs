//! Environment snapshots for resetting tests to a common baseline.
//!
//! The first [`register_t`](crate::register_t) in a process captures every
//! environment variable into an [`EnvSnapshot`]; every registration restores
//! that snapshot, so a test never observes variables changed by an earlier
//! test on the same process.
//!
//! Restoring mutates process-wide state. Tests that change environment
//! variables should not run in parallel with tests that read them.

use std::collections::BTreeMap;
use std::ffi::{OsStr, OsString};
use std::sync::OnceLock;

/// Access to a set of environment variables.
pub trait Environment {
    /// All variables currently set.
    fn vars(&self) -> Vec<(OsString, OsString)>;

    /// One variable, or `None` if unset.
    fn var(&self, key: &OsStr) -> Option<OsString>;

    /// Set a variable.
    fn set_var(&self, key: &OsStr, value: &OsStr);

    /// Unset a variable.
    fn remove_var(&self, key: &OsStr);
}

/// The environment of the current process.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
    fn vars(&self) -> Vec<(OsString, OsString)> {
        std::env::vars_os().collect()
    }

    fn var(&self, key: &OsStr) -> Option<OsString> {
        std::env::var_os(key)
    }

    fn set_var(&self, key: &OsStr, value: &OsStr) {
        std::env::set_var(key, value);
    }

    fn remove_var(&self, key: &OsStr) {
        std::env::remove_var(key);
    }
}

/// A captured set of environment variables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSnapshot {
    vars: BTreeMap<OsString, OsString>,
}

impl EnvSnapshot {
    /// Capture every variable of `env`.
    pub fn capture(env: &impl Environment) -> Self {
        let vars: BTreeMap<_, _> = env.vars().into_iter().collect();
        tracing::trace!(count = vars.len(), "environment captured");
        Self { vars }
    }

    /// Restore `env` to this snapshot.
    ///
    /// Variables in the snapshot are set back to their captured values and
    /// variables absent from the snapshot are removed. Returns the number of
    /// variables that had to change.
    pub fn restore(&self, env: &impl Environment) -> usize {
        let mut changed = 0;

        for (key, _) in env.vars() {
            if !self.vars.contains_key(&key) {
                env.remove_var(&key);
                changed += 1;
            }
        }
        for (key, value) in &self.vars {
            if env.var(key).as_ref() != Some(value) {
                env.set_var(key, value);
                changed += 1;
            }
        }

        tracing::trace!(changed, "environment restored");
        changed
    }

    /// Captured value of `key`.
    #[must_use]
    pub fn get(&self, key: impl AsRef<OsStr>) -> Option<&OsStr> {
        self.vars.get(key.as_ref()).map(OsString::as_os_str)
    }

    /// Number of captured variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Returns `true` if nothing was captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

static BASELINE: OnceLock<EnvSnapshot> = OnceLock::new();

/// Capture the process environment on first use, then restore it.
pub(crate) fn reset_to_baseline() {
    let baseline = BASELINE.get_or_init(|| EnvSnapshot::capture(&ProcessEnv));
    baseline.restore(&ProcessEnv);
}

/// The process-wide baseline, if a registration has captured it.
#[must_use]
pub fn baseline() -> Option<&'static EnvSnapshot> {
    BASELINE.get()
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[derive(Debug, Default)]
    struct MemoryEnv(Mutex<BTreeMap<OsString, OsString>>);

    impl MemoryEnv {
        fn with(pairs: &[(&str, &str)]) -> Self {
            Self(Mutex::new(
                pairs
                    .iter()
                    .map(|(k, v)| (OsString::from(k), OsString::from(v)))
                    .collect(),
            ))
        }
    }

    impl Environment for MemoryEnv {
        fn vars(&self) -> Vec<(OsString, OsString)> {
            self.0
                .lock()
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect()
        }

        fn var(&self, key: &OsStr) -> Option<OsString> {
            self.0.lock().get(key).cloned()
        }

        fn set_var(&self, key: &OsStr, value: &OsStr) {
            self.0.lock().insert(key.to_owned(), value.to_owned());
        }

        fn remove_var(&self, key: &OsStr) {
            self.0.lock().remove(key);
        }
    }

    #[test]
    fn test_capture() {
        let env = MemoryEnv::with(&[("HOME", "/root"), ("LANG", "C")]);
        let snapshot = EnvSnapshot::capture(&env);
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.get("HOME"), Some(OsStr::new("/root")));
        assert_eq!(snapshot.get("PATH"), None);
    }

    #[test]
    fn test_restore_resets_changed_added_and_removed() {
        let env = MemoryEnv::with(&[("A", "1"), ("B", "2")]);
        let snapshot = EnvSnapshot::capture(&env);

        env.set_var(OsStr::new("A"), OsStr::new("changed"));
        env.remove_var(OsStr::new("B"));
        env.set_var(OsStr::new("C"), OsStr::new("new"));

        assert_eq!(snapshot.restore(&env), 3);
        assert_eq!(EnvSnapshot::capture(&env), snapshot);
    }

    #[test]
    fn test_restore_unchanged_is_noop() {
        let env = MemoryEnv::with(&[("A", "1")]);
        let snapshot = EnvSnapshot::capture(&env);
        assert_eq!(snapshot.restore(&env), 0);
    }

    #[test]
    fn test_restore_is_repeatable() {
        let env = MemoryEnv::with(&[("A", "1")]);
        let snapshot = EnvSnapshot::capture(&env);

        env.set_var(OsStr::new("A"), OsStr::new("2"));
        snapshot.restore(&env);
        env.set_var(OsStr::new("A"), OsStr::new("3"));
        snapshot.restore(&env);

        assert_eq!(env.var(OsStr::new("A")), Some(OsString::from("1")));
    }
}

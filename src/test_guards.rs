//! RAII guard for environment variables touched by tests.
//!
//! Config lookups read `POKEDEX_*` variables from the process environment,
//! which is shared by every test thread. Tests that set them must be marked
//! `#[serial]` and hold an [`EnvGuard`] so the previous value comes back even
//! if an assertion panics.

use std::env;
use std::ffi::{OsStr, OsString};

/// Snapshots one variable on construction and restores it on drop.
pub struct EnvGuard {
    key: &'static str,
    original: Option<OsString>,
}

impl EnvGuard {
    /// Snapshot `key`, then set it to `value`.
    ///
    /// # Safety
    /// `std::env::set_var` is unsafe in edition 2024; callers must be `#[serial]`.
    pub unsafe fn set(key: &'static str, value: impl AsRef<OsStr>) -> Self {
        let original = env::var_os(key);
        unsafe { env::set_var(key, value) };
        Self { key, original }
    }

    /// Snapshot `key`, then remove it.
    ///
    /// # Safety
    /// `std::env::remove_var` is unsafe in edition 2024; callers must be `#[serial]`.
    pub unsafe fn remove(key: &'static str) -> Self {
        let original = env::var_os(key);
        unsafe { env::remove_var(key) };
        Self { key, original }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        // SAFETY: only constructed by #[serial] tests.
        match &self.original {
            Some(value) => unsafe { env::set_var(self.key, value) },
            None => unsafe { env::remove_var(self.key) },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_set_restores_absent_var() {
        let key = "POKEDEX_TEST_GUARD_ABSENT";
        unsafe { env::remove_var(key) };
        {
            let _guard = unsafe { EnvGuard::set(key, "temporary") };
            assert_eq!(env::var(key).unwrap(), "temporary");
        }
        assert!(env::var(key).is_err());
    }

    #[test]
    #[serial]
    fn test_remove_restores_existing_var() {
        let key = "POKEDEX_TEST_GUARD_EXISTING";
        unsafe { env::set_var(key, "kept") };
        {
            let _guard = unsafe { EnvGuard::remove(key) };
            assert!(env::var(key).is_err());
        }
        assert_eq!(env::var(key).unwrap(), "kept");
        unsafe { env::remove_var(key) };
    }
}

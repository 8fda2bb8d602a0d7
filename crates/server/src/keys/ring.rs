//! [`KeyRing`]: process-wide registry of versioned encryption secrets.

use std::collections::HashMap;
use std::fmt;

/// Environment variable prefix for versioned keys (`ENCRYPTION_KEY_V1`, ...).
const VERSIONED_PREFIX: &str = "ENCRYPTION_KEY_V";

/// Environment variable holding the unversioned fallback key.
const FALLBACK_VAR: &str = "ENCRYPTION_KEY";

/// Immutable registry of encryption secrets, built once at startup.
///
/// Secrets are kept as the raw strings found in the environment. The ring
/// does not validate length or encoding; that happens in the cipher layer at
/// the point of use, so a misconfigured key surfaces as an encryption error
/// rather than a startup failure.
#[derive(Clone, Default)]
pub struct KeyRing {
    versioned: HashMap<u32, String>,
    fallback: Option<String>,
}

impl KeyRing {
    /// Collect `ENCRYPTION_KEY_V<version>` variables and the `ENCRYPTION_KEY`
    /// fallback from the process environment.
    ///
    /// Empty values count as unset, so an `ENCRYPTION_KEY_V1=""` left over in
    /// a deployment manifest does not shadow the fallback.
    pub fn from_env() -> Self {
        Self::from_vars(std::env::vars())
    }

    fn from_vars(vars: impl Iterator<Item = (String, String)>) -> Self {
        let mut versioned = HashMap::new();
        let mut fallback = None;

        for (name, value) in vars {
            if value.is_empty() {
                continue;
            }
            if name == FALLBACK_VAR {
                fallback = Some(value);
            } else if let Some(suffix) = name.strip_prefix(VERSIONED_PREFIX) {
                if let Ok(version) = suffix.parse::<u32>() {
                    versioned.insert(version, value);
                }
            }
        }

        Self {
            versioned,
            fallback,
        }
    }

    /// Build a ring from explicit key sets, bypassing the environment.
    pub fn with_keys(versioned: HashMap<u32, String>, fallback: Option<String>) -> Self {
        Self {
            versioned,
            fallback,
        }
    }

    /// Resolve the secret for `version`, falling back to the unversioned key.
    ///
    /// Returns `None` when neither is configured.
    pub fn resolve(&self, version: u32) -> Option<&str> {
        self.versioned
            .get(&version)
            .or(self.fallback.as_ref())
            .map(String::as_str)
    }

    /// Number of distinct secrets registered.
    pub fn len(&self) -> usize {
        self.versioned.len() + usize::from(self.fallback.is_some())
    }

    /// Returns `true` if no secret is configured at all.
    pub fn is_empty(&self) -> bool {
        self.versioned.is_empty() && self.fallback.is_none()
    }
}

impl fmt::Debug for KeyRing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print secrets, only which versions are present.
        let mut versions: Vec<u32> = self.versioned.keys().copied().collect();
        versions.sort_unstable();
        f.debug_struct("KeyRing")
            .field("versions", &versions)
            .field("has_fallback", &self.fallback.is_some())
            .finish()
    }
}

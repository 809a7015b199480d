//! In-process configuration host.
//!
//! Keeps every profile as a `ConfigTree` in memory. New profiles start as a
//! copy of the base profile, so the dedicated profile exposes the same shape
//! the user's configuration has.

use conf_core::{ConfigHost, ConfigTree};
use errors::HostError;
use std::collections::{BTreeMap, BTreeSet};

/// Name of the profile a host starts with when none is given.
pub const BASE_PROFILE: &str = "default";

#[derive(Debug, Clone)]
pub struct MemoryHost {
    base: String,
    active: String,
    profiles: BTreeMap<String, ConfigTree>
}

impl MemoryHost {
    /// A host whose only profile is `base`, holding `tree`, and active.
    pub fn new(base: impl Into<String>, tree: ConfigTree) -> Self {
        let base = base.into();
        let mut profiles = BTreeMap::new();
        profiles.insert(base.clone(), tree);
        Self {
            active: base.clone(),
            base,
            profiles
        }
    }

    /// Adds (or replaces) an inactive profile.
    #[must_use]
    pub fn with_profile(mut self, name: impl Into<String>, tree: ConfigTree) -> Self {
        self.profiles.insert(name.into(), tree);
        self
    }

    pub fn active_profile(&self) -> &str {
        &self.active
    }

    /// Tree of any profile, active or not.
    pub fn profile(&self, name: &str) -> Option<&ConfigTree> {
        self.profiles.get(name)
    }
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new(BASE_PROFILE, ConfigTree::new())
    }
}

impl ConfigHost for MemoryHost {
    fn list_profile_names(&self) -> Result<BTreeSet<String>, HostError> {
        Ok(self.profiles.keys().cloned().collect())
    }

    fn create_profile(&mut self, name: &str) -> Result<(), HostError> {
        if self.profiles.contains_key(name) {
            return Err(HostError::ProfileExists {
                name: name.to_string()
            });
        }
        let initial = self.profiles.get(&self.base).cloned().unwrap_or_default();
        self.profiles.insert(name.to_string(), initial);
        tracing::debug!(profile = name, "Profile created");
        Ok(())
    }

    fn activate_profile(&mut self, name: &str) -> Result<(), HostError> {
        if !self.profiles.contains_key(name) {
            return Err(HostError::ProfileNotFound {
                name: name.to_string()
            });
        }
        self.active = name.to_string();
        Ok(())
    }

    fn current_profile_name(&self) -> Result<String, HostError> {
        Ok(self.active.clone())
    }

    fn current_tree(&self) -> Result<&ConfigTree, HostError> {
        self.profiles
            .get(&self.active)
            .ok_or_else(|| HostError::ProfileNotFound {
                name: self.active.clone()
            })
    }

    fn current_tree_mut(&mut self) -> Result<&mut ConfigTree, HostError> {
        self.profiles
            .get_mut(&self.active)
            .ok_or_else(|| HostError::ProfileNotFound {
                name: self.active.clone()
            })
    }
}

use conf_core::{ConfigHost, ConfigTree};
use errors::HostError;
use parking_lot::Mutex;
use std::collections::BTreeSet;

/// A call made against a `RecordingHost`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
    ListProfiles,
    CreateProfile(String),
    ActivateProfile(String),
    CurrentProfile,
    CurrentTree
}

/// Wraps a host, records every call and optionally rejects some of them.
pub struct RecordingHost<H> {
    inner: H,
    calls: Mutex<Vec<HostCall>>,
    reject_creation: bool,
    reject_activation: BTreeSet<String>
}

impl<H: ConfigHost> RecordingHost<H> {
    pub fn new(inner: H) -> Self {
        Self {
            inner,
            calls: Mutex::new(Vec::new()),
            reject_creation: false,
            reject_activation: BTreeSet::new()
        }
    }

    /// Every `create_profile` call fails.
    #[must_use]
    pub fn rejecting_creation(mut self) -> Self {
        self.reject_creation = true;
        self
    }

    /// `activate_profile(name)` fails.
    #[must_use]
    pub fn rejecting_activation_of(mut self, name: impl Into<String>) -> Self {
        self.reject_activation.insert(name.into());
        self
    }

    pub fn inner(&self) -> &H {
        &self.inner
    }

    pub fn calls(&self) -> Vec<HostCall> {
        self.calls.lock().clone()
    }

    /// Profiles passed to `activate_profile`, in call order.
    pub fn activations(&self) -> Vec<String> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                HostCall::ActivateProfile(name) => Some(name.clone()),
                _ => None
            })
            .collect()
    }

    /// Profiles passed to `create_profile`, in call order.
    pub fn creations(&self) -> Vec<String> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                HostCall::CreateProfile(name) => Some(name.clone()),
                _ => None
            })
            .collect()
    }

    fn record(&self, call: HostCall) {
        self.calls.lock().push(call);
    }
}

impl<H: ConfigHost> ConfigHost for RecordingHost<H> {
    fn list_profile_names(&self) -> Result<BTreeSet<String>, HostError> {
        self.record(HostCall::ListProfiles);
        self.inner.list_profile_names()
    }

    fn create_profile(&mut self, name: &str) -> Result<(), HostError> {
        self.record(HostCall::CreateProfile(name.to_string()));
        if self.reject_creation {
            return Err(HostError::Rejected {
                reason: format!("creation of '{name}' is disabled")
            });
        }
        self.inner.create_profile(name)
    }

    fn activate_profile(&mut self, name: &str) -> Result<(), HostError> {
        self.record(HostCall::ActivateProfile(name.to_string()));
        if self.reject_activation.contains(name) {
            return Err(HostError::Rejected {
                reason: format!("activation of '{name}' is disabled")
            });
        }
        self.inner.activate_profile(name)
    }

    fn current_profile_name(&self) -> Result<String, HostError> {
        self.record(HostCall::CurrentProfile);
        self.inner.current_profile_name()
    }

    fn current_tree(&self) -> Result<&ConfigTree, HostError> {
        self.record(HostCall::CurrentTree);
        self.inner.current_tree()
    }

    fn current_tree_mut(&mut self) -> Result<&mut ConfigTree, HostError> {
        self.record(HostCall::CurrentTree);
        self.inner.current_tree_mut()
    }
}

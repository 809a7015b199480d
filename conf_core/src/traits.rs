//! Host collaborator interface.

use errors::HostError;
use std::collections::BTreeSet;

use crate::types::ConfigTree;

/// The host application's configuration subsystem.
///
/// The host owns every profile and decides which one is active; the
/// configuration server only ever reads or mutates the tree of the active
/// profile through this trait. Activation is global to the host, so callers
/// must serialize access themselves.
pub trait ConfigHost: Send {
    /// Names of every profile the host knows about.
    fn list_profile_names(&self) -> Result<BTreeSet<String>, HostError>;

    /// Creates a new, inactive profile.
    fn create_profile(&mut self, name: &str) -> Result<(), HostError>;

    /// Makes `name` the active profile.
    fn activate_profile(&mut self, name: &str) -> Result<(), HostError>;

    /// Name of the active profile.
    fn current_profile_name(&self) -> Result<String, HostError>;

    /// Live configuration of the active profile.
    fn current_tree(&self) -> Result<&ConfigTree, HostError>;

    /// Live, mutable configuration of the active profile.
    fn current_tree_mut(&mut self) -> Result<&mut ConfigTree, HostError>;
}

impl<H: ConfigHost + ?Sized> ConfigHost for Box<H> {
    fn list_profile_names(&self) -> Result<BTreeSet<String>, HostError> {
        (**self).list_profile_names()
    }

    fn create_profile(&mut self, name: &str) -> Result<(), HostError> {
        (**self).create_profile(name)
    }

    fn activate_profile(&mut self, name: &str) -> Result<(), HostError> {
        (**self).activate_profile(name)
    }

    fn current_profile_name(&self) -> Result<String, HostError> {
        (**self).current_profile_name()
    }

    fn current_tree(&self) -> Result<&ConfigTree, HostError> {
        (**self).current_tree()
    }

    fn current_tree_mut(&mut self) -> Result<&mut ConfigTree, HostError> {
        (**self).current_tree_mut()
    }
}

//! # Profile Isolation
//!
//! Keeps every change the server makes inside a dedicated host profile.
//!
//! ```text
//!            ensure_isolated()                    ensure_isolated()
//!   Normal ───────────────────────► Isolated ◄──────────────────┐
//!     ▲     remember active profile,     │  already active: no-op │
//!     │     create + activate dedicated  └─────────────────────────┘
//!     │
//!     └──────────── leave_isolation(): activate the remembered profile
//! ```
//!
//! The controller owns the host handle. Callers that share it across tasks
//! must wrap the controller in a lock; the host has no locking of its own.

use conf_core::{ConfigHost, ConfigTree};
use errors::{ProfileError, ProfileOperation};
use strum::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum IsolationState {
    /// Some profile other than the dedicated one is active.
    Normal,
    /// The dedicated profile is active.
    Isolated
}

/// Profile isolation controller.
pub struct ProfileIsolation<H> {
    host: H,
    profile_name: String,
    restore_target: String
}

impl<H: ConfigHost> ProfileIsolation<H> {
    /// Creates the controller, remembering the currently active profile as
    /// the one to restore.
    pub fn new(host: H, profile_name: impl Into<String>) -> Result<Self, ProfileError> {
        let profile_name = profile_name.into();
        let restore_target = host.current_profile_name().map_err(|e| {
            ProfileError::operation_failed(ProfileOperation::CurrentProfile, &profile_name, e)
        })?;

        tracing::debug!(
            profile = %profile_name,
            restore_target = %restore_target,
            "Profile isolation initialised"
        );

        Ok(Self {
            host,
            profile_name,
            restore_target
        })
    }

    /// Name of the dedicated profile.
    pub fn profile_name(&self) -> &str {
        &self.profile_name
    }

    /// Profile that `leave_isolation` will activate.
    pub fn restore_target(&self) -> &str {
        &self.restore_target
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    pub fn state(&self) -> Result<IsolationState, ProfileError> {
        let current = self.current_profile()?;
        Ok(if current == self.profile_name {
            IsolationState::Isolated
        } else {
            IsolationState::Normal
        })
    }

    /// Switches the host into the dedicated profile unless it is already
    /// active, and returns the live tree of that profile.
    ///
    /// The dedicated profile is created on first use. Re-entering while
    /// isolated touches neither the host's active profile nor the restore
    /// target.
    pub fn ensure_isolated(&mut self) -> Result<&mut ConfigTree, ProfileError> {
        let current = self.current_profile()?;

        if current != self.profile_name {
            tracing::info!(
                from = %current,
                to = %self.profile_name,
                "Switching host to dedicated profile"
            );
            self.restore_target = current;

            let known = self.host.list_profile_names().map_err(|e| {
                ProfileError::operation_failed(
                    ProfileOperation::ListProfiles,
                    &self.profile_name,
                    e
                )
            })?;

            if !known.contains(&self.profile_name) {
                self.host.create_profile(&self.profile_name).map_err(|e| {
                    ProfileError::operation_failed(
                        ProfileOperation::CreateProfile,
                        &self.profile_name,
                        e
                    )
                })?;
                tracing::info!(profile = %self.profile_name, "Created dedicated profile");
            }

            self.host.activate_profile(&self.profile_name).map_err(|e| {
                ProfileError::operation_failed(
                    ProfileOperation::ActivateProfile,
                    &self.profile_name,
                    e
                )
            })?;
        }

        let profile_name = &self.profile_name;
        self.host.current_tree_mut().map_err(|e| {
            ProfileError::operation_failed(ProfileOperation::ReadTree, profile_name, e)
        })
    }

    /// Activates the remembered profile, whatever the current state.
    pub fn leave_isolation(&mut self) -> Result<(), ProfileError> {
        self.host.activate_profile(&self.restore_target).map_err(|e| {
            ProfileError::operation_failed(
                ProfileOperation::ActivateProfile,
                &self.restore_target,
                e
            )
        })?;
        tracing::info!(profile = %self.restore_target, "Restored original profile");
        Ok(())
    }

    fn current_profile(&self) -> Result<String, ProfileError> {
        self.host.current_profile_name().map_err(|e| {
            ProfileError::operation_failed(ProfileOperation::CurrentProfile, &self.profile_name, e)
        })
    }
}

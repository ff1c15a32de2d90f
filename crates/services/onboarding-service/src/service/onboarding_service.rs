//! Onboarding service - routes authenticated users and advances their status.
//!
//! SOLID (SRP): Handles onboarding use cases only. Store faults propagate
//! unchanged; expected routing outcomes come back as `Decision` values.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};

use common::{AppResult, OptionExt};
use domain::{
    accepts_extra_field, Decision, Destination, Document, DomainError, Identity, NewProfile,
    OnboardingStatus, ProfilePatch, UserProfile,
};

use crate::repository::ProfileRepository;

/// Onboarding service trait for dependency injection.
#[async_trait]
pub trait OnboardingService: Send + Sync {
    /// Decide where an authenticated identity should go.
    ///
    /// Creates the profile on first login. Admins are routed before the
    /// onboarding status is consulted.
    async fn decide(&self, identity: &Identity) -> AppResult<Decision>;

    /// Submit the welcome step: `pending_profile` -> `pending_admin_approval`
    async fn complete_welcome_step(
        &self,
        uid: &str,
        designation: &str,
        extra: Document,
    ) -> AppResult<()>;

    /// Approve a user: -> `active`. The caller is trusted to be an administrator.
    async fn approve_user(&self, uid: &str) -> AppResult<()>;

    /// Get profile by uid
    async fn get_profile(&self, uid: &str) -> AppResult<UserProfile>;
}

/// Concrete implementation of OnboardingService using repository.
pub struct OnboardingManager {
    repo: Arc<dyn ProfileRepository>,
}

impl OnboardingManager {
    /// Create new onboarding service instance with repository
    pub fn new(repo: Arc<dyn ProfileRepository>) -> Self {
        Self { repo }
    }
}

/// Routing for an existing profile
fn route(profile: &UserProfile) -> Decision {
    if profile.is_admin() {
        return Decision::redirect(Destination::Admin);
    }

    match &profile.onboarding_status {
        OnboardingStatus::PendingProfile => Decision::redirect(Destination::Welcome),
        OnboardingStatus::PendingAdminApproval => Decision::awaiting_approval(),
        OnboardingStatus::Active => Decision::redirect(Destination::Dashboard),
        OnboardingStatus::Unrecognized(raw) => {
            warn!(uid = %profile.uid, status = %raw, "Profile has unrecognized onboarding status");
            Decision::invalid_status()
        }
    }
}

/// Rejects blank uids. The uid is used as the record key exactly as given.
fn require_uid(uid: &str) -> AppResult<&str> {
    if uid.trim().is_empty() {
        return Err(DomainError::validation("User id is required").into());
    }
    Ok(uid)
}

#[async_trait]
impl OnboardingService for OnboardingManager {
    async fn decide(&self, identity: &Identity) -> AppResult<Decision> {
        let Some(uid) = identity.uid() else {
            debug!("Routing request without uid");
            return Ok(Decision::missing_identity());
        };

        let Some(profile) = self.repo.fetch(uid).await? else {
            // Concurrent first logins may both land here; creation overwrites, last write wins
            self.repo
                .create(
                    uid,
                    NewProfile::first_login(identity.email.clone(), identity.display_name.clone()),
                )
                .await?;
            info!(uid = %uid, "Created profile on first login");
            return Ok(Decision::redirect(Destination::Welcome));
        };

        let decision = route(&profile);
        debug!(uid = %uid, ?decision, "Routed user");
        Ok(decision)
    }

    async fn complete_welcome_step(
        &self,
        uid: &str,
        designation: &str,
        extra: Document,
    ) -> AppResult<()> {
        let uid = require_uid(uid)?;
        let designation = designation.trim();
        if designation.is_empty() {
            return Err(DomainError::validation("Designation is required").into());
        }

        let profile = self.repo.fetch(uid).await?.ok_or_not_found()?;
        if profile.onboarding_status.is_past_welcome() {
            return Err(DomainError::invalid_transition(format!(
                "Welcome step already completed (status {})",
                profile.onboarding_status
            ))
            .into());
        }

        let dropped: Vec<&str> = extra
            .iter()
            .filter(|(key, value)| !accepts_extra_field(key, value))
            .map(|(key, _)| key.as_str())
            .collect();
        if !dropped.is_empty() {
            warn!(uid = %uid, ?dropped, "Ignoring protected or mistyped fields in welcome step");
        }

        self.repo
            .patch(uid, ProfilePatch::welcome(designation, extra))
            .await?;
        info!(uid = %uid, designation = %designation, "Welcome step completed");

        Ok(())
    }

    async fn approve_user(&self, uid: &str) -> AppResult<()> {
        let uid = require_uid(uid)?;
        self.repo.patch(uid, ProfilePatch::approval()).await?;
        info!(uid = %uid, "User approved");
        Ok(())
    }

    async fn get_profile(&self, uid: &str) -> AppResult<UserProfile> {
        let uid = require_uid(uid)?;
        self.repo.fetch(uid).await?.ok_or_not_found()
    }
}

//! Domain layer - Onboarding entities and routing outcomes.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.
//! Profile records, their onboarding lifecycle and the routing decision shape
//! are shared by the store adapter, the state machine and the HTTP surface.

pub mod constants;
pub mod decision;
pub mod error;
pub mod profile;

pub use constants::*;
pub use decision::{Decision, Destination, Identity};
pub use error::{DomainError, DomainResult};
pub use profile::{
    accepts_extra_field, Document, NewProfile, OnboardingStatus, ProfilePatch, ProfileResponse,
    UserProfile,
};

//! Domain-level constants.
//!
//! These constants define record layout, lifecycle values and the messages
//! surfaced to users.

// =============================================================================
// Storage
// =============================================================================

/// Collection holding one profile record per uid unless overridden
pub const DEFAULT_PROFILE_COLLECTION: &str = "users";

// =============================================================================
// Onboarding Status
// =============================================================================

/// Profile created, welcome step not yet submitted
pub const STATUS_PENDING_PROFILE: &str = "pending_profile";

/// Welcome step submitted, waiting for an administrator
pub const STATUS_PENDING_ADMIN_APPROVAL: &str = "pending_admin_approval";

/// Fully onboarded
pub const STATUS_ACTIVE: &str = "active";

// =============================================================================
// Record Fields
// =============================================================================

pub const FIELD_UID: &str = "uid";
pub const FIELD_EMAIL: &str = "email";
pub const FIELD_DISPLAY_NAME: &str = "displayName";
pub const FIELD_DESIGNATION: &str = "designation";
pub const FIELD_IS_ADMIN: &str = "isAdmin";
pub const FIELD_ONBOARDING_STATUS: &str = "onboardingStatus";
pub const FIELD_CREATED_AT: &str = "createdAt";
pub const FIELD_UPDATED_AT: &str = "updatedAt";

/// Fields supplemental welcome-step data may never write
pub const RESERVED_PROFILE_FIELDS: &[&str] = &[
    FIELD_UID,
    FIELD_IS_ADMIN,
    FIELD_ONBOARDING_STATUS,
    FIELD_DESIGNATION,
    FIELD_CREATED_AT,
    FIELD_UPDATED_AT,
];

/// Check if a field name is reserved for the onboarding lifecycle
pub fn is_reserved_field(field: &str) -> bool {
    RESERVED_PROFILE_FIELDS.contains(&field)
}

/// Identity snapshot fields supplemental data may overwrite with a string or null
pub const IDENTITY_TEXT_FIELDS: &[&str] = &[FIELD_EMAIL, FIELD_DISPLAY_NAME];

/// Check if a field holds identity text on the profile record
pub fn is_identity_text_field(field: &str) -> bool {
    IDENTITY_TEXT_FIELDS.contains(&field)
}

// =============================================================================
// Decision Messages
// =============================================================================

pub const MSG_MISSING_IDENTITY: &str = "Missing identity data";

pub const MSG_AWAITING_APPROVAL: &str = "Your account is awaiting admin approval";

pub const MSG_INVALID_STATUS: &str = "Invalid onboarding status";

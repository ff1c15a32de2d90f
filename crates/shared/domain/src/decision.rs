//! Routing decision returned to the caller after login.

use serde::{Deserialize, Serialize};

use crate::constants::{MSG_AWAITING_APPROVAL, MSG_INVALID_STATUS, MSG_MISSING_IDENTITY};

/// Authenticated identity as supplied by the identity provider.
///
/// Authenticity is trusted entirely; only presence of `uid` is checked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Identity {
    /// Identity provider uid
    #[cfg_attr(feature = "openapi", schema(example = "x7Yb2kQ9"))]
    #[serde(default)]
    pub uid: Option<String>,
    #[cfg_attr(feature = "openapi", schema(example = "ada@example.com"))]
    #[serde(default)]
    pub email: Option<String>,
    #[cfg_attr(feature = "openapi", schema(example = "Ada Lovelace"))]
    #[serde(default)]
    pub display_name: Option<String>,
}

impl Identity {
    pub fn new(
        uid: impl Into<String>,
        email: Option<String>,
        display_name: Option<String>,
    ) -> Self {
        Self {
            uid: Some(uid.into()),
            email,
            display_name,
        }
    }

    /// The uid, if present and not blank
    pub fn uid(&self) -> Option<&str> {
        self.uid.as_deref().filter(|uid| !uid.trim().is_empty())
    }
}

/// Navigation target for a successful routing decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum Destination {
    Welcome,
    Dashboard,
    Admin,
}

/// Outcome of routing an authenticated identity.
///
/// Expected domain outcomes (missing identity, pending approval, corrupt
/// status) are `Error` values, never faults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum Decision {
    Redirect { destination: Destination },
    Error { message: String },
}

impl Decision {
    pub fn redirect(destination: Destination) -> Self {
        Decision::Redirect { destination }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Decision::Error {
            message: message.into(),
        }
    }

    pub fn missing_identity() -> Self {
        Decision::error(MSG_MISSING_IDENTITY)
    }

    pub fn awaiting_approval() -> Self {
        Decision::error(MSG_AWAITING_APPROVAL)
    }

    pub fn invalid_status() -> Self {
        Decision::error(MSG_INVALID_STATUS)
    }

    /// Destination if this is a redirect
    pub fn destination(&self) -> Option<Destination> {
        match self {
            Decision::Redirect { destination } => Some(*destination),
            Decision::Error { .. } => None,
        }
    }

    /// Message if this is an error
    pub fn message(&self) -> Option<&str> {
        match self {
            Decision::Redirect { .. } => None,
            Decision::Error { message } => Some(message),
        }
    }
}

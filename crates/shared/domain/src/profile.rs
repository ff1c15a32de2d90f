//! User profile record and onboarding lifecycle types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::constants::{
    is_identity_text_field, is_reserved_field, FIELD_DESIGNATION, FIELD_ONBOARDING_STATUS,
    STATUS_ACTIVE, STATUS_PENDING_ADMIN_APPROVAL, STATUS_PENDING_PROFILE,
};

/// Raw JSON object as held by the document store.
pub type Document = serde_json::Map<String, Value>;

/// Onboarding lifecycle status.
///
/// Persisted records are external data, so any value outside the three known
/// states decodes to `Unrecognized` instead of failing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Value", into = "String")]
pub enum OnboardingStatus {
    PendingProfile,
    PendingAdminApproval,
    Active,
    Unrecognized(String),
}

impl OnboardingStatus {
    /// Status used when a record carries no status field at all
    pub fn missing() -> Self {
        OnboardingStatus::Unrecognized(String::new())
    }

    /// Check if this is one of the known lifecycle states
    pub fn is_recognized(&self) -> bool {
        !matches!(self, OnboardingStatus::Unrecognized(_))
    }

    /// Check if the welcome step has already been submitted
    pub fn is_past_welcome(&self) -> bool {
        matches!(
            self,
            OnboardingStatus::PendingAdminApproval | OnboardingStatus::Active
        )
    }

    pub fn as_str(&self) -> &str {
        match self {
            OnboardingStatus::PendingProfile => STATUS_PENDING_PROFILE,
            OnboardingStatus::PendingAdminApproval => STATUS_PENDING_ADMIN_APPROVAL,
            OnboardingStatus::Active => STATUS_ACTIVE,
            OnboardingStatus::Unrecognized(raw) => raw,
        }
    }
}

impl From<&str> for OnboardingStatus {
    fn from(s: &str) -> Self {
        match s {
            STATUS_PENDING_PROFILE => OnboardingStatus::PendingProfile,
            STATUS_PENDING_ADMIN_APPROVAL => OnboardingStatus::PendingAdminApproval,
            STATUS_ACTIVE => OnboardingStatus::Active,
            other => OnboardingStatus::Unrecognized(other.to_string()),
        }
    }
}

impl From<String> for OnboardingStatus {
    fn from(s: String) -> Self {
        OnboardingStatus::from(s.as_str())
    }
}

impl From<Value> for OnboardingStatus {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => OnboardingStatus::from(s),
            other => OnboardingStatus::Unrecognized(other.to_string()),
        }
    }
}

impl From<OnboardingStatus> for String {
    fn from(status: OnboardingStatus) -> Self {
        match status {
            OnboardingStatus::Unrecognized(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for OnboardingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Only a JSON `true` grants the admin flag. Null or any other value reads as `false`.
fn lenient_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(matches!(Value::deserialize(deserializer)?, Value::Bool(true)))
}

/// Non-string values read as absent.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(Some(s)),
        _ => Ok(None),
    }
}

/// Check if a supplemental welcome-step field may be written to the record.
///
/// Lifecycle fields are never writable; identity text fields only take a
/// string or null.
pub fn accepts_extra_field(key: &str, value: &Value) -> bool {
    if is_reserved_field(key) {
        return false;
    }
    !is_identity_text_field(key) || value.is_string() || value.is_null()
}

/// Profile record, one per authenticated uid.
///
/// Field names follow the stored document layout (camelCase). Fields written
/// by the welcome step that have no dedicated slot are kept in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub uid: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub display_name: Option<String>,
    /// Null until the welcome step is completed
    #[serde(default, deserialize_with = "lenient_text")]
    pub designation: Option<String>,
    /// Set by privileged administration only
    #[serde(default, deserialize_with = "lenient_flag")]
    pub is_admin: bool,
    #[serde(default = "OnboardingStatus::missing")]
    pub onboarding_status: OnboardingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub extra: Document,
}

impl UserProfile {
    /// Build a stored record from creation data and the store's timestamp
    pub fn from_new(uid: impl Into<String>, new: NewProfile, now: DateTime<Utc>) -> Self {
        Self {
            uid: uid.into(),
            email: new.email,
            display_name: new.display_name,
            designation: new.designation,
            is_admin: new.is_admin,
            onboarding_status: new.onboarding_status,
            created_at: now,
            updated_at: now,
            extra: Document::new(),
        }
    }

    /// Check if user carries the admin flag
    pub fn is_admin(&self) -> bool {
        self.is_admin
    }
}

/// Profile response (safe to return to client)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ProfileResponse {
    /// Identity provider uid
    pub uid: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    /// Role label chosen on the welcome step
    pub designation: Option<String>,
    pub is_admin: bool,
    /// Onboarding lifecycle status
    #[cfg_attr(feature = "openapi", schema(example = "pending_profile"))]
    pub onboarding_status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Supplemental fields submitted with the welcome step
    #[cfg_attr(feature = "openapi", schema(value_type = Object))]
    pub extra_fields: Document,
}

impl From<UserProfile> for ProfileResponse {
    fn from(profile: UserProfile) -> Self {
        Self {
            uid: profile.uid,
            email: profile.email,
            display_name: profile.display_name,
            designation: profile.designation,
            is_admin: profile.is_admin,
            onboarding_status: profile.onboarding_status.into(),
            created_at: profile.created_at,
            updated_at: profile.updated_at,
            extra_fields: profile.extra,
        }
    }
}

/// Initial record contents written on first login.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProfile {
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub designation: Option<String>,
    pub is_admin: bool,
    pub onboarding_status: OnboardingStatus,
}

impl NewProfile {
    /// Default record for a first-time login: no designation, not admin
    pub fn first_login(email: Option<String>, display_name: Option<String>) -> Self {
        Self {
            email,
            display_name,
            designation: None,
            is_admin: false,
            onboarding_status: OnboardingStatus::PendingProfile,
        }
    }
}

/// Partial update merged into an existing record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfilePatch {
    pub designation: Option<String>,
    pub onboarding_status: Option<OnboardingStatus>,
    pub extra: Document,
}

impl ProfilePatch {
    /// Welcome-step submission. Fields rejected by `accepts_extra_field`
    /// are discarded.
    pub fn welcome(designation: impl Into<String>, mut extra: Document) -> Self {
        extra.retain(|key, value| accepts_extra_field(key, value));
        Self {
            designation: Some(designation.into()),
            onboarding_status: Some(OnboardingStatus::PendingAdminApproval),
            extra,
        }
    }

    /// Administrative approval
    pub fn approval() -> Self {
        Self {
            onboarding_status: Some(OnboardingStatus::Active),
            ..Self::default()
        }
    }

    /// Flatten into document fields. Typed fields are applied after `extra`.
    pub fn into_fields(self) -> Document {
        let mut fields = self.extra;
        if let Some(designation) = self.designation {
            fields.insert(FIELD_DESIGNATION.to_string(), Value::String(designation));
        }
        if let Some(status) = self.onboarding_status {
            fields.insert(
                FIELD_ONBOARDING_STATUS.to_string(),
                Value::String(status.into()),
            );
        }
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn stored(status: Value) -> Value {
        json!({
            "uid": "u-1",
            "email": "ada@example.com",
            "displayName": null,
            "designation": null,
            "isAdmin": false,
            "onboardingStatus": status,
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-01-01T00:00:00Z"
        })
    }

    #[test]
    fn decodes_known_statuses() {
        for (raw, expected) in [
            ("pending_profile", OnboardingStatus::PendingProfile),
            ("pending_admin_approval", OnboardingStatus::PendingAdminApproval),
            ("active", OnboardingStatus::Active),
        ] {
            let profile: UserProfile = serde_json::from_value(stored(json!(raw))).unwrap();
            assert_eq!(profile.onboarding_status, expected);
        }
    }

    #[test]
    fn unknown_status_decodes_as_unrecognized() {
        let profile: UserProfile = serde_json::from_value(stored(json!("suspended"))).unwrap();
        assert_eq!(
            profile.onboarding_status,
            OnboardingStatus::Unrecognized("suspended".to_string())
        );

        let profile: UserProfile = serde_json::from_value(stored(json!(7))).unwrap();
        assert!(!profile.onboarding_status.is_recognized());
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let profile: UserProfile = serde_json::from_value(json!({
            "uid": "u-2",
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-01-01T00:00:00Z"
        }))
        .unwrap();

        assert!(!profile.is_admin());
        assert_eq!(profile.onboarding_status, OnboardingStatus::missing());
        assert!(profile.designation.is_none());
        assert!(profile.extra.is_empty());
    }

    #[test]
    fn null_and_mistyped_fields_read_leniently() {
        let mut raw = stored(json!("pending_admin_approval"));
        raw["isAdmin"] = Value::Null;
        raw["email"] = json!(42);
        raw["displayName"] = json!({ "first": "Ada" });
        raw["designation"] = json!(["engineer"]);

        let profile: UserProfile = serde_json::from_value(raw).unwrap();

        assert!(!profile.is_admin());
        assert!(profile.email.is_none());
        assert!(profile.display_name.is_none());
        assert!(profile.designation.is_none());
        assert_eq!(
            profile.onboarding_status,
            OnboardingStatus::PendingAdminApproval
        );
    }

    #[test]
    fn only_boolean_true_grants_admin() {
        for (value, expected) in [
            (json!(true), true),
            (json!(false), false),
            (json!("true"), false),
            (json!(1), false),
        ] {
            let mut raw = stored(json!("active"));
            raw["isAdmin"] = value;
            let profile: UserProfile = serde_json::from_value(raw).unwrap();
            assert_eq!(profile.is_admin(), expected);
        }
    }

    #[test]
    fn welcome_patch_drops_mistyped_identity_fields() {
        let Value::Object(extra) = json!({
            "email": 42,
            "displayName": "Ada L.",
            "team": 7
        }) else {
            unreachable!()
        };

        let fields = ProfilePatch::welcome("engineer", extra).into_fields();

        assert!(!fields.contains_key("email"));
        assert_eq!(fields.get("displayName"), Some(&json!("Ada L.")));
        assert_eq!(fields.get("team"), Some(&json!(7)));
    }

    #[test]
    fn unknown_fields_are_kept_in_extra() {
        let mut raw = stored(json!("active"));
        raw["team"] = json!("platform");

        let profile: UserProfile = serde_json::from_value(raw).unwrap();
        assert_eq!(profile.extra.get("team"), Some(&json!("platform")));

        let encoded = serde_json::to_value(&profile).unwrap();
        assert_eq!(encoded["team"], json!("platform"));
        assert_eq!(encoded["onboardingStatus"], json!("active"));
        assert_eq!(encoded["isAdmin"], json!(false));
    }

    #[test]
    fn welcome_patch_drops_reserved_fields() {
        let extra = json!({
            "uid": "someone-else",
            "isAdmin": true,
            "onboardingStatus": "active",
            "designation": "ignored",
            "team": "platform"
        });
        let Value::Object(extra) = extra else { unreachable!() };

        let fields = ProfilePatch::welcome("engineer", extra).into_fields();

        assert_eq!(fields.get("designation"), Some(&json!("engineer")));
        assert_eq!(
            fields.get("onboardingStatus"),
            Some(&json!("pending_admin_approval"))
        );
        assert_eq!(fields.get("team"), Some(&json!("platform")));
        assert!(!fields.contains_key("uid"));
        assert!(!fields.contains_key("isAdmin"));
    }

    #[test]
    fn approval_patch_only_sets_status() {
        let fields = ProfilePatch::approval().into_fields();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields.get("onboardingStatus"), Some(&json!("active")));
    }
}

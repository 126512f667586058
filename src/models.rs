//! User shapes exchanged with `api/security/users`.
//!
//! Four shapes share the same identity (`name`):
//! - `NewUser` is only ever sent, and is the only shape carrying a password.
//! - `User` is the mutable record sent on update.
//! - `UserResponse` is the canonical record returned by the service.
//! - `SimpleUser` is the list projection.
//!
//! Outgoing bodies are built through `payload()` projections so that what goes
//! on the wire is decided by the type, not by whoever builds the request.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Profile flags shared by every user shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default)]
    pub admin: bool,
    #[serde(default = "default_true")]
    pub profile_updatable: bool,
    #[serde(default, rename = "disableUIAccess")]
    pub disable_ui_access: bool,
    #[serde(default)]
    pub internal_password_disabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub groups: Option<Vec<String>>,
    #[serde(default)]
    pub watch_manager: bool,
    #[serde(default)]
    pub reports_manager: bool,
    #[serde(default)]
    pub policy_manager: bool,
}

fn default_true() -> bool {
    true
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            admin: false,
            profile_updatable: true,
            disable_ui_access: false,
            internal_password_disabled: false,
            groups: None,
            watch_manager: false,
            reports_manager: false,
            policy_manager: false,
        }
    }
}

/// Request to create a user.
///
/// The password is held as a `SecretString`; it is only revealed by
/// [`NewUser::payload`], and `Debug` prints it redacted.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: SecretString,
    pub profile: UserProfile,
}

impl NewUser {
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>, password: SecretString) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password,
            profile: UserProfile::default(),
        }
    }

    #[must_use]
    pub fn with_profile(mut self, profile: UserProfile) -> Self {
        self.profile = profile;
        self
    }

    /// Creation body, with the password in plain text.
    #[must_use]
    pub fn payload(&self) -> NewUserPayload<'_> {
        NewUserPayload {
            name: &self.name,
            email: &self.email,
            password: self.password.expose_secret(),
            profile: &self.profile,
        }
    }
}

/// Wire form of [`NewUser`]. Only obtainable through [`NewUser::payload`].
#[derive(Serialize)]
pub struct NewUserPayload<'a> {
    name: &'a str,
    email: &'a str,
    password: &'a str,
    #[serde(flatten)]
    profile: &'a UserProfile,
}

/// Mutable user record.
///
/// `last_logged_in` and `realm` are owned by the server; they are read back
/// but never serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing)]
    pub last_logged_in: Option<String>,
    #[serde(default, skip_serializing)]
    pub realm: Option<String>,
    #[serde(flatten)]
    pub profile: UserProfile,
}

impl User {
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: Some(email.into()),
            last_logged_in: None,
            realm: None,
            profile: UserProfile::default(),
        }
    }

    /// Update body: everything except `lastLoggedIn` and `realm`.
    #[must_use]
    pub fn payload(&self) -> UserPayload<'_> {
        UserPayload {
            name: &self.name,
            email: self.email.as_deref(),
            profile: &self.profile,
        }
    }
}

impl From<UserResponse> for User {
    fn from(response: UserResponse) -> Self {
        Self {
            name: response.name,
            email: response.email,
            last_logged_in: response.last_logged_in,
            realm: response.realm,
            profile: response.profile,
        }
    }
}

/// Wire form of [`User`]. Only obtainable through [`User::payload`].
#[derive(Serialize)]
pub struct UserPayload<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<&'a str>,
    #[serde(flatten)]
    profile: &'a UserProfile,
}

/// Canonical user record as returned by Artifactory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub last_logged_in: Option<String>,
    #[serde(default)]
    pub realm: Option<String>,
    #[serde(default)]
    pub offline_mode: bool,
    #[serde(flatten)]
    pub profile: UserProfile,
}

/// Entry of the user list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimpleUser {
    pub name: String,
    pub uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub realm: Option<String>,
}

/// Decode the user list.
///
/// Depending on the Artifactory version the list arrives either as a JSON
/// array or as a JSON string holding that array. The string form must itself
/// be JSON; Python-style literals such as single-quoted lists are rejected.
///
/// # Errors
/// Returns an error if the body is neither shape or an entry is malformed.
pub fn decode_user_list(body: Value) -> serde_json::Result<Vec<SimpleUser>> {
    match body {
        Value::String(encoded) => serde_json::from_str(&encoded),
        other => serde_json::from_value(other),
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn secret(value: &str) -> SecretString {
        SecretString::from(value.to_string())
    }

    #[test]
    fn new_user_payload_reveals_password() {
        let user = NewUser::new("alice", "alice@example.com", secret("s3cret"));
        let body = serde_json::to_value(user.payload()).expect("should serialize");
        assert_eq!(
            body,
            json!({
                "name": "alice",
                "email": "alice@example.com",
                "password": "s3cret",
                "admin": false,
                "profileUpdatable": true,
                "disableUIAccess": false,
                "internalPasswordDisabled": false,
                "watchManager": false,
                "reportsManager": false,
                "policyManager": false
            })
        );
    }

    #[test]
    fn new_user_debug_redacts_password() {
        let user = NewUser::new("alice", "alice@example.com", secret("s3cret"));
        let debug = format!("{user:?}");
        assert!(debug.contains("alice"));
        assert!(!debug.contains("s3cret"));
    }

    #[test]
    fn user_payload_strips_server_fields() {
        let mut user = User::new("alice", "alice@example.com");
        user.last_logged_in = Some("2024-01-01T00:00:00.000Z".to_string());
        user.realm = Some("internal".to_string());
        user.profile.groups = Some(vec!["readers".to_string()]);

        let body = serde_json::to_value(user.payload()).expect("should serialize");
        assert!(body.get("lastLoggedIn").is_none());
        assert!(body.get("realm").is_none());
        assert_eq!(body["name"], "alice");
        assert_eq!(body["groups"], json!(["readers"]));
    }

    #[test]
    fn user_never_serializes_server_fields() {
        let user: User = serde_json::from_value(json!({
            "name": "alice",
            "email": "alice@example.com",
            "lastLoggedIn": "2024-01-01T00:00:00.000Z",
            "realm": "ldap"
        }))
        .expect("should decode");
        assert_eq!(user.realm.as_deref(), Some("ldap"));

        let body = serde_json::to_value(&user).expect("should serialize");
        assert!(body.get("lastLoggedIn").is_none());
        assert!(body.get("realm").is_none());
        assert_eq!(body["email"], "alice@example.com");
    }

    #[test]
    fn user_response_applies_defaults() {
        let response: UserResponse =
            serde_json::from_value(json!({"name": "alice"})).expect("should decode");
        assert_eq!(response.email, None);
        assert!(!response.offline_mode);
        assert_eq!(response.profile, UserProfile::default());
    }

    #[test]
    fn user_response_reads_server_fields() {
        let response: UserResponse = serde_json::from_value(json!({
            "name": "alice",
            "email": "alice@example.com",
            "admin": true,
            "disableUIAccess": true,
            "groups": ["readers", "deployers"],
            "lastLoggedIn": "2024-01-01T00:00:00.000Z",
            "realm": "internal",
            "offlineMode": true
        }))
        .expect("should decode");

        assert!(response.profile.admin);
        assert!(response.profile.disable_ui_access);
        assert_eq!(
            response.profile.groups.as_deref(),
            Some(&["readers".to_string(), "deployers".to_string()][..])
        );
        assert_eq!(response.realm.as_deref(), Some("internal"));
        assert!(response.offline_mode);

        let user = User::from(response);
        assert_eq!(user.realm.as_deref(), Some("internal"));
        assert!(user.profile.admin);
    }

    #[test]
    fn user_response_requires_name() {
        let result = serde_json::from_value::<UserResponse>(json!({"email": "a@example.com"}));
        assert!(result.is_err());
    }

    #[test]
    fn decode_user_list_accepts_array() {
        let users = decode_user_list(json!([
            {"name": "alice", "uri": "https://repo/api/security/users/alice", "realm": "internal"},
            {"name": "bob", "uri": "https://repo/api/security/users/bob"}
        ]))
        .expect("should decode");
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].realm.as_deref(), Some("internal"));
        assert_eq!(users[1].realm, None);
    }

    #[test]
    fn decode_user_list_accepts_encoded_array() {
        let array = json!([
            {"name": "alice", "uri": "https://repo/api/security/users/alice"},
            {"name": "bob", "uri": "https://repo/api/security/users/bob"}
        ]);
        let encoded = Value::String(array.to_string());

        let from_array = decode_user_list(array).expect("should decode array");
        let from_string = decode_user_list(encoded).expect("should decode string");
        assert_eq!(from_array, from_string);
    }

    #[test]
    fn decode_user_list_rejects_other_shapes() {
        assert!(decode_user_list(json!({"name": "alice"})).is_err());
        assert!(decode_user_list(json!(42)).is_err());
        assert!(decode_user_list(Value::String("not json".to_string())).is_err());
        assert!(decode_user_list(json!([{"name": "alice"}])).is_err());
    }
}

//! API Models
//!
//! JSON shapes exchanged with the admin REST API. Keys are camelCase on the
//! wire; users are identified by the backend's `_id`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A visitor as reported by the backend.
///
/// The lifecycle of a user is owned by the backend; this crate only
/// displays users and requests mutations (deactivation) for them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    #[serde(default)]
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_in_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
}

impl User {
    /// Name shown in tables: the backend's `fullName` when present,
    /// otherwise the non-empty name parts joined by spaces.
    pub fn display_name(&self) -> String {
        if let Some(full) = self.full_name.as_deref().filter(|s| !s.trim().is_empty()) {
            return full.to_string();
        }

        [
            Some(self.first_name.as_str()),
            self.middle_name.as_deref(),
            Some(self.last_name.as_str()),
        ]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
    }

    /// Purpose of the visit, or an empty string.
    pub fn purpose_or_empty(&self) -> &str {
        self.purpose.as_deref().unwrap_or("")
    }
}

/// `GET dashboard` response body
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    /// The signed-in administrator; absent once the session is over.
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub active_users: Vec<User>,
    #[serde(default)]
    pub all_users: Vec<User>,
}

/// `POST deactivate-user` request body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeactivateUserRequest {
    pub user_id: String,
}

/// `POST register` request body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub first_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    pub last_name: String,
    pub username: String,
    pub password: String,
    pub confirm_password: String,
}

/// Acknowledgement carrying a human-readable message
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub msg: String,
}

/// A single server-side validation failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub msg: String,
    /// Request field the error refers to, when the backend names one
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "param")]
    pub path: Option<String>,
}

/// Error body returned by the backend when request validation fails
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationErrorBody {
    #[serde(default)]
    pub errors: Vec<FieldError>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dashboard_response_from_backend_json() {
        let json = r#"{
            "user": { "_id": "a1", "firstName": "Ada", "lastName": "Lovelace" },
            "activeUsers": [
                {
                    "_id": "u1",
                    "fullName": "Grace Hopper",
                    "isActive": true,
                    "checkInTime": "2026-10-19T08:30:00.000Z",
                    "purpose": "Workshop"
                }
            ],
            "allUsers": [
                { "_id": "u1", "fullName": "Grace Hopper" },
                { "_id": "u2", "firstName": "Alan", "lastName": "Turing", "isActive": false }
            ]
        }"#;

        let response: DashboardResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.user.as_ref().unwrap().first_name, "Ada");
        assert_eq!(response.active_users.len(), 1);
        assert_eq!(response.all_users.len(), 2);

        let active = &response.active_users[0];
        assert!(active.is_active);
        assert_eq!(active.purpose_or_empty(), "Workshop");
        assert_eq!(
            active.check_in_time.unwrap().to_rfc3339(),
            "2026-10-19T08:30:00+00:00"
        );
    }

    #[test]
    fn test_dashboard_response_without_user() {
        let response: DashboardResponse = serde_json::from_str(r#"{ "user": null }"#).unwrap();
        assert!(response.user.is_none());
        assert!(response.active_users.is_empty());
        assert!(response.all_users.is_empty());
    }

    #[test]
    fn test_display_name_falls_back_to_parts() {
        let user: User = serde_json::from_str(
            r#"{ "id": "u2", "firstName": "Alan", "middleName": " ", "lastName": "Turing" }"#,
        )
        .unwrap();
        assert_eq!(user.id, "u2");
        assert_eq!(user.display_name(), "Alan Turing");
    }

    #[test]
    fn test_register_request_wire_format() {
        let request = RegisterRequest {
            first_name: "Ada".to_string(),
            middle_name: None,
            last_name: "Lovelace".to_string(),
            username: "ada.l".to_string(),
            password: "Secret123".to_string(),
            confirm_password: "Secret123".to_string(),
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["firstName"], "Ada");
        assert_eq!(value["confirmPassword"], "Secret123");
        assert!(value.get("middleName").is_none());
    }

    #[test]
    fn test_validation_body_ignores_extra_keys() {
        let body: ValidationErrorBody = serde_json::from_str(
            r#"{ "errors": [ { "type": "field", "value": "ab", "msg": "Username taken", "path": "username", "location": "body" } ] }"#,
        )
        .unwrap();
        assert_eq!(body.errors[0].msg, "Username taken");
        assert_eq!(body.errors[0].path.as_deref(), Some("username"));
    }
}

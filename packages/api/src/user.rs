//! User authentication and profile types: `/user/*`, plus the legacy
//! `/users` and `/tokens` endpoints.

use serde::{Deserialize, Serialize};

/// Request body for `POST /user/login`, legacy `POST /tokens` and legacy
/// `POST /users`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response body carrying a freshly issued bearer token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenResponse {
    pub token: String,
}

/// Request body for `POST /user/reset-password`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub new_password: String,
    pub old_password: String,
}

/// Response body for `GET /user/profile`.
///
/// The four numeric identifiers classify the account inside the operator's
/// customer hierarchy; the client passes them through untouched.
///
/// # Example
///
/// ```json
/// {
///   "email": "operator@example.com",
///   "fullName": "Jane Operator",
///   "phoneNumber": "+84 90 000 0000",
///   "desc": "field operations",
///   "customerId": 12,
///   "userTypeId": 2,
///   "userStatusId": 1,
///   "userGroupId": 7,
///   "createdBy": "admin@example.com"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProfile {
    pub email: String,
    pub full_name: String,
    pub phone_number: String,

    #[serde(rename = "desc")]
    pub description: String,

    pub customer_id: i64,
    pub user_type_id: i64,
    pub user_status_id: i64,
    pub user_group_id: i64,

    /// Account that created this user.
    pub created_by: String,
}

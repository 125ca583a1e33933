use crate::{
    filter,
    models,
};
use rocket::serde::{
    Deserialize,
    Serialize,
};

/// Body on non-2xx responses
///
/// ```json
/// { "error": "Resource not found" }
/// ```
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct ErrorResponse {
    pub error: String,
}

/// Body of the filtered list operation
///
/// ```json
/// { "filters": [["userId", "==", "u123"], ["rate", ">=", 100]] }
/// ```
///
/// An empty filter list returns every active record.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct ListRequest {
    pub filters: Vec<filter::Filter>,
}

/// Confirmation body of the remove operation
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct RemovedResponse {
    pub id: String,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: String,
}

/// Issued on successful login or registration. The token goes in
///
/// the `token` header of every authenticated request.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct LoginResponse {
    pub token: String,
    pub user: models::User,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct AppInfoResponse {
    pub name: String,
    pub version: String,
}

/// Short-lived token exchange response from the instagram api
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct InstagramTokenResponse {
    pub access_token: String,
    pub user_id: u64,
}

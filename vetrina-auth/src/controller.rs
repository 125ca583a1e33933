use rocket::{
    http::Status,
    post,
    response::status::Custom,
    serde::json::Json,
};

use vetrina_core::{
    auth,
    reqres,
};

// JSON APIs

/// Register a new business or influencer account.
///
/// Admin accounts can not be self-registered
///
/// Protected: false
#[post("/register", data = "<r_register>")]
pub async fn register(
    r_register: Json<reqres::RegisterRequest>,
) -> Custom<Json<reqres::LoginResponse>> {
    match auth::register(r_register) {
        Ok(r) => Custom(Status::Created, Json(r)),
        Err(e) => Custom(e.status(), Json(Default::default())),
    }
}

/// Login with email and password. Returns a fresh token on success
///
/// Protected: false
#[post("/login", data = "<r_login>")]
pub async fn login(r_login: Json<reqres::LoginRequest>) -> Custom<Json<reqres::LoginResponse>> {
    match auth::login(r_login) {
        Ok(r) => Custom(Status::Ok, Json(r)),
        Err(e) => Custom(e.status(), Json(Default::default())),
    }
}

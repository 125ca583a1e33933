use rocket::{
    get,
    http::Status,
    response::status::Custom,
    serde::json::Json,
    FromForm,
};

use vetrina_core::{
    reqres,
    social,
};

// JSON APIs

/// Instagram webhook handshake params. Meta sends the keys with a `hub.` prefix
///
/// (`.` is rocket's nesting separator, so the prefix binds as a nested group)
#[derive(FromForm)]
pub struct WebhookQuery {
    pub hub: WebhookHub,
}

/// The `hub.mode` / `hub.verify_token` / `hub.challenge` group
#[derive(FromForm)]
pub struct WebhookHub {
    pub mode: String,
    pub verify_token: String,
    pub challenge: String,
}

/// Health check
///
/// Protected: false
#[get("/")]
pub async fn index() -> Custom<String> {
    Custom(Status::Ok, String::from("vetrina-social is online"))
}

/// Service name and version
///
/// Protected: false
#[get("/about")]
pub async fn about() -> Custom<Json<reqres::AppInfoResponse>> {
    Custom(
        Status::Ok,
        Json(reqres::AppInfoResponse {
            name: String::from(env!("CARGO_PKG_NAME")),
            version: String::from(env!("CARGO_PKG_VERSION")),
        }),
    )
}

/// Meta subscription handshake. Echoes the challenge back as plain text
///
/// when the mode is `subscribe` and the verify token matches
///
/// Protected: false
#[get("/webhook/instagram?<query..>")]
pub async fn webhook_instagram(query: WebhookQuery) -> Custom<String> {
    let expected = social::get_verify_token();
    match social::verify_subscription(
        &expected,
        &query.hub.mode,
        &query.hub.verify_token,
        &query.hub.challenge,
    ) {
        Ok(challenge) => Custom(Status::Ok, challenge),
        Err(_) => Custom(Status::Forbidden, String::new()),
    }
}

/// OAuth redirect target. Swaps the authorization code for a short-lived
///
/// access token and persists it
///
/// Protected: false
#[get("/cb/instagram?<code>")]
pub async fn cb_instagram(code: String) -> Custom<Json<reqres::InstagramTokenResponse>> {
    match social::exchange_code(&code).await {
        Ok(r) => Custom(Status::Ok, Json(r)),
        Err(e) => Custom(e.status(), Json(Default::default())),
    }
}

//! Instagram integration module

use crate::{
    client,
    db::{
        self,
        DATABASE_LOCK,
    },
    error::VetrinaError,
    reqres,
};
use kn0sys_lmdb_rs::MdbError;
use log::{
    debug,
    error,
    info,
};

/// The only handshake mode the webhook accepts
pub const SUBSCRIBE_MODE: &str = "subscribe";

/// Instagram api host, overridable for testing
pub fn get_ig_api_host() -> String {
    std::env::var(crate::VETRINA_IG_API_HOST).unwrap_or(String::from(crate::DEFAULT_IG_API_HOST))
}

/// Configured webhook verify token
pub fn get_verify_token() -> String {
    std::env::var(crate::VETRINA_IG_VERIFY_TOKEN).unwrap_or_default()
}

/// Webhook handshake. Echo the challenge only when the mode is
///
/// `subscribe` and the verify token matches the configured secret.
///
/// An unconfigured secret rejects everything.
pub fn verify_subscription(
    expected_token: &str,
    mode: &str,
    verify_token: &str,
    challenge: &str,
) -> Result<String, VetrinaError> {
    if expected_token.is_empty() {
        error!("webhook verify token is not configured");
        return Err(VetrinaError::Unauthorized);
    }
    if mode != SUBSCRIBE_MODE || verify_token != expected_token {
        error!("webhook subscription rejected");
        return Err(VetrinaError::Unauthorized);
    }
    Ok(String::from(challenge))
}

/// Exchange an oauth authorization code for a short-lived access
///
/// token and persist it for the returned instagram account.
pub async fn exchange_code(code: &String) -> Result<reqres::InstagramTokenResponse, VetrinaError> {
    info!("exchanging instagram authorization code");
    let client_id = std::env::var(crate::VETRINA_IG_CLIENT_ID).unwrap_or_default();
    let client_secret = std::env::var(crate::VETRINA_IG_CLIENT_SECRET).unwrap_or_default();
    let redirect_uri = std::env::var(crate::VETRINA_IG_REDIRECT_URI).unwrap_or_default();
    if client_id.is_empty() || client_secret.is_empty() {
        error!("instagram client credentials are not configured");
        return Err(VetrinaError::Invalid);
    }
    let params = [
        ("client_id", String::from(&client_id)),
        ("client_secret", String::from(&client_secret)),
        ("grant_type", String::from("authorization_code")),
        ("redirect_uri", String::from(&redirect_uri)),
        ("code", String::from(code)),
    ];
    let http = reqwest::Client::new();
    match http
        .post(format!("{}/oauth/access_token", get_ig_api_host()))
        .form(&params)
        .send()
        .await
    {
        Ok(response) => {
            client::ensure_success(response.status())?;
            let res = response.json::<reqres::InstagramTokenResponse>().await;
            debug!("instagram token response: {:?}", res);
            match res {
                Ok(r) => {
                    store_access_token(r.user_id, &r.access_token)?;
                    Ok(r)
                }
                _ => Err(VetrinaError::Http),
            }
        }
        Err(e) => {
            error!("token exchange failed due to: {:?}", e);
            Err(VetrinaError::Http)
        }
    }
}

/// Persist the access token for an instagram account
pub fn store_access_token(user_id: u64, token: &String) -> Result<(), VetrinaError> {
    info!("storing access token for instagram account: {}", user_id);
    let db = &DATABASE_LOCK;
    let k = format!("{}-{}", crate::IG_TOKEN_DB_KEY, user_id);
    let v = bincode::serialize(token).unwrap_or_default();
    db::write_chunks(&db.env, &db.handle, k.as_bytes(), &v)
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    Ok(())
}

/// Lookup the stored access token for an instagram account
pub fn find_access_token(user_id: u64) -> Result<String, VetrinaError> {
    info!("find access token for instagram account: {}", user_id);
    let db = &DATABASE_LOCK;
    let k = format!("{}-{}", crate::IG_TOKEN_DB_KEY, user_id);
    let r = db::DatabaseEnvironment::read(&db.env, &db.handle, &k.as_bytes().to_vec())
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    if r.is_empty() {
        error!("access token not found");
        return Err(VetrinaError::Database(MdbError::NotFound));
    }
    let result: String = bincode::deserialize(&r[..]).unwrap_or_default();
    Ok(result)
}

// Tests
//-------------------------------------------------------------------------------

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn verify_subscription_test() {
        let r = verify_subscription("sekrit", "subscribe", "sekrit", "12345");
        assert_eq!(r.unwrap(), "12345");
        assert!(verify_subscription("sekrit", "unsubscribe", "sekrit", "12345").is_err());
        assert!(verify_subscription("sekrit", "subscribe", "wrong", "12345").is_err());
        assert!(verify_subscription("", "subscribe", "", "12345").is_err());
    }

    #[test]
    fn access_token_roundtrip_test() -> Result<(), VetrinaError> {
        let ig_account: u64 = rand::random();
        let token = String::from("IGQVJXc2VjcmV0");
        store_access_token(ig_account, &token)?;
        let f_token = find_access_token(ig_account)?;
        assert_eq!(f_token, token);
        Ok(())
    }

    #[test]
    fn missing_token_test() {
        let ig_account: u64 = rand::random();
        assert!(find_access_token(ig_account).is_err());
    }
}

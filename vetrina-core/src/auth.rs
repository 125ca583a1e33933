//! Registration, login and token verification module

use crate::{
    db::{
        self,
        DATABASE_LOCK,
    },
    error::VetrinaError,
    models::*,
    reqres,
    user,
    utils,
};
use hmac::{
    Hmac,
    Mac,
};
use jwt::*;
use kn0sys_lmdb_rs::MdbError;
use log::{
    debug,
    error,
    info,
};
use rocket::{
    http::Status,
    outcome::Outcome,
    request,
    request::FromRequest,
    serde::json::Json,
    Request,
};
use sha2::Sha384;
use std::collections::BTreeMap;

fn get_token_expiration(created: i64) -> i64 {
    created + utils::get_token_timeout() * 60
}

/// The `uid` claim ties the token to one account, the `expiration`
///
/// claim is unix seconds.
fn create_token(uid: String, created: i64) -> String {
    let jwt_secret_key = utils::get_jwt_secret_key().unwrap_or_default();
    let key: Hmac<Sha384> = Hmac::new_from_slice(jwt_secret_key.as_bytes()).expect("hash");
    let header = Header {
        algorithm: AlgorithmType::Hs384,
        ..Default::default()
    };
    let mut claims = BTreeMap::new();
    let expiration = get_token_expiration(created);
    claims.insert("uid", uid);
    claims.insert("expiration", expiration.to_string());
    let token = Token::new(header, claims).sign_with_key(&key);
    String::from(token.expect("expected token").as_str())
}

fn validate_registration(r: &Json<reqres::RegisterRequest>) -> bool {
    info!("validating registration");
    r.username.len() < utils::string_limit()
        && r.email.len() < utils::string_limit()
        && r.email.contains('@')
        && !r.password.is_empty()
        && r.password.len() < utils::string_limit()
        && user::is_valid_role(&r.role)
        && r.role != user::RoleType::Admin.value()
}

/// Lookup stored credentials by email
pub fn find_credential(email: &String) -> Result<Credential, VetrinaError> {
    info!("find credential");
    let db = &DATABASE_LOCK;
    let k = format!("{}-{}", crate::CREDENTIAL_DB_KEY, email);
    let r = db::DatabaseEnvironment::read(&db.env, &db.handle, &k.as_bytes().to_vec())
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    if r.is_empty() {
        error!("credential not found");
        return Err(VetrinaError::Database(MdbError::NotFound));
    }
    let result: Credential = bincode::deserialize(&r[..]).unwrap_or_default();
    Ok(result)
}

/// Create the account and its credential, returning a signed token.
///
/// The admin role can not be registered.
pub fn register(r: Json<reqres::RegisterRequest>) -> Result<reqres::LoginResponse, VetrinaError> {
    info!("registering new account");
    if !validate_registration(&r) {
        error!("invalid registration");
        return Err(VetrinaError::Invalid);
    }
    if find_credential(&r.email).is_ok() {
        error!("email already registered");
        return Err(VetrinaError::Invalid);
    }
    let j_user = Json(User {
        username: String::from(&r.username),
        email: String::from(&r.email),
        role: String::from(&r.role),
        ..Default::default()
    });
    let new_user = user::create(j_user)?;
    let ts = chrono::offset::Utc::now().timestamp();
    let pass_hash =
        bcrypt::hash(&r.password, bcrypt::DEFAULT_COST).map_err(|_| VetrinaError::Unknown)?;
    let credential = Credential {
        crid: format!("{}{}", crate::CREDENTIAL_DB_KEY, utils::generate_rnd()),
        user_id: String::from(&new_user.uid),
        email: String::from(&r.email),
        pass_hash,
        created: ts,
    };
    let db = &DATABASE_LOCK;
    let k = format!("{}-{}", crate::CREDENTIAL_DB_KEY, &r.email);
    let v = bincode::serialize(&credential).unwrap_or_default();
    db::write_chunks(&db.env, &db.handle, k.as_bytes(), &v)
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    let token = create_token(String::from(&new_user.uid), ts);
    Ok(reqres::LoginResponse {
        token,
        user: new_user,
    })
}

/// Verify the password against the stored bcrypt hash and issue a
///
/// fresh token. Unknown email, bad password and archived accounts are
///
/// indistinguishable to the caller.
pub fn login(l: Json<reqres::LoginRequest>) -> Result<reqres::LoginResponse, VetrinaError> {
    info!("processing login");
    let credential = find_credential(&l.email).map_err(|_| VetrinaError::Unauthorized)?;
    let valid = bcrypt::verify(&l.password, &credential.pass_hash).unwrap_or(false);
    if !valid {
        error!("password verification failed");
        return Err(VetrinaError::Unauthorized);
    }
    let f_user = user::find(&credential.user_id).map_err(|_| VetrinaError::Unauthorized)?;
    let ts = chrono::offset::Utc::now().timestamp();
    let token = create_token(String::from(&credential.user_id), ts);
    Ok(reqres::LoginResponse {
        token,
        user: f_user,
    })
}

#[derive(Debug)]
pub struct BearerToken(String);

#[derive(Debug)]
pub enum BearerTokenError {
    Expired,
    Invalid,
    Missing,
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for BearerToken {
    type Error = BearerTokenError;

    async fn from_request(request: &'r Request<'_>) -> request::Outcome<Self, Self::Error> {
        let env = utils::get_release_env();
        let dev = utils::ReleaseEnvironment::Development;
        if env == dev {
            return Outcome::Success(BearerToken(String::new()));
        }
        let token = request.headers().get_one("token");
        match token {
            Some(token) => {
                // check validity
                let jwt_secret_key = utils::get_jwt_secret_key().unwrap_or_default();
                let key: Hmac<Sha384> =
                    Hmac::new_from_slice(jwt_secret_key.as_bytes()).expect("hash");
                let jwt: Result<
                    Token<Header, BTreeMap<std::string::String, std::string::String>, Verified>,
                    jwt::Error,
                > = token.verify_with_key(&key);
                return match jwt {
                    Ok(j) => {
                        let claims = j.claims();
                        debug!("claim uid: {}", claims["uid"]);
                        // the account behind the token must still exist
                        if user::find(&claims["uid"]).is_err() {
                            return Outcome::Error((
                                Status::Unauthorized,
                                BearerTokenError::Invalid,
                            ));
                        }
                        let now: i64 = chrono::offset::Utc::now().timestamp();
                        let expire = match claims["expiration"].parse::<i64>() {
                            Ok(e) => e,
                            Err(_) => 0,
                        };
                        if expire < now {
                            return Outcome::Error((
                                Status::Unauthorized,
                                BearerTokenError::Expired,
                            ));
                        }
                        Outcome::Success(BearerToken(String::from(token)))
                    }
                    Err(_) => Outcome::Error((Status::Unauthorized, BearerTokenError::Invalid)),
                };
            }
            None => Outcome::Error((Status::Unauthorized, BearerTokenError::Missing)),
        }
    }
}

// Tests
//-------------------------------------------------------------------------------

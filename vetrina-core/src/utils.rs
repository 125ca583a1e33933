use crate::{
    args,
    db::{
        self,
        DATABASE_LOCK,
    },
    dispute,
    error::VetrinaError,
};
use clap::Parser;
use kn0sys_lmdb_rs::MdbError;
use log::{
    error,
    info,
};
use rand_core::RngCore;

#[derive(Debug, PartialEq)]
pub enum ReleaseEnvironment {
    Development,
    Production,
}

impl ReleaseEnvironment {
    pub fn value(&self) -> String {
        match *self {
            ReleaseEnvironment::Development => String::from("development"),
            ReleaseEnvironment::Production => String::from("production"),
        }
    }
}

/// Parse the command line, falling back to defaults when the argv
///
/// belongs to another harness.
fn get_args() -> args::Args {
    args::Args::try_parse().unwrap_or_else(|_| args::Args::parse_from([crate::APP_NAME]))
}

/// Random data generation for primary keys
pub fn generate_rnd() -> String {
    let mut data = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut data);
    hex::encode(data)
}

/// Helper for separation of dev and prod concerns
pub fn get_release_env() -> ReleaseEnvironment {
    let args = get_args();
    let env = String::from(args.release_env);
    if env == "prod" {
        ReleaseEnvironment::Production
    } else {
        ReleaseEnvironment::Development
    }
}

/// app port
pub fn get_app_port() -> u16 {
    let args = get_args();
    args.port
}

/// app auth port
pub fn get_app_auth_port() -> u16 {
    let args = get_args();
    args.auth_port
}

/// app social integrations port
pub fn get_app_social_port() -> u16 {
    let args = get_args();
    args.social_port
}

/// resource api host consumed by the client module
pub fn get_api_host() -> String {
    let args = get_args();
    args.api_host
}

/// token expiration in minutes
pub fn get_token_timeout() -> i64 {
    let args = get_args();
    args.token_timeout
}

// DoS prevention
pub const fn string_limit() -> usize {
    512
}
pub const fn message_limit() -> usize {
    9999
}
pub const fn thread_limit() -> usize {
    100
}
pub const fn cart_item_limit() -> usize {
    100
}

/// Secret key for signing auth tokens, generated at startup if none exists
pub fn gen_signing_keys() -> Result<(), VetrinaError> {
    info!("generating signing keys");
    let jwt = get_jwt_secret_key().unwrap_or_default();
    if jwt.is_empty() {
        let rnd_jwt = generate_rnd();
        let db = &DATABASE_LOCK;
        db::write_chunks(
            &db.env,
            &db.handle,
            crate::VETRINA_JWT_SECRET_KEY.as_bytes(),
            rnd_jwt.as_bytes(),
        )
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    }
    Ok(())
}

/// Remove the jwt signing key. All outstanding tokens become invalid
///
/// and a new key generates on the next startup.
pub fn revoke_signing_keys() -> Result<(), VetrinaError> {
    let db = &DATABASE_LOCK;
    db::DatabaseEnvironment::delete(&db.env, &db.handle, crate::VETRINA_JWT_SECRET_KEY.as_bytes())
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    Ok(())
}

pub fn get_jwt_secret_key() -> Result<String, VetrinaError> {
    let db = &DATABASE_LOCK;
    let r = db::DatabaseEnvironment::read(
        &db.env,
        &db.handle,
        &crate::VETRINA_JWT_SECRET_KEY.as_bytes().to_vec(),
    )
    .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    if r.is_empty() {
        error!("JWT key not found");
        return Err(VetrinaError::NotFound);
    }
    Ok(String::from_utf8(r).unwrap_or_default())
}

/// Put all app pre-checks here
pub fn start_up() -> Result<(), VetrinaError> {
    info!("vetrina is starting up");
    let args = get_args();
    if args.clear_disputes {
        dispute::clear_all()?;
    }
    if args.revoke_tokens {
        revoke_signing_keys()?;
    }
    gen_signing_keys()?;
    let env: String = get_release_env().value();
    info!("{} - vetrina is online", env);
    Ok(())
}

// Tests
//-------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_rnd_test() {
        let rnd = generate_rnd();
        let actual = rnd.len();
        let expected = 64;
        assert_eq!(expected, actual);
    }

    #[test]
    fn release_env_test() {
        let actual = get_release_env();
        let expected = ReleaseEnvironment::Development;
        assert_eq!(expected, actual)
    }

    #[test]
    fn app_port_test() {
        let actual: u16 = get_app_port();
        let expected: u16 = 7000;
        assert_eq!(expected, actual)
    }

    #[test]
    fn auth_port_test() {
        let actual: u16 = get_app_auth_port();
        let expected: u16 = 7043;
        assert_eq!(expected, actual)
    }

    #[test]
    fn social_port_test() {
        let actual: u16 = get_app_social_port();
        let expected: u16 = 7044;
        assert_eq!(expected, actual)
    }

    #[test]
    fn api_host_test() {
        let actual: String = get_api_host();
        let expected: String = String::from("http://localhost:7000");
        assert_eq!(expected, actual)
    }

    #[test]
    fn signing_keys_test() -> Result<(), VetrinaError> {
        gen_signing_keys()?;
        let k1 = get_jwt_secret_key()?;
        // generation is idempotent
        gen_signing_keys()?;
        let k2 = get_jwt_secret_key()?;
        assert!(!k1.is_empty());
        assert_eq!(k1, k2);
        Ok(())
    }
}

//! Platform account logic module

use crate::{
    db::{
        self,
        DATABASE_LOCK,
        INDEX_LOCK,
    },
    error::VetrinaError,
    filter,
    models::*,
    utils,
};
use kn0sys_lmdb_rs::MdbError;
use log::{
    debug,
    error,
    info,
};
use rocket::serde::json::Json;

pub enum RoleType {
    Admin,
    Business,
    Influencer,
}

impl RoleType {
    pub fn value(&self) -> String {
        match *self {
            RoleType::Admin => String::from("admin"),
            RoleType::Business => String::from("business"),
            RoleType::Influencer => String::from("influencer"),
        }
    }
}

/// Roles are a closed set, anything else is rejected on write.
pub fn is_valid_role(role: &str) -> bool {
    role == RoleType::Admin.value()
        || role == RoleType::Business.value()
        || role == RoleType::Influencer.value()
}

fn validate_user(u: &Json<User>) -> bool {
    info!("validating user: {}", &u.uid);
    u.username.len() < utils::string_limit()
        && u.email.len() < utils::string_limit()
        && is_valid_role(&u.role)
}

/// Create a new user
pub fn create(u: Json<User>) -> Result<User, VetrinaError> {
    info!("creating user");
    if !validate_user(&u) {
        error!("invalid user");
        return Err(VetrinaError::Invalid);
    }
    let ts = chrono::offset::Utc::now().timestamp();
    let uid: String = format!("{}{}", crate::USER_DB_KEY, utils::generate_rnd());
    let new_user = User {
        uid: String::from(&uid),
        username: String::from(&u.username),
        email: String::from(&u.email),
        role: String::from(&u.role),
        rate: u.rate,
        balance: u.balance,
        created: ts,
        archived: false,
    };
    debug!("insert user: {:?}", &new_user);
    let db = &DATABASE_LOCK;
    let k = &new_user.uid;
    let v = bincode::serialize(&new_user).unwrap_or_default();
    db::write_chunks(&db.env, &db.handle, k.as_bytes(), &v)
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    // in order to retrieve all users, write keys to the index
    let list_key = crate::USER_LIST_DB_KEY;
    let _lock = INDEX_LOCK
        .lock()
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    let r = db::DatabaseEnvironment::read(&db.env, &db.handle, &list_key.as_bytes().to_vec())
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    if r.is_empty() {
        debug!("creating user index");
    }
    let old: String = bincode::deserialize(&r[..]).unwrap_or_default();
    let user_list = [old, String::from(&uid)].join(",");
    let s_user_list = bincode::serialize(&user_list).unwrap_or_default();
    debug!("writing user index {} for id: {}", user_list, list_key);
    db::write_chunks(&db.env, &db.handle, list_key.as_bytes(), &s_user_list)
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    Ok(new_user)
}

/// Lookup user
pub fn find(uid: &String) -> Result<User, VetrinaError> {
    info!("find user: {}", &uid);
    let db = &DATABASE_LOCK;
    let r = db::DatabaseEnvironment::read(&db.env, &db.handle, &uid.as_bytes().to_vec())
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    if r.is_empty() {
        error!("user not found");
        return Err(VetrinaError::Database(MdbError::NotFound));
    }
    let result: User = bincode::deserialize(&r[..]).unwrap_or_default();
    if result.archived {
        return Err(VetrinaError::Database(MdbError::NotFound));
    }
    Ok(result)
}

/// Lookup all users matching the filters
pub fn find_all(filters: &[filter::Filter]) -> Result<Vec<User>, VetrinaError> {
    let db = &DATABASE_LOCK;
    let i_list_key = crate::USER_LIST_DB_KEY;
    let i_r = db::DatabaseEnvironment::read(&db.env, &db.handle, &i_list_key.as_bytes().to_vec())
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    if i_r.is_empty() {
        error!("user index not found");
    }
    let de: String = bincode::deserialize(&i_r[..]).unwrap_or_default();
    let i_v_uid = de.split(",");
    let i_v: Vec<String> = i_v_uid.map(String::from).collect();
    let mut users: Vec<User> = Vec::new();
    for u in i_v {
        let user: User = find(&u).unwrap_or_default();
        if !user.uid.is_empty() {
            users.push(user);
        }
    }
    Ok(filter::retain_matching(users, filters))
}

/// Modify user. The stored record is overwritten with the request
///
/// body, id and created date excepted.
pub fn modify(u: Json<User>) -> Result<User, VetrinaError> {
    info!("modify user: {}", &u.uid);
    if !validate_user(&u) {
        error!("invalid user");
        return Err(VetrinaError::Invalid);
    }
    let f_user: User = find(&u.uid)?;
    let db = &DATABASE_LOCK;
    let u_user = User::update(f_user, &u);
    db::DatabaseEnvironment::delete(&db.env, &db.handle, u_user.uid.as_bytes())
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    let v = bincode::serialize(&u_user).unwrap_or_default();
    db::write_chunks(&db.env, &db.handle, u_user.uid.as_bytes(), &v)
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    Ok(u_user)
}

/// Flag a user as archived. The record and its index entry stay in
///
/// the database but no longer surface in lookups.
pub fn remove(uid: &String) -> Result<(), VetrinaError> {
    info!("remove user: {}", &uid);
    let mut f_user: User = find(uid)?;
    f_user.archived = true;
    let db = &DATABASE_LOCK;
    db::DatabaseEnvironment::delete(&db.env, &db.handle, f_user.uid.as_bytes())
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    let v = bincode::serialize(&f_user).unwrap_or_default();
    db::write_chunks(&db.env, &db.handle, f_user.uid.as_bytes(), &v)
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    Ok(())
}

// Tests
//-------------------------------------------------------------------------------

#[cfg(test)]
mod tests {

    use super::*;
    use serde_json::json;

    #[test]
    fn is_valid_role_test() {
        assert!(is_valid_role("admin"));
        assert!(is_valid_role("business"));
        assert!(is_valid_role("influencer"));
        assert!(!is_valid_role("superuser"));
        assert!(!is_valid_role(""));
    }

    #[test]
    fn create_test() -> Result<(), VetrinaError> {
        let username = format!("user{}", utils::generate_rnd());
        let j_user = Json(User {
            username: String::from(&username),
            email: String::from("test@vetrina.io"),
            role: RoleType::Influencer.value(),
            rate: 250,
            ..Default::default()
        });
        let test_user = create(j_user)?;
        assert!(test_user.uid.starts_with(crate::USER_DB_KEY));
        let f_user = find(&test_user.uid)?;
        assert_eq!(f_user.username, username);
        assert_eq!(f_user.rate, 250);
        remove(&test_user.uid)?;
        Ok(())
    }

    #[test]
    fn create_rejects_bad_role_test() {
        let j_user = Json(User {
            username: String::from("baduser"),
            role: String::from("superuser"),
            ..Default::default()
        });
        assert!(create(j_user).is_err());
    }

    #[test]
    fn find_all_test() -> Result<(), VetrinaError> {
        let username = format!("user{}", utils::generate_rnd());
        let j_user = Json(User {
            username: String::from(&username),
            email: String::from("list@vetrina.io"),
            role: RoleType::Business.value(),
            ..Default::default()
        });
        let test_user = create(j_user)?;
        let filters = vec![(String::from("username"), String::from("=="), json!(username))];
        let f_users = find_all(&filters)?;
        assert_eq!(f_users.len(), 1);
        assert_eq!(f_users[0].uid, test_user.uid);
        remove(&test_user.uid)?;
        Ok(())
    }

    #[test]
    fn modify_test() -> Result<(), VetrinaError> {
        let j_user = Json(User {
            username: format!("user{}", utils::generate_rnd()),
            role: RoleType::Influencer.value(),
            rate: 100,
            ..Default::default()
        });
        let test_user = create(j_user)?;
        let edit = Json(User {
            uid: String::from(&test_user.uid),
            username: String::from(&test_user.username),
            email: String::from("new@vetrina.io"),
            role: RoleType::Influencer.value(),
            rate: 500,
            ..Default::default()
        });
        let u_user = modify(edit)?;
        assert_eq!(u_user.rate, 500);
        assert_eq!(u_user.created, test_user.created);
        let f_user = find(&test_user.uid)?;
        assert_eq!(f_user.email, "new@vetrina.io");
        remove(&test_user.uid)?;
        Ok(())
    }

    #[test]
    fn remove_archives_test() -> Result<(), VetrinaError> {
        let j_user = Json(User {
            username: format!("user{}", utils::generate_rnd()),
            role: RoleType::Influencer.value(),
            ..Default::default()
        });
        let test_user = create(j_user)?;
        remove(&test_user.uid)?;
        assert!(find(&test_user.uid).is_err());
        let filters = vec![(
            String::from("username"),
            String::from("=="),
            json!(test_user.username),
        )];
        let f_users = find_all(&filters)?;
        assert!(f_users.is_empty());
        Ok(())
    }
}

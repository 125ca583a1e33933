//! Payout method logic module

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

fn validate_withdraw(w: &Json<Withdraw>) -> bool {
    info!("validating withdraw: {}", &w.wid);
    w.r#type.len() < utils::string_limit() && w.details.len() < utils::string_limit()
}

/// Create a new payout method
pub fn create(w: Json<Withdraw>) -> Result<Withdraw, VetrinaError> {
    info!("creating withdraw");
    if !validate_withdraw(&w) {
        error!("invalid withdraw");
        return Err(VetrinaError::Invalid);
    }
    let ts = chrono::offset::Utc::now().timestamp();
    let wid: String = format!("{}{}", crate::WITHDRAW_DB_KEY, utils::generate_rnd());
    let new_withdraw = Withdraw {
        wid: String::from(&wid),
        user_id: String::from(&w.user_id),
        r#type: String::from(&w.r#type),
        details: String::from(&w.details),
        is_default: w.is_default,
        created: ts,
        archived: false,
    };
    debug!("insert withdraw: {:?}", &new_withdraw);
    let db = &DATABASE_LOCK;
    let k = &new_withdraw.wid;
    let v = bincode::serialize(&new_withdraw).unwrap_or_default();
    db::write_chunks(&db.env, &db.handle, k.as_bytes(), &v)
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    // in order to retrieve all withdraws, write keys to the index
    let list_key = crate::WITHDRAW_LIST_DB_KEY;
    {
        let _lock = INDEX_LOCK
            .lock()
            .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
        let r = db::DatabaseEnvironment::read(&db.env, &db.handle, &list_key.as_bytes().to_vec())
            .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
        if r.is_empty() {
            debug!("creating withdraw index");
        }
        let old: String = bincode::deserialize(&r[..]).unwrap_or_default();
        let withdraw_list = [old, String::from(&wid)].join(",");
        let s_withdraw_list = bincode::serialize(&withdraw_list).unwrap_or_default();
        debug!("writing withdraw index {} for id: {}", withdraw_list, list_key);
        db::write_chunks(&db.env, &db.handle, list_key.as_bytes(), &s_withdraw_list)
            .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    }
    if new_withdraw.is_default {
        sweep_default(&new_withdraw.user_id, &new_withdraw.wid)?;
    }
    Ok(new_withdraw)
}

/// Lookup withdraw
pub fn find(wid: &String) -> Result<Withdraw, VetrinaError> {
    info!("find withdraw: {}", &wid);
    let db = &DATABASE_LOCK;
    let r = db::DatabaseEnvironment::read(&db.env, &db.handle, &wid.as_bytes().to_vec())
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    if r.is_empty() {
        error!("withdraw not found");
        return Err(VetrinaError::Database(MdbError::NotFound));
    }
    let result: Withdraw = bincode::deserialize(&r[..]).unwrap_or_default();
    if result.archived {
        return Err(VetrinaError::Database(MdbError::NotFound));
    }
    Ok(result)
}

/// Lookup all withdraws matching the filters
pub fn find_all(filters: &[filter::Filter]) -> Result<Vec<Withdraw>, VetrinaError> {
    let db = &DATABASE_LOCK;
    let i_list_key = crate::WITHDRAW_LIST_DB_KEY;
    let i_r = db::DatabaseEnvironment::read(&db.env, &db.handle, &i_list_key.as_bytes().to_vec())
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    if i_r.is_empty() {
        error!("withdraw index not found");
    }
    let de: String = bincode::deserialize(&i_r[..]).unwrap_or_default();
    let i_v_wid = de.split(",");
    let i_v: Vec<String> = i_v_wid.map(String::from).collect();
    let mut withdraws: Vec<Withdraw> = Vec::new();
    for w in i_v {
        let withdraw: Withdraw = find(&w).unwrap_or_default();
        if !withdraw.wid.is_empty() {
            withdraws.push(withdraw);
        }
    }
    Ok(filter::retain_matching(withdraws, filters))
}

/// Modify withdraw
pub fn modify(w: Json<Withdraw>) -> Result<Withdraw, VetrinaError> {
    info!("modify withdraw: {}", &w.wid);
    if !validate_withdraw(&w) {
        error!("invalid withdraw");
        return Err(VetrinaError::Invalid);
    }
    let f_withdraw: Withdraw = find(&w.wid)?;
    let db = &DATABASE_LOCK;
    let u_withdraw = Withdraw::update(f_withdraw, &w);
    db::DatabaseEnvironment::delete(&db.env, &db.handle, u_withdraw.wid.as_bytes())
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    let v = bincode::serialize(&u_withdraw).unwrap_or_default();
    db::write_chunks(&db.env, &db.handle, u_withdraw.wid.as_bytes(), &v)
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    if u_withdraw.is_default {
        sweep_default(&u_withdraw.user_id, &u_withdraw.wid)?;
    }
    Ok(u_withdraw)
}

/// Flag a withdraw as archived
pub fn remove(wid: &String) -> Result<(), VetrinaError> {
    info!("remove withdraw: {}", &wid);
    let mut f_withdraw: Withdraw = find(wid)?;
    f_withdraw.archived = true;
    let db = &DATABASE_LOCK;
    db::DatabaseEnvironment::delete(&db.env, &db.handle, f_withdraw.wid.as_bytes())
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    let v = bincode::serialize(&f_withdraw).unwrap_or_default();
    db::write_chunks(&db.env, &db.handle, f_withdraw.wid.as_bytes(), &v)
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    Ok(())
}

/// Clear the default flag on the user's other payout methods so that
///
/// at most one withdraw per user stays default.
pub fn sweep_default(user_id: &String, keep_wid: &String) -> Result<(), VetrinaError> {
    info!("sweeping default withdraws for user: {}", user_id);
    let withdraws = find_all(&Vec::new())?;
    let db = &DATABASE_LOCK;
    for mut withdraw in withdraws {
        let other = withdraw.user_id == *user_id && withdraw.wid != *keep_wid;
        if other && withdraw.is_default {
            withdraw.is_default = false;
            db::DatabaseEnvironment::delete(&db.env, &db.handle, withdraw.wid.as_bytes())
                .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
            let v = bincode::serialize(&withdraw).unwrap_or_default();
            db::write_chunks(&db.env, &db.handle, withdraw.wid.as_bytes(), &v)
                .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
        }
    }
    Ok(())
}

// Tests
//-------------------------------------------------------------------------------

#[cfg(test)]
mod tests {

    use super::*;
    use serde_json::json;

    #[test]
    fn create_test() -> Result<(), VetrinaError> {
        let user_id = format!("u{}", utils::generate_rnd());
        let j_withdraw = Json(Withdraw {
            user_id: String::from(&user_id),
            r#type: String::from("bank"),
            details: String::from("FR76 1234"),
            ..Default::default()
        });
        let test_withdraw = create(j_withdraw)?;
        let f_withdraw = find(&test_withdraw.wid)?;
        assert_eq!(f_withdraw.r#type, "bank");
        assert!(!f_withdraw.is_default);
        remove(&test_withdraw.wid)?;
        Ok(())
    }

    #[test]
    fn single_default_test() -> Result<(), VetrinaError> {
        let user_id = format!("u{}", utils::generate_rnd());
        let j_first = Json(Withdraw {
            user_id: String::from(&user_id),
            r#type: String::from("bank"),
            details: String::from("FR76 1234"),
            is_default: true,
            ..Default::default()
        });
        let first = create(j_first)?;
        let j_second = Json(Withdraw {
            user_id: String::from(&user_id),
            r#type: String::from("paypal"),
            details: String::from("user@vetrina.io"),
            is_default: true,
            ..Default::default()
        });
        let second = create(j_second)?;
        let f_first = find(&first.wid)?;
        let f_second = find(&second.wid)?;
        assert!(!f_first.is_default);
        assert!(f_second.is_default);
        let filters = vec![
            (String::from("userId"), String::from("=="), json!(user_id)),
            (String::from("isDefault"), String::from("=="), json!(true)),
        ];
        let defaults = find_all(&filters)?;
        assert_eq!(defaults.len(), 1);
        remove(&first.wid)?;
        remove(&second.wid)?;
        Ok(())
    }

    #[test]
    fn modify_sweeps_default_test() -> Result<(), VetrinaError> {
        let user_id = format!("u{}", utils::generate_rnd());
        let j_first = Json(Withdraw {
            user_id: String::from(&user_id),
            r#type: String::from("bank"),
            details: String::from("FR76 1234"),
            is_default: true,
            ..Default::default()
        });
        let first = create(j_first)?;
        let j_second = Json(Withdraw {
            user_id: String::from(&user_id),
            r#type: String::from("paypal"),
            details: String::from("user@vetrina.io"),
            ..Default::default()
        });
        let second = create(j_second)?;
        let edit = Json(Withdraw {
            wid: String::from(&second.wid),
            user_id: String::from(&user_id),
            r#type: String::from("paypal"),
            details: String::from("user@vetrina.io"),
            is_default: true,
            ..Default::default()
        });
        modify(edit)?;
        let f_first = find(&first.wid)?;
        let f_second = find(&second.wid)?;
        assert!(!f_first.is_default);
        assert!(f_second.is_default);
        remove(&first.wid)?;
        remove(&second.wid)?;
        Ok(())
    }
}

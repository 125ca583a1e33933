//! Stored payment method logic module

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

fn validate_payment_method(p: &Json<PaymentMethod>) -> bool {
    info!("validating payment method: {}", &p.pmid);
    p.provider.len() < utils::string_limit() && p.reference.len() < utils::string_limit()
}

/// Create a new payment method
pub fn create(p: Json<PaymentMethod>) -> Result<PaymentMethod, VetrinaError> {
    info!("creating payment method");
    if !validate_payment_method(&p) {
        error!("invalid payment method");
        return Err(VetrinaError::Invalid);
    }
    let ts = chrono::offset::Utc::now().timestamp();
    let pmid: String = format!("{}{}", crate::PAYMENT_METHOD_DB_KEY, utils::generate_rnd());
    let new_method = PaymentMethod {
        pmid: String::from(&pmid),
        user_id: String::from(&p.user_id),
        provider: String::from(&p.provider),
        reference: String::from(&p.reference),
        is_default: p.is_default,
        created: ts,
        archived: false,
    };
    debug!("insert payment method: {:?}", &new_method);
    let db = &DATABASE_LOCK;
    let k = &new_method.pmid;
    let v = bincode::serialize(&new_method).unwrap_or_default();
    db::write_chunks(&db.env, &db.handle, k.as_bytes(), &v)
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    // in order to retrieve all payment methods, write keys to the index
    let list_key = crate::PAYMENT_METHOD_LIST_DB_KEY;
    let _lock = INDEX_LOCK
        .lock()
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    let r = db::DatabaseEnvironment::read(&db.env, &db.handle, &list_key.as_bytes().to_vec())
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    if r.is_empty() {
        debug!("creating payment method index");
    }
    let old: String = bincode::deserialize(&r[..]).unwrap_or_default();
    let method_list = [old, String::from(&pmid)].join(",");
    let s_method_list = bincode::serialize(&method_list).unwrap_or_default();
    debug!("writing payment method index {} for id: {}", method_list, list_key);
    db::write_chunks(&db.env, &db.handle, list_key.as_bytes(), &s_method_list)
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    Ok(new_method)
}

/// Lookup payment method
pub fn find(pmid: &String) -> Result<PaymentMethod, VetrinaError> {
    info!("find payment method: {}", &pmid);
    let db = &DATABASE_LOCK;
    let r = db::DatabaseEnvironment::read(&db.env, &db.handle, &pmid.as_bytes().to_vec())
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    if r.is_empty() {
        error!("payment method not found");
        return Err(VetrinaError::Database(MdbError::NotFound));
    }
    let result: PaymentMethod = bincode::deserialize(&r[..]).unwrap_or_default();
    if result.archived {
        return Err(VetrinaError::Database(MdbError::NotFound));
    }
    Ok(result)
}

/// Lookup all payment methods matching the filters
pub fn find_all(filters: &[filter::Filter]) -> Result<Vec<PaymentMethod>, VetrinaError> {
    let db = &DATABASE_LOCK;
    let i_list_key = crate::PAYMENT_METHOD_LIST_DB_KEY;
    let i_r = db::DatabaseEnvironment::read(&db.env, &db.handle, &i_list_key.as_bytes().to_vec())
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    if i_r.is_empty() {
        error!("payment method index not found");
    }
    let de: String = bincode::deserialize(&i_r[..]).unwrap_or_default();
    let i_v_pmid = de.split(",");
    let i_v: Vec<String> = i_v_pmid.map(String::from).collect();
    let mut methods: Vec<PaymentMethod> = Vec::new();
    for p in i_v {
        let method: PaymentMethod = find(&p).unwrap_or_default();
        if !method.pmid.is_empty() {
            methods.push(method);
        }
    }
    Ok(filter::retain_matching(methods, filters))
}

/// Modify payment method
pub fn modify(p: Json<PaymentMethod>) -> Result<PaymentMethod, VetrinaError> {
    info!("modify payment method: {}", &p.pmid);
    if !validate_payment_method(&p) {
        error!("invalid payment method");
        return Err(VetrinaError::Invalid);
    }
    let f_method: PaymentMethod = find(&p.pmid)?;
    let db = &DATABASE_LOCK;
    let u_method = PaymentMethod::update(f_method, &p);
    db::DatabaseEnvironment::delete(&db.env, &db.handle, u_method.pmid.as_bytes())
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    let v = bincode::serialize(&u_method).unwrap_or_default();
    db::write_chunks(&db.env, &db.handle, u_method.pmid.as_bytes(), &v)
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    Ok(u_method)
}

/// Flag a payment method as archived
pub fn remove(pmid: &String) -> Result<(), VetrinaError> {
    info!("remove payment method: {}", &pmid);
    let mut f_method: PaymentMethod = find(pmid)?;
    f_method.archived = true;
    let db = &DATABASE_LOCK;
    db::DatabaseEnvironment::delete(&db.env, &db.handle, f_method.pmid.as_bytes())
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    let v = bincode::serialize(&f_method).unwrap_or_default();
    db::write_chunks(&db.env, &db.handle, f_method.pmid.as_bytes(), &v)
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
    fn create_test() -> Result<(), VetrinaError> {
        let user_id = format!("u{}", utils::generate_rnd());
        let j_method = Json(PaymentMethod {
            user_id: String::from(&user_id),
            provider: String::from("stripe"),
            reference: String::from("pm_123"),
            ..Default::default()
        });
        let test_method = create(j_method)?;
        let f_method = find(&test_method.pmid)?;
        assert_eq!(f_method.provider, "stripe");
        remove(&test_method.pmid)?;
        Ok(())
    }

    #[test]
    fn find_all_test() -> Result<(), VetrinaError> {
        let user_id = format!("u{}", utils::generate_rnd());
        let j_method = Json(PaymentMethod {
            user_id: String::from(&user_id),
            provider: String::from("paypal"),
            reference: String::from("pp_456"),
            is_default: true,
            ..Default::default()
        });
        let test_method = create(j_method)?;
        let filters = vec![(String::from("userId"), String::from("=="), json!(user_id))];
        let f_methods = find_all(&filters)?;
        assert_eq!(f_methods.len(), 1);
        assert!(f_methods[0].is_default);
        remove(&test_method.pmid)?;
        Ok(())
    }

    #[test]
    fn remove_archives_test() -> Result<(), VetrinaError> {
        let j_method = Json(PaymentMethod {
            user_id: format!("u{}", utils::generate_rnd()),
            provider: String::from("stripe"),
            reference: String::from("pm_789"),
            ..Default::default()
        });
        let test_method = create(j_method)?;
        remove(&test_method.pmid)?;
        assert!(find(&test_method.pmid).is_err());
        Ok(())
    }
}

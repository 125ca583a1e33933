//! Billing profile logic module

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

fn validate_billing(b: &Json<BillingProfile>) -> bool {
    info!("validating billing profile: {}", &b.bid);
    b.company.len() < utils::string_limit()
        && b.address.len() < utils::string_limit()
        && b.city.len() < utils::string_limit()
        && b.country.len() < utils::string_limit()
        && b.tax_id.len() < utils::string_limit()
}

/// Create a new billing profile
pub fn create(b: Json<BillingProfile>) -> Result<BillingProfile, VetrinaError> {
    info!("creating billing profile");
    if !validate_billing(&b) {
        error!("invalid billing profile");
        return Err(VetrinaError::Invalid);
    }
    let ts = chrono::offset::Utc::now().timestamp();
    let bid: String = format!("{}{}", crate::BILLING_DB_KEY, utils::generate_rnd());
    let new_billing = BillingProfile {
        bid: String::from(&bid),
        user_id: String::from(&b.user_id),
        company: String::from(&b.company),
        address: String::from(&b.address),
        city: String::from(&b.city),
        country: String::from(&b.country),
        tax_id: String::from(&b.tax_id),
        created: ts,
        archived: false,
    };
    debug!("insert billing profile: {:?}", &new_billing);
    let db = &DATABASE_LOCK;
    let k = &new_billing.bid;
    let v = bincode::serialize(&new_billing).unwrap_or_default();
    db::write_chunks(&db.env, &db.handle, k.as_bytes(), &v)
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    // in order to retrieve all billing profiles, write keys to the index
    let list_key = crate::BILLING_LIST_DB_KEY;
    let _lock = INDEX_LOCK
        .lock()
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    let r = db::DatabaseEnvironment::read(&db.env, &db.handle, &list_key.as_bytes().to_vec())
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    if r.is_empty() {
        debug!("creating billing index");
    }
    let old: String = bincode::deserialize(&r[..]).unwrap_or_default();
    let billing_list = [old, String::from(&bid)].join(",");
    let s_billing_list = bincode::serialize(&billing_list).unwrap_or_default();
    debug!("writing billing index {} for id: {}", billing_list, list_key);
    db::write_chunks(&db.env, &db.handle, list_key.as_bytes(), &s_billing_list)
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    Ok(new_billing)
}

/// Lookup billing profile
pub fn find(bid: &String) -> Result<BillingProfile, VetrinaError> {
    info!("find billing profile: {}", &bid);
    let db = &DATABASE_LOCK;
    let r = db::DatabaseEnvironment::read(&db.env, &db.handle, &bid.as_bytes().to_vec())
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    if r.is_empty() {
        error!("billing profile not found");
        return Err(VetrinaError::Database(MdbError::NotFound));
    }
    let result: BillingProfile = bincode::deserialize(&r[..]).unwrap_or_default();
    if result.archived {
        return Err(VetrinaError::Database(MdbError::NotFound));
    }
    Ok(result)
}

/// Lookup all billing profiles matching the filters
pub fn find_all(filters: &[filter::Filter]) -> Result<Vec<BillingProfile>, VetrinaError> {
    let db = &DATABASE_LOCK;
    let i_list_key = crate::BILLING_LIST_DB_KEY;
    let i_r = db::DatabaseEnvironment::read(&db.env, &db.handle, &i_list_key.as_bytes().to_vec())
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    if i_r.is_empty() {
        error!("billing index not found");
    }
    let de: String = bincode::deserialize(&i_r[..]).unwrap_or_default();
    let i_v_bid = de.split(",");
    let i_v: Vec<String> = i_v_bid.map(String::from).collect();
    let mut profiles: Vec<BillingProfile> = Vec::new();
    for b in i_v {
        let profile: BillingProfile = find(&b).unwrap_or_default();
        if !profile.bid.is_empty() {
            profiles.push(profile);
        }
    }
    Ok(filter::retain_matching(profiles, filters))
}

/// Modify billing profile
pub fn modify(b: Json<BillingProfile>) -> Result<BillingProfile, VetrinaError> {
    info!("modify billing profile: {}", &b.bid);
    if !validate_billing(&b) {
        error!("invalid billing profile");
        return Err(VetrinaError::Invalid);
    }
    let f_billing: BillingProfile = find(&b.bid)?;
    let db = &DATABASE_LOCK;
    let u_billing = BillingProfile::update(f_billing, &b);
    db::DatabaseEnvironment::delete(&db.env, &db.handle, u_billing.bid.as_bytes())
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    let v = bincode::serialize(&u_billing).unwrap_or_default();
    db::write_chunks(&db.env, &db.handle, u_billing.bid.as_bytes(), &v)
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    Ok(u_billing)
}

/// Flag a billing profile as archived
pub fn remove(bid: &String) -> Result<(), VetrinaError> {
    info!("remove billing profile: {}", &bid);
    let mut f_billing: BillingProfile = find(bid)?;
    f_billing.archived = true;
    let db = &DATABASE_LOCK;
    db::DatabaseEnvironment::delete(&db.env, &db.handle, f_billing.bid.as_bytes())
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    let v = bincode::serialize(&f_billing).unwrap_or_default();
    db::write_chunks(&db.env, &db.handle, f_billing.bid.as_bytes(), &v)
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
        let j_billing = Json(BillingProfile {
            user_id: String::from(&user_id),
            company: String::from("Acme SARL"),
            address: String::from("1 rue de la Paix"),
            city: String::from("Paris"),
            country: String::from("FR"),
            tax_id: String::from("FR123456789"),
            ..Default::default()
        });
        let test_billing = create(j_billing)?;
        let f_billing = find(&test_billing.bid)?;
        assert_eq!(f_billing.company, "Acme SARL");
        assert_eq!(f_billing.country, "FR");
        remove(&test_billing.bid)?;
        Ok(())
    }

    #[test]
    fn find_all_test() -> Result<(), VetrinaError> {
        let user_id = format!("u{}", utils::generate_rnd());
        let j_billing = Json(BillingProfile {
            user_id: String::from(&user_id),
            company: String::from("Umbrella LLC"),
            country: String::from("US"),
            ..Default::default()
        });
        let test_billing = create(j_billing)?;
        let filters = vec![(String::from("userId"), String::from("=="), json!(user_id))];
        let f_billings = find_all(&filters)?;
        assert_eq!(f_billings.len(), 1);
        assert_eq!(f_billings[0].company, "Umbrella LLC");
        remove(&test_billing.bid)?;
        Ok(())
    }

    #[test]
    fn modify_test() -> Result<(), VetrinaError> {
        let user_id = format!("u{}", utils::generate_rnd());
        let j_billing = Json(BillingProfile {
            user_id: String::from(&user_id),
            company: String::from("Old Name"),
            ..Default::default()
        });
        let test_billing = create(j_billing)?;
        let edit = Json(BillingProfile {
            bid: String::from(&test_billing.bid),
            user_id: String::from(&user_id),
            company: String::from("New Name"),
            address: String::from("2 avenue Foch"),
            ..Default::default()
        });
        let u_billing = modify(edit)?;
        assert_eq!(u_billing.company, "New Name");
        assert_eq!(u_billing.created, test_billing.created);
        remove(&test_billing.bid)?;
        Ok(())
    }
}

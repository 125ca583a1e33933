//! Payment record logic module

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

pub enum StatusType {
    Pending,
    Completed,
    Failed,
}

impl StatusType {
    pub fn value(&self) -> String {
        match *self {
            StatusType::Pending => String::from("pending"),
            StatusType::Completed => String::from("completed"),
            StatusType::Failed => String::from("failed"),
        }
    }
}

fn validate_payment(p: &Json<Payment>) -> bool {
    info!("validating payment: {}", &p.pid);
    p.method.len() < utils::string_limit() && p.reference.len() < utils::string_limit()
}

/// Create a new payment record
pub fn create(p: Json<Payment>) -> Result<Payment, VetrinaError> {
    info!("creating payment");
    if !validate_payment(&p) {
        error!("invalid payment");
        return Err(VetrinaError::Invalid);
    }
    let ts = chrono::offset::Utc::now().timestamp();
    let pid: String = format!("{}{}", crate::PAYMENT_DB_KEY, utils::generate_rnd());
    let status = if p.status.is_empty() {
        StatusType::Pending.value()
    } else {
        String::from(&p.status)
    };
    let new_payment = Payment {
        pid: String::from(&pid),
        user_id: String::from(&p.user_id),
        amount: p.amount,
        method: String::from(&p.method),
        status,
        reference: String::from(&p.reference),
        created: ts,
        archived: false,
    };
    debug!("insert payment: {:?}", &new_payment);
    let db = &DATABASE_LOCK;
    let k = &new_payment.pid;
    let v = bincode::serialize(&new_payment).unwrap_or_default();
    db::write_chunks(&db.env, &db.handle, k.as_bytes(), &v)
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    // in order to retrieve all payments, write keys to the index
    let list_key = crate::PAYMENT_LIST_DB_KEY;
    let _lock = INDEX_LOCK
        .lock()
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    let r = db::DatabaseEnvironment::read(&db.env, &db.handle, &list_key.as_bytes().to_vec())
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    if r.is_empty() {
        debug!("creating payment index");
    }
    let old: String = bincode::deserialize(&r[..]).unwrap_or_default();
    let payment_list = [old, String::from(&pid)].join(",");
    let s_payment_list = bincode::serialize(&payment_list).unwrap_or_default();
    debug!("writing payment index {} for id: {}", payment_list, list_key);
    db::write_chunks(&db.env, &db.handle, list_key.as_bytes(), &s_payment_list)
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    Ok(new_payment)
}

/// Lookup payment
pub fn find(pid: &String) -> Result<Payment, VetrinaError> {
    info!("find payment: {}", &pid);
    let db = &DATABASE_LOCK;
    let r = db::DatabaseEnvironment::read(&db.env, &db.handle, &pid.as_bytes().to_vec())
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    if r.is_empty() {
        error!("payment not found");
        return Err(VetrinaError::Database(MdbError::NotFound));
    }
    let result: Payment = bincode::deserialize(&r[..]).unwrap_or_default();
    if result.archived {
        return Err(VetrinaError::Database(MdbError::NotFound));
    }
    Ok(result)
}

/// Lookup all payments matching the filters
pub fn find_all(filters: &[filter::Filter]) -> Result<Vec<Payment>, VetrinaError> {
    let db = &DATABASE_LOCK;
    let i_list_key = crate::PAYMENT_LIST_DB_KEY;
    let i_r = db::DatabaseEnvironment::read(&db.env, &db.handle, &i_list_key.as_bytes().to_vec())
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    if i_r.is_empty() {
        error!("payment index not found");
    }
    let de: String = bincode::deserialize(&i_r[..]).unwrap_or_default();
    let i_v_pid = de.split(",");
    let i_v: Vec<String> = i_v_pid.map(String::from).collect();
    let mut payments: Vec<Payment> = Vec::new();
    for p in i_v {
        let payment: Payment = find(&p).unwrap_or_default();
        if !payment.pid.is_empty() {
            payments.push(payment);
        }
    }
    Ok(filter::retain_matching(payments, filters))
}

/// Modify payment
pub fn modify(p: Json<Payment>) -> Result<Payment, VetrinaError> {
    info!("modify payment: {}", &p.pid);
    if !validate_payment(&p) {
        error!("invalid payment");
        return Err(VetrinaError::Invalid);
    }
    let f_payment: Payment = find(&p.pid)?;
    let db = &DATABASE_LOCK;
    let u_payment = Payment::update(f_payment, &p);
    db::DatabaseEnvironment::delete(&db.env, &db.handle, u_payment.pid.as_bytes())
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    let v = bincode::serialize(&u_payment).unwrap_or_default();
    db::write_chunks(&db.env, &db.handle, u_payment.pid.as_bytes(), &v)
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    Ok(u_payment)
}

/// Flag a payment as archived
pub fn remove(pid: &String) -> Result<(), VetrinaError> {
    info!("remove payment: {}", &pid);
    let mut f_payment: Payment = find(pid)?;
    f_payment.archived = true;
    let db = &DATABASE_LOCK;
    db::DatabaseEnvironment::delete(&db.env, &db.handle, f_payment.pid.as_bytes())
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    let v = bincode::serialize(&f_payment).unwrap_or_default();
    db::write_chunks(&db.env, &db.handle, f_payment.pid.as_bytes(), &v)
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
        let j_payment = Json(Payment {
            user_id: String::from(&user_id),
            amount: 5000,
            method: String::from("card"),
            reference: String::from("ch_123"),
            ..Default::default()
        });
        let test_payment = create(j_payment)?;
        assert_eq!(test_payment.status, StatusType::Pending.value());
        let f_payment = find(&test_payment.pid)?;
        assert_eq!(f_payment.amount, 5000);
        remove(&test_payment.pid)?;
        Ok(())
    }

    #[test]
    fn find_all_amount_filter_test() -> Result<(), VetrinaError> {
        let user_id = format!("u{}", utils::generate_rnd());
        let j_low = Json(Payment {
            user_id: String::from(&user_id),
            amount: 100,
            method: String::from("card"),
            ..Default::default()
        });
        let j_high = Json(Payment {
            user_id: String::from(&user_id),
            amount: 9000,
            method: String::from("card"),
            ..Default::default()
        });
        let low = create(j_low)?;
        let high = create(j_high)?;
        let filters = vec![
            (String::from("userId"), String::from("=="), json!(user_id)),
            (String::from("amount"), String::from(">"), json!(1000)),
        ];
        let f_payments = find_all(&filters)?;
        assert_eq!(f_payments.len(), 1);
        assert_eq!(f_payments[0].pid, high.pid);
        remove(&low.pid)?;
        remove(&high.pid)?;
        Ok(())
    }

    #[test]
    fn modify_test() -> Result<(), VetrinaError> {
        let j_payment = Json(Payment {
            user_id: format!("u{}", utils::generate_rnd()),
            amount: 2500,
            method: String::from("card"),
            status: StatusType::Pending.value(),
            ..Default::default()
        });
        let test_payment = create(j_payment)?;
        let edit = Json(Payment {
            pid: String::from(&test_payment.pid),
            user_id: String::from(&test_payment.user_id),
            amount: 2500,
            method: String::from("card"),
            status: StatusType::Completed.value(),
            reference: String::from("ch_456"),
            ..Default::default()
        });
        let u_payment = modify(edit)?;
        assert_eq!(u_payment.status, "completed");
        assert_eq!(u_payment.pid, test_payment.pid);
        remove(&test_payment.pid)?;
        Ok(())
    }
}

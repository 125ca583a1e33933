//! Invoice logic module

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

fn validate_invoice(i: &Json<Invoice>) -> bool {
    info!("validating invoice: {}", &i.ivid);
    i.payment_method.len() < utils::string_limit()
}

/// Create a new invoice. The invoice date defaults to now when the
///
/// request omits it.
pub fn create(i: Json<Invoice>) -> Result<Invoice, VetrinaError> {
    info!("creating invoice");
    if !validate_invoice(&i) {
        error!("invalid invoice");
        return Err(VetrinaError::Invalid);
    }
    let ivid: String = format!("{}{}", crate::INVOICE_DB_KEY, utils::generate_rnd());
    let date = if i.date == 0 {
        chrono::offset::Utc::now().timestamp()
    } else {
        i.date
    };
    let new_invoice = Invoice {
        ivid: String::from(&ivid),
        user_id: String::from(&i.user_id),
        date,
        amount: i.amount,
        tva: i.tva,
        payment_method: String::from(&i.payment_method),
        archived: false,
    };
    debug!("insert invoice: {:?}", &new_invoice);
    let db = &DATABASE_LOCK;
    let k = &new_invoice.ivid;
    let v = bincode::serialize(&new_invoice).unwrap_or_default();
    db::write_chunks(&db.env, &db.handle, k.as_bytes(), &v)
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    // in order to retrieve all invoices, write keys to the index
    let list_key = crate::INVOICE_LIST_DB_KEY;
    let _lock = INDEX_LOCK
        .lock()
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    let r = db::DatabaseEnvironment::read(&db.env, &db.handle, &list_key.as_bytes().to_vec())
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    if r.is_empty() {
        debug!("creating invoice index");
    }
    let old: String = bincode::deserialize(&r[..]).unwrap_or_default();
    let invoice_list = [old, String::from(&ivid)].join(",");
    let s_invoice_list = bincode::serialize(&invoice_list).unwrap_or_default();
    debug!("writing invoice index {} for id: {}", invoice_list, list_key);
    db::write_chunks(&db.env, &db.handle, list_key.as_bytes(), &s_invoice_list)
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    Ok(new_invoice)
}

/// Lookup invoice
pub fn find(ivid: &String) -> Result<Invoice, VetrinaError> {
    info!("find invoice: {}", &ivid);
    let db = &DATABASE_LOCK;
    let r = db::DatabaseEnvironment::read(&db.env, &db.handle, &ivid.as_bytes().to_vec())
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    if r.is_empty() {
        error!("invoice not found");
        return Err(VetrinaError::Database(MdbError::NotFound));
    }
    let result: Invoice = bincode::deserialize(&r[..]).unwrap_or_default();
    if result.archived {
        return Err(VetrinaError::Database(MdbError::NotFound));
    }
    Ok(result)
}

/// Lookup all invoices matching the filters
pub fn find_all(filters: &[filter::Filter]) -> Result<Vec<Invoice>, VetrinaError> {
    let db = &DATABASE_LOCK;
    let i_list_key = crate::INVOICE_LIST_DB_KEY;
    let i_r = db::DatabaseEnvironment::read(&db.env, &db.handle, &i_list_key.as_bytes().to_vec())
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    if i_r.is_empty() {
        error!("invoice index not found");
    }
    let de: String = bincode::deserialize(&i_r[..]).unwrap_or_default();
    let i_v_ivid = de.split(",");
    let i_v: Vec<String> = i_v_ivid.map(String::from).collect();
    let mut invoices: Vec<Invoice> = Vec::new();
    for i in i_v {
        let invoice: Invoice = find(&i).unwrap_or_default();
        if !invoice.ivid.is_empty() {
            invoices.push(invoice);
        }
    }
    Ok(filter::retain_matching(invoices, filters))
}

/// Modify invoice
pub fn modify(i: Json<Invoice>) -> Result<Invoice, VetrinaError> {
    info!("modify invoice: {}", &i.ivid);
    if !validate_invoice(&i) {
        error!("invalid invoice");
        return Err(VetrinaError::Invalid);
    }
    let f_invoice: Invoice = find(&i.ivid)?;
    let db = &DATABASE_LOCK;
    let u_invoice = Invoice::update(f_invoice, &i);
    db::DatabaseEnvironment::delete(&db.env, &db.handle, u_invoice.ivid.as_bytes())
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    let v = bincode::serialize(&u_invoice).unwrap_or_default();
    db::write_chunks(&db.env, &db.handle, u_invoice.ivid.as_bytes(), &v)
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    Ok(u_invoice)
}

/// Flag an invoice as archived
pub fn remove(ivid: &String) -> Result<(), VetrinaError> {
    info!("remove invoice: {}", &ivid);
    let mut f_invoice: Invoice = find(ivid)?;
    f_invoice.archived = true;
    let db = &DATABASE_LOCK;
    db::DatabaseEnvironment::delete(&db.env, &db.handle, f_invoice.ivid.as_bytes())
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    let v = bincode::serialize(&f_invoice).unwrap_or_default();
    db::write_chunks(&db.env, &db.handle, f_invoice.ivid.as_bytes(), &v)
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
    fn create_stamps_date_test() -> Result<(), VetrinaError> {
        let j_invoice = Json(Invoice {
            user_id: format!("u{}", utils::generate_rnd()),
            amount: 120000,
            tva: 20,
            payment_method: String::from("card"),
            ..Default::default()
        });
        let test_invoice = create(j_invoice)?;
        assert!(test_invoice.date > 0);
        let f_invoice = find(&test_invoice.ivid)?;
        assert_eq!(f_invoice.tva, 20);
        remove(&test_invoice.ivid)?;
        Ok(())
    }

    #[test]
    fn find_all_test() -> Result<(), VetrinaError> {
        let user_id = format!("u{}", utils::generate_rnd());
        let j_invoice = Json(Invoice {
            user_id: String::from(&user_id),
            date: 1700000000,
            amount: 45000,
            tva: 20,
            payment_method: String::from("transfer"),
            ..Default::default()
        });
        let test_invoice = create(j_invoice)?;
        let filters = vec![(String::from("userId"), String::from("=="), json!(user_id))];
        let f_invoices = find_all(&filters)?;
        assert_eq!(f_invoices.len(), 1);
        assert_eq!(f_invoices[0].date, 1700000000);
        remove(&test_invoice.ivid)?;
        Ok(())
    }

    #[test]
    fn modify_test() -> Result<(), VetrinaError> {
        let j_invoice = Json(Invoice {
            user_id: format!("u{}", utils::generate_rnd()),
            amount: 10000,
            tva: 10,
            payment_method: String::from("card"),
            ..Default::default()
        });
        let test_invoice = create(j_invoice)?;
        let edit = Json(Invoice {
            ivid: String::from(&test_invoice.ivid),
            user_id: String::from(&test_invoice.user_id),
            date: test_invoice.date,
            amount: 15000,
            tva: 20,
            payment_method: String::from("card"),
            ..Default::default()
        });
        let u_invoice = modify(edit)?;
        assert_eq!(u_invoice.amount, 15000);
        assert_eq!(u_invoice.ivid, test_invoice.ivid);
        remove(&test_invoice.ivid)?;
        Ok(())
    }
}

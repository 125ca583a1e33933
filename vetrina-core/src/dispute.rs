//! Order dispute logic module

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
    Open,
    Resolved,
    Closed,
}

impl StatusType {
    pub fn value(&self) -> String {
        match *self {
            StatusType::Open => String::from("open"),
            StatusType::Resolved => String::from("resolved"),
            StatusType::Closed => String::from("closed"),
        }
    }
}

fn validate_dispute(d: &Json<Dispute>) -> bool {
    info!("validating dispute: {}", &d.did);
    d.order_number.len() < utils::string_limit()
        && d.messages.len() < utils::thread_limit()
        && d.messages.iter().all(|m| m.body.len() < utils::message_limit())
}

/// Create a new dispute
pub fn create(d: Json<Dispute>) -> Result<Dispute, VetrinaError> {
    info!("creating dispute");
    if !validate_dispute(&d) {
        error!("invalid dispute");
        return Err(VetrinaError::Invalid);
    }
    let ts = chrono::offset::Utc::now().timestamp();
    let did: String = format!("{}{}", crate::DISPUTE_DB_KEY, utils::generate_rnd());
    let status = if d.status.is_empty() {
        StatusType::Open.value()
    } else {
        String::from(&d.status)
    };
    let new_dispute = Dispute {
        did: String::from(&did),
        user_id: String::from(&d.user_id),
        order_number: String::from(&d.order_number),
        status,
        messages: d.messages.to_vec(),
        created: ts,
        archived: false,
    };
    debug!("insert dispute: {:?}", &new_dispute);
    let db = &DATABASE_LOCK;
    let k = &new_dispute.did;
    let v = bincode::serialize(&new_dispute).unwrap_or_default();
    db::write_chunks(&db.env, &db.handle, k.as_bytes(), &v)
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    // in order to retrieve all disputes, write keys to the index
    let list_key = crate::DISPUTE_LIST_DB_KEY;
    let _lock = INDEX_LOCK
        .lock()
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    let r = db::DatabaseEnvironment::read(&db.env, &db.handle, &list_key.as_bytes().to_vec())
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    if r.is_empty() {
        debug!("creating dispute index");
    }
    let old: String = bincode::deserialize(&r[..]).unwrap_or_default();
    let dispute_list = [old, String::from(&did)].join(",");
    let s_dispute_list = bincode::serialize(&dispute_list).unwrap_or_default();
    debug!("writing dispute index {} for id: {}", dispute_list, list_key);
    db::write_chunks(&db.env, &db.handle, list_key.as_bytes(), &s_dispute_list)
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    Ok(new_dispute)
}

/// Lookup dispute
pub fn find(did: &String) -> Result<Dispute, VetrinaError> {
    info!("find dispute: {}", &did);
    let db = &DATABASE_LOCK;
    let r = db::DatabaseEnvironment::read(&db.env, &db.handle, &did.as_bytes().to_vec())
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    if r.is_empty() {
        error!("dispute not found");
        return Err(VetrinaError::Database(MdbError::NotFound));
    }
    let result: Dispute = bincode::deserialize(&r[..]).unwrap_or_default();
    if result.archived {
        return Err(VetrinaError::Database(MdbError::NotFound));
    }
    Ok(result)
}

/// Lookup all disputes matching the filters
pub fn find_all(filters: &[filter::Filter]) -> Result<Vec<Dispute>, VetrinaError> {
    let db = &DATABASE_LOCK;
    let i_list_key = crate::DISPUTE_LIST_DB_KEY;
    let i_r = db::DatabaseEnvironment::read(&db.env, &db.handle, &i_list_key.as_bytes().to_vec())
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    if i_r.is_empty() {
        error!("dispute index not found");
    }
    let de: String = bincode::deserialize(&i_r[..]).unwrap_or_default();
    let i_v_did = de.split(",");
    let i_v: Vec<String> = i_v_did.map(String::from).collect();
    let mut disputes: Vec<Dispute> = Vec::new();
    for d in i_v {
        let dispute: Dispute = find(&d).unwrap_or_default();
        if !dispute.did.is_empty() {
            disputes.push(dispute);
        }
    }
    Ok(filter::retain_matching(disputes, filters))
}

/// Modify dispute
pub fn modify(d: Json<Dispute>) -> Result<Dispute, VetrinaError> {
    info!("modify dispute: {}", &d.did);
    if !validate_dispute(&d) {
        error!("invalid dispute");
        return Err(VetrinaError::Invalid);
    }
    let f_dispute: Dispute = find(&d.did)?;
    let db = &DATABASE_LOCK;
    let u_dispute = Dispute::update(f_dispute, &d);
    db::DatabaseEnvironment::delete(&db.env, &db.handle, u_dispute.did.as_bytes())
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    let v = bincode::serialize(&u_dispute).unwrap_or_default();
    db::write_chunks(&db.env, &db.handle, u_dispute.did.as_bytes(), &v)
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    Ok(u_dispute)
}

/// Flag a dispute as archived
pub fn remove(did: &String) -> Result<(), VetrinaError> {
    info!("remove dispute: {}", &did);
    let mut f_dispute: Dispute = find(did)?;
    f_dispute.archived = true;
    let db = &DATABASE_LOCK;
    db::DatabaseEnvironment::delete(&db.env, &db.handle, f_dispute.did.as_bytes())
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    let v = bincode::serialize(&f_dispute).unwrap_or_default();
    db::write_chunks(&db.env, &db.handle, f_dispute.did.as_bytes(), &v)
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    Ok(())
}

/// Wipe the dispute index and every record in it. Triggered by the
///
/// --clear-disputes flag at startup.
pub fn clear_all() -> Result<(), VetrinaError> {
    info!("clearing all disputes");
    let db = &DATABASE_LOCK;
    let list_key = crate::DISPUTE_LIST_DB_KEY;
    let _lock = INDEX_LOCK
        .lock()
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    let r = db::DatabaseEnvironment::read(&db.env, &db.handle, &list_key.as_bytes().to_vec())
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    if r.is_empty() {
        debug!("dispute index is already empty");
        return Ok(());
    }
    let de: String = bincode::deserialize(&r[..]).unwrap_or_default();
    let i_v: Vec<String> = de.split(",").map(String::from).collect();
    for d in i_v {
        if !d.is_empty() {
            db::DatabaseEnvironment::delete(&db.env, &db.handle, d.as_bytes())
                .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
        }
    }
    db::DatabaseEnvironment::delete(&db.env, &db.handle, list_key.as_bytes())
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
        let j_dispute = Json(Dispute {
            user_id: String::from(&user_id),
            order_number: String::from("ord-1001"),
            ..Default::default()
        });
        let test_dispute = create(j_dispute)?;
        assert_eq!(test_dispute.status, StatusType::Open.value());
        let f_dispute = find(&test_dispute.did)?;
        assert_eq!(f_dispute.order_number, "ord-1001");
        remove(&test_dispute.did)?;
        Ok(())
    }

    #[test]
    fn find_all_test() -> Result<(), VetrinaError> {
        let user_id = format!("u{}", utils::generate_rnd());
        let j_dispute = Json(Dispute {
            user_id: String::from(&user_id),
            order_number: String::from("ord-2002"),
            status: StatusType::Resolved.value(),
            ..Default::default()
        });
        let test_dispute = create(j_dispute)?;
        let filters = vec![
            (String::from("userId"), String::from("=="), json!(user_id)),
            (String::from("status"), String::from("=="), json!("resolved")),
        ];
        let f_disputes = find_all(&filters)?;
        assert_eq!(f_disputes.len(), 1);
        assert_eq!(f_disputes[0].did, test_dispute.did);
        remove(&test_dispute.did)?;
        Ok(())
    }

    #[test]
    fn modify_appends_message_test() -> Result<(), VetrinaError> {
        let user_id = format!("u{}", utils::generate_rnd());
        let j_dispute = Json(Dispute {
            user_id: String::from(&user_id),
            order_number: String::from("ord-3003"),
            ..Default::default()
        });
        let test_dispute = create(j_dispute)?;
        let mut messages = test_dispute.messages.to_vec();
        messages.push(ThreadMessage {
            sender: String::from(&user_id),
            body: String::from("item never arrived"),
            created: chrono::offset::Utc::now().timestamp(),
        });
        let edit = Json(Dispute {
            did: String::from(&test_dispute.did),
            user_id: String::from(&user_id),
            order_number: String::from(&test_dispute.order_number),
            status: String::from(&test_dispute.status),
            messages,
            ..Default::default()
        });
        let u_dispute = modify(edit)?;
        assert_eq!(u_dispute.messages.len(), 1);
        assert_eq!(u_dispute.messages[0].body, "item never arrived");
        remove(&test_dispute.did)?;
        Ok(())
    }
}

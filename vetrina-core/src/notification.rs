//! In-app notification logic module

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

fn validate_notification(n: &Json<Notification>) -> bool {
    info!("validating notification: {}", &n.nid);
    n.title.len() < utils::string_limit() && n.body.len() < utils::message_limit()
}

/// Create a new notification. New notifications start unread.
pub fn create(n: Json<Notification>) -> Result<Notification, VetrinaError> {
    info!("creating notification");
    if !validate_notification(&n) {
        error!("invalid notification");
        return Err(VetrinaError::Invalid);
    }
    let ts = chrono::offset::Utc::now().timestamp();
    let nid: String = format!("{}{}", crate::NOTIFICATION_DB_KEY, utils::generate_rnd());
    let new_notification = Notification {
        nid: String::from(&nid),
        user_id: String::from(&n.user_id),
        title: String::from(&n.title),
        body: String::from(&n.body),
        read: false,
        created: ts,
        archived: false,
    };
    debug!("insert notification: {:?}", &new_notification);
    let db = &DATABASE_LOCK;
    let k = &new_notification.nid;
    let v = bincode::serialize(&new_notification).unwrap_or_default();
    db::write_chunks(&db.env, &db.handle, k.as_bytes(), &v)
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    // in order to retrieve all notifications, write keys to the index
    let list_key = crate::NOTIFICATION_LIST_DB_KEY;
    let _lock = INDEX_LOCK
        .lock()
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    let r = db::DatabaseEnvironment::read(&db.env, &db.handle, &list_key.as_bytes().to_vec())
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    if r.is_empty() {
        debug!("creating notification index");
    }
    let old: String = bincode::deserialize(&r[..]).unwrap_or_default();
    let notification_list = [old, String::from(&nid)].join(",");
    let s_notification_list = bincode::serialize(&notification_list).unwrap_or_default();
    debug!(
        "writing notification index {} for id: {}",
        notification_list, list_key
    );
    db::write_chunks(&db.env, &db.handle, list_key.as_bytes(), &s_notification_list)
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    Ok(new_notification)
}

/// Lookup notification
pub fn find(nid: &String) -> Result<Notification, VetrinaError> {
    info!("find notification: {}", &nid);
    let db = &DATABASE_LOCK;
    let r = db::DatabaseEnvironment::read(&db.env, &db.handle, &nid.as_bytes().to_vec())
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    if r.is_empty() {
        error!("notification not found");
        return Err(VetrinaError::Database(MdbError::NotFound));
    }
    let result: Notification = bincode::deserialize(&r[..]).unwrap_or_default();
    if result.archived {
        return Err(VetrinaError::Database(MdbError::NotFound));
    }
    Ok(result)
}

/// Lookup all notifications matching the filters
pub fn find_all(filters: &[filter::Filter]) -> Result<Vec<Notification>, VetrinaError> {
    let db = &DATABASE_LOCK;
    let i_list_key = crate::NOTIFICATION_LIST_DB_KEY;
    let i_r = db::DatabaseEnvironment::read(&db.env, &db.handle, &i_list_key.as_bytes().to_vec())
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    if i_r.is_empty() {
        error!("notification index not found");
    }
    let de: String = bincode::deserialize(&i_r[..]).unwrap_or_default();
    let i_v_nid = de.split(",");
    let i_v: Vec<String> = i_v_nid.map(String::from).collect();
    let mut notifications: Vec<Notification> = Vec::new();
    for n in i_v {
        let notification: Notification = find(&n).unwrap_or_default();
        if !notification.nid.is_empty() {
            notifications.push(notification);
        }
    }
    Ok(filter::retain_matching(notifications, filters))
}

/// Modify notification, e.g. marking it read
pub fn modify(n: Json<Notification>) -> Result<Notification, VetrinaError> {
    info!("modify notification: {}", &n.nid);
    if !validate_notification(&n) {
        error!("invalid notification");
        return Err(VetrinaError::Invalid);
    }
    let f_notification: Notification = find(&n.nid)?;
    let db = &DATABASE_LOCK;
    let u_notification = Notification::update(f_notification, &n);
    db::DatabaseEnvironment::delete(&db.env, &db.handle, u_notification.nid.as_bytes())
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    let v = bincode::serialize(&u_notification).unwrap_or_default();
    db::write_chunks(&db.env, &db.handle, u_notification.nid.as_bytes(), &v)
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    Ok(u_notification)
}

/// Flag a notification as archived
pub fn remove(nid: &String) -> Result<(), VetrinaError> {
    info!("remove notification: {}", &nid);
    let mut f_notification: Notification = find(nid)?;
    f_notification.archived = true;
    let db = &DATABASE_LOCK;
    db::DatabaseEnvironment::delete(&db.env, &db.handle, f_notification.nid.as_bytes())
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    let v = bincode::serialize(&f_notification).unwrap_or_default();
    db::write_chunks(&db.env, &db.handle, f_notification.nid.as_bytes(), &v)
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
    fn create_starts_unread_test() -> Result<(), VetrinaError> {
        let user_id = format!("u{}", utils::generate_rnd());
        let j_notification = Json(Notification {
            user_id: String::from(&user_id),
            title: String::from("Proposal accepted"),
            body: String::from("Your proposal for spring launch was accepted."),
            read: true,
            ..Default::default()
        });
        let test_notification = create(j_notification)?;
        // the read flag from the request body is ignored on create
        assert!(!test_notification.read);
        remove(&test_notification.nid)?;
        Ok(())
    }

    #[test]
    fn mark_read_test() -> Result<(), VetrinaError> {
        let user_id = format!("u{}", utils::generate_rnd());
        let j_notification = Json(Notification {
            user_id: String::from(&user_id),
            title: String::from("New message"),
            body: String::from("You have a new ticket reply."),
            ..Default::default()
        });
        let test_notification = create(j_notification)?;
        let edit = Json(Notification {
            nid: String::from(&test_notification.nid),
            user_id: String::from(&user_id),
            title: String::from(&test_notification.title),
            body: String::from(&test_notification.body),
            read: true,
            ..Default::default()
        });
        let u_notification = modify(edit)?;
        assert!(u_notification.read);
        let filters = vec![
            (String::from("userId"), String::from("=="), json!(user_id)),
            (String::from("read"), String::from("=="), json!(false)),
        ];
        let unread = find_all(&filters)?;
        assert!(unread.is_empty());
        remove(&test_notification.nid)?;
        Ok(())
    }
}

//! Support ticket logic module

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
    Pending,
    Closed,
}

impl StatusType {
    pub fn value(&self) -> String {
        match *self {
            StatusType::Open => String::from("open"),
            StatusType::Pending => String::from("pending"),
            StatusType::Closed => String::from("closed"),
        }
    }
}

pub enum PriorityType {
    Low,
    Normal,
    High,
}

impl PriorityType {
    pub fn value(&self) -> String {
        match *self {
            PriorityType::Low => String::from("low"),
            PriorityType::Normal => String::from("normal"),
            PriorityType::High => String::from("high"),
        }
    }
}

fn validate_ticket(t: &Json<Ticket>) -> bool {
    info!("validating ticket: {}", &t.tid);
    t.subject.len() < utils::string_limit()
        && t.messages.len() < utils::thread_limit()
        && t.messages.iter().all(|m| m.body.len() < utils::message_limit())
}

/// Create a new support ticket
pub fn create(t: Json<Ticket>) -> Result<Ticket, VetrinaError> {
    info!("creating ticket");
    if !validate_ticket(&t) {
        error!("invalid ticket");
        return Err(VetrinaError::Invalid);
    }
    let ts = chrono::offset::Utc::now().timestamp();
    let tid: String = format!("{}{}", crate::TICKET_DB_KEY, utils::generate_rnd());
    let status = if t.status.is_empty() {
        StatusType::Open.value()
    } else {
        String::from(&t.status)
    };
    let priority = if t.priority.is_empty() {
        PriorityType::Normal.value()
    } else {
        String::from(&t.priority)
    };
    let new_ticket = Ticket {
        tid: String::from(&tid),
        user_id: String::from(&t.user_id),
        subject: String::from(&t.subject),
        status,
        priority,
        messages: t.messages.to_vec(),
        created: ts,
        archived: false,
    };
    debug!("insert ticket: {:?}", &new_ticket);
    let db = &DATABASE_LOCK;
    let k = &new_ticket.tid;
    let v = bincode::serialize(&new_ticket).unwrap_or_default();
    db::write_chunks(&db.env, &db.handle, k.as_bytes(), &v)
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    // in order to retrieve all tickets, write keys to the index
    let list_key = crate::TICKET_LIST_DB_KEY;
    let _lock = INDEX_LOCK
        .lock()
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    let r = db::DatabaseEnvironment::read(&db.env, &db.handle, &list_key.as_bytes().to_vec())
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    if r.is_empty() {
        debug!("creating ticket index");
    }
    let old: String = bincode::deserialize(&r[..]).unwrap_or_default();
    let ticket_list = [old, String::from(&tid)].join(",");
    let s_ticket_list = bincode::serialize(&ticket_list).unwrap_or_default();
    debug!("writing ticket index {} for id: {}", ticket_list, list_key);
    db::write_chunks(&db.env, &db.handle, list_key.as_bytes(), &s_ticket_list)
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    Ok(new_ticket)
}

/// Lookup ticket
pub fn find(tid: &String) -> Result<Ticket, VetrinaError> {
    info!("find ticket: {}", &tid);
    let db = &DATABASE_LOCK;
    let r = db::DatabaseEnvironment::read(&db.env, &db.handle, &tid.as_bytes().to_vec())
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    if r.is_empty() {
        error!("ticket not found");
        return Err(VetrinaError::Database(MdbError::NotFound));
    }
    let result: Ticket = bincode::deserialize(&r[..]).unwrap_or_default();
    if result.archived {
        return Err(VetrinaError::Database(MdbError::NotFound));
    }
    Ok(result)
}

/// Lookup all tickets matching the filters
pub fn find_all(filters: &[filter::Filter]) -> Result<Vec<Ticket>, VetrinaError> {
    let db = &DATABASE_LOCK;
    let i_list_key = crate::TICKET_LIST_DB_KEY;
    let i_r = db::DatabaseEnvironment::read(&db.env, &db.handle, &i_list_key.as_bytes().to_vec())
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    if i_r.is_empty() {
        error!("ticket index not found");
    }
    let de: String = bincode::deserialize(&i_r[..]).unwrap_or_default();
    let i_v_tid = de.split(",");
    let i_v: Vec<String> = i_v_tid.map(String::from).collect();
    let mut tickets: Vec<Ticket> = Vec::new();
    for t in i_v {
        let ticket: Ticket = find(&t).unwrap_or_default();
        if !ticket.tid.is_empty() {
            tickets.push(ticket);
        }
    }
    Ok(filter::retain_matching(tickets, filters))
}

/// Modify ticket
pub fn modify(t: Json<Ticket>) -> Result<Ticket, VetrinaError> {
    info!("modify ticket: {}", &t.tid);
    if !validate_ticket(&t) {
        error!("invalid ticket");
        return Err(VetrinaError::Invalid);
    }
    let f_ticket: Ticket = find(&t.tid)?;
    let db = &DATABASE_LOCK;
    let u_ticket = Ticket::update(f_ticket, &t);
    db::DatabaseEnvironment::delete(&db.env, &db.handle, u_ticket.tid.as_bytes())
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    let v = bincode::serialize(&u_ticket).unwrap_or_default();
    db::write_chunks(&db.env, &db.handle, u_ticket.tid.as_bytes(), &v)
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    Ok(u_ticket)
}

/// Flag a ticket as archived
pub fn remove(tid: &String) -> Result<(), VetrinaError> {
    info!("remove ticket: {}", &tid);
    let mut f_ticket: Ticket = find(tid)?;
    f_ticket.archived = true;
    let db = &DATABASE_LOCK;
    db::DatabaseEnvironment::delete(&db.env, &db.handle, f_ticket.tid.as_bytes())
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    let v = bincode::serialize(&f_ticket).unwrap_or_default();
    db::write_chunks(&db.env, &db.handle, f_ticket.tid.as_bytes(), &v)
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
        let j_ticket = Json(Ticket {
            user_id: String::from(&user_id),
            subject: String::from("Billing issue"),
            ..Default::default()
        });
        let test_ticket = create(j_ticket)?;
        assert!(test_ticket.tid.starts_with(crate::TICKET_DB_KEY));
        assert_eq!(test_ticket.status, StatusType::Open.value());
        assert_eq!(test_ticket.priority, PriorityType::Normal.value());
        let f_ticket = find(&test_ticket.tid)?;
        assert_eq!(f_ticket.subject, "Billing issue");
        remove(&test_ticket.tid)?;
        Ok(())
    }

    #[test]
    fn find_all_test() -> Result<(), VetrinaError> {
        let user_id = format!("u{}", utils::generate_rnd());
        let j_ticket = Json(Ticket {
            user_id: String::from(&user_id),
            subject: String::from("Billing issue"),
            status: StatusType::Open.value(),
            priority: PriorityType::High.value(),
            ..Default::default()
        });
        let test_ticket = create(j_ticket)?;
        let filters = vec![(String::from("userId"), String::from("=="), json!(user_id))];
        let f_tickets = find_all(&filters)?;
        assert_eq!(f_tickets.len(), 1);
        assert_eq!(f_tickets[0].subject, "Billing issue");
        assert_eq!(f_tickets[0].status, "open");
        remove(&test_ticket.tid)?;
        Ok(())
    }

    #[test]
    fn modify_idempotent_test() -> Result<(), VetrinaError> {
        let j_ticket = Json(Ticket {
            user_id: format!("u{}", utils::generate_rnd()),
            subject: String::from("Password reset"),
            ..Default::default()
        });
        let test_ticket = create(j_ticket)?;
        let make_edit = || {
            Json(Ticket {
                tid: String::from(&test_ticket.tid),
                user_id: String::from(&test_ticket.user_id),
                subject: String::from("Password reset"),
                status: StatusType::Closed.value(),
                priority: PriorityType::Low.value(),
                messages: vec![ThreadMessage {
                    sender: String::from(&test_ticket.user_id),
                    body: String::from("resolved, thanks"),
                    created: 0,
                }],
                ..Default::default()
            })
        };
        let first = modify(make_edit())?;
        let second = modify(make_edit())?;
        assert_eq!(first.status, second.status);
        assert_eq!(first.messages.len(), second.messages.len());
        assert_eq!(first.created, test_ticket.created);
        remove(&test_ticket.tid)?;
        Ok(())
    }

    #[test]
    fn remove_archives_test() -> Result<(), VetrinaError> {
        let user_id = format!("u{}", utils::generate_rnd());
        let j_ticket = Json(Ticket {
            user_id: String::from(&user_id),
            subject: String::from("stale"),
            ..Default::default()
        });
        let test_ticket = create(j_ticket)?;
        remove(&test_ticket.tid)?;
        assert!(find(&test_ticket.tid).is_err());
        let filters = vec![(String::from("userId"), String::from("=="), json!(user_id))];
        let f_tickets = find_all(&filters)?;
        assert!(f_tickets.is_empty());
        Ok(())
    }

    #[test]
    fn thread_limit_test() {
        let messages = vec![
            ThreadMessage {
                sender: String::from("u1"),
                body: String::from("x"),
                created: 0,
            };
            utils::thread_limit()
        ];
        let j_ticket = Json(Ticket {
            user_id: String::from("u1"),
            subject: String::from("too many messages"),
            messages,
            ..Default::default()
        });
        assert!(create(j_ticket).is_err());
    }
}

//! Channel-backed state stores for dashboard views.
//!
//! Background tasks run `client` calls and send one `StoreEvent` on the
//! store's sender; the view thread calls `poll()` each frame to apply
//! them. Failures never touch `data`.

use crate::{
    error::VetrinaError,
    models::*,
};
use log::debug;
use std::sync::mpsc::{
    channel,
    Receiver,
    Sender,
};

#[derive(Debug, PartialEq)]
pub enum AlertKind {
    Success,
    Failure,
}

/// One user-facing toast
#[derive(Debug)]
pub struct Alert {
    pub kind: AlertKind,
    pub message: String,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Operation {
    Load,
    Create,
    Update,
    Remove,
}

impl Operation {
    pub fn success_message(&self) -> String {
        match *self {
            Operation::Load => String::from("Loaded"),
            Operation::Create => String::from("Created successfully"),
            Operation::Update => String::from("Updated successfully"),
            Operation::Remove => String::from("Removed successfully"),
        }
    }

    pub fn failure_message(&self) -> String {
        match *self {
            Operation::Load => String::from("Failed to load"),
            Operation::Create => String::from("Failed to create"),
            Operation::Update => String::from("Failed to update"),
            Operation::Remove => String::from("Failed to remove"),
        }
    }
}

#[derive(Debug)]
pub enum StoreEvent<T> {
    Loaded(Vec<T>),
    Created(T),
    Updated(T),
    Removed(String),
    Failed(Operation, String),
}

impl<T> StoreEvent<T> {
    pub fn from_load(result: Result<Vec<T>, VetrinaError>) -> StoreEvent<T> {
        match result {
            Ok(data) => StoreEvent::Loaded(data),
            Err(_) => StoreEvent::Failed(Operation::Load, Operation::Load.failure_message()),
        }
    }

    pub fn from_create(result: Result<T, VetrinaError>) -> StoreEvent<T> {
        match result {
            Ok(item) => StoreEvent::Created(item),
            Err(_) => StoreEvent::Failed(Operation::Create, Operation::Create.failure_message()),
        }
    }

    pub fn from_update(result: Result<T, VetrinaError>) -> StoreEvent<T> {
        match result {
            Ok(item) => StoreEvent::Updated(item),
            Err(_) => StoreEvent::Failed(Operation::Update, Operation::Update.failure_message()),
        }
    }

    pub fn from_remove(id: String, result: Result<(), VetrinaError>) -> StoreEvent<T> {
        match result {
            Ok(_) => StoreEvent::Removed(id),
            Err(_) => StoreEvent::Failed(Operation::Remove, Operation::Remove.failure_message()),
        }
    }
}

/// Login session. An inactive session gates all initial loads.
#[derive(Debug, Default)]
pub struct SessionState {
    pub token: String,
    pub uid: String,
}

impl SessionState {
    pub fn is_active(&self) -> bool {
        !self.token.is_empty() && !self.uid.is_empty()
    }
}

pub struct ResourceStore<T> {
    pub data: Vec<T>,
    pub loading: bool,
    pub error: Option<String>,
    alerts: Vec<Alert>,
    tx: Sender<StoreEvent<T>>,
    rx: Receiver<StoreEvent<T>>,
    id_of: fn(&T) -> String,
}

impl<T> ResourceStore<T> {
    pub fn new(id_of: fn(&T) -> String) -> ResourceStore<T> {
        let (tx, rx) = channel();
        ResourceStore {
            data: Vec::new(),
            loading: false,
            error: None,
            alerts: Vec::new(),
            tx,
            rx,
            id_of,
        }
    }

    /// Sender handle for background tasks
    pub fn sender(&self) -> Sender<StoreEvent<T>> {
        self.tx.clone()
    }

    pub fn begin_load(&mut self) {
        self.loading = true;
    }

    /// The initial fetch fires once per login, never while data is
    ///
    /// already present or in flight.
    pub fn should_load(&self, session: &SessionState) -> bool {
        session.is_active() && self.data.is_empty() && !self.loading
    }

    /// Drain the receiver and apply every pending event.
    pub fn poll(&mut self) {
        let id_of = self.id_of;
        loop {
            match self.rx.try_recv() {
                Ok(StoreEvent::Loaded(data)) => {
                    debug!("store loaded {} records", data.len());
                    self.data = data;
                    self.loading = false;
                    self.error = None;
                }
                Ok(StoreEvent::Created(item)) => {
                    self.data.push(item);
                    self.alerts.push(Alert {
                        kind: AlertKind::Success,
                        message: Operation::Create.success_message(),
                    });
                }
                Ok(StoreEvent::Updated(item)) => {
                    let id = id_of(&item);
                    if let Some(found) = self.data.iter_mut().find(|x| id_of(x) == id) {
                        *found = item;
                    }
                    self.alerts.push(Alert {
                        kind: AlertKind::Success,
                        message: Operation::Update.success_message(),
                    });
                }
                Ok(StoreEvent::Removed(id)) => {
                    self.data.retain(|x| id_of(x) != id);
                    self.alerts.push(Alert {
                        kind: AlertKind::Success,
                        message: Operation::Remove.success_message(),
                    });
                }
                Ok(StoreEvent::Failed(_, message)) => {
                    self.loading = false;
                    self.error = Some(String::from(&message));
                    self.alerts.push(Alert {
                        kind: AlertKind::Failure,
                        message,
                    });
                }
                Err(_) => break,
            }
        }
    }

    /// Pending alerts for display, clearing the queue
    pub fn drain_alerts(&mut self) -> Vec<Alert> {
        self.alerts.drain(..).collect()
    }
}

pub fn billing_store() -> ResourceStore<BillingProfile> {
    ResourceStore::new(|b: &BillingProfile| String::from(&b.bid))
}

pub fn cart_store() -> ResourceStore<Cart> {
    ResourceStore::new(|c: &Cart| String::from(&c.cid))
}

pub fn dispute_store() -> ResourceStore<Dispute> {
    ResourceStore::new(|d: &Dispute| String::from(&d.did))
}

pub fn invoice_store() -> ResourceStore<Invoice> {
    ResourceStore::new(|i: &Invoice| String::from(&i.ivid))
}

pub fn notification_store() -> ResourceStore<Notification> {
    ResourceStore::new(|n: &Notification| String::from(&n.nid))
}

pub fn payment_method_store() -> ResourceStore<PaymentMethod> {
    ResourceStore::new(|p: &PaymentMethod| String::from(&p.pmid))
}

pub fn payment_store() -> ResourceStore<Payment> {
    ResourceStore::new(|p: &Payment| String::from(&p.pid))
}

pub fn proposal_store() -> ResourceStore<Proposal> {
    ResourceStore::new(|p: &Proposal| String::from(&p.prid))
}

pub fn ticket_store() -> ResourceStore<Ticket> {
    ResourceStore::new(|t: &Ticket| String::from(&t.tid))
}

pub fn user_store() -> ResourceStore<User> {
    ResourceStore::new(|u: &User| String::from(&u.uid))
}

pub fn withdraw_store() -> ResourceStore<Withdraw> {
    ResourceStore::new(|w: &Withdraw| String::from(&w.wid))
}

// Tests
//-------------------------------------------------------------------------------

#[cfg(test)]
mod tests {

    use super::*;

    fn test_ticket(tid: &str, subject: &str) -> Ticket {
        Ticket {
            tid: String::from(tid),
            subject: String::from(subject),
            ..Default::default()
        }
    }

    #[test]
    fn load_replaces_data_test() {
        let mut store = ticket_store();
        store.begin_load();
        assert!(store.loading);
        let tx = store.sender();
        tx.send(StoreEvent::Loaded(vec![test_ticket("t1", "first")]))
            .unwrap();
        store.poll();
        assert_eq!(store.data.len(), 1);
        assert!(!store.loading);
        assert!(store.error.is_none());
        // loads are silent, no alert
        assert!(store.drain_alerts().is_empty());
    }

    #[test]
    fn failure_keeps_data_test() {
        let mut store = ticket_store();
        let tx = store.sender();
        tx.send(StoreEvent::Loaded(vec![test_ticket("t1", "first")]))
            .unwrap();
        store.poll();
        tx.send(StoreEvent::Failed(
            Operation::Update,
            Operation::Update.failure_message(),
        ))
        .unwrap();
        store.poll();
        assert_eq!(store.data.len(), 1);
        assert_eq!(store.error.as_deref(), Some("Failed to update"));
        let alerts = store.drain_alerts();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].kind, AlertKind::Failure);
    }

    #[test]
    fn create_update_remove_test() {
        let mut store = ticket_store();
        let tx = store.sender();
        tx.send(StoreEvent::Created(test_ticket("t1", "first"))).unwrap();
        tx.send(StoreEvent::Created(test_ticket("t2", "second"))).unwrap();
        store.poll();
        assert_eq!(store.data.len(), 2);
        tx.send(StoreEvent::Updated(test_ticket("t1", "renamed")))
            .unwrap();
        store.poll();
        assert_eq!(store.data[0].subject, "renamed");
        tx.send(StoreEvent::Removed(String::from("t1"))).unwrap();
        store.poll();
        assert_eq!(store.data.len(), 1);
        assert_eq!(store.data[0].tid, "t2");
        // one alert per completed operation
        assert_eq!(store.drain_alerts().len(), 4);
    }

    #[test]
    fn should_load_test() {
        let mut store = ticket_store();
        let inactive = SessionState::default();
        assert!(!store.should_load(&inactive));
        let session = SessionState {
            token: String::from("jwt"),
            uid: String::from("u1"),
        };
        assert!(store.should_load(&session));
        store.begin_load();
        assert!(!store.should_load(&session));
        let tx = store.sender();
        tx.send(StoreEvent::Loaded(vec![test_ticket("t1", "first")]))
            .unwrap();
        store.poll();
        assert!(!store.should_load(&session));
    }

    #[test]
    fn event_constructors_test() {
        let loaded: StoreEvent<Ticket> = StoreEvent::from_load(Ok(Vec::new()));
        assert!(matches!(loaded, StoreEvent::Loaded(_)));
        let failed: StoreEvent<Ticket> = StoreEvent::from_create(Err(VetrinaError::Http));
        assert!(matches!(failed, StoreEvent::Failed(Operation::Create, _)));
        let removed: StoreEvent<Ticket> =
            StoreEvent::from_remove(String::from("t1"), Ok(()));
        assert!(matches!(removed, StoreEvent::Removed(_)));
    }
}

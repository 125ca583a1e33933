use rocket::serde::{
    Deserialize,
    Serialize,
};

/// Platform account. The `role` field is one of the closed set in
///
/// `user::RoleType`. `rate` and `balance` are minor currency units.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "id")]
    pub uid: String,
    pub username: String,
    pub email: String,
    pub role: String,
    pub rate: u128,
    pub balance: u128,
    pub created: i64,
    pub archived: bool,
}

impl User {
    pub fn update(u: User, e: &User) -> User {
        User {
            uid: u.uid,
            username: String::from(&e.username),
            email: String::from(&e.email),
            role: String::from(&e.role),
            rate: e.rate,
            balance: e.balance,
            created: u.created,
            archived: u.archived,
        }
    }
}

/// Login secrets. Never exposed on the wire, the password arrives
///
/// in plain text once and only the bcrypt hash is written.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct Credential {
    pub crid: String,
    pub user_id: String,
    pub email: String,
    pub pass_hash: String,
    pub created: i64,
}

/// Single entry in a ticket or dispute thread.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct ThreadMessage {
    pub sender: String,
    pub body: String,
    pub created: i64,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct Ticket {
    #[serde(rename = "id")]
    pub tid: String,
    pub user_id: String,
    pub subject: String,
    pub status: String,
    pub priority: String,
    pub messages: Vec<ThreadMessage>,
    pub created: i64,
    pub archived: bool,
}

impl Ticket {
    pub fn update(t: Ticket, e: &Ticket) -> Ticket {
        Ticket {
            tid: t.tid,
            user_id: String::from(&e.user_id),
            subject: String::from(&e.subject),
            status: String::from(&e.status),
            priority: String::from(&e.priority),
            messages: e.messages.to_vec(),
            created: t.created,
            archived: t.archived,
        }
    }
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct Dispute {
    #[serde(rename = "id")]
    pub did: String,
    pub user_id: String,
    pub order_number: String,
    pub status: String,
    pub messages: Vec<ThreadMessage>,
    pub created: i64,
    pub archived: bool,
}

impl Dispute {
    pub fn update(d: Dispute, e: &Dispute) -> Dispute {
        Dispute {
            did: d.did,
            user_id: String::from(&e.user_id),
            order_number: String::from(&e.order_number),
            status: String::from(&e.status),
            messages: e.messages.to_vec(),
            created: d.created,
            archived: d.archived,
        }
    }
}

/// Campaign pitch from an influencer to a business. `price` is the
///
/// asking amount in minor units.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct Proposal {
    #[serde(rename = "id")]
    pub prid: String,
    pub user_id: String,
    pub campaign: String,
    pub brief: String,
    pub price: u128,
    pub status: String,
    pub created: i64,
    pub archived: bool,
}

impl Proposal {
    pub fn update(p: Proposal, e: &Proposal) -> Proposal {
        Proposal {
            prid: p.prid,
            user_id: String::from(&e.user_id),
            campaign: String::from(&e.campaign),
            brief: String::from(&e.brief),
            price: e.price,
            status: String::from(&e.status),
            created: p.created,
            archived: p.archived,
        }
    }
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct Invoice {
    #[serde(rename = "id")]
    pub ivid: String,
    pub user_id: String,
    pub date: i64,
    pub amount: u128,
    pub tva: u32,
    pub payment_method: String,
    pub archived: bool,
}

impl Invoice {
    pub fn update(i: Invoice, e: &Invoice) -> Invoice {
        Invoice {
            ivid: i.ivid,
            user_id: String::from(&e.user_id),
            date: e.date,
            amount: e.amount,
            tva: e.tva,
            payment_method: String::from(&e.payment_method),
            archived: i.archived,
        }
    }
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct Payment {
    #[serde(rename = "id")]
    pub pid: String,
    pub user_id: String,
    pub amount: u128,
    pub method: String,
    pub status: String,
    pub reference: String,
    pub created: i64,
    pub archived: bool,
}

impl Payment {
    pub fn update(p: Payment, e: &Payment) -> Payment {
        Payment {
            pid: p.pid,
            user_id: String::from(&e.user_id),
            amount: e.amount,
            method: String::from(&e.method),
            status: String::from(&e.status),
            reference: String::from(&e.reference),
            created: p.created,
            archived: p.archived,
        }
    }
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct PaymentMethod {
    #[serde(rename = "id")]
    pub pmid: String,
    pub user_id: String,
    pub provider: String,
    pub reference: String,
    pub is_default: bool,
    pub created: i64,
    pub archived: bool,
}

impl PaymentMethod {
    pub fn update(p: PaymentMethod, e: &PaymentMethod) -> PaymentMethod {
        PaymentMethod {
            pmid: p.pmid,
            user_id: String::from(&e.user_id),
            provider: String::from(&e.provider),
            reference: String::from(&e.reference),
            is_default: e.is_default,
            created: p.created,
            archived: p.archived,
        }
    }
}

/// Payout destination. At most one withdraw per user has
///
/// `is_default` set, enforced in `withdraw::sweep_default`.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct Withdraw {
    #[serde(rename = "id")]
    pub wid: String,
    pub user_id: String,
    pub r#type: String,
    pub details: String,
    pub is_default: bool,
    pub created: i64,
    pub archived: bool,
}

impl Withdraw {
    pub fn update(w: Withdraw, e: &Withdraw) -> Withdraw {
        Withdraw {
            wid: w.wid,
            user_id: String::from(&e.user_id),
            r#type: String::from(&e.r#type),
            details: String::from(&e.details),
            is_default: e.is_default,
            created: w.created,
            archived: w.archived,
        }
    }
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct BillingProfile {
    #[serde(rename = "id")]
    pub bid: String,
    pub user_id: String,
    pub company: String,
    pub address: String,
    pub city: String,
    pub country: String,
    pub tax_id: String,
    pub created: i64,
    pub archived: bool,
}

impl BillingProfile {
    pub fn update(b: BillingProfile, e: &BillingProfile) -> BillingProfile {
        BillingProfile {
            bid: b.bid,
            user_id: String::from(&e.user_id),
            company: String::from(&e.company),
            address: String::from(&e.address),
            city: String::from(&e.city),
            country: String::from(&e.country),
            tax_id: String::from(&e.tax_id),
            created: b.created,
            archived: b.archived,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct CartItem {
    pub item_id: String,
    pub title: String,
    pub price: u128,
    pub quantity: u32,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct Cart {
    #[serde(rename = "id")]
    pub cid: String,
    pub user_id: String,
    pub items: Vec<CartItem>,
    pub updated: i64,
    pub archived: bool,
}

impl Cart {
    pub fn update(c: Cart, e: &Cart) -> Cart {
        Cart {
            cid: c.cid,
            user_id: String::from(&e.user_id),
            items: e.items.to_vec(),
            updated: chrono::Utc::now().timestamp(),
            archived: c.archived,
        }
    }
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct Notification {
    #[serde(rename = "id")]
    pub nid: String,
    pub user_id: String,
    pub title: String,
    pub body: String,
    pub read: bool,
    pub created: i64,
    pub archived: bool,
}

impl Notification {
    pub fn update(n: Notification, e: &Notification) -> Notification {
        Notification {
            nid: n.nid,
            user_id: String::from(&e.user_id),
            title: String::from(&e.title),
            body: String::from(&e.body),
            read: e.read,
            created: n.created,
            archived: n.archived,
        }
    }
}

// Tests
//-------------------------------------------------------------------------------

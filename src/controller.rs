use rocket::{
    catch,
    delete,
    get,
    http::Status,
    post,
    put,
    response::status::Custom,
    serde::json::Json,
};

use vetrina_core::*;

// JSON APIs for the dashboard resources

// Billing profiles
//-----------------------------------------------

/// Create a billing profile
///
/// Protected: true
#[post("/create", data = "<billing>")]
pub async fn create_billing(
    billing: Json<models::BillingProfile>,
    _token: auth::BearerToken,
) -> Custom<Json<models::BillingProfile>> {
    match billing::create(billing) {
        Ok(b) => Custom(Status::Created, Json(b)),
        Err(e) => Custom(e.status(), Json(Default::default())),
    }
}

/// Lookup billing profiles matching the filters in the request body
///
/// Protected: true
#[post("/", data = "<r_list>")]
pub async fn get_billings(
    r_list: Json<reqres::ListRequest>,
    _token: auth::BearerToken,
) -> Custom<Json<Vec<models::BillingProfile>>> {
    match billing::find_all(&r_list.filters) {
        Ok(v) => Custom(Status::Ok, Json(v)),
        Err(e) => Custom(e.status(), Json(Default::default())),
    }
}

/// Get a billing profile by passing id
///
/// Protected: true
#[get("/<bid>")]
pub async fn get_billing(
    bid: String,
    _token: auth::BearerToken,
) -> Custom<Json<models::BillingProfile>> {
    match billing::find(&bid) {
        Ok(b) => Custom(Status::Ok, Json(b)),
        Err(e) => Custom(e.status(), Json(Default::default())),
    }
}

/// Update a billing profile. The id in the path wins over the body
///
/// Protected: true
#[put("/<bid>", data = "<billing>")]
pub async fn update_billing(
    bid: String,
    billing: Json<models::BillingProfile>,
    _token: auth::BearerToken,
) -> Custom<Json<models::BillingProfile>> {
    let mut u_billing = billing.into_inner();
    u_billing.bid = bid;
    match billing::modify(Json(u_billing)) {
        Ok(b) => Custom(Status::Ok, Json(b)),
        Err(e) => Custom(e.status(), Json(Default::default())),
    }
}

/// Archive a billing profile
///
/// Protected: true
#[delete("/<bid>")]
pub async fn delete_billing(
    bid: String,
    _token: auth::BearerToken,
) -> Custom<Json<reqres::RemovedResponse>> {
    match billing::remove(&bid) {
        Ok(_) => Custom(Status::Ok, Json(reqres::RemovedResponse { id: bid })),
        Err(e) => Custom(e.status(), Json(Default::default())),
    }
}

// Carts
//-----------------------------------------------

/// Create a cart
///
/// Protected: true
#[post("/create", data = "<cart>")]
pub async fn create_cart(
    cart: Json<models::Cart>,
    _token: auth::BearerToken,
) -> Custom<Json<models::Cart>> {
    match cart::create(cart) {
        Ok(c) => Custom(Status::Created, Json(c)),
        Err(e) => Custom(e.status(), Json(Default::default())),
    }
}

/// Lookup carts matching the filters in the request body
///
/// Protected: true
#[post("/", data = "<r_list>")]
pub async fn get_carts(
    r_list: Json<reqres::ListRequest>,
    _token: auth::BearerToken,
) -> Custom<Json<Vec<models::Cart>>> {
    match cart::find_all(&r_list.filters) {
        Ok(v) => Custom(Status::Ok, Json(v)),
        Err(e) => Custom(e.status(), Json(Default::default())),
    }
}

/// Get a cart by passing id
///
/// Protected: true
#[get("/<cid>")]
pub async fn get_cart(cid: String, _token: auth::BearerToken) -> Custom<Json<models::Cart>> {
    match cart::find(&cid) {
        Ok(c) => Custom(Status::Ok, Json(c)),
        Err(e) => Custom(e.status(), Json(Default::default())),
    }
}

/// Update a cart. Replaces the item list and bumps the updated timestamp
///
/// Protected: true
#[put("/<cid>", data = "<cart>")]
pub async fn update_cart(
    cid: String,
    cart: Json<models::Cart>,
    _token: auth::BearerToken,
) -> Custom<Json<models::Cart>> {
    let mut u_cart = cart.into_inner();
    u_cart.cid = cid;
    match cart::modify(Json(u_cart)) {
        Ok(c) => Custom(Status::Ok, Json(c)),
        Err(e) => Custom(e.status(), Json(Default::default())),
    }
}

/// Archive a cart
///
/// Protected: true
#[delete("/<cid>")]
pub async fn delete_cart(
    cid: String,
    _token: auth::BearerToken,
) -> Custom<Json<reqres::RemovedResponse>> {
    match cart::remove(&cid) {
        Ok(_) => Custom(Status::Ok, Json(reqres::RemovedResponse { id: cid })),
        Err(e) => Custom(e.status(), Json(Default::default())),
    }
}

// Disputes
//-----------------------------------------------

/// Create a dispute
///
/// Protected: true
#[post("/create", data = "<dispute>")]
pub async fn create_dispute(
    dispute: Json<models::Dispute>,
    _token: auth::BearerToken,
) -> Custom<Json<models::Dispute>> {
    match dispute::create(dispute) {
        Ok(d) => Custom(Status::Created, Json(d)),
        Err(e) => Custom(e.status(), Json(Default::default())),
    }
}

/// Lookup disputes matching the filters in the request body
///
/// Protected: true
#[post("/", data = "<r_list>")]
pub async fn get_disputes(
    r_list: Json<reqres::ListRequest>,
    _token: auth::BearerToken,
) -> Custom<Json<Vec<models::Dispute>>> {
    match dispute::find_all(&r_list.filters) {
        Ok(v) => Custom(Status::Ok, Json(v)),
        Err(e) => Custom(e.status(), Json(Default::default())),
    }
}

/// Get a dispute by passing id
///
/// Protected: true
#[get("/<did>")]
pub async fn get_dispute(did: String, _token: auth::BearerToken) -> Custom<Json<models::Dispute>> {
    match dispute::find(&did) {
        Ok(d) => Custom(Status::Ok, Json(d)),
        Err(e) => Custom(e.status(), Json(Default::default())),
    }
}

/// Update a dispute. The id in the path wins over the body
///
/// Protected: true
#[put("/<did>", data = "<dispute>")]
pub async fn update_dispute(
    did: String,
    dispute: Json<models::Dispute>,
    _token: auth::BearerToken,
) -> Custom<Json<models::Dispute>> {
    let mut u_dispute = dispute.into_inner();
    u_dispute.did = did;
    match dispute::modify(Json(u_dispute)) {
        Ok(d) => Custom(Status::Ok, Json(d)),
        Err(e) => Custom(e.status(), Json(Default::default())),
    }
}

/// Archive a dispute
///
/// Protected: true
#[delete("/<did>")]
pub async fn delete_dispute(
    did: String,
    _token: auth::BearerToken,
) -> Custom<Json<reqres::RemovedResponse>> {
    match dispute::remove(&did) {
        Ok(_) => Custom(Status::Ok, Json(reqres::RemovedResponse { id: did })),
        Err(e) => Custom(e.status(), Json(Default::default())),
    }
}

// Invoices
//-----------------------------------------------

/// Create an invoice. The date is stamped on write when not set
///
/// Protected: true
#[post("/create", data = "<invoice>")]
pub async fn create_invoice(
    invoice: Json<models::Invoice>,
    _token: auth::BearerToken,
) -> Custom<Json<models::Invoice>> {
    match invoice::create(invoice) {
        Ok(i) => Custom(Status::Created, Json(i)),
        Err(e) => Custom(e.status(), Json(Default::default())),
    }
}

/// Lookup invoices matching the filters in the request body
///
/// Protected: true
#[post("/", data = "<r_list>")]
pub async fn get_invoices(
    r_list: Json<reqres::ListRequest>,
    _token: auth::BearerToken,
) -> Custom<Json<Vec<models::Invoice>>> {
    match invoice::find_all(&r_list.filters) {
        Ok(v) => Custom(Status::Ok, Json(v)),
        Err(e) => Custom(e.status(), Json(Default::default())),
    }
}

/// Get an invoice by passing id
///
/// Protected: true
#[get("/<ivid>")]
pub async fn get_invoice(ivid: String, _token: auth::BearerToken) -> Custom<Json<models::Invoice>> {
    match invoice::find(&ivid) {
        Ok(i) => Custom(Status::Ok, Json(i)),
        Err(e) => Custom(e.status(), Json(Default::default())),
    }
}

/// Update an invoice. The id in the path wins over the body
///
/// Protected: true
#[put("/<ivid>", data = "<invoice>")]
pub async fn update_invoice(
    ivid: String,
    invoice: Json<models::Invoice>,
    _token: auth::BearerToken,
) -> Custom<Json<models::Invoice>> {
    let mut u_invoice = invoice.into_inner();
    u_invoice.ivid = ivid;
    match invoice::modify(Json(u_invoice)) {
        Ok(i) => Custom(Status::Ok, Json(i)),
        Err(e) => Custom(e.status(), Json(Default::default())),
    }
}

/// Archive an invoice
///
/// Protected: true
#[delete("/<ivid>")]
pub async fn delete_invoice(
    ivid: String,
    _token: auth::BearerToken,
) -> Custom<Json<reqres::RemovedResponse>> {
    match invoice::remove(&ivid) {
        Ok(_) => Custom(Status::Ok, Json(reqres::RemovedResponse { id: ivid })),
        Err(e) => Custom(e.status(), Json(Default::default())),
    }
}

// Notifications
//-----------------------------------------------

/// Create a notification. New notifications always start unread
///
/// Protected: true
#[post("/create", data = "<notification>")]
pub async fn create_notification(
    notification: Json<models::Notification>,
    _token: auth::BearerToken,
) -> Custom<Json<models::Notification>> {
    match notification::create(notification) {
        Ok(n) => Custom(Status::Created, Json(n)),
        Err(e) => Custom(e.status(), Json(Default::default())),
    }
}

/// Lookup notifications matching the filters in the request body
///
/// Protected: true
#[post("/", data = "<r_list>")]
pub async fn get_notifications(
    r_list: Json<reqres::ListRequest>,
    _token: auth::BearerToken,
) -> Custom<Json<Vec<models::Notification>>> {
    match notification::find_all(&r_list.filters) {
        Ok(v) => Custom(Status::Ok, Json(v)),
        Err(e) => Custom(e.status(), Json(Default::default())),
    }
}

/// Get a notification by passing id
///
/// Protected: true
#[get("/<nid>")]
pub async fn get_notification(
    nid: String,
    _token: auth::BearerToken,
) -> Custom<Json<models::Notification>> {
    match notification::find(&nid) {
        Ok(n) => Custom(Status::Ok, Json(n)),
        Err(e) => Custom(e.status(), Json(Default::default())),
    }
}

/// Update a notification. Use this to flip the read flag
///
/// Protected: true
#[put("/<nid>", data = "<notification>")]
pub async fn update_notification(
    nid: String,
    notification: Json<models::Notification>,
    _token: auth::BearerToken,
) -> Custom<Json<models::Notification>> {
    let mut u_notification = notification.into_inner();
    u_notification.nid = nid;
    match notification::modify(Json(u_notification)) {
        Ok(n) => Custom(Status::Ok, Json(n)),
        Err(e) => Custom(e.status(), Json(Default::default())),
    }
}

/// Archive a notification
///
/// Protected: true
#[delete("/<nid>")]
pub async fn delete_notification(
    nid: String,
    _token: auth::BearerToken,
) -> Custom<Json<reqres::RemovedResponse>> {
    match notification::remove(&nid) {
        Ok(_) => Custom(Status::Ok, Json(reqres::RemovedResponse { id: nid })),
        Err(e) => Custom(e.status(), Json(Default::default())),
    }
}

// Payment methods
//-----------------------------------------------

/// Create a payment method
///
/// Protected: true
#[post("/create", data = "<payment_method>")]
pub async fn create_payment_method(
    payment_method: Json<models::PaymentMethod>,
    _token: auth::BearerToken,
) -> Custom<Json<models::PaymentMethod>> {
    match payment_method::create(payment_method) {
        Ok(p) => Custom(Status::Created, Json(p)),
        Err(e) => Custom(e.status(), Json(Default::default())),
    }
}

/// Lookup payment methods matching the filters in the request body
///
/// Protected: true
#[post("/", data = "<r_list>")]
pub async fn get_payment_methods(
    r_list: Json<reqres::ListRequest>,
    _token: auth::BearerToken,
) -> Custom<Json<Vec<models::PaymentMethod>>> {
    match payment_method::find_all(&r_list.filters) {
        Ok(v) => Custom(Status::Ok, Json(v)),
        Err(e) => Custom(e.status(), Json(Default::default())),
    }
}

/// Get a payment method by passing id
///
/// Protected: true
#[get("/<pmid>")]
pub async fn get_payment_method(
    pmid: String,
    _token: auth::BearerToken,
) -> Custom<Json<models::PaymentMethod>> {
    match payment_method::find(&pmid) {
        Ok(p) => Custom(Status::Ok, Json(p)),
        Err(e) => Custom(e.status(), Json(Default::default())),
    }
}

/// Update a payment method. The id in the path wins over the body
///
/// Protected: true
#[put("/<pmid>", data = "<payment_method>")]
pub async fn update_payment_method(
    pmid: String,
    payment_method: Json<models::PaymentMethod>,
    _token: auth::BearerToken,
) -> Custom<Json<models::PaymentMethod>> {
    let mut u_payment_method = payment_method.into_inner();
    u_payment_method.pmid = pmid;
    match payment_method::modify(Json(u_payment_method)) {
        Ok(p) => Custom(Status::Ok, Json(p)),
        Err(e) => Custom(e.status(), Json(Default::default())),
    }
}

/// Archive a payment method
///
/// Protected: true
#[delete("/<pmid>")]
pub async fn delete_payment_method(
    pmid: String,
    _token: auth::BearerToken,
) -> Custom<Json<reqres::RemovedResponse>> {
    match payment_method::remove(&pmid) {
        Ok(_) => Custom(Status::Ok, Json(reqres::RemovedResponse { id: pmid })),
        Err(e) => Custom(e.status(), Json(Default::default())),
    }
}

// Payments
//-----------------------------------------------

/// Create a payment. Status defaults to `pending`
///
/// Protected: true
#[post("/create", data = "<payment>")]
pub async fn create_payment(
    payment: Json<models::Payment>,
    _token: auth::BearerToken,
) -> Custom<Json<models::Payment>> {
    match payment::create(payment) {
        Ok(p) => Custom(Status::Created, Json(p)),
        Err(e) => Custom(e.status(), Json(Default::default())),
    }
}

/// Lookup payments matching the filters in the request body
///
/// Protected: true
#[post("/", data = "<r_list>")]
pub async fn get_payments(
    r_list: Json<reqres::ListRequest>,
    _token: auth::BearerToken,
) -> Custom<Json<Vec<models::Payment>>> {
    match payment::find_all(&r_list.filters) {
        Ok(v) => Custom(Status::Ok, Json(v)),
        Err(e) => Custom(e.status(), Json(Default::default())),
    }
}

/// Get a payment by passing id
///
/// Protected: true
#[get("/<pid>")]
pub async fn get_payment(pid: String, _token: auth::BearerToken) -> Custom<Json<models::Payment>> {
    match payment::find(&pid) {
        Ok(p) => Custom(Status::Ok, Json(p)),
        Err(e) => Custom(e.status(), Json(Default::default())),
    }
}

/// Update a payment. The id in the path wins over the body
///
/// Protected: true
#[put("/<pid>", data = "<payment>")]
pub async fn update_payment(
    pid: String,
    payment: Json<models::Payment>,
    _token: auth::BearerToken,
) -> Custom<Json<models::Payment>> {
    let mut u_payment = payment.into_inner();
    u_payment.pid = pid;
    match payment::modify(Json(u_payment)) {
        Ok(p) => Custom(Status::Ok, Json(p)),
        Err(e) => Custom(e.status(), Json(Default::default())),
    }
}

/// Archive a payment
///
/// Protected: true
#[delete("/<pid>")]
pub async fn delete_payment(
    pid: String,
    _token: auth::BearerToken,
) -> Custom<Json<reqres::RemovedResponse>> {
    match payment::remove(&pid) {
        Ok(_) => Custom(Status::Ok, Json(reqres::RemovedResponse { id: pid })),
        Err(e) => Custom(e.status(), Json(Default::default())),
    }
}

// Proposals
//-----------------------------------------------

/// Create a proposal. Status defaults to `pending`
///
/// Protected: true
#[post("/create", data = "<proposal>")]
pub async fn create_proposal(
    proposal: Json<models::Proposal>,
    _token: auth::BearerToken,
) -> Custom<Json<models::Proposal>> {
    match proposal::create(proposal) {
        Ok(p) => Custom(Status::Created, Json(p)),
        Err(e) => Custom(e.status(), Json(Default::default())),
    }
}

/// Lookup proposals matching the filters in the request body
///
/// Protected: true
#[post("/", data = "<r_list>")]
pub async fn get_proposals(
    r_list: Json<reqres::ListRequest>,
    _token: auth::BearerToken,
) -> Custom<Json<Vec<models::Proposal>>> {
    match proposal::find_all(&r_list.filters) {
        Ok(v) => Custom(Status::Ok, Json(v)),
        Err(e) => Custom(e.status(), Json(Default::default())),
    }
}

/// Get a proposal by passing id
///
/// Protected: true
#[get("/<prid>")]
pub async fn get_proposal(
    prid: String,
    _token: auth::BearerToken,
) -> Custom<Json<models::Proposal>> {
    match proposal::find(&prid) {
        Ok(p) => Custom(Status::Ok, Json(p)),
        Err(e) => Custom(e.status(), Json(Default::default())),
    }
}

/// Update a proposal. The id in the path wins over the body
///
/// Protected: true
#[put("/<prid>", data = "<proposal>")]
pub async fn update_proposal(
    prid: String,
    proposal: Json<models::Proposal>,
    _token: auth::BearerToken,
) -> Custom<Json<models::Proposal>> {
    let mut u_proposal = proposal.into_inner();
    u_proposal.prid = prid;
    match proposal::modify(Json(u_proposal)) {
        Ok(p) => Custom(Status::Ok, Json(p)),
        Err(e) => Custom(e.status(), Json(Default::default())),
    }
}

/// Archive a proposal
///
/// Protected: true
#[delete("/<prid>")]
pub async fn delete_proposal(
    prid: String,
    _token: auth::BearerToken,
) -> Custom<Json<reqres::RemovedResponse>> {
    match proposal::remove(&prid) {
        Ok(_) => Custom(Status::Ok, Json(reqres::RemovedResponse { id: prid })),
        Err(e) => Custom(e.status(), Json(Default::default())),
    }
}

// Tickets
//-----------------------------------------------

/// Create a support ticket. Status and priority get defaults when empty
///
/// Protected: true
#[post("/create", data = "<ticket>")]
pub async fn create_ticket(
    ticket: Json<models::Ticket>,
    _token: auth::BearerToken,
) -> Custom<Json<models::Ticket>> {
    match ticket::create(ticket) {
        Ok(t) => Custom(Status::Created, Json(t)),
        Err(e) => Custom(e.status(), Json(Default::default())),
    }
}

/// Lookup tickets matching the filters in the request body
///
/// Protected: true
#[post("/", data = "<r_list>")]
pub async fn get_tickets(
    r_list: Json<reqres::ListRequest>,
    _token: auth::BearerToken,
) -> Custom<Json<Vec<models::Ticket>>> {
    match ticket::find_all(&r_list.filters) {
        Ok(v) => Custom(Status::Ok, Json(v)),
        Err(e) => Custom(e.status(), Json(Default::default())),
    }
}

/// Get a ticket by passing id
///
/// Protected: true
#[get("/<tid>")]
pub async fn get_ticket(tid: String, _token: auth::BearerToken) -> Custom<Json<models::Ticket>> {
    match ticket::find(&tid) {
        Ok(t) => Custom(Status::Ok, Json(t)),
        Err(e) => Custom(e.status(), Json(Default::default())),
    }
}

/// Update a ticket. The id in the path wins over the body
///
/// Protected: true
#[put("/<tid>", data = "<ticket>")]
pub async fn update_ticket(
    tid: String,
    ticket: Json<models::Ticket>,
    _token: auth::BearerToken,
) -> Custom<Json<models::Ticket>> {
    let mut u_ticket = ticket.into_inner();
    u_ticket.tid = tid;
    match ticket::modify(Json(u_ticket)) {
        Ok(t) => Custom(Status::Ok, Json(t)),
        Err(e) => Custom(e.status(), Json(Default::default())),
    }
}

/// Archive a ticket
///
/// Protected: true
#[delete("/<tid>")]
pub async fn delete_ticket(
    tid: String,
    _token: auth::BearerToken,
) -> Custom<Json<reqres::RemovedResponse>> {
    match ticket::remove(&tid) {
        Ok(_) => Custom(Status::Ok, Json(reqres::RemovedResponse { id: tid })),
        Err(e) => Custom(e.status(), Json(Default::default())),
    }
}

// Users
//-----------------------------------------------

/// Create a user directly. Registration normally goes through the auth server
///
/// Protected: true
#[post("/create", data = "<user>")]
pub async fn create_user(
    user: Json<models::User>,
    _token: auth::BearerToken,
) -> Custom<Json<models::User>> {
    match user::create(user) {
        Ok(u) => Custom(Status::Created, Json(u)),
        Err(e) => Custom(e.status(), Json(Default::default())),
    }
}

/// Lookup users matching the filters in the request body
///
/// Protected: true
#[post("/", data = "<r_list>")]
pub async fn get_users(
    r_list: Json<reqres::ListRequest>,
    _token: auth::BearerToken,
) -> Custom<Json<Vec<models::User>>> {
    match user::find_all(&r_list.filters) {
        Ok(v) => Custom(Status::Ok, Json(v)),
        Err(e) => Custom(e.status(), Json(Default::default())),
    }
}

/// Get a user by passing id
///
/// Protected: true
#[get("/<uid>")]
pub async fn get_user(uid: String, _token: auth::BearerToken) -> Custom<Json<models::User>> {
    match user::find(&uid) {
        Ok(u) => Custom(Status::Ok, Json(u)),
        Err(e) => Custom(e.status(), Json(Default::default())),
    }
}

/// Update a user. The id in the path wins over the body
///
/// Protected: true
#[put("/<uid>", data = "<user>")]
pub async fn update_user(
    uid: String,
    user: Json<models::User>,
    _token: auth::BearerToken,
) -> Custom<Json<models::User>> {
    let mut u_user = user.into_inner();
    u_user.uid = uid;
    match user::modify(Json(u_user)) {
        Ok(u) => Custom(Status::Ok, Json(u)),
        Err(e) => Custom(e.status(), Json(Default::default())),
    }
}

/// Archive a user
///
/// Protected: true
#[delete("/<uid>")]
pub async fn delete_user(
    uid: String,
    _token: auth::BearerToken,
) -> Custom<Json<reqres::RemovedResponse>> {
    match user::remove(&uid) {
        Ok(_) => Custom(Status::Ok, Json(reqres::RemovedResponse { id: uid })),
        Err(e) => Custom(e.status(), Json(Default::default())),
    }
}

// Withdrawals
//-----------------------------------------------

/// Create a withdrawal destination.
///
/// Setting `isDefault` clears the flag on the user's other destinations
///
/// Protected: true
#[post("/create", data = "<withdraw>")]
pub async fn create_withdraw(
    withdraw: Json<models::Withdraw>,
    _token: auth::BearerToken,
) -> Custom<Json<models::Withdraw>> {
    match withdraw::create(withdraw) {
        Ok(w) => Custom(Status::Created, Json(w)),
        Err(e) => Custom(e.status(), Json(Default::default())),
    }
}

/// Lookup withdrawal destinations matching the filters in the request body
///
/// Protected: true
#[post("/", data = "<r_list>")]
pub async fn get_withdraws(
    r_list: Json<reqres::ListRequest>,
    _token: auth::BearerToken,
) -> Custom<Json<Vec<models::Withdraw>>> {
    match withdraw::find_all(&r_list.filters) {
        Ok(v) => Custom(Status::Ok, Json(v)),
        Err(e) => Custom(e.status(), Json(Default::default())),
    }
}

/// Get a withdrawal destination by passing id
///
/// Protected: true
#[get("/<wid>")]
pub async fn get_withdraw(wid: String, _token: auth::BearerToken) -> Custom<Json<models::Withdraw>> {
    match withdraw::find(&wid) {
        Ok(w) => Custom(Status::Ok, Json(w)),
        Err(e) => Custom(e.status(), Json(Default::default())),
    }
}

/// Update a withdrawal destination.
///
/// Setting `isDefault` clears the flag on the user's other destinations
///
/// Protected: true
#[put("/<wid>", data = "<withdraw>")]
pub async fn update_withdraw(
    wid: String,
    withdraw: Json<models::Withdraw>,
    _token: auth::BearerToken,
) -> Custom<Json<models::Withdraw>> {
    let mut u_withdraw = withdraw.into_inner();
    u_withdraw.wid = wid;
    match withdraw::modify(Json(u_withdraw)) {
        Ok(w) => Custom(Status::Ok, Json(w)),
        Err(e) => Custom(e.status(), Json(Default::default())),
    }
}

/// Archive a withdrawal destination
///
/// Protected: true
#[delete("/<wid>")]
pub async fn delete_withdraw(
    wid: String,
    _token: auth::BearerToken,
) -> Custom<Json<reqres::RemovedResponse>> {
    match withdraw::remove(&wid) {
        Ok(_) => Custom(Status::Ok, Json(reqres::RemovedResponse { id: wid })),
        Err(e) => Custom(e.status(), Json(Default::default())),
    }
}

// Catchers
//----------------------------------------------------------------

#[catch(400)]
pub fn bad_request() -> Custom<Json<reqres::ErrorResponse>> {
    Custom(
        Status::BadRequest,
        Json(reqres::ErrorResponse {
            error: String::from("Bad request"),
        }),
    )
}

#[catch(401)]
pub fn unauthorized() -> Custom<Json<reqres::ErrorResponse>> {
    Custom(
        Status::Unauthorized,
        Json(reqres::ErrorResponse {
            error: String::from("Invalid or expired token"),
        }),
    )
}

#[catch(404)]
pub fn not_found() -> Custom<Json<reqres::ErrorResponse>> {
    Custom(
        Status::NotFound,
        Json(reqres::ErrorResponse {
            error: String::from("Resource does not exist"),
        }),
    )
}

#[catch(500)]
pub fn internal_error() -> Custom<Json<reqres::ErrorResponse>> {
    Custom(
        Status::InternalServerError,
        Json(reqres::ErrorResponse {
            error: String::from("Internal server error"),
        }),
    )
}

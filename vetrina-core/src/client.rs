//! HTTP client for the resource and auth servers

use crate::{
    error::VetrinaError,
    filter,
    models::*,
    reqres,
};
use log::{
    debug,
    error,
    info,
};
use serde::{
    de::DeserializeOwned,
    Serialize,
};

/// Map a response status to our error type
pub fn ensure_success(status: reqwest::StatusCode) -> Result<(), VetrinaError> {
    if !status.is_success() {
        error!("request failed with status: {}", status);
        return Err(VetrinaError::Http);
    }
    Ok(())
}

async fn post_json<B, T>(url: String, token: &String, body: &B) -> Result<T, VetrinaError>
where
    B: Serialize + ?Sized,
    T: DeserializeOwned + std::fmt::Debug,
{
    let client = reqwest::Client::new();
    match client
        .post(url)
        .header("token", token)
        .json(body)
        .send()
        .await
    {
        Ok(response) => {
            ensure_success(response.status())?;
            let res = response.json::<T>().await;
            debug!("response: {:?}", res);
            match res {
                Ok(r) => Ok(r),
                _ => Err(VetrinaError::Http),
            }
        }
        Err(e) => {
            error!("request failed due to: {:?}", e);
            Err(VetrinaError::Http)
        }
    }
}

async fn get_json<T>(url: String, token: &String) -> Result<T, VetrinaError>
where
    T: DeserializeOwned + std::fmt::Debug,
{
    let client = reqwest::Client::new();
    match client.get(url).header("token", token).send().await {
        Ok(response) => {
            ensure_success(response.status())?;
            let res = response.json::<T>().await;
            debug!("response: {:?}", res);
            match res {
                Ok(r) => Ok(r),
                _ => Err(VetrinaError::Http),
            }
        }
        Err(e) => {
            error!("request failed due to: {:?}", e);
            Err(VetrinaError::Http)
        }
    }
}

async fn put_json<B, T>(url: String, token: &String, body: &B) -> Result<T, VetrinaError>
where
    B: Serialize + ?Sized,
    T: DeserializeOwned + std::fmt::Debug,
{
    let client = reqwest::Client::new();
    match client
        .put(url)
        .header("token", token)
        .json(body)
        .send()
        .await
    {
        Ok(response) => {
            ensure_success(response.status())?;
            let res = response.json::<T>().await;
            debug!("response: {:?}", res);
            match res {
                Ok(r) => Ok(r),
                _ => Err(VetrinaError::Http),
            }
        }
        Err(e) => {
            error!("request failed due to: {:?}", e);
            Err(VetrinaError::Http)
        }
    }
}

async fn delete_req(url: String, token: &String) -> Result<(), VetrinaError> {
    let client = reqwest::Client::new();
    match client.delete(url).header("token", token).send().await {
        Ok(response) => ensure_success(response.status()),
        Err(e) => {
            error!("request failed due to: {:?}", e);
            Err(VetrinaError::Http)
        }
    }
}

// Auth
//-------------------------------------------------------------------------------

/// Register a new account against the auth server
pub async fn register(
    host: &String,
    request: &reqres::RegisterRequest,
) -> Result<reqres::LoginResponse, VetrinaError> {
    info!("executing register");
    post_json(format!("{}/register", host), &String::new(), request).await
}

/// Login, returning a fresh token and the account
pub async fn login(
    host: &String,
    request: &reqres::LoginRequest,
) -> Result<reqres::LoginResponse, VetrinaError> {
    info!("executing login");
    post_json(format!("{}/login", host), &String::new(), request).await
}

// Billing profiles
//-------------------------------------------------------------------------------

pub async fn create_billing(
    host: &String,
    token: &String,
    billing: &BillingProfile,
) -> Result<BillingProfile, VetrinaError> {
    info!("executing create_billing");
    post_json(format!("{}/billings/create", host), token, billing).await
}

pub async fn get_billings(
    host: &String,
    token: &String,
    filters: &[filter::Filter],
) -> Result<Vec<BillingProfile>, VetrinaError> {
    info!("executing get_billings");
    let body = reqres::ListRequest {
        filters: filters.to_vec(),
    };
    post_json(format!("{}/billings", host), token, &body).await
}

pub async fn get_billing(
    host: &String,
    token: &String,
    id: &String,
) -> Result<BillingProfile, VetrinaError> {
    info!("executing get_billing");
    get_json(format!("{}/billings/{}", host, id), token).await
}

pub async fn update_billing(
    host: &String,
    token: &String,
    id: &String,
    billing: &BillingProfile,
) -> Result<BillingProfile, VetrinaError> {
    info!("executing update_billing");
    put_json(format!("{}/billings/{}", host, id), token, billing).await
}

pub async fn delete_billing(
    host: &String,
    token: &String,
    id: &String,
) -> Result<(), VetrinaError> {
    info!("executing delete_billing");
    delete_req(format!("{}/billings/{}", host, id), token).await
}

// Carts
//-------------------------------------------------------------------------------

pub async fn create_cart(
    host: &String,
    token: &String,
    cart: &Cart,
) -> Result<Cart, VetrinaError> {
    info!("executing create_cart");
    post_json(format!("{}/carts/create", host), token, cart).await
}

pub async fn get_carts(
    host: &String,
    token: &String,
    filters: &[filter::Filter],
) -> Result<Vec<Cart>, VetrinaError> {
    info!("executing get_carts");
    let body = reqres::ListRequest {
        filters: filters.to_vec(),
    };
    post_json(format!("{}/carts", host), token, &body).await
}

pub async fn get_cart(host: &String, token: &String, id: &String) -> Result<Cart, VetrinaError> {
    info!("executing get_cart");
    get_json(format!("{}/carts/{}", host, id), token).await
}

pub async fn update_cart(
    host: &String,
    token: &String,
    id: &String,
    cart: &Cart,
) -> Result<Cart, VetrinaError> {
    info!("executing update_cart");
    put_json(format!("{}/carts/{}", host, id), token, cart).await
}

pub async fn delete_cart(host: &String, token: &String, id: &String) -> Result<(), VetrinaError> {
    info!("executing delete_cart");
    delete_req(format!("{}/carts/{}", host, id), token).await
}

// Disputes
//-------------------------------------------------------------------------------

pub async fn create_dispute(
    host: &String,
    token: &String,
    dispute: &Dispute,
) -> Result<Dispute, VetrinaError> {
    info!("executing create_dispute");
    post_json(format!("{}/disputes/create", host), token, dispute).await
}

pub async fn get_disputes(
    host: &String,
    token: &String,
    filters: &[filter::Filter],
) -> Result<Vec<Dispute>, VetrinaError> {
    info!("executing get_disputes");
    let body = reqres::ListRequest {
        filters: filters.to_vec(),
    };
    post_json(format!("{}/disputes", host), token, &body).await
}

pub async fn get_dispute(
    host: &String,
    token: &String,
    id: &String,
) -> Result<Dispute, VetrinaError> {
    info!("executing get_dispute");
    get_json(format!("{}/disputes/{}", host, id), token).await
}

pub async fn update_dispute(
    host: &String,
    token: &String,
    id: &String,
    dispute: &Dispute,
) -> Result<Dispute, VetrinaError> {
    info!("executing update_dispute");
    put_json(format!("{}/disputes/{}", host, id), token, dispute).await
}

pub async fn delete_dispute(
    host: &String,
    token: &String,
    id: &String,
) -> Result<(), VetrinaError> {
    info!("executing delete_dispute");
    delete_req(format!("{}/disputes/{}", host, id), token).await
}

// Invoices
//-------------------------------------------------------------------------------

pub async fn create_invoice(
    host: &String,
    token: &String,
    invoice: &Invoice,
) -> Result<Invoice, VetrinaError> {
    info!("executing create_invoice");
    post_json(format!("{}/invoices/create", host), token, invoice).await
}

pub async fn get_invoices(
    host: &String,
    token: &String,
    filters: &[filter::Filter],
) -> Result<Vec<Invoice>, VetrinaError> {
    info!("executing get_invoices");
    let body = reqres::ListRequest {
        filters: filters.to_vec(),
    };
    post_json(format!("{}/invoices", host), token, &body).await
}

pub async fn get_invoice(
    host: &String,
    token: &String,
    id: &String,
) -> Result<Invoice, VetrinaError> {
    info!("executing get_invoice");
    get_json(format!("{}/invoices/{}", host, id), token).await
}

pub async fn update_invoice(
    host: &String,
    token: &String,
    id: &String,
    invoice: &Invoice,
) -> Result<Invoice, VetrinaError> {
    info!("executing update_invoice");
    put_json(format!("{}/invoices/{}", host, id), token, invoice).await
}

pub async fn delete_invoice(
    host: &String,
    token: &String,
    id: &String,
) -> Result<(), VetrinaError> {
    info!("executing delete_invoice");
    delete_req(format!("{}/invoices/{}", host, id), token).await
}

// Notifications
//-------------------------------------------------------------------------------

pub async fn create_notification(
    host: &String,
    token: &String,
    notification: &Notification,
) -> Result<Notification, VetrinaError> {
    info!("executing create_notification");
    post_json(format!("{}/notifications/create", host), token, notification).await
}

pub async fn get_notifications(
    host: &String,
    token: &String,
    filters: &[filter::Filter],
) -> Result<Vec<Notification>, VetrinaError> {
    info!("executing get_notifications");
    let body = reqres::ListRequest {
        filters: filters.to_vec(),
    };
    post_json(format!("{}/notifications", host), token, &body).await
}

pub async fn get_notification(
    host: &String,
    token: &String,
    id: &String,
) -> Result<Notification, VetrinaError> {
    info!("executing get_notification");
    get_json(format!("{}/notifications/{}", host, id), token).await
}

pub async fn update_notification(
    host: &String,
    token: &String,
    id: &String,
    notification: &Notification,
) -> Result<Notification, VetrinaError> {
    info!("executing update_notification");
    put_json(format!("{}/notifications/{}", host, id), token, notification).await
}

pub async fn delete_notification(
    host: &String,
    token: &String,
    id: &String,
) -> Result<(), VetrinaError> {
    info!("executing delete_notification");
    delete_req(format!("{}/notifications/{}", host, id), token).await
}

// Payment methods
//-------------------------------------------------------------------------------

pub async fn create_payment_method(
    host: &String,
    token: &String,
    method: &PaymentMethod,
) -> Result<PaymentMethod, VetrinaError> {
    info!("executing create_payment_method");
    post_json(format!("{}/paymentMethods/create", host), token, method).await
}

pub async fn get_payment_methods(
    host: &String,
    token: &String,
    filters: &[filter::Filter],
) -> Result<Vec<PaymentMethod>, VetrinaError> {
    info!("executing get_payment_methods");
    let body = reqres::ListRequest {
        filters: filters.to_vec(),
    };
    post_json(format!("{}/paymentMethods", host), token, &body).await
}

pub async fn get_payment_method(
    host: &String,
    token: &String,
    id: &String,
) -> Result<PaymentMethod, VetrinaError> {
    info!("executing get_payment_method");
    get_json(format!("{}/paymentMethods/{}", host, id), token).await
}

pub async fn update_payment_method(
    host: &String,
    token: &String,
    id: &String,
    method: &PaymentMethod,
) -> Result<PaymentMethod, VetrinaError> {
    info!("executing update_payment_method");
    put_json(format!("{}/paymentMethods/{}", host, id), token, method).await
}

pub async fn delete_payment_method(
    host: &String,
    token: &String,
    id: &String,
) -> Result<(), VetrinaError> {
    info!("executing delete_payment_method");
    delete_req(format!("{}/paymentMethods/{}", host, id), token).await
}

// Payments
//-------------------------------------------------------------------------------

pub async fn create_payment(
    host: &String,
    token: &String,
    payment: &Payment,
) -> Result<Payment, VetrinaError> {
    info!("executing create_payment");
    post_json(format!("{}/payments/create", host), token, payment).await
}

pub async fn get_payments(
    host: &String,
    token: &String,
    filters: &[filter::Filter],
) -> Result<Vec<Payment>, VetrinaError> {
    info!("executing get_payments");
    let body = reqres::ListRequest {
        filters: filters.to_vec(),
    };
    post_json(format!("{}/payments", host), token, &body).await
}

pub async fn get_payment(
    host: &String,
    token: &String,
    id: &String,
) -> Result<Payment, VetrinaError> {
    info!("executing get_payment");
    get_json(format!("{}/payments/{}", host, id), token).await
}

pub async fn update_payment(
    host: &String,
    token: &String,
    id: &String,
    payment: &Payment,
) -> Result<Payment, VetrinaError> {
    info!("executing update_payment");
    put_json(format!("{}/payments/{}", host, id), token, payment).await
}

pub async fn delete_payment(
    host: &String,
    token: &String,
    id: &String,
) -> Result<(), VetrinaError> {
    info!("executing delete_payment");
    delete_req(format!("{}/payments/{}", host, id), token).await
}

// Proposals
//-------------------------------------------------------------------------------

pub async fn create_proposal(
    host: &String,
    token: &String,
    proposal: &Proposal,
) -> Result<Proposal, VetrinaError> {
    info!("executing create_proposal");
    post_json(format!("{}/proposals/create", host), token, proposal).await
}

pub async fn get_proposals(
    host: &String,
    token: &String,
    filters: &[filter::Filter],
) -> Result<Vec<Proposal>, VetrinaError> {
    info!("executing get_proposals");
    let body = reqres::ListRequest {
        filters: filters.to_vec(),
    };
    post_json(format!("{}/proposals", host), token, &body).await
}

pub async fn get_proposal(
    host: &String,
    token: &String,
    id: &String,
) -> Result<Proposal, VetrinaError> {
    info!("executing get_proposal");
    get_json(format!("{}/proposals/{}", host, id), token).await
}

pub async fn update_proposal(
    host: &String,
    token: &String,
    id: &String,
    proposal: &Proposal,
) -> Result<Proposal, VetrinaError> {
    info!("executing update_proposal");
    put_json(format!("{}/proposals/{}", host, id), token, proposal).await
}

pub async fn delete_proposal(
    host: &String,
    token: &String,
    id: &String,
) -> Result<(), VetrinaError> {
    info!("executing delete_proposal");
    delete_req(format!("{}/proposals/{}", host, id), token).await
}

// Tickets
//-------------------------------------------------------------------------------

pub async fn create_ticket(
    host: &String,
    token: &String,
    ticket: &Ticket,
) -> Result<Ticket, VetrinaError> {
    info!("executing create_ticket");
    post_json(format!("{}/tickets/create", host), token, ticket).await
}

pub async fn get_tickets(
    host: &String,
    token: &String,
    filters: &[filter::Filter],
) -> Result<Vec<Ticket>, VetrinaError> {
    info!("executing get_tickets");
    let body = reqres::ListRequest {
        filters: filters.to_vec(),
    };
    post_json(format!("{}/tickets", host), token, &body).await
}

pub async fn get_ticket(
    host: &String,
    token: &String,
    id: &String,
) -> Result<Ticket, VetrinaError> {
    info!("executing get_ticket");
    get_json(format!("{}/tickets/{}", host, id), token).await
}

pub async fn update_ticket(
    host: &String,
    token: &String,
    id: &String,
    ticket: &Ticket,
) -> Result<Ticket, VetrinaError> {
    info!("executing update_ticket");
    put_json(format!("{}/tickets/{}", host, id), token, ticket).await
}

pub async fn delete_ticket(
    host: &String,
    token: &String,
    id: &String,
) -> Result<(), VetrinaError> {
    info!("executing delete_ticket");
    delete_req(format!("{}/tickets/{}", host, id), token).await
}

// Users
//-------------------------------------------------------------------------------

pub async fn create_user(
    host: &String,
    token: &String,
    user: &User,
) -> Result<User, VetrinaError> {
    info!("executing create_user");
    post_json(format!("{}/users/create", host), token, user).await
}

pub async fn get_users(
    host: &String,
    token: &String,
    filters: &[filter::Filter],
) -> Result<Vec<User>, VetrinaError> {
    info!("executing get_users");
    let body = reqres::ListRequest {
        filters: filters.to_vec(),
    };
    post_json(format!("{}/users", host), token, &body).await
}

pub async fn get_user(host: &String, token: &String, id: &String) -> Result<User, VetrinaError> {
    info!("executing get_user");
    get_json(format!("{}/users/{}", host, id), token).await
}

pub async fn update_user(
    host: &String,
    token: &String,
    id: &String,
    user: &User,
) -> Result<User, VetrinaError> {
    info!("executing update_user");
    put_json(format!("{}/users/{}", host, id), token, user).await
}

pub async fn delete_user(host: &String, token: &String, id: &String) -> Result<(), VetrinaError> {
    info!("executing delete_user");
    delete_req(format!("{}/users/{}", host, id), token).await
}

// Withdraws
//-------------------------------------------------------------------------------

pub async fn create_withdraw(
    host: &String,
    token: &String,
    withdraw: &Withdraw,
) -> Result<Withdraw, VetrinaError> {
    info!("executing create_withdraw");
    post_json(format!("{}/withdraws/create", host), token, withdraw).await
}

pub async fn get_withdraws(
    host: &String,
    token: &String,
    filters: &[filter::Filter],
) -> Result<Vec<Withdraw>, VetrinaError> {
    info!("executing get_withdraws");
    let body = reqres::ListRequest {
        filters: filters.to_vec(),
    };
    post_json(format!("{}/withdraws", host), token, &body).await
}

pub async fn get_withdraw(
    host: &String,
    token: &String,
    id: &String,
) -> Result<Withdraw, VetrinaError> {
    info!("executing get_withdraw");
    get_json(format!("{}/withdraws/{}", host, id), token).await
}

pub async fn update_withdraw(
    host: &String,
    token: &String,
    id: &String,
    withdraw: &Withdraw,
) -> Result<Withdraw, VetrinaError> {
    info!("executing update_withdraw");
    put_json(format!("{}/withdraws/{}", host, id), token, withdraw).await
}

pub async fn delete_withdraw(
    host: &String,
    token: &String,
    id: &String,
) -> Result<(), VetrinaError> {
    info!("executing delete_withdraw");
    delete_req(format!("{}/withdraws/{}", host, id), token).await
}

// Tests
//-------------------------------------------------------------------------------

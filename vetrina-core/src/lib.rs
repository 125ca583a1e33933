pub mod args;
pub mod auth;
pub mod billing;
pub mod cart;
pub mod client;
pub mod db;
pub mod dispute;
pub mod error;
pub mod filter;
pub mod invoice;
pub mod models;
pub mod notification;
pub mod payment;
pub mod payment_method;
pub mod proposal;
pub mod reqres;
pub mod social;
pub mod store;
pub mod ticket;
pub mod user;
pub mod utils;
pub mod withdraw;

pub const APP_NAME: &str = "vetrina";
pub const VETRINA_JWT_SECRET_KEY: &str = "VETRINA_JWT_SECRET_KEY";

// LMDB Keys
pub const BILLING_DB_KEY:               &str = "b";
pub const CART_DB_KEY:                  &str = "crt";
pub const CREDENTIAL_DB_KEY:            &str = "crd";
pub const DISPUTE_DB_KEY:               &str = "d";
pub const INVOICE_DB_KEY:               &str = "inv";
pub const NOTIFICATION_DB_KEY:          &str = "n";
pub const PAYMENT_DB_KEY:               &str = "pay";
pub const PAYMENT_METHOD_DB_KEY:        &str = "pm";
pub const PROPOSAL_DB_KEY:              &str = "pro";
pub const TICKET_DB_KEY:                &str = "t";
pub const USER_DB_KEY:                  &str = "u";
pub const WITHDRAW_DB_KEY:              &str = "w";
pub const IG_TOKEN_DB_KEY:              &str = "igt";
pub const BILLING_LIST_DB_KEY:          &str = "bl";
pub const CART_LIST_DB_KEY:             &str = "crtl";
pub const DISPUTE_LIST_DB_KEY:          &str = "dl";
pub const INVOICE_LIST_DB_KEY:          &str = "invl";
pub const NOTIFICATION_LIST_DB_KEY:     &str = "nl";
pub const PAYMENT_LIST_DB_KEY:          &str = "payl";
pub const PAYMENT_METHOD_LIST_DB_KEY:   &str = "pml";
pub const PROPOSAL_LIST_DB_KEY:         &str = "prol";
pub const TICKET_LIST_DB_KEY:           &str = "tl";
pub const USER_LIST_DB_KEY:             &str = "ul";
pub const WITHDRAW_LIST_DB_KEY:         &str = "wl";
// End LMDB Keys

/// Environment variable for the Instagram app client id
pub const VETRINA_IG_CLIENT_ID: &str = "VETRINA_IG_CLIENT_ID";
/// Environment variable for the Instagram app client secret
pub const VETRINA_IG_CLIENT_SECRET: &str = "VETRINA_IG_CLIENT_SECRET";
/// Environment variable for the Instagram oauth redirect uri
pub const VETRINA_IG_REDIRECT_URI: &str = "VETRINA_IG_REDIRECT_URI";
/// Environment variable for the Instagram webhook verify token
pub const VETRINA_IG_VERIFY_TOKEN: &str = "VETRINA_IG_VERIFY_TOKEN";
/// Environment variable for overriding the Instagram api host
pub const VETRINA_IG_API_HOST: &str = "VETRINA_IG_API_HOST";

/// Default host for the Instagram code exchange
pub const DEFAULT_IG_API_HOST: &str = "https://api.instagram.com";

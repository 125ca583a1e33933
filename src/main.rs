#[macro_use]
extern crate rocket;

use vetrina::*;
use vetrina_core::*;

// The only changes in here should be mounting new controller methods
#[launch]
async fn rocket() -> _ {
    let config = rocket::Config {
        ident: rocket::config::Ident::none(),
        ip_header: None,
        port: utils::get_app_port(),
        ..rocket::Config::debug_default()
    };
    env_logger::init();
    utils::start_up().unwrap_or_else(|_| log::error!("start up failure"));
    rocket::custom(&config)
        .register(
            "/",
            catchers![
                controller::bad_request,
                controller::unauthorized,
                controller::not_found,
                controller::internal_error
            ],
        )
        .mount(
            "/billings",
            routes![
                controller::create_billing,
                controller::get_billings,
                controller::get_billing,
                controller::update_billing,
                controller::delete_billing
            ],
        )
        .mount(
            "/carts",
            routes![
                controller::create_cart,
                controller::get_carts,
                controller::get_cart,
                controller::update_cart,
                controller::delete_cart
            ],
        )
        .mount(
            "/disputes",
            routes![
                controller::create_dispute,
                controller::get_disputes,
                controller::get_dispute,
                controller::update_dispute,
                controller::delete_dispute
            ],
        )
        .mount(
            "/invoices",
            routes![
                controller::create_invoice,
                controller::get_invoices,
                controller::get_invoice,
                controller::update_invoice,
                controller::delete_invoice
            ],
        )
        .mount(
            "/notifications",
            routes![
                controller::create_notification,
                controller::get_notifications,
                controller::get_notification,
                controller::update_notification,
                controller::delete_notification
            ],
        )
        .mount(
            "/paymentMethods",
            routes![
                controller::create_payment_method,
                controller::get_payment_methods,
                controller::get_payment_method,
                controller::update_payment_method,
                controller::delete_payment_method
            ],
        )
        .mount(
            "/payments",
            routes![
                controller::create_payment,
                controller::get_payments,
                controller::get_payment,
                controller::update_payment,
                controller::delete_payment
            ],
        )
        .mount(
            "/proposals",
            routes![
                controller::create_proposal,
                controller::get_proposals,
                controller::get_proposal,
                controller::update_proposal,
                controller::delete_proposal
            ],
        )
        .mount(
            "/tickets",
            routes![
                controller::create_ticket,
                controller::get_tickets,
                controller::get_ticket,
                controller::update_ticket,
                controller::delete_ticket
            ],
        )
        .mount(
            "/users",
            routes![
                controller::create_user,
                controller::get_users,
                controller::get_user,
                controller::update_user,
                controller::delete_user
            ],
        )
        .mount(
            "/withdraws",
            routes![
                controller::create_withdraw,
                controller::get_withdraws,
                controller::get_withdraw,
                controller::update_withdraw,
                controller::delete_withdraw
            ],
        )
}

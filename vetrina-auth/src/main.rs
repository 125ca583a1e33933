#[macro_use]
extern crate rocket;

use vetrina_auth::*;
use vetrina_core::*;

// The only changes in here should be mounting new controller methods

#[launch]
async fn rocket() -> _ {
    let config = rocket::Config {
        port: utils::get_app_auth_port(),
        ..rocket::Config::debug_default()
    };
    env_logger::init();
    utils::gen_signing_keys().unwrap_or_else(|_| log::error!("signing key failure"));
    log::info!("vetrina-auth is online");
    rocket::custom(&config).mount("/", routes![controller::register, controller::login])
}

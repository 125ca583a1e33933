#[macro_use]
extern crate rocket;

use vetrina_core::*;
use vetrina_social::*;

// The only changes in here should be mounting new controller methods

#[launch]
async fn rocket() -> _ {
    let config = rocket::Config {
        port: utils::get_app_social_port(),
        ..rocket::Config::debug_default()
    };
    env_logger::init();
    log::info!("vetrina-social is online");
    rocket::custom(&config).mount(
        "/",
        routes![
            controller::index,
            controller::about,
            controller::webhook_instagram,
            controller::cb_instagram
        ],
    )
}

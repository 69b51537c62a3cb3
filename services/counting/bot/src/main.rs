#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate rocket;

use std::sync::Arc;

use log::info;

use crate::service::CountingService;

mod api;
mod config;
mod error;
mod game;
mod service;

#[rocket::main]
async fn main() {
    env_logger::init();
    let figment = config::figment();
    let config: config::Config = figment.extract().expect("Invalid configuration");

    if config.game.channels.is_empty() {
        info!("Counting in every channel");
    } else {
        info!("Counting in channels {:?}", config.game.channels);
    }

    let service = Arc::new(CountingService::new(config.game));

    let result = rocket::custom(figment)
        .manage(service)
        .mount("/", api::routes())
        .launch()
        .await;

    assert!(result.is_ok());
}

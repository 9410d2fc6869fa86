use std::io;

use actix_web::{App, HttpServer, web};
use actix_web::middleware::Logger;
use log::info;

use crate::api::display::current_display;
use crate::api::lookup::lookup_address;
use crate::config::Settings;
use crate::display::SharedDisplay;
use crate::geo::resolver::AddressResolver;

mod api;
mod config;
mod display;
mod geo;
mod lookup;
mod api_tests;

#[actix_rt::main]
async fn main() -> io::Result<()> {
    let settings = Settings::from_env();
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(settings.log_level.as_str())
    )
    .init();

    let resolver = AddressResolver::new(&settings.geocoder_url, settings.geocoder_timeout)
        .map_err(|err| io::Error::new(io::ErrorKind::Other, err.to_string()))?;
    let resolver = web::Data::new(resolver);
    let shared_display = web::Data::new(SharedDisplay::default());

    info!(
        "Listening on {}, reverse geocoder at {}",
        settings.bind_address, settings.geocoder_url
    );

    HttpServer::new(move || {
        App::new()
            .app_data(resolver.clone())
            .app_data(shared_display.clone())
            .wrap(Logger::default())
            .route("/lookup", web::get().to(lookup_address))
            .route("/display", web::get().to(current_display))
    })
    .bind(settings.bind_address.as_str())?
    .run()
    .await
}

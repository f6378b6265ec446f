use actix_web::{middleware, web, App, HttpServer};
use cocktaildb::Store;

mod config;
mod handlers;

use config::Config;

/// Shared application state
pub struct AppState {
    pub store: Store,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Starting CocktailDB server");

    let config = Config::from_env();

    log::info!("Opening document at: {}", config.data_file.display());
    let store = Store::open(&config.data_file).map_err(std::io::Error::other)?;

    let state = web::Data::new(AppState { store });

    log::info!("Listening on {}:{}", config.host, config.port);
    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(handlers::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}

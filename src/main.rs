use std::io;

use actix_web::http::StatusCode;
use actix_web::middleware::{ErrorHandlers, Logger};
use actix_web::{App, HttpServer, web};
use env_logger::Env;
use log::info;

mod blog;
mod comment;
mod config;
mod database;
mod middleware;
mod router;
mod state;
mod user;
mod utils;
mod views;


use config::AppConfig;
use middleware::error_handler::handle_error;
use middleware::method_override::MethodOverride;
use middleware::not_found::not_found;
use middleware::session::session_middleware;
use router::index::routes;
use state::AppState;
use user::service::UserService;

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config =
        AppConfig::from_env().map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    let db = database::connect_to_mongo(&config)
        .await
        .map_err(|e| io::Error::other(format!("failed to connect to MongoDB: {}", e)))?;

    let users = UserService::new(&db);
    users
        .ensure_indexes()
        .await
        .map_err(|e| io::Error::other(format!("failed to create indexes: {}", e)))?;

    let state = web::Data::new(AppState::new(&db, users, &config));
    let session_key = config.session_key();
    let secure_cookies = config.secure_cookies;

    info!("Starting server on http://{}:{}", config.host, config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(session_middleware(session_key.clone(), secure_cookies))
            .wrap(MethodOverride)
            .wrap(
                ErrorHandlers::new()
                    .handler(StatusCode::NOT_FOUND, not_found)
                    .default_handler(handle_error),
            )
            .wrap(Logger::default())
            .app_data(state.clone())
            .configure(routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    info!("Server has stopped");

    Ok(())
}

mod app_handlers;
mod auth;
mod config;
mod error;
mod interceptor;
mod models;
mod routes;
mod service;
mod store;
mod user_handlers;
mod versioning;

use crate::app_handlers::ServerStart;
use crate::auth::TokenIssuer;
use crate::config::Config;
use crate::service::AuthService;
use crate::store::StaticCredentialStore;
use actix_web::middleware::from_fn;
use actix_web::{web, App, HttpServer};
use std::sync::Arc;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env()
        .inspect_err(|e| log::error!("refusing to start: {}", e))
        .map_err(std::io::Error::other)?;
    let issuer = TokenIssuer::new(&config)
        .inspect_err(|e| log::error!("refusing to start: {}", e))
        .map_err(std::io::Error::other)?;

    let auth = web::Data::new(AuthService::new(
        Arc::new(StaticCredentialStore::default()),
        issuer,
    ));
    let started = web::Data::new(ServerStart::now());

    let addr = config.bind_addr();
    log::info!("Listening on: {}", addr);

    HttpServer::new(move || {
        App::new()
            .app_data(auth.clone())
            .app_data(started.clone())
            .wrap(from_fn(interceptor::intercept))
            .configure(routes::configure)
    })
    .bind(addr)?
    .run()
    .await
}

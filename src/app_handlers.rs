use crate::models::{HealthResponse, InfoResponse, MessageResponse};
use actix_web::{get, web, HttpResponse, Responder};
use chrono::{SecondsFormat, Utc};
use std::time::Instant;

const API_NAME: &str = "Mini Blog API";

/// When the server came up, for the uptime figure.
pub struct ServerStart(Instant);

impl ServerStart {
    pub fn now() -> Self {
        Self(Instant::now())
    }
}

#[get("/")]
pub async fn index() -> impl Responder {
    HttpResponse::Ok().json(MessageResponse {
        message: format!("Welcome to {}", API_NAME),
    })
}

/// Health check (v2)
#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "OK".to_string(),
        message: format!("{} is healthy", API_NAME),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}

/// Name, version and uptime (v1)
#[get("/info")]
pub async fn info(started: web::Data<ServerStart>) -> impl Responder {
    HttpResponse::Ok().json(InfoResponse {
        name: API_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        description: "Authentication API for the mini-blog project".to_string(),
        uptime: started.0.elapsed().as_secs_f64(),
    })
}

use crate::auth::Verified;
use crate::error::ApiError;
use crate::models::{LoginRequest, RegisterRequest};
use crate::service::AuthService;
use actix_web::{get, post, web, HttpResponse, Responder};

#[post("/register")]
pub async fn register(
    auth: web::Data<AuthService>,
    body: web::Json<RegisterRequest>,
) -> Result<HttpResponse, ApiError> {
    let ack = auth.register(&body)?;
    Ok(HttpResponse::Created().json(ack))
}

#[post("/login")]
pub async fn login(
    auth: web::Data<AuthService>,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    body.validate().map_err(ApiError::BadRequest)?;
    log::info!("login attempt for {:?}", body.username);
    let token = auth.login(&body.username, &body.password)?;
    Ok(HttpResponse::Created().json(token))
}

/// Echoes the identity carried by the bearer token.
#[get("/profile")]
pub async fn profile(auth: web::Data<AuthService>, verified: Verified) -> impl Responder {
    HttpResponse::Ok().json(auth.profile(verified.into_inner()))
}

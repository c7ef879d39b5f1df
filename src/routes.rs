use crate::error::json_error;
use crate::versioning::ApiVersion;
use crate::{app_handlers, user_handlers};
use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error))
        .service(app_handlers::index)
        .service(
            web::scope("/auth")
                .service(user_handlers::register)
                .service(user_handlers::login)
                .service(user_handlers::profile),
        )
        .service(ApiVersion::V1.scope().service(app_handlers::info))
        .service(ApiVersion::V2.scope().service(app_handlers::health));
}

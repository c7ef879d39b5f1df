use crate::versioning::ApiVersion;
use actix_web::body::MessageBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::middleware::Next;
use actix_web::{Error, HttpMessage};
use std::fmt;

/// Log target for the per-request access line.
pub const ACCESS_LOG_TARGET: &str = "access";

/// Request details captured on entry, before the status is known.
pub struct PendingEntry {
    method: String,
    path: String,
    client_address: String,
    version: Option<ApiVersion>,
}

/// One access log line.
pub struct RequestLogEntry {
    pending: PendingEntry,
    status: StatusCode,
}

impl PendingEntry {
    pub fn begin(req: &ServiceRequest) -> Self {
        let path = req
            .uri()
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_else(|| req.path().to_string());
        let client_address = req
            .peer_addr()
            .map(|addr| addr.ip().to_string())
            .unwrap_or_else(|| "-".to_string());
        Self {
            method: req.method().to_string(),
            version: ApiVersion::from_path(req.path()).map(|(version, _)| version),
            path,
            client_address,
        }
    }

    pub fn complete(self, status: StatusCode) -> RequestLogEntry {
        RequestLogEntry {
            pending: self,
            status,
        }
    }
}

impl fmt::Display for RequestLogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = &self.pending;
        write!(
            f,
            "[{}] {} - {} - IP: {}",
            p.method,
            p.path,
            self.status.as_u16(),
            p.client_address
        )?;
        if let Some(version) = p.version {
            write!(f, " - api {}", version)?;
        }
        Ok(())
    }
}

/// Wraps every request. The version tag is stored in the request extensions
/// before dispatch. The log line is written once the inner service returns
/// the response head, so it carries the final status.
pub async fn intercept(
    req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    if let Some((version, _)) = ApiVersion::from_path(req.path()) {
        req.extensions_mut().insert(version);
    }
    let pending = PendingEntry::begin(&req);
    match next.call(req).await {
        Ok(res) => {
            log::info!(target: ACCESS_LOG_TARGET, "{}", pending.complete(res.status()));
            Ok(res)
        }
        Err(err) => {
            let status = err.as_response_error().status_code();
            log::info!(target: ACCESS_LOG_TARGET, "{}", pending.complete(status));
            Err(err)
        }
    }
}

use actix_web::{web, Scope};
use std::fmt;

/// URI version tag: handlers mounted under `ApiVersion::V2.scope()` answer
/// on `/v2/...` and nowhere else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiVersion(u16);

impl ApiVersion {
    pub const V1: ApiVersion = ApiVersion(1);
    pub const V2: ApiVersion = ApiVersion(2);

    pub fn prefix(self) -> String {
        format!("/v{}", self.0)
    }

    pub fn scope(self) -> Scope {
        web::scope(&self.prefix())
    }

    /// Splits `/v{n}/rest` into the version and `/rest`.
    pub fn from_path(path: &str) -> Option<(ApiVersion, &str)> {
        let rest = path.strip_prefix("/v")?;
        let end = rest.find('/').unwrap_or(rest.len());
        let digits = &rest[..end];
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let version = digits.parse::<u16>().ok()?;
        Some((ApiVersion(version), &rest[end..]))
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

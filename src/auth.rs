use crate::config::Config;
use crate::error::{ApiError, ConfigError};
use crate::models::{Claims, Identity};
use crate::service::AuthService;
use crate::store::CredentialStore;
use actix_web::dev::Payload;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{web, FromRequest, HttpRequest};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header as JwtHeader, Validation};
use std::future::{ready, Ready};

pub const TOKEN_TTL_SECS: i64 = 60 * 60;

/// Exact comparison against the stored record. A miss is not an error.
pub fn validate_credentials(
    store: &dyn CredentialStore,
    username: &str,
    password: &str,
) -> Option<Identity> {
    store
        .lookup(username)
        .filter(|record| record.password == password)
        .map(|record| Identity {
            user_id: record.user_id,
            username: record.username,
        })
}

/// HS256 signing and verification with the process secret.
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenIssuer {
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        Self::from_secret(config.jwt_secret.as_bytes())
    }

    pub fn from_secret(secret: &[u8]) -> Result<Self, ConfigError> {
        if secret.is_empty() {
            return Err(ConfigError::MissingSecret);
        }
        Ok(Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        })
    }

    pub fn issue(&self, identity: &Identity) -> Result<String, jsonwebtoken::errors::Error> {
        self.issue_at(identity, chrono::Utc::now().timestamp())
    }

    pub fn issue_at(
        &self,
        identity: &Identity,
        now: i64,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let claims = Claims {
            sub: identity.user_id,
            username: identity.username.clone(),
            iat: now,
            exp: now + TOKEN_TTL_SECS,
        };
        encode(&JwtHeader::new(Algorithm::HS256), &claims, &self.encoding)
    }

    pub fn verify(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        self.verify_at(token, chrono::Utc::now().timestamp())
    }

    /// Signature check, then expiry against `now` with no leeway.
    pub fn verify_at(&self, token: &str, now: i64) -> Result<Claims, jsonwebtoken::errors::Error> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        let claims = decode::<Claims>(token, &self.decoding, &validation)?.claims;
        if now >= claims.exp {
            return Err(ErrorKind::ExpiredSignature.into());
        }
        Ok(claims)
    }
}

/// Claims from a bearer token that passed verification.
///
/// Taking this as a handler argument guards the route: requests without a
/// valid, unexpired token are rejected with 401 before the handler runs.
#[derive(Debug)]
pub struct Verified(pub Claims);

impl Verified {
    pub fn into_inner(self) -> Claims {
        self.0
    }
}

impl FromRequest for Verified {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(verify_bearer(req).map(Verified))
    }
}

fn verify_bearer(req: &HttpRequest) -> Result<Claims, ApiError> {
    let auth = req
        .app_data::<web::Data<AuthService>>()
        .ok_or_else(|| ApiError::Internal("auth service not registered".to_string()))?;
    let token = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(bearer_token)
        .ok_or_else(|| {
            log::debug!("missing or malformed bearer header");
            ApiError::unauthorized()
        })?;
    auth.issuer()
        .verify(token)
        .map_err(|e| {
            log::debug!("token rejected: {}", e);
            ApiError::unauthorized()
        })
}

/// Token from an `Authorization: Bearer <token>` value; the scheme is case-insensitive.
fn bearer_token(value: &str) -> Option<&str> {
    let (scheme, token) = value.trim().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

use crate::auth::{validate_credentials, TokenIssuer};
use crate::error::ApiError;
use crate::models::{Claims, LoginResponse, MessageResponse, Profile, RegisterRequest};
use crate::store::CredentialStore;
use std::sync::Arc;

/// Login, registration and profile flows over an injected credential store.
pub struct AuthService {
    store: Arc<dyn CredentialStore>,
    issuer: TokenIssuer,
}

impl AuthService {
    pub fn new(store: Arc<dyn CredentialStore>, issuer: TokenIssuer) -> Self {
        Self { store, issuer }
    }

    pub fn issuer(&self) -> &TokenIssuer {
        &self.issuer
    }

    pub fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError> {
        // same outcome for unknown user and wrong password
        let identity = validate_credentials(self.store.as_ref(), username, password)
            .ok_or_else(ApiError::invalid_credentials)?;
        let access_token = self
            .issuer
            .issue(&identity)
            .map_err(|e| ApiError::Internal(format!("token signing failed: {}", e)))?;
        log::info!("issued token for user {}", identity.user_id);
        Ok(LoginResponse { access_token })
    }

    pub fn profile(&self, claims: Claims) -> Profile {
        Profile {
            user_id: claims.sub,
            username: claims.username,
        }
    }

    /// Acknowledges the payload. Nothing is stored, so the user cannot log in afterwards.
    pub fn register(&self, payload: &RegisterRequest) -> Result<MessageResponse, ApiError> {
        payload.validate().map_err(ApiError::BadRequest)?;
        Ok(MessageResponse {
            message: format!("{} registered successfully", payload.username),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Credential;
    use crate::store::StaticCredentialStore;

    fn service() -> AuthService {
        AuthService::new(
            Arc::new(StaticCredentialStore::default()),
            TokenIssuer::from_secret(b"service-test").unwrap(),
        )
    }

    #[test]
    fn login_then_profile_echoes_identity() {
        let service = service();
        let token = service.login("admin", "1234").unwrap().access_token;
        let claims = service.issuer().verify(&token).unwrap();
        assert_eq!(
            service.profile(claims),
            Profile {
                user_id: 1,
                username: "admin".to_string()
            }
        );
    }

    #[test]
    fn bad_login_gives_same_error_for_either_field() {
        let service = service();
        let wrong_user = service.login("nobody", "1234").unwrap_err();
        let wrong_pass = service.login("admin", "nope").unwrap_err();
        assert_eq!(wrong_user.to_string(), "Invalid credentials");
        assert_eq!(wrong_user.to_string(), wrong_pass.to_string());
    }

    #[test]
    fn store_is_swappable() {
        let store = StaticCredentialStore::new(Credential {
            user_id: 42,
            username: "carol".to_string(),
            password: "hunter22".to_string(),
        });
        let service = AuthService::new(
            Arc::new(store),
            TokenIssuer::from_secret(b"service-test").unwrap(),
        );
        assert!(service.login("admin", "1234").is_err());
        let token = service.login("carol", "hunter22").unwrap().access_token;
        assert_eq!(service.issuer().verify(&token).unwrap().sub, 42);
    }

    #[test]
    fn register_acknowledges_without_persisting() {
        let service = service();
        let ack = service
            .register(&RegisterRequest {
                username: "bob".to_string(),
                password: "secret1".to_string(),
            })
            .unwrap();
        assert!(ack.message.contains("bob"));
        assert!(service.login("bob", "secret1").is_err());

        let err = service
            .register(&RegisterRequest {
                username: "bob".to_string(),
                password: "short".to_string(),
            })
            .unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }

    #[test]
    fn concurrent_logins_each_get_a_token() {
        let service = service();
        let tokens: Vec<String> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| scope.spawn(|| service.login("admin", "1234").unwrap().access_token))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        for token in tokens {
            assert_eq!(service.issuer().verify(&token).unwrap().username, "admin");
        }
    }
}

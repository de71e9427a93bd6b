//! JWT implementation of TokenService.
//!
//! Access and refresh tokens are HS256 JWTs signed with distinct secrets.
//! Claims carry only the user id and expiry. Verification runs with zero
//! leeway so expiry is exact.

use chrono::Utc;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::UserId;
use crate::ports::{TokenError, TokenService};

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    id: String,
    exp: usize,
}

/// Token service backed by `jsonwebtoken`.
pub struct JwtTokenService {
    access_encoding: EncodingKey,
    access_decoding: DecodingKey,
    refresh_encoding: EncodingKey,
    refresh_decoding: DecodingKey,
    access_ttl_secs: i64,
    refresh_ttl_secs: i64,
}

impl JwtTokenService {
    /// 15 minutes.
    pub const DEFAULT_ACCESS_TTL_SECS: i64 = 15 * 60;
    /// 7 days.
    pub const DEFAULT_REFRESH_TTL_SECS: i64 = 7 * 24 * 60 * 60;

    /// Builds the service; fails with `TokenError::Config` when either
    /// secret is empty.
    pub fn new(
        access_secret: &Secret<String>,
        refresh_secret: &Secret<String>,
        access_ttl_secs: i64,
        refresh_ttl_secs: i64,
    ) -> Result<Self, TokenError> {
        let access = access_secret.expose_secret();
        let refresh = refresh_secret.expose_secret();
        if access.is_empty() {
            return Err(TokenError::Config("access token secret is unset".into()));
        }
        if refresh.is_empty() {
            return Err(TokenError::Config("refresh token secret is unset".into()));
        }
        Ok(Self {
            access_encoding: EncodingKey::from_secret(access.as_bytes()),
            access_decoding: DecodingKey::from_secret(access.as_bytes()),
            refresh_encoding: EncodingKey::from_secret(refresh.as_bytes()),
            refresh_decoding: DecodingKey::from_secret(refresh.as_bytes()),
            access_ttl_secs,
            refresh_ttl_secs,
        })
    }

    /// Instance with throwaway secrets and default TTLs, for tests and
    /// local experimentation.
    pub fn for_tests() -> Self {
        Self::new(
            &Secret::new("test-access-secret".to_string()),
            &Secret::new("test-refresh-secret".to_string()),
            Self::DEFAULT_ACCESS_TTL_SECS,
            Self::DEFAULT_REFRESH_TTL_SECS,
        )
        .expect("test secrets are non-empty")
    }

    fn issue(&self, key: &EncodingKey, ttl_secs: i64, user_id: &UserId) -> Result<String, TokenError> {
        let claims = Claims {
            id: user_id.to_string(),
            exp: (Utc::now().timestamp() + ttl_secs) as usize,
        };
        encode(&Header::default(), &claims, key).map_err(|e| TokenError::Config(e.to_string()))
    }

    fn verify(&self, key: &DecodingKey, token: &str) -> Result<UserId, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        let data = decode::<Claims>(token, key, &validation).map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Malformed,
        })?;
        data.claims.id.parse().map_err(|_| TokenError::Malformed)
    }
}

impl TokenService for JwtTokenService {
    fn issue_access(&self, user_id: &UserId) -> Result<String, TokenError> {
        self.issue(&self.access_encoding, self.access_ttl_secs, user_id)
    }

    fn issue_refresh(&self, user_id: &UserId) -> Result<String, TokenError> {
        self.issue(&self.refresh_encoding, self.refresh_ttl_secs, user_id)
    }

    fn verify_access(&self, token: &str) -> Result<UserId, TokenError> {
        self.verify(&self.access_decoding, token)
    }

    fn verify_refresh(&self, token: &str) -> Result<UserId, TokenError> {
        self.verify(&self.refresh_decoding, token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sign_with_exp(secret: &str, user_id: &UserId, exp: i64) -> String {
        let claims = Claims {
            id: user_id.to_string(),
            exp: exp.max(0) as usize,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn empty_secret_fails_at_construction() {
        let result = JwtTokenService::new(
            &Secret::new(String::new()),
            &Secret::new("refresh".to_string()),
            900,
            604_800,
        );
        assert!(matches!(result, Err(TokenError::Config(_))));
    }

    #[test]
    fn access_token_round_trips() {
        let svc = JwtTokenService::for_tests();
        let user_id = UserId::new();
        let token = svc.issue_access(&user_id).unwrap();
        assert_eq!(svc.verify_access(&token).unwrap(), user_id);
    }

    #[test]
    fn tokens_are_not_interchangeable_across_secrets() {
        let svc = JwtTokenService::for_tests();
        let user_id = UserId::new();

        let access = svc.issue_access(&user_id).unwrap();
        assert_eq!(svc.verify_refresh(&access), Err(TokenError::Malformed));

        let refresh = svc.issue_refresh(&user_id).unwrap();
        assert_eq!(svc.verify_access(&refresh), Err(TokenError::Malformed));
    }

    #[test]
    fn verifies_just_inside_the_expiry_window() {
        let svc = JwtTokenService::for_tests();
        let user_id = UserId::new();
        // 14m59s into a 15m window.
        let exp = Utc::now().timestamp() + 899;
        let token = sign_with_exp("test-access-secret", &user_id, exp);
        assert_eq!(svc.verify_access(&token).unwrap(), user_id);
    }

    #[test]
    fn fails_just_past_the_expiry_window() {
        let svc = JwtTokenService::for_tests();
        let user_id = UserId::new();
        // 15m01s into a 15m window: exp lies 1s in the past, leeway is zero.
        let exp = Utc::now().timestamp() - 1;
        let token = sign_with_exp("test-access-secret", &user_id, exp);
        assert_eq!(svc.verify_access(&token), Err(TokenError::Expired));
    }

    #[test]
    fn garbage_and_tampered_tokens_are_malformed() {
        let svc = JwtTokenService::for_tests();
        assert_eq!(
            svc.verify_access("not.a.token"),
            Err(TokenError::Malformed)
        );

        let mut token = svc.issue_access(&UserId::new()).unwrap();
        token.push('x');
        assert_eq!(svc.verify_access(&token), Err(TokenError::Malformed));
    }

    #[test]
    fn claims_with_a_non_uuid_id_are_malformed() {
        let svc = JwtTokenService::for_tests();
        let claims = Claims {
            id: "not-a-uuid".to_string(),
            exp: (Utc::now().timestamp() + 900) as usize,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-access-secret"),
        )
        .unwrap();
        assert_eq!(svc.verify_access(&token), Err(TokenError::Malformed));
    }
}

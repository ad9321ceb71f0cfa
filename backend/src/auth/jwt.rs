//! JWT token generation and validation
//!
//! Tokens identify an owner key, the opaque id that scopes every stored
//! document, and carry whether that owner has finished onboarding.

use anyhow::Result;
use chrono::{Duration, Utc};
use fittrack_shared::SessionTokens;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const ACCESS: &str = "access";
const REFRESH: &str = "refresh";

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (owner key)
    pub sub: String,
    /// Whether the owner has a profile
    #[serde(default)]
    pub onboarding_completed: bool,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Token type: "access" or "refresh"
    pub token_type: String,
}

/// Pre-computed JWT keys, shared through AppState
#[derive(Clone)]
pub struct JwtKeys {
    encoding: Arc<EncodingKey>,
    decoding: Arc<DecodingKey>,
}

impl JwtKeys {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: Arc::new(EncodingKey::from_secret(secret.as_bytes())),
            decoding: Arc::new(DecodingKey::from_secret(secret.as_bytes())),
        }
    }
}

/// JWT service for token operations
#[derive(Clone)]
pub struct JwtService {
    keys: JwtKeys,
    access_token_expiry_secs: i64,
    refresh_token_expiry_secs: i64,
}

impl JwtService {
    /// Call once at startup and store in AppState
    pub fn new(secret: &str, access_token_expiry_secs: i64, refresh_token_expiry_secs: i64) -> Self {
        Self {
            keys: JwtKeys::new(secret),
            access_token_expiry_secs,
            refresh_token_expiry_secs,
        }
    }

    #[inline]
    pub fn generate_access_token(&self, owner_key: &str, onboarding_completed: bool) -> Result<String> {
        self.generate_token(owner_key, onboarding_completed, ACCESS, self.access_token_expiry_secs)
    }

    #[inline]
    pub fn generate_refresh_token(&self, owner_key: &str, onboarding_completed: bool) -> Result<String> {
        self.generate_token(owner_key, onboarding_completed, REFRESH, self.refresh_token_expiry_secs)
    }

    fn generate_token(
        &self,
        owner_key: &str,
        onboarding_completed: bool,
        token_type: &str,
        expiry_secs: i64,
    ) -> Result<String> {
        let now = Utc::now();
        let exp = now + Duration::seconds(expiry_secs);

        let claims = Claims {
            sub: owner_key.to_string(),
            onboarding_completed,
            exp: exp.timestamp(),
            iat: now.timestamp(),
            token_type: token_type.to_string(),
        };

        encode(&Header::default(), &claims, &self.keys.encoding)
            .map_err(|e| anyhow::anyhow!("Failed to generate {} token: {}", token_type, e))
    }

    /// Access and refresh tokens for an owner
    pub fn issue(&self, owner_key: &str, onboarding_completed: bool) -> Result<SessionTokens> {
        Ok(SessionTokens {
            owner_key: owner_key.to_string(),
            access_token: self.generate_access_token(owner_key, onboarding_completed)?,
            refresh_token: self.generate_refresh_token(owner_key, onboarding_completed)?,
            token_type: "Bearer".to_string(),
            expires_in: self.access_token_expiry_secs,
            onboarding_completed,
        })
    }

    /// Validate a token and return claims
    #[inline]
    pub fn validate_token(&self, token: &str) -> Result<Claims> {
        let token_data = decode::<Claims>(token, &self.keys.decoding, &Validation::default())
            .map_err(|e| anyhow::anyhow!("Invalid token: {}", e))?;

        Ok(token_data.claims)
    }

    #[inline]
    pub fn validate_access_token(&self, token: &str) -> Result<Claims> {
        let claims = self.validate_token(token)?;
        if claims.token_type != ACCESS {
            return Err(anyhow::anyhow!("Not an access token"));
        }
        Ok(claims)
    }

    #[inline]
    pub fn validate_refresh_token(&self, token: &str) -> Result<Claims> {
        let claims = self.validate_token(token)?;
        if claims.token_type != REFRESH {
            return Err(anyhow::anyhow!("Not a refresh token"));
        }
        Ok(claims)
    }

    #[inline]
    pub fn access_token_expiry_secs(&self) -> i64 {
        self.access_token_expiry_secs
    }
}

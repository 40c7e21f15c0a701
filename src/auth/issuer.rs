/// Token Issuance
///
/// Builds access and refresh tokens from identity claims. Issuance is a
/// pure function of (subject, current time, configuration) and knows
/// nothing about persistence; the caller records the refresh identifier.

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::auth::claims::Claims;
use crate::auth::codec::TokenCodec;
use crate::configuration::JwtSettings;
use crate::error::AppError;

/// A freshly issued refresh token plus what the caller must persist
#[derive(Debug, Clone)]
pub struct IssuedRefresh {
    pub token: String,
    /// Revocation key, minted once per issuance and never reused
    pub token_id: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct TokenIssuer {
    codec: TokenCodec,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenIssuer {
    pub fn new(codec: TokenCodec, config: &JwtSettings) -> Self {
        Self {
            codec,
            access_ttl: Duration::minutes(config.access_token_expire_minutes),
            refresh_ttl: Duration::days(config.refresh_token_expire_days),
        }
    }

    /// Issue a short-lived access token for a subject
    ///
    /// # Errors
    /// Returns error if token encoding fails
    pub fn issue_access(&self, subject: &str) -> Result<String, AppError> {
        let claims = Claims::access(subject.to_string(), Utc::now() + self.access_ttl);
        self.codec.encode(&claims)
    }

    /// Issue a refresh token with a fresh random revocation identifier
    ///
    /// The identifier and expiry are returned alongside the token so the
    /// caller can record them in the refresh-token registry.
    ///
    /// # Errors
    /// Returns error if token encoding fails
    pub fn issue_refresh(&self, subject: &str) -> Result<IssuedRefresh, AppError> {
        let token_id = Uuid::new_v4().to_string();
        let expires_at = Utc::now() + self.refresh_ttl;
        let claims = Claims::refresh(subject.to_string(), token_id.clone(), expires_at);
        let token = self.codec.encode(&claims)?;

        Ok(IssuedRefresh {
            token,
            token_id,
            expires_at,
        })
    }
}

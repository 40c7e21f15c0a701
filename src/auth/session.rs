/// Session Lifecycle
///
/// Orchestrates login, refresh, and logout over the injected
/// repositories: verifies credentials, issues token pairs, validates
/// refresh tokens against the registry, and marks them revoked.
///
/// Per refresh-token id the states are Active, then terminally Expired
/// (time-triggered, computed at validation) or Revoked (explicit
/// logout). There is no transition back to Active.

use std::sync::Arc;

use chrono::Utc;

use crate::auth::claims::TokenType;
use crate::auth::codec::TokenCodec;
use crate::auth::issuer::TokenIssuer;
use crate::auth::password::verify_password;
use crate::error::{AppError, AuthError};
use crate::repository::{RefreshTokenRepository, UserRepository};

/// The credentials handed back to a freshly authenticated client
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

pub struct SessionLifecycle {
    users: Arc<dyn UserRepository>,
    refresh_tokens: Arc<dyn RefreshTokenRepository>,
    issuer: TokenIssuer,
    codec: TokenCodec,
}

impl SessionLifecycle {
    pub fn new(
        users: Arc<dyn UserRepository>,
        refresh_tokens: Arc<dyn RefreshTokenRepository>,
        issuer: TokenIssuer,
        codec: TokenCodec,
    ) -> Self {
        Self {
            users,
            refresh_tokens,
            issuer,
            codec,
        }
    }

    /// Authenticate with email and password and open a session
    ///
    /// An unknown email and a wrong password fail with the identical
    /// `InvalidCredentials`, so login responses cannot be used to
    /// enumerate accounts.
    ///
    /// # Errors
    /// - `InvalidCredentials` when the user is absent or the password
    ///   does not verify
    /// - `Conflict` when the freshly minted token id already exists
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenPair, AppError> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(AppError::Auth(AuthError::InvalidCredentials))?;

        if !verify_password(password, &user.hashed_password) {
            tracing::warn!(user_id = %user.id, "Login rejected: password mismatch");
            return Err(AppError::Auth(AuthError::InvalidCredentials));
        }

        let subject = user.id.to_string();
        let access_token = self.issuer.issue_access(&subject)?;
        let refresh = self.issuer.issue_refresh(&subject)?;

        self.refresh_tokens
            .record(&refresh.token_id, user.id, refresh.expires_at)
            .await?;

        tracing::info!(user_id = %user.id, "Session opened");

        Ok(TokenPair {
            access_token,
            refresh_token: refresh.token,
        })
    }

    /// Exchange a refresh token for a new access token
    ///
    /// The refresh token itself is not rotated: the same token stays
    /// valid for repeated use until its own expiry or explicit logout.
    ///
    /// # Errors
    /// - `InvalidRefreshToken` when the token does not decode or a
    ///   refresh-type token carries no id
    /// - `WrongTokenType` when the claims are not refresh-typed
    /// - `RevokedOrExpired` when the registry entry is missing, revoked,
    ///   or past its expiry
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AppError> {
        let claims = self.codec.decode(refresh_token).map_err(|e| {
            tracing::warn!("Refresh rejected: {}", e);
            AppError::Auth(AuthError::InvalidRefreshToken)
        })?;

        if claims.token_type != TokenType::Refresh {
            return Err(AppError::Auth(AuthError::WrongTokenType));
        }

        let jti = claims
            .jti
            .as_deref()
            .ok_or(AppError::Auth(AuthError::InvalidRefreshToken))?;

        let record = self
            .refresh_tokens
            .find_active(jti)
            .await?
            .ok_or(AppError::Auth(AuthError::RevokedOrExpired))?;

        if record.expires_at < Utc::now() {
            tracing::info!(user_id = %record.user_id, "Refresh token expired");
            return Err(AppError::Auth(AuthError::RevokedOrExpired));
        }

        let access_token = self.issuer.issue_access(&claims.sub)?;

        Ok(TokenPair {
            access_token,
            refresh_token: refresh_token.to_string(),
        })
    }

    /// Close a session by revoking its refresh token
    ///
    /// Decoding must succeed to extract the token id, but revocation is
    /// idempotent: an unknown or already-revoked id still acks, and a
    /// token carrying no id (an access token) is a no-op.
    ///
    /// # Errors
    /// - `InvalidRefreshToken` when the token does not decode
    pub async fn logout(&self, refresh_token: &str) -> Result<(), AppError> {
        let claims = self
            .codec
            .decode(refresh_token)
            .map_err(|_| AppError::Auth(AuthError::InvalidRefreshToken))?;

        if let Some(jti) = claims.jti.as_deref() {
            self.refresh_tokens.revoke(jti).await?;
            tracing::info!(sub = %claims.sub, "Session closed");
        }

        Ok(())
    }
}

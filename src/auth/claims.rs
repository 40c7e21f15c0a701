/// JWT Claims structure
///
/// Represents the signed payload of an issued token: subject, expiry,
/// token kind, and for refresh tokens the revocation identifier.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;

/// Kind of credential a token represents, carried in the `type` claim
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

/// Claims embedded in every issued token
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Claims {
    /// Subject (user ID as UUID string)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Token kind
    #[serde(rename = "type")]
    pub token_type: TokenType,
    /// Revocation identifier, present on refresh tokens only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
}

impl Claims {
    /// Claims for a short-lived access token
    pub fn access(subject: String, expires_at: DateTime<Utc>) -> Self {
        Self {
            sub: subject,
            exp: expires_at.timestamp(),
            iat: Utc::now().timestamp(),
            token_type: TokenType::Access,
            jti: None,
        }
    }

    /// Claims for a refresh token carrying its revocation identifier
    pub fn refresh(subject: String, token_id: String, expires_at: DateTime<Utc>) -> Self {
        Self {
            sub: subject,
            exp: expires_at.timestamp(),
            iat: Utc::now().timestamp(),
            token_type: TokenType::Refresh,
            jti: Some(token_id),
        }
    }

    /// Extract the user ID from the subject claim
    ///
    /// # Errors
    /// Returns error if the subject is not a valid UUID
    pub fn user_id(&self) -> Result<Uuid, AppError> {
        Uuid::parse_str(&self.sub)
            .map_err(|_| AppError::Internal("Invalid user ID in token".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_access_claims_creation() {
        let user_id = Uuid::new_v4();
        let expires_at = Utc::now() + Duration::minutes(30);
        let claims = Claims::access(user_id.to_string(), expires_at);

        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.exp, expires_at.timestamp());
        assert_eq!(claims.token_type, TokenType::Access);
        assert!(claims.jti.is_none());
    }

    #[test]
    fn test_refresh_claims_carry_token_id() {
        let user_id = Uuid::new_v4();
        let token_id = Uuid::new_v4().to_string();
        let expires_at = Utc::now() + Duration::days(7);
        let claims = Claims::refresh(user_id.to_string(), token_id.clone(), expires_at);

        assert_eq!(claims.token_type, TokenType::Refresh);
        assert_eq!(claims.jti.as_deref(), Some(token_id.as_str()));
    }

    #[test]
    fn test_token_type_wire_format() {
        let expires_at = Utc::now() + Duration::minutes(30);
        let claims = Claims::access(Uuid::new_v4().to_string(), expires_at);
        let json = serde_json::to_value(&claims).expect("Failed to serialize claims");

        assert_eq!(json["type"], "access");
        // Access tokens must not serialize an empty jti field
        assert!(json.get("jti").is_none());
    }

    #[test]
    fn test_user_id_extraction() {
        let user_id = Uuid::new_v4();
        let expires_at = Utc::now() + Duration::minutes(30);
        let claims = Claims::access(user_id.to_string(), expires_at);

        assert_eq!(claims.user_id().unwrap(), user_id);
    }

    #[test]
    fn test_invalid_user_id() {
        let expires_at = Utc::now() + Duration::minutes(30);
        let mut claims = Claims::access(Uuid::new_v4().to_string(), expires_at);
        claims.sub = "invalid-uuid".to_string();

        assert!(claims.user_id().is_err());
    }
}

/// Token Codec
///
/// Encodes and decodes signed, expiring claims sets. Decoding is the
/// single point where signature integrity and expiry are enforced;
/// callers never inspect claims without going through it.

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::fmt;
use std::str::FromStr;

use crate::auth::claims::Claims;
use crate::configuration::JwtSettings;
use crate::error::{AppError, ConfigError};

/// Why a token failed to decode
///
/// Callers pattern-match on the kind instead of catching; the three
/// cases map to distinct trust failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    /// Token cannot be parsed into the expected shape
    Malformed,
    /// `exp` is in the past relative to decode time
    Expired,
    /// Signature does not verify under the configured secret
    InvalidSignature,
}

impl fmt::Display for TokenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenError::Malformed => write!(f, "token is malformed"),
            TokenError::Expired => write!(f, "token has expired"),
            TokenError::InvalidSignature => write!(f, "token signature is invalid"),
        }
    }
}

impl std::error::Error for TokenError {}

/// Symmetric signing codec, built once from settings and cloned freely
#[derive(Clone)]
pub struct TokenCodec {
    header: Header,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenCodec {
    /// Build a codec from the configured secret and algorithm name
    ///
    /// # Errors
    /// Returns a config error when the algorithm identifier is unknown
    pub fn new(config: &JwtSettings) -> Result<Self, AppError> {
        let algorithm = Algorithm::from_str(&config.algorithm).map_err(|_| {
            AppError::Config(ConfigError::InvalidValue(format!(
                "unsupported signing algorithm: {}",
                config.algorithm
            )))
        })?;

        let mut validation = Validation::new(algorithm);
        // An exp strictly in the past must fail, without grace
        validation.leeway = 0;

        Ok(Self {
            header: Header::new(algorithm),
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
        })
    }

    /// Sign a claims set into an opaque bearer string
    ///
    /// # Errors
    /// Returns error if token generation fails
    pub fn encode(&self, claims: &Claims) -> Result<String, AppError> {
        encode(&self.header, claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Token generation failed: {}", e)))
    }

    /// Verify and extract the claims from a token
    pub fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                _ => TokenError::Malformed,
            })
    }
}

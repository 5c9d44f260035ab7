//! JWT issuing and verification.

use ecoscore_core::{Error, Result};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Token lifetime: 7 days.
const TOKEN_TTL: i64 = 7 * 24 * 3600;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // User ID
    pub iat: i64,    // Issued at
    pub exp: i64,    // Expiration
    pub jti: String, // JWT ID (unique identifier)
}

impl Claims {
    pub fn new(user_id: i64) -> Self {
        let now = chrono::Utc::now().timestamp();
        Self {
            sub: user_id.to_string(),
            iat: now,
            exp: now + TOKEN_TTL,
            jti: Uuid::new_v4().to_string(),
        }
    }

    pub fn user_id(&self) -> Result<i64> {
        self.sub
            .parse()
            .map_err(|_| Error::Auth("Invalid subject claim".into()))
    }
}

/// JWT manager using HS256 (shared secret).
pub struct JwtManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtManager {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    pub fn issue(&self, user_id: i64) -> Result<String> {
        encode(&Header::default(), &Claims::new(user_id), &self.encoding_key)
            .map_err(|e| Error::Auth(format!("Token signing failed: {}", e)))
    }

    pub fn verify(&self, token: &str) -> Result<Claims> {
        decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| Error::Auth(format!("Invalid token: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_and_verify_round_trip() {
        let manager = JwtManager::new("test-secret");
        let token = manager.issue(42).unwrap();
        let claims = manager.verify(&token).unwrap();
        assert_eq!(claims.user_id().unwrap(), 42);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = JwtManager::new("secret-a").issue(42).unwrap();
        assert!(JwtManager::new("secret-b").verify(&token).is_err());
    }

    #[test]
    fn test_garbage_token_rejected() {
        let manager = JwtManager::new("test-secret");
        assert!(manager.verify("not-a-token").is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let manager = JwtManager::new("test-secret");
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: "42".into(),
            iat: now - TOKEN_TTL - 3600,
            exp: now - 3600,
            jti: Uuid::new_v4().to_string(),
        };
        let token = encode(&Header::default(), &claims, &manager.encoding_key).unwrap();
        assert!(manager.verify(&token).is_err());
    }
}

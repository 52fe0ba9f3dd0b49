//! Bearer-token issuing and verification.
//!
//! Grounded in the teacher's `JwtService` (constructed once at startup from
//! `Config` and shared behind an `Arc`), adapted to encode an integer
//! employee id and the `is_manager` capability flag the spec's HTTP surface
//! gates on.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::common::id::EmployeeId;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the employee id, as a string (JWT convention).
    pub sub: String,
    pub is_manager: bool,
    pub exp: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    #[error("token expired or malformed")]
    Invalid,
}

pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    expire_days: i64,
}

impl JwtService {
    pub fn new(secret: &str, algorithm_name: &str, expire_days: i64) -> Self {
        let algorithm = match algorithm_name {
            "HS384" => Algorithm::HS384,
            "HS512" => Algorithm::HS512,
            _ => Algorithm::HS256,
        };
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            algorithm,
            expire_days,
        }
    }

    pub fn issue(&self, employee_id: EmployeeId, is_manager: bool) -> Result<String, JwtError> {
        let exp = (Utc::now() + Duration::days(self.expire_days)).timestamp();
        let claims = Claims {
            sub: employee_id.get().to_string(),
            is_manager,
            exp,
        };
        jsonwebtoken::encode(
            &Header::new(self.algorithm),
            &claims,
            &self.encoding_key,
        )
        .map_err(|_| JwtError::Invalid)
    }

    pub fn verify(&self, token: &str) -> Result<Claims, JwtError> {
        let validation = Validation::new(self.algorithm);
        jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|_| JwtError::Invalid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issues_and_verifies_a_token() {
        let service = JwtService::new("test-secret", "HS256", 3);
        let employee_id: EmployeeId = 7.into();
        let token = service.issue(employee_id, true).unwrap();
        let claims = service.verify(&token).unwrap();
        assert_eq!(claims.sub, "7");
        assert!(claims.is_manager);
    }

    #[test]
    fn rejects_a_token_signed_with_a_different_secret() {
        let issuer = JwtService::new("secret-a", "HS256", 3);
        let verifier = JwtService::new("secret-b", "HS256", 3);
        let token = issuer.issue(1.into(), false).unwrap();
        assert!(verifier.verify(&token).is_err());
    }
}

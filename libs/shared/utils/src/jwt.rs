use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::{Duration, Utc};
use hmac::{Hmac, Mac};
use serde_json::json;
use sha2::Sha256;
use tracing::debug;

use shared_models::auth::{CurrentUser, JwtClaims};

type HmacSha256 = Hmac<Sha256>;

/// Sign an HS256 token carrying the user's session claims.
pub fn sign_token(user: &CurrentUser, jwt_secret: &str, expire_minutes: i64) -> Result<String, String> {
    if jwt_secret.is_empty() {
        return Err("JWT secret is not set".to_string());
    }

    let now = Utc::now();
    let exp = now + Duration::minutes(expire_minutes);

    let header = json!({
        "alg": "HS256",
        "typ": "JWT"
    });

    let claims = json!({
        "sub": user.id.to_string(),
        "exp": exp.timestamp(),
        "iat": now.timestamp(),
        "email": user.email,
        "name": user.name,
        "roleId": user.role_id,
    });

    let header_b64 = URL_SAFE_NO_PAD.encode(header.to_string());
    let claims_b64 = URL_SAFE_NO_PAD.encode(claims.to_string());
    let signing_input = format!("{}.{}", header_b64, claims_b64);

    let mut mac = HmacSha256::new_from_slice(jwt_secret.as_bytes())
        .map_err(|_| "Failed to create HMAC".to_string())?;
    mac.update(signing_input.as_bytes());
    let signature = mac.finalize().into_bytes();
    let signature_b64 = URL_SAFE_NO_PAD.encode(signature);

    Ok(format!("{}.{}", signing_input, signature_b64))
}

/// Verify signature and expiry, returning the embedded claims.
pub fn validate_token(token: &str, jwt_secret: &str) -> Result<JwtClaims, String> {
    if jwt_secret.is_empty() {
        return Err("JWT secret is not set".to_string());
    }

    // Split token into parts
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return Err("Invalid token format".to_string());
    }

    let header_b64 = parts[0];
    let claims_b64 = parts[1];
    let signature_b64 = parts[2];

    let signature = match URL_SAFE_NO_PAD.decode(signature_b64) {
        Ok(sig) => sig,
        Err(e) => {
            debug!("Failed to decode signature: {}", e);
            return Err("Invalid signature encoding".to_string());
        }
    };

    let signing_input = format!("{}.{}", header_b64, claims_b64);

    let mut mac = HmacSha256::new_from_slice(jwt_secret.as_bytes())
        .map_err(|_| "Failed to create HMAC".to_string())?;
    mac.update(signing_input.as_bytes());

    if mac.verify_slice(&signature).is_err() {
        debug!("Token signature verification failed");
        return Err("Invalid token signature".to_string());
    }

    let claims_json = URL_SAFE_NO_PAD
        .decode(claims_b64)
        .ok()
        .and_then(|bytes| String::from_utf8(bytes).ok())
        .ok_or_else(|| "Invalid claims encoding".to_string())?;

    let claims: JwtClaims = match serde_json::from_str(&claims_json) {
        Ok(c) => c,
        Err(e) => {
            debug!("Failed to parse claims: {}", e);
            return Err("Invalid claims format".to_string());
        }
    };

    // Check expiration
    if let Some(exp) = claims.exp {
        let now = Utc::now().timestamp() as u64;
        if exp < now {
            debug!("Token expired at {} (now: {})", exp, now);
            return Err("Token expired".to_string());
        }
    }

    debug!("Token validated successfully for user: {}", claims.sub);
    Ok(claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestUser;

    const SECRET: &str = "test-secret-key-for-jwt-validation-must-be-long-enough";

    #[test]
    fn sign_then_validate_round_trip() {
        let user = TestUser::doctor("doc@example.com").to_current_user();
        let token = sign_token(&user, SECRET, 60).unwrap();

        let claims = validate_token(&token, SECRET).unwrap();
        assert_eq!(claims.sub, user.id.to_string());
        assert_eq!(claims.email.as_deref(), Some("doc@example.com"));
        assert_eq!(claims.role_id, Some(2));
    }

    #[test]
    fn expired_token_is_rejected() {
        let user = TestUser::default().to_current_user();
        let token = sign_token(&user, SECRET, -5).unwrap();

        assert_eq!(validate_token(&token, SECRET), Err("Token expired".to_string()));
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let user = TestUser::default().to_current_user();
        // sign with the wrong key, verify with the right one
        let token = sign_token(&user, "another-secret-key", 60).unwrap();
        assert_eq!(
            validate_token(&token, SECRET),
            Err("Invalid token signature".to_string())
        );
    }

    #[test]
    fn malformed_token_is_rejected() {
        assert!(validate_token("not-a-jwt", SECRET).is_err());
        assert!(validate_token("a.b", SECRET).is_err());
        assert!(validate_token("a.b.c", SECRET).is_err());
    }

    #[test]
    fn empty_secret_is_refused() {
        let user = TestUser::default().to_current_user();
        assert!(sign_token(&user, "", 60).is_err());
        assert!(validate_token("a.b.c", "").is_err());
    }
}

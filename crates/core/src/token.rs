//! Signed admin session tokens.
//!
//! A token is `base64url(claims).base64url(signature)`, both without padding.
//! Claims are a small JSON document; the signature is HMAC-SHA256 over the
//! encoded claims under a server-side secret. Signature comparison is
//! constant-time, then the validity window is checked.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Duration, Utc};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// How long a minted token stays valid: one day.
pub const TOKEN_TTL_SECONDS: i64 = 60 * 60 * 24;

/// Claims carried inside a token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Who the token was minted for.
    pub sub: String,
    /// Issued-at, Unix seconds.
    pub iat: i64,
    /// Expiry, Unix seconds. The token is invalid at and after this instant.
    pub exp: i64,
}

/// Reasons a token fails to mint or verify.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("token is malformed")]
    Malformed,
    #[error("token signature does not match")]
    BadSignature,
    #[error("token has expired")]
    Expired,
    #[error("token could not be signed")]
    Signing,
}

/// Mint a token for `subject`, valid for [`TOKEN_TTL_SECONDS`] from `now`.
pub fn mint(secret: &[u8], subject: &str, now: DateTime<Utc>) -> Result<String, TokenError> {
    let claims = Claims {
        sub: subject.to_owned(),
        iat: now.timestamp(),
        exp: (now + Duration::seconds(TOKEN_TTL_SECONDS)).timestamp(),
    };
    let payload = serde_json::to_vec(&claims).map_err(|_| TokenError::Signing)?;
    let encoded = URL_SAFE_NO_PAD.encode(&payload);

    let mut mac = HmacSha256::new_from_slice(secret).map_err(|_| TokenError::Signing)?;
    mac.update(encoded.as_bytes());
    let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

    Ok(format!("{encoded}.{signature}"))
}

/// Verify a token and return its claims.
///
/// Checks the signature before parsing the claims, so attacker-controlled
/// payloads never reach the JSON parser.
pub fn verify(secret: &[u8], token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
    let (encoded, signature_b64) = token.split_once('.').ok_or(TokenError::Malformed)?;
    let signature = URL_SAFE_NO_PAD
        .decode(signature_b64)
        .map_err(|_| TokenError::Malformed)?;

    let mut mac = HmacSha256::new_from_slice(secret).map_err(|_| TokenError::Signing)?;
    mac.update(encoded.as_bytes());
    mac.verify_slice(&signature)
        .map_err(|_| TokenError::BadSignature)?;

    let payload = URL_SAFE_NO_PAD
        .decode(encoded)
        .map_err(|_| TokenError::Malformed)?;
    let claims: Claims = serde_json::from_slice(&payload).map_err(|_| TokenError::Malformed)?;

    if now.timestamp() >= claims.exp {
        return Err(TokenError::Expired);
    }
    Ok(claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"0f9c1f4c8d2e4b6a9c3e5d7f1a2b4c6d";

    fn now() -> DateTime<Utc> {
        "2024-03-01T12:00:00Z".parse().unwrap()
    }

    #[test]
    fn mint_then_verify_round_trips_claims() {
        let token = mint(SECRET, "admin", now()).unwrap();
        let claims = verify(SECRET, &token, now()).unwrap();
        assert_eq!(claims.sub, "admin");
        assert_eq!(claims.iat, now().timestamp());
        assert_eq!(claims.exp, now().timestamp() + TOKEN_TTL_SECONDS);
    }

    #[test]
    fn expired_tokens_are_rejected_at_the_boundary() {
        let token = mint(SECRET, "admin", now()).unwrap();
        let at_expiry = now() + Duration::seconds(TOKEN_TTL_SECONDS);
        assert_eq!(verify(SECRET, &token, at_expiry), Err(TokenError::Expired));

        let just_before = at_expiry - Duration::seconds(1);
        assert!(verify(SECRET, &token, just_before).is_ok());
    }

    #[test]
    fn wrong_secret_is_a_bad_signature() {
        let token = mint(SECRET, "admin", now()).unwrap();
        assert_eq!(
            verify(b"another-secret-entirely-32-bytes", &token, now()),
            Err(TokenError::BadSignature)
        );
    }

    #[test]
    fn tampered_payload_is_a_bad_signature() {
        let token = mint(SECRET, "admin", now()).unwrap();
        let (payload, signature) = token.split_once('.').unwrap();
        let other = mint(SECRET, "visitor", now()).unwrap();
        let (other_payload, _) = other.split_once('.').unwrap();
        assert_ne!(payload, other_payload);

        let forged = format!("{other_payload}.{signature}");
        assert_eq!(
            verify(SECRET, &forged, now()),
            Err(TokenError::BadSignature)
        );
    }

    #[test]
    fn garbage_is_malformed() {
        assert_eq!(
            verify(SECRET, "no-dot-here", now()),
            Err(TokenError::Malformed)
        );
        assert_eq!(
            verify(SECRET, "a.b.c", now()),
            Err(TokenError::Malformed)
        );
        assert_eq!(verify(SECRET, "", now()), Err(TokenError::Malformed));
    }

    #[test]
    fn tokens_use_unpadded_url_safe_base64() {
        let token = mint(SECRET, "admin", now()).unwrap();
        assert!(!token.contains('='));
        assert!(!token.contains('+'));
        assert!(!token.contains('/'));
    }
}
